pub mod analyzer;
pub mod batch;
pub mod checks;
pub mod extract;
pub mod metadata;
pub mod report;
pub mod scoring;

pub mod error;
