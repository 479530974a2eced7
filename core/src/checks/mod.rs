pub mod ai_indicators;
pub mod integrity;
pub mod provenance;
pub mod tampering;

use crate::metadata::MetadataRecord;
use serde::Serialize;

/// One named boolean check inside a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Check {
    pub id: &'static str,
    pub passed: bool,
}

/// The fixed, ordered set of checks one checker produces. Every declared id
/// is always present; checks that did not trigger stay false.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckGroup {
    pub checks: Vec<Check>,
}

impl CheckGroup {
    pub fn new(ids: &'static [&'static str]) -> Self {
        CheckGroup {
            checks: ids
                .iter()
                .map(|&id| Check { id, passed: false })
                .collect(),
        }
    }

    pub fn set(&mut self, id: &str, passed: bool) {
        for check in &mut self.checks {
            if check.id == id {
                check.passed = passed;
                return;
            }
        }
    }

    pub fn is_passed(&self, id: &str) -> bool {
        self.checks.iter().any(|c| c.id == id && c.passed)
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    /// Fraction of passed checks, the group's raw score contribution.
    pub fn ratio(&self) -> f64 {
        if self.checks.is_empty() {
            return 0.0;
        }
        self.passed_count() as f64 / self.checks.len() as f64
    }

    pub fn any_passed(&self) -> bool {
        self.checks.iter().any(|c| c.passed)
    }

    pub fn none_passed(&self) -> bool {
        !self.any_passed()
    }
}

/// The four check groups computed for one analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisChecks {
    pub integrity: CheckGroup,
    pub c2pa: CheckGroup,
    pub ai: CheckGroup,
    pub tampering: CheckGroup,
}

impl AnalysisChecks {
    /// Runs every checker against one record. The checkers are independent;
    /// order carries no meaning.
    pub fn collect(meta: &MetadataRecord) -> Self {
        AnalysisChecks {
            integrity: integrity::check_basic_integrity(meta),
            c2pa: provenance::check_c2pa_provenance(meta),
            ai: ai_indicators::check_ai_indicators(meta),
            tampering: tampering::check_tampering_indicators(meta),
        }
    }
}
