use crate::checks::CheckGroup;
use crate::metadata::MetadataRecord;

pub const EXPLICIT_AI_CREDIT: &str = "explicit_ai_credit";
pub const GENERATIVE_ACTIONS: &str = "generative_actions";
pub const DIGITAL_SOURCE_TYPE: &str = "digital_source_type";
pub const CREATION_TOOLS: &str = "creation_tools";

pub const AI_CHECK_IDS: &[&str] = &[
    EXPLICIT_AI_CREDIT,
    GENERATIVE_ACTIONS,
    DIGITAL_SOURCE_TYPE,
    CREATION_TOOLS,
];

const CREDIT_FIELDS: &[&str] = &["Credit", "Creator", "Software", "ProcessingSoftware"];

const AI_CREDIT_TERMS: &[&str] = &[
    "ai",
    "generative",
    "stable diffusion",
    "midjourney",
    "dall-e",
    "google ai",
];

// Matched against the raw ActionsDescription text, case-sensitive.
const GENERATIVE_ACTION_TERMS: &[&str] = &["generative", "created", "ai"];

/// Signals suggesting generative-AI origin: tool credits, manifest action
/// descriptions, IPTC digital source type, and claim generator presence.
pub fn check_ai_indicators(meta: &MetadataRecord) -> CheckGroup {
    let mut group = CheckGroup::new(AI_CHECK_IDS);

    for field in CREDIT_FIELDS {
        if let Some(value) = meta.text(field) {
            let value = value.to_lowercase();
            if AI_CREDIT_TERMS.iter().any(|term| value.contains(term)) {
                group.set(EXPLICIT_AI_CREDIT, true);
            }
        }
    }

    if let Some(description) = meta.text("ActionsDescription") {
        group.set(
            GENERATIVE_ACTIONS,
            GENERATIVE_ACTION_TERMS
                .iter()
                .any(|term| description.contains(term)),
        );
    }

    if let Some(source_type) = meta.text("DigitalSourceType") {
        group.set(
            DIGITAL_SOURCE_TYPE,
            source_type.to_lowercase().contains("algorithmicmedia"),
        );
    }

    group.set(CREATION_TOOLS, meta.contains_key("Claim_Generator_InfoName"));

    group
}
