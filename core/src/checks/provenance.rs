use crate::checks::CheckGroup;
use crate::metadata::{MetaValue, MetadataRecord};

pub const HAS_C2PA_MANIFEST: &str = "has_c2pa_manifest";
pub const VALID_SIGNATURE: &str = "valid_signature";
pub const HASH_VALIDATION: &str = "hash_validation";
pub const AI_DISCLOSURE: &str = "ai_disclosure";
pub const VALIDATION_PASSED: &str = "validation_passed";

pub const PROVENANCE_CHECK_IDS: &[&str] = &[
    HAS_C2PA_MANIFEST,
    VALID_SIGNATURE,
    HASH_VALIDATION,
    AI_DISCLOSURE,
    VALIDATION_PASSED,
];

const C2PA_INDICATORS: &[&str] = &["c2pa", "JUMD", "ActiveManifestUrl", "ClaimSignatureUrl"];

const AI_DISCLOSURE_KEYWORDS: &[&str] =
    &["generative ai", "google ai", "algorithmicmedia", "created"];

// C2PA validation success codes that count as a passed validation.
const CRITICAL_VALIDATIONS: &[&str] = &["signingCredential", "timeStamp", "claimSignature"];

/// C2PA-style provenance signals. Presence only: signature fields are
/// checked for existence, never cryptographically verified.
pub fn check_c2pa_provenance(meta: &MetadataRecord) -> CheckGroup {
    let mut group = CheckGroup::new(PROVENANCE_CHECK_IDS);

    let manifest = C2PA_INDICATORS.iter().any(|indicator| {
        let indicator = indicator.to_lowercase();
        meta.iter().any(|(key, value)| {
            key.to_lowercase().contains(&indicator)
                || value.as_text().to_lowercase().contains(&indicator)
        })
    });
    group.set(HAS_C2PA_MANIFEST, manifest);

    group.set(VALID_SIGNATURE, meta.contains_key("ClaimSignatureUrl"));
    group.set(HASH_VALIDATION, meta.contains_key("ActiveManifestHash"));

    let disclosure = AI_DISCLOSURE_KEYWORDS.iter().any(|keyword| {
        meta.iter()
            .any(|(_, value)| value.as_text().to_lowercase().contains(keyword))
    });
    group.set(AI_DISCLOSURE, disclosure);

    // The success-code field holds a list of validation code strings;
    // a scalar value never matches.
    if let Some(codes) = meta
        .get("ValidationResultsActiveManifestSuccessCode")
        .and_then(MetaValue::as_list)
    {
        let passed = CRITICAL_VALIDATIONS
            .iter()
            .any(|critical| codes.iter().any(|code| code.contains(critical)));
        group.set(VALIDATION_PASSED, passed);
    }

    group
}
