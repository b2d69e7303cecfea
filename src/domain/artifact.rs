use tracing::info;

use crate::degraded::Degradation;

/// Artifact type used when neither the store nor the configuration names one
pub const DEFAULT_ARTIFACT_TYPE: &str = "LOCAL";

pub const RELEASE: &str = "RELEASE";

/// Artifact types the tool knows about. Others are allowed.
pub const RECOGNIZED_ARTIFACT_TYPES: [&str; 7] = [
    "LOCAL",
    "SNAPSHOT",
    "CANARY",
    "ALPHA",
    "BETA",
    RELEASE,
    "EXPERIMENTAL",
];

pub fn is_recognized(value: &str) -> bool {
    RECOGNIZED_ARTIFACT_TYPES.contains(&value)
}

/// Case-insensitive RELEASE check
pub fn is_release(value: &str) -> bool {
    value.eq_ignore_ascii_case(RELEASE)
}

/// Soft-validates an artifact type.
///
/// An unrecognized type is logged and reported but never rejected; it may be a
/// typo or a deliberately unusual type.
pub fn check_artifact_type(value: &str) -> Option<Degradation> {
    if is_recognized(value) {
        return None;
    }
    info!(
        artifact_type = value,
        "artifact type does not match a recognized type; using it unchanged"
    );
    Some(Degradation::UnrecognizedArtifactType {
        value: value.to_string(),
    })
}
