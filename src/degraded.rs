use std::fmt;

/// Conditions under which a version operation fell back to a simpler result.
/// None of these abort the operation; they are reported to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Degradation {
    /// Remote build requested but no build-number variable is configured
    MissingBuildNumberVar,
    /// The configured build-number variable is unset or blank
    MissingBuildNumber { var: String },
    /// Artifact type outside the recognized set; still used as-is
    UnrecognizedArtifactType { value: String },
    /// Patch decrement requested at zero; the version is left unchanged
    PatchFloor,
    /// Store carries a `remote-build` value that is not a boolean
    UnparsableRemoteBuildFlag { value: String },
}

impl Degradation {
    /// Whether this is only informational rather than a fallback
    pub fn is_notice(&self) -> bool {
        matches!(self, Degradation::UnrecognizedArtifactType { .. })
    }
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Degradation::MissingBuildNumberVar => write!(
                f,
                "No build number variable configured (set `ci_build_number_env_var`); version will not include a build number"
            ),
            Degradation::MissingBuildNumber { var } => write!(
                f,
                "Build number variable '{}' is not set; version will not include a build number",
                var
            ),
            Degradation::UnrecognizedArtifactType { value } => write!(
                f,
                "Artifact type '{}' is not a recognized type; it will be used as given",
                value
            ),
            Degradation::PatchFloor => write!(
                f,
                "Cannot decrement patch below 0; version left unchanged"
            ),
            Degradation::UnparsableRemoteBuildFlag { value } => write!(
                f,
                "Cannot parse remote-build value '{}'; treating build as local",
                value
            ),
        }
    }
}
