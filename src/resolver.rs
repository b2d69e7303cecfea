//! Version string resolution.
//!
//! Combines persisted [VersionFields], a [VersionConfig] and an [Environment]
//! into the final version string. Resolution never fails: a missing build
//! number variable or value falls back to the local format and is recorded as
//! a [Degradation].
//!
//! Local builds produce `major.minor.patch-TYPE`, or the bare
//! `major.minor.patch` for releases without the release tag. Remote builds
//! with a build number produce `major.minor.patch.BUILD-TYPE`; for releases
//! the `include_release_tag` / `include_build_number` pair picks between
//! `X.Y.Z`, `X.Y.Z-RELEASE`, `X.Y.Z.BUILD` and `X.Y.Z.BUILD-RELEASE`.

use tracing::{info, warn};

use crate::config::VersionConfig;
use crate::degraded::Degradation;
use crate::domain::artifact::{check_artifact_type, is_release, RELEASE};
use crate::domain::VersionFields;
use crate::env::Environment;

/// Build-number variables of well-known CI providers. Recognition only affects logging.
pub const KNOWN_BUILD_NUMBER_VARS: [&str; 2] = ["BUILD_RUN_NUMBER", "BITBUCKET_BUILD_NUMBER"];

/// Outcome of resolving a version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The final version string
    pub version: String,
    /// Artifact type the version was resolved with
    pub artifact_type: String,
    /// Build number included in the version, if any
    pub build_number: Option<String>,
    /// Fallbacks taken while resolving
    pub degradations: Vec<Degradation>,
}

/// Resolve the version string for `fields` under `config`.
pub fn resolve<E>(fields: &VersionFields, config: &VersionConfig, env: &E) -> Resolution
where
    E: Environment + ?Sized,
{
    let mut degradations = Vec::new();
    let base = fields.to_string();
    let artifact_type = effective_artifact_type(fields, config, &mut degradations);

    let build_number = if config.remote_build {
        lookup_build_number(config, env, &mut degradations)
    } else {
        None
    };

    let version = match build_number.as_deref() {
        Some(build) => remote_version(&base, &artifact_type, build, config),
        None => local_version(&base, &artifact_type, config.include_release_tag),
    };

    Resolution {
        version,
        artifact_type,
        build_number,
        degradations,
    }
}

/// The configured override (upper-cased and soft-checked) or the persisted type
pub fn effective_artifact_type(
    fields: &VersionFields,
    config: &VersionConfig,
    degradations: &mut Vec<Degradation>,
) -> String {
    match config.artifact_type_override() {
        Some(overridden) => {
            degradations.extend(check_artifact_type(&overridden));
            overridden
        }
        None => fields.artifact_type.clone(),
    }
}

fn lookup_build_number<E>(
    config: &VersionConfig,
    env: &E,
    degradations: &mut Vec<Degradation>,
) -> Option<String>
where
    E: Environment + ?Sized,
{
    let Some(var) = config.build_number_var() else {
        warn!("no build number variable configured; version will not include a build number");
        degradations.push(Degradation::MissingBuildNumberVar);
        return None;
    };

    if KNOWN_BUILD_NUMBER_VARS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(var))
    {
        info!(var, "build number variable matches a known CI provider variable");
    } else {
        info!(var, "build number variable is not a known CI provider variable; reading it anyway");
    }

    match env.var(var).map(|v| v.trim().to_string()) {
        Some(build) if !build.is_empty() => Some(build),
        _ => {
            warn!(var, "build number variable is not set; version will not include a build number");
            degradations.push(Degradation::MissingBuildNumber {
                var: var.to_string(),
            });
            None
        }
    }
}

fn local_version(base: &str, artifact_type: &str, include_release_tag: bool) -> String {
    if is_release(artifact_type) && !include_release_tag {
        base.to_string()
    } else {
        format!("{}-{}", base, artifact_type)
    }
}

fn remote_version(base: &str, artifact_type: &str, build: &str, config: &VersionConfig) -> String {
    if is_release(artifact_type) {
        match (config.include_release_tag, config.include_build_number) {
            (false, false) => return base.to_string(),
            (true, false) => return format!("{}-{}", base, RELEASE),
            (false, true) => return format!("{}.{}", base, build),
            (true, true) => {}
        }
    }
    format!("{}.{}-{}", base, build, artifact_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MockEnvironment;

    fn local(tag: bool) -> VersionConfig {
        VersionConfig {
            include_release_tag: tag,
            ..VersionConfig::default()
        }
    }

    fn remote(var: Option<&str>, tag: bool, number: bool) -> VersionConfig {
        VersionConfig {
            remote_build: true,
            include_release_tag: tag,
            include_build_number: number,
            ci_build_number_env_var: var.map(str::to_string),
            ..VersionConfig::default()
        }
    }

    fn ci(value: &str) -> MockEnvironment {
        MockEnvironment::new().with("CI_NUM", value)
    }

    #[test]
    fn test_local_release_without_tag_is_bare() {
        let fields = VersionFields::new(1, 2, 3, "RELEASE");
        let res = resolve(&fields, &local(false), &MockEnvironment::new());
        assert_eq!(res.version, "1.2.3");
        assert!(res.degradations.is_empty());
    }

    #[test]
    fn test_local_release_with_tag() {
        let fields = VersionFields::new(1, 2, 3, "RELEASE");
        let res = resolve(&fields, &local(true), &MockEnvironment::new());
        assert_eq!(res.version, "1.2.3-RELEASE");
    }

    #[test]
    fn test_local_default_suffix() {
        let fields = VersionFields::new(1, 2, 3, "SNAPSHOT");
        let res = resolve(&fields, &local(false), &MockEnvironment::new());
        assert_eq!(res.version, "1.2.3-SNAPSHOT");
        assert_eq!(res.build_number, None);
    }

    #[test]
    fn test_local_ignores_build_number_even_when_available() {
        let fields = VersionFields::new(1, 2, 3, "BETA");
        let config = VersionConfig {
            ci_build_number_env_var: Some("CI_NUM".to_string()),
            ..VersionConfig::default()
        };
        let res = resolve(&fields, &config, &ci("42"));
        assert_eq!(res.version, "1.2.3-BETA");
    }

    #[test]
    fn test_override_wins_and_is_uppercased() {
        let fields = VersionFields::new(1, 2, 3, "SNAPSHOT");
        let config = VersionConfig {
            artifact_type: Some("canary".to_string()),
            ..VersionConfig::default()
        };
        let res = resolve(&fields, &config, &MockEnvironment::new());
        assert_eq!(res.version, "1.2.3-CANARY");
        assert_eq!(res.artifact_type, "CANARY");
    }

    #[test]
    fn test_release_override_suppresses_suffix() {
        let fields = VersionFields::new(1, 2, 3, "SNAPSHOT");
        let config = VersionConfig {
            artifact_type: Some("release".to_string()),
            ..VersionConfig::default()
        };
        let res = resolve(&fields, &config, &MockEnvironment::new());
        assert_eq!(res.version, "1.2.3");
    }

    #[test]
    fn test_unrecognized_override_is_used_and_reported() {
        let fields = VersionFields::new(1, 0, 0, "LOCAL");
        let config = VersionConfig {
            artifact_type: Some("nightly".to_string()),
            ..VersionConfig::default()
        };
        let res = resolve(&fields, &config, &MockEnvironment::new());
        assert_eq!(res.version, "1.0.0-NIGHTLY");
        assert_eq!(
            res.degradations,
            vec![Degradation::UnrecognizedArtifactType {
                value: "NIGHTLY".to_string()
            }]
        );
    }

    #[test]
    fn test_remote_with_build_number() {
        let fields = VersionFields::new(2, 0, 0, "BETA");
        let res = resolve(&fields, &remote(Some("CI_NUM"), false, false), &ci("42"));
        assert_eq!(res.version, "2.0.0.42-BETA");
        assert_eq!(res.build_number, Some("42".to_string()));
        assert!(res.degradations.is_empty());
    }

    #[test]
    fn test_remote_missing_build_number_degrades() {
        let fields = VersionFields::new(2, 0, 0, "BETA");
        let res = resolve(
            &fields,
            &remote(Some("CI_NUM"), false, false),
            &MockEnvironment::new(),
        );
        assert_eq!(res.version, "2.0.0-BETA");
        assert_eq!(
            res.degradations,
            vec![Degradation::MissingBuildNumber {
                var: "CI_NUM".to_string()
            }]
        );
    }

    #[test]
    fn test_remote_blank_build_number_degrades() {
        let fields = VersionFields::new(2, 0, 0, "BETA");
        let res = resolve(&fields, &remote(Some("CI_NUM"), false, false), &ci("  "));
        assert_eq!(res.version, "2.0.0-BETA");
    }

    #[test]
    fn test_remote_without_variable_name_uses_local_format() {
        let fields = VersionFields::new(2, 0, 0, "RELEASE");
        for var in [None, Some(""), Some("   ")] {
            let res = resolve(&fields, &remote(var, false, true), &ci("42"));
            assert_eq!(res.version, "2.0.0");
            assert_eq!(res.degradations, vec![Degradation::MissingBuildNumberVar]);
        }
    }

    #[test]
    fn test_remote_release_combinations() {
        let fields = VersionFields::new(3, 1, 4, "RELEASE");
        let env = ci("15");
        let cases = [
            (false, false, "3.1.4"),
            (true, false, "3.1.4-RELEASE"),
            (false, true, "3.1.4.15"),
            (true, true, "3.1.4.15-RELEASE"),
        ];
        for (tag, number, expected) in cases {
            let res = resolve(&fields, &remote(Some("CI_NUM"), tag, number), &env);
            assert_eq!(
                res.version, expected,
                "include_release_tag={} include_build_number={}",
                tag, number
            );
        }
    }

    #[test]
    fn test_remote_release_missing_build_number_uses_local_format() {
        let fields = VersionFields::new(3, 1, 4, "RELEASE");
        let env = MockEnvironment::new();
        let res = resolve(&fields, &remote(Some("CI_NUM"), false, true), &env);
        assert_eq!(res.version, "3.1.4");
        let res = resolve(&fields, &remote(Some("CI_NUM"), true, true), &env);
        assert_eq!(res.version, "3.1.4-RELEASE");
    }

    #[test]
    fn test_remote_non_release_ignores_include_flags() {
        // Only releases consult include_release_tag / include_build_number.
        let fields = VersionFields::new(1, 0, 0, "SNAPSHOT");
        let env = ci("9");
        for (tag, number) in [(false, false), (true, false), (false, true), (true, true)] {
            let res = resolve(&fields, &remote(Some("CI_NUM"), tag, number), &env);
            assert_eq!(res.version, "1.0.0.9-SNAPSHOT");
        }
    }

    #[test]
    fn test_known_ci_variable_behaves_like_any_other() {
        let fields = VersionFields::new(1, 0, 0, "ALPHA");
        let env = MockEnvironment::new()
            .with("BUILD_RUN_NUMBER", "7")
            .with("MY_BUILD", "7");
        let known = resolve(&fields, &remote(Some("BUILD_RUN_NUMBER"), false, false), &env);
        let custom = resolve(&fields, &remote(Some("MY_BUILD"), false, false), &env);
        assert_eq!(known.version, "1.0.0.7-ALPHA");
        assert_eq!(known.version, custom.version);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let fields = VersionFields::new(2, 0, 0, "BETA");
        let config = remote(Some("CI_NUM"), false, false);
        let env = ci("42");
        assert_eq!(resolve(&fields, &config, &env), resolve(&fields, &config, &env));
    }
}
