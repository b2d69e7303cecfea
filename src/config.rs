use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::degraded::Degradation;
use crate::error::{Result, StampError};
use crate::store::OrderedStore;

/// File name searched for in the working directory
pub const CONFIG_FILE_NAME: &str = "semver-stamp.toml";

/// Store key the original build scripts used to flag CI builds
pub const REMOTE_BUILD_KEY: &str = "remote-build";

/// Controls how a version string is resolved and where version state lives.
///
/// ```toml
/// remote_build = true
/// ci_build_number_env_var = "BUILD_RUN_NUMBER"
/// artifact_type = "snapshot"
/// include_release_tag = true
/// include_build_number = true
/// store_path = "src/main/resources/version.properties"
/// ```
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct VersionConfig {
    /// Build runs on a CI host; enables build-number resolution
    #[serde(default)]
    pub remote_build: bool,

    /// Append `-RELEASE` to release versions
    #[serde(default)]
    pub include_release_tag: bool,

    /// Append the build number to release versions
    #[serde(default)]
    pub include_build_number: bool,

    /// Name of the environment variable holding the CI build number
    #[serde(default)]
    pub ci_build_number_env_var: Option<String>,

    /// Overrides the persisted artifact type when set
    #[serde(default)]
    pub artifact_type: Option<String>,

    /// Properties file holding the version fields
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

/// Returns the default version store path.
fn default_store_path() -> PathBuf {
    PathBuf::from("gradle.properties")
}

impl Default for VersionConfig {
    fn default() -> Self {
        VersionConfig {
            remote_build: false,
            include_release_tag: false,
            include_build_number: false,
            ci_build_number_env_var: None,
            artifact_type: None,
            store_path: default_store_path(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl VersionConfig {
    /// The artifact-type override, upper-cased. Blank counts as unset.
    pub fn artifact_type_override(&self) -> Option<String> {
        non_blank(self.artifact_type.as_deref()).map(str::to_uppercase)
    }

    /// The build-number variable name. Blank counts as unset.
    pub fn build_number_var(&self) -> Option<&str> {
        non_blank(self.ci_build_number_env_var.as_deref())
    }

    /// Effective remote-build flag.
    ///
    /// The configuration flag wins when set; otherwise a `remote-build` entry in
    /// the store may turn it on. A store value that is not a boolean is
    /// reported and treated as `false`.
    pub fn effective_remote_build(&self, store: &OrderedStore) -> (bool, Option<Degradation>) {
        if self.remote_build {
            return (true, None);
        }
        match non_blank(store.get(REMOTE_BUILD_KEY)) {
            None => (false, None),
            Some(v) if v.eq_ignore_ascii_case("true") => (true, None),
            Some(v) if v.eq_ignore_ascii_case("false") => (false, None),
            Some(v) => {
                warn!(value = v, "could not parse remote-build from store; defaulting to local build");
                (
                    false,
                    Some(Degradation::UnparsableRemoteBuildFlag {
                        value: v.to_string(),
                    }),
                )
            }
        }
    }
}

fn read_config(path: &Path) -> Result<VersionConfig> {
    let config_str = fs::read_to_string(path).map_err(|e| {
        StampError::config(format!("cannot read '{}': {}", path.display(), e))
    })?;
    debug!(path = %path.display(), "loading configuration");
    Ok(toml::from_str(&config_str)?)
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `semver-stamp.toml` in current directory
/// 3. `.semver-stamp.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(VersionConfig)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed, or the custom path is missing
pub fn load_config(config_path: Option<&str>) -> Result<VersionConfig> {
    if let Some(path) = config_path {
        return read_config(Path::new(path));
    }

    let local = Path::new(".").join(CONFIG_FILE_NAME);
    if local.exists() {
        return read_config(&local);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let user_config = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if user_config.exists() {
            return read_config(&user_config);
        }
    }

    Ok(VersionConfig::default())
}
