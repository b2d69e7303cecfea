use std::fmt;

use tracing::warn;

use crate::degraded::Degradation;
use crate::domain::artifact::DEFAULT_ARTIFACT_TYPE;
use crate::error::{Result, StampError};
use crate::store::OrderedStore;

pub const MAJOR_KEY: &str = "major";
pub const MINOR_KEY: &str = "minor";
pub const PATCH_KEY: &str = "patch";
pub const ARTIFACT_TYPE_KEY: &str = "artifact-type";

/// Persisted version state, projected from four keys of an [OrderedStore]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionFields {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub artifact_type: String,
}

/// A single mutation applied to [VersionFields]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
    /// Decrement patch; no-op at zero
    DropPatch,
}

fn read_component(store: &OrderedStore, key: &str) -> Result<u32> {
    let raw = store
        .get(key)
        .ok_or_else(|| StampError::parse(format!("missing required key '{}'", key)))?;
    raw.trim().parse::<u32>().map_err(|_| {
        StampError::parse(format!(
            "invalid value for '{}': '{}' (expected a non-negative integer)",
            key, raw
        ))
    })
}

fn increment(value: u32, key: &str) -> Result<u32> {
    value
        .checked_add(1)
        .ok_or_else(|| StampError::version(format!("{} version overflow at {}", key, value)))
}

impl VersionFields {
    pub fn new(major: u32, minor: u32, patch: u32, artifact_type: impl Into<String>) -> Self {
        VersionFields {
            major,
            minor,
            patch,
            artifact_type: artifact_type.into(),
        }
    }

    /// Read the version fields from a store.
    ///
    /// `major`, `minor` and `patch` are required; `artifact-type` falls back to
    /// `LOCAL` when absent.
    pub fn from_store(store: &OrderedStore) -> Result<Self> {
        Ok(VersionFields {
            major: read_component(store, MAJOR_KEY)?,
            minor: read_component(store, MINOR_KEY)?,
            patch: read_component(store, PATCH_KEY)?,
            artifact_type: store
                .get(ARTIFACT_TYPE_KEY)
                .unwrap_or(DEFAULT_ARTIFACT_TYPE)
                .to_string(),
        })
    }

    /// Write the fields back, updating existing keys in place and appending missing ones
    pub fn to_store(&self, store: &mut OrderedStore) {
        store.put(MAJOR_KEY, self.major.to_string());
        store.put(MINOR_KEY, self.minor.to_string());
        store.put(PATCH_KEY, self.patch.to_string());
        store.put(ARTIFACT_TYPE_KEY, self.artifact_type.as_str());
    }

    /// Increments major. Minor and patch are left as they are.
    pub fn bump_major(&mut self) -> Result<()> {
        self.major = increment(self.major, MAJOR_KEY)?;
        Ok(())
    }

    /// Increments minor. Patch is left as it is.
    pub fn bump_minor(&mut self) -> Result<()> {
        self.minor = increment(self.minor, MINOR_KEY)?;
        Ok(())
    }

    pub fn bump_patch(&mut self) -> Result<()> {
        self.patch = increment(self.patch, PATCH_KEY)?;
        Ok(())
    }

    /// Decrements patch, or reports [Degradation::PatchFloor] when already at zero
    pub fn drop_patch(&mut self) -> Option<Degradation> {
        if self.patch > 0 {
            self.patch -= 1;
            None
        } else {
            warn!("cannot decrement patch below 0; no changes made to the version");
            Some(Degradation::PatchFloor)
        }
    }

    /// Apply one mutation
    pub fn apply(&mut self, bump: VersionBump) -> Result<Option<Degradation>> {
        match bump {
            VersionBump::Major => self.bump_major()?,
            VersionBump::Minor => self.bump_minor()?,
            VersionBump::Patch => self.bump_patch()?,
            VersionBump::DropPatch => return Ok(self.drop_patch()),
        }
        Ok(None)
    }
}

impl fmt::Display for VersionFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
