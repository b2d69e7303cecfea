//! Domain logic - version fields, mutations and artifact types, independent of I/O

pub mod artifact;
pub mod fields;

pub use artifact::{check_artifact_type, is_release, DEFAULT_ARTIFACT_TYPE};
pub use fields::{VersionBump, VersionFields};
