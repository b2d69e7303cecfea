//! Version workflow orchestration
//!
//! Every caller-facing operation runs the same cycle against the configured
//! store: load, apply at most one mutation, resolve, persist, return. The
//! binary and library callers share this path; neither depends on clap.

use tracing::debug;

use crate::config::VersionConfig;
use crate::degraded::Degradation;
use crate::domain::{VersionBump, VersionFields};
use crate::env::Environment;
use crate::error::Result;
use crate::resolver;
use crate::store::OrderedStore;

/// Header written at the top of the store on every save
pub const STORE_HEADER: &str =
    "Version properties - this file is regenerated by every semver-stamp operation";

/// Operation requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Resolve without mutating
    Resolve,
    Bump(VersionBump),
}

/// Result of a successful workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The resolved version string
    pub version: String,

    /// Fields as persisted after the operation
    pub fields: VersionFields,

    /// Fallbacks taken during the operation
    pub degradations: Vec<Degradation>,
}

/// Run one full load → mutate → resolve → persist cycle.
///
/// # Arguments
///
/// * `operation` - The mutation to apply, if any
/// * `config` - Resolution settings, including the store path
/// * `env` - Source of the CI build number
///
/// # Returns
///
/// The resolved version, or a fatal error if the store is missing or its
/// version fields cannot be parsed. Nothing is written on error.
pub fn run_workflow<E>(operation: Operation, config: &VersionConfig, env: &E) -> Result<WorkflowResult>
where
    E: Environment + ?Sized,
{
    let mut store = OrderedStore::load(&config.store_path)?;
    let mut fields = VersionFields::from_store(&store)?;
    let mut degradations = Vec::new();

    if let Operation::Bump(bump) = operation {
        degradations.extend(fields.apply(bump)?);
    }

    let (remote_build, remote_notice) = config.effective_remote_build(&store);
    degradations.extend(remote_notice);
    let effective = VersionConfig {
        remote_build,
        ..config.clone()
    };

    let resolution = resolver::resolve(&fields, &effective, env);
    degradations.extend(resolution.degradations);
    fields.artifact_type = resolution.artifact_type;

    fields.to_store(&mut store);
    store.save(&config.store_path, STORE_HEADER)?;

    debug!(?operation, version = %resolution.version, "version workflow complete");
    Ok(WorkflowResult {
        version: resolution.version,
        fields,
        degradations,
    })
}

/// Resolve the current version
pub fn resolve<E: Environment + ?Sized>(config: &VersionConfig, env: &E) -> Result<WorkflowResult> {
    run_workflow(Operation::Resolve, config, env)
}

/// Increment major, then resolve. Minor and patch are not reset.
pub fn bump_major<E: Environment + ?Sized>(config: &VersionConfig, env: &E) -> Result<WorkflowResult> {
    run_workflow(Operation::Bump(VersionBump::Major), config, env)
}

/// Increment minor, then resolve. Patch is not reset.
pub fn bump_minor<E: Environment + ?Sized>(config: &VersionConfig, env: &E) -> Result<WorkflowResult> {
    run_workflow(Operation::Bump(VersionBump::Minor), config, env)
}

/// Increment patch, then resolve
pub fn bump_patch<E: Environment + ?Sized>(config: &VersionConfig, env: &E) -> Result<WorkflowResult> {
    run_workflow(Operation::Bump(VersionBump::Patch), config, env)
}

/// Decrement patch (no-op at zero), then resolve
pub fn drop_patch<E: Environment + ?Sized>(config: &VersionConfig, env: &E) -> Result<WorkflowResult> {
    run_workflow(Operation::Bump(VersionBump::DropPatch), config, env)
}
