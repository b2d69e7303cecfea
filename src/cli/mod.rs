//! Caller-facing version operations, shared by the binary and library users

pub mod orchestration;

pub use orchestration::{
    bump_major, bump_minor, bump_patch, drop_patch, resolve, run_workflow, Operation,
    WorkflowResult, STORE_HEADER,
};
