//! Fatal build conditions.
//!
//! These travel through anyhow::Result like any other error; callers that
//! care about the kind can downcast_ref::<BuildError>().

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("target {0:?} is already a target")]
    DuplicateTarget(String),

    #[error("dependency {name:?} does not exist and no rule builds it")]
    DanglingDependency { name: String },

    #[error("cycle found: {from:?} depends on {to:?}, which is still being built")]
    CycleDetected { from: String, to: String },

    #[error("command failed ({reason}): {cmdline}")]
    CommandFailed { cmdline: String, reason: String },

    #[error("target {0:?} not specified in graph")]
    TargetNotFound(String),
}
