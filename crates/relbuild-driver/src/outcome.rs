//! Result of a complete driver run.

use std::fmt;

use relbuild_targets::TargetTriple;

use crate::builder::BuildStatus;

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Every target built. `built` is the number of targets, possibly zero.
    Success { built: usize },
    /// The build at `index` failed; later targets were not attempted.
    FailedAt {
        index: usize,
        target: TargetTriple,
        status: BuildStatus,
    },
}

impl BuildOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, BuildOutcome::Success { .. })
    }

    /// Process exit code: 0 on success, 1 on any build failure. The failing
    /// target is not encoded.
    pub fn exit_code(&self) -> i32 {
        match self {
            BuildOutcome::Success { .. } => 0,
            BuildOutcome::FailedAt { .. } => 1,
        }
    }
}

impl fmt::Display for BuildOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildOutcome::Success { built } => write!(f, "{built} target(s) built"),
            BuildOutcome::FailedAt {
                index,
                target,
                status,
            } => {
                write!(f, "build for {target} (#{}) failed", index + 1)?;
                match status {
                    BuildStatus::Failed { code: Some(code) } => write!(f, " with exit code {code}"),
                    _ => Ok(()),
                }
            }
        }
    }
}
