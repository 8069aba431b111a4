//! The build driver: one release build per target, in order, stopping at the
//! first failure.

use relbuild_targets::{TargetList, TargetTriple};
use tracing::{info, warn};

use crate::builder::Builder;
use crate::error::DriverError;
use crate::outcome::BuildOutcome;
use crate::report::Reporter;

/// Where the driver is in its run.
///
/// `Failed` and `AllSucceeded` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    /// Building the target at this index.
    Building(usize),
    /// The target at this index failed.
    Failed(usize),
    AllSucceeded,
}

impl DriverState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, DriverState::Failed(_) | DriverState::AllSucceeded)
    }
}

/// Sequences builds over a fixed target list.
#[derive(Debug)]
pub struct BuildDriver {
    targets: TargetList,
    state: DriverState,
}

impl BuildDriver {
    pub fn new(targets: TargetList) -> Self {
        Self {
            targets,
            state: DriverState::Idle,
        }
    }

    pub fn targets(&self) -> &TargetList {
        &self.targets
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Build every target in order.
    ///
    /// Stops at the first target whose build fails and returns
    /// [`BuildOutcome::FailedAt`] without touching the rest. An empty target
    /// list succeeds with nothing built.
    ///
    /// Errors only if a notice cannot be written or the driver has already
    /// finished a run.
    pub fn run<B, R>(&mut self, builder: &mut B, reporter: &mut R) -> Result<BuildOutcome, DriverError>
    where
        B: Builder + ?Sized,
        R: Reporter + ?Sized,
    {
        if self.state.is_terminal() {
            return Err(DriverError::AlreadyFinished);
        }
        if self.targets.is_empty() {
            warn!("no targets configured; nothing to build");
        }

        for (index, target) in self.targets.iter().enumerate() {
            self.state = DriverState::Building(index);
            reporter.starting(target)?;

            let status = builder.build(target);
            if !status.is_success() {
                self.state = DriverState::Failed(index);
                warn!(triple = %target, ?status, "build failed, skipping remaining targets");
                reporter.failed(target)?;
                return Ok(BuildOutcome::FailedAt {
                    index,
                    target: target.clone(),
                    status,
                });
            }
            info!(triple = %target, "build succeeded");
        }

        self.state = DriverState::AllSucceeded;
        reporter.all_succeeded()?;
        Ok(BuildOutcome::Success {
            built: self.targets.len(),
        })
    }

    /// Targets after `index` that a failed run never attempted.
    pub fn skipped_after(&self, index: usize) -> &[TargetTriple] {
        let all = self.targets.as_slice();
        all.get(index + 1..).unwrap_or(&[])
    }
}
