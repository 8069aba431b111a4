//! Driver errors.
//!
//! A failed build is not an error here; it is reported through
//! [`BuildOutcome::FailedAt`](crate::BuildOutcome::FailedAt).

use thiserror::Error;

/// Errors raised by the driver itself, independent of build results.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to write build notice: {0}")]
    Report(#[from] std::io::Error),

    #[error("driver already finished; create a new driver to build again")]
    AlreadyFinished,
}
