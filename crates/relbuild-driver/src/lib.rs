//! Sequential release-build driver.
//!
//! Builds a project once per target, in order, and stops at the first target
//! whose build fails:
//!
//! - **Builder:** runs the external build command for one target
//! - **Reporter:** writes the human-readable progress notices
//! - **Driver:** sequences the two and produces a [`BuildOutcome`]

pub mod builder;
pub mod driver;
pub mod error;
pub mod outcome;
pub mod report;

pub use builder::{BuildStatus, Builder, CargoBuilder, DryRunBuilder, FnBuilder};
pub use driver::{BuildDriver, DriverState};
pub use error::DriverError;
pub use outcome::BuildOutcome;
pub use report::{ConsoleReporter, Reporter};
