//! Target identifiers for relbuild.
//!
//! A target is an opaque platform triple handed verbatim to the build command.
//! Nothing here validates or interprets a triple beyond splitting it for display.

pub mod error;
pub mod parse;
pub mod triple;

pub use error::{Result, TargetError};
pub use parse::{load_target_list_toml, parse_target_list_toml, target_list_to_toml};
pub use triple::{TargetList, TargetTriple};
