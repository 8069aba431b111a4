//! TOML loading and saving for standalone target-list files.
//!
//! A target-list file holds one key:
//!
//! ```toml
//! targets = ["x86_64-unknown-linux-musl", "aarch64-unknown-linux-gnu"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TargetError};
use crate::triple::TargetList;

#[derive(Debug, Serialize, Deserialize)]
struct TargetListFile {
    targets: TargetList,
}

/// Load a target list from a TOML file.
pub fn load_target_list_toml(path: &Path) -> Result<TargetList> {
    if !path.exists() {
        return Err(TargetError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_target_list_toml(&content)
}

/// Parse a target list from a TOML string.
pub fn parse_target_list_toml(toml_str: &str) -> Result<TargetList> {
    let file: TargetListFile = toml::from_str(toml_str)?;
    Ok(file.targets)
}

/// Serialize a target list to pretty TOML.
pub fn target_list_to_toml(targets: &TargetList) -> Result<String> {
    let file = TargetListFile {
        targets: targets.clone(),
    };
    Ok(toml::to_string_pretty(&file)?)
}
