//! `relbuild init`: write a starter `relbuild.toml`.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::manifest::{RelbuildManifest, MANIFEST_FILE};

/// Create `relbuild.toml` in `dir`, named after the directory.
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let name = dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("project");
    write_manifest(dir, name, force)
}

pub(crate) fn write_manifest(dir: &Path, name: &str, force: bool) -> Result<()> {
    let path = dir.join(MANIFEST_FILE);
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    fs::write(&path, RelbuildManifest::template(name))
        .with_context(|| format!("writing {}", path.display()))?;

    println!("Created {}", path.display());
    Ok(())
}
