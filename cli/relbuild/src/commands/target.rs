//! `relbuild target`: show the resolved target list.

use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use relbuild_targets::TargetList;

use crate::commands::build::resolve_targets;
use crate::manifest::RelbuildManifest;

/// Print the targets a build would use, in build order.
pub fn list(
    manifest: Option<&RelbuildManifest>,
    targets: &[String],
    targets_file: Option<&Path>,
    json: bool,
) -> Result<()> {
    let list = resolve_targets(targets, targets_file, manifest)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&list)?)?;
    } else {
        write_list(&mut out, &list)?;
    }
    Ok(())
}

fn write_list(out: &mut impl Write, list: &TargetList) -> Result<()> {
    if list.is_empty() {
        writeln!(out, "No targets configured.")?;
        return Ok(());
    }

    writeln!(out, "Targets (build order):")?;
    writeln!(out)?;
    for (i, target) in list.iter().enumerate() {
        writeln!(out, "  {:>2}. {:<32} {}", i + 1, target.as_str(), target.segments().join(" / "))?;
    }
    Ok(())
}
