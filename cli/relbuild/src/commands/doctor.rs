//! `relbuild doctor`: toolchain diagnostics.

use std::path::Path;
use std::process::Command;

use anyhow::Result;

use crate::commands::build::resolve_targets;
use crate::manifest::RelbuildManifest;

/// Print toolchain diagnostic information.
pub fn run(project_dir: &Path, manifest: Option<&RelbuildManifest>) -> Result<()> {
    println!("=== relbuild doctor ===");
    println!();
    println!("relbuild version: {}", env!("CARGO_PKG_VERSION"));
    println!("Project dir:      {}", project_dir.display());
    println!(
        "Manifest:         {}",
        if manifest.is_some() { "found" } else { "not found (using defaults)" }
    );
    println!();

    let command = manifest
        .map(|m| m.build.command.as_str())
        .unwrap_or("cargo");

    println!("--- Tools ---");
    print_tool_status(command, &["--version"]);
    print_tool_status("rustup", &["--version"]);
    println!();

    let targets = resolve_targets(&[], None, manifest)?;
    let installed = installed_rustup_targets();

    println!("--- Targets ---");
    for target in &targets {
        let status = match &installed {
            Some(list) if list.iter().any(|t| t == target.as_str()) => "installed",
            Some(_) => "not installed (rustup target add)",
            None => "unknown (rustup unavailable)",
        };
        println!("  {:<32} {status}", target.as_str());
    }

    Ok(())
}

fn print_tool_status(name: &str, args: &[&str]) {
    match Command::new(name).args(args).output() {
        Ok(output) => {
            let version = String::from_utf8_lossy(&output.stdout);
            let first_line = version.lines().next().unwrap_or("(unknown version)");
            println!("  {name}: {first_line}");
        }
        Err(_) => {
            println!("  {name}: not found");
        }
    }
}

fn installed_rustup_targets() -> Option<Vec<String>> {
    let output = Command::new("rustup")
        .args(["target", "list", "--installed"])
        .output()
        .ok()?;
    if !output.status.success() {
        tracing::debug!(status = %output.status, "rustup target list failed");
        return None;
    }
    Some(parse_target_lines(&String::from_utf8_lossy(&output.stdout)))
}

fn parse_target_lines(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
