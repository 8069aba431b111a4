//! `relbuild build`: release-build every resolved target in order.

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use relbuild_driver::{
    BuildDriver, BuildOutcome, Builder, CargoBuilder, ConsoleReporter, DryRunBuilder, Reporter,
};
use relbuild_targets::{load_target_list_toml, TargetList};

use crate::manifest::RelbuildManifest;

/// Run the build. Returns the process exit code.
pub fn run(
    project_dir: &Path,
    manifest: Option<&RelbuildManifest>,
    targets: &[String],
    targets_file: Option<&Path>,
    dry_run: bool,
) -> Result<i32> {
    let targets = resolve_targets(targets, targets_file, manifest)?;
    let builder = command_builder(project_dir, manifest);
    let mut reporter = ConsoleReporter::stdout();

    let outcome = if dry_run {
        let mut builder = DryRunBuilder::new(builder, io::stdout());
        execute(targets, &mut builder, &mut reporter)?
    } else {
        let mut builder = builder;
        execute(targets, &mut builder, &mut reporter)?
    };

    tracing::info!(%outcome, "build finished");
    Ok(outcome.exit_code())
}

pub(crate) fn execute(
    targets: TargetList,
    builder: &mut dyn Builder,
    reporter: &mut dyn Reporter,
) -> Result<BuildOutcome> {
    let mut driver = BuildDriver::new(targets);
    let outcome = driver.run(builder, reporter)?;
    if let BuildOutcome::FailedAt { index, .. } = &outcome {
        let skipped = driver.skipped_after(*index);
        if !skipped.is_empty() {
            tracing::debug!(count = skipped.len(), "targets not attempted");
        }
    }
    Ok(outcome)
}

fn command_builder(project_dir: &Path, manifest: Option<&RelbuildManifest>) -> CargoBuilder {
    match manifest {
        Some(m) => m.builder(project_dir),
        None => CargoBuilder::default().with_working_dir(project_dir),
    }
}

/// Pick the target list: `--target` flags, then `--targets-file`, then the
/// manifest, then the built-in defaults.
pub(crate) fn resolve_targets(
    targets: &[String],
    targets_file: Option<&Path>,
    manifest: Option<&RelbuildManifest>,
) -> Result<TargetList> {
    if !targets.is_empty() {
        return Ok(targets.iter().map(String::as_str).collect());
    }

    if let Some(path) = targets_file {
        tracing::debug!(path = %path.display(), "loading targets file");
        return load_target_list_toml(path)
            .with_context(|| format!("loading targets from {}", path.display()));
    }

    if let Some(list) = manifest.and_then(RelbuildManifest::targets) {
        return Ok(list.clone());
    }

    Ok(TargetList::builtin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use relbuild_driver::{BuildStatus, FnBuilder};
    use relbuild_targets::TargetTriple;

    #[test]
    fn resolve_targets_cli_flags() {
        let list = resolve_targets(
            &["wasm32-wasip1".to_string(), "i686-pc-windows-gnu".to_string()],
            None,
            None,
        )
        .unwrap();
        let names: Vec<&str> = list.iter().map(TargetTriple::as_str).collect();
        assert_eq!(names, vec!["wasm32-wasip1", "i686-pc-windows-gnu"]);
    }

    #[test]
    fn resolve_targets_manifest() {
        let manifest =
            RelbuildManifest::from_str("[build]\ntargets = [\"aarch64-apple-darwin\"]\n").unwrap();
        let list = resolve_targets(&[], None, Some(&manifest)).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0).unwrap().as_str(), "aarch64-apple-darwin");
    }

    #[test]
    fn resolve_targets_file_beats_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("targets.toml");
        std::fs::write(&path, "targets = [\"riscv64gc-unknown-linux-gnu\"]\n").unwrap();
        let manifest =
            RelbuildManifest::from_str("[build]\ntargets = [\"aarch64-apple-darwin\"]\n").unwrap();

        let list = resolve_targets(&[], Some(&path), Some(&manifest)).unwrap();
        assert_eq!(list.get(0).unwrap().as_str(), "riscv64gc-unknown-linux-gnu");
    }

    #[test]
    fn resolve_targets_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(resolve_targets(&[], Some(&dir.path().join("nope.toml")), None).is_err());
    }

    #[test]
    fn resolve_targets_fallback() {
        let list = resolve_targets(&[], None, None).unwrap();
        assert_eq!(list, TargetList::builtin());
    }

    #[test]
    fn execute_reports_first_failure() {
        let mut builder = FnBuilder(|t: &TargetTriple| {
            if t.as_str().starts_with("aarch64") {
                BuildStatus::Failed { code: Some(101) }
            } else {
                BuildStatus::Success
            }
        });
        let mut reporter = ConsoleReporter::new(Vec::new());

        let outcome = execute(TargetList::builtin(), &mut builder, &mut reporter).unwrap();
        assert_eq!(outcome.exit_code(), 1);
        let out = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(out.ends_with("Failed to build for aarch64-unknown-linux-gnu\n"));
    }

    #[cfg(unix)]
    #[test]
    fn run_with_succeeding_command() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = RelbuildManifest::from_str("[build]\ncommand = \"true\"\n").unwrap();
        let code = run(dir.path(), Some(&manifest), &[], None, false).unwrap();
        assert_eq!(code, 0);
    }

    #[cfg(unix)]
    #[test]
    fn run_with_failing_command() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = RelbuildManifest::from_str("[build]\ncommand = \"false\"\n").unwrap();
        let code = run(dir.path(), Some(&manifest), &[], None, false).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn dry_run_never_fails() {
        let dir = tempfile::tempdir().unwrap();
        let manifest =
            RelbuildManifest::from_str("[build]\ncommand = \"relbuild-no-such-command\"\n")
                .unwrap();
        let code = run(dir.path(), Some(&manifest), &[], None, true).unwrap();
        assert_eq!(code, 0);
    }
}
