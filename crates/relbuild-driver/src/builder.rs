//! Build capability: run the release build for a single target.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

use relbuild_targets::TargetTriple;
use tracing::{debug, error};

/// Termination status of one build invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStatus {
    Success,
    /// `code` is `None` when the process was killed by a signal or never
    /// started.
    Failed { code: Option<i32> },
}

impl BuildStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, BuildStatus::Success)
    }
}

impl From<ExitStatus> for BuildStatus {
    fn from(status: ExitStatus) -> Self {
        if status.success() {
            BuildStatus::Success
        } else {
            BuildStatus::Failed {
                code: status.code(),
            }
        }
    }
}

/// Something that can produce a release build for a target.
///
/// Implementations block until the build has finished.
pub trait Builder {
    fn build(&mut self, target: &TargetTriple) -> BuildStatus;
}

/// Runs `<command> build --release --target <triple> [args...]`.
#[derive(Debug, Clone)]
pub struct CargoBuilder {
    /// Program to invoke, `cargo` by default. `cross` and other wrappers
    /// with the same argument syntax work too.
    pub command: String,
    /// Extra arguments appended after the target selection.
    pub args: Vec<String>,
    /// Working directory for the child; inherits ours when `None`.
    pub working_dir: Option<PathBuf>,
}

impl Default for CargoBuilder {
    fn default() -> Self {
        Self {
            command: "cargo".to_string(),
            args: Vec::new(),
            working_dir: None,
        }
    }
}

impl CargoBuilder {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Self::default()
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Full argv for building `target`, program name first.
    pub fn command_line(&self, target: &TargetTriple) -> Vec<String> {
        let mut argv = vec![
            self.command.clone(),
            "build".to_string(),
            "--release".to_string(),
            "--target".to_string(),
            target.as_str().to_string(),
        ];
        argv.extend(self.args.iter().cloned());
        argv
    }
}

impl Builder for CargoBuilder {
    fn build(&mut self, target: &TargetTriple) -> BuildStatus {
        let argv = self.command_line(target);
        let mut cmd = Command::new(&argv[0]);
        cmd.args(&argv[1..]);
        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }

        debug!(command = %argv.join(" "), "spawning build");
        match cmd.status() {
            Ok(status) => {
                debug!(triple = %target, %status, "build exited");
                status.into()
            }
            // A missing build command counts as a failed build.
            Err(e) => {
                error!(triple = %target, command = %self.command, error = %e, "failed to run build command");
                BuildStatus::Failed { code: None }
            }
        }
    }
}

/// Prints the command each target would run instead of running it.
#[derive(Debug)]
pub struct DryRunBuilder<W> {
    inner: CargoBuilder,
    out: W,
}

impl<W: Write> DryRunBuilder<W> {
    pub fn new(inner: CargoBuilder, out: W) -> Self {
        Self { inner, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Builder for DryRunBuilder<W> {
    fn build(&mut self, target: &TargetTriple) -> BuildStatus {
        let line = self.inner.command_line(target).join(" ");
        match writeln!(self.out, "  would run: {line}") {
            Ok(()) => BuildStatus::Success,
            Err(e) => {
                error!(error = %e, "failed to write dry-run command");
                BuildStatus::Failed { code: None }
            }
        }
    }
}

/// Adapts a closure into a [`Builder`].
pub struct FnBuilder<F>(pub F);

impl<F> Builder for FnBuilder<F>
where
    F: FnMut(&TargetTriple) -> BuildStatus,
{
    fn build(&mut self, target: &TargetTriple) -> BuildStatus {
        (self.0)(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_selects_release_and_target() {
        let builder = CargoBuilder::default().with_args(vec!["--locked".into()]);
        let argv = builder.command_line(&TargetTriple::new("aarch64-unknown-linux-gnu"));
        assert_eq!(
            argv,
            vec![
                "cargo",
                "build",
                "--release",
                "--target",
                "aarch64-unknown-linux-gnu",
                "--locked"
            ]
        );
    }

    #[test]
    fn custom_command() {
        let builder = CargoBuilder::new("cross");
        let argv = builder.command_line(&TargetTriple::new("x86_64-unknown-linux-musl"));
        assert_eq!(argv[0], "cross");
        assert_eq!(argv[1], "build");
    }

    #[test]
    fn missing_command_is_failure() {
        let mut builder = CargoBuilder::new("relbuild-no-such-command-4f1c");
        let status = builder.build(&TargetTriple::new("x86_64-unknown-linux-musl"));
        assert_eq!(status, BuildStatus::Failed { code: None });
    }

    #[cfg(unix)]
    #[test]
    fn zero_exit_is_success() {
        let dir = tempfile::tempdir().unwrap();
        let mut builder = CargoBuilder::new("true").with_working_dir(dir.path());
        assert!(builder
            .build(&TargetTriple::new("x86_64-unknown-linux-musl"))
            .is_success());
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_failure_with_code() {
        let mut builder = CargoBuilder::new("false");
        let status = builder.build(&TargetTriple::new("x86_64-unknown-linux-musl"));
        assert_eq!(status, BuildStatus::Failed { code: Some(1) });
    }

    #[test]
    fn dry_run_prints_and_succeeds() {
        let mut builder = DryRunBuilder::new(CargoBuilder::default(), Vec::new());
        let status = builder.build(&TargetTriple::new("x86_64-unknown-linux-musl"));
        assert!(status.is_success());
        let out = String::from_utf8(builder.into_inner()).unwrap();
        assert_eq!(
            out,
            "  would run: cargo build --release --target x86_64-unknown-linux-musl\n"
        );
    }

    #[test]
    fn fn_builder_delegates() {
        let mut seen = Vec::new();
        let mut builder = FnBuilder(|t: &TargetTriple| {
            seen.push(t.to_string());
            BuildStatus::Success
        });
        builder.build(&TargetTriple::new("a"));
        builder.build(&TargetTriple::new("b"));
        drop(builder);
        assert_eq!(seen, vec!["a", "b"]);
    }
}
