//! Human-readable progress notices.

use std::io::{self, Write};

use relbuild_targets::TargetTriple;

/// Receives the driver's progress notices.
pub trait Reporter {
    /// A build for `target` is about to start.
    fn starting(&mut self, target: &TargetTriple) -> io::Result<()>;
    /// The build for `target` failed; nothing further will run.
    fn failed(&mut self, target: &TargetTriple) -> io::Result<()>;
    /// Every configured target built successfully.
    fn all_succeeded(&mut self) -> io::Result<()>;
}

/// Writes one line per notice to `W`, flushing after each so the lines stay
/// ordered relative to the build command's own output.
#[derive(Debug)]
pub struct ConsoleReporter<W> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, args: std::fmt::Arguments<'_>) -> io::Result<()> {
        self.out.write_fmt(args)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn starting(&mut self, target: &TargetTriple) -> io::Result<()> {
        self.line(format_args!("Building for {target}..."))
    }

    fn failed(&mut self, target: &TargetTriple) -> io::Result<()> {
        self.line(format_args!("Failed to build for {target}"))
    }

    fn all_succeeded(&mut self) -> io::Result<()> {
        self.line(format_args!("All builds completed successfully!"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_lines() {
        let mut reporter = ConsoleReporter::new(Vec::new());
        let t = TargetTriple::new("aarch64-unknown-linux-gnu");
        reporter.starting(&t).unwrap();
        reporter.failed(&t).unwrap();
        reporter.all_succeeded().unwrap();

        let out = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(
            out,
            "Building for aarch64-unknown-linux-gnu...\n\
             Failed to build for aarch64-unknown-linux-gnu\n\
             All builds completed successfully!\n"
        );
    }
}
