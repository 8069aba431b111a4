//! `relbuild.toml` manifest parsing and project configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use relbuild_driver::CargoBuilder;
use relbuild_targets::TargetList;
use serde::{Deserialize, Serialize};

/// File name searched for when locating a project.
pub const MANIFEST_FILE: &str = "relbuild.toml";

/// The top-level manifest structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelbuildManifest {
    /// Project metadata.
    #[serde(default)]
    pub project: Option<ProjectConfig>,
    /// Build configuration.
    #[serde(default)]
    pub build: BuildConfig,
}

/// Project metadata section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
}

/// Build section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Build command, invoked as `<command> build --release --target <t>`.
    #[serde(default = "default_command")]
    pub command: String,
    /// Extra arguments appended to every build invocation.
    #[serde(default)]
    pub args: Vec<String>,
    /// Targets to build, in order. Built-in defaults apply when absent.
    #[serde(default)]
    pub targets: Option<TargetList>,
}

fn default_command() -> String {
    "cargo".to_string()
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            args: Vec::new(),
            targets: None,
        }
    }
}

impl RelbuildManifest {
    /// Search upward from `start_dir` for a `relbuild.toml` file, parse and
    /// return it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest = Self::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                tracing::debug!(path = %candidate.display(), "loaded manifest");
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        tracing::debug!("no {MANIFEST_FILE} found, using defaults");
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing relbuild.toml")
    }

    /// Targets configured in `[build]`, if any.
    pub fn targets(&self) -> Option<&TargetList> {
        self.build.targets.as_ref()
    }

    /// A builder running the configured command in `project_dir`.
    pub fn builder(&self, project_dir: &Path) -> CargoBuilder {
        CargoBuilder::new(self.build.command.clone())
            .with_args(self.build.args.clone())
            .with_working_dir(project_dir)
    }

    /// Generate the default template for `relbuild init`.
    pub fn template(name: &str) -> String {
        let targets = TargetList::builtin()
            .iter()
            .map(|t| format!("\"{t}\""))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            r#"[project]
name = "{name}"

[build]
command = "cargo"
targets = [{targets}]
"#
        )
    }
}
