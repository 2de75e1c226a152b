//! Adapter around the `go` executable.
//!
//! Every call runs one external process to completion. There is no timeout and no
//! cancellation; a hung toolchain keeps the caller waiting.

use crate::model::{parse_listing, Dependency, Mutation, ToolchainConfig};
use anyhow::{bail, Context, Result};
use std::process::Output;
use tokio::process::Command;

const LIST_ARGS: [&str; 3] = ["list", "-m", "all"];

#[derive(Debug, Clone)]
pub struct Toolchain {
    cfg: ToolchainConfig,
}

impl Toolchain {
    pub fn new(cfg: ToolchainConfig) -> Self {
        Self { cfg }
    }

    fn command<I, S>(&self, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        let mut cmd = Command::new(&self.cfg.program);
        cmd.args(args);
        if let Some(dir) = self.cfg.workdir.as_ref() {
            cmd.current_dir(dir);
        }
        cmd
    }

    fn describe(&self, args: &[String]) -> String {
        format!("{} {}", self.cfg.program, args.join(" "))
    }

    /// Read the full transitive dependency list.
    pub async fn list(&self) -> Result<Vec<Dependency>> {
        let label = self.describe(&LIST_ARGS.map(String::from));
        tracing::debug!(command = %label, "listing dependencies");
        let output = self
            .command(LIST_ARGS)
            .output()
            .await
            .with_context(|| format!("failed to start `{label}`"))?;
        check_status(&label, &output)?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let deps = parse_listing(&stdout);
        tracing::info!(count = deps.len(), "dependency list refreshed");
        Ok(deps)
    }

    /// Run a mutating subcommand, then re-read the list so callers get ground truth.
    pub async fn mutate(&self, mutation: &Mutation) -> Result<Vec<Dependency>> {
        let args = mutation.args();
        let label = self.describe(&args);
        tracing::info!(command = %label, "running toolchain command");
        let output = self
            .command(&args)
            .output()
            .await
            .with_context(|| format!("failed to start `{label}`"))?;
        check_status(&label, &output)?;

        self.list().await
    }
}

fn check_status(label: &str, output: &Output) -> Result<()> {
    if output.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if stderr.is_empty() {
        bail!("`{label}` failed: {}", output.status);
    }
    bail!("`{label}` failed: {}: {stderr}", output.status);
}

/// A toolchain whose subcommands are shell scripts in a scratch module directory.
///
/// The program is `sh`, so `sh list -m all` runs the `list` script with `-m all` as
/// its arguments. The directory is removed when the returned guard drops.
#[cfg(all(test, unix))]
pub(crate) fn scripted_toolchain(scripts: &[(&str, &str)]) -> (tempfile::TempDir, Toolchain) {
    let dir = tempfile::tempdir().unwrap();
    for (name, body) in scripts {
        std::fs::write(dir.path().join(name), format!("{body}\n")).unwrap();
    }
    let toolchain = Toolchain::new(ToolchainConfig {
        program: "sh".into(),
        workdir: Some(dir.path().to_path_buf()),
    });
    (dir, toolchain)
}
