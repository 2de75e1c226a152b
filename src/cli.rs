use crate::model::ToolchainConfig;
use crate::toolchain::Toolchain;
use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
#[cfg(feature = "tui")]
use std::time::Duration;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "godeps",
    version,
    about = "View and edit Go module dependencies in the terminal"
)]
pub struct Cli {
    /// Go toolchain executable
    #[arg(long, default_value = "go")]
    pub go: String,

    /// Module directory to run the toolchain in
    #[arg(short = 'C', long)]
    pub dir: Option<PathBuf>,

    /// Delay between loading animation frames
    #[arg(long, default_value = "500ms")]
    pub tick: humantime::Duration,

    /// Print the dependency list as JSON and exit (no TUI)
    #[arg(long, conflicts_with = "text")]
    pub json: bool,

    /// Print `name version` lines and exit (no TUI)
    #[arg(long)]
    pub text: bool,

    /// Append logs to this file (no logging when omitted)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter, e.g. `info` or `godeps=debug`
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Build the toolchain settings from CLI arguments.
pub fn build_config(args: &Cli) -> ToolchainConfig {
    ToolchainConfig {
        program: args.go.clone(),
        workdir: args.dir.clone(),
    }
}

pub async fn run(args: Cli) -> Result<()> {
    let toolchain = Toolchain::new(build_config(&args));
    tracing::info!(program = %args.go, dir = ?args.dir, "starting");

    if args.json {
        return print_json(&toolchain, &mut std::io::stdout()).await;
    }
    #[cfg(feature = "tui")]
    if !args.text {
        return crate::tui::run(toolchain, Duration::from(args.tick)).await;
    }
    // Without the TUI feature, text output is the fallback.
    print_text(&toolchain, &mut std::io::stdout()).await
}

/// Write the dependency list as a pretty-printed JSON array.
async fn print_json(toolchain: &Toolchain, out: &mut impl Write) -> Result<()> {
    let deps = toolchain.list().await.context("listing dependencies")?;
    serde_json::to_writer_pretty(&mut *out, &deps)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Write one `name version` line per dependency.
async fn print_text(toolchain: &Toolchain, out: &mut impl Write) -> Result<()> {
    let deps = toolchain.list().await.context("listing dependencies")?;
    let mut out = std::io::LineWriter::new(out);
    for dep in &deps {
        writeln!(out, "{} {}", dep.name, dep.version)?;
    }
    out.flush()?;
    Ok(())
}
