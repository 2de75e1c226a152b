mod cli;
mod logging;
mod model;
#[cfg(feature = "tui")]
mod orchestrator;
mod toolchain;
#[cfg(feature = "tui")]
mod tui;

use clap::Parser;

#[tokio::main]
async fn main() {
    let args = cli::Cli::parse();
    logging::init(args.log_file.as_deref(), &args.log_level);

    if let Err(e) = cli::run(args).await {
        tracing::error!(error = %format!("{e:#}"), "exiting");
        println!("Error running program: {e:#}");
        std::process::exit(1);
    }
}
