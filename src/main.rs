//! speechnav - screen reader navigation speech harness
//!
//! Drives text navigation in an editor owned by a speech host and checks
//! the speech produced after every key press.

use clap::Parser;
use speechnav::common::logging;
use speechnav::{cli, commands, host};
use commands::Commands;

#[derive(Parser)]
#[command(name = "speechnav", about = "Screen reader navigation speech harness")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Host => {
            if let Some(path) = logging::init_host() {
                tracing::info!("Logging to {}", path.display());
            }
            host::run().await
        }
        command => {
            logging::init_cli();
            cli::dispatch(command).await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
