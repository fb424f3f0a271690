//! CLI command definitions
//!
//! Defines the clap commands for the speechnav CLI.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Run navigation scenarios from YAML files
    Run {
        /// Scenario files to run, in order
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Run against an in-process simulated host instead of the host process
        #[arg(long)]
        local: bool,

        /// Run scenarios marked as disabled
        #[arg(long)]
        include_disabled: bool,

        /// Print each step and the collected speech
        #[arg(long, short)]
        verbose: bool,
    },

    /// Run the built-in notepad navigation scenarios
    Builtin {
        /// Run only the scenario with this name
        #[arg(long)]
        name: Option<String>,

        /// Run against an in-process simulated host instead of the host process
        #[arg(long)]
        local: bool,

        /// Run scenarios marked as disabled
        #[arg(long)]
        include_disabled: bool,

        /// Print each step and the collected speech
        #[arg(long, short)]
        verbose: bool,
    },

    /// List the built-in scenarios
    List,

    /// Load text into the host's editor, caret at the start
    Prepare {
        /// Text to load (use $'a\nb' in a shell for several lines)
        text: String,
    },

    /// Press a key and print the speech after each press
    Press {
        /// Key to press (e.g. numpad3, numpad6, numpad9)
        key: String,

        /// Number of presses
        #[arg(long, short = 'n', default_value = "1")]
        times: usize,

        /// Output the utterances as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Get speech host status
    Status,

    /// Stop the speech host
    Stop,

    /// View speech host logs
    Logs {
        /// Number of lines to show
        #[arg(long, short = 'n', default_value = "50")]
        lines: usize,

        /// Clear the log file
        #[arg(long)]
        clear: bool,
    },

    /// [Hidden] Run the speech host - spawned automatically
    #[command(hide = true)]
    Host,
}
