//! CLI command handling
//!
//! Dispatches CLI commands to the speech host and formats output.

pub mod spawn;

use colored::Colorize;

use crate::commands::Commands;
use crate::common::{config::Config, logging, Error, Result};
use crate::host::{LocalHost, SimulatedBackend};
use crate::ipc::HostClient;
use crate::speech::{collect, EditorSetup, NavKey};
use crate::testing::{self, builtin, RunOptions, TestScenario};

/// Dispatch a CLI command
pub async fn dispatch(command: Commands) -> Result<()> {
    let config = Config::load()?;

    match command {
        Commands::Host => {
            // Handled in main before logging is set up
            unreachable!("Host command should be handled in main")
        }

        Commands::Run {
            paths,
            local,
            include_disabled,
            verbose,
        } => {
            let options = RunOptions {
                verbose,
                include_disabled,
            };

            let results = if local {
                let scenarios = paths
                    .iter()
                    .map(|p| TestScenario::load(p))
                    .collect::<Result<Vec<_>>>()?;
                let mut host = LocalHost::new(SimulatedBackend::new(config.speech));
                testing::run_all(&mut host, &scenarios, options).await
            } else {
                testing::run_scenario_files(&paths, &config, options).await?
            };

            testing::summarize(&results)
        }

        Commands::Builtin {
            name,
            local,
            include_disabled,
            verbose,
        } => {
            let options = RunOptions {
                verbose,
                include_disabled,
            };

            let scenarios = match name {
                Some(name) => vec![builtin::find(&name)?],
                None => builtin::scenarios()?,
            };

            let results = if local {
                let mut host = LocalHost::new(SimulatedBackend::new(config.speech));
                testing::run_all(&mut host, &scenarios, options).await
            } else {
                let mut client = connect(&config).await?;
                testing::run_all(&mut client, &scenarios, options).await
            };

            testing::summarize(&results)
        }

        Commands::List => {
            for scenario in builtin::scenarios()? {
                let entries = format!("{} x{}", scenario.granularity, scenario.fixture.len());
                match &scenario.disabled {
                    Some(reason) => println!(
                        "{:<34} {:<14} {} {}",
                        scenario.name.dimmed(),
                        entries.dimmed(),
                        "disabled:".yellow(),
                        reason.dimmed()
                    ),
                    None => println!("{:<34} {:<14}", scenario.name, entries),
                }
            }
            Ok(())
        }

        Commands::Prepare { text } => {
            let mut client = connect(&config).await?;
            client.prepare_editor(&text).await?;
            println!("Editor prepared ({} characters)", text.chars().count());
            Ok(())
        }

        Commands::Press { key, times, json } => {
            let key = NavKey::new(key)?;
            let mut client = connect(&config).await?;

            let spoken = collect(&mut client, &key, times).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&spoken)?);
            } else {
                for (i, utterance) in spoken.iter().enumerate() {
                    if utterance.is_silent() {
                        println!("{:>3}: {}", i + 1, "(no speech)".dimmed());
                    } else {
                        println!("{:>3}: {}", i + 1, utterance);
                    }
                }
            }
            Ok(())
        }

        Commands::Status => {
            match HostClient::connect(&config).await {
                Ok(mut client) => {
                    let status = client.status().await?;

                    println!("Host: running ({} v{})", status.backend, status.version);
                    if status.editor_prepared {
                        println!(
                            "Editor: {} characters, caret at {}",
                            status.text_chars, status.caret
                        );
                    } else {
                        println!("Editor: empty");
                    }
                    println!("symbolLevelWordAll: {}", status.symbol_level_word_all);
                }
                Err(Error::HostNotRunning) => {
                    println!("Host: not running");
                }
                Err(e) => return Err(e),
            }

            if let Some(path) = logging::host_log_path() {
                println!("Log: {}", path.display());
            }

            Ok(())
        }

        Commands::Stop => {
            match HostClient::connect(&config).await {
                Ok(mut client) => {
                    client.shutdown().await?;
                    println!("Speech host stopped");
                }
                Err(Error::HostNotRunning) => println!("Speech host not running"),
                Err(e) => return Err(e),
            }
            Ok(())
        }

        Commands::Logs { lines, clear } => {
            if clear {
                logging::truncate_host_log()?;
                println!("Host log cleared");
                return Ok(());
            }

            let Some(path) = logging::host_log_path() else {
                return Err(Error::Config("Could not determine log directory".to_string()));
            };

            if !path.exists() {
                println!("No host log at {}", path.display());
                return Ok(());
            }

            let content = std::fs::read_to_string(&path).map_err(|e| Error::FileRead {
                path: path.display().to_string(),
                error: e.to_string(),
            })?;
            let all: Vec<&str> = content.lines().collect();
            for line in &all[all.len().saturating_sub(lines)..] {
                println!("{}", line);
            }
            Ok(())
        }
    }
}

/// Start the host if needed and connect to it
async fn connect(config: &Config) -> Result<HostClient> {
    spawn::ensure_host_running(config).await?;
    HostClient::connect(config).await
}
