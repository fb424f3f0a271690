//! Scenario runner implementation
//!
//! Each scenario is a straight pipeline: reset and apply speech settings,
//! load the input text, press the navigation key once per fixture entry,
//! then compare. A failing step ends that scenario only.

use std::path::PathBuf;

use colored::Colorize;

use crate::cli::spawn::ensure_host_running;
use crate::common::{config::Config, Error, Result};
use crate::ipc::HostClient;
use crate::speech::{
    collect_into, compare, EditorSetup, SpeechConfigurator, SpeechHost, Utterance,
};

use super::config::TestScenario;

/// Options shared by every scenario in a run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Print each step and the collected speech
    pub verbose: bool,
    /// Run disabled scenarios instead of skipping them
    pub include_disabled: bool,
}

/// How a scenario ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed,
    Skipped,
}

/// Result of a scenario run
#[derive(Debug)]
pub struct TestResult {
    pub name: String,
    pub outcome: Outcome,
    /// Speech collected, empty if the run stopped before collection finished
    pub actual: Vec<Utterance>,
    pub expected: Vec<Utterance>,
    pub error: Option<String>,
}

impl TestResult {
    pub fn passed(&self) -> bool {
        self.outcome == Outcome::Passed
    }

    fn failed(scenario: &TestScenario, actual: Vec<Utterance>, error: &Error) -> Self {
        Self {
            name: scenario.name.clone(),
            outcome: Outcome::Failed,
            actual,
            expected: scenario.expected(),
            error: Some(error.to_string()),
        }
    }
}

/// Run one scenario against a speech host
pub async fn run_scenario<H>(host: &mut H, scenario: &TestScenario, options: RunOptions) -> TestResult
where
    H: SpeechHost + ?Sized,
{
    println!(
        "\n{} {}",
        "Running Scenario:".blue().bold(),
        scenario.name.white().bold()
    );

    if let Some(desc) = &scenario.description {
        println!("  {}", desc.dimmed());
    }

    if let Some(reason) = &scenario.disabled {
        if !options.include_disabled {
            println!("  {} Skipped: {}", "-".yellow(), reason.dimmed());
            return TestResult {
                name: scenario.name.clone(),
                outcome: Outcome::Skipped,
                actual: Vec::new(),
                expected: scenario.expected(),
                error: None,
            };
        }
    }

    let mut actual = Vec::with_capacity(scenario.fixture.len());
    if let Err(e) = navigate(host, scenario, options.verbose, &mut actual).await {
        tracing::debug!(scenario = %scenario.name, error = %e, "Scenario aborted");
        println!("  {} {}", "✗".red(), e);
        if !actual.is_empty() {
            let spoken: Vec<&str> = actual.iter().map(Utterance::as_str).collect();
            println!("  {} {:?}", "Spoken before failure:".dimmed(), spoken);
        }
        return TestResult::failed(scenario, actual, &e);
    }

    let expected = scenario.expected();
    if let Err(mismatch) = compare(&actual, &expected) {
        let error = Error::TestAssertion(mismatch.to_string());
        println!("  {} {}", "✗".red(), error);
        return TestResult::failed(scenario, actual, &error);
    }

    println!("  {} {}", "✓".green().bold(), "Passed".green().bold());

    TestResult {
        name: scenario.name.clone(),
        outcome: Outcome::Passed,
        actual,
        expected,
        error: None,
    }
}

/// Configure, load and navigate, appending each utterance to `spoken`
async fn navigate<H>(
    host: &mut H,
    scenario: &TestScenario,
    verbose: bool,
    spoken: &mut Vec<Utterance>,
) -> Result<()>
where
    H: SpeechHost + ?Sized,
{
    host.reset_config().await?;
    for (path, value) in scenario.settings.config_values() {
        if verbose {
            println!("  {} = {}", path.join(".").dimmed(), value);
        }
        host.set_config_value(path, value).await?;
    }

    let text = scenario.input_text();
    host.prepare_editor(&text).await?;
    if verbose {
        println!("  {} {:?}", "Editor:".cyan(), text);
    }

    let key = scenario.key();
    let presses = scenario.fixture.len();
    collect_into(host, &key, presses, spoken).await?;

    if verbose {
        println!("  {} {} x{}", "Pressed:".cyan(), key, presses);
        for (i, utterance) in spoken.iter().enumerate() {
            println!("  {:>3}: {:?}", i + 1, utterance.as_str());
        }
    }

    Ok(())
}

/// Run scenarios one after another against the same host
pub async fn run_all<H>(host: &mut H, scenarios: &[TestScenario], options: RunOptions) -> Vec<TestResult>
where
    H: SpeechHost + ?Sized,
{
    let mut results = Vec::with_capacity(scenarios.len());
    for scenario in scenarios {
        results.push(run_scenario(host, scenario, options).await);
    }
    results
}

/// Load scenario files and run them against the speech host process
///
/// All files are parsed before the host is contacted, so a typo in the last
/// file doesn't leave a half-finished run behind.
pub async fn run_scenario_files(
    paths: &[PathBuf],
    config: &Config,
    options: RunOptions,
) -> Result<Vec<TestResult>> {
    let scenarios = paths
        .iter()
        .map(|path| TestScenario::load(path))
        .collect::<Result<Vec<_>>>()?;

    ensure_host_running(config).await?;
    let mut client = HostClient::connect(config).await?;

    Ok(run_all(&mut client, &scenarios, options).await)
}

/// Print a one-line summary and fail if any scenario failed
pub fn summarize(results: &[TestResult]) -> Result<()> {
    let count = |outcome| results.iter().filter(|r| r.outcome == outcome).count();
    let (passed, failed, skipped) = (
        count(Outcome::Passed),
        count(Outcome::Failed),
        count(Outcome::Skipped),
    );

    println!(
        "\n{} passed, {} failed, {} skipped",
        passed.to_string().green().bold(),
        failed.to_string().red().bold(),
        skipped.to_string().yellow()
    );

    for result in results.iter().filter(|r| r.outcome == Outcome::Failed) {
        println!("  {} {}", "✗".red(), result.name);
    }

    if failed > 0 {
        return Err(Error::TestAssertion(format!(
            "{} of {} scenarios failed",
            failed,
            results.len()
        )));
    }
    Ok(())
}
