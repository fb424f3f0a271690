//! Navigation scenario runner
//!
//! Reads YAML scenarios (or the built-in set), drives a speech host through
//! each one and compares the collected speech with the fixture.

pub mod builtin;
mod config;
mod runner;

pub use config::*;
pub use runner::{
    run_all, run_scenario, run_scenario_files, summarize, Outcome, RunOptions, TestResult,
};
