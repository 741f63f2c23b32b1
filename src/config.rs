use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/evaluate";
pub const DEFAULT_SUBMISSION_FILE: &str = "submission.csv";
pub const DEFAULT_USER_ID: &str = "your_user_id";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_VALUE_COLUMN: &str = "Value";

#[derive(Debug, Parser)]
#[command(name = "evalsubmit", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write a placeholder prediction file with one row per hour.
    Generate(GenerateArgs),
    /// Send a prediction file to the scoring server and print its metrics.
    Submit(SubmitArgs),
}

#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// First timestamp, e.g. "2025-01-01 00:00:00".
    #[arg(long, env = "START_DATETIME")]
    pub start: String,
    /// Last timestamp (inclusive).
    #[arg(long, env = "END_DATETIME")]
    pub end: String,
    #[arg(long, env = "OUTPUT_FILENAME", default_value = DEFAULT_SUBMISSION_FILE)]
    pub output: PathBuf,
    /// Placeholder written to every row.
    #[arg(long, default_value_t = 0.0)]
    pub value: f64,
    #[arg(long, default_value = DEFAULT_VALUE_COLUMN)]
    pub value_column: String,
}

#[derive(Debug, Clone, Args)]
pub struct SubmitArgs {
    #[arg(long, env = "EVAL_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,
    #[arg(long, env = "SUBMISSION_FILE", default_value = DEFAULT_SUBMISSION_FILE)]
    pub file: PathBuf,
    #[arg(long, env = "EVAL_USER_ID", default_value = DEFAULT_USER_ID)]
    pub user_id: String,
    /// Request timeout in seconds.
    #[arg(
        long,
        env = "EVAL_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,
}

/// Settings for one submission attempt. Built once, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitConfig {
    pub api_url: String,
    pub submission_file: PathBuf,
    pub user_id: String,
    pub timeout: Duration,
}

impl From<SubmitArgs> for SubmitConfig {
    fn from(args: SubmitArgs) -> Self {
        Self {
            api_url: args.api_url,
            submission_file: args.file,
            user_id: args.user_id,
            timeout: Duration::from_secs(args.timeout),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateConfig {
    pub start: String,
    pub end: String,
    pub output: PathBuf,
    pub value: f64,
    pub value_column: String,
}

impl From<GenerateArgs> for TemplateConfig {
    fn from(args: GenerateArgs) -> Self {
        Self {
            start: args.start,
            end: args.end,
            output: args.output,
            value: args.value,
            value_column: args.value_column,
        }
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/config.rs"]
mod tests;
