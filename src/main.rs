mod config;
mod logging;
mod report;
mod submit;
mod template;

use std::io::Write;

use clap::Parser;

use crate::config::{Cli, Command, SubmitConfig, TemplateConfig};
use crate::report::text::{
    render_submission, render_template_error, render_template_summary,
};

fn main() {
    logging::init();
    let cli = Cli::parse();
    if let Err(err) = run(cli.command) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

/// Every anticipated failure ends up in the returned report; `Err` is left for
/// the case where stdout itself is unusable.
fn run(command: Command) -> Result<(), String> {
    let report = match command {
        Command::Generate(args) => run_generate(&TemplateConfig::from(args)),
        Command::Submit(args) => run_submit(&SubmitConfig::from(args)),
    };

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(report.as_bytes())
        .and_then(|_| stdout.flush())
        .map_err(|e| format!("failed to write report: {e}"))
}

fn run_generate(config: &TemplateConfig) -> String {
    match template::generate(config) {
        Ok(summary) => render_template_summary(&summary),
        Err(err) => {
            tracing::warn!("template generation failed: {err}");
            render_template_error(&err)
        }
    }
}

fn run_submit(config: &SubmitConfig) -> String {
    let outcome = submit::submit(config);
    if let Err(err) = &outcome {
        tracing::warn!("submission failed: {err}");
    }
    render_submission(&outcome, config)
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
