//! `ndi-analysis` library crate.
//!
//! [`run_from_args`] is the whole binary minus process setup: it parses
//! arguments, loads settings through a variable lookup, dispatches, and
//! returns the exit code with the JSON document for stdout. `main.rs`
//! only wires in the real environment and the tracing subscriber.

use std::ffi::OsString;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;

use ndi_client::{LazyInsightsClient, NdConfig};
use ndi_core::{Dispatcher, Invocation};

use crate::cli::{Cli, OutputFormat};

pub mod cli;
pub mod output;

pub const EXIT_SUCCESS: u8 = 0;
/// The invocation ran and failed.
pub const EXIT_FAILURE: u8 = 1;
/// Bad arguments or configuration; nothing was attempted.
pub const EXIT_USAGE: u8 = 2;

/// Result of one run: the process exit code and what goes to stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    pub exit_code: u8,
    pub stdout: String,
}

/// Parse `args` (program name first) and [`run`] them.
///
/// Argument errors produce the failure document with [`EXIT_USAGE`];
/// `--help` and `--version` print clap's plain text.
pub async fn run_from_args<I, T, F>(args: I, lookup: F) -> RunOutput
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    F: Fn(&str) -> Option<String>,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => run(&cli, lookup).await,
        Err(e) => argument_error(&e),
    }
}

/// Execute one invocation. `lookup` resolves the `ND_*` variables.
pub async fn run<F>(cli: &Cli, lookup: F) -> RunOutput
where
    F: Fn(&str) -> Option<String>,
{
    let (invocation, config) = match setup(cli, lookup) {
        Ok(setup) => setup,
        Err(e) => {
            let msg = format!("{e:#}");
            tracing::error!(error = %msg, "Invalid invocation");
            return failure(EXIT_USAGE, &msg, cli.output);
        }
    };

    tracing::info!(
        mode = %invocation.mode,
        check = invocation.dry_run,
        host = %config.host,
        "Starting ndi-analysis",
    );

    let dispatcher = Dispatcher::new(LazyInsightsClient::new(config));

    match dispatcher.run(&invocation).await {
        Ok(result) => {
            let changed = output::changed(invocation.mode);
            match output::render_success(&result, changed, cli.output) {
                Ok(stdout) => RunOutput {
                    exit_code: EXIT_SUCCESS,
                    stdout,
                },
                Err(e) => {
                    tracing::error!(error = %e, "Failed to render result");
                    failure(EXIT_FAILURE, &format!("failed to render result: {e}"), cli.output)
                }
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Instant assurance analysis failed");
            failure(EXIT_FAILURE, &e.to_string(), cli.output)
        }
    }
}

/// Validate arguments and load connection settings.
fn setup<F>(cli: &Cli, lookup: F) -> anyhow::Result<(Invocation, NdConfig)>
where
    F: Fn(&str) -> Option<String>,
{
    let invocation = cli.invocation().context("invalid arguments")?;
    let config = NdConfig::from_lookup(lookup).context("invalid Nexus Dashboard configuration")?;
    Ok((invocation, config))
}

fn argument_error(e: &clap::Error) -> RunOutput {
    let rendered = e.to_string();
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => RunOutput {
            exit_code: EXIT_SUCCESS,
            stdout: rendered.trim_end().to_string(),
        },
        _ => {
            tracing::error!(error = %rendered.trim_end(), "Invalid arguments");
            failure(EXIT_USAGE, &summarize(&rendered), OutputFormat::Pretty)
        }
    }
}

/// Collapse clap's multi-line error into one line, dropping the usage
/// and `--help` hint.
fn summarize(rendered: &str) -> String {
    let lines: Vec<&str> = rendered
        .lines()
        .map(str::trim)
        .take_while(|l| !l.starts_with("Usage:") && !l.starts_with("For more information"))
        .filter(|l| !l.is_empty())
        .collect();
    lines.join(" ").trim_start_matches("error: ").to_string()
}

fn failure(exit_code: u8, msg: &str, format: OutputFormat) -> RunOutput {
    let stdout = output::render_failure(msg, format).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to render failure");
        String::new()
    });
    RunOutput { exit_code, stdout }
}
