//! JSON documents written to stdout.

use serde::Serialize;

use ndi_core::{OperationMode, OperationResult};

use crate::cli::OutputFormat;

#[derive(Debug, Serialize)]
struct Success<'a> {
    changed: bool,
    current: &'a OperationResult,
}

#[derive(Debug, Serialize)]
struct Failure<'a> {
    failed: bool,
    msg: &'a str,
}

/// Only triggering changes remote state. Check mode reports the change
/// it would have made.
pub fn changed(mode: OperationMode) -> bool {
    mode == OperationMode::Present
}

pub fn render_success(
    result: &OperationResult,
    changed: bool,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    render(
        &Success {
            changed,
            current: result,
        },
        format,
    )
}

pub fn render_failure(msg: &str, format: OutputFormat) -> Result<String, serde_json::Error> {
    render(&Failure { failed: true, msg }, format)
}

fn render<T: Serialize>(doc: &T, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Pretty => serde_json::to_string_pretty(doc),
        OutputFormat::Compact => serde_json::to_string(doc),
    }
}
