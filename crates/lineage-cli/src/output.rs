//! Shared output layer for human/JSON parity across CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and renders through the
//! same two entry points: [`render`] for results, [`render_error`] for
//! structured failures. JSON output is schema-stable so agents and scripts
//! can branch on the `code` field.

use serde::Serialize;
use std::io::{self, Write};

use lineage_core::LineageError;

/// The two output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text.
    Human,
    /// Machine-readable JSON (one object per result).
    Json,
}

impl OutputMode {
    /// Returns `true` if JSON output was requested.
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// A structured, machine-parseable CLI error.
#[derive(Debug, Serialize)]
pub struct CliError {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub code: String,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            details: None,
            code: "error".to_string(),
        }
    }

    pub fn with_details(
        message: impl Into<String>,
        details: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            error: message.into(),
            details: Some(details.into()),
            code: code.into(),
        }
    }

    /// Map a core rejection to CLI output: the taxonomy code becomes the
    /// machine-readable `code`, the kind's hint becomes `details`.
    ///
    /// Store faults are not mapped here; they propagate as plain errors.
    pub fn from_rejection(err: &LineageError) -> Self {
        err.rejection().map_or_else(
            || Self::new(err.to_string()),
            |rejection| Self {
                error: rejection.message.clone(),
                details: rejection.kind.hint().map(str::to_string),
                code: rejection.kind.code().to_string(),
            },
        )
    }
}

/// Render a successful result in the active output mode.
///
/// JSON mode serializes `value`; human mode calls the provided closure.
///
/// # Errors
///
/// Returns an error if serialization or writing to stdout fails.
pub fn render<T: Serialize>(
    mode: OutputMode,
    value: &T,
    human: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut w = stdout.lock();
    if mode.is_json() {
        serde_json::to_writer_pretty(&mut w, value)?;
        writeln!(w)?;
    } else {
        human(value, &mut w)?;
    }
    Ok(())
}

/// Render a structured error to stderr in the active output mode.
///
/// # Errors
///
/// Returns an error if serialization or writing to stderr fails.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut w = stderr.lock();
    if mode.is_json() {
        serde_json::to_writer_pretty(&mut w, error)?;
        writeln!(w)?;
    } else {
        writeln!(w, "error[{}]: {}", error.code, error.error)?;
        if let Some(details) = &error.details {
            writeln!(w, "  hint: {details}")?;
        }
    }
    Ok(())
}
