//! Shared output layer for human/JSON parity across all CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its
//! output accordingly: readable text for humans, stable JSON for agents
//! and scripts.

use serde::Serialize;
use std::io::{self, Write};

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
    #[must_use]
    pub fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Render a value: JSON straight to stdout, or through the provided
/// human formatter.
pub fn render<T, F>(mode: OutputMode, value: &T, human: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce(&T, &mut dyn Write) -> io::Result<()>,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, value)?;
            writeln!(out)?;
        }
        OutputMode::Human => human(value, &mut out)?,
    }
    Ok(())
}

/// A structured error for command failures.
#[derive(Debug, Clone, Serialize)]
pub struct CliError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            hint: None,
            code: None,
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: stemma_core::ErrorCode) -> Self {
        self.code = Some(code.code().to_string());
        if self.hint.is_none() {
            self.hint = code.hint().map(str::to_string);
        }
        self
    }
}

/// Render an error to stderr in the requested mode.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    if mode.is_json() {
        serde_json::to_writer_pretty(&mut out, error)?;
        writeln!(out)?;
    } else {
        match &error.code {
            Some(code) => writeln!(out, "error[{code}]: {}", error.message)?,
            None => writeln!(out, "error: {}", error.message)?,
        }
        if let Some(hint) = &error.hint {
            writeln!(out, "hint: {hint}")?;
        }
    }
    Ok(())
}

/// Render a left-aligned key/value line in human output.
pub fn kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<12} {}", format!("{key}:"), value.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_mode_detection() {
        assert!(OutputMode::Json.is_json());
        assert!(!OutputMode::Human.is_json());
    }

    #[test]
    fn cli_error_picks_up_code_and_hint() {
        let err = CliError::new("bad payload").with_code(stemma_core::ErrorCode::ShareDecodeFailed);
        assert_eq!(err.code.as_deref(), Some("E4002"));
        assert!(err.hint.is_some());
    }
}
