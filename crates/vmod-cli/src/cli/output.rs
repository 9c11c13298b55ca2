//! Rendering results, warnings and prompts.

use anyhow::Context;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use vmod_common::{ConsoleError, ErrorReport};
use vmod_core::{DomainError, InputWarning};

use super::commands::OutputFormat;

/// Where command results go
#[derive(Debug, Clone, Copy)]
pub struct Output {
    format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Print `value` as JSON, or hand it to `human` for the text view
    pub fn render<T, F>(&self, value: &T, human: F) -> anyhow::Result<()>
    where
        T: Serialize + ?Sized,
        F: FnOnce(&T),
    {
        if self.is_json() {
            let json = serde_json::to_string_pretty(value).context("Failed to encode output")?;
            println!("{json}");
        } else {
            human(value);
        }
        Ok(())
    }

    /// One line of a stream; compact JSON so each event is its own line
    pub fn event<T: Serialize + ?Sized>(&self, value: &T, human: &str) -> anyhow::Result<()> {
        if self.is_json() {
            println!("{}", serde_json::to_string(value).context("Failed to encode output")?);
        } else {
            println!("{human}");
        }
        Ok(())
    }

    /// One-line confirmation of a mutation
    pub fn done(&self, message: &str) -> anyhow::Result<()> {
        self.render(&serde_json::json!({ "ok": true, "message": message }), |_| {
            println!("{message}");
        })
    }

    /// The operator declined a confirmation; nothing was sent
    pub fn aborted(&self) -> anyhow::Result<()> {
        self.render(&serde_json::json!({ "ok": false, "message": "Aborted" }), |_| {
            println!("Aborted");
        })
    }

    /// Input repairs go to stderr so JSON on stdout stays parseable
    pub fn warnings(&self, warnings: &[InputWarning]) {
        for warning in warnings {
            eprintln!("warning: {warning}");
        }
    }

    /// Render a failure as a single message
    pub fn error(&self, err: &anyhow::Error) {
        if !self.is_json() {
            eprintln!("error: {err:#}");
            return;
        }
        let report = error_report(err);
        match serde_json::to_string(&report) {
            Ok(json) => println!("{json}"),
            Err(_) => eprintln!("error: {err:#}"),
        }
    }
}

fn error_report(err: &anyhow::Error) -> ErrorReport {
    if let Some(console) = err.downcast_ref::<ConsoleError>() {
        return ErrorReport::from(console);
    }
    if let Some(domain) = err.downcast_ref::<DomainError>() {
        return ErrorReport {
            code: domain.code().to_string(),
            message: domain.to_string(),
            status: None,
        };
    }
    ErrorReport {
        code: "CLI_ERROR".to_string(),
        message: format!("{err:#}"),
        status: None,
    }
}

/// Ask before a destructive call unless `--yes` was given
pub fn confirm(prompt: &str, assume_yes: bool) -> anyhow::Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    let stdin = io::stdin();
    confirm_with(prompt, &mut stdin.lock(), &mut io::stderr())
}

fn confirm_with<R: BufRead, W: Write>(prompt: &str, input: &mut R, out: &mut W) -> anyhow::Result<bool> {
    write!(out, "{prompt} [y/N] ")?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer).context("Failed to read confirmation")?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "YES"))
}

/// Text of an optional field, `-` when absent
pub fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
