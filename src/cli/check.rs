//! Validate JSON syntax trees

use serde_json::Value;

use super::CliError;
use crate::validate::{Report, Severity, Validator};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The JSON tree to validate
    pub ast: Option<String>,
    /// Query text the tree was parsed from, enables location checks
    pub source: Option<String>,
    /// Render the report as JSON
    pub json: bool,
}

/// Result of a check operation
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    pub report: Report,
    json: bool,
}

impl CheckResult {
    pub fn is_valid(&self) -> bool {
        !self.report.has_errors()
    }

    /// The report as the check command prints it.
    pub fn render(&self) -> Result<String, CliError> {
        if self.json {
            return Ok(serde_json::to_string_pretty(&self.report)?);
        }
        if self.report.messages.is_empty() {
            return Ok("Syntax tree is valid".to_string());
        }
        let lines: Vec<String> = self
            .report
            .messages
            .iter()
            .map(|message| {
                let severity = match message.severity {
                    Severity::Error => "error",
                    Severity::Warning => "warning",
                };
                match message.location {
                    Some(location) => format!(
                        "{}: {} ({} [{}..{}])",
                        severity, message.text, message.path, location.min, location.max
                    ),
                    None => format!("{}: {} ({})", severity, message.text, message.path),
                }
            })
            .collect();
        Ok(lines.join("\n"))
    }
}

/// Execute a check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let input = options.ast.as_ref().ok_or(CliError::NoInput)?;
    let tree: Value = serde_json::from_str(input)?;

    let mut validator = Validator::new();
    if let Some(source) = &options.source {
        validator = validator.with_source(source);
    }
    let report = validator.validate(&tree);

    Ok(CheckResult {
        report,
        json: options.json,
    })
}
