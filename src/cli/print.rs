//! Print JSON syntax trees as query text

use serde_json::Value;

use super::CliError;
use crate::{
    convert::json_to_query,
    printer::{Printer, PrinterOptions},
};

/// Options for the print command
#[derive(Debug, Clone, Default)]
pub struct PrintOptions {
    /// The JSON tree to print
    pub ast: Option<String>,
    /// One command per line
    pub multiline: bool,
    /// Lowercase commands, functions and keywords
    pub lowercase: bool,
}

/// Execute a print operation
pub fn execute_print(options: &PrintOptions) -> Result<String, CliError> {
    let input = options.ast.as_ref().ok_or(CliError::NoInput)?;
    let tree: Value = serde_json::from_str(input)?;
    let query = json_to_query(&tree)?;

    let mut printer_options = if options.lowercase {
        PrinterOptions::lowercase()
    } else {
        PrinterOptions::default()
    };
    printer_options.multiline = options.multiline;

    Ok(Printer::new(printer_options).print_query(&query))
}
