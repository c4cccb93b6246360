//! Compile a pattern source and apply it to input text.

use super::CliError;
use crate::{compiler, extract, output};

/// Options for the extract command
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// The pattern source to compile
    pub source: String,
    /// The text to extract from
    pub input: Option<String>,
    /// Pretty-print the output
    pub pretty: bool,
}

/// Execute a weft extract operation, returning the result as JSON text.
pub fn execute_extract(options: &ExtractOptions) -> Result<String, CliError> {
    let input = options.input.as_ref().ok_or(CliError::NoInput)?;

    let pattern = compiler::compile_all(&options.source).map_err(CliError::Compile)?;
    let result = extract::apply(&pattern, input).map_err(CliError::Extract)?;

    Ok(if options.pretty {
        output::to_json_pretty(&result)
    } else {
        output::to_json(&result)
    })
}
