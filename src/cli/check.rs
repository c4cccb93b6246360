//! Validate a pattern source: parse, and optionally compile.

use super::CliError;
use crate::{compiler, parser};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The pattern source to validate
    pub source: String,
    /// Only validate syntax, don't compile
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Compilation passed; carries the defined names in order
    Compiled(Vec<String>),
}

/// Execute a weft check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let tree = parser::parse(&options.source).map_err(CliError::Parse)?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid);
    }

    let scope = compiler::compile_tree(&tree).map_err(CliError::Compile)?;
    Ok(CheckResult::Compiled(scope.keys().cloned().collect()))
}
