//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;

use crate::frontend::diagnostics::{self, SyntaxError};
use crate::frontend::lexer;
use crate::frontend::parser;
use crate::frontend::types::Type;

use super::{CliError, CliResult, ExitCode, InputArgs};

/// Maximum annotation file size (1 MiB)
const MAX_SOURCE_SIZE: u64 = 1024 * 1024;

/// Annotation text plus the name it is reported under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub name: String,
    pub source: String,
}

/// Resolve the command's input: inline text, or the contents of `--file`.
pub fn read_input(args: &InputArgs) -> CliResult<Input> {
    if let Some(path) = &args.file {
        let name = path.to_string_lossy().to_string();
        let source = read_source(&name)?;
        return Ok(Input { name, source });
    }
    match &args.text {
        Some(text) => Ok(Input {
            name: "<annotation>".to_string(),
            source: text.clone(),
        }),
        None => Err(CliError::failure("Error: expected annotation text or --file <FILE>")),
    }
}

/// Read a source file with size validation.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be accessed or read
/// - The file exceeds `MAX_SOURCE_SIZE` (1 MiB)
pub fn read_source(file_path: &str) -> CliResult<String> {
    let metadata =
        fs::metadata(file_path).map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path, e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            file_path,
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(file_path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path, e)))
}

// ============================================================================
// lex
// ============================================================================

/// Tokenize and display tokens.
pub fn lex_source(input: &Input) -> CliResult<ExitCode> {
    print!("{}", format_tokens(&input.source));
    Ok(ExitCode::SUCCESS)
}

/// One line per token: `<kind> @ <start>..<end>`.
pub fn format_tokens(source: &str) -> String {
    lexer::lex(source)
        .iter()
        .map(|token| format!("{} @ {}\n", token.kind, token.span))
        .collect()
}

// ============================================================================
// parse
// ============================================================================

/// Parse and display the resulting type(s).
pub fn parse_source(input: &Input, all: bool) -> CliResult<ExitCode> {
    let output = if all {
        parse_all(&input.source).map(|types| types.iter().map(|ty| format!("{ty}\n")).collect::<String>())
    } else {
        parse_one(&input.source)
    };

    match output {
        Ok(text) => {
            print!("{text}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => Err(CliError::failure(
            diagnostics::format_error(&input.name, &input.source, &err).trim_end(),
        )),
    }
}

/// Parse the leading annotation; report the type and the unparsed remainder.
pub fn parse_one(source: &str) -> Result<String, SyntaxError> {
    let mut cursor = 0;
    let ty = parser::parse_annotation(source, &mut cursor)?;
    let remainder = source.get(cursor..).unwrap_or_default();
    Ok(format!("{ty}\nremainder: {remainder:?}\n"))
}

/// Parse successive annotations separated by whitespace or a single comma.
pub fn parse_all(source: &str) -> Result<Vec<Type>, SyntaxError> {
    let mut cursor = 0;
    let mut types = Vec::new();

    loop {
        cursor = skip_whitespace(source, cursor);
        if !types.is_empty() && source[cursor..].starts_with(',') {
            cursor = skip_whitespace(source, cursor + 1);
        }
        if cursor >= source.len() {
            break;
        }
        types.push(parser::parse_annotation(source, &mut cursor)?);
    }

    tracing::debug!(count = types.len(), "parsed annotations");
    Ok(types)
}

fn skip_whitespace(source: &str, from: usize) -> usize {
    let rest = &source[from..];
    from + (rest.len() - rest.trim_start().len())
}
