//! Diagnostics for type annotations
//!
//! Spans, the recoverable [`SyntaxError`] raised by the annotation parser, and report rendering with source
//! highlighting (through `miette`).

use std::fmt;

use miette::{GraphicalReportHandler, GraphicalTheme, LabeledSpan, NamedSource, SourceSpan};

/// Byte range into an annotation source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::from(span.start..span.end)
    }
}

/// A syntax error in a type annotation.
///
/// The message is one of:
/// - `expected <X>; got "<token>"` / `expected <X>; got nothing`
/// - `unexpected "<token>"`
/// - `<construct> annotations are not supported yet`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SyntaxError {
    pub message: String,
    pub span: Span,
    pub help: Option<String>,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            help: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl miette::Diagnostic for SyntaxError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("luatype::syntax"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help.as_ref().map(|h| Box::new(h) as Box<dyn fmt::Display + 'a>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = LabeledSpan::new_with_span(Some("here".to_string()), self.span);
        Some(Box::new(std::iter::once(label)))
    }
}

/// Render an error as a plain-text report, with the offending source line and a label under the span.
pub fn format_error(name: &str, source: &str, error: &SyntaxError) -> String {
    let report = miette::Report::new(error.clone()).with_source_code(NamedSource::new(name, source.to_string()));
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());

    let mut out = String::new();
    match handler.render_report(&mut out, report.as_ref()) {
        Ok(()) => out,
        // Rendering only fails if the formatter does; fall back to the bare message
        Err(_) => format!("error: {}", error.message),
    }
}

// ============================================================================
// Error catalog
// ============================================================================

/// Constructors for the parser's error messages.
pub mod errors {
    use super::*;

    /// `expected <what>; got "<found>"`, or `got nothing` when `found` is `None` (end of input).
    pub fn expected(what: &str, found: Option<&str>, span: Span) -> SyntaxError {
        let got = match found {
            Some(text) => format!("\"{text}\""),
            None => "nothing".to_string(),
        };
        SyntaxError::new(format!("expected {what}; got {got}"), span)
    }

    pub fn unexpected(found: &str, span: Span) -> SyntaxError {
        SyntaxError::new(format!("unexpected \"{found}\""), span)
    }

    pub fn too_deep(limit: u32, span: Span) -> SyntaxError {
        SyntaxError::new("annotation nested too deeply", span)
            .with_help(format!("annotations may nest at most {limit} levels; name inner shapes with aliases"))
    }

    pub fn unsupported(construct: &str, span: Span) -> SyntaxError {
        let err = SyntaxError::new(format!("{construct} annotations are not supported yet"), span);
        match construct {
            "table" => err.with_help("describe the table's shape instead, e.g. `{ name: string }`"),
            "function" | "thread" => err.with_help("use an alias name for now, e.g. `Callback`"),
            _ => err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_message_with_token() {
        let err = errors::expected("\"}\"", Some("]"), Span::new(3, 4));
        assert_eq!(err.message, "expected \"}\"; got \"]\"");
        assert_eq!(err.to_string(), err.message);
    }

    #[test]
    fn test_expected_message_at_end_of_input() {
        let err = errors::expected("<type>", None, Span::new(5, 5));
        assert_eq!(err.message, "expected <type>; got nothing");
    }

    #[test]
    fn test_unsupported_carries_help() {
        let err = errors::unsupported("function", Span::new(0, 2));
        assert_eq!(err.message, "function annotations are not supported yet");
        assert!(err.help.is_some());
    }

    #[test]
    fn test_format_error_points_at_source() {
        let source = "{ a: }";
        let err = errors::unexpected("}", Span::new(5, 6));
        let report = format_error("annotation", source, &err);
        assert!(report.contains("unexpected \"}\""));
        assert!(report.contains(source));
        assert!(report.contains("luatype::syntax"));
    }

    #[test]
    fn test_span_display() {
        assert_eq!(Span::new(2, 7).to_string(), "2..7");
        assert_eq!(Span::new(2, 7).len(), 5);
        assert!(Span::new(4, 4).is_empty());
    }
}
