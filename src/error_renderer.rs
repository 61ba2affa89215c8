//! Error rendering using ariadne
//!
//! Evaluation errors carry the source text and a byte span, which is enough
//! to print the offending expression with the failing token underlined.

use crate::{Diagnostic, Error, Severity};
use ariadne::{ColorGenerator, Config, IndexType, Label, Report, ReportKind, Source};
use std::io::Write;

const SOURCE_ID: &str = "<expr>";

/// Render an error with formatting to stderr
///
/// # Example
/// ```no_run
/// use remexpr::{Engine, EngineOptions, render_error};
///
/// let mut engine = Engine::new(EngineOptions::default());
/// if let Err(e) = engine.eval("1 + \"a\" * 2") {
///     render_error(&e);
/// }
/// ```
pub fn render_error(error: &Error) {
    render_error_to_writer(error, &mut std::io::stderr(), true).ok();
}

/// Render an error to a specific writer
pub fn render_error_to(error: &Error, writer: &mut dyn Write) -> std::io::Result<()> {
    render_error_to_writer(error, writer, true)
}

/// Render an error to a String
pub fn render_error_to_string(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Render an error to a String without color codes (useful for tests)
pub fn render_error_to_string_no_color(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

fn render_error_to_writer(
    error: &Error,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    match (error.diagnostic(), error.source_text()) {
        (Some(diagnostic), Some(source)) => {
            render_diagnostic(source, diagnostic, writer, use_color)
        }
        _ => writeln!(writer, "{}", error),
    }
}

fn render_diagnostic(
    source: &str,
    diag: &Diagnostic,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    let mut colors = ColorGenerator::new();
    colors.next(); // Skip the first color.

    let kind = match diag.severity {
        Severity::Error => ReportKind::Error,
        Severity::Warning => ReportKind::Warning,
        Severity::Info => ReportKind::Advice,
    };

    let span = diag.span.start..diag.span.end;
    let config = Config::default()
        .with_color(use_color)
        .with_index_type(IndexType::Byte);

    let mut report = Report::build(kind, (SOURCE_ID, span.clone()))
        .with_message(&diag.message)
        .with_config(config);

    if let Some(code) = &diag.code {
        report = report.with_code(code);
    }

    report = report.with_label(
        Label::new((SOURCE_ID, span))
            .with_message(&diag.message)
            .with_color(colors.next()),
    );

    if let Some(help) = &diag.help {
        report = report.with_help(help);
    }

    report
        .finish()
        .write((SOURCE_ID, Source::from(source)), &mut *writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Engine, EngineOptions};

    #[test]
    fn test_render_syntax_error() {
        let mut engine = Engine::new(EngineOptions::default());
        let err = engine.eval("(1 + 2").unwrap_err();
        let output = render_error_to_string_no_color(&err);

        assert!(output.contains("Error"));
        assert!(output.contains("(1 + 2"));
        assert!(output.contains("Missing ')'"));
        assert!(output.contains("E006"));
    }

    #[test]
    fn test_render_runtime_error() {
        let mut engine = Engine::new(EngineOptions::default());
        let err = engine.eval("1 + \"a\" * 2").unwrap_err();
        let output = render_error_to_string_no_color(&err);

        assert!(output.contains("1 + \"a\" * 2"));
        assert!(output.lines().count() > 1);
    }

    #[test]
    fn test_render_api_error_is_one_line() {
        let mut engine = Engine::new(EngineOptions::default());
        let err = engine.define("no equals here").unwrap_err();
        let output = render_error_to_string_no_color(&err);

        assert_eq!(output, format!("{}\n", err));
    }

    #[test]
    fn test_no_color_output_is_plain() {
        let mut engine = Engine::new(EngineOptions::default());
        let err = engine.eval("1 / 0").unwrap_err();

        assert!(!render_error_to_string_no_color(&err).contains('\u{1b}'));
    }
}
