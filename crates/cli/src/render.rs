//! Pretty error rendering using ariadne.
//!
//! Turns a [`DirectiveError`] into an ariadne [`Report`] that underlines the
//! offending bytes of the header value. Falls back to structured JSON when
//! the output is piped or when the user explicitly requests it.

use std::io::{self, IsTerminal};

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use headerkit_core::DirectiveError;

// ── Output format ───────────────────────────────────────────────────────

/// Output format for command results and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Coloured, source-annotated output (ariadne).
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Use the explicit choice, or detect from whether stdout is a TTY.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            _ => {
                if io::stdout().is_terminal() {
                    Format::Pretty
                } else {
                    Format::Json
                }
            }
        }
    }
}

// ── Directive errors ────────────────────────────────────────────────────

/// Render a directive-list error against the value it came from.
///
/// - `Pretty` → ariadne report on stderr.
/// - `Json`   → `{"ok": false, "error": {...}}` on stdout.
pub(crate) fn render_directive_error(
    source: &str,
    origin: &str,
    err: &DirectiveError,
    format: Format,
) {
    match format {
        Format::Pretty => render_pretty(source, origin, err),
        Format::Json => println!("{}", error_json(err)),
    }
}

fn render_pretty(source: &str, origin: &str, err: &DirectiveError) {
    let span = err.span();
    // Clamp span to source length to avoid panics on truncated input.
    let start = span.start.min(source.len());
    let end = span.end.min(source.len()).max(start);

    let mut builder = Report::build(ReportKind::Error, (origin, start..end))
        .with_code(err.code())
        .with_message(err.to_string())
        .with_config(
            // Spans are byte offsets, not char offsets.
            Config::default()
                .with_compact(false)
                .with_index_type(IndexType::Byte),
        )
        .with_label(
            Label::new((origin, start..end))
                .with_message(label_message(err))
                .with_color(Color::Red),
        );
    if let Some(explanation) = err.explain() {
        builder = builder.with_help(explanation);
    }

    builder
        .finish()
        .eprint((origin, Source::from(source)))
        .ok();
}

fn label_message(err: &DirectiveError) -> String {
    match err {
        DirectiveError::IllegalCharacter { ch, .. } => format!("{ch:?} is not allowed here"),
        DirectiveError::UnexpectedSymbol { ch, .. } => format!("expected ';' before {ch:?}"),
        DirectiveError::ImbalancedQuote { .. } => "this quote is never closed".to_owned(),
    }
}

/// JSON failure object for a directive error.
fn error_json(err: &DirectiveError) -> String {
    let out = serde_json::json!({
        "ok": false,
        "error": {
            "code": err.code(),
            "kind": err.kind(),
            "message": err.to_string(),
            "span": err.span(),
        },
    });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| out.to_string())
}

// ── Command failures ────────────────────────────────────────────────────

/// Report a failed command: a JSON envelope on stdout, or a plain
/// `error:` line on stderr.
pub(crate) fn render_failure(err: &anyhow::Error, format: Format) {
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "success": false,
                "error": "command_failed",
                "message": format!("{err:#}"),
            });
            println!("{out}");
        }
        Format::Pretty => {
            use ariadne::Fmt;
            eprintln!("{}: {err:#}", "error".fg(Color::Red));
        }
    }
}
