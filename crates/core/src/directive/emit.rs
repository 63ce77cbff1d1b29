//! Directive-list formatter — converts directives back into header text.
//!
//! Values that are non-empty runs of token characters are written bare;
//! everything else is written as a quoted string with `"` and `\` escaped,
//! so the output always re-parses to the same directives.

use std::fmt;

use super::{Directive, is_token_char};

/// Join directives into a header value, separated by `"; "`.
///
/// Directives with an empty value are written as a bare `name`.
pub fn format_directives<'a, I>(directives: I) -> String
where
    I: IntoIterator<Item = &'a Directive>,
{
    let mut out = String::new();
    for (i, directive) in directives.into_iter().enumerate() {
        if i > 0 {
            out.push_str("; ");
        }
        write_directive(&mut out, directive);
    }
    out
}

/// Write `value` as a quoted string, escaping `"` and `\`.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    write_quoted(&mut out, value);
    out
}

/// Returns `true` when `value` can be written without quotes.
pub fn is_bare_value(value: &str) -> bool {
    !value.is_empty() && value.chars().all(is_token_char)
}

fn write_directive(out: &mut String, directive: &Directive) {
    out.push_str(&directive.name);
    if directive.value.is_empty() {
        return;
    }
    out.push('=');
    if is_bare_value(&directive.value) {
        out.push_str(&directive.value);
    } else {
        write_quoted(out, &directive.value);
    }
}

fn write_quoted(out: &mut String, value: &str) {
    out.push('"');
    for ch in value.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        write_directive(&mut out, self);
        f.write_str(&out)
    }
}
