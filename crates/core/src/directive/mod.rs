/// Stable diagnostic codes for directive-list errors.
pub mod codes;
/// Forward-only cursor over directive-list input.
mod cursor;
/// Directive-list formatter — converts directives back into header text.
pub mod emit;
/// Directive-list error taxonomy and byte spans.
pub mod error;
/// Directive-list parser — converts header text into directives.
pub mod parser;

use serde::{Deserialize, Serialize};

/// One `name` or `name=value` unit of a directive list.
///
/// `value` is the empty string when the directive carried no `=value`
/// (or an empty one, as in `foo=`). Quoted values are stored unquoted and
/// unescaped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Directive {
    /// Directive name, exactly as written (no case folding).
    pub name: String,
    /// Directive value with quotes and escapes removed.
    pub value: String,
}

impl Directive {
    /// Create a directive from a name and value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Create a bare directive (`name` with no value).
    pub fn flag(name: impl Into<String>) -> Self {
        Self::new(name, String::new())
    }
}

/// Returns `true` if `ch` may appear in a directive name or unquoted value.
///
/// Excludes the list separator `;`, linear whitespace, `=`, and the HTTP
/// delimiter set `( ) < > @ , : \ / [ ] ? { } "`.
pub fn is_token_char(ch: char) -> bool {
    !matches!(
        ch,
        ';' | ' '
            | '\t'
            | '='
            | '('
            | ')'
            | '<'
            | '>'
            | '@'
            | ','
            | ':'
            | '\\'
            | '/'
            | '['
            | ']'
            | '?'
            | '{'
            | '}'
            | '"'
    )
}

/// Returns `true` for linear whitespace (space or horizontal tab).
pub(crate) fn is_lws(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}
