//! Typed errors for directive-list parsing.

use serde::{Deserialize, Serialize};

use super::codes;

/// Byte span in the parsed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset of the first character (0-based).
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

impl Span {
    /// Create a span covering `[start, end)`.
    ///
    /// Panics if `end < start`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(end >= start, "Span end ({end}) < start ({start})");
        Self { start, end }
    }

    /// Create a zero-width span at the given position.
    pub fn empty(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` for a zero-width span.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// The kind of grammar violation, without position details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A delimiter appeared where a name or unquoted value character was expected.
    IllegalCharacter,
    /// After a directive, neither `;` nor end of input was found.
    UnexpectedSymbol,
    /// A quoted value's closing quote was never found.
    ImbalancedQuote,
}

/// A directive-list grammar violation.
///
/// Parsing stops at the first violation; the error carries the offending
/// character (where there is one) and its byte span in the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectiveError {
    /// A delimiter appeared where a name or unquoted value character was expected.
    #[error("illegal character {ch:?} at byte {}", span.start)]
    IllegalCharacter {
        /// The offending character.
        ch: char,
        /// Location of the offending character.
        span: Span,
    },

    /// After a directive, neither `;` nor end of input was found.
    #[error("unexpected symbol {ch:?} at byte {}, expected ';' or end of input", span.start)]
    UnexpectedSymbol {
        /// The character found instead of a separator.
        ch: char,
        /// Location of the offending character.
        span: Span,
    },

    /// A quoted value reached end of input before its closing quote.
    #[error("imbalanced quote: value opened at byte {} is never closed", span.start)]
    ImbalancedQuote {
        /// From the opening quote to the end of input.
        span: Span,
    },
}

impl DirectiveError {
    /// The kind of violation.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DirectiveError::IllegalCharacter { .. } => ErrorKind::IllegalCharacter,
            DirectiveError::UnexpectedSymbol { .. } => ErrorKind::UnexpectedSymbol,
            DirectiveError::ImbalancedQuote { .. } => ErrorKind::ImbalancedQuote,
        }
    }

    /// Location of the violation in the input.
    pub fn span(&self) -> Span {
        match self {
            DirectiveError::IllegalCharacter { span, .. }
            | DirectiveError::UnexpectedSymbol { span, .. }
            | DirectiveError::ImbalancedQuote { span } => *span,
        }
    }

    /// Stable diagnostic code (e.g. `"HDR1001"`).
    pub fn code(&self) -> &'static str {
        match self.kind() {
            ErrorKind::IllegalCharacter => codes::DIRECTIVE_ILLEGAL_CHARACTER,
            ErrorKind::UnexpectedSymbol => codes::DIRECTIVE_UNEXPECTED_SYMBOL,
            ErrorKind::ImbalancedQuote => codes::DIRECTIVE_IMBALANCED_QUOTE,
        }
    }

    /// Long-form explanation for this error's code.
    pub fn explain(&self) -> Option<&'static str> {
        codes::explain(self.code())
    }
}
