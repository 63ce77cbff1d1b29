//! Diagnostic ID constants.
//!
//! Use these instead of string literals when matching on
//! [`DirectiveError::code`](super::error::DirectiveError::code).

/// A delimiter character appeared inside a directive name or unquoted value.
pub const DIRECTIVE_ILLEGAL_CHARACTER: &str = "HDR1001";
/// Something other than `;` or end of input followed a directive.
pub const DIRECTIVE_UNEXPECTED_SYMBOL: &str = "HDR1002";
/// A quoted value was never closed.
pub const DIRECTIVE_IMBALANCED_QUOTE: &str = "HDR1003";

const EXPLANATIONS: &[(&str, &str)] = &[
    (
        DIRECTIVE_ILLEGAL_CHARACTER,
        "Directive names and unquoted values may not contain separators or the HTTP \
         delimiter set ( ) < > @ , : \\ / [ ] ? { } \" =. Quote the value to include them.",
    ),
    (
        DIRECTIVE_UNEXPECTED_SYMBOL,
        "Each directive must be followed by ';' or the end of the header. Two directives \
         separated only by whitespace, or text after a closing quote, trigger this error.",
    ),
    (
        DIRECTIVE_IMBALANCED_QUOTE,
        "A quoted value reached the end of the header before its closing '\"'. Inside quotes \
         ';' and spaces are ordinary characters, and a trailing backslash escapes nothing.",
    ),
];

/// Look up the long-form explanation for a diagnostic code.
pub fn explain(id: &str) -> Option<&'static str> {
    EXPLANATIONS
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(id))
        .map(|(_, text)| *text)
}

/// All known diagnostic codes, in ascending order.
pub fn all() -> impl Iterator<Item = &'static str> {
    EXPLANATIONS.iter().map(|(code, _)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_has_an_explanation() {
        for code in all() {
            assert!(explain(code).is_some(), "missing explanation for {code}");
        }
    }

    #[test]
    fn explain_is_case_insensitive() {
        assert_eq!(explain("hdr1003"), explain(DIRECTIVE_IMBALANCED_QUOTE));
        assert!(explain("HDR9999").is_none());
    }
}
