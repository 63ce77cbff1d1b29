use std::collections::BTreeMap;

use super::{
    Directive,
    cursor::Cursor,
    error::DirectiveError,
    is_lws, is_token_char,
};

/// Result of one scanning step: the scanned item and the cursor after it.
type Step<'a, T> = Result<(T, Cursor<'a>), DirectiveError>;

// ─── Public API ─────────────────────────────────────────────────────────────

/// Parse a directive list into a name → value mapping.
///
/// Names are compared byte-for-byte; when a name repeats, the last
/// occurrence wins. Empty input yields an empty mapping.
///
/// ```
/// let map = headerkit_core::parse_directives("max-age=3600; includeSubDomains").unwrap();
/// assert_eq!(map["max-age"], "3600");
/// assert_eq!(map["includeSubDomains"], "");
/// ```
pub fn parse_directives(input: &str) -> Result<BTreeMap<String, String>, DirectiveError> {
    Ok(parse_directive_list(input)?
        .into_iter()
        .map(|d| (d.name, d.value))
        .collect())
}

/// Parse a directive list into its directives, in input order.
///
/// Unlike [`parse_directives`], repeated names are all kept.
pub fn parse_directive_list(input: &str) -> Result<Vec<Directive>, DirectiveError> {
    let result = scan(input);
    match &result {
        Ok(list) => tracing::trace!(directives = list.len(), "parsed directive list"),
        Err(err) => tracing::trace!(code = err.code(), %err, "rejected directive list"),
    }
    result
}

// ─── Scanner ────────────────────────────────────────────────────────────────

fn scan(input: &str) -> Result<Vec<Directive>, DirectiveError> {
    let mut out = Vec::new();
    if input.is_empty() {
        return Ok(out);
    }

    let mut cur = Cursor::new(input);
    loop {
        let (directive, next) = directive(cur)?;
        out.extend(directive);
        match next.peek() {
            None => return Ok(out),
            Some(';') => cur = next.bump(),
            Some(ch) => {
                return Err(DirectiveError::UnexpectedSymbol {
                    ch,
                    span: next.span_here(),
                });
            }
        }
    }
}

/// `LWS* name [ '=' value ] LWS*`. Yields `None` for an empty name.
fn directive(cur: Cursor<'_>) -> Step<'_, Option<Directive>> {
    let cur = skip_lws(cur);
    let (name, cur) = name(cur)?;
    let (value, cur) = match cur.accept('=') {
        Some(after_eq) => value(after_eq)?,
        None => (String::new(), cur),
    };
    let cur = skip_lws(cur);

    let directive = (!name.is_empty()).then(|| Directive::new(name, value));
    Ok((directive, cur))
}

fn skip_lws(cur: Cursor<'_>) -> Cursor<'_> {
    cur.take_while(is_lws).1
}

fn name(cur: Cursor<'_>) -> Step<'_, &str> {
    let (name, next) = cur.take_while(is_token_char);
    match next.peek() {
        None | Some(';' | ' ' | '\t' | '=') => Ok((name, next)),
        Some(ch) => Err(DirectiveError::IllegalCharacter {
            ch,
            span: next.span_here(),
        }),
    }
}

fn value(cur: Cursor<'_>) -> Step<'_, String> {
    match cur.accept('"') {
        Some(after_quote) => quoted_value(cur.pos(), after_quote),
        None => unquoted_value(cur),
    }
}

fn unquoted_value(cur: Cursor<'_>) -> Step<'_, String> {
    let (value, next) = cur.take_while(is_token_char);
    match next.peek() {
        None | Some(';' | ' ' | '\t') => Ok((value.to_owned(), next)),
        Some(ch) => Err(DirectiveError::IllegalCharacter {
            ch,
            span: next.span_here(),
        }),
    }
}

#[derive(Clone, Copy)]
enum Quoted {
    Normal,
    Escaped,
}

/// Scan a quoted string body; `cur` sits just past the opening quote.
fn quoted_value(open: usize, mut cur: Cursor<'_>) -> Step<'_, String> {
    let mut out = String::new();
    let mut state = Quoted::Normal;
    while let Some(ch) = cur.peek() {
        cur = cur.bump();
        state = match (state, ch) {
            (Quoted::Escaped, _) => {
                out.push(ch);
                Quoted::Normal
            }
            (Quoted::Normal, '\\') => Quoted::Escaped,
            (Quoted::Normal, '"') => return Ok((out, cur)),
            (Quoted::Normal, _) => {
                out.push(ch);
                Quoted::Normal
            }
        };
    }
    Err(DirectiveError::ImbalancedQuote {
        span: cur.span_from(open),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::error::{ErrorKind, Span};

    #[test]
    fn whitespace_only_input_is_empty() {
        assert!(parse_directives(" \t ").unwrap().is_empty());
    }

    #[test]
    fn lws_around_names_and_values_is_dropped() {
        // Whitespace ends a directive, so `=` after it is not a separator.
        let err = parse_directives("\tfoo = 1 ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedSymbol);

        let map = parse_directives("  foo=1\t;\tbar  ").unwrap();
        assert_eq!(map["foo"], "1");
        assert_eq!(map["bar"], "");
    }

    #[test]
    fn illegal_character_span_points_at_character() {
        let err = parse_directives("fo{o").unwrap_err();
        assert_eq!(
            err,
            DirectiveError::IllegalCharacter {
                ch: '{',
                span: Span::new(2, 3)
            }
        );
    }

    #[test]
    fn imbalanced_quote_span_runs_from_opening_quote() {
        let err = parse_directives("a=\"xyz").unwrap_err();
        assert_eq!(
            err,
            DirectiveError::ImbalancedQuote {
                span: Span::new(2, 6)
            }
        );
    }

    #[test]
    fn non_ascii_is_token_text() {
        let map = parse_directives("naïve=café").unwrap();
        assert_eq!(map["naïve"], "café");
    }
}
