//! Typed HTTP header records.
//!
//! Each record knows its header name, how to format itself as a header
//! value, and how to parse one back. Records whose grammar is a directive
//! list (`Strict-Transport-Security`, `X-XSS-Protection`,
//! `Public-Key-Pins`) delegate tokenizing to
//! [`parse_directives`](crate::directive::parser::parse_directives) and
//! interpret the resulting names case-insensitively.

/// CORS (`Access-Control-*`) headers.
pub mod cors;
/// Miscellaneous single-value headers.
pub mod misc;
/// HTTP public key pinning headers.
pub mod pins;
/// Lookup of typed headers by header name.
pub mod registry;
/// Browser security headers.
pub mod security;

use std::collections::BTreeMap;
use std::num::ParseIntError;
use std::str::FromStr;
use std::time::Duration;

use crate::directive::{
    Directive,
    error::DirectiveError,
    parser::{parse_directive_list, parse_directives},
};

/// A typed HTTP header.
pub trait Header: Sized {
    /// Canonical header field name (e.g. `"Strict-Transport-Security"`).
    const NAME: &'static str;

    /// Format the record as a header field value.
    fn value(&self) -> String;

    /// Parse a raw header field value.
    fn parse(raw: &str) -> Result<Self, HeaderError>;

    /// The `(name, value)` pair to attach to a request or response.
    fn to_field(&self) -> (&'static str, String) {
        (Self::NAME, self.value())
    }
}

/// Errors produced while parsing a typed header.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeaderError {
    /// The value is not a well-formed directive list.
    #[error("{header}: {source}")]
    Directive {
        /// Header being parsed.
        header: &'static str,
        /// The underlying grammar violation.
        #[source]
        source: DirectiveError,
    },

    /// A field that must be an integer is not one.
    #[error("{header}: expected a non-negative integer, got {value:?}")]
    InvalidInteger {
        /// Header being parsed.
        header: &'static str,
        /// The rejected text.
        value: String,
        /// The underlying integer parse error.
        #[source]
        source: ParseIntError,
    },

    /// The value is syntactically valid but not meaningful for this header.
    #[error("{header}: {reason}")]
    InvalidValue {
        /// Header being parsed.
        header: &'static str,
        /// Human-readable description of the problem.
        reason: String,
    },

    /// A directive the header requires is absent.
    #[error("{header}: missing required directive {directive:?}")]
    MissingDirective {
        /// Header being parsed.
        header: &'static str,
        /// The required directive name.
        directive: &'static str,
    },

    /// No typed record is registered for this header name.
    #[error("unknown header: {0}")]
    UnknownHeader(String),
}

impl HeaderError {
    /// The directive-list violation behind this error, if any.
    pub fn directive_error(&self) -> Option<&DirectiveError> {
        match self {
            HeaderError::Directive { source, .. } => Some(source),
            _ => None,
        }
    }

    pub(crate) fn invalid(header: &'static str, reason: impl Into<String>) -> Self {
        HeaderError::InvalidValue {
            header,
            reason: reason.into(),
        }
    }
}

// ── Shared parsing helpers ──────────────────────────────────────────────

/// Parse `raw` as a directive list, lower-casing names.
pub(crate) fn directive_map(
    header: &'static str,
    raw: &str,
) -> Result<BTreeMap<String, String>, HeaderError> {
    let map = parse_directives(raw).map_err(|source| directive_failure(header, source))?;
    Ok(map
        .into_iter()
        .map(|(name, value)| (name.to_ascii_lowercase(), value))
        .collect())
}

/// Parse `raw` as an ordered directive list, lower-casing names.
pub(crate) fn directive_seq(header: &'static str, raw: &str) -> Result<Vec<Directive>, HeaderError> {
    let list = parse_directive_list(raw).map_err(|source| directive_failure(header, source))?;
    Ok(list
        .into_iter()
        .map(|d| Directive::new(d.name.to_ascii_lowercase(), d.value))
        .collect())
}

fn directive_failure(header: &'static str, source: DirectiveError) -> HeaderError {
    tracing::debug!(header, code = source.code(), %source, "header value is not a directive list");
    HeaderError::Directive { header, source }
}

pub(crate) fn parse_int<T>(header: &'static str, value: &str) -> Result<T, HeaderError>
where
    T: FromStr<Err = ParseIntError>,
{
    value
        .trim()
        .parse()
        .map_err(|source| HeaderError::InvalidInteger {
            header,
            value: value.to_owned(),
            source,
        })
}

pub(crate) fn parse_seconds(header: &'static str, value: &str) -> Result<Duration, HeaderError> {
    parse_int::<u64>(header, value).map(Duration::from_secs)
}

/// Split a comma-separated list, trimming items and dropping empty ones.
pub(crate) fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Accept a URL reference: non-empty, no whitespace or control characters.
pub(crate) fn url_reference(header: &'static str, raw: &str) -> Result<String, HeaderError> {
    let url = raw.trim();
    if url.is_empty() {
        return Err(HeaderError::invalid(header, "expected a URL, got an empty value"));
    }
    if let Some(bad) = url.chars().find(|c| c.is_whitespace() || c.is_control()) {
        return Err(HeaderError::invalid(
            header,
            format!("URL {url:?} contains disallowed character {bad:?}"),
        ));
    }
    Ok(url.to_owned())
}

/// Serde adapter storing a [`Duration`] as whole seconds.
pub(crate) mod seconds {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}
