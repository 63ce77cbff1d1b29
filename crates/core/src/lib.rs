//! headerkit core library.
//!
//! Provides a parser for HTTP "directive list" header values
//! (`name; name=value; name="quoted"`), typed records for common security
//! and CORS headers, and a configurable security header policy. The main
//! entry points are [`parse_directives`] for tokenizing, the [`Header`]
//! trait for typed headers, and [`load_policy_from_str`] for policies.

#![warn(missing_docs)]

/// Directive-list grammar: cursor, parser, formatter, and error taxonomy.
pub mod directive;
/// Typed HTTP header records built on the directive parser.
pub mod header;
/// Configurable set of security headers to emit.
pub mod policy;

// ── Convenience re-exports ──────────────────────────────────────────────────
// Flat imports for the most common entry points. The full module paths
// remain available for less common types.

// Parser
pub use directive::parser::{parse_directive_list, parse_directives};

// Formatter
pub use directive::emit::format_directives;

// Directive model and errors
pub use directive::Directive;
pub use directive::error::{DirectiveError, ErrorKind, Span};

// Typed headers
pub use header::registry::{AnyHeader, HEADER_NAMES};
pub use header::{Header, HeaderError};
pub use header::security::{
    ContentTypeOptions, FrameOptions, StrictTransportSecurity, XssProtection,
};
pub use header::pins::{PublicKeyPins, PublicKeyPinsReportOnly};

// Policy
pub use policy::{PolicyError, SecurityPolicy, load_policy_from_str};
