//! Shared test helpers for `headerkit_core` integration tests.

#![allow(unreachable_pub)]

use headerkit_core::Header;

/// Check both directions for a typed header: `header` formats to
/// `expected`, and `expected` parses back to a record that formats the same.
pub fn verify<H: Header + std::fmt::Debug>(header: &H, expected: &str) {
    assert_eq!(header.value(), expected, "formatting {header:?}");
    let reparsed = H::parse(expected)
        .unwrap_or_else(|e| panic!("failed to parse {expected:?} as {}: {e}", H::NAME));
    assert_eq!(reparsed.value(), expected, "reformatting {reparsed:?}");
}

/// Parse `raw` as `H`, panicking with the header name on failure.
#[allow(dead_code)]
pub fn parse<H: Header>(raw: &str) -> H {
    H::parse(raw).unwrap_or_else(|e| panic!("failed to parse {raw:?} as {}: {e}", H::NAME))
}
