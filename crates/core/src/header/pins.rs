//! HTTP Public Key Pinning (`Public-Key-Pins`, RFC 7469).
//!
//! Pins are base64-encoded SHA-256 digests of a certificate's
//! SubjectPublicKeyInfo. Each pin is its own `pin-sha256` directive, so
//! these headers are parsed from the ordered directive list rather than the
//! last-wins mapping.

use std::time::Duration;

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{Header, HeaderError, directive_seq, parse_seconds, url_reference};
use crate::directive::emit::quote;

const SHA256_LEN: usize = 32;

/// `Public-Key-Pins`: associates public keys with the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicKeyPins {
    /// Base64 SHA-256 SPKI digests, in header order.
    pub pins: Vec<String>,
    /// How long the pins are remembered.
    #[serde(with = "super::seconds")]
    pub max_age: Duration,
    /// The pins also cover every subdomain.
    pub include_subdomains: bool,
    /// Where pin validation failures are reported.
    pub report_uri: Option<String>,
}

impl PublicKeyPins {
    /// Compute the `pin-sha256` value for a DER-encoded SubjectPublicKeyInfo.
    pub fn pin_for_spki(spki_der: &[u8]) -> String {
        BASE64.encode(Sha256::digest(spki_der))
    }

    fn format(&self) -> String {
        let mut parts: Vec<String> = self
            .pins
            .iter()
            .map(|pin| format!("pin-sha256={}", quote(pin)))
            .collect();
        parts.push(format!("max-age={}", self.max_age.as_secs()));
        if self.include_subdomains {
            parts.push("includeSubDomains".to_owned());
        }
        if let Some(uri) = &self.report_uri {
            parts.push(format!("report-uri={}", quote(uri)));
        }
        parts.join("; ")
    }

    fn parse_as(header: &'static str, raw: &str) -> Result<Self, HeaderError> {
        let mut pins = Vec::new();
        let mut max_age = None;
        let mut include_subdomains = false;
        let mut report_uri = None;

        for directive in directive_seq(header, raw)? {
            match directive.name.as_str() {
                "pin-sha256" => pins.push(check_pin(header, directive.value)?),
                "max-age" => max_age = Some(parse_seconds(header, &directive.value)?),
                "includesubdomains" => include_subdomains = true,
                "report-uri" => report_uri = Some(url_reference(header, &directive.value)?),
                // Pins for other hash algorithms are not understood; skip them.
                _ => {}
            }
        }

        let max_age = max_age.ok_or(HeaderError::MissingDirective {
            header,
            directive: "max-age",
        })?;
        if pins.is_empty() {
            return Err(HeaderError::MissingDirective {
                header,
                directive: "pin-sha256",
            });
        }
        Ok(Self {
            pins,
            max_age,
            include_subdomains,
            report_uri,
        })
    }
}

pub(crate) fn check_pin(header: &'static str, pin: String) -> Result<String, HeaderError> {
    match BASE64.decode(&pin) {
        Ok(digest) if digest.len() == SHA256_LEN => Ok(pin),
        Ok(digest) => Err(HeaderError::invalid(
            header,
            format!("pin {pin:?} is {} bytes, expected {SHA256_LEN}", digest.len()),
        )),
        Err(err) => Err(HeaderError::invalid(
            header,
            format!("pin {pin:?} is not valid base64: {err}"),
        )),
    }
}

impl Header for PublicKeyPins {
    const NAME: &'static str = "Public-Key-Pins";

    fn value(&self) -> String {
        self.format()
    }

    fn parse(raw: &str) -> Result<Self, HeaderError> {
        Self::parse_as(Self::NAME, raw)
    }
}

/// `Public-Key-Pins-Report-Only`: reports pin violations without blocking
/// the connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicKeyPinsReportOnly(pub PublicKeyPins);

impl Header for PublicKeyPinsReportOnly {
    const NAME: &'static str = "Public-Key-Pins-Report-Only";

    fn value(&self) -> String {
        self.0.format()
    }

    fn parse(raw: &str) -> Result<Self, HeaderError> {
        PublicKeyPins::parse_as(Self::NAME, raw).map(Self)
    }
}
