//! Security header policy: a JSON-configurable set of response headers.
//!
//! A policy starts from [`SecurityPolicy::default`], the recommended
//! baseline. Fields present in the JSON replace the baseline; `null`
//! switches a header off.
//!
//! ```
//! let policy = headerkit_core::load_policy_from_str(r#"{ "frame_options": "same_origin" }"#).unwrap();
//! let fields = policy.fields();
//! assert!(fields.contains(&("X-Frame-Options", "SAMEORIGIN".to_owned())));
//! assert!(fields.contains(&("X-Content-Type-Options", "nosniff".to_owned())));
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::header::{
    Header, HeaderError,
    cors::{
        AccessControlAllowCredentials, AccessControlAllowHeaders, AccessControlAllowMethods,
        AccessControlAllowOrigin, AccessControlExposeHeaders, AccessControlMaxAge,
    },
    misc::DnsPrefetchControl,
    pins::{PublicKeyPins, PublicKeyPinsReportOnly, check_pin},
    registry::AnyHeader,
    security::{ContentTypeOptions, FrameOptions, StrictTransportSecurity, XssProtection},
    url_reference,
};

/// Minimum HSTS `max-age` accepted by browser preload lists (one year).
pub const HSTS_PRELOAD_MIN_AGE: Duration = Duration::from_secs(31_536_000);

/// Errors that can occur when loading or validating a security policy.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// JSON deserialization failed.
    #[error("invalid policy JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A field value is inconsistent or out of range.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// Dotted path of the field that failed validation.
        field: String,
        /// A human-readable explanation of why the field value is invalid.
        reason: String,
    },
}

/// Which security headers to emit, and with what values.
#[non_exhaustive]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SecurityPolicy {
    /// `Strict-Transport-Security`.
    pub hsts: Option<StrictTransportSecurity>,
    /// `X-Frame-Options`.
    pub frame_options: Option<FrameOptions>,
    /// `X-XSS-Protection`.
    pub xss_protection: Option<XssProtection>,
    /// Emit `X-Content-Type-Options: nosniff`.
    pub nosniff: bool,
    /// `X-DNS-Prefetch-Control`.
    pub dns_prefetch: Option<DnsPrefetchControl>,
    /// `Public-Key-Pins` (or the report-only variant).
    pub public_key_pins: Option<PublicKeyPins>,
    /// Send pins as `Public-Key-Pins-Report-Only` instead.
    pub pins_report_only: bool,
    /// CORS response headers.
    pub cors: Option<CorsPolicy>,
}

/// CORS response headers for a policy.
#[non_exhaustive]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CorsPolicy {
    /// `Access-Control-Allow-Origin` (an origin or `*`).
    pub allow_origin: String,
    /// `Access-Control-Allow-Methods`; omitted when empty.
    pub allow_methods: Vec<String>,
    /// `Access-Control-Allow-Headers`; omitted when empty.
    pub allow_headers: Vec<String>,
    /// `Access-Control-Expose-Headers`; omitted when empty.
    pub expose_headers: Vec<String>,
    /// Emit `Access-Control-Allow-Credentials: true`.
    pub allow_credentials: bool,
    /// `Access-Control-Max-Age` in seconds.
    pub max_age_secs: Option<u64>,
}

impl Default for SecurityPolicy {
    /// One year of HSTS including subdomains, no framing, blocking XSS
    /// filter, and `nosniff`.
    fn default() -> Self {
        Self {
            hsts: Some(StrictTransportSecurity {
                max_age: HSTS_PRELOAD_MIN_AGE,
                include_subdomains: true,
                preload: false,
            }),
            frame_options: Some(FrameOptions::Deny),
            xss_protection: Some(XssProtection {
                disabled: false,
                block: true,
                report: None,
            }),
            nosniff: true,
            dns_prefetch: None,
            public_key_pins: None,
            pins_report_only: false,
            cors: None,
        }
    }
}

impl SecurityPolicy {
    /// A policy that emits nothing.
    pub fn empty() -> Self {
        Self {
            hsts: None,
            frame_options: None,
            xss_protection: None,
            nosniff: false,
            dns_prefetch: None,
            public_key_pins: None,
            pins_report_only: false,
            cors: None,
        }
    }

    /// The typed headers this policy emits, in a stable order.
    pub fn headers(&self) -> Vec<AnyHeader> {
        let mut out: Vec<AnyHeader> = Vec::new();
        if let Some(hsts) = &self.hsts {
            out.push(hsts.clone().into());
        }
        if let Some(frame) = &self.frame_options {
            out.push(frame.clone().into());
        }
        if let Some(xss) = &self.xss_protection {
            out.push(xss.clone().into());
        }
        if self.nosniff {
            out.push(ContentTypeOptions.into());
        }
        if let Some(dns) = self.dns_prefetch {
            out.push(dns.into());
        }
        if let Some(pins) = &self.public_key_pins {
            if self.pins_report_only {
                out.push(PublicKeyPinsReportOnly(pins.clone()).into());
            } else {
                out.push(pins.clone().into());
            }
        }
        if let Some(cors) = &self.cors {
            cors.push_headers(&mut out);
        }
        out
    }

    /// The `(name, value)` pairs this policy emits, in a stable order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        self.headers().iter().map(AnyHeader::to_field).collect()
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if let Some(hsts) = &self.hsts
            && hsts.preload
        {
            if !hsts.include_subdomains {
                return Err(invalid("hsts.preload", "requires include_subdomains"));
            }
            if hsts.max_age < HSTS_PRELOAD_MIN_AGE {
                return Err(invalid(
                    "hsts.max_age",
                    format!(
                        "{}s is below the preload minimum of {}s",
                        hsts.max_age.as_secs(),
                        HSTS_PRELOAD_MIN_AGE.as_secs()
                    ),
                ));
            }
        }

        if let Some(FrameOptions::AllowFrom(url)) = &self.frame_options {
            url_reference(FrameOptions::NAME, url)
                .map_err(|e| header_invalid("frame_options.allow_from", e))?;
        }

        if let Some(xss) = &self.xss_protection
            && let Some(report) = &xss.report
        {
            url_reference(XssProtection::NAME, report)
                .map_err(|e| header_invalid("xss_protection.report", e))?;
        }

        if let Some(pins) = &self.public_key_pins {
            if pins.pins.is_empty() {
                return Err(invalid("public_key_pins.pins", "must not be empty"));
            }
            for pin in &pins.pins {
                check_pin(PublicKeyPins::NAME, pin.clone())
                    .map_err(|e| header_invalid("public_key_pins.pins", e))?;
            }
        }

        if let Some(cors) = &self.cors {
            if cors.allow_origin.trim().is_empty() {
                return Err(invalid("cors.allow_origin", "must not be empty"));
            }
            if cors.allow_credentials && cors.allow_origin.trim() == "*" {
                return Err(invalid(
                    "cors.allow_credentials",
                    "cannot be combined with a wildcard origin",
                ));
            }
            field_text("cors.allow_origin", &cors.allow_origin)?;
            for (field, items) in [
                ("cors.allow_methods", &cors.allow_methods),
                ("cors.allow_headers", &cors.allow_headers),
                ("cors.expose_headers", &cors.expose_headers),
            ] {
                for item in items {
                    list_item(field, item)?;
                }
            }
        }

        Ok(())
    }
}

impl CorsPolicy {
    fn push_headers(&self, out: &mut Vec<AnyHeader>) {
        out.push(
            AccessControlAllowOrigin {
                origin: self.allow_origin.clone(),
            }
            .into(),
        );
        if !self.allow_methods.is_empty() {
            out.push(
                AccessControlAllowMethods {
                    methods: self.allow_methods.clone(),
                }
                .into(),
            );
        }
        if !self.allow_headers.is_empty() {
            out.push(
                AccessControlAllowHeaders {
                    headers: self.allow_headers.clone(),
                }
                .into(),
            );
        }
        if !self.expose_headers.is_empty() {
            out.push(
                AccessControlExposeHeaders {
                    headers: self.expose_headers.clone(),
                }
                .into(),
            );
        }
        if self.allow_credentials {
            out.push(AccessControlAllowCredentials.into());
        }
        if let Some(secs) = self.max_age_secs {
            out.push(
                AccessControlMaxAge {
                    age: Duration::from_secs(secs),
                }
                .into(),
            );
        }
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> PolicyError {
    PolicyError::InvalidField {
        field: field.into(),
        reason: reason.into(),
    }
}

/// Reject control characters; CR or LF would split the emitted header.
fn field_text(field: &str, value: &str) -> Result<(), PolicyError> {
    match value.chars().find(|c| c.is_control()) {
        Some(bad) => Err(invalid(
            field,
            format!("{value:?} contains control character {bad:?}"),
        )),
        None => Ok(()),
    }
}

/// A comma-list item: non-empty, no control characters, no `,`.
fn list_item(field: &str, item: &str) -> Result<(), PolicyError> {
    if item.trim().is_empty() {
        return Err(invalid(field, "items must not be empty"));
    }
    if item.contains(',') {
        return Err(invalid(field, format!("item {item:?} contains ','")));
    }
    field_text(field, item)
}

fn header_invalid(field: &str, err: HeaderError) -> PolicyError {
    invalid(field, err.to_string())
}

/// Load and validate a security policy from a JSON string.
pub fn load_policy_from_str(s: &str) -> Result<SecurityPolicy, PolicyError> {
    let policy: SecurityPolicy = serde_json::from_str(s)?;
    if let Err(err) = policy.validate() {
        tracing::debug!(%err, "security policy rejected");
        return Err(err);
    }
    Ok(policy)
}
