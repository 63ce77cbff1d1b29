use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{Header, HeaderError, directive_map, parse_seconds, url_reference};
use crate::directive::emit::quote;

// ─── Strict-Transport-Security ──────────────────────────────────────────────

/// `Strict-Transport-Security` (HSTS): tells browsers to reach the site over
/// HTTPS only, for `max_age`.
///
/// ```
/// use std::time::Duration;
/// use headerkit_core::{Header, StrictTransportSecurity};
///
/// let hsts = StrictTransportSecurity {
///     max_age: Duration::from_secs(365 * 24 * 3600),
///     include_subdomains: true,
///     preload: false,
/// };
/// assert_eq!(hsts.value(), "max-age=31536000; includeSubDomains");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrictTransportSecurity {
    /// How long the browser remembers the HTTPS-only rule.
    #[serde(with = "super::seconds")]
    pub max_age: Duration,
    /// The rule also covers every subdomain.
    pub include_subdomains: bool,
    /// Opt in to browser HSTS preload lists.
    pub preload: bool,
}

impl Header for StrictTransportSecurity {
    const NAME: &'static str = "Strict-Transport-Security";

    fn value(&self) -> String {
        let mut v = format!("max-age={}", self.max_age.as_secs());
        if self.include_subdomains {
            v.push_str("; includeSubDomains");
        }
        if self.preload {
            v.push_str("; preload");
        }
        v
    }

    fn parse(raw: &str) -> Result<Self, HeaderError> {
        let directives = directive_map(Self::NAME, raw)?;
        let max_age = directives
            .get("max-age")
            .ok_or(HeaderError::MissingDirective {
                header: Self::NAME,
                directive: "max-age",
            })?;
        Ok(Self {
            max_age: parse_seconds(Self::NAME, max_age)?,
            include_subdomains: directives.contains_key("includesubdomains"),
            preload: directives.contains_key("preload"),
        })
    }
}

// ─── X-Frame-Options ────────────────────────────────────────────────────────

/// `X-Frame-Options`: whether the page may be rendered inside a frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameOptions {
    /// Never render in a frame, not even from the same site.
    #[default]
    Deny,
    /// Render in a frame only on the page's own origin.
    SameOrigin,
    /// Render in a frame only on the given origin.
    AllowFrom(String),
}

impl Header for FrameOptions {
    const NAME: &'static str = "X-Frame-Options";

    fn value(&self) -> String {
        match self {
            FrameOptions::Deny => "DENY".to_owned(),
            FrameOptions::SameOrigin => "SAMEORIGIN".to_owned(),
            FrameOptions::AllowFrom(url) => format!("ALLOW-FROM {url}"),
        }
    }

    fn parse(raw: &str) -> Result<Self, HeaderError> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("DENY") {
            return Ok(FrameOptions::Deny);
        }
        if raw.eq_ignore_ascii_case("SAMEORIGIN") {
            return Ok(FrameOptions::SameOrigin);
        }
        match raw.split_once(' ') {
            Some((keyword, url)) if keyword.eq_ignore_ascii_case("ALLOW-FROM") => {
                Ok(FrameOptions::AllowFrom(url_reference(Self::NAME, url)?))
            }
            _ => Err(HeaderError::invalid(
                Self::NAME,
                format!("unknown directive {raw:?}"),
            )),
        }
    }
}

// ─── X-XSS-Protection ───────────────────────────────────────────────────────

/// `X-XSS-Protection`: legacy reflected-XSS filter control.
///
/// When `disabled` is set the other fields are not emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XssProtection {
    /// Turn filtering off (`0`).
    pub disabled: bool,
    /// Block rendering instead of sanitizing (`mode=block`).
    pub block: bool,
    /// Where to send violation reports.
    pub report: Option<String>,
}

impl Header for XssProtection {
    const NAME: &'static str = "X-XSS-Protection";

    fn value(&self) -> String {
        if self.disabled {
            return "0".to_owned();
        }
        let mut v = String::from("1");
        if self.block {
            v.push_str("; mode=block");
        }
        if let Some(report) = &self.report {
            v.push_str("; report=");
            v.push_str(&quote(report));
        }
        v
    }

    fn parse(raw: &str) -> Result<Self, HeaderError> {
        let directives = directive_map(Self::NAME, raw)?;
        if directives.contains_key("0") {
            return Ok(Self {
                disabled: true,
                ..Self::default()
            });
        }
        let block = match directives.get("mode") {
            Some(mode) if mode.eq_ignore_ascii_case("block") => true,
            Some(mode) => {
                return Err(HeaderError::invalid(
                    Self::NAME,
                    format!("unsupported mode {mode:?}"),
                ));
            }
            None => false,
        };
        let report = directives
            .get("report")
            .map(|url| url_reference(Self::NAME, url))
            .transpose()?;
        Ok(Self {
            disabled: false,
            block,
            report,
        })
    }
}

// ─── X-Content-Type-Options ─────────────────────────────────────────────────

/// `X-Content-Type-Options: nosniff`: opt out of MIME type sniffing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTypeOptions;

impl Header for ContentTypeOptions {
    const NAME: &'static str = "X-Content-Type-Options";

    fn value(&self) -> String {
        "nosniff".to_owned()
    }

    fn parse(raw: &str) -> Result<Self, HeaderError> {
        if raw.trim().eq_ignore_ascii_case("nosniff") {
            Ok(ContentTypeOptions)
        } else {
            Err(HeaderError::invalid(
                Self::NAME,
                format!("the only valid value is nosniff, got {raw:?}"),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsts_names_are_case_insensitive() {
        let hsts = StrictTransportSecurity::parse("MAX-AGE=60; IncludeSubdomains").unwrap();
        assert_eq!(hsts.max_age, Duration::from_secs(60));
        assert!(hsts.include_subdomains);
        assert!(!hsts.preload);
    }

    #[test]
    fn hsts_accepts_quoted_max_age() {
        let hsts = StrictTransportSecurity::parse("max-age=\"300\"").unwrap();
        assert_eq!(hsts.max_age, Duration::from_secs(300));
    }

    #[test]
    fn hsts_requires_max_age() {
        let err = StrictTransportSecurity::parse("includeSubDomains").unwrap_err();
        assert_eq!(
            err,
            HeaderError::MissingDirective {
                header: "Strict-Transport-Security",
                directive: "max-age"
            }
        );
    }

    #[test]
    fn frame_options_rejects_unknown_directive() {
        assert!(FrameOptions::parse("ALLOWALL").is_err());
        assert!(FrameOptions::parse("ALLOW-FROM ").is_err());
        assert_eq!(FrameOptions::parse("sameorigin").unwrap(), FrameOptions::SameOrigin);
    }

    #[test]
    fn xss_disabled_ignores_other_directives() {
        let xss = XssProtection::parse("0; mode=block").unwrap();
        assert!(xss.disabled);
        assert!(!xss.block);
    }

    #[test]
    fn xss_rejects_unknown_mode() {
        assert!(XssProtection::parse("1; mode=sanitize").is_err());
    }

    #[test]
    fn nosniff_is_the_only_value() {
        assert!(ContentTypeOptions::parse("NoSniff").is_ok());
        assert!(ContentTypeOptions::parse("sniff").is_err());
    }
}
