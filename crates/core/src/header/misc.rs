use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{Header, HeaderError, parse_int, parse_seconds, url_reference};

/// `SourceMap`: links generated code to its source map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMap {
    /// Relative (to the request URL) or absolute URL of the source map.
    pub url: String,
}

impl Header for SourceMap {
    const NAME: &'static str = "SourceMap";

    fn value(&self) -> String {
        self.url.clone()
    }

    fn parse(raw: &str) -> Result<Self, HeaderError> {
        Ok(Self {
            url: url_reference(Self::NAME, raw)?,
        })
    }
}

/// `Age`: time the response has spent in a proxy cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Age {
    /// Time in cache, whole seconds.
    #[serde(with = "super::seconds")]
    pub age: Duration,
}

impl Header for Age {
    const NAME: &'static str = "Age";

    fn value(&self) -> String {
        self.age.as_secs().to_string()
    }

    fn parse(raw: &str) -> Result<Self, HeaderError> {
        Ok(Self {
            age: parse_seconds(Self::NAME, raw)?,
        })
    }
}

/// `X-DNS-Prefetch-Control`: browser DNS prefetching, `on` by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsPrefetchControl {
    /// Turn prefetching off.
    pub disabled: bool,
}

impl Header for DnsPrefetchControl {
    const NAME: &'static str = "X-DNS-Prefetch-Control";

    fn value(&self) -> String {
        let word = if self.disabled { "off" } else { "on" };
        word.to_owned()
    }

    fn parse(raw: &str) -> Result<Self, HeaderError> {
        match raw.trim() {
            v if v.eq_ignore_ascii_case("on") => Ok(Self { disabled: false }),
            v if v.eq_ignore_ascii_case("off") => Ok(Self { disabled: true }),
            v => Err(HeaderError::invalid(
                Self::NAME,
                format!("must be either 'on' or 'off', not {v:?}"),
            )),
        }
    }
}

/// `Large-Allocation` (Firefox only): the page will make a large contiguous
/// allocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LargeAllocation {
    /// Expected allocation in megabytes; `0` means unknown.
    pub megabytes: u32,
}

impl Header for LargeAllocation {
    const NAME: &'static str = "Large-Allocation";

    fn value(&self) -> String {
        self.megabytes.to_string()
    }

    fn parse(raw: &str) -> Result<Self, HeaderError> {
        Ok(Self {
            megabytes: parse_int(Self::NAME, raw)?,
        })
    }
}
