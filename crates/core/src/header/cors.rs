use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{Header, HeaderError, parse_seconds, split_list};

/// `Access-Control-Allow-Credentials: true`: the response may be exposed
/// to page scripts when the request carried credentials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControlAllowCredentials;

impl Header for AccessControlAllowCredentials {
    const NAME: &'static str = "Access-Control-Allow-Credentials";

    fn value(&self) -> String {
        "true".to_owned()
    }

    fn parse(raw: &str) -> Result<Self, HeaderError> {
        if raw.eq_ignore_ascii_case("true") {
            Ok(AccessControlAllowCredentials)
        } else {
            Err(HeaderError::invalid(
                Self::NAME,
                format!("the only valid value is true, got {raw:?}"),
            ))
        }
    }
}

/// `Access-Control-Max-Age`: how long a preflight result may be cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControlMaxAge {
    /// Cache lifetime of the preflight response.
    #[serde(with = "super::seconds")]
    pub age: Duration,
}

impl Header for AccessControlMaxAge {
    const NAME: &'static str = "Access-Control-Max-Age";

    fn value(&self) -> String {
        self.age.as_secs().to_string()
    }

    fn parse(raw: &str) -> Result<Self, HeaderError> {
        Ok(Self {
            age: parse_seconds(Self::NAME, raw)?,
        })
    }
}

/// `Access-Control-Request-Method`: the method of the actual request,
/// sent with a preflight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControlRequestMethod {
    /// HTTP method, verbatim.
    pub method: String,
}

impl Header for AccessControlRequestMethod {
    const NAME: &'static str = "Access-Control-Request-Method";

    fn value(&self) -> String {
        self.method.clone()
    }

    fn parse(raw: &str) -> Result<Self, HeaderError> {
        Ok(Self {
            method: raw.trim().to_owned(),
        })
    }
}

/// `Access-Control-Allow-Origin`: the origin allowed to read the response,
/// or `*`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControlAllowOrigin {
    /// Allowed origin, verbatim.
    pub origin: String,
}

impl AccessControlAllowOrigin {
    /// Returns `true` for the `*` wildcard.
    pub fn is_wildcard(&self) -> bool {
        self.origin == "*"
    }
}

impl Header for AccessControlAllowOrigin {
    const NAME: &'static str = "Access-Control-Allow-Origin";

    fn value(&self) -> String {
        self.origin.clone()
    }

    fn parse(raw: &str) -> Result<Self, HeaderError> {
        Ok(Self {
            origin: raw.trim().to_owned(),
        })
    }
}

/// Comma-separated list headers share one shape: a single `Vec<String>`
/// field, joined by `", "` on output.
macro_rules! list_header {
    ($(#[$doc:meta])* $ty:ident, $field:ident, $name:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $ty {
            /// List items, in header order.
            pub $field: Vec<String>,
        }

        impl Header for $ty {
            const NAME: &'static str = $name;

            fn value(&self) -> String {
                self.$field.join(", ")
            }

            fn parse(raw: &str) -> Result<Self, HeaderError> {
                Ok(Self {
                    $field: split_list(raw),
                })
            }
        }
    };
}

list_header!(
    /// `Access-Control-Request-Headers`: headers the actual request will
    /// carry, sent with a preflight.
    AccessControlRequestHeaders,
    headers,
    "Access-Control-Request-Headers"
);

list_header!(
    /// `Access-Control-Allow-Methods`: methods allowed for the resource.
    AccessControlAllowMethods,
    methods,
    "Access-Control-Allow-Methods"
);

list_header!(
    /// `Access-Control-Allow-Headers`: request headers allowed for the
    /// resource beyond the CORS-safelisted ones.
    AccessControlAllowHeaders,
    headers,
    "Access-Control-Allow-Headers"
);

list_header!(
    /// `Access-Control-Expose-Headers`: response headers page scripts may
    /// read.
    AccessControlExposeHeaders,
    headers,
    "Access-Control-Expose-Headers"
);
