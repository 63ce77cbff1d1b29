use serde::Serialize;

use super::{
    Header, HeaderError,
    cors::{
        AccessControlAllowCredentials, AccessControlAllowHeaders, AccessControlAllowMethods,
        AccessControlAllowOrigin, AccessControlExposeHeaders, AccessControlMaxAge,
        AccessControlRequestHeaders, AccessControlRequestMethod,
    },
    misc::{Age, DnsPrefetchControl, LargeAllocation, SourceMap},
    pins::{PublicKeyPins, PublicKeyPinsReportOnly},
    security::{ContentTypeOptions, FrameOptions, StrictTransportSecurity, XssProtection},
};

/// Builds [`AnyHeader`] and its name-dispatched operations from one list,
/// so a header cannot be registered for parsing but missed for output.
macro_rules! any_header {
    ($($ty:ident),+ $(,)?) => {
        /// Any typed header known to this crate.
        #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
        #[non_exhaustive]
        pub enum AnyHeader {
            $(
                #[doc = concat!("A parsed [`", stringify!($ty), "`].")]
                $ty($ty),
            )+
        }

        /// Canonical names of every registered header.
        pub const HEADER_NAMES: &[&str] = &[$(<$ty as Header>::NAME),+];

        impl AnyHeader {
            /// Parse `raw` with the record registered for `name`.
            ///
            /// Header names are matched case-insensitively.
            pub fn parse_named(name: &str, raw: &str) -> Result<Self, HeaderError> {
                let name = name.trim();
                $(
                    if name.eq_ignore_ascii_case(<$ty as Header>::NAME) {
                        return <$ty as Header>::parse(raw).map(AnyHeader::$ty);
                    }
                )+
                Err(HeaderError::UnknownHeader(name.to_owned()))
            }

            /// Canonical header name.
            pub fn name(&self) -> &'static str {
                match self {
                    $(AnyHeader::$ty(_) => <$ty as Header>::NAME,)+
                }
            }

            /// Formatted header value.
            pub fn value(&self) -> String {
                match self {
                    $(AnyHeader::$ty(h) => h.value(),)+
                }
            }
        }

        $(
            impl From<$ty> for AnyHeader {
                fn from(h: $ty) -> Self {
                    AnyHeader::$ty(h)
                }
            }
        )+
    };
}

any_header!(
    StrictTransportSecurity,
    FrameOptions,
    XssProtection,
    ContentTypeOptions,
    DnsPrefetchControl,
    LargeAllocation,
    SourceMap,
    Age,
    AccessControlAllowCredentials,
    AccessControlMaxAge,
    AccessControlRequestMethod,
    AccessControlRequestHeaders,
    AccessControlAllowMethods,
    AccessControlAllowHeaders,
    AccessControlExposeHeaders,
    AccessControlAllowOrigin,
    PublicKeyPins,
    PublicKeyPinsReportOnly,
);

impl AnyHeader {
    /// The `(name, value)` pair to attach to a request or response.
    pub fn to_field(&self) -> (&'static str, String) {
        (self.name(), self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_name_case() {
        let h = AnyHeader::parse_named("strict-transport-security", "max-age=10").unwrap();
        assert_eq!(h.name(), "Strict-Transport-Security");
        assert_eq!(h.value(), "max-age=10");
    }

    #[test]
    fn unknown_names_are_reported() {
        let err = AnyHeader::parse_named("X-Unknown", "1").unwrap_err();
        assert_eq!(err, HeaderError::UnknownHeader("X-Unknown".into()));
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<String> = HEADER_NAMES.iter().map(|n| n.to_ascii_lowercase()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), HEADER_NAMES.len());
    }

    #[test]
    fn from_wraps_records() {
        let h: AnyHeader = ContentTypeOptions.into();
        assert_eq!(h.to_field(), ("X-Content-Type-Options", "nosniff".to_owned()));
    }
}
