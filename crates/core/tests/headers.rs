//! Format/parse agreement for every typed header.
//!
//! Each case formats a record, compares it with the expected header value,
//! then parses that value and formats it again.

mod common;

use std::time::Duration;

use common::{parse, verify};
use headerkit_core::header::cors::{
    AccessControlAllowCredentials, AccessControlAllowHeaders, AccessControlAllowMethods,
    AccessControlAllowOrigin, AccessControlExposeHeaders, AccessControlMaxAge,
    AccessControlRequestHeaders, AccessControlRequestMethod,
};
use headerkit_core::header::misc::{Age, DnsPrefetchControl, LargeAllocation, SourceMap};
use headerkit_core::{
    AnyHeader, ContentTypeOptions, ErrorKind, FrameOptions, HEADER_NAMES, Header, HeaderError,
    PublicKeyPins, PublicKeyPinsReportOnly, StrictTransportSecurity, XssProtection,
};

const PIN_A: &str = "cUPcTAZWKaASuYWhhneDttWpY3oBAkE3h2+soZS7sWs=";
const PIN_B: &str = "M8HztCzM3elUxkcjR2S5P4hhyBNf6lHkmjAHKhpGPWE=";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ─── Security headers ────────────────────────────────────────────────────────

#[test]
fn strict_transport_security() {
    let mut hsts = StrictTransportSecurity::default();
    verify(&hsts, "max-age=0");

    hsts.max_age = Duration::from_secs(3600);
    verify(&hsts, "max-age=3600");

    hsts.include_subdomains = true;
    verify(&hsts, "max-age=3600; includeSubDomains");

    hsts.preload = true;
    verify(&hsts, "max-age=3600; includeSubDomains; preload");
}

#[test]
fn strict_transport_security_common_values() {
    let hsts: StrictTransportSecurity = parse("max-age=63072000; includeSubDomains; preload");
    assert_eq!(hsts.max_age, Duration::from_secs(63_072_000));
    assert!(hsts.include_subdomains && hsts.preload);

    let hsts: StrictTransportSecurity = parse("max-age=31536000; includeSubDomains");
    assert!(!hsts.preload);
}

#[test]
fn strict_transport_security_reports_grammar_errors() {
    let err = StrictTransportSecurity::parse("max-age=\"10").unwrap_err();
    assert_eq!(
        err.directive_error().map(|e| e.code()),
        Some("HDR1003"),
        "{err}"
    );
}

#[test]
fn frame_options() {
    verify(&FrameOptions::Deny, "DENY");
    verify(&FrameOptions::SameOrigin, "SAMEORIGIN");
    verify(
        &FrameOptions::AllowFrom("http://example.com".into()),
        "ALLOW-FROM http://example.com",
    );
}

#[test]
fn xss_protection() {
    let mut xss = XssProtection {
        disabled: true,
        ..XssProtection::default()
    };
    verify(&xss, "0");

    xss.disabled = false;
    verify(&xss, "1");

    xss.block = true;
    verify(&xss, "1; mode=block");

    xss.block = false;
    xss.report = Some("http://example.com".into());
    verify(&xss, "1; report=\"http://example.com\"");
}

#[test]
fn xss_protection_report_path_must_be_quoted() {
    let xss: XssProtection = parse("1; mode=block; report=\"/xss-report\"");
    assert!(xss.block);
    assert_eq!(xss.report.as_deref(), Some("/xss-report"));

    // `/` is a delimiter, so a bare path is not a legal unquoted value.
    let err = XssProtection::parse("1; mode=block; report=/xss-report").unwrap_err();
    assert!(matches!(err, HeaderError::Directive { .. }), "{err}");
    assert_eq!(
        err.directive_error().map(|e| e.kind()),
        Some(ErrorKind::IllegalCharacter)
    );
}

#[test]
fn content_type_options() {
    verify(&ContentTypeOptions, "nosniff");
}

// ─── Miscellaneous headers ───────────────────────────────────────────────────

#[test]
fn dns_prefetch_control() {
    verify(&DnsPrefetchControl { disabled: false }, "on");
    verify(&DnsPrefetchControl { disabled: true }, "off");
}

#[test]
fn source_map() {
    verify(&SourceMap { url: "/foo".into() }, "/foo");
    verify(
        &SourceMap {
            url: "https://example.com/bar".into(),
        },
        "https://example.com/bar",
    );
}

#[test]
fn age() {
    verify(&Age::default(), "0");
    verify(
        &Age {
            age: Duration::from_secs(3600),
        },
        "3600",
    );
    assert!(Age::parse("-5").is_err());
}

#[test]
fn large_allocation() {
    verify(&LargeAllocation { megabytes: 0 }, "0");
    verify(&LargeAllocation { megabytes: 500 }, "500");
}

// ─── CORS ────────────────────────────────────────────────────────────────────

#[test]
fn cors_scalar_headers() {
    verify(&AccessControlMaxAge::default(), "0");
    verify(
        &AccessControlMaxAge {
            age: Duration::from_secs(3600),
        },
        "3600",
    );
    verify(&AccessControlAllowCredentials, "true");
    verify(&AccessControlRequestMethod::default(), "");
    verify(
        &AccessControlRequestMethod {
            method: "POST".into(),
        },
        "POST",
    );
    verify(
        &AccessControlAllowOrigin {
            origin: "https://example.com".into(),
        },
        "https://example.com",
    );
}

#[test]
fn cors_list_headers() {
    verify(
        &AccessControlRequestHeaders {
            headers: strings(&["Content-Length", "Host"]),
        },
        "Content-Length, Host",
    );
    verify(
        &AccessControlAllowMethods {
            methods: strings(&["POST", "GET"]),
        },
        "POST, GET",
    );
    verify(
        &AccessControlAllowHeaders {
            headers: strings(&["X-Custom-Header"]),
        },
        "X-Custom-Header",
    );
    verify(
        &AccessControlExposeHeaders {
            headers: strings(&["X-Custom-Header", "Upgrade-Insecure-Requests"]),
        },
        "X-Custom-Header, Upgrade-Insecure-Requests",
    );
}

#[test]
fn cors_list_parse_normalizes_spacing() {
    let allow: AccessControlAllowHeaders = parse("X-A,X-B ,  X-C");
    assert_eq!(allow.headers, strings(&["X-A", "X-B", "X-C"]));
    assert_eq!(allow.value(), "X-A, X-B, X-C");
}

// ─── Public key pinning ──────────────────────────────────────────────────────

#[test]
fn public_key_pins() {
    let pkp = PublicKeyPins {
        pins: strings(&[PIN_A, PIN_B]),
        max_age: Duration::from_secs(5_184_000),
        include_subdomains: true,
        report_uri: Some("https://example.com/hpkp-report".into()),
    };
    let expected = format!(
        "pin-sha256=\"{PIN_A}\"; pin-sha256=\"{PIN_B}\"; max-age=5184000; includeSubDomains; \
         report-uri=\"https://example.com/hpkp-report\""
    );
    verify(&pkp, &expected);

    let report_only = PublicKeyPinsReportOnly(pkp);
    verify(&report_only, &expected);
}

#[test]
fn public_key_pins_ignores_other_algorithms() {
    let raw = format!("pin-sha512=\"abc\"; pin-sha256=\"{PIN_A}\"; max-age=60");
    let pkp: PublicKeyPins = parse(&raw);
    assert_eq!(pkp.pins, strings(&[PIN_A]));
}

// ─── Registry ────────────────────────────────────────────────────────────────

#[test]
fn every_registered_name_dispatches_to_its_record() {
    for name in HEADER_NAMES {
        match AnyHeader::parse_named(name, "") {
            Err(HeaderError::UnknownHeader(_)) => panic!("{name} is registered but not dispatched"),
            Ok(h) => assert_eq!(h.name(), *name),
            Err(_) => {}
        }
    }
}

#[test]
fn registry_formats_what_it_parsed() {
    let h = AnyHeader::parse_named("x-xss-protection", "1; mode=block").unwrap();
    assert_eq!(
        h.to_field(),
        ("X-XSS-Protection", "1; mode=block".to_owned())
    );
    assert!(matches!(h, AnyHeader::XssProtection(_)));
}

#[test]
fn typed_records_serialize_to_json() {
    let h: AnyHeader = StrictTransportSecurity {
        max_age: Duration::from_secs(60),
        include_subdomains: true,
        preload: false,
    }
    .into();
    let json = serde_json::to_value(&h).unwrap();
    assert_eq!(json["StrictTransportSecurity"]["max_age"], 60);
    assert_eq!(json["StrictTransportSecurity"]["include_subdomains"], true);
}
