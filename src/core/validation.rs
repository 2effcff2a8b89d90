// src/core/validation.rs

use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;
use tracing::debug;
use url::Url;

use crate::core::error::ValidationError;
use crate::core::models::{ContentType, Platform, Subject};

const MAX_HOSTNAME_LEN: usize = 253;
/// Byte capacity of a version 40 QR code in alphanumeric mode.
pub const MAX_QR_PAYLOAD_LEN: usize = 4296;
const MAX_HANDLE_LEN: usize = 64;

static RE_HOSTNAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,63}$").unwrap()
});
static RE_HANDLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").unwrap());

/// Reduces user input to a bare, lowercase host name.
///
/// Accepts inputs like `HTTPS://www.Example.com:8443/login` and returns `example.com`.
/// A leading `www.` is dropped only when at least two labels remain.
pub fn normalize_domain(raw: &str) -> String {
    let trimmed = raw.trim();
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let host = Url::parse(&with_scheme)
        .ok()
        .and_then(|url| url.host_str().map(String::from))
        .unwrap_or_else(|| trimmed.to_string());

    let host = host.trim_end_matches('.').to_ascii_lowercase();
    match host.strip_prefix("www.") {
        Some(rest) if rest.contains('.') => rest.to_string(),
        _ => host,
    }
}

/// Validates a domain name and turns it into a `Subject`.
pub fn validate_domain(raw: &str) -> Result<Subject, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::Empty { field: "domain" });
    }
    let host = normalize_domain(raw);
    if host.len() > MAX_HOSTNAME_LEN {
        return Err(ValidationError::TooLong { field: "domain", max: MAX_HOSTNAME_LEN });
    }
    if !RE_HOSTNAME.is_match(&host) {
        debug!(input = raw, normalized = %host, "Rejected domain input.");
        return Err(ValidationError::InvalidHostname { value: raw.trim().to_string() });
    }
    Ok(Subject::Domain(host))
}

/// Classifies a QR payload by its well-known prefixes.
pub fn classify_content(payload: &str) -> ContentType {
    let lower = payload.trim_start().to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("www.") {
        ContentType::Url
    } else if lower.starts_with("mailto:") || lower.starts_with("matmsg:") {
        ContentType::Email
    } else if lower.starts_with("tel:") {
        ContentType::Phone
    } else if lower.starts_with("smsto:") || lower.starts_with("sms:") {
        ContentType::Sms
    } else if lower.starts_with("wifi:") {
        ContentType::Wifi
    } else if lower.starts_with("begin:vcard") || lower.starts_with("mecard:") {
        ContentType::Vcard
    } else {
        ContentType::Text
    }
}

/// Validates a decoded QR payload.
pub fn validate_qr_payload(raw: &str) -> Result<Subject, ValidationError> {
    let payload = raw.trim();
    if payload.is_empty() {
        return Err(ValidationError::Empty { field: "payload" });
    }
    if payload.chars().count() > MAX_QR_PAYLOAD_LEN {
        return Err(ValidationError::TooLong { field: "payload", max: MAX_QR_PAYLOAD_LEN });
    }
    Ok(Subject::QrContent {
        payload: payload.to_string(),
        content_type: classify_content(payload),
    })
}

/// Validates a platform + handle pair. Both halves are checked so every
/// violated constraint is reported at once.
pub fn validate_profile(platform: &str, handle: &str) -> Result<Subject, Vec<ValidationError>> {
    let mut violations = Vec::new();

    let platform_name = platform.trim();
    let parsed_platform = if platform_name.is_empty() {
        violations.push(ValidationError::Empty { field: "platform" });
        None
    } else {
        match Platform::from_str(platform_name) {
            Ok(p) => Some(p),
            Err(_) => {
                violations.push(ValidationError::UnsupportedPlatform { value: platform_name.to_string() });
                None
            }
        }
    };

    let handle = handle.trim().trim_start_matches('@');
    if handle.is_empty() {
        violations.push(ValidationError::Empty { field: "handle" });
    } else if handle.chars().count() > MAX_HANDLE_LEN {
        violations.push(ValidationError::TooLong { field: "handle", max: MAX_HANDLE_LEN });
    } else if !RE_HANDLE.is_match(handle) {
        violations.push(ValidationError::InvalidHandle { value: handle.to_string() });
    }

    match parsed_platform {
        Some(platform) if violations.is_empty() => Ok(Subject::Profile {
            platform,
            handle: handle.to_string(),
        }),
        _ => Err(violations),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_scheme_path_and_case() {
        assert_eq!(normalize_domain("HTTPS://Example.COM:8443/login?x=1"), "example.com");
        assert_eq!(normalize_domain("  www.example.org. "), "example.org");
    }

    #[test]
    fn www_prefix_is_dropped_only_above_the_registrable_name() {
        assert_eq!(validate_domain("www.example.com").unwrap(), Subject::Domain("example.com".into()));
        assert_eq!(
            validate_domain("https://WWW.Shop.Example.co.uk/cart").unwrap(),
            Subject::Domain("shop.example.co.uk".into())
        );
        assert_eq!(normalize_domain("www.com"), "www.com");
    }

    #[test]
    fn accepts_conservative_hostnames() {
        assert_eq!(validate_domain("example.com").unwrap(), Subject::Domain("example.com".into()));
        assert!(validate_domain("sub-domain.example.co.uk").is_ok());
        assert!(validate_domain("https://paypal.com/signin").is_ok());
    }

    #[test]
    fn rejects_malformed_hostnames() {
        assert_eq!(validate_domain("   "), Err(ValidationError::Empty { field: "domain" }));
        assert!(matches!(validate_domain("localhost"), Err(ValidationError::InvalidHostname { .. })));
        assert!(matches!(validate_domain("-bad-.com"), Err(ValidationError::InvalidHostname { .. })));
        assert!(matches!(validate_domain("192.168.1.1"), Err(ValidationError::InvalidHostname { .. })));
        assert!(matches!(validate_domain("exa mple.com"), Err(ValidationError::InvalidHostname { .. })));
    }

    #[test]
    fn rejects_overlong_hostnames() {
        let label = "a".repeat(60);
        let long = format!("{label}.{label}.{label}.{label}.{label}.com");
        assert_eq!(
            validate_domain(&long),
            Err(ValidationError::TooLong { field: "domain", max: MAX_HOSTNAME_LEN })
        );
    }

    #[test]
    fn classifies_qr_payloads() {
        assert_eq!(classify_content("https://example.com"), ContentType::Url);
        assert_eq!(classify_content("mailto:a@b.com"), ContentType::Email);
        assert_eq!(classify_content("TEL:+15551234"), ContentType::Phone);
        assert_eq!(classify_content("SMSTO:+15551234:hi"), ContentType::Sms);
        assert_eq!(classify_content("WIFI:T:WPA;S:home;P:secret;;"), ContentType::Wifi);
        assert_eq!(classify_content("BEGIN:VCARD\nVERSION:3.0"), ContentType::Vcard);
        assert_eq!(classify_content("just some words"), ContentType::Text);
    }

    #[test]
    fn qr_payload_limits() {
        assert_eq!(validate_qr_payload(" \n"), Err(ValidationError::Empty { field: "payload" }));
        let huge = "x".repeat(MAX_QR_PAYLOAD_LEN + 1);
        assert!(matches!(validate_qr_payload(&huge), Err(ValidationError::TooLong { .. })));
    }

    #[test]
    fn profile_reports_all_violations() {
        let errs = validate_profile("myspace", "bad handle!").unwrap_err();
        assert_eq!(errs.len(), 2);
        assert!(matches!(errs[0], ValidationError::UnsupportedPlatform { .. }));
        assert!(matches!(errs[1], ValidationError::InvalidHandle { .. }));
    }

    #[test]
    fn profile_strips_at_sign_and_ignores_case() {
        let subject = validate_profile("Twitter", "@nasa").unwrap();
        assert_eq!(
            subject,
            Subject::Profile { platform: Platform::Twitter, handle: "nasa".into() }
        );
    }
}
