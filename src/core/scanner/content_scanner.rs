// src/core/scanner/content_scanner.rs

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};
use url::{Host, Url};

use crate::core::error::{CollectionError, SignalResult};
use crate::core::models::{Category, ContentSignals, ContentType, Subject, WifiEncryption};
use crate::core::scanner::{ContentFacts, Signal, SignalSource};

const SHORTENERS: &[&str] = &[
    "bit.ly",
    "tinyurl.com",
    "t.co",
    "goo.gl",
    "ow.ly",
    "is.gd",
    "buff.ly",
    "rebrand.ly",
    "cutt.ly",
    "shorturl.at",
    "tiny.cc",
];

/// TLDs disproportionately used for throwaway phishing hosts.
const ABUSE_PRONE_TLDS: &[&str] = &[
    "tk", "ml", "ga", "cf", "gq", "xyz", "top", "zip", "mov", "click", "country", "kim", "work",
    "rest",
];

// Separators in paths and query strings (`verify-your-account`) count as spaces.
static RE_URGENCY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(urgent|immediately|act[\s_-]+now|final[\s_-]+notice|account[\s_-]+(suspended|locked|disabled)|within[\s_-]+24[\s_-]*hours)\b").unwrap()
});
static RE_CREDENTIALS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(verify|confirm|update|enter)[\s_-]+your[\s_-]+(account|identity|password|credentials|login|pin)\b").unwrap()
});
static RE_PRIZE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(you[\s_-]+(have[\s_-]+)?won|claim[\s_-]+your[\s_-]+(prize|reward|gift)|free[\s_-]+gift[\s_-]*card|lottery)\b").unwrap()
});
static RE_PAYMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(pay[\s_-]+(now|fine|fee)|outstanding[\s_-]+(balance|payment)|parking[\s_-]+fine|gift[\s_-]*cards?[\s_-]+only|bitcoin|crypto[\s_-]*wallet)\b").unwrap()
});
static RE_EXECUTABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(apk|exe|msi|scr|bat|dmg|jar)$").unwrap());

enum Check {
    /// Matched against the whole payload.
    Text(&'static Lazy<Regex>),
    /// Evaluated on the parsed URL, when the payload is one.
    Link(fn(&Url) -> bool),
}

struct PatternRule {
    label: &'static str,
    check: Check,
}

fn has_embedded_credentials(url: &Url) -> bool {
    !url.username().is_empty() || url.password().is_some()
}

fn has_punycode_host(url: &Url) -> bool {
    url.host_str()
        .is_some_and(|h| h.split('.').any(|label| label.starts_with("xn--")))
}

fn downloads_executable(url: &Url) -> bool {
    RE_EXECUTABLE.is_match(url.path())
}

const MALFORMED_LINK: &str = "malformed link";

static PATTERN_RULES: &[PatternRule] = &[
    PatternRule { label: "urgency", check: Check::Text(&RE_URGENCY) },
    PatternRule { label: "credential request", check: Check::Text(&RE_CREDENTIALS) },
    PatternRule { label: "prize bait", check: Check::Text(&RE_PRIZE) },
    PatternRule { label: "payment request", check: Check::Text(&RE_PAYMENT) },
    PatternRule { label: "embedded credentials", check: Check::Link(has_embedded_credentials) },
    PatternRule { label: "look-alike host", check: Check::Link(has_punycode_host) },
    PatternRule { label: "executable download", check: Check::Link(downloads_executable) },
];

/// Transport advertised by the payload's scheme prefix. A bare `www.` link has
/// no scheme, so its transport is unknown.
fn link_transport(lower: &str) -> Option<bool> {
    if lower.starts_with("https://") {
        Some(true)
    } else if lower.starts_with("http://") {
        Some(false)
    } else {
        None
    }
}

/// Parses a URL payload. The transport is known from the prefix even when the
/// rest of the link does not parse.
fn parse_link(payload: &str) -> (Option<Url>, Option<bool>) {
    let trimmed = payload.trim();
    let lower = trimmed.to_ascii_lowercase();
    let https = link_transport(&lower);
    let url = if lower.starts_with("www.") {
        Url::parse(&format!("http://{}", trimmed)).ok()
    } else {
        Url::parse(trimmed).ok()
    };
    (url, https)
}

fn wifi_encryption(payload: &str) -> WifiEncryption {
    let body = payload.get(5..).unwrap_or_default();
    let kind = body
        .split(';')
        .find_map(|field| field.strip_prefix("T:").or_else(|| field.strip_prefix("t:")))
        .map(|t| t.trim().to_ascii_uppercase());
    match kind.as_deref() {
        Some("WPA" | "WPA2" | "WPA3" | "SAE" | "WPA2-EAP") => WifiEncryption::Wpa,
        Some("WEP") => WifiEncryption::Wep,
        _ => WifiEncryption::Open,
    }
}

fn host_tld(host: &str) -> Option<&str> {
    host.trim_end_matches('.').rsplit('.').next()
}

/// Inspects a QR payload locally. Never fails and performs no I/O.
pub fn inspect(payload: &str, content_type: ContentType) -> ContentFacts {
    let mut signals = ContentSignals::default();
    let (link, https) = if content_type == ContentType::Url {
        parse_link(payload)
    } else {
        (None, None)
    };

    if content_type == ContentType::Url && link.is_none() {
        debug!("URL payload could not be parsed.");
        signals.suspicious_patterns.push(MALFORMED_LINK.to_string());
    }

    if let Some(url) = &link {
        match url.host() {
            Some(Host::Domain(domain)) => {
                let domain = domain.to_ascii_lowercase();
                let bare = domain.strip_prefix("www.").unwrap_or(domain.as_str());
                signals.shortener = SHORTENERS.contains(&bare);
                signals.suspicious_tld = host_tld(bare).is_some_and(|tld| ABUSE_PRONE_TLDS.contains(&tld));
                signals.host = Some(domain);
            }
            Some(Host::Ipv4(ip)) => {
                signals.ip_host = true;
                signals.host = Some(ip.to_string());
            }
            Some(Host::Ipv6(ip)) => {
                signals.ip_host = true;
                signals.host = Some(ip.to_string());
            }
            None => {}
        }
    }

    if content_type == ContentType::Wifi {
        signals.wifi_encryption = Some(wifi_encryption(payload));
    }

    for rule in PATTERN_RULES {
        let matched = match &rule.check {
            Check::Text(re) => re.is_match(payload),
            Check::Link(predicate) => link.as_ref().is_some_and(|url| predicate(url)),
        };
        if matched {
            debug!(pattern = rule.label, "Suspicious pattern matched.");
            signals.suspicious_patterns.push(rule.label.to_string());
        }
    }

    ContentFacts { https, signals }
}

/// Local content inspector for QR payloads.
pub struct ContentInspector;

#[async_trait]
impl SignalSource for ContentInspector {
    fn name(&self) -> &'static str {
        "content"
    }

    fn supports(&self, category: &Category) -> bool {
        matches!(category, Category::Qr { .. })
    }

    async fn fetch_signal(&self, subject: &Subject) -> SignalResult<Signal> {
        let Subject::QrContent { payload, content_type } = subject else {
            return Err(CollectionError::Task("subject is not QR content".to_string()));
        };
        let facts = inspect(payload, *content_type);
        info!(
            content_type = %content_type,
            host = facts.signals.host.as_deref().unwrap_or("-"),
            patterns = facts.signals.suspicious_patterns.len(),
            "QR content inspected."
        );
        Ok(Signal::Content(facts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn https_link_to_normal_host() {
        let facts = inspect("https://www.paypal.com/signin", ContentType::Url);
        assert_eq!(facts.https, Some(true));
        assert_eq!(facts.signals.host.as_deref(), Some("www.paypal.com"));
        assert!(!facts.signals.ip_host && !facts.signals.shortener && !facts.signals.suspicious_tld);
        assert!(facts.signals.suspicious_patterns.is_empty());
    }

    #[test]
    fn phishing_link_signals() {
        let facts = inspect(
            "http://192.168.4.20/verify-your-account?urgent=1",
            ContentType::Url,
        );
        assert_eq!(facts.https, Some(false));
        assert!(facts.signals.ip_host);
        assert_eq!(facts.signals.suspicious_patterns, vec!["urgency", "credential request"]);
    }

    #[test]
    fn shortener_and_tld() {
        assert!(inspect("https://bit.ly/3xYz", ContentType::Url).signals.shortener);
        assert!(inspect("https://free-prizes.tk/", ContentType::Url).signals.suspicious_tld);
        assert!(!inspect("https://example.com/", ContentType::Url).signals.suspicious_tld);
    }

    #[test]
    fn link_only_patterns() {
        let facts = inspect("https://user:pw@xn--pple-43d.com/app.apk", ContentType::Url);
        assert_eq!(
            facts.signals.suspicious_patterns,
            vec!["embedded credentials", "look-alike host", "executable download"]
        );
    }

    #[test]
    fn scheme_less_link_has_unknown_transport() {
        let facts = inspect("www.example.com/menu", ContentType::Url);
        assert_eq!(facts.https, None);
        assert_eq!(facts.signals.host.as_deref(), Some("www.example.com"));
    }

    #[test]
    fn unparseable_plain_http_link_keeps_its_transport() {
        let facts = inspect("http://login.bank .com/verify", ContentType::Url);
        assert_eq!(facts.https, Some(false));
        assert_eq!(facts.signals.host, None);
        assert_eq!(facts.signals.suspicious_patterns, vec!["malformed link"]);

        let facts = inspect("https://exa mple.com", ContentType::Url);
        assert_eq!(facts.https, Some(true));
        assert_eq!(facts.signals.suspicious_patterns, vec!["malformed link"]);
    }

    #[test]
    fn wifi_encryption_types() {
        let enc = |p: &str| inspect(p, ContentType::Wifi).signals.wifi_encryption;
        assert_eq!(enc("WIFI:T:WPA2;S:home;P:secret;;"), Some(WifiEncryption::Wpa));
        assert_eq!(enc("WIFI:S:cafe;T:WEP;P:1234;;"), Some(WifiEncryption::Wep));
        assert_eq!(enc("WIFI:T:nopass;S:free;;"), Some(WifiEncryption::Open));
        assert_eq!(enc("WIFI:S:free;;"), Some(WifiEncryption::Open));
    }

    #[test]
    fn text_payload_patterns() {
        let facts = inspect("You have won! Claim your prize, pay now with bitcoin", ContentType::Text);
        assert_eq!(facts.https, None);
        assert_eq!(facts.signals.host, None);
        assert_eq!(facts.signals.suspicious_patterns, vec!["prize bait", "payment request"]);
    }
}
