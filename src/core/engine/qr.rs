// src/core/engine/qr.rs

use tracing::debug;

use crate::core::engine::{RiskModel, ScoreCard};
use crate::core::knowledge_base::{
    QR_HTTPS, QR_IP_HOST, QR_KNOWN_DESTINATION, QR_NOT_A_LINK, QR_NO_HTTPS,
    QR_NO_SUSPICIOUS_PATTERNS, QR_SECURE_WIFI, QR_SHORTENER, QR_SUSPICIOUS_CONTENT,
    QR_SUSPICIOUS_TLD, QR_WEAK_WIFI,
};
use crate::core::models::{Category, ContentType, FactRecord, FlagSet, RiskLevel, WifiEncryption};

/// Rules for the QR-content checker (`securityScore`).
pub struct QrModel;

fn content_type(record: &FactRecord) -> Option<ContentType> {
    match record.category {
        Category::Qr { content_type } => Some(content_type),
        _ => None,
    }
}

fn is_url(record: &FactRecord) -> bool {
    content_type(record) == Some(ContentType::Url)
}

fn weak_wifi(record: &FactRecord) -> bool {
    matches!(
        record.content.wifi_encryption,
        Some(WifiEncryption::Open) | Some(WifiEncryption::Wep)
    )
}

impl RiskModel for QrModel {
    fn score(&self, record: &FactRecord) -> ScoreCard {
        let mut card = ScoreCard::new();
        let url = is_url(record);
        let https = record.trust.https;
        let content = &record.content;

        card.apply_if(url && https == Some(true), "https", 20);
        card.apply_if(url && https == Some(false), "plain_http", -20);
        card.apply_if(url && record.trust.known_good, "known_good_destination", 20);
        card.apply_if(content.ip_host, "ip_address_host", -25);
        card.apply_if(content.shortener, "link_shortener", -15);
        card.apply_if(content.suspicious_tld, "suspicious_tld", -15);
        card.apply_if(!content.suspicious_patterns.is_empty(), "suspicious_patterns", -20);
        card.apply_if(
            matches!(content_type(record), Some(ContentType::Text | ContentType::Vcard)),
            "non_navigational_content",
            30,
        );
        card.apply_if(
            matches!(
                content_type(record),
                Some(ContentType::Email | ContentType::Phone | ContentType::Sms)
            ),
            "contact_content",
            20,
        );
        card.apply_if(
            content.wifi_encryption == Some(WifiEncryption::Wpa),
            "wpa_wifi",
            20,
        );
        card.apply_if(weak_wifi(record), "weak_wifi", -20);

        debug!(raw = card.raw(), patterns = content.suspicious_patterns.len(), "QR score computed.");
        card
    }

    fn flags(&self, record: &FactRecord) -> FlagSet {
        let mut flags = FlagSet::default();
        let url = is_url(record);
        let content = &record.content;

        flags.red_if(url && record.trust.https == Some(false), &QR_NO_HTTPS);
        flags.red_if(content.ip_host, &QR_IP_HOST);
        flags.red_if(content.shortener, &QR_SHORTENER);
        flags.red_if(content.suspicious_tld, &QR_SUSPICIOUS_TLD);
        flags.red_if(!content.suspicious_patterns.is_empty(), &QR_SUSPICIOUS_CONTENT);
        flags.red_if(weak_wifi(record), &QR_WEAK_WIFI);

        flags.green_if(url && record.trust.https == Some(true), &QR_HTTPS);
        flags.green_if(url && record.trust.known_good, &QR_KNOWN_DESTINATION);
        flags.green_if(!url, &QR_NOT_A_LINK);
        flags.green_if(content.suspicious_patterns.is_empty(), &QR_NO_SUSPICIOUS_PATTERNS);
        flags.green_if(content.wifi_encryption == Some(WifiEncryption::Wpa), &QR_SECURE_WIFI);

        flags
    }

    fn verdict_lines(&self, verdict: RiskLevel) -> [&'static str; 2] {
        match verdict {
            RiskLevel::High => [
                "Do not open or act on this QR code's content",
                "Report the QR code if you found it in a public place or unsolicited message",
            ],
            RiskLevel::Medium => [
                "Inspect the content carefully before acting on it",
                "Confirm who placed the QR code before trusting it",
            ],
            RiskLevel::Low => [
                "This QR code's content appears to be safe",
                "Safe to proceed with normal precautions",
            ],
        }
    }

    fn advisories(&self, _record: &FactRecord, flags: &FlagSet) -> Vec<&'static str> {
        let mut lines = Vec::new();
        if flags.has_red(&QR_NO_HTTPS) {
            lines.push("Never enter credentials on a page opened over plain HTTP");
        }
        if flags.has_red(&QR_SHORTENER) {
            lines.push("Expand shortened links with a preview service before opening them");
        }
        if flags.has_red(&QR_WEAK_WIFI) {
            lines.push("Avoid banking or logging in while connected to open Wi-Fi networks");
        }
        if flags.has_red(&QR_SUSPICIOUS_CONTENT) {
            lines.push("Legitimate organisations do not demand urgent payments or passwords via QR codes");
        }
        lines
    }

    fn closing_lines(&self) -> [&'static str; 2] {
        [
            "Always verify through official channels",
            "Check that QR stickers have not been placed over the original code",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(content_type: ContentType) -> FactRecord {
        FactRecord::empty("payload", Category::Qr { content_type })
    }

    #[test]
    fn plain_text_is_clean() {
        let r = record(ContentType::Text);
        assert_eq!(QrModel.score(&r).raw(), 80);
        let flags = QrModel.flags(&r);
        assert!(flags.red_flags.is_empty());
        assert_eq!(flags.green_flags.len(), 2);
    }

    #[test]
    fn phishing_link_stacks_penalties() {
        let mut r = record(ContentType::Url);
        r.trust.https = Some(false);
        r.content.ip_host = true;
        r.content.suspicious_patterns = vec!["urgency".into(), "credential request".into()];
        assert_eq!(QrModel.score(&r).raw(), 50 - 20 - 25 - 20);
        let flags = QrModel.flags(&r);
        assert_eq!(flags.red_flags.len(), 3);
        assert!(flags.green_flags.is_empty());
    }

    #[test]
    fn open_wifi_is_weak() {
        let mut r = record(ContentType::Wifi);
        r.content.wifi_encryption = Some(WifiEncryption::Open);
        assert!(QrModel.flags(&r).has_red(&QR_WEAK_WIFI));
        assert_eq!(QrModel.score(&r).raw(), 30);
    }
}
