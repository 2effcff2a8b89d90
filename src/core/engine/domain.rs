// src/core/engine/domain.rs

use tracing::debug;

use crate::core::engine::{age_band, RiskModel, ScoreCard};
use crate::core::knowledge_base::{
    DOMAIN_CERTIFICATE_EXPIRED, DOMAIN_CERTIFICATE_EXPIRING, DOMAIN_CERTIFICATE_LONG_VALIDITY,
    DOMAIN_DNS_CONFIGURED, DOMAIN_ESTABLISHED, DOMAIN_MAIL_CONFIGURED, DOMAIN_NO_CERTIFICATE,
    DOMAIN_NO_DNS_RECORDS, DOMAIN_RECENTLY_REGISTERED, DOMAIN_REPUTABLE, DOMAIN_VALID_CERTIFICATE,
};
use crate::core::models::{FactRecord, FlagSet, RiskLevel};

const VALID_CERTIFICATE_BONUS: i32 = 15;
const EXPIRED_CERTIFICATE_PENALTY: i32 = -20;
/// Per non-empty record category; four categories cap the total at +20.
const RECORD_CATEGORY_BONUS: i32 = 5;
const REPUTATION_BONUS: i32 = 10;

const RECENT_REGISTRATION_DAYS: u32 = 30;
const ESTABLISHED_DAYS: u32 = 365;
const EXPIRY_WARNING_DAYS: i64 = 30;
const LONG_VALIDITY_DAYS: i64 = 90;

/// Rules for the domain checker (`securityScore`).
pub struct DomainModel;

fn certificate_expired(record: &FactRecord) -> bool {
    record
        .trust
        .certificate
        .as_ref()
        .is_some_and(|c| c.days_until_expiry <= 0)
}

impl RiskModel for DomainModel {
    fn score(&self, record: &FactRecord) -> ScoreCard {
        let mut card = ScoreCard::new();
        let cert = record.trust.certificate.as_ref();
        let activity = &record.activity;

        card.apply(age_band(record.age_in_days));
        card.apply_if(
            cert.is_some_and(|c| c.valid && c.days_until_expiry > 0),
            "valid_certificate",
            VALID_CERTIFICATE_BONUS,
        );
        card.apply_if(certificate_expired(record), "expired_certificate", EXPIRED_CERTIFICATE_PENALTY);
        card.apply_if(activity.a_records > 0, "a_records_present", RECORD_CATEGORY_BONUS);
        card.apply_if(activity.mx_records > 0, "mx_records_present", RECORD_CATEGORY_BONUS);
        card.apply_if(activity.ns_records > 0, "ns_records_present", RECORD_CATEGORY_BONUS);
        card.apply_if(activity.txt_records > 0, "txt_records_present", RECORD_CATEGORY_BONUS);
        card.apply_if(record.trust.known_good, "known_good_reputation", REPUTATION_BONUS);

        debug!(subject = %record.subject_id, raw = card.raw(), "Domain score computed.");
        card
    }

    fn flags(&self, record: &FactRecord) -> FlagSet {
        let mut flags = FlagSet::default();
        let cert = record.trust.certificate.as_ref();

        flags.red_if(
            record.age_in_days.is_some_and(|a| a < RECENT_REGISTRATION_DAYS),
            &DOMAIN_RECENTLY_REGISTERED,
        );
        flags.red_if(record.activity.a_records == 0, &DOMAIN_NO_DNS_RECORDS);
        flags.red_if(cert.is_none(), &DOMAIN_NO_CERTIFICATE);
        flags.red_if(
            cert.is_some_and(|c| c.days_until_expiry > 0 && c.days_until_expiry <= EXPIRY_WARNING_DAYS),
            &DOMAIN_CERTIFICATE_EXPIRING,
        );
        flags.red_if(
            cert.is_some_and(|c| c.days_until_expiry <= 0 || !c.valid),
            &DOMAIN_CERTIFICATE_EXPIRED,
        );

        flags.green_if(
            record.age_in_days.is_some_and(|a| a > ESTABLISHED_DAYS),
            &DOMAIN_ESTABLISHED,
        );
        flags.green_if(
            cert.is_some_and(|c| c.valid && c.days_until_expiry > 0),
            &DOMAIN_VALID_CERTIFICATE,
        );
        flags.green_if(
            cert.is_some_and(|c| c.valid && c.days_until_expiry > LONG_VALIDITY_DAYS),
            &DOMAIN_CERTIFICATE_LONG_VALIDITY,
        );
        flags.green_if(record.activity.a_records > 0, &DOMAIN_DNS_CONFIGURED);
        flags.green_if(record.activity.mx_records > 0, &DOMAIN_MAIL_CONFIGURED);
        flags.green_if(record.trust.known_good, &DOMAIN_REPUTABLE);

        flags
    }

    fn verdict_lines(&self, verdict: RiskLevel) -> [&'static str; 2] {
        match verdict {
            RiskLevel::High => [
                "Avoid visiting or sharing information with this domain",
                "Report suspicious activity to your IT team or the relevant authorities",
            ],
            RiskLevel::Medium => [
                "Exercise caution when interacting with this domain",
                "Verify the domain's legitimacy independently before entering any data",
            ],
            RiskLevel::Low => [
                "This domain appears to be legitimate",
                "Safe to interact with using normal precautions",
            ],
        }
    }

    fn advisories(&self, _record: &FactRecord, flags: &FlagSet) -> Vec<&'static str> {
        let mut lines = Vec::new();
        if flags.has_red(&DOMAIN_NO_CERTIFICATE) {
            lines.push("Never enter passwords or payment details on a site without HTTPS");
        }
        if flags.has_red(&DOMAIN_CERTIFICATE_EXPIRING) {
            lines.push("The site's certificate is about to expire; confirm the connection is secure before logging in");
        }
        if flags.has_red(&DOMAIN_CERTIFICATE_EXPIRED) {
            lines.push("Do not bypass browser certificate warnings for this site");
        }
        if flags.has_red(&DOMAIN_RECENTLY_REGISTERED) {
            lines.push("Newly registered domains are often used for phishing; check the address for misspellings");
        }
        lines
    }

    fn closing_lines(&self) -> [&'static str; 2] {
        [
            "Always verify websites through official channels",
            "Keep your browser and security software up to date",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Category, CertificateFacts};
    use chrono::Utc;

    fn cert(days: i64, valid: bool) -> CertificateFacts {
        CertificateFacts {
            valid,
            subject_name: "CN=example.com".into(),
            issuer_name: "CN=Test CA".into(),
            not_after: Utc::now(),
            days_until_expiry: days,
        }
    }

    #[test]
    fn expired_certificate_is_penalised_not_rewarded() {
        let mut record = FactRecord::empty("example.com", Category::Domain);
        record.trust.certificate = Some(cert(0, true));
        let card = DomainModel.score(&record);
        assert_eq!(card.raw(), 30);
        let flags = DomainModel.flags(&record);
        assert!(flags.has_red(&DOMAIN_CERTIFICATE_EXPIRED));
        assert!(!flags.has_red(&DOMAIN_CERTIFICATE_EXPIRING));
    }

    #[test]
    fn activity_bonus_is_capped_regardless_of_counts() {
        let mut record = FactRecord::empty("example.com", Category::Domain);
        record.activity.a_records = 10_000;
        record.activity.mx_records = 10_000;
        record.activity.ns_records = 10_000;
        record.activity.txt_records = 10_000;
        assert_eq!(DomainModel.score(&record).raw(), 70);
    }

    #[test]
    fn untrusted_certificate_is_flagged_without_bonus() {
        let mut record = FactRecord::empty("example.com", Category::Domain);
        record.trust.certificate = Some(cert(200, false));
        assert_eq!(DomainModel.score(&record).raw(), 50);
        let flags = DomainModel.flags(&record);
        assert!(flags.has_red(&DOMAIN_CERTIFICATE_EXPIRED));
        assert!(flags.green_flags.is_empty());
    }
}
