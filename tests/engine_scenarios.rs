use chrono::Utc;
use safescope::core::engine::advice::{INSUFFICIENT_DATA, REVIEW_RED_FLAGS};
use safescope::core::engine::{evaluate, model_for};
use safescope::core::knowledge_base::{
    DOMAIN_CERTIFICATE_EXPIRING, DOMAIN_ESTABLISHED, DOMAIN_NO_CERTIFICATE, DOMAIN_NO_DNS_RECORDS,
    DOMAIN_RECENTLY_REGISTERED, PROFILE_FOLLOW_RATIO, QR_SHORTENER, QR_SUSPICIOUS_TLD,
};
use safescope::core::models::{
    Category, CertificateFacts, Confidence, ContentType, FactRecord, Flag, Platform, RiskLevel,
};

fn domain_record() -> FactRecord {
    let mut record = FactRecord::empty("example.com", Category::Domain);
    record.confidence = Confidence::High;
    record
}

fn certificate(days_until_expiry: i64) -> CertificateFacts {
    CertificateFacts {
        valid: true,
        subject_name: "CN=example.com".into(),
        issuer_name: "CN=Example Issuing CA".into(),
        not_after: Utc::now() + chrono::Duration::days(days_until_expiry),
        days_until_expiry,
    }
}

fn with_all_activity(mut record: FactRecord) -> FactRecord {
    record.activity.a_records = 2;
    record.activity.mx_records = 1;
    record.activity.ns_records = 4;
    record.activity.txt_records = 3;
    record
}

fn codes(flags: &[Flag]) -> Vec<&'static str> {
    flags.iter().map(Flag::code).collect()
}

#[test]
fn long_standing_reputable_domain_is_low_risk() {
    let mut record = with_all_activity(domain_record());
    record.age_in_days = Some(10_000);
    record.trust.certificate = Some(certificate(200));
    record.trust.known_good = true;

    let eval = evaluate(&record);
    assert!(eval.score.value() >= 90);
    assert!(eval.flags.red_flags.is_empty());
    assert_eq!(eval.verdict, RiskLevel::Low);
    assert_eq!(eval.flags.green_flags.len(), 6);
}

#[test]
fn days_old_domain_without_certificate_is_high_risk() {
    let mut record = domain_record();
    record.age_in_days = Some(5);

    let eval = evaluate(&record);
    let red = codes(&eval.flags.red_flags);
    assert_eq!(
        red,
        vec![
            DOMAIN_RECENTLY_REGISTERED.code,
            DOMAIN_NO_DNS_RECORDS.code,
            DOMAIN_NO_CERTIFICATE.code,
        ]
    );
    assert_eq!(eval.score.value(), 35);
    assert_eq!(eval.verdict, RiskLevel::High);
}

#[test]
fn expiring_certificate_on_mid_age_domain_is_medium() {
    let mut record = with_all_activity(domain_record());
    record.age_in_days = Some(100);
    record.trust.certificate = Some(certificate(5));

    let eval = evaluate(&record);
    assert_eq!(codes(&eval.flags.red_flags), vec![DOMAIN_CERTIFICATE_EXPIRING.code]);
    assert!(!eval.flags.green_flags.contains(&Flag(&DOMAIN_ESTABLISHED)));
    assert_eq!(eval.score.value(), 95);
    assert_eq!(eval.verdict, RiskLevel::Medium);
}

#[test]
fn empty_record_resolves_to_high_with_insufficient_data() {
    let record = FactRecord::empty("unknown.example", Category::Domain);

    let eval = evaluate(&record);
    assert_eq!(eval.score.value(), 50);
    assert!(eval.flags.red_flags.contains(&Flag(&DOMAIN_NO_DNS_RECORDS)));
    assert_eq!(eval.verdict, RiskLevel::High);

    let model = model_for(&record.category);
    let [first, second] = model.verdict_lines(RiskLevel::High);
    let [close_a, close_b] = model.closing_lines();
    assert_eq!(
        eval.recommendations,
        vec![
            first,
            second,
            REVIEW_RED_FLAGS,
            "Never enter passwords or payment details on a site without HTTPS",
            INSUFFICIENT_DATA,
            close_a,
            close_b,
        ]
    );
}

#[test]
fn recommendations_skip_review_line_without_red_flags() {
    let mut record = with_all_activity(domain_record());
    record.age_in_days = Some(4_000);
    record.trust.certificate = Some(certificate(300));

    let eval = evaluate(&record);
    assert_eq!(eval.verdict, RiskLevel::Low);
    assert!(!eval.recommendations.iter().any(|r| r == REVIEW_RED_FLAGS));
    assert!(!eval.recommendations.iter().any(|r| r == INSUFFICIENT_DATA));
    assert_eq!(eval.recommendations.len(), 4);
}

#[test]
fn shortened_link_on_abuse_tld() {
    let mut record = FactRecord::empty(
        "http://win-big.tk/claim",
        Category::Qr { content_type: ContentType::Url },
    );
    record.confidence = Confidence::High;
    record.trust.https = Some(false);
    record.content.shortener = true;
    record.content.suspicious_tld = true;

    let eval = evaluate(&record);
    assert_eq!(eval.score.value(), 0);
    assert!(eval.flags.has_red(&QR_SHORTENER));
    assert!(eval.flags.has_red(&QR_SUSPICIOUS_TLD));
    assert_eq!(eval.verdict, RiskLevel::High);
    assert!(
        eval.recommendations
            .iter()
            .any(|r| r.starts_with("Expand shortened links"))
    );
}

#[test]
fn plain_text_qr_is_low_risk() {
    let mut record = FactRecord::empty("Table 12", Category::Qr { content_type: ContentType::Text });
    record.confidence = Confidence::High;

    let eval = evaluate(&record);
    assert_eq!(eval.score.value(), 80);
    assert_eq!(eval.verdict, RiskLevel::Low);
}

#[test]
fn follow_farm_profile_is_high_risk() {
    let mut record = FactRecord::empty("deals4u", Category::Profile { platform: Platform::Twitter });
    record.confidence = Confidence::High;
    record.age_in_days = Some(12);
    record.activity.followers = 3;
    record.activity.following = 4_800;

    let eval = evaluate(&record);
    assert!(eval.flags.has_red(&PROFILE_FOLLOW_RATIO));
    assert_eq!(eval.flags.red_flags.len(), 5);
    assert!(eval.flags.green_flags.is_empty());
    assert_eq!(eval.score.value(), 50 - 10 - 15);
    assert_eq!(eval.verdict, RiskLevel::High);
}

#[test]
fn official_verified_profile_is_low_risk() {
    let mut record = FactRecord::empty("nasa", Category::Profile { platform: Platform::Instagram });
    record.confidence = Confidence::High;
    record.age_in_days = Some(4_500);
    record.trust.verified = Some(true);
    record.trust.has_profile_picture = Some(true);
    record.trust.has_bio = Some(true);
    record.trust.known_good = true;
    record.activity.followers = 90_000_000;
    record.activity.following = 80;
    record.activity.posts = 4_000;

    let eval = evaluate(&record);
    assert_eq!(eval.score.value(), 100);
    assert!(eval.flags.red_flags.is_empty());
    assert_eq!(eval.flags.green_flags.len(), 6);
    assert_eq!(eval.verdict, RiskLevel::Low);
}
