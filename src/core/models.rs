// src/core/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::core::knowledge_base::FlagDetail;

// --- Categorie di Soggetto ---
// Subject Categories

/// What a QR payload encodes. Selects the QR rule subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ContentType {
    Url,
    Text,
    Email,
    Phone,
    Sms,
    Wifi,
    Vcard,
}

/// Social platforms the profile checker knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Platform {
    Twitter,
    Facebook,
    Instagram,
    Linkedin,
    Tiktok,
    Youtube,
    Bluesky,
    Other,
}

/// Selects which rule subset applies to a `FactRecord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Category {
    Domain,
    #[serde(rename_all = "camelCase")]
    Qr { content_type: ContentType },
    #[serde(rename_all = "camelCase")]
    Profile { platform: Platform },
}

/// A validated subject, ready for fact collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    Domain(String),
    QrContent { payload: String, content_type: ContentType },
    Profile { platform: Platform, handle: String },
}

impl Subject {
    /// The identifier reported back to callers.
    pub fn id(&self) -> &str {
        match self {
            Subject::Domain(name) => name,
            Subject::QrContent { payload, .. } => payload,
            Subject::Profile { handle, .. } => handle,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Subject::Domain(_) => Category::Domain,
            Subject::QrContent { content_type, .. } => Category::Qr { content_type: *content_type },
            Subject::Profile { platform, .. } => Category::Profile { platform: *platform },
        }
    }
}

// --- Segnali ---
// Signals

/// Facts extracted from the leaf TLS certificate of a host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateFacts {
    /// Chain verified against the system roots and inside its validity window.
    pub valid: bool,
    pub subject_name: String,
    pub issuer_name: String,
    pub not_after: DateTime<Utc>,
    pub days_until_expiry: i64,
}

/// Encryption advertised by a `WIFI:` QR payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WifiEncryption {
    Open,
    Wep,
    Wpa,
}

/// Boolean and enumerated trust facts. Every field is observed independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrustSignals {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<CertificateFacts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registrar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub https: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_profile_picture: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_bio: Option<bool>,
    /// Member of the reputation allow-list.
    pub known_good: bool,
}

/// Non-negative activity counts. Missing sources leave them at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActivitySignals {
    pub a_records: u32,
    pub mx_records: u32,
    pub ns_records: u32,
    pub txt_records: u32,
    pub followers: u64,
    pub following: u64,
    pub posts: u64,
}

/// QR-only content facts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentSignals {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    pub ip_host: bool,
    pub shortener: bool,
    pub suspicious_tld: bool,
    pub suspicious_patterns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wifi_encryption: Option<WifiEncryption>,
}

/// How much of the fact record was actually observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Partial,
    Low,
}

/// Everything known about a subject. Built once by the collector, then only read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactRecord {
    pub subject_id: String,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_in_days: Option<u32>,
    pub trust: TrustSignals,
    pub activity: ActivitySignals,
    pub content: ContentSignals,
    pub confidence: Confidence,
}

impl FactRecord {
    /// A record with every signal at its default, as produced when nothing could be collected.
    pub fn empty(subject_id: &str, category: Category) -> Self {
        Self {
            subject_id: subject_id.to_string(),
            category,
            age_in_days: None,
            trust: TrustSignals::default(),
            activity: ActivitySignals::default(),
            content: ContentSignals::default(),
            confidence: Confidence::Low,
        }
    }
}

// --- Risultati del Motore ---
// Engine Results

/// Final 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    /// Clamps a raw rule total into [0, 100].
    pub fn clamped(raw: i32) -> Self {
        Self(raw.clamp(0, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

/// One rule that fired while scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Contribution {
    pub rule: &'static str,
    pub weight: i32,
}

/// Three-level verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// A red or green flag. Serialized as its human-readable message.
#[derive(Debug, Clone, Copy)]
pub struct Flag(pub &'static FlagDetail);

impl Flag {
    pub fn code(&self) -> &'static str {
        self.0.code
    }

    pub fn message(&self) -> &'static str {
        self.0.message
    }

    pub fn detail(&self) -> &'static FlagDetail {
        self.0
    }
}

impl PartialEq for Flag {
    fn eq(&self, other: &Self) -> bool {
        self.0.code == other.0.code
    }
}

impl Eq for Flag {}

impl Serialize for Flag {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0.message)
    }
}

/// Red and green flags in checklist order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagSet {
    pub red_flags: Vec<Flag>,
    pub green_flags: Vec<Flag>,
}

impl FlagSet {
    /// Appends a red flag when `condition` holds. A flag is never recorded twice.
    pub fn red_if(&mut self, condition: bool, detail: &'static FlagDetail) {
        if condition && !self.red_flags.contains(&Flag(detail)) {
            self.red_flags.push(Flag(detail));
        }
    }

    pub fn green_if(&mut self, condition: bool, detail: &'static FlagDetail) {
        if condition && !self.green_flags.contains(&Flag(detail)) {
            self.green_flags.push(Flag(detail));
        }
    }

    pub fn has_red(&self, detail: &'static FlagDetail) -> bool {
        self.red_flags.contains(&Flag(detail))
    }
}

// --- Stato delle Sorgenti ---
// Source Status

/// Outcome of a single fact source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SourceStatus {
    Ok,
    Failed { reason: String },
    #[serde(rename_all = "camelCase")]
    TimedOut { after_ms: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceReport {
    pub source: &'static str,
    #[serde(flatten)]
    pub status: SourceStatus,
}

impl SourceReport {
    pub fn is_ok(&self) -> bool {
        matches!(self.status, SourceStatus::Ok)
    }
}

// --- Report Principale ---
// Main Report

/// The complete, JSON-serializable answer for one analysis request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub subject: String,
    pub category: Category,
    pub facts: FactRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_score: Option<Score>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authenticity_score: Option<Score>,
    pub score_breakdown: Vec<Contribution>,
    pub risk_level: RiskLevel,
    pub red_flags: Vec<Flag>,
    pub green_flags: Vec<Flag>,
    pub recommendations: Vec<String>,
    pub confidence: Confidence,
    pub sources: Vec<SourceReport>,
    pub analyzed_at: DateTime<Utc>,
}

impl Assessment {
    pub fn score(&self) -> Score {
        self.security_score
            .or(self.authenticity_score)
            .unwrap_or(Score::clamped(0))
    }
}
