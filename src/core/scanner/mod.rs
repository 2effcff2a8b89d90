// src/core/scanner/mod.rs

// Fact collection. Each source is a `SignalSource`; `collect` fans out to
// every source that supports the subject, bounds each one with its own
// timeout and folds whatever came back into a single `FactRecord`.
pub mod content_scanner;
pub mod dns_scanner;
pub mod profile_source;
pub mod registration_scanner;
pub mod ssl_scanner;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::error::{CollectionError, SignalResult};
use crate::core::models::{
    Category, CertificateFacts, Confidence, ContentSignals, FactRecord, SourceReport, SourceStatus,
    Subject,
};

/// Record counts from the DNS source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DnsFacts {
    pub a_records: u32,
    pub mx_records: u32,
    pub ns_records: u32,
    pub txt_records: u32,
}

/// Registration data from RDAP.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationFacts {
    pub registered_at: Option<DateTime<Utc>>,
    pub registrar: Option<String>,
}

/// Output of the local QR content inspector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentFacts {
    pub https: Option<bool>,
    pub signals: ContentSignals,
}

/// Profile data as delivered by a platform client or a caller-supplied document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileFacts {
    pub created_at: Option<DateTime<Utc>>,
    /// Used when `created_at` is not available.
    pub age_in_days: Option<u32>,
    pub verified: Option<bool>,
    pub has_profile_picture: Option<bool>,
    pub has_bio: Option<bool>,
    pub followers: u64,
    pub following: u64,
    pub posts: u64,
}

/// What one source contributes to a fact record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    Dns(DnsFacts),
    /// `None` when the host completed a handshake without presenting a certificate.
    Certificate(Option<CertificateFacts>),
    Registration(RegistrationFacts),
    Content(ContentFacts),
    Profile(ProfileFacts),
}

/// A single, independently mockable fact source.
#[async_trait]
pub trait SignalSource: Send + Sync {
    fn name(&self) -> &'static str;

    fn supports(&self, category: &Category) -> bool;

    async fn fetch_signal(&self, subject: &Subject) -> SignalResult<Signal>;
}

/// Fact record plus what happened to each source.
#[derive(Debug, Clone)]
pub struct Collection {
    pub record: FactRecord,
    pub reports: Vec<SourceReport>,
}

fn days_between(earlier: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    now.signed_duration_since(earlier)
        .num_days()
        .clamp(0, i64::from(u32::MAX)) as u32
}

fn apply_signal(record: &mut FactRecord, signal: Signal, now: DateTime<Utc>) {
    match signal {
        Signal::Dns(dns) => {
            record.activity.a_records = dns.a_records;
            record.activity.mx_records = dns.mx_records;
            record.activity.ns_records = dns.ns_records;
            record.activity.txt_records = dns.txt_records;
        }
        Signal::Certificate(certificate) => record.trust.certificate = certificate,
        Signal::Registration(registration) => {
            record.age_in_days = registration.registered_at.map(|t| days_between(t, now));
            record.trust.registrar = registration.registrar;
        }
        Signal::Content(content) => {
            record.trust.https = content.https;
            record.content = content.signals;
        }
        Signal::Profile(profile) => {
            record.age_in_days = profile
                .created_at
                .map(|t| days_between(t, now))
                .or(profile.age_in_days);
            record.trust.verified = profile.verified;
            record.trust.has_profile_picture = profile.has_profile_picture;
            record.trust.has_bio = profile.has_bio;
            record.activity.followers = profile.followers;
            record.activity.following = profile.following;
            record.activity.posts = profile.posts;
        }
    }
}

/// Runs every applicable source concurrently and builds the fact record.
///
/// A source that fails or exceeds `timeout` contributes nothing; the others
/// are unaffected. Signals are applied in source order so the result does not
/// depend on which source finished first.
pub async fn collect(
    subject: &Subject,
    sources: &[Arc<dyn SignalSource>],
    timeout: Duration,
    now: DateTime<Utc>,
) -> Collection {
    let category = subject.category();
    let applicable: Vec<&Arc<dyn SignalSource>> =
        sources.iter().filter(|s| s.supports(&category)).collect();
    let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);

    info!(subject = subject.id(), sources = applicable.len(), "Starting fact collection.");

    let outcomes = join_all(applicable.iter().map(|source| async move {
        let name = source.name();
        let outcome = match tokio::time::timeout(timeout, source.fetch_signal(subject)).await {
            Ok(result) => result,
            Err(_) => Err(CollectionError::TimedOut { name, timeout_ms }),
        };
        (name, outcome)
    }))
    .await;

    let mut record = FactRecord::empty(subject.id(), category);
    let mut reports = Vec::with_capacity(outcomes.len());

    for (name, outcome) in outcomes {
        let status = match outcome {
            Ok(signal) => {
                debug!(source = name, "Source answered.");
                apply_signal(&mut record, signal, now);
                SourceStatus::Ok
            }
            Err(CollectionError::TimedOut { timeout_ms, .. }) => {
                warn!(source = name, timeout_ms, "Source timed out, treating its signals as absent.");
                SourceStatus::TimedOut { after_ms: timeout_ms }
            }
            Err(e) => {
                warn!(source = name, error = %e, "Source failed, treating its signals as absent.");
                SourceStatus::Failed { reason: e.to_string() }
            }
        };
        reports.push(SourceReport { source: name, status });
    }

    let answered = reports.iter().filter(|r| r.is_ok()).count();
    record.confidence = match answered {
        0 => Confidence::Low,
        n if n == reports.len() => Confidence::High,
        _ => Confidence::Partial,
    };

    info!(
        subject = subject.id(),
        answered,
        total = reports.len(),
        confidence = ?record.confidence,
        "Fact collection finished."
    );
    Collection { record, reports }
}
