// src/core/analyzer.rs

//! Request boundary: validate, collect, evaluate, assemble.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{error, info, instrument};

use crate::config::Config;
use crate::core::engine::{self, Evaluation};
use crate::core::error::AnalysisError;
use crate::core::models::{Assessment, Category, SourceReport, SourceStatus, Subject};
use crate::core::reputation::{AllowList, ReputationProvider};
use crate::core::scanner::content_scanner::ContentInspector;
use crate::core::scanner::dns_scanner::DnsSource;
use crate::core::scanner::registration_scanner::RegistrationSource;
use crate::core::scanner::ssl_scanner::CertificateSource;
use crate::core::scanner::{collect, Collection, SignalSource};
use crate::core::validation;

/// Runs the whole pipeline for one subject. Holds no per-request state, so
/// one instance can serve concurrent requests.
pub struct Analyzer {
    sources: Vec<Arc<dyn SignalSource>>,
    reputation: Arc<dyn ReputationProvider>,
    timeout: Duration,
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

impl Analyzer {
    pub fn new(
        sources: Vec<Arc<dyn SignalSource>>,
        reputation: Arc<dyn ReputationProvider>,
        timeout: Duration,
    ) -> Self {
        Self { sources, reputation, timeout }
    }

    /// The live DNS, certificate, registration and content sources with the
    /// configured allow-list. No profile source is included; see `with_source`.
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let timeout = config.source_timeout;
        let sources: Vec<Arc<dyn SignalSource>> = vec![
            Arc::new(DnsSource::new(timeout)),
            Arc::new(CertificateSource::new(timeout)),
            Arc::new(RegistrationSource::new(&config.rdap_url, &config.user_agent, timeout)?),
            Arc::new(ContentInspector),
        ];
        let reputation = AllowList::with_additions(
            &config.known_domains,
            &config.known_registrars,
            &config.known_accounts,
        );
        Ok(Self::new(sources, Arc::new(reputation), timeout))
    }

    pub fn with_source(mut self, source: Arc<dyn SignalSource>) -> Self {
        self.sources.push(source);
        self
    }

    pub async fn analyze_domain(&self, raw: &str) -> Result<Assessment, AnalysisError> {
        let subject = validation::validate_domain(raw)?;
        self.analyze(subject).await
    }

    pub async fn analyze_qr(&self, raw: &str) -> Result<Assessment, AnalysisError> {
        let subject = validation::validate_qr_payload(raw)?;
        self.analyze(subject).await
    }

    pub async fn analyze_profile(&self, platform: &str, handle: &str) -> Result<Assessment, AnalysisError> {
        let subject = validation::validate_profile(platform, handle)?;
        self.analyze(subject).await
    }

    /// Runs collection and evaluation for an already validated subject.
    #[instrument(skip_all, fields(subject = %subject.id()))]
    pub async fn analyze(&self, subject: Subject) -> Result<Assessment, AnalysisError> {
        let category = subject.category();
        let now = Utc::now();

        let Collection { mut record, reports } =
            match self.reputation.lookup_known_subject(&category, subject.id()) {
                Some(record) => {
                    info!("Known subject, skipping live collection.");
                    Collection {
                        record,
                        reports: vec![SourceReport { source: "reputation", status: SourceStatus::Ok }],
                    }
                }
                None => collect(&subject, &self.sources, self.timeout, now).await,
            };
        record.trust.known_good |= self.reputation.is_known_good(&record);

        let Evaluation { score, breakdown, flags, verdict, recommendations } =
            catch_unwind(AssertUnwindSafe(|| engine::evaluate(&record))).map_err(|payload| {
                let detail = panic_message(&*payload);
                error!(detail = %detail, "Evaluation panicked.");
                AnalysisError::Internal { detail }
            })?;

        let (security_score, authenticity_score) = match category {
            Category::Profile { .. } => (None, Some(score)),
            Category::Domain | Category::Qr { .. } => (Some(score), None),
        };

        info!(
            score = score.value(),
            risk_level = %verdict,
            red_flags = flags.red_flags.len(),
            green_flags = flags.green_flags.len(),
            confidence = ?record.confidence,
            "Analysis complete."
        );

        Ok(Assessment {
            subject: subject.id().to_string(),
            category,
            confidence: record.confidence,
            facts: record,
            security_score,
            authenticity_score,
            score_breakdown: breakdown,
            risk_level: verdict,
            red_flags: flags.red_flags,
            green_flags: flags.green_flags,
            recommendations,
            sources: reports,
            analyzed_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_messages_are_extracted() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(&*payload), "boom");
        let payload: Box<dyn Any + Send> = Box::new(String::from("owned boom"));
        assert_eq!(panic_message(&*payload), "owned boom");
        let payload: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(&*payload), "unknown panic");
    }

    #[tokio::test]
    async fn validation_errors_stop_before_collection() {
        let analyzer = Analyzer::new(Vec::new(), Arc::new(AllowList::default()), Duration::from_millis(10));
        let err = analyzer.analyze_profile("myspace", "").await.unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(matches!(err, AnalysisError::Validation(ref v) if v.len() == 2));
    }
}
