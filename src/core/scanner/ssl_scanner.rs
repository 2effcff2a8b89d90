// src/core/scanner/ssl_scanner.rs

use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use native_tls::TlsConnector;
use tokio::task::spawn_blocking;
use tracing::{debug, error, info};
use x509_parser::prelude::*;

use crate::core::error::{CollectionError, SignalResult};
use crate::core::models::{Category, CertificateFacts, Subject};
use crate::core::scanner::{Signal, SignalSource};

/// Retrieves and parses the leaf certificate served on port 443.
pub struct CertificateSource {
    timeout: Duration,
}

impl CertificateSource {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

enum TlsFailure {
    /// Nothing to retry: the host could not be reached.
    Connect(String),
    /// The handshake failed; a lenient retry may still recover the certificate.
    Handshake(String),
}

impl TlsFailure {
    fn into_message(self) -> String {
        match self {
            TlsFailure::Connect(m) | TlsFailure::Handshake(m) => m,
        }
    }
}

#[async_trait]
impl SignalSource for CertificateSource {
    fn name(&self) -> &'static str {
        "certificate"
    }

    fn supports(&self, category: &Category) -> bool {
        matches!(category, Category::Domain)
    }

    async fn fetch_signal(&self, subject: &Subject) -> SignalResult<Signal> {
        let Subject::Domain(target) = subject else {
            return Err(CollectionError::Tls("subject is not a domain".to_string()));
        };
        info!(host = %target, "Starting certificate inspection.");

        let target_owned = target.clone();
        let timeout = self.timeout;
        debug!("Spawning blocking task for TLS connection.");
        let facts = spawn_blocking(move || inspect_certificate(&target_owned, timeout))
            .await
            .map_err(|e| {
                error!(panic = %e, "Blocking certificate task failed.");
                CollectionError::Task(e.to_string())
            })??;

        info!(found = facts.is_some(), "Certificate inspection finished.");
        Ok(Signal::Certificate(facts))
    }
}

/// Connects, handshakes and returns the DER bytes of the peer certificate.
fn fetch_peer_certificate(
    target: &str,
    timeout: Duration,
    verify: bool,
) -> Result<Option<Vec<u8>>, TlsFailure> {
    let connector = TlsConnector::builder()
        .danger_accept_invalid_certs(!verify)
        .danger_accept_invalid_hostnames(!verify)
        .build()
        .map_err(|e| TlsFailure::Connect(format!("TlsConnector Error: {}", e)))?;

    let addr = (target, 443)
        .to_socket_addrs()
        .map_err(|e| TlsFailure::Connect(format!("Address resolution failed: {}", e)))?
        .next()
        .ok_or_else(|| TlsFailure::Connect(format!("No address found for {}", target)))?;

    debug!(host = target, %addr, "Connecting TCP stream to port 443.");
    let stream = TcpStream::connect_timeout(&addr, timeout)
        .map_err(|e| TlsFailure::Connect(format!("TCP Connection Error: {}", e)))?;
    stream
        .set_read_timeout(Some(timeout))
        .and_then(|_| stream.set_write_timeout(Some(timeout)))
        .map_err(|e| TlsFailure::Connect(format!("Socket configuration failed: {}", e)))?;

    debug!(host = target, verify, "Performing TLS handshake.");
    let stream = connector
        .connect(target, stream)
        .map_err(|e| TlsFailure::Handshake(format!("TLS Handshake Error: {}", e)))?;

    match stream.peer_certificate() {
        Ok(Some(cert)) => cert
            .to_der()
            .map(Some)
            .map_err(|e| TlsFailure::Handshake(format!("Could not convert certificate to DER: {}", e))),
        Ok(None) => Ok(None),
        Err(e) => Err(TlsFailure::Handshake(format!("Could not get peer certificate: {}", e))),
    }
}

fn inspect_certificate(target: &str, timeout: Duration) -> SignalResult<Option<CertificateFacts>> {
    let (der, trusted) = match fetch_peer_certificate(target, timeout, true) {
        Ok(der) => (der, true),
        Err(TlsFailure::Handshake(reason)) => {
            // Retry without verification so an expired or self-signed
            // certificate is still reported, marked as not valid.
            debug!(host = target, reason = %reason, "Verified handshake failed, retrying without verification.");
            let der = fetch_peer_certificate(target, timeout, false)
                .map_err(|f| CollectionError::Tls(f.into_message()))?;
            (der, false)
        }
        Err(failure) => return Err(CollectionError::Tls(failure.into_message())),
    };

    let Some(der) = der else {
        debug!(host = target, "Handshake completed without a peer certificate.");
        return Ok(None);
    };

    let (_, x509) = parse_x509_certificate(&der).map_err(|e| {
        error!(error = %e, "Failed to parse X.509 certificate");
        CollectionError::Tls(format!("X.509 Parse Error: {}", e))
    })?;

    info!(subject = %x509.subject(), issuer = %x509.issuer(), trusted, "Parsed certificate.");

    let validity = x509.validity();
    let not_before = asn1_time_to_chrono_utc(&validity.not_before);
    let not_after = asn1_time_to_chrono_utc(&validity.not_after);

    Ok(Some(certificate_facts(
        trusted,
        x509.subject().to_string(),
        x509.issuer().to_string(),
        not_before,
        not_after,
        Utc::now(),
    )))
}

fn asn1_time_to_chrono_utc(time: &ASN1Time) -> DateTime<Utc> {
    DateTime::from_timestamp(time.timestamp(), 0).unwrap_or_default()
}

fn certificate_facts(
    trusted: bool,
    subject_name: String,
    issuer_name: String,
    not_before: DateTime<Utc>,
    not_after: DateTime<Utc>,
    now: DateTime<Utc>,
) -> CertificateFacts {
    let in_window = now > not_before && now < not_after;
    CertificateFacts {
        valid: trusted && in_window,
        subject_name,
        issuer_name,
        not_after,
        days_until_expiry: not_after.signed_duration_since(now).num_days(),
    }
}
