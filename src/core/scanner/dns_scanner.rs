// src/core/scanner/dns_scanner.rs

use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::TokioAsyncResolver;
use tracing::{debug, info, warn};

use crate::core::error::{CollectionError, SignalResult};
use crate::core::models::{Category, Subject};
use crate::core::scanner::{DnsFacts, Signal, SignalSource};

/// Counts A, MX, NS and TXT records for a domain.
pub struct DnsSource {
    resolver: TokioAsyncResolver,
}

impl DnsSource {
    /// Builds a resolver whose own timeout stays inside the per-source budget.
    pub fn new(timeout: Duration) -> Self {
        let mut opts = ResolverOpts::default();
        opts.timeout = timeout;
        opts.attempts = 1;
        Self {
            resolver: TokioAsyncResolver::tokio(ResolverConfig::default(), opts),
        }
    }
}

/// "No records" is an answer, not a failure.
fn record_count(kind: &str, target: &str, lookup: Result<usize, ResolveError>) -> Result<u32, String> {
    match lookup {
        Ok(count) => {
            debug!(kind, host = target, count, "DNS records found.");
            Ok(u32::try_from(count).unwrap_or(u32::MAX))
        }
        Err(e) if matches!(e.kind(), ResolveErrorKind::NoRecordsFound { .. }) => {
            debug!(kind, host = target, "No DNS records of this type.");
            Ok(0)
        }
        Err(e) => {
            warn!(kind, host = target, error = %e, "DNS lookup failed.");
            Err(format!("{kind}: {e}"))
        }
    }
}

#[async_trait]
impl SignalSource for DnsSource {
    fn name(&self) -> &'static str {
        "dns"
    }

    fn supports(&self, category: &Category) -> bool {
        matches!(category, Category::Domain)
    }

    async fn fetch_signal(&self, subject: &Subject) -> SignalResult<Signal> {
        let Subject::Domain(target) = subject else {
            return Err(CollectionError::Dns("subject is not a domain".to_string()));
        };
        info!(host = %target, "Starting DNS lookups.");

        let (a, mx, ns, txt) = tokio::join!(
            self.resolver.ipv4_lookup(target.as_str()),
            self.resolver.mx_lookup(target.as_str()),
            self.resolver.ns_lookup(target.as_str()),
            self.resolver.txt_lookup(target.as_str()),
        );

        let results = [
            record_count("A", target, a.map(|l| l.iter().count())),
            record_count("MX", target, mx.map(|l| l.iter().count())),
            record_count("NS", target, ns.map(|l| l.iter().count())),
            record_count("TXT", target, txt.map(|l| l.iter().count())),
        ];

        if results.iter().all(Result::is_err) {
            let reasons: Vec<String> = results.into_iter().filter_map(Result::err).collect();
            return Err(CollectionError::Dns(reasons.join("; ")));
        }

        let [a, mx, ns, txt] = results.map(|r| r.unwrap_or(0));
        let facts = DnsFacts {
            a_records: a,
            mx_records: mx,
            ns_records: ns,
            txt_records: txt,
        };
        info!(?facts, "DNS lookups finished.");
        Ok(Signal::Dns(facts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_lookup_counts() {
        assert_eq!(record_count("A", "example.com", Ok(3)), Ok(3));
    }
}
