//! Reputation data the scoring engine consumes but does not own.
//!
//! Known-good allow-lists and any pre-built fact records for known subjects
//! are reached through `ReputationProvider`, so the engine never depends on
//! fixture data directly.

use std::collections::HashSet;

use crate::core::models::{Category, FactRecord, Platform};

/// Read-only reputation data.
pub trait ReputationProvider: Send + Sync {
    /// A complete, pre-built record for a subject the provider already knows.
    /// Returning `Some` skips live collection.
    fn lookup_known_subject(&self, category: &Category, subject_id: &str) -> Option<FactRecord>;

    /// Allow-list membership for a collected record.
    fn is_known_good(&self, record: &FactRecord) -> bool;
}

const DEFAULT_DOMAINS: &[&str] = &[
    "google.com",
    "youtube.com",
    "microsoft.com",
    "apple.com",
    "amazon.com",
    "github.com",
    "wikipedia.org",
    "paypal.com",
    "linkedin.com",
    "facebook.com",
    "instagram.com",
    "mozilla.org",
    "cloudflare.com",
    "gov.uk",
];

const DEFAULT_REGISTRARS: &[&str] = &[
    "markmonitor",
    "csc corporate domains",
    "com laude",
    "safenames",
    "cloudflare",
    "amazon registrar",
];

/// Allow-list backed provider. It knows no fixture records.
#[derive(Debug, Clone)]
pub struct AllowList {
    domains: HashSet<String>,
    registrars: Vec<String>,
    accounts: HashSet<(Platform, String)>,
}

impl Default for AllowList {
    fn default() -> Self {
        Self {
            domains: DEFAULT_DOMAINS.iter().map(|d| d.to_string()).collect(),
            registrars: DEFAULT_REGISTRARS.iter().map(|r| r.to_string()).collect(),
            accounts: HashSet::new(),
        }
    }
}

impl AllowList {
    /// Default lists plus caller-supplied additions.
    ///
    /// Accounts are given as `platform:handle`; entries with an unknown
    /// platform are ignored.
    pub fn with_additions(domains: &[String], registrars: &[String], accounts: &[String]) -> Self {
        let mut list = Self::default();
        list.domains
            .extend(domains.iter().map(|d| d.trim().to_ascii_lowercase()).filter(|d| !d.is_empty()));
        list.registrars
            .extend(registrars.iter().map(|r| r.trim().to_ascii_lowercase()).filter(|r| !r.is_empty()));
        for entry in accounts {
            if let Some((platform, handle)) = entry.split_once(':') {
                if let Ok(platform) = platform.trim().parse::<Platform>() {
                    list.accounts
                        .insert((platform, handle.trim().trim_start_matches('@').to_ascii_lowercase()));
                }
            }
        }
        list
    }

    /// True when `host` is a listed domain or a subdomain of one.
    pub fn contains_domain(&self, host: &str) -> bool {
        let host = host.trim_end_matches('.').to_ascii_lowercase();
        let host = host.strip_prefix("www.").unwrap_or(host.as_str());
        self.domains.iter().any(|known| {
            host == known.as_str()
                || host
                    .strip_suffix(known.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }

    pub fn contains_registrar(&self, registrar: &str) -> bool {
        let registrar = registrar.to_ascii_lowercase();
        self.registrars.iter().any(|known| registrar.contains(known.as_str()))
    }

    pub fn contains_account(&self, platform: Platform, handle: &str) -> bool {
        self.accounts.contains(&(platform, handle.to_ascii_lowercase()))
    }
}

impl ReputationProvider for AllowList {
    fn lookup_known_subject(&self, _category: &Category, _subject_id: &str) -> Option<FactRecord> {
        None
    }

    fn is_known_good(&self, record: &FactRecord) -> bool {
        match record.category {
            Category::Domain => {
                self.contains_domain(&record.subject_id)
                    || record
                        .trust
                        .registrar
                        .as_deref()
                        .is_some_and(|r| self.contains_registrar(r))
            }
            Category::Qr { .. } => record
                .content
                .host
                .as_deref()
                .is_some_and(|host| self.contains_domain(host)),
            Category::Profile { platform } => self.contains_account(platform, &record.subject_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ContentType;

    #[test]
    fn domain_suffix_matches_on_label_boundary() {
        let list = AllowList::default();
        assert!(list.contains_domain("google.com"));
        assert!(list.contains_domain("accounts.google.com"));
        assert!(list.contains_domain("WWW.GitHub.com."));
        assert!(!list.contains_domain("notgoogle.com"));
        assert!(!list.contains_domain("google.com.evil.io"));
    }

    #[test]
    fn registrar_match_is_case_insensitive_substring() {
        let list = AllowList::default();
        assert!(list.contains_registrar("MarkMonitor Inc."));
        assert!(!list.contains_registrar("Cheap Names LLC"));
    }

    #[test]
    fn additions_extend_defaults() {
        let list = AllowList::with_additions(
            &["example.net".into()],
            &["Gandi".into()],
            &["twitter:@NASA".into(), "myspace:tom".into()],
        );
        assert!(list.contains_domain("shop.example.net"));
        assert!(list.contains_registrar("GANDI SAS"));
        assert!(list.contains_account(Platform::Twitter, "nasa"));
        assert!(!list.contains_account(Platform::Other, "tom"));
    }

    #[test]
    fn qr_membership_uses_content_host() {
        let list = AllowList::default();
        let mut record = FactRecord::empty(
            "https://www.paypal.com/signin",
            Category::Qr { content_type: ContentType::Url },
        );
        assert!(!list.is_known_good(&record));
        record.content.host = Some("www.paypal.com".into());
        assert!(list.is_known_good(&record));
    }
}
