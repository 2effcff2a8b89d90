// src/core/scanner/registration_scanner.rs

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::core::error::{CollectionError, SignalResult};
use crate::core::models::{Category, Subject};
use crate::core::scanner::{RegistrationFacts, Signal, SignalSource};

/// Second-level labels that sit under a country-code TLD as a public suffix.
const CCTLD_SECOND_LEVELS: &[&str] = &["co", "com", "org", "net", "ac", "gov", "edu"];

/// Looks up the registration date and registrar through RDAP.
pub struct RegistrationSource {
    client: reqwest::Client,
    base_url: String,
}

impl RegistrationSource {
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// Reduces a hostname to the name that was actually registered.
///
/// `www.shop.example.co.uk` becomes `example.co.uk`.
pub fn registrable_domain(host: &str) -> String {
    let labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();
    let keep = match labels.as_slice() {
        [.., second, tld]
            if tld.len() == 2 && CCTLD_SECOND_LEVELS.contains(second) && labels.len() >= 3 =>
        {
            3
        }
        _ => 2,
    };
    labels[labels.len().saturating_sub(keep)..].join(".")
}

fn registration_date(body: &Value) -> Option<DateTime<Utc>> {
    body.get("events")?
        .as_array()?
        .iter()
        .find(|event| event.get("eventAction").and_then(Value::as_str) == Some("registration"))
        .and_then(|event| event.get("eventDate")?.as_str())
        .and_then(|date| DateTime::parse_from_rfc3339(date).ok())
        .map(|date| date.with_timezone(&Utc))
}

/// The `fn` entry of a jCard: `["vcard", [["fn", {}, "text", "Name"], ...]]`.
fn vcard_name(entity: &Value) -> Option<String> {
    entity
        .get("vcardArray")?
        .get(1)?
        .as_array()?
        .iter()
        .find(|prop| prop.get(0).and_then(Value::as_str) == Some("fn"))
        .and_then(|prop| prop.get(3)?.as_str())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

fn registrar_name(body: &Value) -> Option<String> {
    body.get("entities")?
        .as_array()?
        .iter()
        .find(|entity| {
            entity
                .get("roles")
                .and_then(Value::as_array)
                .is_some_and(|roles| roles.iter().any(|r| r.as_str() == Some("registrar")))
        })
        .and_then(vcard_name)
}

/// Extracts registration facts from an RDAP domain response.
pub fn parse_rdap(body: &str) -> SignalResult<RegistrationFacts> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| CollectionError::Registration(format!("invalid RDAP response: {}", e)))?;
    Ok(RegistrationFacts {
        registered_at: registration_date(&value),
        registrar: registrar_name(&value),
    })
}

#[async_trait]
impl SignalSource for RegistrationSource {
    fn name(&self) -> &'static str {
        "registration"
    }

    fn supports(&self, category: &Category) -> bool {
        matches!(category, Category::Domain)
    }

    async fn fetch_signal(&self, subject: &Subject) -> SignalResult<Signal> {
        let Subject::Domain(target) = subject else {
            return Err(CollectionError::Registration("subject is not a domain".to_string()));
        };
        let domain = registrable_domain(target);
        let url = format!("{}/domain/{}", self.base_url, domain);
        info!(domain = %domain, "Starting RDAP lookup.");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                error!(url = %url, error = %e, "RDAP request failed.");
                CollectionError::Registration(e.to_string())
            })?;
        let body = response
            .text()
            .await
            .map_err(|e| CollectionError::Registration(e.to_string()))?;

        let facts = parse_rdap(&body)?;
        debug!(?facts, "RDAP lookup finished.");
        Ok(Signal::Registration(facts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RDAP_SAMPLE: &str = r#"{
        "objectClassName": "domain",
        "ldhName": "EXAMPLE.COM",
        "events": [
            {"eventAction": "expiration", "eventDate": "2030-08-13T04:00:00Z"},
            {"eventAction": "registration", "eventDate": "1995-08-14T04:00:00Z"}
        ],
        "entities": [
            {"roles": ["technical"], "vcardArray": ["vcard", [["fn", {}, "text", "Someone"]]]},
            {
                "roles": ["registrar"],
                "vcardArray": ["vcard", [
                    ["version", {}, "text", "4.0"],
                    ["fn", {}, "text", "RESERVED-Internet Assigned Numbers Authority"]
                ]]
            }
        ]
    }"#;

    #[test]
    fn extracts_registration_event_and_registrar() {
        let facts = parse_rdap(RDAP_SAMPLE).unwrap();
        assert_eq!(
            facts.registered_at.map(|d| d.to_rfc3339()),
            Some("1995-08-14T04:00:00+00:00".to_string())
        );
        assert_eq!(
            facts.registrar.as_deref(),
            Some("RESERVED-Internet Assigned Numbers Authority")
        );
    }

    #[test]
    fn missing_sections_are_absent_not_errors() {
        let facts = parse_rdap(r#"{"objectClassName": "domain"}"#).unwrap();
        assert_eq!(facts, RegistrationFacts::default());
    }

    #[test]
    fn malformed_body_is_a_collection_error() {
        assert!(matches!(parse_rdap("<html>"), Err(CollectionError::Registration(_))));
    }

    #[test]
    fn registrable_domain_strips_subdomains() {
        assert_eq!(registrable_domain("www.example.com"), "example.com");
        assert_eq!(registrable_domain("a.b.example.org"), "example.org");
        assert_eq!(registrable_domain("shop.example.co.uk"), "example.co.uk");
        assert_eq!(registrable_domain("example.io"), "example.io");
    }
}
