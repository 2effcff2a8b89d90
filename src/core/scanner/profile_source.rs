// src/core/scanner/profile_source.rs

use std::path::Path;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::core::error::{CollectionError, SignalResult};
use crate::core::models::{Category, Subject};
use crate::core::scanner::{ProfileFacts, Signal, SignalSource};

/// Serves profile facts supplied by the caller, e.g. exported from a
/// platform page. No platform API is contacted.
pub struct ProfileFactsSource {
    facts: ProfileFacts,
}

impl ProfileFactsSource {
    pub fn new(facts: ProfileFacts) -> Self {
        Self { facts }
    }

    /// Reads a camelCase JSON document such as
    /// `{"ageInDays": 400, "verified": false, "followers": 120, "posts": 30}`.
    pub fn from_path(path: &Path) -> Result<Self, CollectionError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "Could not read profile facts file.");
            CollectionError::Profile(format!("{}: {}", path.display(), e))
        })?;
        let facts = serde_json::from_str(&raw).map_err(|e| {
            warn!(path = %path.display(), error = %e, "Profile facts file is not valid JSON.");
            CollectionError::Profile(format!("{}: {}", path.display(), e))
        })?;
        Ok(Self::new(facts))
    }
}

#[async_trait]
impl SignalSource for ProfileFactsSource {
    fn name(&self) -> &'static str {
        "profile"
    }

    fn supports(&self, category: &Category) -> bool {
        matches!(category, Category::Profile { .. })
    }

    async fn fetch_signal(&self, subject: &Subject) -> SignalResult<Signal> {
        let Subject::Profile { platform, handle } = subject else {
            return Err(CollectionError::Profile("subject is not a profile".to_string()));
        };
        info!(%platform, handle = %handle, "Serving supplied profile facts.");
        Ok(Signal::Profile(self.facts.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Platform;

    #[test]
    fn missing_file_is_a_profile_error() {
        let err = ProfileFactsSource::from_path(Path::new("/nonexistent/profile.json"))
            .err()
            .unwrap();
        assert!(matches!(err, CollectionError::Profile(_)));
    }

    #[tokio::test]
    async fn serves_facts_for_profiles_only() {
        let source = ProfileFactsSource::new(ProfileFacts { followers: 42, ..Default::default() });
        assert!(source.supports(&Category::Profile { platform: Platform::Bluesky }));
        assert!(!source.supports(&Category::Domain));

        let subject = Subject::Profile { platform: Platform::Bluesky, handle: "someone".into() };
        let Signal::Profile(facts) = source.fetch_signal(&subject).await.unwrap() else {
            panic!("expected a profile signal");
        };
        assert_eq!(facts.followers, 42);
    }

    #[test]
    fn facts_document_is_camel_case_with_defaults() {
        let facts: ProfileFacts =
            serde_json::from_str(r#"{"hasProfilePicture": true, "posts": 3}"#).unwrap();
        assert_eq!(facts.has_profile_picture, Some(true));
        assert_eq!(facts.posts, 3);
        assert_eq!(facts.followers, 0);
        assert_eq!(facts.verified, None);
    }
}
