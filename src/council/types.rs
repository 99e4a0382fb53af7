use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CouncilError;

/// A backend service offering text completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Anthropic,
    OpenAI,
    Gemini,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::Anthropic, Provider::OpenAI, Provider::Gemini];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Anthropic => "anthropic",
            Provider::OpenAI => "openai",
            Provider::Gemini => "gemini",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Anthropic => "Anthropic",
            Provider::OpenAI => "OpenAI",
            Provider::Gemini => "Google Gemini",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = CouncilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "anthropic" | "claude" => Ok(Provider::Anthropic),
            "openai" => Ok(Provider::OpenAI),
            "gemini" | "google" => Ok(Provider::Gemini),
            other => Err(CouncilError::InvalidInput(format!(
                "Unknown provider: {other}"
            ))),
        }
    }
}

/// Normalized identity and display metadata for one selectable model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub id: String,
    pub display_name: String,
    pub description: String,
}

/// Discovered models per provider. A provider key is present only when at
/// least one usable model was found; an absent key means "unavailable".
pub type ProviderCatalog = BTreeMap<Provider, Vec<ModelDescriptor>>;

/// One (provider, model) pair picked by the caller for dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub provider: Provider,
    pub model_id: String,
}

impl Selection {
    pub fn new(provider: Provider, model_id: impl Into<String>) -> Self {
        Self {
            provider,
            model_id: model_id.into(),
        }
    }
}

/// Outcome of one adapter query. Exactly one of `response`/`error` is set;
/// the constructors are the only way the core produces these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Provider-model label, e.g. "Anthropic Claude 3 5 Haiku".
    pub label: String,
    pub response: Option<String>,
    pub error: Option<String>,
}

impl QueryResult {
    pub fn success(label: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            response: Some(response.into()),
            error: None,
        }
    }

    pub fn failure(label: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            response: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.response.is_some()
    }
}

/// Per-model outcomes for one request, ordered by the caller's selection
/// order (never by completion order).
pub type AggregateResult = Vec<QueryResult>;

/// Explicit provider-to-secret map. Absence of an entry means that provider
/// is skipped everywhere: catalog, dispatch, and synthesis. The core never
/// reads credentials from the environment itself.
#[derive(Debug, Clone, Default)]
pub struct CredentialSet {
    keys: BTreeMap<Provider, String>,
}

impl CredentialSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, provider: Provider, key: impl Into<String>) {
        self.keys.insert(provider, key.into());
    }

    /// Builder form, mostly for tests.
    pub fn with(mut self, provider: Provider, key: impl Into<String>) -> Self {
        self.insert(provider, key);
        self
    }

    pub fn get(&self, provider: Provider) -> Option<&str> {
        self.keys.get(&provider).map(String::as_str)
    }

    pub fn contains(&self, provider: Provider) -> bool {
        self.keys.contains_key(&provider)
    }

    pub fn providers(&self) -> impl Iterator<Item = Provider> + '_ {
        self.keys.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_tag_round_trip() {
        for provider in Provider::ALL {
            assert_eq!(provider.as_str().parse::<Provider>().unwrap(), provider);
        }
    }

    #[test]
    fn test_provider_aliases() {
        assert_eq!("claude".parse::<Provider>().unwrap(), Provider::Anthropic);
        assert_eq!("google".parse::<Provider>().unwrap(), Provider::Gemini);
        assert!("mistral".parse::<Provider>().is_err());
    }

    #[test]
    fn test_query_result_exactly_one_side_set() {
        let ok = QueryResult::success("label", "text");
        assert!(ok.response.is_some() && ok.error.is_none());

        let err = QueryResult::failure("label", "boom");
        assert!(err.response.is_none() && err.error.is_some());
    }

    #[test]
    fn test_credential_set_absence() {
        let creds = CredentialSet::new().with(Provider::OpenAI, "sk-test");
        assert!(creds.contains(Provider::OpenAI));
        assert!(!creds.contains(Provider::Gemini));
        assert_eq!(creds.providers().collect::<Vec<_>>(), vec![Provider::OpenAI]);
    }

    #[test]
    fn test_catalog_serializes_with_tag_keys() {
        let mut catalog = ProviderCatalog::new();
        catalog.insert(
            Provider::Gemini,
            vec![ModelDescriptor {
                id: "gemini-2.5-flash".into(),
                display_name: "Google Gemini 2.5 Flash".into(),
                description: String::new(),
            }],
        );
        let json = serde_json::to_value(&catalog).unwrap();
        assert!(json.get("gemini").is_some());
        assert!(json.get("anthropic").is_none());
    }
}
