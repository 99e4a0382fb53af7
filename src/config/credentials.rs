//! Credential sourcing for the CLI and HTTP collaborators. The core never
//! reads the environment; it only accepts an explicit `CredentialSet`.

use tracing::debug;

use crate::council::types::{CredentialSet, Provider};

/// Environment variables checked per provider, in priority order.
pub fn env_vars(provider: Provider) -> &'static [&'static str] {
    match provider {
        Provider::Anthropic => &["ANTHROPIC_API_KEY", "CLAUDE_API_KEY"],
        Provider::OpenAI => &["OPENAI_API_KEY"],
        Provider::Gemini => &["GEMINI_API_KEY", "GOOGLE_API_KEY"],
    }
}

/// Build a credential set from the process environment. Providers with no
/// key set are simply absent.
pub fn credentials_from_env() -> CredentialSet {
    credentials_from_lookup(|var| std::env::var(var).ok())
}

fn credentials_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> CredentialSet {
    let mut credentials = CredentialSet::new();
    for provider in Provider::ALL {
        for var in env_vars(provider) {
            if let Some(key) = lookup(var).filter(|k| !k.trim().is_empty()) {
                debug!(provider = %provider, var, key = %mask_key(&key), "Resolved API key");
                credentials.insert(provider, key);
                break;
            }
        }
    }
    credentials
}

/// Log-safe rendering of an API key: first and last four characters only.
pub fn mask_key(key: &str) -> String {
    if key.len() <= 8 || !key.is_ascii() {
        "[REDACTED]".to_string()
    } else {
        format!("{}…{}", &key[..4], &key[key.len() - 4..])
    }
}
