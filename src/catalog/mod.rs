//! Model discovery: fetch each provider's model list, filter out
//! non-conversational kinds, normalize names, and order by capability.

pub mod naming;

use std::cmp::Reverse;

use chrono::DateTime;
use futures::future::join_all;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::council::types::{CredentialSet, ModelDescriptor, Provider, ProviderCatalog};
use crate::errors::CouncilError;
use crate::llm::anthropic::{ANTHROPIC_API_BASE, ANTHROPIC_VERSION};
use crate::llm::gemini::GEMINI_API_BASE;
use crate::llm::openai::OPENAI_API_BASE;

/// Identifier substrings marking OpenAI models that cannot hold a chat
/// conversation: embeddings, audio, image, search/similarity variants, and
/// the deprecated text-completion families.
const OPENAI_DENYLIST: &[&str] = &[
    "instruct",
    "edit",
    "embedding",
    "whisper",
    "tts",
    "dall-e",
    "davinci",
    "babbage",
    "ada",
    "search",
    "similarity",
];

/// Fetch and normalize one provider's model list. Never fails: any
/// discovery problem is logged and yields an empty list, which callers
/// treat as "provider unavailable".
pub async fn fetch_catalog(provider: Provider, api_key: &str) -> Vec<ModelDescriptor> {
    let client = Client::new();
    let result = match provider {
        Provider::Anthropic => fetch_anthropic_models(&client, ANTHROPIC_API_BASE, api_key).await,
        Provider::OpenAI => fetch_openai_models(&client, OPENAI_API_BASE, api_key).await,
        Provider::Gemini => fetch_gemini_models(&client, GEMINI_API_BASE, api_key).await,
    };

    match result {
        Ok(models) if !models.is_empty() => {
            debug!(provider = %provider, count = models.len(), "Fetched model catalog");
            models
        }
        Ok(_) => {
            warn!(provider = %provider, "Discovery returned no usable models");
            Vec::new()
        }
        Err(e) => {
            warn!(provider = %provider, error = %e, "Failed to fetch model catalog");
            Vec::new()
        }
    }
}

/// Fetch every credentialed provider's catalog concurrently and merge the
/// non-empty results. One provider's failure never blocks another's
/// delivery; the merge waits for all fetches to settle.
pub async fn fetch_all_catalogs(credentials: &CredentialSet) -> ProviderCatalog {
    let fetches: Vec<_> = Provider::ALL
        .iter()
        .filter_map(|&provider| {
            credentials
                .get(provider)
                .map(|key| async move { (provider, fetch_catalog(provider, key).await) })
        })
        .collect();

    let mut catalog = ProviderCatalog::new();
    for (provider, models) in join_all(fetches).await {
        if !models.is_empty() {
            catalog.insert(provider, models);
        }
    }
    catalog
}

async fn fetch_anthropic_models(
    client: &Client,
    base_url: &str,
    api_key: &str,
) -> Result<Vec<ModelDescriptor>, CouncilError> {
    let resp = client
        .get(format!("{}/v1/models", base_url))
        .header("x-api-key", api_key)
        .header("anthropic-version", ANTHROPIC_VERSION)
        .send()
        .await
        .map_err(|e| CouncilError::Network(format!("Anthropic discovery failed: {}", e)))?;

    if !resp.status().is_success() {
        return Err(CouncilError::Api(format!(
            "Anthropic discovery returned HTTP {}",
            resp.status()
        )));
    }

    let data: Value = resp
        .json()
        .await
        .map_err(|e| CouncilError::Api(format!("Malformed Anthropic model list: {}", e)))?;
    parse_anthropic_models(&data)
}

fn parse_anthropic_models(data: &Value) -> Result<Vec<ModelDescriptor>, CouncilError> {
    let records = data["data"]
        .as_array()
        .ok_or_else(|| CouncilError::Api("No model list in Anthropic response".into()))?;

    let mut models: Vec<(i64, ModelDescriptor)> = Vec::new();
    for record in records {
        let Some(id) = record["id"].as_str() else {
            continue;
        };
        let display_name = record["display_name"]
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| naming::display_name(Provider::Anthropic, id));
        let created = record["created_at"]
            .as_str()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok());
        let description = created
            .map(|t| format!("Created: {}", t.format("%Y-%m-%d")))
            .unwrap_or_default();

        models.push((
            created.map(|t| t.timestamp()).unwrap_or(i64::MIN),
            ModelDescriptor {
                id: id.to_string(),
                display_name,
                description,
            },
        ));
    }

    // Newest first; never arrival order.
    models.sort_by(|a, b| {
        (Reverse(a.0), &a.1.display_name).cmp(&(Reverse(b.0), &b.1.display_name))
    });
    Ok(models.into_iter().map(|(_, m)| m).collect())
}

async fn fetch_openai_models(
    client: &Client,
    base_url: &str,
    api_key: &str,
) -> Result<Vec<ModelDescriptor>, CouncilError> {
    let resp = client
        .get(format!("{}/models", base_url))
        .header("Authorization", format!("Bearer {}", api_key))
        .send()
        .await
        .map_err(|e| CouncilError::Network(format!("OpenAI discovery failed: {}", e)))?;

    if !resp.status().is_success() {
        return Err(CouncilError::Api(format!(
            "OpenAI discovery returned HTTP {}",
            resp.status()
        )));
    }

    let data: Value = resp
        .json()
        .await
        .map_err(|e| CouncilError::Api(format!("Malformed OpenAI model list: {}", e)))?;
    parse_openai_models(&data)
}

fn parse_openai_models(data: &Value) -> Result<Vec<ModelDescriptor>, CouncilError> {
    let records = data["data"]
        .as_array()
        .ok_or_else(|| CouncilError::Api("No model list in OpenAI response".into()))?;

    let mut models: Vec<(u64, ModelDescriptor)> = Vec::new();
    for record in records {
        let Some(id) = record["id"].as_str() else {
            continue;
        };
        if OPENAI_DENYLIST.iter().any(|marker| id.contains(marker)) {
            continue;
        }
        let created = record["created"].as_u64().unwrap_or(0);
        let description = DateTime::from_timestamp(created as i64, 0)
            .map(|t| format!("Created: {}", t.format("%Y-%m-%d")))
            .unwrap_or_default();

        models.push((
            created,
            ModelDescriptor {
                id: id.to_string(),
                display_name: naming::display_name(Provider::OpenAI, id),
                description,
            },
        ));
    }

    models.sort_by(|a, b| {
        (Reverse(a.0), &a.1.display_name).cmp(&(Reverse(b.0), &b.1.display_name))
    });
    Ok(models.into_iter().map(|(_, m)| m).collect())
}

async fn fetch_gemini_models(
    client: &Client,
    base_url: &str,
    api_key: &str,
) -> Result<Vec<ModelDescriptor>, CouncilError> {
    // v1beta lists more models than v1; fall back when it is unavailable.
    let mut resp = client
        .get(format!("{}/v1beta/models?key={}", base_url, api_key))
        .send()
        .await
        .map_err(|e| CouncilError::Network(format!("Gemini discovery failed: {}", e)))?;

    if !resp.status().is_success() {
        resp = client
            .get(format!("{}/v1/models?key={}", base_url, api_key))
            .send()
            .await
            .map_err(|e| CouncilError::Network(format!("Gemini discovery failed: {}", e)))?;
    }

    if !resp.status().is_success() {
        return Err(CouncilError::Api(format!(
            "Gemini discovery returned HTTP {}",
            resp.status()
        )));
    }

    let data: Value = resp
        .json()
        .await
        .map_err(|e| CouncilError::Api(format!("Malformed Gemini model list: {}", e)))?;
    parse_gemini_models(&data)
}

fn parse_gemini_models(data: &Value) -> Result<Vec<ModelDescriptor>, CouncilError> {
    let records = data["models"]
        .as_array()
        .ok_or_else(|| CouncilError::Api("No model list in Gemini response".into()))?;

    let mut models: Vec<ModelDescriptor> = Vec::new();
    for record in records {
        let Some(name) = record["name"].as_str() else {
            continue;
        };
        let supports_generation = record["supportedGenerationMethods"]
            .as_array()
            .is_some_and(|methods| methods.iter().any(|m| m.as_str() == Some("generateContent")));
        if !supports_generation || name.contains("embedding") {
            continue;
        }

        let id = name.strip_prefix("models/").unwrap_or(name).to_string();
        let description = record["description"]
            .as_str()
            .or_else(|| record["displayName"].as_str())
            .unwrap_or_default()
            .to_string();

        models.push(ModelDescriptor {
            display_name: naming::display_name(Provider::Gemini, &id),
            id,
            description,
        });
    }

    models.sort_by(|a, b| gemini_sort_key(a).cmp(&gemini_sort_key(b)));
    Ok(models)
}

/// Capability ordering for Gemini: newer generation first, experimental
/// before stable, "pro" tier before the rest, display name as the final
/// deterministic tie-break.
fn gemini_sort_key(model: &ModelDescriptor) -> (bool, bool, bool, bool, bool, String) {
    let id = model.id.as_str();
    (
        !id.contains("2.5"),
        !id.contains("2.0"),
        !id.contains("exp"),
        !id.contains("1.5"),
        !id.contains("pro"),
        model.display_name.clone(),
    )
}
