use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use super::provider::{ModelBackend, MAX_OUTPUT_TOKENS};
use crate::council::types::{ModelDescriptor, Provider};
use crate::errors::CouncilError;

pub const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicBackend {
    client: Client,
    api_key: String,
    model: String,
    label: String,
    base_url: String,
}

impl AnthropicBackend {
    pub fn new(api_key: &str, model: &ModelDescriptor) -> Self {
        Self::with_base_url(api_key, model, ANTHROPIC_API_BASE)
    }

    pub fn with_base_url(api_key: &str, model: &ModelDescriptor, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            model: model.id.clone(),
            label: model.display_name.clone(),
            base_url: base_url.to_string(),
        }
    }
}

#[async_trait]
impl ModelBackend for AnthropicBackend {
    async fn complete(&self, prompt: &str) -> Result<String, CouncilError> {
        let body = json!({
            "model": self.model,
            "max_tokens": MAX_OUTPUT_TOKENS,
            "messages": [{"role": "user", "content": prompt}]
        });

        let resp = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| CouncilError::Network(format!("Anthropic request failed: {}", e)))?;

        let status = resp.status();
        if status.as_u16() == 429 {
            return Err(CouncilError::RateLimit("Anthropic rate limit exceeded".into()));
        }
        if status.as_u16() == 401 {
            return Err(CouncilError::Authentication("Invalid Anthropic API key".into()));
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| CouncilError::Api(format!("Failed to parse Anthropic response: {}", e)))?;

        let content = parse_completion(&data)?;

        debug!(model = %self.model, "Anthropic completion");

        Ok(content)
    }

    fn provider(&self) -> Provider {
        Provider::Anthropic
    }

    fn model_id(&self) -> &str {
        &self.model
    }

    fn label(&self) -> &str {
        &self.label
    }
}

/// Extract the completion text from a messages-API response body, mapping
/// embedded error payloads to the matching error variant.
fn parse_completion(data: &Value) -> Result<String, CouncilError> {
    if let Some(error) = data.get("error") {
        let msg = error["message"].as_str().unwrap_or("Unknown error");
        if msg.contains("quota") || msg.contains("billing") {
            return Err(CouncilError::Quota(msg.to_string()));
        }
        return Err(CouncilError::Api(msg.to_string()));
    }

    data["content"][0]["text"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| CouncilError::Api("No content in Anthropic response".into()))
}
