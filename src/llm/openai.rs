use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use super::provider::{ModelBackend, MAX_OUTPUT_TOKENS};
use crate::council::types::{ModelDescriptor, Provider};
use crate::errors::CouncilError;

pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Reasoning-family models (o1, o3, o4-mini, ...) reject `max_tokens` and
/// take their output budget as `max_completion_tokens` instead. Purely a
/// function of the model identifier.
pub fn is_reasoning_model(id: &str) -> bool {
    let mut chars = id.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some('o'), Some(c)) if c.is_ascii_digit()
    )
}

pub struct OpenAIBackend {
    client: Client,
    api_key: String,
    model: String,
    label: String,
    base_url: String,
}

impl OpenAIBackend {
    pub fn new(api_key: &str, model: &ModelDescriptor) -> Self {
        Self::with_base_url(api_key, model, OPENAI_API_BASE)
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
impl ModelBackend for OpenAIBackend {
    async fn complete(&self, prompt: &str) -> Result<String, CouncilError> {
        let budget_field = if is_reasoning_model(&self.model) {
            "max_completion_tokens"
        } else {
            "max_tokens"
        };

        let mut body = json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
        });
        body[budget_field] = json!(MAX_OUTPUT_TOKENS);

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| CouncilError::Network(format!("OpenAI request failed: {}", e)))?;

        let status = resp.status();
        if status.as_u16() == 429 {
            return Err(CouncilError::RateLimit("OpenAI rate limit exceeded".into()));
        }
        if status.as_u16() == 401 {
            return Err(CouncilError::Authentication("Invalid OpenAI API key".into()));
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| CouncilError::Api(format!("Failed to parse OpenAI response: {}", e)))?;

        let content = parse_completion(&data)?;

        debug!(model = %self.model, budget_field, "OpenAI completion");

        Ok(content)
    }

    fn provider(&self) -> Provider {
        Provider::OpenAI
    }

    fn model_id(&self) -> &str {
        &self.model
    }

    fn label(&self) -> &str {
        &self.label
    }
}

/// Extract the completion text from a chat-completions response body,
/// mapping embedded error payloads to the matching error variant.
fn parse_completion(data: &Value) -> Result<String, CouncilError> {
    if let Some(error) = data.get("error") {
        let msg = error["message"].as_str().unwrap_or("Unknown error");
        if msg.contains("quota") || msg.contains("billing") {
            return Err(CouncilError::Quota(msg.to_string()));
        }
        return Err(CouncilError::Api(msg.to_string()));
    }

    data["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| CouncilError::Api("No content in OpenAI response".into()))
}
