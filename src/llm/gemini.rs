use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use super::provider::{ModelBackend, MAX_OUTPUT_TOKENS};
use crate::council::types::{ModelDescriptor, Provider};
use crate::errors::CouncilError;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

pub struct GeminiBackend {
    client: Client,
    api_key: String,
    model: String,
    label: String,
    base_url: String,
}

impl GeminiBackend {
    pub fn new(api_key: &str, model: &ModelDescriptor) -> Self {
        Self::with_base_url(api_key, model, GEMINI_API_BASE)
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
impl ModelBackend for GeminiBackend {
    async fn complete(&self, prompt: &str) -> Result<String, CouncilError> {
        let body = json!({
            "contents": [{"role": "user", "parts": [{"text": prompt}]}],
            "generationConfig": {
                "maxOutputTokens": MAX_OUTPUT_TOKENS,
            }
        });

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| CouncilError::Network(format!("Gemini request failed: {}", e)))?;

        let status = resp.status();
        if status.as_u16() == 429 {
            return Err(CouncilError::RateLimit("Gemini rate limit exceeded".into()));
        }
        if status.as_u16() == 401 {
            return Err(CouncilError::Authentication("Invalid Gemini API key".into()));
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| CouncilError::Api(format!("Failed to parse Gemini response: {}", e)))?;

        let content = parse_completion(&data)?;

        debug!(model = %self.model, "Gemini completion");

        Ok(content)
    }

    fn provider(&self) -> Provider {
        Provider::Gemini
    }

    fn model_id(&self) -> &str {
        &self.model
    }

    fn label(&self) -> &str {
        &self.label
    }
}

/// Extract the completion text from a generateContent response body,
/// mapping embedded error payloads to the matching error variant.
fn parse_completion(data: &Value) -> Result<String, CouncilError> {
    if let Some(error) = data.get("error") {
        let msg = error["message"].as_str().unwrap_or("Unknown error");
        if msg.contains("quota") || msg.contains("RESOURCE_EXHAUSTED") {
            return Err(CouncilError::Quota(msg.to_string()));
        }
        return Err(CouncilError::Api(msg.to_string()));
    }

    data["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| CouncilError::Api("No content in Gemini response".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_extracts_candidate_text() {
        let data = json!({"candidates": [{"content": {"parts": [{"text": "2+2 is 4."}]}}]});
        assert_eq!(parse_completion(&data).unwrap(), "2+2 is 4.");
    }

    #[test]
    fn test_parse_resource_exhausted_is_quota() {
        let data = json!({"error": {"code": 429, "status": "RESOURCE_EXHAUSTED", "message": "RESOURCE_EXHAUSTED: limit reached"}});
        assert!(matches!(parse_completion(&data), Err(CouncilError::Quota(_))));
    }

    #[test]
    fn test_parse_plain_error_payload() {
        let data = json!({"error": {"message": "API key not valid"}});
        assert!(matches!(
            parse_completion(&data),
            Err(CouncilError::Api(msg)) if msg == "API key not valid"
        ));
    }

    #[test]
    fn test_parse_blocked_response_without_parts() {
        let data = json!({"candidates": [{"finishReason": "SAFETY"}]});
        assert!(matches!(parse_completion(&data), Err(CouncilError::Api(_))));
    }
}
