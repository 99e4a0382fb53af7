pub mod anthropic;
pub mod gemini;
pub mod openai;
pub mod provider;
pub mod router;

pub use provider::{ModelBackend, MAX_OUTPUT_TOKENS};
pub use router::create_backend;

use tracing::warn;

use crate::council::types::QueryResult;
use crate::errors::classification;

/// Run one backend query and fold the outcome into a `QueryResult`.
///
/// This is the isolation boundary: no adapter failure escapes as an error.
/// Quota conditions are rewritten into an actionable message naming an
/// alternate model with higher limits.
pub async fn run_query(backend: &dyn ModelBackend, prompt: &str) -> QueryResult {
    match backend.complete(prompt).await {
        Ok(text) => QueryResult::success(backend.label(), text),
        Err(e) => {
            let raw = e.to_string();
            warn!(provider = %backend.provider(), model = %backend.model_id(), error = %raw, "Query failed");
            QueryResult::failure(
                backend.label(),
                classification::describe_failure(backend.provider(), &raw),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::council::types::Provider;
    use crate::errors::CouncilError;
    use async_trait::async_trait;

    struct StubBackend {
        label: String,
        reply: Result<String, String>,
    }

    #[async_trait]
    impl ModelBackend for StubBackend {
        async fn complete(&self, _prompt: &str) -> Result<String, CouncilError> {
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(msg) => Err(CouncilError::Api(msg.clone())),
            }
        }

        fn provider(&self) -> Provider {
            Provider::Gemini
        }

        fn model_id(&self) -> &str {
            "gemini-2.5-pro"
        }

        fn label(&self) -> &str {
            &self.label
        }
    }

    #[tokio::test]
    async fn test_success_becomes_response() {
        let backend = StubBackend {
            label: "Google Gemini 2.5 Pro".into(),
            reply: Ok("4".into()),
        };
        let result = run_query(&backend, "What is 2+2?").await;
        assert_eq!(result.label, "Google Gemini 2.5 Pro");
        assert_eq!(result.response.as_deref(), Some("4"));
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn test_failure_becomes_error_not_panic() {
        let backend = StubBackend {
            label: "Google Gemini 2.5 Pro".into(),
            reply: Err("connection refused".into()),
        };
        let result = run_query(&backend, "What is 2+2?").await;
        assert!(result.response.is_none());
        assert!(result.error.as_deref().unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_quota_failure_is_rewritten() {
        let backend = StubBackend {
            label: "Google Gemini 2.5 Pro".into(),
            reply: Err("429 quota exceeded for this project".into()),
        };
        let result = run_query(&backend, "What is 2+2?").await;
        let msg = result.error.unwrap();
        assert!(msg.contains("gemini-2.5-flash"), "got: {msg}");
    }
}
