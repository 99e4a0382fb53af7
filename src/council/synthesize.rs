//! Second-pass synthesis: ask one backend to reconcile the first-pass
//! answers. Synthesis can only degrade, never fail the request or touch
//! the per-model results it reads from.

use tracing::{debug, info};

use crate::catalog::naming;
use crate::council::types::{
    AggregateResult, CredentialSet, ModelDescriptor, Provider, QueryResult,
};
use crate::llm::{create_backend, run_query, ModelBackend};

/// Returned when no first-pass result succeeded; no network call is made.
pub const EMPTY_SYNTHESIS: &str = "No valid responses to summarize.";

/// Model used when the caller does not pick one.
pub const DEFAULT_SYNTHESIS_MODEL: &str = "claude-sonnet-4-5-20250929";

/// Meta-prompt embedding each successful answer under its source label.
fn build_synthesis_prompt(question: &str, successes: &[&QueryResult]) -> String {
    let answers = successes
        .iter()
        .map(|r| format!("{}:\n{}\n", r.label, r.response.as_deref().unwrap_or_default()))
        .collect::<Vec<_>>()
        .join("\n---\n");

    format!(
        "You are analyzing responses from different AI models to the question: \"{question}\"\n\n\
         Here are their responses:\n\n\
         {answers}\n\n\
         Please provide a brief integrated summary (2-3 short paragraphs max) that:\n\
         1. Highlights the key consensus and main differences\n\
         2. Notes any standout insights from specific models\n\
         3. Gives a balanced overview\n\n\
         Be concise and focus on the most important points."
    )
}

/// Synthesize through an already-constructed backend. Failures degrade to
/// an explanatory string; the aggregate passed in is never modified.
pub async fn synthesize_with(
    backend: &dyn ModelBackend,
    question: &str,
    results: &AggregateResult,
) -> String {
    let successes: Vec<&QueryResult> = results.iter().filter(|r| r.is_success()).collect();
    if successes.is_empty() {
        debug!("No successful responses; skipping synthesis call");
        return EMPTY_SYNTHESIS.to_string();
    }

    info!(sources = successes.len(), model = %backend.model_id(), "Synthesizing responses");
    let prompt = build_synthesis_prompt(question, &successes);
    let outcome = run_query(backend, &prompt).await;
    match outcome.response {
        Some(text) => text,
        None => format!(
            "Failed to generate summary: {}",
            outcome.error.unwrap_or_else(|| "unknown error".into())
        ),
    }
}

/// Core synthesis operation. Anthropic is the designated synthesis
/// provider; returns `None` when it has no credential.
pub async fn synthesize(
    question: &str,
    results: &AggregateResult,
    credentials: &CredentialSet,
    model: Option<&ModelDescriptor>,
) -> Option<String> {
    let api_key = credentials.get(Provider::Anthropic)?;

    let default_model;
    let model = match model {
        Some(m) => m,
        None => {
            default_model = ModelDescriptor {
                id: DEFAULT_SYNTHESIS_MODEL.to_string(),
                display_name: naming::display_name(Provider::Anthropic, DEFAULT_SYNTHESIS_MODEL),
                description: String::new(),
            };
            &default_model
        }
    };

    let backend = create_backend(Provider::Anthropic, api_key, model);
    Some(synthesize_with(backend.as_ref(), question, results).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CouncilError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingBackend {
        calls: AtomicUsize,
        reply: Result<String, String>,
    }

    impl CountingBackend {
        fn new(reply: Result<String, String>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                reply,
            }
        }
    }

    #[async_trait]
    impl ModelBackend for CountingBackend {
        async fn complete(&self, _prompt: &str) -> Result<String, CouncilError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(msg) => Err(CouncilError::Network(msg.clone())),
            }
        }

        fn provider(&self) -> Provider {
            Provider::Anthropic
        }

        fn model_id(&self) -> &str {
            DEFAULT_SYNTHESIS_MODEL
        }

        fn label(&self) -> &str {
            "Anthropic Claude Sonnet 4 5"
        }
    }

    #[tokio::test]
    async fn test_all_failed_returns_sentinel_without_calling() {
        let backend = CountingBackend::new(Ok("unused".into()));
        let results = vec![
            QueryResult::failure("A", "down"),
            QueryResult::failure("B", "down"),
        ];
        let summary = synthesize_with(&backend, "q", &results).await;
        assert_eq!(summary, EMPTY_SYNTHESIS);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failed_synthesis_degrades_and_preserves_results() {
        let backend = CountingBackend::new(Err("socket closed".into()));
        let results = vec![QueryResult::success("A", "alpha")];
        let before = results.clone();

        let summary = synthesize_with(&backend, "q", &results).await;
        assert!(summary.starts_with("Failed to generate summary:"));
        assert!(summary.contains("socket closed"));
        assert_eq!(results, before);
    }

    #[tokio::test]
    async fn test_successful_synthesis_returns_backend_text() {
        let backend = CountingBackend::new(Ok("Both agree the answer is 4.".into()));
        let results = vec![
            QueryResult::success("OpenAI GPT 4o", "4"),
            QueryResult::failure("Google Gemini 2.5 Pro", "quota"),
            QueryResult::success("Anthropic Claude Sonnet 4 5", "The answer is 4."),
        ];
        let summary = synthesize_with(&backend, "What is 2+2?", &results).await;
        assert_eq!(summary, "Both agree the answer is 4.");
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_prompt_embeds_labels_and_answers_only_for_successes() {
        let ok_a = QueryResult::success("OpenAI GPT 4o", "four");
        let ok_b = QueryResult::success("Google Gemini 2.5 Flash", "it is 4");
        let successes = vec![&ok_a, &ok_b];
        let prompt = build_synthesis_prompt("What is 2+2?", &successes);

        assert!(prompt.contains("What is 2+2?"));
        assert!(prompt.contains("OpenAI GPT 4o:\nfour"));
        assert!(prompt.contains("Google Gemini 2.5 Flash:\nit is 4"));
        assert!(prompt.contains("---"));
    }

    #[tokio::test]
    async fn test_no_anthropic_credential_yields_none() {
        let credentials = CredentialSet::new().with(Provider::OpenAI, "sk-test");
        let results = vec![QueryResult::success("A", "alpha")];
        let summary = synthesize("q", &results, &credentials, None).await;
        assert!(summary.is_none());
    }
}
