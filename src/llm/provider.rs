use async_trait::async_trait;

use crate::council::types::Provider;
use crate::errors::CouncilError;

/// Output-length budget applied to every query.
pub const MAX_OUTPUT_TOKENS: u32 = 1000;

/// One text-generation backend bound to a single provider, model, and
/// credential. Implementations make exactly one outbound network call per
/// `complete` invocation — no retries, no timeouts, no streaming.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Free-form text completion.
    async fn complete(&self, prompt: &str) -> Result<String, CouncilError>;

    fn provider(&self) -> Provider;

    /// Raw model identifier
    fn model_id(&self) -> &str;

    /// Provider-model label carried into query results.
    fn label(&self) -> &str;
}
