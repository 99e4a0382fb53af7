use super::anthropic::AnthropicBackend;
use super::gemini::GeminiBackend;
use super::openai::OpenAIBackend;
use super::provider::ModelBackend;
use crate::council::types::{ModelDescriptor, Provider};

/// Registry mapping a provider tag to its adapter constructor. All
/// provider-specific wire handling lives behind the returned trait object.
pub fn create_backend(
    provider: Provider,
    api_key: &str,
    model: &ModelDescriptor,
) -> Box<dyn ModelBackend> {
    match provider {
        Provider::Anthropic => Box::new(AnthropicBackend::new(api_key, model)),
        Provider::OpenAI => Box::new(OpenAIBackend::new(api_key, model)),
        Provider::Gemini => Box::new(GeminiBackend::new(api_key, model)),
    }
}
