use crate::council::types::Provider;

/// Does this raw error text describe a quota or rate-limit condition?
///
/// Operates on the text alone so it can be unit-tested without any
/// transport in the loop. Providers phrase these errors differently;
/// the markers below cover the variants seen in practice.
pub fn is_quota_error(raw: &str) -> bool {
    let lower = raw.to_lowercase();
    lower.contains("quota")
        || lower.contains("billing")
        || lower.contains("rate limit")
        || lower.contains("too many requests")
        || lower.contains("resource_exhausted")
        || lower.contains("429")
}

/// Actionable replacement text for a quota failure, naming an alternate
/// model on the same provider with higher limits.
pub fn quota_remediation(provider: Provider) -> String {
    match provider {
        Provider::Anthropic => {
            "API quota exceeded. Try claude-3-5-haiku-20241022 for higher rate limits, \
             or check your usage limits."
                .to_string()
        }
        Provider::OpenAI => {
            "API quota exceeded. Try gpt-4o-mini for higher rate limits, \
             or check your usage limits."
                .to_string()
        }
        Provider::Gemini => {
            "API quota exceeded. Try gemini-2.5-flash for higher free-tier limits, \
             or check your usage limits."
                .to_string()
        }
    }
}

/// Convert a raw failure message into the text carried on a QueryResult:
/// quota conditions are rewritten into a remediation hint, everything
/// else passes through unchanged.
pub fn describe_failure(provider: Provider, raw: &str) -> String {
    if is_quota_error(raw) {
        quota_remediation(provider)
    } else {
        raw.to_string()
    }
}
