//! Display-name derivation for raw model identifiers.
//!
//! Every function here is pure and deterministic: the same raw id always
//! yields the same display name, so re-deriving never drifts.

use crate::council::types::Provider;
use crate::llm::openai::is_reasoning_model;

/// Derive the display name for a raw model id under the given provider's
/// formatting rule.
pub fn display_name(provider: Provider, id: &str) -> String {
    match provider {
        Provider::Anthropic => format_anthropic_model(id),
        Provider::OpenAI => format_openai_model(id),
        Provider::Gemini => format_gemini_model(id),
    }
}

fn format_anthropic_model(id: &str) -> String {
    let expanded = match id.strip_prefix("claude-") {
        Some(rest) => format!("Anthropic Claude {rest}"),
        None => format!("Anthropic {id}"),
    };
    title_case(&expanded.replace('-', " "))
}

fn format_openai_model(id: &str) -> String {
    let expanded = if let Some(rest) = id.strip_prefix("gpt-") {
        format!("OpenAI GPT-{rest}")
    } else if is_reasoning_model(id) {
        let family_len = id.find('-').unwrap_or(id.len());
        let (family, rest) = id.split_at(family_len);
        format!("OpenAI {} {}", family, rest.trim_start_matches('-'))
    } else {
        format!("OpenAI {id}")
    };

    let mut name = expanded;
    for (marker, replacement) in [
        ("turbo", "Turbo"),
        ("preview", "Preview"),
        ("instruct", "Instruct"),
        ("mini", "Mini"),
    ] {
        name = replace_marker(&name, marker, replacement);
    }
    title_case(name.replace('-', " ").trim())
}

fn format_gemini_model(id: &str) -> String {
    let expanded = match id.strip_prefix("gemini-") {
        Some(rest) => format!("Google Gemini {rest}"),
        None => format!("Google {id}"),
    };

    let mut name = expanded;
    for (marker, replacement) in [
        ("pro", "Pro"),
        ("flash", "Flash"),
        ("ultra", "Ultra"),
        ("exp", "(Experimental)"),
    ] {
        name = replace_marker(&name, marker, replacement);
    }
    title_case(&name.replace('-', " "))
}

/// Replace the first case-insensitive occurrence of `marker` (always ASCII).
/// Compared per char with byte offsets tracked in the original string, so
/// ids containing multi-byte characters never skew the slice bounds.
fn replace_marker(s: &str, marker: &str, replacement: &str) -> String {
    for (start, _) in s.char_indices() {
        let mut matched_len = 0;
        let mut candidate = s[start..].chars();
        for mc in marker.chars() {
            match candidate.next() {
                Some(c) if c.to_ascii_lowercase() == mc => matched_len += c.len_utf8(),
                _ => {
                    matched_len = 0;
                    break;
                }
            }
        }
        if matched_len > 0 {
            return format!("{}{}{}", &s[..start], replacement, &s[start + matched_len..]);
        }
    }
    s.to_string()
}

/// Uppercase the first character of every word (a run following whitespace
/// or punctuation), leaving the rest untouched.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for ch in s.chars() {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = !ch.is_alphanumeric();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anthropic_formatting() {
        assert_eq!(
            display_name(Provider::Anthropic, "claude-3-5-haiku-20241022"),
            "Anthropic Claude 3 5 Haiku 20241022"
        );
        assert_eq!(
            display_name(Provider::Anthropic, "claude-sonnet-4-5"),
            "Anthropic Claude Sonnet 4 5"
        );
    }

    #[test]
    fn test_openai_gpt_formatting() {
        assert_eq!(display_name(Provider::OpenAI, "gpt-4o"), "OpenAI GPT 4o");
        assert_eq!(
            display_name(Provider::OpenAI, "gpt-4o-mini"),
            "OpenAI GPT 4o Mini"
        );
        assert_eq!(
            display_name(Provider::OpenAI, "gpt-3.5-turbo"),
            "OpenAI GPT 3.5 Turbo"
        );
    }

    #[test]
    fn test_openai_reasoning_formatting() {
        assert_eq!(display_name(Provider::OpenAI, "o1"), "OpenAI O1");
        assert_eq!(display_name(Provider::OpenAI, "o4-mini"), "OpenAI O4 Mini");
    }

    #[test]
    fn test_gemini_formatting() {
        assert_eq!(
            display_name(Provider::Gemini, "gemini-2.5-flash"),
            "Google Gemini 2.5 Flash"
        );
        assert_eq!(
            display_name(Provider::Gemini, "gemini-1.5-pro"),
            "Google Gemini 1.5 Pro"
        );
        assert_eq!(
            display_name(Provider::Gemini, "gemini-2.0-flash-exp"),
            "Google Gemini 2.0 Flash (Experimental)"
        );
    }

    #[test]
    fn test_formatting_is_deterministic() {
        let cases = [
            (Provider::Anthropic, "claude-3-5-haiku-20241022"),
            (Provider::OpenAI, "gpt-4o-mini"),
            (Provider::OpenAI, "o3-mini"),
            (Provider::Gemini, "gemini-2.0-flash-exp"),
        ];
        for (provider, id) in cases {
            assert_eq!(display_name(provider, id), display_name(provider, id));
        }
    }

    #[test]
    fn test_non_ascii_id_formats_without_panic() {
        // Multi-byte characters whose lowercase form has a different byte
        // length must not skew marker replacement offsets.
        assert_eq!(display_name(Provider::Gemini, "İflash"), "Google İFlash");
        assert_eq!(
            display_name(Provider::OpenAI, "modèle-mini"),
            "OpenAI Modèle Mini"
        );
    }

    #[test]
    fn test_unknown_prefix_still_formats() {
        assert_eq!(
            display_name(Provider::OpenAI, "chatgpt-4o-latest"),
            "OpenAI Chatgpt 4o Latest"
        );
    }
}
