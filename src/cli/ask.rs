use std::str::FromStr;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

use crate::catalog::fetch_all_catalogs;
use crate::cli::commands::AskArgs;
use crate::config::credentials_from_env;
use crate::council::dispatch::dispatch;
use crate::council::synthesize::synthesize;
use crate::council::types::{
    AggregateResult, ModelDescriptor, Provider, ProviderCatalog, Selection,
};
use crate::errors::CouncilError;

/// Parse a `provider=model_id` argument.
pub fn parse_selection(arg: &str) -> Result<Selection, CouncilError> {
    let (provider, model_id) = arg.split_once('=').ok_or_else(|| {
        CouncilError::InvalidInput(format!(
            "Expected PROVIDER=MODEL_ID, got '{arg}'"
        ))
    })?;
    if model_id.trim().is_empty() {
        return Err(CouncilError::InvalidInput(format!(
            "Missing model id in '{arg}'"
        )));
    }
    Ok(Selection::new(Provider::from_str(provider.trim())?, model_id.trim()))
}

/// Selections to use when none were given: each available provider's
/// top-ranked model, in catalog order.
fn default_selections(catalog: &ProviderCatalog) -> Vec<Selection> {
    catalog
        .iter()
        .filter_map(|(&provider, models)| {
            models.first().map(|m| Selection::new(provider, m.id.clone()))
        })
        .collect()
}

/// The Anthropic model used for the summary: the selected one if present,
/// otherwise the first from the catalog.
fn synthesis_model<'a>(
    selections: &[Selection],
    catalog: &'a ProviderCatalog,
) -> Option<&'a ModelDescriptor> {
    let anthropic = catalog.get(&Provider::Anthropic)?;
    selections
        .iter()
        .find(|s| s.provider == Provider::Anthropic)
        .and_then(|s| anthropic.iter().find(|m| m.id == s.model_id))
        .or_else(|| anthropic.first())
}

pub async fn handle_ask(args: AskArgs) -> Result<(), CouncilError> {
    let credentials = credentials_from_env();
    if credentials.is_empty() {
        return Err(CouncilError::Config(
            "No API keys found. Set ANTHROPIC_API_KEY, OPENAI_API_KEY, and/or GEMINI_API_KEY."
                .into(),
        ));
    }

    let spinner = start_spinner("Fetching model catalogs…");
    let catalog = fetch_all_catalogs(&credentials).await;
    spinner.finish_and_clear();

    let selections = if args.models.is_empty() {
        default_selections(&catalog)
    } else {
        args.models
            .iter()
            .map(|m| parse_selection(m))
            .collect::<Result<Vec<_>, _>>()?
    };

    let spinner = start_spinner("Querying selected models…");
    let results = dispatch(&args.question, &selections, &catalog, &credentials).await;
    spinner.finish_and_clear();
    let results = results?;

    let summary = if args.summary {
        let spinner = start_spinner("Generating summary…");
        let summary = synthesize(
            &args.question,
            &results,
            &credentials,
            synthesis_model(&selections, &catalog),
        )
        .await;
        spinner.finish_and_clear();
        summary
    } else {
        None
    };

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "results": results,
                "summary": summary,
            }))?
        );
    } else {
        print_results(&args.question, &results, summary.as_deref());
    }

    Ok(())
}

fn start_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner
}

fn print_results(question: &str, results: &AggregateResult, summary: Option<&str>) {
    println!(
        "\n{}\n",
        style(format!("Council results for: \"{question}\"")).cyan().bold()
    );
    println!("{}", "=".repeat(80));

    for (index, result) in results.iter().enumerate() {
        println!("\n{}:", style(&result.label).yellow().bold());
        println!("{}", "-".repeat(40));
        match (&result.response, &result.error) {
            (Some(response), _) => println!("{response}"),
            (None, Some(error)) => println!("{}", style(format!("Error: {error}")).red()),
            (None, None) => {}
        }
        if index < results.len() - 1 {
            println!("\n{}", "=".repeat(80));
        }
    }

    if let Some(summary) = summary {
        println!("\n{}", style("Integrated summary:").magenta().bold());
        println!("{}", "-".repeat(40));
        println!("{}", style(summary).cyan());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection() {
        let selection = parse_selection("openai=gpt-4o").unwrap();
        assert_eq!(selection.provider, Provider::OpenAI);
        assert_eq!(selection.model_id, "gpt-4o");
    }

    #[test]
    fn test_parse_selection_rejects_bad_forms() {
        assert!(parse_selection("gpt-4o").is_err());
        assert!(parse_selection("openai=").is_err());
        assert!(parse_selection("mistral=small").is_err());
    }

    #[test]
    fn test_default_selections_take_top_ranked_model() {
        let mut catalog = ProviderCatalog::new();
        catalog.insert(
            Provider::Gemini,
            vec![
                ModelDescriptor {
                    id: "gemini-2.5-pro".into(),
                    display_name: "Google Gemini 2.5 Pro".into(),
                    description: String::new(),
                },
                ModelDescriptor {
                    id: "gemini-1.5-flash".into(),
                    display_name: "Google Gemini 1.5 Flash".into(),
                    description: String::new(),
                },
            ],
        );
        let selections = default_selections(&catalog);
        assert_eq!(selections, vec![Selection::new(Provider::Gemini, "gemini-2.5-pro")]);
    }

    #[test]
    fn test_synthesis_model_prefers_selected() {
        let mut catalog = ProviderCatalog::new();
        catalog.insert(
            Provider::Anthropic,
            vec![
                ModelDescriptor {
                    id: "claude-sonnet-4-5".into(),
                    display_name: "A".into(),
                    description: String::new(),
                },
                ModelDescriptor {
                    id: "claude-3-5-haiku".into(),
                    display_name: "B".into(),
                    description: String::new(),
                },
            ],
        );
        let selections = vec![Selection::new(Provider::Anthropic, "claude-3-5-haiku")];
        assert_eq!(
            synthesis_model(&selections, &catalog).unwrap().id,
            "claude-3-5-haiku"
        );
        assert_eq!(synthesis_model(&[], &catalog).unwrap().id, "claude-sonnet-4-5");
    }
}
