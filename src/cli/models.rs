use console::style;

use crate::catalog::fetch_all_catalogs;
use crate::cli::commands::ModelsArgs;
use crate::config::credentials_from_env;
use crate::errors::CouncilError;

pub async fn handle_models(args: ModelsArgs) -> Result<(), CouncilError> {
    let credentials = credentials_from_env();
    if credentials.is_empty() {
        return Err(CouncilError::Config(
            "No API keys found. Set ANTHROPIC_API_KEY, OPENAI_API_KEY, and/or GEMINI_API_KEY."
                .into(),
        ));
    }

    let catalog = fetch_all_catalogs(&credentials).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    if catalog.is_empty() {
        println!("No models discovered for any configured provider.");
        return Ok(());
    }

    for (provider, models) in &catalog {
        println!("\n{}", style(provider.display_name()).bold().underlined());
        for model in models {
            if model.description.is_empty() {
                println!("  {}  {}", model.display_name, style(&model.id).dim());
            } else {
                println!(
                    "  {}  {}  {}",
                    model.display_name,
                    style(&model.id).dim(),
                    style(&model.description).dim()
                );
            }
        }
    }

    Ok(())
}
