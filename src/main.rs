use clap::Parser;
use tracing_subscriber::EnvFilter;

use council::cli::{self, Cli, Commands};
use council::errors::CouncilError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .init();

    let result = match cli.command {
        Commands::Ask(args) => cli::ask::handle_ask(args).await,
        Commands::Models(args) => cli::models::handle_models(args).await,
        Commands::Serve(args) => cli::serve::handle_serve(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let exit_code = match &e {
            CouncilError::Config(_) | CouncilError::InvalidInput(_) => 2,
            CouncilError::NoProviders(_) => 3,
            _ => 1,
        };
        std::process::exit(exit_code);
    }
}
