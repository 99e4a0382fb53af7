use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "council", version, about = "Compare answers from Anthropic, OpenAI, and Gemini models")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask a question to selected AI models
    Ask(AskArgs),
    /// List the models available for each configured provider
    Models(ModelsArgs),
    /// Start the HTTP API server
    Serve(ServeArgs),
}

#[derive(Args, Clone)]
pub struct AskArgs {
    /// The question to ask
    pub question: String,

    /// Model to query, as PROVIDER=MODEL_ID (repeatable). Defaults to the
    /// top-ranked model of every available provider.
    #[arg(short, long = "model", value_name = "PROVIDER=MODEL_ID")]
    pub models: Vec<String>,

    /// Generate an integrated summary of all responses
    #[arg(short, long)]
    pub summary: bool,

    /// Print results as JSON instead of formatted text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct ModelsArgs {
    /// Print the catalog as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value_t = 3000)]
    pub port: u16,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
}
