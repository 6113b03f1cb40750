mod analyze;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "repscope-cli")]
#[command(about = "Company reputation analysis from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Analyze one company and print the report as JSON
    Analyze(AnalyzeArgs),
}

#[derive(Debug, Args)]
pub(crate) struct AnalyzeArgs {
    /// Company name (required, must not be blank)
    #[arg(long)]
    company: String,

    /// CEO or other leadership name to match in snippets
    #[arg(long)]
    ceo: Option<String>,

    /// Business sector, e.g. technology or aviation
    #[arg(long)]
    sector: Option<String>,

    /// Country of operation
    #[arg(long)]
    country: Option<String>,

    /// JSON file with `articles` and/or `posts` arrays to analyze
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Also fetch news from every provider with a configured API key
    #[arg(long)]
    fetch_news: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = repscope_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    // Logs go to stderr so stdout stays valid JSON.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Analyze(args)) => analyze::run_analyze(&config, &args).await?,
        None => println!("repscope-cli: run `repscope-cli analyze --help` for usage"),
    }

    Ok(())
}
