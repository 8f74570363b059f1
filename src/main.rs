use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use kai::constants;
use kai::gemini::GeminiClient;
use kai::prompts::{INITIAL_BOT_MESSAGE, QUESTIONS};
use kai::{chat, web_server, Analyzer, AnswerSet, KaiError, ModelSettings};

// Define the command-line interface structure using clap
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    gemini: GeminiArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug)]
struct GeminiArgs {
    /// Gemini API key.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    #[arg(long, env = "GEMINI_API_BASE", default_value = constants::DEFAULT_API_BASE, global = true)]
    api_base: String,

    /// Model tried first for the text analysis.
    #[arg(long, env = "KAI_PRIMARY_MODEL", default_value = constants::DEFAULT_PRIMARY_MODEL, global = true)]
    primary_model: String,

    /// Model tried once if the primary model fails.
    #[arg(long, env = "KAI_FALLBACK_MODEL", default_value = constants::DEFAULT_FALLBACK_MODEL, global = true)]
    fallback_model: String,

    #[arg(long, env = "KAI_IMAGE_MODEL", default_value = constants::DEFAULT_IMAGE_MODEL, global = true)]
    image_model: String,
}

impl GeminiArgs {
    fn analyzer(&self) -> Result<Analyzer> {
        // API_KEY is accepted as an older alias.
        let api_key = self
            .api_key
            .clone()
            .or_else(|| std::env::var("API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or(KaiError::MissingApiKey)?;

        let client = GeminiClient::new(&self.api_base, &api_key);
        let models = ModelSettings {
            primary_model: self.primary_model.clone(),
            fallback_model: self.fallback_model.clone(),
            image_model: self.image_model.clone(),
        };
        Ok(Analyzer::from_gemini(&client, &models))
    }
}

// Define the available subcommands
#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print the greeting and the question bank.
    Questions,
    /// Answer the questions in the terminal, then get your analysis.
    Quiz,
    /// Analyse a JSON file holding an array of 24 answers.
    Analyze {
        #[arg(long, help = "Path to a JSON array of answers.")]
        answers: PathBuf,
    },
    /// Regenerate only the illustration for a theme.
    Image {
        #[arg(long)]
        theme: String,
    },
    /// Start the HTTP API.
    Serve {
        #[arg(long, default_value_t = constants::DEFAULT_PORT, help = "Port for the web server.")]
        port: u16,
    },
}

fn print_result(result: &kai::AnalysisResult) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(result).context("Failed to serialize analysis")?
    );
    Ok(())
}

// The main entry point of the application, using tokio's async runtime
#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (for environment variables like API keys)
    dotenvy::dotenv().ok();

    // Reads log level from RUST_LOG environment variable (e.g., RUST_LOG=info,kai=debug)
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!("Kai starting with command: {:?}", cli.command);

    match cli.command {
        Commands::Questions => {
            println!("{}\n", INITIAL_BOT_MESSAGE);
            for (index, question) in QUESTIONS.iter().enumerate() {
                println!("Q{}: {}", index + 1, question);
            }
        }
        Commands::Quiz => {
            let analyzer = cli.gemini.analyzer()?;
            let stdin = std::io::stdin();
            let answers = chat::run_quiz(stdin.lock(), std::io::stdout())
                .context("Quiz session failed")?;
            if let Some(answers) = answers {
                let result = analyzer.produce_analysis(&answers).await?;
                print_result(&result)?;
            }
        }
        Commands::Analyze { answers } => {
            let raw = std::fs::read_to_string(&answers)
                .context(format!("Failed to read answers from {}", answers.display()))?;
            let answers: Vec<String> =
                serde_json::from_str(&raw).context("Answers file must be a JSON array of strings")?;
            let answers = AnswerSet::new(answers)?;

            let result = cli.gemini.analyzer()?.produce_analysis(&answers).await?;
            print_result(&result)?;
        }
        Commands::Image { theme } => {
            let image_url = cli.gemini.analyzer()?.generate_visual_anchor(&theme).await?;
            println!("{}", image_url);
        }
        Commands::Serve { port } => {
            let analyzer = Arc::new(cli.gemini.analyzer()?);
            info!("Starting Kai HTTP API on port {}...", port);

            tokio::select! {
                res = web_server::start_web_server(port, analyzer) => res?,
                _ = tokio::signal::ctrl_c() => info!("Ctrl-C received, shutting down."),
            }
        }
    }

    Ok(())
}
