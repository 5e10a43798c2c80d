use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tubesum_common::{load_dotenv_files, logger, AppConfig};
use tubesum_server::AppState;

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env.local and .env from project root
///
/// The working directory files are picked up later by `AppConfig::from_env`.
fn load_dotenv_from_project_root() {
    if let Some(root) = find_project_root() {
        load_dotenv_files(&root);
    }
}

#[derive(Parser)]
#[command(name = "tubesum")]
#[command(about = "tubesum - YouTube transcript fetching and Gemini summarization", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the transcript of a video
    Transcribe {
        /// Watch URL, short URL or video id
        youtube_url: String,
    },

    /// Print the summary of a video
    Summarize {
        /// Watch URL, short URL or video id
        youtube_url: String,

        /// Gemini API key (overrides GEMINI_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Gemini model (overrides GEMINI_MODEL)
        #[arg(long)]
        model: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // AppConfig::from_env() loads the working directory .env.local / .env as well
    load_dotenv_from_project_root();

    let mut config = AppConfig::from_env()?;

    match cli.command {
        Some(Commands::Serve { host, port }) => {
            if let Some(host) = host {
                config.server_host = host;
            }
            if let Some(port) = port {
                config.server_port = port;
            }
            config.validate()?;
            serve(config).await?;
        }
        Some(Commands::Transcribe { youtube_url }) => {
            logger::setup_logging(config.log_dir.as_deref(), &config.log_level)?;

            let state = AppState::new(config)?;
            let result = state.workflow.transcribe(&youtube_url).await?;
            println!("{}", result.transcript.text());
        }
        Some(Commands::Summarize {
            youtube_url,
            api_key,
            model,
        }) => {
            logger::setup_logging(config.log_dir.as_deref(), &config.log_level)?;

            let state = AppState::new(config)?;
            let result = state
                .workflow
                .summarize(&youtube_url, api_key.as_deref(), model.as_deref())
                .await?;
            println!("{}", result.summary.text);
        }
        None => serve(config).await?,
    }

    Ok(())
}

async fn serve(config: AppConfig) -> Result<()> {
    logger::setup_logging(config.log_dir.as_deref(), &config.log_level)?;

    tracing::info!("tubesum starting...");
    tracing::info!("Configuration loaded:");
    tracing::info!("  Bind: {}", config.server_bind_address());
    tracing::info!("  Model: {}", config.gemini_model.as_deref().unwrap_or("<per request>"));
    tracing::info!("  API key: {}", if config.gemini_api_key.is_some() { "set" } else { "<per request>" });
    tracing::info!("  Max chunk chars: {}", config.max_chars);
    tracing::info!("  Chunk concurrency: {}", config.chunk_concurrency);

    println!("Server listening on http://{}", config.server_bind_address());

    tubesum_server::start_server(config).await?;
    Ok(())
}
