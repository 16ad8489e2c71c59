use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lecturelens_common::{logger, AppConfig};
use lecturelens_llm::Summarizer;
use std::path::PathBuf;

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

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    if let Some(env_path) = find_project_root().map(|root| root.join(".env")) {
        if env_path.exists() {
            dotenv::from_path(&env_path).ok();
            return;
        }
    }
    dotenv::dotenv().ok();
}

#[derive(Parser)]
#[command(name = "lecturelens")]
#[command(about = "LectureLens - lecture transcript summarization service", long_about = None)]
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

    /// Summarize a transcript file and print the notes
    Summarize {
        /// Transcript text file ("-" for stdin)
        file: PathBuf,
    },
}

async fn serve(mut config: AppConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server_host = host;
    }
    if let Some(port) = port {
        config.server_port = port;
    }
    config.validate()?;

    logger::setup_logging(&config)?;
    tracing::info!("LectureLens starting...");
    tracing::info!("  Bind: {}", config.server_bind_address());
    tracing::info!("  Gemini model: {}", config.gemini_model);
    tracing::info!("  Hugging Face model: {}", config.huggingface_model);

    lecturelens_server::start_server(config).await?;
    Ok(())
}

async fn summarize_file(config: AppConfig, file: PathBuf) -> Result<()> {
    logger::setup_console_logging(&config.log_level)?;

    let transcript = if file.as_os_str() == "-" {
        std::io::read_to_string(std::io::stdin()).context("Failed to read transcript from stdin")?
    } else {
        tokio::fs::read_to_string(&file)
            .await
            .with_context(|| format!("Failed to read transcript {}", file.display()))?
    };

    let summarizer = Summarizer::from_config(&config)?;
    tracing::info!("Using provider: {}", summarizer.choice().as_str());

    let summary = summarizer.summarize(&transcript).await?;
    println!("{}", summary);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // AppConfig::from_env() loads .env from the working directory as well;
    // the project root copy is loaded first so it takes precedence.
    load_dotenv_from_project_root();
    let config = AppConfig::from_env()?;

    match cli.command {
        Some(Commands::Serve { host, port }) => serve(config, host, port).await,
        Some(Commands::Summarize { file }) => summarize_file(config, file).await,
        None => serve(config, None, None).await,
    }
}
