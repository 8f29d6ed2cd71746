use anyhow::Result;
use clap::{Parser, Subcommand};
use prompthub_common::{logger, AppConfig};
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
    if let Some(root) = find_project_root() {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenv::from_path(&env_path).ok();
        }
    } else {
        dotenv::dotenv().ok();
    }
}

#[derive(Parser)]
#[command(name = "prompthub")]
#[command(about = "PromptHub - prompt library and local LLM gateway", long_about = None)]
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

        /// Postgres connection string
        #[arg(long)]
        database_url: Option<String>,

        /// Ollama API base URL
        #[arg(long)]
        ollama_url: Option<String>,
    },

    /// List models known to the Ollama server
    Models,

    /// Check whether the Ollama server answers
    Ping,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    load_dotenv_from_project_root();

    let mut config = AppConfig::from_env()?;

    match cli.command {
        Some(Commands::Serve {
            host,
            port,
            database_url,
            ollama_url,
        }) => {
            // CLI arguments win over the environment
            if let Some(host) = host {
                config.server_host = host;
            }
            if let Some(port) = port {
                config.server_port = port;
            }
            if let Some(database_url) = database_url {
                config.database_url = database_url;
            }
            if let Some(ollama_url) = ollama_url {
                config.ollama_base_url = ollama_url;
            }

            serve(config).await?;
        }
        Some(Commands::Models) => {
            config.validate()?;
            logger::setup_console_logging(&config.log_level)?;

            let client = prompthub_server::ollama_client(&config)?;
            let models = client.list_models().await;
            if models.is_empty() {
                println!("No models reported by {}", config.ollama_base_url);
            }
            for model in models {
                println!("{}", model);
            }
        }
        Some(Commands::Ping) => {
            config.validate()?;
            logger::setup_console_logging(&config.log_level)?;

            let client = prompthub_server::ollama_client(&config)?;
            if client.ping().await {
                println!("{} is reachable", config.ollama_base_url);
            } else {
                println!("{} is unreachable", config.ollama_base_url);
                std::process::exit(1);
            }
        }
        None => serve(config).await?,
    }

    Ok(())
}

async fn serve(config: AppConfig) -> Result<()> {
    config.validate()?;
    logger::setup_logging(&config.log_dir, &config.log_level)?;

    tracing::info!("PromptHub starting...");
    tracing::info!("  Bind: {}", config.server_bind_address());
    tracing::info!("  Ollama: {}", config.ollama_base_url);
    tracing::info!("  Default model: {}", config.default_model);

    println!("Server listening on http://{}", config.server_bind_address());

    prompthub_server::start_server(config).await?;
    Ok(())
}
