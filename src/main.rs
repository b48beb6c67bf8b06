use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use gemini_image_analyzer::client::{analyze_file, AnalyzeClient};
use gemini_image_analyzer::ui::markdown;
use gemini_image_analyzer::{logging, router, AppState, Config};

#[derive(Parser, Debug)]
#[command(
    name = "gemini-image-analyzer",
    version,
    about = "Describe images with Google Gemini"
)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the web server (default).
    Serve {
        /// Overrides BIND_ADDR.
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Send one image file to a running server and print the analysis.
    Analyze {
        path: PathBuf,
        #[arg(long, default_value = "http://localhost:3000")]
        server: String,
        /// Print the analysis as HTML.
        #[arg(long)]
        html: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    logging::init();

    let args = Args::parse();
    match args.command.unwrap_or(Command::Serve { bind: None }) {
        Command::Serve { bind } => serve(bind).await,
        Command::Analyze { path, server, html } => {
            let client = AnalyzeClient::new(server);
            let analysis = analyze_file(&client, &path).await?;
            if html {
                println!("{}", markdown::render(&analysis));
            } else {
                println!("{}", analysis);
            }
            Ok(())
        }
    }
}

async fn serve(bind: Option<SocketAddr>) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(addr) = bind {
        config.bind_addr = addr;
    }

    let state = AppState::new(config.analyzer());
    let app = router(state, config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    info!(
        addr = %config.bind_addr,
        model = %config.model,
        api_key_configured = config.api_key.is_some(),
        "Server running"
    );

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
