//! Cogito CLI
//!
//! Command-line interface for the cogito inference service: run the API
//! server, or ask the upstream model a one-off question.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cogito_api::{ApiConfig, ApiServer};
use cogito_core::traits::InferenceProvider;
use cogito_inference::{UpstreamConfig, UpstreamProvider};

/// Cogito - cached reasoning-model inference API
#[derive(Parser)]
#[command(name = "cogito")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: String,
    },

    /// Ask the upstream model a one-off question (no cache, no auth)
    Ask {
        /// The prompt to answer
        prompt: String,
        /// Upstream chat-completions URL
        #[arg(long, env = "COGITO_UPSTREAM_URL")]
        upstream: Option<String>,
        /// Model identifier
        #[arg(long, env = "COGITO_MODEL")]
        model: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "cogito=debug,info"
    } else {
        "cogito=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Serve { port, bind } => cmd_serve(port, &bind).await,
        Commands::Ask {
            prompt,
            upstream,
            model,
        } => cmd_ask(&prompt, upstream, model).await,
    }
}

/// Run the API server
async fn cmd_serve(port: u16, bind: &str) -> Result<()> {
    let config = ApiConfig::from_env();

    if config.auth_key.is_none() {
        anyhow::bail!(
            "COGITO_AUTH_KEY is not set; refusing to serve without authentication"
        );
    }

    let addr: SocketAddr = format!("{bind}:{port}")
        .parse()
        .context("invalid bind address")?;

    println!(
        "{} {}",
        "🚀 Starting cogito API server on".cyan().bold(),
        addr
    );
    println!(
        "   model: {}  cache TTL: {}s",
        config.model,
        config.cache_ttl_seconds
    );

    let server = ApiServer::new(config)?;
    server.run(addr).await?;

    Ok(())
}

/// Ask the upstream model directly
async fn cmd_ask(prompt: &str, upstream: Option<String>, model: Option<String>) -> Result<()> {
    let mut config = UpstreamConfig::default();
    if let Some(url) = upstream {
        config.base_url = url;
    }
    if let Some(model) = model {
        config.model = model;
    }
    config.validate()?;

    let provider = UpstreamProvider::with_config(config);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").expect("valid template"),
    );
    spinner.set_message("Reasoning...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let answer = provider.complete(prompt).await;
    spinner.finish_and_clear();

    match answer {
        Ok(answer) => {
            println!("{}", answer);
            Ok(())
        }
        Err(err) => {
            eprintln!("{} {}", "❌ Inference failed:".red().bold(), err);
            Err(err.into())
        }
    }
}
