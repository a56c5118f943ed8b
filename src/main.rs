// src/main.rs
mod extractors;
mod linkedin;
mod server;
mod utils;

use clap::Parser;
use linkedin::{FetchConfig, ProfileClient};
use utils::AppError;

/// Command Line Interface for the LinkedIn profile extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// LinkedIn profile URL to fetch and parse
    #[arg(short, long)]
    url: Option<String>,

    /// Raw copy-pasted profile text to parse
    #[arg(short, long)]
    text: Option<String>,

    /// File containing copy-pasted profile text
    #[arg(short, long)]
    file: Option<std::path::PathBuf>,

    /// Run the HTTP API instead of a one-shot extraction
    #[arg(long)]
    serve: bool,

    /// Listen host for --serve
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Listen port for --serve
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// User-Agent header override for profile fetches
    #[arg(long)]
    user_agent: Option<String>,

    /// Per-attempt fetch timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,

    /// Pause between fetch attempts in seconds
    #[arg(long, default_value = "2")]
    retry_delay: u64,

    /// Maximum number of fetch attempts
    #[arg(long, default_value = "3")]
    max_retries: u32,
}

impl Args {
    fn fetch_config(&self) -> FetchConfig {
        let mut config = FetchConfig {
            timeout_secs: self.timeout,
            retry_delay_secs: self.retry_delay,
            max_retries: self.max_retries,
            ..FetchConfig::default()
        };
        if let Some(user_agent) = &self.user_agent {
            config.user_agent = user_agent.clone();
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting with args: {:?}", args);
    let config = args.fetch_config();

    // 3. Server mode
    if args.serve {
        return server::run_server(&args.host, args.port, config).await;
    }

    // 4. One-shot extraction from URL, inline text, or file
    let record = if let Some(url) = &args.url {
        tracing::info!("Scraping LinkedIn profile URL: {}", url);
        let client = ProfileClient::new(config)?;
        client.fetch_and_parse(url).await?
    } else if let Some(text) = &args.text {
        tracing::info!("Parsing LinkedIn profile text ({} bytes)", text.len());
        extractors::parse_profile_text(text)
    } else if let Some(path) = &args.file {
        tracing::info!("Parsing LinkedIn profile text from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        extractors::parse_profile_text(&text)
    } else {
        return Err(AppError::Config(
            "Nothing to do: pass --url, --text, --file, or --serve".to_string(),
        ));
    };

    // 5. Print the structured record and the human-readable summary
    let json = serde_json::to_string_pretty(&record)
        .map_err(|e| AppError::Processing(e.to_string()))?;
    println!("=== LINKEDIN PROFILE DATA ===");
    println!("{}", json);
    println!();
    println!("=== FORMATTED SUMMARY ===");
    println!("{}", extractors::format_profile_summary(&record));

    Ok(())
}
