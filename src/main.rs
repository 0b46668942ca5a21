use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};

use caltorss_core::codec;
use caltorss_core::fetch::CalendarFetcher;
use caltorss_core::tracing::{TracingConfig, TracingOutputFormat, init_tracing};
use caltorss_core::{CalToRssConfig, Converter};

#[derive(Parser)]
#[command(name = "caltorss")]
#[command(about = "Turn ICS calendars into RSS feeds")]
struct Cli {
    /// Path to a config file (defaults to ~/.config/caltorss/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a calendar URL into a feed token
    Encode {
        /// Calendar URL
        url: String,
    },
    /// Expand a feed token back into its calendar URL
    Decode {
        /// Token produced by `encode`
        token: String,
    },
    /// Fetch a calendar and print it as RSS
    Convert {
        /// Calendar URL (http, https or webcal)
        url: String,

        /// Channel link to put in the feed (defaults to the calendar URL)
        #[arg(long)]
        link: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    init_tracing(
        TracingConfig::default()
            .with_level(level)
            .with_format(TracingOutputFormat::Compact),
    )?;

    match cli.command {
        Commands::Encode { url } => cmd_encode(&url),
        Commands::Decode { token } => cmd_decode(&token),
        Commands::Convert { url, link } => cmd_convert(cli.config, &url, link).await,
    }
}

fn cmd_encode(url: &str) -> Result<()> {
    println!("{}", codec::encode(url));
    Ok(())
}

fn cmd_decode(token: &str) -> Result<()> {
    let url = codec::decode(token)?;
    println!("{}", url);
    Ok(())
}

async fn cmd_convert(config_path: Option<PathBuf>, url: &str, link: Option<String>) -> Result<()> {
    let config = CalToRssConfig::load(config_path.as_deref())?;
    let fetcher = CalendarFetcher::new(&config.user_agent)?;
    let converter = Converter::new(fetcher, config.timezone()?);

    let link = link.unwrap_or_else(|| url.to_string());
    let xml = converter
        .convert(url, &link, Utc::now())
        .await
        .with_context(|| format!("Failed to convert {}", url))?;

    println!("{}", xml);
    Ok(())
}
