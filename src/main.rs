use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use pixtral_captions::{batch, config, writer, CaptionerConfig, Platform};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "pixtral-captions", version, about = "Batch image captioning via the Mistral Pixtral vision API")]
struct Cli {
    /// Target platform; selects <platform>-prompt.txt and the response schema
    platform: String,

    /// Directory containing the images to caption
    #[arg(default_value = ".")]
    directory: PathBuf,
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = config::load_env()?;

    tracing_subscriber::fmt()
        .with_max_level(if settings.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let config = CaptionerConfig::new(settings.api_key).log_raw_responses(settings.debug);
    let platform = Platform::new(&cli.platform);
    let client = reqwest::Client::new();

    let results = batch::caption_directory(&client, &config, &cli.directory, &platform).await?;

    let successes = results.values().filter(|r| r.is_success()).count();
    writer::save_captions(&results, &settings.captions_file)?;
    info!(
        "Wrote {} of {} results to {}",
        successes,
        results.len(),
        settings.captions_file.display()
    );

    Ok(())
}
