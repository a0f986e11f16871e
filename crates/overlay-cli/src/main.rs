//! Overlay Replay - Main Entry Point

use anyhow::Context;
use clap::Parser;
use overlay_cli::{init_logging, load_config, run_replay, OutputFormat};
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing::info;

/// Replay recorded detector output through the overlay pipeline
#[derive(Parser, Debug)]
#[command(name = "overlay-replay", version, about)]
struct Args {
    /// JSON Lines event file, `-` for stdin
    #[arg(default_value = "-")]
    input: PathBuf,

    /// TOML configuration file
    #[arg(short, long, env = "FINDOBJECT_CONFIG")]
    config: Option<PathBuf>,

    /// Overlay output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, args.log_json)?;

    info!("=== Overlay Replay v{} ===", env!("CARGO_PKG_VERSION"));

    let config = load_config(args.config.as_deref())?;
    info!(
        "Viewport {}x{}, {:?}, camera {:?}",
        config.viewport.width, config.viewport.height, config.display_mode, config.camera
    );

    let stdout = tokio::io::stdout();
    let stats = if args.input.as_os_str() == "-" {
        let input = BufReader::new(tokio::io::stdin());
        run_replay(&config, input, stdout, args.format).await?.0
    } else {
        let file = tokio::fs::File::open(&args.input)
            .await
            .with_context(|| format!("failed to open {}", args.input.display()))?;
        run_replay(&config, BufReader::new(file), stdout, args.format).await?.0
    };

    if stats.malformed_lines > 0 {
        info!("{} malformed lines were skipped", stats.malformed_lines);
    }
    Ok(())
}
