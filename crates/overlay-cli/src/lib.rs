//! Overlay Replay
//!
//! Host for the overlay core: reads recorded detector output and voice
//! events, drives the detection session, and renders the latest overlay.

pub mod config;
pub mod events;
pub mod replay;

pub use config::{load_config, OverlayConfig};
pub use events::{ControlAction, ReplayEvent};
pub use replay::{run_replay, EventOutcome, OutputFormat, OverlaySnapshot, ReplayStats, Replayer};

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Initialize logging on stderr, keeping stdout for overlay output
pub fn init_logging(verbose: bool, json: bool) -> anyhow::Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}
