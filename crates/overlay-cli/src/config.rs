//! Replay configuration

use anyhow::Context;
use detection_model::{DisplayMode, Viewport};
use overlay::CameraParameters;
use serde::{Deserialize, Serialize};
use session::DetectorSettings;
use std::path::Path;

/// Environment variable prefix, e.g. `FINDOBJECT__CAMERA__FOCAL_LENGTH_MM=4.2`
pub const ENV_PREFIX: &str = "FINDOBJECT";

/// Overlay host configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Camera parameters for distance estimates
    pub camera: CameraParameters,

    /// Render surface
    pub viewport: Viewport,

    /// Fit or fill
    pub display_mode: DisplayMode,

    /// Initial detector controls
    pub detector: DetectorSettings,

    /// Pacing between replayed frames (ms), 0 replays as fast as possible
    pub frame_interval_ms: u64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            camera: CameraParameters::default(),
            viewport: Viewport::default(),
            display_mode: DisplayMode::LiveStream,
            detector: DetectorSettings::default(),
            frame_interval_ms: 33,
        }
    }
}

impl OverlayConfig {
    /// Check every section
    pub fn validate(&self) -> anyhow::Result<()> {
        self.camera.validate().context("invalid [camera] section")?;
        self.detector.validate().context("invalid [detector] section")?;
        if self.viewport.width == 0 || self.viewport.height == 0 {
            anyhow::bail!(
                "invalid [viewport] section: {}x{}",
                self.viewport.width,
                self.viewport.height
            );
        }
        Ok(())
    }
}

/// Load configuration: defaults, then the optional file, then environment
pub fn load_config(path: Option<&Path>) -> anyhow::Result<OverlayConfig> {
    let mut builder = config::Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path).required(true));
    }

    builder = builder.add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    );

    let config: OverlayConfig = builder
        .build()
        .context("failed to read configuration")?
        .try_deserialize()
        .context("failed to parse configuration")?;

    config.validate()?;
    Ok(config)
}
