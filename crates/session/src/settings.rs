//! Detector controls

use crate::SessionError;
use detection_model::Detection;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Threshold step of the up/down controls
pub const THRESHOLD_STEP: f32 = 0.1;

/// Allowed max results range
pub const MAX_RESULTS_RANGE: (u32, u32) = (1, 5);

/// Inference delegate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delegate {
    #[default]
    Cpu,
    Gpu,
}

/// Detector tuning shared with the detection engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorSettings {
    /// Minimum score for a detection to be shown
    pub threshold: f32,

    /// Maximum detections shown per frame
    pub max_results: u32,

    /// Inference delegate
    pub delegate: Delegate,
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            max_results: 3,
            delegate: Delegate::Cpu,
        }
    }
}

/// Round to two decimals so repeated steps do not drift
fn round_hundredths(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

impl DetectorSettings {
    /// Check threshold and max results against their ranges
    pub fn validate(&self) -> Result<(), SessionError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(SessionError::OutOfRange {
                field: "threshold",
                value: self.threshold as f64,
                min: 0.0,
                max: 1.0,
            });
        }
        let (min, max) = MAX_RESULTS_RANGE;
        if !(min..=max).contains(&self.max_results) {
            return Err(SessionError::OutOfRange {
                field: "max_results",
                value: self.max_results as f64,
                min: min as f64,
                max: max as f64,
            });
        }
        Ok(())
    }

    /// Lower the threshold one step; no-op below 0.1
    pub fn threshold_down(&mut self) -> bool {
        if self.threshold >= 0.1 {
            let lowered = round_hundredths(self.threshold - THRESHOLD_STEP);
            self.threshold = if lowered <= 0.0 { 0.0 } else { lowered };
            true
        } else {
            false
        }
    }

    /// Raise the threshold one step; no-op above 0.8
    pub fn threshold_up(&mut self) -> bool {
        if self.threshold <= 0.8 {
            self.threshold = round_hundredths(self.threshold + THRESHOLD_STEP);
            true
        } else {
            false
        }
    }

    pub fn max_results_down(&mut self) -> bool {
        if self.max_results > MAX_RESULTS_RANGE.0 {
            self.max_results -= 1;
            true
        } else {
            false
        }
    }

    pub fn max_results_up(&mut self) -> bool {
        if self.max_results < MAX_RESULTS_RANGE.1 {
            self.max_results += 1;
            true
        } else {
            false
        }
    }

    pub fn set_delegate(&mut self, delegate: Delegate) {
        if self.delegate != delegate {
            info!("Switching delegate to {:?}", delegate);
            self.delegate = delegate;
        }
    }

    /// React to a detector failure. GPU failures fall back to the CPU
    /// delegate; returns whether the delegate changed.
    pub fn on_detector_error(&mut self, gpu_error: bool) -> bool {
        if gpu_error && self.delegate == Delegate::Gpu {
            warn!("GPU delegate failed, falling back to CPU");
            self.delegate = Delegate::Cpu;
            true
        } else {
            false
        }
    }

    /// Threshold readout, e.g. `0.50`
    pub fn threshold_text(&self) -> String {
        format!("{:.2}", self.threshold)
    }

    /// Keep detections scoring at least the threshold, in detector order,
    /// up to `max_results`
    pub fn filter(&self, detections: Vec<Detection>) -> Vec<Detection> {
        detections
            .into_iter()
            .filter(|d| d.score >= self.threshold)
            .take(self.max_results as usize)
            .collect()
    }
}
