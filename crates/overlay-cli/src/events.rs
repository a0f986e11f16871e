//! Replay input events (JSON Lines)

use detection_model::DetectionBatch;
use serde::{Deserialize, Serialize};

/// Detector control button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlAction {
    ThresholdUp,
    ThresholdDown,
    MaxResultsUp,
    MaxResultsDown,
    UseCpu,
    UseGpu,
}

/// One line of a replay file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplayEvent {
    /// Detector output for one camera frame
    Frame(DetectionBatch),

    /// Speech recognizer candidates, best first
    Voice { transcripts: Vec<String> },

    /// Detector failure report
    DetectorError {
        gpu: bool,
        #[serde(default)]
        message: String,
    },

    /// Detector control change
    Control { action: ControlAction },
}

impl ReplayEvent {
    /// Parse a single JSON line
    pub fn parse(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }

    pub fn is_frame(&self) -> bool {
        matches!(self, ReplayEvent::Frame(_))
    }
}
