//! Detector output records

use crate::frame::{DisplayMode, FrameContext, Viewport};
use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// One recognized object in one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Box in inference image pixels
    pub bounding_box: Rect,
    /// Top category name
    pub label: String,
    /// Top category score (0.0 to 1.0)
    pub score: f32,
}

impl Detection {
    pub fn new(bounding_box: Rect, label: impl Into<String>, score: f32) -> Self {
        Self {
            bounding_box,
            label: label.into(),
            score,
        }
    }
}

/// Everything the detector hands over for a single frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionBatch {
    /// Detections in the detector's native output order
    pub detections: Vec<Detection>,
    /// Inference image width (before rotation)
    pub source_width: u32,
    /// Inference image height (before rotation)
    pub source_height: u32,
    /// Rotation reported by the capture pipeline
    #[serde(default)]
    pub rotation_degrees: i32,
    /// Detector latency, when reported
    #[serde(default)]
    pub inference_time_ms: Option<u64>,
    /// OCR text blocks recognized on the same frame
    #[serde(default)]
    pub text_blocks: Vec<String>,
}

impl DetectionBatch {
    /// Frame context for rendering this batch on `viewport`
    pub fn frame_context(&self, viewport: Viewport, display_mode: DisplayMode) -> FrameContext {
        FrameContext {
            source_width: self.source_width,
            source_height: self.source_height,
            rotation_degrees: self.rotation_degrees,
            display_mode,
            viewport_width: viewport.width,
            viewport_height: viewport.height,
        }
    }
}
