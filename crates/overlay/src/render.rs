//! Render instructions and overlay text

use crate::mapper::MappedDetection;
use crate::position::Position;
use detection_model::Viewport;
use serde::{Deserialize, Serialize};

/// Everything needed to draw one detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderInstruction {
    /// Box, label and score in viewport space
    pub mapped: MappedDetection,

    /// Approximate position on screen
    pub position: Position,

    /// Estimated distance from the camera (cm), `None` when unknown
    pub distance_cm: Option<f64>,

    /// Pixel distance to the previous instruction's center
    pub distance_to_previous: Option<f64>,
}

impl RenderInstruction {
    /// Label line, e.g. `cup 0.87`
    pub fn label_text(&self) -> String {
        format!("{} {:.2}", self.mapped.label, self.mapped.score)
    }

    pub fn position_text(&self) -> String {
        format!("Pos: {}", self.position)
    }

    pub fn distance_text(&self) -> String {
        match self.distance_cm {
            Some(distance) => format!("Dist from Camera: {:.2} cm", distance),
            None => "Dist from Camera: unknown".to_string(),
        }
    }

    pub fn previous_distance_text(&self) -> Option<String> {
        self.distance_to_previous
            .map(|distance| format!("Dist to Prev: {:.2}", distance))
    }

    /// Overlay text lines, top to bottom
    pub fn text_lines(&self) -> Vec<String> {
        let mut lines = vec![self.label_text(), self.position_text(), self.distance_text()];
        if let Some(previous) = self.previous_distance_text() {
            lines.push(previous);
        }
        lines
    }
}

/// Complete overlay for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    /// Instructions in detector order
    pub instructions: Vec<RenderInstruction>,

    /// Source-to-viewport scale used for this frame
    pub scale_factor: f32,

    /// Surface the instructions were computed for
    pub viewport: Viewport,

    /// Detector latency, when reported
    pub inference_time_ms: Option<u64>,

    /// Detections dropped for unusable boxes
    pub skipped: usize,
}

impl RenderFrame {
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Inference time readout, e.g. `12 ms`
    pub fn inference_time_text(&self) -> Option<String> {
        self.inference_time_ms.map(|ms| format!("{} ms", ms))
    }

}
