//! Detection Overlay Core
//!
//! Turns raw detector output into display-ready overlay geometry:
//! - Rotation and fit/fill scaling from inference image to viewport
//! - Approximate position of each object (in front, front/behind, left/right)
//! - Monocular distance-from-camera estimate (pinhole model)
//! - Pixel distance between consecutive detections

pub mod config;
pub mod distance;
pub mod mapper;
pub mod position;
pub mod render;

pub use config::CameraParameters;
pub use distance::{estimate_distance_from_camera, euclidean_distance};
pub use mapper::{map, scale_factor, FrameTransform, MappedDetection};
pub use position::{classify, Position};
pub use render::{RenderFrame, RenderInstruction};

use detection_model::{Detection, DetectionBatch, DisplayMode, FrameContext, Rect, UnsupportedRotation, Viewport};
use thiserror::Error;
use tracing::{debug, warn};

/// Overlay error types
///
/// Every variant is frame-local: callers skip the frame (or the single
/// detection) and keep going with the next one.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OverlayError {
    #[error("Invalid rotation: {0} degrees")]
    InvalidRotation(i32),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("Invalid bounding box: {0:?}")]
    InvalidBox(Rect),

    #[error("Degenerate box: pixel height {0}")]
    DegenerateBox(f64),

    #[error("Invalid camera parameter {field}: {value}")]
    InvalidCameraParameters { field: &'static str, value: f64 },
}

impl From<UnsupportedRotation> for OverlayError {
    fn from(err: UnsupportedRotation) -> Self {
        OverlayError::InvalidRotation(err.0)
    }
}

/// Overlay pipeline stage
pub struct OverlayPipeline {
    camera: CameraParameters,
}

impl OverlayPipeline {
    /// Create a pipeline with validated camera parameters
    pub fn new(camera: CameraParameters) -> Result<Self, OverlayError> {
        camera.validate()?;
        Ok(Self { camera })
    }

    /// Turn one frame of detections into render instructions.
    ///
    /// Fails only on frame-wide problems (rotation, dimensions). A detection
    /// with an unusable box is skipped and counted; an object with no pixel
    /// height gets an unknown distance.
    pub fn process_frame(
        &self,
        detections: &[Detection],
        frame: &FrameContext,
    ) -> Result<RenderFrame, OverlayError> {
        let transform = FrameTransform::new(frame)?;
        let viewport = frame.viewport();

        let mut instructions: Vec<RenderInstruction> = Vec::with_capacity(detections.len());
        let mut skipped = 0;

        for detection in detections {
            let mapped = match transform.map_detection(detection) {
                Ok(mapped) => mapped,
                Err(e) => {
                    warn!("Skipping detection '{}': {}", detection.label, e);
                    skipped += 1;
                    continue;
                }
            };

            let position = classify(&mapped.rect, viewport.width, viewport.height);

            let distance_cm = match self
                .camera
                .distance_cm(viewport.height as f64, mapped.rect.height() as f64)
            {
                Ok(distance) => Some(distance),
                Err(e) => {
                    debug!("Distance unknown for '{}': {}", detection.label, e);
                    None
                }
            };

            let center = mapped.rect.center();
            let distance_to_previous = instructions
                .last()
                .map(|prev| euclidean_distance(&prev.mapped.rect.center(), &center));

            instructions.push(RenderInstruction {
                mapped,
                position,
                distance_cm,
                distance_to_previous,
            });
        }

        debug!(
            "Frame mapped: {} instructions, {} skipped, scale {:.3}",
            instructions.len(),
            skipped,
            transform.scale_factor()
        );

        Ok(RenderFrame {
            instructions,
            scale_factor: transform.scale_factor(),
            viewport,
            inference_time_ms: None,
            skipped,
        })
    }

    /// Process a detector batch rendered on `viewport`
    pub fn process_batch(
        &self,
        batch: &DetectionBatch,
        viewport: Viewport,
        display_mode: DisplayMode,
    ) -> Result<RenderFrame, OverlayError> {
        let frame = batch.frame_context(viewport, display_mode);
        let mut rendered = self.process_frame(&batch.detections, &frame)?;
        rendered.inference_time_ms = batch.inference_time_ms;
        Ok(rendered)
    }
}

impl Default for OverlayPipeline {
    fn default() -> Self {
        Self {
            camera: CameraParameters::default(),
        }
    }
}
