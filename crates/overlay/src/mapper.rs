//! Inference image to viewport coordinate mapping

use crate::OverlayError;
use detection_model::{Detection, DisplayMode, FrameContext, Point, Rect, Rotation};
use serde::{Deserialize, Serialize};

/// Detection placed in viewport coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappedDetection {
    /// Box in viewport pixels, `right >= left` and `bottom >= top`
    pub rect: Rect,
    /// Category name from the detection
    pub label: String,
    /// Score from the detection
    pub score: f32,
}

/// Scale from rotated source size to viewport size.
///
/// Images and videos are fitted (whole image visible, may letterbox); live
/// streams fill the viewport (may crop).
pub fn scale_factor(
    display_mode: DisplayMode,
    viewport_width: u32,
    viewport_height: u32,
    rotated_width: u32,
    rotated_height: u32,
) -> f32 {
    let sx = viewport_width as f32 / rotated_width as f32;
    let sy = viewport_height as f32 / rotated_height as f32;
    if display_mode.fills_viewport() {
        sx.max(sy)
    } else {
        sx.min(sy)
    }
}

/// Per-frame transform, computed once and applied to every box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTransform {
    rotation: Rotation,
    source_width: u32,
    source_height: u32,
    rotated_width: u32,
    rotated_height: u32,
    scale: f32,
}

impl FrameTransform {
    /// Build the transform for a frame
    pub fn new(frame: &FrameContext) -> Result<Self, OverlayError> {
        let rotation = frame.rotation()?;

        if frame.source_width == 0 || frame.source_height == 0 {
            return Err(OverlayError::InvalidDimensions(format!(
                "source {}x{}",
                frame.source_width, frame.source_height
            )));
        }
        if frame.viewport_width == 0 || frame.viewport_height == 0 {
            return Err(OverlayError::InvalidDimensions(format!(
                "viewport {}x{}",
                frame.viewport_width, frame.viewport_height
            )));
        }

        let (rotated_width, rotated_height) =
            rotation.rotated_size(frame.source_width, frame.source_height);
        let scale = scale_factor(
            frame.display_mode,
            frame.viewport_width,
            frame.viewport_height,
            rotated_width,
            rotated_height,
        );

        Ok(Self {
            rotation,
            source_width: frame.source_width,
            source_height: frame.source_height,
            rotated_width,
            rotated_height,
            scale,
        })
    }

    /// Source size after rotation
    pub fn rotated_size(&self) -> (u32, u32) {
        (self.rotated_width, self.rotated_height)
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale
    }

    /// Rotate a box about the image center into the upright image, unscaled
    pub fn rotate_rect(&self, rect: &Rect) -> Result<Rect, OverlayError> {
        if !rect.is_well_formed() {
            return Err(OverlayError::InvalidBox(*rect));
        }

        let half_w = self.source_width as f32 / 2.0;
        let half_h = self.source_height as f32 / 2.0;
        let centered = rect.offset(-half_w, -half_h);

        let rotated: Vec<Point> = centered
            .corners()
            .iter()
            .map(|&corner| self.rotation.rotate_point(corner))
            .collect();
        let bounds = Rect::bounding(&rotated).ok_or(OverlayError::InvalidBox(*rect))?;

        // Back to a top-left origin in the rotated image
        Ok(bounds.offset(
            self.rotated_width as f32 / 2.0,
            self.rotated_height as f32 / 2.0,
        ))
    }

    /// Rotate then scale a box into viewport coordinates
    pub fn map_rect(&self, rect: &Rect) -> Result<Rect, OverlayError> {
        Ok(self.rotate_rect(rect)?.scale(self.scale))
    }

    pub fn map_detection(&self, detection: &Detection) -> Result<MappedDetection, OverlayError> {
        Ok(MappedDetection {
            rect: self.map_rect(&detection.bounding_box)?,
            label: detection.label.clone(),
            score: detection.score,
        })
    }
}

/// Map a single detection into viewport coordinates
pub fn map(detection: &Detection, frame: &FrameContext) -> Result<MappedDetection, OverlayError> {
    FrameTransform::new(frame)?.map_detection(detection)
}
