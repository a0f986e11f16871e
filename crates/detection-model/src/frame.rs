//! Per-frame metadata needed to place detections on the display

use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rotation value outside {0, 90, 180, 270}
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Unsupported rotation: {0} degrees")]
pub struct UnsupportedRotation(pub i32);

/// Rotation applied by the capture pipeline, clockwise on a y-down image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Rotation in degrees
    pub fn degrees(&self) -> i32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Whether width and height trade places
    pub fn swaps_axes(&self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }

    /// Rotate a point about the origin.
    ///
    /// Quarter turns are applied exactly, without trigonometry, so 90/270
    /// round trips leave no floating point residue.
    pub fn rotate_point(&self, p: Point) -> Point {
        match self {
            Rotation::Deg0 => p,
            Rotation::Deg90 => Point::new(-p.y, p.x),
            Rotation::Deg180 => Point::new(-p.x, -p.y),
            Rotation::Deg270 => Point::new(p.y, -p.x),
        }
    }

    /// Size of a `width` x `height` image after this rotation
    pub fn rotated_size(&self, width: u32, height: u32) -> (u32, u32) {
        if self.swaps_axes() {
            (height, width)
        } else {
            (width, height)
        }
    }
}

impl TryFrom<i32> for Rotation {
    type Error = UnsupportedRotation;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            other => Err(UnsupportedRotation(other)),
        }
    }
}

impl From<Rotation> for i32 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

/// How the source is shown on the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Still image, shown fitted (letterboxed)
    StaticImage,
    /// Decoded video, shown fitted (letterboxed)
    Video,
    /// Camera preview, shown filling the viewport (cropped)
    #[default]
    LiveStream,
}

impl DisplayMode {
    /// Fill (crop) instead of fit (letterbox)
    pub fn fills_viewport(&self) -> bool {
        matches!(self, DisplayMode::LiveStream)
    }
}

/// Rendering surface size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        // Portrait phone preview at 4:3
        Self {
            width: 1080,
            height: 1440,
        }
    }
}

/// Metadata for one inference result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameContext {
    /// Inference image width (before rotation)
    pub source_width: u32,
    /// Inference image height (before rotation)
    pub source_height: u32,
    /// Raw rotation reported by the capture pipeline
    pub rotation_degrees: i32,
    /// Fit vs. fill selection
    pub display_mode: DisplayMode,
    /// Rendering surface width
    pub viewport_width: u32,
    /// Rendering surface height
    pub viewport_height: u32,
}

impl FrameContext {
    /// Validated rotation
    pub fn rotation(&self) -> Result<Rotation, UnsupportedRotation> {
        Rotation::try_from(self.rotation_degrees)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport_width, self.viewport_height)
    }
}
