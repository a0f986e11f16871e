//! Detection Model
//!
//! Value types exchanged between the object detector and the overlay:
//! - Axis-aligned rectangles and points in pixel space
//! - Per-object detections (box, label, score)
//! - Per-frame context (source size, rotation, display mode, viewport)

pub mod detection;
pub mod frame;
pub mod geometry;

pub use detection::{Detection, DetectionBatch};
pub use frame::{DisplayMode, FrameContext, Rotation, UnsupportedRotation, Viewport};
pub use geometry::{Point, Rect};
