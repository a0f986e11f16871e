//! Camera parameters for distance estimation

use crate::distance::estimate_distance_from_camera;
use crate::OverlayError;
use serde::{Deserialize, Serialize};

/// Fixed camera and object assumptions used by the distance estimate.
///
/// The estimate is only meaningful when the detected object really is
/// `assumed_real_object_height_cm` tall. Every object class shares the same
/// assumed height, so a 20 cm default makes a person read as much closer
/// than they are. This is a limitation of the model, not a calibration bug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraParameters {
    /// Assumed physical height of any detected object (cm)
    pub assumed_real_object_height_cm: f64,

    /// Lens focal length (mm)
    pub focal_length_mm: f64,

    /// Image sensor height (mm)
    pub sensor_height_mm: f64,
}

impl Default for CameraParameters {
    fn default() -> Self {
        Self {
            assumed_real_object_height_cm: 20.0,
            focal_length_mm: 4.0,
            sensor_height_mm: 4.55,
        }
    }
}

impl CameraParameters {
    /// Create validated camera parameters
    pub fn new(
        assumed_real_object_height_cm: f64,
        focal_length_mm: f64,
        sensor_height_mm: f64,
    ) -> Result<Self, OverlayError> {
        let params = Self {
            assumed_real_object_height_cm,
            focal_length_mm,
            sensor_height_mm,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check that every parameter is finite and strictly positive
    pub fn validate(&self) -> Result<(), OverlayError> {
        let fields = [
            ("assumed_real_object_height_cm", self.assumed_real_object_height_cm),
            ("focal_length_mm", self.focal_length_mm),
            ("sensor_height_mm", self.sensor_height_mm),
        ];
        for (field, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(OverlayError::InvalidCameraParameters { field, value });
            }
        }
        Ok(())
    }

    /// Distance (cm) to an object `object_pixel_height` tall in an image
    /// `image_height_px` tall
    pub fn distance_cm(
        &self,
        image_height_px: f64,
        object_pixel_height: f64,
    ) -> Result<f64, OverlayError> {
        estimate_distance_from_camera(
            self.assumed_real_object_height_cm,
            self.focal_length_mm,
            self.sensor_height_mm,
            image_height_px,
            object_pixel_height,
        )
    }
}
