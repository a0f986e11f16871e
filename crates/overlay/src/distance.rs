//! Monocular distance estimation

use crate::OverlayError;
use detection_model::Point;

/// Distance from the camera (cm) by similar triangles.
///
/// `distance = real_height * focal_length * image_height / (sensor_height * pixel_height)`
/// with the focal length converted from mm to cm. An object with no pixel
/// height has no finite distance and yields [`OverlayError::DegenerateBox`].
pub fn estimate_distance_from_camera(
    real_height_cm: f64,
    focal_length_mm: f64,
    sensor_height_mm: f64,
    image_height_px: f64,
    object_pixel_height: f64,
) -> Result<f64, OverlayError> {
    if !(object_pixel_height.is_finite() && object_pixel_height > 0.0) {
        return Err(OverlayError::DegenerateBox(object_pixel_height));
    }
    if !(image_height_px.is_finite() && image_height_px > 0.0) {
        return Err(OverlayError::InvalidDimensions(format!(
            "image height {} px",
            image_height_px
        )));
    }

    let focal_length_cm = focal_length_mm / 10.0;
    Ok((real_height_cm * focal_length_cm * image_height_px) / (sensor_height_mm * object_pixel_height))
}

/// Straight-line pixel distance between two points
pub fn euclidean_distance(p1: &Point, p2: &Point) -> f64 {
    p1.distance_to(p2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_distance() {
        // 20 * 0.4 * 1000 / (4.55 * 200) = 8000 / 910
        let d = estimate_distance_from_camera(20.0, 4.0, 4.55, 1000.0, 200.0).unwrap();
        assert_relative_eq!(d, 8.791_208_791, epsilon = 1e-6);
        assert_eq!(format!("{:.2}", d), "8.79");
    }

    #[test]
    fn test_halving_pixel_height_doubles_distance() {
        let near = estimate_distance_from_camera(20.0, 4.0, 4.55, 1000.0, 200.0).unwrap();
        let far = estimate_distance_from_camera(20.0, 4.0, 4.55, 1000.0, 100.0).unwrap();
        assert_relative_eq!(far, near * 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_pixel_height_is_degenerate() {
        assert_eq!(
            estimate_distance_from_camera(20.0, 4.0, 4.55, 1000.0, 0.0),
            Err(OverlayError::DegenerateBox(0.0))
        );
        assert!(matches!(
            estimate_distance_from_camera(20.0, 4.0, 4.55, 1000.0, -5.0),
            Err(OverlayError::DegenerateBox(_))
        ));
        assert!(matches!(
            estimate_distance_from_camera(20.0, 4.0, 4.55, 1000.0, f64::NAN),
            Err(OverlayError::DegenerateBox(_))
        ));
    }

    #[test]
    fn test_zero_image_height_is_rejected() {
        assert!(matches!(
            estimate_distance_from_camera(20.0, 4.0, 4.55, 0.0, 100.0),
            Err(OverlayError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_euclidean_distance() {
        let d = euclidean_distance(&Point::new(100.0, 100.0), &Point::new(400.0, 500.0));
        assert_relative_eq!(d, 500.0);
    }
}
