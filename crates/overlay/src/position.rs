//! Approximate object position relative to the viewer

use detection_model::Rect;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fraction of the box size added to the viewport center for the in-front test
pub const IN_FRONT_TOLERANCE: f32 = 0.1;

/// Coarse direction of an object as seen on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    InFront,
    FrontLeft,
    FrontRight,
    BehindLeft,
    BehindRight,
}

impl Position {
    /// Overlay label
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::InFront => "In-Front",
            Position::FrontLeft => "Front-Left",
            Position::FrontRight => "Front-Right",
            Position::BehindLeft => "Behind-Left",
            Position::BehindRight => "Behind-Right",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a viewport-space box.
///
/// The in-front test only bounds the center from below-right: any box whose
/// center sits up and to the left of `viewport center + 10% of box size`
/// counts as in front. Viewport halves use integer division.
pub fn classify(rect: &Rect, viewport_width: u32, viewport_height: u32) -> Position {
    let half_w = (viewport_width / 2) as f32;
    let half_h = (viewport_height / 2) as f32;

    let center = rect.center();
    let tolerance_x = rect.width() * IN_FRONT_TOLERANCE;
    let tolerance_y = rect.height() * IN_FRONT_TOLERANCE;

    if center.x < half_w + tolerance_x && center.y < half_h + tolerance_y {
        return Position::InFront;
    }

    let is_top_half = rect.top < half_h;
    let is_left_half = rect.left < half_w;

    match (is_top_half, is_left_half) {
        (true, true) => Position::FrontLeft,
        (true, false) => Position::FrontRight,
        (false, true) => Position::BehindLeft,
        (false, false) => Position::BehindRight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_box_in_front() {
        // Center (400, 300), tolerance (10, 10)
        let rect = Rect::new(350.0, 250.0, 450.0, 350.0);
        assert_eq!(classify(&rect, 800, 600), Position::InFront);
    }

    #[test]
    fn test_front_right() {
        let rect = Rect::new(600.0, 100.0, 700.0, 200.0);
        assert_eq!(classify(&rect, 800, 600), Position::FrontRight);
    }

    #[test]
    fn test_quadrants() {
        // Center right of the band, top edge in the top half
        assert_eq!(classify(&Rect::new(300.0, 100.0, 700.0, 200.0), 800, 600), Position::FrontLeft);
        // Center below the band
        assert_eq!(classify(&Rect::new(100.0, 400.0, 200.0, 500.0), 800, 600), Position::BehindLeft);
        assert_eq!(classify(&Rect::new(500.0, 400.0, 600.0, 500.0), 800, 600), Position::BehindRight);
    }

    #[test]
    fn test_upper_left_corner_counts_as_in_front() {
        // One-sided band: a box in the far upper-left is still "in front"
        let rect = Rect::new(0.0, 0.0, 50.0, 50.0);
        assert_eq!(classify(&rect, 800, 600), Position::InFront);
    }

    #[test]
    fn test_tolerance_scales_with_box() {
        // Center x = 420, half width 400: needs tolerance > 20
        let narrow = Rect::new(410.0, 0.0, 430.0, 20.0);
        let wide = Rect::new(210.0, 0.0, 630.0, 20.0);
        assert_eq!(classify(&narrow, 800, 600), Position::FrontRight);
        assert_eq!(classify(&wide, 800, 600), Position::InFront);
    }

    #[test]
    fn test_odd_viewport_halves_round_down() {
        // 1001 / 2 == 500, so left edge 500.2 is in the right half
        let rect = Rect::new(500.2, 400.0, 520.2, 420.0);
        assert_eq!(classify(&rect, 1001, 600), Position::BehindRight);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Position::InFront.to_string(), "In-Front");
        assert_eq!(Position::FrontLeft.to_string(), "Front-Left");
        assert_eq!(Position::FrontRight.to_string(), "Front-Right");
        assert_eq!(Position::BehindLeft.to_string(), "Behind-Left");
        assert_eq!(Position::BehindRight.to_string(), "Behind-Right");
    }
}
