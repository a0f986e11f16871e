//! Property tests for the overlay geometry

use detection_model::{DisplayMode, FrameContext, Rect};
use overlay::{classify, estimate_distance_from_camera, scale_factor, FrameTransform, Position};
use proptest::prelude::*;

const EPS: f32 = 1e-2;

fn frame(sw: u32, sh: u32, rotation: i32, mode: DisplayMode, vw: u32, vh: u32) -> FrameContext {
    FrameContext {
        source_width: sw,
        source_height: sh,
        rotation_degrees: rotation,
        display_mode: mode,
        viewport_width: vw,
        viewport_height: vh,
    }
}

fn display_mode() -> impl Strategy<Value = DisplayMode> {
    prop_oneof![
        Just(DisplayMode::StaticImage),
        Just(DisplayMode::Video),
        Just(DisplayMode::LiveStream),
    ]
}

fn rotation() -> impl Strategy<Value = i32> {
    prop_oneof![Just(0), Just(90), Just(180), Just(270)]
}

prop_compose! {
    /// Source size and a box inside it
    fn source_and_box()(sw in 16u32..2000, sh in 16u32..2000)
        (sw in Just(sw), sh in Just(sh),
         l in 0.0..sw as f32, t in 0.0..sh as f32,
         w in 0.0f32..1.0, h in 0.0f32..1.0)
        -> (u32, u32, Rect)
    {
        let right = l + (sw as f32 - l) * w;
        let bottom = t + (sh as f32 - t) * h;
        (sw, sh, Rect::new(l, t, right, bottom))
    }
}

proptest! {
    #[test]
    fn test_zero_rotation_is_pure_scale(
        (sw, sh, rect) in source_and_box(),
        mode in display_mode(),
        vw in 1u32..3000,
        vh in 1u32..3000,
    ) {
        let t = FrameTransform::new(&frame(sw, sh, 0, mode, vw, vh)).unwrap();
        let mapped = t.map_rect(&rect).unwrap();
        let expected = rect.scale(t.scale_factor());
        let tol = EPS * t.scale_factor().max(1.0);
        prop_assert!((mapped.left - expected.left).abs() <= tol);
        prop_assert!((mapped.top - expected.top).abs() <= tol);
        prop_assert!((mapped.right - expected.right).abs() <= tol);
        prop_assert!((mapped.bottom - expected.bottom).abs() <= tol);
    }

    #[test]
    fn test_quarter_turn_then_three_quarter_turn_restores_box(
        (sw, sh, rect) in source_and_box(),
    ) {
        let forward = FrameTransform::new(&frame(sw, sh, 90, DisplayMode::StaticImage, sh, sw)).unwrap();
        let upright = forward.rotate_rect(&rect).unwrap();

        // The rotated image is sh x sw; turning it 270 more lands back at 0
        let back = FrameTransform::new(&frame(sh, sw, 270, DisplayMode::StaticImage, sw, sh)).unwrap();
        let restored = back.rotate_rect(&upright).unwrap();

        prop_assert!((restored.left - rect.left).abs() <= EPS);
        prop_assert!((restored.top - rect.top).abs() <= EPS);
        prop_assert!((restored.right - rect.right).abs() <= EPS);
        prop_assert!((restored.bottom - rect.bottom).abs() <= EPS);
    }

    #[test]
    fn test_mapped_box_is_never_inverted(
        (sw, sh, rect) in source_and_box(),
        rot in rotation(),
        mode in display_mode(),
        vw in 1u32..3000,
        vh in 1u32..3000,
    ) {
        let t = FrameTransform::new(&frame(sw, sh, rot, mode, vw, vh)).unwrap();
        let mapped = t.map_rect(&rect).unwrap();
        prop_assert!(mapped.right >= mapped.left);
        prop_assert!(mapped.bottom >= mapped.top);
        // Size is preserved up to the axis swap
        let (w, h) = if rot == 90 || rot == 270 {
            (rect.height(), rect.width())
        } else {
            (rect.width(), rect.height())
        };
        let tol = EPS * t.scale_factor().max(1.0);
        prop_assert!((mapped.width() - w * t.scale_factor()).abs() <= tol);
        prop_assert!((mapped.height() - h * t.scale_factor()).abs() <= tol);
    }

    #[test]
    fn test_fill_is_max_and_fit_is_min(
        rw in 1u32..4000, rh in 1u32..4000,
        vw in 1u32..4000, vh in 1u32..4000,
    ) {
        let sx = vw as f32 / rw as f32;
        let sy = vh as f32 / rh as f32;
        prop_assert_eq!(scale_factor(DisplayMode::LiveStream, vw, vh, rw, rh), sx.max(sy));
        prop_assert_eq!(scale_factor(DisplayMode::StaticImage, vw, vh, rw, rh), sx.min(sy));
        prop_assert_eq!(scale_factor(DisplayMode::Video, vw, vh, rw, rh), sx.min(sy));
    }

    #[test]
    fn test_larger_viewport_never_shrinks_scale(
        mode in display_mode(),
        rw in 1u32..4000, rh in 1u32..4000,
        vw in 1u32..4000, vh in 1u32..4000,
        grow_w in 0u32..2000, grow_h in 0u32..2000,
    ) {
        let small = scale_factor(mode, vw, vh, rw, rh);
        let large = scale_factor(mode, vw + grow_w, vh + grow_h, rw, rh);
        prop_assert!(large >= small);
    }

    #[test]
    fn test_outside_band_position_matches_quadrant(
        vw in 2u32..4000, vh in 2u32..4000,
        l in 0.0f32..4000.0, t in 0.0f32..4000.0,
        w in 0.0f32..1000.0, h in 0.0f32..1000.0,
    ) {
        let rect = Rect::new(l, t, l + w, t + h);
        let position = classify(&rect, vw, vh);
        let half_w = (vw / 2) as f32;
        let half_h = (vh / 2) as f32;
        let center = rect.center();
        let in_band = center.x < half_w + rect.width() * 0.1
            && center.y < half_h + rect.height() * 0.1;

        if in_band {
            prop_assert_eq!(position, Position::InFront);
        } else {
            let expected = match (rect.top < half_h, rect.left < half_w) {
                (true, true) => Position::FrontLeft,
                (true, false) => Position::FrontRight,
                (false, true) => Position::BehindLeft,
                (false, false) => Position::BehindRight,
            };
            prop_assert_eq!(position, expected);
        }
    }

    #[test]
    fn test_distance_is_finite_and_positive(
        real in 0.1f64..500.0,
        focal in 0.1f64..100.0,
        sensor in 0.1f64..50.0,
        image in 1.0f64..10_000.0,
        pixel in 0.01f64..10_000.0,
    ) {
        let d = estimate_distance_from_camera(real, focal, sensor, image, pixel).unwrap();
        prop_assert!(d.is_finite());
        prop_assert!(d > 0.0);

        // Shrinking the box pushes the object further away
        let further = estimate_distance_from_camera(real, focal, sensor, image, pixel / 2.0).unwrap();
        prop_assert!(further > d);
    }
}
