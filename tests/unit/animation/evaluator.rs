use super::*;
use crate::animation::ease::Ease;

fn fps30() -> Fps {
    Fps::whole(30).unwrap()
}

#[test]
fn fade_in_over_one_second() {
    let anim = Animation::FadeIn(AnimWindow::linear(1.0));
    let at = |f| evaluate(FrameIndex(f), Some(&anim), fps30()).opacity.unwrap();
    assert_eq!(at(0), 0.0);
    assert_eq!(at(15), 0.5);
    assert_eq!(at(30), 1.0);
    assert_eq!(at(31), 1.0);
    assert_eq!(at(10_000), 1.0);
}

#[test]
fn fade_out_runs_backwards() {
    let anim = Animation::FadeOut(AnimWindow::linear(2.0));
    let at = |f| evaluate(FrameIndex(f), Some(&anim), fps30()).opacity.unwrap();
    assert_eq!(at(0), 1.0);
    assert_eq!(at(30), 0.5);
    assert_eq!(at(60), 0.0);
    assert_eq!(at(61), 0.0);
}

#[test]
fn zoom_in_scales_uniformly_down_to_one() {
    let anim = Animation::ZoomIn(AnimWindow::linear(1.0));
    let p0 = evaluate(FrameIndex(0), Some(&anim), fps30());
    assert_eq!(p0.scale_x, Some(1.5));
    assert_eq!(p0.scale_y, Some(1.5));
    assert!(p0.opacity.is_none());

    let end = evaluate(FrameIndex(45), Some(&anim), fps30());
    assert_eq!(end.scale_x, Some(1.0));
    assert_eq!(end.scale_y, Some(1.0));
}

#[test]
fn slide_in_sign_follows_direction() {
    let right = Animation::SlideIn {
        direction: SlideDirection::Right,
        window: AnimWindow::linear(1.0),
    };
    let left = Animation::SlideIn {
        direction: SlideDirection::Left,
        window: AnimWindow::linear(1.0),
    };
    assert_eq!(
        evaluate(FrameIndex(0), Some(&right), fps30()).translate_x_percent,
        Some(100.0)
    );
    assert_eq!(
        evaluate(FrameIndex(0), Some(&left), fps30()).translate_x_percent,
        Some(-100.0)
    );
    assert_eq!(
        evaluate(FrameIndex(15), Some(&left), fps30()).translate_x_percent,
        Some(-50.0)
    );
    assert_eq!(
        evaluate(FrameIndex(99), Some(&left), fps30()).translate_x_percent,
        Some(0.0)
    );
}

#[test]
fn zoom_out_none_and_absent_are_identity_everywhere() {
    let zoom_out = Animation::ZoomOut(AnimWindow::linear(1.0));
    for f in [0u64, 1, 15, 30, 31, 5_000] {
        assert!(evaluate(FrameIndex(f), Some(&zoom_out), fps30()).is_identity());
        assert!(evaluate(FrameIndex(f), Some(&Animation::None), fps30()).is_identity());
        assert!(evaluate(FrameIndex(f), None, fps30()).is_identity());
    }
}

#[test]
fn unknown_wire_kind_evaluates_to_identity() {
    let wire = crate::animation::kind::AnimationDef {
        kind: "wobble".to_string(),
        direction: None,
        duration_in_seconds: 1.0,
        easing: None,
    };
    let anim = Animation::from_def(&wire).unwrap();
    for f in [0u64, 10, 30, 60] {
        assert!(evaluate(FrameIndex(f), Some(&anim), fps30()).is_identity());
    }
}

#[test]
fn zero_length_window_jumps_to_end_value() {
    let anim = Animation::FadeIn(AnimWindow::linear(0.0));
    assert_eq!(
        evaluate(FrameIndex(0), Some(&anim), fps30()).opacity,
        Some(1.0)
    );
}

#[test]
fn eased_curves_stay_bounded() {
    let anim = Animation::ZoomIn(AnimWindow {
        duration_secs: 1.0,
        ease: Ease::InOutCubic,
    });
    for f in 0..90 {
        let s = evaluate(FrameIndex(f), Some(&anim), fps30()).scale_x.unwrap();
        assert!((1.0..=1.5).contains(&s), "frame {f} scale {s}");
    }
}

#[test]
fn evaluation_is_deterministic() {
    let anim = Animation::FadeIn(AnimWindow::linear(1.3));
    for f in 0..60 {
        assert_eq!(
            evaluate(FrameIndex(f), Some(&anim), fps30()),
            evaluate(FrameIndex(f), Some(&anim), fps30())
        );
    }
}

#[test]
fn affine_scales_about_center_then_translates() {
    let patch = VisualPatch {
        scale_x: Some(2.0),
        scale_y: Some(2.0),
        translate_x_percent: Some(50.0),
        ..VisualPatch::identity()
    };
    let center = Vec2::new(100.0, 50.0);
    let a = patch.to_affine(center, 40.0);
    let p = a * kurbo::Point::new(100.0, 50.0);
    assert!((p.x - 120.0).abs() < 1e-9);
    assert!((p.y - 50.0).abs() < 1e-9);

    let q = a * kurbo::Point::new(110.0, 50.0);
    assert!((q.x - 140.0).abs() < 1e-9);

    assert_eq!(VisualPatch::identity().to_affine(center, 40.0), Affine::IDENTITY);
}

#[test]
fn effective_opacity_defaults_to_opaque() {
    assert_eq!(VisualPatch::identity().effective_opacity(), 1.0);
    let p = VisualPatch {
        opacity: Some(0.25),
        ..VisualPatch::identity()
    };
    assert_eq!(p.effective_opacity(), 0.25);
}
