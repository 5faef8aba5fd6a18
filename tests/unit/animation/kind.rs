use super::*;

fn def(kind: &str, direction: Option<&str>, secs: f64) -> AnimationDef {
    AnimationDef {
        kind: kind.to_string(),
        direction: direction.map(str::to_string),
        duration_in_seconds: secs,
        easing: None,
    }
}

#[test]
fn known_kinds_resolve() {
    assert_eq!(
        Animation::from_def(&def("fade-in", None, 1.0)).unwrap(),
        Animation::FadeIn(AnimWindow::linear(1.0))
    );
    assert_eq!(
        Animation::from_def(&def("Zoom-Out", None, 2.0)).unwrap(),
        Animation::ZoomOut(AnimWindow::linear(2.0))
    );
    assert_eq!(
        Animation::from_def(&def("slide-in", Some("left"), 0.5)).unwrap(),
        Animation::SlideIn {
            direction: SlideDirection::Left,
            window: AnimWindow::linear(0.5),
        }
    );
}

#[test]
fn slide_direction_defaults_to_right() {
    for dir in [None, Some("right"), Some("up")] {
        let anim = Animation::from_def(&def("slide-in", dir, 1.0)).unwrap();
        assert!(matches!(
            anim,
            Animation::SlideIn {
                direction: SlideDirection::Right,
                ..
            }
        ));
    }
}

#[test]
fn unknown_kind_is_tolerated_as_none() {
    let anim = Animation::from_def(&def("spin-around", None, 1.0)).unwrap();
    assert_eq!(anim, Animation::None);
    assert!(anim.window().is_none());
}

#[test]
fn non_finite_window_is_rejected() {
    assert!(matches!(
        Animation::from_def(&def("fade-in", None, f64::INFINITY)),
        Err(ReelError::Animation(_))
    ));
}

#[test]
fn negative_window_floors_at_zero() {
    let anim = Animation::from_def(&def("fade-out", None, -2.0)).unwrap();
    assert_eq!(anim.window().unwrap().duration_secs, 0.0);
}

#[test]
fn clamp_to_segment_shortens_long_windows() {
    let anim = Animation::FadeIn(AnimWindow::linear(8.0));
    let (clamped, changed) = anim.clamp_to_segment(3.0);
    assert!(changed);
    assert_eq!(clamped, Animation::FadeIn(AnimWindow::linear(3.0)));

    let (same, changed) = clamped.clamp_to_segment(3.0);
    assert!(!changed);
    assert_eq!(same, clamped);

    assert_eq!(Animation::None.clamp_to_segment(0.0), (Animation::None, false));
}

#[test]
fn serializes_back_to_wire_form() {
    let anim = Animation::SlideIn {
        direction: SlideDirection::Left,
        window: AnimWindow {
            duration_secs: 1.5,
            ease: Ease::OutCubic,
        },
    };
    let v = serde_json::to_value(anim).unwrap();
    assert_eq!(
        v,
        serde_json::json!({
            "type": "slide-in",
            "direction": "left",
            "durationInSeconds": 1.5,
            "easing": "out-cubic"
        })
    );

    let wire: AnimationDef = serde_json::from_value(v).unwrap();
    assert_eq!(Animation::from_def(&wire).unwrap(), anim);
}

#[test]
fn missing_window_length_defaults_to_one_second() {
    let wire: AnimationDef = serde_json::from_str(r#"{"type":"fade-in"}"#).unwrap();
    assert_eq!(wire.duration_in_seconds, 1.0);
}
