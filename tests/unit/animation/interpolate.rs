use super::*;

#[test]
fn linear_midpoint() {
    assert_eq!(interpolate(15.0, [0.0, 30.0], [0.0, 1.0], Ease::Linear), 0.5);
    assert_eq!(interpolate(5.0, [0.0, 10.0], [100.0, 0.0], Ease::Linear), 50.0);
}

#[test]
fn holds_at_boundaries() {
    assert_eq!(interpolate(-10.0, [0.0, 30.0], [1.5, 1.0], Ease::Linear), 1.5);
    assert_eq!(interpolate(30.0, [0.0, 30.0], [1.5, 1.0], Ease::Linear), 1.0);
    assert_eq!(interpolate(900.0, [0.0, 30.0], [1.5, 1.0], Ease::Linear), 1.0);
}

#[test]
fn eased_output_stays_inside_range() {
    for f in -5..40 {
        let v = interpolate(f64::from(f), [0.0, 30.0], [0.0, 1.0], Ease::InOutCubic);
        assert!((0.0..=1.0).contains(&v), "frame {f} produced {v}");
    }
}

#[test]
fn degenerate_window_returns_end_value() {
    assert_eq!(interpolate(0.0, [0.0, 0.0], [0.0, 1.0], Ease::Linear), 1.0);
    assert_eq!(interpolate(3.0, [5.0, 2.0], [7.0, 9.0], Ease::Linear), 9.0);
}
