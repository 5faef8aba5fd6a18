use super::*;

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(4)).is_err());
    let r = FrameRange::new(FrameIndex(2), FrameIndex(6)).unwrap();
    assert_eq!(r.len_frames(), 4);
    assert!(r.contains(FrameIndex(2)));
    assert!(!r.contains(FrameIndex(6)));
    assert!(FrameRange::new(FrameIndex(3), FrameIndex(3)).unwrap().is_empty());
}

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    assert_eq!(Fps::whole(30).unwrap(), Fps { num: 30, den: 1 });
}

#[test]
fn secs_to_frames_rounds_to_nearest() {
    let fps = Fps::whole(30).unwrap();
    assert_eq!(fps.secs_to_frames_round(5.0), 150);
    assert_eq!(fps.secs_to_frames_round(0.51), 15);
    assert_eq!(fps.secs_to_frames_round(0.49), 15);
    assert_eq!(fps.secs_to_frames_round(-1.0), 0);
    assert_eq!(fps.secs_to_frames_round(f64::NAN), 0);

    let ntsc = Fps::new(30_000, 1001).unwrap();
    assert_eq!(ntsc.secs_to_frames_round(10.0), 300);
}

#[test]
fn canvas_requires_non_zero_dimensions() {
    assert!(Canvas::new(0, 720).is_err());
    assert!(Canvas::new(1280, 0).is_err());
    assert_eq!(Canvas::new(1280, 720).unwrap().width, 1280);
}
