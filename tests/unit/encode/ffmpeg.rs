use super::*;

#[test]
fn transparent_pixels_become_background() {
    let src = vec![0u8, 0, 0, 0];
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg(&mut dst, &src, [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, vec![10, 20, 30, 255]);
}

#[test]
fn opaque_pixels_pass_through() {
    let src = vec![1u8, 2, 3, 255];
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg(&mut dst, &src, [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn half_alpha_blends() {
    // 50% white premultiplied over black.
    let src = vec![128u8, 128, 128, 128];
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg(&mut dst, &src, [0, 0, 0, 255]).unwrap();
    assert_eq!(dst, vec![128, 128, 128, 255]);
}

#[test]
fn mismatched_buffers_are_rejected() {
    let mut dst = vec![0u8; 8];
    assert!(flatten_premul_over_bg(&mut dst, &[0u8; 4], [0, 0, 0, 255]).is_err());
}

#[test]
fn odd_dimensions_fail_before_spawning() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(
        std::env::temp_dir().join("scenereel_odd.mp4"),
    ));
    let err = sink
        .begin(SinkConfig {
            width: 3,
            height: 2,
            fps: Fps::whole(30).unwrap(),
            background: [0, 0, 0, 255],
        })
        .unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
}

#[test]
fn ensure_parent_dir_accepts_bare_file_names() {
    ensure_parent_dir(Path::new("out.mp4")).unwrap();
}

#[test]
fn abort_before_begin_leaves_existing_files_alone() {
    let out = std::env::temp_dir().join(format!("scenereel_keep_{}.mp4", std::process::id()));
    std::fs::write(&out, b"not ours").unwrap();

    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&out));
    sink.abort();
    drop(sink);

    assert_eq!(std::fs::read(&out).unwrap(), b"not ours");
    let _ = std::fs::remove_file(&out);
}

#[test]
fn abort_after_frames_removes_partial_output() {
    if !is_ffmpeg_on_path() {
        return;
    }
    let out = std::env::temp_dir().join(format!("scenereel_partial_{}.mp4", std::process::id()));
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&out));
    sink.begin(SinkConfig {
        width: 4,
        height: 4,
        fps: Fps::whole(30).unwrap(),
        background: [0, 0, 0, 255],
    })
    .unwrap();
    let frame = FrameRGBA {
        width: 4,
        height: 4,
        data: vec![255; 4 * 4 * 4],
        premultiplied: true,
    };
    sink.push_frame(FrameIndex(0), &frame).unwrap();

    sink.abort();
    assert!(!out.exists());
    assert!(sink.end().is_err());
}
