use super::*;

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 2,
        height: 1,
        fps: Fps::whole(30).unwrap(),
        background: [0, 0, 0, 255],
    }
}

fn frame(v: u8) -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 1,
        data: vec![v; 8],
        premultiplied: true,
    }
}

#[test]
fn keeps_frames_in_order() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &frame(1)).unwrap();
    sink.push_frame(FrameIndex(2), &frame(2)).unwrap();
    sink.end().unwrap();

    assert!(sink.is_finished());
    assert_eq!(sink.config().unwrap().width, 2);
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 2]);
}

#[test]
fn rejects_out_of_order_and_unstarted_pushes() {
    let mut sink = InMemorySink::new();
    assert!(sink.push_frame(FrameIndex(0), &frame(0)).is_err());

    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(5), &frame(0)).unwrap();
    assert!(sink.push_frame(FrameIndex(5), &frame(0)).is_err());
    assert!(sink.push_frame(FrameIndex(4), &frame(0)).is_err());
}
