use super::*;
use crate::{
    composition::{
        defaults::ExpandDefaults,
        expand::expand,
        model::{SegmentId, TimelineDef},
    },
    encode::sink::InMemorySink,
    foundation::core::{Canvas, Fps},
    render::{assembler::assemble, cpu::CpuRasterizer, segment::RenderableFrame},
};

fn assembly() -> Assembly {
    let def = TimelineDef::from_json_str(
        r##"{
          "title": "Pipeline",
          "backgroundColor": "#102030",
          "textColor": "white",
          "fontFamily": "sans-serif",
          "intro": { "durationInSeconds": 1, "voiceover": "hi",
                     "animation": { "type": "fade-in", "durationInSeconds": 1 } },
          "scenes": [
            { "image": "https://example.com/a.png", "durationInSeconds": 1,
              "animation": { "type": "none" } }
          ],
          "outro": { "durationInSeconds": 1, "voiceover": "bye" }
        }"##,
    )
    .unwrap();
    let doc = expand(&def, &ExpandDefaults::default()).unwrap();
    assemble(doc, Fps::whole(10).unwrap()).unwrap()
}

fn backend() -> CpuRasterizer {
    CpuRasterizer::new(Canvas::new(32, 18).unwrap(), &AssetStore::empty()).unwrap()
}

#[test]
fn render_frame_uses_backend_canvas() {
    let a = assembly();
    let out = render_frame(&a, FrameIndex(15), &mut backend(), &AssetStore::empty()).unwrap();
    assert_eq!((out.width, out.height), (32, 18));
    assert!(render_frame(&a, FrameIndex(30), &mut backend(), &AssetStore::empty()).is_err());
}

#[test]
fn sink_receives_every_frame_in_order() {
    let a = assembly();
    let mut sink = InMemorySink::new();
    let stats = render_to_sink(
        &a,
        &RenderOpts::default(),
        &mut backend(),
        &AssetStore::empty(),
        &mut sink,
    )
    .unwrap();

    assert_eq!(stats.frames_total, 30);
    assert_eq!(stats.frames_rendered, 30);
    assert_eq!(stats.frames_elided, 0);
    assert!(sink.is_finished());
    let cfg = sink.config().unwrap();
    assert_eq!(cfg.background, [0x10, 0x20, 0x30, 255]);
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, (0..30).collect::<Vec<_>>());
}

#[test]
fn static_frames_are_elided() {
    let a = assembly();
    let opts = RenderOpts {
        range: None,
        static_frame_elision: true,
    };

    let mut elided = InMemorySink::new();
    let stats = render_to_sink(&a, &opts, &mut backend(), &AssetStore::empty(), &mut elided)
        .unwrap();
    // Ten distinct fade-in frames, then one frame each for the scene and the outro.
    assert_eq!(stats.frames_rendered, 12);
    assert_eq!(stats.frames_elided, 18);

    let mut full = InMemorySink::new();
    render_to_sink(
        &a,
        &RenderOpts::default(),
        &mut backend(),
        &AssetStore::empty(),
        &mut full,
    )
    .unwrap();
    assert_eq!(elided.frames(), full.frames());
}

#[test]
fn sub_range_and_invalid_ranges() {
    let a = assembly();
    let mut sink = InMemorySink::new();
    let opts = RenderOpts {
        range: Some(FrameRange::new(FrameIndex(5), FrameIndex(8)).unwrap()),
        static_frame_elision: false,
    };
    let stats = render_to_sink(&a, &opts, &mut backend(), &AssetStore::empty(), &mut sink)
        .unwrap();
    assert_eq!(stats.frames_total, 3);
    assert_eq!(sink.frames()[0].0, FrameIndex(5));

    for (start, end) in [(3, 3), (0, 31)] {
        let opts = RenderOpts {
            range: Some(FrameRange::new(FrameIndex(start), FrameIndex(end)).unwrap()),
            static_frame_elision: false,
        };
        let err = render_to_sink(&a, &opts, &mut backend(), &AssetStore::empty(), &mut sink)
            .unwrap_err();
        assert!(matches!(err, ReelError::Validation(_)));
    }
}

struct FailAt {
    inner: CpuRasterizer,
    frame: u64,
}

impl RenderBackend for FailAt {
    fn canvas(&self) -> Canvas {
        self.inner.canvas()
    }

    fn render(&mut self, frame: &RenderableFrame, assets: &AssetStore) -> ReelResult<FrameRGBA> {
        if frame.segment == SegmentId::Scene(0) && frame.local_frame == self.frame {
            return Err(ReelError::evaluation("backend gave up"));
        }
        self.inner.render(frame, assets)
    }
}

#[derive(Default)]
struct Recording {
    pushed: Vec<u64>,
    ended: bool,
    aborted: bool,
}

impl FrameSink for Recording {
    fn begin(&mut self, _cfg: SinkConfig) -> ReelResult<()> {
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, _frame: &FrameRGBA) -> ReelResult<()> {
        self.pushed.push(idx.0);
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        self.ended = true;
        Ok(())
    }

    fn abort(&mut self) {
        self.aborted = true;
    }
}

#[test]
fn failed_render_aborts_the_sink_instead_of_ending_it() {
    let a = assembly();
    let mut backend = FailAt {
        inner: backend(),
        frame: 2,
    };
    let mut sink = Recording::default();

    let err = render_to_sink(
        &a,
        &RenderOpts::default(),
        &mut backend,
        &AssetStore::empty(),
        &mut sink,
    )
    .unwrap_err();

    assert!(matches!(err, ReelError::Evaluation(_)));
    assert!(sink.aborted);
    assert!(!sink.ended);
    assert_eq!(sink.pushed, (0..12).collect::<Vec<_>>());
}
