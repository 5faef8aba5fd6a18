//! Scenereel turns a narrated scene list into a frame-accurate video timeline.
//!
//! A timeline document names an intro, an ordered list of scenes and an outro. Every segment
//! carries its own text, optional image, narration and entrance animation.
//!
//! # Pipeline overview
//!
//! 1. **Expand**: `TimelineDef -> TimelineDocument` fills in estimated durations, animations and
//!    styles ([`expand`]).
//! 2. **Composite**: `TimelineDocument + Fps -> TimelineLayout` places the segments end to end
//!    on a frame axis ([`composite`]).
//! 3. **Describe**: `Assembly + FrameIndex -> RenderableFrame` says what is on screen at a
//!    global frame ([`Assembly::frame_at`]).
//! 4. **Rasterize**: `RenderableFrame -> FrameRGBA` on the CPU ([`CpuRasterizer`]).
//! 5. **Encode** (optional): stream frames to the system `ffmpeg` binary for MP4 output
//!    ([`render_to_mp4`]).
//!
//! Steps 1 to 3 are pure and deterministic. External IO is front-loaded in [`AssetStore`];
//! renderers output premultiplied RGBA8.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod animation;
mod assets;
mod composition;
mod encode;
mod eval;
mod foundation;
mod render;

pub use animation::ease::Ease;
pub use animation::estimate::{DEFAULT_WORDS_PER_MINUTE, estimate_duration_secs};
pub use animation::evaluator::{SLIDE_IN_START_PERCENT, VisualPatch, ZOOM_IN_START_SCALE, evaluate};
pub use animation::interpolate::interpolate;
pub use animation::kind::{AnimWindow, Animation, AnimationDef, SlideDirection};
pub use assets::color::{CssColor, parse_css_color};
pub use assets::decode::decode_image;
pub use assets::store::{AssetStore, PreparedImage, is_remote_source};
pub use assets::text::{TextAlign, TextBrushRgba8, TextLayoutEngine, TextRequest};
pub use composition::defaults::ExpandDefaults;
pub use composition::expand::expand;
pub use composition::model::{
    BoundaryDef, BoundarySegment, BoundaryStyle, BoundaryStyleDef, Content, Scene, SceneDef,
    SceneStyle, SceneStyleDef, SegmentId, SegmentRef, Style, TimelineDef, TimelineDocument,
};
pub use encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, ensure_parent_dir, is_ffmpeg_on_path};
pub use encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use eval::timeline::{Interval, TimelineLayout, composite, segment_frames};
pub use foundation::core::{Affine, Canvas, Fps, FrameIndex, FrameRange, Rect, Vec2};
pub use foundation::error::{ReelError, ReelResult};
pub use render::assembler::{
    Assembly, COMPOSITION_ID, CompositionDescriptor, DEFAULT_CANVAS, DEFAULT_FPS, assemble,
};
pub use render::backend::{FrameRGBA, RenderBackend};
pub use render::cpu::CpuRasterizer;
pub use render::fingerprint::{FrameFingerprint, fingerprint_frame};
pub use render::layout::{
    BlockExtent, ROOT_FONT_SIZE_PX, STACK_PADDING_PX, is_bold, parse_css_length, stack_tops,
};
pub use render::pipeline::{
    RenderOpts, RenderStats, render_frame, render_to_mp4, render_to_sink,
};
pub use render::segment::{Block, RenderableFrame, SharedStyle, TextRole, render_segment};
