use crate::{
    composition::model::TimelineDocument,
    eval::timeline::{TimelineLayout, composite},
    foundation::core::{Canvas, FrameIndex, Fps},
    foundation::error::{ReelError, ReelResult},
    render::segment::{RenderableFrame, SharedStyle, render_segment},
};

/// Frame rate used when the host does not pick one.
pub const DEFAULT_FPS: u32 = 30;
/// Canvas used when the host does not pick one.
pub const DEFAULT_CANVAS: Canvas = Canvas {
    width: 1280,
    height: 720,
};
/// Identifier the composition is registered under.
pub const COMPOSITION_ID: &str = "VideoComposition";

/// What a video host needs to register the composition.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionDescriptor {
    /// Composition identifier.
    pub id: String,
    /// Total length in frames.
    pub duration_in_frames: u64,
    /// Frames per second.
    pub fps: f64,
    /// Canvas width.
    pub width: u32,
    /// Canvas height.
    pub height: u32,
}

/// A resolved document bound to its frame layout; answers "what is on screen at frame N".
#[derive(Clone, Debug)]
pub struct Assembly {
    doc: TimelineDocument,
    layout: TimelineLayout,
    fps: Fps,
    shared: SharedStyle,
}

/// Composite `doc` at `fps` and wrap it for per-frame queries.
#[tracing::instrument(skip(doc), fields(scenes = doc.scenes.len()))]
pub fn assemble(doc: TimelineDocument, fps: Fps) -> ReelResult<Assembly> {
    let layout = composite(&doc, fps)?;
    layout.validate()?;
    let shared = SharedStyle::of(&doc);
    Ok(Assembly {
        doc,
        layout,
        fps,
        shared,
    })
}

impl Assembly {
    /// Total number of frames.
    pub fn total_frames(&self) -> u64 {
        self.layout.total_frames
    }

    /// Frame rate the layout was computed at.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Segment intervals.
    pub fn layout(&self) -> &TimelineLayout {
        &self.layout
    }

    /// The resolved document.
    pub fn document(&self) -> &TimelineDocument {
        &self.doc
    }

    /// Describe the frame shown at global index `frame`.
    pub fn frame_at(&self, frame: FrameIndex) -> ReelResult<RenderableFrame> {
        let (id, iv) = self.layout.locate(frame).ok_or_else(|| {
            ReelError::evaluation(format!(
                "frame {} is out of bounds (total_frames = {})",
                frame.0, self.layout.total_frames
            ))
        })?;
        let segment = self
            .doc
            .segment(id)
            .ok_or_else(|| ReelError::evaluation(format!("layout references missing {id:?}")))?;
        let local = FrameIndex(frame.0 - iv.start_frame);
        Ok(render_segment(id, segment, local, self.fps, &self.shared))
    }

    /// Registration data for a host rendering at `canvas`.
    pub fn descriptor(&self, canvas: Canvas) -> CompositionDescriptor {
        CompositionDescriptor {
            id: COMPOSITION_ID.to_string(),
            duration_in_frames: self.layout.total_frames,
            fps: self.fps.as_f64(),
            width: canvas.width,
            height: canvas.height,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/assembler.rs"]
mod tests;
