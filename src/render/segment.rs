use crate::{
    animation::evaluator::{VisualPatch, evaluate},
    composition::model::{SegmentId, SegmentRef, Style, TimelineDocument},
    foundation::core::{FrameIndex, Fps},
};

/// Document-wide presentation shared by every segment.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedStyle {
    /// Canvas fill.
    pub background_color: String,
    /// Default text color.
    pub text_color: String,
    /// CSS font family.
    pub font_family: String,
}

impl SharedStyle {
    /// Shared style of a resolved document.
    pub fn of(doc: &TimelineDocument) -> Self {
        Self {
            background_color: doc.background_color.clone(),
            text_color: doc.text_color.clone(),
            font_family: doc.font_family.clone(),
        }
    }
}

/// What a text block represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TextRole {
    /// Intro/outro heading.
    Heading,
    /// Intro/outro subheading.
    Subheading,
    /// Scene title.
    Title,
    /// Scene description.
    Description,
}

/// One element of the vertical block stack.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Block {
    /// A line or paragraph of text.
    Text {
        /// What the text represents.
        role: TextRole,
        /// Text content.
        text: String,
        /// Resolved style.
        style: Style,
    },
    /// A picture.
    Image {
        /// URL or local path.
        source: String,
        /// Alternate text (the scene title when present).
        alt: String,
        /// Resolved style.
        style: Style,
    },
}

/// Pure-data description of one composed frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderableFrame {
    /// Segment this frame belongs to.
    pub segment: SegmentId,
    /// Frame offset inside the segment.
    pub local_frame: u64,
    /// Canvas fill.
    pub background_color: String,
    /// Default text color.
    pub text_color: String,
    /// CSS font family.
    pub font_family: String,
    /// Content stack, top to bottom.
    pub blocks: Vec<Block>,
    /// Animation state applied to the whole stack.
    pub patch: VisualPatch,
}

/// Describe one frame of a segment.
///
/// Only fields present on the segment produce blocks. The visual patch comes from the
/// segment's own animation evaluated at `local_frame`.
pub fn render_segment(
    id: SegmentId,
    segment: SegmentRef<'_>,
    local_frame: FrameIndex,
    fps: Fps,
    shared: &SharedStyle,
) -> RenderableFrame {
    let mut blocks = Vec::new();
    match segment {
        SegmentRef::Boundary(b) => {
            push_text(
                &mut blocks,
                TextRole::Heading,
                b.content.heading.as_deref(),
                &b.style.heading,
            );
            push_text(
                &mut blocks,
                TextRole::Subheading,
                b.content.subheading.as_deref(),
                &b.style.subheading,
            );
        }
        SegmentRef::Scene(s) => {
            push_text(
                &mut blocks,
                TextRole::Title,
                s.title.as_deref(),
                &s.style.title,
            );
            push_text(
                &mut blocks,
                TextRole::Description,
                s.description.as_deref(),
                &s.style.description,
            );
            if let Some(source) = s.image.as_deref() {
                blocks.push(Block::Image {
                    source: source.to_string(),
                    alt: s.title.clone().unwrap_or_default(),
                    style: s.style.image.clone(),
                });
            }
        }
    }

    RenderableFrame {
        segment: id,
        local_frame: local_frame.0,
        background_color: shared.background_color.clone(),
        text_color: shared.text_color.clone(),
        font_family: shared.font_family.clone(),
        blocks,
        patch: evaluate(local_frame, Some(segment.animation()), fps),
    }
}

fn push_text(blocks: &mut Vec<Block>, role: TextRole, text: Option<&str>, style: &Style) {
    if let Some(text) = text {
        blocks.push(Block::Text {
            role,
            text: text.to_string(),
            style: style.clone(),
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/segment.rs"]
mod tests;
