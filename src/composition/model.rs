use std::{collections::BTreeMap, io::Read, path::Path};

use anyhow::Context as _;

use crate::{
    animation::kind::{Animation, AnimationDef},
    foundation::error::{ReelError, ReelResult},
};

/// Presentation attributes attached to one text field or image.
///
/// Styles are pass-through data: the engine never derives invariants from them. The attributes
/// the generator emits are typed when they hold a string or a number; anything else, including
/// a typed attribute with another JSON shape, lands in [`Style::extra`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", from = "BTreeMap<String, serde_json::Value>")]
pub struct Style {
    /// CSS font size, e.g. `"60px"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    /// CSS font weight, e.g. `"bold"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    /// `left`, `center` or `right`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    /// Space below the element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<String>,
    /// Element width (`px` or `%`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    /// Element height (`px` or `%`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    /// Upper bound for the element width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<String>,
    /// Corner radius for images.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    /// CSS margin shorthand.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
    /// Per-element text color override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Any other attribute, passed through untouched.
    #[serde(flatten, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl From<BTreeMap<String, serde_json::Value>> for Style {
    fn from(mut attrs: BTreeMap<String, serde_json::Value>) -> Self {
        Self {
            font_size: take_css_value(&mut attrs, "fontSize"),
            font_weight: take_css_value(&mut attrs, "fontWeight"),
            text_align: take_css_value(&mut attrs, "textAlign"),
            margin_bottom: take_css_value(&mut attrs, "marginBottom"),
            width: take_css_value(&mut attrs, "width"),
            height: take_css_value(&mut attrs, "height"),
            max_width: take_css_value(&mut attrs, "maxWidth"),
            border_radius: take_css_value(&mut attrs, "borderRadius"),
            margin: take_css_value(&mut attrs, "margin"),
            color: take_css_value(&mut attrs, "color"),
            extra: attrs,
        }
    }
}

// Generators sometimes emit bare numbers (`"fontSize": 60`); keep them as their string form.
// Other shapes stay in `attrs` so they still round-trip through `extra`.
fn take_css_value(attrs: &mut BTreeMap<String, serde_json::Value>, key: &str) -> Option<String> {
    let text = match attrs.get(key)? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Null => None,
        other => {
            tracing::warn!(key, value = %other, "style attribute is not a CSS value, kept untyped");
            return None;
        }
    };
    attrs.remove(key);
    text
}

/// Text shown by an intro or outro.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Content {
    /// Main line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    /// Secondary line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subheading: Option<String>,
}

// ---------------------------------------------------------------------------------------------
// Wire documents: every derived field optional.
// ---------------------------------------------------------------------------------------------

/// Timeline document as received from the generator, before expansion.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineDef {
    /// Video title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Background color shared by every segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Text color shared by every segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    /// CSS font family shared by every segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Opening segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<BoundaryDef>,
    /// Scenes in playback order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenes: Option<Vec<SceneDef>>,
    /// Closing segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outro: Option<BoundaryDef>,
}

/// Intro or outro before expansion.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundaryDef {
    /// Explicit length in seconds; estimated from the voiceover when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_in_seconds: Option<f64>,
    /// Heading and subheading.
    #[serde(default)]
    pub content: Content,
    /// Narration text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voiceover: Option<String>,
    /// Animation directive; zoom-out when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationDef>,
    /// Style overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<BoundaryStyleDef>,
}

/// Intro/outro styles before expansion.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoundaryStyleDef {
    /// Heading style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<Style>,
    /// Subheading style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subheading: Option<Style>,
}

/// Scene before expansion.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDef {
    /// Title line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description paragraph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Image URL or local path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Explicit length in seconds; estimated from the voiceover when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_in_seconds: Option<f64>,
    /// Narration text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voiceover: Option<String>,
    /// Animation directive; zoom-out when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationDef>,
    /// Style overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<SceneStyleDef>,
}

/// Scene styles before expansion.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneStyleDef {
    /// Title style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Style>,
    /// Description style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Style>,
    /// Image style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Style>,
}

impl TimelineDef {
    /// Parse a timeline payload from a JSON reader.
    pub fn from_reader(reader: impl Read) -> ReelResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Parse a timeline payload from a JSON string.
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read and parse a timeline payload from a JSON file.
    pub fn from_path(path: &Path) -> ReelResult<Self> {
        let f = std::fs::File::open(path)
            .with_context(|| format!("open timeline '{}'", path.display()))?;
        Self::from_reader(std::io::BufReader::new(f))
            .map_err(|e| ReelError::serde(format!("{}: {e}", path.display())))
    }
}

// ---------------------------------------------------------------------------------------------
// Resolved documents: every field present.
// ---------------------------------------------------------------------------------------------

/// A fully expanded timeline: durations, animations and styles are all present.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineDocument {
    /// Video title.
    pub title: String,
    /// Background color shared by every segment.
    pub background_color: String,
    /// Text color shared by every segment.
    pub text_color: String,
    /// CSS font family shared by every segment.
    pub font_family: String,
    /// Opening segment.
    pub intro: BoundarySegment,
    /// Scenes in playback order.
    pub scenes: Vec<Scene>,
    /// Closing segment.
    pub outro: BoundarySegment,
}

/// Resolved intro or outro.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BoundarySegment {
    /// Segment length in seconds.
    #[serde(rename = "durationInSeconds")]
    pub duration_secs: f64,
    /// Heading and subheading.
    pub content: Content,
    /// Narration text.
    pub voiceover: String,
    /// Animation applied to the whole segment.
    pub animation: Animation,
    /// Heading/subheading styles.
    pub style: BoundaryStyle,
}

/// Resolved intro/outro styles.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BoundaryStyle {
    /// Heading style.
    pub heading: Style,
    /// Subheading style.
    pub subheading: Style,
}

/// Resolved scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Scene {
    /// Optional title line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Optional description paragraph.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional image URL or local path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Segment length in seconds.
    #[serde(rename = "durationInSeconds")]
    pub duration_secs: f64,
    /// Optional narration text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voiceover: Option<String>,
    /// Animation applied to the whole scene.
    pub animation: Animation,
    /// Title/description/image styles.
    pub style: SceneStyle,
}

/// Resolved scene styles.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneStyle {
    /// Title style.
    pub title: Style,
    /// Description style.
    pub description: Style,
    /// Image style.
    pub image: Style,
}

/// Identifies one segment of a timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SegmentId {
    /// The intro.
    Intro,
    /// Scene at this position in [`TimelineDocument::scenes`].
    Scene(usize),
    /// The outro.
    Outro,
}

/// Borrowed view of one segment.
#[derive(Clone, Copy, Debug)]
pub enum SegmentRef<'a> {
    /// Intro or outro.
    Boundary(&'a BoundarySegment),
    /// A scene.
    Scene(&'a Scene),
}

impl SegmentRef<'_> {
    /// Segment length in seconds.
    pub fn duration_secs(&self) -> f64 {
        match self {
            Self::Boundary(b) => b.duration_secs,
            Self::Scene(s) => s.duration_secs,
        }
    }

    /// Animation applied to the segment.
    pub fn animation(&self) -> &Animation {
        match self {
            Self::Boundary(b) => &b.animation,
            Self::Scene(s) => &s.animation,
        }
    }
}

impl TimelineDocument {
    /// Look up a segment by id.
    pub fn segment(&self, id: SegmentId) -> Option<SegmentRef<'_>> {
        match id {
            SegmentId::Intro => Some(SegmentRef::Boundary(&self.intro)),
            SegmentId::Scene(i) => self.scenes.get(i).map(SegmentRef::Scene),
            SegmentId::Outro => Some(SegmentRef::Boundary(&self.outro)),
        }
    }

    /// Segments in playback order: intro, scenes, outro.
    pub fn segments(&self) -> impl Iterator<Item = (SegmentId, SegmentRef<'_>)> {
        std::iter::once((SegmentId::Intro, SegmentRef::Boundary(&self.intro)))
            .chain(
                self.scenes
                    .iter()
                    .enumerate()
                    .map(|(i, s)| (SegmentId::Scene(i), SegmentRef::Scene(s))),
            )
            .chain(std::iter::once((
                SegmentId::Outro,
                SegmentRef::Boundary(&self.outro),
            )))
    }

    /// Serialize to pretty JSON in the same shape the generator emits.
    pub fn to_json_pretty(&self) -> ReelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<&BoundarySegment> for BoundaryDef {
    fn from(b: &BoundarySegment) -> Self {
        Self {
            duration_in_seconds: Some(b.duration_secs),
            content: b.content.clone(),
            voiceover: Some(b.voiceover.clone()),
            animation: Some(b.animation.into()),
            style: Some(BoundaryStyleDef {
                heading: Some(b.style.heading.clone()),
                subheading: Some(b.style.subheading.clone()),
            }),
        }
    }
}

impl From<&Scene> for SceneDef {
    fn from(s: &Scene) -> Self {
        Self {
            title: s.title.clone(),
            description: s.description.clone(),
            image: s.image.clone(),
            duration_in_seconds: Some(s.duration_secs),
            voiceover: s.voiceover.clone(),
            animation: Some(s.animation.into()),
            style: Some(SceneStyleDef {
                title: Some(s.style.title.clone()),
                description: Some(s.style.description.clone()),
                image: Some(s.style.image.clone()),
            }),
        }
    }
}

impl From<&TimelineDocument> for TimelineDef {
    fn from(doc: &TimelineDocument) -> Self {
        Self {
            title: Some(doc.title.clone()),
            background_color: Some(doc.background_color.clone()),
            text_color: Some(doc.text_color.clone()),
            font_family: Some(doc.font_family.clone()),
            intro: Some(BoundaryDef::from(&doc.intro)),
            scenes: Some(doc.scenes.iter().map(SceneDef::from).collect()),
            outro: Some(BoundaryDef::from(&doc.outro)),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
