use crate::foundation::error::{ReelError, ReelResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout (straight alpha).
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

/// Horizontal alignment of lines inside a text box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAlign {
    /// Flush left.
    Left,
    /// Centered.
    #[default]
    Center,
    /// Flush right.
    Right,
}

impl TextAlign {
    /// Parse a CSS `text-align` value; anything unrecognized centers.
    pub fn from_css(v: Option<&str>) -> Self {
        match v.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("left" | "start") => Self::Left,
            Some("right" | "end") => Self::Right,
            _ => Self::Center,
        }
    }

    fn to_parley(self) -> parley::Alignment {
        match self {
            Self::Left => parley::Alignment::Left,
            Self::Center => parley::Alignment::Center,
            Self::Right => parley::Alignment::Right,
        }
    }
}

/// One text run to shape.
#[derive(Clone, Copy, Debug)]
pub struct TextRequest<'a> {
    /// Text content.
    pub text: &'a str,
    /// Font size in pixels.
    pub size_px: f32,
    /// Bold weight.
    pub bold: bool,
    /// Line alignment inside `box_width_px`.
    pub align: TextAlign,
    /// Wrap width.
    pub box_width_px: f32,
    /// Fill color.
    pub brush: TextBrushRgba8,
}

/// Stateful helper for building Parley text layouts from one registered font.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: Option<String>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            family_name: None,
        }
    }

    /// Register font bytes and use their first family for every later layout.
    pub fn register_font(&mut self, font_bytes: &[u8]) -> ReelResult<String> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            ReelError::validation("no font families registered from font bytes")
        })?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ReelError::validation("registered font family has no name"))?
            .to_string();
        self.family_name = Some(family_name.clone());
        Ok(family_name)
    }

    /// Family name of the registered font, if any.
    pub fn family_name(&self) -> Option<&str> {
        self.family_name.as_deref()
    }

    /// Shape, wrap and align `req.text`.
    pub fn layout(&mut self, req: &TextRequest<'_>) -> ReelResult<parley::Layout<TextBrushRgba8>> {
        if !req.size_px.is_finite() || req.size_px <= 0.0 {
            return Err(ReelError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        let family_name = self
            .family_name
            .clone()
            .ok_or_else(|| ReelError::evaluation("no font registered for text layout"))?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, req.text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(req.size_px));
        builder.push_default(parley::style::StyleProperty::Brush(req.brush));
        if req.bold {
            builder.push_default(parley::style::StyleProperty::FontWeight(
                parley::style::FontWeight::BOLD,
            ));
        }

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(req.text);
        let width = req.box_width_px.max(1.0);
        layout.break_all_lines(Some(width));
        layout.align(
            Some(width),
            req.align.to_parley(),
            parley::AlignmentOptions::default(),
        );
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
