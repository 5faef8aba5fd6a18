//! Block-stack geometry shared by the rasterizer.
//!
//! Segments lay their blocks out as one vertically centered column, the way a flex column with
//! `justify-content: center` would.

/// Canvas padding around the block column.
pub const STACK_PADDING_PX: f64 = 20.0;
/// Pixels per `em`/`rem`.
pub const ROOT_FONT_SIZE_PX: f64 = 16.0;

/// Parse a CSS length: `px`, unitless numbers, `em`/`rem`, or a percentage of `reference`.
///
/// `auto`, negative and malformed values return `None`.
pub fn parse_css_length(value: &str, reference: f64) -> Option<f64> {
    let v = value.trim().to_ascii_lowercase();
    let (num, scale) = if let Some(n) = v.strip_suffix("px") {
        (n, 1.0)
    } else if let Some(n) = v.strip_suffix('%') {
        (n, reference / 100.0)
    } else if let Some(n) = v.strip_suffix("rem") {
        (n, ROOT_FONT_SIZE_PX)
    } else if let Some(n) = v.strip_suffix("em") {
        (n, ROOT_FONT_SIZE_PX)
    } else {
        (v.as_str(), 1.0)
    };
    let n = num.trim().parse::<f64>().ok()?;
    let px = n * scale;
    (px.is_finite() && px >= 0.0).then_some(px)
}

/// Return `true` for `bold`, `bolder` and numeric weights of 600 and up.
pub fn is_bold(weight: Option<&str>) -> bool {
    match weight.map(|w| w.trim().to_ascii_lowercase()) {
        Some(w) if w == "bold" || w == "bolder" => true,
        Some(w) => w.parse::<u32>().is_ok_and(|n| n >= 600),
        None => false,
    }
}

/// Height and trailing margin of one block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockExtent {
    /// Block height in pixels.
    pub height: f64,
    /// Space after the block.
    pub margin_bottom: f64,
}

/// Top edge of every block when the column is centered in `canvas_height`.
///
/// The last block's bottom margin does not count toward the column height.
pub fn stack_tops(extents: &[BlockExtent], canvas_height: f64) -> Vec<f64> {
    let Some(last) = extents.last() else {
        return Vec::new();
    };
    let total: f64 =
        extents.iter().map(|e| e.height + e.margin_bottom).sum::<f64>() - last.margin_bottom;
    let inner = (canvas_height - 2.0 * STACK_PADDING_PX).max(0.0);

    let mut y = STACK_PADDING_PX + (inner - total) / 2.0;
    extents
        .iter()
        .map(|e| {
            let top = y;
            y += e.height + e.margin_bottom;
            top
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
