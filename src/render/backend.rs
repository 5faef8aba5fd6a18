use crate::{
    assets::store::AssetStore, foundation::core::Canvas, foundation::error::ReelResult,
    render::segment::RenderableFrame,
};

/// A rendered frame as RGBA8 pixels.
///
/// Frames are premultiplied alpha; the `premultiplied` flag makes that explicit at API
/// boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA bytes of the pixel at `(x, y)`, if inside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data.get(i..i + 4).and_then(|p| p.try_into().ok())
    }
}

/// A renderer that rasterizes a [`RenderableFrame`] into a [`FrameRGBA`].
///
/// Most callers go through [`crate::render_frame`] or [`crate::render_to_sink`].
pub trait RenderBackend {
    /// Size of every frame this backend produces.
    fn canvas(&self) -> Canvas;

    /// Rasterize one frame.
    fn render(&mut self, frame: &RenderableFrame, assets: &AssetStore) -> ReelResult<FrameRGBA>;
}
