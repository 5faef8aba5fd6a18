use std::{collections::HashMap, sync::Arc};

use kurbo::Shape as _;

use crate::{
    assets::{
        color::{CssColor, parse_css_color},
        store::{AssetStore, PreparedImage},
        text::{TextAlign, TextBrushRgba8, TextLayoutEngine, TextRequest},
    },
    composition::model::Style,
    foundation::core::{Affine, Canvas, Rect, Vec2},
    foundation::error::{ReelError, ReelResult},
    render::{
        backend::{FrameRGBA, RenderBackend},
        layout::{BlockExtent, STACK_PADDING_PX, is_bold, parse_css_length, stack_tops},
        segment::{Block, RenderableFrame, TextRole},
    },
};

const FALLBACK_TEXT_COLOR: CssColor = CssColor::rgb(255, 255, 255);
const FALLBACK_BACKGROUND: CssColor = CssColor::rgb(0, 0, 0);
const DEFAULT_IMAGE_SIZE: (f64, f64) = (600.0, 400.0);
const LINE_HEIGHT_FACTOR: f64 = 1.2;

/// CPU rasterizer powered by `vello_cpu` for shapes/images and `parley` for text.
///
/// Text needs a font from the [`AssetStore`]; without one, text blocks keep their space in the
/// column but draw nothing.
pub struct CpuRasterizer {
    canvas: Canvas,
    width_u16: u16,
    height_u16: u16,
    ctx: Option<vello_cpu::RenderContext>,
    text_engine: TextLayoutEngine,
    font: Option<vello_cpu::peniko::FontData>,
    layout_cache: HashMap<TextKey, Arc<parley::Layout<TextBrushRgba8>>>,
    image_cache: HashMap<String, vello_cpu::Image>,
    warned_no_font: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct TextKey {
    text: String,
    size_bits: u32,
    bold: bool,
    align: TextAlign,
    width_bits: u32,
    brush: [u8; 4],
}

enum Placed {
    Text {
        layout: Option<Arc<parley::Layout<TextBrushRgba8>>>,
        x: f64,
    },
    Image {
        source: String,
        rect: Rect,
        radius: f64,
    },
}

impl CpuRasterizer {
    /// Create a rasterizer for `canvas`, registering the store's font if it has one.
    pub fn new(canvas: Canvas, assets: &AssetStore) -> ReelResult<Self> {
        let width_u16: u16 = canvas
            .width
            .try_into()
            .map_err(|_| ReelError::validation("canvas width exceeds u16"))?;
        let height_u16: u16 = canvas
            .height
            .try_into()
            .map_err(|_| ReelError::validation("canvas height exceeds u16"))?;

        let mut text_engine = TextLayoutEngine::new();
        let font = match assets.font_bytes() {
            Some(bytes) => {
                let family = text_engine.register_font(bytes)?;
                tracing::debug!(family, "font registered");
                Some(vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(bytes.as_ref().clone()),
                    0,
                ))
            }
            None => None,
        };

        Ok(Self {
            canvas,
            width_u16,
            height_u16,
            ctx: None,
            text_engine,
            font,
            layout_cache: HashMap::new(),
            image_cache: HashMap::new(),
            warned_no_font: false,
        })
    }

    fn content_width(&self) -> f64 {
        (f64::from(self.canvas.width) - 2.0 * STACK_PADDING_PX).max(1.0)
    }

    fn place_blocks(
        &mut self,
        frame: &RenderableFrame,
        assets: &AssetStore,
        text_color: CssColor,
    ) -> ReelResult<(Vec<Placed>, Vec<BlockExtent>)> {
        let content_w = self.content_width();
        let mut placed = Vec::with_capacity(frame.blocks.len());
        let mut extents = Vec::with_capacity(frame.blocks.len());

        for block in &frame.blocks {
            match block {
                Block::Text { role, text, style } => {
                    let size = parse_opt_length(style.font_size.as_deref(), content_w)
                        .filter(|s| *s > 0.0)
                        .unwrap_or_else(|| default_font_size(*role));
                    let box_w = parse_opt_length(style.max_width.as_deref(), content_w)
                        .map_or(content_w, |w| w.min(content_w));
                    let color = match style.color.as_deref() {
                        Some(c) => color_or(c, text_color),
                        None => text_color,
                    };
                    let layout = self.text_layout(text, size, style, box_w, color)?;
                    let height = layout
                        .as_ref()
                        .map_or(size * LINE_HEIGHT_FACTOR, |l| f64::from(l.height()));

                    placed.push(Placed::Text {
                        layout,
                        x: STACK_PADDING_PX + (content_w - box_w) / 2.0,
                    });
                    extents.push(BlockExtent {
                        height,
                        margin_bottom: margin_bottom(style, content_w),
                    });
                }
                Block::Image { source, style, .. } => {
                    let natural = assets
                        .image(source)
                        .map(|img| (f64::from(img.width), f64::from(img.height)));
                    let (w, h) = self.image_size(natural, style, content_w);
                    let radius = parse_opt_length(style.border_radius.as_deref(), w).unwrap_or(0.0);
                    placed.push(Placed::Image {
                        source: source.clone(),
                        rect: Rect::new(0.0, 0.0, w, h),
                        radius: radius.min(w / 2.0).min(h / 2.0),
                    });
                    extents.push(BlockExtent {
                        height: h,
                        margin_bottom: margin_bottom(style, content_w),
                    });
                }
            }
        }
        Ok((placed, extents))
    }

    fn image_size(&self, natural: Option<(f64, f64)>, style: &Style, content_w: f64) -> (f64, f64) {
        let canvas_h = f64::from(self.canvas.height);
        let (nat_w, nat_h) = natural
            .filter(|(w, h)| *w > 0.0 && *h > 0.0)
            .unwrap_or(DEFAULT_IMAGE_SIZE);
        let w = parse_opt_length(style.width.as_deref(), content_w);
        let h = parse_opt_length(style.height.as_deref(), canvas_h);
        let max_w = parse_opt_length(style.max_width.as_deref(), content_w).unwrap_or(content_w);

        let (w, h) = match (w, h) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) => (w, w * nat_h / nat_w),
            (None, Some(h)) => (h * nat_w / nat_h, h),
            (None, None) => (nat_w, nat_h),
        };
        let limit = max_w.min(content_w);
        if w > limit && w > 0.0 {
            (limit, h * limit / w)
        } else {
            (w, h)
        }
    }

    fn text_layout(
        &mut self,
        text: &str,
        size: f64,
        style: &Style,
        box_w: f64,
        color: CssColor,
    ) -> ReelResult<Option<Arc<parley::Layout<TextBrushRgba8>>>> {
        if self.font.is_none() {
            if !self.warned_no_font {
                tracing::warn!("no font loaded, text blocks are not drawn");
                self.warned_no_font = true;
            }
            return Ok(None);
        }

        let key = TextKey {
            text: text.to_string(),
            size_bits: (size as f32).to_bits(),
            bold: is_bold(style.font_weight.as_deref()),
            align: TextAlign::from_css(style.text_align.as_deref()),
            width_bits: (box_w as f32).to_bits(),
            brush: color.to_array(),
        };
        if let Some(layout) = self.layout_cache.get(&key) {
            return Ok(Some(layout.clone()));
        }

        let layout = self.text_engine.layout(&TextRequest {
            text,
            size_px: size as f32,
            bold: key.bold,
            align: key.align,
            box_width_px: box_w as f32,
            brush: TextBrushRgba8 {
                r: color.r,
                g: color.g,
                b: color.b,
                a: color.a,
            },
        })?;
        let layout = Arc::new(layout);
        self.layout_cache.insert(key, layout.clone());
        Ok(Some(layout))
    }

    fn image_paint(
        &mut self,
        source: &str,
        assets: &AssetStore,
    ) -> ReelResult<Option<(vello_cpu::Image, f64, f64)>> {
        let Some(prepared) = assets.image(source) else {
            return Ok(None);
        };
        if !self.image_cache.contains_key(source) {
            let pixmap = pixmap_from_premul(prepared)?;
            self.image_cache.insert(
                source.to_string(),
                vello_cpu::Image {
                    image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
                    sampler: vello_cpu::peniko::ImageSampler::default(),
                },
            );
        }
        Ok(self
            .image_cache
            .get(source)
            .cloned()
            .map(|img| (img, f64::from(prepared.width), f64::from(prepared.height))))
    }

    fn draw(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        frame: &RenderableFrame,
        assets: &AssetStore,
    ) -> ReelResult<()> {
        let w = f64::from(self.canvas.width);
        let h = f64::from(self.canvas.height);

        let bg = color_or(&frame.background_color, FALLBACK_BACKGROUND);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));

        let text_color = color_or(&frame.text_color, FALLBACK_TEXT_COLOR);
        let (placed, extents) = self.place_blocks(frame, assets, text_color)?;
        let tops = stack_tops(&extents, h);

        let patch_tr = frame.patch.to_affine(Vec2::new(w / 2.0, h / 2.0), w);
        let opacity = frame.patch.effective_opacity() as f32;
        if opacity <= 0.0 {
            return Ok(());
        }
        if opacity < 1.0 {
            ctx.push_opacity_layer(opacity);
        }

        let content_w = self.content_width();
        for (p, top) in placed.iter().zip(tops) {
            match p {
                Placed::Text { layout, x } => {
                    let (Some(layout), Some(font)) = (layout, self.font.as_ref()) else {
                        continue;
                    };
                    ctx.set_transform(affine_to_cpu(patch_tr * Affine::translate((*x, top))));
                    for line in layout.lines() {
                        for item in line.items() {
                            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                                continue;
                            };
                            let brush = run.style().brush;
                            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                                brush.r, brush.g, brush.b, brush.a,
                            ));
                            let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                                id: g.id,
                                x: g.x,
                                y: g.y,
                            });
                            ctx.glyph_run(font)
                                .font_size(run.run().font_size())
                                .fill_glyphs(glyphs);
                        }
                    }
                }
                Placed::Image {
                    source,
                    rect,
                    radius,
                } => {
                    let x = STACK_PADDING_PX + (content_w - rect.width()) / 2.0;
                    let origin = patch_tr * Affine::translate((x, top));
                    match self.image_paint(source, assets)? {
                        Some((img, iw, ih)) => {
                            let sx = rect.width() / iw.max(1.0);
                            let sy = rect.height() / ih.max(1.0);
                            ctx.set_transform(affine_to_cpu(
                                origin * Affine::scale_non_uniform(sx, sy),
                            ));
                            ctx.set_paint(img);
                            let r = *radius / sx.max(f64::EPSILON);
                            ctx.fill_path(&rounded_rect_path(Rect::new(0.0, 0.0, iw, ih), r));
                        }
                        None => {
                            let c = text_color.with_opacity(0.15);
                            ctx.set_transform(affine_to_cpu(origin));
                            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                                c.r, c.g, c.b, c.a,
                            ));
                            ctx.fill_path(&rounded_rect_path(*rect, *radius));
                        }
                    }
                }
            }
        }

        if opacity < 1.0 {
            ctx.pop_layer();
        }
        Ok(())
    }
}

impl RenderBackend for CpuRasterizer {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn render(&mut self, frame: &RenderableFrame, assets: &AssetStore) -> ReelResult<FrameRGBA> {
        let mut ctx = match self.ctx.take() {
            Some(ctx) => ctx,
            None => vello_cpu::RenderContext::new(self.width_u16, self.height_u16),
        };
        ctx.reset();
        let drawn = self.draw(&mut ctx, frame, assets);
        let out = drawn.map(|()| {
            let mut pixmap = vello_cpu::Pixmap::new(self.width_u16, self.height_u16);
            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            FrameRGBA {
                width: self.canvas.width,
                height: self.canvas.height,
                data: pixmap.data_as_u8_slice().to_vec(),
                premultiplied: true,
            }
        });
        self.ctx = Some(ctx);
        out
    }
}

fn default_font_size(role: TextRole) -> f64 {
    match role {
        TextRole::Heading => 60.0,
        TextRole::Title => 50.0,
        TextRole::Subheading | TextRole::Description => 30.0,
    }
}

fn parse_opt_length(v: Option<&str>, reference: f64) -> Option<f64> {
    v.and_then(|s| parse_css_length(s, reference))
}

fn margin_bottom(style: &Style, reference: f64) -> f64 {
    parse_opt_length(style.margin_bottom.as_deref(), reference).unwrap_or(0.0)
}

fn color_or(value: &str, fallback: CssColor) -> CssColor {
    parse_css_color(value).unwrap_or_else(|e| {
        tracing::warn!(value, error = %e, "unparseable color, using fallback");
        fallback
    })
}

fn rounded_rect_path(rect: Rect, radius: f64) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let rr = kurbo::RoundedRect::from_rect(rect, radius.max(0.0));
    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in rr.path_elements(0.1) {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn pixmap_from_premul(img: &PreparedImage) -> ReelResult<vello_cpu::Pixmap> {
    let w: u16 = img
        .width
        .try_into()
        .map_err(|_| ReelError::evaluation("image width exceeds u16"))?;
    let h: u16 = img
        .height
        .try_into()
        .map_err(|_| ReelError::evaluation("image height exceeds u16"))?;
    if img.rgba8_premul.len() != (img.width as usize) * (img.height as usize) * 4 {
        return Err(ReelError::evaluation("image byte len mismatch"));
    }
    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(img.rgba8_premul.len() / 4);
    for px in img.rgba8_premul.chunks_exact(4) {
        may_have_opacities |= px[3] != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        });
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
