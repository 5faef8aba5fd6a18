use crate::{
    animation::evaluator::VisualPatch,
    composition::model::{SegmentId, Style},
    foundation::math::Fnv1a64,
    render::segment::{Block, RenderableFrame, TextRole},
};

/// 128-bit identity of a frame's visible content.
///
/// Two frames with the same fingerprint rasterize to the same pixels, so exporters can reuse the
/// previous frame instead of drawing it again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

/// Fingerprint everything in `frame` except `local_frame`.
pub fn fingerprint_frame(frame: &RenderableFrame) -> FrameFingerprint {
    let mut h = PairHasher::new();

    match frame.segment {
        SegmentId::Intro => h.u8(0),
        SegmentId::Scene(i) => {
            h.u8(1);
            h.u64(i as u64);
        }
        SegmentId::Outro => h.u8(2),
    }
    h.str(&frame.background_color);
    h.str(&frame.text_color);
    h.str(&frame.font_family);

    h.u64(frame.blocks.len() as u64);
    for block in &frame.blocks {
        match block {
            Block::Text { role, text, style } => {
                h.u8(0);
                h.u8(match role {
                    TextRole::Heading => 0,
                    TextRole::Subheading => 1,
                    TextRole::Title => 2,
                    TextRole::Description => 3,
                });
                h.str(text);
                h.style(style);
            }
            Block::Image { source, alt, style } => {
                h.u8(1);
                h.str(source);
                h.str(alt);
                h.style(style);
            }
        }
    }
    h.patch(&frame.patch);

    h.finish()
}

struct PairHasher {
    a: Fnv1a64,
    b: Fnv1a64,
}

impl PairHasher {
    fn new() -> Self {
        Self {
            a: Fnv1a64::new_default(),
            b: Fnv1a64::new(0x9ae1_6a3b_2f90_404f),
        }
    }

    fn u8(&mut self, v: u8) {
        self.a.write_u8(v);
        self.b.write_u8(v);
    }

    fn u64(&mut self, v: u64) {
        self.a.write_u64(v);
        self.b.write_u64(v);
    }

    fn str(&mut self, s: &str) {
        self.u64(s.len() as u64);
        self.a.write_bytes(s.as_bytes());
        self.b.write_bytes(s.as_bytes());
    }

    fn opt_str(&mut self, v: Option<&str>) {
        match v {
            Some(s) => {
                self.u8(1);
                self.str(s);
            }
            None => self.u8(0),
        }
    }

    fn opt_f64(&mut self, v: Option<f64>) {
        match v {
            Some(x) => {
                self.u8(1);
                self.u64(x.to_bits());
            }
            None => self.u8(0),
        }
    }

    fn style(&mut self, s: &Style) {
        for v in [
            &s.font_size,
            &s.font_weight,
            &s.text_align,
            &s.margin_bottom,
            &s.width,
            &s.height,
            &s.max_width,
            &s.border_radius,
            &s.margin,
            &s.color,
        ] {
            self.opt_str(v.as_deref());
        }
        self.u64(s.extra.len() as u64);
        // BTreeMap iterates in key order.
        for (k, v) in &s.extra {
            self.str(k);
            self.str(&v.to_string());
        }
    }

    fn patch(&mut self, p: &VisualPatch) {
        self.opt_f64(p.opacity);
        self.opt_f64(p.scale_x);
        self.opt_f64(p.scale_y);
        self.opt_f64(p.translate_x_percent);
    }

    fn finish(self) -> FrameFingerprint {
        FrameFingerprint {
            hi: self.a.finish(),
            lo: self.b.finish(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/fingerprint.rs"]
mod tests;
