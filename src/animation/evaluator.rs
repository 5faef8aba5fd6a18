use crate::{
    animation::{
        interpolate::interpolate,
        kind::{AnimWindow, Animation, SlideDirection},
    },
    foundation::core::{Affine, Fps, FrameIndex, Vec2},
};

/// Scale a `zoom-in` starts from.
pub const ZOOM_IN_START_SCALE: f64 = 1.5;
/// Horizontal offset, in percent of the block width, a `slide-in` starts from.
pub const SLIDE_IN_START_PERCENT: f64 = 100.0;

/// Interpolated presentation properties for one local frame.
///
/// `None` fields mean "not animated"; the identity patch has every field unset.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualPatch {
    /// Opacity in `[0, 1]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Horizontal scale factor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    /// Vertical scale factor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
    /// Horizontal translation in percent of the animated block's width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate_x_percent: Option<f64>,
}

impl VisualPatch {
    /// Patch that leaves the segment untouched.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Return `true` when no property is animated.
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Opacity to composite with, `1.0` when not animated.
    pub fn effective_opacity(&self) -> f64 {
        self.opacity.unwrap_or(1.0).clamp(0.0, 1.0)
    }

    /// Affine transform for a block of `block_width` pixels scaled about `center`.
    ///
    /// Translation is applied after scaling, so a slide moves the already-scaled block.
    pub fn to_affine(&self, center: Vec2, block_width: f64) -> Affine {
        let sx = self.scale_x.unwrap_or(1.0);
        let sy = self.scale_y.unwrap_or(1.0);
        let tx = self.translate_x_percent.unwrap_or(0.0) / 100.0 * block_width;

        Affine::translate(Vec2::new(tx, 0.0))
            * Affine::translate(center)
            * Affine::scale_non_uniform(sx, sy)
            * Affine::translate(-center)
    }
}

/// Map a frame inside a segment to the visual patch of `animation`.
///
/// `local` counts frames since the segment start, which is also where every animation window
/// starts. Frames past the window hold the end value; nothing overshoots.
pub fn evaluate(local: FrameIndex, animation: Option<&Animation>, fps: Fps) -> VisualPatch {
    let Some(animation) = animation else {
        return VisualPatch::identity();
    };

    match *animation {
        Animation::None | Animation::ZoomOut(_) => VisualPatch::identity(),
        Animation::FadeIn(w) => VisualPatch {
            opacity: Some(sample(local, w, fps, [0.0, 1.0])),
            ..VisualPatch::identity()
        },
        Animation::FadeOut(w) => VisualPatch {
            opacity: Some(sample(local, w, fps, [1.0, 0.0])),
            ..VisualPatch::identity()
        },
        Animation::ZoomIn(w) => {
            let s = sample(local, w, fps, [ZOOM_IN_START_SCALE, 1.0]);
            VisualPatch {
                scale_x: Some(s),
                scale_y: Some(s),
                ..VisualPatch::identity()
            }
        }
        Animation::SlideIn { direction, window } => {
            let pct = sample(local, window, fps, [SLIDE_IN_START_PERCENT, 0.0]);
            let pct = match direction {
                SlideDirection::Left => -pct,
                SlideDirection::Right => pct,
            };
            VisualPatch {
                translate_x_percent: Some(pct),
                ..VisualPatch::identity()
            }
        }
    }
}

fn sample(local: FrameIndex, window: AnimWindow, fps: Fps, output: [f64; 2]) -> f64 {
    let span = window.duration_secs * fps.as_f64();
    interpolate(local.0 as f64, [0.0, span], output, window.ease)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/evaluator.rs"]
mod tests;
