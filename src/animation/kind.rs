use crate::{
    animation::ease::Ease,
    foundation::error::{ReelError, ReelResult},
};

/// Animation directive as it appears in timeline JSON.
///
/// `type` is kept as a free-form string here; [`Animation::from_def`] folds it into the closed
/// [`Animation`] set.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationDef {
    /// `fade-in`, `fade-out`, `zoom-in`, `zoom-out`, `slide-in` or `none`.
    #[serde(rename = "type")]
    pub kind: String,
    /// `left` or `right`; only read for `slide-in`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    /// Length of the animation window, measured from the start of the segment.
    #[serde(default = "default_window_secs")]
    pub duration_in_seconds: f64,
    /// Optional easing curve; linear when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<Ease>,
}

fn default_window_secs() -> f64 {
    1.0
}

/// Direction a `slide-in` enters from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideDirection {
    /// Enters from the left edge (negative translation).
    Left,
    /// Enters from the right edge.
    #[default]
    Right,
}

/// Interpolation window shared by every timed animation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct AnimWindow {
    /// Window length in seconds, starting at the segment start.
    pub duration_secs: f64,
    /// Easing applied to normalized progress.
    pub ease: Ease,
}

impl AnimWindow {
    /// Linear window of `duration_secs`.
    pub fn linear(duration_secs: f64) -> Self {
        Self {
            duration_secs,
            ease: Ease::Linear,
        }
    }
}

/// Resolved animation applied to a whole segment.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(into = "AnimationDef")]
pub enum Animation {
    /// No transform.
    None,
    /// Opacity 0 → 1.
    FadeIn(AnimWindow),
    /// Opacity 1 → 0.
    FadeOut(AnimWindow),
    /// Scale 1.5 → 1.0.
    ZoomIn(AnimWindow),
    /// Renders as a no-op; this is the default animation.
    ZoomOut(AnimWindow),
    /// Horizontal translation 100% → 0%.
    SlideIn {
        /// Entry side.
        direction: SlideDirection,
        /// Interpolation window.
        window: AnimWindow,
    },
}

impl Animation {
    /// Resolve a wire directive.
    ///
    /// Unknown `type` values resolve to [`Animation::None`] with a warning. Non-finite window
    /// lengths are rejected.
    pub fn from_def(def: &AnimationDef) -> ReelResult<Self> {
        if !def.duration_in_seconds.is_finite() {
            return Err(ReelError::animation(format!(
                "animation '{}' durationInSeconds must be finite",
                def.kind
            )));
        }

        let window = AnimWindow {
            duration_secs: def.duration_in_seconds.max(0.0),
            ease: def.easing.unwrap_or_default(),
        };

        let anim = match def.kind.trim().to_ascii_lowercase().as_str() {
            "fade-in" => Self::FadeIn(window),
            "fade-out" => Self::FadeOut(window),
            "zoom-in" => Self::ZoomIn(window),
            "zoom-out" => Self::ZoomOut(window),
            "slide-in" => Self::SlideIn {
                direction: parse_direction(def.direction.as_deref()),
                window,
            },
            "none" => Self::None,
            other => {
                tracing::warn!(kind = other, "unknown animation type, rendering without animation");
                Self::None
            }
        };
        Ok(anim)
    }

    /// Wire name of this animation.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::FadeIn(_) => "fade-in",
            Self::FadeOut(_) => "fade-out",
            Self::ZoomIn(_) => "zoom-in",
            Self::ZoomOut(_) => "zoom-out",
            Self::SlideIn { .. } => "slide-in",
        }
    }

    /// Interpolation window, if this animation has one.
    pub fn window(&self) -> Option<AnimWindow> {
        match *self {
            Self::None => None,
            Self::FadeIn(w) | Self::FadeOut(w) | Self::ZoomIn(w) | Self::ZoomOut(w) => Some(w),
            Self::SlideIn { window, .. } => Some(window),
        }
    }

    /// Shorten the window so it fits inside a segment of `segment_secs`.
    ///
    /// Returns the (possibly unchanged) animation and whether clamping happened.
    pub fn clamp_to_segment(self, segment_secs: f64) -> (Self, bool) {
        let limit = segment_secs.max(0.0);
        let Some(window) = self.window() else {
            return (self, false);
        };
        if window.duration_secs <= limit {
            return (self, false);
        }

        let window = AnimWindow {
            duration_secs: limit,
            ..window
        };
        let clamped = match self {
            Self::None => Self::None,
            Self::FadeIn(_) => Self::FadeIn(window),
            Self::FadeOut(_) => Self::FadeOut(window),
            Self::ZoomIn(_) => Self::ZoomIn(window),
            Self::ZoomOut(_) => Self::ZoomOut(window),
            Self::SlideIn { direction, .. } => Self::SlideIn { direction, window },
        };
        (clamped, true)
    }
}

impl From<Animation> for AnimationDef {
    fn from(anim: Animation) -> Self {
        let window = anim.window();
        let direction = match anim {
            Animation::SlideIn { direction, .. } => Some(
                match direction {
                    SlideDirection::Left => "left",
                    SlideDirection::Right => "right",
                }
                .to_string(),
            ),
            _ => None,
        };
        Self {
            kind: anim.kind_name().to_string(),
            direction,
            duration_in_seconds: window.map(|w| w.duration_secs).unwrap_or(0.0),
            easing: window.map(|w| w.ease).filter(|e| !e.is_linear()),
        }
    }
}

fn parse_direction(direction: Option<&str>) -> SlideDirection {
    match direction.map(|d| d.trim().to_ascii_lowercase()) {
        Some(d) if d == "left" => SlideDirection::Left,
        _ => SlideDirection::Right,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/kind.rs"]
mod tests;
