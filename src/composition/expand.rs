use crate::{
    animation::{
        estimate::estimate_duration_secs,
        kind::{Animation, AnimationDef},
    },
    composition::{
        defaults::ExpandDefaults,
        model::{
            BoundaryDef, BoundarySegment, BoundaryStyle, Scene, SceneDef, SceneStyle, Style,
            TimelineDef, TimelineDocument,
        },
    },
    foundation::error::{ReelError, ReelResult},
};

/// Expand a raw timeline into a fully resolved document.
///
/// Missing durations are estimated from the voiceover, missing animations and styles are taken
/// from `defaults`. The input is never modified. Malformed documents fail here, before any
/// compositing, with a [`ReelError::Validation`] naming the offending field.
#[tracing::instrument(skip_all, fields(scenes = def.scenes.as_ref().map_or(0, Vec::len)))]
pub fn expand(def: &TimelineDef, defaults: &ExpandDefaults) -> ReelResult<TimelineDocument> {
    if !defaults.words_per_minute.is_finite() || defaults.words_per_minute <= 0.0 {
        return Err(ReelError::validation(format!(
            "words_per_minute must be finite and > 0 (got {})",
            defaults.words_per_minute
        )));
    }

    let title = required_text(def.title.as_deref(), "title")?;
    let background_color = required_text(def.background_color.as_deref(), "backgroundColor")?;
    let text_color = required_text(def.text_color.as_deref(), "textColor")?;
    let font_family = required_text(def.font_family.as_deref(), "fontFamily")?;

    let intro = def
        .intro
        .as_ref()
        .ok_or_else(|| ReelError::validation("intro is required"))?;
    let outro = def
        .outro
        .as_ref()
        .ok_or_else(|| ReelError::validation("outro is required"))?;
    let scenes = def
        .scenes
        .as_ref()
        .ok_or_else(|| ReelError::validation("scenes is required (may be empty)"))?;

    let intro = expand_boundary(intro, "intro", defaults)?;
    let scenes = scenes
        .iter()
        .enumerate()
        .map(|(i, s)| expand_scene(s, &format!("scenes[{i}]"), defaults))
        .collect::<ReelResult<Vec<_>>>()?;
    let outro = expand_boundary(outro, "outro", defaults)?;

    tracing::debug!(
        intro_secs = intro.duration_secs,
        outro_secs = outro.duration_secs,
        scenes = scenes.len(),
        "timeline expanded"
    );

    Ok(TimelineDocument {
        title,
        background_color,
        text_color,
        font_family,
        intro,
        scenes,
        outro,
    })
}

fn expand_boundary(
    b: &BoundaryDef,
    path: &str,
    defaults: &ExpandDefaults,
) -> ReelResult<BoundarySegment> {
    let voiceover = b
        .voiceover
        .clone()
        .ok_or_else(|| ReelError::validation(format!("{path}.voiceover is required")))?;
    let duration_secs = resolve_duration(b.duration_in_seconds, Some(&voiceover), path, defaults)?;
    let animation = resolve_animation(b.animation.as_ref(), duration_secs, path, defaults)?;

    let style = b.style.as_ref();
    Ok(BoundarySegment {
        duration_secs,
        content: b.content.clone(),
        voiceover,
        animation,
        style: BoundaryStyle {
            heading: pick_style(style.and_then(|s| s.heading.as_ref()), &defaults.heading),
            subheading: pick_style(
                style.and_then(|s| s.subheading.as_ref()),
                &defaults.subheading,
            ),
        },
    })
}

fn expand_scene(s: &SceneDef, path: &str, defaults: &ExpandDefaults) -> ReelResult<Scene> {
    let duration_secs =
        resolve_duration(s.duration_in_seconds, s.voiceover.as_deref(), path, defaults)?;
    let animation = resolve_animation(s.animation.as_ref(), duration_secs, path, defaults)?;

    let style = s.style.as_ref();
    Ok(Scene {
        title: s.title.clone(),
        description: s.description.clone(),
        image: s.image.clone(),
        duration_secs,
        voiceover: s.voiceover.clone(),
        animation,
        style: SceneStyle {
            title: pick_style(style.and_then(|st| st.title.as_ref()), &defaults.scene_title),
            description: pick_style(
                style.and_then(|st| st.description.as_ref()),
                &defaults.scene_description,
            ),
            image: pick_style(style.and_then(|st| st.image.as_ref()), &defaults.scene_image),
        },
    })
}

fn required_text(v: Option<&str>, field: &str) -> ReelResult<String> {
    match v {
        Some(s) if !s.trim().is_empty() => Ok(s.to_string()),
        Some(_) => Err(ReelError::validation(format!("{field} must not be blank"))),
        None => Err(ReelError::validation(format!("{field} is required"))),
    }
}

// Explicit durations win, even non-positive ones; the compositor clamps those to one frame.
fn resolve_duration(
    explicit: Option<f64>,
    voiceover: Option<&str>,
    path: &str,
    defaults: &ExpandDefaults,
) -> ReelResult<f64> {
    match (explicit, voiceover) {
        (Some(secs), _) if !secs.is_finite() => Err(ReelError::validation(format!(
            "{path}.durationInSeconds must be finite (got {secs})"
        ))),
        (Some(secs), _) => Ok(secs),
        (None, Some(text)) => {
            let secs = estimate_duration_secs(text, defaults.words_per_minute)?;
            Ok(secs as f64)
        }
        (None, None) => Err(ReelError::validation(format!(
            "{path} needs durationInSeconds or voiceover"
        ))),
    }
}

fn resolve_animation(
    def: Option<&AnimationDef>,
    segment_secs: f64,
    path: &str,
    defaults: &ExpandDefaults,
) -> ReelResult<Animation> {
    let anim = match def {
        Some(d) => Animation::from_def(d)
            .map_err(|e| ReelError::validation(format!("{path}.animation: {e}")))?,
        None => defaults.animation,
    };

    let (anim, clamped) = anim.clamp_to_segment(segment_secs);
    if clamped && def.is_some() {
        tracing::warn!(
            segment = path,
            kind = anim.kind_name(),
            segment_secs,
            "animation longer than its segment, clamped"
        );
    }
    Ok(anim)
}

fn pick_style(explicit: Option<&Style>, default: &Style) -> Style {
    explicit.cloned().unwrap_or_else(|| default.clone())
}

#[cfg(test)]
#[path = "../../tests/unit/composition/expand.rs"]
mod tests;
