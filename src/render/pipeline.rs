use std::path::PathBuf;

use crate::{
    assets::{
        color::{CssColor, parse_css_color},
        store::AssetStore,
    },
    encode::{
        ffmpeg::{FfmpegSink, FfmpegSinkOpts},
        sink::{FrameSink, SinkConfig},
    },
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{ReelError, ReelResult},
    render::{
        assembler::Assembly,
        backend::{FrameRGBA, RenderBackend},
        fingerprint::{FrameFingerprint, fingerprint_frame},
    },
};

/// Describe and rasterize a single frame.
///
/// Returns a [`FrameRGBA`] containing **premultiplied** RGBA8 pixels.
pub fn render_frame(
    assembly: &Assembly,
    frame: FrameIndex,
    backend: &mut dyn RenderBackend,
    assets: &AssetStore,
) -> ReelResult<FrameRGBA> {
    let described = assembly.frame_at(frame)?;
    backend.render(&described, assets)
}

#[derive(Clone, Debug, Default)]
/// Controls for multi-frame rendering.
pub struct RenderOpts {
    /// Frames to render; the whole timeline when `None`.
    pub range: Option<FrameRange>,
    /// Reuse the previous frame's pixels when its description is unchanged.
    pub static_frame_elision: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Aggregated rendering counters.
pub struct RenderStats {
    /// Total requested frames.
    pub frames_total: u64,
    /// Frames that were actually rasterized.
    pub frames_rendered: u64,
    /// Frames reused via static-frame elision.
    pub frames_elided: u64,
}

/// Render a frame range in increasing order and push every frame into `sink`.
#[tracing::instrument(skip_all, fields(total_frames = assembly.total_frames()))]
pub fn render_to_sink(
    assembly: &Assembly,
    opts: &RenderOpts,
    backend: &mut dyn RenderBackend,
    assets: &AssetStore,
    sink: &mut dyn FrameSink,
) -> ReelResult<RenderStats> {
    let range = resolve_range(assembly, opts.range)?;
    let canvas = backend.canvas();
    let background = parse_css_color(&assembly.document().background_color)
        .unwrap_or(CssColor::rgb(0, 0, 0));

    sink.begin(SinkConfig {
        width: canvas.width,
        height: canvas.height,
        fps: assembly.fps(),
        background: background.to_array(),
    })?;

    let stats = match push_range(assembly, opts, range, backend, assets, sink) {
        Ok(stats) => stats,
        Err(e) => {
            sink.abort();
            return Err(e);
        }
    };

    sink.end()?;
    tracing::info!(
        rendered = stats.frames_rendered,
        elided = stats.frames_elided,
        "render finished"
    );
    Ok(stats)
}

fn push_range(
    assembly: &Assembly,
    opts: &RenderOpts,
    range: FrameRange,
    backend: &mut dyn RenderBackend,
    assets: &AssetStore,
    sink: &mut dyn FrameSink,
) -> ReelResult<RenderStats> {
    tracing::debug!(start = range.start.0, frames = range.len_frames(), "rendering range");
    let mut stats = RenderStats::default();
    let mut previous: Option<(FrameFingerprint, FrameRGBA)> = None;
    for f in range.start.0..range.end.0 {
        let idx = FrameIndex(f);
        let described = assembly.frame_at(idx)?;
        stats.frames_total += 1;

        if opts.static_frame_elision {
            let fp = fingerprint_frame(&described);
            if let Some((prev_fp, prev_frame)) = previous.as_ref()
                && *prev_fp == fp
            {
                sink.push_frame(idx, prev_frame)?;
                stats.frames_elided += 1;
                continue;
            }
            let pixels = backend.render(&described, assets)?;
            stats.frames_rendered += 1;
            sink.push_frame(idx, &pixels)?;
            previous = Some((fp, pixels));
        } else {
            let pixels = backend.render(&described, assets)?;
            stats.frames_rendered += 1;
            sink.push_frame(idx, &pixels)?;
        }
    }
    Ok(stats)
}

/// Render to an MP4 file through the system `ffmpeg`.
pub fn render_to_mp4(
    assembly: &Assembly,
    out_path: impl Into<PathBuf>,
    opts: &RenderOpts,
    backend: &mut dyn RenderBackend,
    assets: &AssetStore,
) -> ReelResult<RenderStats> {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(out_path));
    render_to_sink(assembly, opts, backend, assets, &mut sink)
}

fn resolve_range(assembly: &Assembly, range: Option<FrameRange>) -> ReelResult<FrameRange> {
    let total = assembly.total_frames();
    let range = range.unwrap_or(FrameRange {
        start: FrameIndex(0),
        end: FrameIndex(total),
    });
    if range.is_empty() {
        return Err(ReelError::validation("render range must be non-empty"));
    }
    if range.start.0 > range.end.0 || range.end.0 > total {
        return Err(ReelError::validation(format!(
            "render range {}..{} must lie within 0..{total}",
            range.start.0, range.end.0
        )));
    }
    Ok(range)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
