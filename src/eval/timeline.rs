use crate::{
    composition::model::{SegmentId, TimelineDocument},
    foundation::core::{FrameIndex, FrameRange, Fps},
    foundation::error::{ReelError, ReelResult},
};

/// Frame span occupied by one segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interval {
    /// First global frame of the segment.
    pub start_frame: u64,
    /// Number of frames; always at least 1.
    pub length_frames: u64,
}

impl Interval {
    /// Exclusive end frame.
    pub fn end_frame(self) -> u64 {
        self.start_frame + self.length_frames
    }

    /// The interval as a half-open frame range.
    pub fn range(self) -> FrameRange {
        FrameRange {
            start: FrameIndex(self.start_frame),
            end: FrameIndex(self.end_frame()),
        }
    }

    /// Return `true` when the global frame falls inside this interval.
    pub fn contains(self, frame: FrameIndex) -> bool {
        self.range().contains(frame)
    }
}

/// Gapless frame layout of a resolved timeline.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineLayout {
    /// Intro interval; always starts at frame 0.
    pub intro: Interval,
    /// One interval per scene, in document order.
    pub scenes: Vec<Interval>,
    /// Outro interval.
    pub outro: Interval,
    /// Sum of all interval lengths.
    pub total_frames: u64,
}

impl TimelineLayout {
    /// Intervals in playback order.
    pub fn segments(&self) -> impl Iterator<Item = (SegmentId, Interval)> + '_ {
        std::iter::once((SegmentId::Intro, self.intro))
            .chain(
                self.scenes
                    .iter()
                    .enumerate()
                    .map(|(i, iv)| (SegmentId::Scene(i), *iv)),
            )
            .chain(std::iter::once((SegmentId::Outro, self.outro)))
    }

    /// Interval of one segment.
    pub fn interval(&self, id: SegmentId) -> Option<Interval> {
        match id {
            SegmentId::Intro => Some(self.intro),
            SegmentId::Scene(i) => self.scenes.get(i).copied(),
            SegmentId::Outro => Some(self.outro),
        }
    }

    /// Find the segment that owns a global frame.
    ///
    /// Returns `None` when the frame is at or past `total_frames`.
    pub fn locate(&self, frame: FrameIndex) -> Option<(SegmentId, Interval)> {
        if frame.0 >= self.total_frames {
            return None;
        }
        if self.intro.contains(frame) {
            return Some((SegmentId::Intro, self.intro));
        }
        if self.outro.contains(frame) {
            return Some((SegmentId::Outro, self.outro));
        }

        // Scenes are sorted by start; find the last one starting at or before `frame`.
        let idx = self
            .scenes
            .partition_point(|iv| iv.start_frame <= frame.0)
            .checked_sub(1)?;
        let iv = self.scenes[idx];
        iv.contains(frame).then_some((SegmentId::Scene(idx), iv))
    }

    /// Re-check that intervals start at 0, touch each other and are non-empty.
    pub fn validate(&self) -> ReelResult<()> {
        let mut cursor = 0u64;
        for (id, iv) in self.segments() {
            if iv.length_frames == 0 {
                return Err(ReelError::evaluation(format!("{id:?} has zero frames")));
            }
            if iv.start_frame != cursor {
                return Err(ReelError::evaluation(format!(
                    "{id:?} starts at frame {} but previous segment ends at {cursor}",
                    iv.start_frame
                )));
            }
            cursor = iv.end_frame();
        }
        if cursor != self.total_frames {
            return Err(ReelError::evaluation(format!(
                "total_frames {} does not match segment sum {cursor}",
                self.total_frames
            )));
        }
        Ok(())
    }
}

/// Frames occupied by a segment of `secs` seconds.
///
/// Each segment is rounded on its own, so the sum may drift from `round(total_secs * fps)` by at
/// most half a frame per segment. Degenerate durations still get one frame.
pub fn segment_frames(secs: f64, fps: Fps) -> u64 {
    let frames = fps.secs_to_frames_round(secs);
    if frames == 0 {
        tracing::warn!(secs, "segment shorter than one frame, clamped to 1 frame");
        return 1;
    }
    frames
}

/// Lay the intro, scenes and outro of `doc` end to end on a frame axis.
#[tracing::instrument(skip(doc), fields(scenes = doc.scenes.len()))]
pub fn composite(doc: &TimelineDocument, fps: Fps) -> ReelResult<TimelineLayout> {
    let mut cursor = 0u64;
    let mut place = |secs: f64| -> ReelResult<Interval> {
        let length_frames = segment_frames(secs, fps);
        let iv = Interval {
            start_frame: cursor,
            length_frames,
        };
        cursor = cursor
            .checked_add(length_frames)
            .ok_or_else(|| ReelError::evaluation("timeline frame count overflows u64"))?;
        Ok(iv)
    };

    let intro = place(doc.intro.duration_secs)?;
    let scenes = doc
        .scenes
        .iter()
        .map(|s| place(s.duration_secs))
        .collect::<ReelResult<Vec<_>>>()?;
    let outro = place(doc.outro.duration_secs)?;

    let layout = TimelineLayout {
        intro,
        scenes,
        outro,
        total_frames: outro.end_frame(),
    };
    tracing::debug!(total_frames = layout.total_frames, "timeline composited");
    Ok(layout)
}

#[cfg(test)]
#[path = "../../tests/unit/eval/timeline.rs"]
mod tests;
