use super::*;
use crate::composition::{
    defaults::ExpandDefaults,
    expand::expand,
    model::{BoundaryDef, SceneDef, TimelineDef},
};

fn doc(intro: f64, scenes: &[f64], outro: f64) -> TimelineDocument {
    let boundary = |secs: f64| BoundaryDef {
        duration_in_seconds: Some(secs),
        voiceover: Some("narration".to_string()),
        ..BoundaryDef::default()
    };
    let def = TimelineDef {
        title: Some("t".to_string()),
        background_color: Some("#000".to_string()),
        text_color: Some("white".to_string()),
        font_family: Some("sans-serif".to_string()),
        intro: Some(boundary(intro)),
        scenes: Some(
            scenes
                .iter()
                .map(|&secs| SceneDef {
                    duration_in_seconds: Some(secs),
                    ..SceneDef::default()
                })
                .collect(),
        ),
        outro: Some(boundary(outro)),
    };
    expand(&def, &ExpandDefaults::default()).unwrap()
}

fn fps30() -> Fps {
    Fps::whole(30).unwrap()
}

#[test]
fn intervals_are_laid_end_to_end() {
    let layout = composite(&doc(5.0, &[10.0], 5.0), fps30()).unwrap();
    assert_eq!(
        layout.intro,
        Interval {
            start_frame: 0,
            length_frames: 150
        }
    );
    assert_eq!(
        layout.scenes,
        vec![Interval {
            start_frame: 150,
            length_frames: 300
        }]
    );
    assert_eq!(
        layout.outro,
        Interval {
            start_frame: 450,
            length_frames: 150
        }
    );
    assert_eq!(layout.total_frames, 600);
    layout.validate().unwrap();
}

#[test]
fn zero_scenes_puts_outro_after_intro() {
    let layout = composite(&doc(2.0, &[], 3.0), fps30()).unwrap();
    assert!(layout.scenes.is_empty());
    assert_eq!(layout.outro.start_frame, 60);
    assert_eq!(layout.total_frames, 150);
}

#[test]
fn degenerate_durations_get_one_frame() {
    let layout = composite(&doc(0.0, &[-3.0, 0.01], 1.0), fps30()).unwrap();
    assert_eq!(layout.intro.length_frames, 1);
    assert_eq!(layout.scenes[0].length_frames, 1);
    assert_eq!(layout.scenes[1].length_frames, 1);
    assert_eq!(layout.scenes[1].start_frame, 2);
    layout.validate().unwrap();
}

#[test]
fn rounding_drift_is_bounded() {
    let scenes = [0.35, 1.05, 2.45, 0.75, 3.15];
    let layout = composite(&doc(1.25, &scenes, 0.65), fps30()).unwrap();
    layout.validate().unwrap();

    let total_secs: f64 = 1.25 + scenes.iter().sum::<f64>() + 0.65;
    let ideal = (total_secs * 30.0).round() as i64;
    let drift = (layout.total_frames as i64 - ideal).abs();
    let n_segments = (scenes.len() + 2) as i64;
    assert!(drift * 2 <= n_segments, "drift {drift} too large");
}

#[test]
fn every_frame_belongs_to_exactly_one_segment() {
    let layout = composite(&doc(1.0, &[0.5, 2.0, 0.2], 1.0), fps30()).unwrap();
    for f in 0..layout.total_frames {
        let owners = layout
            .segments()
            .filter(|(_, iv)| iv.contains(FrameIndex(f)))
            .count();
        assert_eq!(owners, 1, "frame {f}");

        let (id, iv) = layout.locate(FrameIndex(f)).unwrap();
        assert!(iv.contains(FrameIndex(f)));
        assert_eq!(layout.interval(id), Some(iv));
    }
    assert!(layout.locate(FrameIndex(layout.total_frames)).is_none());
}

#[test]
fn locate_maps_boundaries() {
    let layout = composite(&doc(5.0, &[10.0, 2.0], 5.0), fps30()).unwrap();
    assert_eq!(layout.locate(FrameIndex(0)).unwrap().0, SegmentId::Intro);
    assert_eq!(layout.locate(FrameIndex(149)).unwrap().0, SegmentId::Intro);
    assert_eq!(layout.locate(FrameIndex(150)).unwrap().0, SegmentId::Scene(0));
    assert_eq!(layout.locate(FrameIndex(450)).unwrap().0, SegmentId::Scene(1));
    assert_eq!(layout.locate(FrameIndex(510)).unwrap().0, SegmentId::Outro);
    assert_eq!(layout.locate(FrameIndex(659)).unwrap().0, SegmentId::Outro);
}

#[test]
fn validate_rejects_gaps() {
    let mut layout = composite(&doc(1.0, &[1.0], 1.0), fps30()).unwrap();
    layout.scenes[0].start_frame += 1;
    assert!(layout.validate().is_err());
}

#[test]
fn composite_is_deterministic() {
    let d = doc(1.5, &[2.25, 4.0], 1.0);
    assert_eq!(composite(&d, fps30()).unwrap(), composite(&d, fps30()).unwrap());
}
