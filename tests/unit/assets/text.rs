use super::*;

#[test]
fn css_alignment_defaults_to_center() {
    assert_eq!(TextAlign::from_css(Some("left")), TextAlign::Left);
    assert_eq!(TextAlign::from_css(Some(" Right ")), TextAlign::Right);
    assert_eq!(TextAlign::from_css(Some("justify")), TextAlign::Center);
    assert_eq!(TextAlign::from_css(None), TextAlign::Center);
}

#[test]
fn layout_without_font_fails() {
    let mut engine = TextLayoutEngine::new();
    assert!(engine.family_name().is_none());
    let req = TextRequest {
        text: "hello",
        size_px: 30.0,
        bold: false,
        align: TextAlign::Center,
        box_width_px: 200.0,
        brush: TextBrushRgba8::default(),
    };
    assert!(matches!(engine.layout(&req), Err(ReelError::Evaluation(_))));
}

#[test]
fn garbage_font_bytes_are_rejected() {
    let mut engine = TextLayoutEngine::new();
    assert!(engine.register_font(b"not a font").is_err());
}

#[test]
fn invalid_size_is_rejected() {
    let mut engine = TextLayoutEngine::new();
    let req = TextRequest {
        text: "x",
        size_px: f32::NAN,
        bold: false,
        align: TextAlign::Left,
        box_width_px: 10.0,
        brush: TextBrushRgba8::default(),
    };
    assert!(matches!(engine.layout(&req), Err(ReelError::Validation(_))));
}
