use crate::{
    animation::{
        estimate::DEFAULT_WORDS_PER_MINUTE,
        kind::{AnimWindow, Animation},
    },
    composition::model::Style,
};

/// Everything the expander fills in when a document leaves it out.
///
/// `Default` reproduces the product defaults. Callers that need another house style build
/// their own value instead of patching globals.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpandDefaults {
    /// Speaking rate used to estimate missing durations.
    pub words_per_minute: f64,
    /// Animation for segments that do not specify one.
    pub animation: Animation,
    /// Intro/outro heading.
    pub heading: Style,
    /// Intro/outro subheading.
    pub subheading: Style,
    /// Scene title.
    pub scene_title: Style,
    /// Scene description.
    pub scene_description: Style,
    /// Scene image.
    pub scene_image: Style,
}

impl Default for ExpandDefaults {
    fn default() -> Self {
        Self {
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            animation: Animation::ZoomOut(AnimWindow::linear(1.0)),
            heading: text_style("60px", Some("bold"), "20px"),
            subheading: text_style("30px", None, "10px"),
            scene_title: text_style("50px", Some("bold"), "20px"),
            scene_description: text_style("30px", None, "20px"),
            scene_image: Style {
                width: Some("600px".to_string()),
                height: Some("400px".to_string()),
                border_radius: Some("10px".to_string()),
                margin: Some("auto".to_string()),
                ..Style::default()
            },
        }
    }
}

fn text_style(font_size: &str, font_weight: Option<&str>, margin_bottom: &str) -> Style {
    Style {
        font_size: Some(font_size.to_string()),
        font_weight: font_weight.map(str::to_string),
        text_align: Some("center".to_string()),
        margin_bottom: Some(margin_bottom.to_string()),
        ..Style::default()
    }
}
