use super::*;

#[test]
fn parses_hex_forms() {
    assert_eq!(parse_css_color("#1e293b").unwrap(), CssColor::rgb(0x1e, 0x29, 0x3b));
    assert_eq!(parse_css_color("#FFF").unwrap(), CssColor::rgb(255, 255, 255));
    assert_eq!(
        parse_css_color("#0f08").unwrap(),
        CssColor {
            r: 0,
            g: 255,
            b: 0,
            a: 136
        }
    );
    assert_eq!(parse_css_color("#11223380").unwrap().a, 0x80);
    assert!(parse_css_color("#12345").is_err());
    assert!(parse_css_color("#zzzzzz").is_err());
}

#[test]
fn parses_functional_forms() {
    assert_eq!(
        parse_css_color("rgb(10, 20, 30)").unwrap(),
        CssColor::rgb(10, 20, 30)
    );
    assert_eq!(parse_css_color("rgba(10, 20, 30, 0.5)").unwrap().a, 128);
    assert_eq!(parse_css_color("rgb(10 20 30 / 50%)").unwrap().a, 128);
    assert_eq!(parse_css_color("rgb(100%, 0%, 0%)").unwrap(), CssColor::rgb(255, 0, 0));
    assert_eq!(parse_css_color("hsl(0, 100%, 50%)").unwrap(), CssColor::rgb(255, 0, 0));
    assert_eq!(
        parse_css_color("hsla(120deg, 100%, 25%, 1)").unwrap(),
        CssColor::rgb(0, 128, 0)
    );
    assert!(parse_css_color("rgb(1, 2)").is_err());
}

#[test]
fn parses_named_colors_case_insensitively() {
    assert_eq!(parse_css_color("white").unwrap(), CssColor::rgb(255, 255, 255));
    assert_eq!(parse_css_color(" Black ").unwrap(), CssColor::rgb(0, 0, 0));
    assert_eq!(parse_css_color("transparent").unwrap().a, 0);
    let err = parse_css_color("not-a-color").unwrap_err();
    assert!(err.to_string().contains("not-a-color"));
}

#[test]
fn opacity_scales_alpha_only() {
    let c = CssColor::rgb(255, 128, 0).with_opacity(0.5);
    assert_eq!(c.to_array(), [255, 128, 0, 128]);
    assert_eq!(c.with_opacity(0.0).a, 0);
}
