use crate::foundation::error::{ReelError, ReelResult};

/// Straight-alpha sRGB color parsed from a CSS color string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CssColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl CssColor {
    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Channels as `[r, g, b, a]`.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// The same color with its alpha scaled by `opacity` in `[0, 1]`.
    pub fn with_opacity(self, opacity: f64) -> Self {
        let a = (f64::from(self.a) * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }
}

/// Parse a CSS color: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb()`, `rgba()`, `hsl()`,
/// `hsla()`, `transparent` or a common named color.
pub fn parse_css_color(input: &str) -> ReelResult<CssColor> {
    let s = input.trim().to_ascii_lowercase();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| invalid(input));
    }
    if let Some(args) = function_args(&s, "rgba").or_else(|| function_args(&s, "rgb")) {
        return parse_rgb_args(args).ok_or_else(|| invalid(input));
    }
    if let Some(args) = function_args(&s, "hsla").or_else(|| function_args(&s, "hsl")) {
        return parse_hsl_args(args).ok_or_else(|| invalid(input));
    }
    named(&s).ok_or_else(|| invalid(input))
}

fn invalid(input: &str) -> ReelError {
    ReelError::validation(format!("unsupported CSS color '{input}'"))
}

fn function_args<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    s.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn parse_hex(hex: &str) -> Option<CssColor> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        3 => Some(CssColor::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Some(CssColor {
            a: nibble(3)?,
            ..CssColor::rgb(nibble(0)?, nibble(1)?, nibble(2)?)
        }),
        6 => Some(CssColor::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(CssColor {
            a: byte(6)?,
            ..CssColor::rgb(byte(0)?, byte(2)?, byte(4)?)
        }),
        _ => None,
    }
}

// Accepts both `1, 2, 3, 0.5` and `1 2 3 / 0.5`.
fn split_args(args: &str) -> Vec<&str> {
    args.split([',', '/', ' '])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

fn parse_alpha(p: &str) -> Option<f64> {
    let v = match p.strip_suffix('%') {
        Some(pct) => pct.parse::<f64>().ok()? / 100.0,
        None => p.parse::<f64>().ok()?,
    };
    v.is_finite().then_some(v.clamp(0.0, 1.0))
}

fn unit_to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn parse_rgb_args(args: &str) -> Option<CssColor> {
    let parts = split_args(args);
    if !(parts.len() == 3 || parts.len() == 4) {
        return None;
    }
    let channel = |p: &str| -> Option<u8> {
        let v = match p.strip_suffix('%') {
            Some(pct) => pct.parse::<f64>().ok()? / 100.0 * 255.0,
            None => p.parse::<f64>().ok()?,
        };
        v.is_finite().then(|| v.clamp(0.0, 255.0).round() as u8)
    };
    let a = match parts.get(3) {
        Some(p) => unit_to_u8(parse_alpha(p)?),
        None => 255,
    };
    Some(CssColor {
        r: channel(parts[0])?,
        g: channel(parts[1])?,
        b: channel(parts[2])?,
        a,
    })
}

fn parse_hsl_args(args: &str) -> Option<CssColor> {
    let parts = split_args(args);
    if !(parts.len() == 3 || parts.len() == 4) {
        return None;
    }
    let h = parts[0].trim_end_matches("deg").parse::<f64>().ok()?;
    let s = parts[1].strip_suffix('%')?.parse::<f64>().ok()? / 100.0;
    let l = parts[2].strip_suffix('%')?.parse::<f64>().ok()? / 100.0;
    let a = match parts.get(3) {
        Some(p) => parse_alpha(p)?,
        None => 1.0,
    };
    if !(h.is_finite() && s.is_finite() && l.is_finite()) {
        return None;
    }
    let [r, g, b] = hsl_to_rgb(h, s, l);
    Some(CssColor {
        r: unit_to_u8(r),
        g: unit_to_u8(g),
        b: unit_to_u8(b),
        a: unit_to_u8(a),
    })
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [f64; 3] {
    let h = (h % 360.0 + 360.0) % 360.0 / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);
    if s == 0.0 {
        return [l, l, l];
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;
    [
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    ]
}

fn named(s: &str) -> Option<CssColor> {
    let c = match s {
        "transparent" => CssColor { r: 0, g: 0, b: 0, a: 0 },
        "black" => CssColor::rgb(0, 0, 0),
        "white" => CssColor::rgb(255, 255, 255),
        "red" => CssColor::rgb(255, 0, 0),
        "green" => CssColor::rgb(0, 128, 0),
        "lime" => CssColor::rgb(0, 255, 0),
        "blue" => CssColor::rgb(0, 0, 255),
        "yellow" => CssColor::rgb(255, 255, 0),
        "cyan" | "aqua" => CssColor::rgb(0, 255, 255),
        "magenta" | "fuchsia" => CssColor::rgb(255, 0, 255),
        "gray" | "grey" => CssColor::rgb(128, 128, 128),
        "silver" => CssColor::rgb(192, 192, 192),
        "lightgray" | "lightgrey" => CssColor::rgb(211, 211, 211),
        "darkgray" | "darkgrey" => CssColor::rgb(169, 169, 169),
        "maroon" => CssColor::rgb(128, 0, 0),
        "navy" => CssColor::rgb(0, 0, 128),
        "teal" => CssColor::rgb(0, 128, 128),
        "olive" => CssColor::rgb(128, 128, 0),
        "purple" => CssColor::rgb(128, 0, 128),
        "orange" => CssColor::rgb(255, 165, 0),
        "pink" => CssColor::rgb(255, 192, 203),
        "gold" => CssColor::rgb(255, 215, 0),
        "brown" => CssColor::rgb(165, 42, 42),
        "indigo" => CssColor::rgb(75, 0, 130),
        "violet" => CssColor::rgb(238, 130, 238),
        "crimson" => CssColor::rgb(220, 20, 60),
        "coral" => CssColor::rgb(255, 127, 80),
        "salmon" => CssColor::rgb(250, 128, 114),
        "tomato" => CssColor::rgb(255, 99, 71),
        "skyblue" => CssColor::rgb(135, 206, 235),
        "steelblue" => CssColor::rgb(70, 130, 180),
        "slategray" | "slategrey" => CssColor::rgb(112, 128, 144),
        "whitesmoke" => CssColor::rgb(245, 245, 245),
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
