//! Colours, hex parsing, and blend modes.

/// RGBA color with f64 components (0.0 to 1.0 range), not premultiplied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    /// Create a new color with alpha = 1.0.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a new color with alpha.
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    pub const fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }

    /// Fully transparent black.
    pub const fn transparent() -> Self {
        Self::rgba(0.0, 0.0, 0.0, 0.0)
    }

    /// Parses a hex colour string; malformed input yields black.
    pub fn from_hex(hex: &str) -> Self {
        Self::from_rgb8(parse_hex(hex))
    }

    /// Parses a hex colour and applies `alpha`.
    pub fn hex_alpha(hex: &str, alpha: f64) -> Self {
        Self::from_hex(hex).with_alpha(alpha)
    }

    /// Returns this colour with its alpha replaced.
    pub fn with_alpha(&self, alpha: f64) -> Self {
        Self { a: alpha, ..*self }
    }

    /// Linearly interpolate between two colors.
    pub fn lerp(&self, other: &Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Clamp all components to [0.0, 1.0].
    pub fn clamp(&self) -> Color {
        Color {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
            a: self.a.clamp(0.0, 1.0),
        }
    }

    /// Convert to 8-bit RGBA.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let c = self.clamp();
        [
            (c.r * 255.0).round() as u8,
            (c.g * 255.0).round() as u8,
            (c.b * 255.0).round() as u8,
            (c.a * 255.0).round() as u8,
        ]
    }

    /// Create from 8-bit RGB, fully opaque.
    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        Self::rgb(
            rgb[0] as f64 / 255.0,
            rgb[1] as f64 / 255.0,
            rgb[2] as f64 / 255.0,
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::transparent()
    }
}

/// Parses `#rrggbb` or `#rgb` (the `#` is optional) into 8-bit channels.
///
/// Shorthand expands CSS-style (`#f80` is `#ff8800`). Anything else,
/// including non-hex digits, parses to black.
pub fn parse_hex(hex: &str) -> [u8; 3] {
    let digits = hex.trim().trim_start_matches('#');
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return [0, 0, 0],
    };
    let channel = |i: usize| {
        expanded
            .get(i..i + 2)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
    };
    match (channel(0), channel(2), channel(4)) {
        (Some(r), Some(g), Some(b)) => [r, g, b],
        _ => [0, 0, 0],
    }
}

/// Formats 8-bit channels as lowercase `#rrggbb`.
pub fn to_hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

/// Lightens (`delta > 0`) or darkens (`delta < 0`) a hex colour.
///
/// Each channel moves toward 255 or 0 by `min(1, |delta|)` and is rounded.
/// `shade(c, 0.0)` returns `c` normalized to lowercase `#rrggbb`.
pub fn shade(hex: &str, delta: f64) -> String {
    let rgb = parse_hex(hex);
    let target = if delta > 0.0 { 255.0 } else { 0.0 };
    let amount = delta.abs().min(1.0);
    let mix = |c: u8| {
        let c = c as f64;
        (c + (target - c) * amount).round().clamp(0.0, 255.0) as u8
    };
    to_hex([mix(rgb[0]), mix(rgb[1]), mix(rgb[2])])
}

/// Shades a hex colour and returns it as an opaque [`Color`].
pub fn shade_color(hex: &str, delta: f64) -> Color {
    Color::from_hex(&shade(hex, delta))
}

/// Compositing operator for a paint call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    #[default]
    SourceOver,
    Multiply,
    Screen,
}

impl BlendMode {
    /// Separable blend function B(backdrop, source).
    fn mix(&self, cb: f64, cs: f64) -> f64 {
        match self {
            BlendMode::SourceOver => cs,
            BlendMode::Multiply => cb * cs,
            BlendMode::Screen => cb + cs - cb * cs,
        }
    }

    /// Composites `src` onto `dst` with `src.a * coverage` as source alpha.
    ///
    /// The blend result replaces the source colour where the backdrop is
    /// opaque, then the pair is combined with source-over.
    pub fn composite(&self, dst: &Color, src: &Color, coverage: f64) -> Color {
        let sa = (src.a * coverage).clamp(0.0, 1.0);
        if sa <= 0.0 {
            return *dst;
        }
        let da = dst.a.clamp(0.0, 1.0);
        if da <= 0.0 {
            return Color { a: sa, ..*src };
        }
        let out_a = sa + da * (1.0 - sa);
        let channel = |cb: f64, cs: f64| {
            let blended = (1.0 - da) * cs + da * self.mix(cb, cs);
            (sa * blended + da * (1.0 - sa) * cb) / out_a
        };
        Color {
            r: channel(dst.r, src.r),
            g: channel(dst.g, src.g),
            b: channel(dst.b, src.b),
            a: out_a,
        }
    }
}
