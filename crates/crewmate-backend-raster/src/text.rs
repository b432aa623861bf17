//! Decal text.
//!
//! Glyphs come from the bundled DejaVu Sans faces, rasterized by fontdue at
//! the device size of the draw call. The glyph bitmaps are then resampled
//! through the inverse transform into a coverage [`Mask`], so text is
//! mirrored and clipped like every other shape. Characters are drawn as
//! given: case is kept, and a character the face has no glyph for is drawn
//! as U+FFFD rather than dropped.

use std::sync::OnceLock;

use fontdue::{Font as Face, FontSettings};

use crate::raster::Mask;
use crate::transform::{Point, Transform};

static REGULAR_TTF: &[u8] = include_bytes!("../fonts/DejaVuSans.ttf");
static BOLD_TTF: &[u8] = include_bytes!("../fonts/DejaVuSans-Bold.ttf");

/// Drawn in place of characters the face does not cover.
pub const REPLACEMENT_CHAR: char = '\u{FFFD}';

struct Faces {
    regular: Face,
    bold: Face,
}

fn faces() -> Option<&'static Faces> {
    static FACES: OnceLock<Option<Faces>> = OnceLock::new();
    FACES
        .get_or_init(|| {
            let load = |name: &str, bytes: &'static [u8]| {
                Face::from_bytes(bytes, FontSettings::default())
                    .map_err(|e| tracing::warn!("failed to load {} face: {}", name, e))
                    .ok()
            };
            Some(Faces {
                regular: load("regular", REGULAR_TTF)?,
                bold: load("bold", BOLD_TTF)?,
            })
        })
        .as_ref()
}

/// Stroke weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Regular,
    /// DejaVu has no semibold cut; this draws with the bold face.
    Semibold,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    /// Em size in user units.
    pub size_px: f64,
    pub weight: FontWeight,
}

impl Font {
    pub fn new(size_px: f64, weight: FontWeight) -> Self {
        Self { size_px, weight }
    }

    fn face(&self) -> Option<&'static Face> {
        let faces = faces()?;
        Some(match self.weight {
            FontWeight::Regular => &faces.regular,
            FontWeight::Semibold | FontWeight::Bold => &faces.bold,
        })
    }
}

/// Horizontal anchor of the text origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

fn drawable(face: &Face, c: char) -> char {
    if c.is_whitespace() || face.lookup_glyph_index(c) != 0 {
        c
    } else {
        REPLACEMENT_CHAR
    }
}

/// Advance width of `text` in user units.
pub fn measure_text(text: &str, font: &Font) -> f64 {
    let Some(face) = font.face() else {
        return 0.0;
    };
    let size = font.size_px as f32;
    text.chars()
        .map(|c| face.metrics(drawable(face, c), size).advance_width as f64)
        .sum()
}

/// One rasterized glyph placed in user space.
#[derive(Debug, Clone)]
struct GlyphImage {
    left: f64,
    top: f64,
    width: usize,
    height: usize,
    /// User units per bitmap pixel.
    pixel: f64,
    coverage: Vec<u8>,
}

impl GlyphImage {
    fn corners(&self) -> [Point; 4] {
        // One bitmap pixel of margin for the bilinear footprint.
        let (x0, y0) = (self.left - self.pixel, self.top - self.pixel);
        let x1 = self.left + (self.width as f64 + 1.0) * self.pixel;
        let y1 = self.top + (self.height as f64 + 1.0) * self.pixel;
        [
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ]
    }

    fn at(&self, x: i64, y: i64) -> f64 {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return 0.0;
        }
        self.coverage[y as usize * self.width + x as usize] as f64 / 255.0
    }

    /// Bilinear coverage at a user-space point.
    fn sample(&self, p: Point) -> f64 {
        let gx = (p.x - self.left) / self.pixel - 0.5;
        let gy = (p.y - self.top) / self.pixel - 0.5;
        if gx <= -1.0 || gy <= -1.0 || gx >= self.width as f64 || gy >= self.height as f64 {
            return 0.0;
        }
        let (fx, fy) = (gx - gx.floor(), gy - gy.floor());
        let (ix, iy) = (gx.floor() as i64, gy.floor() as i64);
        let upper = self.at(ix, iy) * (1.0 - fx) + self.at(ix + 1, iy) * fx;
        let lower = self.at(ix, iy + 1) * (1.0 - fx) + self.at(ix + 1, iy + 1) * fx;
        upper * (1.0 - fy) + lower * fy
    }
}

/// Glyph bitmaps for a run of text, ready to be resampled onto a surface.
#[derive(Debug, Clone, Default)]
pub struct TextLayout {
    glyphs: Vec<GlyphImage>,
}

impl TextLayout {
    /// Lays out `text` with its vertical middle at `y`.
    ///
    /// `device_scale` is the length scale of the transform the text will be
    /// drawn with; glyphs are rasterized at `size_px * device_scale`.
    pub fn new(
        text: &str,
        x: f64,
        y: f64,
        font: &Font,
        align: TextAlign,
        device_scale: f64,
    ) -> Self {
        let mut layout = Self::default();
        let Some(face) = font.face() else {
            return layout;
        };
        if !(device_scale > 0.0 && font.size_px > 0.0) {
            return layout;
        }

        let size = font.size_px as f32;
        let device_px = (font.size_px * device_scale) as f32;
        let pixel = 1.0 / device_scale;
        let baseline = y + face
            .horizontal_line_metrics(size)
            .map(|m| (m.ascent + m.descent) as f64 / 2.0)
            .unwrap_or(font.size_px * 0.35);
        let mut pen = match align {
            TextAlign::Left => x,
            TextAlign::Center => x - measure_text(text, font) / 2.0,
        };

        for c in text.chars() {
            let c = drawable(face, c);
            let (metrics, coverage) = face.rasterize(c, device_px);
            if metrics.width > 0 && metrics.height > 0 {
                layout.glyphs.push(GlyphImage {
                    left: pen + metrics.xmin as f64 * pixel,
                    top: baseline - (metrics.ymin as f64 + metrics.height as f64) * pixel,
                    width: metrics.width,
                    height: metrics.height,
                    pixel,
                    coverage,
                });
            }
            pen += face.metrics(c, size).advance_width as f64;
        }
        layout
    }

    /// True when nothing in the run has ink.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Coverage of the run under `transform`, limited to a `width` by
    /// `height` surface.
    pub fn rasterize(&self, transform: &Transform, width: u32, height: u32) -> Option<Mask> {
        let inverse = transform.invert()?;
        let corners: Vec<Point> = self
            .glyphs
            .iter()
            .flat_map(|g| g.corners())
            .map(|p| transform.apply(p))
            .collect();
        if corners.is_empty() {
            return None;
        }

        let min_x = corners.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let min_y = corners.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_x = corners.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let max_y = corners.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        let x0 = (min_x.floor() as i64).max(0);
        let y0 = (min_y.floor() as i64).max(0);
        let x1 = (max_x.ceil() as i64).min(width as i64);
        let y1 = (max_y.ceil() as i64).min(height as i64);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }

        let mut mask = Mask::empty_at(x0 as i32, y0 as i32, (x1 - x0) as u32, (y1 - y0) as u32);
        let row = mask.width as usize;
        for (i, cell) in mask.data.iter_mut().enumerate() {
            let device = Point::new(
                (x0 + (i % row) as i64) as f64 + 0.5,
                (y0 + (i / row) as i64) as f64 + 0.5,
            );
            let p = inverse.apply(device);
            let coverage = self
                .glyphs
                .iter()
                .map(|g| g.sample(p))
                .fold(0.0, f64::max);
            *cell = coverage.min(1.0) as f32;
        }
        Some(mask)
    }
}
