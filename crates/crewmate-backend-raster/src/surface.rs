//! Raster drawing surface.

use crate::color::{BlendMode, Color};

/// RGBA pixel buffer, row-major, non-premultiplied.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
    pub data: Vec<Color>,
}

impl Surface {
    /// Creates a transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![Color::transparent(); width as usize * height as usize],
        }
    }

    /// Changes the dimensions. Like a canvas resize, this discards all
    /// existing content.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.data.clear();
        self.data
            .resize(width as usize * height as usize, Color::transparent());
    }

    /// Resets every pixel to transparent.
    pub fn clear(&mut self) {
        self.data.fill(Color::transparent());
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Pixel at `(x, y)`; transparent when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Color {
        if x < self.width && y < self.height {
            self.data[self.index(x, y)]
        } else {
            Color::transparent()
        }
    }

    /// Sets a pixel; out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            let i = self.index(x, y);
            self.data[i] = color;
        }
    }

    /// Composites `color` at `(x, y)` with the given coverage.
    pub fn blend(&mut self, x: i32, y: i32, color: &Color, coverage: f64, mode: BlendMode) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let i = self.index(x as u32, y as u32);
        self.data[i] = mode.composite(&self.data[i], color, coverage);
    }

    /// Draws `src` over this surface with its top-left at `(dx, dy)`.
    pub fn draw_surface(&mut self, src: &Surface, dx: i32, dy: i32) {
        for sy in 0..src.height {
            for sx in 0..src.width {
                let pixel = src.data[src.index(sx, sy)];
                if pixel.a > 0.0 {
                    self.blend(
                        dx + sx as i32,
                        dy + sy as i32,
                        &pixel,
                        1.0,
                        BlendMode::SourceOver,
                    );
                }
            }
        }
    }

    /// Copies the `width` x `height` region at `(x, y)` into a new surface.
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> Surface {
        let mut out = Surface::new(width, height);
        for oy in 0..height {
            for ox in 0..width {
                out.set(ox, oy, self.get(x + ox, y + oy));
            }
        }
        out
    }

    /// Resamples to `width` x `height` by area averaging.
    ///
    /// Every output pixel averages the source area it covers, weighting
    /// partially covered source pixels by overlap. Averaging happens on
    /// premultiplied colour so transparent pixels do not darken edges.
    pub fn downsample_to(&self, width: u32, height: u32) -> Surface {
        let mut out = Surface::new(width, height);
        if width == 0 || height == 0 || self.width == 0 || self.height == 0 {
            return out;
        }
        let x_spans = area_spans(self.width, width);
        let y_spans = area_spans(self.height, height);

        for (oy, ys) in y_spans.iter().enumerate() {
            for (ox, xs) in x_spans.iter().enumerate() {
                let (mut r, mut g, mut b, mut a, mut total) = (0.0, 0.0, 0.0, 0.0, 0.0);
                for &(sy, wy) in ys {
                    for &(sx, wx) in xs {
                        let w = wx * wy;
                        let c = self.data[self.index(sx, sy)];
                        r += c.r * c.a * w;
                        g += c.g * c.a * w;
                        b += c.b * c.a * w;
                        a += c.a * w;
                        total += w;
                    }
                }
                if total > 0.0 && a > 0.0 {
                    out.set(
                        ox as u32,
                        oy as u32,
                        Color::rgba(r / a, g / a, b / a, a / total),
                    );
                }
            }
        }
        out
    }

    /// Converts to 8-bit RGBA bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.data.iter().flat_map(|c| c.to_rgba8()).collect()
    }

    /// Bounding box `(min_x, min_y, max_x, max_y)` of pixels whose alpha
    /// exceeds `threshold`, inclusive.
    pub fn alpha_bounds(&self, threshold: f64) -> Option<(u32, u32, u32, u32)> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for y in 0..self.height {
            for x in 0..self.width {
                if self.data[self.index(x, y)].a > threshold {
                    bounds = Some(match bounds {
                        None => (x, y, x, y),
                        Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                    });
                }
            }
        }
        bounds
    }
}

/// For each of `dst` output cells along one axis, the source pixels it
/// overlaps with their overlap lengths.
fn area_spans(src: u32, dst: u32) -> Vec<Vec<(u32, f64)>> {
    let step = src as f64 / dst as f64;
    (0..dst)
        .map(|o| {
            let start = o as f64 * step;
            let end = (start + step).min(src as f64);
            let first = start.floor() as u32;
            let last = (end.ceil() as u32).min(src);
            (first..last)
                .filter_map(|s| {
                    let overlap = end.min(s as f64 + 1.0) - start.max(s as f64);
                    (overlap > 0.0).then_some((s, overlap))
                })
                .collect()
        })
        .collect()
}
