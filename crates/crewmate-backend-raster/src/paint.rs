//! Fill and stroke paints: solid colours and gradients.
//!
//! Gradient geometry lives in the user space of the draw call that uses
//! it; [`Paint::color_at`] takes a point in that same space.

use crate::color::Color;
use crate::transform::Point;

/// A colour stop on a gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient, 0 to 1.
    pub offset: f64,
    pub color: Color,
}

impl GradientStop {
    pub fn new(offset: f64, color: Color) -> Self {
        Self { offset, color }
    }
}

/// What a fill or stroke paints with.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Linear gradient along `start` to `end`, padded beyond both ends.
    Linear {
        start: Point,
        end: Point,
        stops: Vec<GradientStop>,
    },
    /// Two-circle radial gradient, padded beyond both circles.
    Radial {
        c0: Point,
        r0: f64,
        c1: Point,
        r1: f64,
        stops: Vec<GradientStop>,
    },
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

impl Paint {
    /// Two-stop linear gradient.
    pub fn linear(start: Point, end: Point, from: Color, to: Color) -> Self {
        Paint::Linear {
            start,
            end,
            stops: vec![GradientStop::new(0.0, from), GradientStop::new(1.0, to)],
        }
    }

    /// Two-stop radial gradient.
    pub fn radial(c0: Point, r0: f64, c1: Point, r1: f64, from: Color, to: Color) -> Self {
        Paint::Radial {
            c0,
            r0,
            c1,
            r1,
            stops: vec![GradientStop::new(0.0, from), GradientStop::new(1.0, to)],
        }
    }

    /// Colour at a user-space point. Degenerate gradients paint nothing.
    pub fn color_at(&self, p: Point) -> Color {
        match self {
            Paint::Solid(color) => *color,
            Paint::Linear { start, end, stops } => {
                let dx = end.x - start.x;
                let dy = end.y - start.y;
                let len2 = dx * dx + dy * dy;
                if len2 <= 0.0 {
                    return Color::transparent();
                }
                let t = ((p.x - start.x) * dx + (p.y - start.y) * dy) / len2;
                sample_stops(stops, t)
            }
            Paint::Radial {
                c0,
                r0,
                c1,
                r1,
                stops,
            } => {
                if c0 == c1 && r0 == r1 {
                    return Color::transparent();
                }
                match radial_parameter(p, *c0, *r0, *c1, *r1) {
                    Some(t) => sample_stops(stops, t),
                    None => Color::transparent(),
                }
            }
        }
    }
}

/// Solves for the largest `w` such that `p` lies on the circle
/// interpolated at `w` and that circle's radius is non-negative.
fn radial_parameter(p: Point, c0: Point, r0: f64, c1: Point, r1: f64) -> Option<f64> {
    let (cdx, cdy) = (c1.x - c0.x, c1.y - c0.y);
    let (pdx, pdy) = (p.x - c0.x, p.y - c0.y);
    let dr = r1 - r0;

    let a = cdx * cdx + cdy * cdy - dr * dr;
    let b = pdx * cdx + pdy * cdy + r0 * dr;
    let c = pdx * pdx + pdy * pdy - r0 * r0;
    let radius_ok = |w: f64| r0 + w * dr >= 0.0;

    if a.abs() < 1e-12 {
        if b.abs() < 1e-12 {
            return None;
        }
        let w = c / (2.0 * b);
        return radius_ok(w).then_some(w);
    }

    let disc = b * b - a * c;
    if disc < 0.0 {
        return None;
    }
    let root = disc.sqrt();
    let (w1, w2) = ((b + root) / a, (b - root) / a);
    let (hi, lo) = if w1 >= w2 { (w1, w2) } else { (w2, w1) };
    if radius_ok(hi) {
        Some(hi)
    } else if radius_ok(lo) {
        Some(lo)
    } else {
        None
    }
}

/// Colour at gradient position `t`, clamped to the end stops.
fn sample_stops(stops: &[GradientStop], t: f64) -> Color {
    let (first, last) = match (stops.first(), stops.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Color::transparent(),
    };
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            if span <= 0.0 {
                return b.color;
            }
            return a.color.lerp(&b.color, (t - a.offset) / span);
        }
    }
    last.color
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Color {
        Color::rgb(1.0, 0.0, 0.0)
    }

    fn blue() -> Color {
        Color::rgb(0.0, 0.0, 1.0)
    }

    #[test]
    fn test_linear_pads_and_interpolates() {
        let paint = Paint::linear(Point::new(0.0, 0.0), Point::new(10.0, 0.0), red(), blue());
        assert_eq!(paint.color_at(Point::new(-5.0, 3.0)), red());
        assert_eq!(paint.color_at(Point::new(50.0, -2.0)), blue());
        let mid = paint.color_at(Point::new(5.0, 7.0));
        assert!((mid.r - 0.5).abs() < 1e-12);
        assert!((mid.b - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_diagonal_linear() {
        let paint = Paint::linear(Point::new(-1.0, -1.0), Point::new(1.0, 1.0), red(), blue());
        // Points on the perpendicular through the origin share the midpoint.
        let a = paint.color_at(Point::new(0.5, -0.5));
        let b = paint.color_at(Point::new(-3.0, 3.0));
        assert!((a.r - b.r).abs() < 1e-12);
        assert!((a.r - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_linear_is_transparent() {
        let p = Point::new(1.0, 1.0);
        let paint = Paint::linear(p, p, red(), blue());
        assert_eq!(paint.color_at(Point::new(0.0, 0.0)), Color::transparent());
    }

    #[test]
    fn test_concentric_radial() {
        let c = Point::new(0.0, 0.0);
        let paint = Paint::radial(c, 1.0, c, 11.0, red(), blue());
        assert_eq!(paint.color_at(Point::new(0.5, 0.0)), red());
        assert_eq!(paint.color_at(Point::new(0.0, 20.0)), blue());
        let mid = paint.color_at(Point::new(0.0, 6.0));
        assert!((mid.b - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_offset_radial_matches_circle_equation() {
        let c0 = Point::new(2.0, -1.0);
        let c1 = Point::new(0.0, 1.0);
        let (r0, r1) = (0.5, 8.0);
        let t = radial_parameter(Point::new(3.0, 2.0), c0, r0, c1, r1).unwrap();
        let cx = c0.x + t * (c1.x - c0.x);
        let cy = c0.y + t * (c1.y - c0.y);
        let r = r0 + t * (r1 - r0);
        assert!(((3.0 - cx).hypot(2.0 - cy) - r).abs() < 1e-9);
    }

    #[test]
    fn test_stop_sampling_edges() {
        assert_eq!(sample_stops(&[], 0.5), Color::transparent());
        let stops = [
            GradientStop::new(0.0, red()),
            GradientStop::new(0.5, Color::white()),
            GradientStop::new(1.0, blue()),
        ];
        assert_eq!(sample_stops(&stops, 0.5), Color::white());
        assert_eq!(sample_stops(&stops, f64::NAN), red());
        let q = sample_stops(&stops, 0.75);
        assert!((q.r - 0.5).abs() < 1e-12);
        assert!((q.b - 1.0).abs() < 1e-12);
    }
}
