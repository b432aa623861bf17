//! Scanline rasterizer producing anti-aliased coverage masks.
//!
//! Coverage uses the nonzero winding rule. Each pixel row is sampled at
//! [`SUBSAMPLES`] evenly spaced sub-scanlines; along each sub-scanline the
//! covered spans contribute their exact horizontal overlap with each pixel.
//!
//! Strokes are turned into polygons before rasterizing: one rectangle per
//! segment plus a disc at each join (and at each end for round caps). All
//! pieces share one orientation, so the nonzero rule yields their union.

use std::f64::consts::TAU;

use crate::path::Polyline;
use crate::transform::Point;

/// Sub-scanlines per pixel row.
pub const SUBSAMPLES: usize = 5;

/// A coverage buffer over a pixel rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    pub x0: i32,
    pub y0: i32,
    pub width: u32,
    pub height: u32,
    /// Row-major coverage in `[0, 1]`.
    pub data: Vec<f32>,
}

impl Mask {
    pub(crate) fn empty_at(x0: i32, y0: i32, width: u32, height: u32) -> Self {
        Self {
            x0,
            y0,
            width,
            height,
            data: vec![0.0; width as usize * height as usize],
        }
    }

    /// A mask that covers nothing.
    pub fn empty() -> Self {
        Self::empty_at(0, 0, 0, 0)
    }

    /// Coverage at a device pixel; zero outside the mask.
    pub fn coverage(&self, x: i32, y: i32) -> f32 {
        let lx = x - self.x0;
        let ly = y - self.y0;
        if lx < 0 || ly < 0 || lx >= self.width as i32 || ly >= self.height as i32 {
            return 0.0;
        }
        self.data[ly as usize * self.width as usize + lx as usize]
    }

    /// Per-pixel product of two masks over their overlapping rectangle.
    pub fn intersect(&self, other: &Mask) -> Mask {
        let x0 = self.x0.max(other.x0);
        let y0 = self.y0.max(other.y0);
        let x1 = (self.x0 + self.width as i32).min(other.x0 + other.width as i32);
        let y1 = (self.y0 + self.height as i32).min(other.y0 + other.height as i32);
        let width = (x1 - x0).max(0) as u32;
        let height = (y1 - y0).max(0) as u32;
        let mut out = Mask::empty_at(x0, y0, width, height);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                let (px, py) = (x0 + x, y0 + y);
                out.data[y as usize * width as usize + x as usize] =
                    self.coverage(px, py) * other.coverage(px, py);
            }
        }
        out
    }

    /// Sum of coverage, i.e. the covered area in pixels.
    pub fn area(&self) -> f64 {
        self.data.iter().map(|&c| c as f64).sum()
    }

    /// Iterates `(x, y, coverage)` over pixels with nonzero coverage.
    pub fn covered(&self) -> impl Iterator<Item = (i32, i32, f32)> + '_ {
        let width = self.width as usize;
        self.data
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0.0)
            .map(move |(i, &c)| {
                (
                    self.x0 + (i % width) as i32,
                    self.y0 + (i / width) as i32,
                    c,
                )
            })
    }
}

#[derive(Debug, Clone, Copy)]
struct Edge {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    winding: i32,
}

impl Edge {
    fn new(a: Point, b: Point) -> Option<Self> {
        if a.y == b.y || !(a.y.is_finite() && b.y.is_finite() && a.x.is_finite() && b.x.is_finite())
        {
            return None;
        }
        Some(if a.y < b.y {
            Edge {
                x0: a.x,
                y0: a.y,
                x1: b.x,
                y1: b.y,
                winding: 1,
            }
        } else {
            Edge {
                x0: b.x,
                y0: b.y,
                x1: a.x,
                y1: a.y,
                winding: -1,
            }
        })
    }

    fn x_at(&self, y: f64) -> f64 {
        self.x0 + (y - self.y0) * (self.x1 - self.x0) / (self.y1 - self.y0)
    }
}

/// Rasterizes closed polygons into a mask clipped to `width` x `height`.
///
/// Returns `None` when nothing lands inside the surface.
pub fn fill_polygons(polygons: &[Vec<Point>], width: u32, height: u32) -> Option<Mask> {
    let mut edges = Vec::new();
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for polygon in polygons {
        if polygon.len() < 3 {
            continue;
        }
        for (i, &a) in polygon.iter().enumerate() {
            let b = polygon[(i + 1) % polygon.len()];
            if let Some(edge) = Edge::new(a, b) {
                min_x = min_x.min(edge.x0.min(edge.x1));
                max_x = max_x.max(edge.x0.max(edge.x1));
                min_y = min_y.min(edge.y0);
                max_y = max_y.max(edge.y1);
                edges.push(edge);
            }
        }
    }
    if edges.is_empty() {
        return None;
    }

    let x0 = (min_x.floor().max(0.0)) as i32;
    let y0 = (min_y.floor().max(0.0)) as i32;
    let x1 = (max_x.ceil().min(width as f64)) as i32;
    let y1 = (max_y.ceil().min(height as f64)) as i32;
    if x1 <= x0 || y1 <= y0 {
        return None;
    }

    let mut mask = Mask::empty_at(x0, y0, (x1 - x0) as u32, (y1 - y0) as u32);
    let mask_width = mask.width as usize;

    edges.sort_by(|a, b| a.y0.total_cmp(&b.y0));
    let mut next_edge = 0;
    let mut active: Vec<Edge> = Vec::new();
    let mut crossings: Vec<(f64, i32)> = Vec::new();
    let weight = 1.0 / SUBSAMPLES as f64;

    for py in y0..y1 {
        let row_start = (py - y0) as usize * mask_width;
        let row = &mut mask.data[row_start..row_start + mask_width];
        for s in 0..SUBSAMPLES {
            let sy = py as f64 + (s as f64 + 0.5) * weight;

            while next_edge < edges.len() && edges[next_edge].y0 <= sy {
                active.push(edges[next_edge]);
                next_edge += 1;
            }
            active.retain(|e| e.y1 > sy);

            crossings.clear();
            crossings.extend(
                active
                    .iter()
                    .filter(|e| e.y0 <= sy)
                    .map(|e| (e.x_at(sy), e.winding)),
            );
            crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut winding = 0;
            let mut span_start = 0.0;
            for &(x, w) in &crossings {
                let was_inside = winding != 0;
                winding += w;
                let is_inside = winding != 0;
                if !was_inside && is_inside {
                    span_start = x;
                } else if was_inside && !is_inside {
                    add_span(row, x0, span_start, x, weight as f32);
                }
            }
        }
    }

    for c in &mut mask.data {
        *c = c.min(1.0);
    }
    Some(mask)
}

/// Adds `weight` times the horizontal overlap of `[xa, xb)` to each pixel.
fn add_span(row: &mut [f32], x0: i32, xa: f64, xb: f64, weight: f32) {
    let left = x0 as f64;
    let right = left + row.len() as f64;
    let xa = xa.max(left);
    let xb = xb.min(right);
    if xb <= xa {
        return;
    }
    let ia = xa.floor();
    let ib = xb.floor();
    let index = |px: f64| (px - left) as usize;

    if ia == ib {
        row[index(ia)] += (xb - xa) as f32 * weight;
        return;
    }
    row[index(ia)] += (ia + 1.0 - xa) as f32 * weight;
    let mut px = ia + 1.0;
    while px < ib {
        row[index(px)] += weight;
        px += 1.0;
    }
    let tail = (xb - ib) as f32;
    let last = index(ib);
    if tail > 0.0 && last < row.len() {
        row[last] += tail * weight;
    }
}

/// End treatment for open subpaths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

/// Stroke geometry. Joins are always round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    /// Line width in user units.
    pub width: f64,
    pub cap: LineCap,
}

impl StrokeStyle {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            cap: LineCap::Butt,
        }
    }

    pub fn round(width: f64) -> Self {
        Self {
            width,
            cap: LineCap::Round,
        }
    }
}

/// Converts device-space polylines into stroke polygons of the given
/// device-space `width`.
pub fn stroke_polygons(polylines: &[Polyline], width: f64, cap: LineCap) -> Vec<Vec<Point>> {
    let half = width / 2.0;
    let mut polygons = Vec::new();
    if !(half.is_finite() && half > 0.0) {
        return polygons;
    }

    for line in polylines {
        let points = dedup(&line.points);
        if points.len() < 2 {
            continue;
        }
        let segment_count = if line.closed {
            points.len()
        } else {
            points.len() - 1
        };
        for i in 0..segment_count {
            let a = points[i];
            let b = points[(i + 1) % points.len()];
            if let Some(quad) = segment_quad(a, b, half) {
                polygons.push(quad);
            }
        }

        let join_range = if line.closed {
            0..points.len()
        } else {
            1..points.len() - 1
        };
        for i in join_range {
            polygons.push(disc(points[i], half));
        }
        if !line.closed && cap == LineCap::Round {
            polygons.push(disc(points[0], half));
            polygons.push(disc(points[points.len() - 1], half));
        }
    }
    polygons
}

fn dedup(points: &[Point]) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        if out.last().map_or(true, |q| q.distance(&p) > 1e-9) {
            out.push(p);
        }
    }
    out
}

/// Rectangle around segment `a`-`b`, in the same orientation as [`disc`].
fn segment_quad(a: Point, b: Point, half: f64) -> Option<Vec<Point>> {
    let length = a.distance(&b);
    if length <= 1e-12 {
        return None;
    }
    let nx = -(b.y - a.y) / length * half;
    let ny = (b.x - a.x) / length * half;
    Some(vec![
        Point::new(a.x + nx, a.y + ny),
        Point::new(b.x + nx, b.y + ny),
        Point::new(b.x - nx, b.y - ny),
        Point::new(a.x - nx, a.y - ny),
    ])
}

/// Disc polygon with an even vertex count, wound by decreasing angle.
fn disc(center: Point, radius: f64) -> Vec<Point> {
    let n = ((TAU * radius).ceil() as usize).clamp(8, 256);
    let n = n + n % 2;
    (0..n)
        .map(|i| {
            let theta = -TAU * i as f64 / n as f64;
            Point::new(
                center.x + radius * theta.cos(),
                center.y + radius * theta.sin(),
            )
        })
        .collect()
}
