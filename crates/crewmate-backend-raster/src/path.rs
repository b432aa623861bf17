//! Vector paths as command lists, flattened to polylines for rasterizing.

use std::f64::consts::TAU;

use crate::transform::{Point, Transform};

/// Maximum chord deviation, in device pixels, when flattening curves.
const FLATTEN_TOLERANCE: f64 = 0.05;

/// One drawing command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// Quadratic Bézier: control, end.
    QuadTo(Point, Point),
    /// Cubic Bézier: control 1, control 2, end.
    CubicTo(Point, Point, Point),
    /// A full ellipse, always its own closed subpath.
    Ellipse {
        center: Point,
        radius_x: f64,
        radius_y: f64,
        rotation: f64,
    },
    Close,
}

/// A flattened subpath in device space.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub closed: bool,
}

/// Axis-aligned bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    fn include(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }
}

/// An ordered list of drawing commands, built once and painted many times.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(Point::new(x, y)));
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.commands.push(PathCommand::LineTo(Point::new(x, y)));
        self
    }

    pub fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) -> &mut Self {
        self.commands
            .push(PathCommand::QuadTo(Point::new(cx, cy), Point::new(x, y)));
        self
    }

    pub fn cubic_to(&mut self, c1: Point, c2: Point, end: Point) -> &mut Self {
        self.commands.push(PathCommand::CubicTo(c1, c2, end));
        self
    }

    pub fn ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, rotation: f64) -> &mut Self {
        self.commands.push(PathCommand::Ellipse {
            center: Point::new(cx, cy),
            radius_x: rx,
            radius_y: ry,
            rotation,
        });
        self
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64) -> &mut Self {
        self.ellipse(cx, cy, r, r, 0.0)
    }

    /// Closed axis-aligned rectangle as its own subpath.
    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> &mut Self {
        self.move_to(x, y)
            .line_to(x + w, y)
            .line_to(x + w, y + h)
            .line_to(x, y + h)
            .close()
    }

    pub fn close(&mut self) -> &mut Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Rectangle path shorthand.
    pub fn from_rect(x: f64, y: f64, w: f64, h: f64) -> Path {
        let mut path = Path::new();
        path.rect(x, y, w, h);
        path
    }

    /// Flattens to device-space polylines under `transform`.
    ///
    /// Subpaths with fewer than two points are dropped.
    pub fn flatten(&self, transform: &Transform) -> Vec<Polyline> {
        let mut out = Vec::new();
        let mut current: Vec<Point> = Vec::new();
        // Last point and subpath start in user space.
        let mut last: Option<Point> = None;
        let mut start: Option<Point> = None;
        let scale = transform.scale_factor();

        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => {
                    finish_subpath(&mut current, false, &mut out);
                    current.push(transform.apply(p));
                    last = Some(p);
                    start = Some(p);
                }
                PathCommand::LineTo(p) => {
                    if last.is_none() {
                        start = Some(p);
                    }
                    current.push(transform.apply(p));
                    last = Some(p);
                }
                PathCommand::QuadTo(c, p) => {
                    let p0 = begin_segment(&mut current, &mut last, &mut start, c, transform);
                    let d0 = transform.apply(p0);
                    let d1 = transform.apply(c);
                    let d2 = transform.apply(p);
                    let dd = second_difference(d0, d1, d2);
                    let n = segment_count((dd / (4.0 * FLATTEN_TOLERANCE)).sqrt());
                    for i in 1..=n {
                        let t = i as f64 / n as f64;
                        let mt = 1.0 - t;
                        current.push(Point::new(
                            mt * mt * d0.x + 2.0 * mt * t * d1.x + t * t * d2.x,
                            mt * mt * d0.y + 2.0 * mt * t * d1.y + t * t * d2.y,
                        ));
                    }
                    last = Some(p);
                }
                PathCommand::CubicTo(c1, c2, p) => {
                    let p0 = begin_segment(&mut current, &mut last, &mut start, c1, transform);
                    let d0 = transform.apply(p0);
                    let d1 = transform.apply(c1);
                    let d2 = transform.apply(c2);
                    let d3 = transform.apply(p);
                    let dd = second_difference(d0, d1, d2).max(second_difference(d1, d2, d3));
                    let n = segment_count((0.75 * dd / FLATTEN_TOLERANCE).sqrt());
                    for i in 1..=n {
                        let t = i as f64 / n as f64;
                        let mt = 1.0 - t;
                        let w0 = mt * mt * mt;
                        let w1 = 3.0 * mt * mt * t;
                        let w2 = 3.0 * mt * t * t;
                        let w3 = t * t * t;
                        current.push(Point::new(
                            w0 * d0.x + w1 * d1.x + w2 * d2.x + w3 * d3.x,
                            w0 * d0.y + w1 * d1.y + w2 * d2.y + w3 * d3.y,
                        ));
                    }
                    last = Some(p);
                }
                PathCommand::Ellipse {
                    center,
                    radius_x,
                    radius_y,
                    rotation,
                } => {
                    finish_subpath(&mut current, false, &mut out);
                    let radius = radius_x.abs().max(radius_y.abs()) * scale;
                    let n = ellipse_segments(radius);
                    let (sin, cos) = rotation.sin_cos();
                    let points = (0..n)
                        .map(|i| {
                            let theta = TAU * i as f64 / n as f64;
                            let lx = radius_x * theta.cos();
                            let ly = radius_y * theta.sin();
                            transform.apply(Point::new(
                                center.x + lx * cos - ly * sin,
                                center.y + lx * sin + ly * cos,
                            ))
                        })
                        .collect();
                    out.push(Polyline {
                        points,
                        closed: true,
                    });
                    last = None;
                    start = None;
                }
                PathCommand::Close => {
                    finish_subpath(&mut current, true, &mut out);
                    // A new subpath begins at the closed subpath's start.
                    if let Some(s) = start {
                        current.push(transform.apply(s));
                        last = Some(s);
                    }
                }
            }
        }
        finish_subpath(&mut current, false, &mut out);
        out
    }

    /// Bounds of the flattened path in its own coordinates.
    pub fn bounds(&self) -> Option<Bounds> {
        self.flattened_bounds(&Transform::identity())
    }

    /// Bounds of the flattened path under `transform`.
    pub fn flattened_bounds(&self, transform: &Transform) -> Option<Bounds> {
        let polylines = self.flatten(transform);
        let first = polylines.first()?.points.first().copied()?;
        let mut bounds = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in polylines.iter().flat_map(|pl| pl.points.iter()) {
            bounds.include(*p);
        }
        Some(bounds)
    }
}

fn finish_subpath(points: &mut Vec<Point>, closed: bool, out: &mut Vec<Polyline>) {
    if points.len() >= 2 {
        out.push(Polyline {
            points: std::mem::take(points),
            closed,
        });
    } else {
        points.clear();
    }
}

/// Returns the user-space start point of a curve segment, opening a new
/// subpath at `fallback` when there is no current point.
fn begin_segment(
    current: &mut Vec<Point>,
    last: &mut Option<Point>,
    start: &mut Option<Point>,
    fallback: Point,
    transform: &Transform,
) -> Point {
    match *last {
        Some(p) => p,
        None => {
            current.push(transform.apply(fallback));
            *last = Some(fallback);
            *start = Some(fallback);
            fallback
        }
    }
}

fn second_difference(a: Point, b: Point, c: Point) -> f64 {
    (a.x - 2.0 * b.x + c.x).hypot(a.y - 2.0 * b.y + c.y)
}

fn segment_count(estimate: f64) -> usize {
    if estimate.is_finite() {
        (estimate.ceil() as usize).clamp(1, 256)
    } else {
        1
    }
}

/// Even vertex count so that mirrored ellipses flatten to mirrored polygons.
fn ellipse_segments(radius: f64) -> usize {
    let n = if radius.is_finite() {
        (std::f64::consts::PI * (radius / (2.0 * FLATTEN_TOLERANCE)).sqrt()).ceil() as usize
    } else {
        16
    };
    let n = n.clamp(16, 512);
    n + n % 2
}
