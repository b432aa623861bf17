//! Vector geometry for the crewmate silhouette.
//!
//! All builders work in a body-centred frame measured in the base unit
//! (`48 * scale` pixels) and have no drawing side effects.

use std::f64::consts::TAU;

use crewmate_spec::{Anatomy, VisorGeometry};

use crate::path::Path;
use crate::transform::Point;

/// Body width and height for a base unit and anatomy.
pub fn body_extent(base: f64, anatomy: &Anatomy) -> (f64, f64) {
    (
        base * 1.15 * anatomy.width_mul,
        base * 1.30 * anatomy.height_mul,
    )
}

/// Bean-shaped body outline.
///
/// Five anchors, each rotated by `anatomy.tilt`, joined by cubic segments
/// whose control points sit at fixed per-axis fractions between adjacent
/// anchors. The fractions shape the silhouette and must not be evened out.
pub fn body_path(base: f64, anatomy: &Anatomy) -> Path {
    let (w, h) = body_extent(base, anatomy);
    let anchor = |x: f64, y: f64| Point::new(x, y).rotated(anatomy.tilt);

    let a = anchor(-0.22 * w, -0.50 * h);
    let b = anchor(0.32 * w, -0.26 * h);
    let c = anchor(0.30 * w, 0.16 * h + anatomy.belly * 0.08 * h);
    let d = anchor(-0.18 * w, 0.40 * h);
    let e = anchor(-0.28 * w, -0.05 * h - anatomy.shoulder * 0.10 * h);

    // (from, to, first control fractions, second control fractions)
    let segments = [
        (a, b, (0.35, 0.35), (0.80, 0.65)),
        (b, c, (0.30, 0.15), (0.85, 0.85)),
        (c, d, (0.20, 0.10), (0.75, 0.85)),
        (d, e, (0.20, 0.25), (0.85, 0.80)),
        (e, a, (0.30, 0.10), (0.85, 0.85)),
    ];

    let mut path = Path::new();
    path.move_to(a.x, a.y);
    for (from, to, (t1x, t1y), (t2x, t2y)) in segments {
        path.cubic_to(from.lerp2(&to, t1x, t1y), from.lerp2(&to, t2x, t2y), to);
    }
    path
}

/// Backpack on the left side of the body, one line and two curves.
///
/// `bag_depth` pushes it outward, `bag_height` moves it down.
pub fn backpack_path(base: f64, anatomy: &Anatomy) -> Path {
    let (w, h) = body_extent(base, anatomy);
    let depth = anatomy.bag_depth;
    let by = -0.10 * h + anatomy.bag_height * 0.20 * h;

    let mut path = Path::new();
    path.move_to(-0.28 * w, by)
        .line_to(-0.28 * w - 0.22 * w * depth, by + 0.02 * h)
        .cubic_to(
            Point::new(-0.30 * w - 0.26 * w * depth, by + 0.16 * h),
            Point::new(-0.26 * w - 0.24 * w * depth, by + 0.32 * h),
            Point::new(-0.44 * w, by + 0.34 * h),
        )
        .cubic_to(
            Point::new(-0.36 * w, by + 0.36 * h),
            Point::new(-0.30 * w, by + 0.14 * h),
            Point::new(-0.30 * w, by),
        )
        .close();
    path
}

/// Visor ellipse, offset up and to the right of the body centre.
pub fn visor_path(base: f64, visor: &VisorGeometry) -> Path {
    let mut path = Path::new();
    path.ellipse(
        visor.offset_x * base + 0.08 * base,
        visor.offset_y * base - 0.10 * base,
        visor.width * base,
        visor.height * base,
        visor.tilt,
    );
    path
}

/// Five-point star centred at `(cx, cy)`.
///
/// Vertices step by 4π/5, so the outline crosses itself; filled with the
/// nonzero rule the centre pentagon is solid.
pub fn star_path(cx: f64, cy: f64, size: f64) -> Path {
    let mut path = Path::new();
    for i in 0..5 {
        let angle = i as f64 * 2.0 * TAU / 5.0;
        let x = cx + angle.cos() * size;
        let y = cy + angle.sin() * size;
        if i == 0 {
            path.move_to(x, y);
        } else {
            path.line_to(x, y);
        }
    }
    path.close();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathCommand;

    fn straight() -> Anatomy {
        Anatomy {
            tilt: 0.0,
            belly: 0.0,
            shoulder: 0.0,
            ..Anatomy::default()
        }
    }

    #[test]
    fn test_body_has_five_cubics_and_closes_on_start() {
        let path = body_path(100.0, &Anatomy::default());
        let commands = path.commands();
        assert_eq!(commands.len(), 6);
        let start = match commands[0] {
            PathCommand::MoveTo(p) => p,
            ref other => panic!("expected MoveTo, got {:?}", other),
        };
        match commands[5] {
            PathCommand::CubicTo(_, _, end) => {
                assert!((end.x - start.x).abs() < 1e-9);
                assert!((end.y - start.y).abs() < 1e-9);
            }
            ref other => panic!("expected CubicTo, got {:?}", other),
        }
    }

    #[test]
    fn test_body_first_segment_controls() {
        let base = 100.0;
        let path = body_path(base, &straight());
        let (w, h) = (115.0, 130.0);
        let (ax, ay) = (-0.22 * w, -0.50 * h);
        let (bx, by) = (0.32 * w, -0.26 * h);
        match path.commands()[1] {
            PathCommand::CubicTo(c1, c2, end) => {
                assert!((c1.x - (ax + (bx - ax) * 0.35)).abs() < 1e-9);
                assert!((c1.y - (ay + (by - ay) * 0.35)).abs() < 1e-9);
                assert!((c2.x - (ax + (bx - ax) * 0.80)).abs() < 1e-9);
                assert!((c2.y - (ay + (by - ay) * 0.65)).abs() < 1e-9);
                assert!((end.x - bx).abs() < 1e-9);
            }
            ref other => panic!("expected CubicTo, got {:?}", other),
        }
    }

    #[test]
    fn test_body_scales_linearly() {
        let anatomy = Anatomy::default();
        let small = body_path(50.0, &anatomy).bounds().unwrap();
        let large = body_path(100.0, &anatomy).bounds().unwrap();
        assert!((large.width() / small.width() - 2.0).abs() < 0.01);
        assert!((large.height() / small.height() - 2.0).abs() < 0.01);
    }

    #[test]
    fn test_width_multiplier_only_widens() {
        let base = body_path(100.0, &straight()).bounds().unwrap();
        let wide = Anatomy {
            width_mul: 1.5,
            ..straight()
        };
        let wide = body_path(100.0, &wide).bounds().unwrap();
        assert!((wide.width() / base.width() - 1.5).abs() < 0.01);
        assert!((wide.height() - base.height()).abs() < 1e-6);
    }

    #[test]
    fn test_backpack_sits_left_of_body() {
        let anatomy = Anatomy::default();
        let bag = backpack_path(100.0, &anatomy).bounds().unwrap();
        let body = body_path(100.0, &anatomy).bounds().unwrap();
        assert!(bag.min_x < body.min_x);
        assert!(bag.max_x < 0.0);
    }

    #[test]
    fn test_visor_ellipse_placement() {
        let visor = VisorGeometry::default();
        match visor_path(100.0, &visor).commands()[0] {
            PathCommand::Ellipse {
                center,
                radius_x,
                radius_y,
                rotation,
            } => {
                assert!((center.x - 8.0).abs() < 1e-9);
                assert!((center.y + 10.0).abs() < 1e-9);
                assert!((radius_x - 24.0).abs() < 1e-9);
                assert!((radius_y - 17.0).abs() < 1e-9);
                assert_eq!(rotation, visor.tilt);
            }
            ref other => panic!("expected Ellipse, got {:?}", other),
        }
    }

    #[test]
    fn test_star_vertices_on_circle() {
        let path = star_path(5.0, -3.0, 10.0);
        let mut vertices = 0;
        for command in path.commands() {
            if let PathCommand::MoveTo(p) | PathCommand::LineTo(p) = command {
                assert!(((p.x - 5.0).hypot(p.y + 3.0) - 10.0).abs() < 1e-9);
                vertices += 1;
            }
        }
        assert_eq!(vertices, 5);
        assert_eq!(path.commands().last(), Some(&PathCommand::Close));
    }
}
