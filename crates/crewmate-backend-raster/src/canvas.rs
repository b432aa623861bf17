//! Painting paths onto a [`Surface`].
//!
//! There is no mutable context: every call takes a [`DrawState`] (current
//! transform and clip), a paint and a blend mode. Nested drawing derives a
//! new state from the parent instead of saving and restoring.

use std::rc::Rc;

use crate::color::BlendMode;
use crate::paint::Paint;
use crate::path::Path;
use crate::raster::{fill_polygons, stroke_polygons, Mask, StrokeStyle};
use crate::surface::Surface;
use crate::text::{Font, TextAlign, TextLayout};
use crate::transform::{Point, Transform};

/// Transform and clip in effect for a draw call.
#[derive(Debug, Clone, Default)]
pub struct DrawState {
    pub transform: Transform,
    /// Device-space coverage that every paint is multiplied by.
    pub clip: Option<Rc<Mask>>,
}

impl DrawState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate(&self, tx: f64, ty: f64) -> Self {
        self.with_transform(self.transform.translate(tx, ty))
    }

    pub fn rotate(&self, angle: f64) -> Self {
        self.with_transform(self.transform.rotate(angle))
    }

    pub fn scale(&self, sx: f64, sy: f64) -> Self {
        self.with_transform(self.transform.scale(sx, sy))
    }

    fn with_transform(&self, transform: Transform) -> Self {
        Self {
            transform,
            clip: self.clip.clone(),
        }
    }

    /// Narrows the clip to `path` filled under the current transform.
    ///
    /// `width` and `height` bound the clip to the target surface.
    pub fn with_clip(&self, path: &Path, width: u32, height: u32) -> Self {
        let polygons: Vec<Vec<Point>> = path
            .flatten(&self.transform)
            .into_iter()
            .map(|line| line.points)
            .collect();
        let mask = fill_polygons(&polygons, width, height).unwrap_or_else(Mask::empty);
        let clip = match &self.clip {
            Some(outer) => outer.intersect(&mask),
            None => mask,
        };
        Self {
            transform: self.transform,
            clip: Some(Rc::new(clip)),
        }
    }
}

impl Surface {
    /// Fills `path` using the nonzero winding rule.
    pub fn fill_path(&mut self, state: &DrawState, path: &Path, paint: &Paint, mode: BlendMode) {
        let polygons: Vec<Vec<Point>> = path
            .flatten(&state.transform)
            .into_iter()
            .map(|line| line.points)
            .collect();
        if let Some(mask) = fill_polygons(&polygons, self.width, self.height) {
            self.paint_mask(state, &mask, paint, mode);
        }
    }

    /// Strokes `path`. The line width is in user units and scales with the
    /// transform.
    pub fn stroke_path(
        &mut self,
        state: &DrawState,
        path: &Path,
        style: &StrokeStyle,
        paint: &Paint,
        mode: BlendMode,
    ) {
        let polylines = path.flatten(&state.transform);
        let width = style.width * state.transform.scale_factor();
        let polygons = stroke_polygons(&polylines, width, style.cap);
        if let Some(mask) = fill_polygons(&polygons, self.width, self.height) {
            self.paint_mask(state, &mask, paint, mode);
        }
    }

    pub fn fill_rect(
        &mut self,
        state: &DrawState,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        paint: &Paint,
        mode: BlendMode,
    ) {
        self.fill_path(state, &Path::from_rect(x, y, w, h), paint, mode);
    }

    pub fn stroke_rect(
        &mut self,
        state: &DrawState,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        style: &StrokeStyle,
        paint: &Paint,
    ) {
        self.stroke_path(
            state,
            &Path::from_rect(x, y, w, h),
            style,
            paint,
            BlendMode::SourceOver,
        );
    }

    /// Fills `text` with its vertical middle at `y`.
    pub fn fill_text(
        &mut self,
        state: &DrawState,
        text: &str,
        x: f64,
        y: f64,
        font: &Font,
        align: TextAlign,
        paint: &Paint,
    ) {
        let layout = TextLayout::new(text, x, y, font, align, state.transform.scale_factor());
        if let Some(mask) = layout.rasterize(&state.transform, self.width, self.height) {
            self.paint_mask(state, &mask, paint, BlendMode::SourceOver);
        }
    }

    fn paint_mask(&mut self, state: &DrawState, mask: &Mask, paint: &Paint, mode: BlendMode) {
        let clipped;
        let mask = match &state.clip {
            Some(clip) => {
                clipped = mask.intersect(clip);
                &clipped
            }
            None => mask,
        };

        match paint {
            Paint::Solid(color) => {
                for (x, y, coverage) in mask.covered() {
                    self.blend(x, y, color, coverage as f64, mode);
                }
            }
            gradient => {
                // Gradients are sampled in the user space of this call.
                let Some(inverse) = state.transform.invert() else {
                    return;
                };
                for (x, y, coverage) in mask.covered() {
                    let p = inverse.apply(Point::new(x as f64 + 0.5, y as f64 + 0.5));
                    let color = gradient.color_at(p);
                    self.blend(x, y, &color, coverage as f64, mode);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::raster::LineCap;

    fn opaque_count(surface: &Surface) -> usize {
        surface.data.iter().filter(|c| c.a > 0.99).count()
    }

    #[test]
    fn test_fill_rect_solid() {
        let mut surface = Surface::new(10, 10);
        let state = DrawState::new().translate(2.0, 2.0);
        surface.fill_rect(
            &state,
            0.0,
            0.0,
            4.0,
            3.0,
            &Paint::Solid(Color::white()),
            BlendMode::SourceOver,
        );
        assert_eq!(opaque_count(&surface), 12);
        assert_eq!(surface.alpha_bounds(0.0), Some((2, 2, 5, 4)));
    }

    #[test]
    fn test_clip_limits_fill() {
        let mut surface = Surface::new(10, 10);
        let state = DrawState::new().with_clip(&Path::from_rect(0.0, 0.0, 5.0, 10.0), 10, 10);
        surface.fill_rect(
            &state,
            0.0,
            0.0,
            10.0,
            10.0,
            &Paint::Solid(Color::white()),
            BlendMode::SourceOver,
        );
        assert_eq!(opaque_count(&surface), 50);
    }

    #[test]
    fn test_nested_clips_intersect() {
        let mut surface = Surface::new(10, 10);
        let state = DrawState::new()
            .with_clip(&Path::from_rect(0.0, 0.0, 6.0, 10.0), 10, 10)
            .with_clip(&Path::from_rect(4.0, 0.0, 6.0, 10.0), 10, 10);
        surface.fill_rect(
            &state,
            0.0,
            0.0,
            10.0,
            10.0,
            &Paint::Solid(Color::white()),
            BlendMode::SourceOver,
        );
        assert_eq!(opaque_count(&surface), 20);
    }

    #[test]
    fn test_clip_outside_surface_hides_everything() {
        let mut surface = Surface::new(4, 4);
        let state = DrawState::new().with_clip(&Path::from_rect(10.0, 10.0, 2.0, 2.0), 4, 4);
        surface.fill_rect(
            &state,
            0.0,
            0.0,
            4.0,
            4.0,
            &Paint::Solid(Color::white()),
            BlendMode::SourceOver,
        );
        assert!(surface.alpha_bounds(0.0).is_none());
    }

    #[test]
    fn test_gradient_uses_user_space() {
        let mut surface = Surface::new(20, 1);
        // Gradient runs 0..10 in user space, which is 0..20 on the device.
        let state = DrawState::new().scale(2.0, 1.0);
        let paint = Paint::linear(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Color::black(),
            Color::white(),
        );
        surface.fill_rect(&state, 0.0, 0.0, 10.0, 1.0, &paint, BlendMode::SourceOver);
        let left = surface.get(0, 0);
        let right = surface.get(19, 0);
        assert!(left.r < 0.05);
        assert!(right.r > 0.95);
        let mid = surface.get(10, 0);
        assert!((mid.r - 0.525).abs() < 1e-9);
    }

    #[test]
    fn test_stroke_width_scales_with_transform() {
        let mut thin = Surface::new(40, 40);
        let mut thick = Surface::new(40, 40);
        let mut path = Path::new();
        path.move_to(5.0, 10.0).line_to(15.0, 10.0);
        let style = StrokeStyle {
            width: 2.0,
            cap: LineCap::Butt,
        };
        let white = Paint::Solid(Color::white());
        thin.stroke_path(&DrawState::new(), &path, &style, &white, BlendMode::SourceOver);
        thick.stroke_path(
            &DrawState::new().scale(2.0, 2.0),
            &path,
            &style,
            &white,
            BlendMode::SourceOver,
        );
        let area = |s: &Surface| s.data.iter().map(|c| c.a).sum::<f64>();
        assert!((area(&thin) - 20.0).abs() < 0.5);
        assert!((area(&thick) - 80.0).abs() < 1.0);
    }

    #[test]
    fn test_text_draws_ink() {
        let mut surface = Surface::new(40, 20);
        let font = Font::new(10.0, crate::text::FontWeight::Bold);
        surface.fill_text(
            &DrawState::new(),
            "07",
            20.0,
            10.0,
            &font,
            TextAlign::Center,
            &Paint::Solid(Color::white()),
        );
        let (x0, _, x1, _) = surface.alpha_bounds(0.0).unwrap();
        assert!(x0 < 20 && x1 > 20);
    }
}
