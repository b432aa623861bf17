//! Frame renderer: paints one fully composed crewmate.
//!
//! Layers are painted in a fixed order, each finished before the next:
//!
//! 1. ground shadow
//! 2. body fill (smooth gradient or cel bands), then the backpack
//! 3. multiply shadow passes clipped to the body
//! 4. rim light stroke
//! 5. visor
//! 6. main outline and inner dark stroke
//! 7. feet
//! 8. decal, clipped to the body
//! 9. accessory

mod accessory;
mod decal;
mod feet;
mod shading;
mod visor;

use std::f64::consts::TAU;

use crewmate_spec::{Animation, CharacterAppearance, PoseState};

use crate::canvas::DrawState;
use crate::color::{BlendMode, Color};
use crate::geometry::{backpack_path, body_path, visor_path};
use crate::paint::Paint;
use crate::path::Path;
use crate::raster::StrokeStyle;
use crate::surface::Surface;
use crate::transform::Point;

/// Geometry and lighting shared by every layer of one frame.
pub(crate) struct Figure<'a> {
    pub appearance: &'a CharacterAppearance,
    pub base: f64,
    pub body: Path,
    pub pack: Path,
    pub visor: Path,
    /// Direction of the key light (`cos`, `sin` of the key angle).
    pub light: Point,
}

impl<'a> Figure<'a> {
    fn new(appearance: &'a CharacterAppearance) -> Self {
        let base = appearance.base();
        let key = (appearance.key_angle % 360.0).to_radians();
        Self {
            appearance,
            base,
            body: body_path(base, &appearance.anatomy),
            pack: backpack_path(base, &appearance.anatomy),
            visor: visor_path(base, &appearance.visor_geometry),
            light: Point::new(key.cos(), key.sin()),
        }
    }

    /// Where the key light hits the body, in body coordinates.
    pub fn light_spot(&self) -> Point {
        Point::new(
            self.light.x * self.base * 0.10,
            -self.light.y * self.base * 0.12,
        )
    }

    /// Line width of `factor` base units scaled by the outline multiplier,
    /// never thinner than one pixel.
    pub fn line_width(&self, factor: f64) -> f64 {
        (self.base * factor * self.appearance.outline_width).max(1.0)
    }

    pub fn outline_paint(&self) -> Paint {
        Paint::Solid(Color::from_hex(&self.appearance.outline_color))
    }
}

/// Walk phase in cycles. Only the walk animation moves.
fn walk_phase(pose: &PoseState) -> f64 {
    match pose.animation {
        Animation::Walk => pose.frame as f64 / 12.0,
        _ => 0.0,
    }
}

/// Paints one crewmate with its body centre at `(x, y)`.
///
/// The appearance is not validated: unknown light styles shade in bands,
/// and unknown decal kinds or accessories draw nothing.
pub fn draw_crewmate(
    surface: &mut Surface,
    x: f64,
    y: f64,
    appearance: &CharacterAppearance,
    pose: &PoseState,
) {
    let figure = Figure::new(appearance);
    let base = figure.base;

    let mut state = DrawState::new().translate(x, y);
    if pose.direction.is_mirrored() {
        state = state.scale(-1.0, 1.0);
    }
    let phase = walk_phase(pose);
    let bob_y = (phase * TAU).sin() * base * 0.06;
    let state = state.translate(0.0, bob_y);

    let mut ground = Path::new();
    ground.ellipse(0.0, base * 0.78, base * 0.34, base * 0.14, 0.0);
    surface.fill_path(
        &state,
        &ground,
        &Paint::Solid(Color::hex_alpha("#000", 0.28)),
        BlendMode::SourceOver,
    );

    shading::paint_body(surface, &state, &figure);
    shading::paint_backpack(surface, &state, &figure);
    shading::paint_shadows(surface, &state, &figure);

    let rim = Paint::Solid(Color::hex_alpha(
        &appearance.rim_color,
        appearance.rim_intensity,
    ));
    surface.stroke_path(
        &state,
        &figure.body,
        &StrokeStyle::new(figure.line_width(0.026)),
        &rim,
        BlendMode::SourceOver,
    );

    visor::paint_visor(surface, &state, &figure);

    let outline = StrokeStyle::round(figure.line_width(0.040));
    let outline_paint = figure.outline_paint();
    surface.stroke_path(&state, &figure.body, &outline, &outline_paint, BlendMode::SourceOver);
    surface.stroke_path(&state, &figure.pack, &outline, &outline_paint, BlendMode::SourceOver);
    surface.stroke_path(
        &state,
        &figure.body,
        &StrokeStyle::round(figure.line_width(0.018)),
        &Paint::Solid(Color::hex_alpha("#000", 0.22)),
        BlendMode::SourceOver,
    );

    let step = match pose.animation {
        Animation::Walk => (phase * TAU).sin() * base * 0.075,
        _ => 0.0,
    };
    feet::paint_foot(surface, &state, &figure, base * 0.06 + step, base * 0.78);
    feet::paint_foot(surface, &state, &figure, -base * 0.16 - step, base * 0.78);

    if let Some(decal) = &appearance.decal {
        decal::paint_decal(surface, &state, &figure, decal);
    }

    if let Some(accessory) = &appearance.accessory {
        let anchor_y = -base * 0.78 * appearance.anatomy.height_mul;
        accessory::paint_accessory(surface, &state.translate(0.0, anchor_y), &figure, accessory);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crewmate_spec::{Direction, Preset};

    #[test]
    fn test_walk_phase() {
        assert_eq!(walk_phase(&PoseState::walk(6, Direction::Right)), 0.5);
        let idle = PoseState::new(Animation::Idle, 6, Direction::Right);
        assert_eq!(walk_phase(&idle), 0.0);
    }

    #[test]
    fn test_line_width_floor() {
        let appearance = Preset::Classic.appearance().with_scale(0.1);
        let figure = Figure::new(&appearance);
        assert_eq!(figure.line_width(0.040), 1.0);
        let appearance = Preset::Classic.appearance();
        let figure = Figure::new(&appearance);
        assert!((figure.line_width(0.040) - 48.0 * 2.8 * 0.040).abs() < 1e-9);
    }

    #[test]
    fn test_key_light_direction() {
        let appearance = Preset::Classic.appearance();
        let figure = Figure::new(&appearance);
        // 315 degrees: light from the upper right in screen space.
        assert!(figure.light.x > 0.0);
        assert!(figure.light.y < 0.0);
        let spot = figure.light_spot();
        assert!(spot.x > 0.0 && spot.y > 0.0);
    }

    #[test]
    fn test_draws_inside_surface() {
        let appearance = Preset::Classic.appearance();
        let mut surface = Surface::new(229, 216);
        draw_crewmate(
            &mut surface,
            114.5,
            108.0,
            &appearance,
            &PoseState::default(),
        );
        // The halo pokes out of the top edge and the ground shadow out of
        // the bottom; horizontally the figure fits.
        let (x0, y0, x1, y1) = surface.alpha_bounds(0.0).unwrap();
        assert!(x0 > 0 && x1 < 228);
        assert_eq!((y0, y1), (0, 215));
        assert!(surface.get(114, 108).a > 0.99);
    }
}
