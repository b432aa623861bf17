//! Body fill, backpack fill and body shadow passes.

use crewmate_spec::LightStyle;

use super::Figure;
use crate::canvas::DrawState;
use crate::color::{shade, shade_color, BlendMode, Color};
use crate::paint::{GradientStop, Paint};
use crate::path::Path;
use crate::surface::Surface;
use crate::transform::Point;

const CEL3_TONES: [f64; 3] = [0.18, 0.00, -0.20];
const CEL5_TONES: [f64; 5] = [0.22, 0.10, -0.04, -0.16, -0.28];

/// Tone offsets for banded light styles. Anything that is not `cel3`
/// gets five bands.
fn band_tones(style: &LightStyle) -> &'static [f64] {
    match style {
        LightStyle::Cel3 => &CEL3_TONES,
        _ => &CEL5_TONES,
    }
}

pub(super) fn paint_body(surface: &mut Surface, state: &DrawState, figure: &Figure) {
    let body_color = &figure.appearance.body_color;
    let base = figure.base;

    if figure.appearance.light_style == LightStyle::Soft {
        let gradient = Paint::Linear {
            start: Point::new(-base, -base),
            end: Point::new(base, base),
            stops: vec![
                GradientStop::new(0.0, shade_color(body_color, 0.10)),
                GradientStop::new(0.5, Color::from_hex(body_color)),
                GradientStop::new(1.0, shade_color(body_color, -0.10)),
            ],
        };
        surface.fill_path(state, &figure.body, &gradient, BlendMode::SourceOver);
        return;
    }

    surface.fill_path(
        state,
        &figure.body,
        &Paint::Solid(shade_color(body_color, 0.05)),
        BlendMode::SourceOver,
    );
    let clipped = state.with_clip(&figure.body, surface.width, surface.height);
    let spot = figure.light_spot();
    for (i, tone) in band_tones(&figure.appearance.light_style).iter().enumerate() {
        let rotation = if i % 2 == 1 { 0.10 } else { -0.12 };
        let mut band = Path::new();
        band.ellipse(
            spot.x,
            spot.y,
            base * (0.46 - 0.06 * i as f64),
            base * (0.30 - 0.05 * i as f64),
            rotation,
        );
        let paint = Paint::Solid(Color::hex_alpha(&shade(body_color, *tone), 0.95));
        surface.fill_path(&clipped, &band, &paint, BlendMode::SourceOver);
    }
}

pub(super) fn paint_backpack(surface: &mut Surface, state: &DrawState, figure: &Figure) {
    let body_color = &figure.appearance.body_color;
    let gradient = Paint::linear(
        Point::new(-figure.base * 2.0, 0.0),
        Point::new(0.0, 0.0),
        shade_color(body_color, -0.08),
        shade_color(body_color, 0.04),
    );
    surface.fill_path(state, &figure.pack, &gradient, BlendMode::SourceOver);
}

/// Core shadow away from the key light plus a top-down ambient
/// occlusion band, both multiplied inside the body.
pub(super) fn paint_shadows(surface: &mut Surface, state: &DrawState, figure: &Figure) {
    let base = figure.base;
    let clipped = state.with_clip(&figure.body, surface.width, surface.height);
    let spot = figure.light_spot();

    let core = Paint::radial(
        spot,
        base * 0.06,
        spot,
        base * 0.70,
        Color::hex_alpha("#000", 0.0),
        Color::hex_alpha("#000", 0.25),
    );
    surface.fill_rect(
        &clipped,
        -base * 4.0,
        -base * 4.0,
        base * 8.0,
        base * 8.0,
        &core,
        BlendMode::Multiply,
    );

    let ambient = Paint::linear(
        Point::new(0.0, -base * 0.02),
        Point::new(0.0, base * 0.30),
        Color::hex_alpha("#000", 0.22),
        Color::hex_alpha("#000", 0.0),
    );
    surface.fill_rect(
        &clipped,
        -base * 2.0,
        -base * 0.02,
        base * 4.0,
        base * 0.50,
        &ambient,
        BlendMode::Multiply,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crewmate_spec::Preset;

    fn render_body(style: LightStyle) -> Surface {
        let appearance = Preset::Classic.appearance().with_light_style(style);
        let figure = Figure::new(&appearance);
        let mut surface = Surface::new(229, 216);
        let state = DrawState::new().translate(114.5, 108.0);
        paint_body(&mut surface, &state, &figure);
        surface
    }

    #[test]
    fn test_band_counts() {
        assert_eq!(band_tones(&LightStyle::Cel3).len(), 3);
        assert_eq!(band_tones(&LightStyle::Cel5).len(), 5);
        assert_eq!(band_tones(&LightStyle::Metallic).len(), 5);
        assert_eq!(band_tones(&LightStyle::Other("neon".into())).len(), 5);
    }

    #[test]
    fn test_unknown_style_shades_like_cel5() {
        let cel5 = render_body(LightStyle::Cel5);
        let unknown = render_body(LightStyle::Other("neon".into()));
        let soft = render_body(LightStyle::Soft);
        assert_eq!(cel5, unknown);
        assert_ne!(cel5, soft);
    }

    #[test]
    fn test_shadows_only_darken_inside_body() {
        let appearance = Preset::Classic.appearance();
        let figure = Figure::new(&appearance);
        let mut surface = Surface::new(229, 216);
        let state = DrawState::new().translate(114.5, 108.0);
        paint_body(&mut surface, &state, &figure);
        let before = surface.clone();
        paint_shadows(&mut surface, &state, &figure);
        for (a, b) in before.data.iter().zip(&surface.data) {
            assert!(b.r <= a.r + 1e-12);
            if a.a == 0.0 {
                assert_eq!(a, b);
            }
        }
        assert_eq!(surface.get(2, 2), Color::transparent());
    }
}
