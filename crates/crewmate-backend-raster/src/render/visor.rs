//! Visor: gradient glass, screen-blended glare and a light rim.

use super::Figure;
use crate::canvas::DrawState;
use crate::color::{shade_color, BlendMode, Color};
use crate::paint::Paint;
use crate::raster::StrokeStyle;
use crate::surface::Surface;
use crate::transform::Point;

/// Diagonal glass gradient. The antenna accessory reuses it for its stalk.
pub(super) fn visor_gradient(figure: &Figure) -> Paint {
    let base = figure.base;
    let visor_color = &figure.appearance.visor_color;
    Paint::linear(
        Point::new(-base * 0.30, -base * 0.30),
        Point::new(base * 0.30, base * 0.30),
        shade_color(visor_color, 0.06),
        shade_color(visor_color, -0.08),
    )
}

pub(super) fn paint_visor(surface: &mut Surface, state: &DrawState, figure: &Figure) {
    let base = figure.base;
    surface.fill_path(
        state,
        &figure.visor,
        &visor_gradient(figure),
        BlendMode::SourceOver,
    );

    let inside = state.with_clip(&figure.visor, surface.width, surface.height);
    let glare = Paint::radial(
        Point::new(base * 0.16, -base * 0.18),
        base * 0.02,
        Point::new(base * 0.12, -base * 0.06),
        base * 0.30,
        Color::hex_alpha("#fff", 0.45),
        Color::hex_alpha("#000", 0.0),
    );
    surface.fill_rect(
        &inside,
        -base,
        -base,
        base * 2.0,
        base * 2.0,
        &glare,
        BlendMode::Screen,
    );

    let streak = Paint::Solid(Color::hex_alpha("#fff", 0.12));
    let upper = inside.rotate(figure.appearance.visor_geometry.tilt - 0.04);
    surface.fill_rect(
        &upper,
        -base * 0.04,
        -base * 0.06,
        base * 0.30,
        base * 0.014,
        &streak,
        BlendMode::Screen,
    );
    let lower = upper.rotate(0.16);
    surface.fill_rect(
        &lower,
        -base * 0.02,
        0.0,
        base * 0.24,
        base * 0.012,
        &streak,
        BlendMode::Screen,
    );

    surface.stroke_path(
        state,
        &figure.visor,
        &StrokeStyle::new(base * 0.012),
        &Paint::Solid(Color::hex_alpha("#ffffff", 0.35)),
        BlendMode::SourceOver,
    );
}
