use super::Figure;
use crate::canvas::DrawState;
use crate::color::{shade_color, BlendMode};
use crate::paint::Paint;
use crate::path::Path;
use crate::raster::StrokeStyle;
use crate::surface::Surface;

/// One foot: outlined sole ellipse with a small highlight, centred at
/// `(x, y)` in body coordinates.
pub(super) fn paint_foot(
    surface: &mut Surface,
    state: &DrawState,
    figure: &Figure,
    x: f64,
    y: f64,
) {
    let base = figure.base;
    let body_color = &figure.appearance.body_color;
    let squash = figure.appearance.anatomy.foot_squash;
    let state = state.translate(x, y);

    let mut sole = Path::new();
    sole.ellipse(
        0.0,
        0.0,
        base * (0.12 + squash * 0.03),
        base * (0.085 - squash * 0.02),
        0.0,
    );
    surface.fill_path(
        &state,
        &sole,
        &Paint::Solid(shade_color(body_color, -0.02)),
        BlendMode::SourceOver,
    );
    surface.stroke_path(
        &state,
        &sole,
        &StrokeStyle::new(figure.line_width(0.03)),
        &figure.outline_paint(),
        BlendMode::SourceOver,
    );

    let mut highlight = Path::new();
    highlight.ellipse(base * 0.06, -base * 0.01, base * 0.04, base * 0.02, 0.0);
    surface.fill_path(
        &state,
        &highlight,
        &Paint::Solid(shade_color(body_color, 0.04)),
        BlendMode::SourceOver,
    );
}
