//! Body decals, all clipped to the body silhouette.

use crewmate_spec::{Decal, DecalKind};

use super::Figure;
use crate::canvas::DrawState;
use crate::color::{BlendMode, Color};
use crate::geometry::star_path;
use crate::paint::Paint;
use crate::path::Path;
use crate::raster::StrokeStyle;
use crate::surface::Surface;
use crate::text::{measure_text, Font, FontWeight, TextAlign};

pub const DEFAULT_NUMBER_TEXT: &str = "07";
pub const DEFAULT_BADGE_TEXT: &str = "CREW";

/// Empty strings count as unset.
fn text_or<'a>(text: &'a Option<String>, fallback: &'a str) -> &'a str {
    text.as_deref().filter(|t| !t.is_empty()).unwrap_or(fallback)
}

pub(super) fn paint_decal(
    surface: &mut Surface,
    state: &DrawState,
    figure: &Figure,
    decal: &Decal,
) {
    if decal.kind == DecalKind::None {
        return;
    }
    let base = figure.base;
    let clipped = state.with_clip(&figure.body, surface.width, surface.height);
    let paint = Paint::Solid(Color::hex_alpha(text_or(&decal.color, "#ffffff"), 0.92));

    match &decal.kind {
        DecalKind::Stripe => {
            surface.fill_rect(
                &clipped.rotate(-0.20),
                -base * 0.70,
                -base * 0.02,
                base * 1.10,
                base * 0.06,
                &paint,
                BlendMode::SourceOver,
            );
        }
        DecalKind::Chevron => {
            let mut chevron = Path::new();
            chevron
                .move_to(-base * 0.34, -base * 0.06)
                .line_to(0.0, base * 0.06)
                .line_to(base * 0.34, -base * 0.06)
                .close();
            surface.fill_path(&clipped.rotate(-0.16), &chevron, &paint, BlendMode::SourceOver);
        }
        DecalKind::Star => {
            let star = star_path(base * 0.10, -base * 0.12, base * 0.10);
            surface.fill_path(&clipped, &star, &paint, BlendMode::SourceOver);
        }
        DecalKind::Number => {
            let font = Font::new((base * 0.24).floor(), FontWeight::Bold);
            surface.fill_text(
                &clipped,
                text_or(&decal.number_text, DEFAULT_NUMBER_TEXT),
                base * 0.02,
                0.0,
                &font,
                TextAlign::Center,
                &Paint::Solid(Color::hex_alpha("#fff", 0.95)),
            );
        }
        DecalKind::Badge => paint_badge(surface, &clipped, base, decal),
        DecalKind::None | DecalKind::Other(_) => {}
    }
}

/// Label on a dark rounded-off box across the upper body.
fn paint_badge(surface: &mut Surface, state: &DrawState, base: f64, decal: &Decal) {
    let text = text_or(&decal.badge_text, DEFAULT_BADGE_TEXT);
    let font = Font::new((base * 0.12).floor(), FontWeight::Semibold);
    let width = measure_text(text, &font);
    let (pad_x, pad_y) = (base * 0.10, base * 0.06);
    let (x, y) = (-width / 2.0 - pad_x / 2.0, -base * 0.26);

    surface.fill_rect(
        state,
        x,
        y,
        width + pad_x,
        pad_y,
        &Paint::Solid(Color::hex_alpha("#111827", 0.65)),
        BlendMode::SourceOver,
    );
    surface.stroke_rect(
        state,
        x,
        y,
        width + pad_x,
        pad_y,
        &StrokeStyle::new(1.0),
        &Paint::Solid(Color::hex_alpha("#fff", 0.25)),
    );
    surface.fill_text(
        state,
        text,
        0.0,
        y + pad_y / 2.0,
        &font,
        TextAlign::Center,
        &Paint::Solid(Color::hex_alpha("#fff", 0.9)),
    );
}
