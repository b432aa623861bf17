//! Head accessories.
//!
//! Every shape is filled, then outlined in the outline colour. The state
//! passed in is already anchored above the head.

use std::f64::consts::TAU;

use crewmate_spec::Accessory;

use super::{visor::visor_gradient, Figure};
use crate::canvas::DrawState;
use crate::color::{BlendMode, Color};
use crate::paint::Paint;
use crate::path::Path;
use crate::raster::StrokeStyle;
use crate::surface::Surface;

const GOLD: &str = "#ffd166";

struct Outline {
    style: StrokeStyle,
    paint: Paint,
}

impl Outline {
    fn fill_and_stroke(
        &self,
        surface: &mut Surface,
        state: &DrawState,
        path: &Path,
        fill: &Paint,
    ) {
        surface.fill_path(state, path, fill, BlendMode::SourceOver);
        surface.stroke_path(state, path, &self.style, &self.paint, BlendMode::SourceOver);
    }
}

pub(super) fn paint_accessory(
    surface: &mut Surface,
    state: &DrawState,
    figure: &Figure,
    accessory: &Accessory,
) {
    let base = figure.base;
    let outline = Outline {
        style: StrokeStyle::new(figure.line_width(0.035)),
        paint: figure.outline_paint(),
    };

    match accessory {
        Accessory::Cap => {
            let mut cap = Path::new();
            cap.move_to(-base * 0.18, 0.0)
                .quad_to(0.0, -base * 0.12, base * 0.22, 0.0)
                .line_to(base * 0.27, base * 0.02)
                .quad_to(0.0, base * 0.06, -base * 0.22, base * 0.02)
                .close();
            let fill = Paint::Solid(Color::hex_alpha(&figure.appearance.body_color, 0.95));
            outline.fill_and_stroke(surface, state, &cap, &fill);
        }
        Accessory::Flower => {
            let petal_fill = Paint::Solid(Color::from_hex("#ff66b3"));
            let mut petal = Path::new();
            petal.ellipse(0.0, 0.0, base * 0.06, base * 0.02, 0.0);
            for i in 1..=6 {
                let turned = state.rotate(TAU / 6.0 * i as f64);
                outline.fill_and_stroke(surface, &turned, &petal, &petal_fill);
            }
            let mut center = Path::new();
            center.circle(0.0, 0.0, base * 0.03);
            outline.fill_and_stroke(surface, state, &center, &Paint::Solid(Color::from_hex(GOLD)));
        }
        Accessory::Crown => {
            let mut crown = Path::new();
            crown
                .move_to(-base * 0.16, 0.0)
                .line_to(-base * 0.06, -base * 0.12)
                .line_to(0.0, 0.0)
                .line_to(base * 0.06, -base * 0.12)
                .line_to(base * 0.16, 0.0)
                .close();
            outline.fill_and_stroke(surface, state, &crown, &Paint::Solid(Color::from_hex(GOLD)));
        }
        Accessory::Toilet => {
            let mut toilet = Path::new();
            toilet
                .ellipse(0.0, 0.0, base * 0.16, base * 0.06, 0.0)
                .rect(-base * 0.04, -base * 0.02, base * 0.08, base * 0.06);
            let fill = Paint::Solid(Color::from_hex("#e6edf0"));
            outline.fill_and_stroke(surface, state, &toilet, &fill);
        }
        Accessory::Antenna => {
            let mut stalk = Path::new();
            stalk
                .move_to(0.0, 0.0)
                .quad_to(0.0, -base * 0.12, -base * 0.12, -base * 0.16);
            outline.fill_and_stroke(surface, state, &stalk, &visor_gradient(figure));
            let mut tip = Path::new();
            tip.circle(-base * 0.12, -base * 0.16, base * 0.03);
            let fill = Paint::Solid(Color::from_hex("#ff6b6b"));
            outline.fill_and_stroke(surface, state, &tip, &fill);
        }
        Accessory::Halo => {
            let mut halo = Path::new();
            halo.ellipse(0.0, -base * 0.02, base * 0.22, base * 0.07, 0.0);
            let fill = Paint::Solid(Color::hex_alpha(GOLD, 0.92));
            outline.fill_and_stroke(surface, state, &halo, &fill);
        }
        Accessory::Bandana => {
            let mut bandana = Path::new();
            bandana
                .move_to(-base * 0.15, 0.0)
                .line_to(base * 0.15, 0.0)
                .line_to(0.0, base * 0.06)
                .close();
            let fill = Paint::Solid(Color::from_hex("#ef4444"));
            outline.fill_and_stroke(surface, state, &bandana, &fill);
        }
        Accessory::Horns => {
            let mut horns = Path::new();
            for side in [-1.0, 1.0] {
                horns
                    .move_to(side * base * 0.10, 0.0)
                    .quad_to(
                        side * base * 0.15,
                        -base * 0.10,
                        side * base * 0.06,
                        -base * 0.12,
                    )
                    .quad_to(side * base * 0.08, -base * 0.02, side * base * 0.02, 0.0);
            }
            let fill = Paint::Solid(Color::from_hex("#b45309"));
            outline.fill_and_stroke(surface, state, &horns, &fill);
        }
        Accessory::Other(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crewmate_spec::{Preset, ACCESSORIES};

    fn render(accessory: &Accessory) -> Surface {
        let appearance = Preset::Classic.appearance();
        let figure = Figure::new(&appearance);
        let mut surface = Surface::new(200, 200);
        let state = DrawState::new().translate(100.0, 100.0);
        paint_accessory(&mut surface, &state, &figure, accessory);
        surface
    }

    #[test]
    fn test_every_known_accessory_draws_near_anchor() {
        for name in ACCESSORIES {
            let surface = render(&Accessory::from_name(name));
            let (x0, y0, x1, y1) = surface
                .alpha_bounds(0.0)
                .unwrap_or_else(|| panic!("{} drew nothing", name));
            assert!(x0 >= 55 && x1 <= 145, "{}: {}..{}", name, x0, x1);
            assert!(y0 >= 65 && y1 <= 115, "{}: {}..{}", name, y0, y1);
        }
    }

    #[test]
    fn test_unknown_accessory_draws_nothing() {
        let surface = render(&Accessory::from_name("jetpack"));
        assert!(surface.alpha_bounds(0.0).is_none());
    }

    #[test]
    fn test_horns_are_mirror_images() {
        let surface = render(&Accessory::Horns);
        let (x0, _, x1, _) = surface.alpha_bounds(0.0).unwrap();
        // Centred on x = 100: both horns reach the same distance out.
        assert!(((100 - x0 as i32) - (x1 as i32 + 1 - 100)).abs() <= 1);
    }
}
