//! Single-frame render entry point.

use crewmate_spec::{CharacterAppearance, PoseState, BASE_UNIT};
use tracing::debug;

use crate::render::draw_crewmate;
use crate::surface::Surface;

/// Pixel size of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

/// Frame size for a base unit: `ceil(base * 1.7)` by `ceil(base * 1.6)`.
///
/// Negative or non-finite bases give an empty frame.
pub fn frame_size_for_base(base: f64) -> FrameSize {
    FrameSize {
        width: (base * 1.7).ceil() as u32,
        height: (base * 1.6).ceil() as u32,
    }
}

/// Frame size for an appearance scale.
pub fn frame_size(scale: f64) -> FrameSize {
    frame_size_for_base(BASE_UNIT * scale)
}

/// Resizes `surface` to the frame size, clearing it, and paints one
/// crewmate centred in it.
///
/// Existing surface content never survives this call.
pub fn render_frame_to_surface(
    surface: &mut Surface,
    appearance: &CharacterAppearance,
    pose: &PoseState,
) -> FrameSize {
    let size = frame_size(appearance.scale);
    debug!(
        width = size.width,
        height = size.height,
        animation = pose.animation.as_str(),
        frame = pose.frame,
        direction = pose.direction.as_str(),
        "rendering frame"
    );
    surface.resize(size.width, size.height);
    draw_crewmate(
        surface,
        size.width as f64 / 2.0,
        size.height as f64 / 2.0,
        appearance,
        pose,
    );
    size
}

#[cfg(test)]
mod tests {
    use super::*;
    use crewmate_spec::Preset;

    #[test]
    fn test_classic_frame_size() {
        assert_eq!(
            frame_size(2.8),
            FrameSize {
                width: 229,
                height: 216
            }
        );
    }

    #[test]
    fn test_degenerate_scales() {
        assert_eq!(frame_size(0.0), FrameSize { width: 0, height: 0 });
        assert_eq!(frame_size(-1.0), FrameSize { width: 0, height: 0 });
        assert_eq!(frame_size(f64::NAN), FrameSize { width: 0, height: 0 });
    }

    #[test]
    fn test_render_resizes_and_clears() {
        let mut surface = Surface::new(400, 400);
        surface.set(399, 399, crate::color::Color::white());
        let appearance = Preset::Classic.appearance();
        let size = render_frame_to_surface(&mut surface, &appearance, &PoseState::default());
        assert_eq!((surface.width, surface.height), (size.width, size.height));
        assert_eq!(surface.data.len(), 229 * 216);
        assert!(surface.alpha_bounds(0.0).is_some());
    }

    #[test]
    fn test_zero_scale_renders_empty() {
        let mut surface = Surface::new(10, 10);
        let appearance = Preset::Classic.appearance().with_scale(0.0);
        let size = render_frame_to_surface(&mut surface, &appearance, &PoseState::default());
        assert_eq!(size, FrameSize { width: 0, height: 0 });
        assert!(surface.data.is_empty());
    }
}
