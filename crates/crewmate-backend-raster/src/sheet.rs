//! Walk-cycle spritesheet baking.
//!
//! Every cell is one walk frame. Columns advance the frame index; rows are
//! facing directions (down, left, up, right) for four-direction sheets, or
//! a single right-facing row. With supersampling the grid is painted at
//! `ssaa` times the size and area-averaged down in one pass.

use crewmate_spec::{CharacterAppearance, PoseState, SheetConfig, SpriteSheetMetadata, BASE_UNIT};
use thiserror::Error;
use tracing::debug;

use crate::frame::{frame_size_for_base, FrameSize};
use crate::png::{encode_with_hash, PngConfig, PngError};
use crate::render::draw_crewmate;
use crate::surface::Surface;

/// Largest sheet side, in pixels, at the supersampled size.
pub const MAX_SHEET_DIMENSION: u32 = 32_768;

/// Errors from spritesheet baking.
#[derive(Debug, Error)]
pub enum SpriteSheetError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("PNG encoding error: {0}")]
    PngError(#[from] PngError),
}

/// A baked sheet and what a consumer needs to slice it.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    pub surface: Surface,
    /// Output frame width, after downsampling.
    pub frame_width: u32,
    /// Output frame height, after downsampling.
    pub frame_height: u32,
    pub columns: u32,
    pub rows: u32,
    pub config: SheetConfig,
}

impl SpriteSheet {
    /// Per-frame source rectangles.
    pub fn metadata(&self) -> SpriteSheetMetadata {
        SpriteSheetMetadata::grid(&self.config, self.frame_width, self.frame_height)
    }

    /// Copies out the frame at `column`, `row`.
    pub fn frame(&self, column: u32, row: u32) -> Option<Surface> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        Some(self.surface.crop(
            column * self.frame_width,
            row * self.frame_height,
            self.frame_width,
            self.frame_height,
        ))
    }

    /// PNG bytes of the whole sheet plus their BLAKE3 hash.
    pub fn encode_png(&self, config: &PngConfig) -> Result<(Vec<u8>, String), PngError> {
        encode_with_hash(&self.surface, config)
    }
}

fn sheet_side(frame: u32, count: u32, axis: &str) -> Result<u32, SpriteSheetError> {
    frame
        .checked_mul(count)
        .filter(|side| *side <= MAX_SHEET_DIMENSION)
        .ok_or_else(|| {
            SpriteSheetError::InvalidParameter(format!(
                "sheet {} of {} x {} exceeds {} pixels",
                axis, frame, count, MAX_SHEET_DIMENSION
            ))
        })
}

/// Bakes walk frames into one sheet.
///
/// `frames == 0` and `ssaa == 0` are rejected, as are scales that produce
/// an empty frame or a sheet larger than [`MAX_SHEET_DIMENSION`].
pub fn build_sprite_sheet(
    appearance: &CharacterAppearance,
    config: &SheetConfig,
) -> Result<SpriteSheet, SpriteSheetError> {
    let ss = config.ssaa();
    if ss == 0 {
        return Err(SpriteSheetError::InvalidParameter(
            "ssaa must be at least 1".to_string(),
        ));
    }
    if config.frames == 0 {
        return Err(SpriteSheetError::InvalidParameter(
            "frames must be at least 1".to_string(),
        ));
    }

    let big_frame = frame_size_for_base(BASE_UNIT * appearance.scale * ss as f64);
    if big_frame.width == 0 || big_frame.height == 0 {
        return Err(SpriteSheetError::InvalidParameter(format!(
            "scale {} gives an empty frame",
            appearance.scale
        )));
    }
    let columns = config.columns();
    let rows = config.rows();
    let big_width = sheet_side(big_frame.width, columns, "width")?;
    let big_height = sheet_side(big_frame.height, rows, "height")?;

    debug!(
        frames = columns,
        rows,
        ssaa = ss,
        frame_width = big_frame.width,
        frame_height = big_frame.height,
        "baking spritesheet"
    );

    // The renderer reads its base unit from the appearance.
    let scaled;
    let drawn = if ss > 1 {
        scaled = appearance.clone().with_scale(appearance.scale * ss as f64);
        &scaled
    } else {
        appearance
    };

    let mut big = Surface::new(big_width, big_height);
    let mut scratch = Surface::new(big_frame.width, big_frame.height);
    for row in 0..rows {
        let direction = config.row_direction(row);
        for column in 0..columns {
            scratch.clear();
            draw_crewmate(
                &mut scratch,
                big_frame.width as f64 / 2.0,
                big_frame.height as f64 / 2.0,
                drawn,
                &PoseState::walk(column, direction),
            );
            big.draw_surface(
                &scratch,
                (big_frame.width * column) as i32,
                (big_frame.height * row) as i32,
            );
        }
    }

    let out_frame = if ss > 1 {
        FrameSize {
            width: (big_frame.width as f64 / ss as f64).round() as u32,
            height: (big_frame.height as f64 / ss as f64).round() as u32,
        }
    } else {
        big_frame
    };
    let surface = if ss > 1 {
        big.downsample_to(out_frame.width * columns, out_frame.height * rows)
    } else {
        big
    };

    Ok(SpriteSheet {
        surface,
        frame_width: out_frame.width,
        frame_height: out_frame.height,
        columns,
        rows,
        config: *config,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crewmate_spec::Preset;

    fn small() -> CharacterAppearance {
        Preset::Classic.appearance().with_scale(0.5)
    }

    #[test]
    fn test_single_row_dimensions() {
        let sheet = build_sprite_sheet(&small(), &SheetConfig::new(3, 1)).unwrap();
        // base 24: ceil(40.8) x ceil(38.4)
        assert_eq!((sheet.frame_width, sheet.frame_height), (41, 39));
        assert_eq!((sheet.columns, sheet.rows), (3, 1));
        assert_eq!((sheet.surface.width, sheet.surface.height), (123, 39));
    }

    #[test]
    fn test_unusual_dirs_fall_back_to_one_row() {
        let sheet = build_sprite_sheet(&small(), &SheetConfig::new(2, 3)).unwrap();
        assert_eq!(sheet.rows, 1);
    }

    #[test]
    fn test_rejects_zero_frames_and_ssaa() {
        assert!(matches!(
            build_sprite_sheet(&small(), &SheetConfig::new(0, 4)),
            Err(SpriteSheetError::InvalidParameter(_))
        ));
        assert!(matches!(
            build_sprite_sheet(&small(), &SheetConfig::new(2, 1).with_ssaa(0)),
            Err(SpriteSheetError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_rejects_empty_and_oversized_frames() {
        let zero = Preset::Classic.appearance().with_scale(0.0);
        assert!(build_sprite_sheet(&zero, &SheetConfig::new(1, 1)).is_err());
        assert!(build_sprite_sheet(&small(), &SheetConfig::new(10_000, 1)).is_err());
    }

    #[test]
    fn test_cells_match_single_frame_renders() {
        let appearance = small();
        let sheet = build_sprite_sheet(&appearance, &SheetConfig::new(2, 4)).unwrap();
        let size = FrameSize {
            width: sheet.frame_width,
            height: sheet.frame_height,
        };
        // Row 1 faces left, column 1 is walk frame 1.
        let mut expected = Surface::new(size.width, size.height);
        draw_crewmate(
            &mut expected,
            size.width as f64 / 2.0,
            size.height as f64 / 2.0,
            &appearance,
            &PoseState::walk(1, crewmate_spec::Direction::Left),
        );
        assert_eq!(sheet.frame(1, 1), Some(expected));
        assert_eq!(sheet.frame(2, 0), None);
    }

    #[test]
    fn test_metadata_matches_sheet() {
        let sheet = build_sprite_sheet(&small(), &SheetConfig::new(4, 4)).unwrap();
        let meta = sheet.metadata();
        assert_eq!(meta.sheet_width, sheet.surface.width);
        assert_eq!(meta.sheet_height, sheet.surface.height);
        assert_eq!(meta.frames.len(), 16);
    }
}
