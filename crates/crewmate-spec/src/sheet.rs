//! Spritesheet bake configuration and slicing metadata.
//!
//! A sheet is a grid: one column per walk-cycle frame, one row per facing
//! direction (or a single right-facing row). The metadata lists the source
//! rectangle of every cell so a consumer can slice the image without
//! knowing how it was baked.

use serde::{Deserialize, Serialize};

use crate::pose::Direction;

/// Parameters for a spritesheet bake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SheetConfig {
    /// Walk-cycle frames per direction (columns).
    pub frames: u32,
    /// 4 for a four-direction sheet; any other value bakes one row.
    #[serde(default = "default_dirs")]
    pub dirs: u32,
    /// Supersampling factor; 1 when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssaa: Option<u32>,
}

fn default_dirs() -> u32 {
    1
}

impl SheetConfig {
    /// Creates a config with no supersampling.
    pub fn new(frames: u32, dirs: u32) -> Self {
        Self {
            frames,
            dirs,
            ssaa: None,
        }
    }

    /// Sets the supersampling factor.
    pub fn with_ssaa(mut self, ssaa: u32) -> Self {
        self.ssaa = Some(ssaa);
        self
    }

    /// Effective supersampling factor.
    pub fn ssaa(&self) -> u32 {
        self.ssaa.unwrap_or(1)
    }

    /// Number of rows in the sheet.
    pub fn rows(&self) -> u32 {
        if self.dirs == 4 {
            4
        } else {
            1
        }
    }

    /// Number of columns in the sheet.
    pub fn columns(&self) -> u32 {
        self.frames
    }

    /// Direction baked into `row`. Single-row sheets face right.
    pub fn row_direction(&self, row: u32) -> Direction {
        if self.rows() == 1 {
            Direction::Right
        } else {
            Direction::from_code(row as u8).unwrap_or(Direction::Right)
        }
    }
}

/// Source rectangle of one baked frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetFrame {
    /// Row-major cell index.
    pub index: u32,
    pub row: u32,
    pub column: u32,
    pub direction: Direction,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Slicing metadata shipped alongside a baked sheet image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteSheetMetadata {
    pub frame_width: u32,
    pub frame_height: u32,
    pub columns: u32,
    pub rows: u32,
    pub sheet_width: u32,
    pub sheet_height: u32,
    pub frames: Vec<SheetFrame>,
}

impl SpriteSheetMetadata {
    /// Lays out the grid for the given output frame size.
    pub fn grid(config: &SheetConfig, frame_width: u32, frame_height: u32) -> Self {
        let columns = config.columns();
        let rows = config.rows();
        let mut frames = Vec::with_capacity((columns * rows) as usize);
        for row in 0..rows {
            for column in 0..columns {
                frames.push(SheetFrame {
                    index: row * columns + column,
                    row,
                    column,
                    direction: config.row_direction(row),
                    x: column * frame_width,
                    y: row * frame_height,
                    width: frame_width,
                    height: frame_height,
                });
            }
        }
        Self {
            frame_width,
            frame_height,
            columns,
            rows,
            sheet_width: frame_width * columns,
            sheet_height: frame_height * rows,
            frames,
        }
    }

    /// Frames baked for one direction, in column order.
    pub fn frames_for(&self, direction: Direction) -> impl Iterator<Item = &SheetFrame> {
        self.frames.iter().filter(move |f| f.direction == direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_follow_dirs() {
        assert_eq!(SheetConfig::new(8, 4).rows(), 4);
        assert_eq!(SheetConfig::new(8, 1).rows(), 1);
        assert_eq!(SheetConfig::new(8, 2).rows(), 1);
    }

    #[test]
    fn test_single_row_faces_right() {
        let config = SheetConfig::new(3, 1);
        assert_eq!(config.row_direction(0), Direction::Right);
        let config = SheetConfig::new(3, 4);
        assert_eq!(config.row_direction(1), Direction::Left);
        assert_eq!(config.row_direction(3), Direction::Right);
    }

    #[test]
    fn test_grid_layout() {
        let meta = SpriteSheetMetadata::grid(&SheetConfig::new(8, 4), 10, 20);
        assert_eq!(meta.frames.len(), 32);
        assert_eq!(meta.sheet_width, 80);
        assert_eq!(meta.sheet_height, 80);
        let last = meta.frames.last().unwrap();
        assert_eq!((last.x, last.y), (70, 60));
        assert_eq!(last.index, 31);
        assert_eq!(meta.frames_for(Direction::Up).count(), 8);
    }

    #[test]
    fn test_config_json_defaults() {
        let config: SheetConfig = serde_json::from_str(r#"{"frames": 12}"#).unwrap();
        assert_eq!(config.rows(), 1);
        assert_eq!(config.ssaa(), 1);
    }
}
