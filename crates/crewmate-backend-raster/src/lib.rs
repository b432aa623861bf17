//! Crewmate raster backend
//!
//! A small software renderer that turns a [`CharacterAppearance`] into
//! pixels: one frame for live preview, or a baked walk-cycle spritesheet
//! for transmission and storage.
//!
//! # Pipeline
//!
//! - **Geometry**: body, backpack and visor paths built from the base unit
//!   (`48 * scale`) and the appearance's anatomy
//! - **Rasterizer**: nonzero scanline coverage with five sub-scanlines per
//!   row, strokes expanded to polygons, clips as coverage masks
//! - **Paint**: solid colours and linear / two-circle radial gradients,
//!   composited with source-over, multiply or screen
//! - **Sheets**: frames tiled by walk frame and facing direction, with
//!   optional supersampling and deterministic PNG output
//!
//! # Example
//!
//! ```
//! use crewmate_backend_raster::{build_sprite_sheet, render_frame_to_surface, Surface};
//! use crewmate_spec::{Direction, PoseState, Preset, SheetConfig};
//!
//! let appearance = Preset::Classic.appearance().with_scale(0.5);
//!
//! let mut surface = Surface::new(1, 1);
//! let size = render_frame_to_surface(&mut surface, &appearance, &PoseState::walk(3, Direction::Left));
//! assert_eq!((surface.width, surface.height), (size.width, size.height));
//!
//! let sheet = build_sprite_sheet(&appearance, &SheetConfig::new(4, 4)).unwrap();
//! assert_eq!(sheet.surface.width, sheet.frame_width * 4);
//! ```
//!
//! [`CharacterAppearance`]: crewmate_spec::CharacterAppearance

pub mod canvas;
pub mod color;
pub mod frame;
pub mod geometry;
pub mod paint;
pub mod path;
pub mod png;
pub mod raster;
pub mod render;
pub mod sheet;
pub mod surface;
pub mod text;
pub mod transform;

pub use canvas::DrawState;
pub use color::{parse_hex, shade, BlendMode, Color};
pub use frame::{frame_size, render_frame_to_surface, FrameSize};
pub use geometry::{backpack_path, body_path, star_path, visor_path};
pub use paint::{GradientStop, Paint};
pub use path::{Path, PathCommand};
pub use png::{PngConfig, PngError};
pub use raster::{LineCap, StrokeStyle};
pub use render::draw_crewmate;
pub use sheet::{build_sprite_sheet, SpriteSheet, SpriteSheetError};
pub use surface::Surface;
pub use text::{Font, FontWeight, TextAlign, TextLayout};
pub use transform::{Point, Transform};
