//! Crewmate character data model.
//!
//! This crate holds everything about a crewmate that is not pixels:
//!
//! - [`CharacterAppearance`]: colours, lighting, proportions, visor, decal
//!   and accessory
//! - [`PoseState`]: per-frame animation input
//! - [`preset`]: the default crewmate and the four named body types
//! - [`SheetConfig`] / [`SpriteSheetMetadata`]: spritesheet bake
//!   parameters and the slicing table that travels with a baked image
//! - [`validation`]: strict checks for callers that do not want the
//!   renderer's silent fallbacks
//! - [`hash`]: canonical BLAKE3 hashing of appearances
//!
//! # Example
//!
//! ```
//! use crewmate_spec::{Preset, validation::validate_appearance};
//!
//! let appearance = Preset::Heroic.appearance();
//! assert!(validate_appearance(&appearance).is_ok());
//! assert!((appearance.base() - 48.0 * 2.8).abs() < 1e-9);
//! ```

pub mod appearance;
pub mod error;
pub mod hash;
pub mod pose;
pub mod preset;
pub mod sheet;
pub mod validation;

pub use appearance::{
    Accessory, Anatomy, CharacterAppearance, Decal, DecalKind, LightStyle, VisorGeometry,
    ACCESSORIES, BASE_UNIT, DECAL_KINDS, LIGHT_STYLES,
};
pub use error::{
    ErrorCode, SpecError, ValidationError, ValidationResult, ValidationWarning, WarningCode,
};
pub use hash::canonical_appearance_hash;
pub use pose::{Animation, Direction, PoseState, ANIMATIONS, DIRECTIONS};
pub use preset::{base_preset, AnatomyOverrides, AppearanceOverrides, Preset, VisorOverrides};
pub use sheet::{SheetConfig, SheetFrame, SpriteSheetMetadata};
pub use validation::{validate_appearance, validate_sheet_config};
