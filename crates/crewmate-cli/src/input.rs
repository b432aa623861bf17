//! Appearance loading for the CLI.
//!
//! An appearance is a named preset with an optional overrides document
//! (JSON) merged on top: top-level fields replace, `anatomy` and
//! `visor_geometry` merge field by field.

use crewmate_spec::{AppearanceOverrides, CharacterAppearance, Preset};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Recognized overrides file extensions.
pub const JSON_EXTENSIONS: &[&str] = &["json"];

/// Preset used when none is named.
pub const DEFAULT_PRESET: &str = "classic";

/// Errors that can occur while loading an appearance.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read file '{}': {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}", unknown_extension_message(.extension))]
    UnknownExtension { extension: Option<String> },

    #[error("JSON parse error in '{}': {source}", .path.display())]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown preset '{name}' (expected classic, slim, chunky or heroic)")]
    UnknownPreset { name: String },
}

fn unknown_extension_message(extension: &Option<String>) -> String {
    match extension {
        Some(ext) => format!("unknown file extension '.{}' (expected .json)", ext),
        None => "file has no extension (expected .json)".to_string(),
    }
}

/// A parsed overrides document.
#[derive(Debug, Clone)]
pub struct LoadedOverrides {
    pub overrides: AppearanceOverrides,
    /// BLAKE3 hash of the file content (hex string).
    pub source_hash: String,
}

/// The appearance a command works with, plus where it came from.
#[derive(Debug, Clone)]
pub struct ResolvedAppearance {
    pub appearance: CharacterAppearance,
    pub preset: Preset,
    /// Hash of the overrides file, when one was given.
    pub source_hash: Option<String>,
}

/// Looks up a preset by name, case-insensitively.
pub fn parse_preset(name: &str) -> Result<Preset, InputError> {
    Preset::by_name(name).ok_or_else(|| InputError::UnknownPreset {
        name: name.to_string(),
    })
}

/// Reads and parses an overrides file.
///
/// Unknown fields are rejected so typos surface instead of silently
/// keeping the default.
pub fn load_overrides(path: &Path) -> Result<LoadedOverrides, InputError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase());
    match extension.as_deref() {
        Some(ext) if JSON_EXTENSIONS.contains(&ext) => {}
        _ => return Err(InputError::UnknownExtension { extension }),
    }

    let content = std::fs::read_to_string(path).map_err(|source| InputError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let source_hash = blake3::hash(content.as_bytes()).to_hex().to_string();
    let overrides = serde_json::from_str(&content).map_err(|source| InputError::JsonParse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(LoadedOverrides {
        overrides,
        source_hash,
    })
}

/// Builds the appearance for a preset name and optional overrides file.
pub fn resolve_appearance(
    preset_name: &str,
    overrides_path: Option<&Path>,
) -> Result<ResolvedAppearance, InputError> {
    let preset = parse_preset(preset_name)?;
    let base = preset.appearance();

    match overrides_path {
        Some(path) => {
            let loaded = load_overrides(path)?;
            Ok(ResolvedAppearance {
                appearance: loaded.overrides.apply(&base),
                preset,
                source_hash: Some(loaded.source_hash),
            })
        }
        None => Ok(ResolvedAppearance {
            appearance: base,
            preset,
            source_hash: None,
        }),
    }
}
