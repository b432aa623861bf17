//! Sheet command implementation
//!
//! Bakes a walk-cycle spritesheet to PNG, optionally writing the slicing
//! metadata next to it.

use anyhow::{Context, Result};
use colored::Colorize;
use crewmate_backend_raster::{build_sprite_sheet, PngConfig};
use crewmate_spec::{validate_sheet_config, SheetConfig};
use std::path::Path;
use std::process::ExitCode;
use tracing::debug;

use super::write_output;
use crate::input::resolve_appearance;

/// Run the sheet command
///
/// # Arguments
/// * `preset` - Preset name the appearance starts from
/// * `appearance_path` - Optional overrides JSON merged onto the preset
/// * `frames` - Walk frames per row
/// * `dirs` - 4 for one row per direction, otherwise a single row
/// * `ssaa` - Supersampling factor
/// * `output` - Output PNG path
/// * `metadata` - Optional output path for slicing metadata JSON
///
/// # Returns
/// Exit code: 0 success, 1 if the sheet parameters are invalid
pub fn run(
    preset: &str,
    appearance_path: Option<&str>,
    frames: u32,
    dirs: u32,
    ssaa: u32,
    output: &str,
    metadata: Option<&str>,
) -> Result<ExitCode> {
    let config = SheetConfig::new(frames, dirs).with_ssaa(ssaa);

    let checks = validate_sheet_config(&config);
    for warning in &checks.warnings {
        println!("  {} {}", "!".yellow(), warning);
    }
    if !checks.is_ok() {
        for error in &checks.errors {
            println!("  {} {}", "x".red(), error);
        }
        return Ok(ExitCode::from(1));
    }

    let resolved = resolve_appearance(preset, appearance_path.map(Path::new))
        .context("Failed to load appearance")?;
    if let Some(hash) = &resolved.source_hash {
        debug!(source_hash = %hash, "loaded appearance overrides");
    }

    println!(
        "{} {} ({} frames x {} rows, ssaa {})",
        "Baking:".cyan().bold(),
        resolved.preset,
        config.columns(),
        config.rows(),
        config.ssaa()
    );

    let sheet = build_sprite_sheet(&resolved.appearance, &config)
        .context("Failed to bake spritesheet")?;
    let (bytes, hash) = sheet
        .encode_png(&PngConfig::default())
        .context("Failed to encode spritesheet")?;
    write_output(Path::new(output), &bytes)?;
    println!(
        "{} {} ({}x{}, frame {}x{}, {})",
        "Wrote".green().bold(),
        output,
        sheet.surface.width,
        sheet.surface.height,
        sheet.frame_width,
        sheet.frame_height,
        &hash[..16]
    );

    if let Some(metadata_path) = metadata {
        let json = serde_json::to_string_pretty(&sheet.metadata())
            .context("Failed to serialize sheet metadata")?;
        write_output(Path::new(metadata_path), json.as_bytes())?;
        println!("{} {}", "Wrote".green().bold(), metadata_path);
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crewmate_spec::SpriteSheetMetadata;
    use std::fs;

    #[test]
    fn test_bakes_sheet_and_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = dir.path().join("small.json");
        fs::write(&overrides, r#"{"scale": 0.5}"#).unwrap();
        let out = dir.path().join("sheet.png");
        let meta = dir.path().join("sheet.json");

        let code = run(
            "chunky",
            overrides.to_str(),
            3,
            4,
            1,
            out.to_str().unwrap(),
            meta.to_str(),
        )
        .unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(out.exists());

        let parsed: SpriteSheetMetadata =
            serde_json::from_str(&fs::read_to_string(&meta).unwrap()).unwrap();
        assert_eq!((parsed.columns, parsed.rows), (3, 4));
        assert_eq!(parsed.frames.len(), 12);
        // base 24: ceil(40.8) x ceil(38.4)
        assert_eq!((parsed.frame_width, parsed.frame_height), (41, 39));
    }

    #[test]
    fn test_zero_frames_fails_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("sheet.png");
        let code = run("classic", None, 0, 4, 1, out.to_str().unwrap(), None).unwrap();
        assert_eq!(code, ExitCode::from(1));
        assert!(!out.exists());
    }
}
