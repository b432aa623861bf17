//! Presets command implementation
//!
//! Lists the built-in presets, or dumps their full appearances as JSON.

use anyhow::{Context, Result};
use colored::Colorize;
use crewmate_backend_raster::frame_size;
use crewmate_spec::{canonical_appearance_hash, CharacterAppearance, Preset};
use serde::Serialize;
use std::process::ExitCode;

/// One preset in the JSON dump.
#[derive(Debug, Serialize)]
pub struct PresetEntry {
    pub name: &'static str,
    pub hash: String,
    pub appearance: CharacterAppearance,
}

/// Builds the JSON dump for every preset.
pub fn preset_entries() -> Result<Vec<PresetEntry>> {
    Preset::ALL
        .iter()
        .map(|preset| {
            let appearance = preset.appearance();
            let hash = canonical_appearance_hash(&appearance)
                .with_context(|| format!("Failed to hash preset {}", preset))?;
            Ok(PresetEntry {
                name: preset.name(),
                hash,
                appearance,
            })
        })
        .collect()
}

/// Run the presets command
///
/// # Arguments
/// * `json_output` - Dump full appearances as JSON instead of a table
pub fn run(json_output: bool) -> Result<ExitCode> {
    let entries = preset_entries()?;

    if json_output {
        let json = serde_json::to_string_pretty(&entries).context("Failed to serialize presets")?;
        println!("{}", json);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Presets:".cyan().bold());
    for entry in &entries {
        let anatomy = &entry.appearance.anatomy;
        let size = frame_size(entry.appearance.scale);
        println!(
            "  {:<8} {} width {:.2} height {:.2} belly {:.2} frame {}x{}",
            entry.name.bold(),
            entry.hash[..12].dimmed(),
            anatomy.width_mul,
            anatomy.height_mul,
            anatomy.belly,
            size.width,
            size.height
        );
    }
    Ok(ExitCode::SUCCESS)
}
