//! Render command implementation
//!
//! Renders one frame of a crewmate to PNG.

use anyhow::{Context, Result};
use colored::Colorize;
use crewmate_backend_raster::png::encode_with_hash;
use crewmate_backend_raster::{render_frame_to_surface, PngConfig, Surface};
use crewmate_spec::{Animation, Direction, PoseState};
use std::path::Path;
use std::process::ExitCode;
use tracing::debug;

use super::write_output;
use crate::input::resolve_appearance;

/// Run the render command
///
/// # Arguments
/// * `preset` - Preset name the appearance starts from
/// * `appearance_path` - Optional overrides JSON merged onto the preset
/// * `animation` - Animation name
/// * `frame` - Animation frame index
/// * `direction` - Facing direction name
/// * `output` - Output PNG path
///
/// # Returns
/// Exit code: 0 success
pub fn run(
    preset: &str,
    appearance_path: Option<&str>,
    animation: &str,
    frame: u32,
    direction: &str,
    output: &str,
) -> Result<ExitCode> {
    let animation = Animation::by_name(animation)
        .ok_or_else(|| anyhow::anyhow!("unknown animation: {}", animation))?;
    let direction = Direction::by_name(direction)
        .ok_or_else(|| anyhow::anyhow!("unknown direction: {}", direction))?;
    let pose = PoseState::new(animation, frame, direction);

    let resolved = resolve_appearance(preset, appearance_path.map(Path::new))
        .context("Failed to load appearance")?;
    if let Some(hash) = &resolved.source_hash {
        debug!(source_hash = %hash, "loaded appearance overrides");
    }

    println!(
        "{} {} {} frame {} facing {}",
        "Rendering:".cyan().bold(),
        resolved.preset,
        animation.as_str(),
        frame,
        direction.as_str()
    );

    let mut surface = Surface::new(0, 0);
    let size = render_frame_to_surface(&mut surface, &resolved.appearance, &pose);
    let (bytes, hash) = encode_with_hash(&surface, &PngConfig::default())
        .context("Failed to encode frame")?;
    write_output(Path::new(output), &bytes)?;

    println!(
        "{} {} ({}x{}, {})",
        "Wrote".green().bold(),
        output,
        size.width,
        size.height,
        &hash[..16]
    );
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_png() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("frame.png");
        let code = run("classic", None, "walk", 3, "left", out.to_str().unwrap()).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        let bytes = std::fs::read(&out).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_rejects_unknown_preset() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("frame.png");
        let err = run("giant", None, "idle", 0, "right", out.to_str().unwrap()).unwrap_err();
        assert!(format!("{:#}", err).contains("giant"));
        assert!(!out.exists());
    }
}
