//! Strict validation for appearances and sheet configs.
//!
//! The renderer itself accepts anything and falls back silently. Callers
//! that want to reject bad input up front run these checks first.

use std::sync::OnceLock;

use regex::Regex;

use crate::appearance::{CharacterAppearance, DecalKind};
use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::sheet::SheetConfig;

/// `#rgb` or `#rrggbb`, either case.
const HEX_COLOR_PATTERN: &str = r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$";

static HEX_COLOR_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

fn hex_color_regex() -> Option<&'static Regex> {
    HEX_COLOR_REGEX
        .get_or_init(|| Regex::new(HEX_COLOR_PATTERN).ok())
        .as_ref()
}

/// Returns true for `#rgb` / `#rrggbb` colour strings.
pub fn is_valid_hex_color(value: &str) -> bool {
    hex_color_regex().is_some_and(|re| re.is_match(value))
}

/// Validates an appearance.
///
/// # Example
/// ```
/// use crewmate_spec::preset::classic;
/// use crewmate_spec::validation::validate_appearance;
///
/// assert!(validate_appearance(&classic()).is_ok());
/// ```
pub fn validate_appearance(appearance: &CharacterAppearance) -> ValidationResult {
    let mut result = ValidationResult::default();

    validate_colors(appearance, &mut result);
    validate_names(appearance, &mut result);
    validate_numbers(appearance, &mut result);
    validate_decal_text(appearance, &mut result);

    result
}

/// Validates spritesheet bake parameters.
pub fn validate_sheet_config(config: &SheetConfig) -> ValidationResult {
    let mut result = ValidationResult::default();

    if config.frames == 0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::NoFrames,
            "sheet must have at least one frame",
            "frames",
        ));
    }
    if config.ssaa == Some(0) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidSupersampling,
            "ssaa must be at least 1",
            "ssaa",
        ));
    }
    if config.dirs != 1 && config.dirs != 4 {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::UnsupportedDirs,
            format!("dirs={} is treated as a single right-facing row", config.dirs),
            "dirs",
        ));
    }

    result
}

fn validate_colors(appearance: &CharacterAppearance, result: &mut ValidationResult) {
    let mut fields = vec![
        ("body_color", appearance.body_color.as_str()),
        ("outline_color", appearance.outline_color.as_str()),
        ("visor_color", appearance.visor_color.as_str()),
        ("rim_color", appearance.rim_color.as_str()),
        ("key_color", appearance.key_color.as_str()),
    ];
    if let Some(color) = appearance.decal.as_ref().and_then(|d| d.color.as_deref()) {
        fields.push(("decal.color", color));
    }

    for (path, value) in fields {
        if !is_valid_hex_color(value) {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidColor,
                format!("'{}' is not a #rgb or #rrggbb colour", value),
                path,
            ));
        }
    }
}

fn validate_names(appearance: &CharacterAppearance, result: &mut ValidationResult) {
    if !appearance.light_style.is_known() {
        result.add_error(ValidationError::with_path(
            ErrorCode::UnknownLightStyle,
            format!("unknown light style '{}'", appearance.light_style),
            "light_style",
        ));
    }
    if let Some(accessory) = appearance.accessory.as_ref().filter(|a| !a.is_known()) {
        result.add_error(ValidationError::with_path(
            ErrorCode::UnknownAccessory,
            format!("unknown accessory '{}'", accessory),
            "accessory",
        ));
    }
    if let Some(decal) = appearance.decal.as_ref().filter(|d| !d.kind.is_known()) {
        result.add_error(ValidationError::with_path(
            ErrorCode::UnknownDecalKind,
            format!("unknown decal kind '{}'", decal.kind),
            "decal.kind",
        ));
    }
}

fn validate_numbers(appearance: &CharacterAppearance, result: &mut ValidationResult) {
    if !appearance.scale.is_finite() || appearance.scale <= 0.0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidScale,
            format!("scale must be a positive number, got {}", appearance.scale),
            "scale",
        ));
    }

    for (path, value) in [
        ("anatomy.height_mul", appearance.anatomy.height_mul),
        ("anatomy.width_mul", appearance.anatomy.width_mul),
        ("outline_width", appearance.outline_width),
    ] {
        if !value.is_finite() || value < 0.0 {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidMultiplier,
                format!("must be a non-negative number, got {}", value),
                path,
            ));
        }
    }

    for (path, value) in [
        ("key_intensity", appearance.key_intensity),
        ("rim_intensity", appearance.rim_intensity),
    ] {
        if !(0.0..=1.0).contains(&value) {
            result.add_error(ValidationError::with_path(
                ErrorCode::IntensityOutOfRange,
                format!("must be within [0, 1], got {}", value),
                path,
            ));
        }
    }
}

fn validate_decal_text(appearance: &CharacterAppearance, result: &mut ValidationResult) {
    let Some(decal) = appearance.decal.as_ref() else {
        return;
    };
    let (path, text, default) = match decal.kind {
        DecalKind::Number => ("decal.number_text", &decal.number_text, "07"),
        DecalKind::Badge => ("decal.badge_text", &decal.badge_text, "CREW"),
        _ => return,
    };
    if text.as_deref() == Some("") {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::EmptyDecalText,
            format!("empty text; '{}' is drawn instead", default),
            path,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appearance::{Accessory, Decal, LightStyle};
    use crate::preset::{chunky, classic};

    #[test]
    fn test_hex_colors() {
        assert!(is_valid_hex_color("#c51111"));
        assert!(is_valid_hex_color("#FFF"));
        assert!(!is_valid_hex_color("c51111"));
        assert!(!is_valid_hex_color("#c5111"));
        assert!(!is_valid_hex_color("#gggggg"));
        assert!(!is_valid_hex_color("red"));
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(validate_appearance(&classic()).is_ok());
        assert!(validate_appearance(&chunky()).is_ok());
    }

    #[test]
    fn test_bad_color_reports_path() {
        let mut appearance = classic();
        appearance.visor_color = "blue".to_string();
        let result = validate_appearance(&appearance);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code, ErrorCode::InvalidColor);
        assert_eq!(result.errors[0].path.as_deref(), Some("visor_color"));
    }

    #[test]
    fn test_unknown_names() {
        let appearance = classic()
            .with_light_style(LightStyle::from_name("neon"))
            .with_accessory(Some(Accessory::from_name("jetpack")))
            .with_decal(Some(Decal::new(DecalKind::from_name("skull"))));
        let result = validate_appearance(&appearance);
        assert!(result.has_error(ErrorCode::UnknownLightStyle));
        assert!(result.has_error(ErrorCode::UnknownAccessory));
        assert!(result.has_error(ErrorCode::UnknownDecalKind));
    }

    #[test]
    fn test_numeric_ranges() {
        let mut appearance = classic().with_scale(0.0);
        appearance.anatomy.width_mul = -1.0;
        appearance.rim_intensity = 1.5;
        let result = validate_appearance(&appearance);
        assert!(result.has_error(ErrorCode::InvalidScale));
        assert!(result.has_error(ErrorCode::InvalidMultiplier));
        assert!(result.has_error(ErrorCode::IntensityOutOfRange));

        appearance.scale = f64::NAN;
        assert!(validate_appearance(&appearance).has_error(ErrorCode::InvalidScale));
    }

    #[test]
    fn test_empty_decal_text_warns() {
        let appearance = classic().with_decal(Some(
            Decal::new(DecalKind::Badge).with_badge_text(""),
        ));
        let result = validate_appearance(&appearance);
        assert!(result.is_ok());
        assert!(result.has_warning(WarningCode::EmptyDecalText));
    }

    #[test]
    fn test_sheet_config() {
        assert!(validate_sheet_config(&SheetConfig::new(8, 4)).is_ok());

        let result = validate_sheet_config(&SheetConfig::new(0, 4).with_ssaa(0));
        assert!(result.has_error(ErrorCode::NoFrames));
        assert!(result.has_error(ErrorCode::InvalidSupersampling));

        let result = validate_sheet_config(&SheetConfig::new(8, 2));
        assert!(result.is_ok());
        assert!(result.has_warning(WarningCode::UnsupportedDirs));
    }
}
