//! Appearance documents as collaborators exchange them: overrides JSON
//! merged onto presets, full appearance round-trips, and hashing.

use crewmate_spec::{
    base_preset, canonical_appearance_hash, validate_appearance, Accessory, AppearanceOverrides,
    CharacterAppearance, DecalKind, ErrorCode, LightStyle, Preset,
};
use pretty_assertions::assert_eq;

// ============================================================================
// Override merging
// ============================================================================

/// A partial anatomy override keeps every other anatomy default.
#[test]
fn test_partial_anatomy_override_from_json() {
    let overrides: AppearanceOverrides = serde_json::from_str(
        r##"{
            "body_color": "#117f2d",
            "anatomy": { "belly": 0.3 },
            "visor_geometry": { "offset_x": 0.02 }
        }"##,
    )
    .unwrap();
    let appearance = base_preset(&overrides);

    let classic = Preset::Classic.appearance();
    assert_eq!(appearance.body_color, "#117f2d");
    assert!((appearance.anatomy.belly - 0.3).abs() < 1e-12);
    assert_eq!(appearance.anatomy.tilt, classic.anatomy.tilt);
    assert_eq!(appearance.anatomy.bag_depth, classic.anatomy.bag_depth);
    assert_eq!(appearance.visor_geometry.width, classic.visor_geometry.width);
    assert!((appearance.visor_geometry.offset_x - 0.02).abs() < 1e-12);
}

/// Overrides given for a preset's own fields replace the preset values.
#[test]
fn test_presets_differ_only_in_proportions() {
    let classic = Preset::Classic.appearance();
    for preset in [Preset::Slim, Preset::Chunky, Preset::Heroic] {
        let appearance = preset.appearance();
        assert_eq!(appearance.body_color, classic.body_color);
        assert_eq!(appearance.light_style, classic.light_style);
        assert_eq!(appearance.accessory, classic.accessory);
        assert_ne!(appearance.anatomy, classic.anatomy, "{} anatomy", preset);
        assert_ne!(
            appearance.visor_geometry, classic.visor_geometry,
            "{} visor",
            preset
        );
    }
}

#[test]
fn test_decal_override_from_json() {
    let overrides: AppearanceOverrides = serde_json::from_str(
        r##"{"decal": {"kind": "number", "number_text": "42", "color": "#fde047"}}"##,
    )
    .unwrap();
    let appearance = base_preset(&overrides);
    assert_eq!(appearance.decal_kind(), DecalKind::Number);
    let decal = appearance.decal.as_ref().unwrap();
    assert_eq!(decal.number_text.as_deref(), Some("42"));
    assert!(validate_appearance(&appearance).is_ok());
}

// ============================================================================
// Full documents
// ============================================================================

#[test]
fn test_full_appearance_roundtrip() {
    let appearance = Preset::Chunky
        .appearance()
        .with_light_style(LightStyle::Cel3)
        .with_accessory(Some(Accessory::Horns));
    let json = serde_json::to_string_pretty(&appearance).unwrap();
    let parsed: CharacterAppearance = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, appearance);
}

/// Unknown names survive parsing and are only rejected by strict validation.
#[test]
fn test_unknown_names_parse_then_fail_validation() {
    let mut value = serde_json::to_value(Preset::Classic.appearance()).unwrap();
    value["accessory"] = serde_json::json!("jetpack");
    value["light_style"] = serde_json::json!("toon");

    let appearance: CharacterAppearance = serde_json::from_value(value).unwrap();
    assert_eq!(appearance.accessory, Some(Accessory::Other("jetpack".into())));

    let result = validate_appearance(&appearance);
    assert!(result.has_error(ErrorCode::UnknownAccessory));
    assert!(result.has_error(ErrorCode::UnknownLightStyle));
}

// ============================================================================
// Hashing
// ============================================================================

/// Field order in the source document does not affect the hash.
#[test]
fn test_hash_ignores_document_key_order() {
    let appearance = Preset::Slim.appearance();
    let json = serde_json::to_string(&appearance).unwrap();
    let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();

    // Rebuild the object in reverse key order.
    let map = value.as_object_mut().unwrap();
    let reversed: serde_json::Map<String, serde_json::Value> = map
        .iter()
        .rev()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    let reparsed: CharacterAppearance =
        serde_json::from_value(serde_json::Value::Object(reversed)).unwrap();

    assert_eq!(
        canonical_appearance_hash(&appearance).unwrap(),
        canonical_appearance_hash(&reparsed).unwrap()
    );
}

#[test]
fn test_each_preset_hashes_uniquely() {
    let hashes: std::collections::HashSet<String> = Preset::ALL
        .iter()
        .map(|p| canonical_appearance_hash(&p.appearance()).unwrap())
        .collect();
    assert_eq!(hashes.len(), Preset::ALL.len());
}
