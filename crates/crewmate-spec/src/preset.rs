//! Preset appearances and override merging.
//!
//! [`base_preset`] starts from the hand-tuned default crewmate and applies
//! caller overrides: top-level fields replace, while `anatomy` and
//! `visor_geometry` merge field by field so a partial override keeps the
//! untouched defaults. The four named presets are thin wrappers around it.

use serde::{Deserialize, Deserializer, Serialize};

use crate::appearance::{
    Accessory, Anatomy, CharacterAppearance, Decal, DecalKind, LightStyle, VisorGeometry,
};

/// Partial [`Anatomy`]; unset fields keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnatomyOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tilt: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub belly: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shoulder: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_mul: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width_mul: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foot_squash: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bag_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bag_depth: Option<f64>,
}

impl AnatomyOverrides {
    /// Applies the set fields on top of `base`.
    pub fn apply(&self, base: Anatomy) -> Anatomy {
        Anatomy {
            tilt: self.tilt.unwrap_or(base.tilt),
            belly: self.belly.unwrap_or(base.belly),
            shoulder: self.shoulder.unwrap_or(base.shoulder),
            height_mul: self.height_mul.unwrap_or(base.height_mul),
            width_mul: self.width_mul.unwrap_or(base.width_mul),
            foot_squash: self.foot_squash.unwrap_or(base.foot_squash),
            bag_height: self.bag_height.unwrap_or(base.bag_height),
            bag_depth: self.bag_depth.unwrap_or(base.bag_depth),
        }
    }
}

/// Partial [`VisorGeometry`]; unset fields keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VisorOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tilt: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_y: Option<f64>,
}

impl VisorOverrides {
    /// Applies the set fields on top of `base`.
    pub fn apply(&self, base: VisorGeometry) -> VisorGeometry {
        VisorGeometry {
            width: self.width.unwrap_or(base.width),
            height: self.height.unwrap_or(base.height),
            tilt: self.tilt.unwrap_or(base.tilt),
            offset_x: self.offset_x.unwrap_or(base.offset_x),
            offset_y: self.offset_y.unwrap_or(base.offset_y),
        }
    }
}

/// Partial [`CharacterAppearance`] accepted by [`base_preset`].
///
/// `decal` and `accessory` distinguish "not given" (keep the default) from
/// an explicit JSON `null` (remove it).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppearanceOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visor_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rim_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light_style: Option<LightStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_intensity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rim_intensity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anatomy: Option<AnatomyOverrides>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visor_geometry: Option<VisorOverrides>,
    #[serde(
        default,
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub decal: Option<Option<Decal>>,
    #[serde(
        default,
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub accessory: Option<Option<Accessory>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gloss: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dithering: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub squash: Option<bool>,
}

/// Maps a present field (including `null`) to `Some`.
fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl AppearanceOverrides {
    /// Overrides only the anatomy.
    pub fn anatomy(anatomy: AnatomyOverrides) -> Self {
        Self {
            anatomy: Some(anatomy),
            ..Default::default()
        }
    }

    /// Sets the visor overrides.
    pub fn with_visor(mut self, visor: VisorOverrides) -> Self {
        self.visor_geometry = Some(visor);
        self
    }
}

impl AppearanceOverrides {
    /// Applies the set fields on top of `base`.
    ///
    /// Top-level fields replace; `anatomy` and `visor_geometry` merge into
    /// the base values field by field.
    pub fn apply(&self, base: &CharacterAppearance) -> CharacterAppearance {
        let pick = |value: &Option<String>, current: &String| {
            value.clone().unwrap_or_else(|| current.clone())
        };

        CharacterAppearance {
            body_color: pick(&self.body_color, &base.body_color),
            outline_color: pick(&self.outline_color, &base.outline_color),
            visor_color: pick(&self.visor_color, &base.visor_color),
            rim_color: pick(&self.rim_color, &base.rim_color),
            key_color: pick(&self.key_color, &base.key_color),
            light_style: self
                .light_style
                .clone()
                .unwrap_or_else(|| base.light_style.clone()),
            key_angle: self.key_angle.unwrap_or(base.key_angle),
            key_intensity: self.key_intensity.unwrap_or(base.key_intensity),
            rim_intensity: self.rim_intensity.unwrap_or(base.rim_intensity),
            outline_width: self.outline_width.unwrap_or(base.outline_width),
            scale: self.scale.unwrap_or(base.scale),
            anatomy: self
                .anatomy
                .map(|a| a.apply(base.anatomy))
                .unwrap_or(base.anatomy),
            visor_geometry: self
                .visor_geometry
                .map(|v| v.apply(base.visor_geometry))
                .unwrap_or(base.visor_geometry),
            decal: self.decal.clone().unwrap_or_else(|| base.decal.clone()),
            accessory: self
                .accessory
                .clone()
                .unwrap_or_else(|| base.accessory.clone()),
            gloss: self.gloss.unwrap_or(base.gloss),
            dithering: self.dithering.unwrap_or(base.dithering),
            squash: self.squash.unwrap_or(base.squash),
        }
    }
}

fn default_crewmate() -> CharacterAppearance {
    CharacterAppearance {
        body_color: "#c51111".to_string(),
        outline_color: "#0f172a".to_string(),
        visor_color: "#8fd3ff".to_string(),
        rim_color: "#c7d2fe".to_string(),
        key_color: "#ffffff".to_string(),
        light_style: LightStyle::Soft,
        key_angle: 315.0,
        key_intensity: 0.85,
        rim_intensity: 0.65,
        outline_width: 1.0,
        scale: 2.8,
        anatomy: Anatomy::default(),
        visor_geometry: VisorGeometry::default(),
        decal: Some(Decal::new(DecalKind::None)),
        accessory: Some(Accessory::Halo),
        gloss: true,
        dithering: true,
        squash: true,
    }
}

/// Builds an appearance from the default crewmate plus `overrides`.
pub fn base_preset(overrides: &AppearanceOverrides) -> CharacterAppearance {
    overrides.apply(&default_crewmate())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Classic,
    Slim,
    Chunky,
    Heroic,
}

impl Preset {
    /// All presets in display order.
    pub const ALL: [Preset; 4] = [Preset::Classic, Preset::Slim, Preset::Chunky, Preset::Heroic];

    /// Lowercase preset name.
    pub fn name(&self) -> &'static str {
        match self {
            Preset::Classic => "classic",
            Preset::Slim => "slim",
            Preset::Chunky => "chunky",
            Preset::Heroic => "heroic",
        }
    }

    /// Looks up a preset by name, ignoring case.
    pub fn by_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }

    /// The overrides this preset applies to the default crewmate.
    pub fn overrides(&self) -> AppearanceOverrides {
        match self {
            Preset::Classic => AppearanceOverrides::default(),
            Preset::Slim => AppearanceOverrides::anatomy(AnatomyOverrides {
                height_mul: Some(1.06),
                width_mul: Some(0.92),
                belly: Some(0.06),
                shoulder: Some(0.06),
                ..Default::default()
            })
            .with_visor(VisorOverrides {
                width: Some(0.22),
                height: Some(0.16),
                tilt: Some(-0.12),
                ..Default::default()
            }),
            Preset::Chunky => AppearanceOverrides::anatomy(AnatomyOverrides {
                height_mul: Some(0.98),
                width_mul: Some(1.10),
                belly: Some(0.24),
                shoulder: Some(0.14),
                ..Default::default()
            })
            .with_visor(VisorOverrides {
                width: Some(0.26),
                height: Some(0.18),
                tilt: Some(-0.18),
                ..Default::default()
            }),
            Preset::Heroic => AppearanceOverrides::anatomy(AnatomyOverrides {
                height_mul: Some(1.04),
                width_mul: Some(1.04),
                shoulder: Some(0.18),
                tilt: Some(-0.07),
                ..Default::default()
            })
            .with_visor(VisorOverrides {
                width: Some(0.25),
                height: Some(0.17),
                tilt: Some(-0.16),
                ..Default::default()
            }),
        }
    }

    /// Builds the full appearance.
    pub fn appearance(&self) -> CharacterAppearance {
        base_preset(&self.overrides())
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The default crewmate.
pub fn classic() -> CharacterAppearance {
    Preset::Classic.appearance()
}

/// Taller, narrower body with a smaller visor.
pub fn slim() -> CharacterAppearance {
    Preset::Slim.appearance()
}

/// Wider body with a pronounced belly.
pub fn chunky() -> CharacterAppearance {
    Preset::Chunky.appearance()
}

/// Broad shoulders and a forward lean.
pub fn heroic() -> CharacterAppearance {
    Preset::Heroic.appearance()
}
