//! Character appearance types.
//!
//! A [`CharacterAppearance`] is the complete renderable identity of one
//! crewmate: colours, lighting style, body proportions, visor geometry,
//! decal and accessory. Every proportion is a dimensionless multiplier of
//! the per-render base unit (`48 * scale`).

use serde::{Deserialize, Serialize};

/// Base unit in pixels before `scale` is applied.
pub const BASE_UNIT: f64 = 48.0;

/// Light style names accepted by the renderer.
pub const LIGHT_STYLES: [&str; 4] = ["soft", "cel3", "cel5", "metallic"];

/// Accessory names accepted by the renderer.
pub const ACCESSORIES: [&str; 8] = [
    "cap", "flower", "crown", "toilet", "antenna", "halo", "bandana", "horns",
];

/// Decal kind names accepted by the renderer.
pub const DECAL_KINDS: [&str; 6] = ["none", "stripe", "chevron", "star", "number", "badge"];

/// Declares a string-backed enum whose unknown names survive as `Other`.
///
/// Unknown names are not rejected at parse time: the renderer applies a
/// fallback for them and strict callers use `validation`.
macro_rules! open_name_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// A name outside the documented set.
            Other(String),
        }

        impl $name {
            /// Parses a name; unknown names become `Other`.
            pub fn from_name(name: &str) -> Self {
                match name {
                    $($text => $name::$variant,)+
                    other => $name::Other(other.to_string()),
                }
            }

            /// Returns the serialized name.
            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $text,)+
                    $name::Other(name) => name.as_str(),
                }
            }

            /// Returns true for names in the documented set.
            pub fn is_known(&self) -> bool {
                !matches!(self, $name::Other(_))
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                $name::from_name(&name)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

open_name_enum! {
    /// Shading model for the body fill.
    pub enum LightStyle {
        /// Smooth gradient shading.
        Soft => "soft",
        /// Three discrete tone bands.
        Cel3 => "cel3",
        /// Five discrete tone bands.
        Cel5 => "cel5",
        /// Five bands, same banding as `Cel5`.
        Metallic => "metallic",
    }
}

open_name_enum! {
    /// Head accessory drawn above the body.
    pub enum Accessory {
        Cap => "cap",
        Flower => "flower",
        Crown => "crown",
        Toilet => "toilet",
        Antenna => "antenna",
        Halo => "halo",
        Bandana => "bandana",
        Horns => "horns",
    }
}

open_name_enum! {
    /// Decal painted on the body, clipped to the silhouette.
    pub enum DecalKind {
        None => "none",
        Stripe => "stripe",
        Chevron => "chevron",
        Star => "star",
        Number => "number",
        Badge => "badge",
    }
}

impl Default for LightStyle {
    fn default() -> Self {
        LightStyle::Soft
    }
}

impl Default for DecalKind {
    fn default() -> Self {
        DecalKind::None
    }
}

/// Body proportion offsets and multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anatomy {
    /// Body lean in radians.
    pub tilt: f64,
    /// Belly bulge (0-1).
    pub belly: f64,
    /// Shoulder notch depth (0-1).
    pub shoulder: f64,
    /// Height multiplier.
    pub height_mul: f64,
    /// Width multiplier.
    pub width_mul: f64,
    /// Foot flattening (0-1).
    pub foot_squash: f64,
    /// Backpack vertical placement.
    pub bag_height: f64,
    /// Backpack horizontal protrusion.
    pub bag_depth: f64,
}

impl Default for Anatomy {
    fn default() -> Self {
        Self {
            tilt: -0.04,
            belly: 0.15,
            shoulder: 0.10,
            height_mul: 1.00,
            width_mul: 1.00,
            foot_squash: 0.10,
            bag_height: 0.10,
            bag_depth: 1.10,
        }
    }
}

/// Visor ellipse, all lengths as fractions of the base unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisorGeometry {
    /// Horizontal radius.
    pub width: f64,
    /// Vertical radius.
    pub height: f64,
    /// Rotation in radians.
    pub tilt: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for VisorGeometry {
    fn default() -> Self {
        Self {
            width: 0.24,
            height: 0.17,
            tilt: -0.15,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

/// Decal settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Decal {
    /// What to paint.
    pub kind: DecalKind,
    /// Fill colour; white when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Text for the `number` decal; `07` when absent or empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_text: Option<String>,
    /// Text for the `badge` decal; `CREW` when absent or empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge_text: Option<String>,
}

impl Decal {
    /// Creates a decal of the given kind with default colour and text.
    pub fn new(kind: DecalKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    /// Sets the decal colour.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets the text drawn by the `number` decal.
    pub fn with_number_text(mut self, text: impl Into<String>) -> Self {
        self.number_text = Some(text.into());
        self
    }

    /// Sets the text drawn by the `badge` decal.
    pub fn with_badge_text(mut self, text: impl Into<String>) -> Self {
        self.badge_text = Some(text.into());
        self
    }
}

/// The complete renderable identity of a crewmate.
///
/// The renderer only reads this; it never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterAppearance {
    /// Body fill colour (hex).
    pub body_color: String,
    /// Main outline colour (hex).
    pub outline_color: String,
    /// Visor base colour (hex).
    pub visor_color: String,
    /// Rim light colour (hex).
    pub rim_color: String,
    /// Key light colour (hex).
    pub key_color: String,

    /// Body shading model.
    pub light_style: LightStyle,
    /// Key light angle in degrees.
    pub key_angle: f64,
    /// Key light intensity (0-1).
    pub key_intensity: f64,
    /// Rim stroke alpha (0-1).
    pub rim_intensity: f64,
    /// Multiplier for every outline stroke width.
    pub outline_width: f64,

    /// Size multiplier applied to the 48px base unit.
    pub scale: f64,
    pub anatomy: Anatomy,
    pub visor_geometry: VisorGeometry,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decal: Option<Decal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessory: Option<Accessory>,

    pub gloss: bool,
    pub dithering: bool,
    pub squash: bool,
}

impl CharacterAppearance {
    /// Base unit in pixels for this appearance.
    pub fn base(&self) -> f64 {
        BASE_UNIT * self.scale
    }

    /// Returns the decal kind, treating a missing decal as `none`.
    pub fn decal_kind(&self) -> DecalKind {
        self.decal
            .as_ref()
            .map(|d| d.kind.clone())
            .unwrap_or(DecalKind::None)
    }

    /// Sets the accessory.
    pub fn with_accessory(mut self, accessory: Option<Accessory>) -> Self {
        self.accessory = accessory;
        self
    }

    /// Sets the decal.
    pub fn with_decal(mut self, decal: Option<Decal>) -> Self {
        self.decal = decal;
        self
    }

    /// Sets the light style.
    pub fn with_light_style(mut self, style: LightStyle) -> Self {
        self.light_style = style;
        self
    }

    /// Sets the scale.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }
}

impl Default for CharacterAppearance {
    fn default() -> Self {
        crate::preset::base_preset(&Default::default())
    }
}
