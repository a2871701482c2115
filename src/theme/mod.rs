//! Background theme selection.
//!
//! Pure state holding either a predefined gradient preset or a custom
//! three-stop gradient. No other component reads or writes this state;
//! it only exists for the presentation layer.

use serde::{Deserialize, Serialize};

// ============================================================================
// ColorStops
// ============================================================================

/// The three color stops of a gradient, as `#rrggbb` hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorStops {
    /// First stop
    pub from: String,
    /// Middle stop
    pub via: String,
    /// Last stop
    pub to: String,
}

impl ColorStops {
    /// Creates color stops from three hex colors.
    pub fn new(from: impl Into<String>, via: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            via: via.into(),
            to: to.into(),
        }
    }
}

impl Default for ColorStops {
    fn default() -> Self {
        Self::new("#312e81", "#581c87", "#831843")
    }
}

// ============================================================================
// GradientPreset
// ============================================================================

/// A named, fixed background gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradientPreset {
    /// Stable identifier used for selection
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Hex color stops (from, via, to)
    pub stops: (&'static str, &'static str, &'static str),
}

/// The bundled gradient presets.
pub const GRADIENT_PRESETS: &[GradientPreset] = &[
    GradientPreset {
        id: "purple-dream",
        name: "Purple Dream",
        stops: ("#312e81", "#581c87", "#831843"),
    },
    GradientPreset {
        id: "ocean-breeze",
        name: "Ocean Breeze",
        stops: ("#1e3a8a", "#1d4ed8", "#06b6d4"),
    },
    GradientPreset {
        id: "sunset-vibes",
        name: "Sunset Vibes",
        stops: ("#c2410c", "#be185d", "#be123c"),
    },
    GradientPreset {
        id: "forest-mist",
        name: "Forest Mist",
        stops: ("#14532d", "#065f46", "#0f766e"),
    },
];

/// Looks up a preset by id.
#[must_use]
pub fn find_preset(id: &str) -> Option<&'static GradientPreset> {
    GRADIENT_PRESETS.iter().find(|p| p.id == id)
}

// ============================================================================
// ThemeState
// ============================================================================

/// Which gradient source is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    /// One of the bundled presets
    Predefined,
    /// The user-defined custom stops
    Custom,
}

/// One of the three stops of the custom gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientStop {
    /// First stop
    From,
    /// Middle stop
    Via,
    /// Last stop
    To,
}

/// Cosmetic theme state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeState {
    /// Active gradient source
    pub mode: ThemeMode,
    /// Id of the selected preset (always a valid preset id)
    pub preset_id: String,
    /// Custom gradient stops
    pub custom: ColorStops,
}

impl Default for ThemeState {
    fn default() -> Self {
        Self {
            mode: ThemeMode::Predefined,
            preset_id: GRADIENT_PRESETS[0].id.to_string(),
            custom: ColorStops::default(),
        }
    }
}

impl ThemeState {
    /// Selects a predefined gradient by id.
    ///
    /// Switches the mode to `Predefined`. Returns an error for an unknown
    /// preset id, leaving the state unchanged.
    pub fn select_preset(&mut self, id: &str) -> Result<(), String> {
        let preset =
            find_preset(id).ok_or_else(|| format!("テーマ '{}' は存在しません", id))?;
        self.mode = ThemeMode::Predefined;
        self.preset_id = preset.id.to_string();
        Ok(())
    }

    /// Switches between the custom gradient and the selected preset.
    pub fn enable_custom(&mut self, enabled: bool) {
        self.mode = if enabled {
            ThemeMode::Custom
        } else {
            ThemeMode::Predefined
        };
    }

    /// Updates one stop of the custom gradient.
    ///
    /// The color must be a `#rrggbb` hex string; invalid values are
    /// rejected at this boundary.
    pub fn set_stop(&mut self, stop: GradientStop, color: &str) -> Result<(), String> {
        validate_hex_color(color)?;
        let target = match stop {
            GradientStop::From => &mut self.custom.from,
            GradientStop::Via => &mut self.custom.via,
            GradientStop::To => &mut self.custom.to,
        };
        *target = color.to_lowercase();
        Ok(())
    }

    /// Returns the stops currently in effect, preset or custom.
    #[must_use]
    pub fn active_stops(&self) -> ColorStops {
        match self.mode {
            ThemeMode::Custom => self.custom.clone(),
            ThemeMode::Predefined => {
                // preset_id is kept valid by select_preset
                let preset = find_preset(&self.preset_id).unwrap_or(&GRADIENT_PRESETS[0]);
                ColorStops::new(preset.stops.0, preset.stops.1, preset.stops.2)
            }
        }
    }
}

fn validate_hex_color(color: &str) -> Result<(), String> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(format!(
            "色は #rrggbb 形式で指定してください: '{}'",
            color
        ))
    }
}

// ============================================================================
// Tests
// ============================================================================
