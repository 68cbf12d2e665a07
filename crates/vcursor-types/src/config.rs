//! Tunable cursor settings and global input policy.
//!
//! Loaded from a TOML file with a `[cursor]` table for the motion tunables
//! and a `[policy]` table for the global input routing flags. Every field
//! has a default, so an empty file is a valid configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::curve::{AccelerationCurve, CurveKey};
use crate::error::{CursorError, Result};

/// Smallest radius a cursor may have.
pub const MIN_CURSOR_RADIUS: f32 = 16.0;

/// Motion tunables for the analog cursor.
///
/// Speeds, drag, and radius are expressed at a DPI scale of 1.0 and are
/// multiplied by the viewport's DPI scale every frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorSettings {
    /// Maps stick magnitude to acceleration. `None` disables stick motion.
    #[serde(default = "default_curve")]
    pub acceleration_curve: Option<AccelerationCurve>,
    /// Extra multiplier applied on top of the curve output.
    #[serde(default = "default_multiplier")]
    pub acceleration_multiplier: f32,
    /// Stick magnitude at or below which input is ignored.
    #[serde(default = "default_deadzone")]
    pub deadzone: f32,
    /// Drag while nothing interactable is under the cursor.
    #[serde(default = "default_drag")]
    pub drag_coefficient: f32,
    /// Drag while hovering an interactable widget.
    #[serde(default = "default_drag_hovered")]
    pub drag_coefficient_hovered: f32,
    /// Speeds below this snap to zero (pixels/second).
    #[serde(default = "default_min_speed")]
    pub min_speed: f32,
    /// Speed cap while nothing interactable is under the cursor.
    #[serde(default = "default_max_speed")]
    pub max_speed: f32,
    /// Speed cap while hovering an interactable widget.
    #[serde(default = "default_max_speed_hovered")]
    pub max_speed_hovered: f32,
    /// Use the stick acceleration directly as velocity (no inertia).
    #[serde(default)]
    pub no_acceleration: bool,
    /// Initial clamp-to-viewport policy for new cursors.
    #[serde(default = "yes")]
    pub default_clamp_to_viewport: bool,
    /// Interaction radius of the analog cursor.
    #[serde(default = "default_radius")]
    pub analog_radius: f32,
}

fn default_curve() -> Option<AccelerationCurve> {
    Some(AccelerationCurve::from_keys([
        CurveKey::new(0.0, 0.0),
        CurveKey::new(0.5, 3000.0),
        CurveKey::new(1.0, 12000.0),
    ]))
}
fn default_multiplier() -> f32 {
    1.0
}
fn default_deadzone() -> f32 {
    0.15
}
fn default_drag() -> f32 {
    8.0
}
fn default_drag_hovered() -> f32 {
    14.0
}
fn default_min_speed() -> f32 {
    5.0
}
fn default_max_speed() -> f32 {
    1500.0
}
fn default_max_speed_hovered() -> f32 {
    750.0
}
fn default_radius() -> f32 {
    MIN_CURSOR_RADIUS
}
fn yes() -> bool {
    true
}

impl Default for CursorSettings {
    fn default() -> Self {
        Self {
            acceleration_curve: default_curve(),
            acceleration_multiplier: default_multiplier(),
            deadzone: default_deadzone(),
            drag_coefficient: default_drag(),
            drag_coefficient_hovered: default_drag_hovered(),
            min_speed: default_min_speed(),
            max_speed: default_max_speed(),
            max_speed_hovered: default_max_speed_hovered(),
            no_acceleration: false,
            default_clamp_to_viewport: true,
            analog_radius: default_radius(),
        }
    }
}

impl CursorSettings {
    /// Reject settings that cannot produce sensible motion.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.deadzone) {
            return Err(CursorError::Config(format!(
                "deadzone must be in [0, 1), got {}",
                self.deadzone
            )));
        }
        let non_negative = [
            ("acceleration_multiplier", self.acceleration_multiplier),
            ("drag_coefficient", self.drag_coefficient),
            ("drag_coefficient_hovered", self.drag_coefficient_hovered),
            ("min_speed", self.min_speed),
            ("max_speed", self.max_speed),
            ("max_speed_hovered", self.max_speed_hovered),
            ("analog_radius", self.analog_radius),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(CursorError::Config(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Global input routing flags owned by the game, read every event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputPolicy {
    /// The first gamepad is assigned to the second local user, so gamepad
    /// events arrive one user slot lower than their owner.
    #[serde(default)]
    pub skip_assigning_gamepad_to_player_one: bool,
    /// Split-screen is active; when false every player shares the screen.
    #[serde(default = "yes")]
    pub use_splitscreen: bool,
}

impl Default for InputPolicy {
    fn default() -> Self {
        Self {
            skip_assigning_gamepad_to_player_one: false,
            use_splitscreen: true,
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VirtualCursorConfig {
    #[serde(default)]
    pub cursor: CursorSettings,
    #[serde(default)]
    pub policy: InputPolicy,
}

impl VirtualCursorConfig {
    /// Parse and validate a TOML configuration.
    pub fn from_toml(src: &str) -> Result<Self> {
        let config: Self = toml::from_str(src)?;
        config.cursor.validate()?;
        if config
            .cursor
            .acceleration_curve
            .as_ref()
            .is_none_or(AccelerationCurve::is_empty)
        {
            log::warn!("No acceleration curve configured -- stick input will not move the cursor");
        }
        Ok(config)
    }

    /// Load a TOML configuration from disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&src)?;
        log::info!("Loaded cursor config from {}", path.display());
        Ok(config)
    }
}
