//! Focus presentation settings.
//!
//! Loaded from TOML; every field has a default so a partial file is fine:
//!
//! ```toml
//! flash_fade_secs = 0.3
//! flash_width_min = 1.0
//! flash_width_max = 3.0
//! background_alpha_scale = 0.4
//! focus_color = { r = 81, g = 152, b = 213, a = 255 }
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, ConfigResult};
use crate::types::Rgba;

const DEFAULT_FLASH_FADE_SECS: f32 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusConfig {
    /// Seconds for the focus flash to decay to nothing.
    pub flash_fade_secs: f32,
    /// Highlight width with no flash.
    pub flash_width_min: f32,
    /// Highlight width at full flash.
    pub flash_width_max: f32,
    /// Base keyboard focus colour.
    pub focus_color: Rgba,
    /// Alpha multiplier for the focus colour while the application is in the
    /// background.
    pub background_alpha_scale: f32,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            flash_fade_secs: DEFAULT_FLASH_FADE_SECS,
            flash_width_min: 1.0,
            flash_width_max: 3.0,
            focus_color: Rgba::FOCUS_DEFAULT,
            background_alpha_scale: 0.4,
        }
    }
}

impl FocusConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.flash_fade_secs.is_finite() && self.flash_fade_secs > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "flash_fade_secs must be positive, got {}",
                self.flash_fade_secs
            )));
        }
        if Duration::try_from_secs_f32(self.flash_fade_secs).is_err() {
            return Err(ConfigError::Invalid(format!(
                "flash_fade_secs {} does not fit in a duration",
                self.flash_fade_secs
            )));
        }
        if !(self.flash_width_min.is_finite() && self.flash_width_max.is_finite())
            || self.flash_width_min < 0.0
            || self.flash_width_min > self.flash_width_max
        {
            return Err(ConfigError::Invalid(format!(
                "flash width range {}..{} is not ascending",
                self.flash_width_min, self.flash_width_max
            )));
        }
        if !(0.0..=1.0).contains(&self.background_alpha_scale) {
            return Err(ConfigError::Invalid(format!(
                "background_alpha_scale must be within [0, 1], got {}",
                self.background_alpha_scale
            )));
        }
        Ok(())
    }

    /// Flash fade time. Values that are not a valid duration fall back to
    /// the default fade.
    pub fn flash_fade(&self) -> Duration {
        match Duration::try_from_secs_f32(self.flash_fade_secs) {
            Ok(fade) => fade,
            Err(err) => {
                warn!(secs = self.flash_fade_secs, %err, "invalid flash fade, using default");
                Duration::from_secs_f32(DEFAULT_FLASH_FADE_SECS)
            }
        }
    }
}
