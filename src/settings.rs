//! Game settings and preferences
//!
//! Persisted separately from high scores in LocalStorage.

use serde::{Deserialize, Serialize};

/// Smallest playable field: the I piece must fit both lying and standing
pub const MIN_WIDTH: usize = 4;
pub const MIN_HEIGHT: usize = 4;
/// Largest field accepted; stored settings beyond this are rejected
pub const MAX_WIDTH: usize = 256;
pub const MAX_HEIGHT: usize = 256;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("grid {width}x{height} is smaller than the 4x4 minimum")]
    GridTooSmall { width: usize, height: usize },
    #[error("grid {width}x{height} is larger than the 256x256 maximum")]
    GridTooLarge { width: usize, height: usize },
    #[error("start level must be at least 1")]
    ZeroStartLevel,
    #[error("minimum drop interval {min}ms exceeds base interval {base}ms")]
    IntervalRange { min: f32, base: f32 },
    #[error("minimum drop interval must be positive, got {0}ms")]
    NonPositiveInterval(f32),
    #[error("speed decay must be in (0, 1], got {0}")]
    DecayRange(f32),
    #[error("lines per level must be at least 1")]
    ZeroLinesPerLevel,
}

/// Rules and pacing for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Grid columns
    pub width: usize,
    /// Grid rows
    pub height: usize,
    /// Level a fresh run starts at (1-based)
    pub start_level: u32,
    /// Gravity interval at level 1
    pub base_interval_ms: f32,
    /// Gravity never gets faster than this
    pub min_interval_ms: f32,
    /// Interval multiplier applied per level above 1
    pub speed_decay: f32,
    /// Cleared rows needed per level-up
    pub lines_per_level: u32,
    /// Whether hosts should draw the landing shadow
    pub show_ghost: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            width: 10,
            height: 20,
            start_level: 1,
            base_interval_ms: 1000.0,
            min_interval_ms: 100.0,
            speed_decay: 0.85,
            lines_per_level: 10,
            show_ghost: true,
        }
    }
}

impl GameSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.width < MIN_WIDTH || self.height < MIN_HEIGHT {
            return Err(SettingsError::GridTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if self.width > MAX_WIDTH || self.height > MAX_HEIGHT {
            return Err(SettingsError::GridTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if self.start_level == 0 {
            return Err(SettingsError::ZeroStartLevel);
        }
        if self.min_interval_ms <= 0.0 {
            return Err(SettingsError::NonPositiveInterval(self.min_interval_ms));
        }
        if self.min_interval_ms > self.base_interval_ms {
            return Err(SettingsError::IntervalRange {
                min: self.min_interval_ms,
                base: self.base_interval_ms,
            });
        }
        if !(self.speed_decay > 0.0 && self.speed_decay <= 1.0) {
            return Err(SettingsError::DecayRange(self.speed_decay));
        }
        if self.lines_per_level == 0 {
            return Err(SettingsError::ZeroLinesPerLevel);
        }
        Ok(())
    }

    /// Gravity interval for a level: `base * decay^(level-1)`, floored at the minimum
    pub fn drop_interval_ms(&self, level: u32) -> f32 {
        let steps = level.saturating_sub(1).min(i32::MAX as u32) as i32;
        (self.base_interval_ms * self.speed_decay.powi(steps)).max(self.min_interval_ms)
    }

    /// Level reached after `lines` total cleared rows
    pub fn level_for_lines(&self, lines: u32) -> u32 {
        self.start_level + lines / self.lines_per_level.max(1)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "block_drop_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<GameSettings>(&json) {
                    Ok(settings) => match settings.validate() {
                        Ok(()) => {
                            log::info!("Loaded settings from LocalStorage");
                            return settings;
                        }
                        Err(e) => log::warn!("Stored settings rejected: {}", e),
                    },
                    Err(e) => log::warn!("Stored settings unreadable: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(GameSettings::default().validate(), Ok(()));
    }

    #[test]
    fn test_drop_interval_curve() {
        let s = GameSettings::default();
        assert_eq!(s.drop_interval_ms(1), 1000.0);
        assert!((s.drop_interval_ms(2) - 850.0).abs() < 0.01);
        assert!(s.drop_interval_ms(3) < s.drop_interval_ms(2));
        // floor reached well before level 30
        assert_eq!(s.drop_interval_ms(30), 100.0);
        assert_eq!(s.drop_interval_ms(u32::MAX), 100.0);
    }

    #[test]
    fn test_level_for_lines() {
        let s = GameSettings::default();
        assert_eq!(s.level_for_lines(0), 1);
        assert_eq!(s.level_for_lines(9), 1);
        assert_eq!(s.level_for_lines(10), 2);
        assert_eq!(s.level_for_lines(25), 3);

        let s = GameSettings {
            start_level: 5,
            ..Default::default()
        };
        assert_eq!(s.level_for_lines(10), 6);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let small = GameSettings {
            width: 3,
            ..Default::default()
        };
        assert!(matches!(
            small.validate(),
            Err(SettingsError::GridTooSmall { width: 3, .. })
        ));

        let level = GameSettings {
            start_level: 0,
            ..Default::default()
        };
        assert_eq!(level.validate(), Err(SettingsError::ZeroStartLevel));

        let range = GameSettings {
            min_interval_ms: 2000.0,
            ..Default::default()
        };
        assert!(matches!(
            range.validate(),
            Err(SettingsError::IntervalRange { .. })
        ));

        let decay = GameSettings {
            speed_decay: 1.5,
            ..Default::default()
        };
        assert_eq!(decay.validate(), Err(SettingsError::DecayRange(1.5)));

        let lines = GameSettings {
            lines_per_level: 0,
            ..Default::default()
        };
        assert_eq!(lines.validate(), Err(SettingsError::ZeroLinesPerLevel));
    }

    #[test]
    fn test_validate_rejects_oversized_grid() {
        let huge = GameSettings {
            width: 3_000_000_000,
            height: 1_000_000,
            ..Default::default()
        };
        assert!(matches!(
            huge.validate(),
            Err(SettingsError::GridTooLarge { .. })
        ));

        let tall = GameSettings {
            height: MAX_HEIGHT + 1,
            ..Default::default()
        };
        assert!(matches!(
            tall.validate(),
            Err(SettingsError::GridTooLarge { .. })
        ));

        let edge = GameSettings {
            width: MAX_WIDTH,
            height: MAX_HEIGHT,
            ..Default::default()
        };
        assert_eq!(edge.validate(), Ok(()));
    }

    #[test]
    fn test_stored_oversized_grid_is_rejected() {
        let stored: GameSettings = serde_json::from_str(r#"{"width": 3000000000}"#).unwrap();
        assert!(stored.validate().is_err());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s: GameSettings = serde_json::from_str(r#"{"width": 12}"#).unwrap();
        assert_eq!(s.width, 12);
        assert_eq!(s.height, 20);
    }
}
