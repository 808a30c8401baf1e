//! Visual preferences
//!
//! Persisted separately from the records in LocalStorage. Only the renderer
//! reads these; gameplay is identical whatever they say.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, Storage};

/// Player-facing render toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Visual Effects ===
    /// Landing bursts and dust puffs
    pub particles: bool,
    /// Full-screen flashes on perfect, golden and game over
    pub flashes: bool,
    /// Camera zoom and shake
    pub camera_motion: bool,
    /// Rain, snow, fog and storm layers
    pub weather_effects: bool,
    /// Fading hero trail while walking
    pub hero_trail: bool,

    // === HUD ===
    pub show_fps: bool,

    // === Accessibility ===
    /// Reduced motion (no flashes, zoom or shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            particles: true,
            flashes: true,
            camera_motion: true,
            weather_effects: true,
            hero_trail: true,

            show_fps: false,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "stickHeroSettings";

    /// Effective flashes (respects reduced_motion)
    pub fn effective_flashes(&self) -> bool {
        self.flashes && !self.reduced_motion
    }

    /// Effective zoom and shake (respects reduced_motion)
    pub fn effective_camera_motion(&self) -> bool {
        self.camera_motion && !self.reduced_motion
    }

    pub fn load(storage: &dyn Storage) -> Self {
        match persistence::load_json(storage, Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, storage: &mut dyn Storage) {
        persistence::save_json(storage, Self::STORAGE_KEY, self);
        log::info!("Settings saved");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_reduced_motion_overrides() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_flashes());
        assert!(!settings.effective_camera_motion());
        assert!(settings.particles);
    }

    #[test]
    fn test_save_then_load() {
        let mut storage = MemoryStorage::new();
        let settings = Settings {
            weather_effects: false,
            show_fps: true,
            ..Default::default()
        };
        settings.save(&mut storage);
        assert_eq!(Settings::load(&storage), settings);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let mut storage = MemoryStorage::new();
        storage.set_item(Settings::STORAGE_KEY, r#"{"particles":false}"#).unwrap();
        let settings = Settings::load(&storage);
        assert!(!settings.particles);
        assert!(settings.flashes);
    }
}
