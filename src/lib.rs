//! Stick Hero - a stick-bridge timing arcade game
//!
//! Core modules:
//! - `sim`: Per-frame simulation (phase machine, collision, generators, effects)
//! - `session`: Owns the world, score and records; the entry point the UI drives
//! - `renderer`: Translates a world snapshot into draw calls
//! - `platform`: Input mapping and frame scheduling
//! - `persistence`: Key/value storage for stats and settings
//! - `tuning`: Data-driven game balance

pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod score;
pub mod session;
pub mod settings;
pub mod sim;
pub mod stats;
pub mod tuning;

pub use score::ScoreBoard;
pub use session::{Session, UiEvent};
pub use settings::Settings;
pub use stats::{GameStats, Records};
pub use tuning::Tuning;

/// Game-wide constants that are not balance knobs
pub mod consts {
    /// Reference frame length (ms) that per-frame velocities are expressed in
    pub const FRAME_MS: f32 = 16.0;
    /// Largest elapsed time a single tick may consume
    pub const MAX_FRAME_MS: f32 = 100.0;

    /// Rotation at which a stretched stick lies flat
    pub const STICK_FLAT_DEGREES: f32 = 90.0;
    /// Rotation at which a missed stick hangs straight down
    pub const STICK_DOWN_DEGREES: f32 = 180.0;

    /// Hero trail samples kept (newest first)
    pub const HERO_TRAIL_LENGTH: usize = 8;
}

/// Sine of an angle given in degrees
#[inline]
pub fn sinus(degrees: f32) -> f32 {
    (degrees / 180.0 * std::f32::consts::PI).sin()
}

/// Per-frame factor for velocities expressed against the reference frame
#[inline]
pub fn frame_factor(elapsed_ms: f32) -> f32 {
    elapsed_ms / consts::FRAME_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sinus_degrees() {
        assert!(sinus(0.0).abs() < 1e-6);
        assert!((sinus(90.0) - 1.0).abs() < 1e-6);
        assert!(sinus(180.0).abs() < 1e-5);
        assert!((sinus(270.0) + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_frame_factor() {
        assert_eq!(frame_factor(16.0), 1.0);
        assert_eq!(frame_factor(32.0), 2.0);
    }
}
