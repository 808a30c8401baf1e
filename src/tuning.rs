//! Data-driven game balance
//!
//! Every gameplay and generation constant lives here so a JSON blob can
//! override any subset of them (`#[serde(default)]` fills in the rest).
//!
//! Speeds are "milliseconds per unit": a quantity advances by
//! `elapsed_ms / speed` each tick. Decorative speeds are per 16 ms frame.

use serde::{Deserialize, Serialize};

/// Inclusive numeric range used by the generators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
}

/// Platform generation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformParams {
    pub gap: Span,
    pub width: Span,
    /// Probability that a platform is golden
    pub golden_chance: f64,
    /// Platforms that must already exist before a golden one may appear
    pub golden_after: usize,
}

impl Default for PlatformParams {
    fn default() -> Self {
        Self {
            gap: Span::new(40.0, 200.0),
            width: Span::new(20.0, 100.0),
            golden_chance: 0.15,
            golden_after: 4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeParams {
    pub gap: Span,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            gap: Span::new(30.0, 150.0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BirdParams {
    pub speed: Span,
    pub size: Span,
    pub y: Span,
    /// Horizontal slack past the viewport edge before a bird wraps around
    pub wrap_margin: f32,
}

impl Default for BirdParams {
    fn default() -> Self {
        Self {
            speed: Span::new(0.5, 2.0),
            size: Span::new(4.0, 8.0),
            y: Span::new(50.0, 150.0),
            wrap_margin: 100.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudParams {
    pub width: Span,
    pub height: Span,
    pub speed: Span,
    pub y: Span,
    pub opacity: Span,
}

impl Default for CloudParams {
    fn default() -> Self {
        Self {
            width: Span::new(60.0, 140.0),
            height: Span::new(20.0, 50.0),
            speed: Span::new(0.1, 0.5),
            y: Span::new(5.0, 200.0),
            opacity: Span::new(0.5, 0.9),
        }
    }
}

/// One sinusoidal background layer (hill or mountain range)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ridge {
    pub base_height: f32,
    pub amplitude: f32,
    pub stretch: f32,
}

/// Complete tuning table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Play field ===
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub platform_height: f32,
    pub hero_width: f32,
    pub hero_height: f32,
    pub hero_distance_from_edge: f32,
    /// Screen-left padding kept when the camera settles on a platform
    pub padding_x: f32,
    pub perfect_area_size: f32,
    /// Extra fall distance below the platform top before the round ends
    pub fall_margin: f32,
    /// Minimum hero movement between two landing puffs
    pub landing_puff_spacing: f32,

    // === Phase speeds (ms per unit) ===
    pub stretching_speed: f32,
    pub turning_speed: f32,
    pub walking_speed: f32,
    pub transitioning_speed: f32,
    pub falling_speed: f32,

    // === Generation ===
    pub first_platform: Span,
    pub initial_platforms: usize,
    pub initial_trees: usize,
    pub initial_birds: usize,
    pub initial_clouds: usize,
    pub platform: PlatformParams,
    pub tree: TreeParams,
    pub bird: BirdParams,
    pub cloud: CloudParams,
    /// Sunny, Rainy, Snowy, Cloudy, Foggy, Stormy
    pub weather_weights: [f32; 6],
    /// Weather particles added per tick at most
    pub weather_spawn_per_tick: usize,

    // === Background ===
    pub background_speed_multiplier: f32,
    pub mountains: [Ridge; 2],
    pub hills: [Ridge; 3],
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: 375.0,
            canvas_height: 375.0,
            platform_height: 100.0,
            hero_width: 17.0,
            hero_height: 30.0,
            hero_distance_from_edge: 10.0,
            padding_x: 100.0,
            perfect_area_size: 10.0,
            fall_margin: 100.0,
            landing_puff_spacing: 10.0,

            stretching_speed: 4.0,
            turning_speed: 4.0,
            walking_speed: 4.0,
            transitioning_speed: 2.0,
            falling_speed: 2.0,

            // x and width of the platform the hero starts on
            first_platform: Span::new(50.0, 50.0),
            initial_platforms: 4,
            initial_trees: 10,
            initial_birds: 8,
            initial_clouds: 7,
            platform: PlatformParams::default(),
            tree: TreeParams::default(),
            bird: BirdParams::default(),
            cloud: CloudParams::default(),
            weather_weights: [0.3, 0.2, 0.15, 0.2, 0.1, 0.05],
            weather_spawn_per_tick: 5,

            background_speed_multiplier: 0.2,
            mountains: [
                Ridge { base_height: 300.0, amplitude: 60.0, stretch: 0.3 },
                Ridge { base_height: 250.0, amplitude: 50.0, stretch: 0.4 },
            ],
            hills: [
                Ridge { base_height: 100.0, amplitude: 10.0, stretch: 1.0 },
                Ridge { base_height: 70.0, amplitude: 20.0, stretch: 0.5 },
                Ridge { base_height: 40.0, amplitude: 15.0, stretch: 0.8 },
            ],
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON tuning override
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Y of the platform top inside the canvas
    #[inline]
    pub fn platform_top(&self) -> f32 {
        self.canvas_height - self.platform_height
    }

    /// Fall offset at which a falling hero ends the round
    pub fn fall_limit(&self, viewport_height: f32) -> f32 {
        self.platform_height + self.fall_margin + (viewport_height - self.canvas_height) / 2.0
    }
}
