//! World state and core simulation types
//!
//! `World` is the single owned aggregate the tick mutates. The renderer only
//! ever sees `&World`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::event::{EventQueue, GameEvent};
use super::generate;
use super::random;
use super::timers::BendDecay;
use crate::consts::HERO_TRAIL_LENGTH;
use crate::tuning::Tuning;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Hero idle at the platform edge, waiting for a press
    Waiting,
    /// Press held, live stick growing
    Stretching,
    /// Stick rotating down toward the next platform
    Turning,
    /// Hero walking across the stick
    Walking,
    /// Camera scrolling to the landed platform
    Transitioning,
    /// Missed jump; terminal for the round
    Falling,
}

/// A platform the hero can stand on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub x: f32,
    pub w: f32,
    /// Golden platforms triple the score of a landing
    pub golden: bool,
}

impl Platform {
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn center(&self) -> f32 {
        self.x + self.w / 2.0
    }
}

/// A stick; only the last one in `World::sticks` is live
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stick {
    pub x: f32,
    pub length: f32,
    /// Degrees, 0 = upright, 90 = flat, 180 = hanging down
    pub rotation: f32,
    /// Impact wobble amplitude (pixels), decays to 0
    pub bend: f32,
    /// -1, 0 or 1
    pub bend_direction: f32,
}

impl Stick {
    pub fn new(x: f32) -> Self {
        Self {
            x,
            length: 0.0,
            rotation: 0.0,
            bend: 0.0,
            bend_direction: 0.0,
        }
    }

    /// X of the stick's far end once laid flat
    #[inline]
    pub fn tip(&self) -> f32 {
        self.x + self.length
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub x: f32,
    /// Index into the renderer's tree palette
    pub color: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    pub pos: Vec2,
    pub speed: f32,
    /// Wing deflection, bounces between `WING_MIN` and `WING_MAX`
    pub wing: f32,
    pub wing_direction: f32,
    pub size: f32,
    /// Bobbing phase in radians, wraps at 2π
    pub bob_phase: f32,
    pub bob_speed: f32,
    /// Index into the renderer's bird palette
    pub color: usize,
}

pub const WING_MIN: f32 = -5.0;
pub const WING_MAX: f32 = 15.0;

/// Number of tree colors the renderer provides
pub const TREE_PALETTE_SIZE: usize = 3;
/// Number of bird colors the renderer provides
pub const BIRD_PALETTE_SIZE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cloud {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Signed; negative clouds drift left
    pub speed: f32,
    pub opacity: f32,
}

/// What spawned a particle (drives its color)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Landing puff at walk start
    Dust,
    /// Normal hit burst
    Spark,
    /// Perfect hit burst
    Perfect,
    /// Golden hit burst
    Gold,
    /// White sparkle mixed into the golden burst
    Sparkle,
}

/// A burst particle in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0-1, decreases over time
    pub life: f32,
    pub size: f32,
    pub kind: ParticleKind,
}

/// Weather for one game, drawn at reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherType {
    Sunny,
    Rainy,
    Snowy,
    Cloudy,
    Foggy,
    Stormy,
}

impl WeatherType {
    /// Order matches `Tuning::weather_weights`
    pub const ALL: [WeatherType; 6] = [
        WeatherType::Sunny,
        WeatherType::Rainy,
        WeatherType::Snowy,
        WeatherType::Cloudy,
        WeatherType::Foggy,
        WeatherType::Stormy,
    ];

    /// Weather particle population cap
    pub fn max_particles(&self) -> usize {
        match self {
            WeatherType::Stormy => 200,
            WeatherType::Rainy => 150,
            WeatherType::Snowy => 100,
            WeatherType::Foggy => 50,
            WeatherType::Sunny | WeatherType::Cloudy => 0,
        }
    }
}

/// A screen-space weather particle (rain drop, snow flake, fog blob)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub opacity: f32,
    /// Degrees; only snow flakes spin
    pub rotation: f32,
    pub rotation_speed: f32,
}

/// Flash overlay flavour (renderer maps it to a color)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlashKind {
    Perfect,
    Golden,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Flash {
    pub active: bool,
    pub kind: FlashKind,
    pub opacity: f32,
    /// Milliseconds
    pub duration: f32,
    pub elapsed: f32,
}

impl Default for Flash {
    fn default() -> Self {
        Self {
            active: false,
            kind: FlashKind::Perfect,
            opacity: 0.0,
            duration: 0.0,
            elapsed: 0.0,
        }
    }
}

/// Fading hero position sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub life: f32,
}

/// Camera and overlay effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualEffects {
    /// Relaxes toward 1.0 every tick
    pub camera_zoom: f32,
    /// 0-1 shake intensity, decays toward 0
    pub camera_shake: f32,
    pub flash: Flash,
    /// Newest first, at most `HERO_TRAIL_LENGTH` samples
    pub hero_trail: Vec<TrailPoint>,
}

impl Default for VisualEffects {
    fn default() -> Self {
        Self {
            camera_zoom: 1.0,
            camera_shake: 0.0,
            flash: Flash::default(),
            hero_trail: Vec::with_capacity(HERO_TRAIL_LENGTH + 1),
        }
    }
}

/// Browser viewport size (the canvas fills the window)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Complete per-game world state
#[derive(Debug, Clone)]
pub struct World {
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// x = hero centre, y = fall offset below the platform top
    pub hero: Vec2,
    /// Horizontal camera travel
    pub scene_offset: f32,
    /// Left to right, append-only during play
    pub platforms: Vec<Platform>,
    pub sticks: Vec<Stick>,
    pub trees: Vec<Tree>,
    pub birds: Vec<Bird>,
    pub clouds: Vec<Cloud>,
    pub particles: Vec<Particle>,
    pub weather: WeatherType,
    pub weather_particles: Vec<WeatherParticle>,
    pub effects: VisualEffects,
    /// Hero x where the last landing puff was emitted
    pub last_landing_x: f32,
    /// Set once the fall completes; the phase machine is frozen afterwards
    pub game_over: bool,
    pub bend_timers: Vec<BendDecay>,
    pub events: EventQueue<GameEvent>,
}

impl World {
    /// Create a fully populated world
    pub fn new(tuning: Tuning, viewport: Viewport, seed: u64) -> Self {
        let mut world = Self {
            tuning,
            viewport,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Waiting,
            hero: Vec2::ZERO,
            scene_offset: 0.0,
            platforms: Vec::new(),
            sticks: Vec::new(),
            trees: Vec::new(),
            birds: Vec::new(),
            clouds: Vec::new(),
            particles: Vec::new(),
            weather: WeatherType::Sunny,
            weather_particles: Vec::new(),
            effects: VisualEffects::default(),
            last_landing_x: 0.0,
            game_over: false,
            bend_timers: Vec::new(),
            events: EventQueue::new(),
        };
        world.reset();
        world
    }

    /// Rebuild everything for a new game, keeping tuning, viewport and RNG
    pub fn reset(&mut self) {
        self.phase = GamePhase::Waiting;
        self.scene_offset = 0.0;
        self.platforms.clear();
        self.sticks.clear();
        self.trees.clear();
        self.birds.clear();
        self.clouds.clear();
        self.particles.clear();
        self.weather_particles.clear();
        self.effects = VisualEffects::default();
        self.last_landing_x = 0.0;
        self.game_over = false;
        self.bend_timers.clear();
        self.events.clear();
        self.weather = random::pick_weather(&mut self.rng, &self.tuning.weather_weights);

        let first = self.tuning.first_platform;
        self.platforms.push(Platform {
            x: first.min,
            w: first.max,
            golden: false,
        });
        for _ in 0..self.tuning.initial_platforms {
            generate::platform(self);
        }

        let start = self.platforms[0];
        self.sticks.push(Stick::new(start.right()));

        for _ in 0..self.tuning.initial_trees {
            generate::tree(self);
        }
        for _ in 0..self.tuning.initial_birds {
            generate::bird(self);
        }
        for _ in 0..self.tuning.initial_clouds {
            generate::cloud(self);
        }

        self.hero = Vec2::new(start.right() - self.tuning.hero_distance_from_edge, 0.0);

        log::info!(
            "World reset: weather {:?}, {} platforms",
            self.weather,
            self.platforms.len()
        );
    }

    /// The live stick (always present after reset)
    pub fn live_stick(&self) -> Option<&Stick> {
        self.sticks.last()
    }

    pub fn live_stick_mut(&mut self) -> Option<&mut Stick> {
        self.sticks.last_mut()
    }

    /// Move to a new phase, emitting the landing puff on the turn→walk edge
    pub fn set_phase(&mut self, phase: GamePhase) {
        log::debug!("Phase {:?} -> {:?}", self.phase, phase);
        if self.phase == GamePhase::Turning && phase == GamePhase::Walking {
            super::effects::landing_puff(self);
        }
        self.phase = phase;
    }
}
