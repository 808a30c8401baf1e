//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Elapsed time comes in as an argument, never from a clock
//! - Seeded RNG only
//! - No rendering, storage or platform dependencies

pub mod ambient;
pub mod collision;
pub mod effects;
pub mod event;
pub mod generate;
pub mod random;
pub mod state;
pub mod tick;
pub mod timers;

pub use collision::{StickHit, resolve, score_increment};
pub use effects::Burst;
pub use event::{EventQueue, GameEvent};
pub use state::{
    BIRD_PALETTE_SIZE, Bird, Cloud, Flash, FlashKind, GamePhase, Particle, ParticleKind, Platform,
    Stick, TREE_PALETTE_SIZE, TrailPoint, Tree, Viewport, VisualEffects, WeatherParticle,
    WeatherType, World,
};
pub use tick::{TickInput, tick};
pub use timers::BendDecay;
