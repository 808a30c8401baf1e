//! Burst particles and camera/overlay effects

use glam::Vec2;
use rand::Rng;

use super::random::between;
use super::state::{Flash, FlashKind, GamePhase, Particle, ParticleKind, TrailPoint, World};
use crate::consts::HERO_TRAIL_LENGTH;
use crate::frame_factor;
use crate::tuning::Span;

const PARTICLE_GRAVITY: f32 = 0.1;
const PARTICLE_DECAY: f32 = 0.02;
const FLASH_OPACITY: f32 = 0.8;
const ZOOM_RELAX: f32 = 0.1;
const SHAKE_DECAY: f32 = 0.9;
const TRAIL_DECAY: f32 = 0.15;

pub const PERFECT_ZOOM: f32 = 1.1;
pub const PERFECT_FLASH_MS: f32 = 300.0;
pub const GOLDEN_FLASH_MS: f32 = 400.0;
pub const GAME_OVER_FLASH_MS: f32 = 500.0;
pub const GOLDEN_SHAKE: f32 = 0.4;
pub const GAME_OVER_SHAKE: f32 = 1.0;

/// Landing burst flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Burst {
    /// 8 small blue sparks
    Normal,
    /// 15 green particles
    Perfect,
    /// 25 gold and white particles
    Golden,
    /// 10 dust particles when the hero sets off
    Dust,
}

impl Burst {
    pub fn count(&self) -> usize {
        match self {
            Burst::Normal => 8,
            Burst::Perfect => 15,
            Burst::Golden => 25,
            Burst::Dust => 10,
        }
    }

    /// Speed range and upward kick
    fn motion(&self) -> (Span, f32) {
        match self {
            Burst::Normal => (Span::new(1.0, 3.0), 1.5),
            Burst::Perfect => (Span::new(1.5, 4.0), 2.0),
            Burst::Golden => (Span::new(2.0, 6.0), 3.0),
            Burst::Dust => (Span::new(1.0, 3.0), 2.0),
        }
    }
}

/// Spawn a burst of particles at `origin`
pub fn spawn_burst(world: &mut World, origin: Vec2, burst: Burst) {
    let (speed_span, lift) = burst.motion();
    for _ in 0..burst.count() {
        let rng = &mut world.rng;
        let angle = between(rng, Span::new(0.0, std::f32::consts::TAU));
        let speed = between(rng, speed_span);
        let sparkle = burst == Burst::Golden && rng.random_bool(0.3);
        let (kind, size) = match burst {
            Burst::Golden if sparkle => (ParticleKind::Sparkle, between(rng, Span::new(5.0, 9.0))),
            Burst::Golden => (ParticleKind::Gold, between(rng, Span::new(3.0, 6.0))),
            Burst::Perfect => (ParticleKind::Perfect, between(rng, Span::new(2.0, 5.0))),
            Burst::Normal => (ParticleKind::Spark, between(rng, Span::new(1.5, 3.5))),
            Burst::Dust => (ParticleKind::Dust, between(rng, Span::new(2.0, 4.0))),
        };
        world.particles.push(Particle {
            pos: origin,
            vel: Vec2::new(angle.cos() * speed, angle.sin() * speed - lift),
            life: 1.0,
            size,
            kind,
        });
    }
}

/// Dust puff where the hero sets off, skipped if one was just emitted nearby
pub fn landing_puff(world: &mut World) {
    if (world.hero.x - world.last_landing_x).abs() <= world.tuning.landing_puff_spacing {
        return;
    }
    let origin = Vec2::new(world.hero.x, world.tuning.platform_top());
    spawn_burst(world, origin, Burst::Dust);
    world.last_landing_x = world.hero.x;
}

/// Advance and cull burst particles
pub fn update_particles(world: &mut World, elapsed_ms: f32) {
    let f = frame_factor(elapsed_ms);
    world.particles.retain_mut(|p| {
        p.pos += p.vel * f;
        p.vel.y += PARTICLE_GRAVITY * f;
        p.life -= PARTICLE_DECAY * f;
        p.life > 0.0
    });
}

/// Start (or restart) the flash overlay
pub fn trigger_flash(world: &mut World, kind: FlashKind, duration_ms: f32) {
    world.effects.flash = Flash {
        active: true,
        kind,
        opacity: FLASH_OPACITY,
        duration: duration_ms,
        elapsed: 0.0,
    };
}

pub fn add_shake(world: &mut World, amount: f32) {
    world.effects.camera_shake = (world.effects.camera_shake + amount).min(1.0);
}

/// Fade the flash, relax zoom and shake, and record the hero trail
pub fn update_visual_effects(world: &mut World, elapsed_ms: f32) {
    let f = frame_factor(elapsed_ms);
    let effects = &mut world.effects;

    let flash = &mut effects.flash;
    if flash.active {
        flash.elapsed += elapsed_ms;
        let progress = if flash.duration > 0.0 { flash.elapsed / flash.duration } else { 1.0 };
        if progress >= 1.0 {
            flash.active = false;
            flash.opacity = 0.0;
        } else {
            flash.opacity = FLASH_OPACITY * (1.0 - progress);
        }
    }

    if effects.camera_zoom != 1.0 {
        let relax = (ZOOM_RELAX * f).min(1.0);
        effects.camera_zoom += (1.0 - effects.camera_zoom) * relax;
        if (effects.camera_zoom - 1.0).abs() < 0.01 {
            effects.camera_zoom = 1.0;
        }
    }

    if effects.camera_shake > 0.0 {
        effects.camera_shake *= SHAKE_DECAY.powf(f);
        if effects.camera_shake < 0.01 {
            effects.camera_shake = 0.0;
        }
    }

    if world.phase == GamePhase::Walking {
        record_trail(world, f);
    }
}

fn record_trail(world: &mut World, f: f32) {
    let tuning = &world.tuning;
    let centre = Vec2::new(
        world.hero.x,
        world.hero.y + tuning.platform_top() - tuning.hero_height / 2.0,
    );
    let trail = &mut world.effects.hero_trail;
    trail.insert(0, TrailPoint { pos: centre, life: 1.0 });
    trail.truncate(HERO_TRAIL_LENGTH);
    for point in trail.iter_mut() {
        point.life -= TRAIL_DECAY * f;
    }
    trail.retain(|p| p.life > 0.0);
}
