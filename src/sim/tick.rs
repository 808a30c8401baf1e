//! Variable timestep simulation tick
//!
//! Advances decorative motion every frame, then runs the phase state machine.
//! Every rate is expressed as "ms per unit", so a quantity advances by
//! `elapsed_ms / speed` regardless of frame rate.

use glam::Vec2;

use super::ambient::{update_birds, update_clouds, update_weather};
use super::collision::{self, StickHit};
use super::effects::{
    self, Burst, GAME_OVER_FLASH_MS, GAME_OVER_SHAKE, GOLDEN_FLASH_MS, GOLDEN_SHAKE,
    PERFECT_FLASH_MS, PERFECT_ZOOM,
};
use super::event::GameEvent;
use super::generate;
use super::random;
use super::state::{FlashKind, GamePhase, Stick, World};
use super::timers::{BendDecay, NORMAL_BEND, PERFECT_BEND, advance_bend_timers};
use crate::consts::{MAX_FRAME_MS, STICK_DOWN_DEGREES, STICK_FLAT_DEGREES};

/// Input state for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Pointer (mouse, touch or key) currently held down
    pub pressed: bool,
}

/// Advance the world by `elapsed_ms`
pub fn tick(world: &mut World, input: &TickInput, elapsed_ms: f32) {
    let dt = elapsed_ms.clamp(0.0, MAX_FRAME_MS);

    update_birds(world, dt);
    update_clouds(world, dt);
    effects::update_particles(world, dt);
    update_weather(world, dt);
    effects::update_visual_effects(world, dt);
    advance_bend_timers(&mut world.bend_timers, &mut world.sticks, dt);

    // Frozen until an explicit reset
    if world.game_over {
        return;
    }

    match world.phase {
        GamePhase::Waiting => {
            if input.pressed {
                world.set_phase(GamePhase::Stretching);
            }
        }

        GamePhase::Stretching => {
            if !input.pressed {
                world.set_phase(GamePhase::Turning);
                return;
            }
            let rate = world.tuning.stretching_speed;
            if let Some(stick) = world.live_stick_mut() {
                stick.length += dt / rate;
                let length = stick.length;
                world.events.send(GameEvent::StickStretched { length });
            }
        }

        GamePhase::Turning => {
            let rate = world.tuning.turning_speed;
            let Some(stick) = world.live_stick_mut() else {
                log::error!("Turning without a live stick");
                return;
            };
            stick.rotation += dt / rate;
            if stick.rotation >= STICK_FLAT_DEGREES {
                stick.rotation = STICK_FLAT_DEGREES;
                land_stick(world);
            }
        }

        GamePhase::Walking => {
            world.hero.x += dt / world.tuning.walking_speed;

            let (limit, next) = match target(world) {
                StickHit::Matched { platform, .. } => (
                    platform.right() - world.tuning.hero_distance_from_edge,
                    GamePhase::Transitioning,
                ),
                StickHit::NoMatch => {
                    let tip = world.live_stick().map_or(world.hero.x, Stick::tip);
                    (tip + world.tuning.hero_width, GamePhase::Falling)
                }
            };
            if world.hero.x > limit {
                world.hero.x = limit;
                world.set_phase(next);
            }
        }

        GamePhase::Transitioning => {
            world.scene_offset += dt / world.tuning.transitioning_speed;

            let Some(platform) = target(world).platform() else {
                log::error!("Transitioning without a landed platform");
                world.set_phase(GamePhase::Falling);
                return;
            };
            if world.scene_offset > platform.right() - world.tuning.padding_x {
                world.sticks.push(Stick::new(platform.right()));
                world.set_phase(GamePhase::Waiting);
            }
        }

        GamePhase::Falling => {
            let turn_rate = world.tuning.turning_speed;
            if let Some(stick) = world.live_stick_mut()
                && stick.rotation < STICK_DOWN_DEGREES
            {
                stick.rotation = (stick.rotation + dt / turn_rate).min(STICK_DOWN_DEGREES);
            }

            world.hero.y += dt / world.tuning.falling_speed;
            if world.hero.y > world.tuning.fall_limit(world.viewport.height) {
                effects::trigger_flash(world, FlashKind::GameOver, GAME_OVER_FLASH_MS);
                effects::add_shake(world, GAME_OVER_SHAKE);
                world.events.send(GameEvent::GameOver);
                world.game_over = true;
                log::info!("Game over at scene offset {:.0}", world.scene_offset);
            }
        }
    }
}

/// Where the live stick rests, if anywhere
fn target(world: &World) -> StickHit {
    world.live_stick().map_or(StickHit::NoMatch, |stick| {
        collision::resolve(stick, &world.platforms, world.tuning.perfect_area_size)
    })
}

/// The stick just went flat: score, effects and world growth, then walk
fn land_stick(world: &mut World) {
    let hit = target(world);

    if let StickHit::Matched { platform, perfect } = hit {
        let direction = random::sign(&mut world.rng);
        let live = world.sticks.len() - 1;
        if let Some(stick) = world.live_stick_mut() {
            stick.bend = if perfect { PERFECT_BEND } else { NORMAL_BEND };
            stick.bend_direction = direction;
        }
        world.bend_timers.push(BendDecay::new(live));

        world.events.send(GameEvent::Scored {
            increment: collision::score_increment(perfect, platform.golden),
        });

        if perfect {
            world.events.send(GameEvent::PerfectHit);
            effects::trigger_flash(world, FlashKind::Perfect, PERFECT_FLASH_MS);
            world.effects.camera_zoom = PERFECT_ZOOM;
        }

        let origin = Vec2::new(platform.center(), world.tuning.platform_top());
        if platform.golden {
            world.events.send(GameEvent::GoldenHit);
            effects::trigger_flash(world, FlashKind::Golden, GOLDEN_FLASH_MS);
            effects::add_shake(world, GOLDEN_SHAKE);
            effects::spawn_burst(world, origin, Burst::Golden);
        } else if perfect {
            effects::spawn_burst(world, origin, Burst::Perfect);
        } else {
            effects::spawn_burst(world, origin, Burst::Normal);
        }

        generate::platform(world);
        generate::tree(world);
        generate::tree(world);
    }

    world.events.send(GameEvent::StickDropped {
        hit: hit.platform().is_some(),
        perfect: hit.is_perfect(),
    });
    world.set_phase(GamePhase::Walking);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Platform, Viewport};
    use crate::tuning::Tuning;

    const HELD: TickInput = TickInput { pressed: true };
    const RELEASED: TickInput = TickInput { pressed: false };

    fn world() -> World {
        let mut world = World::new(Tuning::default(), Viewport::default(), 4242);
        // Start platform plus one target whose midpoint is 220
        world.platforms.truncate(1);
        world.platforms.push(Platform { x: 200.0, w: 40.0, golden: false });
        world.events.clear();
        world
    }

    /// Tick in `step` ms increments until `total` ms have elapsed
    fn run(world: &mut World, input: TickInput, total: f32, step: f32) {
        let mut elapsed = 0.0;
        while elapsed + step <= total + 1e-3 {
            tick(world, &input, step);
            elapsed += step;
        }
    }

    fn drain(world: &mut World) -> Vec<GameEvent> {
        world.events.drain().collect()
    }

    /// Grow the live stick to `length`, then release
    fn drop_stick(world: &mut World, length: f32) {
        tick(world, &HELD, 16.0);
        assert_eq!(world.phase, GamePhase::Stretching);
        run(world, HELD, length * world.tuning.stretching_speed, 20.0);
        tick(world, &RELEASED, 16.0);
        assert_eq!(world.phase, GamePhase::Turning);
    }

    #[test]
    fn test_waiting_needs_a_press() {
        let mut world = world();
        tick(&mut world, &RELEASED, 16.0);
        assert_eq!(world.phase, GamePhase::Waiting);
        tick(&mut world, &HELD, 16.0);
        assert_eq!(world.phase, GamePhase::Stretching);
        assert_eq!(world.sticks[0].length, 0.0);
    }

    #[test]
    fn test_stretch_length_tracks_hold_time() {
        let mut world = world();
        tick(&mut world, &HELD, 16.0);
        run(&mut world, HELD, 500.0, 20.0);
        let length = world.sticks[0].length;
        assert!((length - 500.0 / world.tuning.stretching_speed).abs() < 1e-3);

        let reported: Vec<_> = drain(&mut world)
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::StickStretched { length } => Some(length),
                _ => None,
            })
            .collect();
        assert_eq!(reported.len(), 25);
        assert_eq!(reported.last().copied(), Some(length));
    }

    #[test]
    fn test_resolver_fires_once_at_clamp_instant() {
        let mut world = world();
        drop_stick(&mut world, 120.0);
        drain(&mut world);

        // 90 degrees at 4 ms per degree takes 360 ms
        run(&mut world, RELEASED, 340.0, 20.0);
        assert_eq!(world.phase, GamePhase::Turning);
        assert!(drain(&mut world).is_empty());

        tick(&mut world, &RELEASED, 20.0);
        assert_eq!(world.phase, GamePhase::Walking);
        assert_eq!(world.sticks[0].rotation, STICK_FLAT_DEGREES);
        let drops = drain(&mut world)
            .iter()
            .filter(|e| matches!(e, GameEvent::StickDropped { .. }))
            .count();
        assert_eq!(drops, 1);

        run(&mut world, RELEASED, 100.0, 20.0);
        assert!(
            !drain(&mut world)
                .iter()
                .any(|e| matches!(e, GameEvent::StickDropped { .. }))
        );
    }

    #[test]
    fn test_perfect_landing_effects() {
        let mut world = world();
        let platforms = world.platforms.len();
        let trees = world.trees.len();
        drop_stick(&mut world, 120.0);
        run(&mut world, RELEASED, 360.0, 20.0);
        assert_eq!(world.phase, GamePhase::Walking);

        let events = drain(&mut world);
        assert!(events.contains(&GameEvent::Scored { increment: 2 }));
        assert!(events.contains(&GameEvent::PerfectHit));
        assert!(events.contains(&GameEvent::StickDropped { hit: true, perfect: true }));
        assert!(!events.contains(&GameEvent::GoldenHit));

        assert_eq!(world.effects.flash.kind, FlashKind::Perfect);
        assert!(world.effects.flash.active);
        assert!(world.effects.camera_zoom > 1.0);
        assert_eq!(world.sticks[0].bend, PERFECT_BEND);
        assert_eq!(world.sticks[0].bend_direction.abs(), 1.0);
        assert_eq!(world.bend_timers.len(), 1);
        assert_eq!(world.platforms.len(), platforms + 1);
        assert_eq!(world.trees.len(), trees + 2);
    }

    #[test]
    fn test_golden_landing_triples_score() {
        let mut world = world();
        world.platforms[1].golden = true;
        drop_stick(&mut world, 105.0);
        run(&mut world, RELEASED, 360.0, 20.0);

        let events = drain(&mut world);
        assert!(events.contains(&GameEvent::Scored { increment: 3 }));
        assert!(events.contains(&GameEvent::GoldenHit));
        assert!(!events.contains(&GameEvent::PerfectHit));
        assert_eq!(world.effects.flash.kind, FlashKind::Golden);
        assert!(world.effects.camera_shake > 0.0);
        assert_eq!(world.sticks[0].bend, NORMAL_BEND);
    }

    #[test]
    fn test_walk_and_scroll_back_to_waiting() {
        let mut world = world();
        drop_stick(&mut world, 105.0);
        run(&mut world, RELEASED, 360.0, 20.0);
        assert_eq!(world.phase, GamePhase::Walking);

        // Hero walks 90 -> 230 at 4 ms per px
        run(&mut world, RELEASED, 600.0, 20.0);
        assert_eq!(world.phase, GamePhase::Transitioning);
        assert_eq!(world.hero.x, 230.0);

        // Camera scrolls past 240 - 100 at 2 ms per px
        run(&mut world, RELEASED, 300.0, 20.0);
        assert_eq!(world.phase, GamePhase::Waiting);
        assert!(world.scene_offset > 140.0);
        assert_eq!(world.sticks.len(), 2);
        assert_eq!(world.sticks[1], Stick::new(240.0));
        assert!(world.bend_timers.is_empty());
    }

    #[test]
    fn test_miss_falls_then_game_over_once() {
        let mut world = world();
        drop_stick(&mut world, 40.0);
        run(&mut world, RELEASED, 360.0, 20.0);
        let events = drain(&mut world);
        assert!(events.contains(&GameEvent::StickDropped { hit: false, perfect: false }));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Scored { .. })));
        assert_eq!(world.platforms.len(), 2);

        // Tip (140) plus one hero width
        run(&mut world, RELEASED, 400.0, 20.0);
        assert_eq!(world.phase, GamePhase::Falling);
        assert_eq!(world.hero.x, 157.0);

        // fall_limit(720) = 100 + 100 + 172.5, at 2 ms per px
        run(&mut world, RELEASED, 1000.0, 20.0);
        assert!(world.game_over);
        assert_eq!(world.sticks[0].rotation, STICK_DOWN_DEGREES);
        assert_eq!(world.effects.flash.kind, FlashKind::GameOver);
        let game_overs = drain(&mut world)
            .iter()
            .filter(|e| **e == GameEvent::GameOver)
            .count();
        assert_eq!(game_overs, 1);

        // Frozen even with input
        let hero = world.hero;
        run(&mut world, HELD, 500.0, 20.0);
        assert_eq!(world.phase, GamePhase::Falling);
        assert_eq!(world.hero, hero);
        assert!(drain(&mut world).is_empty());

        world.reset();
        assert_eq!(world.phase, GamePhase::Waiting);
        assert!(!world.game_over);
    }

    #[test]
    fn test_frame_rate_independence() {
        let mut slow = world();
        let mut fast = world();
        tick(&mut slow, &HELD, 16.0);
        tick(&mut fast, &HELD, 16.0);

        run(&mut slow, HELD, 600.0, 50.0);
        run(&mut fast, HELD, 600.0, 10.0);
        assert!((slow.sticks[0].length - fast.sticks[0].length).abs() < 1e-3);
    }

    #[test]
    fn test_huge_frame_is_clamped() {
        let mut world = world();
        tick(&mut world, &HELD, 16.0);
        tick(&mut world, &HELD, 5_000.0);
        assert_eq!(world.sticks[0].length, MAX_FRAME_MS / world.tuning.stretching_speed);
    }

    #[test]
    fn test_determinism() {
        let mut a = World::new(Tuning::default(), Viewport::default(), 99999);
        let mut b = World::new(Tuning::default(), Viewport::default(), 99999);
        let script = [(HELD, 300.0), (RELEASED, 400.0), (RELEASED, 2000.0)];
        for (input, ms) in script {
            run(&mut a, input, ms, 16.0);
            run(&mut b, input, ms, 16.0);
        }
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.hero, b.hero);
        assert_eq!(a.platforms, b.platforms);
        assert_eq!(a.particles.len(), b.particles.len());
    }
}
