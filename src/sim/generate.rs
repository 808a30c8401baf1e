//! Entity generators
//!
//! Each generator appends one entity to the world using the world's RNG and
//! the distribution parameters in `Tuning`.

use glam::Vec2;
use rand::Rng;

use super::random::{between, int_between, sign};
use super::state::{
    BIRD_PALETTE_SIZE, Bird, Cloud, Platform, TREE_PALETTE_SIZE, Tree, WeatherParticle,
    WeatherType, World,
};
use crate::tuning::Span;

/// Append a platform after the current last one
pub fn platform(world: &mut World) {
    let params = &world.tuning.platform;
    let furthest = world.platforms.last().map(Platform::right).unwrap_or(0.0);

    let x = furthest + int_between(&mut world.rng, params.gap);
    let w = int_between(&mut world.rng, params.width);
    // Early platforms are never golden
    let golden =
        world.platforms.len() >= params.golden_after && world.rng.random_bool(params.golden_chance);

    world.platforms.push(Platform { x, w, golden });
}

/// Append a background tree after the current last one
pub fn tree(world: &mut World) {
    let furthest = world.trees.last().map(|t| t.x).unwrap_or(0.0);
    let x = furthest + int_between(&mut world.rng, world.tuning.tree.gap);
    let color = world.rng.random_range(0..TREE_PALETTE_SIZE);
    world.trees.push(Tree { x, color });
}

pub fn bird(world: &mut World) {
    let params = &world.tuning.bird;
    let x = between(&mut world.rng, Span::new(0.0, world.viewport.width));
    let y = between(&mut world.rng, params.y);
    let bird = Bird {
        pos: Vec2::new(x, y),
        speed: between(&mut world.rng, params.speed),
        wing: between(&mut world.rng, Span::new(0.0, 20.0)),
        wing_direction: 1.0,
        size: between(&mut world.rng, params.size),
        bob_phase: 0.0,
        bob_speed: between(&mut world.rng, Span::new(0.02, 0.05)),
        color: world.rng.random_range(0..BIRD_PALETTE_SIZE),
    };
    world.birds.push(bird);
}

pub fn cloud(world: &mut World) {
    let params = &world.tuning.cloud;
    let x = between(&mut world.rng, Span::new(0.0, world.viewport.width));
    let y = between(&mut world.rng, params.y);
    let width = between(&mut world.rng, params.width);
    let height = between(&mut world.rng, params.height);
    let speed = between(&mut world.rng, params.speed) * sign(&mut world.rng);
    let opacity = between(&mut world.rng, params.opacity);
    world.clouds.push(Cloud {
        pos: Vec2::new(x, y),
        width,
        height,
        speed,
        opacity,
    });
}

/// Grow the weather population toward its cap, a few particles per call
///
/// Returns how many particles were added.
pub fn top_up_weather(world: &mut World) -> usize {
    let cap = world.weather.max_particles();
    let current = world.weather_particles.len();
    if current >= cap {
        return 0;
    }

    let to_add = world.tuning.weather_spawn_per_tick.min(cap - current);
    for _ in 0..to_add {
        if let Some(particle) = weather_particle(world) {
            world.weather_particles.push(particle);
        }
    }
    to_add
}

/// Spawn one particle for the current weather (None for clear skies)
fn weather_particle(world: &mut World) -> Option<WeatherParticle> {
    let (width, height) = (world.viewport.width, world.viewport.height);
    let rng = &mut world.rng;
    let x = between(rng, Span::new(-100.0, width + 100.0));

    let particle = match world.weather {
        WeatherType::Rainy => WeatherParticle {
            pos: Vec2::new(x, -10.0),
            vel: Vec2::new(between(rng, Span::new(-1.0, 1.0)), between(rng, Span::new(8.0, 15.0))),
            size: between(rng, Span::new(1.0, 3.0)),
            opacity: between(rng, Span::new(0.3, 0.8)),
            rotation: 0.0,
            rotation_speed: 0.0,
        },
        WeatherType::Snowy => WeatherParticle {
            pos: Vec2::new(x, -10.0),
            vel: Vec2::new(between(rng, Span::new(-2.0, 2.0)), between(rng, Span::new(1.0, 4.0))),
            size: between(rng, Span::new(2.0, 6.0)),
            opacity: between(rng, Span::new(0.4, 0.9)),
            rotation: between(rng, Span::new(0.0, 360.0)),
            rotation_speed: between(rng, Span::new(-2.0, 2.0)),
        },
        WeatherType::Stormy => WeatherParticle {
            pos: Vec2::new(x, -10.0),
            vel: Vec2::new(between(rng, Span::new(-3.0, 3.0)), between(rng, Span::new(12.0, 20.0))),
            size: between(rng, Span::new(1.0, 4.0)),
            opacity: between(rng, Span::new(0.2, 0.7)),
            rotation: 0.0,
            rotation_speed: 0.0,
        },
        WeatherType::Foggy => WeatherParticle {
            pos: Vec2::new(x, between(rng, Span::new(0.0, height))),
            vel: Vec2::new(between(rng, Span::new(-0.5, 0.5)), between(rng, Span::new(-0.5, 0.5))),
            size: between(rng, Span::new(20.0, 80.0)),
            opacity: between(rng, Span::new(0.1, 0.3)),
            rotation: 0.0,
            rotation_speed: 0.0,
        },
        WeatherType::Sunny | WeatherType::Cloudy => return None,
    };
    Some(particle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Viewport;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn world_with_weather(weather: WeatherType) -> World {
        let mut world = World::new(Tuning::default(), Viewport::default(), 5);
        world.weather = weather;
        world.weather_particles.clear();
        world
    }

    proptest! {
        #[test]
        fn prop_platform_gaps_within_bounds(seed in any::<u64>(), count in 1usize..60) {
            let mut world = World::new(Tuning::default(), Viewport::default(), seed);
            for _ in 0..count {
                platform(&mut world);
            }
            let params = world.tuning.platform.clone();
            for pair in world.platforms.windows(2) {
                let gap = pair[1].x - pair[0].right();
                prop_assert!(gap >= params.gap.min && gap <= params.gap.max, "gap {}", gap);
                prop_assert!(pair[1].x > pair[0].right());
                prop_assert!(pair[1].w >= params.width.min && pair[1].w <= params.width.max);
            }
        }

        #[test]
        fn prop_first_platforms_never_golden(seed in any::<u64>()) {
            let mut tuning = Tuning::default();
            tuning.platform.golden_chance = 1.0;
            let world = World::new(tuning, Viewport::default(), seed);
            // Index 0..4 are created while fewer than 4 platforms exist
            for platform in &world.platforms[..4] {
                prop_assert!(!platform.golden);
            }
            prop_assert!(world.platforms[4].golden);
        }
    }

    #[test]
    fn test_trees_advance_left_to_right() {
        let mut world = world_with_weather(WeatherType::Sunny);
        world.trees.clear();
        for _ in 0..20 {
            tree(&mut world);
        }
        assert!(world.trees[0].x >= 30.0 && world.trees[0].x <= 150.0);
        for pair in world.trees.windows(2) {
            let gap = pair[1].x - pair[0].x;
            assert!((30.0..=150.0).contains(&gap));
        }
        assert!(world.trees.iter().all(|t| t.color < TREE_PALETTE_SIZE));
    }

    #[test]
    fn test_clouds_drift_both_ways() {
        let mut world = world_with_weather(WeatherType::Cloudy);
        world.clouds.clear();
        for _ in 0..64 {
            cloud(&mut world);
        }
        assert!(world.clouds.iter().any(|c| c.speed > 0.0));
        assert!(world.clouds.iter().any(|c| c.speed < 0.0));
        assert!(world.clouds.iter().all(|c| (0.1..0.5).contains(&c.speed.abs())));
    }

    #[test]
    fn test_sunny_weather_stays_empty() {
        let mut world = world_with_weather(WeatherType::Sunny);
        for _ in 0..100 {
            assert_eq!(top_up_weather(&mut world), 0);
        }
        assert!(world.weather_particles.is_empty());
    }

    #[test]
    fn test_stormy_weather_caps_at_200() {
        let mut world = world_with_weather(WeatherType::Stormy);
        assert_eq!(top_up_weather(&mut world), 5);
        assert_eq!(world.weather_particles.len(), 5);
        for _ in 0..100 {
            top_up_weather(&mut world);
            assert!(world.weather_particles.len() <= 200);
        }
        assert_eq!(world.weather_particles.len(), 200);
    }

    #[test]
    fn test_top_up_never_overshoots_cap() {
        let mut world = world_with_weather(WeatherType::Foggy);
        world.tuning.weather_spawn_per_tick = 7;
        for _ in 0..8 {
            top_up_weather(&mut world);
        }
        assert_eq!(world.weather_particles.len(), 50);
    }

    #[test]
    fn test_snow_spins_rain_does_not() {
        let mut world = world_with_weather(WeatherType::Rainy);
        top_up_weather(&mut world);
        assert!(world.weather_particles.iter().all(|p| p.rotation_speed == 0.0 && p.vel.y >= 8.0));

        let mut world = world_with_weather(WeatherType::Snowy);
        top_up_weather(&mut world);
        assert!(world.weather_particles.iter().all(|p| p.vel.y < 4.0));
        assert!(world.weather_particles.iter().any(|p| p.rotation_speed != 0.0));
    }
}
