//! Decorative background motion: birds, clouds and weather
//!
//! None of this affects gameplay. Birds and clouds never die; they wrap
//! around the viewport with fresh random parameters.

use super::generate;
use super::random::between;
use super::state::{WING_MAX, WING_MIN, WeatherType, World};
use crate::frame_factor;
use crate::tuning::Span;

/// Wing travel per millisecond
const WING_RATE: f32 = 1.0 / 60.0;
/// Fog blobs fade this much per reference frame so the layer keeps churning
const FOG_FADE: f32 = 0.001;
/// Fog blobs below this opacity are recycled
const FOG_MIN_OPACITY: f32 = 0.05;
/// Off-screen slack before a weather particle is culled
const WEATHER_MARGIN: f32 = 100.0;

pub fn update_birds(world: &mut World, elapsed_ms: f32) {
    let f = frame_factor(elapsed_ms);
    let width = world.viewport.width;
    let params = &world.tuning.bird;
    let rng = &mut world.rng;

    for bird in &mut world.birds {
        bird.pos.x += bird.speed * f;

        bird.wing += bird.wing_direction * elapsed_ms * WING_RATE;
        if bird.wing > WING_MAX {
            bird.wing = WING_MAX;
            bird.wing_direction = -1.0;
        } else if bird.wing < WING_MIN {
            bird.wing = WING_MIN;
            bird.wing_direction = 1.0;
        }

        bird.bob_phase = (bird.bob_phase + bird.bob_speed * f).rem_euclid(std::f32::consts::TAU);

        if bird.pos.x > width + params.wrap_margin {
            bird.pos.x = -params.wrap_margin;
            bird.pos.y = between(rng, params.y);
            bird.speed = between(rng, params.speed);
        }
    }
}

pub fn update_clouds(world: &mut World, elapsed_ms: f32) {
    let f = frame_factor(elapsed_ms);
    let width = world.viewport.width;
    let params = &world.tuning.cloud;
    let rng = &mut world.rng;

    for cloud in &mut world.clouds {
        cloud.pos.x += cloud.speed * f;

        let wrapped = if cloud.speed > 0.0 && cloud.pos.x > width + cloud.width {
            cloud.pos.x = -cloud.width;
            true
        } else if cloud.speed < 0.0 && cloud.pos.x < -cloud.width {
            cloud.pos.x = width + cloud.width;
            true
        } else {
            false
        };

        if wrapped {
            cloud.pos.y = between(rng, params.y);
            cloud.opacity = between(rng, params.opacity);
        }
    }
}

/// Move, cull and replenish weather particles
pub fn update_weather(world: &mut World, elapsed_ms: f32) {
    let f = frame_factor(elapsed_ms);
    let (width, height) = (world.viewport.width, world.viewport.height);
    let foggy = world.weather == WeatherType::Foggy;
    let rng = &mut world.rng;

    world.weather_particles.retain_mut(|p| {
        p.pos += p.vel * f;
        p.rotation += p.rotation_speed * f;

        if foggy {
            let jitter = Span::new(-0.1, 0.1);
            p.vel.x = (p.vel.x + between(rng, jitter)).clamp(-1.0, 1.0);
            p.vel.y = (p.vel.y + between(rng, jitter)).clamp(-1.0, 1.0);
            p.opacity -= FOG_FADE * f;
            return p.opacity > FOG_MIN_OPACITY;
        }

        p.pos.y < height + WEATHER_MARGIN
            && p.pos.x > -WEATHER_MARGIN
            && p.pos.x < width + WEATHER_MARGIN
    });

    generate::top_up_weather(world);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Bird, Cloud, Viewport, WeatherParticle};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn world() -> World {
        let mut world = World::new(Tuning::default(), Viewport { width: 800.0, height: 600.0 }, 17);
        world.birds.clear();
        world.clouds.clear();
        world.weather_particles.clear();
        world
    }

    fn bird(x: f32) -> Bird {
        Bird {
            pos: Vec2::new(x, 80.0),
            speed: 1.0,
            wing: 0.0,
            wing_direction: 1.0,
            size: 5.0,
            bob_phase: 0.0,
            bob_speed: 0.05,
            color: 0,
        }
    }

    #[test]
    fn test_bird_flies_and_wraps() {
        let mut world = world();
        world.birds.push(bird(100.0));
        update_birds(&mut world, 32.0);
        assert_eq!(world.birds[0].pos.x, 102.0);

        world.birds[0].pos.x = 900.5;
        update_birds(&mut world, 16.0);
        let b = world.birds[0];
        assert_eq!(b.pos.x, -100.0);
        assert!((50.0..150.0).contains(&b.pos.y));
        assert!((0.5..2.0).contains(&b.speed));
    }

    #[test]
    fn test_wing_bounces_between_bounds() {
        let mut world = world();
        world.birds.push(bird(0.0));
        let mut flips = 0;
        let mut last_dir = 1.0;
        for _ in 0..400 {
            update_birds(&mut world, 16.0);
            let b = world.birds[0];
            assert!((WING_MIN..=WING_MAX).contains(&b.wing));
            if b.wing_direction != last_dir {
                flips += 1;
                last_dir = b.wing_direction;
            }
        }
        assert!(flips >= 2);
    }

    #[test]
    fn test_bob_phase_wraps() {
        let mut world = world();
        let mut b = bird(0.0);
        b.bob_phase = 6.25;
        b.bob_speed = 0.1;
        world.birds.push(b);
        update_birds(&mut world, 16.0);
        let phase = world.birds[0].bob_phase;
        assert!(phase >= 0.0 && phase < std::f32::consts::TAU);
        assert!(phase < 0.1);
    }

    #[test]
    fn test_clouds_wrap_on_exit_side() {
        let mut world = world();
        world.clouds.push(Cloud {
            pos: Vec2::new(899.0, 20.0),
            width: 100.0,
            height: 30.0,
            speed: 2.0,
            opacity: 0.6,
        });
        world.clouds.push(Cloud {
            pos: Vec2::new(-99.0, 20.0),
            width: 100.0,
            height: 30.0,
            speed: -2.0,
            opacity: 0.6,
        });
        update_clouds(&mut world, 16.0);
        assert_eq!(world.clouds[0].pos.x, -100.0);
        assert_eq!(world.clouds[1].pos.x, 900.0);
        for cloud in &world.clouds {
            assert!((5.0..200.0).contains(&cloud.pos.y));
            assert!((0.5..0.9).contains(&cloud.opacity));
        }
    }

    #[test]
    fn test_offscreen_rain_is_culled_and_replenished() {
        let mut world = world();
        world.weather = WeatherType::Rainy;
        world.weather_particles.push(WeatherParticle {
            pos: Vec2::new(100.0, 699.0),
            vel: Vec2::new(0.0, 10.0),
            size: 2.0,
            opacity: 0.5,
            rotation: 0.0,
            rotation_speed: 0.0,
        });
        update_weather(&mut world, 16.0);
        // The old drop left the screen; five fresh drops spawned at the top
        assert_eq!(world.weather_particles.len(), 5);
        assert!(world.weather_particles.iter().all(|p| p.pos.y == -10.0));
    }

    #[test]
    fn test_stormy_population_stabilises_at_cap() {
        let mut world = world();
        world.weather = WeatherType::Stormy;
        for _ in 0..600 {
            update_weather(&mut world, 16.0);
            assert!(world.weather_particles.len() <= 200);
        }
        assert!(world.weather_particles.len() > 150);
    }

    #[test]
    fn test_fog_drifts_slowly_and_fades() {
        let mut world = world();
        world.weather = WeatherType::Foggy;
        world.weather_particles.push(WeatherParticle {
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::new(0.9, -0.9),
            size: 40.0,
            opacity: 0.0505,
            rotation: 0.0,
            rotation_speed: 0.0,
        });
        update_weather(&mut world, 16.0);
        assert!(world.weather_particles.iter().all(|p| p.vel.x.abs() <= 1.0 && p.vel.y.abs() <= 1.0));
        // Faded blob recycled, replaced by the top-up batch
        assert_eq!(world.weather_particles.len(), 5);
    }
}
