//! Frame composition
//!
//! Layers, back to front:
//! 1. Sky, sun, clouds, mountains, hills, trees and birds (parallax, zoomed)
//! 2. Hero trail, platforms, hero, sticks and burst particles (scrolled by the
//!    scene offset, zoomed and shaken)
//! 3. Weather particles, weather tint and lightning (screen space)
//! 4. Flash overlay

use glam::Vec2;

use super::draw::{DrawCmd, DrawList, Paint};
use super::palette::{self, with_alpha};
use super::shapes;
use crate::settings::Settings;
use crate::sim::{WeatherType, World};

pub const SUN_RADIUS: f32 = 40.0;
/// Sun centre as a fraction of the viewport
const SUN_ANCHOR: Vec2 = Vec2::new(0.85, 0.2);
/// Extra parallax factors on top of the background multiplier
const CLOUD_PARALLAX: f32 = 0.2;
const BIRD_PARALLAX: f32 = 0.6;
const BIRD_BOB: f32 = 3.0;
/// Pixels of jitter at full shake
const SHAKE_PX: f32 = 8.0;
/// One lightning frame per this many 100 ms buckets, on average
const LIGHTNING_ODDS: u64 = 50;

/// Build the draw list for one frame
///
/// `time_ms` only drives decorative animation (sparkles, shake jitter,
/// lightning); the same world and time always give the same list.
pub fn build_scene(world: &World, settings: &Settings, time_ms: f64) -> DrawList {
    let mut list = DrawList::new();
    let camera = settings.effective_camera_motion();
    let zoom = if camera { world.effects.camera_zoom } else { 1.0 };
    let shake = if camera {
        shake_offset(world.effects.camera_shake, time_ms)
    } else {
        Vec2::ZERO
    };

    list.push(DrawCmd::Clear(palette::BLACK));
    list.scoped(|list| {
        if zoom != 1.0 {
            let size = viewport_size(world);
            list.push(DrawCmd::Scale(zoom));
            list.push(DrawCmd::Translate(size * (1.0 - zoom) / (2.0 * zoom)));
        }
        background(list, world);
        list.scoped(|list| {
            list.push(DrawCmd::Translate(scene_origin(world) + shake));
            foreground(list, world, settings, time_ms);
        });
    });

    if settings.weather_effects {
        weather(&mut list, world, time_ms);
    }

    let flash = &world.effects.flash;
    if settings.effective_flashes() && flash.active && flash.opacity > 0.0 {
        list.fill_rect(
            Vec2::ZERO,
            viewport_size(world),
            with_alpha(palette::flash(flash.kind), flash.opacity),
        );
    }

    list
}

fn viewport_size(world: &World) -> Vec2 {
    Vec2::new(world.viewport.width, world.viewport.height)
}

/// Translation from world space (canvas coordinates, scrolled) to the screen
fn scene_origin(world: &World) -> Vec2 {
    let tuning = &world.tuning;
    Vec2::new(
        (world.viewport.width - tuning.canvas_width) / 2.0 - world.scene_offset,
        (world.viewport.height - tuning.canvas_height) / 2.0,
    )
}

fn shake_offset(shake: f32, time_ms: f64) -> Vec2 {
    if shake <= 0.0 {
        return Vec2::ZERO;
    }
    let t = time_ms as f32;
    Vec2::new((t * 0.05).sin(), (t * 0.063).cos()) * shake * SHAKE_PX
}

fn background(list: &mut DrawList, world: &World) {
    let size = viewport_size(world);
    let tuning = &world.tuning;
    let scroll = world.scene_offset * tuning.background_speed_multiplier;

    let sky_top = palette::weather_sky(world.weather);
    list.push(DrawCmd::Rect {
        pos: Vec2::ZERO,
        size,
        paint: Paint::Vertical {
            top: 0.0,
            bottom: size.y,
            stops: vec![(0.0, sky_top), (0.5, palette::SKY_MIDDLE), (1.0, palette::SKY_BOTTOM)],
        },
    });

    if world.weather == WeatherType::Sunny {
        shapes::sun(list, size * SUN_ANCHOR, SUN_RADIUS);
    }

    for cloud in &world.clouds {
        let pos = cloud.pos - Vec2::new(scroll * CLOUD_PARALLAX, 0.0);
        shapes::cloud(list, pos, cloud);
    }

    for (ridge, colors) in tuning.mountains.iter().zip(palette::MOUNTAIN_COLORS) {
        shapes::ridge(list, ridge, scroll, size, colors, true);
    }
    for (ridge, colors) in tuning.hills.iter().zip(palette::HILL_COLORS) {
        shapes::ridge(list, ridge, scroll, size, colors, false);
    }

    let front_hill = &tuning.hills[0];
    for tree in &world.trees {
        let base = Vec2::new(
            (tree.x - scroll) * front_hill.stretch,
            crate::sinus(tree.x) * front_hill.amplitude + size.y - front_hill.base_height,
        );
        if base.x < -20.0 || base.x > size.x + 20.0 {
            continue;
        }
        shapes::tree(list, base, palette::tree(tree.color));
    }

    for bird in &world.birds {
        let pos = Vec2::new(
            bird.pos.x - scroll * BIRD_PARALLAX,
            bird.pos.y + bird.bob_phase.sin() * BIRD_BOB,
        );
        shapes::bird(list, pos, bird);
    }
}

fn foreground(list: &mut DrawList, world: &World, settings: &Settings, time_ms: f64) {
    let tuning = &world.tuning;
    let top = tuning.platform_top();

    if settings.hero_trail {
        for point in &world.effects.hero_trail {
            let radius = 3.0 + point.life * 2.0;
            list.push(DrawCmd::Circle {
                center: point.pos,
                radius,
                paint: Paint::Radial {
                    center: point.pos,
                    radius,
                    stops: vec![
                        (0.0, with_alpha(palette::HERO_TRAIL, point.life * 0.6)),
                        (1.0, with_alpha(palette::HERO_TRAIL, 0.0)),
                    ],
                },
            });
        }
    }

    // Platforms reach down to the bottom of the viewport
    let depth = tuning.platform_height + (world.viewport.height - tuning.canvas_height) / 2.0;
    let live_x = world.live_stick().map(|s| s.x);
    let t = time_ms as f32;
    for platform in &world.platforms {
        let pos = Vec2::new(platform.x, top);
        let size = Vec2::new(platform.w, depth);
        if platform.golden {
            let [a, b, c] = palette::GOLDEN_STOPS;
            list.push(DrawCmd::Rect {
                pos,
                size,
                paint: Paint::Vertical { top, bottom: top + depth, stops: vec![(0.0, a), (0.5, b), (1.0, c)] },
            });
        } else {
            list.fill_rect(pos, size, palette::PLATFORM);
        }

        // Marker only on platforms the live stick could still reach
        if live_x.is_some_and(|x| x < platform.x) {
            let area = tuning.perfect_area_size;
            let color = if platform.golden { palette::PERFECT_MARKER_GOLDEN } else { palette::PERFECT_MARKER };
            list.fill_rect(Vec2::new(platform.center() - area / 2.0, top), Vec2::splat(area), color);
        }

        if platform.golden {
            for i in 0..3 {
                let x = platform.x + platform.w * (i + 1) as f32 / 4.0;
                let radius = 2.0 + (t * 0.01 + i as f32).sin();
                list.fill_circle(Vec2::new(x, top - 5.0), radius, palette::WHITE);
            }
        }
    }

    shapes::hero(list, Vec2::new(world.hero.x, top + world.hero.y), tuning);

    for stick in world.sticks.iter().filter(|s| s.length > 0.0) {
        shapes::stick(list, Vec2::new(stick.x, top), stick);
    }

    if settings.particles {
        for particle in &world.particles {
            list.fill_circle(
                particle.pos,
                particle.size,
                with_alpha(palette::particle(particle.kind), particle.life.clamp(0.0, 1.0)),
            );
        }
    }
}

fn weather(list: &mut DrawList, world: &World, time_ms: f64) {
    match world.weather {
        WeatherType::Rainy | WeatherType::Stormy => {
            let color = palette::rain(world.weather);
            for drop in &world.weather_particles {
                shapes::rain_drop(list, drop, color);
            }
        }
        WeatherType::Snowy => {
            for flake in &world.weather_particles {
                shapes::snow_flake(list, flake);
            }
        }
        WeatherType::Foggy => {
            for blob in &world.weather_particles {
                shapes::fog_blob(list, blob);
            }
        }
        WeatherType::Sunny | WeatherType::Cloudy => {}
    }

    let size = viewport_size(world);
    if let Some(tint) = palette::weather_overlay(world.weather) {
        list.fill_rect(Vec2::ZERO, size, tint);
    }
    if world.weather == WeatherType::Stormy && lightning(time_ms) {
        list.fill_rect(Vec2::ZERO, size, palette::LIGHTNING);
    }
}

/// Knuth multiplicative hash of the 100 ms bucket
fn lightning(time_ms: f64) -> bool {
    let bucket = (time_ms.max(0.0) / 100.0) as u64;
    bucket.wrapping_mul(2_654_435_761) % LIGHTNING_ODDS == 0
}
