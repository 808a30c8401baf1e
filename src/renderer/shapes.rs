//! Shape builders for scene entities
//!
//! Each function appends the commands for one entity to a `DrawList`.
//! Positions are in whatever space the caller has translated to.

use glam::Vec2;
use std::f32::consts::{PI, TAU};

use super::draw::{Color, DrawCmd, DrawList, Paint, Path};
use super::palette::{self, with_alpha};
use crate::sim::{Bird, Cloud, Stick, WeatherParticle};
use crate::sinus;
use crate::tuning::{Ridge, Tuning};

/// Horizontal sampling step for ridge outlines
const RIDGE_STEP: usize = 4;
/// Depth of the snow cap below a mountain's highest possible point
const SNOW_CAP_DEPTH: f32 = 40.0;

const SUN_RAYS: usize = 12;

/// Sun with a soft glow and rays
pub fn sun(list: &mut DrawList, center: Vec2, radius: f32) {
    list.push(DrawCmd::Circle {
        center,
        radius: radius * 2.0,
        paint: Paint::Radial {
            center,
            radius: radius * 2.0,
            stops: vec![
                (0.0, with_alpha(palette::SUN, 0.6)),
                (1.0, with_alpha(palette::SUN, 0.0)),
            ],
        },
    });
    list.fill_circle(center, radius, palette::SUN);
    for i in 0..SUN_RAYS {
        let angle = i as f32 / SUN_RAYS as f32 * TAU;
        let dir = Vec2::from_angle(angle);
        list.line(center + dir * radius * 1.2, center + dir * radius * 1.8, 3.0, palette::SUN_RAY);
    }
}

/// Cloud as five overlapping ellipses
pub fn cloud(list: &mut DrawList, pos: Vec2, cloud: &Cloud) {
    let radii = Vec2::new(cloud.width / 4.0, cloud.height / 3.0);
    let color = with_alpha(palette::WHITE, cloud.opacity);
    let lobes = [
        Vec2::new(0.0, 0.0),
        Vec2::new(cloud.width * 0.25, -cloud.height * 0.2),
        Vec2::new(cloud.width * 0.5, 0.0),
        Vec2::new(cloud.width * 0.25, cloud.height * 0.15),
        Vec2::new(cloud.width * 0.75, cloud.height * 0.05),
    ];
    for lobe in lobes {
        list.fill_ellipse(pos + lobe, radii, color);
    }
}

/// Height of a ridge at screen x
pub fn ridge_y(ridge: &Ridge, scroll: f32, x: f32, viewport_height: f32) -> f32 {
    sinus((scroll + x) * ridge.stretch) * ridge.amplitude + (viewport_height - ridge.base_height)
}

/// Filled sinusoidal ridge from screen x = 0 to `width`, optionally snow-capped
pub fn ridge(
    list: &mut DrawList,
    ridge: &Ridge,
    scroll: f32,
    size: Vec2,
    colors: (Color, Color),
    snow_cap: bool,
) {
    let xs = || (0..=size.x as usize).step_by(RIDGE_STEP).map(|x| x as f32).chain([size.x]);
    let mut path = Path::new()
        .move_to(Vec2::new(0.0, size.y))
        .line_to(Vec2::new(0.0, ridge_y(ridge, scroll, 0.0, size.y)));
    for x in xs() {
        path = path.line_to(Vec2::new(x, ridge_y(ridge, scroll, x, size.y)));
    }
    path = path.line_to(size).close();

    let top = size.y - ridge.base_height - ridge.amplitude;
    list.push(DrawCmd::FillPath {
        path,
        paint: Paint::Vertical { top, bottom: size.y, stops: vec![(0.0, colors.0), (1.0, colors.1)] },
    });

    if snow_cap {
        let snow_line = top + SNOW_CAP_DEPTH;
        let mut cap = Path::new().move_to(Vec2::new(0.0, snow_line));
        for x in xs() {
            cap = cap.line_to(Vec2::new(x, ridge_y(ridge, scroll, x, size.y).min(snow_line)));
        }
        cap = cap.line_to(Vec2::new(size.x, snow_line)).close();
        list.push(DrawCmd::FillPath {
            path: cap,
            paint: Paint::Vertical {
                top,
                bottom: snow_line,
                stops: vec![(0.0, palette::SNOW_CAP), (1.0, with_alpha(palette::hex(0xf0f0f0), 0.8))],
            },
        });
    }
}

/// Tree standing on `base`: thin trunk and a triangular crown
pub fn tree(list: &mut DrawList, base: Vec2, color: Color) {
    const TRUNK: Vec2 = Vec2::new(2.0, 5.0);
    const CROWN: Vec2 = Vec2::new(10.0, 25.0);

    list.fill_rect(base - Vec2::new(TRUNK.x / 2.0, TRUNK.y), TRUNK, palette::TREE_TRUNK);
    list.fill_path(
        Path::polygon(&[
            base + Vec2::new(-CROWN.x / 2.0, -TRUNK.y),
            base + Vec2::new(0.0, -(TRUNK.y + CROWN.y)),
            base + Vec2::new(CROWN.x / 2.0, -TRUNK.y),
        ]),
        color,
    );
}

/// Bird facing its direction of travel
pub fn bird(list: &mut DrawList, pos: Vec2, bird: &Bird) {
    let s = bird.size;
    let facing = if bird.speed < 0.0 { -1.0 } else { 1.0 };
    let span = bird.wing;

    list.fill_ellipse(pos, Vec2::new(s * 0.6, s * 0.35), palette::bird(bird.color));
    for side in [-1.0, 1.0] {
        let root = pos + Vec2::new(side * s * 0.1, 0.0);
        let tip = pos + Vec2::new(side * s * 0.9, -span * 0.4);
        list.fill_path(
            Path::new()
                .move_to(root)
                .quad_to(pos + Vec2::new(side * s * 0.5, -span), tip)
                .quad_to(pos + Vec2::new(side * s * 0.5, -span * 0.2), root)
                .close(),
            palette::BIRD_WING,
        );
    }
    let head = pos + Vec2::new(facing * s * 0.55, -s * 0.2);
    list.fill_circle(head, s * 0.25, palette::bird(bird.color));
    list.fill_path(
        Path::polygon(&[
            head + Vec2::new(facing * s * 0.2, -s * 0.06),
            head + Vec2::new(facing * s * 0.45, 0.0),
            head + Vec2::new(facing * s * 0.2, s * 0.06),
        ]),
        palette::BIRD_BEAK,
    );
}

/// Hero with its feet centred on `feet`
pub fn hero(list: &mut DrawList, feet: Vec2, tuning: &Tuning) {
    let size = Vec2::new(tuning.hero_width, tuning.hero_height);
    let leg_height = 5.0;
    let body_top = feet - Vec2::new(size.x / 2.0, size.y);

    list.push(DrawCmd::RoundedRect {
        pos: body_top,
        size: Vec2::new(size.x, size.y - leg_height),
        radius: 5.0,
        paint: Paint::Solid(palette::HERO),
    });
    for leg_x in [-size.x * 0.3, size.x * 0.15] {
        list.fill_rect(
            feet + Vec2::new(leg_x, -leg_height),
            Vec2::new(size.x * 0.15, leg_height),
            palette::HERO,
        );
    }
    list.fill_circle(body_top + Vec2::new(size.x * 0.7, size.y * 0.2), 2.0, palette::HERO_EYE);
    list.fill_rect(
        body_top + Vec2::new(0.0, size.y * 0.1),
        Vec2::new(size.x, size.y * 0.1),
        palette::HERO_BAND,
    );
}

/// Stick standing at `base`, rotated clockwise by its rotation
///
/// A bent stick is a quadratic curve whose control point is pushed sideways
/// by the bend.
pub fn stick(list: &mut DrawList, base: Vec2, stick: &Stick) {
    list.scoped(|list| {
        list.push(DrawCmd::Translate(base));
        list.push(DrawCmd::Rotate(stick.rotation.to_radians()));

        let tip = Vec2::new(0.0, -stick.length);
        let path = if stick.bend > 0.0 {
            let control = Vec2::new(stick.bend_direction * stick.bend, -stick.length / 2.0);
            Path::new().move_to(Vec2::ZERO).quad_to(control, tip)
        } else {
            Path::new().move_to(Vec2::ZERO).line_to(tip)
        };
        list.stroke(path.clone(), 3.0, palette::STICK);

        list.push(DrawCmd::Translate(Vec2::new(1.0, 1.0)));
        list.stroke(path, 1.0, palette::STICK_SHADOW);
    });
}

/// Rain streak along the particle's velocity
pub fn rain_drop(list: &mut DrawList, drop: &WeatherParticle, color: Color) {
    list.line(drop.pos, drop.pos + drop.vel * 2.0, drop.size, with_alpha(color, drop.opacity));
}

/// Six-armed snow flake with a centre dot
pub fn snow_flake(list: &mut DrawList, flake: &WeatherParticle) {
    let color = with_alpha(palette::SNOW, flake.opacity);
    list.scoped(|list| {
        list.push(DrawCmd::Translate(flake.pos));
        list.push(DrawCmd::Rotate(flake.rotation.to_radians()));
        for arm in 0..3 {
            let dir = Vec2::from_angle(arm as f32 * PI / 3.0) * flake.size;
            list.line(-dir, dir, 1.0, color);
        }
        list.fill_circle(Vec2::ZERO, flake.size * 0.3, color);
    });
}

pub fn fog_blob(list: &mut DrawList, blob: &WeatherParticle) {
    list.fill_circle(blob.pos, blob.size, with_alpha(palette::FOG, blob.opacity));
}
