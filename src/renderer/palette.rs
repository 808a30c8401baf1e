//! Colors
//!
//! The simulation stores kinds and palette indices; this is the only place
//! they become RGBA.

use super::draw::Color;
use crate::sim::{FlashKind, ParticleKind, WeatherType};

/// `0xRRGGBB` to an opaque color
pub const fn hex(rgb: u32) -> Color {
    [
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
        1.0,
    ]
}

/// Same color with a new alpha
pub const fn with_alpha(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], alpha]
}

pub const WHITE: Color = hex(0xffffff);
pub const BLACK: Color = hex(0x000000);

// Sky (sunny)
pub const SKY_TOP: Color = hex(0x87ceeb);
pub const SKY_MIDDLE: Color = hex(0xbbd691);
pub const SKY_BOTTOM: Color = hex(0xfef1e1);

pub const SUN: Color = hex(0xffd700);
pub const SUN_RAY: Color = hex(0xffeb3b);

// Background ridges, back to front
pub const MOUNTAIN_COLORS: [(Color, Color); 2] = [
    (hex(0x7c8ca3), hex(0x5a6a82)),
    (hex(0x8fa0b5), hex(0x6b7d96)),
];
pub const SNOW_CAP: Color = [1.0, 1.0, 1.0, 0.8];
pub const HILL_COLORS: [(Color, Color); 3] = [
    (hex(0x95c629), hex(0x659f1c)),
    (hex(0x7fb524), hex(0x4e8a15)),
    (hex(0x6da41e), hex(0x3f7510)),
];

pub const TREE_TRUNK: Color = hex(0x7d833c);
pub const TREE_COLORS: [Color; 3] = [hex(0x6d8821), hex(0x8fac34), hex(0x98b333)];

pub const BIRD_COLORS: [Color; 4] = [hex(0x333333), hex(0x5b4a3f), hex(0x2f4f6f), hex(0x6b3a3a)];
pub const BIRD_WING: Color = hex(0x555555);
pub const BIRD_BEAK: Color = hex(0xf6cb5b);

pub const PLATFORM: Color = BLACK;
pub const GOLDEN_STOPS: [Color; 3] = [hex(0xffd700), hex(0xffa500), hex(0xff8c00)];
pub const PERFECT_MARKER: Color = hex(0xff0000);
pub const PERFECT_MARKER_GOLDEN: Color = hex(0xffff00);

pub const HERO: Color = BLACK;
pub const HERO_EYE: Color = WHITE;
pub const HERO_BAND: Color = hex(0xd62828);
pub const HERO_TRAIL: Color = hex(0xff6b35);

pub const STICK: Color = hex(0x8b4513);
pub const STICK_SHADOW: Color = [0.0, 0.0, 0.0, 0.3];

pub const FOG: Color = hex(0xf7fafc);
pub const SNOW: Color = WHITE;
pub const LIGHTNING: Color = [1.0, 1.0, 1.0, 0.3];

/// Wrapping lookup so a stale index never panics
pub fn tree(index: usize) -> Color {
    TREE_COLORS[index % TREE_COLORS.len()]
}

pub fn bird(index: usize) -> Color {
    BIRD_COLORS[index % BIRD_COLORS.len()]
}

pub fn particle(kind: ParticleKind) -> Color {
    match kind {
        ParticleKind::Dust => hex(0x8b7355),
        ParticleKind::Spark => hex(0xffa500),
        ParticleKind::Perfect => hex(0x00ff00),
        ParticleKind::Gold => hex(0xffd700),
        ParticleKind::Sparkle => WHITE,
    }
}

pub fn flash(kind: FlashKind) -> Color {
    match kind {
        FlashKind::Perfect => hex(0x00ff00),
        FlashKind::Golden => hex(0xffd700),
        FlashKind::GameOver => hex(0xff0000),
    }
}

/// Top-of-sky color for non-sunny weather
pub fn weather_sky(weather: WeatherType) -> Color {
    match weather {
        WeatherType::Sunny => SKY_TOP,
        WeatherType::Rainy => hex(0x4a5568),
        WeatherType::Snowy => hex(0x718096),
        WeatherType::Stormy => hex(0x2d3748),
        WeatherType::Cloudy => hex(0xa0aec0),
        WeatherType::Foggy => hex(0xe2e8f0),
    }
}

pub fn rain(weather: WeatherType) -> Color {
    match weather {
        WeatherType::Stormy => hex(0x4a5568),
        _ => hex(0x87ceeb),
    }
}

/// Full-screen tint drawn over everything but the flash
pub fn weather_overlay(weather: WeatherType) -> Option<Color> {
    match weather {
        WeatherType::Sunny => None,
        WeatherType::Rainy => Some(with_alpha(hex(0x4a5568), 0.1)),
        WeatherType::Stormy => Some(with_alpha(hex(0x2d3748), 0.2)),
        WeatherType::Snowy => Some(with_alpha(hex(0xe2e8f0), 0.05)),
        WeatherType::Cloudy => Some(with_alpha(hex(0xa0aec0), 0.08)),
        WeatherType::Foggy => Some(with_alpha(hex(0xe2e8f0), 0.15)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{BIRD_PALETTE_SIZE, TREE_PALETTE_SIZE};

    #[test]
    fn test_hex() {
        assert_eq!(hex(0xff0000), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(hex(0x000000), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_palettes_match_generator_ranges() {
        assert_eq!(TREE_COLORS.len(), TREE_PALETTE_SIZE);
        assert_eq!(BIRD_COLORS.len(), BIRD_PALETTE_SIZE);
        assert_eq!(tree(TREE_PALETTE_SIZE), tree(0));
    }

    #[test]
    fn test_only_sunny_has_no_overlay() {
        for weather in WeatherType::ALL {
            assert_eq!(weather_overlay(weather).is_none(), weather == WeatherType::Sunny);
        }
    }
}
