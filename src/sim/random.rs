//! Random helpers shared by the generators

use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

use super::state::WeatherType;
use crate::tuning::Span;

/// Uniform float in `[span.min, span.max)`; degenerate spans return `min`
pub fn between<R: Rng + ?Sized>(rng: &mut R, span: Span) -> f32 {
    if span.max > span.min {
        rng.random_range(span.min..span.max)
    } else {
        span.min
    }
}

/// Uniform integer in `[span.min, span.max]` (both ends inclusive)
pub fn int_between<R: Rng + ?Sized>(rng: &mut R, span: Span) -> f32 {
    let min = span.min.round() as i32;
    let max = span.max.round() as i32;
    if max > min {
        rng.random_range(min..=max) as f32
    } else {
        min as f32
    }
}

/// +1.0 or -1.0 with equal odds
pub fn sign<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    if rng.random_bool(0.5) { 1.0 } else { -1.0 }
}

/// Weighted weather draw; weights follow `WeatherType::ALL` order
pub fn pick_weather<R: Rng + ?Sized>(rng: &mut R, weights: &[f32; 6]) -> WeatherType {
    match WeightedIndex::new(weights) {
        Ok(dist) => WeatherType::ALL[dist.sample(rng)],
        Err(e) => {
            log::error!("Invalid weather weights {:?}: {}", weights, e);
            WeatherType::Sunny
        }
    }
}
