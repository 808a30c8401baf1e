//! Stick landing resolution
//!
//! Decides which platform the flat stick's tip rests on and whether the tip
//! sits inside the perfect window around the platform midpoint.

use super::state::{Platform, Stick};
use crate::consts::STICK_FLAT_DEGREES;

/// Outcome of resolving the live stick against the platforms
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StickHit {
    /// Stick is not flat yet, or the tip is over a gap
    NoMatch,
    /// Tip rests on `platform`
    Matched { platform: Platform, perfect: bool },
}

impl StickHit {
    pub fn platform(&self) -> Option<Platform> {
        match self {
            StickHit::Matched { platform, .. } => Some(*platform),
            StickHit::NoMatch => None,
        }
    }

    pub fn is_perfect(&self) -> bool {
        matches!(self, StickHit::Matched { perfect: true, .. })
    }
}

/// Resolve `stick` (the live one) against `platforms`
///
/// The tip must lie strictly inside `(x, x + w)`. A perfect hit needs the tip
/// strictly inside the `perfect_area`-wide window centred on the midpoint.
pub fn resolve(stick: &Stick, platforms: &[Platform], perfect_area: f32) -> StickHit {
    if stick.rotation != STICK_FLAT_DEGREES {
        return StickHit::NoMatch;
    }

    let tip = stick.tip();
    let Some(platform) = platforms.iter().find(|p| p.x < tip && tip < p.right()) else {
        return StickHit::NoMatch;
    };

    let half = perfect_area / 2.0;
    let center = platform.center();
    let perfect = center - half < tip && tip < center + half;

    StickHit::Matched {
        platform: *platform,
        perfect,
    }
}

/// Score awarded for a landing
pub fn score_increment(perfect: bool, golden: bool) -> u32 {
    let base = if perfect { 2 } else { 1 };
    if golden { base * 3 } else { base }
}
