//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (mouse, touch, keyboard to semantic signals)
//! - Frame scheduling (requestAnimationFrame on web, scripted natively)

pub mod frame;
pub mod input;

pub use frame::{FrameClock, FrameLoop, FrameScheduler};
pub use input::{InputSignal, PointerEvent, map_key};
