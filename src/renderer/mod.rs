//! Rendering module
//!
//! The scene is built as a backend-agnostic `DrawList` and replayed by a
//! `RenderBackend`: a 2D canvas on the web, a recorder in tests.

pub mod draw;
pub mod palette;
pub mod scene;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use draw::{Color, DrawCmd, DrawList, Paint, Path, PathSeg, RecordingBackend, RenderBackend};
pub use scene::build_scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasBackend;

use crate::settings::Settings;
use crate::sim::World;

/// Build this frame's scene and replay it on `backend`
pub fn render(world: &World, settings: &Settings, time_ms: f64, backend: &mut dyn RenderBackend) {
    let list = build_scene(world, settings, time_ms);
    backend.begin_frame(world.viewport);
    for cmd in &list {
        backend.draw(cmd);
    }
    backend.end_frame();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Viewport;
    use crate::tuning::Tuning;

    #[test]
    fn test_render_replays_whole_list() {
        let world = World::new(Tuning::default(), Viewport::default(), 3);
        let settings = Settings::default();
        let mut backend = RecordingBackend::new();
        render(&world, &settings, 0.0, &mut backend);
        assert_eq!(backend.frames, 1);
        assert_eq!(backend.cmds.len(), build_scene(&world, &settings, 0.0).len());
        assert_eq!(backend.cmds[0], DrawCmd::Clear(palette::BLACK));
    }
}
