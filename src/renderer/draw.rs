//! Backend-agnostic draw commands
//!
//! The scene builder emits a flat `DrawList`; a `RenderBackend` replays it.
//! Commands mirror a 2D canvas context: a transform stack plus filled
//! shapes and stroked paths.

use glam::Vec2;

use crate::sim::Viewport;

/// Linear RGBA, each channel 0-1
pub type Color = [f32; 4];

/// One segment of a path
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSeg {
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadTo { control: Vec2, to: Vec2 },
    Close,
}

/// A sequence of path segments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    segs: Vec<PathSeg>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, p: Vec2) -> Self {
        self.segs.push(PathSeg::MoveTo(p));
        self
    }

    pub fn line_to(mut self, p: Vec2) -> Self {
        self.segs.push(PathSeg::LineTo(p));
        self
    }

    pub fn quad_to(mut self, control: Vec2, to: Vec2) -> Self {
        self.segs.push(PathSeg::QuadTo { control, to });
        self
    }

    pub fn close(mut self) -> Self {
        self.segs.push(PathSeg::Close);
        self
    }

    /// Closed polygon through `points`
    pub fn polygon(points: &[Vec2]) -> Self {
        let mut path = Self::new();
        let mut iter = points.iter();
        if let Some(first) = iter.next() {
            path = path.move_to(*first);
            for p in iter {
                path = path.line_to(*p);
            }
            path = path.close();
        }
        path
    }

    pub fn segs(&self) -> &[PathSeg] {
        &self.segs
    }

    pub fn is_empty(&self) -> bool {
        self.segs.is_empty()
    }
}

/// How a filled shape is painted
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Vertical gradient from `top` to `bottom` (y in the current transform)
    Vertical { top: f32, bottom: f32, stops: Vec<(f32, Color)> },
    /// Radial gradient fading out from `center`
    Radial { center: Vec2, radius: f32, stops: Vec<(f32, Color)> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Fill the whole viewport, ignoring transforms
    Clear(Color),
    Save,
    Restore,
    Translate(Vec2),
    /// Radians, clockwise (y points down)
    Rotate(f32),
    Scale(f32),
    Rect { pos: Vec2, size: Vec2, paint: Paint },
    RoundedRect { pos: Vec2, size: Vec2, radius: f32, paint: Paint },
    Circle { center: Vec2, radius: f32, paint: Paint },
    Ellipse { center: Vec2, radii: Vec2, paint: Paint },
    FillPath { path: Path, paint: Paint },
    StrokePath { path: Path, width: f32, color: Color },
}

impl DrawCmd {
    /// Short name for logging and test assertions
    pub fn kind(&self) -> &'static str {
        match self {
            DrawCmd::Clear(_) => "clear",
            DrawCmd::Save => "save",
            DrawCmd::Restore => "restore",
            DrawCmd::Translate(_) => "translate",
            DrawCmd::Rotate(_) => "rotate",
            DrawCmd::Scale(_) => "scale",
            DrawCmd::Rect { .. } => "rect",
            DrawCmd::RoundedRect { .. } => "rounded_rect",
            DrawCmd::Circle { .. } => "circle",
            DrawCmd::Ellipse { .. } => "ellipse",
            DrawCmd::FillPath { .. } => "fill_path",
            DrawCmd::StrokePath { .. } => "stroke_path",
        }
    }
}

/// Ordered draw commands for one frame
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    cmds: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: DrawCmd) {
        self.cmds.push(cmd);
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCmd> {
        self.cmds.iter()
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Run `body` between a save and its matching restore
    pub fn scoped(&mut self, body: impl FnOnce(&mut DrawList)) {
        self.push(DrawCmd::Save);
        body(self);
        self.push(DrawCmd::Restore);
    }

    pub fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
        self.push(DrawCmd::Rect { pos, size, paint: Paint::Solid(color) });
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.push(DrawCmd::Circle { center, radius, paint: Paint::Solid(color) });
    }

    pub fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color) {
        self.push(DrawCmd::Ellipse { center, radii, paint: Paint::Solid(color) });
    }

    pub fn fill_path(&mut self, path: Path, color: Color) {
        self.push(DrawCmd::FillPath { path, paint: Paint::Solid(color) });
    }

    pub fn stroke(&mut self, path: Path, width: f32, color: Color) {
        self.push(DrawCmd::StrokePath { path, width, color });
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.stroke(Path::new().move_to(from).line_to(to), width, color);
    }
}

impl<'a> IntoIterator for &'a DrawList {
    type Item = &'a DrawCmd;
    type IntoIter = std::slice::Iter<'a, DrawCmd>;

    fn into_iter(self) -> Self::IntoIter {
        self.cmds.iter()
    }
}

/// Something that can replay a `DrawList`
pub trait RenderBackend {
    fn begin_frame(&mut self, viewport: Viewport);
    fn draw(&mut self, cmd: &DrawCmd);
    fn end_frame(&mut self) {}
}

/// Records commands; used by tests and the headless binary
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub frames: usize,
    pub cmds: Vec<DrawCmd>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, kind: &str) -> usize {
        self.cmds.iter().filter(|c| c.kind() == kind).count()
    }
}

impl RenderBackend for RecordingBackend {
    fn begin_frame(&mut self, _viewport: Viewport) {
        self.frames += 1;
        self.cmds.clear();
    }

    fn draw(&mut self, cmd: &DrawCmd) {
        self.cmds.push(cmd.clone());
    }
}
