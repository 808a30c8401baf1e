//! Canvas 2D backend (web only)

use wasm_bindgen::JsValue;
use web_sys::{CanvasGradient, CanvasRenderingContext2d};

use super::draw::{Color, DrawCmd, Paint, Path, PathSeg, RenderBackend};
use crate::sim::Viewport;

pub struct CanvasBackend {
    ctx: CanvasRenderingContext2d,
    viewport: Viewport,
}

fn css(color: Color) -> String {
    format!(
        "rgba({}, {}, {}, {})",
        (color[0] * 255.0).round() as u8,
        (color[1] * 255.0).round() as u8,
        (color[2] * 255.0).round() as u8,
        color[3].clamp(0.0, 1.0)
    )
}

impl CanvasBackend {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self {
            ctx,
            viewport: Viewport::default(),
        }
    }

    fn gradient(&self, stops: &[(f32, Color)], gradient: CanvasGradient) -> Result<(), JsValue> {
        for (offset, color) in stops {
            gradient.add_color_stop(*offset, &css(*color))?;
        }
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        Ok(())
    }

    fn set_paint(&self, paint: &Paint) -> Result<(), JsValue> {
        match paint {
            Paint::Solid(color) => {
                self.ctx.set_fill_style_str(&css(*color));
                Ok(())
            }
            Paint::Vertical { top, bottom, stops } => {
                let g = self.ctx.create_linear_gradient(0.0, *top as f64, 0.0, *bottom as f64);
                self.gradient(stops, g)
            }
            Paint::Radial { center, radius, stops } => {
                let (x, y) = (center.x as f64, center.y as f64);
                let g = self.ctx.create_radial_gradient(x, y, 0.0, x, y, *radius as f64)?;
                self.gradient(stops, g)
            }
        }
    }

    fn trace(&self, path: &Path) {
        self.ctx.begin_path();
        for seg in path.segs() {
            match *seg {
                PathSeg::MoveTo(p) => self.ctx.move_to(p.x as f64, p.y as f64),
                PathSeg::LineTo(p) => self.ctx.line_to(p.x as f64, p.y as f64),
                PathSeg::QuadTo { control, to } => self.ctx.quadratic_curve_to(
                    control.x as f64,
                    control.y as f64,
                    to.x as f64,
                    to.y as f64,
                ),
                PathSeg::Close => self.ctx.close_path(),
            }
        }
    }

    fn apply(&self, cmd: &DrawCmd) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match cmd {
            DrawCmd::Clear(color) => {
                ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
                ctx.set_fill_style_str(&css(*color));
                ctx.fill_rect(0.0, 0.0, self.viewport.width as f64, self.viewport.height as f64);
            }
            DrawCmd::Save => ctx.save(),
            DrawCmd::Restore => ctx.restore(),
            DrawCmd::Translate(v) => ctx.translate(v.x as f64, v.y as f64)?,
            DrawCmd::Rotate(radians) => ctx.rotate(*radians as f64)?,
            DrawCmd::Scale(s) => ctx.scale(*s as f64, *s as f64)?,
            DrawCmd::Rect { pos, size, paint } => {
                self.set_paint(paint)?;
                ctx.fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
            }
            DrawCmd::RoundedRect { pos, size, radius, paint } => {
                let r = radius.min(size.x / 2.0).min(size.y / 2.0);
                let (x0, y0) = (pos.x, pos.y);
                let (x1, y1) = (pos.x + size.x, pos.y + size.y);
                let q = |cx: f32, cy: f32, x: f32, y: f32| {
                    ctx.quadratic_curve_to(cx as f64, cy as f64, x as f64, y as f64)
                };
                self.set_paint(paint)?;
                ctx.begin_path();
                ctx.move_to((x0 + r) as f64, y0 as f64);
                ctx.line_to((x1 - r) as f64, y0 as f64);
                q(x1, y0, x1, y0 + r);
                ctx.line_to(x1 as f64, (y1 - r) as f64);
                q(x1, y1, x1 - r, y1);
                ctx.line_to((x0 + r) as f64, y1 as f64);
                q(x0, y1, x0, y1 - r);
                ctx.line_to(x0 as f64, (y0 + r) as f64);
                q(x0, y0, x0 + r, y0);
                ctx.close_path();
                ctx.fill();
            }
            DrawCmd::Circle { center, radius, paint } => {
                self.set_paint(paint)?;
                ctx.begin_path();
                ctx.arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, std::f64::consts::TAU)?;
                ctx.fill();
            }
            DrawCmd::Ellipse { center, radii, paint } => {
                self.set_paint(paint)?;
                ctx.begin_path();
                ctx.ellipse(
                    center.x as f64,
                    center.y as f64,
                    radii.x.max(0.0) as f64,
                    radii.y.max(0.0) as f64,
                    0.0,
                    0.0,
                    std::f64::consts::TAU,
                )?;
                ctx.fill();
            }
            DrawCmd::FillPath { path, paint } => {
                self.set_paint(paint)?;
                self.trace(path);
                ctx.fill();
            }
            DrawCmd::StrokePath { path, width, color } => {
                ctx.set_stroke_style_str(&css(*color));
                ctx.set_line_width(*width as f64);
                ctx.set_line_cap("round");
                self.trace(path);
                ctx.stroke();
            }
        }
        Ok(())
    }
}

impl RenderBackend for CanvasBackend {
    fn begin_frame(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn draw(&mut self, cmd: &DrawCmd) {
        if let Err(err) = self.apply(cmd) {
            log::warn!("Canvas {} failed: {:?}", cmd.kind(), err);
        }
    }
}
