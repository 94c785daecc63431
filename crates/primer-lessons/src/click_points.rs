//! Lesson 4: every pointer press inside the canvas adds a point; each
//! press clears the canvas and redraws the whole history, one draw per
//! point.

use primer_engine::coords::{ClipPoint, Rect, Vec2};
use primer_engine::core::{App, AppControl, FrameCtx};
use primer_engine::input::MouseButton;
use primer_engine::paint::Color;
use primer_engine::points::PointHistory;
use primer_engine::render::{FillRenderer, PointRenderer, PointStyle, RenderCtx, SetupError};

use crate::canvas::{canvas_rect, escape_pressed, Setup};

pub const TITLE: &str = "click points";

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClickPointsConfig {
    /// Point edge length in logical pixels.
    pub point_size: f32,
    pub point_color: Color,
    pub canvas_color: Color,
    /// Colour of the window area around the canvas.
    pub backdrop: Color,
    /// Distance from the window edges to the canvas, in logical pixels.
    pub canvas_inset: f32,
    pub button: MouseButton,
}

impl Default for ClickPointsConfig {
    fn default() -> Self {
        Self {
            point_size: 10.0,
            point_color: Color::RED,
            canvas_color: Color::BLACK,
            backdrop: Color::from_srgb_u8(48, 48, 48, 255),
            canvas_inset: 20.0,
            button: MouseButton::Left,
        }
    }
}

impl ClickPointsConfig {
    fn style(&self) -> PointStyle {
        PointStyle {
            size_px: self.point_size,
            color: self.point_color,
        }
    }
}

struct Renderers {
    fill: FillRenderer,
    points: PointRenderer,
}

impl Renderers {
    fn new(ctx: &RenderCtx<'_>) -> Result<Self, SetupError> {
        Ok(Self {
            fill: FillRenderer::new(ctx)?,
            points: PointRenderer::new(ctx)?,
        })
    }
}

#[derive(Default)]
pub struct ClickPoints {
    config: ClickPointsConfig,
    history: PointHistory,
    gpu: Setup<Renderers>,
}

impl ClickPoints {
    pub fn new(config: ClickPointsConfig) -> Self {
        Self {
            config,
            history: PointHistory::new(),
            gpu: Setup::Pending,
        }
    }

    pub fn history(&self) -> &PointHistory {
        &self.history
    }

    /// Handles one press at `pixel` (logical window coordinates).
    ///
    /// Presses outside `canvas` are ignored. Otherwise the press is mapped
    /// to clip space relative to the canvas and appended.
    pub fn on_press(&mut self, canvas: Rect, pixel: Vec2) -> Option<ClipPoint> {
        if !canvas.contains(pixel) {
            log::debug!("press at ({}, {}) is outside the canvas", pixel.x, pixel.y);
            return None;
        }

        let point = canvas.to_clip(pixel);
        let n = self.history.push(point);
        log::debug!(
            "point {n}: ({}, {}) -> ({:.3}, {:.3})",
            pixel.x,
            pixel.y,
            point.x,
            point.y
        );
        Some(point)
    }
}

impl App for ClickPoints {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if escape_pressed(ctx.input_frame) {
            return AppControl::Exit;
        }

        let canvas = canvas_rect(ctx.window.bounds(), self.config.canvas_inset);
        let presses: Vec<Vec2> = ctx.input_frame.presses(self.config.button).collect();
        for pixel in presses {
            self.on_press(canvas, pixel);
        }

        let config = self.config;
        let history = &self.history;
        let gpu = &mut self.gpu;
        ctx.render_canvas(canvas, config.backdrop, |rctx, target| {
            let Some(r) = gpu.get_or_init(TITLE, || Renderers::new(rctx)) else { return };
            r.fill.render(rctx, target, config.canvas_color);
            r.points.render_each(rctx, target, history, config.style());
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    fn close(p: ClipPoint, x: f32, y: f32) -> bool {
        (p.x - x).abs() < EPS && (p.y - y).abs() < EPS
    }

    #[test]
    fn presses_accumulate_in_order() {
        let mut lesson = ClickPoints::default();
        let canvas = Rect::from_size(200.0, 100.0);

        lesson.on_press(canvas, Vec2::new(100.0, 50.0));
        lesson.on_press(canvas, Vec2::new(150.0, 25.0));
        lesson.on_press(canvas, Vec2::new(0.0, 0.0));

        let pts = lesson.history().as_slice();
        assert_eq!(pts.len(), 3);
        assert!(close(pts[0], 0.0, 0.0));
        assert!(close(pts[1], 0.5, 0.5));
        assert!(close(pts[2], -1.0, 1.0));
    }

    #[test]
    fn press_is_relative_to_the_canvas_origin() {
        let mut lesson = ClickPoints::default();
        let canvas = Rect::new(20.0, 20.0, 200.0, 100.0);

        let p = lesson.on_press(canvas, Vec2::new(120.0, 70.0)).expect("inside");
        assert!(close(p, 0.0, 0.0));
    }

    #[test]
    fn presses_outside_the_canvas_are_ignored() {
        let mut lesson = ClickPoints::default();
        let canvas = Rect::new(20.0, 20.0, 200.0, 100.0);

        assert!(lesson.on_press(canvas, Vec2::new(5.0, 50.0)).is_none());
        assert!(lesson.on_press(canvas, Vec2::new(220.0, 50.0)).is_none());
        assert!(lesson.history().is_empty());
    }

    #[test]
    fn redraw_replays_every_press() {
        let mut lesson = ClickPoints::default();
        let canvas = Rect::from_size(200.0, 100.0);
        for x in [10.0, 60.0, 110.0, 160.0] {
            lesson.on_press(canvas, Vec2::new(x, 50.0));
        }

        let mut drawn = Vec::new();
        let n = lesson
            .history()
            .redraw(&mut |i: u32, p: ClipPoint| drawn.push((i, p)));

        assert_eq!(n, 4);
        assert_eq!(drawn.iter().map(|(i, _)| *i).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert!(drawn.iter().zip(lesson.history().iter()).all(|((_, a), b)| *a == b));
    }

    #[test]
    fn default_style_is_ten_pixel_red_squares() {
        let style = ClickPointsConfig::default().style();
        assert_eq!(style.size_px, 10.0);
        assert_eq!(style.color, Color::RED);
    }
}
