//! Lesson 1: clear the drawing surface to a solid colour.

use primer_engine::core::{App, AppControl, FrameCtx};
use primer_engine::paint::Color;

use crate::canvas::escape_pressed;

pub const TITLE: &str = "clear canvas";

pub struct ClearCanvas {
    color: Color,
}

impl Default for ClearCanvas {
    fn default() -> Self {
        Self::new(Color::BLUE)
    }
}

impl ClearCanvas {
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

impl App for ClearCanvas {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if escape_pressed(ctx.input_frame) {
            return AppControl::Exit;
        }

        ctx.render(self.color, |_, _| {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clears_to_opaque_blue() {
        assert_eq!(ClearCanvas::default().color().to_array(), [0.0, 0.0, 1.0, 1.0]);
    }
}
