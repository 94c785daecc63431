//! Lesson 3: upload points into a vertex buffer and draw them in one call.

use primer_engine::coords::ClipPoint;
use primer_engine::core::{App, AppControl, FrameCtx};
use primer_engine::paint::Color;
use primer_engine::render::{
    PointRenderer, PointStyle, ProgramError, RenderCtx, SetupError, VertexBuffer,
};

use crate::canvas::{escape_pressed, Setup};

pub const TITLE: &str = "multi point";

pub const POSITION_ATTRIBUTE: &str = "position";

/// The three points uploaded by default.
pub const POINTS: [ClipPoint; 3] = [
    ClipPoint::new(0.0, 0.5),
    ClipPoint::new(-0.5, -0.5),
    ClipPoint::new(0.5, -0.5),
];

#[derive(Debug, Clone, PartialEq)]
pub struct MultiPointConfig {
    pub points: Vec<ClipPoint>,
    pub point: PointStyle,
    pub background: Color,
}

impl Default for MultiPointConfig {
    fn default() -> Self {
        Self {
            points: POINTS.to_vec(),
            point: PointStyle::default(),
            background: Color::BLACK,
        }
    }
}

struct PointsGpu {
    renderer: PointRenderer,
    vertices: VertexBuffer,
}

impl PointsGpu {
    fn new(ctx: &RenderCtx<'_>, points: &[ClipPoint]) -> Result<Self, SetupError> {
        let vertices = VertexBuffer::from_points(ctx.device, "multi point positions", points)?;
        let renderer = PointRenderer::new(ctx)?;

        let location = renderer
            .program()
            .attribute_location(POSITION_ATTRIBUTE)
            .ok_or_else(|| ProgramError::MissingAttribute(POSITION_ATTRIBUTE.to_string()))?;
        log::debug!("`{POSITION_ATTRIBUTE}` bound at location {location}");

        Ok(Self { renderer, vertices })
    }
}

#[derive(Default)]
pub struct MultiPoint {
    config: MultiPointConfig,
    gpu: Setup<PointsGpu>,
}

impl MultiPoint {
    pub fn new(config: MultiPointConfig) -> Self {
        Self {
            config,
            gpu: Setup::Pending,
        }
    }
}

impl App for MultiPoint {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if escape_pressed(ctx.input_frame) {
            return AppControl::Exit;
        }

        let config = &self.config;
        let gpu = &mut self.gpu;
        ctx.render(config.background, |rctx, target| {
            let Some(points) = gpu.get_or_init(TITLE, || PointsGpu::new(rctx, &config.points))
            else {
                return;
            };
            points
                .renderer
                .render_all(rctx, target, &points.vertices, config.point);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_are_inside_clip_space() {
        let config = MultiPointConfig::default();
        assert_eq!(config.points.len(), 3);
        assert!(config.points.iter().all(|p| p.is_on_canvas()));
    }

    #[test]
    fn default_style_is_ten_pixel_red_on_black() {
        let config = MultiPointConfig::default();
        assert_eq!(config.point, PointStyle::default());
        assert_eq!(config.background, Color::BLACK);
    }
}
