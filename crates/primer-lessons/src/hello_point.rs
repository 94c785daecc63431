//! Lesson 2: a two-stage program whose vertex stage emits one point at the
//! origin.

use bytemuck::Zeroable;
use primer_engine::core::{App, AppControl, FrameCtx};
use primer_engine::paint::Color;
use primer_engine::render::{
    PointStyle, PointStyleUniform, ProgramDesc, ProgramError, RenderCtx, RenderTarget,
    ShaderProgram, UniformBinding, POINT_FRAGMENT_SOURCE, POINT_STYLE_UNIFORM,
};

use crate::canvas::{escape_pressed, Setup};

pub const TITLE: &str = "hello point";

pub(crate) const VERTEX_SOURCE: &str = include_str!("shaders/hello_point.vert.wgsl");

/// Six vertices: the point's square as two triangles.
const POINT_VERTICES: u32 = 6;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HelloPointConfig {
    pub point: PointStyle,
    pub background: Color,
}

impl Default for HelloPointConfig {
    fn default() -> Self {
        Self {
            point: PointStyle::default(),
            background: Color::BLACK,
        }
    }
}

struct PointGpu {
    program: ShaderProgram,
    style: UniformBinding,
}

impl PointGpu {
    fn new(ctx: &RenderCtx<'_>) -> Result<Self, ProgramError> {
        let desc = ProgramDesc::new("hello point", VERTEX_SOURCE, POINT_FRAGMENT_SOURCE);
        let program = ShaderProgram::build(ctx, &desc)?;
        let style = UniformBinding::new(
            ctx,
            &program,
            POINT_STYLE_UNIFORM,
            bytemuck::bytes_of(&PointStyleUniform::zeroed()),
        )?;
        Ok(Self { program, style })
    }

    fn draw(&self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, style: PointStyle) {
        self.style
            .write(ctx.queue, bytemuck::bytes_of(&style.uniform(target.canvas)));

        let Some(mut rpass) = target.canvas_pass(ctx, "hello point pass") else { return };
        rpass.set_pipeline(self.program.pipeline());
        self.style.bind(&mut rpass);
        rpass.draw(0..POINT_VERTICES, 0..1);
    }
}

#[derive(Default)]
pub struct HelloPoint {
    config: HelloPointConfig,
    gpu: Setup<PointGpu>,
}

impl HelloPoint {
    pub fn new(config: HelloPointConfig) -> Self {
        Self {
            config,
            gpu: Setup::Pending,
        }
    }
}

impl App for HelloPoint {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if escape_pressed(ctx.input_frame) {
            return AppControl::Exit;
        }

        let config = self.config;
        let gpu = &mut self.gpu;
        ctx.render(config.background, |rctx, target| {
            let Some(point) = gpu.get_or_init(TITLE, || PointGpu::new(rctx)) else { return };
            point.draw(rctx, target, config.point);
        })
    }
}

#[cfg(test)]
mod tests {
    use primer_engine::render::ProgramInterface;

    use super::*;

    #[test]
    fn program_links_without_attributes() {
        let iface = ProgramInterface::validate(VERTEX_SOURCE, POINT_FRAGMENT_SOURCE).expect("links");
        assert!(iface.attributes().is_empty());
        let loc = iface.uniform(POINT_STYLE_UNIFORM).expect("style uniform");
        assert_eq!((loc.group, loc.binding), (0, 0));
    }

    #[test]
    fn default_is_a_ten_pixel_red_point_on_black() {
        let c = HelloPointConfig::default();
        assert_eq!(c.point.size_px, 10.0);
        assert_eq!(c.point.color, Color::RED);
        assert_eq!(c.background, Color::BLACK);
    }
}
