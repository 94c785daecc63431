use bytemuck::{Pod, Zeroable};

use crate::paint::Color;
use crate::render::{ProgramDesc, RenderCtx, RenderTarget, SetupError, ShaderProgram, UniformBinding};

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct FillUniform {
    color: [f32; 4],
}

/// Fills the canvas rectangle with a solid color.
///
/// A render pass clear always covers the whole attachment; this clears just
/// the canvas when it is smaller than the window.
pub struct FillRenderer {
    program: ShaderProgram,
    uniform: UniformBinding,
}

impl FillRenderer {
    pub fn new(ctx: &RenderCtx<'_>) -> Result<Self, SetupError> {
        let mut desc = ProgramDesc::new(
            "primer fill",
            include_str!("shaders/fill.vert.wgsl"),
            include_str!("shaders/fill.frag.wgsl"),
        );
        desc.blend = Some(wgpu::BlendState::REPLACE);

        let program = ShaderProgram::build(ctx, &desc)?;
        let uniform = UniformBinding::new(
            ctx,
            &program,
            "fill",
            bytemuck::bytes_of(&FillUniform { color: [0.0; 4] }),
        )?;

        Ok(Self { program, uniform })
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, color: Color) {
        self.uniform.write(
            ctx.queue,
            bytemuck::bytes_of(&FillUniform { color: color.to_array() }),
        );

        let Some(mut rpass) = target.canvas_pass(ctx, "primer fill pass") else { return };
        rpass.set_pipeline(self.program.pipeline());
        self.uniform.bind(&mut rpass);
        rpass.draw(0..3, 0..1);
    }
}
