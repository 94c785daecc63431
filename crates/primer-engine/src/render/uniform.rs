use wgpu::util::DeviceExt;

use crate::render::{ProgramError, RenderCtx, ShaderProgram};

/// A uniform buffer bound to a named uniform of a program.
pub struct UniformBinding {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    group: u32,
}

impl UniformBinding {
    /// Looks up `name` in `program` and creates a buffer initialized with
    /// `contents` plus the bind group pointing at it.
    pub fn new(
        ctx: &RenderCtx<'_>,
        program: &ShaderProgram,
        name: &str,
        contents: &[u8],
    ) -> Result<Self, ProgramError> {
        let loc = program
            .uniform_location(name)
            .ok_or_else(|| ProgramError::MissingUniform(name.to_string()))?;

        let label = format!("{} {name}", program.label());

        let buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&label),
            contents,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let layout = program.pipeline().get_bind_group_layout(loc.group);
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&label),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: loc.binding,
                resource: buffer.as_entire_binding(),
            }],
        });

        Ok(Self {
            buffer,
            bind_group,
            group: loc.group,
        })
    }

    pub fn write(&self, queue: &wgpu::Queue, contents: &[u8]) {
        queue.write_buffer(&self.buffer, 0, contents);
    }

    pub fn bind(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_bind_group(self.group, &self.bind_group, &[]);
    }
}
