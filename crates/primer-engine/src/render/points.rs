use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::{ClipPoint, Rect};
use crate::paint::Color;
use crate::points::{PointHistory, PointSink};
use crate::render::{
    ProgramDesc, RenderCtx, RenderTarget, SetupError, ShaderProgram, UniformBinding, VertexBuffer,
    VertexBufferDesc,
};

/// Fragment stage shared by every point program: fills with `style.color`.
pub const POINT_FRAGMENT_SOURCE: &str = include_str!("shaders/point.frag.wgsl");

/// Name of the [`PointStyleUniform`] block in point shaders.
pub const POINT_STYLE_UNIFORM: &str = "style";

/// How points are drawn.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointStyle {
    /// Edge length in logical pixels.
    pub size_px: f32,
    pub color: Color,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            size_px: 10.0,
            color: Color::RED,
        }
    }
}

impl PointStyle {
    /// Half the point's extent in clip units for a canvas of the given size.
    ///
    /// One logical pixel spans `2 / width` clip units, so half of `size_px`
    /// pixels is `size_px / width`.
    pub fn half_extent(&self, canvas: Rect) -> [f32; 2] {
        [
            self.size_px / canvas.size.x.max(1.0),
            self.size_px / canvas.size.y.max(1.0),
        ]
    }

    pub fn uniform(&self, canvas: Rect) -> PointStyleUniform {
        PointStyleUniform {
            color: self.color.to_array(),
            half_extent: self.half_extent(canvas),
            pad: [0.0; 2],
        }
    }
}

/// GPU layout of the `PointStyle` WGSL block.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PointStyleUniform {
    pub color: [f32; 4],
    pub half_extent: [f32; 2],
    pub pad: [f32; 2],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadCorner {
    corner: [f32; 2],
}

const QUAD_CORNERS: [QuadCorner; 4] = [
    QuadCorner { corner: [-0.5, -0.5] },
    QuadCorner { corner: [0.5, -0.5] },
    QuadCorner { corner: [0.5, 0.5] },
    QuadCorner { corner: [-0.5, 0.5] },
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

const BUFFERS: [VertexBufferDesc<'static>; 2] = [
    VertexBufferDesc::per_vertex(&["corner"]),
    VertexBufferDesc::per_instance(&["position"]),
];

/// Draws clip-space points as square sprites of a fixed pixel size.
pub struct PointRenderer {
    program: ShaderProgram,
    style: UniformBinding,
    quad_vbo: wgpu::Buffer,
    quad_ibo: wgpu::Buffer,
    instances: VertexBuffer,
}

impl PointRenderer {
    pub fn new(ctx: &RenderCtx<'_>) -> Result<Self, SetupError> {
        let desc = ProgramDesc::new(
            "primer points",
            include_str!("shaders/point.vert.wgsl"),
            POINT_FRAGMENT_SOURCE,
        )
        .with_buffers(&BUFFERS);

        let program = ShaderProgram::build(ctx, &desc)?;
        let style = UniformBinding::new(
            ctx,
            &program,
            POINT_STYLE_UNIFORM,
            bytemuck::bytes_of(&PointStyleUniform::zeroed()),
        )?;

        let quad_vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("primer point quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_CORNERS),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let quad_ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("primer point quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let instances =
            VertexBuffer::from_points(ctx.device, "primer point instances", &[ClipPoint::ORIGIN])?;

        Ok(Self {
            program,
            style,
            quad_vbo,
            quad_ibo,
            instances,
        })
    }

    /// The compiled point program, for attribute and uniform lookups.
    pub fn program(&self) -> &ShaderProgram {
        &self.program
    }

    /// Draws every point of `history` with its own draw call, in insertion
    /// order. Returns the number of draws issued.
    pub fn render_each(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        history: &PointHistory,
        style: PointStyle,
    ) -> usize {
        if history.is_empty() {
            return 0;
        }
        self.instances.upload(ctx.device, ctx.queue, history.as_slice());
        self.write_style(ctx, target.canvas, style);

        let Some(mut rpass) = target.canvas_pass(ctx, "primer points pass") else { return 0 };
        self.bind(&mut rpass, &self.instances);

        history.redraw(&mut InstanceDraw { rpass: &mut rpass })
    }

    /// Draws every point already uploaded to `points` with a single
    /// instanced draw call. Returns the number of draws issued.
    pub fn render_all(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        points: &VertexBuffer,
        style: PointStyle,
    ) -> usize {
        if points.is_empty() {
            return 0;
        }
        self.write_style(ctx, target.canvas, style);

        let Some(mut rpass) = target.canvas_pass(ctx, "primer points pass") else { return 0 };
        self.bind(&mut rpass, points);
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..points.len() as u32);
        1
    }

    fn write_style(&self, ctx: &RenderCtx<'_>, canvas: Rect, style: PointStyle) {
        self.style
            .write(ctx.queue, bytemuck::bytes_of(&style.uniform(canvas)));
    }

    fn bind(&self, rpass: &mut wgpu::RenderPass<'_>, instances: &VertexBuffer) {
        rpass.set_pipeline(self.program.pipeline());
        self.style.bind(rpass);
        rpass.set_vertex_buffer(0, self.quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instances.slice());
        rpass.set_index_buffer(self.quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
    }
}

/// Sink that draws one instance per point.
///
/// The instance buffer already holds the history in order, so the point's
/// index is all the draw needs.
struct InstanceDraw<'p, 'e> {
    rpass: &'p mut wgpu::RenderPass<'e>,
}

impl PointSink for InstanceDraw<'_, '_> {
    fn draw_point(&mut self, index: u32, _point: ClipPoint) {
        self.rpass
            .draw_indexed(0..QUAD_INDICES.len() as u32, 0, index..index + 1);
    }
}

#[cfg(test)]
mod tests {
    use crate::render::ProgramInterface;

    use super::*;

    #[test]
    fn half_extent_is_size_over_canvas_dimension() {
        let style = PointStyle { size_px: 10.0, ..PointStyle::default() };
        assert_eq!(style.half_extent(Rect::from_size(200.0, 100.0)), [0.05, 0.1]);
    }

    #[test]
    fn empty_canvas_does_not_divide_by_zero() {
        let u = PointStyle::default().uniform(Rect::default());
        assert!(u.half_extent.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn uniform_carries_the_color_and_matches_the_wgsl_block() {
        let u = PointStyle::default().uniform(Rect::from_size(200.0, 100.0));
        assert_eq!(u.color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(std::mem::size_of::<PointStyleUniform>(), 32);
    }

    #[test]
    fn quad_buffers_feed_every_point_input() {
        let iface = ProgramInterface::validate(
            include_str!("shaders/point.vert.wgsl"),
            POINT_FRAGMENT_SOURCE,
        )
        .unwrap();
        assert!(crate::render::program::resolve_buffers(&iface, &BUFFERS).is_ok());
        assert!(iface.uniform(POINT_STYLE_UNIFORM).is_some());
    }
}
