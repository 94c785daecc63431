use crate::coords::Rect;

/// Renderer-facing context (device/queue + surface format + window metrics).
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    pub scale_factor: f32,
    /// Surface size in physical pixels.
    pub physical_size: (u32, u32),
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        scale_factor: f32,
        physical_size: (u32, u32),
    ) -> Self {
        Self {
            device,
            queue,
            surface_format,
            scale_factor,
            physical_size,
        }
    }
}

/// Target for drawing: encoder, color view, and the canvas rectangle
/// (logical pixels) that clip space is mapped onto.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
    pub canvas: Rect,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(
        encoder: &'a mut wgpu::CommandEncoder,
        color_view: &'a wgpu::TextureView,
        canvas: Rect,
    ) -> Self {
        Self {
            encoder,
            color_view,
            canvas,
        }
    }

    /// Begins a pass that loads existing contents and maps clip space onto
    /// the canvas (viewport + scissor).
    ///
    /// Returns `None` when the canvas has no visible area.
    pub fn canvas_pass(&mut self, ctx: &RenderCtx<'_>, label: &str) -> Option<wgpu::RenderPass<'_>> {
        let (x, y, w, h) = self.canvas.to_physical(ctx.scale_factor, ctx.physical_size)?;

        let mut rpass = self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: self.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_viewport(x as f32, y as f32, w as f32, h as f32, 0.0, 1.0);
        rpass.set_scissor_rect(x, y, w, h);
        Some(rpass)
    }
}
