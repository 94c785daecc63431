//! Two-stage shader programs.

mod interface;

pub use interface::{AttributeInfo, ProgramInterface, UniformLocation, FRAGMENT_ENTRY, VERTEX_ENTRY};

use crate::render::{premul_alpha_blend, ProgramError, RenderCtx};

/// One vertex buffer slot and the attributes it feeds, tightly packed in
/// the order listed.
#[derive(Debug, Copy, Clone)]
pub struct VertexBufferDesc<'a> {
    pub step_mode: wgpu::VertexStepMode,
    pub attributes: &'a [&'a str],
}

impl<'a> VertexBufferDesc<'a> {
    pub const fn per_vertex(attributes: &'a [&'a str]) -> Self {
        Self { step_mode: wgpu::VertexStepMode::Vertex, attributes }
    }

    pub const fn per_instance(attributes: &'a [&'a str]) -> Self {
        Self { step_mode: wgpu::VertexStepMode::Instance, attributes }
    }
}

/// Everything needed to build a [`ShaderProgram`].
#[derive(Debug, Clone)]
pub struct ProgramDesc<'a> {
    pub label: &'a str,
    pub vertex_source: &'a str,
    pub fragment_source: &'a str,
    pub topology: wgpu::PrimitiveTopology,
    pub buffers: &'a [VertexBufferDesc<'a>],
    pub blend: Option<wgpu::BlendState>,
}

impl<'a> ProgramDesc<'a> {
    /// Triangle list, no vertex buffers, premultiplied-alpha blending.
    pub fn new(label: &'a str, vertex_source: &'a str, fragment_source: &'a str) -> Self {
        Self {
            label,
            vertex_source,
            fragment_source,
            topology: wgpu::PrimitiveTopology::TriangleList,
            buffers: &[],
            blend: Some(premul_alpha_blend()),
        }
    }

    pub fn with_buffers(mut self, buffers: &'a [VertexBufferDesc<'a>]) -> Self {
        self.buffers = buffers;
        self
    }

    pub fn with_topology(mut self, topology: wgpu::PrimitiveTopology) -> Self {
        self.topology = topology;
        self
    }
}

/// A resolved vertex buffer layout with owned attribute storage.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BufferLayout {
    pub stride: u64,
    pub step_mode: wgpu::VertexStepMode,
    pub attributes: Vec<wgpu::VertexAttribute>,
}

impl BufferLayout {
    fn as_wgpu(&self) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: self.stride,
            step_mode: self.step_mode,
            attributes: &self.attributes,
        }
    }
}

/// Looks up every named attribute and lays the buffers out.
///
/// Fails when a name has no matching vertex input, when an input is named
/// twice, or when a vertex input is left without a buffer to read from.
pub(crate) fn resolve_buffers(
    iface: &ProgramInterface,
    buffers: &[VertexBufferDesc<'_>],
) -> Result<Vec<BufferLayout>, ProgramError> {
    let mut fed: Vec<u32> = Vec::new();
    let mut layouts = Vec::with_capacity(buffers.len());

    for desc in buffers {
        let mut offset = 0u64;
        let mut attributes = Vec::with_capacity(desc.attributes.len());

        for name in desc.attributes {
            let info = iface
                .attribute(name)
                .ok_or_else(|| ProgramError::MissingAttribute((*name).to_string()))?;
            if fed.contains(&info.location) {
                return Err(ProgramError::DuplicateAttribute(info.name.clone()));
            }

            attributes.push(wgpu::VertexAttribute {
                format: info.format,
                offset,
                shader_location: info.location,
            });
            offset += info.format.size();
            fed.push(info.location);
        }

        layouts.push(BufferLayout {
            stride: offset,
            step_mode: desc.step_mode,
            attributes,
        });
    }

    if let Some(unfed) = iface.attributes().iter().find(|a| !fed.contains(&a.location)) {
        return Err(ProgramError::UnboundAttribute {
            name: unfed.name.clone(),
            location: unfed.location,
        });
    }

    Ok(layouts)
}

/// A compiled, linked vertex + fragment pair and its render pipeline.
pub struct ShaderProgram {
    label: String,
    interface: ProgramInterface,
    pipeline: wgpu::RenderPipeline,
}

impl ShaderProgram {
    /// Compiles both stages, links them, resolves the vertex buffer layout
    /// by attribute name, and creates the pipeline for the surface format.
    pub fn build(ctx: &RenderCtx<'_>, desc: &ProgramDesc<'_>) -> Result<Self, ProgramError> {
        let interface = ProgramInterface::validate(desc.vertex_source, desc.fragment_source)?;
        let layouts = resolve_buffers(&interface, desc.buffers)?;
        let buffers: Vec<wgpu::VertexBufferLayout<'_>> = layouts.iter().map(BufferLayout::as_wgpu).collect();

        let vertex_module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("{} vertex", desc.label)),
            source: wgpu::ShaderSource::Wgsl(desc.vertex_source.into()),
        });
        let fragment_module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("{} fragment", desc.label)),
            source: wgpu::ShaderSource::Wgsl(desc.fragment_source.into()),
        });

        // `layout: None` derives bind group layouts from both stages.
        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(desc.label),
            layout: None,
            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some(VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: &buffers,
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: Some(FRAGMENT_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: desc.blend,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: desc.topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!(
            "built program `{}` ({} attributes, {} vertex buffers)",
            desc.label,
            interface.attributes().len(),
            layouts.len()
        );

        Ok(Self {
            label: desc.label.to_string(),
            interface,
            pipeline,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    /// `@location` of the named vertex input.
    pub fn attribute_location(&self, name: &str) -> Option<u32> {
        self.interface.attribute(name).map(|a| a.location)
    }

    /// Bind point of the named uniform.
    pub fn uniform_location(&self, name: &str) -> Option<UniformLocation> {
        self.interface.uniform(name)
    }
}
