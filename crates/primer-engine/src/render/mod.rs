//! GPU rendering subsystem.
//!
//! Everything here works in clip space: callers hand over positions that are
//! already in [-1, 1] and the canvas viewport maps them onto the window.
//!
//! - [`ShaderProgram`] compiles and links a vertex + fragment WGSL pair and
//!   answers attribute/uniform lookups by name.
//! - [`VertexBuffer`] and [`UniformBinding`] hold uploaded data.
//! - [`FillRenderer`] and [`PointRenderer`] are the two ready-made renderers
//!   the lessons share.

mod buffer;
mod ctx;
mod error;
mod fill;
mod points;
mod program;
mod uniform;

pub use buffer::VertexBuffer;
pub use ctx::{RenderCtx, RenderTarget};
pub use error::{BufferError, ProgramError, SetupError, Stage};
pub use fill::FillRenderer;
pub use points::{
    PointRenderer, PointStyle, PointStyleUniform, POINT_FRAGMENT_SOURCE, POINT_STYLE_UNIFORM,
};
pub use program::{
    AttributeInfo, ProgramDesc, ProgramInterface, ShaderProgram, UniformLocation, VertexBufferDesc,
    FRAGMENT_ENTRY, VERTEX_ENTRY,
};
pub use uniform::UniformBinding;

pub(crate) fn premul_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}
