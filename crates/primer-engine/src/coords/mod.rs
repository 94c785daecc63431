//! Coordinate types and the pointer-to-clip-space mapping.
//!
//! Two spaces meet here:
//! - pointer space: logical pixels, origin top-left, +X right, +Y down
//! - clip space (NDC): [-1, 1] per axis, origin at the canvas center, +Y up
//!
//! Renderers take positions already in clip space; [`pointer_to_clip`] is
//! the single place that converts between the two.

mod clip;
mod rect;
mod vec2;

pub use clip::{pointer_to_clip, ClipPoint};
pub use rect::Rect;
pub use vec2::Vec2;
