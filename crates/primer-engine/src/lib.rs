//! Primer engine crate.
//!
//! Owns the platform + GPU runtime pieces the lessons are built from:
//! window/event loop, input translation, wgpu device and surface, shader
//! program building, and the pointer-to-clip-space mapping.

pub mod device;
pub mod window;
pub mod input;
pub mod core;

pub mod logging;
pub mod coords;
pub mod paint;
pub mod points;
pub mod render;
