//! Core engine-facing contracts.
//!
//! The interface between the runtime (platform loop) and a lesson: the
//! [`App`] trait the lesson implements and the per-frame context it gets.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
