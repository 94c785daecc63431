//! Lesson library.
//!
//! Each lesson is a [`primer_engine::core::App`] with its own state; the
//! binaries under `src/bin` only set up logging and run one of them.

pub mod canvas;
pub mod clear_canvas;
pub mod hello_point;
pub mod multi_point;
pub mod click_points;
