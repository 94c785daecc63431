//! Point history.
//!
//! The click-to-draw lesson keeps every point the user has placed and
//! redraws all of them after each new press. History is append-only: there
//! is no removal, eviction or reordering, so insertion order is draw order.

mod history;

pub use history::{PointHistory, PointSink};
