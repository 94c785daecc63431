use std::fmt::Display;

use primer_engine::coords::Rect;
use primer_engine::input::{InputFrame, Key};

/// GPU resources a lesson builds on its first frame.
///
/// A failed setup is logged once and never retried; the lesson keeps
/// running and only clears.
#[derive(Debug)]
pub enum Setup<T> {
    Pending,
    Ready(T),
    Failed,
}

impl<T> Default for Setup<T> {
    fn default() -> Self {
        Setup::Pending
    }
}

impl<T> Setup<T> {
    /// Runs `init` on the first call, then returns the cached result.
    pub fn get_or_init<E, F>(&mut self, lesson: &str, init: F) -> Option<&mut T>
    where
        E: Display,
        F: FnOnce() -> Result<T, E>,
    {
        if matches!(self, Setup::Pending) {
            *self = match init() {
                Ok(value) => {
                    log::info!("{lesson}: setup complete");
                    Setup::Ready(value)
                }
                Err(e) => {
                    log::error!("{lesson}: setup failed: {e}");
                    Setup::Failed
                }
            };
        }

        match self {
            Setup::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Setup::Failed)
    }
}

/// The canvas inside a window of `bounds`, `inset` logical pixels in from
/// every edge. Negative insets count as zero.
pub fn canvas_rect(bounds: Rect, inset: f32) -> Rect {
    bounds.inset(inset.max(0.0))
}

/// True when `Escape` went down this frame.
pub fn escape_pressed(frame: &InputFrame) -> bool {
    frame.keys_pressed.contains(&Key::Escape)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Boom;

    impl Display for Boom {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("boom")
        }
    }

    #[test]
    fn setup_runs_init_once() {
        let mut setup = Setup::<u32>::Pending;
        let mut calls = 0;

        for _ in 0..3 {
            let v = setup.get_or_init("test", || {
                calls += 1;
                Ok::<_, Boom>(7)
            });
            assert_eq!(v.copied(), Some(7));
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn failed_setup_is_not_retried() {
        let mut setup = Setup::<u32>::Pending;
        assert!(setup.get_or_init("test", || Err(Boom)).is_none());
        assert!(setup.is_failed());

        let retried = setup.get_or_init("test", || Ok::<_, Boom>(1));
        assert!(retried.is_none());
    }

    #[test]
    fn canvas_is_inset_from_window() {
        let canvas = canvas_rect(Rect::from_size(640.0, 480.0), 20.0);
        assert_eq!(canvas, Rect::new(20.0, 20.0, 600.0, 440.0));
    }

    #[test]
    fn tiny_window_gives_empty_canvas() {
        let canvas = canvas_rect(Rect::from_size(30.0, 30.0), 20.0);
        assert!(canvas.is_empty());
        assert!(canvas.size.x >= 0.0 && canvas.size.y >= 0.0);
    }

    #[test]
    fn escape_is_detected() {
        let mut frame = InputFrame::default();
        assert!(!escape_pressed(&frame));
        frame.keys_pressed.insert(Key::Escape);
        assert!(escape_pressed(&frame));
    }
}
