use bytemuck::{Pod, Zeroable};

use super::Vec2;

/// A position in clip space (normalized device coordinates).
///
/// Laid out as two `f32` so a slice of points can be uploaded to a vertex
/// buffer without conversion.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct ClipPoint {
    pub x: f32,
    pub y: f32,
}

impl ClipPoint {
    pub const ORIGIN: ClipPoint = ClipPoint::new(0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// True when the point lies inside the visible [-1, 1] square.
    #[inline]
    pub fn is_on_canvas(self) -> bool {
        (-1.0..=1.0).contains(&self.x) && (-1.0..=1.0).contains(&self.y)
    }

    #[inline]
    pub fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }
}

impl From<[f32; 2]> for ClipPoint {
    fn from([x, y]: [f32; 2]) -> Self {
        Self::new(x, y)
    }
}

/// Maps a pointer position to clip space.
///
/// `rect_origin` is the canvas' top-left corner in the same space as `pixel`;
/// `width`/`height` are the canvas dimensions. Positions inside the canvas
/// map into [-1, 1]; positions outside map beyond it. Y is flipped so that
/// up on screen is +Y in clip space.
#[inline]
pub fn pointer_to_clip(pixel: Vec2, rect_origin: Vec2, width: f32, height: f32) -> ClipPoint {
    let half_w = width / 2.0;
    let half_h = height / 2.0;

    let x = ((pixel.x - rect_origin.x) - half_w) / half_w;
    let y = (half_h - (pixel.y - rect_origin.y)) / half_h;

    ClipPoint::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    fn close(a: ClipPoint, b: ClipPoint) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    #[test]
    fn center_maps_to_origin() {
        let p = pointer_to_clip(Vec2::new(100.0, 50.0), Vec2::zero(), 200.0, 100.0);
        assert!(close(p, ClipPoint::ORIGIN), "{p:?}");
    }

    #[test]
    fn center_of_offset_rect_maps_to_origin() {
        let origin = Vec2::new(40.0, 30.0);
        let p = pointer_to_clip(Vec2::new(140.0, 80.0), origin, 200.0, 100.0);
        assert!(close(p, ClipPoint::ORIGIN), "{p:?}");
    }

    #[test]
    fn top_left_corner_maps_to_minus_one_plus_one() {
        let origin = Vec2::new(12.0, 7.0);
        let p = pointer_to_clip(origin, origin, 320.0, 240.0);
        assert!(close(p, ClipPoint::new(-1.0, 1.0)), "{p:?}");
    }

    #[test]
    fn bottom_right_corner_maps_to_plus_one_minus_one() {
        let origin = Vec2::new(12.0, 7.0);
        let p = pointer_to_clip(Vec2::new(12.0 + 320.0, 7.0 + 240.0), origin, 320.0, 240.0);
        assert!(close(p, ClipPoint::new(1.0, -1.0)), "{p:?}");
    }

    #[test]
    fn quarter_point_scenario() {
        let p = pointer_to_clip(Vec2::new(150.0, 25.0), Vec2::zero(), 200.0, 100.0);
        assert!(close(p, ClipPoint::new(0.5, 0.5)), "{p:?}");
    }

    #[test]
    fn y_axis_is_flipped() {
        let above = pointer_to_clip(Vec2::new(100.0, 10.0), Vec2::zero(), 200.0, 100.0);
        let below = pointer_to_clip(Vec2::new(100.0, 90.0), Vec2::zero(), 200.0, 100.0);
        assert!(above.y > 0.0);
        assert!(below.y < 0.0);
    }

    #[test]
    fn identical_inputs_give_identical_outputs() {
        let args = (Vec2::new(73.5, 18.25), Vec2::new(3.0, 4.0), 640.0, 480.0);
        let a = pointer_to_clip(args.0, args.1, args.2, args.3);
        let b = pointer_to_clip(args.0, args.1, args.2, args.3);
        assert_eq!(a, b);
    }

    #[test]
    fn inside_rect_stays_on_canvas_and_outside_does_not() {
        let inside = pointer_to_clip(Vec2::new(199.0, 99.0), Vec2::zero(), 200.0, 100.0);
        let outside = pointer_to_clip(Vec2::new(250.0, 50.0), Vec2::zero(), 200.0, 100.0);
        assert!(inside.is_on_canvas());
        assert!(!outside.is_on_canvas());
        assert!((outside.x - 1.5).abs() < EPS);
    }

    #[test]
    fn points_flatten_to_pairs() {
        let pts = [ClipPoint::new(0.5, -0.25), ClipPoint::new(-1.0, 1.0)];
        let flat: &[f32] = bytemuck::cast_slice(&pts);
        assert_eq!(flat, &[0.5, -0.25, -1.0, 1.0]);
    }
}
