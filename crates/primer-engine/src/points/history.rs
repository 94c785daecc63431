use crate::coords::ClipPoint;

/// Receives one draw call per point during a redraw.
///
/// `index` is the point's position in the history, which is also its slot in
/// any vertex buffer uploaded from [`PointHistory::as_flat`].
pub trait PointSink {
    fn draw_point(&mut self, index: u32, point: ClipPoint);
}

impl<F> PointSink for F
where
    F: FnMut(u32, ClipPoint),
{
    fn draw_point(&mut self, index: u32, point: ClipPoint) {
        self(index, point)
    }
}

/// Ordered, append-only sequence of clip-space points.
#[derive(Debug, Default, Clone)]
pub struct PointHistory {
    points: Vec<ClipPoint>,
}

impl PointHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a point and returns the new length.
    pub fn push(&mut self, point: ClipPoint) -> usize {
        self.points.push(point);
        self.points.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn last(&self) -> Option<ClipPoint> {
        self.points.last().copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[ClipPoint] {
        &self.points
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = ClipPoint> + '_ {
        self.points.iter().copied()
    }

    /// The history as interleaved `x, y` pairs. Always even in length.
    #[inline]
    pub fn as_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.points)
    }

    /// Issues one draw per point, in insertion order. Returns the draw count.
    pub fn redraw(&self, sink: &mut impl PointSink) -> usize {
        for (i, p) in self.points.iter().enumerate() {
            sink.draw_point(i as u32, *p);
        }
        self.points.len()
    }
}

impl Extend<ClipPoint> for PointHistory {
    fn extend<T: IntoIterator<Item = ClipPoint>>(&mut self, iter: T) {
        self.points.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn presses() -> Vec<ClipPoint> {
        vec![
            ClipPoint::new(0.5, 0.5),
            ClipPoint::new(-0.25, 0.75),
            ClipPoint::new(0.0, -1.0),
            ClipPoint::new(0.5, 0.5),
        ]
    }

    #[test]
    fn push_grows_by_one() {
        let mut h = PointHistory::new();
        assert!(h.is_empty());
        for (i, p) in presses().into_iter().enumerate() {
            assert_eq!(h.push(p), i + 1);
        }
        assert_eq!(h.len(), 4);
        assert_eq!(h.last(), Some(ClipPoint::new(0.5, 0.5)));
    }

    #[test]
    fn flat_view_is_even_and_interleaved() {
        let mut h = PointHistory::new();
        h.extend(presses());
        let flat = h.as_flat();
        assert_eq!(flat.len(), 2 * h.len());
        assert_eq!(&flat[..4], &[0.5, 0.5, -0.25, 0.75]);
    }

    #[test]
    fn redraw_draws_each_point_once_in_order() {
        let mut h = PointHistory::new();
        h.extend(presses());

        let mut drawn = Vec::new();
        let count = h.redraw(&mut |i: u32, p: ClipPoint| drawn.push((i, p)));

        assert_eq!(count, 4);
        let expected: Vec<(u32, ClipPoint)> = presses()
            .into_iter()
            .enumerate()
            .map(|(i, p)| (i as u32, p))
            .collect();
        assert_eq!(drawn, expected);
    }

    #[test]
    fn redraw_of_empty_history_draws_nothing() {
        let h = PointHistory::new();
        let mut calls = 0;
        assert_eq!(h.redraw(&mut |_: u32, _: ClipPoint| calls += 1), 0);
        assert_eq!(calls, 0);
    }

    #[test]
    fn every_redraw_repeats_the_full_history() {
        let mut h = PointHistory::new();
        let mut total = 0;
        for p in presses() {
            h.push(p);
            total += h.redraw(&mut |_: u32, _: ClipPoint| {});
        }
        // 1 + 2 + 3 + 4
        assert_eq!(total, 10);
    }
}
