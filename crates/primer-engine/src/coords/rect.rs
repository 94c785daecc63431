use super::{pointer_to_clip, ClipPoint, Vec2};

/// Axis-aligned rectangle in logical pixels (top-left origin).
///
/// Lessons use it for the canvas: the window region the rasterizer draws
/// into and that pointer presses are tested against.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_size(w: f32, h: f32) -> Self {
        Self::new(0.0, 0.0, w, h)
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(
            self.origin.x + self.size.x / 2.0,
            self.origin.y + self.size.y / 2.0,
        )
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let mut x = self.origin.x;
        let mut y = self.origin.y;
        let mut w = self.size.x;
        let mut h = self.size.y;

        if w < 0.0 {
            x += w;
            w = -w;
        }
        if h < 0.0 {
            y += h;
            h = -h;
        }

        Rect::new(x, y, w, h)
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let r = self.normalized();
        p.x >= r.origin.x
            && p.y >= r.origin.y
            && p.x < (r.origin.x + r.size.x)
            && p.y < (r.origin.y + r.size.y)
    }

    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let a = self.normalized();
        let b = other.normalized();

        let x0 = a.origin.x.max(b.origin.x);
        let y0 = a.origin.y.max(b.origin.y);
        let x1 = (a.origin.x + a.size.x).min(b.origin.x + b.size.x);
        let y1 = (a.origin.y + a.size.y).min(b.origin.y + b.size.y);

        let w = x1 - x0;
        let h = y1 - y0;

        if w <= 0.0 || h <= 0.0 {
            None
        } else {
            Some(Rect::new(x0, y0, w, h))
        }
    }

    /// Shrinks the rectangle by `margin` on every side, never below zero size.
    #[inline]
    pub fn inset(self, margin: f32) -> Rect {
        let w = (self.size.x - 2.0 * margin).max(0.0);
        let h = (self.size.y - 2.0 * margin).max(0.0);
        Rect::new(self.origin.x + margin, self.origin.y + margin, w, h)
    }

    /// Maps a pointer position to clip space relative to this rectangle.
    #[inline]
    pub fn to_clip(self, pixel: Vec2) -> ClipPoint {
        pointer_to_clip(pixel, self.origin, self.size.x, self.size.y)
    }

    /// Converts to physical pixels `(x, y, w, h)`, clamped to `bounds`.
    ///
    /// Returns `None` when nothing of the rectangle is left, so callers can
    /// skip the draw instead of handing wgpu a zero-area scissor.
    pub fn to_physical(self, scale: f32, bounds: (u32, u32)) -> Option<(u32, u32, u32, u32)> {
        let r = self.normalized();
        let (bw, bh) = bounds;

        let x0 = ((r.origin.x * scale).max(0.0) as u32).min(bw);
        let y0 = ((r.origin.y * scale).max(0.0) as u32).min(bh);
        let x1 = (((r.origin.x + r.size.x) * scale).max(0.0) as u32).min(bw);
        let y1 = (((r.origin.y + r.size.y) * scale).max(0.0) as u32).min(bh);

        let (w, h) = (x1.saturating_sub(x0), y1.saturating_sub(y0));
        if w == 0 || h == 0 { None } else { Some((x0, y0, w, h)) }
    }
}
