use super::{Vec2, Viewport};

/// Axis-aligned rectangle in logical pixels (top-left origin).
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
    pub fn right(self) -> f32 {
        self.origin.x + self.size.x
    }

    #[inline]
    pub fn bottom(self) -> f32 {
        self.origin.y + self.size.y
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        p.x >= self.origin.x && p.y >= self.origin.y && p.x < self.right() && p.y < self.bottom()
    }

    /// Shrinks the rectangle by `d` on every side. Never produces a negative size.
    pub fn inset(self, d: f32) -> Rect {
        Rect::new(
            self.origin.x + d,
            self.origin.y + d,
            (self.size.x - 2.0 * d).max(0.0),
            (self.size.y - 2.0 * d).max(0.0),
        )
    }

    /// Snaps both corners to the physical pixel grid for `scale`.
    pub fn snapped(self, scale: f32) -> Rect {
        let min = self.origin.snapped(scale);
        let max = Vec2::new(self.right(), self.bottom()).snapped(scale);
        let size = max - min;
        Rect::new(min.x, min.y, size.x, size.y)
    }

    /// Clips the rectangle to the visible viewport; `None` when nothing is left.
    pub fn clip_to(self, viewport: Viewport) -> Option<Rect> {
        let x0 = self.origin.x.max(0.0);
        let y0 = self.origin.y.max(0.0);
        let x1 = self.right().min(viewport.width);
        let y1 = self.bottom().min(viewport.height);

        if x1 <= x0 || y1 <= y0 {
            None
        } else {
            Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
        }
    }
}
