// capture/rect.rs - Screen Geometry
//
// Points and rectangles in monitor pixel coordinates. Selections are built
// from two arbitrary drag corners and always stored normalized.

/// A pixel position relative to the top-left of the captured monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Screen region to capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaptureRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl CaptureRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Build the rectangle spanned by two opposite corners, in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: a.x.abs_diff(b.x),
            height: a.y.abs_diff(b.y),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Exclusive right edge, saturating at `i32::MAX`
    pub fn right(&self) -> i32 {
        i32::try_from(i64::from(self.x) + i64::from(self.width)).unwrap_or(i32::MAX)
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> i32 {
        i32::try_from(i64::from(self.y) + i64::from(self.height)).unwrap_or(i32::MAX)
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Overlap of two rectangles, `None` when they don't touch.
    pub fn intersect(&self, other: &CaptureRect) -> Option<CaptureRect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= x || bottom <= y {
            return None;
        }
        Some(CaptureRect::new(x, y, right.abs_diff(x), bottom.abs_diff(y)))
    }

    /// Clip to a `width x height` surface anchored at the origin.
    pub fn clamp_to(&self, width: u32, height: u32) -> Option<CaptureRect> {
        self.intersect(&CaptureRect::new(0, 0, width, height))
    }

    /// Shrink every side by `amount` pixels.
    pub fn inset(&self, amount: i32) -> CaptureRect {
        let shrink = (amount.max(0) as u32).saturating_mul(2);
        CaptureRect::new(
            self.x + amount,
            self.y + amount,
            self.width.saturating_sub(shrink),
            self.height.saturating_sub(shrink),
        )
    }
}
