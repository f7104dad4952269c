use super::Rect;

/// Active clip rectangle in region-local coordinates.
///
/// Invariant: after any constructor or refinement, `right >= left` and
/// `bottom >= top`. A zero-area clamp means nothing can be drawn.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ClampBounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl ClampBounds {
    #[inline]
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Clamp covering `x, y, width, height`.
    ///
    /// # Panics
    /// Panics if `width` or `height` is negative.
    pub fn from_rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        assert!(width >= 0.0, "clamp width must be non-negative, got {width}");
        assert!(height >= 0.0, "clamp height must be non-negative, got {height}");
        Self::new(x, y, x + width, y + height)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Intersects with `x, y, width, height`; never widens.
    ///
    /// Disjoint inputs collapse to a zero-area clamp rather than an inverted one.
    pub fn clamp(&self, x: f32, y: f32, width: f32, height: f32) -> ClampBounds {
        let left = self.left.max(x);
        let top = self.top.max(y);
        let right = self.right.min(x + width).max(left);
        let bottom = self.bottom.min(y + height).max(top);
        ClampBounds::new(left, top, right, bottom)
    }

    /// Same clamp translated by an offset.
    #[inline]
    pub fn moved(&self, x_offset: f32, y_offset: f32) -> ClampBounds {
        ClampBounds::new(
            self.left + x_offset,
            self.top + y_offset,
            self.right + x_offset,
            self.bottom + y_offset,
        )
    }

    /// Pulls the right edge in to at most `right`. Never inverts.
    #[inline]
    pub fn with_max_right(mut self, right: f32) -> ClampBounds {
        self.right = self.right.min(right).max(self.left);
        self
    }

    /// Pushes the left edge in to at least `left`. Never inverts.
    #[inline]
    pub fn with_min_left(mut self, left: f32) -> ClampBounds {
        self.left = self.left.max(left).min(self.right);
        self
    }

    /// Pulls the bottom edge in to at most `bottom`. Never inverts.
    #[inline]
    pub fn with_max_bottom(mut self, bottom: f32) -> ClampBounds {
        self.bottom = self.bottom.min(bottom).max(self.top);
        self
    }

    /// Pushes the top edge in to at least `top`. Never inverts.
    #[inline]
    pub fn with_min_top(mut self, top: f32) -> ClampBounds {
        self.top = self.top.max(top).min(self.bottom);
        self
    }

    #[inline]
    pub fn totally_clamped(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    #[inline]
    pub fn to_rect(&self) -> Rect {
        Rect::from_edges(self.left, self.top, self.right, self.bottom)
    }

    /// Intersection of this clamp with `rect`, or `None` when nothing survives.
    #[inline]
    pub fn intersect_rect(&self, rect: Rect) -> Option<Rect> {
        if self.totally_clamped() {
            return None;
        }
        self.to_rect().intersect(rect)
    }
}
