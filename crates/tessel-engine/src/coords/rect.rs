use super::Vec2;

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

    /// Builds a rectangle from its edges. Inverted edges produce a negative size.
    #[inline]
    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    #[inline]
    pub fn x(self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn y(self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(self) -> f32 {
        self.size.y
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

    #[inline]
    pub fn translated(self, offset: Vec2) -> Self {
        Self { origin: self.origin + offset, size: self.size }
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
        p.x >= r.origin.x && p.y >= r.origin.y && p.x < r.right() && p.y < r.bottom()
    }

    /// True when `other` lies entirely inside `self`.
    #[inline]
    pub fn contains_rect(self, other: Rect) -> bool {
        other.x() >= self.x()
            && other.y() >= self.y()
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Overlap with positive area. Rectangles sharing only an edge do not overlap.
    #[inline]
    pub fn overlaps(self, other: Rect) -> bool {
        self.intersect(other).is_some()
    }

    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let a = self.normalized();
        let b = other.normalized();

        let x0 = a.origin.x.max(b.origin.x);
        let y0 = a.origin.y.max(b.origin.y);
        let x1 = a.right().min(b.right());
        let y1 = a.bottom().min(b.bottom());

        let w = x1 - x0;
        let h = y1 - y0;

        if w <= 0.0 || h <= 0.0 {
            None
        } else {
            Some(Rect::new(x0, y0, w, h))
        }
    }

    /// Smallest rectangle covering both inputs.
    #[inline]
    pub fn union(self, other: Rect) -> Rect {
        let a = self.normalized();
        let b = other.normalized();
        Rect::from_edges(
            a.x().min(b.x()),
            a.y().min(b.y()),
            a.right().max(b.right()),
            a.bottom().max(b.bottom()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(x, y, w, h)
    }

    #[test]
    fn normalized_flips_negative_extent() {
        let n = r(10.0, 10.0, -4.0, -3.0).normalized();
        assert_eq!(n, r(6.0, 7.0, 4.0, 3.0));
    }

    #[test]
    fn contains_is_half_open() {
        let rect = r(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Vec2::new(0.0, 0.0)));
        assert!(!rect.contains(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn intersect_overlapping() {
        let i = r(0.0, 0.0, 10.0, 10.0).intersect(r(5.0, 5.0, 10.0, 10.0));
        assert_eq!(i, Some(r(5.0, 5.0, 5.0, 5.0)));
    }

    #[test]
    fn shared_edge_is_not_an_overlap() {
        assert!(!r(0.0, 0.0, 10.0, 10.0).overlaps(r(10.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn union_covers_both() {
        let u = r(0.0, 0.0, 5.0, 5.0).union(r(10.0, -2.0, 5.0, 5.0));
        assert_eq!(u, r(0.0, -2.0, 15.0, 7.0));
    }

    #[test]
    fn contains_rect_checks_all_edges() {
        let outer = r(0.0, 0.0, 100.0, 100.0);
        assert!(outer.contains_rect(r(10.0, 10.0, 20.0, 20.0)));
        assert!(!outer.contains_rect(r(90.0, 10.0, 20.0, 20.0)));
    }
}
