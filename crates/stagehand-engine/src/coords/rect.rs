use super::Vec2;

/// Axis-aligned rectangle in pixels (top-left origin).
///
/// Used for sprite sheet source regions and actor bounds.
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
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Rectangle of `size` centered on `center`.
    #[inline]
    pub fn centered_at(center: Vec2, size: Vec2) -> Self {
        Self::from_origin_size(center - size / 2.0, size)
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
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.size / 2.0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.origin.x && p.y >= self.origin.y && p.x < max.x && p.y < max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_has_expected_origin() {
        let r = Rect::centered_at(Vec2::new(50.0, 40.0), Vec2::new(20.0, 10.0));
        assert_eq!(r.origin, Vec2::new(40.0, 35.0));
        assert_eq!(r.center(), Vec2::new(50.0, 40.0));
    }

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Vec2::new(0.0, 0.0)));
        assert!(r.contains(Vec2::new(9.9, 9.9)));
        assert!(!r.contains(Vec2::new(10.0, 5.0)));
        assert!(!r.contains(Vec2::new(-0.1, 5.0)));
    }

    #[test]
    fn zero_width_is_empty() {
        assert!(Rect::new(3.0, 3.0, 0.0, 4.0).is_empty());
        assert!(!Rect::new(3.0, 3.0, 1.0, 4.0).is_empty());
    }
}
