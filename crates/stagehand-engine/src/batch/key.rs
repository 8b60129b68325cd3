use core::cmp::Ordering;

/// Stable sort key for batched sprites.
///
/// Ordering rules:
/// 1) `depth`: ascending (back-to-front)
/// 2) `order`: ascending (submission order for equal depth)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SortKey {
    pub depth: i32,
    pub order: u32,
}

impl SortKey {
    #[inline]
    pub const fn new(depth: i32, order: u32) -> Self {
        Self { depth, order }
    }
}

impl Ord for SortKey {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.depth.cmp(&other.depth).then(self.order.cmp(&other.order))
    }
}

impl PartialOrd for SortKey {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
