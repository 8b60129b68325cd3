use std::sync::Arc;

use crate::content::Texture2D;
use crate::coords::Vec2;
use crate::paint::Color;

use super::{SortKey, Sprite};

/// A batched sprite with its sort key.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchItem {
    pub key: SortKey,
    pub sprite: Sprite,
}

/// Immediate-mode sprite recorder for one frame.
///
/// `begin()` drops whatever the previous frame recorded, `draw*()` appends,
/// `end()` seals the frame for presentation. Nothing persists across frames.
///
/// Performance characteristics:
/// - `draw()` is O(1)
/// - paint-order iteration reuses an internal index buffer
#[derive(Debug, Default)]
pub struct SpriteBatch {
    items: Vec<BatchItem>,
    next_order: u32,
    drawing: bool,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,
}

impl SpriteBatch {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new frame, discarding previously recorded sprites.
    pub fn begin(&mut self) {
        debug_assert!(!self.drawing, "SpriteBatch::begin called twice without end");
        self.items.clear();
        self.next_order = 0;
        self.sorted_indices.clear();
        self.sorted_dirty = true;
        self.drawing = true;
    }

    /// Seals the frame. Recorded items stay readable until the next `begin`.
    pub fn end(&mut self) {
        debug_assert!(self.drawing, "SpriteBatch::end called without begin");
        self.drawing = false;
    }

    /// Draws the whole texture with its top-left corner at `position`.
    pub fn draw(&mut self, texture: &Arc<Texture2D>, position: Vec2, tint: Color) {
        self.draw_sprite(Sprite::new(texture, position).tint(tint));
    }

    pub fn draw_sprite(&mut self, sprite: Sprite) {
        debug_assert!(self.drawing, "SpriteBatch::draw outside begin/end");

        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.items.push(BatchItem {
            key: SortKey::new(sprite.depth, order),
            sprite,
        });
        self.sorted_dirty = true;
    }

    /// Items in submission order.
    #[inline]
    pub fn items(&self) -> &[BatchItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates items back-to-front without cloning sprites.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &BatchItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }
        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());

        // SortKey carries the submission order, so this is stable.
        self.sorted_indices
            .sort_unstable_by(|&a, &b| self.items[a].key.cmp(&self.items[b].key));

        self.sorted_dirty = false;
    }
}
