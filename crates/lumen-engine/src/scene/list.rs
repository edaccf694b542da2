use crate::coords::Rect;

use super::{DrawCmd, SortKey, ZIndex};

/// A single draw item: sort key + command + clip rect.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
    /// Scissor rect in logical pixels. `None` = draw everywhere.
    pub clip_rect: Option<Rect>,
}

/// Recorded effect draws for one frame.
///
/// Items are painted back-to-front by [`SortKey`]. The paint-order index
/// buffer is rebuilt lazily after pushes and reused across frames.
///
/// Clip rects nest: [`push_clip`](Self::push_clip) intersects with the
/// current clip, and every pushed command captures the innermost one.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,
    paint_order: Vec<usize>,
    paint_order_stale: bool,
    clips: Vec<Rect>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops all items and clips, keeping allocations.
    pub fn clear(&mut self) {
        self.items.clear();
        self.paint_order.clear();
        self.clips.clear();
        self.next_order = 0;
        self.paint_order_stale = true;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    /// Records `cmd` on layer `z` under the current clip.
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let key = SortKey::new(z, self.next_order);
        self.next_order = self.next_order.wrapping_add(1);
        self.items.push(DrawItem { key, cmd, clip_rect: self.clips.last().copied() });
        self.paint_order_stale = true;
    }

    /// Starts clipping to `rect` (intersected with the enclosing clip).
    ///
    /// Disjoint nested clips collapse to an empty rect, and backends skip
    /// commands recorded under it.
    pub fn push_clip(&mut self, rect: Rect) {
        let clip = match self.clips.last() {
            Some(parent) => parent.intersect(rect).unwrap_or_default(),
            None => rect,
        };
        self.clips.push(clip);
    }

    /// Ends the innermost clip started by [`push_clip`](Self::push_clip).
    pub fn pop_clip(&mut self) {
        debug_assert!(!self.clips.is_empty(), "pop_clip without matching push_clip");
        self.clips.pop();
    }

    /// Iterates items back-to-front.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        self.refresh_paint_order();
        let items = &self.items;
        self.paint_order.iter().map(move |&i| &items[i])
    }

    fn refresh_paint_order(&mut self) {
        if !self.paint_order_stale {
            return;
        }
        self.paint_order.clear();
        self.paint_order.extend(0..self.items.len());
        let items = &self.items;
        self.paint_order.sort_unstable_by_key(|&i| items[i].key);
        self.paint_order_stale = false;
    }
}
