use crate::coords::{Rect, Vec2};

use super::{DrawCmd, SortKey, ZIndex};

/// A recorded command, where it sorts, and the scissor it was recorded under.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
    /// Content-local logical px; `None` for the whole content area.
    pub clip_rect: Option<Rect>,
}

/// Commands recorded for one frame.
///
/// Renderers read them back in paint order: ascending [`ZIndex`], ties in
/// recording order. Clips nest; each one is cut down to its parent.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    clips: Vec<Rect>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets all commands and open clips, keeping allocations.
    pub fn clear(&mut self) {
        self.items.clear();
        self.clips.clear();
    }

    /// Recording order.
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let order = self.items.len() as u32;
        self.items.push(DrawItem {
            key: SortKey::new(z, order),
            cmd,
            clip_rect: self.clips.last().copied(),
        });
    }

    /// Clips everything recorded until the matching [`DrawList::pop_clip`]
    /// to `rect`, inside whatever clip is already open.
    pub fn push_clip(&mut self, rect: Rect) {
        let clip = match self.clips.last() {
            // Disjoint from the parent: keep a zero-area clip so draws are dropped.
            Some(parent) => parent.intersect(rect).unwrap_or(Rect { origin: rect.origin, size: Vec2::ZERO }),
            None => rect,
        };
        self.clips.push(clip);
    }

    pub fn pop_clip(&mut self) {
        if self.clips.pop().is_none() {
            log::warn!("pop_clip without a matching push_clip");
        }
    }

    pub fn iter_in_paint_order(&self) -> impl Iterator<Item = &DrawItem> {
        let mut sorted: Vec<&DrawItem> = self.items.iter().collect();
        sorted.sort_unstable_by_key(|item| item.key);
        sorted.into_iter()
    }
}
