use super::ZIndex;

/// Stable sort key for draw items.
///
/// Field order matters: the derived ordering compares `z` first, then
/// `order` (insertion index), so equal layers keep recording order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SortKey {
    pub z: ZIndex,
    pub order: u32,
}

impl SortKey {
    #[inline]
    pub const fn new(z: ZIndex, order: u32) -> Self {
        Self { z, order }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_wins_over_insertion_order() {
        assert!(SortKey::new(ZIndex(0), 9) < SortKey::new(ZIndex(1), 0));
        assert!(SortKey::new(ZIndex::OVERLAY, 0) > SortKey::new(ZIndex::GUIDES, 5));
    }

    #[test]
    fn insertion_order_breaks_ties() {
        assert!(SortKey::new(ZIndex(3), 1) < SortKey::new(ZIndex(3), 2));
    }
}
