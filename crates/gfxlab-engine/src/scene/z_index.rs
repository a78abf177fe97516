/// Paint layer of a draw item; higher values appear on top.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct ZIndex(pub i32);

impl ZIndex {
    /// Scene geometry.
    pub const SCENE: ZIndex = ZIndex(0);
    /// Helpers drawn over the scene (axes, previews, markers).
    pub const GUIDES: ZIndex = ZIndex(10);
    /// Screen-space text.
    pub const OVERLAY: ZIndex = ZIndex(1000);

    #[inline]
    pub const fn new(v: i32) -> Self {
        Self(v)
    }
}
