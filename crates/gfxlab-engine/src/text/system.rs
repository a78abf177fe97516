/// Locations probed by [`load_system_font`], in order.
pub const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Bytes of the first readable font in [`SYSTEM_FONT_PATHS`].
pub fn load_system_font() -> Option<Vec<u8>> {
    first_readable(SYSTEM_FONT_PATHS)
}

fn first_readable(paths: &[&str]) -> Option<Vec<u8>> {
    paths.iter().find_map(|p| {
        let bytes = std::fs::read(p).ok()?;
        log::debug!("using system font {p}");
        Some(bytes)
    })
}
