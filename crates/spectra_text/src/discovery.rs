//! System font lookup.
//!
//! CJK-capable faces first so both overlay languages render; DejaVu is the
//! Latin-only last resort.

use std::path::{Path, PathBuf};

/// Candidate font files in preference order.
pub const CANDIDATE_FONTS: &[&str] = &[
    r"C:\Windows\Fonts\msyh.ttc",
    r"C:\Windows\Fonts\Microsoft YaHei UI.ttf",
    r"C:\Windows\Fonts\Microsoft YaHei.ttf",
    r"C:\Windows\Fonts\simhei.ttf",
    r"C:\Windows\Fonts\simsun.ttc",
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/STHeiti Light.ttc",
    "/usr/share/fonts/truetype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/noto/NotoSansCJKsc-Regular.otf",
    "/usr/share/fonts/opentype/noto/NotoSansCJKsc-Regular.otf",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
];

/// Smallest overlay font size, px.
pub const MIN_FONT_PX: u32 = 16;
/// Largest overlay font size, px.
pub const MAX_FONT_PX: u32 = 40;

/// First candidate for which `exists` holds.
pub fn find_font_with<F>(candidates: &[&str], exists: F) -> Option<PathBuf>
where
    F: Fn(&Path) -> bool,
{
    candidates
        .iter()
        .map(Path::new)
        .find(|path| exists(path))
        .map(Path::to_path_buf)
}

/// First installed font from [`CANDIDATE_FONTS`].
#[must_use]
pub fn find_system_font() -> Option<PathBuf> {
    find_font_with(CANDIDATE_FONTS, Path::is_file)
}

/// Overlay pixel height for a surface `surface_height` pixels tall.
#[must_use]
pub fn font_pixel_size(surface_height: u32) -> u32 {
    (surface_height / 90).clamp(MIN_FONT_PX, MAX_FONT_PX)
}
