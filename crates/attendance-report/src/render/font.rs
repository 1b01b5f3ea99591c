//! Font resolution with a built-in fallback.
//!
//! The preferred TrueType file is looked up once, when the renderer is built.
//! If none of the candidates can be read and parsed, text is drawn with the
//! bitmap glyphs in [`super::glyphs`], which are always available.

use std::path::{Path, PathBuf};

use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use tracing::{debug, warn};

use super::glyphs::{glyph, GLYPH_HEIGHT, GLYPH_WIDTH};

/// Fonts tried when no explicit path is configured.
pub const DEFAULT_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
];

/// Which kind of font a renderer ended up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontKind {
    TrueType,
    Bitmap,
}

/// A resolved font.
pub enum FontAsset {
    TrueType { font: FontVec, path: PathBuf },
    Bitmap,
}

impl std::fmt::Debug for FontAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FontAsset::TrueType { path, .. } => f.debug_tuple("TrueType").field(path).finish(),
            FontAsset::Bitmap => f.write_str("Bitmap"),
        }
    }
}

impl FontAsset {
    /// Use the first candidate that loads, else the bitmap font.
    pub fn resolve<P: AsRef<Path>>(candidates: &[P]) -> Self {
        for path in candidates {
            let path = path.as_ref();
            match load_truetype(path) {
                Ok(font) => {
                    debug!(path = %path.display(), "Loaded report font");
                    return FontAsset::TrueType {
                        font,
                        path: path.to_path_buf(),
                    };
                }
                Err(reason) => debug!(path = %path.display(), %reason, "Font unavailable"),
            }
        }
        warn!("No report font available, using built-in bitmap font");
        FontAsset::Bitmap
    }

    pub fn kind(&self) -> FontKind {
        match self {
            FontAsset::TrueType { .. } => FontKind::TrueType,
            FontAsset::Bitmap => FontKind::Bitmap,
        }
    }

    /// Width and height of `text` at `size` pixels.
    pub fn measure(&self, text: &str, size: f32) -> (u32, u32) {
        match self {
            FontAsset::TrueType { font, .. } => text_size(PxScale::from(size), font, text),
            FontAsset::Bitmap => {
                let dot = bitmap_dot(size);
                let count = text.chars().count() as u32;
                let width = if count == 0 {
                    0
                } else {
                    (count * (GLYPH_WIDTH + 1) - 1) * dot
                };
                (width, GLYPH_HEIGHT * dot)
            }
        }
    }

    /// Draw `text` with its top-left corner at (`x`, `y`).
    pub fn draw(&self, image: &mut RgbImage, text: &str, x: i32, y: i32, size: f32, color: Rgb<u8>) {
        match self {
            FontAsset::TrueType { font, .. } => {
                draw_text_mut(image, color, x, y, PxScale::from(size), font, text)
            }
            FontAsset::Bitmap => draw_bitmap_text(image, text, x, y, bitmap_dot(size), color),
        }
    }
}

fn load_truetype(path: &Path) -> Result<FontVec, String> {
    let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
    FontVec::try_from_vec(bytes).map_err(|e| e.to_string())
}

/// Pixel size of one glyph dot for a nominal font size.
fn bitmap_dot(size: f32) -> u32 {
    ((size / 8.0).round() as u32).max(1)
}

fn draw_bitmap_text(image: &mut RgbImage, text: &str, x: i32, y: i32, dot: u32, color: Rgb<u8>) {
    let advance = ((GLYPH_WIDTH + 1) * dot) as i32;
    let mut pen_x = x;
    for c in text.chars() {
        let rows = glyph(c).or_else(|| glyph('?')).unwrap_or([0; 7]);
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                    let px = pen_x + (col * dot) as i32;
                    let py = y + (row as u32 * dot) as i32;
                    draw_filled_rect_mut(image, Rect::at(px, py).of_size(dot, dot), color);
                }
            }
        }
        pen_x += advance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_font_falls_back_to_bitmap() {
        let font = FontAsset::resolve(&["/nonexistent/font.ttf"]);
        assert_eq!(font.kind(), FontKind::Bitmap);
    }

    #[test]
    fn garbage_font_falls_back_to_bitmap() {
        let path = std::env::temp_dir().join("attendance-report-not-a-font.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();
        let font = FontAsset::resolve(&[&path]);
        assert_eq!(font.kind(), FontKind::Bitmap);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn bitmap_measure() {
        let font = FontAsset::Bitmap;
        // size 16 => 2px dots, 3 glyphs of 5 columns plus 2 gaps
        assert_eq!(font.measure("123", 16.0), (17 * 2, 14));
        assert_eq!(font.measure("", 16.0), (0, 14));
    }

    #[test]
    fn bitmap_draw_marks_pixels() {
        let background = Rgb([255, 255, 255]);
        let ink = Rgb([0, 0, 0]);
        let mut image = RgbImage::from_pixel(40, 20, background);
        FontAsset::Bitmap.draw(&mut image, "1", 2, 2, 8.0, ink);
        assert!(image.pixels().any(|p| *p == ink));
        // Drawing off-canvas must not panic
        FontAsset::Bitmap.draw(&mut image, "WIDE TEXT", 30, 15, 16.0, ink);
    }
}
