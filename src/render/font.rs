use super::glyphs::{CELL_H, CELL_W, GLYPH_W, glyph};
use ab_glyph::{FontVec, InvalidFont, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to read font file: {0}")]
    Read(#[from] std::io::Error),
    #[error("not a usable font: {0}")]
    Invalid(#[from] InvalidFont),
}

/// Font used for every label on the preview.
pub enum LabelFont {
    TrueType(FontVec),
    /// Built-in 5x7 bitmap glyphs.
    Bitmap,
}

impl LabelFont {
    pub fn try_load(path: &Path) -> Result<Self, FontError> {
        let bytes = fs::read(path)?;
        Ok(LabelFont::TrueType(FontVec::try_from_vec(bytes)?))
    }

    /// Loads `path`, quietly falling back to the bitmap glyphs on any error.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(font) => font,
            Err(err) => {
                log::debug!("Using bitmap font, {:?} unavailable: {}", path, err);
                LabelFont::Bitmap
            }
        }
    }

    /// Draws `text` with its top-left corner at (x, y), clipped to the image.
    ///
    /// Bitmap text shrinks towards 1x until it fits before the right edge.
    pub fn draw_text(
        &self,
        img: &mut RgbImage,
        x: i32,
        y: i32,
        size: f32,
        text: &str,
        colour: Rgb<u8>,
    ) {
        match self {
            LabelFont::TrueType(font) => {
                draw_text_mut(img, colour, x, y, PxScale::from(size), font, text);
            }
            LabelFont::Bitmap => {
                let room = img.width() as i32 - x;
                let scale = fit_scale(bitmap_scale(size), text.chars().count(), room);
                draw_bitmap_text(img, x, y, scale, text, colour);
            }
        }
    }
}

/// Integer upscale that brings the 9px glyph cell closest to `size`.
fn bitmap_scale(size: f32) -> i32 {
    ((size / CELL_H as f32).round() as i32).max(1)
}

/// Width in pixels of `chars` glyphs at `scale`, without the trailing gap.
fn bitmap_width(chars: usize, scale: i32) -> i32 {
    match chars {
        0 => 0,
        n => ((n as i32 - 1) * CELL_W + GLYPH_W as i32) * scale,
    }
}

fn fit_scale(scale: i32, chars: usize, room: i32) -> i32 {
    let mut scale = scale;
    while scale > 1 && bitmap_width(chars, scale) > room {
        scale -= 1;
    }
    scale
}

fn draw_bitmap_text(img: &mut RgbImage, x: i32, y: i32, scale: i32, text: &str, colour: Rgb<u8>) {
    let (w, h) = (img.width() as i32, img.height() as i32);
    for (i, ch) in text.chars().enumerate() {
        let Some(rows) = glyph(ch) else { continue };
        let origin_x = x + i as i32 * CELL_W * scale;
        for (row, &bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_W {
                if bits & (0x10 >> col) == 0 {
                    continue;
                }
                let px = origin_x + col as i32 * scale;
                let py = y + row as i32 * scale;
                for dy in 0..scale {
                    for dx in 0..scale {
                        let (qx, qy) = (px + dx, py + dy);
                        if qx >= 0 && qy >= 0 && qx < w && qy < h {
                            img.put_pixel(qx as u32, qy as u32, colour);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    fn inked(img: &RgbImage) -> usize {
        img.pixels().filter(|p| **p != WHITE).count()
    }

    #[test]
    fn test_missing_font_falls_back_to_bitmap() {
        let tmp = TempDir::new().unwrap();
        let font = LabelFont::load(&tmp.path().join("missing.ttf"));
        assert!(matches!(font, LabelFont::Bitmap));
    }

    #[test]
    fn test_garbage_font_falls_back_to_bitmap() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.ttf");
        fs::write(&path, b"definitely not a font").unwrap();
        assert!(matches!(
            LabelFont::try_load(&path),
            Err(FontError::Invalid(_))
        ));
        assert!(matches!(LabelFont::load(&path), LabelFont::Bitmap));
    }

    #[test]
    fn test_bitmap_scale() {
        assert_eq!(bitmap_scale(12.0), 1);
        assert_eq!(bitmap_scale(14.0), 2);
        assert_eq!(bitmap_scale(2.0), 1);
    }

    #[test]
    fn test_fit_scale_steps_down_to_room() {
        assert_eq!(bitmap_width(0, 2), 0);
        assert_eq!(bitmap_width(3, 1), 17);
        assert_eq!(fit_scale(2, 70, 790), 1);
        assert_eq!(fit_scale(2, 38, 550), 2);
        assert_eq!(fit_scale(3, 10, 5), 1);
    }

    #[test]
    fn test_long_line_shrinks_instead_of_clipping() {
        let line = "Templates: 22 total (8 original + 10 Azgaar-style + 4 primitive-based)";
        let mut large = RgbImage::from_pixel(800, 30, WHITE);
        LabelFont::Bitmap.draw_text(&mut large, 10, 5, 14.0, line, BLACK);
        let mut small = RgbImage::from_pixel(800, 30, WHITE);
        LabelFont::Bitmap.draw_text(&mut small, 10, 5, 12.0, line, BLACK);

        assert_eq!(large, small);
        assert!((0..30).all(|y| *large.get_pixel(799, y) == WHITE));
    }

    #[test]
    fn test_short_line_keeps_requested_scale() {
        let mut img = RgbImage::from_pixel(60, 30, WHITE);
        LabelFont::Bitmap.draw_text(&mut img, 2, 2, 14.0, "Hi", BLACK);
        assert_eq!(inked(&img), 26 * 4);
    }

    #[test]
    fn test_bitmap_text_inks_pixels() {
        let mut img = RgbImage::from_pixel(60, 20, WHITE);
        LabelFont::Bitmap.draw_text(&mut img, 2, 2, 12.0, "Hi", BLACK);
        // 'H' has 17 lit cells, 'i' has 9
        assert_eq!(inked(&img), 26);
    }

    #[test]
    fn test_bitmap_text_clips_at_edges() {
        let mut img = RgbImage::from_pixel(10, 10, WHITE);
        LabelFont::Bitmap.draw_text(&mut img, -20, -3, 14.0, "Deep Sea", BLACK);
        LabelFont::Bitmap.draw_text(&mut img, 8, 8, 14.0, "Snow", BLACK);
        assert!(inked(&img) > 0);
    }

    #[test]
    fn test_unknown_chars_are_skipped() {
        let mut img = RgbImage::from_pixel(40, 20, WHITE);
        LabelFont::Bitmap.draw_text(&mut img, 0, 0, 12.0, "→", BLACK);
        assert_eq!(inked(&img), 0);
    }
}
