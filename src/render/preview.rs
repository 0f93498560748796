use super::font::LabelFont;
use crate::config::{Config, ConfigError};
use image::{ImageError, Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use std::path::PathBuf;
use thiserror::Error;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to save preview to {path:?}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
}

/// Draws the palette preview: gradient bar, band labels, before/after
/// strips and captions.
pub struct PreviewRenderer {
    config: Config,
    font: LabelFont,
}

impl PreviewRenderer {
    pub fn new(config: Config) -> Result<Self, PreviewError> {
        let font = LabelFont::load(&config.font_path);
        Self::with_font(config, font)
    }

    pub fn with_font(config: Config, font: LabelFont) -> Result<Self, PreviewError> {
        config.validate()?;
        Ok(Self { config, font })
    }

    pub fn render(&self) -> RgbImage {
        let cfg = &self.config;
        let mut img = RgbImage::from_pixel(cfg.width, cfg.height, WHITE);

        self.draw_gradient_bar(&mut img);
        self.draw_band_labels(&mut img);
        self.draw_comparison(&mut img);
        self.draw_captions(&mut img);

        log::info!(
            "Rendered {}x{} preview, sea level {}",
            cfg.width,
            cfg.height,
            cfg.palette.sea_level()
        );
        img
    }

    /// Renders and writes the preview, overwriting any existing file.
    pub fn save(&self) -> Result<PathBuf, PreviewError> {
        let img = self.render();
        let path = self.config.output.clone();
        img.save(&path).map_err(|source| PreviewError::Save {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    fn draw_gradient_bar(&self, img: &mut RgbImage) {
        let cfg = &self.config;
        let layout = &cfg.layout;
        let bottom = layout.bar_y + layout.bar_height;

        for x in 0..cfg.width {
            let h = column_elevation(x, cfg.width);
            vline(img, x, layout.bar_y, bottom, cfg.palette.height_to_color(h));
        }

        draw_hollow_rect_mut(
            img,
            Rect::at(0, layout.bar_y as i32).of_size(cfg.width, layout.bar_height + 1),
            BLACK,
        );

        let title_x = (cfg.width / 2) as i32 - layout.title_offset;
        self.font
            .draw_text(img, title_x, layout.title_y, cfg.font_size, &cfg.title, BLACK);
    }

    fn draw_band_labels(&self, img: &mut RgbImage) {
        let cfg = &self.config;
        let layout = &cfg.layout;
        let bottom = layout.bar_y + layout.bar_height;

        for band in &cfg.band_labels {
            let x = band.elevation as u32 * cfg.width / 255;
            vline(img, x, bottom, bottom + layout.tick_length, BLACK);
            self.font.draw_text(
                img,
                x as i32 - layout.label_offset,
                bottom as i32 + layout.label_gap,
                cfg.small_font_size,
                &band.name,
                BLACK,
            );
        }
    }

    fn draw_comparison(&self, img: &mut RgbImage) {
        let cfg = &self.config;
        let layout = &cfg.layout;
        let section = cfg.section_width();
        let (top, bottom) = (layout.compare_y, layout.compare_y + layout.strip_height);
        let heading_y = layout.compare_y as i32 - layout.heading_gap;
        let before_x = layout.strip_margin;
        let after_x = cfg.width / 2 + layout.strip_margin;

        self.font.draw_text(
            img,
            before_x as i32,
            heading_y,
            cfg.font_size,
            &cfg.before_heading,
            BLACK,
        );
        for x in 0..section {
            let colour = cfg.legacy.color_at(x as f64 / section as f64);
            vline(img, x + before_x, top, bottom, colour);
        }

        self.font.draw_text(
            img,
            after_x as i32,
            heading_y,
            cfg.font_size,
            &cfg.after_heading,
            BLACK,
        );
        for x in 0..section {
            let colour = cfg.palette.height_to_color(column_elevation(x, section));
            vline(img, x + after_x, top, bottom, colour);
        }
    }

    fn draw_captions(&self, img: &mut RgbImage) {
        let cfg = &self.config;
        for caption in &cfg.captions {
            let size = if caption.small {
                cfg.small_font_size
            } else {
                cfg.font_size
            };
            let y = cfg.height as i32 - caption.from_bottom as i32;
            self.font.draw_text(
                img,
                cfg.layout.strip_margin as i32,
                y,
                size,
                &caption.text,
                caption.colour,
            );
        }
    }
}

/// Elevation sampled by column `x` of a `span`-wide gradient.
fn column_elevation(x: u32, span: u32) -> u8 {
    (x as u64 * 255 / span as u64).min(255) as u8
}

/// Inclusive vertical segment; off-canvas parts are clipped.
fn vline(img: &mut RgbImage, x: u32, y0: u32, y1: u32, colour: Rgb<u8>) {
    draw_line_segment_mut(img, (x as f32, y0 as f32), (x as f32, y1 as f32), colour);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::palette::height_to_color;
    use std::ops::Range;
    use tempfile::TempDir;

    const GREY: Rgb<u8> = Rgb([100, 100, 100]);

    fn renderer(config: Config) -> PreviewRenderer {
        PreviewRenderer::with_font(config, LabelFont::Bitmap).unwrap()
    }

    fn has_ink(img: &RgbImage, xs: Range<u32>, ys: Range<u32>, colour: Rgb<u8>) -> bool {
        ys.flat_map(|y| xs.clone().map(move |x| (x, y)))
            .any(|(x, y)| *img.get_pixel(x, y) == colour)
    }

    #[test]
    fn test_column_elevation() {
        assert_eq!(column_elevation(0, 800), 0);
        assert_eq!(column_elevation(63, 800), 20);
        assert_eq!(column_elevation(400, 800), 127);
        assert_eq!(column_elevation(799, 800), 254);
        assert_eq!(column_elevation(379, 380), 254);
    }

    #[test]
    fn test_gradient_bar_columns_follow_palette() {
        let config = Config::default();
        let row = config.layout.bar_y + 1;
        let img = renderer(config).render();

        assert_eq!(*img.get_pixel(1, row), height_to_color(0));
        assert_eq!(*img.get_pixel(400, row), height_to_color(127));
        assert_eq!(*img.get_pixel(798, row), height_to_color(254));
    }

    #[test]
    fn test_bar_has_black_border() {
        let config = Config::default();
        let (top, bottom) = (
            config.layout.bar_y,
            config.layout.bar_y + config.layout.bar_height,
        );
        let img = renderer(config).render();

        assert_eq!(*img.get_pixel(400, top), BLACK);
        assert_eq!(*img.get_pixel(400, bottom), BLACK);
        assert_eq!(*img.get_pixel(0, top + 50), BLACK);
        assert_eq!(*img.get_pixel(799, top + 50), BLACK);
        assert_eq!(*img.get_pixel(400, top - 1), WHITE);
    }

    #[test]
    fn test_band_ticks_below_bar() {
        let config = Config::default();
        let bottom = config.layout.bar_y + config.layout.bar_height;
        let img = renderer(config).render();

        // "Shore" tick at 20 * 800 / 255
        assert_eq!(*img.get_pixel(62, bottom + 5), BLACK);
        assert_eq!(*img.get_pixel(63, bottom + 5), WHITE);
    }

    #[test]
    fn test_comparison_strips() {
        let config = Config::default();
        let y = config.layout.compare_y + 1;
        let legacy_ocean = config.legacy.ocean;
        let img = renderer(config).render();

        assert_eq!(*img.get_pixel(10, y), legacy_ocean);
        assert_eq!(*img.get_pixel(410, y), height_to_color(0));
        // gap between the strips stays blank
        assert_eq!(*img.get_pixel(395, y), WHITE);
    }

    #[test]
    fn test_title_above_bar() {
        let img = renderer(Config::default()).render();

        // 2x glyphs from (800 / 2 - 150, 10)
        assert!(has_ink(&img, 250..260, 10..24, BLACK));
        assert!(!has_ink(&img, 0..250, 0..50, BLACK));
        assert!(!has_ink(&img, 0..800, 24..50, BLACK));
    }

    #[test]
    fn test_band_label_text_under_ticks() {
        let img = renderer(Config::default()).render();

        // "Shore" tick at x=62, text from x=42; "Snow" tick at x=752
        assert!(has_ink(&img, 42..72, 165..172, BLACK));
        assert!(has_ink(&img, 732..756, 165..172, BLACK));
        assert!(!has_ink(&img, 0..800, 161..165, BLACK));
    }

    #[test]
    fn test_headings_above_strips() {
        let config = Config::default();
        let heading_y = config.layout.compare_y - config.layout.heading_gap as u32;
        let img = renderer(config).render();

        assert!(has_ink(&img, 10..390, heading_y..heading_y + 14, BLACK));
        assert!(has_ink(&img, 410..790, heading_y..heading_y + 14, BLACK));
        assert!(!has_ink(&img, 0..800, heading_y + 14..220, BLACK));
    }

    #[test]
    fn test_captions_black_then_grey() {
        let img = renderer(Config::default()).render();

        assert!(has_ink(&img, 10..430, 340..347, BLACK));
        assert!(!has_ink(&img, 0..800, 340..347, GREY));
        assert!(has_ink(&img, 10..530, 360..367, GREY));
        // third line is indented past "New Azgaar-style: "
        assert!(!has_ink(&img, 0..118, 375..382, GREY));
        assert!(has_ink(&img, 118..530, 375..382, GREY));
    }

    #[test]
    fn test_captions_stay_inside_canvas() {
        let img = renderer(Config::default()).render();
        let rows = 330..400;

        assert!(!has_ink(&img, 780..800, rows.clone(), BLACK));
        assert!(!has_ink(&img, 780..800, rows, GREY));
    }

    #[test]
    fn test_rejects_small_canvas() {
        let config = Config {
            height: 100,
            ..Config::default()
        };
        assert!(matches!(
            PreviewRenderer::with_font(config, LabelFont::Bitmap),
            Err(PreviewError::Config(_))
        ));
    }

    #[test]
    fn test_save_writes_png() {
        let tmp = TempDir::new().unwrap();
        let output = tmp.path().join("preview.png");
        let config = Config {
            output: output.clone(),
            ..Config::default()
        };

        let saved = renderer(config).save().unwrap();
        assert_eq!(saved, output);

        let img = image::open(&output).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (800, 400));
        assert_eq!(*img.get_pixel(1, 51), height_to_color(0));
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let tmp = TempDir::new().unwrap();
        let output = tmp.path().join("preview.png");
        std::fs::write(&output, b"stale").unwrap();
        let config = Config {
            output: output.clone(),
            ..Config::default()
        };

        renderer(config).save().unwrap();
        assert!(image::open(&output).is_ok());
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let tmp = TempDir::new().unwrap();
        let config = Config {
            output: tmp.path().join("no/such/dir/preview.png"),
            ..Config::default()
        };

        assert!(matches!(
            renderer(config).save(),
            Err(PreviewError::Save { .. })
        ));
    }
}
