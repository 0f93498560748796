use crate::models::palette::{LegacyPalette, Palette};
use image::Rgb;
use std::path::PathBuf;
use thiserror::Error;

pub const MIN_WIDTH: u32 = 100;
pub const MIN_HEIGHT: u32 = 300;

const TEMPLATES_FIRST: &str = "Volcano, High Island, Low Island, Continents, Archipelago (Azgaar),";
const TEMPLATES_SECOND: &str = "Atoll (Azgaar), Mediterranean, Peninsula (Azgaar), Pangea, Isthmus";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("canvas {width}x{height} is too small, need at least {}x{}", MIN_WIDTH, MIN_HEIGHT)]
    CanvasTooSmall { width: u32, height: u32 },
}

/// Pixel offsets of the preview's fixed elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub title_y: i32,
    /// Title starts this far left of the canvas centre.
    pub title_offset: i32,
    pub bar_y: u32,
    pub bar_height: u32,
    pub tick_length: u32,
    /// Gap between the bar's bottom edge and the band label text.
    pub label_gap: i32,
    /// Labels start this far left of their tick.
    pub label_offset: i32,
    pub compare_y: u32,
    pub strip_height: u32,
    pub strip_margin: u32,
    /// Headings sit this far above the comparison strips.
    pub heading_gap: i32,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            title_y: 10,
            title_offset: 150,
            bar_y: 50,
            bar_height: 100,
            tick_length: 10,
            label_gap: 15,
            label_offset: 20,
            compare_y: 220,
            strip_height: 40,
            strip_margin: 10,
            heading_gap: 25,
        }
    }
}

/// A named elevation marked with a tick under the gradient bar.
#[derive(Debug, Clone, PartialEq)]
pub struct BandLabel {
    pub elevation: u8,
    pub name: String,
}

impl BandLabel {
    pub fn new(elevation: u8, name: &str) -> Self {
        BandLabel {
            elevation,
            name: name.to_string(),
        }
    }
}

/// A line of footer text, positioned from the bottom edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    pub text: String,
    pub from_bottom: u32,
    pub colour: Rgb<u8>,
    pub small: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub font_path: PathBuf,
    pub font_size: f32,
    pub small_font_size: f32,
    pub palette: Palette,
    pub legacy: LegacyPalette,
    pub layout: Layout,
    pub title: String,
    pub before_heading: String,
    pub after_heading: String,
    pub band_labels: Vec<BandLabel>,
    pub captions: Vec<Caption>,
}

impl Default for Config {
    fn default() -> Self {
        let grey = Rgb([100, 100, 100]);
        Config {
            output: PathBuf::from("color_preview.png"),
            width: 800,
            height: 400,
            font_path: PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"),
            font_size: 14.0,
            small_font_size: 12.0,
            palette: Palette::default(),
            legacy: LegacyPalette::default(),
            layout: Layout::default(),
            title: "Sekai Terrain Color Palette (Improved)".to_string(),
            before_heading: "Before (abrupt green→brown):".to_string(),
            after_heading: "After (smooth gradient):".to_string(),
            band_labels: vec![
                BandLabel::new(0, "Deep Sea"),
                BandLabel::new(20, "Shore"),
                BandLabel::new(50, "Forest"),
                BandLabel::new(100, "Grassland"),
                BandLabel::new(150, "Hills"),
                BandLabel::new(200, "Mountain"),
                BandLabel::new(240, "Snow"),
            ],
            captions: vec![
                Caption {
                    text: "Templates: 22 total (8 original + 10 Azgaar-style + 4 primitive-based)"
                        .to_string(),
                    from_bottom: 60,
                    colour: Rgb([0, 0, 0]),
                    small: false,
                },
                Caption {
                    text: format!("New Azgaar-style: {}", TEMPLATES_FIRST),
                    from_bottom: 40,
                    colour: grey,
                    small: true,
                },
                Caption {
                    text: format!("                  {}", TEMPLATES_SECOND),
                    from_bottom: 25,
                    colour: grey,
                    small: true,
                },
            ],
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_WIDTH || self.height < MIN_HEIGHT {
            return Err(ConfigError::CanvasTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Width of each before/after comparison strip.
    pub fn section_width(&self) -> u32 {
        (self.width / 2).saturating_sub(2 * self.layout.strip_margin)
    }
}
