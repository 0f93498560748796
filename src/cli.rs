use crate::{
    config::Config,
    models::palette::Palette,
    reader::style::load_stop_table,
    utils::style::{BUILTIN_PALETTES, PRESET_SAMPLES, builtin_stop_table},
};
use anyhow::{Context, anyhow};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hypsoramp")]
#[command(about = "Render a preview of the terrain height-to-colour ramp")]
pub struct Args {
    /// Where to write the preview image (format follows the extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Elevation (0-254) where the land table takes over from the ocean table
    #[arg(long)]
    pub sea_level: Option<u8>,

    /// TrueType font for labels; a bitmap font is used if it cannot be loaded
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Style file (value,red,green,blue per line) replacing the ocean table
    #[arg(long)]
    pub ocean_style: Option<PathBuf>,

    /// Style file replacing the land table
    #[arg(long, conflicts_with = "land_preset")]
    pub land_style: Option<PathBuf>,

    /// Builtin palette (viridis, magma, ...) replacing the land table
    #[arg(long)]
    pub land_preset: Option<String>,

    /// Also write the 256-entry ramp as JSON
    #[arg(long)]
    pub ramp_json: Option<PathBuf>,

    /// Print a summary of the stop tables and the sea-level seam
    #[arg(long)]
    pub summary: bool,
}

impl Args {
    /// Folds the overrides into the built-in configuration.
    pub fn into_config(self) -> anyhow::Result<Config> {
        let mut config = Config::default();

        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(font) = self.font {
            config.font_path = font;
        }

        let mut ocean = config.palette.ocean().clone();
        let mut land = config.palette.land().clone();
        if let Some(path) = &self.ocean_style {
            ocean = load_stop_table(path).context("loading ocean style")?;
        }
        if let Some(path) = &self.land_style {
            land = load_stop_table(path).context("loading land style")?;
        }
        if let Some(name) = &self.land_preset {
            land = builtin_stop_table(name, PRESET_SAMPLES).ok_or_else(|| {
                anyhow!(
                    "unknown land preset '{}', expected one of: {}",
                    name,
                    BUILTIN_PALETTES.join(", ")
                )
            })?;
        }
        let sea_level = self.sea_level.unwrap_or(config.palette.sea_level());
        config.palette = Palette::new(sea_level, ocean, land)?;

        config.validate()?;
        Ok(config)
    }
}
