use super::style::{ColourStop, StopTable};
use crate::gradient::interpolate_gradient;
use image::Rgb;
use std::sync::LazyLock;
use thiserror::Error;

/// Elevation separating the ocean table from the land table.
pub const SEA_LEVEL: u8 = 20;

pub const OCEAN_STOPS: [ColourStop; 4] = [
    ColourStop::new(0.0, 8, 24, 58),    // deep ocean
    ColourStop::new(0.3, 16, 48, 120),  // mid-deep
    ColourStop::new(0.7, 32, 80, 170),  // shallow
    ColourStop::new(1.0, 60, 120, 190), // coastal
];

pub const LAND_STOPS: [ColourStop; 10] = [
    ColourStop::new(0.0, 210, 180, 140),  // beach
    ColourStop::new(0.05, 34, 120, 50),   // forest
    ColourStop::new(0.15, 50, 150, 50),   // mid green
    ColourStop::new(0.25, 100, 170, 60),  // light green
    ColourStop::new(0.35, 160, 180, 70),  // grassland
    ColourStop::new(0.45, 200, 170, 80),  // dry grass
    ColourStop::new(0.55, 180, 130, 70),  // low mountain
    ColourStop::new(0.70, 130, 100, 70),  // mountain
    ColourStop::new(0.85, 150, 145, 140), // rock
    ColourStop::new(1.0, 255, 255, 255),  // snow
];

/// Land table of the previous palette, green jumping straight to brown.
pub const LEGACY_LAND_STOPS: [ColourStop; 4] = [
    ColourStop::new(0.0, 34, 139, 34),
    ColourStop::new(0.33, 134, 89, 14),
    ColourStop::new(0.66, 174, 119, 24),
    ColourStop::new(1.0, 255, 255, 255),
];

static DEFAULT_PALETTE: LazyLock<Palette> = LazyLock::new(Palette::default);

#[derive(Debug, Error, PartialEq)]
pub enum PaletteError {
    #[error("sea level must be below 255, got {0}")]
    SeaLevelTooHigh(u8),
}

/// Ocean and land tables joined at a sea-level elevation.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    sea_level: u8,
    ocean: StopTable,
    land: StopTable,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            sea_level: SEA_LEVEL,
            ocean: StopTable::from_static(&OCEAN_STOPS),
            land: StopTable::from_static(&LAND_STOPS),
        }
    }
}

impl Palette {
    pub fn new(sea_level: u8, ocean: StopTable, land: StopTable) -> Result<Self, PaletteError> {
        // the land remap divides by (1 - sea_ratio)
        if sea_level == u8::MAX {
            return Err(PaletteError::SeaLevelTooHigh(sea_level));
        }
        Ok(Palette {
            sea_level,
            ocean,
            land,
        })
    }

    pub fn sea_level(&self) -> u8 {
        self.sea_level
    }

    pub fn ocean(&self) -> &StopTable {
        &self.ocean
    }

    pub fn land(&self) -> &StopTable {
        &self.land
    }

    /// Colour for an elevation in [0, 255].
    ///
    /// Each side of the sea level is renormalised to [0, 1] on its own, so
    /// the ocean's last stop and the land's first stop meet at the seam
    /// without being forced equal.
    pub fn height_to_color(&self, height: u8) -> Rgb<u8> {
        let ratio = height as f64 / 255.0;
        let sea_ratio = self.sea_level as f64 / 255.0;

        if height < self.sea_level {
            interpolate_gradient(&self.ocean, ratio / sea_ratio)
        } else {
            interpolate_gradient(&self.land, (ratio - sea_ratio) / (1.0 - sea_ratio))
        }
    }

    /// The full 256-entry lookup table.
    pub fn ramp(&self) -> Vec<Rgb<u8>> {
        (0..=u8::MAX).map(|h| self.height_to_color(h)).collect()
    }

    /// Colour jump between the last ocean elevation and the first land one.
    ///
    /// `None` when the sea level is 0 and there is no ocean at all.
    pub fn seam(&self) -> Option<Seam> {
        let below = self.sea_level.checked_sub(1)?;
        Some(Seam {
            below: self.height_to_color(below),
            above: self.height_to_color(self.sea_level),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seam {
    pub below: Rgb<u8>,
    pub above: Rgb<u8>,
}

impl Seam {
    pub fn channel_deltas(&self) -> [u8; 3] {
        [0, 1, 2].map(|i| self.below[i].abs_diff(self.above[i]))
    }

    pub fn max_delta(&self) -> u8 {
        self.channel_deltas().into_iter().max().unwrap_or(0)
    }
}

/// The flat-ocean, abrupt-land palette shown as "before" in the preview.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyPalette {
    pub ocean: Rgb<u8>,
    /// Share of the strip drawn as ocean.
    pub sea_fraction: f64,
    pub land: StopTable,
}

impl Default for LegacyPalette {
    fn default() -> Self {
        LegacyPalette {
            ocean: Rgb([60, 120, 190]),
            sea_fraction: 0.1,
            land: StopTable::from_static(&LEGACY_LAND_STOPS),
        }
    }
}

impl LegacyPalette {
    pub fn color_at(&self, ratio: f64) -> Rgb<u8> {
        if ratio < self.sea_fraction {
            self.ocean
        } else {
            let land_ratio = (ratio - self.sea_fraction) / (1.0 - self.sea_fraction);
            interpolate_gradient(&self.land, land_ratio)
        }
    }
}

/// Maps an elevation with the built-in palette.
pub fn height_to_color(height: u8) -> Rgb<u8> {
    DEFAULT_PALETTE.height_to_color(height)
}
