//! JSON export of the 256-entry elevation ramp.

use crate::models::palette::Palette;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write ramp to {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode ramp for {path:?}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RampEntry {
    pub height: u8,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

pub fn ramp_entries(palette: &Palette) -> Vec<RampEntry> {
    palette
        .ramp()
        .into_iter()
        .zip(0..=u8::MAX)
        .map(|(rgb, height)| RampEntry {
            height,
            red: rgb[0],
            green: rgb[1],
            blue: rgb[2],
        })
        .collect()
}

/// Writes `[{height, red, green, blue}, ...]` for every elevation.
pub fn write_ramp_json(palette: &Palette, path: &Path) -> Result<(), ExportError> {
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &ramp_entries(palette)).map_err(|source| {
        ExportError::Encode {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writer.flush().map_err(io_err)?;
    log::info!("Wrote 256-entry ramp to {:?}", path);
    Ok(())
}
