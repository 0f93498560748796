use crate::models::style::{ColourStop, StopTable, StopTableError};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StyleError {
    #[error("failed to read style file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("invalid {field} {value:?} on line {line} of {path:?}")]
    Field {
        path: PathBuf,
        line: u64,
        field: &'static str,
        value: String,
    },
    #[error("style file {path:?} spans a single value, cannot build a gradient")]
    Degenerate { path: PathBuf },
    #[error("style file {path:?} does not form a gradient: {source}")]
    Table {
        path: PathBuf,
        #[source]
        source: StopTableError,
    },
}

fn parse_field<T: std::str::FromStr>(
    record: &StringRecord,
    index: usize,
    field: &'static str,
    path: &Path,
) -> Result<T, StyleError> {
    let raw = record.get(index).unwrap_or_default();
    raw.parse().map_err(|_| StyleError::Field {
        path: path.to_path_buf(),
        line: record.position().map(|p| p.line()).unwrap_or_default(),
        field,
        value: raw.to_string(),
    })
}

/// Reads the colour stops of a style file in file order.
///
/// Rows are `value,red,green,blue[,alpha,label]`; alpha and label are
/// ignored. `#` comments, `INTERPOLATION` headers and rows with fewer than
/// four fields are skipped.
pub fn parse_style_file<P: AsRef<Path>>(path: P) -> Result<Vec<ColourStop>, StyleError> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)
        .map_err(|source| StyleError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let mut stops = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|source| StyleError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let first = record.get(0).unwrap_or_default();
        if first.is_empty() || first.starts_with("INTERPOLATION") || record.len() < 4 {
            continue;
        }

        stops.push(ColourStop::new(
            parse_field(&record, 0, "value", path)?,
            parse_field(&record, 1, "red", path)?,
            parse_field(&record, 2, "green", path)?,
            parse_field(&record, 3, "blue", path)?,
        ));
    }

    Ok(stops)
}

/// Loads a style file as a gradient over [0, 1].
///
/// Stops are sorted by value. Files spanning exactly [0, 1] are taken
/// as-is; anything else (e.g. absolute elevations) is rescaled from its
/// own min/max.
pub fn load_stop_table<P: AsRef<Path>>(path: P) -> Result<StopTable, StyleError> {
    let path = path.as_ref();
    let mut stops = parse_style_file(path)?;
    stops.sort_by(|a, b| a.value.total_cmp(&b.value));

    if let (Some(first), Some(last)) = (stops.first(), stops.last()) {
        let (min, max) = (first.value, last.value);
        let normalised = min == 0.0 && max == 1.0;
        if !normalised {
            if max <= min {
                return Err(StyleError::Degenerate {
                    path: path.to_path_buf(),
                });
            }
            log::debug!("Rescaling {:?} from [{}, {}] to [0, 1]", path, min, max);
            for stop in &mut stops {
                stop.value = (stop.value - min) / (max - min);
            }
        }
    }

    StopTable::new(stops).map_err(|source| StyleError::Table {
        path: path.to_path_buf(),
        source,
    })
}
