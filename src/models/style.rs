use image::Rgb;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColourStop {
    pub value: f64,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl ColourStop {
    pub const fn new(value: f64, red: u8, green: u8, blue: u8) -> Self {
        ColourStop {
            value,
            red,
            green,
            blue,
        }
    }

    pub fn rgb(&self) -> Rgb<u8> {
        Rgb([self.red, self.green, self.blue])
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum StopTableError {
    #[error("a stop table needs at least two stops, got {0}")]
    TooFewStops(usize),
    #[error("first stop must sit at 0.0, found {0}")]
    BadFirstPosition(f64),
    #[error("last stop must sit at 1.0, found {0}")]
    BadLastPosition(f64),
    #[error("stop positions must be strictly increasing: {prev} then {next} at index {index}")]
    NotIncreasing { index: usize, prev: f64, next: f64 },
}

/// Ordered colour stops covering [0, 1].
///
/// Positions are strictly increasing, so no segment has zero width.
#[derive(Debug, Clone, PartialEq)]
pub struct StopTable {
    stops: Vec<ColourStop>,
}

impl StopTable {
    pub fn new(stops: Vec<ColourStop>) -> Result<Self, StopTableError> {
        if stops.len() < 2 {
            return Err(StopTableError::TooFewStops(stops.len()));
        }
        let first = stops[0].value;
        if first != 0.0 {
            return Err(StopTableError::BadFirstPosition(first));
        }
        let last = stops[stops.len() - 1].value;
        if last != 1.0 {
            return Err(StopTableError::BadLastPosition(last));
        }
        for (i, w) in stops.windows(2).enumerate() {
            // NaN fails this comparison too
            if !(w[0].value < w[1].value) {
                return Err(StopTableError::NotIncreasing {
                    index: i + 1,
                    prev: w[0].value,
                    next: w[1].value,
                });
            }
        }
        Ok(StopTable { stops })
    }

    /// Built-in tables, checked by the tests in `models::palette`.
    pub(crate) fn from_static(stops: &[ColourStop]) -> Self {
        debug_assert!(StopTable::new(stops.to_vec()).is_ok());
        StopTable {
            stops: stops.to_vec(),
        }
    }

    pub fn stops(&self) -> &[ColourStop] {
        &self.stops
    }

    pub fn first(&self) -> &ColourStop {
        &self.stops[0]
    }

    pub fn last(&self) -> &ColourStop {
        &self.stops[self.stops.len() - 1]
    }

    /// Per-channel (min, max) over every stop.
    pub fn channel_bounds(&self) -> [(u8, u8); 3] {
        let mut bounds = [(u8::MAX, u8::MIN); 3];
        for stop in &self.stops {
            for (i, v) in [stop.red, stop.green, stop.blue].into_iter().enumerate() {
                bounds[i].0 = bounds[i].0.min(v);
                bounds[i].1 = bounds[i].1.max(v);
            }
        }
        bounds
    }
}
