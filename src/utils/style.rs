use crate::models::style::{ColourStop, StopTable};
use colorgrad::{Gradient, preset};

pub const BUILTIN_PALETTES: [&str; 9] = [
    "viridis",
    "magma",
    "plasma",
    "inferno",
    "turbo",
    "cubehelix_default",
    "rainbow",
    "spectral",
    "sinebow",
];

/// Stops taken from a builtin palette when it stands in for a stop table.
pub const PRESET_SAMPLES: usize = 11;

pub fn get_builtin_gradient(name: &str) -> Option<Box<dyn Gradient>> {
    Some(match name {
        "viridis" => Box::new(preset::viridis()),
        "magma" => Box::new(preset::magma()),
        "plasma" => Box::new(preset::plasma()),
        "inferno" => Box::new(preset::inferno()),
        "turbo" => Box::new(preset::turbo()),
        "cubehelix_default" => Box::new(preset::cubehelix_default()),
        "rainbow" => Box::new(preset::rainbow()),
        "spectral" => Box::new(preset::spectral()),
        "sinebow" => Box::new(preset::sinebow()),
        _ => return None,
    })
}

/// Samples a builtin palette into `samples` evenly spaced stops.
pub fn builtin_stop_table(name: &str, samples: usize) -> Option<StopTable> {
    let grad = get_builtin_gradient(name)?;
    let n = samples.max(2);
    let stops = (0..n)
        .map(|i| {
            let value = i as f64 / (n - 1) as f64;
            let [r, g, b, _] = grad.at(value as f32).to_rgba8();
            ColourStop::new(value, r, g, b)
        })
        .collect();
    StopTable::new(stops).ok()
}
