pub mod cli;
pub mod config;
pub mod export;
pub mod gradient;
pub mod models;
pub mod reader;
pub mod render;
pub mod utils;

pub use config::Config;
pub use gradient::{interpolate_gradient, lerp_color, smoothstep};
pub use models::palette::{Palette, height_to_color};
pub use render::PreviewRenderer;
