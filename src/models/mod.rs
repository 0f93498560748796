pub mod palette;
pub mod style;
