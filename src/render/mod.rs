pub mod font;
pub mod glyphs;
pub mod preview;

pub use font::LabelFont;
pub use preview::{PreviewError, PreviewRenderer};
