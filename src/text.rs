//! Text layout. Font resolution through fontconfig and paragraph fitting.

pub mod fit;
mod font;

pub use fit::{fit, FitOptions, FittedText, Measure};
pub use font::{FontMap, FontPath, FontSlot};
