//! Label text rasterized on the CPU with fontdue.

mod label;

pub use label::{load_system_font, FontLoadError, LabelFont};
