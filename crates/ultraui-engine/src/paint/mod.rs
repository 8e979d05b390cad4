//! Colors consumed by the GPU path.
//!
//! The software framebuffer stores packed 8-bit colors instead; see
//! [`crate::raster::Rgb`].

pub mod color;

pub use color::Color;
