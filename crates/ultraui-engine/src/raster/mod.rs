//! CPU software rasterizer.
//!
//! A [`Framebuffer`] is a dense, row-major (top-left origin) buffer of packed
//! `0x00RRGGBB` pixels. All drawing clips silently at the buffer edges: writes
//! outside `[0, width) × [0, height)` are discarded, never reported.
//!
//! [`rounded`] composes filled rectangles and quarter-circle fills into
//! rounded button shapes and borders.

mod color;
mod error;
mod framebuffer;
mod pixel_rect;
pub mod rounded;

pub use color::Rgb;
pub use error::RasterError;
pub use framebuffer::{Framebuffer, Quadrant, DEFAULT_BACKGROUND};
pub use pixel_rect::PixelRect;
