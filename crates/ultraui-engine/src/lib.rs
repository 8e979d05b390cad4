//! UltraUI engine crate.
//!
//! Owns the platform + GPU runtime pieces used by the demos, plus the CPU
//! software rasterizer used by the framebuffer path.

pub mod device;
pub mod window;
pub mod input;
pub mod core;

pub mod logging;
pub mod coords;
pub mod paint;
pub mod raster;
pub mod render;
pub mod text;
