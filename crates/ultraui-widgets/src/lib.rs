//! UltraUI widgets: the two button models and the software-path scene.
//!
//! [`QuadButton`] lives in normalized device coordinates and is drawn by the
//! GPU quad pipeline. [`RasterButton`] lives in framebuffer pixels and is
//! painted by the software rasterizer; [`RasterScene`] owns it together with
//! the framebuffer and the hover/dirty state that drives repaints.

pub mod capability;
pub mod quad_button;
pub mod raster_button;
pub mod scene;

pub use capability::{Clickable, Drawable};
pub use quad_button::{QuadButton, QuadSurface};
pub use raster_button::{BorderStyle, RasterButton};
pub use scene::{HoverChange, Palette, RasterScene};
