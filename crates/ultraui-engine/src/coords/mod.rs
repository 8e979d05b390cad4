//! Coordinate and geometry types shared by the GPU path and the widgets.
//!
//! Two spaces are in use:
//! - logical window pixels: origin top-left, +X right, +Y down
//! - normalized device coordinates: [-1, 1] on both axes, +Y up
//!
//! [`Viewport::to_ndc`] maps the first onto the second.

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
