//! GPU rendering subsystem.
//!
//! Renderers own their GPU resources (pipelines, buffers, textures) and create
//! them lazily on first use against the current surface format.
//!
//! - [`shader`]: compiles a vertex/fragment WGSL pair and links it into a pipeline
//! - [`quad`]: draws one filled quad given in normalized device coordinates
//! - [`present`]: uploads a software [`Framebuffer`](crate::raster::Framebuffer)
//!   and draws it over the whole surface

mod ctx;
pub mod present;
pub mod quad;
pub mod shader;

pub use ctx::{RenderCtx, RenderTarget};
