//! Core engine-facing contracts.
//!
//! This module defines the interface between the runtime (platform loop) and
//! the demo applications built on top of it.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, RenderOutcome, WindowCtx};
