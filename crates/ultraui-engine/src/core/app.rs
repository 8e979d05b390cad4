use winit::dpi::PhysicalSize;

use crate::input::{InputEvent, InputState};

use super::ctx::{FrameCtx, WindowCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
pub trait App {
    /// Called for translated input events. `input` already includes `event`.
    fn on_input(
        &mut self,
        window: &WindowCtx<'_>,
        event: &InputEvent,
        input: &InputState,
    ) -> AppControl {
        let _ = (window, event, input);
        AppControl::Continue
    }

    /// Called after the surface has been resized. Zero-sized extents
    /// (minimized windows) are not reported.
    fn on_resize(&mut self, window: &WindowCtx<'_>, size: PhysicalSize<u32>) -> AppControl {
        let _ = (window, size);
        AppControl::Continue
    }

    /// Called once per rendered frame per window.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
