use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::window::Window;

use crate::input::{
    InputEvent, InputState, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent,
};

/// Maps a winit window event onto the pointer subset the engine uses.
///
/// Positions are converted to logical pixels. Returns `None` for anything
/// else (keyboard, wheel, focus, IME, lifecycle).
pub(crate) fn translate_window_event(
    window: &Window,
    state: &InputState,
    event: &WindowEvent,
) -> Option<InputEvent> {
    let ev = match event {
        WindowEvent::CursorLeft { .. } => InputEvent::PointerLeft,
        WindowEvent::CursorMoved { position, .. } => {
            let p = position.to_logical::<f64>(window.scale_factor());
            InputEvent::PointerMoved(PointerMoveEvent {
                x: p.x as f32,
                y: p.y as f32,
            })
        }
        WindowEvent::MouseInput { state: st, button, .. } => {
            // Press events carry no position; reuse the last tracked one.
            let (x, y) = state.pointer_pos.unwrap_or_default();
            InputEvent::PointerButton(PointerButtonEvent {
                button: button_from_winit(*button),
                state: button_state_from_winit(*st),
                x,
                y,
            })
        }
        _ => return None,
    };
    Some(ev)
}

fn button_state_from_winit(st: ElementState) -> MouseButtonState {
    if st.is_pressed() {
        MouseButtonState::Pressed
    } else {
        MouseButtonState::Released
    }
}

fn button_from_winit(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}
