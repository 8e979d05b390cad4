//! GPU demo: one flat button drawn through the quad shader pipeline.
//!
//! A left press is mapped from window pixels to normalized device
//! coordinates and forwarded to the button's hit test.

use anyhow::Result;

use ultraui_engine::coords::Vec2;
use ultraui_engine::core::{App, AppControl, FrameCtx, WindowCtx};
use ultraui_engine::device::GpuInit;
use ultraui_engine::input::{InputEvent, InputState};
use ultraui_engine::logging::{init_logging, LoggingConfig};
use ultraui_engine::paint::Color;
use ultraui_engine::render::quad::QuadRenderer;
use ultraui_engine::window::{LogicalSize, RedrawMode, Runtime, RuntimeConfig};
use ultraui_widgets::{Clickable, Drawable, QuadButton, QuadSurface};

struct QuadDemo {
    button: QuadButton,
    renderer: QuadRenderer,
}

impl App for QuadDemo {
    fn on_input(
        &mut self,
        window: &WindowCtx<'_>,
        event: &InputEvent,
        _input: &InputState,
    ) -> AppControl {
        let InputEvent::PointerButton(press) = event else {
            return AppControl::Continue;
        };
        if !press.is_primary_press() {
            return AppControl::Continue;
        }

        match window.viewport().to_ndc(Vec2::new(press.x, press.y)) {
            Some(ndc) => {
                self.button.handle_click(ndc);
            }
            None => log::debug!("press ignored: window has no drawable area"),
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let (button, renderer) = (&self.button, &mut self.renderer);
        ctx.render(Color::black(), |rctx, target| {
            button.draw(&mut QuadSurface {
                renderer,
                ctx: rctx,
                target,
            });
        })
        .control()
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let button = QuadButton::new(-0.5, -0.5, 0.3, 0.2).on_click(|| {
        log::info!("quad button clicked");
        println!("Button Clicked!");
    });

    let config = RuntimeConfig {
        title: "UltraUI Window".to_string(),
        initial_size: LogicalSize::new(900.0, 600.0),
        redraw: RedrawMode::Continuous,
    };

    // Shader colours go to the surface unencoded, as with a default GL framebuffer.
    let gpu = GpuInit {
        prefer_srgb: false,
        ..GpuInit::default()
    };

    Runtime::run(
        config,
        gpu,
        QuadDemo {
            button,
            renderer: QuadRenderer::new(),
        },
    )
}
