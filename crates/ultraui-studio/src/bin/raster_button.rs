//! Software demo: a rounded button rasterized on the CPU.
//!
//! The scene repaints its framebuffer on resize and on hover transitions and
//! only presents when dirty. The label is drawn onto a staging copy at
//! presentation time, never into the scene's framebuffer. A frame the surface
//! refused stays dirty and is retried on the next redraw.

use anyhow::{Context, Result};

use ultraui_engine::core::{App, AppControl, FrameCtx, RenderOutcome, WindowCtx};
use ultraui_engine::device::GpuInit;
use ultraui_engine::input::{InputEvent, InputState};
use ultraui_engine::logging::{init_logging, LoggingConfig};
use ultraui_engine::paint::Color;
use ultraui_engine::raster::{Framebuffer, PixelRect, Rgb};
use ultraui_engine::render::present::FramebufferPresenter;
use ultraui_engine::text::{load_system_font, LabelFont};
use ultraui_engine::window::{CursorIcon, LogicalSize, PhysicalSize, RedrawMode, Runtime, RuntimeConfig};
use ultraui_widgets::{HoverChange, Palette, RasterButton, RasterScene};

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;
const LABEL_SIZE: f32 = 16.0;

struct RasterDemo {
    scene: RasterScene,
    staging: Framebuffer,
    presenter: FramebufferPresenter,
    label_font: Option<LabelFont>,
}

impl RasterDemo {
    fn resize(&mut self, size: PhysicalSize<u32>) {
        if let Err(e) = self.scene.on_resize(size.width, size.height) {
            log::warn!("framebuffer resize rejected: {e}");
        }
    }

    fn apply_hover(window: &WindowCtx<'_>, change: Option<HoverChange>) {
        let Some(change) = change else { return };
        window.set_cursor(if change.is_hovered() {
            CursorIcon::Pointer
        } else {
            CursorIcon::Default
        });
        window.request_redraw();
    }
}

impl App for RasterDemo {
    fn on_input(
        &mut self,
        window: &WindowCtx<'_>,
        event: &InputEvent,
        _input: &InputState,
    ) -> AppControl {
        match event {
            InputEvent::PointerMoved(mv) => {
                let (x, y) = window.to_physical(mv.x, mv.y);
                let change = self.scene.on_pointer_moved(x.floor() as i32, y.floor() as i32);
                Self::apply_hover(window, change);
            }
            InputEvent::PointerLeft => {
                let change = self.scene.on_pointer_left();
                Self::apply_hover(window, change);
            }
            InputEvent::PointerButton(press) if press.is_primary_press() => {
                let (x, y) = window.to_physical(press.x, press.y);
                self.scene.on_pointer_pressed(x, y);
            }
            _ => {}
        }
        AppControl::Continue
    }

    fn on_resize(&mut self, _window: &WindowCtx<'_>, size: PhysicalSize<u32>) -> AppControl {
        self.resize(size);
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        // The first frame may arrive before any resize event.
        let size = ctx.window.physical_size();
        let fb = self.scene.framebuffer();
        if size.width > 0 && size.height > 0 && (size.width, size.height) != (fb.width(), fb.height()) {
            self.resize(size);
        }

        if !self
            .scene
            .compose_frame(&mut self.staging, self.label_font.as_mut(), LABEL_SIZE)
        {
            return AppControl::Continue;
        }

        let (presenter, staging) = (&mut self.presenter, &self.staging);
        let outcome = ctx.render(Color::from_straight(1.0, 1.0, 1.0, 1.0), |rctx, target| {
            presenter.present(rctx, target, staging);
        });

        match outcome {
            RenderOutcome::Presented => self.scene.mark_presented(),
            RenderOutcome::Skipped => ctx.window.request_redraw(),
            RenderOutcome::Fatal => {}
        }
        outcome.control()
    }
}

fn load_label_font() -> Option<LabelFont> {
    let Some(bytes) = load_system_font() else {
        log::warn!("no system font found; button label will not be drawn");
        return None;
    };
    match LabelFont::from_bytes(&bytes) {
        Ok(font) => Some(font),
        Err(e) => {
            log::warn!("{e}; button label will not be drawn");
            None
        }
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let palette = Palette::default();
    let button = RasterButton::new(PixelRect::new(100, 100, 430, 180), 7, "Click me", palette.base)
        .with_border(2, Rgb::from_packed(0x075E00))
        .on_click(|| {
            log::info!("raster button clicked");
            println!("Button clicked");
        });

    let scene = RasterScene::new(WIDTH, HEIGHT, button, palette)
        .context("failed to allocate framebuffer")?;

    let app = RasterDemo {
        staging: scene.framebuffer().clone(),
        scene,
        presenter: FramebufferPresenter::new(),
        label_font: load_label_font(),
    };

    let config = RuntimeConfig {
        title: "UltraUI Raster".to_string(),
        initial_size: LogicalSize::new(WIDTH as f64, HEIGHT as f64),
        redraw: RedrawMode::OnRequest,
    };

    Runtime::run(config, GpuInit::default(), app)
}
