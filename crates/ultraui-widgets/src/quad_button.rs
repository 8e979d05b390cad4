use ultraui_engine::coords::{Rect, Vec2};
use ultraui_engine::render::quad::QuadRenderer;
use ultraui_engine::render::{RenderCtx, RenderTarget};

use crate::capability::{Clickable, Drawable};

/// Everything a [`QuadButton`] needs to draw during one frame.
pub struct QuadSurface<'a, 't> {
    pub renderer: &'a mut QuadRenderer,
    pub ctx: &'a RenderCtx<'a>,
    pub target: &'a mut RenderTarget<'t>,
}

/// A flat, unstyled button in normalized device coordinates.
///
/// `rect.origin` is the bottom-left corner (NDC has +Y up). The geometry is
/// fixed at construction. There is no hover or press state.
pub struct QuadButton {
    rect: Rect,
    on_click: Option<Box<dyn FnMut()>>,
}

impl QuadButton {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            on_click: None,
        }
    }

    /// Callback invoked when a press lands inside the button.
    pub fn on_click(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The four vertices uploaded per draw, counter-clockwise from the
    /// bottom-left corner.
    #[inline]
    pub fn corners(&self) -> [Vec2; 4] {
        self.rect.corners()
    }

    /// Closed hit test: points on the edges count as inside.
    #[inline]
    pub fn hit(&self, point: Vec2) -> bool {
        self.rect.contains_inclusive(point)
    }
}

impl Drawable<QuadSurface<'_, '_>> for QuadButton {
    fn draw(&self, surface: &mut QuadSurface<'_, '_>) {
        surface
            .renderer
            .draw(surface.ctx, &mut *surface.target, self.corners());
    }
}

impl Clickable for QuadButton {
    fn handle_click(&mut self, point: Vec2) -> bool {
        if !self.hit(point) {
            return false;
        }
        if let Some(f) = &mut self.on_click {
            f();
        }
        true
    }
}

impl std::fmt::Debug for QuadButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuadButton")
            .field("rect", &self.rect)
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}
