use ultraui_engine::coords::Vec2;
use ultraui_engine::raster::rounded::{draw_rounded_border, draw_rounded_rect};
use ultraui_engine::raster::{Framebuffer, PixelRect, Rgb};

use crate::capability::{Clickable, Drawable};

/// Solid border drawn inward from the button edge.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BorderStyle {
    /// Width in pixels; zero disables the border.
    pub thickness: u32,
    pub color: Rgb,
}

impl BorderStyle {
    pub const NONE: BorderStyle = BorderStyle {
        thickness: 0,
        color: Rgb::BLACK,
    };
}

/// A rounded, labelled button painted by the software rasterizer.
///
/// Coordinates are framebuffer pixels. The label is not painted into the
/// framebuffer; it is overlaid at presentation time.
pub struct RasterButton {
    rect: PixelRect,
    radius: i32,
    label: String,
    fill: Rgb,
    border: BorderStyle,
    on_click: Option<Box<dyn FnMut()>>,
}

impl RasterButton {
    pub fn new(rect: PixelRect, radius: i32, label: impl Into<String>, fill: Rgb) -> Self {
        Self {
            rect,
            radius,
            label: label.into(),
            fill,
            border: BorderStyle::NONE,
            on_click: None,
        }
    }

    pub fn with_border(mut self, thickness: u32, color: Rgb) -> Self {
        self.set_border(thickness, color);
        self
    }

    pub fn on_click(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    /// Changes the border after construction.
    pub fn set_border(&mut self, thickness: u32, color: Rgb) {
        self.border = BorderStyle { thickness, color };
    }

    pub fn set_fill(&mut self, fill: Rgb) {
        self.fill = fill;
    }

    #[inline]
    pub fn rect(&self) -> PixelRect {
        self.rect
    }

    #[inline]
    pub fn radius(&self) -> i32 {
        self.radius
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn fill(&self) -> Rgb {
        self.fill
    }

    #[inline]
    pub fn border(&self) -> BorderStyle {
        self.border
    }

    /// Hover test, half-open: `[x, x + w) × [y, y + h)`.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.rect.contains(x, y)
    }
}

impl Drawable<Framebuffer> for RasterButton {
    /// Fills the rounded body, then the border on top of it.
    fn draw(&self, fb: &mut Framebuffer) {
        draw_rounded_rect(fb, self.rect, self.radius, self.fill);
        draw_rounded_border(
            fb,
            self.rect,
            self.radius,
            self.border.thickness,
            self.border.color,
        );
    }
}

impl Clickable for RasterButton {
    fn handle_click(&mut self, point: Vec2) -> bool {
        if !point.is_finite() || !self.contains(point.x.floor() as i32, point.y.floor() as i32) {
            return false;
        }
        if let Some(f) = &mut self.on_click {
            f();
        }
        true
    }
}

impl std::fmt::Debug for RasterButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterButton")
            .field("rect", &self.rect)
            .field("radius", &self.radius)
            .field("label", &self.label)
            .field("fill", &self.fill)
            .field("border", &self.border)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    const GREEN: Rgb = Rgb::new(0x0B, 0x84, 0x00);
    const DARK: Rgb = Rgb::new(0x07, 0x5E, 0x00);

    fn button() -> RasterButton {
        RasterButton::new(PixelRect::new(100, 100, 430, 180), 7, "Click me", GREEN)
    }

    fn canvas() -> Framebuffer {
        let mut fb = Framebuffer::new(800, 600).unwrap();
        fb.clear(Rgb::WHITE);
        fb
    }

    // ── painting ──────────────────────────────────────────────────────────

    #[test]
    fn paints_body_without_border() {
        let mut fb = canvas();
        button().draw(&mut fb);
        assert_eq!(fb.pixel(107, 100), Some(GREEN));
        assert_eq!(fb.pixel(315, 190), Some(GREEN));
        assert_eq!(fb.pixel(100, 100), Some(Rgb::WHITE));
    }

    #[test]
    fn border_overpaints_edges_only() {
        let mut fb = canvas();
        let mut b = button();
        b.set_border(2, DARK);
        b.draw(&mut fb);

        assert_eq!(fb.pixel(200, 100), Some(DARK));
        assert_eq!(fb.pixel(200, 101), Some(DARK));
        assert_eq!(fb.pixel(200, 102), Some(GREEN));
        assert_eq!(fb.pixel(529, 190), Some(DARK));
        assert_eq!(fb.pixel(315, 190), Some(GREEN));
    }

    #[test]
    fn zero_border_is_none() {
        let b = button().with_border(0, DARK);
        let mut fb = canvas();
        b.draw(&mut fb);
        assert_eq!(fb.pixel(200, 100), Some(GREEN));
    }

    // ── hit testing ───────────────────────────────────────────────────────

    #[test]
    fn contains_is_half_open() {
        let b = button();
        assert!(b.contains(100, 100));
        assert!(b.contains(529, 279));
        assert!(!b.contains(530, 279));
        assert!(!b.contains(529, 280));
    }

    #[test]
    fn click_floors_fractional_positions() {
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let mut b = button().on_click(move || h.set(h.get() + 1));

        assert!(b.handle_click(Vec2::new(529.9, 279.9)));
        assert!(!b.handle_click(Vec2::new(99.9, 150.0)));
        assert!(!b.handle_click(Vec2::new(f32::NAN, 150.0)));
        assert_eq!(hits.get(), 1);
    }
}
