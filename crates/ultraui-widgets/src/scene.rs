//! Software-path application state.
//!
//! [`RasterScene`] owns the framebuffer and the single button, and tracks two
//! flags: `hover` (starts false) and `dirty` (starts true so the first paint
//! always presents). Event handlers repaint the framebuffer and raise `dirty`;
//! `dirty` is lowered only by [`RasterScene::mark_presented`], once the frame
//! actually reached the screen.

use ultraui_engine::coords::Vec2;
use ultraui_engine::raster::{Framebuffer, RasterError, Rgb, DEFAULT_BACKGROUND};
use ultraui_engine::text::LabelFont;

use crate::capability::{Clickable, Drawable};
use crate::raster_button::RasterButton;

/// Colours used to repaint the scene.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Palette {
    pub background: Rgb,
    pub base: Rgb,
    pub hover: Rgb,
    pub label: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND,
            base: Rgb::from_packed(0x0B8400),
            hover: Rgb::from_packed(0x12A80A),
            label: Rgb::WHITE,
        }
    }
}

/// Hover transition reported by pointer handlers.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HoverChange {
    Entered,
    Left,
}

impl HoverChange {
    #[inline]
    pub fn is_hovered(self) -> bool {
        self == HoverChange::Entered
    }
}

pub struct RasterScene {
    framebuffer: Framebuffer,
    button: RasterButton,
    palette: Palette,
    hover: bool,
    dirty: bool,
}

impl RasterScene {
    /// Allocates a `width × height` framebuffer and paints the initial frame.
    pub fn new(
        width: u32,
        height: u32,
        button: RasterButton,
        palette: Palette,
    ) -> Result<Self, RasterError> {
        let mut scene = Self {
            framebuffer: Framebuffer::new(width, height)?,
            button,
            palette,
            hover: false,
            dirty: true,
        };
        scene.repaint();
        Ok(scene)
    }

    /// Reallocates the framebuffer to the new extent and repaints.
    ///
    /// A zero extent is rejected and leaves the scene untouched.
    pub fn on_resize(&mut self, width: u32, height: u32) -> Result<(), RasterError> {
        self.framebuffer.resize(width, height)?;
        log::debug!("framebuffer resized to {width}x{height}");
        self.repaint();
        Ok(())
    }

    /// Recomputes hover for a pointer at `(x, y)` framebuffer pixels.
    ///
    /// Repaints and raises `dirty` only when hover actually changes.
    pub fn on_pointer_moved(&mut self, x: i32, y: i32) -> Option<HoverChange> {
        self.set_hover(self.button.contains(x, y))
    }

    /// The pointer left the window; the button can no longer be hovered.
    pub fn on_pointer_left(&mut self) -> Option<HoverChange> {
        self.set_hover(false)
    }

    /// Dispatches a primary press at `(x, y)` framebuffer pixels.
    pub fn on_pointer_pressed(&mut self, x: f32, y: f32) -> bool {
        self.button.handle_click(Vec2::new(x, y))
    }

    /// Returns the framebuffer if it still needs presenting.
    ///
    /// `dirty` is left set; call [`mark_presented`](Self::mark_presented)
    /// after the frame was actually shown.
    pub fn pending_frame(&self) -> Option<&Framebuffer> {
        self.dirty.then_some(&self.framebuffer)
    }

    /// Records that the pending frame reached the screen.
    pub fn mark_presented(&mut self) {
        self.dirty = false;
    }

    /// Copies the pending frame into `staging` and blends the button label
    /// over the copy. The scene framebuffer itself is never written.
    ///
    /// Returns `false`, leaving `staging` untouched, when nothing is pending.
    pub fn compose_frame(
        &self,
        staging: &mut Framebuffer,
        font: Option<&mut LabelFont>,
        label_size: f32,
    ) -> bool {
        let Some(frame) = self.pending_frame() else {
            return false;
        };
        staging.clone_from(frame);
        if let Some(font) = font {
            font.draw_centered(
                staging,
                self.button.rect(),
                self.button.label(),
                label_size,
                self.palette.label,
            );
        }
        true
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.hover
    }

    #[inline]
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    #[inline]
    pub fn button(&self) -> &RasterButton {
        &self.button
    }

    fn set_hover(&mut self, hover: bool) -> Option<HoverChange> {
        if hover == self.hover {
            return None;
        }
        self.hover = hover;
        self.repaint();

        let change = if hover {
            HoverChange::Entered
        } else {
            HoverChange::Left
        };
        log::debug!("button hover: {change:?}");
        Some(change)
    }

    fn repaint(&mut self) {
        let fill = if self.hover {
            self.palette.hover
        } else {
            self.palette.base
        };
        self.button.set_fill(fill);

        self.framebuffer.clear(self.palette.background);
        self.button.draw(&mut self.framebuffer);
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use ultraui_engine::raster::PixelRect;

    const TEST_FONT: &[u8] = include_bytes!("../../ultraui-engine/testdata/DejaVuSansMono.ttf");

    fn scene() -> RasterScene {
        let button = RasterButton::new(
            PixelRect::new(100, 100, 430, 180),
            7,
            "Click me",
            Palette::default().base,
        )
        .with_border(2, Rgb::from_packed(0x075E00));
        RasterScene::new(800, 600, button, Palette::default()).unwrap()
    }

    // ── initial state ─────────────────────────────────────────────────────

    #[test]
    fn starts_dirty_and_not_hovered() {
        let s = scene();
        assert!(s.is_dirty());
        assert!(!s.is_hovered());
        assert_eq!(s.framebuffer().pixel(0, 0), Some(Rgb::WHITE));
        assert_eq!(s.framebuffer().pixel(315, 190), Some(Palette::default().base));
    }

    #[test]
    fn zero_extent_is_rejected() {
        let button = RasterButton::new(PixelRect::new(0, 0, 10, 10), 2, "", Rgb::BLACK);
        assert!(RasterScene::new(0, 600, button, Palette::default()).is_err());
    }

    // ── paint ─────────────────────────────────────────────────────────────

    #[test]
    fn unpresented_frame_stays_dirty() {
        let s = scene();
        assert!(s.pending_frame().is_some());
        // Handed out but never presented (surface lost, timed out).
        assert!(s.is_dirty());
        assert!(s.pending_frame().is_some());
    }

    #[test]
    fn mark_presented_is_idempotent() {
        let mut s = scene();
        s.mark_presented();
        assert!(!s.is_dirty());
        assert!(s.pending_frame().is_none());
        s.mark_presented();
        assert!(s.pending_frame().is_none());
    }

    #[test]
    fn skipped_hover_frame_is_retried() {
        let mut s = scene();
        s.mark_presented();
        s.on_pointer_moved(200, 150);

        let first = s.pending_frame().map(|f| f.pixel(315, 190));
        assert_eq!(first, Some(Some(Palette::default().hover)));
        // Present failed; the next redraw must see the same frame.
        let retry = s.pending_frame().map(|f| f.pixel(315, 190));
        assert_eq!(retry, first);

        s.mark_presented();
        assert!(s.pending_frame().is_none());
    }

    // ── compose ───────────────────────────────────────────────────────────

    #[test]
    fn compose_copies_frame_without_label_font() {
        let s = scene();
        let mut staging = Framebuffer::new(1, 1).unwrap();
        assert!(s.compose_frame(&mut staging, None, 16.0));
        assert_eq!(&staging, s.framebuffer());
        assert!(s.is_dirty());
    }

    #[test]
    fn compose_draws_label_into_staging_only() {
        let s = scene();
        let before = s.framebuffer().clone();
        let mut font = LabelFont::from_bytes(TEST_FONT).unwrap();
        let mut staging = Framebuffer::new(800, 600).unwrap();

        assert!(s.compose_frame(&mut staging, Some(&mut font), 16.0));
        assert_eq!(s.framebuffer(), &before);

        let rect = s.button().rect();
        let mut changed = 0;
        for y in 0..600 {
            for x in 0..800 {
                if staging.pixel(x, y) != before.pixel(x, y) {
                    assert!(rect.contains(x, y), "label ink outside button at ({x}, {y})");
                    changed += 1;
                }
            }
        }
        assert!(changed > 0);
    }

    #[test]
    fn compose_without_pending_frame_leaves_staging() {
        let mut s = scene();
        s.mark_presented();
        let mut staging = Framebuffer::new(4, 4).unwrap();
        let before = staging.clone();
        assert!(!s.compose_frame(&mut staging, None, 16.0));
        assert_eq!(staging, before);
    }

    // ── hover ─────────────────────────────────────────────────────────────

    #[test]
    fn only_hover_transitions_set_dirty() {
        let mut s = scene();
        s.mark_presented();

        assert_eq!(s.on_pointer_moved(200, 150), Some(HoverChange::Entered));
        assert!(s.is_dirty());
        assert_eq!(s.framebuffer().pixel(315, 190), Some(Palette::default().hover));
        s.mark_presented();

        for _ in 0..3 {
            assert_eq!(s.on_pointer_moved(200, 150), None);
            assert_eq!(s.on_pointer_moved(201, 151), None);
            assert!(!s.is_dirty());
        }

        assert_eq!(s.on_pointer_moved(10, 10), Some(HoverChange::Left));
        assert!(s.is_dirty());
        assert_eq!(s.framebuffer().pixel(315, 190), Some(Palette::default().base));
        s.mark_presented();

        assert_eq!(s.on_pointer_moved(20, 20), None);
        assert!(!s.is_dirty());
    }

    #[test]
    fn pointer_left_clears_hover() {
        let mut s = scene();
        s.on_pointer_moved(200, 150);
        s.mark_presented();
        assert_eq!(s.on_pointer_left(), Some(HoverChange::Left));
        assert!(!s.is_hovered());
        assert_eq!(s.on_pointer_left(), None);
    }

    // ── resize ────────────────────────────────────────────────────────────

    #[test]
    fn resize_reallocates_and_repaints() {
        let mut s = scene();
        s.on_pointer_moved(200, 150);
        s.mark_presented();

        s.on_resize(1024, 768).unwrap();
        assert!(s.is_dirty());
        assert_eq!(s.framebuffer().width(), 1024);
        assert_eq!(s.framebuffer().pixels().len(), 1024 * 768);
        assert!(s.is_hovered());
        assert_eq!(s.framebuffer().pixel(315, 190), Some(Palette::default().hover));
    }

    #[test]
    fn rejected_resize_keeps_previous_frame() {
        let mut s = scene();
        s.mark_presented();
        assert!(s.on_resize(0, 0).is_err());
        assert!(!s.is_dirty());
        assert_eq!(s.framebuffer().width(), 800);
    }

    // ── click ─────────────────────────────────────────────────────────────

    #[test]
    fn press_inside_fires_callback() {
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let button = RasterButton::new(PixelRect::new(100, 100, 430, 180), 7, "Click me", Rgb::BLACK)
            .on_click(move || h.set(h.get() + 1));
        let mut s = RasterScene::new(800, 600, button, Palette::default()).unwrap();

        assert!(s.on_pointer_pressed(150.0, 150.0));
        assert!(!s.on_pointer_pressed(50.0, 50.0));
        assert_eq!(hits.get(), 1);
        assert!(!s.is_hovered());
    }
}
