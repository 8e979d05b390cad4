//! Rounded-rectangle composition on top of [`Framebuffer`] primitives.
//!
//! A rounded rectangle is the union of a horizontal band, a vertical band and
//! four quarter-circle fills centered `radius` pixels inside each corner.
//!
//! Both functions expect `2 * radius <= min(width, height)`. A violation is
//! logged and the geometry is drawn unchanged: bands with a negative extent
//! draw nothing and the corner disks overlap.

use super::{Framebuffer, PixelRect, Quadrant, Rgb};

/// Corner circle centers, ordered to match [`Quadrant::ALL`].
///
/// The right/bottom centers sit on the last pixel column/row inside the rect,
/// so the shape never extends past `x + width - 1` / `y + height - 1`.
fn corner_centers(rect: PixelRect, radius: i32) -> [(i32, i32, Quadrant); 4] {
    let left = rect.x.saturating_add(radius);
    let top = rect.y.saturating_add(radius);
    let right = far_edge(rect.x, rect.width).saturating_sub(radius);
    let bottom = far_edge(rect.y, rect.height).saturating_sub(radius);
    [
        (left, top, Quadrant::UpperLeft),
        (right, top, Quadrant::UpperRight),
        (left, bottom, Quadrant::LowerLeft),
        (right, bottom, Quadrant::LowerRight),
    ]
}

/// Last pixel coordinate covered by a span of `extent` starting at `start`.
#[inline]
fn far_edge(start: i32, extent: i32) -> i32 {
    start.saturating_add(extent).saturating_sub(1)
}

/// Extent left after insetting both ends by `inset`; may be negative.
#[inline]
fn inset_span(extent: i32, inset: i32) -> i32 {
    extent.saturating_sub(inset.saturating_mul(2))
}

/// Whether `radius` is small enough for the band/corner composition.
#[inline]
pub fn radius_fits(rect: PixelRect, radius: i32) -> bool {
    radius >= 0 && radius.saturating_mul(2) <= rect.width.min(rect.height)
}

fn warn_if_radius_overflows(rect: PixelRect, radius: i32) {
    if !radius_fits(rect, radius) {
        log::warn!(
            "rounded rect {}x{} cannot take radius {radius}; corners will overlap",
            rect.width,
            rect.height
        );
    }
}

/// Fills a rounded rectangle.
pub fn draw_rounded_rect(fb: &mut Framebuffer, rect: PixelRect, radius: i32, color: Rgb) {
    warn_if_radius_overflows(rect, radius);

    let PixelRect { x, y, width: w, height: h } = rect;

    // Horizontal band: full height, inset left/right by the radius.
    fb.draw_rect(x.saturating_add(radius), y, inset_span(w, radius), h, color);
    // Vertical band: full width, inset top/bottom by the radius.
    fb.draw_rect(x, y.saturating_add(radius), w, inset_span(h, radius), color);

    for (cx, cy, quadrant) in corner_centers(rect, radius) {
        fb.draw_quarter_circle(cx, cy, radius, color, quadrant);
    }
}

/// Paints a rounded border `thickness` pixels wide, growing inward.
///
/// Ring `i` draws 1-pixel straight edges inset by `i` and quarter-circle fills
/// of radius `radius - i` at the corners. The corner fills are solid disks, so
/// the pixels between each arc and its corner center take the border color as
/// well. A `thickness` of zero draws nothing.
pub fn draw_rounded_border(
    fb: &mut Framebuffer,
    rect: PixelRect,
    radius: i32,
    thickness: u32,
    color: Rgb,
) {
    if thickness == 0 {
        return;
    }
    warn_if_radius_overflows(rect, radius);

    let PixelRect { x, y, width: w, height: h } = rect;
    let span_x = inset_span(w, radius);
    let span_y = inset_span(h, radius);
    let (inner_x, inner_y) = (x.saturating_add(radius), y.saturating_add(radius));
    let (right, bottom) = (far_edge(x, w), far_edge(y, h));
    let corners = corner_centers(rect, radius);

    for i in 0..thickness.min(i32::MAX as u32) as i32 {
        fb.draw_rect(inner_x, y.saturating_add(i), span_x, 1, color); // top
        fb.draw_rect(inner_x, bottom.saturating_sub(i), span_x, 1, color); // bottom
        fb.draw_rect(x.saturating_add(i), inner_y, 1, span_y, color); // left
        fb.draw_rect(right.saturating_sub(i), inner_y, 1, span_y, color); // right

        for (cx, cy, quadrant) in corners {
            fb.draw_quarter_circle(cx, cy, radius.saturating_sub(i), color, quadrant);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::DEFAULT_BACKGROUND;

    const GREEN: Rgb = Rgb::new(0x0B, 0x84, 0x00);
    const DARK: Rgb = Rgb::new(0x07, 0x5E, 0x00);

    fn canvas() -> Framebuffer {
        let mut fb = Framebuffer::new(800, 600).unwrap();
        fb.clear(Rgb::from_packed(0xFFFFFF));
        fb
    }

    // ── draw_rounded_rect ─────────────────────────────────────────────────

    #[test]
    fn button_scenario_band_vs_corner() {
        let mut fb = canvas();
        let rect = PixelRect::new(100, 100, 430, 180);
        draw_rounded_rect(&mut fb, rect, 7, Rgb::from_packed(0x0B8400));

        // Inside the horizontal band.
        assert_eq!(fb.pixel(107, 100).map(Rgb::to_packed), Some(0x0B8400));
        // Corner pixel: 7² + 7² = 98 > 49, outside the disk and both bands.
        assert_eq!(fb.pixel(100, 100).map(Rgb::to_packed), Some(0xFFFFFF));
    }

    #[test]
    fn rounded_rect_stays_within_its_bounds() {
        let mut fb = canvas();
        let rect = PixelRect::new(100, 100, 430, 180);
        draw_rounded_rect(&mut fb, rect, 7, GREEN);

        for y in 0..600 {
            for x in 0..800 {
                if fb.pixel(x, y) == Some(GREEN) {
                    assert!(rect.contains(x, y), "painted outside rect at ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn rounded_rect_is_mirror_symmetric() {
        let mut fb = canvas();
        let rect = PixelRect::new(10, 20, 60, 40);
        draw_rounded_rect(&mut fb, rect, 9, GREEN);

        for dy in 0..rect.height {
            for dx in 0..rect.width {
                let a = fb.pixel(rect.x + dx, rect.y + dy);
                let mirrored_x = fb.pixel(rect.x + rect.width - 1 - dx, rect.y + dy);
                let mirrored_y = fb.pixel(rect.x + dx, rect.y + rect.height - 1 - dy);
                assert_eq!(a, mirrored_x, "x-mirror at ({dx}, {dy})");
                assert_eq!(a, mirrored_y, "y-mirror at ({dx}, {dy})");
            }
        }
    }

    #[test]
    fn zero_radius_is_a_plain_rect() {
        let mut fb = canvas();
        let rect = PixelRect::new(5, 5, 10, 6);
        draw_rounded_rect(&mut fb, rect, 0, GREEN);
        for y in 0..30 {
            for x in 0..30 {
                assert_eq!(fb.pixel(x, y) == Some(GREEN), rect.contains(x, y));
            }
        }
    }

    #[test]
    fn oversized_radius_draws_without_panicking() {
        let mut fb = canvas();
        let rect = PixelRect::new(10, 10, 20, 8);
        assert!(!radius_fits(rect, 6));
        draw_rounded_rect(&mut fb, rect, 6, GREEN);
        draw_rounded_border(&mut fb, rect, 6, 3, DARK);
        // The vertical band has negative height, the horizontal band still draws.
        assert_eq!(fb.pixel(20, 10), Some(DARK));
    }

    #[test]
    fn extreme_radius_saturates_instead_of_overflowing() {
        let mut fb = canvas();
        let rect = PixelRect::new(0, 0, 40, 40);
        let radius = i32::MAX / 2 + 1;
        assert!(!radius_fits(rect, radius));

        draw_rounded_rect(&mut fb, rect, radius, GREEN);
        draw_rounded_border(&mut fb, rect, radius, 2, DARK);
        draw_rounded_rect(&mut fb, rect, i32::MAX, GREEN);

        // Both bands collapse; the corner disks are centred far outside.
        assert_eq!(fb.pixel(20, 20), Some(Rgb::WHITE));
    }

    #[test]
    fn radius_fits_boundary() {
        let rect = PixelRect::new(0, 0, 20, 14);
        assert!(radius_fits(rect, 7));
        assert!(!radius_fits(rect, 8));
        assert!(!radius_fits(rect, -1));
    }

    // ── draw_rounded_border ───────────────────────────────────────────────

    #[test]
    fn border_paints_inward_rings_on_straight_edges() {
        let mut fb = canvas();
        let rect = PixelRect::new(10, 10, 40, 30);
        draw_rounded_rect(&mut fb, rect, 5, GREEN);
        draw_rounded_border(&mut fb, rect, 5, 2, DARK);

        // Top edge: two rows of border, then fill.
        assert_eq!(fb.pixel(30, 10), Some(DARK));
        assert_eq!(fb.pixel(30, 11), Some(DARK));
        assert_eq!(fb.pixel(30, 12), Some(GREEN));
        // Bottom edge.
        assert_eq!(fb.pixel(30, 39), Some(DARK));
        assert_eq!(fb.pixel(30, 38), Some(DARK));
        assert_eq!(fb.pixel(30, 37), Some(GREEN));
        // Left and right edges.
        assert_eq!(fb.pixel(10, 25), Some(DARK));
        assert_eq!(fb.pixel(11, 25), Some(DARK));
        assert_eq!(fb.pixel(12, 25), Some(GREEN));
        assert_eq!(fb.pixel(49, 25), Some(DARK));
        assert_eq!(fb.pixel(48, 25), Some(DARK));
        assert_eq!(fb.pixel(47, 25), Some(GREEN));
        // Outside the rect is untouched.
        assert_eq!(fb.pixel(30, 9), Some(DEFAULT_BACKGROUND));
    }

    #[test]
    fn border_corner_fills_overpaint_corner_interior() {
        let mut fb = canvas();
        let rect = PixelRect::new(10, 10, 40, 30);
        draw_rounded_rect(&mut fb, rect, 5, GREEN);
        draw_rounded_border(&mut fb, rect, 5, 1, DARK);

        // Inside the upper-left corner disk (center (15, 15)), not on the arc.
        assert_eq!(fb.pixel(14, 14), Some(DARK));
        assert_eq!(fb.pixel(15, 15), Some(DARK));
        // The corner pixel itself lies outside the disk.
        assert_eq!(fb.pixel(10, 10), Some(DEFAULT_BACKGROUND));
    }

    #[test]
    fn zero_thickness_border_is_noop() {
        let mut fb = canvas();
        let before = fb.clone();
        draw_rounded_border(&mut fb, PixelRect::new(10, 10, 40, 30), 5, 0, DARK);
        assert_eq!(fb, before);
    }
}
