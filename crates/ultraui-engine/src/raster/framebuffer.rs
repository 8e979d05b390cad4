use super::{RasterError, Rgb};

/// Color every pixel takes after construction or resize.
pub const DEFAULT_BACKGROUND: Rgb = Rgb::WHITE;

/// Quadrant selector for [`Framebuffer::draw_quarter_circle`], relative to the
/// circle center in screen space (+Y down).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Quadrant {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::UpperLeft,
        Quadrant::UpperRight,
        Quadrant::LowerLeft,
        Quadrant::LowerRight,
    ];

    /// Sign applied to `(dx, dy)` offsets to land in this quadrant.
    #[inline]
    pub const fn signs(self) -> (i32, i32) {
        match self {
            Quadrant::UpperLeft => (-1, -1),
            Quadrant::UpperRight => (1, -1),
            Quadrant::LowerLeft => (-1, 1),
            Quadrant::LowerRight => (1, 1),
        }
    }
}

impl TryFrom<u8> for Quadrant {
    type Error = u8;

    /// Numeric selector: 1 = upper-left, 2 = upper-right, 3 = lower-left,
    /// 4 = lower-right.
    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(Quadrant::UpperLeft),
            2 => Ok(Quadrant::UpperRight),
            3 => Ok(Quadrant::LowerLeft),
            4 => Ok(Quadrant::LowerRight),
            other => Err(other),
        }
    }
}

/// Owned software pixel buffer.
///
/// Invariant: `pixels.len() == width * height`, row-major, origin top-left.
/// Both dimensions are always non-zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Framebuffer {
    /// Allocates a `width × height` buffer filled with [`DEFAULT_BACKGROUND`].
    pub fn new(width: u32, height: u32) -> Result<Self, RasterError> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![DEFAULT_BACKGROUND.to_packed(); len],
        })
    }

    /// Reallocates to `width × height` and refills with [`DEFAULT_BACKGROUND`].
    ///
    /// Prior contents are discarded even when the extent is unchanged. On error
    /// the buffer is left untouched.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), RasterError> {
        let len = checked_len(width, height)?;
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(len, DEFAULT_BACKGROUND.to_packed());
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Packed `0x00RRGGBB` pixels, row-major.
    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Fills every pixel with `color`.
    pub fn clear(&mut self, color: Rgb) {
        self.pixels.fill(color.to_packed());
    }

    /// Reads the pixel at `(x, y)`, or `None` outside the buffer.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        self.index(x, y).map(|i| Rgb::from_packed(self.pixels[i]))
    }

    /// Writes `color` at `(x, y)`. Out-of-range coordinates are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color.to_packed();
        }
    }

    /// Mixes `color` into the pixel at `(x, y)` with 8-bit coverage.
    /// Out-of-range coordinates are ignored.
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgb, coverage: u8) {
        if coverage == 0 {
            return;
        }
        if let Some(i) = self.index(x, y) {
            let dst = Rgb::from_packed(self.pixels[i]);
            self.pixels[i] = dst.blend(color, coverage).to_packed();
        }
    }

    /// Fills the axis-aligned rectangle `[x, x + w) × [y, y + h)`.
    ///
    /// Clips exactly like per-pixel [`set_pixel`](Self::set_pixel) calls would;
    /// non-positive extents draw nothing.
    pub fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb) {
        if w <= 0 || h <= 0 {
            return;
        }

        let x0 = (x as i64).clamp(0, self.width as i64) as usize;
        let x1 = (x as i64 + w as i64).clamp(0, self.width as i64) as usize;
        let y0 = (y as i64).clamp(0, self.height as i64) as usize;
        let y1 = (y as i64 + h as i64).clamp(0, self.height as i64) as usize;
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let stride = self.width as usize;
        let packed = color.to_packed();
        for row in y0..y1 {
            self.pixels[row * stride + x0..row * stride + x1].fill(packed);
        }
    }

    /// Fills one quadrant of the disk of `radius` centered on `(cx, cy)`.
    ///
    /// Every integer offset `(dx, dy)` in `[0, radius]²` with
    /// `dx² + dy² <= radius²` paints `(cx ± dx, cy ± dy)`, signs chosen by
    /// `quadrant`. Cost is `O(radius²)`. A negative radius draws nothing.
    pub fn draw_quarter_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Rgb, quadrant: Quadrant) {
        if radius < 0 {
            return;
        }

        let (sx, sy) = quadrant.signs();
        // Offsets that land outside the buffer can never paint, so only the
        // visible part of `[0, radius]²` is walked.
        let Some((dx0, dx1)) = visible_offsets(cx, sx, radius, self.width) else { return };
        let Some((dy0, dy1)) = visible_offsets(cy, sy, radius, self.height) else { return };

        let r2 = radius as i64 * radius as i64;
        let packed = color.to_packed();
        let stride = self.width as usize;
        for dy in dy0..=dy1 {
            let py = (cy as i64 + sy as i64 * dy) as usize;
            for dx in dx0..=dx1 {
                if dx * dx + dy * dy <= r2 {
                    let px = (cx as i64 + sx as i64 * dx) as usize;
                    self.pixels[py * stride + px] = packed;
                }
            }
        }
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
}

/// Range of offsets `d` in `[0, radius]` for which `c + sign * d` falls in
/// `[0, extent)`, or `None` when no offset does.
fn visible_offsets(c: i32, sign: i32, radius: i32, extent: u32) -> Option<(i64, i64)> {
    let (c, r, last) = (c as i64, radius as i64, extent as i64 - 1);
    let (lo, hi) = if sign > 0 {
        ((-c).max(0), r.min(last - c))
    } else {
        ((c - last).max(0), r.min(c))
    };
    (lo <= hi).then_some((lo, hi))
}

fn checked_len(width: u32, height: u32) -> Result<usize, RasterError> {
    if width == 0 || height == 0 {
        return Err(RasterError::EmptyExtent { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(RasterError::ExtentOverflow { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(0xFF, 0x00, 0x00);

    fn fb(w: u32, h: u32) -> Framebuffer {
        Framebuffer::new(w, h).expect("non-empty extent")
    }

    // ── construction / resize ─────────────────────────────────────────────

    #[test]
    fn new_fills_with_default_background() {
        let f = fb(4, 3);
        assert_eq!(f.pixels().len(), 12);
        assert!(f.pixels().iter().all(|&p| p == DEFAULT_BACKGROUND.to_packed()));
    }

    #[test]
    fn new_rejects_zero_extent() {
        assert_eq!(
            Framebuffer::new(0, 10),
            Err(RasterError::EmptyExtent { width: 0, height: 10 })
        );
    }

    #[test]
    fn resize_always_yields_exact_length() {
        let mut f = fb(8, 8);
        for (w, h) in [(1, 1), (800, 600), (3, 700), (800, 600), (2, 2)] {
            f.resize(w, h).unwrap();
            assert_eq!(f.pixels().len(), (w * h) as usize);
            assert_eq!((f.width(), f.height()), (w, h));
        }
    }

    #[test]
    fn resize_discards_prior_contents() {
        let mut f = fb(4, 4);
        f.clear(RED);
        f.resize(4, 4).unwrap();
        assert!(f.pixels().iter().all(|&p| p == DEFAULT_BACKGROUND.to_packed()));
    }

    #[test]
    fn failed_resize_leaves_buffer_intact() {
        let mut f = fb(4, 4);
        f.clear(RED);
        assert!(f.resize(4, 0).is_err());
        assert_eq!((f.width(), f.height()), (4, 4));
        assert_eq!(f.pixel(3, 3), Some(RED));
    }

    // ── clear / set_pixel ─────────────────────────────────────────────────

    #[test]
    fn clear_reaches_every_pixel() {
        let mut f = fb(17, 9);
        f.clear(RED);
        for y in 0..9 {
            for x in 0..17 {
                assert_eq!(f.pixel(x, y), Some(RED));
            }
        }
    }

    #[test]
    fn set_pixel_in_range_is_readable() {
        let mut f = fb(5, 4);
        for y in 0..4 {
            for x in 0..5 {
                let c = Rgb::new(x as u8, y as u8, 7);
                f.set_pixel(x, y, c);
                assert_eq!(f.pixel(x, y), Some(c));
            }
        }
    }

    #[test]
    fn set_pixel_out_of_range_is_ignored() {
        let mut f = fb(5, 4);
        let before = f.clone();
        for (x, y) in [(-1, 0), (0, -1), (5, 0), (0, 4), (i32::MIN, i32::MAX), (100, 100)] {
            f.set_pixel(x, y, RED);
            assert_eq!(f.pixel(x, y), None);
        }
        assert_eq!(f, before);
    }

    #[test]
    fn blend_pixel_respects_bounds_and_coverage() {
        let mut f = fb(2, 2);
        f.blend_pixel(0, 0, RED, 255);
        f.blend_pixel(1, 0, RED, 0);
        f.blend_pixel(9, 9, RED, 255);
        assert_eq!(f.pixel(0, 0), Some(RED));
        assert_eq!(f.pixel(1, 0), Some(DEFAULT_BACKGROUND));
    }

    // ── draw_rect ─────────────────────────────────────────────────────────

    #[test]
    fn draw_rect_fills_half_open_area() {
        let mut f = fb(10, 10);
        f.draw_rect(2, 3, 4, 2, RED);
        for y in 0..10 {
            for x in 0..10 {
                let inside = (2..6).contains(&x) && (3..5).contains(&y);
                let expected = if inside { RED } else { DEFAULT_BACKGROUND };
                assert_eq!(f.pixel(x, y), Some(expected), "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn draw_rect_clips_at_edges_and_negative_origin() {
        let mut f = fb(4, 4);
        f.draw_rect(-2, -2, 4, 4, RED);
        assert_eq!(f.pixel(0, 0), Some(RED));
        assert_eq!(f.pixel(1, 1), Some(RED));
        assert_eq!(f.pixel(2, 2), Some(DEFAULT_BACKGROUND));

        f.draw_rect(3, 3, 100, 100, RED);
        assert_eq!(f.pixel(3, 3), Some(RED));
    }

    #[test]
    fn draw_rect_non_positive_extent_is_noop() {
        let mut f = fb(4, 4);
        let before = f.clone();
        f.draw_rect(1, 1, 0, 3, RED);
        f.draw_rect(1, 1, 3, -2, RED);
        assert_eq!(f, before);
    }

    // ── draw_quarter_circle ───────────────────────────────────────────────

    #[test]
    fn quarter_circle_paints_exactly_the_disk_sector() {
        let (cx, cy, r) = (10, 10, 5);
        for quadrant in Quadrant::ALL {
            let mut f = fb(21, 21);
            f.draw_quarter_circle(cx, cy, r, RED, quadrant);

            let (sx, sy) = quadrant.signs();
            let mut expected = 0;
            for dy in 0..=r {
                for dx in 0..=r {
                    let inside = dx * dx + dy * dy <= r * r;
                    if inside {
                        expected += 1;
                    }
                    let got = f.pixel(cx + sx * dx, cy + sy * dy);
                    assert_eq!(got == Some(RED), inside, "{quadrant:?} offset ({dx}, {dy})");
                }
            }

            let painted = f.pixels().iter().filter(|&&p| p == RED.to_packed()).count();
            assert_eq!(painted, expected, "{quadrant:?} painted outside its sector");
        }
    }

    #[test]
    fn quarter_circle_radius_zero_paints_center_only() {
        let mut f = fb(3, 3);
        f.draw_quarter_circle(1, 1, 0, RED, Quadrant::LowerRight);
        let painted = f.pixels().iter().filter(|&&p| p == RED.to_packed()).count();
        assert_eq!(painted, 1);
        assert_eq!(f.pixel(1, 1), Some(RED));
    }

    #[test]
    fn quarter_circle_clips_silently() {
        let mut f = fb(4, 4);
        f.draw_quarter_circle(0, 0, 6, RED, Quadrant::UpperLeft);
        assert_eq!(f.pixel(0, 0), Some(RED));
        assert_eq!(f.pixel(1, 0), Some(DEFAULT_BACKGROUND));
    }

    #[test]
    fn quarter_circle_huge_radius_clips_without_overflow() {
        let mut f = fb(4, 4);
        f.draw_quarter_circle(0, 0, i32::MAX, RED, Quadrant::LowerRight);
        assert!(f.pixels().iter().all(|&p| p == RED.to_packed()));

        let mut f = fb(4, 4);
        f.draw_quarter_circle(i32::MIN, 0, i32::MAX, RED, Quadrant::UpperLeft);
        assert!(f.pixels().iter().all(|&p| p == DEFAULT_BACKGROUND.to_packed()));
    }

    #[test]
    fn quadrant_numeric_selector() {
        assert_eq!(Quadrant::try_from(1), Ok(Quadrant::UpperLeft));
        assert_eq!(Quadrant::try_from(2), Ok(Quadrant::UpperRight));
        assert_eq!(Quadrant::try_from(3), Ok(Quadrant::LowerLeft));
        assert_eq!(Quadrant::try_from(4), Ok(Quadrant::LowerRight));
        assert_eq!(Quadrant::try_from(0), Err(0));
        assert_eq!(Quadrant::try_from(5), Err(5));
    }
}
