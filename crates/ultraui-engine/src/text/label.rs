use std::collections::HashMap;
use std::fmt;

use fontdue::layout::{
    CoordinateSystem, GlyphRasterConfig, HorizontalAlign, Layout, LayoutSettings, TextStyle,
};

use crate::raster::{Framebuffer, PixelRect, Rgb};

/// Error returned by [`LabelFont::from_bytes`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Well-known locations of a sans-serif TTF on common Linux distributions,
/// followed by the Windows and macOS defaults.
const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
];

/// Reads the first system font found in the search list.
pub fn load_system_font() -> Option<Vec<u8>> {
    SYSTEM_FONT_PATHS.iter().find_map(|p| {
        let bytes = std::fs::read(p).ok()?;
        log::debug!("label font: {p}");
        Some(bytes)
    })
}

struct CachedGlyph {
    width: usize,
    height: usize,
    coverage: Vec<u8>,
}

/// A single font used to draw button labels into a [`Framebuffer`].
///
/// Glyph bitmaps are rasterized on first use and cached by
/// `GlyphRasterConfig` (glyph index + pixel size) for the font's lifetime.
pub struct LabelFont {
    font: fontdue::Font,
    layout: Layout<()>,
    glyph_cache: HashMap<GlyphRasterConfig, CachedGlyph>,
}

impl LabelFont {
    /// Parses a TrueType or OpenType font from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        Ok(Self {
            font,
            layout: Layout::new(CoordinateSystem::PositiveYDown),
            glyph_cache: HashMap::new(),
        })
    }

    /// Blends `text` at `size` px into `fb`, centered in `rect` on both axes.
    ///
    /// Centering uses the ink bounds of the laid-out glyphs, not the line
    /// metrics. Glyph pixels falling outside the framebuffer are dropped;
    /// text wider than `rect` wraps.
    pub fn draw_centered(
        &mut self,
        fb: &mut Framebuffer,
        rect: PixelRect,
        text: &str,
        size: f32,
        color: Rgb,
    ) {
        if text.is_empty() || rect.width <= 0 || rect.height <= 0 {
            return;
        }

        self.layout.reset(&LayoutSettings {
            max_width: Some(rect.width as f32),
            horizontal_align: HorizontalAlign::Center,
            ..LayoutSettings::default()
        });
        self.layout.append(&[&self.font], &TextStyle::new(text, size, 0));

        // Snapshot positions so the layout borrow ends before the cache is touched.
        let glyphs: Vec<(GlyphRasterConfig, i32, i32, i32, i32)> = self
            .layout
            .glyphs()
            .iter()
            .filter(|g| g.char_data.rasterize() && g.width > 0 && g.height > 0)
            .map(|g| {
                let (x, y) = (g.x.round() as i32, g.y.round() as i32);
                (g.key, x, y, x + g.width as i32, y + g.height as i32)
            })
            .collect();

        let Some((dx, dy)) = ink_offset(&glyphs, rect) else {
            return;
        };

        for (key, gx, gy, _, _) in glyphs {
            let font = &self.font;
            let glyph = self.glyph_cache.entry(key).or_insert_with(|| {
                let (metrics, coverage) = font.rasterize_config(key);
                CachedGlyph {
                    width: metrics.width,
                    height: metrics.height,
                    coverage,
                }
            });

            for row in 0..glyph.height {
                for col in 0..glyph.width {
                    let cov = glyph.coverage[row * glyph.width + col];
                    fb.blend_pixel(
                        gx.saturating_add(dx).saturating_add(col as i32),
                        gy.saturating_add(dy).saturating_add(row as i32),
                        color,
                        cov,
                    );
                }
            }
        }
    }
}

/// Translation moving the union of glyph boxes onto the center of `rect`.
fn ink_offset(
    glyphs: &[(GlyphRasterConfig, i32, i32, i32, i32)],
    rect: PixelRect,
) -> Option<(i32, i32)> {
    let (x0, y0, x1, y1) = glyphs.iter().fold(None, |acc, &(_, l, t, r, b)| match acc {
        None => Some((l, t, r, b)),
        Some((al, at, ar, ab)) => Some((al.min(l), at.min(t), ar.max(r), ab.max(b))),
    })?;
    let target_x = rect.x as f64 + rect.width as f64 / 2.0;
    let target_y = rect.y as f64 + rect.height as f64 / 2.0;
    let dx = (target_x - (x0 as f64 + x1 as f64) / 2.0).round() as i32;
    let dy = (target_y - (y0 as f64 + y1 as f64) / 2.0).round() as i32;
    Some((dx, dy))
}
