/// Opaque 8-bit RGB color as stored in a [`Framebuffer`](super::Framebuffer).
///
/// Packs to `0x00RRGGBB`. There is no alpha channel; partial coverage is
/// expressed by [`Rgb::blend`] at write time.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unpacks `0x00RRGGBB`. The top byte is ignored.
    #[inline]
    pub const fn from_packed(v: u32) -> Self {
        Self {
            r: (v >> 16) as u8,
            g: (v >> 8) as u8,
            b: v as u8,
        }
    }

    #[inline]
    pub const fn to_packed(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Mixes `src` over `self` with 8-bit coverage (0 = keep `self`, 255 = `src`).
    pub fn blend(self, src: Rgb, coverage: u8) -> Rgb {
        let a = coverage as u32;
        let mix = |d: u8, s: u8| -> u8 {
            let v = s as u32 * a + d as u32 * (255 - a);
            // Rounded division by 255.
            ((v + 128 + ((v + 128) >> 8)) >> 8) as u8
        };
        Rgb::new(mix(self.r, src.r), mix(self.g, src.g), mix(self.b, src.b))
    }
}

impl From<u32> for Rgb {
    #[inline]
    fn from(v: u32) -> Self {
        Rgb::from_packed(v)
    }
}

impl From<Rgb> for u32 {
    #[inline]
    fn from(c: Rgb) -> Self {
        c.to_packed()
    }
}
