/// A 16-bit color, 5 bits red, 6 bits green, 5 bits blue, in natural word
/// order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb565(pub u16);

impl Rgb565 {
    pub const BLACK: Self = Self(0x0000);
    pub const WHITE: Self = Self(0xffff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        let r = (r & 0x1f) as u16;
        let g = (g & 0x3f) as u16;
        let b = (b & 0x1f) as u16;
        Self((r << 11) | (g << 5) | b)
    }

    pub const fn from_rgb888(r: u8, g: u8, b: u8) -> Self {
        Self::new(r >> 3, g >> 2, b >> 3)
    }

    /// The panel expects the two bytes of each pixel swapped.
    pub const fn from_wire(word: u16) -> Self {
        Self(word.swap_bytes())
    }

    pub const fn to_wire(self) -> u16 {
        self.0.swap_bytes()
    }

    pub const fn red(self) -> u8 {
        ((self.0 >> 11) & 0x1f) as u8
    }

    pub const fn green(self) -> u8 {
        ((self.0 >> 5) & 0x3f) as u8
    }

    pub const fn blue(self) -> u8 {
        (self.0 & 0x1f) as u8
    }

    /// Expand to 8 bits per channel, replicating the high bits into the low
    /// ones so full scale maps to 255.
    pub const fn to_rgba8(self) -> [u8; 4] {
        let r = self.red();
        let g = self.green();
        let b = self.blue();
        [(r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2), 0xff]
    }
}

// Horizontal subpixel weights. The left pixel dominates red, the right one
// dominates blue, green is shared evenly.

pub const fn blend_red(left: u8, right: u8) -> u8 {
    ((left as u16 * 3 + right as u16) / 4) as u8
}

pub const fn blend_green(left: u8, right: u8) -> u8 {
    ((left as u16 + right as u16) / 2) as u8
}

pub const fn blend_blue(left: u8, right: u8) -> u8 {
    ((left as u16 + right as u16 * 3) / 4) as u8
}

pub const fn average(a: u8, b: u8) -> u8 {
    ((a as u16 + b as u16) / 2) as u8
}

/// Fold one horizontal pixel pair into channel values `(r, g, b)`.
pub const fn subpixel_pair(left: Rgb565, right: Rgb565) -> (u8, u8, u8) {
    (
        blend_red(left.red(), right.red()),
        blend_green(left.green(), right.green()),
        blend_blue(left.blue(), right.blue()),
    )
}

/// Fold a 2x2 block into one pixel: each row is blended horizontally, then
/// the two rows are averaged.
pub const fn fold_block(top: [Rgb565; 2], bottom: [Rgb565; 2]) -> Rgb565 {
    let (tr, tg, tb) = subpixel_pair(top[0], top[1]);
    let (br, bg, bb) = subpixel_pair(bottom[0], bottom[1]);
    Rgb565::new(average(tr, br), average(tg, bg), average(tb, bb))
}
