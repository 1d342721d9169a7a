use crate::gfx::color::Rgb565;

/// Native width of the panel in pixels.
pub const SCREEN_W: usize = 80;
/// Native height of the panel in pixels.
pub const SCREEN_H: usize = 64;

/// RGB565 pixel store. Every word is kept byte swapped (wire order), so a
/// buffer can be handed to the transport without conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pub data: Vec<u16>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Framebuffer {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    pub fn native() -> Self {
        Framebuffer::new(SCREEN_W, SCREEN_H)
    }

    pub fn double() -> Self {
        Framebuffer::new(SCREEN_W * 2, SCREEN_H * 2)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_native(&self) -> bool {
        self.width == SCREEN_W && self.height == SCREEN_H
    }

    /// Raw wire word at `(x, y)`.
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<u16> {
        if x < self.width && y < self.height {
            Some(self.data[y * self.width + x])
        } else {
            None
        }
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgb565) {
        if x < self.width && y < self.height {
            self.data[y * self.width + x] = color.to_wire();
        }
    }

    pub fn fill(&mut self, color: Rgb565) {
        self.data.fill(color.to_wire());
    }

    pub fn row(&self, y: usize) -> &[u16] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    /// Serialize in transport order: for each pixel, high color byte first.
    pub fn to_wire_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.data.len() * 2);
        for &word in &self.data {
            bytes.extend_from_slice(&Rgb565::from_wire(word).0.to_be_bytes());
        }
        bytes
    }
}
