use std::io::{self, Write};

use crate::{framebuffer::Framebuffer, gfx::color::Rgb565};

/// Whatever pushes a finished frame to the panel.
pub trait DisplayTransport {
    fn send_fb(&mut self, frame: &Framebuffer);
}

impl<T: DisplayTransport + ?Sized> DisplayTransport for &mut T {
    fn send_fb(&mut self, frame: &Framebuffer) {
        (**self).send_fb(frame)
    }
}

/// Keeps a copy of every frame it is sent.
#[derive(Default)]
pub struct FrameRecorder {
    pub frames: Vec<Framebuffer>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        FrameRecorder::default()
    }

    pub fn last(&self) -> Option<&Framebuffer> {
        self.frames.last()
    }
}

impl DisplayTransport for FrameRecorder {
    fn send_fb(&mut self, frame: &Framebuffer) {
        self.frames.push(frame.clone());
    }
}

/// Expands frames into an RGBA8 surface of the same dimensions, e.g. a
/// `pixels` frame.
pub struct RgbaTransport<'a> {
    surface: &'a mut [u8],
}

impl<'a> RgbaTransport<'a> {
    pub fn new(surface: &'a mut [u8]) -> Self {
        RgbaTransport { surface }
    }
}

impl DisplayTransport for RgbaTransport<'_> {
    fn send_fb(&mut self, frame: &Framebuffer) {
        for (rgba, &word) in self.surface.chunks_exact_mut(4).zip(frame.data.iter()) {
            rgba.copy_from_slice(&Rgb565::from_wire(word).to_rgba8());
        }
    }
}

/// Write a frame as a binary PPM image.
pub fn write_ppm<W: Write>(frame: &Framebuffer, mut out: W) -> io::Result<()> {
    write!(out, "P6\n{} {}\n255\n", frame.width(), frame.height())?;
    let mut rgb = Vec::with_capacity(frame.data.len() * 3);
    for &word in &frame.data {
        rgb.extend_from_slice(&Rgb565::from_wire(word).to_rgba8()[..3]);
    }
    out.write_all(&rgb)?;
    out.flush()
}
