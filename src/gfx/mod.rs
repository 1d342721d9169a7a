pub mod color;
pub mod downscale;
pub mod render;

use log::{debug, info};

use crate::framebuffer::Framebuffer;
use crate::tilemap::{Rect, TileMap};
use crate::transport::DisplayTransport;
use color::Rgb565;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scale {
    /// Draw straight at panel resolution.
    Native,
    /// Draw at twice the panel resolution and fold down on flush.
    Double,
}

/// A rendering session: the working framebuffer plus, in double mode, the
/// panel sized buffer it is folded into.
pub struct TileGfx {
    scale: Scale,
    frame: Framebuffer,
    folded: Option<Framebuffer>,
}

impl TileGfx {
    /// Buffers start out black.
    pub fn init(scale: Scale) -> Self {
        let (frame, folded) = match scale {
            Scale::Native => (Framebuffer::native(), None),
            Scale::Double => (Framebuffer::double(), Some(Framebuffer::native())),
        };
        info!(
            "tilegfx init: {:?}, working buffer {}x{}",
            scale,
            frame.width(),
            frame.height()
        );

        TileGfx {
            scale,
            frame,
            folded,
        }
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn frame(&self) -> &Framebuffer {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut Framebuffer {
        &mut self.frame
    }

    pub fn clear(&mut self, color: Rgb565) {
        self.frame.fill(color);
    }

    pub fn render(&mut self, map: &TileMap, offset_x: i32, offset_y: i32, dest: Rect) {
        render::render_tile_map(&mut self.frame, map, offset_x, offset_y, dest);
    }

    /// Finish the frame and hand it to `transport`. The working buffer is
    /// left untouched.
    pub fn flush<T: DisplayTransport + ?Sized>(&mut self, transport: &mut T) {
        match self.folded.as_mut() {
            Some(folded) => {
                debug!(
                    "flush: folding {}x{} working buffer",
                    self.frame.width(),
                    self.frame.height()
                );
                downscale::downscale(&self.frame, folded);
                transport.send_fb(folded);
            }
            None => {
                debug!("flush: native buffer");
                transport.send_fb(&self.frame);
            }
        }
    }
}
