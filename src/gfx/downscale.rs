//! Folds a double size working buffer down to panel resolution.
//!
//! Each output pixel comes from a 2x2 block of the source. The two pixels of
//! a row are blended with subpixel weights (red leans on the left pixel,
//! blue on the right one, green is split evenly), which approximates the
//! stripe layout of the panel. The two rows are then averaged.

use crate::{
    framebuffer::Framebuffer,
    gfx::color::{Rgb565, fold_block},
};

/// Write the folded image of `src` into `dst`.
///
/// # Panics
/// If `src` is not exactly twice the size of `dst` on both axes.
pub fn downscale(src: &Framebuffer, dst: &mut Framebuffer) {
    assert!(
        src.width() == dst.width() * 2 && src.height() == dst.height() * 2,
        "cannot fold {}x{} into {}x{}",
        src.width(),
        src.height(),
        dst.width(),
        dst.height()
    );

    let stride = src.width();
    let mut out = 0;
    for y in 0..dst.height() {
        let top = &src.data[2 * y * stride..(2 * y + 1) * stride];
        let bottom = &src.data[(2 * y + 1) * stride..(2 * y + 2) * stride];
        for (t, b) in top.chunks_exact(2).zip(bottom.chunks_exact(2)) {
            let folded = fold_block(
                [Rgb565::from_wire(t[0]), Rgb565::from_wire(t[1])],
                [Rgb565::from_wire(b[0]), Rgb565::from_wire(b[1])],
            );
            dst.data[out] = folded.to_wire();
            out += 1;
        }
    }
}
