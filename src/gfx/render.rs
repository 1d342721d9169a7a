use log::trace;

use crate::{
    framebuffer::Framebuffer,
    tilemap::{Rect, TILE_SIZE, TileMap},
};

const TILE: i32 = TILE_SIZE as i32;

/// Copy a tile that lies entirely inside the clip area.
fn blit_full(frame: &mut Framebuffer, tile: &[u16], x: i32, y: i32) {
    let width = frame.width();
    for (row, line) in tile.chunks_exact(TILE_SIZE).enumerate() {
        let base = (y as usize + row) * width + x as usize;
        frame.data[base..base + TILE_SIZE].copy_from_slice(line);
    }
}

/// Copy the part of a tile that falls inside `clip`.
fn blit_clipped(frame: &mut Framebuffer, tile: &[u16], x: i32, y: i32, clip: &Rect) {
    let width = frame.width();
    for (row, line) in tile.chunks_exact(TILE_SIZE).enumerate() {
        let py = y + row as i32;
        if py < clip.y || py >= clip.bottom() {
            continue;
        }
        for (col, &pixel) in line.iter().enumerate() {
            let px = x + col as i32;
            if px >= clip.x && px < clip.right() {
                frame.data[py as usize * width + px as usize] = pixel;
            }
        }
    }
}

/// Paint the window of an endlessly repeating tile map seen through `dest`,
/// with the map origin shifted by `(offset_x, offset_y)`. Framebuffer pixel
/// `(dest.x, dest.y)` shows map pixel `(offset_x, offset_y)`.
///
/// Only pixels inside both `dest` and the framebuffer are written.
pub fn render_tile_map(
    frame: &mut Framebuffer,
    map: &TileMap,
    offset_x: i32,
    offset_y: i32,
    dest: Rect,
) {
    let screen = Rect::new(0, 0, frame.width() as i32, frame.height() as i32);
    let clip = dest.intersect(&screen);
    if dest.is_empty() || clip.is_empty() {
        trace!("render skipped, {:?} is outside the framebuffer", dest);
        return;
    }

    let off_x = offset_x.rem_euclid(map.pixel_width());
    let off_y = offset_y.rem_euclid(map.pixel_height());

    // Grow the field so it starts on the edges of the corner tiles; whatever
    // sticks out of the clip area is cut off per tile.
    let start_x = dest.x - (off_x & (TILE - 1));
    let start_y = dest.y - (off_y & (TILE - 1));

    // Tiles before the visible part of dest never touch the framebuffer.
    let skip_cols = (clip.x - start_x) / TILE;
    let skip_rows = (clip.y - start_y) / TILE;

    let mut row = (off_y / TILE + skip_rows) as usize % map.height();
    let mut y = start_y + skip_rows * TILE;
    while y < clip.bottom() {
        let mut column = (off_x / TILE + skip_cols) as usize % map.width();
        let mut x = start_x + skip_cols * TILE;
        while x < clip.right() {
            let tile = map.tile_gfx(column, row);
            if clip.contains(x, y) && clip.contains(x + TILE - 1, y + TILE - 1) {
                blit_full(frame, tile, x, y);
            } else {
                blit_clipped(frame, tile, x, y, &clip);
            }

            column += 1;
            if column == map.width() {
                column = 0;
            }
            x += TILE;
        }

        row += 1;
        if row == map.height() {
            row = 0;
        }
        y += TILE;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::gfx::color::Rgb565;
    use crate::tilemap::{TILE_PIXELS, TileAtlas};

    const SENTINEL: u16 = 0xbeef;

    fn uniform_map(w: usize, h: usize, color: u16) -> TileMap {
        let atlas = TileAtlas::new(&vec![color; TILE_PIXELS]).unwrap();
        TileMap::new(w, h, vec![0; w * h], atlas).unwrap()
    }

    fn checkerboard() -> (TileMap, u16, u16) {
        let (a, b) = (0xf800, 0x001f);
        let mut gfx = vec![a; TILE_PIXELS];
        gfx.extend(vec![b; TILE_PIXELS]);
        let atlas = TileAtlas::new(&gfx).unwrap();
        let map = TileMap::new(2, 2, vec![0, 1, 1, 0], atlas).unwrap();
        (map, Rgb565(a).to_wire(), Rgb565(b).to_wire())
    }

    // Every pixel of every tile is distinct, so any misplaced pixel shows.
    fn patterned_map(w: usize, h: usize) -> TileMap {
        let count = w * h;
        let gfx: Vec<u16> = (0..count * TILE_PIXELS).map(|i| i as u16).collect();
        let atlas = TileAtlas::new(&gfx).unwrap();
        let tiles = (0..count as u16).rev().collect();
        TileMap::new(w, h, tiles, atlas).unwrap()
    }

    fn expected_pixel(map: &TileMap, off_x: i32, off_y: i32, dest: &Rect, px: i32, py: i32) -> u16 {
        let mx = (px - dest.x + off_x).rem_euclid(map.pixel_width()) as usize;
        let my = (py - dest.y + off_y).rem_euclid(map.pixel_height()) as usize;
        map.tile_gfx(mx / TILE_SIZE, my / TILE_SIZE)[(my % TILE_SIZE) * TILE_SIZE + mx % TILE_SIZE]
    }

    fn sentinel_frame(width: usize, height: usize) -> Framebuffer {
        let mut frame = Framebuffer::new(width, height);
        frame.data.fill(SENTINEL);
        frame
    }

    fn assert_matches_reference(map: &TileMap, off_x: i32, off_y: i32, dest: Rect) {
        let mut frame = sentinel_frame(80, 64);
        render_tile_map(&mut frame, map, off_x, off_y, dest);
        for py in 0..64 {
            for px in 0..80 {
                let got = frame.data[py as usize * 80 + px as usize];
                let want = if dest.contains(px, py) {
                    expected_pixel(map, off_x, off_y, &dest, px, py)
                } else {
                    SENTINEL
                };
                assert_eq!(
                    got, want,
                    "pixel ({}, {}) offset ({}, {}) dest {:?}",
                    px, py, off_x, off_y, dest
                );
            }
        }
    }

    #[test]
    fn test_uniform_map_at_origin() {
        let map = uniform_map(2, 2, 0x1234);
        let mut frame = sentinel_frame(80, 64);
        render_tile_map(&mut frame, &map, 0, 0, Rect::new(0, 0, 16, 16));

        for y in 0..64 {
            for x in 0..80 {
                let want = if x < 16 && y < 16 { 0x3412 } else { SENTINEL };
                assert_eq!(frame.get_pixel(x, y), Some(want));
            }
        }
    }

    #[test]
    fn test_uniform_map_with_offset() {
        let map = uniform_map(2, 2, 0x1234);
        let mut frame = sentinel_frame(80, 64);
        render_tile_map(&mut frame, &map, 8, 8, Rect::new(0, 0, 16, 16));

        for y in 0..16 {
            for x in 0..16 {
                assert_eq!(frame.get_pixel(x, y), Some(0x3412));
            }
        }
    }

    #[test]
    fn test_checkerboard_shifts_one_column() {
        let (map, a, b) = checkerboard();
        let mut frame = sentinel_frame(80, 64);
        render_tile_map(&mut frame, &map, 8, 0, Rect::new(0, 0, 32, 16));

        // columns 1, 0 (wrapped), 1, 0 of the map
        assert_eq!(frame.get_pixel(0, 0), Some(b));
        assert_eq!(frame.get_pixel(8, 0), Some(a));
        assert_eq!(frame.get_pixel(16, 0), Some(b));
        assert_eq!(frame.get_pixel(31, 7), Some(a));
        assert_eq!(frame.get_pixel(0, 8), Some(a));
        assert_eq!(frame.get_pixel(8, 15), Some(b));
        assert_eq!(frame.get_pixel(32, 0), Some(SENTINEL));

        let mut unshifted = sentinel_frame(80, 64);
        render_tile_map(&mut unshifted, &map, 0, 0, Rect::new(0, 0, 32, 16));
        assert_eq!(unshifted.get_pixel(0, 0), Some(a));
        assert_eq!(unshifted.get_pixel(8, 0), Some(b));
    }

    #[test]
    fn test_wraparound_equivalence() {
        let map = patterned_map(3, 2);
        let dest = Rect::new(3, 5, 50, 41);
        for k in [-30, -9, -1, 0, 1, 5, 8, 13, 23, 100] {
            let mut plain = sentinel_frame(80, 64);
            let mut wrapped_x = sentinel_frame(80, 64);
            let mut wrapped_y = sentinel_frame(80, 64);
            render_tile_map(&mut plain, &map, k, k, dest);
            render_tile_map(&mut wrapped_x, &map, map.pixel_width() + k, k, dest);
            render_tile_map(&mut wrapped_y, &map, k, k - 7 * map.pixel_height(), dest);
            assert_eq!(plain, wrapped_x, "k = {}", k);
            assert_eq!(plain, wrapped_y, "k = {}", k);
        }
    }

    #[test]
    fn test_matches_reference_for_unaligned_destinations() {
        let map = patterned_map(3, 2);
        let dests = [
            Rect::new(0, 0, 80, 64),
            Rect::new(1, 2, 13, 9),
            Rect::new(7, 7, 2, 2),
            Rect::new(20, 3, 40, 50),
            Rect::new(33, 17, 8, 8),
        ];
        for dest in dests {
            for (off_x, off_y) in [(0, 0), (3, 5), (-1, -1), (17, 29), (-250, 1001)] {
                assert_matches_reference(&map, off_x, off_y, dest);
            }
        }
    }

    #[test]
    fn test_clips_to_framebuffer_edges() {
        let map = patterned_map(2, 3);
        for dest in [
            Rect::new(-5, -3, 20, 20),
            Rect::new(70, 60, 30, 30),
            Rect::new(-100, -100, 400, 400),
        ] {
            assert_matches_reference(&map, 11, 6, dest);
        }
    }

    #[test]
    fn test_wraps_mid_traversal_on_small_map() {
        // a single tile column repeats across the whole width
        let map = patterned_map(1, 1);
        assert_matches_reference(&map, 4, 4, Rect::new(0, 0, 80, 64));
    }

    #[test]
    fn test_empty_or_offscreen_dest_is_noop() {
        let map = uniform_map(1, 1, 0x1234);
        for dest in [
            Rect::new(0, 0, 0, 10),
            Rect::new(0, 0, 10, -1),
            Rect::new(80, 0, 8, 8),
            Rect::new(-8, -8, 8, 8),
        ] {
            let mut frame = sentinel_frame(80, 64);
            render_tile_map(&mut frame, &map, 0, 0, dest);
            assert!(frame.data.iter().all(|&p| p == SENTINEL), "{:?}", dest);
        }
    }

    #[test]
    fn test_render_is_idempotent() {
        let map = patterned_map(3, 3);
        let dest = Rect::new(5, 9, 61, 37);
        let mut first = sentinel_frame(80, 64);
        let mut second = sentinel_frame(80, 64);
        render_tile_map(&mut first, &map, -13, 42, dest);
        render_tile_map(&mut second, &map, -13, 42, dest);
        assert_eq!(first, second);

        render_tile_map(&mut second, &map, -13, 42, dest);
        assert_eq!(first, second);
    }
}
