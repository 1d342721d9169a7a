use crate::gfx::color::Rgb565;

pub const TILE_SIZE: usize = 8;
pub const TILE_PIXELS: usize = TILE_SIZE * TILE_SIZE;

/// Destination region in framebuffer pixels, half open on both axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub const fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn intersect(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Rect::new(x, y, (right - x).max(0), (bottom - y).max(0))
    }
}

/// Tile graphics, 64 wire-order pixels per tile, rows of 8 left to right.
#[derive(Clone, Debug)]
pub struct TileAtlas {
    gfx: Vec<u16>,
}

impl TileAtlas {
    /// Build from natural RGB565 words; they are swapped into wire order here
    /// so rendering is a plain copy.
    pub fn new(pixels: &[u16]) -> Result<TileAtlas, String> {
        TileAtlas::from_wire(pixels.iter().map(|&p| Rgb565(p).to_wire()).collect())
    }

    pub fn from_tiles(tiles: &[[Rgb565; TILE_PIXELS]]) -> TileAtlas {
        TileAtlas {
            gfx: tiles
                .iter()
                .flat_map(|tile| tile.iter().map(|c| c.to_wire()))
                .collect(),
        }
    }

    /// Take graphics that are already in wire order.
    pub fn from_wire(gfx: Vec<u16>) -> Result<TileAtlas, String> {
        if gfx.len() % TILE_PIXELS != 0 {
            return Err(format!(
                "Tile graphics length {} is not a multiple of {}",
                gfx.len(),
                TILE_PIXELS
            ));
        }
        Ok(TileAtlas { gfx })
    }

    pub fn len(&self) -> usize {
        self.gfx.len() / TILE_PIXELS
    }

    pub fn is_empty(&self) -> bool {
        self.gfx.is_empty()
    }

    pub fn tile(&self, index: usize) -> &[u16] {
        &self.gfx[index * TILE_PIXELS..(index + 1) * TILE_PIXELS]
    }
}

/// A `w` x `h` grid of atlas indices, row major. Addressing wraps on both
/// axes, so the map repeats forever.
#[derive(Clone, Debug)]
pub struct TileMap {
    w: usize,
    h: usize,
    tiles: Vec<u16>,
    atlas: TileAtlas,
}

impl TileMap {
    pub fn new(w: usize, h: usize, tiles: Vec<u16>, atlas: TileAtlas) -> Result<TileMap, String> {
        if w == 0 || h == 0 {
            return Err(format!("Tile map must not be empty ({}x{})", w, h));
        }
        if tiles.len() != w * h {
            return Err(format!(
                "Tile map is {}x{} but has {} entries",
                w,
                h,
                tiles.len()
            ));
        }
        if let Some(pos) = tiles.iter().position(|&t| t as usize >= atlas.len()) {
            return Err(format!(
                "Tile index {} at position {} is outside the atlas ({} tiles)",
                tiles[pos],
                pos,
                atlas.len()
            ));
        }
        if (w * TILE_SIZE) > i32::MAX as usize || (h * TILE_SIZE) > i32::MAX as usize {
            return Err("Tile map is too large to address".to_string());
        }

        Ok(TileMap { w, h, tiles, atlas })
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn pixel_width(&self) -> i32 {
        (self.w * TILE_SIZE) as i32
    }

    pub fn pixel_height(&self) -> i32 {
        (self.h * TILE_SIZE) as i32
    }

    pub fn tile_index(&self, column: usize, row: usize) -> usize {
        self.tiles[row * self.w + column] as usize
    }

    /// Graphics of the tile in grid cell `(column, row)`.
    pub fn tile_gfx(&self, column: usize, row: usize) -> &[u16] {
        self.atlas.tile(self.tile_index(column, row))
    }

    pub fn atlas(&self) -> &TileAtlas {
        &self.atlas
    }
}
