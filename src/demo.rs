use crate::{
    gfx::{TileGfx, color::Rgb565},
    tilemap::{Rect, TILE_PIXELS, TILE_SIZE, TileAtlas, TileMap},
};

fn gradient_tile(from: Rgb565, to: Rgb565) -> [Rgb565; TILE_PIXELS] {
    let mut tile = [Rgb565::BLACK; TILE_PIXELS];
    for (i, pixel) in tile.iter_mut().enumerate() {
        let t = (i % TILE_SIZE + i / TILE_SIZE) as u16;
        let mix = |a: u8, b: u8| ((a as u16 * (14 - t) + b as u16 * t) / 14) as u8;
        *pixel = Rgb565::new(
            mix(from.red(), to.red()),
            mix(from.green(), to.green()),
            mix(from.blue(), to.blue()),
        );
    }
    tile
}

fn ring_tile(fg: Rgb565, bg: Rgb565) -> [Rgb565; TILE_PIXELS] {
    let mut tile = [bg; TILE_PIXELS];
    for (i, pixel) in tile.iter_mut().enumerate() {
        let (x, y) = ((i % TILE_SIZE) as i32, (i / TILE_SIZE) as i32);
        let d = (2 * x - 7).pow(2) + (2 * y - 7).pow(2);
        if (20..=40).contains(&d) {
            *pixel = fg;
        }
    }
    tile
}

/// Two layers scrolling in opposite directions: a diagonal gradient
/// background over the whole screen and a ring pattern shown through an
/// inset window.
pub struct DemoScene {
    background: TileMap,
    window: TileMap,
    speed: i32,
    tick: i32,
}

impl DemoScene {
    pub fn new(speed: i32) -> Result<Self, String> {
        let tiles = [
            gradient_tile(Rgb565::new(31, 0, 0), Rgb565::new(0, 0, 31)),
            gradient_tile(Rgb565::new(0, 63, 0), Rgb565::new(31, 63, 0)),
            ring_tile(Rgb565::WHITE, Rgb565::new(4, 8, 12)),
            ring_tile(Rgb565::new(31, 40, 0), Rgb565::new(0, 16, 8)),
        ];
        let atlas = TileAtlas::from_tiles(&tiles);

        let background = TileMap::new(
            4,
            3,
            vec![0, 1, 0, 1, 1, 0, 1, 0, 0, 0, 1, 1],
            atlas.clone(),
        )?;
        let window = TileMap::new(2, 2, vec![2, 3, 3, 2], atlas)?;

        Ok(DemoScene {
            background,
            window,
            speed,
            tick: 0,
        })
    }

    pub fn update(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Paint one frame, sized to the session's working buffer.
    pub fn draw(&self, gfx: &mut TileGfx) {
        let width = gfx.frame().width() as i32;
        let height = gfx.frame().height() as i32;
        let step = self.tick.wrapping_mul(self.speed);

        gfx.render(&self.background, step, step / 2, Rect::new(0, 0, width, height));
        gfx.render(
            &self.window,
            -step,
            step / 3,
            Rect::new(width / 4 + 3, height / 4 + 1, width / 2, height / 2),
        );
    }
}
