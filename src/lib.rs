pub mod demo;
pub mod framebuffer;
pub mod gfx;
pub mod tilemap;
pub mod transport;

pub use framebuffer::{Framebuffer, SCREEN_H, SCREEN_W};
pub use gfx::{Scale, TileGfx, color::Rgb565};
pub use tilemap::{Rect, TileAtlas, TileMap};
pub use transport::DisplayTransport;
