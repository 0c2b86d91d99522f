//! Visual assets
//!
//! Sprites are looked up by a stable `AssetId`. Anything missing is drawn as a
//! solid shape instead, so a frame never fails because of an asset.

use std::collections::HashMap;

use super::canvas::{Canvas, Rgb};
use crate::sim::Rect;

/// Stable identifiers for every image the renderer may use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetId {
    /// Bird wing frame (0-based)
    BirdFrame(u8),
    PipeCap,
    PipeBody,
    Background,
}

/// Small indexed-color image; `None` pixels are transparent
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Option<Rgb>>,
}

impl Sprite {
    /// Build a sprite from character rows and a palette (unknown chars are transparent)
    pub fn from_rows(rows: &[&str], palette: &[(char, Rgb)]) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let height = rows.len();
        let mut pixels = Vec::with_capacity(width * height);
        for row in rows {
            let mut count = 0;
            for ch in row.chars() {
                pixels.push(palette.iter().find(|(c, _)| *c == ch).map(|(_, rgb)| *rgb));
                count += 1;
            }
            pixels.extend(std::iter::repeat_n(None, width - count));
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Nearest-neighbor blit stretched over a logical rectangle
    pub fn draw(&self, canvas: &mut Canvas, rect: &Rect) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let (x, y, w, h) = canvas.to_pixels(rect);
        for py in 0..h {
            let sy = py as usize * self.height / h as usize;
            for px in 0..w {
                let sx = px as usize * self.width / w as usize;
                if let Some(color) = self.pixels[sy * self.width + sx] {
                    canvas.set(x + px, y + py, color);
                }
            }
        }
    }
}

/// Sprite catalog
#[derive(Debug, Clone, Default)]
pub struct Assets {
    sprites: HashMap<AssetId, Sprite>,
}

impl Assets {
    /// Empty catalog: everything renders as primitive shapes
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with the built-in bird frames
    pub fn builtin() -> Self {
        let mut assets = Self::new();
        for (i, wing) in BIRD_WINGS.iter().enumerate() {
            let mut rows: Vec<&str> = BIRD_BODY.to_vec();
            rows[WING_ROW] = *wing;
            assets.insert(
                AssetId::BirdFrame(i as u8),
                Sprite::from_rows(&rows, BIRD_PALETTE),
            );
        }
        assets
    }

    pub fn insert(&mut self, id: AssetId, sprite: Sprite) {
        self.sprites.insert(id, sprite);
    }

    pub fn get(&self, id: AssetId) -> Option<&Sprite> {
        self.sprites.get(&id)
    }

    /// Draw the sprite for `id`, or a solid `fallback` rectangle if it is missing
    pub fn draw_or_fill(&self, canvas: &mut Canvas, id: AssetId, rect: &Rect, fallback: Rgb) {
        match self.get(id) {
            Some(sprite) => sprite.draw(canvas, rect),
            None => canvas.fill_rect(rect, fallback),
        }
    }
}

const BIRD_PALETTE: &[(char, Rgb)] = &[
    ('y', Rgb(245, 200, 66)),
    ('h', Rgb(255, 225, 100)),
    ('w', Rgb(215, 165, 35)),
    ('e', Rgb(255, 255, 255)),
    ('p', Rgb(20, 20, 20)),
    ('b', Rgb(225, 75, 35)),
];

const WING_ROW: usize = 4;

#[rustfmt::skip]
const BIRD_BODY: [&str; 8] = [
    "   hhhhh   ",
    "  hyyyyeee ",
    " yyyyyyepe ",
    "yyyyyyyeeebb",
    "wwwyyyyyybbb",
    " yyyyyyyybb ",
    "  yyyyyyy  ",
    "   yyyyy   ",
];

/// Row `WING_ROW` for each wing position (up, middle, down)
#[rustfmt::skip]
const BIRD_WINGS: [&str; 3] = [
    "wwwyyyyyybbb",
    "ywwwyyyyybbb",
    "yyywwwyyybbb",
];
