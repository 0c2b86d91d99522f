//! Software pixel canvas
//!
//! Frames are painted in logical playfield coordinates and mapped onto a
//! pixel buffer of whatever size the presenter has (terminal cells, window).

use glam::Vec2;

use crate::sim::Rect;

/// 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Linear blend, `t` in 0..=256
    pub const fn lerp(a: Rgb, b: Rgb, t_256: u16) -> Rgb {
        let t = t_256 as i32;
        Rgb(
            (a.0 as i32 + (b.0 as i32 - a.0 as i32) * t / 256) as u8,
            (a.1 as i32 + (b.1 as i32 - a.1 as i32) * t / 256) as u8,
            (a.2 as i32 + (b.2 as i32 - a.2 as i32) * t / 256) as u8,
        )
    }

    /// Half brightness
    pub const fn dim(self) -> Rgb {
        Rgb(self.0 / 2, self.1 / 2, self.2 / 2)
    }
}

/// Pixel buffer with a logical-to-pixel mapping
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
    /// Pixels per logical unit on each axis
    scale: Vec2,
}

impl Canvas {
    /// Canvas of `width`x`height` pixels showing a `logical` sized playfield
    pub fn new(width: usize, height: usize, logical: Vec2) -> Self {
        let mut canvas = Self {
            width: 0,
            height: 0,
            pixels: Vec::new(),
            scale: Vec2::ONE,
        };
        canvas.resize(width, height, logical);
        canvas
    }

    pub fn resize(&mut self, width: usize, height: usize, logical: Vec2) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width * height, Rgb::default());
        self.scale = Vec2::new(
            width as f32 / logical.x.max(1.0),
            height as f32 / logical.y.max(1.0),
        );
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    pub fn clear(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Set a pixel (out-of-bounds writes are ignored)
    pub fn set(&mut self, x: i32, y: i32, color: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.pixels[y as usize * self.width + x as usize] = color;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.width + x]
    }

    /// Fill a pixel-space rectangle
    pub fn fill_pixels(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(self.width as i32);
        let y1 = (y + h).min(self.height as i32);
        for py in y0..y1 {
            for px in x0..x1 {
                self.pixels[py as usize * self.width + px as usize] = color;
            }
        }
    }

    /// Map a logical rectangle to pixel bounds (x, y, w, h)
    pub fn to_pixels(&self, rect: &Rect) -> (i32, i32, i32, i32) {
        let min = rect.min * self.scale;
        let max = rect.max() * self.scale;
        let x0 = min.x.floor() as i32;
        let y0 = min.y.floor() as i32;
        let x1 = max.x.ceil() as i32;
        let y1 = max.y.ceil() as i32;
        (x0, y0, (x1 - x0).max(0), (y1 - y0).max(0))
    }

    /// Fill a logical rectangle
    pub fn fill_rect(&mut self, rect: &Rect, color: Rgb) {
        let (x, y, w, h) = self.to_pixels(rect);
        self.fill_pixels(x, y, w, h, color);
    }

    /// Halve the brightness of everything (overlay backdrop)
    pub fn dim_all(&mut self) {
        for px in &mut self.pixels {
            *px = px.dim();
        }
    }

    /// Raw rows for presenters
    pub fn rows(&self) -> impl Iterator<Item = &[Rgb]> {
        self.pixels.chunks(self.width.max(1))
    }
}

// ── 3x5 bitmap digits ──────────────────────────────────────────────────────

#[rustfmt::skip]
const DIGITS: [[u8; 15]; 10] = [
    [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // 0
    [0,1,0, 1,1,0, 0,1,0, 0,1,0, 1,1,1], // 1
    [1,1,1, 0,0,1, 1,1,1, 1,0,0, 1,1,1], // 2
    [1,1,1, 0,0,1, 0,1,1, 0,0,1, 1,1,1], // 3
    [1,0,1, 1,0,1, 1,1,1, 0,0,1, 0,0,1], // 4
    [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1], // 5
    [1,1,1, 1,0,0, 1,1,1, 1,0,1, 1,1,1], // 6
    [1,1,1, 0,0,1, 0,1,0, 0,1,0, 0,1,0], // 7
    [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,1,1], // 8
    [1,1,1, 1,0,1, 1,1,1, 0,0,1, 1,1,1], // 9
];

/// Draw `n` centered on logical x `cx`, top at `y`, each glyph cell `cell` units
pub fn draw_number(canvas: &mut Canvas, cx: f32, y: f32, n: u32, cell: f32, color: Rgb) {
    let text = n.to_string();
    let glyph_w = 4.0 * cell; // 3 cells + 1 spacing
    let total_w = text.len() as f32 * glyph_w - cell;
    let start_x = cx - total_w / 2.0;

    for (i, ch) in text.bytes().enumerate() {
        let glyph = &DIGITS[(ch - b'0') as usize];
        let gx = start_x + i as f32 * glyph_w;
        for row in 0..5 {
            for col in 0..3 {
                if glyph[row * 3 + col] == 1 {
                    let min = Vec2::new(gx + col as f32 * cell, y + row as f32 * cell);
                    let size = Vec2::splat(cell);
                    canvas.fill_rect(&Rect::new(min + Vec2::splat(cell * 0.25), size), SHADOW);
                    canvas.fill_rect(&Rect::new(min, size), color);
                }
            }
        }
    }
}

pub const SHADOW: Rgb = Rgb(30, 30, 30);
