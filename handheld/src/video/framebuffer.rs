//! # In-Memory Framebuffer
//!
//! A [`Display`] that keeps its pixels in an ordinary array instead of VRAM.
//! It has the same 240×160 geometry as [`Bitmap3`](super::Bitmap3), so code
//! written against the trait behaves identically on both.
//!
//! Use it to run game logic off-hardware and inspect the result:
//!
//! ```ignore
//! let mut fb = Framebuffer::new();
//! fb.configure();
//! fb.fill_rect(10, 10, 15, 15, Color::YELLOW);
//! assert_eq!(fb.pixel(10, 10), Some(Color::YELLOW));
//! ```

use crate::video::{clip, Color, Display, SCREEN_HEIGHT, SCREEN_WIDTH};

const PIXELS: usize = SCREEN_WIDTH as usize * SCREEN_HEIGHT as usize;

pub struct Framebuffer {
    pixels: [Color; PIXELS],
    fills: usize,
}

impl Framebuffer {
    pub const fn new() -> Self {
        Self {
            pixels: [Color::BLACK; PIXELS],
            fills: 0,
        }
    }

    /// Color at `(x, y)`, or `None` off-screen.
    pub fn pixel(&self, x: i16, y: i16) -> Option<Color> {
        if !(0..SCREEN_WIDTH).contains(&x) || !(0..SCREEN_HEIGHT).contains(&y) {
            return None;
        }
        Some(self.pixels[y as usize * SCREEN_WIDTH as usize + x as usize])
    }

    /// Number of `fill_rect` calls so far, including ones clipped away.
    pub fn fills(&self) -> usize {
        self.fills
    }

    /// Number of pixels currently holding `color`.
    pub fn count(&self, color: Color) -> usize {
        self.pixels.iter().filter(|&&pixel| pixel == color).count()
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Framebuffer {
    fn configure(&mut self) {
        self.clear();
    }

    fn size(&self) -> (i16, i16) {
        (SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    fn fill_rect(&mut self, x: i16, y: i16, width: i16, height: i16, color: Color) {
        self.fills += 1;
        let Some((x0, y0, x1, y1)) = clip(x, y, width, height, SCREEN_WIDTH, SCREEN_HEIGHT) else {
            return;
        };
        for row in y0..y1 {
            let start = row * SCREEN_WIDTH as usize;
            self.pixels[start + x0..start + x1].fill(color);
        }
    }
}
