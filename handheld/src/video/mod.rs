//! # Video & Drawing
//!
//! Everything on screen goes through the [`Display`] trait: configure it once,
//! ask it for its size, and fill rectangles.
//!
//! ```ignore
//! let display = &mut console.display;
//! display.configure();
//!
//! let (width, height) = display.size();
//! display.fill_rect(0, 0, 15, 15, Color::YELLOW);
//! ```
//!
//! There are two implementations:
//!
//! - [`Bitmap3`](bitmap::Bitmap3) drives the real LCD in mode 3, a 240×160
//!   direct-color bitmap living in VRAM at `$0600_0000`.
//! - [`Framebuffer`](framebuffer::Framebuffer) keeps the pixels in memory. It
//!   is what the host runner and the tests draw into.
//!
//! ## Erasing
//!
//! There is no sprite layer in bitmap mode, so "moving" something means
//! filling its old rectangle with [`Color::BLACK`] and drawing it again at the
//! new spot.
//!
//! ## Colors
//!
//! Colors are 15-bit BGR: `0bxBBBBB_GGGGG_RRRRR`. Use [`Color::rgb8`] to
//! convert from the usual 8-bit channels; the low three bits of each channel
//! are dropped.

pub mod bitmap;
pub mod framebuffer;

pub use bitmap::Bitmap3;
pub use framebuffer::Framebuffer;

/// Width of the LCD in pixels.
pub const SCREEN_WIDTH: i16 = 240;
/// Height of the LCD in pixels.
pub const SCREEN_HEIGHT: i16 = 160;

/// A 15-bit BGR color, the native pixel format of the LCD.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Color(pub u16);

impl Color {
    pub const BLACK: Color = Color::rgb8(0, 0, 0);
    pub const WHITE: Color = Color::rgb8(255, 255, 255);
    pub const RED: Color = Color::rgb8(255, 0, 0);
    pub const GREEN: Color = Color::rgb8(0, 255, 0);
    pub const YELLOW: Color = Color::rgb8(255, 255, 0);
    pub const GRAY: Color = Color::rgb8(149, 165, 166);

    #[inline]
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Color {
        let r = (r >> 3) as u16;
        let g = (g >> 3) as u16;
        let b = (b >> 3) as u16;
        Color(b << 10 | g << 5 | r)
    }
}

/// A surface the game can draw solid rectangles on.
pub trait Display {
    /// Put the display into a drawable state and clear it to black.
    fn configure(&mut self);

    /// Width and height in pixels.
    fn size(&self) -> (i16, i16);

    /// Fill a rectangle with a solid color.
    ///
    /// Parts of the rectangle outside the screen are skipped.
    fn fill_rect(&mut self, x: i16, y: i16, width: i16, height: i16, color: Color);

    /// Fill the whole screen with black.
    fn clear(&mut self) {
        let (width, height) = self.size();
        self.fill_rect(0, 0, width, height, Color::BLACK);
    }
}

/// Intersect a rectangle with a `width`×`height` screen.
///
/// Returns the visible `(x0, y0, x1, y1)` span, end-exclusive, or `None` if
/// nothing of it is on screen.
pub(crate) fn clip(
    x: i16,
    y: i16,
    width: i16,
    height: i16,
    screen_width: i16,
    screen_height: i16,
) -> Option<(usize, usize, usize, usize)> {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = x.saturating_add(width).min(screen_width);
    let y1 = y.saturating_add(height).min(screen_height);
    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    Some((x0 as usize, y0 as usize, x1 as usize, y1 as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb8_packs_bgr555() {
        assert_eq!(Color::BLACK, Color(0));
        assert_eq!(Color::WHITE, Color(0x7FFF));
        assert_eq!(Color::RED, Color(0x001F));
        assert_eq!(Color::GREEN, Color(0x03E0));
        assert_eq!(Color::YELLOW, Color(0x03FF));
    }

    #[test]
    fn clip_trims_to_screen() {
        assert_eq!(clip(-5, -5, 10, 10, 240, 160), Some((0, 0, 5, 5)));
        assert_eq!(clip(235, 155, 15, 15, 240, 160), Some((235, 155, 240, 160)));
        assert_eq!(clip(240, 0, 15, 15, 240, 160), None);
        assert_eq!(clip(10, 10, 0, 5, 240, 160), None);
    }
}
