//! # Mode 3 Bitmap
//!
//! In mode 3 the LCD shows background 2 as a single 240×160 bitmap of 15-bit
//! colors, stored row-major in VRAM at `$0600_0000`. One `u16` per pixel,
//! 480 bytes per row, 75KB in total. There is no page flipping in this mode;
//! whatever is in VRAM is what's on screen.
//!
//! VRAM only accepts 16- and 32-bit writes, so pixels are written as whole
//! halfwords.

use crate::{
    scr::{DisplayControl, Lcd},
    video::{clip, Color, Display, SCREEN_HEIGHT, SCREEN_WIDTH},
};

const VRAM: *mut u16 = 0x0600_0000 as *mut u16;

/// The hardware LCD in bitmap mode 3.
///
/// Owns the LCD register block, since switching modes is part of
/// [`Display::configure`].
pub struct Bitmap3 {
    lcd: &'static mut Lcd,
}

impl Bitmap3 {
    pub(crate) fn new(lcd: &'static mut Lcd) -> Self {
        Self { lcd }
    }

    /// Direct access to the LCD registers.
    pub fn lcd(&mut self) -> &mut Lcd {
        self.lcd
    }

    #[inline(always)]
    fn write_pixel(x: usize, y: usize, color: Color) {
        unsafe {
            VRAM
                .add(y * SCREEN_WIDTH as usize + x)
                .write_volatile(color.0);
        }
    }
}

impl Display for Bitmap3 {
    fn configure(&mut self) {
        // blank while clearing so the old VRAM contents never flash up
        self.lcd
            .set_display_control(DisplayControl::MODE_3 | DisplayControl::FORCED_BLANK);
        self.clear();
        self.lcd
            .set_display_control(DisplayControl::MODE_3 | DisplayControl::BG2);
    }

    fn size(&self) -> (i16, i16) {
        (SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    fn fill_rect(&mut self, x: i16, y: i16, width: i16, height: i16, color: Color) {
        let Some((x0, y0, x1, y1)) = clip(x, y, width, height, SCREEN_WIDTH, SCREEN_HEIGHT) else {
            return;
        };
        for row in y0..y1 {
            for col in x0..x1 {
                Self::write_pixel(col, row, color);
            }
        }
    }
}
