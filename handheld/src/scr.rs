//! # System Control Register Flags
//!
//! Bit sets for the handheld's LCD and interrupt control registers.
//!
//! ## DisplayControl (`$0400_0000`)
//!
//! | Flag       | Effect                                         |
//! |------------|------------------------------------------------|
//! | `MODE_3`   | 240×160 direct-color bitmap in VRAM            |
//! | `BG2`      | Show background 2 (the bitmap in modes 3-5)    |
//! | `FORCED_BLANK` | Blank the screen, CPU gets full VRAM access |
//!
//! ## DisplayStatus (`$0400_0004`)
//!
//! Status bits (read-only) and interrupt-request enables for the LCD.
//!
//! ## Interrupts (`$0400_0200` IE / `$0400_0202` IF)
//!
//! One bit per interrupt source. IE selects which sources may interrupt the
//! CPU, IF reports (and acknowledges, write-1-to-clear) pending ones.

use volatile_register::{RO, RW};

bitflags::bitflags! {
    /// LCD control flags at `$0400_0000`.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct DisplayControl: u16 {
        // Bits 0-2: video mode
        const MODE_0       = 0b0000_0000_0000_0000;
        const MODE_3       = 0b0000_0000_0000_0011;
        const MODE_4       = 0b0000_0000_0000_0100;
        const MODE_5       = 0b0000_0000_0000_0101;

        /// Page select for the double-buffered modes 4 and 5.
        const FRAME_SELECT = 0b0000_0000_0001_0000;
        /// Blank the display. VRAM, OAM and palette are freely accessible.
        const FORCED_BLANK = 0b0000_0000_1000_0000;

        const BG0          = 0b0000_0001_0000_0000;
        const BG1          = 0b0000_0010_0000_0000;
        /// The only background shown in bitmap modes.
        const BG2          = 0b0000_0100_0000_0000;
        const BG3          = 0b0000_1000_0000_0000;
        const OBJ          = 0b0001_0000_0000_0000;
    }

    /// LCD status and interrupt-request flags at `$0400_0004`.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct DisplayStatus: u16 {
        /// Set while the LCD is in vertical blank (read-only).
        const IN_VBLANK    = 0b0000_0000_0000_0001;
        /// Set while the LCD is in horizontal blank (read-only).
        const IN_HBLANK    = 0b0000_0000_0000_0010;
        /// Set when VCOUNT matches the VCOUNT setting (read-only).
        const VCOUNT_MATCH = 0b0000_0000_0000_0100;
        /// Raise an interrupt request at the start of vertical blank.
        const VBLANK_IRQ   = 0b0000_0000_0000_1000;
        /// Raise an interrupt request at the start of horizontal blank.
        const HBLANK_IRQ   = 0b0000_0000_0001_0000;
        /// Raise an interrupt request on a VCOUNT match.
        const VCOUNT_IRQ   = 0b0000_0000_0010_0000;
    }

    /// Interrupt sources, shared layout of IE, IF and the BIOS IF mirror.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct Interrupts: u16 {
        const VBLANK  = 1 << 0;
        const HBLANK  = 1 << 1;
        const VCOUNT  = 1 << 2;
        const TIMER0  = 1 << 3;
        const TIMER1  = 1 << 4;
        const TIMER2  = 1 << 5;
        const TIMER3  = 1 << 6;
        const SERIAL  = 1 << 7;
        const DMA0    = 1 << 8;
        const DMA1    = 1 << 9;
        const DMA2    = 1 << 10;
        const DMA3    = 1 << 11;
        const KEYPAD  = 1 << 12;
        const GAMEPAK = 1 << 13;
    }
}

/// LCD register block at `$0400_0000-$0400_0007`.
#[repr(C)]
pub struct Lcd {
    pub dispcnt: RW<u16>,
    pub green_swap: RW<u16>,
    pub dispstat: RW<u16>,
    /// Current scanline (0-227).
    pub vcount: RO<u16>,
}

impl Lcd {
    pub unsafe fn new() -> &'static mut Lcd {
        unsafe { &mut *(0x0400_0000 as *mut Lcd) }
    }

    #[inline(always)]
    pub fn display_control(&self) -> DisplayControl {
        DisplayControl::from_bits_retain(self.dispcnt.read())
    }

    #[inline(always)]
    pub fn set_display_control(&mut self, flags: DisplayControl) {
        unsafe { self.dispcnt.write(flags.bits()) };
    }

    #[inline(always)]
    pub fn display_status(&self) -> DisplayStatus {
        DisplayStatus::from_bits_retain(self.dispstat.read())
    }

    /// Read-modify-write the status register, setting `flags` and keeping
    /// everything else (including the VCOUNT setting in the high byte).
    #[inline(always)]
    pub fn insert_display_status(&mut self, flags: DisplayStatus) {
        unsafe { self.dispstat.modify(|bits| bits | flags.bits()) };
    }

    #[inline(always)]
    pub fn scanline(&self) -> u16 {
        self.vcount.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vblank_reporting_bits_are_three_and_four() {
        let bits = DisplayStatus::VBLANK_IRQ | DisplayStatus::HBLANK_IRQ;
        assert_eq!(bits.bits(), 1 << 3 | 1 << 4);
    }

    #[test]
    fn bitmap_mode_control_word() {
        let flags = DisplayControl::MODE_3 | DisplayControl::BG2;
        assert_eq!(flags.bits(), 0x0403);
    }
}
