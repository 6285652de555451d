//! # Handheld HAL
//!
//! Hardware abstraction for a GBA-class handheld: a 240×160 bitmap LCD, a
//! ten-key keypad and a vertical-blank interrupt, all memory-mapped.
//!
//! ## Quick Start
//!
//! The boot code sets up the stacks and memory, builds a [`Console`] and calls
//! your `main` with it:
//!
//! ```ignore
//! use handheld::{console::Console, video::{Color, Display}};
//!
//! #[unsafe(no_mangle)]
//! fn main(console: &mut Console) {
//!     console.display.configure();
//!     console.enable_blank_reporting();
//!
//!     console.run_on_vblank(|display, keys| {
//!         // once per frame
//!         display.fill_rect(0, 0, 15, 15, Color::YELLOW);
//!     });
//! }
//! ```
//!
//! ## Hardware Overview
//!
//! | Feature    | Spec                                  |
//! |------------|---------------------------------------|
//! | CPU        | ARM7TDMI @ 16.78 MHz                  |
//! | Display    | 240×160, 15-bit color, mode 3 bitmap  |
//! | Keypad     | 10 keys, active-low, `$0400_0130`     |
//! | Interrupts | IE/IF/IME at `$0400_0200`             |
//! | IWRAM      | 32KB, stacks and `.data`/`.bss`       |
//!
//! Everything except the register blocks compiles on the host too, which is
//! how the in-memory [`Framebuffer`](video::Framebuffer) gets used in tests.

#![cfg_attr(not(test), no_std)]

#[cfg(target_arch = "arm")]
pub mod boot;
pub mod console;
pub mod input;
pub mod interrupt;
pub mod output;
pub mod scr;
pub mod video;
