//! # Keypad
//!
//! The keypad is a single 16-bit register at `$0400_0130`. Bits 0-9 hold one
//! key each and are **active low**: a cleared bit means the key is held, so
//! with nothing pressed the register reads `0x03FF` (1023).
//!
//! Games can either test individual keys with [`KeyInput`], or match the
//! whole register against the single-key codes in [`Key`]:
//!
//! ```ignore
//! let value = console.keypad.read();
//! match Key::from_code(value) {
//!     Some(Key::Right) => player.x += 1,
//!     _ => {}
//! }
//! ```

use bit_field::BitField;
use volatile_register::{RO, RW};

bitflags::bitflags! {
    /// Bits of the keypad input register, as laid out in hardware.
    ///
    /// A set bit here means *released*.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct KeyInput: u16 {
        const A      = 1 << 0;
        const B      = 1 << 1;
        const SELECT = 1 << 2;
        const START  = 1 << 3;
        const RIGHT  = 1 << 4;
        const LEFT   = 1 << 5;
        const UP     = 1 << 6;
        const DOWN   = 1 << 7;
        const R      = 1 << 8;
        const L      = 1 << 9;
    }
}

impl KeyInput {
    /// The raw register value with no key held.
    pub const RELEASED: u16 = Self::all().bits();
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Key {
    A,
    B,
    Select,
    Start,
    Right,
    Left,
    Up,
    Down,
    R,
    L,
}

impl Key {
    pub const ALL: [Key; 10] = [
        Key::A,
        Key::B,
        Key::Select,
        Key::Start,
        Key::Right,
        Key::Left,
        Key::Up,
        Key::Down,
        Key::R,
        Key::L,
    ];

    /// Bit index of this key in the keypad register.
    const fn idx(&self) -> usize {
        match self {
            Key::A => 0,
            Key::B => 1,
            Key::Select => 2,
            Key::Start => 3,
            Key::Right => 4,
            Key::Left => 5,
            Key::Up => 6,
            Key::Down => 7,
            Key::R => 8,
            Key::L => 9,
        }
    }

    /// Register value read while this key, and only this key, is held.
    ///
    /// Right reads as 1007, Left 991, Up 959, Down 895, Start 1015,
    /// Select 1019, A 1022, B 1021, R 767 and L 511.
    #[inline]
    pub fn code(&self) -> u16 {
        let mut value = KeyInput::RELEASED;
        value.set_bit(self.idx(), false);
        value
    }

    /// Decode a raw register value into the single key it represents.
    ///
    /// Returns `None` when no key or more than one key is held.
    pub fn from_code(value: u16) -> Option<Key> {
        Key::ALL.into_iter().find(|key| key.code() == value)
    }
}

/// Keypad register block at `$0400_0130`.
#[repr(C)]
pub struct Keypad {
    pub keyinput: RO<u16>,
    /// Keypad interrupt control.
    pub keycnt: RW<u16>,
}

impl Keypad {
    pub unsafe fn new() -> &'static mut Keypad {
        unsafe { &mut *(0x0400_0130 as *mut Keypad) }
    }

    /// Current raw value of the keypad input register.
    #[inline(always)]
    pub fn read(&self) -> u16 {
        self.keyinput.read()
    }
}
