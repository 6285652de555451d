//! # Debug Output
//!
//! mGBA exposes a debug port the ROM can print through: unlock it by writing
//! `0xC0DE` to `$04FF_F780` (it answers `0x1DEA`), put up to 256 bytes of
//! text in the buffer at `$04FF_F600`, then write the level with bit 8 set to
//! `$04FF_F700` to send the line.
//!
//! [`MgbaLogger`] plugs that into the `log` facade, so the usual macros work:
//!
//! ```ignore
//! handheld::output::init(log::LevelFilter::Debug);
//! log::info!("target respawned at ({}, {})", x, y);
//! ```
//!
//! On hardware without the port, [`init`] returns `false` and nothing is
//! installed, which leaves the macros as no-ops.

use core::fmt::Write;

use log::{Level, LevelFilter, Log, Metadata, Record};

const DEBUG_ENABLE: *mut u16 = 0x04FF_F780 as *mut u16;
const DEBUG_FLAGS: *mut u16 = 0x04FF_F700 as *mut u16;
const DEBUG_STRING: *mut u8 = 0x04FF_F600 as *mut u8;

const DEBUG_STRING_LEN: usize = 0x100;
const SEND: u16 = 0x100;

pub struct MgbaLogger;

pub static LOGGER: MgbaLogger = MgbaLogger;

impl MgbaLogger {
    /// Unlock the debug port. Returns `true` when running under mGBA.
    pub fn detect() -> bool {
        unsafe {
            DEBUG_ENABLE.write_volatile(0xC0DE);
            DEBUG_ENABLE.read_volatile() == 0x1DEA
        }
    }
}

/// mGBA's levels: fatal 0, error 1, warn 2, info 3, debug 4.
const fn level_code(level: Level) -> u16 {
    match level {
        Level::Error => 1,
        Level::Warn => 2,
        Level::Info => 3,
        Level::Debug | Level::Trace => 4,
    }
}

/// Fills the string buffer, dropping anything past its end.
struct LineWriter {
    len: usize,
}

impl Write for LineWriter {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        for &byte in s.as_bytes() {
            // keep the last byte for the terminator
            if self.len >= DEBUG_STRING_LEN - 1 {
                break;
            }
            unsafe { DEBUG_STRING.add(self.len).write_volatile(byte) };
            self.len += 1;
        }
        Ok(())
    }
}

impl LineWriter {
    fn send(self, code: u16) {
        unsafe {
            DEBUG_STRING.add(self.len).write_volatile(0);
            DEBUG_FLAGS.write_volatile(code | SEND);
        }
    }
}

impl Log for MgbaLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut line = LineWriter { len: 0 };
        let _ = write!(line, "[{}] {}", record.target(), record.args());
        line.send(level_code(record.level()));
    }

    fn flush(&self) {}
}

/// Send a line at mGBA's fatal level, bypassing the `log` filter.
pub fn fatal(args: core::fmt::Arguments) {
    let mut line = LineWriter { len: 0 };
    let _ = line.write_fmt(args);
    line.send(0);
}

/// Install [`LOGGER`] as the global logger if the debug port is present.
///
/// Must run before interrupts are enabled.
pub fn init(level: LevelFilter) -> bool {
    if !MgbaLogger::detect() {
        return false;
    }
    // SAFETY: single-threaded, and no interrupt handler is installed yet
    unsafe {
        if log::set_logger_racy(&LOGGER).is_err() {
            return false;
        }
        log::set_max_level_racy(level);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_map_to_mgba_codes() {
        assert_eq!(level_code(Level::Error), 1);
        assert_eq!(level_code(Level::Warn), 2);
        assert_eq!(level_code(Level::Info), 3);
        assert_eq!(level_code(Level::Debug), 4);
        assert_eq!(level_code(Level::Trace), 4);
    }
}
