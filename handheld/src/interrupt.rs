//! # Interrupts
//!
//! The CPU has one IRQ line. The interrupt controller at `$0400_0200` decides
//! which of the 14 sources may raise it (IE), reports which ones did (IF) and
//! has a master switch (IME). When an enabled interrupt fires, the BIOS saves
//! a few registers and jumps, in ARM state, to the address stored at
//! `$0300_7FFC`.
//!
//! This crate installs its own dispatcher there. The dispatcher acknowledges
//! the request and calls the closure registered with
//! [`InterruptController::run_on_vblank`]:
//!
//! ```ignore
//! console.interrupts.run_on_vblank(|| {
//!     // runs once per frame, with interrupts disabled
//! });
//! ```
//!
//! The handler always runs to completion before the next one can start, so
//! state it owns needs no locking.

use volatile_register::RW;

use crate::scr::Interrupts;

/// BIOS slot holding the address of the user IRQ handler.
const BIOS_IRQ_HANDLER: *mut unsafe extern "C" fn() = 0x0300_7FFC as *mut unsafe extern "C" fn();
/// BIOS copy of acknowledged interrupts, polled by `IntrWait`/`VBlankIntrWait`.
const BIOS_IRQ_FLAGS: *mut u16 = 0x0300_7FF8 as *mut u16;

type Handler = *mut (dyn FnMut() + 'static);

static mut VBLANK_HANDLER: Option<Handler> = None;
static mut FRAMES: u32 = 0;

/// Interrupt controller register block at `$0400_0200-$0400_0209`.
#[repr(C)]
pub struct Irq {
    /// IE: which sources may interrupt.
    pub enable: RW<u16>,
    /// IF: pending requests. Write 1 to acknowledge.
    pub request: RW<u16>,
    pub waitcnt: RW<u16>,
    _unused: u16,
    /// IME: bit 0 gates every interrupt.
    pub master_enable: RW<u16>,
}

impl Irq {
    pub unsafe fn new() -> &'static mut Irq {
        unsafe { &mut *(0x0400_0200 as *mut Irq) }
    }
}

pub struct InterruptController {
    regs: &'static mut Irq,
}

impl InterruptController {
    pub(crate) fn new(regs: &'static mut Irq) -> Self {
        Self { regs }
    }

    #[inline(always)]
    pub fn enable(&mut self, irqs: Interrupts) {
        unsafe { self.regs.enable.modify(|bits| bits | irqs.bits()) };
    }

    #[inline(always)]
    pub fn disable(&mut self, irqs: Interrupts) {
        unsafe { self.regs.enable.modify(|bits| bits & !irqs.bits()) };
    }

    #[inline(always)]
    pub fn set_master_enable(&mut self, on: bool) {
        unsafe { self.regs.master_enable.write(on as u16) };
    }

    /// Call `handler` on every vertical blank, forever.
    ///
    /// The calling context goes idle and halts the CPU between interrupts.
    /// `handler` stays on this stack frame, which never returns, so the
    /// dispatcher may keep pointing at it.
    pub fn run_on_vblank<F: FnMut()>(&mut self, handler: F) -> ! {
        let mut handler = handler;
        let local: *mut (dyn FnMut() + '_) = &mut handler;
        // SAFETY: this function diverges, so `handler` outlives every call.
        let erased: Handler = unsafe { core::mem::transmute(local) };

        self.set_master_enable(false);
        unsafe {
            VBLANK_HANDLER = Some(erased);
            BIOS_IRQ_HANDLER.write_volatile(irq_dispatch);
        }
        self.enable(Interrupts::VBLANK);
        self.set_master_enable(true);

        log::info!("vblank handler installed");
        loop {
            wait();
        }
    }
}

/// Number of vertical blanks handled since the handler was installed.
pub fn frame_count() -> u32 {
    unsafe { FRAMES }
}

/// Halt the CPU until the next interrupt.
#[inline(always)]
pub fn wait() {
    #[cfg(target_arch = "arm")]
    unsafe {
        core::arch::asm!("swi #0x02", clobber_abi("C"));
    }
    #[cfg(not(target_arch = "arm"))]
    core::hint::spin_loop();
}

/// Entered from the BIOS in ARM state, IRQ mode, with IRQs masked.
#[cfg_attr(target_arch = "arm", instruction_set(arm::a32))]
unsafe extern "C" fn irq_dispatch() {
    unsafe {
        let regs = Irq::new();
        let pending = Interrupts::from_bits_truncate(regs.enable.read() & regs.request.read());

        regs.request.write(pending.bits());
        BIOS_IRQ_FLAGS.write_volatile(BIOS_IRQ_FLAGS.read_volatile() | pending.bits());

        if pending.contains(Interrupts::VBLANK) {
            FRAMES = FRAMES.wrapping_add(1);
            let handler = VBLANK_HANDLER;
            if let Some(handler) = handler {
                (*handler)();
            }
        }
    }
}
