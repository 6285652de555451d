use crate::{
    input::Keypad,
    interrupt::{InterruptController, Irq},
    scr::{DisplayStatus, Lcd},
    video::Bitmap3,
};

/// Every piece of hardware a game talks to, handed to `main` by the boot code.
pub struct Console {
    pub display: Bitmap3,
    pub keypad: &'static mut Keypad,
    pub interrupts: InterruptController,
}

impl Console {
    /// Bind the register blocks at their fixed addresses.
    ///
    /// Only the boot code should call this; there is exactly one console.
    pub(crate) unsafe fn init() -> Console {
        unsafe {
            Self {
                display: Bitmap3::new(Lcd::new()),
                keypad: Keypad::new(),
                interrupts: InterruptController::new(Irq::new()),
            }
        }
    }

    /// Ask the LCD to raise vblank (and hblank) interrupt requests.
    ///
    /// Only sources also enabled in the interrupt controller reach the CPU.
    #[inline(always)]
    pub fn enable_blank_reporting(&mut self) {
        self.display
            .lcd()
            .insert_display_status(DisplayStatus::VBLANK_IRQ | DisplayStatus::HBLANK_IRQ);
    }

    /// Run `frame` once per vertical blank, forever.
    ///
    /// `frame` gets the display and the keypad register value sampled when the
    /// interrupt fired.
    pub fn run_on_vblank<F>(&mut self, mut frame: F) -> !
    where
        F: FnMut(&mut Bitmap3, u16),
    {
        let display = &mut self.display;
        let keypad = &*self.keypad;
        self.interrupts.run_on_vblank(move || {
            let keys = keypad.read();
            frame(display, keys);
        })
    }
}
