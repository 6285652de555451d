use core::panic::PanicInfo;

use crate::{console::Console, output};

unsafe extern "Rust" {
    unsafe fn main(console: &mut Console);
}

#[panic_handler]
fn panic(info: &PanicInfo<'_>) -> ! {
    output::fatal(format_args!("{}", info));
    loop {}
}

unsafe extern "C" {
    unsafe static __data_load: u8;
    unsafe static mut __data_start: u8;
    unsafe static mut __data_end: u8;

    unsafe static mut __bss_start: u8;
    unsafe static mut __bss_end: u8;
}

// The cartridge header sits in the first 0xC0 bytes of ROM and execution
// starts at its first word, so branch over it. gbafix fills the header in.
//
// The BIOS runs the IRQ handler on the IRQ-mode stack, and the game runs
// entirely inside that handler, so it gets most of IWRAM's top 4KB.
core::arch::global_asm!(
    ".section .text._start, \"ax\", %progbits",
    ".arm",
    ".global __start",
    "__start:",
    "    b 1f",
    "    .space 0xC0 - 4",
    "1:",
    "    mov r0, #0x12",
    "    msr CPSR_c, r0",
    "    ldr sp, =0x03007FA0",
    "    mov r0, #0x1F",
    "    msr CPSR_c, r0",
    "    ldr sp, =0x03007000",
    "    ldr r0, =__boot",
    "    bx r0",
    "    .ltorg",
);

#[inline(always)]
unsafe fn init_data_and_bss() {
    unsafe {
        // Copy .data from ROM to IWRAM
        let mut src = &raw const __data_load;
        let mut dst = &raw mut __data_start;
        let end = &raw mut __data_end;
        while dst < end {
            dst.write_volatile(src.read_volatile());
            src = src.add(1);
            dst = dst.add(1);
        }

        // Zero .bss
        let mut bss = &raw mut __bss_start;
        let bss_end = &raw mut __bss_end;
        while bss < bss_end {
            bss.write_volatile(0);
            bss = bss.add(1);
        }
    }
}

#[inline(never)]
fn call_main() {
    let console = &mut unsafe { Console::init() };
    output::init(log::LevelFilter::Debug);
    unsafe { main(console) };
}

#[unsafe(no_mangle)]
unsafe extern "C" fn __boot() -> ! {
    unsafe {
        init_data_and_bss();
        // Console::init must not be inlined into __boot, .data isn't valid
        // until init_data_and_bss returns
        call_main();
        core::panic!("Came out of main");
    }
}
