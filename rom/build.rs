use std::{env, fs::File, io::Write, path::Path};

fn main() {
    // Only run for the correct target
    let target = env::var("TARGET").unwrap_or_default();
    if target != "thumbv4t-none-eabi" {
        return;
    }

    let out_dir = env::var("OUT_DIR").expect("cargo sets OUT_DIR");
    let link_path = Path::new(&out_dir).join("linker.ld");
    let mut f = File::create(&link_path).expect("failed to create linker.ld");

    const LINKER_SCRIPT: &str = r#"
ENTRY(__start)

MEMORY {
  EWRAM (w!x) : ORIGIN = 0x02000000, LENGTH = 256K
  IWRAM (w!x) : ORIGIN = 0x03000000, LENGTH = 32K
  ROM   (rx)  : ORIGIN = 0x08000000, LENGTH = 32M
}

SECTIONS {
  .text : {
    KEEP(*(.text._start))
    *(.text .text.*)
    . = ALIGN(4);
  } > ROM

  .rodata : {
    *(.rodata .rodata.*)
    . = ALIGN(4);
  } > ROM

  .data : {
    __data_start = .;
    *(.data .data.*)
    . = ALIGN(4);
    __data_end = .;
  } > IWRAM AT > ROM
  __data_load = LOADADDR(.data);

  .bss (NOLOAD) : {
    __bss_start = .;
    *(.bss .bss.*)
    . = ALIGN(4);
    __bss_end = .;
  } > IWRAM

  /DISCARD/ : {
    *(.ARM.exidx .ARM.exidx.*)
  }
}
"#;

    f.write_all(LINKER_SCRIPT.as_bytes())
        .expect("failed to write linker.ld");

    // Hook up the linker script
    println!("cargo:rustc-link-arg=-T{}", link_path.display());
    println!("cargo:rerun-if-changed=build.rs");
}
