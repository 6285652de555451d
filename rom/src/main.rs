#![cfg_attr(target_arch = "arm", no_std, no_main)]

use rand::{SeedableRng, rngs::SmallRng};

use crate::{config::GameConfig, game::GameLoop};

mod block;
mod config;
mod game;
#[cfg(not(target_arch = "arm"))]
mod headless;

fn new_game(config: GameConfig, screen: (i16, i16)) -> GameLoop<SmallRng> {
    GameLoop::new(config, screen, SmallRng::seed_from_u64(config.seed))
}

#[cfg(target_arch = "arm")]
#[unsafe(no_mangle)]
fn main(console: &mut handheld::console::Console) {
    use handheld::video::Display;

    let config = GameConfig::DEFAULT;

    console.display.configure();
    console.enable_blank_reporting();

    let mut game = new_game(config, console.display.size());
    game.start(&mut console.display);

    // everything from here on happens inside the vblank interrupt
    console.run_on_vblank(move |display, keys| game.on_vblank(display, keys));
}

#[cfg(not(target_arch = "arm"))]
fn main() {
    headless::run();
}
