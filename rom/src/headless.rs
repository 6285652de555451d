//! Runs the game off-hardware against an in-memory framebuffer, steering the
//! player with a simple autopilot instead of the keypad.

use handheld::{
    input::{Key, KeyInput},
    video::{Display, Framebuffer},
};
use rand::rngs::SmallRng;
use tracing::{Level, info};
use tracing_subscriber::util::SubscriberInitExt;

use crate::{block::Block, config::GameConfig, game::GameLoop, new_game};

/// Ten seconds at 60 Hz.
const FRAMES: u32 = 600;

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .compact()
        .finish()
        .init();
}

/// Keypad value that brings `player` closer to `target`, larger gap first.
fn chase(player: &Block, target: &Block) -> u16 {
    let dx = target.x - player.x;
    let dy = target.y - player.y;
    let key = if dx != 0 && dx.abs() >= dy.abs() {
        if dx > 0 { Key::Right } else { Key::Left }
    } else if dy > 0 {
        Key::Down
    } else if dy < 0 {
        Key::Up
    } else {
        return KeyInput::RELEASED;
    };
    key.code()
}

/// Play `frames` frames on `fb` and return how many times the target moved.
fn session(fb: &mut Framebuffer, frames: u32) -> (GameLoop<SmallRng>, u32) {
    let mut game = new_game(GameConfig::DEFAULT, fb.size());
    game.start(fb);

    let mut eaten = 0;
    for frame in 0..frames {
        // poke the menu key once a second, it should be a no-op
        let keys = if frame % 60 == 59 {
            Key::Start.code()
        } else {
            chase(game.player(), game.target())
        };

        let before = *game.target();
        game.on_vblank(fb, keys);
        if *game.target() != before {
            eaten += 1;
        }
    }
    (game, eaten)
}

pub fn run() {
    setup_logging();
    info!("stdout logger started");

    let mut fb = Box::new(Framebuffer::new());
    fb.configure();

    let (game, eaten) = session(&mut fb, FRAMES);

    let player = game.player();
    let fills = fb.fills();
    info!(
        frames = FRAMES,
        eaten,
        player_x = player.x,
        player_y = player.y,
        fills,
        "headless run finished"
    );
}

#[cfg(test)]
mod tests {
    use handheld::video::Color;

    use super::*;

    fn block(x: i16, y: i16) -> Block {
        Block::new(x, y, 15, Color::YELLOW)
    }

    #[test]
    fn chase_closes_the_wider_gap_first() {
        assert_eq!(chase(&block(0, 0), &block(100, 20)), Key::Right.code());
        assert_eq!(chase(&block(100, 0), &block(0, 20)), Key::Left.code());
        assert_eq!(chase(&block(0, 0), &block(20, 100)), Key::Down.code());
        assert_eq!(chase(&block(0, 100), &block(20, 0)), Key::Up.code());
    }

    #[test]
    fn autopilot_session_eats_and_reports_fills() {
        let mut fb = Box::new(Framebuffer::new());
        fb.configure();

        let (game, eaten) = session(&mut fb, FRAMES);

        assert!(eaten > 0);
        // every non-menu frame erases and redraws the player at least
        let menu_frames = FRAMES / 60;
        assert!(fb.fills() > 2 * (FRAMES - menu_frames) as usize);
        let player = game.player();
        assert!((0..=240 - 15).contains(&player.x));
        assert!((0..=160 - 15).contains(&player.y));
    }

    #[test]
    fn chase_idles_on_top_of_target() {
        assert_eq!(chase(&block(30, 40), &block(30, 40)), KeyInput::RELEASED);
    }
}
