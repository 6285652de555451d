use handheld::video::{Color, SCREEN_HEIGHT, SCREEN_WIDTH};

/// What happens when more than one player corner lands inside the target in
/// the same frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RespawnPolicy {
    /// Every corner is checked against wherever the target is *now*, so one
    /// frame can move it up to four times.
    EveryCorner,
    /// Stop checking after the first respawn.
    OncePerFrame,
}

#[derive(Copy, Clone, Debug)]
pub struct GameConfig {
    /// Pixels moved per frame while a direction is held.
    pub step: i16,
    /// Side length of both the player and the target.
    pub block_size: i16,
    pub player_start: (i16, i16),
    pub player_color: Color,
    pub target_color: Color,
    pub background: Color,
    pub seed: u64,
    pub respawn: RespawnPolicy,
}

impl GameConfig {
    pub const DEFAULT: GameConfig = GameConfig {
        step: 10,
        block_size: 15,
        player_start: (100, 100),
        player_color: Color::YELLOW,
        target_color: Color::GRAY,
        background: Color::BLACK,
        seed: 0x5EED_B0C5,
        respawn: if cfg!(feature = "respawn-once") {
            RespawnPolicy::OncePerFrame
        } else {
            RespawnPolicy::EveryCorner
        },
    };
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

const _: () = {
    let c = GameConfig::DEFAULT;
    assert!(c.step > 0);
    assert!(c.block_size > 0 && c.block_size < SCREEN_WIDTH && c.block_size < SCREEN_HEIGHT);
    assert!(c.player_start.0 >= 0 && c.player_start.0 <= SCREEN_WIDTH - c.block_size);
    assert!(c.player_start.1 >= 0 && c.player_start.1 <= SCREEN_HEIGHT - c.block_size);
};
