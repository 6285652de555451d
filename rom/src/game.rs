use handheld::{input::Key, interrupt::frame_count, video::Display};
use log::{debug, info, trace};
use rand::Rng;

use crate::{
    block::Block,
    config::{GameConfig, RespawnPolicy},
};

/// The whole game: a player block steered by the keypad and a target block
/// that jumps somewhere else whenever the player touches it.
///
/// Nothing happens outside [`GameLoop::on_vblank`], which the interrupt
/// layer calls once per frame.
pub struct GameLoop<R> {
    config: GameConfig,
    screen: (i16, i16),
    player: Block,
    target: Block,
    rng: R,
}

impl<R: Rng> GameLoop<R> {
    /// Player at the configured start, target somewhere random.
    pub fn new(config: GameConfig, screen: (i16, i16), mut rng: R) -> Self {
        let size = config.block_size;
        let (x, y) = config.player_start;
        let player = Block::new(x, y, size, config.player_color);
        let (x, y) = random_position(&mut rng, screen, size, size);
        let target = Block::new(x, y, size, config.target_color);
        Self::with_blocks(config, screen, player, target, rng)
    }

    pub fn with_blocks(
        config: GameConfig,
        screen: (i16, i16),
        player: Block,
        target: Block,
        rng: R,
    ) -> Self {
        Self {
            config,
            screen,
            player,
            target,
            rng,
        }
    }

    pub fn player(&self) -> &Block {
        &self.player
    }

    pub fn target(&self) -> &Block {
        &self.target
    }

    /// Draw the first target. The player shows up on the first frame.
    pub fn start(&mut self, display: &mut impl Display) {
        self.target.draw(display);
        info!(
            "game started, target at ({}, {})",
            self.target.x, self.target.y
        );
    }

    /// One frame's worth of work, given the keypad register value.
    pub fn on_vblank(&mut self, display: &mut impl Display, key_value: u16) {
        match Key::from_code(key_value) {
            // reserved for a menu
            Some(Key::Start) | Some(Key::Select) => {
                trace!("ignoring menu key {:#06x}", key_value);
            }
            _ => {
                self.move_and_redraw(display, key_value);
            }
        }
    }

    /// Erase the player, step it according to `key_value`, draw it again and
    /// see whether it ate the target. Returns the number of respawns.
    pub fn move_and_redraw(&mut self, display: &mut impl Display, key_value: u16) -> usize {
        let background = self.config.background;
        let before = (self.player.x, self.player.y);

        self.player.erase(display, background);
        self.player
            .step(Key::from_code(key_value), self.config.step, self.screen);
        self.player.draw(display);

        if before != (self.player.x, self.player.y) {
            debug!("player moved to ({}, {})", self.player.x, self.player.y);
        }

        self.check_and_respawn_target(display)
    }

    /// Test each player corner against the target and respawn it for every
    /// corner found inside.
    ///
    /// Corners are checked in order against the target's *current* position,
    /// so with [`RespawnPolicy::EveryCorner`] a later corner can catch the
    /// target again right where it just respawned.
    pub fn check_and_respawn_target(&mut self, display: &mut impl Display) -> usize {
        let entry = (self.target.x, self.target.y);
        let mut respawns = 0;
        for (px, py) in self.player.corners() {
            if !self.target.contains(px, py) {
                continue;
            }
            self.respawn_target(display, entry);
            respawns += 1;
            if self.config.respawn == RespawnPolicy::OncePerFrame {
                break;
            }
        }
        respawns
    }

    fn respawn_target(&mut self, display: &mut impl Display, entry: (i16, i16)) {
        self.target.erase(display, self.config.background);

        let current = (self.target.x, self.target.y);
        let (x, y) = respawn_position(
            &mut self.rng,
            self.screen,
            (self.target.width, self.target.height),
            [current, entry],
        );
        self.target.x = x;
        self.target.y = y;

        self.target.draw(display);
        info!(
            "target eaten on frame {}, respawned at ({}, {})",
            frame_count(),
            x,
            y
        );
    }
}

/// Uniform position keeping a `width`×`height` block fully on screen.
fn random_position<R: Rng>(
    rng: &mut R,
    screen: (i16, i16),
    width: i16,
    height: i16,
) -> (i16, i16) {
    let x = rng.gen_range(0..=screen.0 - width);
    let y = rng.gen_range(0..=screen.1 - height);
    (x, y)
}

/// Random position other than any in `avoid`.
///
/// When the screen has no room for that, the first roll is taken as is.
fn respawn_position<R: Rng>(
    rng: &mut R,
    screen: (i16, i16),
    size: (i16, i16),
    avoid: [(i16, i16); 2],
) -> (i16, i16) {
    let (width, height) = size;
    let room = (screen.0 - width + 1) as u32 * (screen.1 - height + 1) as u32;
    let avoided = if avoid[0] == avoid[1] { 1 } else { 2 };
    loop {
        let position = random_position(rng, screen, width, height);
        if room <= avoided || !avoid.contains(&position) {
            return position;
        }
    }
}

#[cfg(test)]
mod tests {
    use handheld::{
        input::KeyInput,
        video::{Color, Framebuffer},
    };
    use rand::{SeedableRng, rngs::SmallRng};

    use super::*;
    use crate::block::check_point;

    const SCREEN: (i16, i16) = (240, 160);

    fn game_with(
        player: (i16, i16),
        target: (i16, i16),
        respawn: RespawnPolicy,
    ) -> GameLoop<SmallRng> {
        let config = GameConfig {
            respawn,
            ..GameConfig::DEFAULT
        };
        let player = Block::new(player.0, player.1, 15, config.player_color);
        let target = Block::new(target.0, target.1, 15, config.target_color);
        GameLoop::with_blocks(config, SCREEN, player, target, SmallRng::seed_from_u64(7))
    }

    fn game(player: (i16, i16), target: (i16, i16)) -> GameLoop<SmallRng> {
        game_with(player, target, RespawnPolicy::EveryCorner)
    }

    fn in_respawn_range(block: &Block) -> bool {
        (0..=SCREEN.0 - 15).contains(&block.x) && (0..=SCREEN.1 - 15).contains(&block.y)
    }

    #[test]
    fn new_places_target_in_range() {
        for seed in 0..50 {
            let game = GameLoop::new(GameConfig::DEFAULT, SCREEN, SmallRng::seed_from_u64(seed));
            assert!(in_respawn_range(game.target()));
            assert_eq!((game.player().x, game.player().y), (100, 100));
        }
    }

    #[test]
    fn start_draws_only_the_target() {
        let mut fb = Framebuffer::new();
        let mut game = game((100, 100), (20, 30));
        game.start(&mut fb);

        assert_eq!(fb.count(Color::GRAY), 15 * 15);
        assert_eq!(fb.pixel(20, 30), Some(Color::GRAY));
        assert_eq!(fb.count(Color::YELLOW), 0);
    }

    #[test]
    fn menu_keys_do_nothing() {
        let mut fb = Framebuffer::new();
        let mut game = game((100, 100), (20, 30));

        game.on_vblank(&mut fb, Key::Start.code());
        game.on_vblank(&mut fb, Key::Select.code());

        assert_eq!(fb.fills(), 0);
        assert_eq!((game.player().x, game.player().y), (100, 100));
        assert_eq!((game.target().x, game.target().y), (20, 30));
    }

    #[test]
    fn non_directional_values_leave_player_in_place() {
        let values = [
            KeyInput::RELEASED,
            Key::A.code(),
            Key::B.code(),
            Key::L.code(),
            Key::R.code(),
            Key::Up.code() & Key::Right.code(),
            0,
            0xFFFF,
        ];
        for value in values {
            let mut fb = Framebuffer::new();
            let mut game = game((100, 100), (200, 20));
            game.on_vblank(&mut fb, value);
            assert_eq!((game.player().x, game.player().y), (100, 100), "{value:#x}");
        }
    }

    #[test]
    fn idle_frame_still_redraws_player() {
        let mut fb = Framebuffer::new();
        let mut game = game((100, 100), (200, 20));
        game.on_vblank(&mut fb, KeyInput::RELEASED);

        assert_eq!(fb.count(Color::YELLOW), 15 * 15);
        assert_eq!(fb.pixel(100, 100), Some(Color::YELLOW));
    }

    #[test]
    fn move_erases_old_position() {
        let mut fb = Framebuffer::new();
        let mut game = game((100, 100), (200, 20));
        game.on_vblank(&mut fb, KeyInput::RELEASED);
        game.on_vblank(&mut fb, Key::Right.code());

        assert_eq!((game.player().x, game.player().y), (110, 100));
        assert_eq!(fb.pixel(100, 100), Some(Color::BLACK));
        assert_eq!(fb.pixel(109, 114), Some(Color::BLACK));
        assert_eq!(fb.pixel(110, 100), Some(Color::YELLOW));
        assert_eq!(fb.count(Color::YELLOW), 15 * 15);
    }

    #[test]
    fn left_at_left_edge_stays_put() {
        let mut fb = Framebuffer::new();
        let mut game = game((0, 0), (200, 100));
        game.on_vblank(&mut fb, Key::Left.code());
        assert_eq!(game.player().x, 0);
    }

    #[test]
    fn right_at_right_edge_stays_put() {
        let mut fb = Framebuffer::new();
        let mut game = game((SCREEN.0 - 15, 50), (0, 0));
        game.on_vblank(&mut fb, Key::Right.code());
        assert_eq!(game.player().x, SCREEN.0 - 15);
    }

    #[test]
    fn directional_moves_stay_on_screen() {
        let mut fb = Framebuffer::new();
        let mut game = game((100, 100), (0, 0));
        let keys = [Key::Right, Key::Down, Key::Left, Key::Up];
        for key in keys {
            for _ in 0..40 {
                game.on_vblank(&mut fb, key.code());
                let player = game.player();
                assert!((0..=SCREEN.0 - player.width).contains(&player.x));
                assert!((0..=SCREEN.1 - player.height).contains(&player.y));
                assert!(in_respawn_range(game.target()));
            }
        }
    }

    #[test]
    fn target_untouched_when_no_corner_inside() {
        let mut fb = Framebuffer::new();
        let mut game = game((0, 0), (200, 100));
        assert_eq!(game.check_and_respawn_target(&mut fb), 0);
        assert_eq!((game.target().x, game.target().y), (200, 100));
        assert_eq!(fb.fills(), 0);
    }

    #[test]
    fn touching_edge_counts_as_inside() {
        let mut fb = Framebuffer::new();
        // player's right edge at x = 115 meets the target's left edge
        let mut game = game((100, 100), (115, 100));
        assert!(game.check_and_respawn_target(&mut fb) >= 1);
        assert_ne!((game.target().x, game.target().y), (115, 100));
    }

    #[test]
    fn full_overlap_respawns_target() {
        for seed in 0..100 {
            let mut fb = Framebuffer::new();
            let mut game = game((100, 100), (100, 100));
            game.rng = SmallRng::seed_from_u64(seed);

            let respawns = game.check_and_respawn_target(&mut fb);

            assert!((1..=4).contains(&respawns));
            assert_ne!((game.target().x, game.target().y), (100, 100));
            assert!(in_respawn_range(game.target()));
        }
    }

    #[test]
    fn once_per_frame_caps_respawns() {
        for seed in 0..100 {
            let mut fb = Framebuffer::new();
            let mut game = game_with((100, 100), (100, 100), RespawnPolicy::OncePerFrame);
            game.rng = SmallRng::seed_from_u64(seed);

            assert_eq!(game.check_and_respawn_target(&mut fb), 1);
            assert!(in_respawn_range(game.target()));
        }
    }

    /// Replays the corner checks against a copy of the RNG, moving the
    /// target after every hit, and returns (respawns, final position).
    fn replay_every_corner(
        player: &Block,
        target: (i16, i16),
        mut rng: SmallRng,
    ) -> (usize, (i16, i16)) {
        let entry = target;
        let mut target = target;
        let mut respawns = 0;
        for (px, py) in player.corners() {
            if check_point(px, py, target.0, target.1, 15, 15) {
                target = respawn_position(&mut rng, SCREEN, (15, 15), [target, entry]);
                respawns += 1;
            }
        }
        (respawns, target)
    }

    #[test]
    fn every_corner_rechecks_the_moved_target() {
        let mut repeats = 0;
        for seed in 0..1000 {
            let mut fb = Framebuffer::new();
            let mut game = game((100, 100), (100, 100));
            game.rng = SmallRng::seed_from_u64(seed);
            let (expected, landed) =
                replay_every_corner(game.player(), (100, 100), game.rng.clone());

            let respawns = game.check_and_respawn_target(&mut fb);

            assert_eq!(respawns, expected, "seed {seed}");
            assert_eq!((game.target().x, game.target().y), landed, "seed {seed}");
            if respawns >= 2 {
                repeats += 1;
            }
        }
        // a respawn landing under a later corner has to happen somewhere in
        // a thousand seeds, or the replay above proves nothing
        assert!(repeats > 0);
    }

    #[test]
    fn respawn_position_skips_avoided_spots() {
        let mut rng = SmallRng::seed_from_u64(3);
        // a 2x1 room: only (0, 0) and (1, 0) exist
        for _ in 0..50 {
            let position =
                respawn_position(&mut rng, (16, 15), (15, 15), [(0, 0), (0, 0)]);
            assert_eq!(position, (1, 0));
        }
        // no room left to avoid anything, take what comes
        let position = respawn_position(&mut rng, (16, 15), (15, 15), [(0, 0), (1, 0)]);
        assert!(position == (0, 0) || position == (1, 0));
    }

    #[test]
    fn respawned_target_is_redrawn() {
        let mut fb = Framebuffer::new();
        let mut game = game((100, 100), (100, 100));
        game.start(&mut fb);
        game.check_and_respawn_target(&mut fb);

        let target = *game.target();
        assert_eq!(fb.count(Color::GRAY), 15 * 15);
        assert_eq!(fb.pixel(target.x, target.y), Some(Color::GRAY));
    }

    #[test]
    fn walking_into_target_eats_it() {
        let mut fb = Framebuffer::new();
        let mut game = game((80, 100), (95, 100));
        game.start(&mut fb);

        // after the step the player spans 90..=105, its right corners land inside
        game.on_vblank(&mut fb, Key::Right.code());

        assert_eq!(game.player().x, 90);
        assert_ne!((game.target().x, game.target().y), (95, 100));
    }

    #[test]
    fn same_seed_same_respawns() {
        let run = || {
            let mut fb = Framebuffer::new();
            let mut game = game((100, 100), (100, 100));
            game.check_and_respawn_target(&mut fb);
            (game.target().x, game.target().y)
        };
        assert_eq!(run(), run());
    }
}
