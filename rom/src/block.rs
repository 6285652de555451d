use handheld::{
    input::Key,
    video::{Color, Display},
};

/// A solid rectangle on screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub x: i16,
    pub y: i16,
    pub width: i16,
    pub height: i16,
    pub color: Color,
}

impl Block {
    pub const fn new(x: i16, y: i16, size: i16, color: Color) -> Self {
        Self {
            x,
            y,
            width: size,
            height: size,
            color,
        }
    }

    pub fn draw(&self, display: &mut impl Display) {
        display.fill_rect(self.x, self.y, self.width, self.height, self.color);
    }

    pub fn erase(&self, display: &mut impl Display, background: Color) {
        display.fill_rect(self.x, self.y, self.width, self.height, background);
    }

    /// Top-left, top-right, bottom-left, bottom-right.
    ///
    /// The far corners sit at `x + width` / `y + height`, one past the last
    /// drawn pixel.
    pub fn corners(&self) -> [(i16, i16); 4] {
        let right = self.x + self.width;
        let bottom = self.y + self.height;
        [
            (self.x, self.y),
            (right, self.y),
            (self.x, bottom),
            (right, bottom),
        ]
    }

    /// Whether `(px, py)` lies inside this block, edges included.
    pub fn contains(&self, px: i16, py: i16) -> bool {
        check_point(px, py, self.x, self.y, self.width, self.height)
    }

    /// Move one `step` in the direction of `key`, stopping flush against the
    /// screen edge. Non-directional keys leave the block where it is.
    pub fn step(&mut self, key: Option<Key>, step: i16, screen: (i16, i16)) {
        let (screen_width, screen_height) = screen;
        match key {
            Some(Key::Right) => {
                self.x = (self.x + step).min(screen_width - self.width);
            }
            Some(Key::Left) => {
                self.x = (self.x - step).max(0);
            }
            Some(Key::Up) => {
                self.y = (self.y - step).max(0);
            }
            Some(Key::Down) => {
                self.y = (self.y + step).min(screen_height - self.height);
            }
            _ => {}
        }
    }
}

/// Point-in-rectangle test, inclusive on all four edges.
pub fn check_point(px: i16, py: i16, bx: i16, by: i16, bw: i16, bh: i16) -> bool {
    px >= bx && px <= bx + bw && py >= by && py <= by + bh
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: (i16, i16) = (240, 160);

    #[test]
    fn check_point_includes_edges() {
        assert!(check_point(100, 100, 100, 100, 15, 15));
        assert!(check_point(115, 115, 100, 100, 15, 15));
        assert!(check_point(107, 115, 100, 100, 15, 15));
        assert!(!check_point(116, 100, 100, 100, 15, 15));
        assert!(!check_point(99, 107, 100, 100, 15, 15));
        assert!(!check_point(100, 116, 100, 100, 15, 15));
    }

    #[test]
    fn corners_reach_one_past_the_last_pixel() {
        let block = Block::new(10, 20, 15, Color::YELLOW);
        assert_eq!(block.corners(), [(10, 20), (25, 20), (10, 35), (25, 35)]);
    }

    #[test]
    fn directional_keys_move_by_step() {
        let mut block = Block::new(100, 100, 15, Color::YELLOW);
        block.step(Some(Key::Right), 10, SCREEN);
        assert_eq!((block.x, block.y), (110, 100));
        block.step(Some(Key::Down), 10, SCREEN);
        assert_eq!((block.x, block.y), (110, 110));
        block.step(Some(Key::Left), 10, SCREEN);
        assert_eq!((block.x, block.y), (100, 110));
        block.step(Some(Key::Up), 10, SCREEN);
        assert_eq!((block.x, block.y), (100, 100));
    }

    #[test]
    fn other_keys_do_not_move() {
        for key in [
            None,
            Some(Key::A),
            Some(Key::B),
            Some(Key::L),
            Some(Key::R),
            Some(Key::Start),
            Some(Key::Select),
        ] {
            let mut block = Block::new(42, 17, 15, Color::YELLOW);
            block.step(key, 10, SCREEN);
            assert_eq!((block.x, block.y), (42, 17), "{key:?}");
        }
    }

    #[test]
    fn moves_saturate_at_every_edge() {
        let mut block = Block::new(0, 0, 15, Color::YELLOW);
        block.step(Some(Key::Left), 10, SCREEN);
        block.step(Some(Key::Up), 10, SCREEN);
        assert_eq!((block.x, block.y), (0, 0));

        let mut block = Block::new(225, 145, 15, Color::YELLOW);
        block.step(Some(Key::Right), 10, SCREEN);
        block.step(Some(Key::Down), 10, SCREEN);
        assert_eq!((block.x, block.y), (225, 145));

        let mut block = Block::new(4, 6, 15, Color::YELLOW);
        block.step(Some(Key::Left), 10, SCREEN);
        block.step(Some(Key::Up), 10, SCREEN);
        assert_eq!((block.x, block.y), (0, 0));

        let mut block = Block::new(220, 140, 15, Color::YELLOW);
        block.step(Some(Key::Right), 10, SCREEN);
        block.step(Some(Key::Down), 10, SCREEN);
        assert_eq!((block.x, block.y), (225, 145));
    }

    #[test]
    fn any_walk_stays_on_screen() {
        let keys = [Key::Right, Key::Down, Key::Left, Key::Up];
        for start_x in (0..=225).step_by(9) {
            for start_y in (0..=145).step_by(7) {
                for key in keys {
                    let mut block = Block::new(start_x, start_y, 15, Color::YELLOW);
                    for _ in 0..30 {
                        block.step(Some(key), 10, SCREEN);
                        assert!((0..=225).contains(&block.x));
                        assert!((0..=145).contains(&block.y));
                    }
                }
            }
        }
    }
}
