//! Conversion between board pixels (y down, origin top-left) and Bevy world
//! units (y up, origin at the board center).

use bevy::math::Vec2;

use crate::core::config::BoardConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardSpace {
    pub size: Vec2,
}

impl BoardSpace {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }

    pub fn from_config(board: &BoardConfig) -> Self {
        Self::new(board.width, board.height)
    }

    pub fn to_world(&self, board: Vec2) -> Vec2 {
        Vec2::new(board.x - self.size.x * 0.5, self.size.y * 0.5 - board.y)
    }

    pub fn to_board(&self, world: Vec2) -> Vec2 {
        Vec2::new(world.x + self.size.x * 0.5, self.size.y * 0.5 - world.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_and_center_map_as_expected() {
        let space = BoardSpace::new(960.0, 1400.0);
        assert_eq!(space.to_world(Vec2::new(480.0, 700.0)), Vec2::ZERO);
        assert_eq!(space.to_world(Vec2::ZERO), Vec2::new(-480.0, 700.0));
        assert_eq!(space.to_world(Vec2::new(960.0, 1400.0)), Vec2::new(480.0, -700.0));
        let p = Vec2::new(123.5, 987.25);
        assert_eq!(space.to_board(space.to_world(p)), p);
    }
}
