use crate::domain::kinematics::Position;

/// Bounds of the simulated region and the gravity acting inside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    /// Number of columns; valid x coordinates are `0..width`.
    pub width: i32,

    /// Number of rows; valid y coordinates are `0..height`.
    pub height: i32,

    /// Downward acceleration in cells per second squared.
    pub gravity: f64,
}

impl Playfield {
    /// True when `position` lies inside `[0, width) x [0, height)`.
    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0 && position.x < self.width && position.y >= 0 && position.y < self.height
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: 200,
            height: 50,
            gravity: 18.0,
        }
    }
}
