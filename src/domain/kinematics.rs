//! Closed-form constant-acceleration motion.
//!
//! Positions are never integrated tick by tick. Every query evaluates the trajectory
//! analytically from the launch state, so sampling the same elapsed time twice always
//! yields the same cell and no error accumulates over a session.

use std::time::Duration;

/// A grid cell coordinate. `y` grows upward; row 0 is the ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Velocity in cells per second.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

impl Velocity {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Builds a launch vector of magnitude `power` pointing `angle_degrees` above the
    /// positive x axis (counter-clockwise).
    pub fn from_polar(power: f64, angle_degrees: f64) -> Self {
        let radians = angle_degrees.to_radians();
        Self {
            x: radians.cos() * power,
            y: radians.sin() * power,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// Launch state of a point mass under constant downward acceleration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicState {
    initial_position: Position,
    initial_velocity: Velocity,
    gravity: f64,
}

impl KinematicState {
    pub fn new(initial_position: Position, initial_velocity: Velocity, gravity: f64) -> Self {
        Self {
            initial_position,
            initial_velocity,
            gravity,
        }
    }

    /// A trajectory that never moves.
    pub fn stationary(position: Position) -> Self {
        Self::new(position, Velocity::ZERO, 0.0)
    }

    pub fn initial_position(&self) -> Position {
        self.initial_position
    }

    pub fn initial_velocity(&self) -> Velocity {
        self.initial_velocity
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    /// Exact coordinates after `elapsed`.
    pub fn coordinates_at(&self, elapsed: Duration) -> (f64, f64) {
        let t = elapsed.as_secs_f64();
        let x = f64::from(self.initial_position.x) + self.initial_velocity.x * t;
        let y = f64::from(self.initial_position.y) + self.initial_velocity.y * t
            - 0.5 * self.gravity * t * t;
        (x, y)
    }

    /// Grid cell occupied after `elapsed`.
    ///
    /// Both axes are floored, so a point anywhere left of or below the origin cell maps
    /// to a negative coordinate.
    pub fn at(&self, elapsed: Duration) -> Position {
        let (x, y) = self.coordinates_at(elapsed);
        Position::new(to_cell(x), to_cell(y))
    }
}

// Saturating float-to-int cast; `as` clamps out-of-range values and maps NaN to 0.
fn to_cell(value: f64) -> i32 {
    value.floor() as i32
}
