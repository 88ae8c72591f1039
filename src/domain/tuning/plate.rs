use crate::domain::kinematics::Position;
use std::ops::Range;
use std::time::Duration;

/// Gameplay tuning for incoming plates and the target that lobs them.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateTuning {
    /// Fixed launch angle in degrees; above 90 means the plate flies toward the cannon.
    pub angle_degrees: f64,

    /// Launch speed is drawn uniformly from this range (cells per second).
    pub power: Range<f64>,

    /// One plate is launched per elapsed interval.
    pub spawn_interval: Duration,

    /// Bottom-left cell of the target body.
    pub target_anchor: Position,

    /// Cell plates are launched from.
    pub muzzle: Position,
}

impl Default for PlateTuning {
    fn default() -> Self {
        Self {
            angle_degrees: 120.0,
            power: 30.0..45.0,
            spawn_interval: Duration::from_secs(2),
            target_anchor: Position::new(185, 0),
            muzzle: Position::new(188, 5),
        }
    }
}
