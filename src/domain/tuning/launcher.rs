use crate::domain::kinematics::Position;
use std::ops::{Range, RangeInclusive};
use tracing::warn;

pub const FIREPOWER_RANGE: RangeInclusive<i32> = 10..=40;
pub const DEFAULT_FIREPOWER: i32 = 30;

pub const ANGLE_RANGE: RangeInclusive<i32> = 20..=40;
pub const DEFAULT_ANGLE: i32 = 40;

// Each rocket gets up to this much extra speed on top of the firepower.
pub const POWER_JITTER: f64 = 15.0;

/// Gameplay tuning for the player's cannon.
///
/// Firepower and angle come from the player; everything else is fixed geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LauncherTuning {
    /// Rocket launch speed in cells per second.
    pub firepower: i32,

    /// Launch angle in degrees above the horizon.
    pub angle_degrees: i32,

    /// Bottom-left cell of the cannon body.
    pub anchor: Position,

    /// Cell rockets are launched from.
    pub muzzle: Position,
}

impl LauncherTuning {
    /// Builds tuning from player-supplied values.
    ///
    /// Values outside the accepted ranges fall back to the defaults rather than failing.
    pub fn sanitized(firepower: i32, angle_degrees: i32) -> Self {
        let firepower = if FIREPOWER_RANGE.contains(&firepower) {
            firepower
        } else {
            warn!(
                firepower,
                min = FIREPOWER_RANGE.start(),
                max = FIREPOWER_RANGE.end(),
                default = DEFAULT_FIREPOWER,
                "firepower out of range, using default"
            );
            DEFAULT_FIREPOWER
        };

        let angle_degrees = if ANGLE_RANGE.contains(&angle_degrees) {
            angle_degrees
        } else {
            warn!(
                angle = angle_degrees,
                min = ANGLE_RANGE.start(),
                max = ANGLE_RANGE.end(),
                default = DEFAULT_ANGLE,
                "angle out of range, using default"
            );
            DEFAULT_ANGLE
        };

        Self {
            firepower,
            angle_degrees,
            ..Self::default()
        }
    }

    /// Launch speeds a rocket may be fired at.
    pub fn power_range(&self) -> Range<f64> {
        let base = f64::from(self.firepower);
        base..base + POWER_JITTER
    }
}

impl Default for LauncherTuning {
    fn default() -> Self {
        Self {
            firepower: DEFAULT_FIREPOWER,
            angle_degrees: DEFAULT_ANGLE,
            anchor: Position::new(3, 0),
            muzzle: Position::new(10, 5),
        }
    }
}
