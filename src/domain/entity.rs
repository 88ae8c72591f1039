// Simulation entities: a kind tag, a trajectory and a fixed rectangular extent.

use super::kinematics::{KinematicState, Position, Velocity};
use crate::utils::rng::next_entity_id;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Stationary thrower the plates come from.
    Target,
    /// Stationary player cannon.
    Launcher,
    /// Incoming projectile the player must intercept.
    Plate,
    /// Interceptor fired by the player.
    Rocket,
}

impl EntityKind {
    /// Width and height in cells.
    pub const fn extent(self) -> (i32, i32) {
        match self {
            EntityKind::Target => (8, 4),
            EntityKind::Launcher => (6, 3),
            EntityKind::Plate => (5, 1),
            EntityKind::Rocket => (3, 3),
        }
    }

    pub const fn is_static(self) -> bool {
        matches!(self, EntityKind::Target | EntityKind::Launcher)
    }
}

/// Inclusive axis-aligned rectangle of grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min: Position,
    pub max: Position,
}

impl BoundingBox {
    pub fn contains(&self, point: Position) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

/// An immutable simulation entity.
///
/// Its position is derived from the game clock on every query, so nothing about an
/// entity changes after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    id: u64,
    kind: EntityKind,
    trajectory: KinematicState,
    width: i32,
    height: i32,
    created_at: Duration,
}

impl Entity {
    fn new(kind: EntityKind, trajectory: KinematicState, created_at: Duration) -> Self {
        let (width, height) = kind.extent();
        Self {
            id: next_entity_id(),
            kind,
            trajectory,
            width,
            height,
            created_at,
        }
    }

    pub fn target(anchor: Position) -> Self {
        Self::new(
            EntityKind::Target,
            KinematicState::stationary(anchor),
            Duration::ZERO,
        )
    }

    pub fn launcher(anchor: Position) -> Self {
        Self::new(
            EntityKind::Launcher,
            KinematicState::stationary(anchor),
            Duration::ZERO,
        )
    }

    pub fn plate(origin: Position, velocity: Velocity, gravity: f64, created_at: Duration) -> Self {
        Self::new(
            EntityKind::Plate,
            KinematicState::new(origin, velocity, gravity),
            created_at,
        )
    }

    pub fn rocket(
        origin: Position,
        velocity: Velocity,
        gravity: f64,
        created_at: Duration,
    ) -> Self {
        Self::new(
            EntityKind::Rocket,
            KinematicState::new(origin, velocity, gravity),
            created_at,
        )
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn is_static(&self) -> bool {
        self.kind.is_static()
    }

    pub fn trajectory(&self) -> &KinematicState {
        &self.trajectory
    }

    pub fn extent(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn created_at(&self) -> Duration {
        self.created_at
    }

    /// Cell occupied at game time `now`. Times before creation read as the spawn point.
    pub fn position(&self, now: Duration) -> Position {
        self.trajectory.at(now.saturating_sub(self.created_at))
    }

    pub fn bounding_box(&self, now: Duration) -> BoundingBox {
        let min = self.position(now);
        BoundingBox {
            min,
            max: Position::new(min.x + self.width - 1, min.y + self.height - 1),
        }
    }

    /// True when either entity's anchor lies inside the other's bounding box.
    pub fn intersects(&self, other: &Entity, now: Duration) -> bool {
        self.bounding_box(now).contains(other.position(now))
            || other.bounding_box(now).contains(self.position(now))
    }
}
