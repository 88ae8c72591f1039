// Domain layer: core simulation types and rules.

pub mod entity;
pub mod kinematics;
pub mod ports;
pub mod scene;
pub mod tuning;

pub use entity::{BoundingBox, Entity, EntityKind};
pub use kinematics::{KinematicState, Position, Velocity};
pub use ports::{InputSignal, SignalSource, Surface};
pub use scene::SceneStore;
