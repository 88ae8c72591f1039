// Gameplay tuning, kept apart from runtime configuration (tick rates, poll timeouts).

pub mod launcher;
pub mod plate;
pub mod playfield;

pub use launcher::LauncherTuning;
pub use plate::PlateTuning;
pub use playfield::Playfield;
