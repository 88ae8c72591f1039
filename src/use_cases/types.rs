// Use-case level inputs/outputs for the game loop.

use crate::domain::Surface;
use std::fmt;
use std::io;
use std::time::Duration;

/// Session lifecycle. `Finished` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Idle,
    /// Countdown before play; fire presses are discarded.
    Starting,
    Running,
    Finished,
}

/// Counters owned by the simulation loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameStats {
    pub shots_fired: u32,
    pub hits: u32,
    pub plates_launched: u32,
}

/// What the HUD shows alongside each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameStatus {
    pub stats: GameStats,
    pub remaining: Duration,
    pub live_entities: usize,
    pub firepower: i32,
    pub angle_degrees: i32,
    /// Time left before play begins; `None` once the session is running.
    pub starting_in: Option<Duration>,
}

// Port for the render collaborator: a surface that can be wiped and shown.
pub trait RenderTarget: Surface + Send {
    fn clear(&mut self);
    fn present(&mut self, status: &GameStatus) -> io::Result<()>;
}

/// Final report of a finished session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameSummary {
    pub stats: GameStats,
    pub elapsed: Duration,
}

impl GameSummary {
    /// Hits per shot as a percentage; zero when nothing was fired.
    pub fn accuracy_percent(&self) -> f64 {
        if self.stats.shots_fired == 0 {
            return 0.0;
        }
        f64::from(self.stats.hits) / f64::from(self.stats.shots_fired) * 100.0
    }
}

impl fmt::Display for GameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // One decimal place, without a trailing ".0" for whole numbers.
        let accuracy = (self.accuracy_percent() * 10.0).round() / 10.0;
        writeln!(
            f,
            "Game over. Total hits: {}. Total shots fired: {}.",
            self.stats.hits, self.stats.shots_fired
        )?;
        write!(f, "Accuracy {accuracy}%")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(shots_fired: u32, hits: u32) -> GameSummary {
        GameSummary {
            stats: GameStats {
                shots_fired,
                hits,
                plates_launched: 30,
            },
            elapsed: Duration::from_secs(60),
        }
    }

    #[test]
    fn when_no_shots_were_fired_then_accuracy_is_zero() {
        let summary = summary(0, 0);

        assert_eq!(summary.accuracy_percent(), 0.0);
        assert!(summary.to_string().ends_with("Accuracy 0%"));
    }

    #[test]
    fn when_half_the_shots_hit_then_accuracy_is_fifty() {
        let summary = summary(4, 2);

        assert_eq!(summary.accuracy_percent(), 50.0);
        assert!(summary.to_string().ends_with("Accuracy 50%"));
    }

    #[test]
    fn when_accuracy_is_fractional_then_one_decimal_is_printed() {
        let text = summary(3, 1).to_string();

        assert!(text.contains("Total hits: 1. Total shots fired: 3."));
        assert!(text.ends_with("Accuracy 33.3%"));
    }
}
