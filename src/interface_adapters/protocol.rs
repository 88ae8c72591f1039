// Serialisable DTOs for machine-readable output.

use crate::use_cases::GameSummary;
use serde::Serialize;

/// Final session report printed with `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryDto {
    pub shots_fired: u32,
    pub hits: u32,
    pub plates_launched: u32,
    pub accuracy_percent: f64,
    pub elapsed_secs: f64,
}

impl From<&GameSummary> for SummaryDto {
    fn from(summary: &GameSummary) -> Self {
        Self {
            shots_fired: summary.stats.shots_fired,
            hits: summary.stats.hits,
            plates_launched: summary.stats.plates_launched,
            accuracy_percent: summary.accuracy_percent(),
            elapsed_secs: summary.elapsed.as_secs_f64(),
        }
    }
}
