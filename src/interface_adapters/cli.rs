// Command-line surface. Values are only parsed here; range checks happen in tuning.

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "defence_game",
    version,
    about = "Intercept incoming plates with your cannon before time runs out"
)]
pub struct Cli {
    /// Rocket launch speed, 10 to 40 (out-of-range values fall back to 30).
    #[arg(long, env = "DEFENCE_FIREPOWER", allow_negative_numbers = true)]
    pub firepower: Option<i32>,

    /// Launch angle in degrees, 20 to 40 (out-of-range values fall back to 40).
    #[arg(long, env = "DEFENCE_ANGLE", allow_negative_numbers = true)]
    pub angle: Option<i32>,

    /// Session length in seconds.
    #[arg(long = "duration", env = "DEFENCE_DURATION_SECS")]
    pub duration_secs: Option<u64>,

    /// Seconds to show the launcher settings before play; 0 skips the countdown.
    #[arg(long = "countdown", env = "DEFENCE_COUNTDOWN_SECS")]
    pub countdown_secs: Option<u64>,

    /// Optional TOML settings file; flags win over file values.
    #[arg(long, env = "DEFENCE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the final summary as JSON.
    #[arg(long)]
    pub json: bool,
}
