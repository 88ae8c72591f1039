use crate::domain::tuning::launcher::{DEFAULT_ANGLE, DEFAULT_FIREPOWER};
use crate::domain::tuning::{LauncherTuning, PlateTuning};
use crate::interface_adapters::cli::Cli;
use crate::use_cases::LoopSettings;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{env, fmt, fs, io, time::Duration};

// Runtime constants (not gameplay tuning).

pub const TICK_INTERVAL: Duration = Duration::from_millis(10);
pub const RENDER_INTERVAL: Duration = Duration::from_millis(100);
// Upper bound on how long the input listener blocks before re-checking the session.
pub const LISTENER_POLL_TIMEOUT: Duration = Duration::from_millis(50);
pub const DEFAULT_GAME_DURATION: Duration = Duration::from_secs(60);
pub const DEFAULT_COUNTDOWN: Duration = Duration::from_secs(3);

/// Log destination; stderr when unset.
pub fn log_file() -> Option<PathBuf> {
    env::var_os("LOG_FILE")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Errors raised while loading a settings file.
#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "failed to read settings file {}: {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "invalid settings file {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

/// Player-facing settings, layered defaults <- TOML file <- env/flags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameSettings {
    pub firepower: i32,
    pub angle: i32,
    pub duration_secs: u64,
    pub countdown_secs: u64,
    pub tick_interval_ms: u64,
    pub render_interval_ms: u64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            firepower: DEFAULT_FIREPOWER,
            angle: DEFAULT_ANGLE,
            duration_secs: DEFAULT_GAME_DURATION.as_secs(),
            countdown_secs: DEFAULT_COUNTDOWN.as_secs(),
            tick_interval_ms: TICK_INTERVAL.as_millis() as u64,
            render_interval_ms: RENDER_INTERVAL.as_millis() as u64,
        }
    }
}

impl GameSettings {
    pub fn from_toml_str(path: &Path, text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(path, &text)
    }

    /// Resolves the final settings for a parsed command line.
    ///
    /// Clap has already folded the `DEFENCE_*` environment variables into `cli`.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut settings = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(firepower) = cli.firepower {
            settings.firepower = firepower;
        }
        if let Some(angle) = cli.angle {
            settings.angle = angle;
        }
        if let Some(duration_secs) = cli.duration_secs {
            settings.duration_secs = duration_secs;
        }
        if let Some(countdown_secs) = cli.countdown_secs {
            settings.countdown_secs = countdown_secs;
        }
        Ok(settings)
    }

    /// Applies the range policy and builds the loop's timing and tuning.
    pub fn loop_settings(&self) -> LoopSettings {
        LoopSettings {
            // A zero period would make the tick interval panic.
            tick_interval: Duration::from_millis(self.tick_interval_ms.max(1)),
            render_interval: Duration::from_millis(self.render_interval_ms.max(1)),
            countdown: Duration::from_secs(self.countdown_secs),
            game_duration: Duration::from_secs(self.duration_secs),
            launcher: LauncherTuning::sanitized(self.firepower, self.angle),
            plates: PlateTuning::default(),
        }
    }
}
