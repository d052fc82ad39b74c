use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::controller::{DEFAULT_TICK_INTERVAL, Rules};
use crate::line_clear::SpeedRamp;

pub const SETTINGS_PATH_ENV: &str = "BLOCKFALL_SETTINGS_PATH";
const MIN_TICK_FLOOR_MS: u64 = 1;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to write settings to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode settings: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimingSettings {
    pub base_tick_ms: u64,
    pub min_tick_ms: u64,
    pub speedup_rows: u32,
    pub speedup_step_ms: u64,
}

impl Default for TimingSettings {
    fn default() -> Self {
        let ramp = SpeedRamp::default();
        Self {
            base_tick_ms: DEFAULT_TICK_INTERVAL.as_millis() as u64,
            min_tick_ms: ramp.min_interval.as_millis() as u64,
            speedup_rows: ramp.threshold,
            speedup_step_ms: ramp.step.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LeaderboardSettings {
    pub path: Option<PathBuf>,
    /// Keep at most this many records. `None` never drops any.
    pub max_records: Option<usize>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VideoSettings {
    pub vsync: bool,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self { vsync: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSettings {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub timing: TimingSettings,
    #[serde(default)]
    pub leaderboard: LeaderboardSettings,
    #[serde(default)]
    pub video: VideoSettings,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            timing: TimingSettings::default(),
            leaderboard: LeaderboardSettings::default(),
            video: VideoSettings::default(),
        }
    }
}

impl GameSettings {
    pub fn sanitized(mut self) -> Self {
        self.version = default_version();
        let t = &mut self.timing;
        t.min_tick_ms = t.min_tick_ms.max(MIN_TICK_FLOOR_MS);
        t.base_tick_ms = t.base_tick_ms.max(t.min_tick_ms);
        t.speedup_rows = t.speedup_rows.max(1);
        if self.leaderboard.max_records == Some(0) {
            self.leaderboard.max_records = None;
        }
        self
    }

    pub fn rules(&self) -> Rules {
        Rules {
            base_tick_interval: Duration::from_millis(self.timing.base_tick_ms),
            speed: SpeedRamp {
                threshold: self.timing.speedup_rows,
                step: Duration::from_millis(self.timing.speedup_step_ms),
                min_interval: Duration::from_millis(self.timing.min_tick_ms),
            },
            ..Rules::default()
        }
    }
}

fn default_version() -> u32 {
    1
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_env() -> Self {
        if let Some(explicit) = std::env::var_os(SETTINGS_PATH_ENV) {
            return Self::new(explicit);
        }

        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(dirs::config_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join("blockfall").join("settings.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or unreadable settings fall back to defaults.
    pub fn load(&self) -> GameSettings {
        let Ok(bytes) = fs::read(&self.path) else {
            return GameSettings::default();
        };
        match serde_json::from_slice::<GameSettings>(&bytes) {
            Ok(settings) => settings.sanitized(),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), "ignoring invalid settings: {err}");
                GameSettings::default()
            }
        }
    }

    pub fn save(&self, settings: &GameSettings) -> Result<(), SettingsError> {
        let io_err = |source: io::Error| SettingsError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        let text = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, text).map_err(io_err)
    }
}
