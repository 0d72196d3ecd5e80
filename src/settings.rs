//! Round settings
//!
//! Stored as JSON next to the game. Every field is optional in the file and
//! falls back to the default round (800×600, three lives, a duck every 2.5 s).

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How the miss counter is spent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MissPolicy {
    /// Lose a life on every miss; the round ends at zero
    #[default]
    LivesOnMiss,
    /// Spend one round of ammo per click, hit or miss; the round never ends
    AmmoPerClick,
}

impl MissPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissPolicy::LivesOnMiss => "lives",
            MissPolicy::AmmoPerClick => "ammo",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "lives" | "lives_on_miss" => Some(MissPolicy::LivesOnMiss),
            "ammo" | "ammo_per_click" => Some(MissPolicy::AmmoPerClick),
            _ => None,
        }
    }

    /// HUD label for the counter
    pub fn counter_label(&self) -> &'static str {
        match self {
            MissPolicy::LivesOnMiss => "Lives",
            MissPolicy::AmmoPerClick => "Ammo",
        }
    }

    /// Whether running out of the counter ends the round
    pub fn ends_round(&self) -> bool {
        matches!(self, MissPolicy::LivesOnMiss)
    }
}

/// Errors from loading, saving or validating settings
#[derive(Debug)]
pub enum SettingsError {
    Io { path: PathBuf, source: io::Error },
    Parse(serde_json::Error),
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            Self::Parse(err) => write!(f, "malformed settings: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Round configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Play area width (pixels)
    pub width: f32,
    /// Play area height (pixels)
    pub height: f32,
    /// Seconds between duck spawns
    pub spawn_interval: f32,
    /// Ducks in the air when the round starts
    pub seed_spawns: u32,
    /// Starting lives (or ammo)
    pub starting_lives: u32,
    /// Points per duck
    pub hit_bonus: u64,
    pub miss_policy: MissPolicy,
    /// Host frame rate cap; the host steps the simulation at 1/frame_rate
    pub frame_rate: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            spawn_interval: 2.5,
            seed_spawns: 2,
            starting_lives: 3,
            hit_bonus: 100,
            miss_policy: MissPolicy::LivesOnMiss,
            frame_rate: 60,
        }
    }
}

impl Settings {
    /// Default settings with the given miss policy
    pub fn with_policy(policy: MissPolicy) -> Self {
        let mut settings = Self::default();
        settings.miss_policy = policy;
        settings
    }

    pub fn area(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Fixed simulation step for the host loop
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.frame_rate.max(1) as f32
    }

    /// Check that a round can actually be played with these values
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.width.is_finite() || self.width < DUCK_SIZE.x {
            return Err(invalid("width", format!("{} is narrower than a duck", self.width)));
        }
        let min_height = SPAWN_TOP + SPAWN_BOTTOM_MARGIN;
        if !self.height.is_finite() || self.height <= min_height {
            return Err(invalid(
                "height",
                format!("{} leaves no room for the spawn band (need > {})", self.height, min_height),
            ));
        }
        if !self.spawn_interval.is_finite() || self.spawn_interval <= 0.0 {
            return Err(invalid("spawn_interval", format!("{} is not a positive duration", self.spawn_interval)));
        }
        if self.starting_lives == 0 {
            return Err(invalid("starting_lives", "must be at least 1".to_string()));
        }
        if self.hit_bonus == 0 {
            return Err(invalid("hit_bonus", "must be at least 1".to_string()));
        }
        if self.frame_rate == 0 {
            return Err(invalid("frame_rate", "must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults if the file is missing or bad
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("Using default settings ({err})");
                Self::default()
            }
        }
    }

    /// Save settings as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> SettingsError {
    SettingsError::Invalid { field, reason }
}
