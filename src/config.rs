//! Shell configuration, loaded from JSON.
//!
//! Every field is optional in the file; missing fields take the defaults
//! below.
//!
//! ```json
//! {
//!   "seed": 42,
//!   "baseline": "2025-10-20",
//!   "calendar_events": 50,
//!   "emails": 25,
//!   "latency": { "enabled": true, "scale": 1.0 }
//! }
//! ```

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::generator::{SyntheticDataGenerator, DEFAULT_SEED};
use crate::repository::LatencyProfile;
use crate::Timestamp;

/// Overrides `seed` when set to an integer.
pub const SEED_ENV: &str = "MOCKDECK_SEED";
/// Disables simulated latency when set to `off`, `0` or `false`.
pub const LATENCY_ENV: &str = "MOCKDECK_LATENCY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Multiplier applied to every service's default delays.
    #[serde(default = "default_scale")]
    pub scale: f64,
}

fn default_true() -> bool {
    true
}

fn default_scale() -> f64 {
    1.0
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            scale: default_scale(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Day the synthetic data is anchored to. Today when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline: Option<NaiveDate>,
    #[serde(default = "default_calendar_events")]
    pub calendar_events: usize,
    #[serde(default = "default_emails")]
    pub emails: usize,
    #[serde(default)]
    pub latency: LatencyConfig,
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_calendar_events() -> usize {
    crate::apps::CalendarService::DEFAULT_EVENT_COUNT
}

fn default_emails() -> usize {
    crate::apps::MailService::DEFAULT_EMAIL_COUNT
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            baseline: None,
            calendar_events: default_calendar_events(),
            emails: default_emails(),
            latency: LatencyConfig::default(),
        }
    }
}

impl ShellConfig {
    /// Defaults with no simulated latency and a fixed baseline. Handy in tests.
    pub fn instant(baseline: NaiveDate) -> Self {
        Self {
            baseline: Some(baseline),
            latency: LatencyConfig {
                enabled: false,
                ..LatencyConfig::default()
            },
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse config from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded shell config");
        Self::from_json_str(&content)
    }

    /// Apply `MOCKDECK_SEED` and `MOCKDECK_LATENCY` from the environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(SEED_ENV).ok().as_deref(),
            std::env::var(LATENCY_ENV).ok().as_deref(),
        )
    }

    fn with_overrides(mut self, seed: Option<&str>, latency: Option<&str>) -> Self {
        if let Some(raw) = seed {
            match raw.trim().parse() {
                Ok(seed) => self.seed = seed,
                Err(_) => warn!(value = raw, "ignoring unparseable {SEED_ENV}"),
            }
        }
        if let Some(raw) = latency {
            let raw = raw.trim().to_ascii_lowercase();
            if matches!(raw.as_str(), "off" | "0" | "false") {
                self.latency.enabled = false;
            }
        }
        self
    }

    /// Midnight of the configured baseline day, or of today.
    pub fn baseline_timestamp(&self) -> Timestamp {
        self.generator().baseline()
    }

    /// A fresh generator for this configuration.
    pub fn generator(&self) -> SyntheticDataGenerator {
        match self.baseline {
            Some(date) => SyntheticDataGenerator::for_date(self.seed, date),
            None => SyntheticDataGenerator::today(self.seed),
        }
    }

    /// `profile` with the configured switch and scale applied.
    pub fn latency(&self, profile: LatencyProfile) -> LatencyProfile {
        if self.latency.enabled {
            profile.scaled(self.latency.scale)
        } else {
            LatencyProfile::none()
        }
    }
}
