use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Penalty per pixel the screen has beyond the image.
pub const DEFAULT_RESOLUTION_PENALTY: f64 = 0.0001;
/// Penalty per whole unit of aspect-ratio difference.
pub const DEFAULT_ASPECT_PENALTY: f64 = 1.0;
/// Upper bound of the rating scale.
pub const DEFAULT_MAX_SCORE: f64 = 10.0;
/// Connect/read bound for remote images.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Settings for one scoring run, fixed at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Emit load diagnostics (remote vs local) and pixel samples
    #[serde(default)]
    pub verbose: bool,
    /// Scan pixel rows on the rayon pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    #[serde(default = "default_resolution_penalty")]
    pub resolution_penalty: f64,
    #[serde(default = "default_aspect_penalty")]
    pub aspect_penalty: f64,
    #[serde(default = "default_max_score")]
    pub max_score: f64,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

fn default_parallel() -> bool {
    true
}

fn default_resolution_penalty() -> f64 {
    DEFAULT_RESOLUTION_PENALTY
}

fn default_aspect_penalty() -> f64 {
    DEFAULT_ASPECT_PENALTY
}

fn default_max_score() -> f64 {
    DEFAULT_MAX_SCORE
}

fn default_fetch_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            parallel: default_parallel(),
            resolution_penalty: DEFAULT_RESOLUTION_PENALTY,
            aspect_penalty: DEFAULT_ASPECT_PENALTY,
            max_score: DEFAULT_MAX_SCORE,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
        }
    }
}

impl ScoringConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
