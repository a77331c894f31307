//! Engine configuration.

use crate::error::{RevealError, Result};
use crate::progress::NOMINAL_WINDOW_SECS;
use chrono::Duration;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Minimum disclosure window. Shorter server windows are stretched to it.
    pub nominal_window_secs: i64,
    /// Teaser stages plus the terminal reveal stage.
    pub total_stages: usize,
    pub tick_interval_ms: u64,
    pub poll_interval_secs: u64,
    pub backend_url: String,
    pub user_id: Option<String>,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            nominal_window_secs: NOMINAL_WINDOW_SECS,
            total_stages: 6, // 5 teasers + reveal
            tick_interval_ms: 1000,
            poll_interval_secs: 30,
            backend_url: "http://localhost:8000".to_string(),
            user_id: None,
        }
    }
}

impl RevealConfig {
    pub fn nominal_window(&self) -> Duration {
        Duration::seconds(self.nominal_window_secs)
    }

    pub fn teaser_slots(&self) -> usize {
        self.total_stages.saturating_sub(1)
    }

    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_interval_ms)
    }

    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.poll_interval_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.nominal_window_secs <= 0 {
            return Err(RevealError::config("Nominal window must be positive"));
        }

        if self.total_stages < 2 {
            return Err(RevealError::config(
                "Need at least one teaser stage and the reveal stage",
            ));
        }

        if self.tick_interval_ms == 0 {
            return Err(RevealError::config("Tick interval must be greater than 0"));
        }

        if self.poll_interval_secs == 0 {
            return Err(RevealError::config("Poll interval must be greater than 0"));
        }

        if self.backend_url.is_empty() {
            return Err(RevealError::config("Backend URL cannot be empty"));
        }

        Ok(())
    }
}
