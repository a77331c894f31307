//! Countdown to a draw's reveal time. Purely presentational: reaching
//! zero never reveals anything by itself.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Time left until a deadline, never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TimeLeft {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TimeLeft {
    pub const ZERO: TimeLeft = TimeLeft {
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    pub fn total_seconds(&self) -> u64 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }
}

impl fmt::Display for TimeLeft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

/// Recomputed from `target - now` every call, so missed ticks self-correct.
pub fn remaining(target: DateTime<Utc>, now: DateTime<Utc>) -> TimeLeft {
    let ms = (target - now).num_milliseconds();
    if ms <= 0 {
        return TimeLeft::ZERO;
    }

    let total = (ms / 1000) as u64;
    TimeLeft {
        hours: total / 3600,
        minutes: (total % 3600) / 60,
        seconds: total % 60,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownState {
    Running(TimeLeft),
    Elapsed,
}

/// Display-only countdown to a draw's reveal time.
#[derive(Debug, Clone)]
pub struct Countdown {
    target: DateTime<Utc>,
    elapsed: bool,
}

impl Countdown {
    pub fn new(target: DateTime<Utc>) -> Self {
        Self {
            target,
            elapsed: false,
        }
    }

    pub fn target(&self) -> DateTime<Utc> {
        self.target
    }

    pub fn has_elapsed(&self) -> bool {
        self.elapsed
    }

    /// Zero is terminal: once reached, later polls stay `Elapsed`.
    pub fn poll(&mut self, now: DateTime<Utc>) -> CountdownState {
        if self.elapsed {
            return CountdownState::Elapsed;
        }

        let left = remaining(self.target, now);
        if !left.is_zero() {
            return CountdownState::Running(left);
        }

        self.elapsed = true;
        tracing::info!(target_time = %self.target, "countdown reached zero");
        CountdownState::Elapsed
    }
}
