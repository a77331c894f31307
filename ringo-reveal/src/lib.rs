//! Apple draw reveal engine
//!
//! A draw's apple is decided by the server up front. This crate paces how it
//! is shown: over a 24 hour window the user sees a deterministic series of
//! increasingly clear decoy cards, and only at 100% (or when the server says
//! the draw is revealed) the real apple.

pub mod apple;
pub mod config;
pub mod countdown;
pub mod error;
pub mod progress;
pub mod service;
pub mod stage;
pub mod teaser;
pub mod ticker;
pub mod view;

pub use apple::{AppleType, Draw, DrawResult, DrawStatus};
pub use config::RevealConfig;
pub use countdown::{remaining, Countdown, CountdownState, TimeLeft};
pub use error::{Result, RevealError};
pub use progress::{clock_progress, nominal_window, Disclosure, NOMINAL_WINDOW_SECS};
pub use service::{DrawService, HttpDrawService, StatusPoller};
pub use stage::{stage_for, Stage, StageTable, StageVisual};
pub use teaser::{generate_teasers, TeaserSequence};
pub use ticker::{Clock, ManualClock, RevealTicker, StatusHandle, SystemClock};
pub use view::{RevealFrame, RevealView};

use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Build a view model for a draw after validating the config.
pub fn open_draw(draw: Draw, config: &RevealConfig) -> Result<RevealView> {
    config.validate()?;
    Ok(RevealView::new(draw, config))
}

/// Start the live 1-second render loop for a draw.
pub fn watch_draw(
    draw: Draw,
    config: &RevealConfig,
    clock: Arc<dyn Clock>,
) -> Result<RevealTicker> {
    let view = open_draw(draw, config)?;
    Ok(RevealTicker::spawn(view, clock, config.tick_interval()))
}

/// One-shot: the apple to display for `draw` at `now`.
pub fn displayed_apple(draw: &Draw, now: DateTime<Utc>, config: &RevealConfig) -> Result<AppleType> {
    let mut view = open_draw(draw.clone(), config)?;
    Ok(view.frame(now).displayed())
}
