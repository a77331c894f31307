//! Host view model. Composes clock, teasers, stages and countdown into a
//! single frame per tick.

use crate::apple::{AppleType, Draw, DrawStatus};
use crate::config::RevealConfig;
use crate::countdown::{Countdown, CountdownState, TimeLeft};
use crate::progress::{clock_progress, progress_label, Disclosure};
use crate::stage::{stage_for, Stage, StageTable};
use crate::teaser::TeaserSequence;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Everything a host needs to paint one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevealFrame {
    pub draw_id: String,
    pub progress: f64,
    pub progress_label: String,
    pub stage_index: usize,
    pub stage: Stage,
    pub time_left: TimeLeft,
    pub countdown_elapsed: bool,
    pub at: DateTime<Utc>,
}

impl RevealFrame {
    pub fn displayed(&self) -> AppleType {
        self.stage.apple()
    }

    pub fn is_final(&self) -> bool {
        self.stage.is_final()
    }
}

#[derive(Debug, Clone)]
pub struct RevealView {
    draw: Draw,
    teasers: TeaserSequence,
    stages: StageTable,
    countdown: Countdown,
    total_stages: usize,
    nominal: Duration,
}

impl RevealView {
    pub fn new(draw: Draw, config: &RevealConfig) -> Self {
        let slots = config.teaser_slots();
        let (id, apple) = draw.teaser_key();
        let teasers = TeaserSequence::new(id, apple, slots);
        let countdown = Countdown::new(draw.reveal_time);

        Self {
            draw,
            teasers,
            stages: StageTable::for_slots(slots),
            countdown,
            total_stages: config.total_stages,
            nominal: config.nominal_window(),
        }
    }

    pub fn draw(&self) -> &Draw {
        &self.draw
    }

    pub fn teasers(&self) -> &TeaserSequence {
        &self.teasers
    }

    /// Last-write-wins override from the draw service.
    pub fn apply_status(&mut self, status: DrawStatus) {
        if self.draw.status != status {
            tracing::info!(draw_id = %self.draw.id, ?status, "draw status updated");
        }
        self.draw.status = status;
    }

    /// Swap in a refetched draw. Teasers are only rebuilt if the identity changed.
    pub fn replace_draw(&mut self, draw: Draw) {
        let slots = self.total_stages.saturating_sub(1);
        let (id, apple) = draw.teaser_key();
        if !self.teasers.matches(id, apple, slots) {
            self.teasers = TeaserSequence::new(id, apple, slots);
        }
        if draw.reveal_time != self.countdown.target() {
            self.countdown = Countdown::new(draw.reveal_time);
        }
        self.draw = draw;
    }

    pub fn disclosure(&self, now: DateTime<Utc>) -> Disclosure {
        let clock = clock_progress(self.draw.draw_time, self.draw.reveal_time, now, self.nominal);
        Disclosure::resolve(self.draw.status, clock)
    }

    pub fn frame(&mut self, now: DateTime<Utc>) -> RevealFrame {
        let disclosure = self.disclosure(now);
        let progress = disclosure.percent();
        let terminal = self.total_stages.saturating_sub(1);
        let stage_index = if disclosure.is_final() {
            terminal
        } else {
            stage_for(progress, self.total_stages)
        };

        let stage = self.stage_at(stage_index, terminal);
        let (time_left, countdown_elapsed) = match self.countdown.poll(now) {
            CountdownState::Running(left) => (left, false),
            CountdownState::Elapsed => (TimeLeft::ZERO, true),
        };

        RevealFrame {
            draw_id: self.draw.id.clone(),
            progress,
            progress_label: progress_label(disclosure),
            stage_index,
            stage,
            time_left,
            countdown_elapsed,
            at: now,
        }
    }

    fn stage_at(&self, index: usize, terminal: usize) -> Stage {
        if index >= terminal {
            return Stage::Final {
                apple: self.draw.apple_type,
            };
        }

        match (self.teasers.decoy(index), self.stages.get(index)) {
            (Some(decoy), Some(visual)) => Stage::Teaser {
                index,
                decoy,
                visual: visual.clone(),
            },
            // slots and visuals are both sized from total_stages
            _ => Stage::Final {
                apple: self.draw.apple_type,
            },
        }
    }
}
