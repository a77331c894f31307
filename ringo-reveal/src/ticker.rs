//! Per-draw render loop.
//!
//! A [`RevealTicker`] owns one recurring timer for one visible draw. The
//! task is aborted when the ticker is dropped, so a draw that leaves the
//! screen never keeps ticking.

use crate::apple::DrawStatus;
use crate::view::{RevealFrame, RevealView};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Settable clock for simulations and tests. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock() = now;
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock();
        *now = *now + by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

/// Write side of the authoritative status. Last write wins.
#[derive(Debug, Clone)]
pub struct StatusHandle {
    tx: Arc<watch::Sender<DrawStatus>>,
}

impl StatusHandle {
    pub fn new(initial: DrawStatus) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    pub fn set(&self, status: DrawStatus) {
        self.tx.send_replace(status);
    }

    pub fn get(&self) -> DrawStatus {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<DrawStatus> {
        self.tx.subscribe()
    }
}

pub struct RevealTicker {
    draw_id: String,
    frames: watch::Receiver<RevealFrame>,
    status: StatusHandle,
    handle: JoinHandle<()>,
}

impl RevealTicker {
    /// Start ticking `view` every `every`. The first frame is available immediately.
    pub fn spawn(mut view: RevealView, clock: Arc<dyn Clock>, every: Duration) -> Self {
        let draw_id = view.draw().id.clone();
        let status = StatusHandle::new(view.draw().status);
        let mut status_rx = status.subscribe();

        let (frame_tx, frames) = watch::channel(view.frame(clock.now()));

        let task_draw_id = draw_id.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = interval.tick() => {}
                    changed = status_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }

                view.apply_status(*status_rx.borrow_and_update());
                let frame = view.frame(clock.now());
                if frame_tx.send(frame).is_err() {
                    break;
                }
            }

            tracing::debug!(draw_id = %task_draw_id, "reveal ticker loop exited");
        });

        tracing::info!(draw_id = %draw_id, "reveal ticker started");

        Self {
            draw_id,
            frames,
            status,
            handle,
        }
    }

    pub fn draw_id(&self) -> &str {
        &self.draw_id
    }

    pub fn current(&self) -> RevealFrame {
        self.frames.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RevealFrame> {
        self.frames.clone()
    }

    pub fn status_handle(&self) -> StatusHandle {
        self.status.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for RevealTicker {
    fn drop(&mut self) {
        self.handle.abort();
        tracing::info!(draw_id = %self.draw_id, "reveal ticker stopped");
    }
}
