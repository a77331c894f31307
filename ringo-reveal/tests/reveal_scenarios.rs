//! End-to-end reveal behaviour over a full draw window.

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use parking_lot::Mutex;
use ringo_reveal::{
    displayed_apple, generate_teasers, stage_for, watch_draw, AppleType, Draw, DrawResult,
    DrawService, DrawStatus, ManualClock, RevealConfig, RevealError, RevealView, StatusHandle,
    StatusPoller,
};
use std::collections::VecDeque;
use std::sync::Arc;

fn t() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 8, 30, 0).unwrap()
}

fn gold_draw() -> Draw {
    Draw {
        id: "5150".to_string(),
        apple_type: AppleType::Gold,
        draw_time: t(),
        reveal_time: t() + Duration::hours(24),
        status: DrawStatus::Pending,
    }
}

fn five_stage_config() -> RevealConfig {
    RevealConfig {
        total_stages: 5,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Clock-driven reveal
// ---------------------------------------------------------------------------

#[test]
fn halfway_shows_decoy_and_deadline_shows_gold() {
    let config = five_stage_config();
    let mut view = RevealView::new(gold_draw(), &config);
    let teasers = generate_teasers("5150", AppleType::Gold, 4);

    let mid = view.frame(t() + Duration::hours(12));
    assert!((mid.progress - 50.0).abs() < 1e-9);
    assert_eq!(mid.stage_index, stage_for(50.0, 5));
    assert_eq!(mid.displayed(), teasers[stage_for(50.0, 5)]);
    assert!(!mid.is_final());
    assert_eq!(mid.time_left.to_string(), "12:00:00");

    let end = view.frame(t() + Duration::hours(24));
    assert_eq!(end.progress, 100.0);
    assert_eq!(end.stage_index, 4);
    assert!(end.is_final());
    assert_eq!(end.displayed(), AppleType::Gold);
    assert!(end.countdown_elapsed);
}

#[test]
fn early_server_reveal_wins_over_clock() {
    let config = five_stage_config();
    let mut view = RevealView::new(gold_draw(), &config);
    let now = t() + Duration::hours(1);

    assert!(view.frame(now).progress < 5.0);

    view.apply_status(DrawStatus::Revealed);
    let frame = view.frame(now);
    assert!(frame.is_final());
    assert_eq!(frame.displayed(), AppleType::Gold);
    assert_eq!(frame.progress_label, "100%");
    // countdown still points at the nominal reveal time
    assert_eq!(frame.time_left.to_string(), "23:00:00");
}

#[test]
fn one_hour_window_does_not_reveal_early() {
    let mut draw = gold_draw();
    draw.reveal_time = t() + Duration::hours(1);
    let config = RevealConfig::default();

    for hours in [1, 6, 12, 23] {
        let shown = displayed_apple(&draw, t() + Duration::hours(hours), &config).unwrap();
        let frame = RevealView::new(draw.clone(), &config).frame(t() + Duration::hours(hours));
        assert!(!frame.is_final(), "final after {hours}h");
        assert_eq!(shown, frame.displayed());
    }

    let frame = RevealView::new(draw, &config).frame(t() + Duration::hours(24));
    assert!(frame.is_final());
}

#[test]
fn decoy_before_reveal_never_spoils_outcome() {
    let config = RevealConfig::default();
    for n in 0..200 {
        for apple in AppleType::ALL {
            let draw = Draw {
                id: format!("draw-{n}"),
                apple_type: apple,
                ..gold_draw()
            };
            let mut view = RevealView::new(draw, &config);
            let last_tick = view.frame(t() + Duration::hours(24) - Duration::seconds(1));
            assert!(!last_tick.is_final());
            assert_ne!(last_tick.displayed(), apple);
        }
    }
}

#[test]
fn remount_mid_window_shows_same_decoy() {
    let config = RevealConfig::default();
    let now = t() + Duration::hours(15);

    let first = RevealView::new(gold_draw(), &config).frame(now);
    let second = RevealView::new(gold_draw(), &config).frame(now);
    assert_eq!(first.stage, second.stage);
}

#[test]
fn invalid_config_is_rejected() {
    let config = RevealConfig {
        total_stages: 1,
        ..Default::default()
    };
    assert!(matches!(
        displayed_apple(&gold_draw(), t(), &config),
        Err(RevealError::Config(_))
    ));
}

// ---------------------------------------------------------------------------
// Live ticker + status polling
// ---------------------------------------------------------------------------

struct ScriptedService {
    results: Mutex<VecDeque<ringo_reveal::Result<DrawResult>>>,
    calls: Mutex<usize>,
}

impl ScriptedService {
    fn new(results: Vec<ringo_reveal::Result<DrawResult>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            calls: Mutex::new(0),
        }
    }
}

fn result(is_revealed: bool) -> DrawResult {
    DrawResult {
        id: "5150".to_string(),
        apple_type: AppleType::Gold,
        draw_time: t(),
        reveal_time: t() + Duration::hours(24),
        status: if is_revealed { "revealed" } else { "pending" }.to_string(),
        is_revealed,
        purchase_available: 3,
        purchase_obligation: 0,
    }
}

#[async_trait]
impl DrawService for ScriptedService {
    async fn current_draw(&self) -> ringo_reveal::Result<Option<Draw>> {
        Ok(Some(gold_draw()))
    }

    async fn create_draw(&self, _referral_count: u32) -> ringo_reveal::Result<Draw> {
        Ok(gold_draw())
    }

    async fn draw_result(&self, _draw_id: &str) -> ringo_reveal::Result<DrawResult> {
        *self.calls.lock() += 1;
        self.results
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(result(false)))
    }
}

#[tokio::test(start_paused = true)]
async fn poller_survives_errors_and_stops_after_reveal() {
    let service = Arc::new(ScriptedService::new(vec![
        Ok(result(false)),
        Err(RevealError::service(502, "Bad Gateway")),
        Ok(result(true)),
    ]));
    let status = StatusHandle::new(DrawStatus::Pending);
    let mut watched = status.subscribe();

    let poller = StatusPoller::spawn(
        service.clone(),
        "5150".to_string(),
        status.clone(),
        std::time::Duration::from_secs(30),
    );

    loop {
        watched.changed().await.unwrap();
        if *watched.borrow_and_update() == DrawStatus::Revealed {
            break;
        }
    }

    assert_eq!(*service.calls.lock(), 3);
    tokio::time::sleep(std::time::Duration::from_secs(120)).await;
    assert!(!poller.is_running());
    assert_eq!(*service.calls.lock(), 3);
}

#[tokio::test(start_paused = true)]
async fn ticker_follows_polled_status() {
    let clock = ManualClock::new(t() + Duration::hours(1));
    let ticker = watch_draw(gold_draw(), &five_stage_config(), Arc::new(clock)).unwrap();
    let mut frames = ticker.subscribe();
    assert!(!ticker.current().is_final());

    let service = Arc::new(ScriptedService::new(vec![Ok(result(true))]));
    let _poller = StatusPoller::spawn(
        service,
        ticker.draw_id().to_string(),
        ticker.status_handle(),
        std::time::Duration::from_secs(30),
    );

    loop {
        frames.changed().await.unwrap();
        if frames.borrow_and_update().is_final() {
            break;
        }
    }
    assert_eq!(ticker.current().displayed(), AppleType::Gold);
}
