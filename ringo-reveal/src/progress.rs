//! Progress clock: how far a draw is through its disclosure window.
//!
//! Everything here is a pure function of its arguments so it can be
//! re-evaluated on any tick cadence without drifting.

use crate::apple::DrawStatus;
use chrono::{DateTime, Duration, Utc};

/// Advertised disclosure window length, in seconds.
pub const NOMINAL_WINDOW_SECS: i64 = 24 * 60 * 60;

pub fn nominal_window() -> Duration {
    Duration::seconds(NOMINAL_WINDOW_SECS)
}

/// Time-based disclosure percentage in `[0, 100]`.
///
/// The window used is `max(end - start, nominal)`: a server window shorter
/// than nominal (or inverted) is stretched, a longer one is honoured as is.
pub fn clock_progress(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    now: DateTime<Utc>,
    nominal: Duration,
) -> f64 {
    let raw = end - start;
    if raw <= Duration::zero() {
        tracing::debug!(%start, %end, "malformed draw window, using nominal duration");
    }
    let duration = raw.max(nominal);

    if now <= start {
        return 0.0;
    }
    if duration <= Duration::zero() || now >= start + duration {
        return 100.0;
    }

    let elapsed = (now - start).num_milliseconds() as f64;
    let total = duration.num_milliseconds() as f64;
    (elapsed / total * 100.0).clamp(0.0, 100.0)
}

/// Effective disclosure after applying the authoritative status.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Disclosure {
    /// Still governed by the local clock.
    Clock(f64),
    /// Server says revealed; the clock no longer matters.
    Authoritative,
}

impl Disclosure {
    pub fn resolve(status: DrawStatus, clock: f64) -> Self {
        match status {
            DrawStatus::Revealed => Disclosure::Authoritative,
            DrawStatus::Pending => Disclosure::Clock(clock.clamp(0.0, 100.0)),
        }
    }

    pub fn percent(&self) -> f64 {
        match self {
            Disclosure::Clock(p) => *p,
            Disclosure::Authoritative => 100.0,
        }
    }

    pub fn is_final(&self) -> bool {
        self.percent() >= 100.0
    }
}

/// Caption for the progress bar. Holds at 99% until the draw is final.
pub fn progress_label(disclosure: Disclosure) -> String {
    if disclosure.is_final() {
        return "100%".to_string();
    }
    format!("{:.0}%", disclosure.percent().min(99.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_progress_bounds() {
        let start = t0();
        let end = start + nominal_window();

        assert_eq!(clock_progress(start, end, start, nominal_window()), 0.0);
        assert_eq!(
            clock_progress(start, end, start - Duration::hours(3), nominal_window()),
            0.0
        );
        assert_eq!(clock_progress(start, end, end, nominal_window()), 100.0);
        assert_eq!(
            clock_progress(start, end, end + Duration::days(2), nominal_window()),
            100.0
        );
    }

    #[test]
    fn test_progress_is_linear() {
        let start = t0();
        let end = start + nominal_window();
        let half = clock_progress(start, end, start + Duration::hours(12), nominal_window());
        assert!((half - 50.0).abs() < 1e-9);

        let quarter = clock_progress(start, end, start + Duration::hours(6), nominal_window());
        assert!((quarter - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_window_is_stretched_to_nominal() {
        let start = t0();
        let end = start + Duration::hours(1);

        let at_one_hour = clock_progress(start, end, end, nominal_window());
        assert!(at_one_hour < 5.0, "got {at_one_hour}");
        assert!(clock_progress(start, end, start + Duration::hours(23), nominal_window()) < 100.0);
        assert_eq!(
            clock_progress(start, end, start + nominal_window(), nominal_window()),
            100.0
        );
    }

    #[test]
    fn test_inverted_window_uses_nominal() {
        let start = t0();
        let end = start - Duration::hours(5);
        let p = clock_progress(start, end, start + Duration::hours(12), nominal_window());
        assert!((p - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_long_window_is_not_capped() {
        let start = t0();
        let end = start + Duration::hours(48);
        let p = clock_progress(start, end, start + nominal_window(), nominal_window());
        assert!((p - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_progress_is_monotonic() {
        let start = t0();
        let end = start + nominal_window();
        let mut last = -1.0;
        for minutes in (-60..=26 * 60).step_by(17) {
            let p = clock_progress(start, end, start + Duration::minutes(minutes), nominal_window());
            assert!((0.0..=100.0).contains(&p));
            assert!(p >= last);
            last = p;
        }
    }

    #[test]
    fn test_revealed_status_wins() {
        let d = Disclosure::resolve(DrawStatus::Revealed, 4.1);
        assert_eq!(d, Disclosure::Authoritative);
        assert_eq!(d.percent(), 100.0);
        assert!(d.is_final());

        let pending = Disclosure::resolve(DrawStatus::Pending, 4.1);
        assert!(!pending.is_final());
    }

    #[test]
    fn test_progress_label_caps_until_final() {
        assert_eq!(progress_label(Disclosure::Clock(99.7)), "99%");
        assert_eq!(progress_label(Disclosure::Clock(42.4)), "42%");
        assert_eq!(progress_label(Disclosure::Clock(42.6)), "43%");
        assert_eq!(progress_label(Disclosure::Clock(99.99)), "99%");
        assert_eq!(progress_label(Disclosure::Clock(100.0)), "100%");
        assert_eq!(progress_label(Disclosure::Authoritative), "100%");
    }
}
