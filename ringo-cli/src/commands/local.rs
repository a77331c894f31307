use super::follow;
use crate::config::CliConfig;
use crate::render;
use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use ringo_reveal::{open_draw, watch_draw, AppleType, Clock, Draw, TeaserSequence};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Wall clock running `speed` times faster than real time from `origin`.
struct ScaledClock {
    origin: DateTime<Utc>,
    started: Instant,
    speed: u32,
}

impl Clock for ScaledClock {
    fn now(&self) -> DateTime<Utc> {
        let real_ms = self.started.elapsed().as_millis() as i64;
        self.origin + Duration::milliseconds(real_ms.saturating_mul(i64::from(self.speed)))
    }
}

fn local_draw(config: &CliConfig, id: &str, apple: AppleType, now: DateTime<Utc>) -> Draw {
    Draw {
        id: id.to_string(),
        ..Draw::preview(apple, now, config.reveal.nominal_window())
    }
}

/// Start of stage `i`, rounded up to the next millisecond so it never
/// falls just short of the boundary.
fn boundary_offset(window: Duration, i: i64, slots: i64) -> Duration {
    let ms = window.num_milliseconds() * i;
    Duration::milliseconds((ms + slots - 1) / slots)
}

pub fn show_teasers(config: &CliConfig, id: &str, apple: &str) -> anyhow::Result<()> {
    let apple: AppleType = apple.parse()?;
    let teasers = TeaserSequence::new(id, apple, config.reveal.teaser_slots());

    println!("Draw {} ({})", id, apple);
    println!("{}", render::teaser_table(&teasers, apple));
    Ok(())
}

pub fn show_timeline(config: &CliConfig, id: &str, apple: &str) -> anyhow::Result<()> {
    let apple: AppleType = apple.parse()?;
    let start = Utc::now();
    let draw = local_draw(config, id, apple, start);
    let mut view = open_draw(draw, &config.reveal)?;

    let slots = config.reveal.teaser_slots() as i64;
    let window = config.reveal.nominal_window();
    let frames: Vec<_> = (0..=slots)
        .map(|i| view.frame(start + boundary_offset(window, i, slots)))
        .collect();

    println!("Draw {} ({}), window {}h", id, apple, window.num_hours());
    println!("{}", render::timeline_table(&frames));
    Ok(())
}

pub async fn preview(
    config: &CliConfig,
    apple: Option<&str>,
    id: Option<String>,
    speed: u32,
) -> anyhow::Result<()> {
    let apple = match apple {
        Some(name) => name.parse::<AppleType>()?,
        None => *AppleType::ALL
            .choose(&mut rand::thread_rng())
            .unwrap_or(&AppleType::Bronze),
    };
    let id = id.unwrap_or_else(|| Uuid::new_v4().to_string());
    let speed = speed.max(1);

    let origin = Utc::now();
    let clock = ScaledClock {
        origin,
        started: Instant::now(),
        speed,
    };
    let draw = local_draw(config, &id, apple, origin);

    println!("Previewing draw {} at {}x speed (Ctrl-C to stop)", id, speed);
    let ticker = watch_draw(draw, &config.reveal, Arc::new(clock))?;
    follow(&ticker).await
}
