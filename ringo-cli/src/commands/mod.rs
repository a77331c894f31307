mod local;
mod remote;

pub use local::{preview, show_teasers, show_timeline};
pub use remote::{create_draw, watch_current};

use crate::render;
use ringo_reveal::RevealTicker;

/// Print frames until the draw is final or the user hits Ctrl-C.
/// Dropping the ticker afterwards cancels its timer.
async fn follow(ticker: &RevealTicker) -> anyhow::Result<()> {
    let mut frames = ticker.subscribe();
    let mut last_label = String::new();
    let mut last_stage = usize::MAX;

    loop {
        let frame = frames.borrow_and_update().clone();
        if frame.stage_index != last_stage || frame.progress_label != last_label {
            render::print_frame(&frame);
            last_stage = frame.stage_index;
            last_label = frame.progress_label.clone();
        }
        if frame.is_final() {
            render::print_final(frame.displayed());
            return Ok(());
        }

        tokio::select! {
            changed = frames.changed() => {
                if changed.is_err() {
                    anyhow::bail!("reveal ticker stopped unexpectedly");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                println!("Stopped. The reveal keeps going on the server.");
                return Ok(());
            }
        }
    }
}
