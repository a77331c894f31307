use super::follow;
use crate::config::CliConfig;
use dialoguer::Confirm;
use ringo_reveal::{watch_draw, DrawService, HttpDrawService, StatusPoller, SystemClock};
use std::sync::Arc;

fn connect(config: &CliConfig, user: Option<String>) -> anyhow::Result<HttpDrawService> {
    let user_id = config.user_id(user)?;
    Ok(HttpDrawService::new(&config.reveal.backend_url, user_id)?)
}

pub async fn watch_current(config: &CliConfig, user: Option<String>) -> anyhow::Result<()> {
    let service = Arc::new(connect(config, user)?);

    let Some(draw) = service.current_draw().await? else {
        println!("No draw yet. Run `ringo draw` to start one.");
        return Ok(());
    };

    println!(
        "Draw {} opened {}, reveals {}",
        draw.id,
        draw.draw_time.format("%Y-%m-%d %H:%M:%S UTC"),
        draw.reveal_time.format("%Y-%m-%d %H:%M:%S UTC")
    );

    let revealed = draw.status.is_revealed();
    let ticker = watch_draw(draw, &config.reveal, Arc::new(SystemClock))?;
    let _poller = if revealed {
        None
    } else {
        Some(StatusPoller::spawn(
            service,
            ticker.draw_id().to_string(),
            ticker.status_handle(),
            config.reveal.poll_interval(),
        ))
    };

    follow(&ticker).await
}

pub async fn create_draw(
    config: &CliConfig,
    user: Option<String>,
    referrals: u32,
    yes: bool,
) -> anyhow::Result<()> {
    let service = connect(config, user)?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Use one draw right now?")
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let draw = service.create_draw(referrals).await?;
    println!("Drew apple {}", draw.id);
    println!(
        "It opens over 24 hours, fully revealed at {}",
        draw.reveal_time.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("Follow it with: ringo watch");
    Ok(())
}
