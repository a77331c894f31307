use comfy_table::{presets::UTF8_FULL, Table};
use ringo_reveal::{AppleType, RevealFrame, Stage, TeaserSequence};

pub fn frame_line(frame: &RevealFrame) -> String {
    match &frame.stage {
        Stage::Teaser {
            index,
            decoy,
            visual,
        } => format!(
            "[{} left] {:>4} stage {} | {} | {} | hint: {} ({})",
            frame.time_left,
            frame.progress_label,
            index + 1,
            frame.stage.headline(),
            frame.stage.caption(),
            decoy,
            visual.filter()
        ),
        Stage::Final { apple } => format!(
            "[{} left] {:>4} REVEALED | {} | {}",
            frame.time_left,
            frame.progress_label,
            apple.title(),
            apple.reward_line()
        ),
    }
}

pub fn print_frame(frame: &RevealFrame) {
    println!("{}", frame_line(frame));
}

pub fn print_final(apple: AppleType) {
    println!();
    println!("Your apple: {}", apple.title());
    println!("{}", apple.reward_line());
    println!("Card: {}", apple.card_asset());
}

pub fn teaser_table(teasers: &TeaserSequence, actual: AppleType) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Stage", "Shown", "Card"]);

    for (index, decoy) in teasers.as_slice().iter().enumerate() {
        table.add_row(vec![
            (index + 1).to_string(),
            decoy.to_string(),
            decoy.card_asset().to_string(),
        ]);
    }
    table.add_row(vec!["final", actual.name(), actual.card_asset()]);

    table
}

pub fn timeline_table(frames: &[RevealFrame]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Stage", "From", "Progress", "Shown", "Treatment"]);

    for frame in frames {
        let (stage, treatment) = match &frame.stage {
            Stage::Teaser { index, visual, .. } => ((index + 1).to_string(), visual.filter()),
            Stage::Final { .. } => ("final".to_string(), "none".to_string()),
        };
        table.add_row(vec![
            stage,
            frame.at.format("%m-%d %H:%M").to_string(),
            frame.progress_label.clone(),
            frame.displayed().to_string(),
            treatment,
        ]);
    }

    table
}
