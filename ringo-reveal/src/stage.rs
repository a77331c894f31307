//! Stage renderer: quantizes disclosure progress into visual buckets.

use crate::apple::AppleType;
use serde::Serialize;

/// Index of the stage to render for `progress` out of `total_stages`.
///
/// `total_stages - 1` is the terminal (real apple) stage and is only
/// reached at 100%. Everything below maps onto the decoy buckets.
pub fn stage_for(progress: f64, total_stages: usize) -> usize {
    if total_stages < 2 {
        return 0;
    }
    let terminal = total_stages - 1;
    if progress >= 100.0 {
        return terminal;
    }
    if progress.is_nan() || progress <= 0.0 {
        return 0;
    }

    // absorbs float error when progress sits exactly on a bucket boundary
    const BOUNDARY_EPSILON: f64 = 1e-9;
    let bucket = 100.0 / terminal as f64;
    ((progress / bucket + BOUNDARY_EPSILON).floor() as usize).min(terminal - 1)
}

/// Obfuscation applied to a teaser card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageVisual {
    pub title: &'static str,
    pub description: &'static str,
    pub grayscale: f64,
    pub blur_px: f64,
    pub opacity: f64,
}

impl StageVisual {
    /// CSS `filter` value for web hosts.
    pub fn filter(&self) -> String {
        if self.grayscale <= 0.0 {
            return format!("blur({:.0}px)", self.blur_px);
        }
        format!("grayscale({:.2}) blur({:.0}px)", self.grayscale, self.blur_px)
    }
}

const PRESETS: [StageVisual; 5] = [
    StageVisual {
        title: "Black and white silhouette",
        description: "Only a shadow is showing",
        grayscale: 1.0,
        blur_px: 26.0,
        opacity: 0.75,
    },
    StageVisual {
        title: "Faint outline",
        description: "A hint of colour is creeping in",
        grayscale: 0.9,
        blur_px: 18.0,
        opacity: 0.82,
    },
    StageVisual {
        title: "Blurred whole card",
        description: "The shape of the card is coming through",
        grayscale: 0.6,
        blur_px: 12.0,
        opacity: 0.9,
    },
    StageVisual {
        title: "Colour returning",
        description: "Still not settled yet",
        grayscale: 0.3,
        blur_px: 7.0,
        opacity: 0.95,
    },
    StageVisual {
        title: "Unconfirmed card",
        description: "This card might just be a hint...",
        grayscale: 0.0,
        blur_px: 4.0,
        opacity: 1.0,
    },
];

/// Per-slot visuals, strictly less obscured as the index grows.
#[derive(Debug, Clone)]
pub struct StageTable {
    visuals: Vec<StageVisual>,
}

impl Default for StageTable {
    fn default() -> Self {
        Self {
            visuals: PRESETS.to_vec(),
        }
    }
}

impl StageTable {
    /// Resample the preset curve onto `slots` teaser stages.
    pub fn for_slots(slots: usize) -> Self {
        if slots == PRESETS.len() {
            return Self::default();
        }

        let last = PRESETS.len() - 1;
        let visuals = (0..slots)
            .map(|i| {
                let pos = if slots <= 1 {
                    last as f64
                } else {
                    i as f64 * last as f64 / (slots - 1) as f64
                };
                let lo = (pos.floor() as usize).min(last);
                let hi = (lo + 1).min(last);
                let frac = pos - lo as f64;
                let lerp = |a: f64, b: f64| a + (b - a) * frac;
                let caption = (pos.round() as usize).min(last);

                StageVisual {
                    title: PRESETS[caption].title,
                    description: PRESETS[caption].description,
                    grayscale: lerp(PRESETS[lo].grayscale, PRESETS[hi].grayscale),
                    blur_px: lerp(PRESETS[lo].blur_px, PRESETS[hi].blur_px),
                    opacity: lerp(PRESETS[lo].opacity, PRESETS[hi].opacity),
                }
            })
            .collect();

        Self { visuals }
    }

    pub fn get(&self, index: usize) -> Option<&StageVisual> {
        self.visuals.get(index)
    }

    pub fn len(&self) -> usize {
        self.visuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visuals.is_empty()
    }
}

/// What to draw for the current tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Stage {
    Teaser {
        index: usize,
        decoy: AppleType,
        visual: StageVisual,
    },
    /// Terminal stage. Always the real apple's own card and copy.
    Final { apple: AppleType },
}

impl Stage {
    pub fn apple(&self) -> AppleType {
        match self {
            Stage::Teaser { decoy, .. } => *decoy,
            Stage::Final { apple } => *apple,
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, Stage::Final { .. })
    }

    pub fn card_asset(&self) -> &'static str {
        self.apple().card_asset()
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Stage::Teaser { .. } => "???",
            Stage::Final { apple } => apple.title(),
        }
    }

    pub fn caption(&self) -> String {
        match self {
            Stage::Teaser { visual, .. } => {
                format!("{}: {}", visual.title, visual.description)
            }
            Stage::Final { apple } => apple.reward_line(),
        }
    }
}
