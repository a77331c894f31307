//! Apple types and the draw records served by the draw service.

use crate::error::{RevealError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome category of a draw, ordered by rarity/value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppleType {
    Bronze,
    Silver,
    Gold,
    Red,
    Poison,
}

impl AppleType {
    pub const ALL: [AppleType; 5] = [
        AppleType::Bronze,
        AppleType::Silver,
        AppleType::Gold,
        AppleType::Red,
        AppleType::Poison,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AppleType::Bronze => "bronze",
            AppleType::Silver => "silver",
            AppleType::Gold => "gold",
            AppleType::Red => "red",
            AppleType::Poison => "poison",
        }
    }

    /// Dedicated card shown once the draw is final.
    pub fn card_asset(&self) -> &'static str {
        match self {
            AppleType::Bronze => "/images/cards/bronze_apple_card_v2.png",
            AppleType::Silver => "/images/cards/silver_apple_card_final.png",
            AppleType::Gold => "/images/cards/gold_apple_card_v2.png",
            AppleType::Red => "/images/cards/red_apple_card_premium.png",
            AppleType::Poison => "/images/cards/poison_apple_card_final.png",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AppleType::Bronze => "🍎 Bronze apple",
            AppleType::Silver => "🍎✨ Silver apple",
            AppleType::Gold => "🍎✨✨ Gold apple",
            AppleType::Red => "🍎🔥 Red apple",
            AppleType::Poison => "☠️ Poison apple",
        }
    }

    /// Wishlist purchases other users owe the holder of this apple.
    pub fn purchases_granted(&self) -> u32 {
        match self {
            AppleType::Bronze => 1,
            AppleType::Silver => 2,
            AppleType::Gold => 3,
            AppleType::Red => 10,
            AppleType::Poison => 0,
        }
    }

    pub fn reward_line(&self) -> String {
        match self {
            AppleType::Poison => "Purchase obligation 1 / exempt 0".to_string(),
            other => format!(
                "Purchase obligation 1 / purchases received {}",
                other.purchases_granted()
            ),
        }
    }
}

impl fmt::Display for AppleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AppleType {
    type Err = RevealError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        AppleType::ALL
            .into_iter()
            .find(|apple| apple.name() == wanted)
            .ok_or_else(|| RevealError::UnknownApple(s.to_string()))
    }
}

/// Server-side reveal state. `Revealed` overrides the local clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawStatus {
    #[default]
    Pending,
    Revealed,
}

impl DrawStatus {
    pub fn is_revealed(&self) -> bool {
        matches!(self, DrawStatus::Revealed)
    }
}

/// A single draw as served by the draw service. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draw {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub apple_type: AppleType,
    pub draw_time: DateTime<Utc>,
    pub reveal_time: DateTime<Utc>,
    #[serde(default)]
    pub status: DrawStatus,
}

impl Draw {
    /// Local mock draw for hosts running without a backend.
    pub fn preview(apple_type: AppleType, now: DateTime<Utc>, window: Duration) -> Self {
        Self {
            id: "preview".to_string(),
            apple_type,
            draw_time: now,
            reveal_time: now + window,
            status: DrawStatus::Pending,
        }
    }

    /// Identity used to memoize the teaser sequence.
    pub fn teaser_key(&self) -> (&str, AppleType) {
        (&self.id, self.apple_type)
    }
}

/// Detailed record from the result endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawResult {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub apple_type: AppleType,
    pub draw_time: DateTime<Utc>,
    pub reveal_time: DateTime<Utc>,
    pub status: String,
    #[serde(default)]
    pub is_revealed: bool,
    #[serde(default)]
    pub purchase_available: u32,
    #[serde(default)]
    pub purchase_obligation: u32,
}

impl DrawResult {
    pub fn effective_status(&self) -> DrawStatus {
        if self.is_revealed || self.status == "revealed" {
            DrawStatus::Revealed
        } else {
            DrawStatus::Pending
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Text(String),
}

fn id_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Int(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}
