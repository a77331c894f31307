//! Deterministic decoy sequences shown before the real apple is revealed.
//!
//! The sequence is a pure function of `(draw id, real apple)`. The seed is
//! threaded through local state only, so re-rendering or reopening a draw
//! mid-window always lands on the same decoy.

use crate::apple::AppleType;
use serde::{Deserialize, Serialize};

/// Decoy pool. Order matters: changing it changes every sequence.
pub const TEASER_POOL: [AppleType; 5] = [
    AppleType::Poison,
    AppleType::Bronze,
    AppleType::Silver,
    AppleType::Gold,
    AppleType::Red,
];

const LCG_MULTIPLIER: u32 = 1_664_525;
const LCG_INCREMENT: u32 = 1_013_904_223;

/// Rolling string hash (`h * 31 + c` over UTF-16 code units), wrapped to 32 bits.
pub fn seed_from(value: &str) -> u32 {
    let mut hash: i32 = 0;
    for unit in value.encode_utf16() {
        hash = (hash << 5).wrapping_sub(hash).wrapping_add(i32::from(unit));
    }
    hash as u32
}

fn step(state: u32) -> u32 {
    state
        .wrapping_mul(LCG_MULTIPLIER)
        .wrapping_add(LCG_INCREMENT)
}

fn pick(state: u64) -> AppleType {
    TEASER_POOL[(state % TEASER_POOL.len() as u64) as usize]
}

/// Build `slots` decoys for a draw. The last decoy never equals `actual`.
pub fn generate_teasers(id: &str, actual: AppleType, slots: usize) -> Vec<AppleType> {
    let mut state = if id.trim().is_empty() {
        tracing::debug!(apple = %actual, "blank draw id, seeding teasers from apple type");
        seed_from(actual.name())
    } else {
        seed_from(id)
    };

    let mut sequence = Vec::with_capacity(slots);
    for slot in 0..slots {
        state = step(state);
        let mut candidate = pick(u64::from(state));
        if slot + 1 == slots && candidate == actual {
            candidate = pick(u64::from(state) + 1);
        }
        sequence.push(candidate);
    }

    sequence
}

/// Memoizable decoy sequence for one draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeaserSequence {
    id: String,
    actual: AppleType,
    decoys: Vec<AppleType>,
}

impl TeaserSequence {
    pub fn new(id: &str, actual: AppleType, slots: usize) -> Self {
        Self {
            id: id.to_string(),
            actual,
            decoys: generate_teasers(id, actual, slots),
        }
    }

    /// True when this sequence was built for the given draw identity.
    pub fn matches(&self, id: &str, actual: AppleType, slots: usize) -> bool {
        self.id == id && self.actual == actual && self.decoys.len() == slots
    }

    pub fn decoy(&self, index: usize) -> Option<AppleType> {
        self.decoys.get(index).copied()
    }

    pub fn last(&self) -> Option<AppleType> {
        self.decoys.last().copied()
    }

    pub fn len(&self) -> usize {
        self.decoys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoys.is_empty()
    }

    pub fn as_slice(&self) -> &[AppleType] {
        &self.decoys
    }
}
