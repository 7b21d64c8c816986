use crate::Rarity;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ENERGY_LIMIT: u32 = 10;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RarityWeight {
    pub rarity: Rarity,
    pub weight: u32,
}

impl RarityWeight {
    pub const fn new(rarity: Rarity, weight: u32) -> Self {
        Self { rarity, weight }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrawRates {
    #[serde(default = "standard_weights")]
    pub standard: Vec<RarityWeight>,
    #[serde(default = "alternate_weights")]
    pub alternate: Vec<RarityWeight>,
}

impl Default for DrawRates {
    fn default() -> Self {
        Self {
            standard: standard_weights(),
            alternate: alternate_weights(),
        }
    }
}

impl DrawRates {
    pub fn weights(&self, use_alternate_rates: bool) -> &[RarityWeight] {
        if use_alternate_rates {
            &self.alternate
        } else {
            &self.standard
        }
    }
}

fn standard_weights() -> Vec<RarityWeight> {
    vec![
        RarityWeight::new(Rarity::Common, 50),
        RarityWeight::new(Rarity::Rare, 35),
        RarityWeight::new(Rarity::Epic, 10),
        RarityWeight::new(Rarity::Legendary, 5),
    ]
}

fn alternate_weights() -> Vec<RarityWeight> {
    vec![
        RarityWeight::new(Rarity::Common, 30),
        RarityWeight::new(Rarity::Rare, 35),
        RarityWeight::new(Rarity::Epic, 20),
        RarityWeight::new(Rarity::Legendary, 15),
    ]
}

/// Per-card increments and factors applied when decoding an active snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EffectTuning {
    pub stone_breaker_per_card: u32,
    pub bonus_lives_per_card: u32,
    pub mirror_shots_per_card: u32,
    pub score_factor: f64,
    pub shot_speed_factor: f64,
}

impl Default for EffectTuning {
    fn default() -> Self {
        Self {
            stone_breaker_per_card: 1,
            bonus_lives_per_card: 1,
            mirror_shots_per_card: 1,
            score_factor: 1.5,
            shot_speed_factor: 1.25,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoadoutConfig {
    #[serde(default = "default_energy_limit")]
    pub energy_limit: u32,
    #[serde(default)]
    pub draw: DrawRates,
    #[serde(default)]
    pub tuning: EffectTuning,
}

pub(crate) fn default_energy_limit() -> u32 {
    DEFAULT_ENERGY_LIMIT
}

impl Default for LoadoutConfig {
    fn default() -> Self {
        Self {
            energy_limit: DEFAULT_ENERGY_LIMIT,
            draw: DrawRates::default(),
            tuning: EffectTuning::default(),
        }
    }
}
