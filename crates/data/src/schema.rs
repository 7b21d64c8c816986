use serde::{Deserialize, Serialize};

pub use pegdeck_core::{
    CardDefinition, DrawRates, EffectTuning, LoadoutConfig, Rarity, RarityWeight, SaveSlot,
};

/// One card as written in `cards.json`. Rarity is matched case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: String,
    pub display_name: String,
    pub rarity: String,
    #[serde(default)]
    pub energy_cost: u32,
    #[serde(default)]
    pub stackable: bool,
    #[serde(default)]
    pub max_stacks: Option<u32>,
    pub effect_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardFile {
    pub cards: Vec<CardRecord>,
}
