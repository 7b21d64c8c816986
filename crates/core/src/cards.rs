use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Fallback order used when a drawn tier has no cards.
    pub const ALL: [Rarity; 4] = [
        Rarity::Common,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    pub fn index(self) -> usize {
        match self {
            Rarity::Common => 0,
            Rarity::Rare => 1,
            Rarity::Epic => 2,
            Rarity::Legendary => 3,
        }
    }

    pub fn from_keyword(value: &str) -> Option<Self> {
        match normalize_key(value).as_str() {
            "common" => Some(Rarity::Common),
            "rare" => Some(Rarity::Rare),
            "epic" => Some(Rarity::Epic),
            "legendary" => Some(Rarity::Legendary),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: String,
    pub display_name: String,
    pub rarity: Rarity,
    #[serde(default)]
    pub energy_cost: u32,
    #[serde(default)]
    pub stackable: bool,
    #[serde(default = "default_max_stacks")]
    pub max_stacks: u32,
    pub effect_key: String,
}

fn default_max_stacks() -> u32 {
    1
}

impl CardDefinition {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        rarity: Rarity,
        energy_cost: u32,
        effect_key: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            rarity,
            energy_cost,
            stackable: false,
            max_stacks: 1,
            effect_key: effect_key.into(),
        }
    }

    pub fn stacking(mut self, max_stacks: u32) -> Self {
        self.stackable = true;
        self.max_stacks = max_stacks;
        self
    }

    /// Stack cap that applies to this card; non-stackable cards always hold one copy per stack.
    pub fn stack_cap(&self) -> u32 {
        if self.stackable {
            self.max_stacks.max(1)
        } else {
            1
        }
    }

    pub fn effect(&self) -> CardEffect {
        CardEffect::from_key(&self.effect_key)
    }
}

/// Strip all whitespace and lowercase.
pub fn normalize_key(raw: &str) -> String {
    raw.chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Infusion {
    Flame,
    Water,
    Earth,
    Storm,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CardEffect {
    Infusion(Infusion),
    StoneBreaker,
    BonusLife,
    MirrorShot,
    ScoreBoost,
    ShotSpeed,
    Rescue,
    Recharge,
    Unknown(String),
}

impl CardEffect {
    pub fn from_key(raw: &str) -> Self {
        let key = normalize_key(raw);
        match key.as_str() {
            "flame-infusion" | "flame_infusion" | "flameinfusion" | "fire-infusion" => {
                CardEffect::Infusion(Infusion::Flame)
            }
            "water-infusion" | "water_infusion" | "waterinfusion" => {
                CardEffect::Infusion(Infusion::Water)
            }
            "earth-infusion" | "earth_infusion" | "earthinfusion" => {
                CardEffect::Infusion(Infusion::Earth)
            }
            "storm-infusion" | "storm_infusion" | "storminfusion" | "lightning-infusion" => {
                CardEffect::Infusion(Infusion::Storm)
            }
            "stone-breaker" | "stone_breaker" | "stonebreaker" => CardEffect::StoneBreaker,
            "bonus-life" | "bonus_life" | "bonuslife" | "extra-ball" | "extra_ball" => {
                CardEffect::BonusLife
            }
            "mirror-shot" | "mirror_shot" | "mirrorshot" => CardEffect::MirrorShot,
            "score-boost" | "score_boost" | "scoreboost" | "score-multiplier" => {
                CardEffect::ScoreBoost
            }
            "shot-speed" | "shot_speed" | "shotspeed" | "quick-shot" => CardEffect::ShotSpeed,
            "rescue" | "last-chance" | "last_chance" | "lastchance" | "ball-rescue" => {
                CardEffect::Rescue
            }
            "recharge" | "energy-recharge" | "energy_recharge" => CardEffect::Recharge,
            _ => CardEffect::Unknown(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_whitespace_and_case() {
        assert_eq!(normalize_key("  Water - Infusion\t"), "water-infusion");
        assert_eq!(normalize_key("STONE BREAKER"), "stonebreaker");
    }

    #[test]
    fn effect_key_is_case_and_space_insensitive() {
        assert_eq!(
            CardEffect::from_key(" Flame Infusion "),
            CardEffect::Infusion(Infusion::Flame)
        );
        assert_eq!(CardEffect::from_key("Mirror Shot"), CardEffect::MirrorShot);
    }

    #[test]
    fn unknown_key_keeps_normalized_text() {
        assert_eq!(
            CardEffect::from_key("Gravity Well"),
            CardEffect::Unknown("gravitywell".to_string())
        );
    }

    #[test]
    fn stack_cap_ignores_max_for_non_stackable() {
        let single = CardDefinition::new("a", "A", Rarity::Common, 1, "rescue");
        assert_eq!(single.stack_cap(), 1);
        let mut stacked = single.clone().stacking(3);
        assert_eq!(stacked.stack_cap(), 3);
        stacked.max_stacks = 0;
        assert_eq!(stacked.stack_cap(), 1);
    }

    #[test]
    fn definition_deserializes_with_defaults() {
        let body = r#"{"id":"w","display_name":"Wave","rarity":"Rare","effect_key":"water-infusion"}"#;
        let def: CardDefinition = serde_json::from_str(body).expect("parse");
        assert_eq!(def.energy_cost, 0);
        assert!(!def.stackable);
        assert_eq!(def.max_stacks, 1);
        assert_eq!(def.effect(), CardEffect::Infusion(Infusion::Water));
    }
}
