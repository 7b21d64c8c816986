use crate::schema::{CardDefinition, CardFile, CardRecord, LoadoutConfig, Rarity};
use anyhow::{bail, Context};
use pegdeck_core::{CardCatalog, CardEffect};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub const CARDS_FILE: &str = "cards.json";
pub const LOADOUT_FILE: &str = "loadout.json";

pub fn load_card_definitions(path: &Path) -> anyhow::Result<Vec<CardDefinition>> {
    let file: CardFile = load_json(path)?;
    file.cards
        .into_iter()
        .map(|record| {
            let id = record.id.clone();
            card_from_record(record).with_context(|| format!("card {id} in {}", path.display()))
        })
        .collect()
}

/// Load `cards.json` and `loadout.json` from `dir` into a catalog with the configured draw rates.
pub fn load_catalog(dir: &Path) -> anyhow::Result<CardCatalog> {
    let config = load_loadout_config(dir)?;
    load_catalog_with_config(dir, &config)
}

pub fn load_catalog_with_config(dir: &Path, config: &LoadoutConfig) -> anyhow::Result<CardCatalog> {
    let path = dir.join(CARDS_FILE);
    let cards = load_card_definitions(&path)?;
    for card in &cards {
        if let CardEffect::Unknown(key) = card.effect() {
            tracing::warn!(id = %card.id, %key, "card has an unrecognized effect key");
        }
    }
    CardCatalog::with_rates(cards, config.draw.clone())
        .with_context(|| format!("build catalog from {}", path.display()))
}

/// Missing file means defaults.
pub fn load_loadout_config(dir: &Path) -> anyhow::Result<LoadoutConfig> {
    let path = dir.join(LOADOUT_FILE);
    let config = if path.exists() {
        load_json(&path)?
    } else {
        LoadoutConfig::default()
    };
    validate_loadout_config(&config).with_context(|| format!("validate {}", path.display()))?;
    Ok(config)
}

pub fn validate_loadout_config(config: &LoadoutConfig) -> anyhow::Result<()> {
    if config.energy_limit == 0 {
        bail!("energy_limit must be positive");
    }
    for (label, weights) in [
        ("standard", &config.draw.standard),
        ("alternate", &config.draw.alternate),
    ] {
        let mut seen = Vec::new();
        for entry in weights {
            if seen.contains(&entry.rarity) {
                bail!("{label} draw rates list {:?} twice", entry.rarity);
            }
            seen.push(entry.rarity);
        }
    }
    let tuning = &config.tuning;
    for (label, factor) in [
        ("score_factor", tuning.score_factor),
        ("shot_speed_factor", tuning.shot_speed_factor),
    ] {
        if !factor.is_finite() || factor < 0.0 {
            bail!("{label} must be a non-negative number, got {factor}");
        }
    }
    Ok(())
}

fn card_from_record(record: CardRecord) -> anyhow::Result<CardDefinition> {
    let Some(rarity) = Rarity::from_keyword(&record.rarity) else {
        bail!("unknown rarity {}", record.rarity);
    };
    let max_stacks = match (record.stackable, record.max_stacks) {
        (true, None) => bail!("stackable card needs max_stacks"),
        (true, Some(0)) => bail!("max_stacks must be at least 1"),
        (_, Some(max)) => max,
        (false, None) => 1,
    };
    Ok(CardDefinition {
        id: record.id,
        display_name: record.display_name,
        rarity,
        energy_cost: record.energy_cost,
        stackable: record.stackable,
        max_stacks,
        effect_key: record.effect_key,
    })
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}
