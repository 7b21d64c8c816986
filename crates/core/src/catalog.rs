use crate::{CardDefinition, DrawRates, Rarity, RarityWeight, RngState};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate card id {0}")]
    DuplicateId(String),
    #[error("card {0} is stackable but has max_stacks 0")]
    ZeroMaxStacks(String),
    #[error("card id must not be empty")]
    EmptyId,
}

/// Read-only card definitions, bucketed by rarity.
#[derive(Debug, Clone)]
pub struct CardCatalog {
    cards: Vec<CardDefinition>,
    by_id: HashMap<String, usize>,
    buckets: [Vec<usize>; 4],
    rates: DrawRates,
}

impl CardCatalog {
    pub fn new(cards: Vec<CardDefinition>) -> Result<Self, CatalogError> {
        Self::with_rates(cards, DrawRates::default())
    }

    pub fn with_rates(cards: Vec<CardDefinition>, rates: DrawRates) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(cards.len());
        let mut buckets: [Vec<usize>; 4] = Default::default();
        for (idx, card) in cards.iter().enumerate() {
            if card.id.is_empty() {
                return Err(CatalogError::EmptyId);
            }
            if card.stackable && card.max_stacks == 0 {
                return Err(CatalogError::ZeroMaxStacks(card.id.clone()));
            }
            if by_id.insert(card.id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateId(card.id.clone()));
            }
            buckets[card.rarity.index()].push(idx);
        }
        Ok(Self {
            cards,
            by_id,
            buckets,
            rates,
        })
    }

    pub fn lookup(&self, id: &str) -> Option<&CardDefinition> {
        self.by_id.get(id).map(|&idx| &self.cards[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Definitions in load order.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.iter()
    }

    pub fn bucket(&self, rarity: Rarity) -> impl Iterator<Item = &CardDefinition> {
        self.buckets[rarity.index()]
            .iter()
            .map(move |&idx| &self.cards[idx])
    }

    pub fn rates(&self) -> &DrawRates {
        &self.rates
    }

    /// Draw a tier by weight, then a uniform card from it.
    ///
    /// An empty tier falls back to the first non-empty one in `Rarity::ALL` order.
    /// `None` only when every bucket is empty or all weights are zero.
    pub fn draw_random(
        &self,
        use_alternate_rates: bool,
        rng: &mut RngState,
    ) -> Option<&CardDefinition> {
        let rarity = pick_weighted_rarity(self.rates.weights(use_alternate_rates), rng)?;
        let bucket = if self.buckets[rarity.index()].is_empty() {
            let fallback = Rarity::ALL
                .iter()
                .find(|tier| !self.buckets[tier.index()].is_empty())?;
            tracing::debug!(?rarity, fallback = ?fallback, "empty rarity bucket, falling back");
            &self.buckets[fallback.index()]
        } else {
            &self.buckets[rarity.index()]
        };
        let pick = rng.index(bucket.len())?;
        bucket.get(pick).map(|&idx| &self.cards[idx])
    }
}

pub fn pick_weighted_rarity(weights: &[RarityWeight], rng: &mut RngState) -> Option<Rarity> {
    pick_weighted(weights.iter().map(|w| (w.rarity, w.weight)), rng)
}

fn pick_weighted<T: Clone>(items: impl Iterator<Item = (T, u32)>, rng: &mut RngState) -> Option<T> {
    let items: Vec<(T, u32)> = items.filter(|(_, w)| *w > 0).collect();
    let total: u64 = items.iter().map(|(_, w)| u64::from(*w)).sum();
    if total == 0 {
        return None;
    }
    let roll = rng.below(total);
    let mut cumulative = 0u64;
    for (item, weight) in items {
        cumulative += u64::from(weight);
        if cumulative > roll {
            return Some(item);
        }
    }
    None
}
