use crate::{
    ActivationKind, ActivationLedger, CardCatalog, EffectAccumulator, Event, EventBus,
    InventoryStore, LedgerState, LoadoutConfig, PickRejection, RngState,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunError {
    #[error("no card available to draw")]
    NoCardAvailable,
    #[error("unknown card id {0}")]
    UnknownCard(String),
    #[error("card not owned: {0}")]
    NotOwned(String),
    #[error("cannot pick card: {0}")]
    Pick(#[from] PickRejection),
}

/// Fields persisted between sessions. The file format lives outside the core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveSlot {
    #[serde(default)]
    pub owned_cards: Vec<String>,
    #[serde(default)]
    pub picked_for_next: Vec<String>,
    #[serde(default = "crate::config::default_energy_limit")]
    pub energy_limit: u32,
    #[serde(default)]
    pub current_level: u32,
    #[serde(default)]
    pub ledger: LedgerState,
}

#[derive(Debug)]
pub struct RunState {
    pub catalog: Arc<CardCatalog>,
    pub config: LoadoutConfig,
    pub inventory: InventoryStore,
    pub ledger: ActivationLedger,
    pub effects: EffectAccumulator,
    pub rng: RngState,
    current_level: u32,
}

impl RunState {
    pub fn new(catalog: Arc<CardCatalog>, config: LoadoutConfig, seed: u64) -> Self {
        Self {
            inventory: InventoryStore::with_energy_limit(config.energy_limit),
            effects: EffectAccumulator::new(config.tuning.clone()),
            ledger: ActivationLedger::new(),
            rng: RngState::from_seed(seed),
            catalog,
            config,
            current_level: 1,
        }
    }

    pub fn current_level(&self) -> u32 {
        self.current_level
    }

    pub fn add_card(&mut self, id: &str, events: &mut EventBus) -> Result<(), RunError> {
        let card = self
            .catalog
            .lookup(id)
            .ok_or_else(|| RunError::UnknownCard(id.to_string()))?;
        self.inventory.add_card(card, events);
        Ok(())
    }

    pub fn remove_card(&mut self, id: &str, events: &mut EventBus) -> Result<(), RunError> {
        let card = self
            .catalog
            .lookup(id)
            .ok_or_else(|| RunError::UnknownCard(id.to_string()))?;
        if self.inventory.remove_card(card, events) {
            Ok(())
        } else {
            Err(RunError::NotOwned(id.to_string()))
        }
    }

    pub fn pick(&mut self, id: &str, events: &mut EventBus) -> Result<(), RunError> {
        let card = self.catalog.lookup(id);
        self.inventory.can_pick(card)?;
        let picked = self.inventory.try_pick(card, events);
        debug_assert!(picked, "try_pick disagreed with can_pick");
        Ok(())
    }

    pub fn unpick(&mut self, id: &str, events: &mut EventBus) -> bool {
        match self.catalog.lookup(id) {
            Some(card) => self.inventory.try_unpick(card, events),
            None => false,
        }
    }

    /// Draw from the catalog and add the card to the inventory.
    pub fn grant_random_card(
        &mut self,
        use_alternate_rates: bool,
        events: &mut EventBus,
    ) -> Result<String, RunError> {
        let card = self
            .catalog
            .draw_random(use_alternate_rates, &mut self.rng)
            .ok_or(RunError::NoCardAvailable)?;
        self.inventory.add_card(card, events);
        events.push(Event::CardDrawn {
            id: card.id.clone(),
            alternate: use_alternate_rates,
        });
        Ok(card.id.clone())
    }

    /// Enter the current level and decode its modifiers.
    pub fn start_level(&mut self, events: &mut EventBus) -> ActivationKind {
        let kind = self
            .ledger
            .activate(self.current_level, &mut self.inventory, events);
        self.effects.rebuild(&self.catalog, self.ledger.active_ids());
        kind
    }

    /// Re-enter the level in progress. Never pays for the loadout again.
    pub fn restart_level(&mut self, events: &mut EventBus) -> ActivationKind {
        self.start_level(events)
    }

    /// Leave the current level forward; the next level starts idle.
    pub fn advance_level(&mut self, events: &mut EventBus) {
        self.ledger.advance(self.current_level, events);
        self.effects.reset_all();
        self.current_level += 1;
    }

    pub fn new_run(&mut self, events: &mut EventBus) {
        self.inventory.clear(events);
        self.inventory.set_energy_limit(self.config.energy_limit, events);
        self.ledger.reset();
        self.effects.reset_all();
        self.current_level = 1;
        events.push(Event::RunReset);
    }

    pub fn to_save(&self) -> SaveSlot {
        SaveSlot {
            owned_cards: self.inventory.owned_ids(),
            picked_for_next: self.inventory.picked_ids(),
            energy_limit: self.inventory.energy_limit(),
            current_level: self.current_level,
            ledger: self.ledger.state().clone(),
        }
    }

    /// Rebuild a run from a save slot. Unknown ids are dropped, and picks that would
    /// break the pick invariants are skipped.
    pub fn from_save(
        catalog: Arc<CardCatalog>,
        config: LoadoutConfig,
        save: &SaveSlot,
        seed: u64,
    ) -> Self {
        let mut run = Self::new(catalog, config, seed);
        // Restoring is not a player action; nobody listens yet.
        let mut events = EventBus::default();
        run.inventory = InventoryStore::with_energy_limit(save.energy_limit);
        for id in &save.owned_cards {
            match run.catalog.lookup(id) {
                Some(card) => run.inventory.add_card(card, &mut events),
                None => tracing::warn!(%id, "dropping unknown owned card from save"),
            }
        }
        for id in &save.picked_for_next {
            let card = run.catalog.lookup(id);
            if let Err(reason) = run.inventory.can_pick(card) {
                tracing::warn!(%id, %reason, "dropping picked card from save");
                continue;
            }
            run.inventory.try_pick(card, &mut events);
        }
        run.current_level = save.current_level.max(1);
        run.ledger = ActivationLedger::from_state(save.ledger.clone());
        run.effects.rebuild(&run.catalog, run.ledger.active_ids());
        run
    }
}
