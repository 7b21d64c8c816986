//! Exactly-once conversion of the picked selection into the active set for a level.
//!
//! The ledger is the only writer of the active snapshot and the only caller of
//! [`InventoryStore::take_picked`]. A level attempt starts when the level is first
//! entered and ends when the player advances past it; restarts and reloads in
//! between resume the stored snapshot without paying for it again.

use crate::{ConsumeReport, Event, EventBus, InventoryStore};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub level: u32,
    pub active_cards_this_level: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LedgerState {
    #[default]
    Idle,
    Active(ActiveSnapshot),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationKind {
    /// Snapshot already existed for this level; nothing was paid.
    Resumed,
    /// A new snapshot was created from the picked list and paid for.
    Fresh(ConsumeReport),
}

impl ActivationKind {
    pub fn is_resumed(&self) -> bool {
        matches!(self, ActivationKind::Resumed)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ActivationLedger {
    state: LedgerState,
}

impl ActivationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: LedgerState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn snapshot(&self) -> Option<&ActiveSnapshot> {
        match &self.state {
            LedgerState::Active(snapshot) => Some(snapshot),
            LedgerState::Idle => None,
        }
    }

    pub fn active_ids(&self) -> &[String] {
        self.snapshot()
            .map(|snapshot| snapshot.active_cards_this_level.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_active_for(&self, level: u32) -> bool {
        self.snapshot().map_or(false, |snapshot| snapshot.level == level)
    }

    /// Enter `level`. Resumes an existing snapshot for the same level; otherwise locks
    /// the picked list into a new snapshot and consumes its stock.
    pub fn activate(
        &mut self,
        level: u32,
        inventory: &mut InventoryStore,
        events: &mut EventBus,
    ) -> ActivationKind {
        if let Some(snapshot) = self.snapshot() {
            if snapshot.level == level {
                tracing::debug!(
                    level,
                    cards = snapshot.active_cards_this_level.len(),
                    "resuming active snapshot"
                );
                events.push(Event::LevelActivated {
                    level,
                    cards: snapshot.active_cards_this_level.clone(),
                    resumed: true,
                });
                return ActivationKind::Resumed;
            }
            tracing::warn!(
                stale = snapshot.level,
                level,
                "discarding snapshot left over from another level"
            );
        }

        let ids: Vec<String> = inventory
            .take_picked(events)
            .into_iter()
            .map(|card| card.id)
            .collect();
        // The snapshot exists before any stock is consumed.
        self.state = LedgerState::Active(ActiveSnapshot {
            level,
            active_cards_this_level: ids.clone(),
        });
        let report = inventory.consume_owned_by_ids(&ids, events);
        tracing::debug!(
            level,
            cards = ids.len(),
            consumed = report.consumed,
            "activated level loadout"
        );
        events.push(Event::LevelActivated {
            level,
            cards: ids,
            resumed: false,
        });
        ActivationKind::Fresh(report)
    }

    /// Leave `level` forward. No-op unless that level holds the active snapshot.
    pub fn advance(&mut self, level: u32, events: &mut EventBus) -> Option<ActiveSnapshot> {
        if !self.is_active_for(level) {
            return None;
        }
        let LedgerState::Active(snapshot) = std::mem::take(&mut self.state) else {
            return None;
        };
        events.push(Event::LevelCleared { level });
        Some(snapshot)
    }

    pub fn reset(&mut self) {
        self.state = LedgerState::Idle;
    }
}
