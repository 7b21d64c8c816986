use crate::{CardDefinition, Event, EventBus, InventoryChange, DEFAULT_ENERGY_LIMIT};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct OwnedStack {
    pub card: CardDefinition,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickRejection {
    #[error("card not found")]
    NotFound,
    #[error("card already picked")]
    Duplicate,
    #[error("not enough energy")]
    EnergyExceeded,
}

/// Result of paying for a locked-in selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsumeReport {
    pub requested: usize,
    pub consumed: usize,
    /// Ids whose stock ran out, with the number of copies that could not be paid.
    pub shortfalls: Vec<(String, usize)>,
}

impl ConsumeReport {
    pub fn is_complete(&self) -> bool {
        self.shortfalls.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct InventoryStore {
    energy_limit: u32,
    stacks: Vec<OwnedStack>,
    picked: Vec<CardDefinition>,
}

impl Default for InventoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::with_energy_limit(DEFAULT_ENERGY_LIMIT)
    }

    /// A zero limit is raised to 1.
    pub fn with_energy_limit(energy_limit: u32) -> Self {
        Self {
            energy_limit: energy_limit.max(1),
            stacks: Vec::new(),
            picked: Vec::new(),
        }
    }

    pub fn energy_limit(&self) -> u32 {
        self.energy_limit
    }

    pub fn energy_used(&self) -> u32 {
        self.picked
            .iter()
            .fold(0u32, |total, card| total.saturating_add(card.energy_cost))
    }

    pub fn stacks(&self) -> &[OwnedStack] {
        &self.stacks
    }

    pub fn picked(&self) -> &[CardDefinition] {
        &self.picked
    }

    pub fn add_card(&mut self, def: &CardDefinition, events: &mut EventBus) {
        let existing = if def.stackable {
            self.stacks.iter_mut().find(|stack| stack.card.id == def.id)
        } else {
            None
        };
        match existing {
            Some(stack) => {
                stack.count = (stack.count + 1).min(def.stack_cap());
            }
            None => self.stacks.push(OwnedStack {
                card: def.clone(),
                count: 1,
            }),
        }
        events.push(Event::InventoryChanged(InventoryChange::Added {
            id: def.id.clone(),
            count: self.owned_count(&def.id),
        }));
    }

    pub fn remove_card(&mut self, def: &CardDefinition, events: &mut EventBus) -> bool {
        if !self.remove_one(&def.id) {
            return false;
        }
        events.push(Event::InventoryChanged(InventoryChange::Removed {
            id: def.id.clone(),
            remaining: self.owned_count(&def.id),
        }));
        true
    }

    // Most recent stack first, so separate non-stackable copies unwind newest-first.
    fn remove_one(&mut self, id: &str) -> bool {
        let Some(idx) = self.stacks.iter().rposition(|stack| stack.card.id == id) else {
            return false;
        };
        let stack = &mut self.stacks[idx];
        if stack.card.stackable && stack.count > 1 {
            stack.count -= 1;
        } else {
            self.stacks.remove(idx);
        }
        true
    }

    /// Ownership is not checked: a card may be picked with zero copies owned.
    pub fn can_pick(&self, def: Option<&CardDefinition>) -> Result<(), PickRejection> {
        let def = def.ok_or(PickRejection::NotFound)?;
        if self.picked.iter().any(|card| card.id == def.id) {
            return Err(PickRejection::Duplicate);
        }
        if u64::from(self.energy_used()) + u64::from(def.energy_cost) > u64::from(self.energy_limit)
        {
            return Err(PickRejection::EnergyExceeded);
        }
        Ok(())
    }

    pub fn try_pick(&mut self, def: Option<&CardDefinition>, events: &mut EventBus) -> bool {
        if self.can_pick(def).is_err() {
            return false;
        }
        let Some(def) = def else {
            return false;
        };
        self.picked.push(def.clone());
        events.push(Event::InventoryChanged(InventoryChange::Picked {
            id: def.id.clone(),
            energy_used: self.energy_used(),
        }));
        true
    }

    pub fn try_unpick(&mut self, def: &CardDefinition, events: &mut EventBus) -> bool {
        let Some(idx) = self.picked.iter().position(|card| card.id == def.id) else {
            return false;
        };
        self.picked.remove(idx);
        events.push(Event::InventoryChanged(InventoryChange::Unpicked {
            id: def.id.clone(),
            energy_used: self.energy_used(),
        }));
        true
    }

    /// Lowering the limit below current usage unpicks from the end until the budget holds.
    pub fn set_energy_limit(&mut self, energy_limit: u32, events: &mut EventBus) {
        self.energy_limit = energy_limit.max(1);
        while self.energy_used() > self.energy_limit {
            let Some(card) = self.picked.pop() else {
                break;
            };
            tracing::warn!(
                id = %card.id,
                energy_limit = self.energy_limit,
                "energy limit lowered, unpicking card"
            );
            events.push(Event::InventoryChanged(InventoryChange::Unpicked {
                id: card.id,
                energy_used: self.energy_used(),
            }));
        }
    }

    pub fn owned_count(&self, id: &str) -> u32 {
        self.stacks
            .iter()
            .filter(|stack| stack.card.id == id)
            .map(|stack| stack.count)
            .sum()
    }

    pub fn picked_count(&self, id: &str) -> u32 {
        self.picked.iter().filter(|card| card.id == id).count() as u32
    }

    /// Negative only when owned state has been corrupted externally.
    pub fn available_count(&self, id: &str) -> i64 {
        i64::from(self.owned_count(id)) - i64::from(self.picked_count(id))
    }

    pub fn displayed_available_count(&self, id: &str) -> u32 {
        self.available_count(id).max(0) as u32
    }

    /// Pay for a locked-in selection: one removal per id occurrence, truncating at zero stock.
    pub fn consume_owned_by_ids<S: AsRef<str>>(
        &mut self,
        ids: &[S],
        events: &mut EventBus,
    ) -> ConsumeReport {
        let mut report = ConsumeReport {
            requested: ids.len(),
            ..ConsumeReport::default()
        };
        for id in ids {
            let id = id.as_ref();
            if self.remove_one(id) {
                report.consumed += 1;
                continue;
            }
            match report.shortfalls.iter_mut().find(|(missing, _)| missing == id) {
                Some((_, count)) => *count += 1,
                None => report.shortfalls.push((id.to_string(), 1)),
            }
        }
        for (id, missing) in &report.shortfalls {
            tracing::warn!(%id, missing, "stock shortfall while consuming owned cards");
        }
        events.push(Event::InventoryChanged(InventoryChange::Consumed {
            requested: report.requested,
            consumed: report.consumed,
        }));
        report
    }

    /// Drain the picked list. Only the activation ledger calls this.
    pub fn take_picked(&mut self, events: &mut EventBus) -> Vec<CardDefinition> {
        let taken = std::mem::take(&mut self.picked);
        events.push(Event::InventoryChanged(InventoryChange::PickedTaken {
            count: taken.len(),
        }));
        taken
    }

    pub fn clear(&mut self, events: &mut EventBus) {
        self.stacks.clear();
        self.picked.clear();
        events.push(Event::InventoryChanged(InventoryChange::Cleared));
    }

    /// One id per owned copy, in stack order.
    pub fn owned_ids(&self) -> Vec<String> {
        self.stacks
            .iter()
            .flat_map(|stack| std::iter::repeat(stack.card.id.clone()).take(stack.count as usize))
            .collect()
    }

    pub fn picked_ids(&self) -> Vec<String> {
        self.picked.iter().map(|card| card.id.clone()).collect()
    }
}
