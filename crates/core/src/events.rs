use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum InventoryChange {
    Added { id: String, count: u32 },
    Removed { id: String, remaining: u32 },
    Picked { id: String, energy_used: u32 },
    Unpicked { id: String, energy_used: u32 },
    PickedTaken { count: usize },
    Consumed { requested: usize, consumed: usize },
    Cleared,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Event {
    InventoryChanged(InventoryChange),
    LevelActivated {
        level: u32,
        cards: Vec<String>,
        resumed: bool,
    },
    LevelCleared { level: u32 },
    CardDrawn { id: String, alternate: bool },
    RunReset,
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
