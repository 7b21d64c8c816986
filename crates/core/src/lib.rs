//! Card loadout rules: catalog, inventory, level activation and effect decoding.
//! Keep this crate free of IO and platform concerns.

pub mod cards;
pub mod catalog;
pub mod config;
pub mod effects;
pub mod events;
pub mod inventory;
pub mod ledger;
pub mod rng;
pub mod run;

pub use cards::*;
pub use catalog::*;
pub use config::*;
pub use effects::*;
pub use events::*;
pub use inventory::*;
pub use ledger::*;
pub use rng::*;
pub use run::*;
