//! Data loading, validation and save files for the loadout engine.

pub mod load;
pub mod persistence;
pub mod schema;

pub use load::*;
pub use persistence::*;
pub use schema::*;
