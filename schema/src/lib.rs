// Shared data definitions for the battle engine.
// Everything here is plain data keyed by enum; battle behaviour lives in the
// engine crate.

pub use abilities::*;
pub use field::*;
pub use items::*;
pub use move_data::*;
pub use moves::*;
pub use pokemon_types::*;
pub use species::*;
pub use stats::*;

pub mod abilities;
pub mod field;
pub mod items;
pub mod move_data;
pub mod moves;
pub mod pokemon_types;
pub mod species;
pub mod stats;
