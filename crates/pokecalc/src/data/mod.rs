//! Read-only game-data catalog.
//!
//! Built once from the JSON documents the collaborator ships (pokedex,
//! moves, items, abilities, natures, type chart, learnsets) and shared by
//! reference afterwards. Every lookup normalizes names to the canonical
//! id form first.

mod abilities;
mod items;
pub mod learnset;
mod moves;
mod natures;
mod species;
mod store;

pub use abilities::Ability;
pub use items::{type_boost_for, Item, NaturalGift};
pub use learnset::{LevelUpMove, ParsedLearnset, RawLearnset};
pub use moves::{Accuracy, Move, MoveCategory, MoveFlags, MoveSecondary, MultiHit};
pub use natures::Nature;
pub use species::Species;
pub use store::{to_id, NamedEntry, Store, TypeData};
