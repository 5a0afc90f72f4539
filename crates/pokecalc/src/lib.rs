//! Damage calculation and Generation III save decoding for Pokémon
//! ROM-hack companion tools.
//!
//! Two cores share one read-only data catalog:
//!
//! - [`damage::Calculator`] reproduces the cartridge damage formula —
//!   4096-scale fixed-point modifiers with Game Freak rounding, the Gen 3
//!   sequential pipeline and the Gen 5+ modifier chain — and reports the
//!   16 damage rolls, KO chance, recoil, drain and a summary line.
//! - [`savefile::parse`] decodes the party out of a raw 128 KiB save
//!   image: slot selection, sector walk, substructure decryption and
//!   permutation, and ROM-hack id remapping.
//!
//! The catalog ([`data::Store`]) is built once from JSON documents and
//! then shared by reference; both cores are pure over caller-owned
//! inputs.

pub mod damage;
pub mod data;
pub mod entities;
pub mod error;
pub mod result;
pub mod savefile;
pub mod stats;
pub mod typechart;

pub use damage::{CalculateRequest, Calculator};
pub use data::Store;
pub use error::Error;
pub use result::DamageResult;
