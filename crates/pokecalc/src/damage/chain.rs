//! Accumulating modifier chain for the Gen 5+ pipeline.

use super::formula::{apply_modifier, chain_mods, MOD_BASE};
use super::modifier::Modifier;

/// Collects every multiplicative modifier of a calculation, then collapses
/// them into one composite 4096-scale value applied exactly once.
#[derive(Clone, Debug, Default)]
pub struct ModifierChain {
    modifiers: Vec<u32>,
}

impl ModifierChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a modifier; 1.0x entries are skipped.
    pub fn add(&mut self, modifier: Modifier) {
        if modifier.value() != MOD_BASE {
            self.modifiers.push(modifier.value());
        }
    }

    /// Add a raw 4096-scale value (type effectiveness translation).
    pub fn add_raw(&mut self, value: u32) {
        if value != MOD_BASE {
            self.modifiers.push(value);
        }
    }

    /// Collapse the chain into a single composite modifier.
    pub fn composite(&self) -> u32 {
        if self.modifiers.is_empty() {
            return MOD_BASE;
        }
        chain_mods(&self.modifiers)
    }

    /// Apply the collapsed chain to a damage value.
    pub fn apply(&self, damage: i32) -> i32 {
        apply_modifier(damage, self.composite())
    }

    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }
}
