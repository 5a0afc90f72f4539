use std::collections::BTreeMap;

use serde::Deserialize;

use crate::stats::StatSpread;

/// One pokedex entry.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Species {
    pub num: i32,
    pub name: String,
    pub types: Vec<String>,
    pub base_stats: StatSpread,
    /// Ability slots keyed "0", "1", "H".
    #[serde(default)]
    pub abilities: BTreeMap<String, String>,
    /// Base forme name for alternate formes (learnset fallback).
    #[serde(default)]
    pub base_species: Option<String>,
    #[serde(default)]
    pub forme: Option<String>,
    #[serde(default)]
    pub prevo: Option<String>,
    #[serde(default)]
    pub evos: Vec<String>,
    /// Filled from the optional catchrates document at load.
    #[serde(skip)]
    pub catch_rate: Option<u16>,
}

impl Species {
    /// Ability name at a slot ("0", "1", "H"), if the slot exists.
    pub fn ability(&self, slot: &str) -> Option<&str> {
        self.abilities.get(slot).map(String::as_str)
    }

    pub fn has_type(&self, type_name: &str) -> bool {
        self.types.iter().any(|t| t == type_name)
    }
}
