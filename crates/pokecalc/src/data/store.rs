//! The indexed catalog store.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::learnset::{parse_learnset, ParsedLearnset, RawLearnset};
use crate::data::{Ability, Item, Move, Nature, Species};
use crate::error::Error;
use crate::typechart::{combine, Effectiveness, EFF_NEUTRAL};

/// Convert a display name to its canonical id: lowercase, ASCII letters
/// and digits only. "Farfetch'd" -> "farfetchd".
pub fn to_id(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Per-defender-type chart entry: attack type name -> effectiveness code.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeData {
    pub damage_taken: BTreeMap<String, i32>,
}

/// Minimal id/name pair for collaborator autocomplete listings.
#[derive(Clone, Debug, Serialize)]
pub struct NamedEntry {
    pub id: String,
    pub name: String,
}

/// Read-only catalog of species, moves, items, abilities, natures, the
/// type chart, and raw learnsets.
///
/// Built once at startup; all accessors take `&self` and the type holds
/// no interior mutability, so a shared reference may be used from any
/// number of threads.
pub struct Store {
    pokedex: BTreeMap<String, Species>,
    moves: BTreeMap<String, Move>,
    items: BTreeMap<String, Item>,
    abilities: BTreeMap<String, Ability>,
    natures: BTreeMap<String, Nature>,
    typechart: BTreeMap<String, TypeData>,
    learnsets: BTreeMap<String, RawLearnset>,

    // normalized name/id -> canonical document key
    pokedex_index: BTreeMap<String, String>,
    moves_index: BTreeMap<String, String>,
    items_index: BTreeMap<String, String>,
    abilities_index: BTreeMap<String, String>,
    natures_index: BTreeMap<String, String>,
}

impl Store {
    /// Build a store from in-memory JSON documents. `catchrates` is the
    /// optional dex-number -> catch-rate document.
    #[allow(clippy::too_many_arguments)]
    pub fn from_json(
        pokedex: &str,
        moves: &str,
        items: &str,
        abilities: &str,
        natures: &str,
        typechart: &str,
        learnsets: &str,
        catchrates: Option<&str>,
    ) -> Result<Store, Error> {
        let mut store = Store {
            pokedex: serde_json::from_str(pokedex)?,
            moves: serde_json::from_str(moves)?,
            items: serde_json::from_str(items)?,
            abilities: serde_json::from_str(abilities)?,
            natures: serde_json::from_str(natures)?,
            typechart: serde_json::from_str(typechart)?,
            learnsets: serde_json::from_str(learnsets)?,
            pokedex_index: BTreeMap::new(),
            moves_index: BTreeMap::new(),
            items_index: BTreeMap::new(),
            abilities_index: BTreeMap::new(),
            natures_index: BTreeMap::new(),
        };

        // Items carry their id internally for the type-boost table.
        for (key, item) in store.items.iter_mut() {
            if item.id.is_empty() {
                item.id = key.clone();
            }
        }

        if let Some(doc) = catchrates {
            let rates: BTreeMap<String, u16> = serde_json::from_str(doc)?;
            for species in store.pokedex.values_mut() {
                if let Some(rate) = rates.get(&species.num.to_string()) {
                    species.catch_rate = Some(*rate);
                }
            }
        }

        store.pokedex_index = build_index(&store.pokedex, |s| &s.name);
        store.moves_index = build_index(&store.moves, |m| &m.name);
        store.items_index = build_index(&store.items, |i| &i.name);
        store.abilities_index = build_index(&store.abilities, |a| &a.name);
        store.natures_index = build_index(&store.natures, |n| &n.name);

        debug!(
            species = store.pokedex.len(),
            moves = store.moves.len(),
            items = store.items.len(),
            abilities = store.abilities.len(),
            natures = store.natures.len(),
            types = store.typechart.len(),
            learnsets = store.learnsets.len(),
            "catalog loaded"
        );

        Ok(store)
    }

    /// Load the catalog from a directory of JSON documents. The
    /// catchrates document is optional; every other file is required.
    pub fn load_dir(dir: &Path) -> Result<Store, Error> {
        let read = |name: &str| fs::read_to_string(dir.join(name));
        Store::from_json(
            &read("pokedex.json")?,
            &read("moves.json")?,
            &read("items.json")?,
            &read("abilities.json")?,
            &read("natures.json")?,
            &read("typechart.json")?,
            &read("learnsets.json")?,
            read("catchrates.json").ok().as_deref(),
        )
    }

    // ========================================================================
    // Name / id lookups
    // ========================================================================

    pub fn species(&self, name_or_id: &str) -> Option<&Species> {
        self.pokedex_index
            .get(&to_id(name_or_id))
            .and_then(|key| self.pokedex.get(key))
    }

    pub fn move_(&self, name_or_id: &str) -> Option<&Move> {
        self.moves_index
            .get(&to_id(name_or_id))
            .and_then(|key| self.moves.get(key))
    }

    pub fn item(&self, name_or_id: &str) -> Option<&Item> {
        self.items_index
            .get(&to_id(name_or_id))
            .and_then(|key| self.items.get(key))
    }

    pub fn ability(&self, name_or_id: &str) -> Option<&Ability> {
        self.abilities_index
            .get(&to_id(name_or_id))
            .and_then(|key| self.abilities.get(key))
    }

    pub fn nature(&self, name_or_id: &str) -> Option<&Nature> {
        self.natures_index
            .get(&to_id(name_or_id))
            .and_then(|key| self.natures.get(key))
    }

    pub fn learnset(&self, species_id: &str) -> Option<&RawLearnset> {
        self.learnsets.get(&to_id(species_id))
    }

    /// Parse a species' learnset for a generation, falling back to the
    /// base forme's learnset when an alternate forme has none.
    pub fn parsed_learnset(&self, species_id: &str, generation: u8) -> Option<ParsedLearnset> {
        let mut raw = self.learnset(species_id);
        if raw.is_none() {
            let base = self.species(species_id)?.base_species.clone()?;
            raw = self.learnset(&base);
        }
        raw.map(|r| parse_learnset(r, generation))
    }

    // ========================================================================
    // Numeric lookups
    // ========================================================================

    /// Species by national dex number, preferring the base forme (no
    /// hyphen in the name) over variants.
    pub fn species_by_dex(&self, num: i32) -> Option<&Species> {
        let mut fallback = None;
        for species in self.pokedex.values() {
            if species.num == num {
                if !species.name.contains('-') {
                    return Some(species);
                }
                fallback.get_or_insert(species);
            }
        }
        fallback
    }

    pub fn move_by_num(&self, num: i32) -> Option<&Move> {
        self.moves.values().find(|m| m.num == num)
    }

    /// Item by number, preferring battle items (with a Fling power) over
    /// key-item duplicates sharing the number.
    pub fn item_by_num(&self, num: i32) -> Option<&Item> {
        let mut fallback = None;
        for item in self.items.values() {
            if item.num == num {
                if item.fling_base_power > 0 {
                    return Some(item);
                }
                fallback.get_or_insert(item);
            }
        }
        fallback
    }

    // ========================================================================
    // Type chart
    // ========================================================================

    /// Combined effectiveness of an attack type against one or two
    /// defender types, in quarters (4 = 1x). Unknown defender types are
    /// neutral.
    pub fn effectiveness(&self, attack_type: &str, defender_types: &[String]) -> u8 {
        let mut quarters = EFF_NEUTRAL;
        for defender in defender_types {
            let eff = self
                .typechart
                .get(&defender.to_lowercase())
                .and_then(|t| t.damage_taken.get(attack_type))
                .map(|code| Effectiveness::from_code(*code))
                .unwrap_or(Effectiveness::Neutral);
            quarters = combine(quarters, eff);
        }
        quarters
    }

    // ========================================================================
    // Search and listings
    // ========================================================================

    /// Substring search over species display names, case-insensitive.
    pub fn search_species(&self, query: &str, limit: usize) -> Vec<&Species> {
        search(self.pokedex.values(), |s| &s.name, query, limit)
    }

    /// Substring search over move display names, case-insensitive.
    pub fn search_moves(&self, query: &str, limit: usize) -> Vec<&Move> {
        search(self.moves.values(), |m| &m.name, query, limit)
    }

    pub fn all_species(&self) -> Vec<NamedEntry> {
        list(&self.pokedex, |s| &s.name)
    }

    pub fn all_moves(&self) -> Vec<NamedEntry> {
        list(&self.moves, |m| &m.name)
    }

    pub fn all_items(&self) -> Vec<NamedEntry> {
        list(&self.items, |i| &i.name)
    }

    pub fn all_abilities(&self) -> Vec<NamedEntry> {
        list(&self.abilities, |a| &a.name)
    }

    pub fn all_natures(&self) -> Vec<NamedEntry> {
        list(&self.natures, |n| &n.name)
    }
}

fn build_index<T>(
    entries: &BTreeMap<String, T>,
    name: impl Fn(&T) -> &str,
) -> BTreeMap<String, String> {
    let mut index = BTreeMap::new();
    for (key, entry) in entries {
        index.insert(to_id(name(entry)), key.clone());
        index.insert(key.clone(), key.clone());
    }
    index
}

fn search<'a, T>(
    entries: impl Iterator<Item = &'a T>,
    name: impl Fn(&T) -> &str,
    query: &str,
    limit: usize,
) -> Vec<&'a T> {
    let query = query.to_lowercase();
    let mut results = Vec::new();
    for entry in entries {
        if name(entry).to_lowercase().contains(&query) {
            results.push(entry);
            if results.len() >= limit {
                break;
            }
        }
    }
    results
}

fn list<T>(entries: &BTreeMap<String, T>, name: impl Fn(&T) -> &str) -> Vec<NamedEntry> {
    entries
        .iter()
        .map(|(id, entry)| NamedEntry {
            id: id.clone(),
            name: name(entry).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_id() {
        assert_eq!(to_id("Farfetch'd"), "farfetchd");
        assert_eq!(to_id("Mr. Mime"), "mrmime");
        assert_eq!(to_id("Landorus-Therian"), "landorustherian");
        assert_eq!(to_id("PORYGON2"), "porygon2");
        assert_eq!(to_id("Will-O-Wisp"), "willowisp");
    }

    fn tiny_store() -> Store {
        Store::from_json(
            r#"{
                "gengar": {"num": 94, "name": "Gengar", "types": ["Ghost", "Poison"],
                    "baseStats": {"hp": 60, "atk": 65, "def": 60, "spa": 130, "spd": 75, "spe": 110},
                    "abilities": {"0": "Cursed Body"}},
                "gengarmega": {"num": 94, "name": "Gengar-Mega", "types": ["Ghost", "Poison"],
                    "baseStats": {"hp": 60, "atk": 65, "def": 80, "spa": 170, "spd": 95, "spe": 130},
                    "abilities": {"0": "Shadow Tag"}, "baseSpecies": "Gengar"}
            }"#,
            r#"{
                "shadowball": {"num": 247, "name": "Shadow Ball", "type": "Ghost",
                    "category": "Special", "basePower": 80, "accuracy": 100, "pp": 15}
            }"#,
            r#"{
                "charcoal": {"num": 249, "name": "Charcoal", "flingBasePower": 30},
                "tm01": {"num": 328, "name": "TM01"},
                "machobrace": {"num": 328, "name": "Macho Brace", "flingBasePower": 60}
            }"#,
            r#"{
                "cursedbody": {"num": 130, "name": "Cursed Body"}
            }"#,
            r#"{
                "adamant": {"name": "Adamant", "plus": "atk", "minus": "spa"}
            }"#,
            r#"{
                "ghost": {"damageTaken": {"Normal": 3, "Fighting": 3, "Ghost": 1, "Dark": 1, "Poison": 2, "Bug": 2}},
                "poison": {"damageTaken": {"Ground": 1, "Psychic": 1, "Fighting": 2, "Poison": 2, "Bug": 2, "Grass": 2, "Fairy": 2}}
            }"#,
            r#"{
                "gengar": {"learnset": {"shadowball": ["9M", "3L1"]}}
            }"#,
            Some(r#"{"94": 45}"#),
        )
        .unwrap()
    }

    #[test]
    fn test_case_and_punctuation_insensitive_lookup() {
        let store = tiny_store();
        assert!(store.species("GENGAR").is_some());
        assert!(store.species("Gengar-Mega").is_some());
        assert!(store.move_("Shadow Ball").is_some());
        assert!(store.move_("shadowball").is_some());
        assert!(store.species("missingno").is_none());
    }

    #[test]
    fn test_dex_lookup_prefers_base_forme() {
        let store = tiny_store();
        let species = store.species_by_dex(94).unwrap();
        assert_eq!(species.name, "Gengar");
        assert!(store.species_by_dex(9999).is_none());
    }

    #[test]
    fn test_item_by_num_prefers_fling_capable() {
        let store = tiny_store();
        // TM01 and Macho Brace share num 328; the Fling-capable one wins.
        assert_eq!(store.item_by_num(328).unwrap().name, "Macho Brace");
        assert_eq!(store.item_by_num(249).unwrap().name, "Charcoal");
    }

    #[test]
    fn test_effectiveness_product() {
        let store = tiny_store();
        let gengar_types = vec!["Ghost".to_string(), "Poison".to_string()];
        // Normal vs Ghost: immune
        assert_eq!(store.effectiveness("Normal", &gengar_types), 0);
        // Ghost vs Ghost/Poison: 2x * 1x = 2x
        assert_eq!(store.effectiveness("Ghost", &gengar_types), 8);
        // Bug vs Ghost/Poison: 0.5 * 0.5 = 0.25x
        assert_eq!(store.effectiveness("Bug", &gengar_types), 1);
        // Unknown defender type reads neutral
        assert_eq!(store.effectiveness("Fire", &["Mystery".to_string()]), 4);
    }

    #[test]
    fn test_search_bounded_and_case_insensitive() {
        let store = tiny_store();
        let hits = store.search_species("gen", 10);
        assert_eq!(hits.len(), 2);
        let hits = store.search_species("gen", 1);
        assert_eq!(hits.len(), 1);
        assert!(store.search_moves("SHADOW", 5).len() == 1);
    }

    #[test]
    fn test_forme_learnset_fallback() {
        let store = tiny_store();
        // Gengar-Mega has no learnset entry; falls back to Gengar's.
        let parsed = store.parsed_learnset("gengarmega", 9).unwrap();
        assert_eq!(parsed.tm, vec!["shadowball".to_string()]);
    }

    #[test]
    fn test_catchrates_applied() {
        let store = tiny_store();
        assert_eq!(store.species("gengar").unwrap().catch_rate, Some(45));
    }

    #[test]
    fn test_store_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Store>();

        let store = tiny_store();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    assert!(store.species("gengar").is_some());
                    assert_eq!(store.effectiveness("Ground", &["Poison".to_string()]), 8);
                });
            }
        });
    }
}
