//! Catalog enrichment of parsed party records.
//!
//! Raw records carry only numeric ids; the collaborator-facing view
//! resolves species, ability, item and moves against the catalog and
//! normalizes move accuracy to an integer.

use serde::Serialize;

use crate::data::Store;
use crate::savefile::{ParsedSave, PartyPokemon, PokemonStats};

/// Move details for display.
#[derive(Clone, Debug, Serialize)]
pub struct MoveDetail {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: String,
    pub category: String,
    pub power: i32,
    pub accuracy: i32,
    pub pp: i32,
    pub description: String,
}

/// Item name and description.
#[derive(Clone, Debug, Serialize)]
pub struct ItemDetail {
    pub name: String,
    pub description: String,
}

/// Ability name and description.
#[derive(Clone, Debug, Serialize)]
pub struct AbilityDetail {
    pub name: String,
    pub description: String,
}

/// Which stats a nature raises and lowers, as display names. Empty
/// strings for neutral natures.
#[derive(Clone, Debug, Default, Serialize)]
pub struct NatureEffect {
    pub plus: String,
    pub minus: String,
}

/// A party record enriched against the catalog.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyMemberDetail {
    pub species: String,
    pub nickname: String,
    pub level: i32,
    pub types: Vec<String>,
    pub nature: String,
    pub nature_effect: NatureEffect,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ability: Option<AbilityDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<ItemDetail>,
    pub moves: Vec<MoveDetail>,
    pub stats: PokemonStats,
    pub ivs: PokemonStats,
    pub evs: PokemonStats,
    pub current_hp: i32,
    pub friendship: i32,
}

/// Resolve every record of a parsed save against the catalog.
pub fn enrich_party(store: &Store, save: &ParsedSave) -> Vec<PartyMemberDetail> {
    save.party
        .iter()
        .map(|mon| enrich_member(store, mon))
        .collect()
}

fn enrich_member(store: &Store, mon: &PartyPokemon) -> PartyMemberDetail {
    let species = store.species_by_dex(mon.species_num);

    let (species_name, types, ability) = match species {
        Some(species) => {
            let slot = match mon.ability_slot {
                1 => "1",
                2 => "H",
                _ => "0",
            };
            // A slot the species does not have falls back to slot 0.
            let ability_name = species
                .ability(slot)
                .or_else(|| species.ability("0"))
                .unwrap_or_default();
            let ability = store.ability(ability_name).map(|a| AbilityDetail {
                name: a.name.clone(),
                description: a.short_desc.clone().unwrap_or_default(),
            });
            (species.name.clone(), species.types.clone(), ability)
        }
        None => ("Unknown".to_string(), Vec::new(), None),
    };

    let item = if mon.item_num > 0 {
        store.item_by_num(mon.item_num).map(|i| ItemDetail {
            name: i.name.clone(),
            description: i.desc.clone(),
        })
    } else {
        None
    };

    let moves = mon
        .move_nums
        .iter()
        .filter_map(|&num| store.move_by_num(num))
        .map(|m| MoveDetail {
            name: m.name.clone(),
            move_type: m.move_type.clone(),
            category: format!("{:?}", m.category),
            power: m.base_power,
            accuracy: i32::from(m.accuracy.as_percent()),
            pp: m.pp,
            description: m.short_desc.clone().unwrap_or_default(),
        })
        .collect();

    let nature_effect = store
        .nature(&mon.nature)
        .map(|n| NatureEffect {
            plus: n.plus.map(|s| s.display_name().to_string()).unwrap_or_default(),
            minus: n.minus.map(|s| s.display_name().to_string()).unwrap_or_default(),
        })
        .unwrap_or_default();

    PartyMemberDetail {
        species: species_name,
        nickname: mon.nickname.clone(),
        level: mon.level,
        types,
        nature: mon.nature.clone(),
        nature_effect,
        ability,
        item,
        moves,
        stats: mon.stats,
        ivs: mon.ivs,
        evs: mon.evs,
        current_hp: mon.current_hp,
        friendship: mon.friendship,
    }
}
