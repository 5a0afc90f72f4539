//! Battle entities: request values and their catalog-bound forms.
//!
//! `PokemonSpec`, `MoveSpec` and `Field` are plain serde-decodable values
//! owned by the caller. Binding against the catalog produces
//! `BattlePokemon` / `BattleMove`, which resolve names to catalog entries
//! and capability tags and compute concrete stats. Bound values live for
//! exactly one calculation.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::damage::abilities::AbilityTag;
use crate::damage::items::ItemTag;
use crate::data::{to_id, Item, Move, MoveCategory, MoveFlags, Nature, Species, Store};
use crate::error::Error;
use crate::stats::{calculate_hp, calculate_stat, modified_stat, Stat, StatBoosts, StatSpread};
use crate::typechart::is_physical_in_gen3;

// ============================================================================
// Field
// ============================================================================

/// Active weather.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    #[default]
    #[serde(alias = "")]
    None,
    Sun,
    Rain,
    Sand,
    Snow,
    Hail,
    #[serde(rename = "harshsun")]
    HarshSun,
    #[serde(rename = "heavyrain")]
    HeavyRain,
    #[serde(rename = "strongwinds")]
    StrongWinds,
}

impl Weather {
    pub fn is_sun(self) -> bool {
        matches!(self, Weather::Sun | Weather::HarshSun)
    }

    pub fn is_rain(self) -> bool {
        matches!(self, Weather::Rain | Weather::HeavyRain)
    }

    pub fn is_sand(self) -> bool {
        self == Weather::Sand
    }

    pub fn is_snow(self) -> bool {
        matches!(self, Weather::Snow | Weather::Hail)
    }
}

/// Active terrain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    #[default]
    #[serde(alias = "")]
    None,
    Electric,
    Grassy,
    Misty,
    Psychic,
}

impl Terrain {
    /// The move type a damaging terrain boosts.
    pub fn boosted_type(self) -> Option<&'static str> {
        match self {
            Terrain::Electric => Some("Electric"),
            Terrain::Grassy => Some("Grass"),
            Terrain::Psychic => Some("Psychic"),
            _ => None,
        }
    }
}

/// Conditions on one side of the field.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SideConditions {
    pub reflect: bool,
    pub light_screen: bool,
    pub aurora_veil: bool,
    pub spikes: u8,
    pub stealth_rock: bool,
    pub toxic_spikes: u8,
    pub sticky_web: bool,
    pub tailwind: bool,
    pub helping_hand: bool,
    pub friend_guard: bool,
    pub battery: bool,
    pub power_spot: bool,
}

/// Battle field state for one calculation.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Field {
    pub weather: Weather,
    pub terrain: Terrain,
    pub is_doubles: bool,
    pub attacker_side: SideConditions,
    pub defender_side: SideConditions,
    pub gravity: bool,
    pub magic_room: bool,
    pub wonder_room: bool,
    /// 3 selects Gen 3 mechanics, 5+ the modern chain. 0 defaults to 9.
    pub generation: u8,
}

impl Default for Field {
    fn default() -> Self {
        Field {
            weather: Weather::None,
            terrain: Terrain::None,
            is_doubles: false,
            attacker_side: SideConditions::default(),
            defender_side: SideConditions::default(),
            gravity: false,
            magic_room: false,
            wonder_room: false,
            generation: 9,
        }
    }
}

impl Field {
    pub fn generation(&self) -> u8 {
        if self.generation == 0 {
            9
        } else {
            self.generation
        }
    }

    pub fn is_gen3(&self) -> bool {
        self.generation() == 3
    }
}

// ============================================================================
// Status
// ============================================================================

/// Non-volatile status condition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusCondition {
    #[default]
    #[serde(alias = "")]
    None,
    Brn,
    Par,
    Psn,
    Tox,
    Slp,
    Frz,
}

impl StatusCondition {
    pub fn is_some(self) -> bool {
        self != StatusCondition::None
    }

    pub fn is_burn(self) -> bool {
        self == StatusCondition::Brn
    }
}

// ============================================================================
// Request values
// ============================================================================

fn default_level() -> u8 {
    100
}

/// One combatant as described by the caller.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonSpec {
    #[serde(default)]
    pub species: String,
    #[serde(default = "default_level")]
    pub level: u8,
    #[serde(default = "StatSpread::max_ivs")]
    pub ivs: StatSpread,
    #[serde(default)]
    pub evs: StatSpread,
    #[serde(default)]
    pub nature: Option<String>,
    #[serde(default)]
    pub ability: Option<String>,
    #[serde(default)]
    pub item: Option<String>,
    /// 0 means full HP.
    #[serde(default, rename = "currentHP")]
    pub current_hp: i32,
    #[serde(default)]
    pub status: StatusCondition,
    #[serde(default)]
    pub boosts: StatBoosts,
    /// Type override (Tera and the like); empty uses the species types.
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub volatiles: BTreeMap<String, bool>,
}

impl Default for PokemonSpec {
    fn default() -> Self {
        PokemonSpec {
            species: String::new(),
            level: 100,
            ivs: StatSpread::max_ivs(),
            evs: StatSpread::default(),
            nature: None,
            ability: None,
            item: None,
            current_hp: 0,
            status: StatusCondition::None,
            boosts: StatBoosts::default(),
            types: Vec::new(),
            volatiles: BTreeMap::new(),
        }
    }
}

/// The move being used, as described by the caller.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MoveSpec {
    pub name: String,
    /// Base power override for variable-power moves.
    pub base_power: i32,
    /// Type override for type-changing effects.
    #[serde(rename = "type")]
    pub move_type: Option<String>,
    pub is_crit: bool,
    /// Multi-target move hitting several targets in doubles.
    pub hits_multiple: bool,
}

// ============================================================================
// Bound entities
// ============================================================================

/// A combatant bound to its catalog entries, with computed stats.
pub struct BattlePokemon<'s> {
    pub spec: PokemonSpec,
    pub species: &'s Species,
    pub nature: Option<&'s Nature>,
    pub item: Option<&'s Item>,
    pub ability_tag: Option<AbilityTag>,
    pub item_tag: Option<ItemTag>,
    pub types: Vec<String>,
    pub stats: StatSpread,
}

impl<'s> BattlePokemon<'s> {
    /// Bind a spec against the catalog. The species must resolve; nature,
    /// ability and item are optional and degrade silently (neutral
    /// nature, no capability tags).
    pub fn bind(spec: PokemonSpec, store: &'s Store) -> Result<Self, Error> {
        let species = store
            .species(&spec.species)
            .ok_or_else(|| Error::unknown("species", &spec.species))?;

        let nature_name = spec.nature.as_deref().unwrap_or("hardy");
        let nature = store.nature(nature_name);

        let item = spec.item.as_deref().and_then(|name| store.item(name));
        let item_tag = spec
            .item
            .as_deref()
            .and_then(|name| ItemTag::from_id(&to_id(name)));

        let ability_tag = spec
            .ability
            .as_deref()
            .and_then(|name| AbilityTag::from_id(&to_id(name)));

        let types = if spec.types.is_empty() {
            species.types.clone()
        } else {
            spec.types.clone()
        };

        let level = i32::from(spec.level.clamp(1, 100));
        let base = species.base_stats;
        let mut stats = StatSpread::default();
        stats.hp = calculate_hp(base.hp, spec.ivs.hp, spec.evs.hp, level);
        for stat in Stat::BOOSTABLE {
            let modifier = nature.map_or(10, |n| n.stat_modifier(stat));
            stats.set(
                stat,
                calculate_stat(
                    base.get(stat),
                    spec.ivs.get(stat),
                    spec.evs.get(stat),
                    level,
                    modifier,
                ),
            );
        }

        Ok(BattlePokemon {
            spec,
            species,
            nature,
            item,
            ability_tag,
            item_tag,
            types,
            stats,
        })
    }

    pub fn level(&self) -> i32 {
        i32::from(self.spec.level.clamp(1, 100))
    }

    pub fn max_hp(&self) -> i32 {
        self.stats.hp
    }

    /// Current HP; a spec value of 0 reads as full.
    pub fn current_hp(&self) -> i32 {
        if self.spec.current_hp > 0 {
            self.spec.current_hp.min(self.max_hp())
        } else {
            self.max_hp()
        }
    }

    pub fn is_at_full_hp(&self) -> bool {
        self.current_hp() >= self.max_hp()
    }

    /// Pinch-ability threshold: current HP at or below one third of max.
    pub fn is_in_pinch(&self) -> bool {
        3 * self.current_hp() <= self.max_hp()
    }

    pub fn has_type(&self, type_name: &str) -> bool {
        self.types.iter().any(|t| t == type_name)
    }

    pub fn has_ability(&self, tag: AbilityTag) -> bool {
        self.ability_tag == Some(tag)
    }

    pub fn has_item(&self, tag: ItemTag) -> bool {
        self.item_tag == Some(tag)
    }

    pub fn has_volatile(&self, name: &str) -> bool {
        self.spec.volatiles.get(name).copied().unwrap_or(false)
    }

    pub fn is_burned(&self) -> bool {
        self.spec.status.is_burn()
    }

    pub fn is_statused(&self) -> bool {
        self.spec.status.is_some()
    }

    /// Stat value with stage boosts applied under the crit rule.
    pub fn boosted_stat(&self, stat: Stat, is_crit: bool, is_attacker: bool) -> i32 {
        modified_stat(
            self.stats.get(stat),
            self.spec.boosts.get(stat),
            is_crit,
            is_attacker,
        )
    }
}

/// A move bound to its catalog entry.
pub struct BattleMove<'s> {
    pub spec: MoveSpec,
    pub data: &'s Move,
}

impl<'s> BattleMove<'s> {
    pub fn bind(spec: MoveSpec, store: &'s Store) -> Result<Self, Error> {
        let data = store
            .move_(&spec.name)
            .ok_or_else(|| Error::unknown("move", &spec.name))?;
        Ok(BattleMove { spec, data })
    }

    /// Move type, honoring the caller's override.
    pub fn move_type(&self) -> &str {
        self.spec
            .move_type
            .as_deref()
            .unwrap_or(&self.data.move_type)
    }

    /// Base power, honoring the caller's override.
    pub fn base_power(&self) -> i32 {
        if self.spec.base_power > 0 {
            self.spec.base_power
        } else {
            self.data.base_power
        }
    }

    pub fn category(&self) -> MoveCategory {
        self.data.category
    }

    pub fn is_status(&self) -> bool {
        self.data.is_status()
    }

    pub fn is_physical(&self) -> bool {
        self.category() == MoveCategory::Physical
    }

    pub fn is_special(&self) -> bool {
        self.category() == MoveCategory::Special
    }

    /// Category whose defense stat absorbs the hit (Psyshock override).
    pub fn defensive_category(&self) -> MoveCategory {
        self.data.defensive_category.unwrap_or_else(|| self.category())
    }

    /// Whether the Gen 3 type-driven split routes this move physically.
    pub fn is_physical_in_gen3(&self) -> bool {
        is_physical_in_gen3(self.move_type())
    }

    /// Crit as requested by the caller (gates screen bypass and the stat
    /// stage rule).
    pub fn requested_crit(&self) -> bool {
        self.spec.is_crit
    }

    /// Whether the crit multiplier applies: requested, or the move always
    /// crits.
    pub fn is_crit(&self) -> bool {
        self.spec.is_crit || self.data.will_crit
    }

    pub fn has_flag(&self, flag: MoveFlags) -> bool {
        self.data.has_flag(flag)
    }

    pub fn drain(&self) -> Option<(i32, i32)> {
        self.data.drain.map(|[num, den]| (num, den))
    }

    pub fn recoil(&self) -> Option<(i32, i32)> {
        self.data.recoil.map(|[num, den]| (num, den))
    }

    pub fn has_secondary_effect(&self) -> bool {
        self.data.has_secondary_effect()
    }
}
