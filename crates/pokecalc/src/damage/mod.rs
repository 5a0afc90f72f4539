//! The damage calculation pipeline.
//!
//! `Calculator::calculate` is a pure function of its request: it binds the
//! combatants and move against the catalog, routes through the
//! generation-specific pipeline (Gen 3 applies modifiers sequentially with
//! floor division; Gen 5+ collapses them into one 4096-scale chain), and
//! shapes the result.

pub mod abilities;
pub mod chain;
pub mod formula;
mod gen3;
mod gen5plus;
pub mod items;
pub mod modifier;

use serde::Deserialize;

use crate::data::Store;
use crate::entities::{BattleMove, BattlePokemon, Field, MoveSpec, PokemonSpec};
use crate::error::Error;
use crate::result::DamageResult;
use self::abilities::AbilityTag;
use self::formula::apply_modifier;
use self::items::ItemTag;
use self::modifier::Modifier;

/// A damage calculation request. Generation 0 defers to the field, which
/// itself defaults to 9.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    #[serde(default)]
    pub generation: u8,
    pub attacker: PokemonSpec,
    pub defender: PokemonSpec,
    #[serde(rename = "move")]
    pub battle_move: MoveSpec,
    #[serde(default)]
    pub field: Option<Field>,
}

/// Damage calculator over a shared catalog.
pub struct Calculator<'s> {
    store: &'s Store,
}

impl<'s> Calculator<'s> {
    pub fn new(store: &'s Store) -> Self {
        Calculator { store }
    }

    /// Run one calculation. Pure: the request is consumed, the store is
    /// only read, and nothing else is touched.
    pub fn calculate(&self, request: CalculateRequest) -> Result<DamageResult, Error> {
        if request.attacker.species.is_empty() {
            return Err(Error::MissingRequired("attacker species"));
        }
        if request.defender.species.is_empty() {
            return Err(Error::MissingRequired("defender species"));
        }
        if request.battle_move.name.is_empty() {
            return Err(Error::MissingRequired("move name"));
        }

        let attacker = BattlePokemon::bind(request.attacker, self.store)?;
        let defender = BattlePokemon::bind(request.defender, self.store)?;
        let battle_move = BattleMove::bind(request.battle_move, self.store)?;

        let mut field = request.field.unwrap_or_default();
        if request.generation > 0 {
            field.generation = request.generation;
        }

        if battle_move.is_status() {
            let mut result = DamageResult::new(vec![0; 16], defender.max_hp());
            result.description = "Status moves deal no damage".to_string();
            return Ok(result);
        }

        let (damages, factors) = if field.is_gen3() {
            gen3::calculate(self.store, &attacker, &defender, &battle_move, &field)
        } else {
            gen5plus::calculate(self.store, &attacker, &defender, &battle_move, &field)
        };

        let mut result = DamageResult::new(damages, defender.max_hp());
        result.factors = factors;
        result.calculate_ko(defender.current_hp());

        if let Some((num, den)) = battle_move.recoil() {
            result.calculate_recoil(attacker.max_hp(), num, den);
        }

        // Life Orb recoil is a flat tenth of max HP, independent of any
        // move recoil, and suppressed by Sheer Force.
        if attacker.has_item(ItemTag::LifeOrb) && !attacker.has_ability(AbilityTag::SheerForce) {
            result.fixed_recoil_tenth(attacker.max_hp());
        }

        if let Some((num, den)) = battle_move.drain() {
            result.calculate_recovery(attacker.max_hp(), num, den);
        }

        result.build_description(&attacker, &defender, &battle_move);
        Ok(result)
    }
}

/// Base power after ability, terrain and Helping Hand adjustments.
/// Shared by both generation paths.
pub(crate) fn effective_base_power(
    attacker: &BattlePokemon,
    battle_move: &BattleMove,
    field: &Field,
    factors: &mut Vec<String>,
) -> i32 {
    let mut bp = battle_move.base_power();
    if bp == 0 {
        return 0;
    }

    if attacker.has_ability(AbilityTag::Technician) && bp <= 60 {
        bp = apply_modifier(bp, Modifier::ONE_POINT_FIVE.value());
        factors.push("Technician".to_string());
    }

    if let Some(boosted_type) = field.terrain.boosted_type() {
        if battle_move.move_type() == boosted_type {
            let modifier = if field.generation() >= 8 {
                Modifier::ONE_POINT_THREE
            } else {
                Modifier::ONE_POINT_FIVE
            };
            bp = apply_modifier(bp, modifier.value());
            factors.push(format!("{boosted_type} Terrain"));
        }
    }

    if field.attacker_side.helping_hand {
        bp = apply_modifier(bp, Modifier::ONE_POINT_FIVE.value());
        factors.push("Helping Hand".to_string());
    }

    bp
}

/// Combined type effectiveness in quarters, zeroed by an
/// ability-granted immunity on the defender (Levitate, the absorbers).
pub(crate) fn effectiveness_against(
    store: &Store,
    move_type: &str,
    defender: &BattlePokemon,
) -> u8 {
    let quarters = store.effectiveness(move_type, &defender.types);
    if quarters > 0 {
        if let Some(tag) = defender.ability_tag {
            if tag.immune_type() == Some(move_type) {
                return 0;
            }
        }
    }
    quarters
}
