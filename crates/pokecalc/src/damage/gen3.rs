//! Generation 3 damage path.
//!
//! The physical/special split is decided by move type, and modifiers are
//! applied one after another as fractional multiplies with floor
//! division, in the fixed cartridge order. There is no 4096-scale chain
//! in this path.

use crate::data::Store;
use crate::entities::{BattleMove, BattlePokemon, Field};
use crate::stats::Stat;

use super::abilities::AbilityTag;
use super::formula::{apply_modifier, base_damage, damage_rolls, floor_div};
use super::items::ItemTag;
use super::modifier::Modifier;
use super::{effective_base_power, effectiveness_against};

pub(super) fn calculate(
    store: &Store,
    attacker: &BattlePokemon,
    defender: &BattlePokemon,
    battle_move: &BattleMove,
    field: &Field,
) -> (Vec<i32>, Vec<String>) {
    let mut factors = vec!["Gen 3 mechanics".to_string()];

    let base_power = effective_base_power(attacker, battle_move, field, &mut factors);
    if base_power == 0 {
        return (damage_rolls(0), factors);
    }

    let is_physical = battle_move.is_physical_in_gen3();
    let is_crit = battle_move.requested_crit();

    let (mut attack, mut defense, atk_name, def_name) = if is_physical {
        (
            attacker.boosted_stat(Stat::Atk, is_crit, true),
            defender.boosted_stat(Stat::Def, is_crit, false),
            "atk",
            "def",
        )
    } else {
        (
            attacker.boosted_stat(Stat::SpA, is_crit, true),
            defender.boosted_stat(Stat::SpD, is_crit, false),
            "spa",
            "spd",
        )
    };

    attack = attack_modifiers(attack, attacker, is_physical, &mut factors);
    defense = defense_modifiers(defense, defender, is_physical, &mut factors);

    factors.push(format!("{atk_name}/{def_name}"));

    let damage = base_damage(attacker.level(), base_power, attack, defense);
    let damage = sequential_modifiers(
        store,
        damage,
        attacker,
        defender,
        battle_move,
        field,
        is_physical,
        &mut factors,
    );

    (damage_rolls(damage), factors)
}

fn attack_modifiers(
    mut attack: i32,
    attacker: &BattlePokemon,
    is_physical: bool,
    factors: &mut Vec<String>,
) -> i32 {
    if is_physical && attacker.has_item(ItemTag::ChoiceBand) {
        attack = apply_modifier(attack, Modifier::ONE_POINT_FIVE.value());
        factors.push("Choice Band".to_string());
    }

    if is_physical
        && (attacker.has_ability(AbilityTag::HugePower)
            || attacker.has_ability(AbilityTag::PurePower))
    {
        attack = apply_modifier(attack, Modifier::DOUBLE.value());
        factors.push("Huge Power".to_string());
    }

    if is_physical && attacker.has_ability(AbilityTag::Guts) && attacker.is_statused() {
        attack = apply_modifier(attack, Modifier::ONE_POINT_FIVE.value());
        factors.push("Guts".to_string());
    }

    if is_physical && attacker.has_ability(AbilityTag::Hustle) {
        attack = apply_modifier(attack, Modifier::ONE_POINT_FIVE.value());
        factors.push("Hustle".to_string());
    }

    attack
}

fn defense_modifiers(
    mut defense: i32,
    defender: &BattlePokemon,
    is_physical: bool,
    factors: &mut Vec<String>,
) -> i32 {
    // Sand SpD for Rock types arrived in Gen 4; not applied here.
    if is_physical && defender.has_ability(AbilityTag::MarvelScale) && defender.is_statused() {
        defense = apply_modifier(defense, Modifier::ONE_POINT_FIVE.value());
        factors.push("Marvel Scale".to_string());
    }
    defense
}

#[allow(clippy::too_many_arguments)]
fn sequential_modifiers(
    store: &Store,
    mut damage: i32,
    attacker: &BattlePokemon,
    defender: &BattlePokemon,
    battle_move: &BattleMove,
    field: &Field,
    is_physical: bool,
    factors: &mut Vec<String>,
) -> i32 {
    let move_type = battle_move.move_type();

    // 1. Burn
    if attacker.is_burned() && is_physical && !attacker.has_ability(AbilityTag::Guts) {
        damage = floor_div(damage, 2);
        factors.push("Burn".to_string());
    }

    // 2. Screens (bypassed by crits)
    if !battle_move.requested_crit() {
        if is_physical && field.defender_side.reflect {
            damage = if field.is_doubles {
                floor_div(damage * 2, 3)
            } else {
                floor_div(damage, 2)
            };
            factors.push("Reflect".to_string());
        }
        if !is_physical && field.defender_side.light_screen {
            damage = if field.is_doubles {
                floor_div(damage * 2, 3)
            } else {
                floor_div(damage, 2)
            };
            factors.push("Light Screen".to_string());
        }
    }

    // 3. Weather
    if field.weather.is_sun() {
        if move_type == "Fire" {
            damage = floor_div(damage * 3, 2);
            factors.push("Sun (Fire boost)".to_string());
        }
        if move_type == "Water" {
            damage = floor_div(damage, 2);
            factors.push("Sun (Water nerf)".to_string());
        }
    }
    if field.weather.is_rain() {
        if move_type == "Water" {
            damage = floor_div(damage * 3, 2);
            factors.push("Rain (Water boost)".to_string());
        }
        if move_type == "Fire" {
            damage = floor_div(damage, 2);
            factors.push("Rain (Fire nerf)".to_string());
        }
    }

    // 4. Flash Fire activation bonus
    if attacker.has_ability(AbilityTag::FlashFire)
        && move_type == "Fire"
        && attacker.has_volatile("flashfire")
    {
        damage = floor_div(damage * 3, 2);
        factors.push("Flash Fire".to_string());
    }

    // 4b. Pinch abilities at one third HP or below
    if attacker.is_in_pinch() {
        if let Some(tag) = attacker.ability_tag {
            if tag.pinch_type() == Some(move_type) {
                damage = floor_div(damage * 3, 2);
                factors.push(format!("{tag:?}"));
            }
        }
    }

    // 5. Critical hit (2x in Gen 3)
    if battle_move.is_crit() {
        damage *= 2;
        factors.push("Critical hit (2x)".to_string());
    }

    // 6. STAB
    if attacker.has_type(move_type) {
        damage = floor_div(damage * 3, 2);
        factors.push("STAB".to_string());
    }

    // 7. Type effectiveness as integer multiply/divide
    let quarters = effectiveness_against(store, move_type, defender);
    match quarters {
        0 => {
            factors.push("Immune".to_string());
            return 0;
        }
        16 => {
            damage *= 4;
            factors.push("Super effective (4x)".to_string());
        }
        8 => {
            damage *= 2;
            factors.push("Super effective".to_string());
        }
        2 => {
            damage = floor_div(damage, 2);
            factors.push("Not very effective".to_string());
        }
        1 => {
            damage = floor_div(damage, 4);
            factors.push("Not very effective (0.25x)".to_string());
        }
        _ => {}
    }

    // 8. Type-boosting item, 1.1x in this generation
    if let Some(item) = attacker.item {
        if item.type_boost() == Some(move_type) {
            damage = floor_div(damage * 11, 10);
            factors.push(item.name.clone());
        }
    }

    damage
}
