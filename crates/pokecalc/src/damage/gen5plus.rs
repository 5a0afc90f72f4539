//! Generation 5+ damage path.
//!
//! Every multiplicative modifier is accumulated into one 4096-scale chain
//! and applied exactly once; the category split is per-move, modulated by
//! the defensive-category override for Psyshock-like moves.

use crate::data::{MoveCategory, MoveFlags, Store};
use crate::entities::{BattleMove, BattlePokemon, Field, Terrain};
use crate::stats::Stat;
use crate::typechart::quarters_to_mod4096;

use super::abilities::AbilityTag;
use super::chain::ModifierChain;
use super::formula::{apply_modifier, base_damage, damage_rolls};
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
    let mut factors = Vec::new();

    let base_power = effective_base_power(attacker, battle_move, field, &mut factors);
    if base_power == 0 {
        return (damage_rolls(0), factors);
    }

    let is_crit = battle_move.requested_crit();
    let (mut attack, atk_name) = if battle_move.is_physical() {
        (attacker.boosted_stat(Stat::Atk, is_crit, true), "atk")
    } else {
        (attacker.boosted_stat(Stat::SpA, is_crit, true), "spa")
    };
    let (mut defense, def_name) = if battle_move.defensive_category() == MoveCategory::Physical {
        (defender.boosted_stat(Stat::Def, is_crit, false), "def")
    } else {
        (defender.boosted_stat(Stat::SpD, is_crit, false), "spd")
    };

    attack = attack_modifiers(attack, attacker, battle_move, field, &mut factors);
    defense = defense_modifiers(defense, defender, battle_move, field, &mut factors);

    factors.push(format!("{atk_name}/{def_name}"));

    let damage = base_damage(attacker.level(), base_power, attack, defense);
    let chain = build_chain(store, attacker, defender, battle_move, field, &mut factors);

    (damage_rolls(chain.apply(damage)), factors)
}

fn attack_modifiers(
    mut attack: i32,
    attacker: &BattlePokemon,
    battle_move: &BattleMove,
    field: &Field,
    factors: &mut Vec<String>,
) -> i32 {
    let physical = battle_move.is_physical();
    let special = battle_move.is_special();

    if physical && attacker.has_item(ItemTag::ChoiceBand) {
        attack = apply_modifier(attack, Modifier::ONE_POINT_FIVE.value());
        factors.push("Choice Band".to_string());
    }
    if special && attacker.has_item(ItemTag::ChoiceSpecs) {
        attack = apply_modifier(attack, Modifier::ONE_POINT_FIVE.value());
        factors.push("Choice Specs".to_string());
    }

    if physical
        && (attacker.has_ability(AbilityTag::HugePower)
            || attacker.has_ability(AbilityTag::PurePower))
    {
        attack = apply_modifier(attack, Modifier::DOUBLE.value());
        factors.push("Huge Power".to_string());
    }

    if physical && attacker.has_ability(AbilityTag::Guts) && attacker.is_statused() {
        attack = apply_modifier(attack, Modifier::ONE_POINT_FIVE.value());
        factors.push("Guts".to_string());
    }

    if physical && attacker.has_ability(AbilityTag::Hustle) {
        attack = apply_modifier(attack, Modifier::ONE_POINT_FIVE.value());
        factors.push("Hustle".to_string());
    }

    if physical && attacker.has_ability(AbilityTag::FlowerGift) && field.weather.is_sun() {
        attack = apply_modifier(attack, Modifier::ONE_POINT_FIVE.value());
        factors.push("Flower Gift".to_string());
    }

    if special && attacker.has_ability(AbilityTag::SolarPower) && field.weather.is_sun() {
        attack = apply_modifier(attack, Modifier::ONE_POINT_FIVE.value());
        factors.push("Solar Power".to_string());
    }

    if physical && attacker.has_ability(AbilityTag::GorillaTactics) {
        attack = apply_modifier(attack, Modifier::ONE_POINT_FIVE.value());
        factors.push("Gorilla Tactics".to_string());
    }

    attack
}

fn defense_modifiers(
    mut defense: i32,
    defender: &BattlePokemon,
    battle_move: &BattleMove,
    field: &Field,
    factors: &mut Vec<String>,
) -> i32 {
    let physical = battle_move.is_physical();
    let special = battle_move.is_special();

    if special && defender.has_item(ItemTag::AssaultVest) {
        defense = apply_modifier(defense, Modifier::ONE_POINT_FIVE.value());
        factors.push("Assault Vest".to_string());
    }

    if defender.has_item(ItemTag::Eviolite) {
        defense = apply_modifier(defense, Modifier::ONE_POINT_FIVE.value());
        factors.push("Eviolite".to_string());
    }

    if physical && defender.has_ability(AbilityTag::FurCoat) {
        defense = apply_modifier(defense, Modifier::DOUBLE.value());
        factors.push("Fur Coat".to_string());
    }

    if physical && defender.has_ability(AbilityTag::MarvelScale) && defender.is_statused() {
        defense = apply_modifier(defense, Modifier::ONE_POINT_FIVE.value());
        factors.push("Marvel Scale".to_string());
    }

    if physical && defender.has_ability(AbilityTag::GrassPelt) && field.terrain == Terrain::Grassy {
        defense = apply_modifier(defense, Modifier::ONE_POINT_FIVE.value());
        factors.push("Grass Pelt".to_string());
    }

    if special && field.weather.is_sand() && defender.has_type("Rock") {
        defense = apply_modifier(defense, Modifier::ONE_POINT_FIVE.value());
        factors.push("Sandstorm SpD boost".to_string());
    }

    defense
}

fn build_chain(
    store: &Store,
    attacker: &BattlePokemon,
    defender: &BattlePokemon,
    battle_move: &BattleMove,
    field: &Field,
    factors: &mut Vec<String>,
) -> ModifierChain {
    let mut chain = ModifierChain::new();
    let move_type = battle_move.move_type();

    // Spread move in doubles
    if field.is_doubles && battle_move.spec.hits_multiple {
        chain.add(Modifier::THREE_QUARTERS);
        factors.push("Spread move".to_string());
    }

    // Weather
    if field.weather.is_sun() {
        if move_type == "Fire" {
            chain.add(Modifier::ONE_POINT_FIVE);
            factors.push("Sun (Fire boost)".to_string());
        }
        if move_type == "Water" {
            chain.add(Modifier::HALF);
            factors.push("Sun (Water nerf)".to_string());
        }
    }
    if field.weather.is_rain() {
        if move_type == "Water" {
            chain.add(Modifier::ONE_POINT_FIVE);
            factors.push("Rain (Water boost)".to_string());
        }
        if move_type == "Fire" {
            chain.add(Modifier::HALF);
            factors.push("Rain (Fire nerf)".to_string());
        }
    }

    // Critical hit (1.5x since Gen 6)
    if battle_move.is_crit() {
        chain.add(Modifier::ONE_POINT_FIVE);
        factors.push("Critical hit".to_string());
    }

    // STAB
    if attacker.has_type(move_type) {
        if attacker.has_ability(AbilityTag::Adaptability) {
            chain.add(Modifier::DOUBLE);
            factors.push("Adaptability".to_string());
        } else {
            chain.add(Modifier::ONE_POINT_FIVE);
            factors.push("STAB".to_string());
        }
    }

    // Type effectiveness, translated into the 4096 scale
    let quarters = effectiveness_against(store, move_type, defender);
    if quarters != 4 {
        chain.add_raw(quarters_to_mod4096(quarters));
        if quarters == 0 {
            factors.push("Immune".to_string());
        } else if quarters > 4 {
            factors.push("Super effective".to_string());
        } else {
            factors.push("Not very effective".to_string());
        }
    }

    // Burn
    if attacker.is_burned()
        && battle_move.is_physical()
        && !attacker.has_ability(AbilityTag::Guts)
    {
        chain.add(Modifier::HALF);
        factors.push("Burn".to_string());
    }

    // Screens (bypassed by crits)
    if !battle_move.requested_crit() {
        let screen = if field.is_doubles {
            Modifier::SCREEN_DOUBLES
        } else {
            Modifier::HALF
        };
        if battle_move.is_physical() && field.defender_side.reflect {
            chain.add(screen);
            factors.push("Reflect".to_string());
        }
        if battle_move.is_special() && field.defender_side.light_screen {
            chain.add(screen);
            factors.push("Light Screen".to_string());
        }
        if field.defender_side.aurora_veil {
            chain.add(screen);
            factors.push("Aurora Veil".to_string());
        }
    }

    item_modifiers(&mut chain, attacker, battle_move, quarters, factors);
    ability_modifiers(&mut chain, attacker, defender, battle_move, field, quarters, factors);

    // Misty Terrain halves Dragon damage
    if field.terrain == Terrain::Misty && move_type == "Dragon" {
        chain.add(Modifier::HALF);
        factors.push("Misty Terrain".to_string());
    }

    // Friend Guard ally in doubles
    if field.is_doubles && field.defender_side.friend_guard {
        chain.add(Modifier::THREE_QUARTERS);
        factors.push("Friend Guard".to_string());
    }

    chain
}

fn item_modifiers(
    chain: &mut ModifierChain,
    attacker: &BattlePokemon,
    battle_move: &BattleMove,
    quarters: u8,
    factors: &mut Vec<String>,
) {
    if attacker.has_item(ItemTag::LifeOrb) && !attacker.has_ability(AbilityTag::SheerForce) {
        chain.add(Modifier::LIFE_ORB);
        factors.push("Life Orb".to_string());
    }

    if attacker.has_item(ItemTag::ExpertBelt) && quarters > 4 {
        chain.add(Modifier::ONE_POINT_TWO);
        factors.push("Expert Belt".to_string());
    }

    if let Some(item) = attacker.item {
        if item.type_boost() == Some(battle_move.move_type()) {
            chain.add(Modifier::ONE_POINT_TWO);
            factors.push(item.name.clone());
        }
    }

    if attacker.has_item(ItemTag::MuscleBand) && battle_move.is_physical() {
        chain.add(Modifier::ONE_POINT_ONE);
        factors.push("Muscle Band".to_string());
    }

    if attacker.has_item(ItemTag::WiseGlasses) && battle_move.is_special() {
        chain.add(Modifier::ONE_POINT_ONE);
        factors.push("Wise Glasses".to_string());
    }
}

#[allow(clippy::too_many_arguments)]
fn ability_modifiers(
    chain: &mut ModifierChain,
    attacker: &BattlePokemon,
    defender: &BattlePokemon,
    battle_move: &BattleMove,
    field: &Field,
    quarters: u8,
    factors: &mut Vec<String>,
) {
    let move_type = battle_move.move_type();

    // Offensive
    if attacker.has_ability(AbilityTag::SheerForce) && battle_move.has_secondary_effect() {
        chain.add(Modifier::ONE_POINT_THREE);
        factors.push("Sheer Force".to_string());
    }

    if attacker.has_ability(AbilityTag::IronFist) && battle_move.has_flag(MoveFlags::PUNCH) {
        chain.add(Modifier::ONE_POINT_TWO);
        factors.push("Iron Fist".to_string());
    }

    if attacker.has_ability(AbilityTag::Reckless) && battle_move.recoil().is_some() {
        chain.add(Modifier::ONE_POINT_TWO);
        factors.push("Reckless".to_string());
    }

    if attacker.has_ability(AbilityTag::ToughClaws) && battle_move.has_flag(MoveFlags::CONTACT) {
        chain.add(Modifier::ONE_POINT_THREE);
        factors.push("Tough Claws".to_string());
    }

    if attacker.has_ability(AbilityTag::StrongJaw) && battle_move.has_flag(MoveFlags::BITE) {
        chain.add(Modifier::ONE_POINT_FIVE);
        factors.push("Strong Jaw".to_string());
    }

    if attacker.has_ability(AbilityTag::MegaLauncher) && battle_move.has_flag(MoveFlags::PULSE) {
        chain.add(Modifier::ONE_POINT_FIVE);
        factors.push("Mega Launcher".to_string());
    }

    if attacker.has_ability(AbilityTag::SandForce)
        && field.weather.is_sand()
        && matches!(move_type, "Ground" | "Rock" | "Steel")
    {
        chain.add(Modifier::ONE_POINT_THREE);
        factors.push("Sand Force".to_string());
    }

    // Defensive
    if quarters > 4 {
        if let Some(tag) = defender.ability_tag {
            if tag.reduces_super_effective() {
                chain.add(Modifier::THREE_QUARTERS);
                factors.push("Filter/Solid Rock".to_string());
            }
        }
    }

    if defender.is_at_full_hp() {
        if let Some(tag) = defender.ability_tag {
            if tag.halves_at_full_hp() {
                chain.add(Modifier::HALF);
                factors.push("Multiscale".to_string());
            }
        }
    }

    if battle_move.is_special() && defender.has_ability(AbilityTag::IceScales) {
        chain.add(Modifier::HALF);
        factors.push("Ice Scales".to_string());
    }

    if defender.has_ability(AbilityTag::Fluffy) {
        if battle_move.has_flag(MoveFlags::CONTACT) {
            chain.add(Modifier::HALF);
            factors.push("Fluffy (contact)".to_string());
        }
        if move_type == "Fire" {
            chain.add(Modifier::DOUBLE);
            factors.push("Fluffy (Fire)".to_string());
        }
    }

    if battle_move.has_flag(MoveFlags::SOUND) && defender.has_ability(AbilityTag::PunkRock) {
        chain.add(Modifier::HALF);
        factors.push("Punk Rock (defense)".to_string());
    }

    if defender.has_ability(AbilityTag::ThickFat) && matches!(move_type, "Fire" | "Ice") {
        chain.add(Modifier::HALF);
        factors.push("Thick Fat".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::{CalculateRequest, Calculator};
    use crate::entities::{MoveSpec, PokemonSpec};

    fn spec(species: &str) -> PokemonSpec {
        PokemonSpec {
            species: species.to_string(),
            ..PokemonSpec::default()
        }
    }

    fn mv(name: &str) -> MoveSpec {
        MoveSpec {
            name: name.to_string(),
            ..MoveSpec::default()
        }
    }

    fn request(attacker: PokemonSpec, defender: PokemonSpec, battle_move: MoveSpec) -> CalculateRequest {
        CalculateRequest {
            generation: 9,
            attacker,
            defender,
            battle_move,
            field: None,
        }
    }

    #[test]
    fn test_stab_in_chain() {
        let store = crate::test_fixtures::store();
        let calc = Calculator::new(&store);
        let result = calc
            .calculate(request(spec("garchomp"), spec("clefable"), mv("earthquake")))
            .unwrap();
        assert!(result.factors.iter().any(|f| f == "STAB"));
        assert!(result.factors.iter().any(|f| f == "atk/def"));
    }

    #[test]
    fn test_psyshock_targets_physical_defense() {
        let store = crate::test_fixtures::store();
        let calc = Calculator::new(&store);
        let result = calc
            .calculate(request(spec("blissey"), spec("clefable"), mv("psyshock")))
            .unwrap();
        // Special attack against physical defense
        assert!(result.factors.iter().any(|f| f == "spa/def"));
    }

    #[test]
    fn test_crit_ignores_attacker_drop_but_not_boost() {
        let store = crate::test_fixtures::store();
        let calc = Calculator::new(&store);

        let mut dropped = spec("garchomp");
        dropped.boosts.atk = -1;
        let mut crit_move = mv("earthquake");
        crit_move.is_crit = true;

        let neutral_crit = calc
            .calculate(request(spec("garchomp"), spec("clefable"), crit_move.clone()))
            .unwrap();
        let dropped_crit = calc
            .calculate(request(dropped, spec("clefable"), crit_move.clone()))
            .unwrap();
        // The -1 is ignored under a crit
        assert_eq!(neutral_crit.max_damage, dropped_crit.max_damage);

        let mut boosted = spec("garchomp");
        boosted.boosts.atk = 1;
        let boosted_crit = calc
            .calculate(request(boosted, spec("clefable"), crit_move))
            .unwrap();
        // The +1 still applies
        assert!(boosted_crit.max_damage > neutral_crit.max_damage);
    }

    #[test]
    fn test_adaptability_doubles_stab() {
        let store = crate::test_fixtures::store();
        let calc = Calculator::new(&store);

        let mut adapted = spec("garchomp");
        adapted.ability = Some("Adaptability".to_string());
        let result = calc
            .calculate(request(adapted, spec("clefable"), mv("earthquake")))
            .unwrap();
        assert!(result.factors.iter().any(|f| f == "Adaptability"));
        assert!(!result.factors.iter().any(|f| f == "STAB"));
    }

    #[test]
    fn test_spread_modifier_in_doubles() {
        let store = crate::test_fixtures::store();
        let calc = Calculator::new(&store);

        let mut req = request(spec("garchomp"), spec("clefable"), mv("earthquake"));
        req.battle_move.hits_multiple = true;
        req.field = Some(crate::entities::Field {
            is_doubles: true,
            generation: 9,
            ..Default::default()
        });
        let result = calc.calculate(req).unwrap();
        assert!(result.factors.iter().any(|f| f == "Spread move"));
    }

    #[test]
    fn test_thick_fat_halves_ice() {
        let store = crate::test_fixtures::store();
        let calc = Calculator::new(&store);

        let mut defender = spec("clefable");
        defender.ability = Some("Thick Fat".to_string());
        let result = calc
            .calculate(request(spec("blissey"), defender, mv("icebeam")))
            .unwrap();
        assert!(result.factors.iter().any(|f| f == "Thick Fat"));
    }

    #[test]
    fn test_multiscale_only_at_full_hp() {
        let store = crate::test_fixtures::store();
        let calc = Calculator::new(&store);

        let mut defender = spec("clefable");
        defender.ability = Some("Multiscale".to_string());
        let full = calc
            .calculate(request(spec("garchomp"), defender.clone(), mv("earthquake")))
            .unwrap();
        assert!(full.factors.iter().any(|f| f == "Multiscale"));

        defender.current_hp = 1;
        let chipped = calc
            .calculate(request(spec("garchomp"), defender, mv("earthquake")))
            .unwrap();
        assert!(!chipped.factors.iter().any(|f| f == "Multiscale"));
    }

    #[test]
    fn test_expert_belt_only_when_super_effective() {
        let store = crate::test_fixtures::store();
        let calc = Calculator::new(&store);

        let mut attacker = spec("garchomp");
        attacker.item = Some("Expert Belt".to_string());
        // Ground vs Fairy is neutral: no Expert Belt
        let neutral = calc
            .calculate(request(attacker.clone(), spec("clefable"), mv("earthquake")))
            .unwrap();
        assert!(!neutral.factors.iter().any(|f| f == "Expert Belt"));

        // Ground vs Electric/Flying-less target: Tapu Koko is Electric/Fairy -> 2x
        let se = calc
            .calculate(request(attacker, spec("tapukoko"), mv("earthquake")))
            .unwrap();
        assert!(se.factors.iter().any(|f| f == "Expert Belt"));
        assert!(se.factors.iter().any(|f| f == "Super effective"));
    }
}
