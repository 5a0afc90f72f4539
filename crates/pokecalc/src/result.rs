//! Damage result assembly: KO buckets, recoil, recovery, description.

use serde::Serialize;

use crate::data::MoveCategory;
use crate::entities::{BattleMove, BattlePokemon};

/// Knock-out probability bucket.
#[derive(Clone, Debug, Serialize)]
pub struct KoChance {
    /// 0.0 to 1.0.
    pub chance: f64,
    /// Hits needed (1 = OHKO). 0 when no KO within four hits.
    pub n: i32,
    pub guaranteed: bool,
    pub text: String,
}

/// Recoil taken by the attacker.
#[derive(Clone, Debug, Serialize)]
pub struct RecoilResult {
    pub damage: i32,
    pub percent: f64,
}

/// HP recovered by a drain move.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryResult {
    pub min_recovery: i32,
    pub max_recovery: i32,
    pub min_percent: f64,
    pub max_percent: f64,
}

/// Full outcome of one damage calculation.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageResult {
    /// All 16 damage rolls (85-100%), ascending.
    pub damages: Vec<i32>,
    pub min_damage: i32,
    pub max_damage: i32,
    pub min_percent: f64,
    pub max_percent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ko: Option<KoChance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recoil: Option<RecoilResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery: Option<RecoveryResult>,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub factors: Vec<String>,
}

fn percent_of(value: i32, max_hp: i32) -> f64 {
    if max_hp <= 0 {
        return 0.0;
    }
    f64::from(value) / f64::from(max_hp) * 100.0
}

impl DamageResult {
    /// Build a result from ascending damage rolls and the defender's max
    /// HP (for the percent range).
    pub fn new(damages: Vec<i32>, defender_max_hp: i32) -> Self {
        let min_damage = damages.first().copied().unwrap_or(0);
        let max_damage = damages.last().copied().unwrap_or(0);
        DamageResult {
            min_damage,
            max_damage,
            min_percent: percent_of(min_damage, defender_max_hp),
            max_percent: percent_of(max_damage, defender_max_hp),
            damages,
            ..DamageResult::default()
        }
    }

    /// Fill the KO bucket for a defender at `defender_hp`.
    pub fn calculate_ko(&mut self, defender_hp: i32) {
        if self.damages.is_empty() || defender_hp <= 0 {
            return;
        }

        if self.min_damage >= defender_hp {
            self.ko = Some(KoChance {
                chance: 1.0,
                n: 1,
                guaranteed: true,
                text: "guaranteed OHKO".to_string(),
            });
            return;
        }

        if self.max_damage >= defender_hp {
            let favorable = self.damages.iter().filter(|&&d| d >= defender_hp).count();
            let chance = favorable as f64 / self.damages.len() as f64;
            self.ko = Some(KoChance {
                chance,
                n: 1,
                guaranteed: false,
                text: format!("{:.1}% chance to OHKO", chance * 100.0),
            });
            return;
        }

        for n in 2..=4 {
            if self.min_damage * n >= defender_hp {
                self.ko = Some(KoChance {
                    chance: 1.0,
                    n,
                    guaranteed: true,
                    text: format!("guaranteed {n}HKO"),
                });
                return;
            }
            if self.max_damage * n >= defender_hp {
                // Two rough buckets keyed on whether the mid-point roll
                // suffices.
                let mid = (self.min_damage + self.max_damage) / 2;
                let (chance, text) = if mid * n >= defender_hp {
                    (0.5, format!("possible {n}HKO"))
                } else {
                    (0.25, format!("possible {n}HKO (unlikely)"))
                };
                self.ko = Some(KoChance {
                    chance,
                    n,
                    guaranteed: false,
                    text,
                });
                return;
            }
        }

        self.ko = Some(KoChance {
            chance: 0.0,
            n: 0,
            guaranteed: false,
            text: "not a KO".to_string(),
        });
    }

    /// Recoil from a move's numerator/denominator ratio, computed over
    /// the mid-point of the damage range.
    pub fn calculate_recoil(&mut self, attacker_max_hp: i32, num: i32, den: i32) {
        if num == 0 || den == 0 {
            return;
        }
        let mid = (self.min_damage + self.max_damage) / 2;
        let damage = mid * num / den;
        self.recoil = Some(RecoilResult {
            damage,
            percent: percent_of(damage, attacker_max_hp),
        });
    }

    /// Fixed recoil of one tenth max HP (Life Orb).
    pub fn fixed_recoil_tenth(&mut self, attacker_max_hp: i32) {
        let damage = attacker_max_hp / 10;
        self.recoil = Some(RecoilResult {
            damage,
            percent: percent_of(damage, attacker_max_hp),
        });
    }

    /// Recovery range from a drain ratio, capped at the attacker's max HP.
    pub fn calculate_recovery(&mut self, attacker_max_hp: i32, num: i32, den: i32) {
        if num == 0 || den == 0 {
            return;
        }
        let min = (self.min_damage * num / den).min(attacker_max_hp);
        let max = (self.max_damage * num / den).min(attacker_max_hp);
        self.recovery = Some(RecoveryResult {
            min_recovery: min,
            max_recovery: max,
            min_percent: percent_of(min, attacker_max_hp),
            max_percent: percent_of(max, attacker_max_hp),
        });
    }

    /// One-line summary:
    /// `<boosts> <evs> <Species> <Move> vs. <evs> <Defender>: min-max (lo% - hi%) -- <ko>`.
    pub fn build_description(
        &mut self,
        attacker: &BattlePokemon,
        defender: &BattlePokemon,
        battle_move: &BattleMove,
    ) {
        let mut parts: Vec<String> = Vec::new();

        if battle_move.is_physical() && attacker.spec.boosts.atk != 0 {
            parts.push(format!("{:+}", attacker.spec.boosts.atk));
        } else if battle_move.is_special() && attacker.spec.boosts.spa != 0 {
            parts.push(format!("{:+}", attacker.spec.boosts.spa));
        }

        if battle_move.is_physical() {
            parts.push(format!("{} Atk", attacker.spec.evs.atk));
        } else if battle_move.is_special() {
            parts.push(format!("{} SpA", attacker.spec.evs.spa));
        }

        parts.push(attacker.species.name.clone());
        parts.push(battle_move.data.name.clone());
        parts.push("vs.".to_string());

        if battle_move.defensive_category() == MoveCategory::Physical {
            parts.push(format!(
                "{} HP / {} Def",
                defender.spec.evs.hp, defender.spec.evs.def
            ));
        } else {
            parts.push(format!(
                "{} HP / {} SpD",
                defender.spec.evs.hp, defender.spec.evs.spd
            ));
        }
        parts.push(defender.species.name.clone());

        let mut description = parts.join(" ");
        description.push_str(&format!(
            ": {}-{} ({:.1}% - {:.1}%)",
            self.min_damage, self.max_damage, self.min_percent, self.max_percent
        ));
        if let Some(ko) = &self.ko {
            description.push_str(" -- ");
            description.push_str(&ko.text);
        }
        self.description = description;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_for(min: i32, max: i32, max_hp: i32) -> DamageResult {
        // Synthesize an ascending 16-roll spread between min and max.
        let mut damages = vec![min; 8];
        damages.extend(vec![max; 8]);
        DamageResult::new(damages, max_hp)
    }

    #[test]
    fn test_guaranteed_ohko() {
        let mut result = result_for(120, 140, 300);
        result.calculate_ko(100);
        let ko = result.ko.unwrap();
        assert!(ko.guaranteed);
        assert_eq!(ko.n, 1);
        assert_eq!(ko.text, "guaranteed OHKO");
    }

    #[test]
    fn test_partial_ohko_counts_rolls() {
        let mut result = result_for(90, 110, 300);
        result.calculate_ko(100);
        let ko = result.ko.unwrap();
        assert!(!ko.guaranteed);
        assert_eq!(ko.n, 1);
        assert!((ko.chance - 0.5).abs() < 1e-9);
        assert_eq!(ko.text, "50.0% chance to OHKO");
    }

    #[test]
    fn test_guaranteed_2hko() {
        let mut result = result_for(60, 70, 300);
        result.calculate_ko(120);
        let ko = result.ko.unwrap();
        assert!(ko.guaranteed);
        assert_eq!(ko.n, 2);
        assert_eq!(ko.text, "guaranteed 2HKO");
    }

    #[test]
    fn test_possible_3hko_buckets() {
        // min*3 = 135 < 140 <= max*3 = 150; mid*3 = 141 >= 140 -> 0.5
        let mut result = result_for(45, 50, 300);
        result.calculate_ko(140);
        let ko = result.ko.unwrap();
        assert_eq!(ko.n, 3);
        assert!((ko.chance - 0.5).abs() < 1e-9);
        assert_eq!(ko.text, "possible 3HKO");

        // min*3 = 135 < 149 <= max*3 = 150; mid*3 = 141 < 149 -> 0.25
        let mut result = result_for(45, 50, 300);
        result.calculate_ko(149);
        let ko = result.ko.unwrap();
        assert_eq!(ko.text, "possible 3HKO (unlikely)");
    }

    #[test]
    fn test_not_a_ko() {
        let mut result = result_for(10, 12, 300);
        result.calculate_ko(100);
        let ko = result.ko.unwrap();
        assert_eq!(ko.n, 0);
        assert_eq!(ko.chance, 0.0);
        assert_eq!(ko.text, "not a KO");
    }

    #[test]
    fn test_recoil_over_midpoint() {
        let mut result = result_for(90, 110, 400);
        result.calculate_recoil(200, 1, 4);
        let recoil = result.recoil.unwrap();
        assert_eq!(recoil.damage, 25);
        assert!((recoil.percent - 12.5).abs() < 1e-9);
    }

    #[test]
    fn test_fixed_recoil_tenth() {
        let mut result = result_for(50, 60, 400);
        result.fixed_recoil_tenth(301);
        assert_eq!(result.recoil.unwrap().damage, 30);
    }

    #[test]
    fn test_recovery_caps_at_max_hp() {
        let mut result = result_for(300, 400, 500);
        result.calculate_recovery(150, 1, 2);
        let recovery = result.recovery.unwrap();
        assert_eq!(recovery.min_recovery, 150);
        assert_eq!(recovery.max_recovery, 150);
        assert!((recovery.max_percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_percent_range() {
        let result = result_for(100, 120, 400);
        assert!((result.min_percent - 25.0).abs() < 1e-9);
        assert!((result.max_percent - 30.0).abs() < 1e-9);
    }
}
