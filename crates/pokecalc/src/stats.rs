//! Stat computation: base/IV/EV/level/nature math and stage boosts.
//!
//! All arithmetic is integer; nature modifiers are 11/10/9 over 10 and
//! stage boosts are rational pairs applied with floor division, matching
//! cartridge behavior.

use serde::{Deserialize, Serialize};

use crate::damage::formula::floor_div;

/// The six battle stats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    Hp,
    Atk,
    Def,
    SpA,
    SpD,
    Spe,
}

impl Stat {
    /// The five boostable stats (HP has no stages).
    pub const BOOSTABLE: [Stat; 5] = [Stat::Atk, Stat::Def, Stat::SpA, Stat::SpD, Stat::Spe];

    /// Display name for enriched output ("Sp. Atk", ...).
    pub fn display_name(self) -> &'static str {
        match self {
            Stat::Hp => "HP",
            Stat::Atk => "Attack",
            Stat::Def => "Defense",
            Stat::SpA => "Sp. Atk",
            Stat::SpD => "Sp. Def",
            Stat::Spe => "Speed",
        }
    }

}

/// A full spread of per-stat values (EVs, IVs, or computed stats).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatSpread {
    pub hp: i32,
    pub atk: i32,
    pub def: i32,
    pub spa: i32,
    pub spd: i32,
    pub spe: i32,
}

impl StatSpread {
    /// All-31 spread (default IVs).
    pub fn max_ivs() -> Self {
        StatSpread {
            hp: 31,
            atk: 31,
            def: 31,
            spa: 31,
            spd: 31,
            spe: 31,
        }
    }

    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::SpA => self.spa,
            Stat::SpD => self.spd,
            Stat::Spe => self.spe,
        }
    }

    pub fn set(&mut self, stat: Stat, value: i32) {
        match stat {
            Stat::Hp => self.hp = value,
            Stat::Atk => self.atk = value,
            Stat::Def => self.def = value,
            Stat::SpA => self.spa = value,
            Stat::SpD => self.spd = value,
            Stat::Spe => self.spe = value,
        }
    }
}

/// Stage boosts in [-6, +6] per boostable stat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBoosts {
    pub atk: i8,
    pub def: i8,
    pub spa: i8,
    pub spd: i8,
    pub spe: i8,
}

impl StatBoosts {
    pub fn get(&self, stat: Stat) -> i8 {
        match stat {
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::SpA => self.spa,
            Stat::SpD => self.spd,
            Stat::Spe => self.spe,
            Stat::Hp => 0,
        }
    }
}

/// Non-HP stat: `floor((2*base + iv + floor(ev/4)) * level / 100) + 5`,
/// then the nature modifier as `floor(stat * m / 10)` with m in {9,10,11}.
pub fn calculate_stat(base: i32, iv: i32, ev: i32, level: i32, nature_modifier: i32) -> i32 {
    let stat = floor_div((2 * base + iv + floor_div(ev, 4)) * level, 100) + 5;
    floor_div(stat * nature_modifier, 10)
}

/// HP stat. A base of 1 (Shedinja) is always 1 regardless of investment.
pub fn calculate_hp(base: i32, iv: i32, ev: i32, level: i32) -> i32 {
    if base == 1 {
        return 1;
    }
    floor_div((2 * base + iv + floor_div(ev, 4)) * level, 100) + level + 10
}

/// Stage multipliers for -6..=+6 as (numerator, denominator).
const BOOST_TABLE: [(i32, i32); 13] = [
    (2, 8), // -6
    (2, 7), // -5
    (2, 6), // -4
    (2, 5), // -3
    (2, 4), // -2
    (2, 3), // -1
    (2, 2), //  0
    (3, 2), // +1
    (4, 2), // +2
    (5, 2), // +3
    (6, 2), // +4
    (7, 2), // +5
    (8, 2), // +6
];

/// Apply a boost stage to a stat with floor division.
pub fn apply_stat_boost(stat: i32, stage: i8) -> i32 {
    let index = (stage.clamp(-6, 6) + 6) as usize;
    let (num, den) = BOOST_TABLE[index];
    floor_div(stat * num, den)
}

/// Apply a boost stage under the critical-hit rule: crits ignore the
/// attacker's unfavorable stages (< 0) and the defender's favorable
/// stages (> 0). Other stages apply normally.
pub fn modified_stat(stat: i32, mut stage: i8, is_crit: bool, is_attacker: bool) -> i32 {
    if is_crit {
        if is_attacker && stage < 0 {
            stage = 0;
        }
        if !is_attacker && stage > 0 {
            stage = 0;
        }
    }
    apply_stat_boost(stat, stage)
}
