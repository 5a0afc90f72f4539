use std::collections::BTreeMap;
use std::fmt;

use bitflags::bitflags;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Move damage category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveCategory {
    #[default]
    Physical,
    Special,
    Status,
}

bitflags! {
    /// Move flags the calculator consumes, parsed from the raw flag map.
    /// Flags the pipeline has no rule for are dropped at load.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct MoveFlags: u32 {
        const CONTACT  = 1 << 0;
        const PROTECT  = 1 << 1;
        const MIRROR   = 1 << 2;
        const HEAL     = 1 << 3;
        const BITE     = 1 << 4;
        const PUNCH    = 1 << 5;
        const SOUND    = 1 << 6;
        const POWDER   = 1 << 7;
        const BULLET   = 1 << 8;
        const PULSE    = 1 << 9;
        const WIND     = 1 << 10;
        const SLICING  = 1 << 11;
        const DANCE    = 1 << 12;
        const DEFROST  = 1 << 13;
        const CHARGE   = 1 << 14;
        const RECHARGE = 1 << 15;
        const SNATCH   = 1 << 16;
    }
}

impl MoveFlags {
    fn from_flag_name(name: &str) -> Option<MoveFlags> {
        Some(match name {
            "contact" => MoveFlags::CONTACT,
            "protect" => MoveFlags::PROTECT,
            "mirror" => MoveFlags::MIRROR,
            "heal" => MoveFlags::HEAL,
            "bite" => MoveFlags::BITE,
            "punch" => MoveFlags::PUNCH,
            "sound" => MoveFlags::SOUND,
            "powder" => MoveFlags::POWDER,
            "bullet" => MoveFlags::BULLET,
            "pulse" => MoveFlags::PULSE,
            "wind" => MoveFlags::WIND,
            "slicing" => MoveFlags::SLICING,
            "dance" => MoveFlags::DANCE,
            "defrost" => MoveFlags::DEFROST,
            "charge" => MoveFlags::CHARGE,
            "recharge" => MoveFlags::RECHARGE,
            "snatch" => MoveFlags::SNATCH,
            _ => return None,
        })
    }
}

fn deserialize_flags<'de, D>(deserializer: D) -> Result<MoveFlags, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, i32> = BTreeMap::deserialize(deserializer)?;
    let mut flags = MoveFlags::empty();
    for name in raw.keys() {
        if let Some(flag) = MoveFlags::from_flag_name(name) {
            flags |= flag;
        }
    }
    Ok(flags)
}

/// Move accuracy: a percentage, or a move that never misses.
///
/// The raw JSON field is either an integer or the literal `true`; the
/// shape is normalized here once and never re-examined downstream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Accuracy {
    Always,
    Percent(u8),
}

impl Accuracy {
    /// Integer view; never-miss moves normalize to 100.
    pub fn as_percent(self) -> u8 {
        match self {
            Accuracy::Always => 100,
            Accuracy::Percent(p) => p,
        }
    }
}

impl Default for Accuracy {
    fn default() -> Self {
        Accuracy::Percent(100)
    }
}

impl<'de> Deserialize<'de> for Accuracy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AccuracyVisitor;

        impl<'de> de::Visitor<'de> for AccuracyVisitor {
            type Value = Accuracy;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an accuracy percentage or `true`")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Accuracy, E> {
                if v {
                    Ok(Accuracy::Always)
                } else {
                    Ok(Accuracy::Percent(0))
                }
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Accuracy, E> {
                Ok(Accuracy::Percent(v.min(100) as u8))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Accuracy, E> {
                Ok(Accuracy::Percent(v.clamp(0, 100) as u8))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Accuracy, E> {
                Ok(Accuracy::Percent(v.clamp(0.0, 100.0) as u8))
            }
        }

        deserializer.deserialize_any(AccuracyVisitor)
    }
}

/// Multi-hit count: a fixed number or an inclusive range.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum MultiHit {
    Fixed(i32),
    Range([i32; 2]),
}

/// Secondary effect of a move (chance-based status, boosts, ...).
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveSecondary {
    #[serde(default)]
    pub chance: Option<i32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub volatile_status: Option<String>,
    #[serde(default)]
    pub boosts: Option<BTreeMap<String, i32>>,
}

/// One move entry.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    pub num: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: String,
    pub category: MoveCategory,
    pub base_power: i32,
    #[serde(default)]
    pub accuracy: Accuracy,
    pub pp: i32,
    #[serde(default)]
    pub priority: i8,
    #[serde(default, deserialize_with = "deserialize_flags")]
    pub flags: MoveFlags,
    #[serde(default)]
    pub will_crit: bool,
    /// [numerator, denominator] of damage drained as HP.
    #[serde(default)]
    pub drain: Option<[i32; 2]>,
    /// [numerator, denominator] of damage taken back as recoil.
    #[serde(default)]
    pub recoil: Option<[i32; 2]>,
    #[serde(default)]
    pub multihit: Option<MultiHit>,
    /// Defense stat override for Psyshock-like moves.
    #[serde(default)]
    pub defensive_category: Option<MoveCategory>,
    #[serde(default)]
    pub secondary: Option<MoveSecondary>,
    #[serde(default)]
    pub secondaries: Vec<MoveSecondary>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub short_desc: Option<String>,
}

impl Move {
    pub fn is_status(&self) -> bool {
        self.category == MoveCategory::Status
    }

    pub fn has_flag(&self, flag: MoveFlags) -> bool {
        self.flags.contains(flag)
    }

    /// Hit count as an inclusive (min, max) range.
    pub fn hit_range(&self) -> (i32, i32) {
        match self.multihit {
            None => (1, 1),
            Some(MultiHit::Fixed(n)) => (n, n),
            Some(MultiHit::Range([min, max])) => (min, max),
        }
    }

    pub fn has_secondary_effect(&self) -> bool {
        self.secondary.is_some() || !self.secondaries.is_empty()
    }
}
