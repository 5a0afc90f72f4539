//! Learnset token parsing.
//!
//! Raw learnsets map a move id to source tokens of the form
//! `<gen-digit><kind><optional-level>` where the kind is L (level-up),
//! M (TM/HM), T (tutor), E (egg) or S (event). A token counts only when
//! its generation digit is at or below the target generation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Raw learnset document entry for one species.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawLearnset {
    #[serde(default)]
    pub learnset: BTreeMap<String, Vec<String>>,
}

/// A level-up move with its learn level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LevelUpMove {
    #[serde(rename = "move")]
    pub move_id: String,
    pub level: i32,
}

/// Learnset bucketed by acquisition method. Order within a bucket is
/// unspecified.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ParsedLearnset {
    pub levelup: Vec<LevelUpMove>,
    pub tm: Vec<String>,
    pub tutor: Vec<String>,
    pub egg: Vec<String>,
    pub event: Vec<String>,
}

/// Bucket raw tokens for a target generation.
///
/// When a move has level-up tokens from several surviving generations,
/// the level from the highest generation wins: later data supersedes
/// earlier revisions of the same learnset.
pub fn parse_learnset(raw: &RawLearnset, generation: u8) -> ParsedLearnset {
    let mut parsed = ParsedLearnset::default();

    // move id -> (level, source generation) for level-up dedup
    let mut levelup: BTreeMap<&str, (i32, u8)> = BTreeMap::new();

    for (move_id, sources) in &raw.learnset {
        for source in sources {
            let bytes = source.as_bytes();
            if bytes.len() < 2 || !bytes[0].is_ascii_digit() {
                continue;
            }
            let source_gen = bytes[0] - b'0';
            if source_gen > generation {
                continue;
            }

            match bytes[1] {
                b'L' => {
                    let level: i32 = source[2..].parse().unwrap_or(0);
                    let entry = levelup.entry(move_id).or_insert((level, source_gen));
                    if source_gen > entry.1 {
                        *entry = (level, source_gen);
                    }
                }
                b'M' => push_unique(&mut parsed.tm, move_id),
                b'T' => push_unique(&mut parsed.tutor, move_id),
                b'E' => push_unique(&mut parsed.egg, move_id),
                b'S' => push_unique(&mut parsed.event, move_id),
                _ => {}
            }
        }
    }

    parsed.levelup = levelup
        .into_iter()
        .map(|(move_id, (level, _))| LevelUpMove {
            move_id: move_id.to_string(),
            level,
        })
        .collect();

    parsed
}

fn push_unique(bucket: &mut Vec<String>, move_id: &str) {
    if !bucket.iter().any(|m| m == move_id) {
        bucket.push(move_id.to_string());
    }
}
