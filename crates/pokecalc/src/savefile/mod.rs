//! Generation III save decoder.
//!
//! A save image is two rotating 56 KiB slots of fourteen 4 KiB sectors;
//! each sector carries its section id in a footer at +0xFF4. The party
//! lives in section 1. Party records are 100 bytes: a cleartext header
//! and trailer around a 48-byte payload that is XOR-encrypted with
//! `personality ^ otId` and whose four 12-byte substructures are permuted
//! by `personality % 24`.
//!
//! The decoder is read-only and pure: parsing the same buffer twice
//! yields identical results. Sector checksums are deliberately not
//! validated so saves from non-canonical ROM hacks still parse.

pub mod charset;
mod enrich;
mod tables;

use serde::Serialize;
use tracing::debug;

use crate::error::Error;
pub use enrich::{
    enrich_party, AbilityDetail, ItemDetail, MoveDetail, NatureEffect, PartyMemberDetail,
};
pub use tables::{remap_item, remap_species, substruct_offset, SUBSTRUCT_ORDER};

/// Minimum size of a save image.
pub const MIN_SAVE_SIZE: usize = 0x20000;

const SLOT_BASES: [usize; 2] = [0xE000, 0x0000];
const SECTORS_PER_SLOT: usize = 14;
const SECTOR_SIZE: usize = 0x1000;
const FOOTER_OFFSET: usize = 0xFF4;
const TEAM_ITEMS_SECTION: u16 = 1;

const PARTY_COUNT_OFFSET: usize = 0x234;
const PARTY_DATA_OFFSET: usize = 0x238;
const RECORD_SIZE: usize = 100;

/// Nature names indexed by `personality % 25`.
pub const NATURE_NAMES: [&str; 25] = [
    "Hardy", "Lonely", "Brave", "Adamant", "Naughty", "Bold", "Docile", "Relaxed", "Impish",
    "Lax", "Timid", "Hasty", "Serious", "Jolly", "Naive", "Modest", "Mild", "Quiet", "Bashful",
    "Rash", "Calm", "Gentle", "Sassy", "Careful", "Quirky",
];

/// Battle stats in catalog order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonStats {
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub sp_atk: i32,
    pub sp_def: i32,
    pub speed: i32,
}

/// One decoded party record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyPokemon {
    pub nickname: String,
    pub level: i32,
    pub species_num: i32,
    pub nature: String,
    pub item_num: i32,
    pub move_nums: Vec<i32>,
    pub stats: PokemonStats,
    pub ivs: PokemonStats,
    pub evs: PokemonStats,
    pub current_hp: i32,
    pub friendship: i32,
    /// 0 = first ability, 1 = second, 2 = hidden.
    pub ability_slot: u8,
}

/// A decoded save: the party, in slot order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ParsedSave {
    pub party: Vec<PartyPokemon>,
}

fn read_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

/// Locate the team/items sector of a slot by walking sector footers.
fn find_team_sector(data: &[u8], slot_base: usize) -> Option<usize> {
    for sector in 0..SECTORS_PER_SLOT {
        let sector_base = slot_base + sector * SECTOR_SIZE;
        let footer = sector_base + FOOTER_OFFSET;
        if footer + 4 > data.len() {
            continue;
        }
        if read_u16(data, footer) == TEAM_ITEMS_SECTION {
            return Some(sector_base);
        }
    }
    None
}

/// Decode the party from a raw save image.
///
/// Slot B (the usually more recent copy) is tried first, then slot A.
/// The input buffer is only read, never written; decryption works on a
/// private copy of each record's payload.
pub fn parse(data: &[u8]) -> Result<ParsedSave, Error> {
    if data.len() < MIN_SAVE_SIZE {
        return Err(Error::InputTooSmall(data.len()));
    }

    let mut found_slot = false;

    for slot_base in SLOT_BASES {
        let Some(section) = find_team_sector(data, slot_base) else {
            continue;
        };
        found_slot = true;

        if section + PARTY_DATA_OFFSET + 6 * RECORD_SIZE > data.len() {
            continue;
        }

        let count = data[section + PARTY_COUNT_OFFSET] as usize;
        if !(1..=6).contains(&count) {
            continue;
        }

        let mut party = Vec::with_capacity(count);
        for i in 0..count {
            let offset = section + PARTY_DATA_OFFSET + i * RECORD_SIZE;
            let record = parse_record(&data[offset..offset + RECORD_SIZE]);
            // Records decoding outside the dex range are garbage slots.
            if (1..=1025).contains(&record.species_num) {
                party.push(record);
            }
        }

        if !party.is_empty() {
            debug!(slot_base, count = party.len(), "party decoded");
            return Ok(ParsedSave { party });
        }
    }

    if found_slot {
        Err(Error::EmptyParty)
    } else {
        Err(Error::NoActiveSlot)
    }
}

/// Decode one 100-byte party record.
fn parse_record(record: &[u8]) -> PartyPokemon {
    let personality = read_u32(record, 0);
    let ot_id = read_u32(record, 4);

    let mut nickname = charset::decode_string(&record[8..18]);
    let level = i32::from(record[84]);
    let nature = NATURE_NAMES[(personality % 25) as usize].to_string();

    // Decrypt the 48-byte payload with the personality/OT key.
    let key = personality ^ ot_id;
    let mut payload = [0u8; 48];
    payload.copy_from_slice(&record[32..80]);
    for word in payload.chunks_exact_mut(4) {
        let value = u32::from_le_bytes([word[0], word[1], word[2], word[3]]) ^ key;
        word.copy_from_slice(&value.to_le_bytes());
    }

    let order = &SUBSTRUCT_ORDER[(personality % 24) as usize];
    let growth = substruct_offset(order, 0);
    let attacks = substruct_offset(order, 1);
    let evs_pos = substruct_offset(order, 2);
    let misc = substruct_offset(order, 3);

    // Growth: species, item, experience, friendship, poke-ball word
    let species_num = i32::from(remap_species(read_u16(&payload, growth) & 0x7FF));
    let item_num = i32::from(remap_item(read_u16(&payload, growth + 2)));
    let friendship = i32::from(payload[growth + 9]);

    // The expansion repurposes spare Growth bits for nickname characters
    // 11 and 12: bits 21..29 of the experience word, bits 6..14 of the
    // poke-ball word.
    let exp_word = read_u32(&payload, growth + 4);
    let ball_word = read_u16(&payload, growth + 10);
    for extra in [
        ((exp_word >> 21) & 0xFF) as u8,
        ((ball_word >> 6) & 0xFF) as u8,
    ] {
        if extra != charset::TERMINATOR && extra != 0 {
            if let Some(c) = charset::decode_char(extra) {
                nickname.push(c);
            }
        }
    }

    // Attacks: four move ids; zeroes are empty slots
    let move_nums = (0..4)
        .map(|i| i32::from(read_u16(&payload, attacks + i * 2)))
        .filter(|&m| m > 0)
        .collect();

    // EVs substructure: HP, Atk, Def, Spe, SpA, SpD
    let evs = PokemonStats {
        hp: i32::from(payload[evs_pos]),
        attack: i32::from(payload[evs_pos + 1]),
        defense: i32::from(payload[evs_pos + 2]),
        speed: i32::from(payload[evs_pos + 3]),
        sp_atk: i32::from(payload[evs_pos + 4]),
        sp_def: i32::from(payload[evs_pos + 5]),
    };

    // Misc: packed IVs (five bits per stat), then ribbons with the
    // ability slot in bits 29..31
    let iv_word = read_u32(&payload, misc + 4);
    let ivs = PokemonStats {
        hp: (iv_word & 0x1F) as i32,
        attack: ((iv_word >> 5) & 0x1F) as i32,
        defense: ((iv_word >> 10) & 0x1F) as i32,
        speed: ((iv_word >> 15) & 0x1F) as i32,
        sp_atk: ((iv_word >> 20) & 0x1F) as i32,
        sp_def: ((iv_word >> 25) & 0x1F) as i32,
    };
    let ribbon_word = read_u32(&payload, misc + 8);
    let ability_slot = ((ribbon_word >> 29) & 0x3) as u8;

    // Party trailer: current HP at 86, then the six battle stats with
    // speed ahead of the special stats.
    let current_hp = i32::from(read_u16(record, 86));
    let stats = PokemonStats {
        hp: i32::from(read_u16(record, 88)),
        attack: i32::from(read_u16(record, 90)),
        defense: i32::from(read_u16(record, 92)),
        speed: i32::from(read_u16(record, 94)),
        sp_atk: i32::from(read_u16(record, 96)),
        sp_def: i32::from(read_u16(record, 98)),
    };

    PartyPokemon {
        nickname,
        level,
        species_num,
        nature,
        item_num,
        move_nums,
        stats,
        ivs,
        evs,
        current_hp,
        friendship,
        ability_slot,
    }
}


#[cfg(test)]
mod tests {
    use super::testutil::*;
    use super::*;

    #[test]
    fn test_too_small_input() {
        assert!(matches!(
            parse(&[0u8; 100]),
            Err(Error::InputTooSmall(100))
        ));
    }

    #[test]
    fn test_no_active_slot() {
        let data = vec![0u8; MIN_SAVE_SIZE];
        assert!(matches!(parse(&data), Err(Error::NoActiveSlot)));
    }

    #[test]
    fn test_empty_party_when_slot_has_garbage() {
        let mut spec = RecordSpec::default();
        spec.species = 0; // out of range, dropped
        let data = build_save(&[spec], 0);
        assert!(matches!(parse(&data), Err(Error::EmptyParty)));
    }

    #[test]
    fn test_single_snorlax_record() {
        let data = build_save(&[RecordSpec::default()], 0);
        let save = parse(&data).unwrap();
        assert_eq!(save.party.len(), 1);

        let mon = &save.party[0];
        assert_eq!(mon.species_num, 143);
        assert_eq!(mon.level, 50);
        assert_eq!(mon.nickname, "SNORLAX");
        assert_eq!(mon.move_nums, vec![33, 156, 182]);
        // personality 0 -> Hardy
        assert_eq!(mon.nature, "Hardy");
        assert_eq!(mon.current_hp, 150);
        assert!(mon.current_hp <= mon.stats.hp);
        assert_eq!(mon.stats.speed, 130);
        assert_eq!(mon.stats.sp_atk, 85);
        assert_eq!(mon.evs.attack, 252);
        assert_eq!(mon.friendship, 70);
        assert!(mon.nickname.chars().all(|c| c.is_ascii_graphic()));
    }

    #[test]
    fn test_nature_follows_personality() {
        let mut spec = RecordSpec::default();
        spec.personality = 3; // 3 % 25 -> Adamant
        let data = build_save(&[spec], 0);
        let save = parse(&data).unwrap();
        assert_eq!(save.party[0].nature, "Adamant");
    }

    #[test]
    fn test_all_permutations_decode_identically() {
        for index in 0..24u32 {
            // Keep personality % 24 == index while varying the key
            let spec = RecordSpec {
                personality: index + 24 * 1000,
                ot_id: 0xDEAD_BEEF,
                item: 6,
                ..RecordSpec::default()
            };
            let data = build_save(&[spec], 0);
            let save = parse(&data).unwrap();
            let mon = &save.party[0];
            assert_eq!(mon.species_num, 143, "permutation {index}");
            // Expansion item 6 remaps to 188
            assert_eq!(mon.item_num, 188, "permutation {index}");
            assert_eq!(mon.move_nums[0], 33, "permutation {index}");
        }
    }

    #[test]
    fn test_slot_b_preferred() {
        let mut data = vec![0u8; MIN_SAVE_SIZE];
        let slot_a = RecordSpec {
            species: 25,
            ..RecordSpec::default()
        };
        let slot_b = RecordSpec {
            species: 143,
            ..RecordSpec::default()
        };
        write_party(&mut data, 0x0000, &[slot_a]);
        write_party(&mut data, 0xE000, &[slot_b]);
        let save = parse(&data).unwrap();
        assert_eq!(save.party[0].species_num, 143);
    }

    #[test]
    fn test_falls_back_to_slot_a() {
        let data = build_save(&[RecordSpec::default()], 0);
        let save = parse(&data).unwrap();
        assert_eq!(save.party[0].species_num, 143);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let data = build_save(
            &[RecordSpec::default(), RecordSpec {
                personality: 7,
                species: 1289, // remaps to 906
                ..RecordSpec::default()
            }],
            1,
        );
        let first = parse(&data).unwrap();
        let second = parse(&data).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.party.len(), 2);
        assert_eq!(first.party[1].species_num, 906);
    }

    #[test]
    fn test_species_id_masked_to_eleven_bits() {
        let spec = RecordSpec {
            // High bits above 0x7FF are forme/flag bits and must be masked
            species: 0x0800 | 143,
            ..RecordSpec::default()
        };
        let data = build_save(&[spec], 0);
        let save = parse(&data).unwrap();
        assert_eq!(save.party[0].species_num, 143);
    }

    #[test]
    fn test_ability_slot_bits() {
        for slot in 0..3u8 {
            let spec = RecordSpec {
                ability_slot: slot,
                ..RecordSpec::default()
            };
            let data = build_save(&[spec], 0);
            let save = parse(&data).unwrap();
            assert_eq!(save.party[0].ability_slot, slot);
        }
    }

    #[test]
    fn test_ivs_unpacked() {
        // hp 31, atk 7, def 15, spe 1, spa 30, spd 21
        let iv_word = 31 | (7 << 5) | (15 << 10) | (1 << 15) | (30 << 20) | (21 << 25);
        let spec = RecordSpec {
            iv_word,
            ..RecordSpec::default()
        };
        let data = build_save(&[spec], 0);
        let mon = parse(&data).unwrap().party.remove(0);
        assert_eq!(mon.ivs.hp, 31);
        assert_eq!(mon.ivs.attack, 7);
        assert_eq!(mon.ivs.defense, 15);
        assert_eq!(mon.ivs.speed, 1);
        assert_eq!(mon.ivs.sp_atk, 30);
        assert_eq!(mon.ivs.sp_def, 21);
    }
}
