//! Shared helpers for integration tests: the fixture catalog and an
//! independent Gen III save-image encoder used to exercise the parser.
#![allow(dead_code)]

use pokecalc::data::Store;

pub fn store() -> Store {
    Store::from_json(
        include_str!("../fixtures/pokedex.json"),
        include_str!("../fixtures/moves.json"),
        include_str!("../fixtures/items.json"),
        include_str!("../fixtures/abilities.json"),
        include_str!("../fixtures/natures.json"),
        include_str!("../fixtures/typechart.json"),
        include_str!("../fixtures/learnsets.json"),
        Some(include_str!("../fixtures/catchrates.json")),
    )
    .expect("fixture catalog must parse")
}

/// Cleartext party record for save-image construction.
pub struct SaveRecord {
    pub personality: u32,
    pub ot_id: u32,
    /// Raw Gen 3 text bytes, at most 10.
    pub nickname: Vec<u8>,
    pub level: u8,
    pub species: u16,
    pub item: u16,
    pub moves: [u16; 4],
    pub evs: [u8; 6],
    pub iv_word: u32,
    pub ability_slot: u8,
    pub friendship: u8,
    pub current_hp: u16,
    /// Record layout order: HP, Atk, Def, Spe, SpA, SpD.
    pub stats: [u16; 6],
}

impl Default for SaveRecord {
    fn default() -> Self {
        SaveRecord {
            personality: 0,
            ot_id: 0xCAFE_F00D,
            nickname: vec![0xCD, 0xC8, 0xC9, 0xCC, 0xC6, 0xBB, 0xD2], // SNORLAX
            level: 50,
            species: 143,
            item: 0,
            moves: [33, 156, 89, 85],
            evs: [4, 252, 0, 0, 0, 252],
            iv_word: 31 | (31 << 5) | (31 << 10) | (31 << 15) | (31 << 20) | (31 << 25),
            ability_slot: 0,
            friendship: 70,
            current_hp: 180,
            stats: [235, 145, 90, 50, 80, 135],
        }
    }
}

/// The 24 substructure orderings, kinds G=0, A=1, E=2, M=3 by position.
const ORDERS: [[usize; 4]; 24] = [
    [0, 1, 2, 3],
    [0, 1, 3, 2],
    [0, 2, 1, 3],
    [0, 2, 3, 1],
    [0, 3, 1, 2],
    [0, 3, 2, 1],
    [1, 0, 2, 3],
    [1, 0, 3, 2],
    [1, 2, 0, 3],
    [1, 2, 3, 0],
    [1, 3, 0, 2],
    [1, 3, 2, 0],
    [2, 0, 1, 3],
    [2, 0, 3, 1],
    [2, 1, 0, 3],
    [2, 1, 3, 0],
    [2, 3, 0, 1],
    [2, 3, 1, 0],
    [3, 0, 1, 2],
    [3, 0, 2, 1],
    [3, 1, 0, 2],
    [3, 1, 2, 0],
    [3, 2, 0, 1],
    [3, 2, 1, 0],
];

pub fn encode_record(spec: &SaveRecord) -> [u8; 100] {
    let mut blocks = [[0u8; 12]; 4];

    // Growth
    blocks[0][0..2].copy_from_slice(&spec.species.to_le_bytes());
    blocks[0][2..4].copy_from_slice(&spec.item.to_le_bytes());
    blocks[0][9] = spec.friendship;
    // Attacks
    for (i, m) in spec.moves.iter().enumerate() {
        blocks[1][i * 2..i * 2 + 2].copy_from_slice(&m.to_le_bytes());
    }
    // EVs
    blocks[2][..6].copy_from_slice(&spec.evs);
    // Misc
    blocks[3][4..8].copy_from_slice(&spec.iv_word.to_le_bytes());
    blocks[3][8..12].copy_from_slice(&(u32::from(spec.ability_slot & 3) << 29).to_le_bytes());

    let order = ORDERS[(spec.personality % 24) as usize];
    let mut payload = [0u8; 48];
    for (position, &kind) in order.iter().enumerate() {
        payload[position * 12..position * 12 + 12].copy_from_slice(&blocks[kind]);
    }

    let key = spec.personality ^ spec.ot_id;
    for word in payload.chunks_exact_mut(4) {
        let value = u32::from_le_bytes([word[0], word[1], word[2], word[3]]) ^ key;
        word.copy_from_slice(&value.to_le_bytes());
    }

    let mut record = [0u8; 100];
    record[0..4].copy_from_slice(&spec.personality.to_le_bytes());
    record[4..8].copy_from_slice(&spec.ot_id.to_le_bytes());
    let mut nickname = [0xFFu8; 10];
    nickname[..spec.nickname.len()].copy_from_slice(&spec.nickname);
    record[8..18].copy_from_slice(&nickname);
    record[32..80].copy_from_slice(&payload);
    record[84] = spec.level;
    record[86..88].copy_from_slice(&spec.current_hp.to_le_bytes());
    for (i, stat) in spec.stats.iter().enumerate() {
        record[88 + i * 2..90 + i * 2].copy_from_slice(&stat.to_le_bytes());
    }
    record
}

/// Build a 128 KiB save image with the party in the given slot (0 = A,
/// 1 = B), team sector at a non-zero index.
pub fn build_save(records: &[SaveRecord], slot: usize) -> Vec<u8> {
    let mut data = vec![0u8; 0x20000];
    write_party(&mut data, if slot == 1 { 0xE000 } else { 0 }, records);
    data
}

pub fn write_party(data: &mut [u8], slot_base: usize, records: &[SaveRecord]) {
    for sector in 0..14 {
        let footer = slot_base + sector * 0x1000 + 0xFF4;
        data[footer..footer + 2].copy_from_slice(&(sector as u16 + 20).to_le_bytes());
    }
    let team = slot_base + 3 * 0x1000;
    data[team + 0xFF4..team + 0xFF6].copy_from_slice(&1u16.to_le_bytes());
    data[team + 0x234] = records.len() as u8;
    for (i, record) in records.iter().enumerate() {
        let offset = team + 0x238 + i * 100;
        data[offset..offset + 100].copy_from_slice(&encode_record(record));
    }
}
