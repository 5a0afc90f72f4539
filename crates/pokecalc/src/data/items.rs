use serde::Deserialize;

/// Natural Gift parameters for berries.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NaturalGift {
    pub base_power: i32,
    #[serde(rename = "type")]
    pub gift_type: String,
}

/// One held-item entry.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Canonical id; filled from the document key when absent.
    #[serde(default)]
    pub id: String,
    pub num: i32,
    pub name: String,
    #[serde(default)]
    pub gen: Option<i32>,
    #[serde(default)]
    pub desc: String,
    /// Battle items carry a Fling power; key items do not. Used to break
    /// ties when several catalog entries share a number.
    #[serde(default)]
    pub fling_base_power: i32,
    #[serde(default)]
    pub natural_gift: Option<NaturalGift>,
}

impl Item {
    /// The type this item boosts, if it is a type-boosting held item.
    pub fn type_boost(&self) -> Option<&'static str> {
        type_boost_for(&self.id)
    }
}

/// Type-boosting held items (plain boosters, plates, incenses) by id.
const TYPE_BOOST_ITEMS: [(&str, &str); 36] = [
    ("blackbelt", "Fighting"),
    ("blackglasses", "Dark"),
    ("charcoal", "Fire"),
    ("dracoplate", "Dragon"),
    ("dragonfang", "Dragon"),
    ("dreadplate", "Dark"),
    ("earthplate", "Ground"),
    ("fistplate", "Fighting"),
    ("flameplate", "Fire"),
    ("hardstone", "Rock"),
    ("icicleplate", "Ice"),
    ("insectplate", "Bug"),
    ("ironplate", "Steel"),
    ("magnet", "Electric"),
    ("meadowplate", "Grass"),
    ("metalcoat", "Steel"),
    ("mindplate", "Psychic"),
    ("miracleseed", "Grass"),
    ("mysticwater", "Water"),
    ("nevermeltice", "Ice"),
    ("oddincense", "Psychic"),
    ("pixieplate", "Fairy"),
    ("poisonbarb", "Poison"),
    ("rockincense", "Rock"),
    ("roseincense", "Grass"),
    ("seaincense", "Water"),
    ("sharpbeak", "Flying"),
    ("silkscarf", "Normal"),
    ("silverpowder", "Bug"),
    ("skyplate", "Flying"),
    ("softsand", "Ground"),
    ("spelltag", "Ghost"),
    ("splashplate", "Water"),
    ("stoneplate", "Rock"),
    ("toxicplate", "Poison"),
    ("twistedspoon", "Psychic"),
];

/// Look up the boosted type for a type-boosting item id.
pub fn type_boost_for(item_id: &str) -> Option<&'static str> {
    TYPE_BOOST_ITEMS
        .binary_search_by(|probe| probe.0.cmp(item_id))
        .ok()
        .map(|idx| TYPE_BOOST_ITEMS[idx].1)
}
