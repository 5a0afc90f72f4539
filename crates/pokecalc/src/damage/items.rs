//! Held-item capability tags.
//!
//! Items with a damage-relevant effect resolve to a tag at bind time, the
//! same way abilities do. Type-boosting items are covered separately via
//! the catalog's type-boost table.

/// Items the damage pipeline has a rule for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemTag {
    ChoiceBand,
    ChoiceSpecs,
    LifeOrb,
    ExpertBelt,
    MuscleBand,
    WiseGlasses,
    AssaultVest,
    Eviolite,
}

impl ItemTag {
    /// Resolve a canonical item id to its tag.
    pub fn from_id(id: &str) -> Option<ItemTag> {
        Some(match id {
            "choiceband" => ItemTag::ChoiceBand,
            "choicespecs" => ItemTag::ChoiceSpecs,
            "lifeorb" => ItemTag::LifeOrb,
            "expertbelt" => ItemTag::ExpertBelt,
            "muscleband" => ItemTag::MuscleBand,
            "wiseglasses" => ItemTag::WiseGlasses,
            "assaultvest" => ItemTag::AssaultVest,
            "eviolite" => ItemTag::Eviolite,
            _ => return None,
        })
    }
}
