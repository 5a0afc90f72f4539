//! Ability capability tags.
//!
//! Abilities arrive in requests as free-form names. Each combatant
//! resolves its ability to a tag once at bind time; the pipeline then
//! dispatches on the tag and never compares name strings. A name with no
//! tag simply matches no rule, so unknown or cosmetic abilities degrade
//! to no-ops instead of failing.

/// Abilities the damage pipeline has a rule for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbilityTag {
    // Offensive stat / base power
    Technician,
    HugePower,
    PurePower,
    Guts,
    Hustle,
    FlowerGift,
    SolarPower,
    GorillaTactics,
    Adaptability,
    SheerForce,
    IronFist,
    Reckless,
    ToughClaws,
    StrongJaw,
    MegaLauncher,
    SandForce,
    // Pinch abilities (1.5x matching type at <= 1/3 HP)
    Torrent,
    Blaze,
    Overgrow,
    Swarm,
    // Defensive
    FurCoat,
    MarvelScale,
    GrassPelt,
    Filter,
    SolidRock,
    PrismArmor,
    Multiscale,
    ShadowShield,
    IceScales,
    Fluffy,
    PunkRock,
    ThickFat,
    // Type immunities / absorbers
    FlashFire,
    Levitate,
    VoltAbsorb,
    LightningRod,
    MotorDrive,
    WaterAbsorb,
    StormDrain,
    DrySkin,
    SapSipper,
    EarthEater,
}

impl AbilityTag {
    /// Resolve a canonical ability id to its tag.
    pub fn from_id(id: &str) -> Option<AbilityTag> {
        Some(match id {
            "technician" => AbilityTag::Technician,
            "hugepower" => AbilityTag::HugePower,
            "purepower" => AbilityTag::PurePower,
            "guts" => AbilityTag::Guts,
            "hustle" => AbilityTag::Hustle,
            "flowergift" => AbilityTag::FlowerGift,
            "solarpower" => AbilityTag::SolarPower,
            "gorillatactics" => AbilityTag::GorillaTactics,
            "adaptability" => AbilityTag::Adaptability,
            "sheerforce" => AbilityTag::SheerForce,
            "ironfist" => AbilityTag::IronFist,
            "reckless" => AbilityTag::Reckless,
            "toughclaws" => AbilityTag::ToughClaws,
            "strongjaw" => AbilityTag::StrongJaw,
            "megalauncher" => AbilityTag::MegaLauncher,
            "sandforce" => AbilityTag::SandForce,
            "torrent" => AbilityTag::Torrent,
            "blaze" => AbilityTag::Blaze,
            "overgrow" => AbilityTag::Overgrow,
            "swarm" => AbilityTag::Swarm,
            "furcoat" => AbilityTag::FurCoat,
            "marvelscale" => AbilityTag::MarvelScale,
            "grasspelt" => AbilityTag::GrassPelt,
            "filter" => AbilityTag::Filter,
            "solidrock" => AbilityTag::SolidRock,
            "prismarmor" => AbilityTag::PrismArmor,
            "multiscale" => AbilityTag::Multiscale,
            "shadowshield" => AbilityTag::ShadowShield,
            "icescales" => AbilityTag::IceScales,
            "fluffy" => AbilityTag::Fluffy,
            "punkrock" => AbilityTag::PunkRock,
            "thickfat" => AbilityTag::ThickFat,
            "flashfire" => AbilityTag::FlashFire,
            "levitate" => AbilityTag::Levitate,
            "voltabsorb" => AbilityTag::VoltAbsorb,
            "lightningrod" => AbilityTag::LightningRod,
            "motordrive" => AbilityTag::MotorDrive,
            "waterabsorb" => AbilityTag::WaterAbsorb,
            "stormdrain" => AbilityTag::StormDrain,
            "dryskin" => AbilityTag::DrySkin,
            "sapsipper" => AbilityTag::SapSipper,
            "eartheater" => AbilityTag::EarthEater,
            _ => return None,
        })
    }

    /// The attack type this ability grants outright immunity to.
    pub fn immune_type(self) -> Option<&'static str> {
        Some(match self {
            AbilityTag::Levitate | AbilityTag::EarthEater => "Ground",
            AbilityTag::VoltAbsorb | AbilityTag::LightningRod | AbilityTag::MotorDrive => {
                "Electric"
            }
            AbilityTag::WaterAbsorb | AbilityTag::StormDrain | AbilityTag::DrySkin => "Water",
            AbilityTag::FlashFire => "Fire",
            AbilityTag::SapSipper => "Grass",
            _ => return None,
        })
    }

    /// The move type a pinch ability boosts at one third HP or below.
    pub fn pinch_type(self) -> Option<&'static str> {
        Some(match self {
            AbilityTag::Torrent => "Water",
            AbilityTag::Blaze => "Fire",
            AbilityTag::Overgrow => "Grass",
            AbilityTag::Swarm => "Bug",
            _ => return None,
        })
    }

    /// Filter-family check: reduces super-effective damage by a quarter.
    pub fn reduces_super_effective(self) -> bool {
        matches!(
            self,
            AbilityTag::Filter | AbilityTag::SolidRock | AbilityTag::PrismArmor
        )
    }

    /// Multiscale-family check: halves damage at full HP.
    pub fn halves_at_full_hp(self) -> bool {
        matches!(self, AbilityTag::Multiscale | AbilityTag::ShadowShield)
    }
}
