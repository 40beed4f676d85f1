use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Abilities the engine knows how to resolve. Anything else loads as `Other`
/// and is inert in battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter, EnumString, Display)]
pub enum Ability {
    // Damage calculation
    Guts,
    #[strum(to_string = "Solar Power")]
    SolarPower,
    Adaptability,
    Infiltrator,
    #[strum(to_string = "Solid Rock")]
    SolidRock,
    Filter,
    #[strum(to_string = "Prism Armor")]
    PrismArmor,
    Sniper,
    #[strum(to_string = "Super Luck")]
    SuperLuck,
    #[strum(to_string = "Tinted Lens")]
    TintedLens,
    Technician,
    #[strum(to_string = "Sheer Force")]
    SheerForce,
    Disguise,
    Blaze,
    Torrent,
    Overgrow,
    Swarm,
    Scrappy,

    // Ordering and accuracy
    #[strum(to_string = "Gale Wings")]
    GaleWings,
    Prankster,
    #[strum(to_string = "Swift Swim")]
    SwiftSwim,
    Chlorophyll,
    #[strum(to_string = "Sand Rush")]
    SandRush,
    #[strum(to_string = "Slush Rush")]
    SlushRush,
    #[strum(to_string = "No Guard")]
    NoGuard,
    #[strum(to_string = "Compound Eyes")]
    CompoundEyes,
    Hustle,
    #[strum(to_string = "Sand Veil")]
    SandVeil,
    #[strum(to_string = "Snow Cloak")]
    SnowCloak,

    // Move absorption and reflection
    #[strum(to_string = "Magic Bounce")]
    MagicBounce,
    #[strum(to_string = "Volt Absorb")]
    VoltAbsorb,
    #[strum(to_string = "Water Absorb")]
    WaterAbsorb,
    #[strum(to_string = "Flash Fire")]
    FlashFire,
    #[strum(to_string = "Lightning Rod")]
    LightningRod,
    #[strum(to_string = "Storm Drain")]
    StormDrain,
    #[strum(to_string = "Sap Sipper")]
    SapSipper,
    #[strum(to_string = "Motor Drive")]
    MotorDrive,
    #[strum(to_string = "Dry Skin")]
    DrySkin,
    Levitate,

    // Contact and on-hit reactions
    #[strum(to_string = "Rough Skin")]
    RoughSkin,
    #[strum(to_string = "Iron Barbs")]
    IronBarbs,
    Static,
    #[strum(to_string = "Flame Body")]
    FlameBody,
    #[strum(to_string = "Poison Point")]
    PoisonPoint,
    Sturdy,
    #[strum(to_string = "Rock Head")]
    RockHead,
    #[strum(to_string = "Skill Link")]
    SkillLink,

    // Knockout rewards
    Moxie,
    #[strum(to_string = "Beast Boost")]
    BeastBoost,
    #[strum(to_string = "Chilling Neigh")]
    ChillingNeigh,
    #[strum(to_string = "Grim Neigh")]
    GrimNeigh,

    // Residuals
    #[strum(to_string = "Magic Guard")]
    MagicGuard,
    Overcoat,
    #[strum(to_string = "Poison Heal")]
    PoisonHeal,
    #[strum(to_string = "Rain Dish")]
    RainDish,
    #[strum(to_string = "Ice Body")]
    IceBody,

    // Switch-in
    Drizzle,
    Drought,
    #[strum(to_string = "Sand Stream")]
    SandStream,
    #[strum(to_string = "Snow Warning")]
    SnowWarning,
    #[strum(to_string = "Electric Surge")]
    ElectricSurge,
    #[strum(to_string = "Grassy Surge")]
    GrassySurge,
    #[strum(to_string = "Misty Surge")]
    MistySurge,
    #[strum(to_string = "Psychic Surge")]
    PsychicSurge,
    Intimidate,

    // Stat drop protection and reactions
    #[strum(to_string = "Clear Body")]
    ClearBody,
    #[strum(to_string = "White Smoke")]
    WhiteSmoke,
    #[strum(to_string = "Hyper Cutter")]
    HyperCutter,
    #[strum(to_string = "Inner Focus")]
    InnerFocus,
    Oblivious,
    #[strum(to_string = "Own Tempo")]
    OwnTempo,
    Defiant,
    Competitive,

    // Status immunity
    Immunity,
    Limber,
    Insomnia,
    #[strum(to_string = "Vital Spirit")]
    VitalSpirit,
    #[strum(to_string = "Water Veil")]
    WaterVeil,
    #[strum(to_string = "Magma Armor")]
    MagmaArmor,

    Pressure,
    #[default]
    Other,
}

impl Ability {
    /// Abilities that reward scoring a knockout.
    pub fn rewards_knockout(self) -> bool {
        matches!(
            self,
            Ability::Moxie | Ability::BeastBoost | Ability::ChillingNeigh | Ability::GrimNeigh
        )
    }

    /// Abilities that ignore an Intimidate-style Attack drop.
    pub fn blocks_intimidate(self) -> bool {
        matches!(
            self,
            Ability::ClearBody
                | Ability::WhiteSmoke
                | Ability::HyperCutter
                | Ability::InnerFocus
                | Ability::Oblivious
                | Ability::OwnTempo
                | Ability::Scrappy
        )
    }
}
