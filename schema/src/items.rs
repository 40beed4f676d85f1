use crate::PokemonType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Held items with an in-battle effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Item {
    LifeOrb,
    /// Type plates boost moves of one type by 20%.
    Plate(PokemonType),
    ExpertBelt,
    MuscleBand,
    WiseGlasses,
    LightClay,
    FocusSash,
    ShellBell,
    RockyHelmet,
    EjectButton,
    EjectPack,
    RedCard,
    AirBalloon,
    WeaknessPolicy,
    WhiteHerb,
    Leftovers,
    BlackSludge,
    IronBall,
    ScopeLens,
    RazorClaw,
    WideLens,
    BrightPowder,
    HeavyDutyBoots,
    FigyBerry,
    WikiBerry,
    MagoBerry,
    AguavBerry,
    IapapaBerry,
    SitrusBerry,
}

const PLATES: [(&str, PokemonType); 17] = [
    ("Flame Plate", PokemonType::Fire),
    ("Splash Plate", PokemonType::Water),
    ("Zap Plate", PokemonType::Electric),
    ("Meadow Plate", PokemonType::Grass),
    ("Icicle Plate", PokemonType::Ice),
    ("Fist Plate", PokemonType::Fighting),
    ("Toxic Plate", PokemonType::Poison),
    ("Earth Plate", PokemonType::Ground),
    ("Sky Plate", PokemonType::Flying),
    ("Mind Plate", PokemonType::Psychic),
    ("Insect Plate", PokemonType::Bug),
    ("Stone Plate", PokemonType::Rock),
    ("Spooky Plate", PokemonType::Ghost),
    ("Draco Plate", PokemonType::Dragon),
    ("Dread Plate", PokemonType::Dark),
    ("Iron Plate", PokemonType::Steel),
    ("Pixie Plate", PokemonType::Fairy),
];

const NAMED: [(&str, Item); 28] = [
    ("Life Orb", Item::LifeOrb),
    ("Expert Belt", Item::ExpertBelt),
    ("Muscle Band", Item::MuscleBand),
    ("Wise Glasses", Item::WiseGlasses),
    ("Light Clay", Item::LightClay),
    ("Focus Sash", Item::FocusSash),
    ("Shell Bell", Item::ShellBell),
    ("Rocky Helmet", Item::RockyHelmet),
    ("Eject Button", Item::EjectButton),
    ("Eject Pack", Item::EjectPack),
    ("Red Card", Item::RedCard),
    ("Air Balloon", Item::AirBalloon),
    ("Weakness Policy", Item::WeaknessPolicy),
    ("White Herb", Item::WhiteHerb),
    ("Leftovers", Item::Leftovers),
    ("Black Sludge", Item::BlackSludge),
    ("Iron Ball", Item::IronBall),
    ("Scope Lens", Item::ScopeLens),
    ("Razor Claw", Item::RazorClaw),
    ("Wide Lens", Item::WideLens),
    ("Bright Powder", Item::BrightPowder),
    ("Heavy-Duty Boots", Item::HeavyDutyBoots),
    ("Figy Berry", Item::FigyBerry),
    ("Wiki Berry", Item::WikiBerry),
    ("Mago Berry", Item::MagoBerry),
    ("Aguav Berry", Item::AguavBerry),
    ("Iapapa Berry", Item::IapapaBerry),
    ("Sitrus Berry", Item::SitrusBerry),
];

impl Item {
    pub fn name(&self) -> &'static str {
        if let Item::Plate(plate_type) = self {
            return PLATES
                .iter()
                .find(|(_, t)| t == plate_type)
                .map(|(name, _)| *name)
                .unwrap_or("Plate");
        }
        NAMED
            .iter()
            .find(|(_, item)| item == self)
            .map(|(name, _)| *name)
            .unwrap_or("Item")
    }

    /// Berries restoring half of max HP once the holder drops to a quarter.
    pub fn is_pinch_berry(&self) -> bool {
        matches!(
            self,
            Item::FigyBerry | Item::WikiBerry | Item::MagoBerry | Item::AguavBerry | Item::IapapaBerry
        )
    }

    /// Items that raise the holder's critical-hit stage by one.
    pub fn boosts_crit(&self) -> bool {
        matches!(self, Item::ScopeLens | Item::RazorClaw)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownItem(pub String);

impl fmt::Display for UnknownItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown item: {}", self.0)
    }
}

impl std::error::Error for UnknownItem {}

impl FromStr for Item {
    type Err = UnknownItem;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PLATES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(wanted))
            .map(|(_, t)| Item::Plate(*t))
            .or_else(|| {
                NAMED
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(wanted))
                    .map(|(_, item)| *item)
            })
            .ok_or_else(|| UnknownItem(s.to_string()))
    }
}
