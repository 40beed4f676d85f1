use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Every move the engine can resolve. Display and parsing use the in-game name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter, EnumString, Display,
)]
pub enum Move {
    Tackle,
    Scratch,
    #[strum(to_string = "Quick Attack")]
    QuickAttack,
    #[strum(to_string = "Extreme Speed")]
    ExtremeSpeed,
    #[strum(to_string = "Body Slam")]
    BodySlam,
    #[strum(to_string = "Double-Edge")]
    DoubleEdge,
    #[strum(to_string = "Hyper Voice")]
    HyperVoice,
    Facade,
    Slash,
    #[strum(to_string = "Super Fang")]
    SuperFang,
    #[strum(to_string = "Sonic Boom")]
    SonicBoom,
    Guillotine,
    #[strum(to_string = "Horn Drill")]
    HornDrill,
    #[strum(to_string = "Rapid Spin")]
    RapidSpin,
    Thrash,
    #[strum(to_string = "Self-Destruct")]
    SelfDestruct,
    Explosion,
    Growl,
    Leer,
    #[strum(to_string = "Tail Whip")]
    TailWhip,
    Screech,
    #[strum(to_string = "Scary Face")]
    ScaryFace,
    Tickle,
    #[strum(to_string = "Noble Roar")]
    NobleRoar,
    #[strum(to_string = "Swords Dance")]
    SwordsDance,
    Growth,
    #[strum(to_string = "Work Up")]
    WorkUp,
    #[strum(to_string = "Shell Smash")]
    ShellSmash,
    #[strum(to_string = "Double Team")]
    DoubleTeam,
    Minimize,
    #[strum(to_string = "Focus Energy")]
    FocusEnergy,
    Protect,
    Substitute,
    Recover,
    #[strum(to_string = "Soft-Boiled")]
    SoftBoiled,
    #[strum(to_string = "Slack Off")]
    SlackOff,
    #[strum(to_string = "Milk Drink")]
    MilkDrink,
    #[strum(to_string = "Morning Sun")]
    MorningSun,
    Wish,
    Roar,
    Glare,
    Sing,
    #[strum(to_string = "Lovely Kiss")]
    LovelyKiss,
    Yawn,
    Supersonic,
    Swagger,
    Attract,
    Disable,
    Encore,
    #[strum(to_string = "Baton Pass")]
    BatonPass,
    #[strum(to_string = "Court Change")]
    CourtChange,
    Splash,
    Struggle,
    Ember,
    Flamethrower,
    #[strum(to_string = "Fire Blast")]
    FireBlast,
    #[strum(to_string = "Flare Blitz")]
    FlareBlitz,
    #[strum(to_string = "Fire Punch")]
    FirePunch,
    #[strum(to_string = "Fire Spin")]
    FireSpin,
    #[strum(to_string = "Will-O-Wisp")]
    WillOWisp,
    #[strum(to_string = "Sunny Day")]
    SunnyDay,
    #[strum(to_string = "G-Max Wildfire")]
    GMaxWildfire,
    Surf,
    #[strum(to_string = "Hydro Pump")]
    HydroPump,
    Waterfall,
    #[strum(to_string = "Aqua Jet")]
    AquaJet,
    Scald,
    #[strum(to_string = "Flip Turn")]
    FlipTurn,
    Whirlpool,
    #[strum(to_string = "Rain Dance")]
    RainDance,
    #[strum(to_string = "Aqua Ring")]
    AquaRing,
    #[strum(to_string = "G-Max Cannonade")]
    GMaxCannonade,
    Thunderbolt,
    Thunder,
    #[strum(to_string = "Wild Charge")]
    WildCharge,
    #[strum(to_string = "Volt Switch")]
    VoltSwitch,
    #[strum(to_string = "Thunder Punch")]
    ThunderPunch,
    #[strum(to_string = "Thunder Wave")]
    ThunderWave,
    #[strum(to_string = "Electric Terrain")]
    ElectricTerrain,
    #[strum(to_string = "Energy Ball")]
    EnergyBall,
    #[strum(to_string = "Giga Drain")]
    GigaDrain,
    #[strum(to_string = "Wood Hammer")]
    WoodHammer,
    #[strum(to_string = "Solar Beam")]
    SolarBeam,
    #[strum(to_string = "Leaf Blade")]
    LeafBlade,
    #[strum(to_string = "Petal Dance")]
    PetalDance,
    #[strum(to_string = "Bullet Seed")]
    BulletSeed,
    #[strum(to_string = "Stun Spore")]
    StunSpore,
    #[strum(to_string = "Sleep Powder")]
    SleepPowder,
    Spore,
    #[strum(to_string = "Leech Seed")]
    LeechSeed,
    #[strum(to_string = "Cotton Spore")]
    CottonSpore,
    #[strum(to_string = "Cotton Guard")]
    CottonGuard,
    Synthesis,
    #[strum(to_string = "Grassy Terrain")]
    GrassyTerrain,
    #[strum(to_string = "Spiky Shield")]
    SpikyShield,
    #[strum(to_string = "G-Max Vine Lash")]
    GMaxVineLash,
    #[strum(to_string = "Ice Beam")]
    IceBeam,
    Blizzard,
    #[strum(to_string = "Ice Shard")]
    IceShard,
    #[strum(to_string = "Ice Punch")]
    IcePunch,
    #[strum(to_string = "Icicle Spear")]
    IcicleSpear,
    #[strum(to_string = "Sheer Cold")]
    SheerCold,
    Hail,
    #[strum(to_string = "Aurora Veil")]
    AuroraVeil,
    Haze,
    #[strum(to_string = "Close Combat")]
    CloseCombat,
    #[strum(to_string = "Brick Break")]
    BrickBreak,
    #[strum(to_string = "Cross Chop")]
    CrossChop,
    #[strum(to_string = "Drain Punch")]
    DrainPunch,
    #[strum(to_string = "Focus Punch")]
    FocusPunch,
    #[strum(to_string = "Body Press")]
    BodyPress,
    #[strum(to_string = "Secret Sword")]
    SecretSword,
    #[strum(to_string = "Mach Punch")]
    MachPunch,
    #[strum(to_string = "Double Kick")]
    DoubleKick,
    #[strum(to_string = "Seismic Toss")]
    SeismicToss,
    #[strum(to_string = "Final Gambit")]
    FinalGambit,
    #[strum(to_string = "Circle Throw")]
    CircleThrow,
    #[strum(to_string = "Bulk Up")]
    BulkUp,
    Detect,
    #[strum(to_string = "Sludge Bomb")]
    SludgeBomb,
    #[strum(to_string = "Poison Jab")]
    PoisonJab,
    #[strum(to_string = "Poison Tail")]
    PoisonTail,
    Toxic,
    #[strum(to_string = "Poison Powder")]
    PoisonPowder,
    #[strum(to_string = "Toxic Spikes")]
    ToxicSpikes,
    #[strum(to_string = "Acid Armor")]
    AcidArmor,
    Coil,
    #[strum(to_string = "Baneful Bunker")]
    BanefulBunker,
    Earthquake,
    Bulldoze,
    Magnitude,
    #[strum(to_string = "Earth Power")]
    EarthPower,
    Bonemerang,
    Fissure,
    Spikes,
    #[strum(to_string = "Sand Attack")]
    SandAttack,
    #[strum(to_string = "Shore Up")]
    ShoreUp,
    #[strum(to_string = "Air Slash")]
    AirSlash,
    #[strum(to_string = "Brave Bird")]
    BraveBird,
    Hurricane,
    Tailwind,
    Defog,
    Roost,
    #[strum(to_string = "Feather Dance")]
    FeatherDance,
    Whirlwind,
    Psychic,
    Psyshock,
    Psystrike,
    #[strum(to_string = "Zen Headbutt")]
    ZenHeadbutt,
    #[strum(to_string = "Calm Mind")]
    CalmMind,
    Amnesia,
    Agility,
    #[strum(to_string = "Cosmic Power")]
    CosmicPower,
    Barrier,
    Hypnosis,
    Reflect,
    #[strum(to_string = "Light Screen")]
    LightScreen,
    Rest,
    #[strum(to_string = "Trick Room")]
    TrickRoom,
    Gravity,
    #[strum(to_string = "Magic Room")]
    MagicRoom,
    #[strum(to_string = "Wonder Room")]
    WonderRoom,
    #[strum(to_string = "Psychic Terrain")]
    PsychicTerrain,
    #[strum(to_string = "Bug Buzz")]
    BugBuzz,
    #[strum(to_string = "U-turn")]
    UTurn,
    #[strum(to_string = "X-Scissor")]
    XScissor,
    #[strum(to_string = "Quiver Dance")]
    QuiverDance,
    #[strum(to_string = "String Shot")]
    StringShot,
    #[strum(to_string = "Sticky Web")]
    StickyWeb,
    #[strum(to_string = "Heal Order")]
    HealOrder,
    #[strum(to_string = "Defend Order")]
    DefendOrder,
    #[strum(to_string = "Silk Trap")]
    SilkTrap,
    #[strum(to_string = "Rock Slide")]
    RockSlide,
    #[strum(to_string = "Stone Edge")]
    StoneEdge,
    #[strum(to_string = "Head Smash")]
    HeadSmash,
    #[strum(to_string = "Rock Blast")]
    RockBlast,
    #[strum(to_string = "Salt Cure")]
    SaltCure,
    #[strum(to_string = "Stealth Rock")]
    StealthRock,
    #[strum(to_string = "Rock Polish")]
    RockPolish,
    Sandstorm,
    #[strum(to_string = "G-Max Volcalith")]
    GMaxVolcalith,
    #[strum(to_string = "Shadow Ball")]
    ShadowBall,
    #[strum(to_string = "Shadow Claw")]
    ShadowClaw,
    #[strum(to_string = "Shadow Sneak")]
    ShadowSneak,
    #[strum(to_string = "Night Shade")]
    NightShade,
    #[strum(to_string = "Confuse Ray")]
    ConfuseRay,
    Curse,
    #[strum(to_string = "Dragon Claw")]
    DragonClaw,
    Outrage,
    #[strum(to_string = "Draco Meteor")]
    DracoMeteor,
    #[strum(to_string = "Dragon Tail")]
    DragonTail,
    #[strum(to_string = "Dragon Rage")]
    DragonRage,
    #[strum(to_string = "Dragon Dance")]
    DragonDance,
    #[strum(to_string = "Dark Pulse")]
    DarkPulse,
    Crunch,
    #[strum(to_string = "Night Slash")]
    NightSlash,
    #[strum(to_string = "Foul Play")]
    FoulPlay,
    #[strum(to_string = "Nasty Plot")]
    NastyPlot,
    #[strum(to_string = "Hone Claws")]
    HoneClaws,
    Taunt,
    Torment,
    #[strum(to_string = "Parting Shot")]
    PartingShot,
    #[strum(to_string = "Fake Tears")]
    FakeTears,
    #[strum(to_string = "Dark Void")]
    DarkVoid,
    Memento,
    Obstruct,
    #[strum(to_string = "Flash Cannon")]
    FlashCannon,
    #[strum(to_string = "Iron Head")]
    IronHead,
    #[strum(to_string = "Bullet Punch")]
    BulletPunch,
    #[strum(to_string = "Iron Defense")]
    IronDefense,
    #[strum(to_string = "Metal Sound")]
    MetalSound,
    #[strum(to_string = "Shift Gear")]
    ShiftGear,
    Autotomize,
    #[strum(to_string = "King's Shield")]
    KingsShield,
    #[strum(to_string = "G-Max Steelsurge")]
    GMaxSteelsurge,
    Moonblast,
    #[strum(to_string = "Play Rough")]
    PlayRough,
    #[strum(to_string = "Dazzling Gleam")]
    DazzlingGleam,
    Charm,
    #[strum(to_string = "Misty Terrain")]
    MistyTerrain,
    Moonlight,
}

/// How a fixed-damage move decides its damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedDamage {
    /// Equal to the user's level.
    Level,
    Flat(u16),
    /// Half of the target's current HP.
    HalfTargetHp,
    /// All of the user's current HP; the user faints.
    UserHp,
    /// One-hit knockout.
    TargetHp,
}

impl Move {
    pub fn fixed_damage(self) -> Option<FixedDamage> {
        match self {
            Move::SeismicToss | Move::NightShade => Some(FixedDamage::Level),
            Move::DragonRage => Some(FixedDamage::Flat(40)),
            Move::SonicBoom => Some(FixedDamage::Flat(20)),
            Move::SuperFang => Some(FixedDamage::HalfTargetHp),
            Move::FinalGambit => Some(FixedDamage::UserHp),
            Move::SheerCold | Move::Fissure | Move::Guillotine | Move::HornDrill => {
                Some(FixedDamage::TargetHp)
            }
            _ => None,
        }
    }

    /// Moves with a raised critical-hit stage.
    pub fn is_high_crit(self) -> bool {
        matches!(
            self,
            Move::Slash
                | Move::NightSlash
                | Move::ShadowClaw
                | Move::CrossChop
                | Move::PoisonTail
                | Move::LeafBlade
                | Move::StoneEdge
        )
    }

    pub fn makes_contact(self) -> bool {
        matches!(
            self,
            Move::Tackle
                | Move::Scratch
                | Move::Struggle
                | Move::QuickAttack
                | Move::ExtremeSpeed
                | Move::BodySlam
                | Move::DoubleEdge
                | Move::Facade
                | Move::Slash
                | Move::SuperFang
                | Move::Guillotine
                | Move::HornDrill
                | Move::RapidSpin
                | Move::Thrash
                | Move::FlareBlitz
                | Move::FirePunch
                | Move::Waterfall
                | Move::AquaJet
                | Move::FlipTurn
                | Move::WildCharge
                | Move::ThunderPunch
                | Move::WoodHammer
                | Move::LeafBlade
                | Move::PetalDance
                | Move::IcePunch
                | Move::CloseCombat
                | Move::BrickBreak
                | Move::CrossChop
                | Move::DrainPunch
                | Move::FocusPunch
                | Move::BodyPress
                | Move::MachPunch
                | Move::DoubleKick
                | Move::SeismicToss
                | Move::FinalGambit
                | Move::CircleThrow
                | Move::PoisonJab
                | Move::PoisonTail
                | Move::BraveBird
                | Move::ZenHeadbutt
                | Move::UTurn
                | Move::XScissor
                | Move::HeadSmash
                | Move::ShadowClaw
                | Move::ShadowSneak
                | Move::DragonClaw
                | Move::Outrage
                | Move::DragonTail
                | Move::Crunch
                | Move::NightSlash
                | Move::FoulPlay
                | Move::IronHead
                | Move::BulletPunch
                | Move::PlayRough
        )
    }

    /// Fraction of damage dealt returned to the user as recoil.
    pub fn recoil(self) -> Option<(u16, u16)> {
        match self {
            Move::DoubleEdge | Move::FlareBlitz | Move::BraveBird | Move::WoodHammer => Some((1, 3)),
            Move::WildCharge | Move::HeadSmash => Some((1, 4)),
            _ => None,
        }
    }

    /// Fraction of damage dealt restored to the user.
    pub fn drain(self) -> Option<(u16, u16)> {
        match self {
            Move::GigaDrain | Move::DrainPunch => Some((1, 2)),
            _ => None,
        }
    }

    pub fn is_protect(self) -> bool {
        matches!(
            self,
            Move::Protect
                | Move::Detect
                | Move::KingsShield
                | Move::SpikyShield
                | Move::BanefulBunker
                | Move::Obstruct
                | Move::SilkTrap
        )
    }

    /// Sound moves pass through a substitute.
    pub fn is_sound(self) -> bool {
        matches!(
            self,
            Move::Growl
                | Move::Screech
                | Move::NobleRoar
                | Move::Roar
                | Move::Sing
                | Move::Supersonic
                | Move::MetalSound
                | Move::HyperVoice
                | Move::BugBuzz
        )
    }

    pub fn is_powder(self) -> bool {
        matches!(
            self,
            Move::StunSpore | Move::SleepPowder | Move::Spore | Move::PoisonPowder | Move::CottonSpore
        )
    }

    /// Multi-turn moves that lock the user in and end in confusion.
    pub fn is_rampage(self) -> bool {
        matches!(self, Move::Outrage | Move::Thrash | Move::PetalDance)
    }

    /// Two-turn moves that charge first unless the weather allows an immediate release.
    pub fn is_charging(self) -> bool {
        matches!(self, Move::SolarBeam)
    }

    /// Moves that switch the user out once they resolve.
    pub fn is_pivot(self) -> bool {
        matches!(
            self,
            Move::UTurn | Move::VoltSwitch | Move::FlipTurn | Move::PartingShot
        )
    }

    /// The user faints after using the move.
    pub fn is_self_destruct(self) -> bool {
        matches!(self, Move::SelfDestruct | Move::Explosion | Move::FinalGambit)
    }

    /// Moves that hit every opponent in a double battle.
    pub fn is_spread(self) -> bool {
        matches!(
            self,
            Move::Earthquake
                | Move::Surf
                | Move::HyperVoice
                | Move::RockSlide
                | Move::DazzlingGleam
                | Move::Bulldoze
                | Move::Magnitude
                | Move::Blizzard
                | Move::Explosion
                | Move::SelfDestruct
        )
    }

    /// Weather in which the move cannot miss.
    pub fn perfect_accuracy_weather(self) -> Option<crate::Weather> {
        match self {
            Move::Thunder | Move::Hurricane => Some(crate::Weather::Rain),
            Move::Blizzard => Some(crate::Weather::Hail),
            _ => None,
        }
    }

    /// Moves that thaw a frozen user.
    pub fn thaws_user(self) -> bool {
        matches!(self, Move::FlareBlitz | Move::Scald)
    }
}
