use super::{EffectKind, EffectSpec, EffectTarget, StatusKind};
use crate::battle::conditions::VolatileKind;
use crate::battle::field::{FieldEffect, GMaxResidual, Hazard, SideCondition};
use schema::{Move, StageStat, Terrain, Weather};

macro_rules! spec {
    ($target:ident, $kind:expr) => {
        spec!($target, $kind, 100)
    };
    ($target:ident, $kind:expr, $chance:expr) => {
        EffectSpec {
            target: EffectTarget::$target,
            kind: $kind,
            chance: $chance,
        }
    };
}

macro_rules! stage {
    ($stat:ident, $stages:expr) => {
        EffectKind::StatStage {
            stat: StageStat::$stat,
            stages: $stages,
        }
    };
}

use EffectKind::{Status, Volatile};
use StatusKind::*;

/// The ordered effect list for a move. Moves whose whole behaviour is
/// damage (or handled elsewhere, like pivots) have an empty list.
pub fn effects_for(move_: Move) -> &'static [EffectSpec] {
    use Move::*;
    match move_ {
        // Self boosts
        SwordsDance => &[spec!(User, stage!(Attack, 2))],
        Growth | WorkUp => &[spec!(User, stage!(Attack, 1)), spec!(User, stage!(SpecialAttack, 1))],
        ShellSmash => &[
            spec!(User, stage!(Defense, -1)),
            spec!(User, stage!(SpecialDefense, -1)),
            spec!(User, stage!(Attack, 2)),
            spec!(User, stage!(SpecialAttack, 2)),
            spec!(User, stage!(Speed, 2)),
        ],
        DoubleTeam => &[spec!(User, stage!(Evasion, 1))],
        Minimize => &[spec!(User, stage!(Evasion, 2))],
        FocusEnergy => &[spec!(User, Volatile(VolatileKind::FocusEnergy))],
        BulkUp => &[spec!(User, stage!(Attack, 1)), spec!(User, stage!(Defense, 1))],
        Coil => &[
            spec!(User, stage!(Attack, 1)),
            spec!(User, stage!(Defense, 1)),
            spec!(User, stage!(Accuracy, 1)),
        ],
        CalmMind => &[spec!(User, stage!(SpecialAttack, 1)), spec!(User, stage!(SpecialDefense, 1))],
        Amnesia => &[spec!(User, stage!(SpecialDefense, 2))],
        Agility | Autotomize | RockPolish => &[spec!(User, stage!(Speed, 2))],
        CosmicPower => &[spec!(User, stage!(Defense, 1)), spec!(User, stage!(SpecialDefense, 1))],
        Curse => &[spec!(User, EffectKind::Curse)],
        QuiverDance => &[
            spec!(User, stage!(SpecialAttack, 1)),
            spec!(User, stage!(SpecialDefense, 1)),
            spec!(User, stage!(Speed, 1)),
        ],
        DragonDance => &[spec!(User, stage!(Attack, 1)), spec!(User, stage!(Speed, 1))],
        NastyPlot => &[spec!(User, stage!(SpecialAttack, 2))],
        HoneClaws => &[spec!(User, stage!(Attack, 1)), spec!(User, stage!(Accuracy, 1))],
        IronDefense | AcidArmor | Barrier => &[spec!(User, stage!(Defense, 2))],
        CottonGuard => &[spec!(User, stage!(Defense, 3))],
        DefendOrder => &[spec!(User, stage!(Defense, 1)), spec!(User, stage!(SpecialDefense, 1))],
        ShiftGear => &[spec!(User, stage!(Attack, 1)), spec!(User, stage!(Speed, 2))],

        // Foe drops
        Growl => &[spec!(Foe, stage!(Attack, -1))],
        Leer | TailWhip => &[spec!(Foe, stage!(Defense, -1))],
        Screech => &[spec!(Foe, stage!(Defense, -2))],
        ScaryFace => &[spec!(Foe, stage!(Speed, -2))],
        Tickle => &[spec!(Foe, stage!(Attack, -1)), spec!(Foe, stage!(Defense, -1))],
        NobleRoar | PartingShot => &[
            spec!(Foe, stage!(Attack, -1)),
            spec!(Foe, stage!(SpecialAttack, -1)),
        ],
        FeatherDance | Charm => &[spec!(Foe, stage!(Attack, -2))],
        StringShot | CottonSpore => &[spec!(Foe, stage!(Speed, -2))],
        SandAttack => &[spec!(Foe, stage!(Accuracy, -1))],
        FakeTears | MetalSound => &[spec!(Foe, stage!(SpecialDefense, -2))],
        Memento => &[
            spec!(Foe, stage!(Attack, -2)),
            spec!(Foe, stage!(SpecialAttack, -2)),
            spec!(User, EffectKind::Faint),
        ],

        // Primary status
        Glare | ThunderWave | StunSpore => &[spec!(Foe, Status(Paralysis))],
        Sing | LovelyKiss | SleepPowder | Spore | Hypnosis | DarkVoid | Yawn => &[spec!(Foe, Status(Sleep))],
        Toxic => &[spec!(Foe, Status(StatusKind::Toxic))],
        PoisonPowder => &[spec!(Foe, Status(Poison))],
        WillOWisp => &[spec!(Foe, Status(Burn))],

        // Volatiles
        Supersonic | ConfuseRay => &[spec!(Foe, Volatile(VolatileKind::Confusion))],
        Swagger => &[
            spec!(Foe, stage!(Attack, 2)),
            spec!(Foe, Volatile(VolatileKind::Confusion)),
        ],
        Attract => &[spec!(Foe, Volatile(VolatileKind::Infatuation))],
        Disable => &[spec!(Foe, Volatile(VolatileKind::Disable))],
        Encore => &[spec!(Foe, Volatile(VolatileKind::Encore))],
        Taunt => &[spec!(Foe, Volatile(VolatileKind::Taunt))],
        Torment => &[spec!(Foe, Volatile(VolatileKind::Torment))],
        LeechSeed => &[spec!(Foe, Volatile(VolatileKind::LeechSeed))],
        AquaRing => &[spec!(User, Volatile(VolatileKind::AquaRing))],
        FireSpin | Whirlpool => &[spec!(Foe, Volatile(VolatileKind::PartialTrap))],
        SaltCure => &[spec!(Foe, Volatile(VolatileKind::SaltCure))],

        // Hazards
        Spikes => &[spec!(FoeSide, EffectKind::Hazard(Hazard::Spikes))],
        ToxicSpikes => &[spec!(FoeSide, EffectKind::Hazard(Hazard::ToxicSpikes))],
        StealthRock => &[spec!(FoeSide, EffectKind::Hazard(Hazard::StealthRock))],
        StickyWeb => &[spec!(FoeSide, EffectKind::Hazard(Hazard::StickyWeb))],
        GMaxSteelsurge => &[spec!(FoeSide, EffectKind::Hazard(Hazard::Steelsurge))],

        // Side conditions
        Reflect => &[spec!(UserSide, EffectKind::SideCondition(SideCondition::Reflect))],
        LightScreen => &[spec!(UserSide, EffectKind::SideCondition(SideCondition::LightScreen))],
        AuroraVeil => &[spec!(UserSide, EffectKind::SideCondition(SideCondition::AuroraVeil))],
        Tailwind => &[spec!(UserSide, EffectKind::SideCondition(SideCondition::Tailwind))],

        // Weather and terrain
        SunnyDay => &[spec!(Field, EffectKind::Weather(Weather::Sun))],
        RainDance => &[spec!(Field, EffectKind::Weather(Weather::Rain))],
        Sandstorm => &[spec!(Field, EffectKind::Weather(Weather::Sand))],
        Hail => &[spec!(Field, EffectKind::Weather(Weather::Hail))],
        ElectricTerrain => &[spec!(Field, EffectKind::Terrain(Terrain::Electric))],
        GrassyTerrain => &[spec!(Field, EffectKind::Terrain(Terrain::Grassy))],
        PsychicTerrain => &[spec!(Field, EffectKind::Terrain(Terrain::Psychic))],
        MistyTerrain => &[spec!(Field, EffectKind::Terrain(Terrain::Misty))],

        // Field-wide rooms
        TrickRoom => &[spec!(Field, EffectKind::FieldEffect(FieldEffect::TrickRoom))],
        Gravity => &[spec!(Field, EffectKind::FieldEffect(FieldEffect::Gravity))],
        MagicRoom => &[spec!(Field, EffectKind::FieldEffect(FieldEffect::MagicRoom))],
        WonderRoom => &[spec!(Field, EffectKind::FieldEffect(FieldEffect::WonderRoom))],

        // G-Max residuals
        GMaxWildfire => &[spec!(FoeSide, EffectKind::GMaxResidual(GMaxResidual::Wildfire))],
        GMaxCannonade => &[spec!(FoeSide, EffectKind::GMaxResidual(GMaxResidual::Cannonade))],
        GMaxVineLash => &[spec!(FoeSide, EffectKind::GMaxResidual(GMaxResidual::VineLash))],
        GMaxVolcalith => &[spec!(FoeSide, EffectKind::GMaxResidual(GMaxResidual::Volcalith))],

        // Protection and substitutes
        Protect | Detect | SpikyShield | BanefulBunker | KingsShield | Obstruct | SilkTrap => {
            &[spec!(User, EffectKind::Protect)]
        }
        Substitute => &[spec!(User, EffectKind::Substitute)],

        // Healing
        Recover | SoftBoiled | SlackOff | MilkDrink | Roost | ShoreUp | HealOrder | Wish => {
            &[spec!(User, EffectKind::Heal { num: 1, den: 2 })]
        }
        Synthesis | MorningSun | Moonlight => &[spec!(User, EffectKind::WeatherHeal)],
        Rest => &[spec!(User, EffectKind::Rest)],

        // Phazing
        Roar | Whirlwind => &[spec!(FoeSide, EffectKind::Phaze)],
        DragonTail | CircleThrow => &[spec!(Foe, EffectKind::Phaze)],

        // Field clearing
        Haze => &[spec!(Field, EffectKind::Haze)],
        Defog => &[spec!(Field, EffectKind::Defog)],
        CourtChange => &[spec!(Field, EffectKind::SwapSides)],

        // Damaging moves with secondaries
        Ember | Flamethrower | FireBlast | FlareBlitz | FirePunch => &[spec!(Foe, Status(Burn), 10)],
        Scald => &[spec!(Foe, Status(Burn), 30)],
        Thunderbolt | ThunderPunch => &[spec!(Foe, Status(Paralysis), 10)],
        Thunder | BodySlam => &[spec!(Foe, Status(Paralysis), 30)],
        IceBeam | Blizzard | IcePunch => &[spec!(Foe, Status(Freeze), 10)],
        PoisonTail => &[spec!(Foe, Status(Poison), 10)],
        SludgeBomb | PoisonJab => &[spec!(Foe, Status(Poison), 30)],
        EnergyBall | BugBuzz | EarthPower | Psychic | FlashCannon => {
            &[spec!(Foe, stage!(SpecialDefense, -1), 10)]
        }
        PlayRough => &[spec!(Foe, stage!(Attack, -1), 10)],
        Waterfall | ZenHeadbutt | DarkPulse => &[spec!(Foe, Volatile(VolatileKind::Flinch), 20)],
        Crunch => &[spec!(Foe, stage!(Defense, -1), 20)],
        ShadowBall => &[spec!(Foe, stage!(SpecialDefense, -1), 20)],
        AirSlash | RockSlide | IronHead => &[spec!(Foe, Volatile(VolatileKind::Flinch), 30)],
        Hurricane => &[spec!(Foe, Volatile(VolatileKind::Confusion), 30)],
        Moonblast => &[spec!(Foe, stage!(SpecialAttack, -1), 30)],
        RapidSpin => &[
            spec!(User, stage!(Speed, 1)),
            spec!(UserSide, EffectKind::ClearHazards),
        ],
        Bulldoze => &[spec!(Foe, stage!(Speed, -1))],

        // Self drops after attacking
        CloseCombat => &[
            spec!(User, stage!(Defense, -1)),
            spec!(User, stage!(SpecialDefense, -1)),
        ],
        DracoMeteor => &[spec!(User, stage!(SpecialAttack, -2))],

        _ => &[],
    }
}
