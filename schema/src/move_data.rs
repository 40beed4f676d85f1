use crate::{Move, PokemonType};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

impl fmt::Display for MoveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveCategory::Physical => write!(f, "Physical"),
            MoveCategory::Special => write!(f, "Special"),
            MoveCategory::Status => write!(f, "Status"),
        }
    }
}

/// Per-move battle data as supplied by a move data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveData {
    #[serde(rename = "move")]
    pub move_: Move,
    pub move_type: PokemonType,
    pub category: MoveCategory,
    pub power: u16,
    /// `None` never misses.
    pub accuracy: Option<u8>,
    pub pp: u8,
    pub priority: i8,
    /// Inclusive hit range, `(1, 1)` for single-hit moves.
    pub multi_hit: (u8, u8),
    pub effect_chance: u8,
    pub target_def_halved: bool,
    pub has_secondary: bool,
}

impl MoveData {
    pub fn is_damaging(&self) -> bool {
        self.category != MoveCategory::Status
    }
}

impl Move {
    /// Standard data for this move.
    pub fn data(self) -> MoveData {
        use Move::*;
        use MoveCategory::*;
        use PokemonType as T;

        let (move_type, category, power, accuracy, pp, priority) = match self {
            Tackle => (T::Normal, Physical, 40, Some(100), 35, 0),
            Scratch => (T::Normal, Physical, 40, Some(100), 35, 0),
            QuickAttack => (T::Normal, Physical, 40, Some(100), 30, 1),
            ExtremeSpeed => (T::Normal, Physical, 80, Some(100), 5, 2),
            BodySlam => (T::Normal, Physical, 85, Some(100), 15, 0),
            DoubleEdge => (T::Normal, Physical, 120, Some(100), 15, 0),
            HyperVoice => (T::Normal, Special, 90, Some(100), 10, 0),
            Facade => (T::Normal, Physical, 70, Some(100), 20, 0),
            Slash => (T::Normal, Physical, 70, Some(100), 20, 0),
            SuperFang => (T::Normal, Physical, 0, Some(90), 10, 0),
            SonicBoom => (T::Normal, Special, 0, Some(90), 20, 0),
            Guillotine => (T::Normal, Physical, 0, Some(30), 5, 0),
            HornDrill => (T::Normal, Physical, 0, Some(30), 5, 0),
            RapidSpin => (T::Normal, Physical, 50, Some(100), 40, 0),
            Thrash => (T::Normal, Physical, 120, Some(100), 10, 0),
            SelfDestruct => (T::Normal, Physical, 200, Some(100), 5, 0),
            Explosion => (T::Normal, Physical, 250, Some(100), 5, 0),
            Growl => (T::Normal, Status, 0, Some(100), 40, 0),
            Leer => (T::Normal, Status, 0, Some(100), 30, 0),
            TailWhip => (T::Normal, Status, 0, Some(100), 30, 0),
            Screech => (T::Normal, Status, 0, Some(85), 40, 0),
            ScaryFace => (T::Normal, Status, 0, Some(100), 10, 0),
            Tickle => (T::Normal, Status, 0, Some(100), 20, 0),
            NobleRoar => (T::Normal, Status, 0, Some(100), 30, 0),
            SwordsDance => (T::Normal, Status, 0, None, 20, 0),
            Growth => (T::Normal, Status, 0, None, 20, 0),
            WorkUp => (T::Normal, Status, 0, None, 30, 0),
            ShellSmash => (T::Normal, Status, 0, None, 15, 0),
            DoubleTeam => (T::Normal, Status, 0, None, 15, 0),
            Minimize => (T::Normal, Status, 0, None, 10, 0),
            FocusEnergy => (T::Normal, Status, 0, None, 30, 0),
            Protect => (T::Normal, Status, 0, None, 10, 4),
            Substitute => (T::Normal, Status, 0, None, 10, 0),
            Recover => (T::Normal, Status, 0, None, 5, 0),
            SoftBoiled => (T::Normal, Status, 0, None, 5, 0),
            SlackOff => (T::Normal, Status, 0, None, 5, 0),
            MilkDrink => (T::Normal, Status, 0, None, 5, 0),
            MorningSun => (T::Normal, Status, 0, None, 5, 0),
            Wish => (T::Normal, Status, 0, None, 10, 0),
            Roar => (T::Normal, Status, 0, None, 20, -6),
            Glare => (T::Normal, Status, 0, Some(100), 30, 0),
            Sing => (T::Normal, Status, 0, Some(55), 15, 0),
            LovelyKiss => (T::Normal, Status, 0, Some(75), 10, 0),
            Yawn => (T::Normal, Status, 0, None, 10, 0),
            Supersonic => (T::Normal, Status, 0, Some(55), 20, 0),
            Swagger => (T::Normal, Status, 0, Some(85), 15, 0),
            Attract => (T::Normal, Status, 0, Some(100), 15, 0),
            Disable => (T::Normal, Status, 0, Some(100), 20, 0),
            Encore => (T::Normal, Status, 0, Some(100), 5, 0),
            BatonPass => (T::Normal, Status, 0, None, 40, 0),
            CourtChange => (T::Normal, Status, 0, Some(100), 10, 0),
            Splash => (T::Normal, Status, 0, None, 40, 0),
            Struggle => (T::Typeless, Physical, 50, None, 1, 0),
            Ember => (T::Fire, Special, 40, Some(100), 25, 0),
            Flamethrower => (T::Fire, Special, 90, Some(100), 15, 0),
            FireBlast => (T::Fire, Special, 110, Some(85), 5, 0),
            FlareBlitz => (T::Fire, Physical, 120, Some(100), 15, 0),
            FirePunch => (T::Fire, Physical, 75, Some(100), 15, 0),
            FireSpin => (T::Fire, Special, 35, Some(85), 15, 0),
            WillOWisp => (T::Fire, Status, 0, Some(85), 15, 0),
            SunnyDay => (T::Fire, Status, 0, None, 5, 0),
            GMaxWildfire => (T::Fire, Special, 100, None, 5, 0),
            Surf => (T::Water, Special, 90, Some(100), 15, 0),
            HydroPump => (T::Water, Special, 110, Some(80), 5, 0),
            Waterfall => (T::Water, Physical, 80, Some(100), 15, 0),
            AquaJet => (T::Water, Physical, 40, Some(100), 20, 1),
            Scald => (T::Water, Special, 80, Some(100), 15, 0),
            FlipTurn => (T::Water, Physical, 60, Some(100), 20, 0),
            Whirlpool => (T::Water, Special, 35, Some(85), 15, 0),
            RainDance => (T::Water, Status, 0, None, 5, 0),
            AquaRing => (T::Water, Status, 0, None, 20, 0),
            GMaxCannonade => (T::Water, Special, 100, None, 5, 0),
            Thunderbolt => (T::Electric, Special, 90, Some(100), 15, 0),
            Thunder => (T::Electric, Special, 110, Some(70), 10, 0),
            WildCharge => (T::Electric, Physical, 90, Some(100), 15, 0),
            VoltSwitch => (T::Electric, Special, 70, Some(100), 20, 0),
            ThunderPunch => (T::Electric, Physical, 75, Some(100), 15, 0),
            ThunderWave => (T::Electric, Status, 0, Some(90), 20, 0),
            ElectricTerrain => (T::Electric, Status, 0, None, 10, 0),
            EnergyBall => (T::Grass, Special, 90, Some(100), 10, 0),
            GigaDrain => (T::Grass, Special, 75, Some(100), 10, 0),
            WoodHammer => (T::Grass, Physical, 120, Some(100), 15, 0),
            SolarBeam => (T::Grass, Special, 120, Some(100), 10, 0),
            LeafBlade => (T::Grass, Physical, 90, Some(100), 15, 0),
            PetalDance => (T::Grass, Special, 120, Some(100), 10, 0),
            BulletSeed => (T::Grass, Physical, 25, Some(100), 30, 0),
            StunSpore => (T::Grass, Status, 0, Some(75), 30, 0),
            SleepPowder => (T::Grass, Status, 0, Some(75), 15, 0),
            Spore => (T::Grass, Status, 0, Some(100), 15, 0),
            LeechSeed => (T::Grass, Status, 0, Some(90), 10, 0),
            CottonSpore => (T::Grass, Status, 0, Some(100), 40, 0),
            CottonGuard => (T::Grass, Status, 0, None, 10, 0),
            Synthesis => (T::Grass, Status, 0, None, 5, 0),
            GrassyTerrain => (T::Grass, Status, 0, None, 10, 0),
            SpikyShield => (T::Grass, Status, 0, None, 10, 4),
            GMaxVineLash => (T::Grass, Physical, 100, None, 5, 0),
            IceBeam => (T::Ice, Special, 90, Some(100), 10, 0),
            Blizzard => (T::Ice, Special, 110, Some(70), 5, 0),
            IceShard => (T::Ice, Physical, 40, Some(100), 30, 1),
            IcePunch => (T::Ice, Physical, 75, Some(100), 15, 0),
            IcicleSpear => (T::Ice, Physical, 25, Some(100), 30, 0),
            SheerCold => (T::Ice, Special, 0, Some(30), 5, 0),
            Hail => (T::Ice, Status, 0, None, 10, 0),
            AuroraVeil => (T::Ice, Status, 0, None, 20, 0),
            Haze => (T::Ice, Status, 0, None, 30, 0),
            CloseCombat => (T::Fighting, Physical, 120, Some(100), 5, 0),
            BrickBreak => (T::Fighting, Physical, 75, Some(100), 15, 0),
            CrossChop => (T::Fighting, Physical, 100, Some(80), 5, 0),
            DrainPunch => (T::Fighting, Physical, 75, Some(100), 10, 0),
            FocusPunch => (T::Fighting, Physical, 150, Some(100), 20, -3),
            BodyPress => (T::Fighting, Physical, 80, Some(100), 10, 0),
            SecretSword => (T::Fighting, Special, 85, Some(100), 10, 0),
            MachPunch => (T::Fighting, Physical, 40, Some(100), 30, 1),
            DoubleKick => (T::Fighting, Physical, 30, Some(100), 30, 0),
            SeismicToss => (T::Fighting, Physical, 0, Some(100), 20, 0),
            FinalGambit => (T::Fighting, Special, 0, Some(100), 5, 0),
            CircleThrow => (T::Fighting, Physical, 60, Some(90), 10, -6),
            BulkUp => (T::Fighting, Status, 0, None, 20, 0),
            Detect => (T::Fighting, Status, 0, None, 5, 4),
            SludgeBomb => (T::Poison, Special, 90, Some(100), 10, 0),
            PoisonJab => (T::Poison, Physical, 80, Some(100), 20, 0),
            PoisonTail => (T::Poison, Physical, 50, Some(100), 25, 0),
            Toxic => (T::Poison, Status, 0, Some(90), 10, 0),
            PoisonPowder => (T::Poison, Status, 0, Some(75), 35, 0),
            ToxicSpikes => (T::Poison, Status, 0, None, 20, 0),
            AcidArmor => (T::Poison, Status, 0, None, 20, 0),
            Coil => (T::Poison, Status, 0, None, 20, 0),
            BanefulBunker => (T::Poison, Status, 0, None, 10, 4),
            Earthquake => (T::Ground, Physical, 100, Some(100), 10, 0),
            Bulldoze => (T::Ground, Physical, 60, Some(100), 20, 0),
            Magnitude => (T::Ground, Physical, 70, Some(100), 30, 0),
            EarthPower => (T::Ground, Special, 90, Some(100), 10, 0),
            Bonemerang => (T::Ground, Physical, 50, Some(90), 10, 0),
            Fissure => (T::Ground, Physical, 0, Some(30), 5, 0),
            Spikes => (T::Ground, Status, 0, None, 20, 0),
            SandAttack => (T::Ground, Status, 0, Some(100), 15, 0),
            ShoreUp => (T::Ground, Status, 0, None, 5, 0),
            AirSlash => (T::Flying, Special, 75, Some(95), 15, 0),
            BraveBird => (T::Flying, Physical, 120, Some(100), 15, 0),
            Hurricane => (T::Flying, Special, 110, Some(70), 10, 0),
            Tailwind => (T::Flying, Status, 0, None, 15, 0),
            Defog => (T::Flying, Status, 0, None, 15, 0),
            Roost => (T::Flying, Status, 0, None, 5, 0),
            FeatherDance => (T::Flying, Status, 0, Some(100), 15, 0),
            Whirlwind => (T::Normal, Status, 0, None, 20, -6),
            Psychic => (T::Psychic, Special, 90, Some(100), 10, 0),
            Psyshock => (T::Psychic, Special, 80, Some(100), 10, 0),
            Psystrike => (T::Psychic, Special, 100, Some(100), 10, 0),
            ZenHeadbutt => (T::Psychic, Physical, 80, Some(90), 15, 0),
            CalmMind => (T::Psychic, Status, 0, None, 20, 0),
            Amnesia => (T::Psychic, Status, 0, None, 20, 0),
            Agility => (T::Psychic, Status, 0, None, 30, 0),
            CosmicPower => (T::Psychic, Status, 0, None, 20, 0),
            Barrier => (T::Psychic, Status, 0, None, 20, 0),
            Hypnosis => (T::Psychic, Status, 0, Some(60), 20, 0),
            Reflect => (T::Psychic, Status, 0, None, 20, 0),
            LightScreen => (T::Psychic, Status, 0, None, 30, 0),
            Rest => (T::Psychic, Status, 0, None, 5, 0),
            TrickRoom => (T::Psychic, Status, 0, None, 5, -7),
            Gravity => (T::Psychic, Status, 0, None, 5, 0),
            MagicRoom => (T::Psychic, Status, 0, None, 10, 0),
            WonderRoom => (T::Psychic, Status, 0, None, 10, 0),
            PsychicTerrain => (T::Psychic, Status, 0, None, 10, 0),
            BugBuzz => (T::Bug, Special, 90, Some(100), 10, 0),
            UTurn => (T::Bug, Physical, 70, Some(100), 20, 0),
            XScissor => (T::Bug, Physical, 80, Some(100), 15, 0),
            QuiverDance => (T::Bug, Status, 0, None, 20, 0),
            StringShot => (T::Bug, Status, 0, Some(95), 40, 0),
            StickyWeb => (T::Bug, Status, 0, None, 20, 0),
            HealOrder => (T::Bug, Status, 0, None, 10, 0),
            DefendOrder => (T::Bug, Status, 0, None, 10, 0),
            SilkTrap => (T::Bug, Status, 0, None, 10, 4),
            RockSlide => (T::Rock, Physical, 75, Some(90), 10, 0),
            StoneEdge => (T::Rock, Physical, 100, Some(80), 5, 0),
            HeadSmash => (T::Rock, Physical, 150, Some(80), 5, 0),
            RockBlast => (T::Rock, Physical, 25, Some(90), 10, 0),
            SaltCure => (T::Rock, Physical, 40, Some(100), 15, 0),
            StealthRock => (T::Rock, Status, 0, None, 20, 0),
            RockPolish => (T::Rock, Status, 0, None, 20, 0),
            Sandstorm => (T::Rock, Status, 0, None, 10, 0),
            GMaxVolcalith => (T::Rock, Physical, 100, None, 5, 0),
            ShadowBall => (T::Ghost, Special, 80, Some(100), 15, 0),
            ShadowClaw => (T::Ghost, Physical, 70, Some(100), 15, 0),
            ShadowSneak => (T::Ghost, Physical, 40, Some(100), 30, 1),
            NightShade => (T::Ghost, Special, 0, Some(100), 15, 0),
            ConfuseRay => (T::Ghost, Status, 0, Some(100), 10, 0),
            Curse => (T::Ghost, Status, 0, None, 10, 0),
            DragonClaw => (T::Dragon, Physical, 80, Some(100), 15, 0),
            Outrage => (T::Dragon, Physical, 120, Some(100), 10, 0),
            DracoMeteor => (T::Dragon, Special, 130, Some(90), 5, 0),
            DragonTail => (T::Dragon, Physical, 60, Some(90), 10, -6),
            DragonRage => (T::Dragon, Special, 0, Some(100), 10, 0),
            DragonDance => (T::Dragon, Status, 0, None, 20, 0),
            DarkPulse => (T::Dark, Special, 80, Some(100), 15, 0),
            Crunch => (T::Dark, Physical, 80, Some(100), 15, 0),
            NightSlash => (T::Dark, Physical, 70, Some(100), 15, 0),
            FoulPlay => (T::Dark, Physical, 95, Some(100), 15, 0),
            NastyPlot => (T::Dark, Status, 0, None, 20, 0),
            HoneClaws => (T::Dark, Status, 0, None, 15, 0),
            Taunt => (T::Dark, Status, 0, Some(100), 20, 0),
            Torment => (T::Dark, Status, 0, Some(100), 15, 0),
            PartingShot => (T::Dark, Status, 0, Some(100), 20, 0),
            FakeTears => (T::Dark, Status, 0, Some(100), 20, 0),
            DarkVoid => (T::Dark, Status, 0, Some(50), 10, 0),
            Memento => (T::Dark, Status, 0, Some(100), 10, 0),
            Obstruct => (T::Dark, Status, 0, None, 10, 4),
            FlashCannon => (T::Steel, Special, 80, Some(100), 10, 0),
            IronHead => (T::Steel, Physical, 80, Some(100), 15, 0),
            BulletPunch => (T::Steel, Physical, 40, Some(100), 30, 1),
            IronDefense => (T::Steel, Status, 0, None, 15, 0),
            MetalSound => (T::Steel, Status, 0, Some(85), 40, 0),
            ShiftGear => (T::Steel, Status, 0, None, 10, 0),
            Autotomize => (T::Steel, Status, 0, None, 15, 0),
            KingsShield => (T::Steel, Status, 0, None, 10, 4),
            GMaxSteelsurge => (T::Steel, Physical, 100, None, 5, 0),
            Moonblast => (T::Fairy, Special, 95, Some(100), 15, 0),
            PlayRough => (T::Fairy, Physical, 90, Some(90), 10, 0),
            DazzlingGleam => (T::Fairy, Special, 80, Some(100), 10, 0),
            Charm => (T::Fairy, Status, 0, Some(100), 20, 0),
            MistyTerrain => (T::Fairy, Status, 0, None, 10, 0),
            Moonlight => (T::Fairy, Status, 0, None, 5, 0),
        };

        let effect_chance = self.effect_chance();
        MoveData {
            move_: self,
            move_type,
            category,
            power,
            accuracy,
            pp,
            priority,
            multi_hit: self.hit_range(),
            effect_chance,
            target_def_halved: matches!(self, SelfDestruct | Explosion),
            has_secondary: effect_chance > 0,
        }
    }

    fn effect_chance(self) -> u8 {
        use Move::*;
        match self {
            Ember | Flamethrower | FireBlast | FlareBlitz | FirePunch | Thunderbolt
            | ThunderPunch | EnergyBall | IceBeam | Blizzard | IcePunch | PoisonTail
            | EarthPower | Psychic | BugBuzz | FlashCannon | PlayRough => 10,
            Waterfall | ZenHeadbutt | ShadowBall | DarkPulse | Crunch => 20,
            BodySlam | Scald | Thunder | SludgeBomb | PoisonJab | AirSlash | Hurricane
            | RockSlide | IronHead | Moonblast => 30,
            RapidSpin | Bulldoze => 100,
            _ => 0,
        }
    }

    fn hit_range(self) -> (u8, u8) {
        match self {
            Move::DoubleKick | Move::Bonemerang => (2, 2),
            Move::BulletSeed | Move::IcicleSpear | Move::RockBlast => (2, 5),
            _ => (1, 1),
        }
    }
}
