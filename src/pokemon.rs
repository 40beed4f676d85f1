use crate::battle::conditions::Volatiles;
use crate::battle::field::Field;
use crate::battle::stats::apply_stage;
use schema::{
    Ability, Item, Move, MoveData, Nature, PokemonType, SpeciesData, StageStat, Stat, StatBlock,
};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_STAGE: i8 = 6;
pub const MIN_STAGE: i8 = -6;
/// Toxic damage stops growing at 15/16 of max HP.
pub const TOXIC_CAP: u8 = 15;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCondition {
    Paralysis,
    Burn,
    Poison,
    /// Badly poisoned; the counter is the next tick's sixteenths of max HP.
    Toxic(u8),
    /// Turns left asleep. Wakes and acts when an action finds it at zero.
    Sleep(u8),
    Freeze,
}

impl StatusCondition {
    pub fn is_poison(&self) -> bool {
        matches!(self, StatusCondition::Poison | StatusCondition::Toxic(_))
    }
}

impl fmt::Display for StatusCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatusCondition::Paralysis => "paralysis",
            StatusCondition::Burn => "burn",
            StatusCondition::Poison => "poison",
            StatusCondition::Toxic(_) => "bad poison",
            StatusCondition::Sleep(_) => "sleep",
            StatusCondition::Freeze => "freeze",
        };
        write!(f, "{}", name)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

/// Stage counters, each kept in [-6, 6].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatStages {
    attack: i8,
    defense: i8,
    sp_attack: i8,
    sp_defense: i8,
    speed: i8,
    accuracy: i8,
    evasion: i8,
}

impl StatStages {
    pub fn get(&self, stat: StageStat) -> i8 {
        match stat {
            StageStat::Attack => self.attack,
            StageStat::Defense => self.defense,
            StageStat::SpecialAttack => self.sp_attack,
            StageStat::SpecialDefense => self.sp_defense,
            StageStat::Speed => self.speed,
            StageStat::Accuracy => self.accuracy,
            StageStat::Evasion => self.evasion,
        }
    }

    pub fn set(&mut self, stat: StageStat, value: i8) {
        let value = value.clamp(MIN_STAGE, MAX_STAGE);
        match stat {
            StageStat::Attack => self.attack = value,
            StageStat::Defense => self.defense = value,
            StageStat::SpecialAttack => self.sp_attack = value,
            StageStat::SpecialDefense => self.sp_defense = value,
            StageStat::Speed => self.speed = value,
            StageStat::Accuracy => self.accuracy = value,
            StageStat::Evasion => self.evasion = value,
        }
    }

    /// Adds `delta` with clamping and returns the change actually applied.
    pub fn change(&mut self, stat: StageStat, delta: i8) -> i8 {
        let old = self.get(stat);
        self.set(stat, old.saturating_add(delta));
        self.get(stat) - old
    }

    pub fn has_negative(&self) -> bool {
        [
            self.attack,
            self.defense,
            self.sp_attack,
            self.sp_defense,
            self.speed,
            self.accuracy,
            self.evasion,
        ]
        .iter()
        .any(|&s| s < 0)
    }

    /// Resets every lowered stage to zero, as White Herb does.
    pub fn clear_negative(&mut self) {
        for stage in [
            &mut self.attack,
            &mut self.defense,
            &mut self.sp_attack,
            &mut self.sp_defense,
            &mut self.speed,
            &mut self.accuracy,
            &mut self.evasion,
        ] {
            if *stage < 0 {
                *stage = 0;
            }
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveSlot {
    pub data: MoveData,
    pub pp: u8,
}

impl MoveSlot {
    pub fn new(data: MoveData) -> Self {
        Self { data, pp: data.pp }
    }

    pub fn move_(&self) -> Move {
        self.data.move_
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PokemonInst {
    pub name: String,
    pub level: u8,
    pub types: Vec<PokemonType>,
    pub base_stats: StatBlock,
    pub ivs: StatBlock,
    pub evs: StatBlock,
    pub nature: Nature,
    pub ability: Ability,
    pub item: Option<Item>,
    pub gender: Option<Gender>,
    pub moves: Vec<MoveSlot>,
    current_hp: u16,
    max_hp: u16,
    pub status: Option<StatusCondition>,
    pub stages: StatStages,
    pub substitute_hp: Option<u16>,
    pub volatiles: Volatiles,
    /// Set once a self-consuming ability such as Disguise has triggered.
    pub ability_spent: bool,
    pub last_move: Option<Move>,
}

impl PokemonInst {
    pub fn new(species: &SpeciesData, level: u8, moves: Vec<MoveData>) -> Self {
        let mut pokemon = Self {
            name: species.name.clone(),
            level,
            types: species.types.clone(),
            base_stats: species.base_stats,
            ivs: StatBlock::uniform(31),
            evs: StatBlock::default(),
            nature: Nature::default(),
            ability: species.abilities.first().copied().unwrap_or_default(),
            item: None,
            gender: None,
            moves: moves.into_iter().map(MoveSlot::new).collect(),
            current_hp: 0,
            max_hp: 0,
            status: None,
            stages: StatStages::default(),
            substitute_hp: None,
            volatiles: Volatiles::default(),
            ability_spent: false,
            last_move: None,
        };
        pokemon.recalculate_max_hp();
        pokemon.current_hp = pokemon.max_hp;
        pokemon
    }

    pub fn with_nature(mut self, nature: Nature) -> Self {
        self.nature = nature;
        self
    }

    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.ability = ability;
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.item = Some(item);
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn with_ivs(mut self, ivs: StatBlock) -> Self {
        self.ivs = ivs;
        self.recalculate_max_hp();
        self.current_hp = self.max_hp;
        self
    }

    pub fn with_evs(mut self, evs: StatBlock) -> Self {
        self.evs = evs;
        self.recalculate_max_hp();
        self.current_hp = self.max_hp;
        self
    }

    fn recalculate_max_hp(&mut self) {
        self.max_hp = self.raw_stat(Stat::Hp);
    }

    /// Stat value from base, IV, EV, level and nature, before stages.
    pub fn raw_stat(&self, stat: Stat) -> u16 {
        let base = self.base_stats.get(stat) as u32;
        let iv = self.ivs.get(stat) as u32;
        let ev = self.evs.get(stat) as u32 / 4;
        let level = self.level as u32;
        let core = (2 * base + iv + ev) * level / 100;

        let value = match stat {
            Stat::Hp if base == 1 => 1,
            Stat::Hp => core + level + 10,
            _ => (core + 5) * self.nature.percent(stat) / 100,
        };
        value.min(u16::MAX as u32) as u16
    }

    /// Stat value with an explicit stage applied. Never below 1.
    pub fn stat_at_stage(&self, stat: Stat, stage: i8) -> u16 {
        apply_stage(self.raw_stat(stat), stage).max(1)
    }

    /// Stat value with the combatant's current stage applied.
    pub fn stat(&self, stat: Stat) -> u16 {
        let stage = stat.stage().map_or(0, |s| self.stages.get(s));
        self.stat_at_stage(stat, stage)
    }

    pub fn current_hp(&self) -> u16 {
        self.current_hp
    }

    pub fn max_hp(&self) -> u16 {
        self.max_hp
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    pub fn is_full_hp(&self) -> bool {
        self.current_hp == self.max_hp
    }

    /// `max_hp * num / den`, at least 1.
    pub fn hp_fraction(&self, num: u16, den: u16) -> u16 {
        ((self.max_hp as u32 * num as u32 / den as u32) as u16).max(1)
    }

    pub fn set_hp(&mut self, hp: u16) {
        self.current_hp = hp.min(self.max_hp);
        if self.current_hp == 0 {
            self.faint();
        }
    }

    /// Applies damage and returns the amount actually removed.
    pub fn take_damage(&mut self, amount: u16) -> u16 {
        let dealt = amount.min(self.current_hp);
        self.current_hp -= dealt;
        if self.current_hp == 0 {
            self.faint();
        }
        dealt
    }

    /// Restores HP and returns the amount actually restored. Fainted combatants cannot heal.
    pub fn heal(&mut self, amount: u16) -> u16 {
        if self.is_fainted() {
            return 0;
        }
        let healed = amount.min(self.max_hp - self.current_hp);
        self.current_hp += healed;
        healed
    }

    /// A fainted combatant holds no status, volatiles or substitute.
    fn faint(&mut self) {
        self.current_hp = 0;
        self.status = None;
        self.volatiles = Volatiles::default();
        self.substitute_hp = None;
        self.stages = StatStages::default();
    }

    /// Resets everything that does not survive leaving the field.
    pub fn clear_field_state(&mut self) {
        self.volatiles = Volatiles::default();
        self.substitute_hp = None;
        self.stages = StatStages::default();
        self.last_move = None;
    }

    pub fn has_type(&self, pokemon_type: PokemonType) -> bool {
        self.types.contains(&pokemon_type)
    }

    /// The held item, unless Magic Room suppresses it.
    pub fn held_item(&self, field: &Field) -> Option<Item> {
        if field.magic_room > 0 {
            None
        } else {
            self.item
        }
    }

    pub fn is_grounded(&self, field: &Field) -> bool {
        if field.gravity > 0 {
            return true;
        }
        let item = self.held_item(field);
        if item == Some(Item::IronBall) {
            return true;
        }
        if item == Some(Item::AirBalloon) {
            return false;
        }
        !(self.has_type(PokemonType::Flying) || self.ability == Ability::Levitate)
    }

    pub fn move_slot(&self, move_: Move) -> Option<&MoveSlot> {
        self.moves.iter().find(|slot| slot.move_() == move_)
    }

    pub fn move_slot_mut(&mut self, move_: Move) -> Option<&mut MoveSlot> {
        self.moves.iter_mut().find(|slot| slot.move_() == move_)
    }

    pub fn usable_moves(&self) -> impl Iterator<Item = &MoveSlot> {
        self.moves.iter().filter(|slot| slot.pp > 0)
    }

    /// Whether HP is at or below `num / den` of max.
    pub fn hp_at_or_below(&self, num: u16, den: u16) -> bool {
        self.current_hp as u32 * den as u32 <= self.max_hp as u32 * num as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn species(base: StatBlock) -> SpeciesData {
        SpeciesData::new("Testmon", &[PokemonType::Normal], base)
    }

    #[test]
    fn gen3_stat_formula() {
        let mon = PokemonInst::new(&species(StatBlock::new(78, 84, 78, 109, 85, 100)), 50, vec![]);
        // HP: ((156 + 31) * 50 / 100) + 50 + 10
        assert_eq!(mon.max_hp(), 153);
        // SpA: ((218 + 31) * 50 / 100) + 5
        assert_eq!(mon.raw_stat(Stat::SpecialAttack), 129);
    }

    #[test]
    fn base_one_hp_is_always_one() {
        let mon = PokemonInst::new(&species(StatBlock::new(1, 80, 45, 30, 30, 40)), 100, vec![]);
        assert_eq!(mon.max_hp(), 1);
    }

    #[test]
    fn nature_applies_integer_percentages() {
        let base = StatBlock::new(80, 100, 80, 100, 80, 80);
        let neutral = PokemonInst::new(&species(base), 50, vec![]);
        let adamant = neutral.clone().with_nature(Nature::Adamant);
        assert_eq!(neutral.raw_stat(Stat::Attack), 120);
        assert_eq!(adamant.raw_stat(Stat::Attack), 132);
        assert_eq!(adamant.raw_stat(Stat::SpecialAttack), 108);
    }

    #[rstest]
    #[case(0, 100)]
    #[case(1, 150)]
    #[case(2, 200)]
    #[case(6, 400)]
    #[case(-1, 66)]
    #[case(-2, 50)]
    #[case(-6, 25)]
    fn stages_scale_stats(#[case] stage: i8, #[case] expected: u16) {
        assert_eq!(apply_stage(100, stage), expected);
    }

    #[test]
    fn stage_changes_clamp_and_report_applied_delta() {
        let mut stages = StatStages::default();
        assert_eq!(stages.change(StageStat::Attack, 4), 4);
        assert_eq!(stages.change(StageStat::Attack, 4), 2);
        assert_eq!(stages.get(StageStat::Attack), 6);
        assert_eq!(stages.change(StageStat::Attack, 1), 0);
        assert_eq!(stages.change(StageStat::Evasion, -8), -6);
    }

    #[test]
    fn fainting_clears_battle_state() {
        let mut mon = PokemonInst::new(&species(StatBlock::uniform(50)), 20, vec![]);
        mon.status = Some(StatusCondition::Burn);
        mon.substitute_hp = Some(5);
        mon.volatiles.confusion = Some(2);
        let hp = mon.current_hp();
        assert_eq!(mon.take_damage(hp + 10), hp);
        assert!(mon.is_fainted());
        assert_eq!(mon.status, None);
        assert_eq!(mon.substitute_hp, None);
        assert!(mon.volatiles.is_clear());
        assert_eq!(mon.heal(10), 0);
    }
}
