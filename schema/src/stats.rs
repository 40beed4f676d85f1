use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The six permanent stats of a species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Display)]
pub enum Stat {
    Hp,
    Attack,
    Defense,
    #[strum(to_string = "Sp. Atk")]
    SpecialAttack,
    #[strum(to_string = "Sp. Def")]
    SpecialDefense,
    Speed,
}

/// Stats that carry an in-battle stage counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Display)]
pub enum StageStat {
    Attack,
    Defense,
    #[strum(to_string = "Sp. Atk")]
    SpecialAttack,
    #[strum(to_string = "Sp. Def")]
    SpecialDefense,
    Speed,
    Accuracy,
    Evasion,
}

impl Stat {
    pub fn stage(self) -> Option<StageStat> {
        match self {
            Stat::Hp => None,
            Stat::Attack => Some(StageStat::Attack),
            Stat::Defense => Some(StageStat::Defense),
            Stat::SpecialAttack => Some(StageStat::SpecialAttack),
            Stat::SpecialDefense => Some(StageStat::SpecialDefense),
            Stat::Speed => Some(StageStat::Speed),
        }
    }
}

/// A value for each of the six stats. Used for base stats, IVs and EVs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatBlock {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub sp_attack: u16,
    pub sp_defense: u16,
    pub speed: u16,
}

impl StatBlock {
    pub const fn new(hp: u16, attack: u16, defense: u16, sp_attack: u16, sp_defense: u16, speed: u16) -> Self {
        Self {
            hp,
            attack,
            defense,
            sp_attack,
            sp_defense,
            speed,
        }
    }

    pub const fn uniform(value: u16) -> Self {
        Self::new(value, value, value, value, value, value)
    }

    pub fn get(&self, stat: Stat) -> u16 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::SpecialAttack => self.sp_attack,
            Stat::SpecialDefense => self.sp_defense,
            Stat::Speed => self.speed,
        }
    }

    pub fn set(&mut self, stat: Stat, value: u16) {
        match stat {
            Stat::Hp => self.hp = value,
            Stat::Attack => self.attack = value,
            Stat::Defense => self.defense = value,
            Stat::SpecialAttack => self.sp_attack = value,
            Stat::SpecialDefense => self.sp_defense = value,
            Stat::Speed => self.speed = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter, EnumString, Display)]
pub enum Nature {
    #[default]
    Hardy,
    Lonely,
    Brave,
    Adamant,
    Naughty,
    Bold,
    Docile,
    Relaxed,
    Impish,
    Lax,
    Timid,
    Hasty,
    Serious,
    Jolly,
    Naive,
    Modest,
    Mild,
    Quiet,
    Bashful,
    Rash,
    Calm,
    Gentle,
    Sassy,
    Careful,
    Quirky,
}

impl Nature {
    /// The (raised, lowered) stat pair, or `None` for the five neutral natures.
    pub fn modifiers(self) -> Option<(Stat, Stat)> {
        use Nature::*;
        use Stat::*;
        let pair = match self {
            Hardy | Docile | Serious | Bashful | Quirky => return None,
            Lonely => (Attack, Defense),
            Brave => (Attack, Speed),
            Adamant => (Attack, SpecialAttack),
            Naughty => (Attack, SpecialDefense),
            Bold => (Defense, Attack),
            Relaxed => (Defense, Speed),
            Impish => (Defense, SpecialAttack),
            Lax => (Defense, SpecialDefense),
            Timid => (Speed, Attack),
            Hasty => (Speed, Defense),
            Jolly => (Speed, SpecialAttack),
            Naive => (Speed, SpecialDefense),
            Modest => (SpecialAttack, Attack),
            Mild => (SpecialAttack, Defense),
            Quiet => (SpecialAttack, Speed),
            Rash => (SpecialAttack, SpecialDefense),
            Calm => (SpecialDefense, Attack),
            Gentle => (SpecialDefense, Defense),
            Sassy => (SpecialDefense, Speed),
            Careful => (SpecialDefense, SpecialAttack),
        };
        Some(pair)
    }

    /// Percentage applied to `stat`: 110, 90 or 100.
    pub fn percent(self, stat: Stat) -> u32 {
        match self.modifiers() {
            Some((up, _)) if up == stat => 110,
            Some((_, down)) if down == stat => 90,
            _ => 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_nature_is_neutral_or_a_distinct_pair() {
        let neutral = Nature::iter().filter(|n| n.modifiers().is_none()).count();
        assert_eq!(neutral, 5);
        for nature in Nature::iter() {
            if let Some((up, down)) = nature.modifiers() {
                assert_ne!(up, down);
                assert_ne!(up, Stat::Hp);
                assert_ne!(down, Stat::Hp);
            }
        }
    }

    #[test]
    fn adamant_percentages() {
        assert_eq!(Nature::Adamant.percent(Stat::Attack), 110);
        assert_eq!(Nature::Adamant.percent(Stat::SpecialAttack), 90);
        assert_eq!(Nature::Adamant.percent(Stat::Speed), 100);
    }
}
