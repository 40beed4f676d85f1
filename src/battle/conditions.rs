use crate::battle::state::SideId;
use schema::Move;
use serde::{Deserialize, Serialize};

/// Names a volatile condition for events and effect specs.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VolatileKind {
    Confusion,
    Flinch,
    Taunt,
    Encore,
    Disable,
    Torment,
    Infatuation,
    LeechSeed,
    PartialTrap,
    SaltCure,
    Curse,
    FocusEnergy,
    AquaRing,
    Substitute,
    Protect,
    Charging,
    Rampage,
}

impl std::fmt::Display for VolatileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            VolatileKind::Confusion => "confusion",
            VolatileKind::Flinch => "flinch",
            VolatileKind::Taunt => "taunt",
            VolatileKind::Encore => "encore",
            VolatileKind::Disable => "disable",
            VolatileKind::Torment => "torment",
            VolatileKind::Infatuation => "infatuation",
            VolatileKind::LeechSeed => "leech seed",
            VolatileKind::PartialTrap => "trap",
            VolatileKind::SaltCure => "salt cure",
            VolatileKind::Curse => "curse",
            VolatileKind::FocusEnergy => "focus energy",
            VolatileKind::AquaRing => "aqua ring",
            VolatileKind::Substitute => "substitute",
            VolatileKind::Protect => "protection",
            VolatileKind::Charging => "charge",
            VolatileKind::Rampage => "rampage",
        };
        write!(f, "{}", name)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveTimer {
    pub move_: Move,
    pub turns_remaining: u8,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPunchState {
    /// Set at the start of the turn the move was chosen.
    Focusing,
    /// Hit while focusing; the punch fails.
    LostFocus,
}

/// Turn-scoped conditions on the active combatant. Everything here is
/// cleared when the combatant leaves the field.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Volatiles {
    /// Turns of confusion left.
    pub confusion: Option<u8>,
    pub taunt: Option<u8>,
    pub encore: Option<MoveTimer>,
    pub disable: Option<MoveTimer>,
    pub torment: bool,
    /// Team slot of the opposing combatant this one is infatuated with.
    pub infatuated_with: Option<usize>,
    /// Turns of partial trapping (Fire Spin, Whirlpool) left.
    pub partial_trap: Option<u8>,
    /// Rampage lock; `turns_remaining` counts uses after the current one.
    pub locked_move: Option<MoveTimer>,
    pub charging: Option<Move>,
    pub leech_seed: Option<SideId>,
    pub salt_cure: bool,
    /// Loses a quarter of max HP every turn.
    pub cursed: bool,
    pub protected: bool,
    pub protect_streak: u8,
    pub focus_punch: Option<FocusPunchState>,
    pub flinched: bool,
    pub focus_energy: bool,
    pub aqua_ring: bool,
    pub flash_fire: bool,
}

impl Volatiles {
    /// The subset of volatiles Baton Pass hands to the replacement.
    pub fn baton_pass_subset(&self) -> Volatiles {
        Volatiles {
            confusion: self.confusion,
            leech_seed: self.leech_seed,
            cursed: self.cursed,
            focus_energy: self.focus_energy,
            aqua_ring: self.aqua_ring,
            ..Volatiles::default()
        }
    }

    pub fn is_clear(&self) -> bool {
        *self == Volatiles::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baton_pass_drops_move_locks_and_taunt() {
        let volatiles = Volatiles {
            confusion: Some(2),
            taunt: Some(3),
            encore: Some(MoveTimer {
                move_: Move::Tackle,
                turns_remaining: 2,
            }),
            aqua_ring: true,
            focus_energy: true,
            ..Volatiles::default()
        };

        let passed = volatiles.baton_pass_subset();
        assert_eq!(passed.confusion, Some(2));
        assert!(passed.aqua_ring);
        assert!(passed.focus_energy);
        assert_eq!(passed.taunt, None);
        assert_eq!(passed.encore, None);
    }
}
