use crate::battle::conditions::VolatileKind;
use crate::battle::field::{Field, FieldEffect, Hazard, SideCondition};
use crate::config::BattleConfig;
use crate::player::BattlePlayer;
use crate::pokemon::{PokemonInst, StatusCondition};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use schema::{Ability, Item, Move, StageStat, Terrain, Weather};
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two sides of a battle.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SideId {
    /// The human-controlled side.
    Player,
    /// The AI-controlled side.
    Opponent,
}

impl SideId {
    pub const BOTH: [SideId; 2] = [SideId::Player, SideId::Opponent];

    pub fn opponent(self) -> SideId {
        match self {
            SideId::Player => SideId::Opponent,
            SideId::Opponent => SideId::Player,
        }
    }

    pub fn index(self) -> usize {
        match self {
            SideId::Player => 0,
            SideId::Opponent => 1,
        }
    }
}

/// Exactly one value per side, indexed by `SideId`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PerSide<T>([T; 2]);

impl<T> PerSide<T> {
    pub fn new(player: T, opponent: T) -> Self {
        Self([player, opponent])
    }

    /// Mutable access to `first` and the other side at once.
    pub fn pair_mut(&mut self, first: SideId) -> (&mut T, &mut T) {
        let [player, opponent] = &mut self.0;
        match first {
            SideId::Player => (player, opponent),
            SideId::Opponent => (opponent, player),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (SideId, &T)> {
        SideId::BOTH.into_iter().zip(self.0.iter())
    }
}

impl<T> Index<SideId> for PerSide<T> {
    type Output = T;

    fn index(&self, side: SideId) -> &T {
        &self.0[side.index()]
    }
}

impl<T> IndexMut<SideId> for PerSide<T> {
    fn index_mut(&mut self, side: SideId) -> &mut T {
        &mut self.0[side.index()]
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Copy)]
pub enum GameState {
    WaitingForActions,
    TurnInProgress,
    PlayerWin,
    OpponentWin,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionFailureReason {
    Asleep,
    Frozen,
    FullyParalyzed,
    Flinched,
    HurtItselfInConfusion,
    Infatuated,
    Disabled,
    Taunted,
    Tormented,
    PsychicTerrain,
    NoTarget,
    Charging,
    LostFocus,
    NoEffect,
    Failed,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResidualSource {
    Weather(Weather),
    Status(StatusCondition),
    LeechSeed,
    SaltCure,
    Curse,
    PartialTrap,
    GMax,
    Hazard(Hazard),
    Recoil,
    LifeOrb,
    Ability(Ability),
    Item(Item),
    Confusion,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Turn Management
    TurnStarted {
        turn_number: u32,
    },
    TurnEnded,

    // Actions
    PokemonSwitched {
        side: SideId,
        old_pokemon: String,
        new_pokemon: String,
    },
    MoveUsed {
        side: SideId,
        pokemon: String,
        move_used: Move,
    },
    MoveMissed {
        attacker: String,
        move_used: Move,
    },
    ActionFailed {
        pokemon: String,
        reason: ActionFailureReason,
    },
    Protected {
        pokemon: String,
    },
    CriticalHit {
        attacker: String,
        move_used: Move,
    },
    AttackTypeEffectiveness {
        multiplier: f32,
    },

    // Damage and Healing
    DamageDealt {
        target: String,
        damage: u16,
        remaining_hp: u16,
    },
    ResidualDamage {
        target: String,
        source: ResidualSource,
        damage: u16,
        remaining_hp: u16,
    },
    SubstituteDamaged {
        target: String,
        damage: u16,
        broken: bool,
    },
    PokemonHealed {
        target: String,
        amount: u16,
        new_hp: u16,
    },
    PokemonFainted {
        side: SideId,
        pokemon: String,
    },

    // Status and volatiles
    StatusApplied {
        target: String,
        status: StatusCondition,
    },
    StatusRemoved {
        target: String,
        status: StatusCondition,
    },
    VolatileApplied {
        target: String,
        condition: VolatileKind,
    },
    VolatileEnded {
        target: String,
        condition: VolatileKind,
    },

    // Stat Changes
    StatStageChanged {
        target: String,
        stat: StageStat,
        old_stage: i8,
        new_stage: i8,
    },
    StatChangeBlocked {
        target: String,
        stat: StageStat,
    },

    // Abilities and items
    AbilityActivated {
        pokemon: String,
        ability: Ability,
    },
    ItemConsumed {
        pokemon: String,
        item: Item,
    },

    // Field
    WeatherChanged {
        weather: Option<Weather>,
    },
    TerrainChanged {
        terrain: Option<Terrain>,
    },
    HazardSet {
        side: SideId,
        hazard: Hazard,
    },
    HazardsCleared {
        side: SideId,
    },
    SideConditionSet {
        side: SideId,
        condition: SideCondition,
        turns: u8,
    },
    SideConditionEnded {
        side: SideId,
        condition: SideCondition,
    },
    FieldEffectChanged {
        effect: FieldEffect,
        active: bool,
    },
    /// An effect that could not apply and left state unchanged.
    EffectFailed {
        pokemon: String,
    },

    // Battle End
    BattleEnded {
        winner: Option<SideId>,
    },
}

impl BattleEvent {
    /// Formats the event into a human-readable string using battle context.
    /// Returns None for silent events that should not produce user-visible text.
    pub fn format(&self, battle_state: &BattleState) -> Option<String> {
        match self {
            BattleEvent::TurnStarted { turn_number } => Some(format!("=== Turn {} ===", turn_number)),
            BattleEvent::TurnEnded => None,
            BattleEvent::PokemonSwitched {
                side, new_pokemon, ..
            } => Some(format!(
                "{} sent out {}!",
                battle_state.players[*side].player_name, new_pokemon
            )),
            BattleEvent::MoveUsed {
                pokemon, move_used, ..
            } => Some(format!("{} used {}!", pokemon, move_used)),
            BattleEvent::MoveMissed { attacker, .. } => {
                Some(format!("{}'s attack missed!", attacker))
            }
            BattleEvent::ActionFailed { pokemon, reason } => Some(format!(
                "{} {}",
                pokemon,
                Self::format_action_failure_reason(reason)
            )),
            BattleEvent::Protected { pokemon } => Some(format!("{} protected itself!", pokemon)),
            BattleEvent::CriticalHit { .. } => Some("A critical hit!".to_string()),
            BattleEvent::AttackTypeEffectiveness { multiplier } => match multiplier {
                m if *m == 0.0 => Some("It doesn't affect the target...".to_string()),
                m if *m > 1.0 => Some("It's super effective!".to_string()),
                m if *m < 1.0 => Some("It's not very effective...".to_string()),
                _ => None,
            },
            BattleEvent::DamageDealt { target, damage, .. } => {
                Some(format!("{} took {} damage!", target, damage))
            }
            BattleEvent::ResidualDamage { target, damage, .. } => {
                Some(format!("{} lost {} HP!", target, damage))
            }
            BattleEvent::SubstituteDamaged { broken, .. } => Some(if *broken {
                "The substitute broke!".to_string()
            } else {
                "The substitute took damage for it!".to_string()
            }),
            BattleEvent::PokemonHealed { target, amount, .. } => {
                Some(format!("{} recovered {} HP!", target, amount))
            }
            BattleEvent::PokemonFainted { pokemon, .. } => Some(format!("{} fainted!", pokemon)),
            BattleEvent::StatusApplied { target, status } => {
                Some(format!("{} was afflicted with {}!", target, status))
            }
            BattleEvent::StatusRemoved { target, status } => match status {
                StatusCondition::Sleep(_) => Some(format!("{} woke up!", target)),
                StatusCondition::Freeze => Some(format!("{} thawed out!", target)),
                _ => Some(format!("{} was cured of its {}!", target, status)),
            },
            BattleEvent::VolatileApplied { target, condition } => {
                Some(format!("{} is affected by {}!", target, condition))
            }
            BattleEvent::VolatileEnded { target, condition } => {
                Some(format!("{}'s {} ended.", target, condition))
            }
            BattleEvent::StatStageChanged {
                target,
                stat,
                old_stage,
                new_stage,
            } => {
                let verb = if new_stage > old_stage { "rose" } else { "fell" };
                Some(format!("{}'s {} {}!", target, stat, verb))
            }
            BattleEvent::StatChangeBlocked { target, stat } => {
                Some(format!("{}'s {} won't go any further!", target, stat))
            }
            BattleEvent::AbilityActivated { pokemon, ability } => {
                Some(format!("[{}'s {}]", pokemon, ability))
            }
            BattleEvent::ItemConsumed { pokemon, item } => {
                Some(format!("{} used its {}!", pokemon, item))
            }
            BattleEvent::WeatherChanged { weather } => Some(match weather {
                Some(w) => format!("The weather became {}.", w),
                None => "The weather cleared.".to_string(),
            }),
            BattleEvent::TerrainChanged { terrain } => Some(match terrain {
                Some(t) => format!("{} Terrain covered the field.", t),
                None => "The terrain faded.".to_string(),
            }),
            BattleEvent::HazardSet { side, hazard } => Some(format!(
                "{:?} scattered around {}'s side!",
                hazard, battle_state.players[*side].player_name
            )),
            BattleEvent::HazardsCleared { side } => Some(format!(
                "Hazards were cleared from {}'s side.",
                battle_state.players[*side].player_name
            )),
            BattleEvent::SideConditionSet { side, condition, .. } => Some(format!(
                "{:?} protects {}'s team!",
                condition, battle_state.players[*side].player_name
            )),
            BattleEvent::SideConditionEnded { side, condition } => Some(format!(
                "{}'s {:?} wore off.",
                battle_state.players[*side].player_name, condition
            )),
            BattleEvent::FieldEffectChanged { effect, active } => Some(if *active {
                format!("{:?} took effect!", effect)
            } else {
                format!("{:?} wore off.", effect)
            }),
            BattleEvent::EffectFailed { .. } => Some("But it failed!".to_string()),
            BattleEvent::BattleEnded { winner } => match winner {
                Some(side) => Some(format!(
                    "{} has won the battle!",
                    battle_state.players[*side].player_name
                )),
                None => Some("The battle ended in a draw!".to_string()),
            },
        }
    }

    fn format_action_failure_reason(reason: &ActionFailureReason) -> &'static str {
        match reason {
            ActionFailureReason::Asleep => "is fast asleep.",
            ActionFailureReason::Frozen => "is frozen solid!",
            ActionFailureReason::FullyParalyzed => "is fully paralyzed!",
            ActionFailureReason::Flinched => "flinched and couldn't move!",
            ActionFailureReason::HurtItselfInConfusion => "hurt itself in its confusion!",
            ActionFailureReason::Infatuated => "is immobilized by love!",
            ActionFailureReason::Disabled => "can't use a disabled move!",
            ActionFailureReason::Taunted => "can't use status moves after the taunt!",
            ActionFailureReason::Tormented => "can't use the same move twice in a row!",
            ActionFailureReason::PsychicTerrain => "is protected by the Psychic Terrain!",
            ActionFailureReason::NoTarget => "has no target.",
            ActionFailureReason::Charging => "is charging up.",
            ActionFailureReason::LostFocus => "lost its focus and couldn't move!",
            ActionFailureReason::NoEffect => "was unaffected.",
            ActionFailureReason::Failed => "failed.",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        tracing::debug!(?event, "battle event");
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<BattleEvent> {
        self.events
    }

    /// Human-readable lines for every event that has text.
    pub fn formatted(&self, battle_state: &BattleState) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|event| event.format(battle_state))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl std::fmt::Display for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, event) in self.events.iter().enumerate() {
            writeln!(f, "  {}: {:?}", i + 1, event)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum RngSource {
    Seeded(StdRng),
    Scripted { outcomes: Vec<u8>, index: usize },
}

/// The battle's single source of randomness.
///
/// A seeded source gives reproducible battles. A scripted source replays a
/// fixed list of percent outcomes (1..=100), one per draw, so tests can force
/// exact paths.
#[derive(Debug, Clone)]
pub struct TurnRng {
    source: RngSource,
}

impl TurnRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            source: RngSource::Seeded(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn new_random() -> Self {
        Self {
            source: RngSource::Seeded(StdRng::from_os_rng()),
        }
    }

    pub fn new_for_test(outcomes: Vec<u8>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    fn next_scripted(outcomes: &[u8], index: &mut usize, reason: &str) -> u8 {
        if *index >= outcomes.len() {
            panic!(
                "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                reason
            );
        }
        let outcome = outcomes[*index];
        *index += 1;
        outcome
    }

    /// A uniform roll in 1..=100.
    pub fn next_outcome(&mut self, reason: &str) -> u8 {
        let value = match &mut self.source {
            RngSource::Seeded(rng) => rng.random_range(1..=100),
            RngSource::Scripted { outcomes, index } => Self::next_scripted(outcomes, index, reason),
        };
        tracing::trace!(reason, value, "rng draw");
        value
    }

    /// True with `chance` percent probability. Certain and impossible rolls draw nothing.
    pub fn roll_percent(&mut self, chance: u8, reason: &str) -> bool {
        match chance {
            0 => false,
            c if c >= 100 => true,
            _ => self.next_outcome(reason) <= chance,
        }
    }

    /// True with probability `num / den`.
    pub fn chance(&mut self, num: u32, den: u32, reason: &str) -> bool {
        if num == 0 {
            return false;
        }
        if num >= den {
            return true;
        }
        let hit = match &mut self.source {
            RngSource::Seeded(rng) => rng.random_range(0..den) < num,
            RngSource::Scripted { outcomes, index } => {
                Self::next_scripted(outcomes, index, reason) as u32 * den <= num * 100
            }
        };
        tracing::trace!(reason, num, den, hit, "rng chance");
        hit
    }

    /// A uniform value in `lo..=hi`. A scripted outcome inside the range is used as is.
    pub fn range(&mut self, lo: u8, hi: u8, reason: &str) -> u8 {
        if lo >= hi {
            return lo;
        }
        let value = match &mut self.source {
            RngSource::Seeded(rng) => rng.random_range(lo..=hi),
            RngSource::Scripted { outcomes, index } => {
                let outcome = Self::next_scripted(outcomes, index, reason);
                if (lo..=hi).contains(&outcome) {
                    outcome
                } else {
                    let span = (hi - lo) as u16 + 1;
                    lo + ((outcome.saturating_sub(1)) as u16 % span) as u8
                }
            }
        };
        tracing::trace!(reason, value, "rng range");
        value
    }

    /// The damage roll percentage, 85..=100. Scripted outcomes below 85 give the minimum roll.
    pub fn damage_roll(&mut self, reason: &str) -> u8 {
        if let RngSource::Scripted { outcomes, index } = &mut self.source {
            return Self::next_scripted(outcomes, index, reason).clamp(85, 100);
        }
        self.range(85, 100, reason)
    }

    /// A uniform index below `len`.
    pub fn pick_index(&mut self, len: usize, reason: &str) -> usize {
        if len <= 1 {
            return 0;
        }
        let hi = (len - 1).min(u8::MAX as usize) as u8;
        self.range(0, hi, reason) as usize
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BattleState {
    pub battle_id: String,
    pub players: PerSide<BattlePlayer>,
    pub field: Field,
    pub turn_number: u32,
    pub game_state: GameState,
    pub config: BattleConfig,
}

impl BattleState {
    pub fn new(id: String, player: BattlePlayer, opponent: BattlePlayer) -> Self {
        Self::with_config(id, player, opponent, BattleConfig::default())
    }

    pub fn with_config(
        id: String,
        player: BattlePlayer,
        opponent: BattlePlayer,
        config: BattleConfig,
    ) -> Self {
        Self {
            battle_id: id,
            players: PerSide::new(player, opponent),
            field: Field::new(config.format),
            turn_number: 1,
            game_state: GameState::WaitingForActions,
            config,
        }
    }

    pub fn active(&self, side: SideId) -> &PokemonInst {
        self.players[side].active_pokemon()
    }

    pub fn active_mut(&mut self, side: SideId) -> &mut PokemonInst {
        self.players[side].active_pokemon_mut()
    }

    pub fn is_over(&self) -> bool {
        matches!(self.game_state, GameState::PlayerWin | GameState::OpponentWin)
    }

    pub fn winner(&self) -> Option<SideId> {
        match self.game_state {
            GameState::PlayerWin => Some(SideId::Player),
            GameState::OpponentWin => Some(SideId::Opponent),
            _ => None,
        }
    }

    /// Compact byte encoding of the whole battle. Equal battles give equal bytes.
    pub fn snapshot(&self) -> Result<Vec<u8>, postcard::Error> {
        postcard::to_allocvec(self)
    }

    pub fn set_winner(&mut self, side: SideId) {
        self.game_state = match side {
            SideId::Player => GameState::PlayerWin,
            SideId::Opponent => GameState::OpponentWin,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_side_pair_mut_orders_by_first() {
        let mut sides = PerSide::new(1, 2);
        let (first, other) = sides.pair_mut(SideId::Opponent);
        *first += 10;
        *other += 100;
        assert_eq!(sides[SideId::Player], 101);
        assert_eq!(sides[SideId::Opponent], 12);
    }

    #[test]
    fn scripted_rng_maps_outcomes() {
        let mut rng = TurnRng::new_for_test(vec![6, 7, 33, 34, 92, 40, 3]);
        assert!(rng.chance(1, 16, "crit"));
        assert!(!rng.chance(1, 16, "crit"));
        assert!(rng.chance(1, 3, "confusion"));
        assert!(!rng.chance(1, 3, "confusion"));
        assert_eq!(rng.damage_roll("roll"), 92);
        assert_eq!(rng.damage_roll("roll"), 85);
        assert_eq!(rng.range(1, 3, "sleep"), 3);
    }

    #[test]
    fn certain_rolls_draw_nothing() {
        let mut rng = TurnRng::new_for_test(vec![]);
        assert!(rng.roll_percent(100, "sure"));
        assert!(!rng.roll_percent(0, "never"));
        assert!(rng.chance(1, 1, "sure"));
        assert_eq!(rng.range(2, 2, "fixed"), 2);
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let mut a = TurnRng::seeded(7);
        let mut b = TurnRng::seeded(7);
        let draws_a: Vec<u8> = (0..20).map(|_| a.next_outcome("test")).collect();
        let draws_b: Vec<u8> = (0..20).map(|_| b.next_outcome("test")).collect();
        assert_eq!(draws_a, draws_b);
        assert!(draws_a.iter().all(|v| (1..=100).contains(v)));
    }

    #[test]
    #[should_panic(expected = "TurnRng exhausted")]
    fn exhausted_script_panics() {
        let mut rng = TurnRng::new_for_test(vec![]);
        rng.next_outcome("one too many");
    }
}
