use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::battle::state::{BattleState, PerSide, SideId, TurnRng};
use crate::battle::stats::{effective_priority, effective_speed};
use crate::player::PlayerAction;
use schema::Move;

/// Atomic actions executed in order during a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleAction {
    /// `side` brings in the combatant at `team_index`.
    Switch { side: SideId, team_index: usize },

    /// The combatant in `actor_slot` uses `move_` on whatever holds the
    /// opposing active slot. `target_slot` is the opposing team slot that
    /// was active when the turn began.
    UseMove {
        side: SideId,
        actor_slot: usize,
        target_slot: usize,
        move_: Move,
    },
}

pub struct ActionStack {
    actions: VecDeque<BattleAction>,
}

// Sort key for one side's move.
#[derive(Debug, Clone, Copy)]
struct ActionPriority {
    move_priority: i8,
    speed: u16,
}

impl ActionStack {
    pub fn new() -> Self {
        Self {
            actions: VecDeque::new(),
        }
    }

    /// Orders both sides' chosen actions for the turn. `moves` holds the move
    /// each side actually uses once forced moves are taken into account.
    ///
    /// Switches go first, the player's before the opponent's. Moves follow by
    /// effective priority, then effective speed (reversed under Trick Room),
    /// with a coin flip on a perfect tie.
    pub fn build_initial(
        battle_state: &BattleState,
        actions: &PerSide<PlayerAction>,
        rng: &mut TurnRng,
    ) -> Self {
        let mut stack = Self::new();
        let mut movers = Vec::new();

        for (side, action) in actions.iter() {
            match *action {
                PlayerAction::SwitchPokemon { team_index } => {
                    stack.push_back(BattleAction::Switch { side, team_index })
                }
                PlayerAction::UseMove { move_ } => movers.push((side, move_)),
            }
        }

        if movers.len() == 2 && Self::second_goes_first(battle_state, movers[0], movers[1], rng) {
            movers.swap(0, 1);
        }

        for (side, move_) in movers {
            stack.push_back(BattleAction::UseMove {
                side,
                actor_slot: battle_state.players[side].active_pokemon_index,
                target_slot: battle_state.players[side.opponent()].active_pokemon_index,
                move_,
            });
        }
        stack
    }

    pub fn push_back(&mut self, action: BattleAction) {
        self.actions.push_back(action);
    }

    pub fn push_front(&mut self, action: BattleAction) {
        self.actions.push_front(action);
    }

    pub fn pop_front(&mut self) -> Option<BattleAction> {
        self.actions.pop_front()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    fn calculate_priority(battle_state: &BattleState, side: SideId, move_: Move) -> ActionPriority {
        let pokemon = battle_state.active(side);
        ActionPriority {
            move_priority: effective_priority(pokemon, &move_.data()),
            speed: effective_speed(
                pokemon,
                &battle_state.field,
                side,
                battle_state.config.paralysis_speed_divisor,
            ),
        }
    }

    fn second_goes_first(
        battle_state: &BattleState,
        first: (SideId, Move),
        second: (SideId, Move),
        rng: &mut TurnRng,
    ) -> bool {
        let a = Self::calculate_priority(battle_state, first.0, first.1);
        let b = Self::calculate_priority(battle_state, second.0, second.1);

        match b.move_priority.cmp(&a.move_priority) {
            Ordering::Greater => return true,
            Ordering::Less => return false,
            Ordering::Equal => {}
        }

        let speed_order = if battle_state.field.trick_room > 0 {
            a.speed.cmp(&b.speed)
        } else {
            b.speed.cmp(&a.speed)
        };
        match speed_order {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => !rng.chance(1, 2, "speed tie"),
        }
    }
}

impl Default for ActionStack {
    fn default() -> Self {
        Self::new()
    }
}
