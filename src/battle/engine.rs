use crate::battle::action_stack::{ActionStack, BattleAction};
use crate::battle::ai::{Behavior, ScoringAI};
use crate::battle::conditions::{FocusPunchState, VolatileKind};
use crate::battle::damage::confusion_damage;
use crate::battle::end_of_turn::execute_end_turn_phase;
use crate::battle::move_execution::{execute_move, targets_foe};
use crate::battle::state::{
    ActionFailureReason, BattleEvent, BattleState, EventBus, GameState, PerSide, ResidualSource,
    SideId, TurnRng,
};
use crate::battle::stats::effective_priority;
use crate::battle::switching::{self, check_faints};
use crate::errors::{ActionError, BattleResult, BattleStateError};
use crate::player::PlayerAction;
use crate::pokemon::{PokemonInst, StatusCondition};
use schema::{Move, MoveCategory, Terrain};

/// Runs the switch-in hooks for both leads and returns what happened.
pub fn start_battle(battle_state: &mut BattleState, rng: &mut TurnRng) -> EventBus {
    let mut bus = EventBus::new();
    switching::start_battle(battle_state, rng, &mut bus);
    bus
}

/// Checks that `side` may take `action` right now. Nothing is mutated.
/// Struggle is legal only once every move is out of PP.
pub fn validate_player_action(
    battle_state: &BattleState,
    side: SideId,
    action: &PlayerAction,
) -> BattleResult<()> {
    if battle_state.is_over() {
        return Err(BattleStateError::BattleOver.into());
    }
    let player = &battle_state.players[side];
    let active = player.active_pokemon();
    if active.is_fainted() {
        return Err(BattleStateError::NoActivePokemon.into());
    }

    match *action {
        PlayerAction::UseMove { move_: Move::Struggle } => {
            if active.usable_moves().next().is_some() {
                return Err(ActionError::UnknownMove(Move::Struggle).into());
            }
        }
        PlayerAction::UseMove { move_ } => {
            let slot = active
                .move_slot(move_)
                .ok_or(ActionError::UnknownMove(move_))?;
            if slot.pp == 0 {
                return Err(ActionError::NoPp(move_).into());
            }
        }
        PlayerAction::SwitchPokemon { team_index } => {
            if !player.can_switch_to(team_index) {
                return Err(ActionError::InvalidSwitch(team_index).into());
            }
            if active.volatiles.partial_trap.is_some() {
                return Err(ActionError::Trapped.into());
            }
        }
    }
    Ok(())
}

/// Every action `side` could legally submit this turn.
pub fn valid_actions(battle_state: &BattleState, side: SideId) -> Vec<PlayerAction> {
    let player = &battle_state.players[side];
    let active = player.active_pokemon();
    let mut actions: Vec<PlayerAction> = active
        .usable_moves()
        .map(|slot| PlayerAction::UseMove { move_: slot.move_() })
        .collect();
    if actions.is_empty() {
        actions.push(PlayerAction::UseMove { move_: Move::Struggle });
    }
    if active.volatiles.partial_trap.is_none() {
        actions.extend(
            player
                .bench_indices()
                .into_iter()
                .map(|team_index| PlayerAction::SwitchPokemon { team_index }),
        );
    }
    actions
}

/// Main entry point for turn resolution.
///
/// Validates the human's action, lets the AI choose for the opponent and
/// resolves the whole turn. A rejected action leaves the battle untouched.
pub fn resolve_turn(
    battle_state: &mut BattleState,
    human_action: PlayerAction,
    rng: &mut TurnRng,
) -> BattleResult<EventBus> {
    validate_submitted(battle_state, SideId::Player, &human_action)?;

    let ai = ScoringAI::new(battle_state.config.ai.clone());
    let ai_action = ai.decide_action(SideId::Opponent, battle_state, rng);
    tracing::debug!(?human_action, ?ai_action, "actions collected");

    execute_turn(battle_state, PerSide::new(human_action, ai_action), rng)
}

/// Resolves one turn from both sides' chosen actions.
pub fn execute_turn(
    battle_state: &mut BattleState,
    actions: PerSide<PlayerAction>,
    rng: &mut TurnRng,
) -> BattleResult<EventBus> {
    for side in SideId::BOTH {
        validate_submitted(battle_state, side, &actions[side])?;
    }

    let mut bus = EventBus::new();
    battle_state.game_state = GameState::TurnInProgress;
    bus.push(BattleEvent::TurnStarted {
        turn_number: battle_state.turn_number,
    });
    tracing::debug!(turn = battle_state.turn_number, "turn started");

    let mut continuations = PerSide::new(false, false);
    let mut resolved = actions.clone();
    for side in SideId::BOTH {
        let (action, continuation) = apply_forced_move(battle_state.active(side), actions[side]);
        resolved[side] = action;
        continuations[side] = continuation;
    }

    for side in SideId::BOTH {
        if let PlayerAction::UseMove { move_: Move::FocusPunch } = resolved[side] {
            battle_state.active_mut(side).volatiles.focus_punch = Some(FocusPunchState::Focusing);
        }
    }

    let mut action_stack = ActionStack::build_initial(battle_state, &resolved, rng);
    while let Some(action) = action_stack.pop_front() {
        execute_battle_action(action, battle_state, &continuations, rng, &mut bus);
        check_faints(battle_state, rng, &mut bus);
        if battle_state.is_over() {
            break;
        }
    }

    if !battle_state.is_over() {
        execute_end_turn_phase(battle_state, rng, &mut bus);
    }
    finalize_turn(battle_state, &mut bus);
    Ok(bus)
}

/// Validation for a submitted action. A combatant locked into a move has its
/// submission replaced anyway, so only the battle-level checks apply.
fn validate_submitted(battle_state: &BattleState, side: SideId, action: &PlayerAction) -> BattleResult<()> {
    if let (Some(_), true) = forced_move(battle_state.active(side)) {
        if battle_state.is_over() {
            return Err(BattleStateError::BattleOver.into());
        }
        return Ok(());
    }
    validate_player_action(battle_state, side, action)
}

/// The move a combatant is made to use. The flag is true when the move
/// continues from an earlier turn and ignores the chosen action.
fn forced_move(pokemon: &PokemonInst) -> (Option<Move>, bool) {
    let volatiles = &pokemon.volatiles;
    if let Some(lock) = volatiles.locked_move {
        return (Some(lock.move_), true);
    }
    if let Some(charging) = volatiles.charging {
        return (Some(charging), true);
    }
    if let Some(encore) = volatiles.encore {
        if pokemon.move_slot(encore.move_).is_some_and(|slot| slot.pp > 0) {
            return (Some(encore.move_), false);
        }
    }
    (None, false)
}

fn apply_forced_move(pokemon: &PokemonInst, chosen: PlayerAction) -> (PlayerAction, bool) {
    match (forced_move(pokemon), chosen) {
        ((Some(move_), true), _) => (PlayerAction::UseMove { move_ }, true),
        ((Some(move_), false), PlayerAction::UseMove { .. }) => (PlayerAction::UseMove { move_ }, false),
        _ => (chosen, false),
    }
}

/// Execute a single battle action.
fn execute_battle_action(
    action: BattleAction,
    battle_state: &mut BattleState,
    continuations: &PerSide<bool>,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    match action {
        BattleAction::Switch { side, team_index } => {
            if !battle_state.players[side].can_switch_to(team_index) {
                tracing::warn!(?side, team_index, "switch target no longer available");
                return;
            }
            switching::switch_to(battle_state, side, team_index, None, rng, bus);
        }
        BattleAction::UseMove {
            side,
            actor_slot,
            target_slot,
            move_,
        } => {
            let player = &battle_state.players[side];
            if player.active_pokemon_index != actor_slot || player.active_pokemon().is_fainted() {
                tracing::debug!(?side, ?move_, "actor left the field before acting");
                return;
            }
            if let Some(reason) = check_action_preventing_conditions(battle_state, side, target_slot, move_, rng, bus) {
                let pokemon = battle_state.active_mut(side);
                pokemon.volatiles.locked_move = None;
                pokemon.volatiles.charging = None;
                bus.push(BattleEvent::ActionFailed {
                    pokemon: pokemon.name.clone(),
                    reason,
                });
                return;
            }
            if !continuations[side] {
                if let Some(slot) = battle_state.active_mut(side).move_slot_mut(move_) {
                    slot.pp = slot.pp.saturating_sub(1);
                }
            }
            execute_move(battle_state, side, move_, rng, bus);
        }
    }
}

/// Checks everything that can stop a combatant from acting, in order.
/// Returns the reason when the action is cancelled.
fn check_action_preventing_conditions(
    battle_state: &mut BattleState,
    side: SideId,
    target_slot: usize,
    move_: Move,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> Option<ActionFailureReason> {
    let move_data = move_.data();
    let foe_side = side.opponent();

    {
        let pokemon = battle_state.active(side);
        let volatiles = &pokemon.volatiles;
        if volatiles.disable.is_some_and(|d| d.move_ == move_) {
            return Some(ActionFailureReason::Disabled);
        }
        if volatiles.taunt.is_some() && move_data.category == MoveCategory::Status {
            return Some(ActionFailureReason::Taunted);
        }
        if volatiles.torment && pokemon.last_move == Some(move_) {
            return Some(ActionFailureReason::Tormented);
        }
        let foe = battle_state.active(foe_side);
        if battle_state.field.is_terrain(Terrain::Psychic)
            && effective_priority(pokemon, &move_data) > 0
            && targets_foe(move_)
            && foe.is_grounded(&battle_state.field)
        {
            return Some(ActionFailureReason::PsychicTerrain);
        }
    }

    let pokemon = battle_state.active_mut(side);
    let status = pokemon.status;
    match status {
        Some(StatusCondition::Sleep(0)) => {
            pokemon.status = None;
            bus.push(BattleEvent::StatusRemoved {
                target: pokemon.name.clone(),
                status: StatusCondition::Sleep(0),
            });
        }
        Some(StatusCondition::Sleep(turns)) => {
            pokemon.status = Some(StatusCondition::Sleep(turns - 1));
            return Some(ActionFailureReason::Asleep);
        }
        Some(StatusCondition::Freeze) => {
            if move_.thaws_user() || rng.roll_percent(20, "thaw") {
                pokemon.status = None;
                bus.push(BattleEvent::StatusRemoved {
                    target: pokemon.name.clone(),
                    status: StatusCondition::Freeze,
                });
            } else {
                return Some(ActionFailureReason::Frozen);
            }
        }
        Some(StatusCondition::Paralysis) => {
            if rng.chance(1, 4, "full paralysis") {
                return Some(ActionFailureReason::FullyParalyzed);
            }
        }
        _ => {}
    }

    if pokemon.volatiles.flinched {
        pokemon.volatiles.flinched = false;
        return Some(ActionFailureReason::Flinched);
    }

    let confusion = pokemon.volatiles.confusion;
    match confusion {
        Some(0) => {
            pokemon.volatiles.confusion = None;
            bus.push(BattleEvent::VolatileEnded {
                target: pokemon.name.clone(),
                condition: VolatileKind::Confusion,
            });
        }
        Some(turns) => {
            pokemon.volatiles.confusion = Some(turns - 1);
            if rng.chance(1, 3, "confusion self-hit") {
                let roll = rng.damage_roll("confusion damage");
                let damage = confusion_damage(pokemon, roll);
                let dealt = pokemon.take_damage(damage);
                bus.push(BattleEvent::ResidualDamage {
                    target: pokemon.name.clone(),
                    source: ResidualSource::Confusion,
                    damage: dealt,
                    remaining_hp: pokemon.current_hp(),
                });
                return Some(ActionFailureReason::HurtItselfInConfusion);
            }
        }
        None => {}
    }

    let foe_slot = battle_state.players[foe_side].active_pokemon_index;
    let pokemon = battle_state.active(side);
    if pokemon.volatiles.infatuated_with == Some(foe_slot) && rng.roll_percent(50, "infatuation") {
        return Some(ActionFailureReason::Infatuated);
    }

    if move_ == Move::FocusPunch && pokemon.volatiles.focus_punch == Some(FocusPunchState::LostFocus) {
        return Some(ActionFailureReason::LostFocus);
    }

    let target_fainted = battle_state.players[foe_side]
        .team
        .get(target_slot)
        .map_or(true, |target| target.is_fainted());
    if targets_foe(move_) && target_fainted {
        return Some(ActionFailureReason::NoTarget);
    }
    None
}

fn finalize_turn(battle_state: &mut BattleState, bus: &mut EventBus) {
    bus.push(BattleEvent::TurnEnded);
    battle_state.turn_number += 1;
    if !battle_state.is_over() {
        battle_state.game_state = GameState::WaitingForActions;
    }
    tracing::debug!(turn = battle_state.turn_number, over = battle_state.is_over(), "turn finished");
}
