//! Heuristic opponent: scores each move, occasionally switches out of a bad
//! matchup, and picks replacements after a faint.

use std::cmp::Reverse;

use ordered_float::OrderedFloat;

use crate::battle::damage::compute_damage_range;
use crate::battle::move_effects::{can_inflict, effects_for, EffectKind};
use crate::battle::state::{BattleState, SideId, TurnRng};
use crate::battle::stats::move_effectiveness;
use crate::config::AiConfig;
use crate::player::PlayerAction;
use crate::pokemon::PokemonInst;
use schema::{Move, Stat};

/// A trait for any system that can decide on a battle action.
pub trait Behavior {
    /// Inspects the battle state and decides on the next action for `side`.
    fn decide_action(&self, side: SideId, battle_state: &BattleState, rng: &mut TurnRng) -> PlayerAction;
}

pub struct ScoringAI {
    config: AiConfig,
}

impl Default for ScoringAI {
    fn default() -> Self {
        Self::new(AiConfig::default())
    }
}

impl ScoringAI {
    pub fn new(config: AiConfig) -> Self {
        Self { config }
    }

    /// Score for `attacker` using `move_` on `defender`. Higher is better.
    pub fn score_move(
        &self,
        attacker: &PokemonInst,
        defender: &PokemonInst,
        move_: Move,
        side: SideId,
        battle_state: &BattleState,
        rng: &mut TurnRng,
    ) -> i32 {
        let config = &self.config;
        let field = &battle_state.field;
        let move_data = move_.data();

        let effectiveness = move_effectiveness(attacker, defender, move_data.move_type, field);
        if move_data.is_damaging() && effectiveness == 0.0 {
            return config.ineffective_score;
        }
        if !move_data.is_damaging() && is_redundant_status(move_, defender, battle_state) {
            return config.ineffective_score;
        }

        let (_, max_damage) = compute_damage_range(attacker, defender, &move_data, field, side);
        let defender_hp = defender.current_hp().max(1);
        let will_ko = move_data.is_damaging() && max_damage >= defender.current_hp();

        let attacker_speed = speed(attacker);
        let defender_speed = speed(defender);
        let goes_first = if move_data.priority != 0 || attacker_speed == defender_speed {
            move_data.priority > 0 || (move_data.priority == 0 && attacker_speed >= defender_speed)
        } else {
            attacker_speed > defender_speed
        };

        let mut score = if move_data.is_damaging() {
            (max_damage as u32 * 100 / defender_hp as u32) as i32
        } else {
            config.status_move_score
        };

        if will_ko {
            score += if goes_first {
                config.fast_kill_bonus
            } else {
                config.slow_kill_bonus
            };
            if attacker.ability.rewards_knockout() {
                score += config.knockout_ability_bonus;
            }
        }

        if move_.is_high_crit() && !will_ko && effectiveness > 1.0 && rng.roll_percent(50, "ai crit bonus") {
            score += 1;
        }

        if move_data.priority > 0
            && (attacker.current_hp() as u32) * 2 < defender.current_hp() as u32
            && attacker_speed < defender_speed
        {
            score += config.priority_bonus;
        }
        score
    }

    /// Decides whether to leave the field this turn and where to go.
    ///
    /// Bench members are considered in team order. Once one is faster than
    /// the foe, every later member counts as faster too.
    fn switch_target(
        &self,
        side: SideId,
        battle_state: &BattleState,
        move_scores: &[(Move, i32)],
        rng: &mut TurnRng,
    ) -> Option<usize> {
        let player = &battle_state.players[side];
        let active = player.active_pokemon();
        let foe_side = side.opponent();
        let foe = battle_state.active(foe_side);

        if !player.has_healthy_bench()
            || active.volatiles.partial_trap.is_some()
            || move_scores.iter().any(|(_, score)| *score > self.config.switch_threshold)
            || (active.current_hp() as u32) * 2 < active.max_hp() as u32
        {
            return None;
        }

        let mut faster = false;
        let candidates: Vec<usize> = player
            .bench_indices()
            .into_iter()
            .filter(|&index| {
                let member = &player.team[index];
                if speed(member) > speed(foe) {
                    faster = true;
                }
                let incoming = best_damage(foe, member, battle_state, foe_side);
                let ohko = incoming >= member.current_hp();
                let two_hko = incoming as u32 * 2 >= member.current_hp() as u32;
                (faster && !ohko) || (!faster && !two_hko)
            })
            .collect();

        if candidates.is_empty() || !rng.roll_percent(self.config.switch_chance, "ai switch") {
            return None;
        }
        best_matchup(&self.config, side, battle_state, candidates)
    }
}

impl Behavior for ScoringAI {
    fn decide_action(&self, side: SideId, battle_state: &BattleState, rng: &mut TurnRng) -> PlayerAction {
        let attacker = battle_state.active(side);
        let defender = battle_state.active(side.opponent());

        let move_scores: Vec<(Move, i32)> = attacker
            .usable_moves()
            .map(|slot| {
                let move_ = slot.move_();
                (move_, self.score_move(attacker, defender, move_, side, battle_state, rng))
            })
            .collect();
        tracing::debug!(?side, ?move_scores, "ai move scores");

        if let Some(team_index) = self.switch_target(side, battle_state, &move_scores, rng) {
            tracing::debug!(?side, team_index, "ai switches out");
            return PlayerAction::SwitchPokemon { team_index };
        }

        let Some(best) = move_scores.iter().map(|(_, score)| *score).max() else {
            tracing::warn!(?side, "no usable moves left");
            let bench = battle_state.players[side].bench_indices();
            match bench.first() {
                Some(&team_index) if attacker.volatiles.partial_trap.is_none() => {
                    return PlayerAction::SwitchPokemon { team_index };
                }
                _ => return PlayerAction::UseMove { move_: Move::Struggle },
            }
        };
        let top: Vec<Move> = move_scores
            .iter()
            .filter(|(_, score)| *score == best)
            .map(|(move_, _)| *move_)
            .collect();
        let move_ = top[rng.pick_index(top.len(), "ai tie break")];
        PlayerAction::UseMove { move_ }
    }
}

/// The replacement an AI side sends in after a faint: the bench member with
/// the best matchup against the current foe, earliest on ties.
pub fn choose_replacement(battle_state: &BattleState, side: SideId) -> Option<usize> {
    let bench = battle_state.players[side].bench_indices();
    best_matchup(&battle_state.config.ai, side, battle_state, bench)
}

fn best_matchup(config: &AiConfig, side: SideId, battle_state: &BattleState, candidates: Vec<usize>) -> Option<usize> {
    let player = &battle_state.players[side];
    let foe = battle_state.active(side.opponent());
    candidates
        .into_iter()
        .max_by_key(|&index| {
            let (score, margin) = matchup(config, &player.team[index], foe, side, battle_state);
            (score, margin, Reverse(index))
        })
}

/// Fixed bonus for the matchup plus the damage-share margin used to order equal bonuses.
fn matchup(
    config: &AiConfig,
    member: &PokemonInst,
    foe: &PokemonInst,
    side: SideId,
    battle_state: &BattleState,
) -> (i32, OrderedFloat<f64>) {
    let bonuses = &config.matchup;
    let faster = speed(member) > speed(foe);
    let outgoing = best_damage(member, foe, battle_state, side);
    let incoming = best_damage(foe, member, battle_state, side.opponent());
    let ohko = outgoing >= foe.current_hp();
    let ohkod = incoming >= member.current_hp();
    let dealt = outgoing as f64 / foe.current_hp().max(1) as f64;
    let received = incoming as f64 / member.current_hp().max(1) as f64;

    let mut score = match (faster, ohko) {
        (true, true) => bonuses.faster_ohko,
        (false, true) if !ohkod => bonuses.slower_ohko_survives,
        (true, _) if dealt > received => bonuses.faster_outdamages,
        (false, _) if dealt > received => bonuses.slower_outdamages,
        (true, _) => bonuses.faster,
        _ => 0,
    };
    if config.floor_species.iter().any(|name| *name == member.name) {
        score = score.max(config.floor_bonus);
    }
    (score, OrderedFloat(dealt - received))
}

/// Highest max-roll damage among the attacker's usable moves.
fn best_damage(attacker: &PokemonInst, defender: &PokemonInst, battle_state: &BattleState, attacker_side: SideId) -> u16 {
    attacker
        .usable_moves()
        .filter(|slot| slot.data.is_damaging())
        .map(|slot| compute_damage_range(attacker, defender, &slot.data, &battle_state.field, attacker_side).1)
        .max()
        .unwrap_or(0)
}

fn speed(pokemon: &PokemonInst) -> u16 {
    pokemon.raw_stat(Stat::Speed)
}

/// A status move whose only point is a primary status the target cannot take.
fn is_redundant_status(move_: Move, defender: &PokemonInst, battle_state: &BattleState) -> bool {
    effects_for(move_).iter().any(|spec| {
        spec.inflicts_foe_status()
            && match spec.kind {
                EffectKind::Status(kind) => {
                    defender.status.is_some() || !can_inflict(defender, kind, &battle_state.field)
                }
                _ => false,
            }
    })
}
