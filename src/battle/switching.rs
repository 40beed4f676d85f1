//! Everything that changes which combatant is active: voluntary switches,
//! faint replacement, phazing, pivots and Baton Pass, plus the switch-in hook
//! that runs every time a combatant enters the field.

use crate::battle::ai;
use crate::battle::conditions::Volatiles;
use crate::battle::field::Hazard;
use crate::battle::move_effects::{
    change_stage, inflict_status, set_terrain, set_weather, trigger_eject_pack, StageSource,
    StatusKind,
};
use crate::battle::state::{BattleEvent, BattleState, EventBus, ResidualSource, SideId, TurnRng};
use crate::player::PlayerType;
use crate::pokemon::{StatStages, StatusCondition};
use schema::{Ability, Item, PokemonType, StageStat, Terrain, Weather};

/// State handed to the replacement by Baton Pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatonPassed {
    pub stages: StatStages,
    pub substitute_hp: Option<u16>,
    pub volatiles: Volatiles,
}

/// Runs the switch-in hook for both leads, player first.
pub fn start_battle(state: &mut BattleState, rng: &mut TurnRng, bus: &mut EventBus) {
    for side in SideId::BOTH {
        switch_in_hook(state, side, None, rng, bus);
    }
    check_faints(state, rng, bus);
}

/// Brings `team_index` in for `side`. The caller has already checked the slot is legal.
pub fn switch_to(
    state: &mut BattleState,
    side: SideId,
    team_index: usize,
    carried: Option<BatonPassed>,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    let player = &mut state.players[side];
    let leaving_slot = player.active_pokemon_index;
    let old_pokemon = player.active_pokemon().name.clone();
    player.active_pokemon_mut().clear_field_state();
    player.active_pokemon_index = team_index;
    let new_pokemon = player.active_pokemon().name.clone();

    let foe = state.active_mut(side.opponent());
    if foe.volatiles.infatuated_with == Some(leaving_slot) {
        foe.volatiles.infatuated_with = None;
    }

    tracing::debug!(?side, %old_pokemon, %new_pokemon, "switch");
    bus.push(BattleEvent::PokemonSwitched {
        side,
        old_pokemon,
        new_pokemon,
    });
    switch_in_hook(state, side, carried, rng, bus);
}

fn switch_in_hook(
    state: &mut BattleState,
    side: SideId,
    carried: Option<BatonPassed>,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    let ability = state.active(side).ability;
    if let Some(weather) = weather_ability(ability) {
        if set_weather(state, weather, 0, bus) {
            announce_ability(state, side, bus);
        }
    }
    if let Some(terrain) = terrain_ability(ability) {
        if set_terrain(state, terrain, 0, bus) {
            announce_ability(state, side, bus);
        }
    }

    let pokemon = state.active_mut(side);
    pokemon.volatiles = Volatiles::default();
    pokemon.substitute_hp = None;
    if let Some(carried) = carried {
        pokemon.stages = carried.stages;
        pokemon.substitute_hp = carried.substitute_hp;
        pokemon.volatiles = carried.volatiles;
    }
    match pokemon.status {
        Some(StatusCondition::Sleep(_)) => {
            pokemon.status = Some(StatusCondition::Sleep(rng.range(1, 3, "sleep turns on entry")));
        }
        Some(StatusCondition::Toxic(_)) => pokemon.status = Some(StatusCondition::Toxic(1)),
        _ => {}
    }

    apply_hazards(state, side, rng, bus);

    if state.active(side).ability == Ability::Intimidate && !state.active(side).is_fainted() {
        intimidate(state, side, rng, bus);
    }
}

fn weather_ability(ability: Ability) -> Option<Weather> {
    match ability {
        Ability::Drizzle => Some(Weather::Rain),
        Ability::Drought => Some(Weather::Sun),
        Ability::SandStream => Some(Weather::Sand),
        Ability::SnowWarning => Some(Weather::Hail),
        _ => None,
    }
}

fn terrain_ability(ability: Ability) -> Option<Terrain> {
    match ability {
        Ability::ElectricSurge => Some(Terrain::Electric),
        Ability::GrassySurge => Some(Terrain::Grassy),
        Ability::MistySurge => Some(Terrain::Misty),
        Ability::PsychicSurge => Some(Terrain::Psychic),
        _ => None,
    }
}

fn announce_ability(state: &BattleState, side: SideId, bus: &mut EventBus) {
    let pokemon = state.active(side);
    bus.push(BattleEvent::AbilityActivated {
        pokemon: pokemon.name.clone(),
        ability: pokemon.ability,
    });
}

fn hazard_damage(state: &mut BattleState, side: SideId, damage: u16, hazard: Hazard, bus: &mut EventBus) {
    let pokemon = state.active_mut(side);
    let dealt = pokemon.take_damage(damage);
    bus.push(BattleEvent::ResidualDamage {
        target: pokemon.name.clone(),
        source: ResidualSource::Hazard(hazard),
        damage: dealt,
        remaining_hp: pokemon.current_hp(),
    });
}

/// Damage from a type-scaled hazard: an eighth of max HP times effectiveness.
fn typed_hazard_damage(max_hp: u16, attacking: PokemonType, types: &[PokemonType]) -> u16 {
    let effectiveness = PokemonType::effectiveness_against(attacking, types);
    if effectiveness == 0.0 {
        return 0;
    }
    ((max_hp as f32 * effectiveness / 8.0) as u16).max(1)
}

fn apply_hazards(state: &mut BattleState, side: SideId, rng: &mut TurnRng, bus: &mut EventBus) {
    let hazards = state.field.side(side).clone();
    if !hazards.has_hazards() {
        return;
    }
    let pokemon = state.active(side);
    if pokemon.held_item(&state.field) == Some(Item::HeavyDutyBoots) {
        tracing::debug!(pokemon = %pokemon.name, "boots ignore hazards");
        return;
    }
    let grounded = pokemon.is_grounded(&state.field);
    let takes_damage = pokemon.ability != Ability::MagicGuard;
    let max_hp = pokemon.max_hp();
    let types = pokemon.types.clone();

    if takes_damage && hazards.stealth_rock {
        let damage = typed_hazard_damage(max_hp, PokemonType::Rock, &types);
        if damage > 0 {
            hazard_damage(state, side, damage, Hazard::StealthRock, bus);
        }
    }
    if takes_damage && hazards.steelsurge {
        let damage = typed_hazard_damage(max_hp, PokemonType::Steel, &types);
        if damage > 0 {
            hazard_damage(state, side, damage, Hazard::Steelsurge, bus);
        }
    }
    if takes_damage && grounded && hazards.spikes > 0 {
        let den = match hazards.spikes {
            1 => 8,
            2 => 6,
            _ => 4,
        };
        let damage = state.active(side).hp_fraction(1, den);
        hazard_damage(state, side, damage, Hazard::Spikes, bus);
    }
    if state.active(side).is_fainted() {
        return;
    }

    if grounded && hazards.toxic_spikes > 0 {
        if types.contains(&PokemonType::Poison) {
            state.field.side_mut(side).toxic_spikes = 0;
            bus.push(BattleEvent::HazardsCleared { side });
        } else {
            let kind = if hazards.toxic_spikes >= 2 {
                StatusKind::Toxic
            } else {
                StatusKind::Poison
            };
            inflict_status(state, side, kind, rng, bus);
        }
    }
    if grounded && hazards.sticky_web {
        if change_stage(state, side, StageStat::Speed, -1, StageSource::Foe, bus) < 0 {
            trigger_eject_pack(state, side, rng, bus);
        }
    }
}

fn intimidate(state: &mut BattleState, side: SideId, rng: &mut TurnRng, bus: &mut EventBus) {
    let foe_side = side.opponent();
    let foe = state.active(foe_side);
    if foe.is_fainted() {
        return;
    }
    announce_ability(state, side, bus);
    if foe.ability.blocks_intimidate() {
        bus.push(BattleEvent::StatChangeBlocked {
            target: foe.name.clone(),
            stat: StageStat::Attack,
        });
        return;
    }
    if change_stage(state, foe_side, StageStat::Attack, -1, StageSource::Foe, bus) < 0 {
        trigger_eject_pack(state, foe_side, rng, bus);
    }
}

/// The team slot `side` sends in after its active combatant leaves
/// involuntarily. The human side takes its first healthy member; the AI
/// side picks its best matchup.
pub fn replacement_for(state: &BattleState, side: SideId) -> Option<usize> {
    let player = &state.players[side];
    match player.player_type {
        PlayerType::Human => player.bench_indices().first().copied(),
        PlayerType::Ai => ai::choose_replacement(state, side),
    }
}

/// Replaces the active combatant of `side` with its chosen replacement.
/// Returns false when nobody healthy is left on the bench.
pub fn forced_replacement(state: &mut BattleState, side: SideId, rng: &mut TurnRng, bus: &mut EventBus) -> bool {
    let Some(team_index) = replacement_for(state, side) else {
        tracing::warn!(?side, "no replacement available");
        return false;
    };
    switch_to(state, side, team_index, None, rng, bus);
    true
}

/// Roar-style forced switch: a random healthy bench member replaces the target.
pub fn phaze(state: &mut BattleState, side: SideId, rng: &mut TurnRng, bus: &mut EventBus) {
    let bench = state.players[side].bench_indices();
    if bench.is_empty() || state.active(side).is_fainted() {
        bus.push(BattleEvent::EffectFailed {
            pokemon: state.active(side).name.clone(),
        });
        return;
    }
    let team_index = bench[rng.pick_index(bench.len(), "phaze target")];
    switch_to(state, side, team_index, None, rng, bus);
}

/// Baton Pass: the replacement inherits stages, substitute and the passable volatiles.
pub fn baton_pass(state: &mut BattleState, side: SideId, rng: &mut TurnRng, bus: &mut EventBus) -> bool {
    let Some(team_index) = replacement_for(state, side) else {
        bus.push(BattleEvent::EffectFailed {
            pokemon: state.active(side).name.clone(),
        });
        return false;
    };
    let outgoing = state.active(side);
    let carried = BatonPassed {
        stages: outgoing.stages,
        substitute_hp: outgoing.substitute_hp,
        volatiles: outgoing.volatiles.baton_pass_subset(),
    };
    switch_to(state, side, team_index, Some(carried), rng, bus);
    true
}

/// Handles every fainted active combatant. Faint events come first; the
/// player side is checked for defeat before the opponent, so a simultaneous
/// wipe goes to the opponent. Otherwise each side sends in a replacement,
/// repeating while replacements faint on entry. Returns true once the battle
/// is over.
pub fn check_faints(state: &mut BattleState, rng: &mut TurnRng, bus: &mut EventBus) -> bool {
    loop {
        if state.is_over() {
            return true;
        }
        let fainted: Vec<SideId> = SideId::BOTH
            .into_iter()
            .filter(|&side| state.active(side).is_fainted())
            .collect();
        if fainted.is_empty() {
            return false;
        }

        for &side in &fainted {
            bus.push(BattleEvent::PokemonFainted {
                side,
                pokemon: state.active(side).name.clone(),
            });
        }

        for side in SideId::BOTH {
            if state.players[side].is_defeated() {
                let winner = side.opponent();
                state.set_winner(winner);
                tracing::debug!(?winner, "battle over");
                bus.push(BattleEvent::BattleEnded {
                    winner: Some(winner),
                });
                return true;
            }
        }

        for side in fainted {
            forced_replacement(state, side, rng, bus);
        }
    }
}
