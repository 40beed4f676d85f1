use crate::battle::field::{
    FieldEffect, GMaxResidual, Hazard, SideCondition, Timed, FIELD_EFFECT_TURNS,
    GMAX_RESIDUAL_TURNS, LIGHT_CLAY_BONUS, SCREEN_TURNS, TAILWIND_TURNS,
};
use crate::battle::state::{BattleEvent, BattleState, EventBus, SideId};
use crate::pokemon::StatStages;
use schema::{Item, StageStat, Terrain, Weather};
use strum::IntoEnumIterator;

fn failed(state: &BattleState, side: SideId, bus: &mut EventBus) {
    bus.push(BattleEvent::EffectFailed {
        pokemon: state.active(side).name.clone(),
    });
}

pub(super) fn set_hazard(state: &mut BattleState, side: SideId, hazard: Hazard, bus: &mut EventBus) {
    if state.field.side_mut(side).add_hazard(hazard) {
        bus.push(BattleEvent::HazardSet { side, hazard });
    } else {
        tracing::debug!(?side, ?hazard, "hazard already at its cap");
    }
}

/// Screens last five turns, eight with Light Clay. Aurora Veil needs hail.
pub(super) fn set_side_condition(
    state: &mut BattleState,
    side: SideId,
    setter_side: SideId,
    condition: SideCondition,
    bus: &mut EventBus,
) {
    let already_up = state.field.side(side).condition_turns(condition) > 0;
    let needs_hail = condition == SideCondition::AuroraVeil && !state.field.is_weather(Weather::Hail);
    if already_up || needs_hail {
        failed(state, setter_side, bus);
        return;
    }

    let turns = match condition {
        SideCondition::Tailwind => TAILWIND_TURNS,
        _ => {
            let setter = state.active(setter_side);
            if setter.held_item(&state.field) == Some(Item::LightClay) {
                SCREEN_TURNS + LIGHT_CLAY_BONUS
            } else {
                SCREEN_TURNS
            }
        }
    };
    *state.field.side_mut(side).condition_turns_mut(condition) = turns;
    bus.push(BattleEvent::SideConditionSet {
        side,
        condition,
        turns,
    });
}

/// Sets the weather for `turns` (0 lasts indefinitely). Returns false if it was already active.
pub fn set_weather(state: &mut BattleState, weather: Weather, turns: u8, bus: &mut EventBus) -> bool {
    if state.field.is_weather(weather) {
        return false;
    }
    state.field.weather = Some(Timed::new(weather, turns));
    bus.push(BattleEvent::WeatherChanged {
        weather: Some(weather),
    });
    true
}

/// Sets the terrain for `turns` (0 lasts indefinitely). Returns false if it was already active.
pub fn set_terrain(state: &mut BattleState, terrain: Terrain, turns: u8, bus: &mut EventBus) -> bool {
    if state.field.is_terrain(terrain) {
        return false;
    }
    state.field.terrain = Some(Timed::new(terrain, turns));
    bus.push(BattleEvent::TerrainChanged {
        terrain: Some(terrain),
    });
    true
}

/// Rooms switch off when used again; Gravity fails instead.
pub(super) fn toggle_field_effect(
    state: &mut BattleState,
    user_side: SideId,
    effect: FieldEffect,
    bus: &mut EventBus,
) {
    let turns = state.field.effect_turns_mut(effect);
    if *turns > 0 {
        if effect == FieldEffect::Gravity {
            failed(state, user_side, bus);
            return;
        }
        *turns = 0;
        bus.push(BattleEvent::FieldEffectChanged {
            effect,
            active: false,
        });
        return;
    }
    *turns = FIELD_EFFECT_TURNS;
    bus.push(BattleEvent::FieldEffectChanged {
        effect,
        active: true,
    });
}

pub(super) fn set_gmax_residual(state: &mut BattleState, side: SideId, residual: GMaxResidual) {
    let timer = state.field.side_mut(side).gmax_timer_mut(residual);
    if *timer == 0 {
        *timer = GMAX_RESIDUAL_TURNS;
    }
}

pub(super) fn clear_hazards(state: &mut BattleState, side: SideId, bus: &mut EventBus) {
    let side_field = state.field.side_mut(side);
    if side_field.has_hazards() {
        side_field.clear_hazards();
        bus.push(BattleEvent::HazardsCleared { side });
    }
}

pub(super) fn defog(state: &mut BattleState, user_side: SideId, bus: &mut EventBus) {
    for side in SideId::BOTH {
        clear_hazards(state, side, bus);
    }
    let foe_side = user_side.opponent();
    for condition in [SideCondition::Reflect, SideCondition::LightScreen, SideCondition::AuroraVeil] {
        let turns = state.field.side_mut(foe_side).condition_turns_mut(condition);
        if *turns > 0 {
            *turns = 0;
            bus.push(BattleEvent::SideConditionEnded {
                side: foe_side,
                condition,
            });
        }
    }
}

/// Court Change: both sides trade hazards, screens and tailwind.
pub(super) fn swap_sides(state: &mut BattleState, bus: &mut EventBus) {
    let (player, opponent) = state.field.sides.pair_mut(SideId::Player);
    std::mem::swap(player, opponent);
    tracing::debug!("side conditions swapped");
    for side in SideId::BOTH {
        if state.field.side(side).has_hazards() {
            for hazard in present_hazards(state.field.side(side)) {
                bus.push(BattleEvent::HazardSet { side, hazard });
            }
        }
    }
}

fn present_hazards(side: &crate::battle::field::SideField) -> Vec<Hazard> {
    let mut hazards = Vec::new();
    if side.spikes > 0 {
        hazards.push(Hazard::Spikes);
    }
    if side.toxic_spikes > 0 {
        hazards.push(Hazard::ToxicSpikes);
    }
    if side.stealth_rock {
        hazards.push(Hazard::StealthRock);
    }
    if side.sticky_web {
        hazards.push(Hazard::StickyWeb);
    }
    if side.steelsurge {
        hazards.push(Hazard::Steelsurge);
    }
    hazards
}

/// Haze: every stage on both active combatants returns to zero.
pub fn clear_all_stages(state: &mut BattleState, bus: &mut EventBus) {
    for side in SideId::BOTH {
        let pokemon = state.active_mut(side);
        for stat in StageStat::iter() {
            let old_stage = pokemon.stages.get(stat);
            if old_stage != 0 {
                bus.push(BattleEvent::StatStageChanged {
                    target: pokemon.name.clone(),
                    stat,
                    old_stage,
                    new_stage: 0,
                });
            }
        }
        pokemon.stages = StatStages::default();
    }
}
