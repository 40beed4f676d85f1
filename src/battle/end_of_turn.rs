//! End-of-turn residual phase.
//!
//! Steps run in a fixed order, the player's side before the opponent's within
//! each step. A step that knocks a combatant out is followed by faint
//! handling before the next step starts.

use crate::battle::conditions::VolatileKind;
use crate::battle::field::{FieldEffect, GMaxResidual, SideCondition};
use crate::battle::move_execution::pinch_berry;
use crate::battle::state::{BattleEvent, BattleState, EventBus, ResidualSource, SideId, TurnRng};
use crate::battle::switching::check_faints;
use crate::pokemon::{StatusCondition, TOXIC_CAP};
use schema::{Ability, Item, PokemonType, Terrain, Weather};

pub fn execute_end_turn_phase(battle_state: &mut BattleState, rng: &mut TurnRng, bus: &mut EventBus) {
    tracing::debug!(turn = battle_state.turn_number, "end of turn");
    clear_turn_flags(battle_state);

    let damaging_steps: [fn(&mut BattleState, SideId, &mut EventBus); 9] = [
        weather_damage,
        terrain_healing,
        weather_abilities,
        status_damage,
        seed_salt_and_curse,
        partial_trap,
        gmax_residuals,
        volatile_timers,
        held_items,
    ];
    for step in damaging_steps {
        for side in SideId::BOTH {
            if !battle_state.active(side).is_fainted() {
                step(battle_state, side, bus);
            }
        }
        check_faints(battle_state, rng, bus);
        if battle_state.is_over() {
            return;
        }
    }

    tick_field(battle_state, bus);
}

fn clear_turn_flags(battle_state: &mut BattleState) {
    for side in SideId::BOTH {
        let volatiles = &mut battle_state.active_mut(side).volatiles;
        volatiles.protected = false;
        volatiles.flinched = false;
        volatiles.focus_punch = None;
    }
}

/// Residual damage as a fraction of max HP. Magic Guard ignores all of it.
fn chip(
    battle_state: &mut BattleState,
    side: SideId,
    num: u16,
    den: u16,
    source: ResidualSource,
    bus: &mut EventBus,
) -> u16 {
    let pokemon = battle_state.active_mut(side);
    if pokemon.is_fainted() || pokemon.ability == Ability::MagicGuard {
        return 0;
    }
    let amount = pokemon.hp_fraction(num, den);
    let dealt = pokemon.take_damage(amount);
    bus.push(BattleEvent::ResidualDamage {
        target: pokemon.name.clone(),
        source,
        damage: dealt,
        remaining_hp: pokemon.current_hp(),
    });
    dealt
}

fn restore(battle_state: &mut BattleState, side: SideId, amount: u16, bus: &mut EventBus) {
    let pokemon = battle_state.active_mut(side);
    if pokemon.is_fainted() {
        return;
    }
    let healed = pokemon.heal(amount);
    if healed > 0 {
        bus.push(BattleEvent::PokemonHealed {
            target: pokemon.name.clone(),
            amount: healed,
            new_hp: pokemon.current_hp(),
        });
    }
}

fn restore_fraction(battle_state: &mut BattleState, side: SideId, num: u16, den: u16, bus: &mut EventBus) {
    let amount = battle_state.active(side).hp_fraction(num, den);
    restore(battle_state, side, amount, bus);
}

fn weather_damage(battle_state: &mut BattleState, side: SideId, bus: &mut EventBus) {
    let Some(weather) = battle_state.field.weather() else {
        return;
    };
    let pokemon = battle_state.active(side);
    let immune = match weather {
        Weather::Sand => [PokemonType::Rock, PokemonType::Ground, PokemonType::Steel]
            .into_iter()
            .any(|t| pokemon.has_type(t)),
        Weather::Hail => pokemon.has_type(PokemonType::Ice),
        Weather::Rain | Weather::Sun => true,
    };
    if immune || pokemon.ability == Ability::Overcoat {
        return;
    }
    chip(battle_state, side, 1, 16, ResidualSource::Weather(weather), bus);
}

fn terrain_healing(battle_state: &mut BattleState, side: SideId, bus: &mut EventBus) {
    let field = &battle_state.field;
    if field.is_terrain(Terrain::Grassy) && battle_state.active(side).is_grounded(field) {
        restore_fraction(battle_state, side, 1, 16, bus);
    }
}

fn weather_abilities(battle_state: &mut BattleState, side: SideId, bus: &mut EventBus) {
    let ability = battle_state.active(side).ability;
    let weather = battle_state.field.weather();
    match (ability, weather) {
        (Ability::RainDish, Some(Weather::Rain)) | (Ability::IceBody, Some(Weather::Hail)) => {
            restore_fraction(battle_state, side, 1, 16, bus)
        }
        (Ability::DrySkin, Some(Weather::Rain)) => restore_fraction(battle_state, side, 1, 8, bus),
        (Ability::DrySkin | Ability::SolarPower, Some(Weather::Sun)) => {
            chip(battle_state, side, 1, 8, ResidualSource::Ability(ability), bus);
        }
        _ => {}
    }
}

fn status_damage(battle_state: &mut BattleState, side: SideId, bus: &mut EventBus) {
    let pokemon = battle_state.active(side);
    let Some(status) = pokemon.status else {
        return;
    };

    if status.is_poison() && pokemon.ability == Ability::PoisonHeal {
        if let StatusCondition::Toxic(counter) = status {
            battle_state.active_mut(side).status = Some(StatusCondition::Toxic((counter + 1).min(TOXIC_CAP)));
        }
        restore_fraction(battle_state, side, 1, 8, bus);
        return;
    }

    match status {
        StatusCondition::Burn => {
            chip(battle_state, side, 1, 16, ResidualSource::Status(status), bus);
        }
        StatusCondition::Poison => {
            chip(battle_state, side, 1, 8, ResidualSource::Status(status), bus);
        }
        StatusCondition::Toxic(counter) => {
            let counter = counter.clamp(1, TOXIC_CAP);
            chip(battle_state, side, counter as u16, 16, ResidualSource::Status(status), bus);
            let pokemon = battle_state.active_mut(side);
            if !pokemon.is_fainted() {
                pokemon.status = Some(StatusCondition::Toxic((counter + 1).min(TOXIC_CAP)));
            }
        }
        _ => {}
    }
}

fn seed_salt_and_curse(battle_state: &mut BattleState, side: SideId, bus: &mut EventBus) {
    let volatiles = &battle_state.active(side).volatiles;
    let seeded_by = volatiles.leech_seed;
    let salted = volatiles.salt_cure;

    if let Some(source) = seeded_by {
        let drained = chip(battle_state, side, 1, 8, ResidualSource::LeechSeed, bus);
        if drained > 0 {
            restore(battle_state, source, drained, bus);
        }
    }
    if salted && !battle_state.active(side).is_fainted() {
        let pokemon = battle_state.active(side);
        let den = if pokemon.has_type(PokemonType::Water) || pokemon.has_type(PokemonType::Steel) {
            4
        } else {
            8
        };
        chip(battle_state, side, 1, den, ResidualSource::SaltCure, bus);
    }
    if battle_state.active(side).volatiles.cursed {
        chip(battle_state, side, 1, 4, ResidualSource::Curse, bus);
    }
}

fn partial_trap(battle_state: &mut BattleState, side: SideId, bus: &mut EventBus) {
    let Some(turns) = battle_state.active(side).volatiles.partial_trap else {
        return;
    };
    chip(battle_state, side, 1, 8, ResidualSource::PartialTrap, bus);
    let pokemon = battle_state.active_mut(side);
    if turns <= 1 {
        pokemon.volatiles.partial_trap = None;
        bus.push(BattleEvent::VolatileEnded {
            target: pokemon.name.clone(),
            condition: VolatileKind::PartialTrap,
        });
    } else {
        pokemon.volatiles.partial_trap = Some(turns - 1);
    }
}

fn gmax_residuals(battle_state: &mut BattleState, side: SideId, bus: &mut EventBus) {
    for (residual, spared) in [
        (GMaxResidual::VineLash, PokemonType::Grass),
        (GMaxResidual::Wildfire, PokemonType::Fire),
        (GMaxResidual::Cannonade, PokemonType::Water),
        (GMaxResidual::Volcalith, PokemonType::Rock),
    ] {
        if battle_state.field.side(side).gmax_timer(residual) == 0 {
            continue;
        }
        if !battle_state.active(side).has_type(spared) {
            chip(battle_state, side, 1, 6, ResidualSource::GMax, bus);
        }
        let timer = battle_state.field.side_mut(side).gmax_timer_mut(residual);
        *timer = timer.saturating_sub(1);
    }
}

fn volatile_timers(battle_state: &mut BattleState, side: SideId, bus: &mut EventBus) {
    let pokemon = battle_state.active_mut(side);
    let name = pokemon.name.clone();
    let volatiles = &mut pokemon.volatiles;
    let mut ended = Vec::new();

    if let Some(turns) = volatiles.taunt {
        volatiles.taunt = turns.checked_sub(1).filter(|t| *t > 0);
        if volatiles.taunt.is_none() {
            ended.push(VolatileKind::Taunt);
        }
    }
    for (timer, kind) in [
        (&mut volatiles.disable, VolatileKind::Disable),
        (&mut volatiles.encore, VolatileKind::Encore),
    ] {
        if let Some(mut current) = *timer {
            current.turns_remaining = current.turns_remaining.saturating_sub(1);
            if current.turns_remaining == 0 {
                *timer = None;
                ended.push(kind);
            } else {
                *timer = Some(current);
            }
        }
    }
    let aqua_ring = volatiles.aqua_ring;

    for condition in ended {
        bus.push(BattleEvent::VolatileEnded {
            target: name.clone(),
            condition,
        });
    }
    if aqua_ring {
        restore_fraction(battle_state, side, 1, 16, bus);
    }
}

fn held_items(battle_state: &mut BattleState, side: SideId, bus: &mut EventBus) {
    let pokemon = battle_state.active(side);
    match pokemon.held_item(&battle_state.field) {
        Some(Item::Leftovers) => restore_fraction(battle_state, side, 1, 16, bus),
        Some(Item::BlackSludge) if pokemon.has_type(PokemonType::Poison) => {
            restore_fraction(battle_state, side, 1, 16, bus)
        }
        Some(Item::BlackSludge) => {
            chip(battle_state, side, 1, 8, ResidualSource::Item(Item::BlackSludge), bus);
        }
        _ => {}
    }
    pinch_berry(battle_state, side, bus);
}

/// Counts down weather, terrain, side conditions and rooms, announcing whatever expires.
fn tick_field(battle_state: &mut BattleState, bus: &mut EventBus) {
    let field = &mut battle_state.field;

    if let Some(weather) = field.weather.as_mut() {
        if weather.turns_remaining > 0 {
            weather.turns_remaining -= 1;
            if weather.turns_remaining == 0 {
                field.weather = None;
                bus.push(BattleEvent::WeatherChanged { weather: None });
            }
        }
    }
    if let Some(terrain) = field.terrain.as_mut() {
        if terrain.turns_remaining > 0 {
            terrain.turns_remaining -= 1;
            if terrain.turns_remaining == 0 {
                field.terrain = None;
                bus.push(BattleEvent::TerrainChanged { terrain: None });
            }
        }
    }

    for side in SideId::BOTH {
        for condition in [
            SideCondition::Reflect,
            SideCondition::LightScreen,
            SideCondition::AuroraVeil,
            SideCondition::Tailwind,
        ] {
            let turns = field.side_mut(side).condition_turns_mut(condition);
            if *turns > 0 {
                *turns -= 1;
                if *turns == 0 {
                    bus.push(BattleEvent::SideConditionEnded { side, condition });
                }
            }
        }
    }

    for effect in [
        FieldEffect::Gravity,
        FieldEffect::TrickRoom,
        FieldEffect::MagicRoom,
        FieldEffect::WonderRoom,
    ] {
        let turns = field.effect_turns_mut(effect);
        if *turns > 0 {
            *turns -= 1;
            if *turns == 0 {
                bus.push(BattleEvent::FieldEffectChanged { effect, active: false });
            }
        }
    }
}
