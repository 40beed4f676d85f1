use crate::battle::conditions::{MoveTimer, VolatileKind};
use crate::battle::field::Field;
use crate::battle::state::{BattleEvent, BattleState, EventBus, SideId, TurnRng};
use crate::pokemon::{PokemonInst, StatusCondition};
use schema::{Ability, PokemonType, Terrain};
use serde::{Deserialize, Serialize};

const TAUNT_TURNS: u8 = 3;
const ENCORE_TURNS: u8 = 3;
const DISABLE_TURNS: u8 = 4;
const REST_SLEEP_TURNS: u8 = 2;

/// A primary status an effect can inflict. Counters are filled in when applied.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Paralysis,
    Burn,
    Poison,
    Toxic,
    Sleep,
    Freeze,
}

fn type_immune(target: &PokemonInst, kind: StatusKind) -> bool {
    match kind {
        StatusKind::Paralysis => target.has_type(PokemonType::Electric),
        StatusKind::Burn => target.has_type(PokemonType::Fire),
        StatusKind::Freeze => target.has_type(PokemonType::Ice),
        StatusKind::Poison | StatusKind::Toxic => {
            target.has_type(PokemonType::Poison) || target.has_type(PokemonType::Steel)
        }
        StatusKind::Sleep => false,
    }
}

fn ability_immune(ability: Ability, kind: StatusKind) -> bool {
    matches!(
        (ability, kind),
        (Ability::Limber, StatusKind::Paralysis)
            | (Ability::WaterVeil, StatusKind::Burn)
            | (Ability::MagmaArmor, StatusKind::Freeze)
            | (Ability::Immunity, StatusKind::Poison | StatusKind::Toxic)
            | (Ability::Insomnia | Ability::VitalSpirit, StatusKind::Sleep)
    )
}

/// Whether `kind` could be put on `target` right now.
pub fn can_inflict(target: &PokemonInst, kind: StatusKind, field: &Field) -> bool {
    if target.is_fainted() || target.status.is_some() {
        return false;
    }
    let grounded = target.is_grounded(field);
    if grounded && field.is_terrain(Terrain::Misty) {
        return false;
    }
    if kind == StatusKind::Sleep && grounded && field.is_terrain(Terrain::Electric) {
        return false;
    }
    !type_immune(target, kind) && !ability_immune(target.ability, kind)
}

/// Puts a primary status on the active combatant of `side`. Returns false,
/// leaving state untouched, when the target is immune or already statused.
pub fn inflict_status(
    state: &mut BattleState,
    side: SideId,
    kind: StatusKind,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> bool {
    if !can_inflict(state.active(side), kind, &state.field) {
        return false;
    }

    let status = match kind {
        StatusKind::Paralysis => StatusCondition::Paralysis,
        StatusKind::Burn => StatusCondition::Burn,
        StatusKind::Poison => StatusCondition::Poison,
        StatusKind::Toxic => StatusCondition::Toxic(1),
        StatusKind::Sleep => StatusCondition::Sleep(rng.range(1, 3, "sleep turns")),
        StatusKind::Freeze => StatusCondition::Freeze,
    };

    let pokemon = state.active_mut(side);
    pokemon.status = Some(status);
    bus.push(BattleEvent::StatusApplied {
        target: pokemon.name.clone(),
        status,
    });
    true
}

/// Rest: restores all HP and sleeps for two turns, replacing any status.
pub(super) fn rest(state: &mut BattleState, side: SideId, bus: &mut EventBus) {
    let pokemon = state.active_mut(side);
    let blocked = pokemon.is_full_hp()
        || matches!(pokemon.status, Some(StatusCondition::Sleep(_)))
        || matches!(pokemon.ability, Ability::Insomnia | Ability::VitalSpirit);
    if pokemon.is_fainted() || blocked {
        bus.push(BattleEvent::EffectFailed {
            pokemon: pokemon.name.clone(),
        });
        return;
    }

    let healed = pokemon.heal(pokemon.max_hp());
    bus.push(BattleEvent::PokemonHealed {
        target: pokemon.name.clone(),
        amount: healed,
        new_hp: pokemon.current_hp(),
    });
    if let Some(previous) = pokemon.status.take() {
        bus.push(BattleEvent::StatusRemoved {
            target: pokemon.name.clone(),
            status: previous,
        });
    }
    let sleep = StatusCondition::Sleep(REST_SLEEP_TURNS);
    pokemon.status = Some(sleep);
    bus.push(BattleEvent::StatusApplied {
        target: pokemon.name.clone(),
        status: sleep,
    });
}

/// Applies a volatile condition to the active combatant of `side`.
/// `source_side` is the side whose move caused it.
pub fn apply_volatile(
    state: &mut BattleState,
    side: SideId,
    source_side: SideId,
    kind: VolatileKind,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> bool {
    if state.active(side).is_fainted() {
        return false;
    }
    let source_gender = state.active(source_side).gender;
    let source_slot = state.players[source_side].active_pokemon_index;

    let pokemon = state.active_mut(side);
    let ability = pokemon.ability;

    let applied = match kind {
        VolatileKind::Confusion => {
            if pokemon.volatiles.confusion.is_some() || ability == Ability::OwnTempo {
                false
            } else {
                pokemon.volatiles.confusion = Some(rng.range(2, 5, "confusion turns"));
                true
            }
        }
        VolatileKind::Flinch => {
            if ability == Ability::InnerFocus {
                false
            } else {
                pokemon.volatiles.flinched = true;
                true
            }
        }
        VolatileKind::Taunt => {
            if pokemon.volatiles.taunt.is_some() || ability == Ability::Oblivious {
                false
            } else {
                pokemon.volatiles.taunt = Some(TAUNT_TURNS);
                true
            }
        }
        VolatileKind::Encore => match pokemon.last_move {
            Some(last) if pokemon.volatiles.encore.is_none() && pokemon.move_slot(last).is_some() => {
                pokemon.volatiles.encore = Some(MoveTimer {
                    move_: last,
                    turns_remaining: ENCORE_TURNS,
                });
                true
            }
            _ => false,
        },
        VolatileKind::Disable => match pokemon.last_move {
            Some(last) if pokemon.volatiles.disable.is_none() => {
                pokemon.volatiles.disable = Some(MoveTimer {
                    move_: last,
                    turns_remaining: DISABLE_TURNS,
                });
                true
            }
            _ => false,
        },
        VolatileKind::Torment => !std::mem::replace(&mut pokemon.volatiles.torment, true),
        VolatileKind::Infatuation => {
            let opposite = matches!((pokemon.gender, source_gender), (Some(a), Some(b)) if a != b);
            if !opposite || ability == Ability::Oblivious || pokemon.volatiles.infatuated_with.is_some() {
                false
            } else {
                pokemon.volatiles.infatuated_with = Some(source_slot);
                true
            }
        }
        VolatileKind::LeechSeed => {
            if pokemon.has_type(PokemonType::Grass) || pokemon.volatiles.leech_seed.is_some() {
                false
            } else {
                pokemon.volatiles.leech_seed = Some(source_side);
                true
            }
        }
        VolatileKind::PartialTrap => {
            if pokemon.volatiles.partial_trap.is_some() {
                false
            } else {
                pokemon.volatiles.partial_trap = Some(rng.range(4, 5, "trap turns"));
                true
            }
        }
        VolatileKind::SaltCure => !std::mem::replace(&mut pokemon.volatiles.salt_cure, true),
        VolatileKind::Curse => !std::mem::replace(&mut pokemon.volatiles.cursed, true),
        VolatileKind::FocusEnergy => !std::mem::replace(&mut pokemon.volatiles.focus_energy, true),
        VolatileKind::AquaRing => !std::mem::replace(&mut pokemon.volatiles.aqua_ring, true),
        VolatileKind::Substitute | VolatileKind::Protect | VolatileKind::Charging | VolatileKind::Rampage => {
            false
        }
    };

    let name = state.active(side).name.clone();
    if applied {
        bus.push(BattleEvent::VolatileApplied {
            target: name,
            condition: kind,
        });
    } else if kind != VolatileKind::Flinch {
        bus.push(BattleEvent::EffectFailed { pokemon: name });
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::field::Timed;
    use crate::battle::tests::common::{create_test_battle, predictable_rng, TestPokemonBuilder};
    use crate::pokemon::Gender;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::{BattleFormat, StatBlock, SpeciesData};

    fn mon(types: &[PokemonType]) -> PokemonInst {
        PokemonInst::new(&SpeciesData::new("Target", types, StatBlock::uniform(70)), 50, vec![])
    }

    #[rstest]
    #[case(PokemonType::Electric, StatusKind::Paralysis)]
    #[case(PokemonType::Fire, StatusKind::Burn)]
    #[case(PokemonType::Ice, StatusKind::Freeze)]
    #[case(PokemonType::Poison, StatusKind::Toxic)]
    #[case(PokemonType::Steel, StatusKind::Poison)]
    fn type_immunities(#[case] pokemon_type: PokemonType, #[case] kind: StatusKind) {
        let field = Field::new(BattleFormat::Single);
        assert!(!can_inflict(&mon(&[pokemon_type]), kind, &field));
        assert!(can_inflict(&mon(&[PokemonType::Normal]), kind, &field));
    }

    #[test]
    fn terrains_guard_grounded_targets() {
        let mut field = Field::new(BattleFormat::Single);
        field.terrain = Some(Timed::new(Terrain::Electric, 5));
        let grounded = mon(&[PokemonType::Normal]);
        let airborne = mon(&[PokemonType::Flying]);
        assert!(!can_inflict(&grounded, StatusKind::Sleep, &field));
        assert!(can_inflict(&grounded, StatusKind::Burn, &field));
        assert!(can_inflict(&airborne, StatusKind::Sleep, &field));

        field.terrain = Some(Timed::new(Terrain::Misty, 5));
        assert!(!can_inflict(&grounded, StatusKind::Burn, &field));
        assert!(can_inflict(&airborne, StatusKind::Burn, &field));
    }

    #[test]
    fn existing_status_blocks_and_leaves_state() {
        let mut state = create_test_battle(
            vec![TestPokemonBuilder::new("Target", 50).with_status(StatusCondition::Burn).build()],
            vec![TestPokemonBuilder::new("Source", 50).build()],
        );
        let before = state.clone();
        let mut bus = EventBus::new();
        assert!(!inflict_status(&mut state, SideId::Player, StatusKind::Paralysis, &mut predictable_rng(), &mut bus));
        assert_eq!(state, before);
    }

    #[test]
    fn sleep_rolls_one_to_three_turns() {
        let mut state = create_test_battle(
            vec![TestPokemonBuilder::new("Target", 50).build()],
            vec![TestPokemonBuilder::new("Source", 50).build()],
        );
        let mut bus = EventBus::new();
        inflict_status(&mut state, SideId::Player, StatusKind::Sleep, &mut TurnRng::new_for_test(vec![2]), &mut bus);
        assert_eq!(state.active(SideId::Player).status, Some(StatusCondition::Sleep(2)));
    }

    #[test]
    fn leech_seed_skips_grass() {
        let mut state = create_test_battle(
            vec![TestPokemonBuilder::new("Target", 50).with_types(vec![PokemonType::Grass]).build()],
            vec![TestPokemonBuilder::new("Source", 50).build()],
        );
        let before = state.clone();
        let mut bus = EventBus::new();
        assert!(!apply_volatile(&mut state, SideId::Player, SideId::Opponent, VolatileKind::LeechSeed, &mut predictable_rng(), &mut bus));
        assert_eq!(state, before);
    }

    #[test]
    fn infatuation_needs_opposite_genders() {
        let mut state = create_test_battle(
            vec![TestPokemonBuilder::new("Target", 50).with_gender(Gender::Male).build()],
            vec![TestPokemonBuilder::new("Source", 50).with_gender(Gender::Male).build()],
        );
        let mut bus = EventBus::new();
        assert!(!apply_volatile(&mut state, SideId::Player, SideId::Opponent, VolatileKind::Infatuation, &mut predictable_rng(), &mut bus));

        state.active_mut(SideId::Opponent).gender = Some(Gender::Female);
        assert!(apply_volatile(&mut state, SideId::Player, SideId::Opponent, VolatileKind::Infatuation, &mut predictable_rng(), &mut bus));
        assert_eq!(state.active(SideId::Player).volatiles.infatuated_with, Some(0));
    }

    #[test]
    fn rest_overrides_status() {
        let mut state = create_test_battle(
            vec![TestPokemonBuilder::new("Target", 50).with_status(StatusCondition::Burn).build()],
            vec![TestPokemonBuilder::new("Source", 50).build()],
        );
        state.active_mut(SideId::Player).set_hp(10);
        let mut bus = EventBus::new();
        rest(&mut state, SideId::Player, &mut bus);
        let pokemon = state.active(SideId::Player);
        assert!(pokemon.is_full_hp());
        assert_eq!(pokemon.status, Some(StatusCondition::Sleep(2)));
    }
}
