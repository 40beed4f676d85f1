use crate::battle::state::{BattleEvent, BattleState, EventBus, SideId, TurnRng};
use schema::{Ability, Item, StageStat};

/// Who caused a stage change. Only foe-caused drops are blocked or punished by abilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageSource {
    Itself,
    Foe,
}

fn blocks_drop(ability: Ability, stat: StageStat) -> bool {
    match ability {
        Ability::ClearBody | Ability::WhiteSmoke => true,
        Ability::HyperCutter => stat == StageStat::Attack,
        _ => false,
    }
}

/// Changes one stage on the active combatant of `side` and returns the delta
/// actually applied. A change at the bound is a no-op reported with
/// `StatChangeBlocked`.
pub fn change_stage(
    state: &mut BattleState,
    side: SideId,
    stat: StageStat,
    delta: i8,
    source: StageSource,
    bus: &mut EventBus,
) -> i8 {
    let pokemon = state.active_mut(side);
    if pokemon.is_fainted() || delta == 0 {
        return 0;
    }

    if delta < 0 && source == StageSource::Foe && blocks_drop(pokemon.ability, stat) {
        bus.push(BattleEvent::AbilityActivated {
            pokemon: pokemon.name.clone(),
            ability: pokemon.ability,
        });
        bus.push(BattleEvent::StatChangeBlocked {
            target: pokemon.name.clone(),
            stat,
        });
        return 0;
    }

    let old_stage = pokemon.stages.get(stat);
    let applied = pokemon.stages.change(stat, delta);
    if applied == 0 {
        bus.push(BattleEvent::StatChangeBlocked {
            target: pokemon.name.clone(),
            stat,
        });
        return 0;
    }
    bus.push(BattleEvent::StatStageChanged {
        target: pokemon.name.clone(),
        stat,
        old_stage,
        new_stage: old_stage + applied,
    });

    if applied < 0 {
        if source == StageSource::Foe {
            let rebound = match pokemon.ability {
                Ability::Defiant => Some(StageStat::Attack),
                Ability::Competitive => Some(StageStat::SpecialAttack),
                _ => None,
            };
            if let Some(boosted) = rebound {
                bus.push(BattleEvent::AbilityActivated {
                    pokemon: pokemon.name.clone(),
                    ability: pokemon.ability,
                });
                change_stage(state, side, boosted, 2, StageSource::Itself, bus);
            }
        }
        restore_with_white_herb(state, side, bus);
    }

    applied
}

fn restore_with_white_herb(state: &mut BattleState, side: SideId, bus: &mut EventBus) {
    let BattleState { players, field, .. } = state;
    let pokemon = players[side].active_pokemon_mut();
    if pokemon.held_item(field) != Some(Item::WhiteHerb) || !pokemon.stages.has_negative() {
        return;
    }
    pokemon.stages.clear_negative();
    pokemon.item = None;
    bus.push(BattleEvent::ItemConsumed {
        pokemon: pokemon.name.clone(),
        item: Item::WhiteHerb,
    });
}

/// Eject Pack: after a stat drop the holder is consumed out of battle,
/// provided a healthy bench member can replace it.
pub fn trigger_eject_pack(state: &mut BattleState, side: SideId, rng: &mut TurnRng, bus: &mut EventBus) -> bool {
    let holder = state.active(side);
    if holder.is_fainted()
        || holder.held_item(&state.field) != Some(Item::EjectPack)
        || !state.players[side].has_healthy_bench()
    {
        return false;
    }

    let holder = state.active_mut(side);
    holder.item = None;
    bus.push(BattleEvent::ItemConsumed {
        pokemon: holder.name.clone(),
        item: Item::EjectPack,
    });
    tracing::debug!(?side, "eject pack forces a switch");
    crate::battle::switching::forced_replacement(state, side, rng, bus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::{create_test_battle, TestPokemonBuilder};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn single(ability: Ability) -> BattleState {
        create_test_battle(
            vec![TestPokemonBuilder::new("Target", 50).with_ability(ability).build()],
            vec![TestPokemonBuilder::new("Source", 50).build()],
        )
    }

    #[test]
    fn clear_body_blocks_foe_drops_only() {
        let mut state = single(Ability::ClearBody);
        let mut bus = EventBus::new();
        assert_eq!(change_stage(&mut state, SideId::Player, StageStat::Defense, -1, StageSource::Foe, &mut bus), 0);
        assert_eq!(change_stage(&mut state, SideId::Player, StageStat::Defense, -1, StageSource::Itself, &mut bus), -1);
    }

    #[test]
    fn hyper_cutter_guards_attack() {
        let mut state = single(Ability::HyperCutter);
        let mut bus = EventBus::new();
        assert_eq!(change_stage(&mut state, SideId::Player, StageStat::Attack, -1, StageSource::Foe, &mut bus), 0);
        assert_eq!(change_stage(&mut state, SideId::Player, StageStat::Speed, -1, StageSource::Foe, &mut bus), -1);
    }

    #[test]
    fn defiant_rebounds_two_attack() {
        let mut state = single(Ability::Defiant);
        let mut bus = EventBus::new();
        change_stage(&mut state, SideId::Player, StageStat::Speed, -1, StageSource::Foe, &mut bus);
        let stages = state.active(SideId::Player).stages;
        assert_eq!(stages.get(StageStat::Speed), -1);
        assert_eq!(stages.get(StageStat::Attack), 2);
    }

    #[test]
    fn white_herb_restores_and_is_consumed() {
        let mut state = single(Ability::Other);
        state.active_mut(SideId::Player).item = Some(Item::WhiteHerb);
        let mut bus = EventBus::new();
        change_stage(&mut state, SideId::Player, StageStat::Defense, -2, StageSource::Foe, &mut bus);
        let pokemon = state.active(SideId::Player);
        assert_eq!(pokemon.stages.get(StageStat::Defense), 0);
        assert_eq!(pokemon.item, None);
    }

    #[test]
    fn change_at_bound_leaves_state_unchanged() {
        let mut state = single(Ability::Other);
        state.active_mut(SideId::Player).stages.set(StageStat::Attack, 6);
        let before = state.clone();
        let mut bus = EventBus::new();
        assert_eq!(change_stage(&mut state, SideId::Player, StageStat::Attack, 1, StageSource::Itself, &mut bus), 0);
        assert_eq!(state, before);
        assert!(matches!(bus.events()[0], BattleEvent::StatChangeBlocked { .. }));
    }

    proptest! {
        #[test]
        fn stages_stay_in_bounds_and_undo(start in -6i8..=6, delta in 1i8..=12) {
            let mut state = single(Ability::Other);
            state.active_mut(SideId::Player).stages.set(StageStat::Speed, start);
            let mut bus = EventBus::new();

            let up = change_stage(&mut state, SideId::Player, StageStat::Speed, delta, StageSource::Itself, &mut bus);
            let after_up = state.active(SideId::Player).stages.get(StageStat::Speed);
            prop_assert!((-6..=6).contains(&after_up));

            let down = change_stage(&mut state, SideId::Player, StageStat::Speed, -delta, StageSource::Itself, &mut bus);
            let after_down = state.active(SideId::Player).stages.get(StageStat::Speed);
            prop_assert!((-6..=6).contains(&after_down));

            if start + delta <= 6 {
                prop_assert_eq!(up, delta);
                prop_assert_eq!(down, -delta);
                prop_assert_eq!(after_down, start);
            }
        }
    }
}
