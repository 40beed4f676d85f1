#[cfg(test)]
mod tests {
    use crate::battle::engine::execute_turn;
    use crate::battle::state::{BattleEvent, BattleState, PerSide, ResidualSource, SideId};
    use crate::battle::tests::common::{assert_ok, create_test_battle, predictable_rng, TestPokemonBuilder};
    use crate::player::PlayerAction;
    use crate::pokemon::StatusCondition;
    use pretty_assertions::assert_eq;
    use schema::{Ability, Move, PokemonType, Weather};

    fn idle() -> PlayerAction {
        PlayerAction::UseMove { move_: Move::Splash }
    }

    fn play(state: &mut BattleState, player: PlayerAction) -> Vec<BattleEvent> {
        assert_ok(execute_turn(state, PerSide::new(player, idle()), &mut predictable_rng())).into_events()
    }

    fn toxic_battle() -> BattleState {
        create_test_battle(
            vec![
                TestPokemonBuilder::new("Poisoned", 50)
                    .with_moves(vec![Move::Splash])
                    .with_status(StatusCondition::Toxic(1))
                    .build(),
                TestPokemonBuilder::new("Bench", 50).with_moves(vec![Move::Splash]).build(),
            ],
            vec![TestPokemonBuilder::new("Foe", 50).with_moves(vec![Move::Splash]).build()],
        )
    }

    #[test]
    fn toxic_damage_escalates_each_turn() {
        let mut state = toxic_battle();
        let max = state.active(SideId::Player).max_hp();

        play(&mut state, idle());
        assert_eq!(state.active(SideId::Player).current_hp(), max - max / 16);

        play(&mut state, idle());
        assert_eq!(state.active(SideId::Player).current_hp(), max - max / 16 - max * 2 / 16);
        assert_eq!(state.active(SideId::Player).status, Some(StatusCondition::Toxic(3)));
    }

    #[test]
    fn toxic_counter_restarts_after_switching_back_in() {
        let mut state = toxic_battle();
        let max = state.active(SideId::Player).max_hp();
        play(&mut state, idle());
        play(&mut state, idle());
        let before = state.active(SideId::Player).current_hp();

        play(&mut state, PlayerAction::SwitchPokemon { team_index: 1 });
        assert_eq!(state.players[SideId::Player].team[0].current_hp(), before);

        play(&mut state, PlayerAction::SwitchPokemon { team_index: 0 });
        let poisoned = state.active(SideId::Player);
        assert_eq!(poisoned.current_hp(), before - max / 16);
        assert_eq!(poisoned.status, Some(StatusCondition::Toxic(2)));
    }

    #[test]
    fn weather_setter_chips_the_foe_at_turn_end() {
        let mut state = create_test_battle(
            vec![TestPokemonBuilder::new("Setter", 50)
                .with_moves(vec![Move::Splash])
                .with_ability(Ability::SandStream)
                .build()],
            vec![TestPokemonBuilder::new("Foe", 50).with_moves(vec![Move::Splash]).build()],
        );
        let mut rng = predictable_rng();
        crate::battle::engine::start_battle(&mut state, &mut rng);
        assert_eq!(state.field.weather(), Some(Weather::Sand));

        let events = play(&mut state, idle());
        let foe = state.active(SideId::Opponent);
        assert_eq!(foe.current_hp(), foe.max_hp() - foe.max_hp() / 16);
        assert!(events.iter().any(|event| matches!(
            event,
            BattleEvent::ResidualDamage { source: ResidualSource::Weather(Weather::Sand), .. }
        )));
    }

    #[test]
    fn curse_chips_a_quarter_each_turn() {
        let mut state = create_test_battle(
            vec![TestPokemonBuilder::new("Gengar", 50)
                .with_types(vec![PokemonType::Ghost, PokemonType::Poison])
                .with_moves(vec![Move::Curse, Move::Splash])
                .build()],
            vec![TestPokemonBuilder::new("Foe", 50).with_moves(vec![Move::Splash]).build()],
        );
        let max = state.active(SideId::Opponent).max_hp();

        let events = play(&mut state, PlayerAction::UseMove { move_: Move::Curse });
        assert_eq!(state.active(SideId::Opponent).current_hp(), max - max / 4);
        assert!(events.iter().any(|event| matches!(
            event,
            BattleEvent::ResidualDamage { source: ResidualSource::Curse, target, .. } if target == "Foe"
        )));

        play(&mut state, idle());
        assert_eq!(state.active(SideId::Opponent).current_hp(), max - 2 * (max / 4));
    }
}
