#[cfg(test)]
mod tests {
    use crate::battle::engine::{execute_turn, resolve_turn, valid_actions, validate_player_action};
    use crate::battle::state::{
        ActionFailureReason, BattleEvent, BattleState, GameState, PerSide, ResidualSource, SideId, TurnRng,
    };
    use crate::errors::{ActionError, BattleEngineError};
    use crate::battle::tests::common::{assert_ok, create_test_battle, predictable_rng, TestPokemonBuilder};
    use crate::player::PlayerAction;
    use pretty_assertions::assert_eq;
    use schema::{Move, PokemonType, StatBlock};

    fn movers(events: &[BattleEvent]) -> Vec<SideId> {
        events
            .iter()
            .filter_map(|event| match event {
                BattleEvent::MoveUsed { side, .. } => Some(*side),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn faster_combatant_acts_first() {
        let mut state = create_test_battle(
            vec![TestPokemonBuilder::new("Sprinter", 50)
                .with_stats(StatBlock::new(80, 80, 80, 80, 80, 130))
                .build()],
            vec![TestPokemonBuilder::new("Plodder", 50)
                .with_stats(StatBlock::new(80, 80, 80, 80, 80, 30))
                .build()],
        );
        let bus = assert_ok(resolve_turn(
            &mut state,
            PlayerAction::UseMove { move_: Move::Tackle },
            &mut predictable_rng(),
        ));
        assert_eq!(movers(bus.events()), vec![SideId::Player, SideId::Opponent]);
        assert!(!state.active(SideId::Player).is_full_hp());
        assert!(!state.active(SideId::Opponent).is_full_hp());
    }

    #[test]
    fn status_user_faints_before_acting() {
        let mut state = create_test_battle(
            vec![TestPokemonBuilder::new("Support", 50)
                .with_moves(vec![Move::Growl])
                .with_stats(StatBlock::new(80, 80, 80, 80, 80, 20))
                .build()],
            vec![TestPokemonBuilder::new("Striker", 50)
                .with_stats(StatBlock::new(80, 80, 80, 80, 80, 140))
                .build()],
        );
        state.active_mut(SideId::Player).set_hp(1);

        let bus = assert_ok(resolve_turn(
            &mut state,
            PlayerAction::UseMove { move_: Move::Growl },
            &mut predictable_rng(),
        ));

        assert_eq!(movers(bus.events()), vec![SideId::Opponent]);
        assert_eq!(state.winner(), Some(SideId::Opponent));
        assert_eq!(state.game_state, GameState::OpponentWin);
        assert!(bus.events().iter().any(|event| matches!(
            event,
            BattleEvent::BattleEnded { winner: Some(SideId::Opponent) }
        )));
    }

    #[test]
    fn move_fails_when_its_target_already_left() {
        let mut state = create_test_battle(
            vec![TestPokemonBuilder::new("Wall", 50)
                .with_stats(StatBlock::new(255, 80, 255, 80, 80, 1))
                .build()],
            vec![
                TestPokemonBuilder::new("Bomber", 50)
                    .with_moves(vec![Move::Explosion])
                    .with_stats(StatBlock::new(80, 80, 80, 80, 80, 200))
                    .build(),
                TestPokemonBuilder::new("Reserve", 50).build(),
            ],
        );

        let bus = assert_ok(execute_turn(
            &mut state,
            PerSide::new(
                PlayerAction::UseMove { move_: Move::Tackle },
                PlayerAction::UseMove { move_: Move::Explosion },
            ),
            &mut predictable_rng(),
        ));

        assert_eq!(state.players[SideId::Opponent].active_pokemon_index, 1);
        assert!(state.active(SideId::Opponent).is_full_hp());
        assert!(bus.events().iter().any(|event| matches!(
            event,
            BattleEvent::ActionFailed { reason: ActionFailureReason::NoTarget, .. }
        )));
    }

    #[test]
    fn seeded_turns_are_bit_identical() {
        fn battle() -> BattleState {
            create_test_battle(
                vec![
                    TestPokemonBuilder::new("Alpha", 50)
                        .with_moves(vec![Move::Tackle, Move::BodySlam, Move::Slash])
                        .build(),
                    TestPokemonBuilder::new("Beta", 50).build(),
                ],
                vec![
                    TestPokemonBuilder::new("Gamma", 50)
                        .with_moves(vec![Move::Tackle, Move::Thunderbolt, Move::Scald])
                        .build(),
                    TestPokemonBuilder::new("Delta", 50).build(),
                ],
            )
        }

        let run = |seed: u64| {
            let mut state = battle();
            let mut rng = TurnRng::seeded(seed);
            for _ in 0..4 {
                if state.is_over() {
                    break;
                }
                assert_ok(resolve_turn(
                    &mut state,
                    PlayerAction::UseMove { move_: Move::Tackle },
                    &mut rng,
                ));
            }
            state.snapshot().expect("battle state serializes")
        };

        assert_eq!(run(7), run(7));
        assert_eq!(run(12345), run(12345));
    }

    fn trapped_opponent() -> BattleState {
        let mut state = create_test_battle(
            vec![TestPokemonBuilder::new("Phantom", 50)
                .with_types(vec![PokemonType::Ghost])
                .build()],
            vec![
                TestPokemonBuilder::new("Stuck", 50).build(),
                TestPokemonBuilder::new("Answer", 50)
                    .with_stats(StatBlock::new(80, 80, 80, 80, 80, 120))
                    .build(),
            ],
        );
        state.active_mut(SideId::Opponent).volatiles.partial_trap = Some(3);
        state
    }

    #[test]
    fn trapped_ai_stays_in_instead_of_failing_the_turn() {
        let mut state = trapped_opponent();
        let bus = assert_ok(resolve_turn(
            &mut state,
            PlayerAction::UseMove { move_: Move::Tackle },
            &mut predictable_rng(),
        ));
        assert_eq!(state.players[SideId::Opponent].active_pokemon_index, 0);
        assert!(bus.events().iter().any(|event| matches!(
            event,
            BattleEvent::MoveUsed { side: SideId::Opponent, move_used: Move::Tackle, .. }
        )));
    }

    #[test]
    fn ai_out_of_pp_struggles_every_turn() {
        let mut state = create_test_battle(
            vec![TestPokemonBuilder::new("Hero", 50).build()],
            vec![TestPokemonBuilder::new("Spent", 50).build()],
        );
        for slot in &mut state.active_mut(SideId::Opponent).moves {
            slot.pp = 0;
        }
        let max_hp = state.active(SideId::Opponent).max_hp();

        for _ in 0..2 {
            let bus = assert_ok(resolve_turn(
                &mut state,
                PlayerAction::UseMove { move_: Move::Tackle },
                &mut predictable_rng(),
            ));
            assert!(bus.events().iter().any(|event| matches!(
                event,
                BattleEvent::MoveUsed { side: SideId::Opponent, move_used: Move::Struggle, .. }
            )));
            assert!(bus.events().iter().any(|event| matches!(
                event,
                BattleEvent::ResidualDamage { target, source: ResidualSource::Recoil, damage, .. }
                    if target == "Spent" && *damage == max_hp / 4
            )));
        }
        assert_eq!(state.turn_number, 3);
    }

    #[test]
    fn struggle_is_legal_only_without_pp() {
        let mut state = create_test_battle(
            vec![TestPokemonBuilder::new("Hero", 50).build()],
            vec![TestPokemonBuilder::new("Foe", 50).build()],
        );
        let struggle = PlayerAction::UseMove { move_: Move::Struggle };
        assert_eq!(
            validate_player_action(&state, SideId::Player, &struggle),
            Err(BattleEngineError::Action(ActionError::UnknownMove(Move::Struggle)))
        );

        for slot in &mut state.active_mut(SideId::Player).moves {
            slot.pp = 0;
        }
        assert_eq!(valid_actions(&state, SideId::Player), vec![struggle]);
        assert_ok(resolve_turn(&mut state, struggle, &mut predictable_rng()));
        assert!(!state.active(SideId::Opponent).is_full_hp());
    }
}
