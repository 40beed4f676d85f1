#[cfg(test)]
mod tests {
    use crate::battle::engine::execute_turn;
    use crate::battle::state::{BattleEvent, BattleState, PerSide, SideId, TurnRng};
    use crate::battle::tests::common::{assert_ok, create_test_battle, predictable_rng, TestPokemonBuilder};
    use crate::player::PlayerAction;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::{Ability, Move, PokemonType, StatBlock};

    fn battle(move_: Move, ability: Ability, foe_hp: Option<u16>) -> BattleState {
        let mut state = create_test_battle(
            vec![TestPokemonBuilder::new("Hitter", 50)
                .with_moves(vec![move_])
                .with_ability(ability)
                .with_stats(StatBlock::new(80, 80, 80, 80, 80, 150))
                .build()],
            vec![
                TestPokemonBuilder::new("Sponge", 50)
                    .with_stats(StatBlock::new(200, 80, 200, 80, 200, 50))
                    .with_moves(vec![Move::Splash])
                    .build(),
                TestPokemonBuilder::new("Reserve", 50).build(),
            ],
        );
        if let Some(hp) = foe_hp {
            state.players[SideId::Opponent].team[0].set_hp(hp);
        }
        state
    }

    fn hits_landed(state: &mut BattleState, move_: Move, rng: &mut TurnRng) -> usize {
        let bus = assert_ok(execute_turn(
            state,
            PerSide::new(
                PlayerAction::UseMove { move_ },
                PlayerAction::UseMove { move_: Move::Splash },
            ),
            rng,
        ));
        bus.events()
            .iter()
            .filter(|event| matches!(event, BattleEvent::DamageDealt { .. }))
            .count()
    }

    #[rstest]
    #[case(Move::DoubleKick, Ability::Other, 2)]
    #[case(Move::BulletSeed, Ability::Other, 3)]
    #[case(Move::RockBlast, Ability::SkillLink, 5)]
    #[case(Move::Tackle, Ability::SkillLink, 1)]
    fn hit_counts(#[case] move_: Move, #[case] ability: Ability, #[case] expected: usize) {
        let mut state = battle(move_, ability, None);
        assert_eq!(hits_landed(&mut state, move_, &mut predictable_rng()), expected);
    }

    #[test]
    fn high_roll_gives_five_hits() {
        let mut state = battle(Move::BulletSeed, Ability::Other, None);
        // accuracy, hit count, then crit and damage roll per hit
        let mut rng = TurnRng::new_for_test(vec![50, 95, 50, 50, 50, 50, 50, 50, 50, 50, 50, 50, 50, 50, 50, 50]);
        assert_eq!(hits_landed(&mut state, Move::BulletSeed, &mut rng), 5);
    }

    #[test]
    fn hits_stop_once_the_target_faints() {
        let mut state = battle(Move::RockBlast, Ability::SkillLink, Some(1));
        assert_eq!(hits_landed(&mut state, Move::RockBlast, &mut predictable_rng()), 1);
        assert_eq!(state.players[SideId::Opponent].active_pokemon_index, 1);
    }

    #[test]
    fn immune_target_takes_no_hits() {
        let mut state = battle(Move::DoubleKick, Ability::Other, None);
        state.players[SideId::Opponent].team[0].types = vec![PokemonType::Ghost];
        assert_eq!(hits_landed(&mut state, Move::DoubleKick, &mut predictable_rng()), 0);
    }
}
