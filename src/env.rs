//! Step interface for driving a battle one human move at a time.

use crate::battle::engine::{self, resolve_turn};
use crate::battle::state::{BattleEvent, BattleState, SideId, TurnRng};
use crate::dex::{MoveDataProvider, SpeciesProvider, TrainerProvider};
use crate::errors::BattleResult;
use crate::player::{PlayerAction, PlayerType};
use crate::pokemon::StatusCondition;
use crate::teams::build_player;
use schema::{Move, Terrain, Weather};
use serde::{Deserialize, Serialize};

/// What one side's active combatant looks like from outside.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ActiveObservation {
    pub name: String,
    pub current_hp: u16,
    pub max_hp: u16,
    pub status: Option<StatusCondition>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Observation {
    pub turn_number: u32,
    pub player: ActiveObservation,
    pub opponent: ActiveObservation,
    pub weather: Option<Weather>,
    pub terrain: Option<Terrain>,
}

impl Observation {
    pub fn of(state: &BattleState) -> Self {
        let active = |side| {
            let pokemon = state.active(side);
            ActiveObservation {
                name: pokemon.name.clone(),
                current_hp: pokemon.current_hp(),
                max_hp: pokemon.max_hp(),
                status: pokemon.status,
            }
        };
        Self {
            turn_number: state.turn_number,
            player: active(SideId::Player),
            opponent: active(SideId::Opponent),
            weather: state.field.weather(),
            terrain: state.field.terrain(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub observation: Observation,
    /// +1 when the human side wins on this step, -1 when it loses, else 0.
    pub reward: f32,
    pub done: bool,
    pub winner: Option<SideId>,
    pub events: Vec<BattleEvent>,
}

/// Owns one battle and its random source. The player side is the human;
/// the opponent side is answered by the AI on every turn.
#[derive(Debug)]
pub struct BattleEnv {
    state: BattleState,
    rng: TurnRng,
    opening: Vec<BattleEvent>,
}

impl BattleEnv {
    /// Takes ownership of a fresh battle and runs the lead switch-in effects.
    pub fn new(mut state: BattleState, mut rng: TurnRng) -> Self {
        let opening = engine::start_battle(&mut state, &mut rng).into_events();
        Self { state, rng, opening }
    }

    /// Seats two trainers from `dex` against each other with a seeded random source.
    pub fn from_trainers<D>(player_id: &str, opponent_id: &str, dex: &D, seed: u64) -> BattleResult<Self>
    where
        D: MoveDataProvider + SpeciesProvider + TrainerProvider,
    {
        let player = build_player(player_id, PlayerType::Human, dex)?;
        let opponent = build_player(opponent_id, PlayerType::Ai, dex)?;
        let battle_id = format!("{player_id}_vs_{opponent_id}");
        Ok(Self::new(
            BattleState::new(battle_id, player, opponent),
            TurnRng::seeded(seed),
        ))
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    /// Events produced by the leads entering the field.
    pub fn opening_events(&self) -> &[BattleEvent] {
        &self.opening
    }

    pub fn observation(&self) -> Observation {
        Observation::of(&self.state)
    }

    /// Resolves one turn with the human side using `move_`. An illegal move
    /// is rejected and the battle is left untouched.
    pub fn apply_turn(&mut self, move_: Move) -> BattleResult<Vec<BattleEvent>> {
        self.apply_action(PlayerAction::UseMove { move_ })
    }

    /// Like `apply_turn`, but the human may also switch.
    pub fn apply_action(&mut self, action: PlayerAction) -> BattleResult<Vec<BattleEvent>> {
        let bus = resolve_turn(&mut self.state, action, &mut self.rng)?;
        Ok(bus.into_events())
    }

    pub fn step(&mut self, move_: Move) -> BattleResult<StepResult> {
        let events = self.apply_turn(move_)?;
        let winner = self.state.winner();
        let reward = match winner {
            Some(SideId::Player) => 1.0,
            Some(SideId::Opponent) => -1.0,
            None => 0.0,
        };
        Ok(StepResult {
            observation: self.observation(),
            reward,
            done: self.state.is_over(),
            winner,
            events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::{create_test_battle, predictable_rng, TestPokemonBuilder};
    use crate::dex::Dex;
    use crate::errors::{ActionError, BattleEngineError, BattleStateError};
    use crate::teams::{Trainer, TrainerPokemon};
    use pretty_assertions::assert_eq;
    use schema::{Ability, PokemonType, SpeciesData, StatBlock};

    fn env() -> BattleEnv {
        let state = create_test_battle(
            vec![TestPokemonBuilder::new("Hero", 50)
                .with_stats(StatBlock::new(80, 80, 80, 80, 80, 120))
                .build()],
            vec![TestPokemonBuilder::new("Rival", 50).build()],
        );
        BattleEnv::new(state, predictable_rng())
    }

    #[test]
    fn step_reports_an_ongoing_turn() {
        let mut env = env();
        let result = env.step(Move::Tackle).unwrap();
        assert!(!result.done);
        assert_eq!(result.reward, 0.0);
        assert_eq!(result.winner, None);
        assert_eq!(result.observation.turn_number, 2);
        assert!(result.observation.player.current_hp < result.observation.player.max_hp);
        assert!(!result.events.is_empty());
    }

    #[test]
    fn winning_step_pays_out() {
        let mut env = env();
        env.state.active_mut(SideId::Opponent).set_hp(1);
        let result = env.step(Move::Tackle).unwrap();
        assert!(result.done);
        assert_eq!(result.reward, 1.0);
        assert_eq!(result.winner, Some(SideId::Player));
        assert_eq!(
            env.step(Move::Tackle),
            Err(BattleEngineError::BattleState(BattleStateError::BattleOver))
        );
    }

    #[test]
    fn losing_step_costs() {
        let mut env = env();
        env.state.active_mut(SideId::Player).set_hp(1);
        env.state.active_mut(SideId::Opponent).stages.set(schema::StageStat::Speed, 6);
        let result = env.step(Move::Tackle).unwrap();
        assert_eq!(result.reward, -1.0);
        assert_eq!(result.winner, Some(SideId::Opponent));
    }

    #[test]
    fn illegal_move_leaves_the_battle_alone() {
        let mut env = env();
        let before = env.state().clone();
        assert_eq!(
            env.apply_turn(Move::Thunderbolt),
            Err(BattleEngineError::Action(ActionError::UnknownMove(Move::Thunderbolt)))
        );
        assert_eq!(env.state(), &before);
    }

    #[test]
    fn observation_renders_as_json() {
        let env = env();
        let json = env.observation().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["player"]["name"], "Hero");
        assert_eq!(value["weather"], serde_json::Value::Null);
    }

    #[test]
    fn trainers_from_a_dex_enter_with_their_abilities() {
        let mut dex = Dex::with_builtin_moves();
        dex.add_species(
            SpeciesData::new("Tyranitar", &[PokemonType::Rock, PokemonType::Dark], StatBlock::new(100, 134, 110, 95, 100, 61))
                .with_abilities(&[Ability::SandStream]),
        );
        dex.add_species(SpeciesData::new("Pidgey", &[PokemonType::Normal, PokemonType::Flying], StatBlock::uniform(40)));
        dex.add_trainer(Trainer {
            id: "red".into(),
            name: "Red".into(),
            team: vec![TrainerPokemon::new("Tyranitar", 50, vec![Move::Crunch])],
        });
        dex.add_trainer(Trainer {
            id: "blue".into(),
            name: "Blue".into(),
            team: vec![TrainerPokemon::new("Pidgey", 50, vec![Move::Tackle])],
        });

        let env = BattleEnv::from_trainers("red", "blue", &dex, 42).unwrap();
        assert_eq!(env.observation().weather, Some(Weather::Sand));
        assert!(env
            .opening_events()
            .iter()
            .any(|event| matches!(event, BattleEvent::AbilityActivated { ability: Ability::SandStream, .. })));
    }
}
