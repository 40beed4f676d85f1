use crate::battle::state::{BattleState, TurnRng};
use crate::errors::BattleResult;
use crate::player::{BattlePlayer, PlayerType};
use crate::pokemon::{Gender, PokemonInst, StatusCondition};
use schema::{Ability, Item, Move, PokemonType, SpeciesData, StatBlock};

/// A builder for test combatants with common defaults: Normal type, base 80
/// in every stat, no ability or item, and Tackle as the only move.
///
/// # Example
/// ```ignore
/// let pokemon = TestPokemonBuilder::new("Pikachu", 25)
///     .with_types(vec![PokemonType::Electric])
///     .with_moves(vec![Move::Thunderbolt])
///     .with_status(StatusCondition::Paralysis)
///     .build();
/// ```
pub struct TestPokemonBuilder {
    name: String,
    level: u8,
    types: Vec<PokemonType>,
    stats: StatBlock,
    moves: Vec<Move>,
    ability: Ability,
    item: Option<Item>,
    gender: Option<Gender>,
    status: Option<StatusCondition>,
}

impl TestPokemonBuilder {
    pub fn new(name: &str, level: u8) -> Self {
        Self {
            name: name.to_string(),
            level,
            types: vec![PokemonType::Normal],
            stats: StatBlock::uniform(80),
            moves: vec![Move::Tackle],
            ability: Ability::Other,
            item: None,
            gender: None,
            status: None,
        }
    }

    pub fn with_moves(mut self, moves: Vec<Move>) -> Self {
        self.moves = moves;
        self
    }

    pub fn with_types(mut self, types: Vec<PokemonType>) -> Self {
        self.types = types;
        self
    }

    /// Sets base stats.
    pub fn with_stats(mut self, stats: StatBlock) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.ability = ability;
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.item = Some(item);
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn with_status(mut self, status: StatusCondition) -> Self {
        self.status = Some(status);
        self
    }

    pub fn build(self) -> PokemonInst {
        let species = SpeciesData::new(&self.name, &self.types, self.stats);
        let moves = self.moves.into_iter().map(Move::data).collect();
        let mut pokemon = PokemonInst::new(&species, self.level, moves).with_ability(self.ability);
        if let Some(item) = self.item {
            pokemon = pokemon.with_item(item);
        }
        if let Some(gender) = self.gender {
            pokemon = pokemon.with_gender(gender);
        }
        pokemon.status = self.status;
        pokemon
    }
}

/// A battle between a human-controlled team and an AI-controlled team.
pub fn create_test_battle(player_team: Vec<PokemonInst>, opponent_team: Vec<PokemonInst>) -> BattleState {
    let player = BattlePlayer::new("player".to_string(), "Player".to_string(), player_team);
    let opponent = BattlePlayer::new("opponent".to_string(), "Rival".to_string(), opponent_team)
        .with_type(PlayerType::Ai);
    BattleState::new("test_battle".to_string(), player, opponent)
}

/// A scripted `TurnRng` that answers 50 to every draw: no crits, no
/// full paralysis, minimum damage rolls, coin flips to the player.
pub fn predictable_rng() -> TurnRng {
    TurnRng::new_for_test(vec![50; 100])
}

/// Unwraps a result, panicking with the engine error's message.
pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}
