//! Singles battle engine
//!
//! Resolves turns of a one-on-one monster battle: speed and priority
//! ordering, damage, move side effects, status and volatile bookkeeping,
//! field conditions and end-of-turn residuals, with a heuristic AI on the
//! opponent's side. Static data (types, moves, species, items) lives in the
//! `schema` crate.

pub mod battle;
pub mod config;
pub mod dex;
pub mod env;
pub mod errors;
pub mod player;
pub mod pokemon;
pub mod teams;

// --- PUBLIC API RE-EXPORTS ---

pub use schema::{
    Ability, BattleFormat, Item, Move, MoveCategory, MoveData, Nature, PokemonType, SpeciesData, StageStat,
    Stat, StatBlock, Terrain, Weather,
};

pub use battle::ai::{Behavior, ScoringAI};
pub use battle::engine::{execute_turn, resolve_turn, start_battle, valid_actions, validate_player_action};
pub use battle::state::{BattleEvent, BattleState, EventBus, GameState, PerSide, SideId, TurnRng};

pub use config::{AiConfig, BattleConfig};
pub use dex::{Dex, MoveDataProvider, SpeciesProvider, TrainerProvider};
pub use env::{BattleEnv, Observation, StepResult};
pub use player::{BattlePlayer, PlayerAction, PlayerType};
pub use pokemon::{PokemonInst, StatusCondition};
pub use teams::{build_team, Trainer, TrainerPokemon};

pub use errors::{
    ActionError, BattleEngineError, BattleResult, BattleStateError, ConfigError, MoveDataError, MoveDataResult,
    SpeciesDataError, SpeciesDataResult, TrainerDataError,
};
