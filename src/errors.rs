use schema::{Ability, Move};
use thiserror::Error;

/// Main error type for the battle engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BattleEngineError {
    #[error("Move data error: {0}")]
    MoveData(#[from] MoveDataError),
    #[error("Species data error: {0}")]
    SpeciesData(#[from] SpeciesDataError),
    #[error("Trainer data error: {0}")]
    TrainerData(#[from] TrainerDataError),
    #[error("Battle state error: {0}")]
    BattleState(#[from] BattleStateError),
    #[error("Action error: {0}")]
    Action(#[from] ActionError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to move data lookups
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveDataError {
    #[error("Move not found: {0}")]
    MoveNotFound(String),
    #[error("Malformed move data: {0}")]
    MalformedData(String),
}

/// Errors related to species data lookups
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpeciesDataError {
    #[error("Species not found: {0}")]
    SpeciesNotFound(String),
    #[error("Malformed species data: {0}")]
    MalformedData(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrainerDataError {
    #[error("Trainer not found: {0}")]
    TrainerNotFound(String),
    #[error("Trainer {0} has an empty team")]
    EmptyTeam(String),
    #[error("{species} cannot have the ability {ability}")]
    IllegalAbility { species: String, ability: Ability },
    #[error("{0} on the roster knows no moves")]
    NoMoves(String),
}

/// Errors related to battle state validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BattleStateError {
    #[error("The battle is already over")]
    BattleOver,
    #[error("Side has no healthy combatant")]
    NoActivePokemon,
    #[error("Inconsistent battle state: {0}")]
    InconsistentState(String),
}

/// Illegal actions, rejected before the battle is touched
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("{0} is not one of the active combatant's moves")]
    UnknownMove(Move),
    #[error("{0} has no PP left")]
    NoPp(Move),
    #[error("Cannot switch to team slot {0}")]
    InvalidSwitch(usize),
    #[error("The active combatant is trapped and cannot switch")]
    Trapped,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Could not parse configuration: {0}")]
    Parse(String),
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Type alias for Results using MoveDataError
pub type MoveDataResult<T> = Result<T, MoveDataError>;

/// Type alias for Results using SpeciesDataError
pub type SpeciesDataResult<T> = Result<T, SpeciesDataError>;
