pub mod action_stack;
pub mod ai;
pub mod conditions;
pub mod damage;
pub mod end_of_turn;
pub mod engine;
pub mod field;
pub mod move_effects;
pub mod move_execution;
pub mod state;
pub mod stats;
pub mod switching;

#[cfg(test)]
pub mod tests;
