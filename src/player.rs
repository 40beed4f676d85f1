use crate::pokemon::PokemonInst;
use schema::Move;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    UseMove { move_: Move },

    // The index refers to the Pokémon's position in the player's team.
    SwitchPokemon { team_index: usize },
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerType {
    Human,
    Ai,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BattlePlayer {
    pub player_id: String,
    pub player_name: String,
    pub player_type: PlayerType,
    pub team: Vec<PokemonInst>,
    pub active_pokemon_index: usize,
}

impl BattlePlayer {
    /// Creates a player whose first team member leads.
    pub fn new(player_id: String, player_name: String, team: Vec<PokemonInst>) -> Self {
        Self {
            player_id,
            player_name,
            player_type: PlayerType::Human,
            team,
            active_pokemon_index: 0,
        }
    }

    pub fn with_type(mut self, player_type: PlayerType) -> Self {
        self.player_type = player_type;
        self
    }

    pub fn active_pokemon(&self) -> &PokemonInst {
        &self.team[self.active_pokemon_index]
    }

    pub fn active_pokemon_mut(&mut self) -> &mut PokemonInst {
        &mut self.team[self.active_pokemon_index]
    }

    /// Team slots that could be switched in: healthy and not already active.
    pub fn bench_indices(&self) -> Vec<usize> {
        self.team
            .iter()
            .enumerate()
            .filter(|(i, p)| *i != self.active_pokemon_index && !p.is_fainted())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn has_healthy_bench(&self) -> bool {
        !self.bench_indices().is_empty()
    }

    /// True when every team member, active or benched, is at 0 HP.
    pub fn is_defeated(&self) -> bool {
        self.team.iter().all(|p| p.is_fainted())
    }

    pub fn can_switch_to(&self, team_index: usize) -> bool {
        self.bench_indices().contains(&team_index)
    }
}
