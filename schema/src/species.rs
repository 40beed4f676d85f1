use crate::{Ability, PokemonType, StatBlock};
use serde::{Deserialize, Serialize};

/// Species entry as supplied by a species data provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesData {
    pub name: String,
    pub types: Vec<PokemonType>,
    pub base_stats: StatBlock,
    #[serde(default)]
    pub abilities: Vec<Ability>,
}

impl SpeciesData {
    pub fn new(name: &str, types: &[PokemonType], base_stats: StatBlock) -> Self {
        Self {
            name: name.to_string(),
            types: types.to_vec(),
            base_stats,
            abilities: Vec::new(),
        }
    }

    pub fn with_abilities(mut self, abilities: &[Ability]) -> Self {
        self.abilities = abilities.to_vec();
        self
    }

    /// Whether `ability` is legal for this species. An empty list allows any.
    pub fn allows_ability(&self, ability: Ability) -> bool {
        self.abilities.is_empty() || self.abilities.contains(&ability)
    }
}
