//! Data lookups the engine depends on.
//!
//! The battle core only sees the three provider traits. `Dex` is the in-memory
//! implementation: it can be assembled in code or parsed from a RON document
//! listing moves, species and trainers.

use crate::errors::{
    BattleResult, ConfigError, MoveDataError, MoveDataResult, SpeciesDataError, SpeciesDataResult,
    TrainerDataError,
};
use crate::teams::Trainer;
use schema::{Move, MoveData, SpeciesData};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub trait MoveDataProvider {
    fn move_data(&self, move_: Move) -> MoveDataResult<MoveData>;
}

pub trait SpeciesProvider {
    /// Looks a species up by name, ignoring case.
    fn species(&self, name: &str) -> SpeciesDataResult<SpeciesData>;
}

pub trait TrainerProvider {
    fn trainer(&self, id: &str) -> Result<Trainer, TrainerDataError>;
}

/// Serialized shape of a dex document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct DexDocument {
    /// When false, only moves listed in `moves` resolve.
    builtin_moves: Option<bool>,
    moves: Vec<MoveData>,
    species: Vec<SpeciesData>,
    trainers: Vec<Trainer>,
}

#[derive(Debug, Clone, Default)]
pub struct Dex {
    builtin_moves: bool,
    moves: HashMap<Move, MoveData>,
    species: HashMap<String, SpeciesData>,
    trainers: HashMap<String, Trainer>,
}

impl Dex {
    /// An empty dex with no move table at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty dex whose moves fall back to the built-in move table.
    pub fn with_builtin_moves() -> Self {
        Self {
            builtin_moves: true,
            ..Self::default()
        }
    }

    /// Parses a RON dex document. Duplicate species or trainer entries are rejected.
    pub fn from_ron_str(source: &str) -> BattleResult<Self> {
        let document: DexDocument = ron::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let mut dex = Self {
            builtin_moves: document.builtin_moves.unwrap_or(true),
            ..Self::default()
        };
        for data in document.moves {
            if dex.moves.insert(data.move_, data).is_some() {
                return Err(MoveDataError::MalformedData(format!("{} is listed twice", data.move_)).into());
            }
        }
        for species in document.species {
            let name = species.name.clone();
            if dex.species.contains_key(&name.to_lowercase()) {
                return Err(SpeciesDataError::MalformedData(format!("{name} is listed twice")).into());
            }
            dex.add_species(species);
        }
        for trainer in document.trainers {
            if trainer.team.is_empty() {
                return Err(TrainerDataError::EmptyTeam(trainer.id).into());
            }
            dex.add_trainer(trainer);
        }
        tracing::debug!(
            moves = dex.moves.len(),
            species = dex.species.len(),
            trainers = dex.trainers.len(),
            "dex loaded"
        );
        Ok(dex)
    }

    /// Adds or replaces a move entry.
    pub fn add_move(&mut self, data: MoveData) -> &mut Self {
        self.moves.insert(data.move_, data);
        self
    }

    pub fn add_species(&mut self, species: SpeciesData) -> &mut Self {
        self.species.insert(species.name.to_lowercase(), species);
        self
    }

    pub fn add_trainer(&mut self, trainer: Trainer) -> &mut Self {
        self.trainers.insert(trainer.id.clone(), trainer);
        self
    }
}

impl MoveDataProvider for Dex {
    fn move_data(&self, move_: Move) -> MoveDataResult<MoveData> {
        match self.moves.get(&move_) {
            Some(data) => Ok(*data),
            None if self.builtin_moves => Ok(move_.data()),
            None => Err(MoveDataError::MoveNotFound(move_.to_string())),
        }
    }
}

impl SpeciesProvider for Dex {
    fn species(&self, name: &str) -> SpeciesDataResult<SpeciesData> {
        self.species
            .get(&name.to_lowercase())
            .cloned()
            .ok_or_else(|| SpeciesDataError::SpeciesNotFound(name.to_string()))
    }
}

impl TrainerProvider for Dex {
    fn trainer(&self, id: &str) -> Result<Trainer, TrainerDataError> {
        self.trainers
            .get(id)
            .cloned()
            .ok_or_else(|| TrainerDataError::TrainerNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BattleEngineError;
    use pretty_assertions::assert_eq;
    use schema::{PokemonType, StatBlock};

    const DOCUMENT: &str = r#"(
        builtin_moves: Some(false),
        moves: [
            (
                move: Tackle,
                move_type: Normal,
                category: Physical,
                power: 40,
                accuracy: Some(100),
                pp: 35,
                priority: 0,
                multi_hit: (1, 1),
                effect_chance: 0,
                target_def_halved: false,
                has_secondary: false,
            ),
        ],
        species: [
            (name: "Rattata", types: [Normal], base_stats: (hp: 30, attack: 56, defense: 35, sp_attack: 25, sp_defense: 35, speed: 72)),
        ],
        trainers: [
            (id: "youngster_joey", name: "Joey", team: [(species: "Rattata", level: 5, moves: [Tackle])]),
        ],
    )"#;

    #[test]
    fn parses_a_full_document() {
        let dex = Dex::from_ron_str(DOCUMENT).unwrap();
        assert_eq!(dex.move_data(Move::Tackle).unwrap().power, 40);
        assert_eq!(dex.species("RATTATA").unwrap().types, vec![PokemonType::Normal]);
        assert_eq!(dex.trainer("youngster_joey").unwrap().name, "Joey");
    }

    #[test]
    fn missing_entries_are_errors() {
        let dex = Dex::from_ron_str(DOCUMENT).unwrap();
        assert_eq!(
            dex.move_data(Move::Thunderbolt),
            Err(MoveDataError::MoveNotFound(Move::Thunderbolt.to_string()))
        );
        assert!(matches!(dex.species("Pidgey"), Err(SpeciesDataError::SpeciesNotFound(_))));
        assert!(matches!(dex.trainer("nobody"), Err(TrainerDataError::TrainerNotFound(_))));
    }

    #[test]
    fn builtin_table_backs_unlisted_moves() {
        let mut dex = Dex::with_builtin_moves();
        dex.add_species(SpeciesData::new("Pikachu", &[PokemonType::Electric], StatBlock::uniform(60)));
        assert_eq!(dex.move_data(Move::Thunderbolt).unwrap(), Move::Thunderbolt.data());
        assert!(dex.species("pikachu").is_ok());
    }

    #[test]
    fn duplicate_species_are_rejected() {
        let source = r#"(species: [
            (name: "Eevee", types: [Normal], base_stats: (hp: 55, attack: 55, defense: 50, sp_attack: 45, sp_defense: 65, speed: 55)),
            (name: "eevee", types: [Normal], base_stats: (hp: 55, attack: 55, defense: 50, sp_attack: 45, sp_defense: 65, speed: 55)),
        ])"#;
        assert!(matches!(
            Dex::from_ron_str(source),
            Err(BattleEngineError::SpeciesData(SpeciesDataError::MalformedData(_)))
        ));
    }

    #[test]
    fn malformed_ron_is_a_config_error() {
        assert!(matches!(
            Dex::from_ron_str("(species: [oops"),
            Err(BattleEngineError::Config(ConfigError::Parse(_)))
        ));
    }
}
