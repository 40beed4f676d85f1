//! Trainer rosters and turning them into battle-ready teams.

use crate::dex::{MoveDataProvider, SpeciesProvider, TrainerProvider};
use crate::errors::{BattleResult, TrainerDataError};
use crate::player::{BattlePlayer, PlayerType};
use crate::pokemon::{Gender, PokemonInst};
use schema::{Ability, Item, Move, Nature, StatBlock};
use serde::{Deserialize, Serialize};

/// One roster entry. Anything left out falls back to the species default.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TrainerPokemon {
    pub species: String,
    pub level: u8,
    pub moves: Vec<Move>,
    #[serde(default)]
    pub item: Option<Item>,
    #[serde(default)]
    pub ability: Option<Ability>,
    #[serde(default)]
    pub nature: Option<Nature>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub ivs: Option<StatBlock>,
    #[serde(default)]
    pub evs: Option<StatBlock>,
}

impl TrainerPokemon {
    pub fn new(species: &str, level: u8, moves: Vec<Move>) -> Self {
        Self {
            species: species.to_string(),
            level,
            moves,
            item: None,
            ability: None,
            nature: None,
            gender: None,
            ivs: None,
            evs: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Trainer {
    pub id: String,
    pub name: String,
    pub team: Vec<TrainerPokemon>,
}

/// Builds one combatant from a roster entry.
pub fn build_pokemon<D>(entry: &TrainerPokemon, dex: &D) -> BattleResult<PokemonInst>
where
    D: MoveDataProvider + SpeciesProvider,
{
    let species = dex.species(&entry.species)?;
    if entry.moves.is_empty() {
        return Err(TrainerDataError::NoMoves(species.name).into());
    }
    let moves = entry
        .moves
        .iter()
        .map(|&move_| dex.move_data(move_))
        .collect::<Result<Vec<_>, _>>()?;

    let mut pokemon = PokemonInst::new(&species, entry.level, moves);
    if let Some(ability) = entry.ability {
        if !species.allows_ability(ability) {
            return Err(TrainerDataError::IllegalAbility {
                species: species.name,
                ability,
            }
            .into());
        }
        pokemon = pokemon.with_ability(ability);
    }
    if let Some(item) = entry.item {
        pokemon = pokemon.with_item(item);
    }
    if let Some(nature) = entry.nature {
        pokemon = pokemon.with_nature(nature);
    }
    if let Some(gender) = entry.gender {
        pokemon = pokemon.with_gender(gender);
    }
    if let Some(ivs) = entry.ivs {
        pokemon = pokemon.with_ivs(ivs);
    }
    if let Some(evs) = entry.evs {
        pokemon = pokemon.with_evs(evs);
    }
    Ok(pokemon)
}

/// Builds a trainer's whole team in roster order.
pub fn build_team<D>(trainer: &Trainer, dex: &D) -> BattleResult<Vec<PokemonInst>>
where
    D: MoveDataProvider + SpeciesProvider,
{
    if trainer.team.is_empty() {
        return Err(TrainerDataError::EmptyTeam(trainer.id.clone()).into());
    }
    trainer.team.iter().map(|entry| build_pokemon(entry, dex)).collect()
}

/// Looks a trainer up and seats their team as a battle player.
pub fn build_player<D>(trainer_id: &str, player_type: PlayerType, dex: &D) -> BattleResult<BattlePlayer>
where
    D: MoveDataProvider + SpeciesProvider + TrainerProvider,
{
    let trainer = dex.trainer(trainer_id)?;
    let team = build_team(&trainer, dex)?;
    tracing::debug!(trainer = %trainer.id, size = team.len(), "team built");
    Ok(BattlePlayer::new(trainer.id, trainer.name, team).with_type(player_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dex::Dex;
    use crate::errors::{BattleEngineError, MoveDataError, SpeciesDataError};
    use pretty_assertions::assert_eq;
    use schema::{PokemonType, SpeciesData, Stat};

    fn dex() -> Dex {
        let mut dex = Dex::with_builtin_moves();
        dex.add_species(
            SpeciesData::new("Growlithe", &[PokemonType::Fire], StatBlock::new(55, 70, 45, 70, 50, 60))
                .with_abilities(&[Ability::Intimidate, Ability::FlashFire]),
        );
        dex.add_species(SpeciesData::new("Magikarp", &[PokemonType::Water], StatBlock::new(20, 10, 55, 15, 20, 80)));
        dex
    }

    fn trainer(team: Vec<TrainerPokemon>) -> Trainer {
        Trainer {
            id: "ace".to_string(),
            name: "Ace".to_string(),
            team,
        }
    }

    #[test]
    fn roster_overrides_are_applied() {
        let mut entry = TrainerPokemon::new("growlithe", 30, vec![Move::Flamethrower, Move::Crunch]);
        entry.ability = Some(Ability::FlashFire);
        entry.item = Some(Item::Leftovers);
        entry.nature = Some(Nature::Adamant);
        entry.evs = Some(StatBlock::new(0, 252, 0, 0, 0, 0));

        let team = build_team(&trainer(vec![entry]), &dex()).unwrap();
        let growlithe = &team[0];
        assert_eq!(growlithe.name, "Growlithe");
        assert_eq!(growlithe.ability, Ability::FlashFire);
        assert_eq!(growlithe.item, Some(Item::Leftovers));
        assert_eq!(growlithe.moves.len(), 2);
        assert!(growlithe.raw_stat(Stat::Attack) > growlithe.raw_stat(Stat::SpecialAttack));
        assert!(growlithe.is_full_hp());
    }

    #[test]
    fn default_ability_is_the_first_listed() {
        let entry = TrainerPokemon::new("Growlithe", 30, vec![Move::Tackle]);
        let team = build_team(&trainer(vec![entry]), &dex()).unwrap();
        assert_eq!(team[0].ability, Ability::Intimidate);
    }

    #[test]
    fn unknown_species_propagates() {
        let entry = TrainerPokemon::new("Missingno", 30, vec![Move::Tackle]);
        assert_eq!(
            build_team(&trainer(vec![entry]), &dex()),
            Err(BattleEngineError::SpeciesData(SpeciesDataError::SpeciesNotFound("Missingno".into())))
        );
    }

    #[test]
    fn missing_move_propagates() {
        let mut strict = Dex::new();
        strict.add_species(dex().species("Magikarp").unwrap());
        strict.add_move(Move::Splash.data());
        let entry = TrainerPokemon::new("Magikarp", 10, vec![Move::Splash, Move::Tackle]);
        assert!(matches!(
            build_team(&trainer(vec![entry]), &strict),
            Err(BattleEngineError::MoveData(MoveDataError::MoveNotFound(_)))
        ));
    }

    #[test]
    fn illegal_ability_is_rejected() {
        let mut entry = TrainerPokemon::new("Growlithe", 30, vec![Move::Tackle]);
        entry.ability = Some(Ability::Levitate);
        assert!(matches!(
            build_team(&trainer(vec![entry]), &dex()),
            Err(BattleEngineError::TrainerData(TrainerDataError::IllegalAbility { .. }))
        ));
    }

    #[test]
    fn empty_roster_is_rejected() {
        assert_eq!(
            build_team(&trainer(Vec::new()), &dex()),
            Err(BattleEngineError::TrainerData(TrainerDataError::EmptyTeam("ace".into())))
        );
    }

    #[test]
    fn build_player_seats_the_trainer() {
        let mut dex = dex();
        dex.add_trainer(trainer(vec![TrainerPokemon::new("Magikarp", 5, vec![Move::Splash])]));
        let player = build_player("ace", PlayerType::Ai, &dex).unwrap();
        assert_eq!(player.player_name, "Ace");
        assert_eq!(player.player_type, PlayerType::Ai);
        assert_eq!(player.team.len(), 1);
        assert!(build_player("nobody", PlayerType::Ai, &dex).is_err());
    }
}
