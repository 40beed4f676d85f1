use crate::battle::field::Field;
use crate::battle::state::{SideId, TurnRng};
use crate::pokemon::{PokemonInst, StatusCondition};
use schema::{Ability, Item, MoveCategory, MoveData, PokemonType, StageStat, Stat, Weather};

/// Apply a stat stage: `x(2+s)/2` when raised, `x*2/(2-s)` when lowered.
pub fn apply_stage(value: u16, stage: i8) -> u16 {
    let value = value as u32;
    let stage = stage.clamp(-6, 6) as i32;
    let scaled = if stage >= 0 {
        value * (2 + stage as u32) / 2
    } else {
        value * 2 / (2 - stage) as u32
    };
    scaled.min(u16::MAX as u32) as u16
}

/// Apply accuracy/evasion stage multipliers: `(3+s)/3` when raised, `3/(3-s)` when lowered.
pub fn accuracy_stage_multiplier(stage: i8) -> f64 {
    let stage = stage.clamp(-6, 6) as f64;
    if stage >= 0.0 {
        (3.0 + stage) / 3.0
    } else {
        3.0 / (3.0 - stage)
    }
}

/// Calculate effective speed including stat stages, paralysis, weather abilities and tailwind
pub fn effective_speed(pokemon: &PokemonInst, field: &Field, side: SideId, paralysis_divisor: u16) -> u16 {
    let mut speed = pokemon.stat(Stat::Speed) as u32;

    if pokemon.status == Some(StatusCondition::Paralysis) {
        speed /= paralysis_divisor.max(1) as u32;
    }

    let weather_boost = match (pokemon.ability, field.weather()) {
        (Ability::SwiftSwim, Some(Weather::Rain))
        | (Ability::Chlorophyll, Some(Weather::Sun))
        | (Ability::SandRush, Some(Weather::Sand))
        | (Ability::SlushRush, Some(Weather::Hail)) => true,
        _ => false,
    };
    if weather_boost {
        speed *= 2;
    }

    if field.side(side).tailwind > 0 {
        speed *= 2;
    }

    speed.min(u16::MAX as u32) as u16
}

/// Move priority plus ability-granted bonuses.
pub fn effective_priority(pokemon: &PokemonInst, move_data: &MoveData) -> i8 {
    let mut priority = move_data.priority;
    match pokemon.ability {
        Ability::Prankster if move_data.category == MoveCategory::Status => priority += 1,
        Ability::GaleWings if move_data.move_type == PokemonType::Flying && pokemon.is_full_hp() => {
            priority += 1
        }
        _ => {}
    }
    priority
}

/// Type effectiveness of a move against a defender, including Scrappy and
/// Ground-type moves missing airborne targets.
pub fn move_effectiveness(
    attacker: &PokemonInst,
    defender: &PokemonInst,
    move_type: PokemonType,
    field: &Field,
) -> f32 {
    if move_type == PokemonType::Ground && !defender.is_grounded(field) {
        return 0.0;
    }

    defender
        .types
        .iter()
        .map(|&defending| {
            let scrappy_hit = attacker.ability == Ability::Scrappy
                && defending == PokemonType::Ghost
                && matches!(move_type, PokemonType::Normal | PokemonType::Fighting);
            if scrappy_hit {
                1.0
            } else {
                PokemonType::type_effectiveness(move_type, defending)
            }
        })
        .product()
}

/// Final hit chance in percent, or `None` when the move cannot miss.
pub fn hit_chance(attacker: &PokemonInst, defender: &PokemonInst, move_data: &MoveData, field: &Field) -> Option<u8> {
    let base_accuracy = move_data.accuracy?;

    if attacker.ability == Ability::NoGuard || defender.ability == Ability::NoGuard {
        return None;
    }
    if let Some(weather) = move_data.move_.perfect_accuracy_weather() {
        if field.is_weather(weather) {
            return None;
        }
    }

    let stage = (attacker.stages.get(StageStat::Accuracy) - defender.stages.get(StageStat::Evasion)).clamp(-6, 6);
    let mut accuracy = base_accuracy as f64 * accuracy_stage_multiplier(stage);

    if attacker.ability == Ability::CompoundEyes {
        accuracy *= 1.3;
    }
    if attacker.ability == Ability::Hustle && move_data.category == MoveCategory::Physical {
        accuracy *= 0.8;
    }
    if attacker.held_item(field) == Some(Item::WideLens) {
        accuracy *= 1.1;
    }
    match (defender.ability, field.weather()) {
        (Ability::SandVeil, Some(Weather::Sand)) | (Ability::SnowCloak, Some(Weather::Hail)) => {
            accuracy *= 0.8
        }
        _ => {}
    }
    if defender.held_item(field) == Some(Item::BrightPowder) {
        accuracy *= 0.9;
    }
    if field.gravity > 0 {
        accuracy = accuracy * 5.0 / 3.0;
    }

    Some(accuracy.round().clamp(1.0, 100.0) as u8)
}

/// Calculate if a move hits based on accuracy, evasion, and move accuracy
/// Returns true if the move hits, false if it misses
pub fn move_hits(
    attacker: &PokemonInst,
    defender: &PokemonInst,
    move_data: &MoveData,
    field: &Field,
    rng: &mut TurnRng,
) -> bool {
    match hit_chance(attacker, defender, move_data, field) {
        None => true,
        Some(chance) => rng.next_outcome("accuracy") <= chance,
    }
}

/// Critical-hit stage from the move, Focus Energy, items and abilities.
pub fn crit_stage(attacker: &PokemonInst, move_data: &MoveData, field: &Field) -> u8 {
    let mut stage = 0;
    if move_data.move_.is_high_crit() {
        stage += 1;
    }
    if attacker.volatiles.focus_energy {
        stage += 2;
    }
    if attacker.held_item(field).is_some_and(|item| item.boosts_crit()) {
        stage += 1;
    }
    if attacker.ability == Ability::SuperLuck {
        stage += 1;
    }
    stage
}

/// Critical-hit odds for a stage: 1/16, 1/8, 1/2, then guaranteed.
pub fn crit_odds(stage: u8) -> (u32, u32) {
    match stage {
        0 => (1, 16),
        1 => (1, 8),
        2 => (1, 2),
        _ => (1, 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::field::Timed;
    use rstest::rstest;
    use schema::{BattleFormat, Move, SpeciesData, StatBlock};

    fn mon(types: &[PokemonType]) -> PokemonInst {
        PokemonInst::new(
            &SpeciesData::new("Testmon", types, StatBlock::uniform(80)),
            50,
            vec![],
        )
    }

    #[rstest]
    #[case(0, 1.0)]
    #[case(1, 4.0 / 3.0)]
    #[case(6, 3.0)]
    #[case(-1, 0.75)]
    #[case(-6, 1.0 / 3.0)]
    fn accuracy_stages(#[case] stage: i8, #[case] expected: f64) {
        assert!((accuracy_stage_multiplier(stage) - expected).abs() < 1e-9);
    }

    #[test]
    fn paralysis_quarters_and_tailwind_doubles_speed() {
        let mut field = Field::new(BattleFormat::Single);
        let mut pokemon = mon(&[PokemonType::Normal]);
        let base = effective_speed(&pokemon, &field, SideId::Player, 4);

        pokemon.status = Some(StatusCondition::Paralysis);
        assert_eq!(effective_speed(&pokemon, &field, SideId::Player, 4), base / 4);

        field.side_mut(SideId::Player).tailwind = 3;
        assert_eq!(effective_speed(&pokemon, &field, SideId::Player, 4), base / 4 * 2);
        assert_eq!(effective_speed(&pokemon, &field, SideId::Opponent, 4), base / 4);
    }

    #[test]
    fn swift_swim_needs_rain() {
        let mut field = Field::new(BattleFormat::Single);
        let pokemon = mon(&[PokemonType::Water]).with_ability(Ability::SwiftSwim);
        let base = effective_speed(&pokemon, &field, SideId::Player, 4);
        field.weather = Some(Timed::new(Weather::Rain, 5));
        assert_eq!(effective_speed(&pokemon, &field, SideId::Player, 4), base * 2);
    }

    #[test]
    fn prankster_only_boosts_status_moves() {
        let pokemon = mon(&[PokemonType::Dark]).with_ability(Ability::Prankster);
        assert_eq!(effective_priority(&pokemon, &Move::ThunderWave.data()), 1);
        assert_eq!(effective_priority(&pokemon, &Move::Tackle.data()), 0);
    }

    #[test]
    fn ground_moves_miss_airborne_targets() {
        let field = Field::new(BattleFormat::Single);
        let attacker = mon(&[PokemonType::Ground]);
        let flyer = mon(&[PokemonType::Flying]);
        let balloon = mon(&[PokemonType::Steel]).with_item(Item::AirBalloon);
        assert_eq!(move_effectiveness(&attacker, &flyer, PokemonType::Ground, &field), 0.0);
        assert_eq!(move_effectiveness(&attacker, &balloon, PokemonType::Ground, &field), 0.0);

        let mut gravity = Field::new(BattleFormat::Single);
        gravity.gravity = 3;
        assert_eq!(move_effectiveness(&attacker, &flyer, PokemonType::Ground, &gravity), 1.0);
    }

    #[test]
    fn scrappy_hits_ghosts() {
        let field = Field::new(BattleFormat::Single);
        let ghost = mon(&[PokemonType::Ghost]);
        let plain = mon(&[PokemonType::Normal]);
        let scrappy = mon(&[PokemonType::Normal]).with_ability(Ability::Scrappy);
        assert_eq!(move_effectiveness(&plain, &ghost, PokemonType::Normal, &field), 0.0);
        assert_eq!(move_effectiveness(&scrappy, &ghost, PokemonType::Normal, &field), 1.0);
    }

    #[test]
    fn accuracy_modifiers_and_bypasses() {
        let mut field = Field::new(BattleFormat::Single);
        let attacker = mon(&[PokemonType::Electric]);
        let defender = mon(&[PokemonType::Water]);
        let thunder = Move::Thunder.data();
        assert_eq!(hit_chance(&attacker, &defender, &thunder, &field), Some(70));

        field.weather = Some(Timed::new(Weather::Rain, 5));
        assert_eq!(hit_chance(&attacker, &defender, &thunder, &field), None);

        let compound = attacker.clone().with_ability(Ability::CompoundEyes);
        let stone_edge = Move::StoneEdge.data();
        assert_eq!(hit_chance(&compound, &defender, &stone_edge, &field), Some(100));

        let mut evasive = defender.clone();
        evasive.stages.set(StageStat::Evasion, 1);
        assert_eq!(hit_chance(&attacker, &evasive, &stone_edge, &field), Some(60));
    }

    #[test]
    fn crit_stage_stacks() {
        let field = Field::new(BattleFormat::Single);
        let mut attacker = mon(&[PokemonType::Dark]).with_item(Item::ScopeLens);
        assert_eq!(crit_stage(&attacker, &Move::NightSlash.data(), &field), 2);
        attacker.volatiles.focus_energy = true;
        assert_eq!(crit_stage(&attacker, &Move::NightSlash.data(), &field), 4);
        assert_eq!(crit_odds(4), (1, 1));
    }
}
