//! Pure damage calculation.
//!
//! Nothing here mutates a combatant. Critical hits are computed by the same
//! path with stage and screen overrides applied to copies of the inputs.

use crate::battle::field::Field;
use crate::battle::state::SideId;
use crate::battle::stats::move_effectiveness;
use crate::pokemon::{PokemonInst, StatusCondition};
use schema::{
    Ability, BattleFormat, FixedDamage, Item, Move, MoveCategory, MoveData, PokemonType, Stat,
    Terrain, Weather,
};

pub type DamageRange = (u16, u16);

const MIN_ROLL: u8 = 85;
const MAX_ROLL: u8 = 100;

/// Everything a single damage computation reads.
#[derive(Debug, Clone, Copy)]
pub struct DamageInputs<'a> {
    pub attacker: &'a PokemonInst,
    pub defender: &'a PokemonInst,
    pub move_data: &'a MoveData,
    pub field: &'a Field,
    pub attacker_side: SideId,
}

impl<'a> DamageInputs<'a> {
    pub fn new(
        attacker: &'a PokemonInst,
        defender: &'a PokemonInst,
        move_data: &'a MoveData,
        field: &'a Field,
        attacker_side: SideId,
    ) -> Self {
        Self {
            attacker,
            defender,
            move_data,
            field,
            attacker_side,
        }
    }
}

/// Non-critical (min, max) damage for one hit.
pub fn compute_damage_range(
    attacker: &PokemonInst,
    defender: &PokemonInst,
    move_data: &MoveData,
    field: &Field,
    attacker_side: SideId,
) -> DamageRange {
    let inputs = DamageInputs::new(attacker, defender, move_data, field, attacker_side);
    (roll_damage(&inputs, false, MIN_ROLL), roll_damage(&inputs, false, MAX_ROLL))
}

/// Critical (min, max) damage for one hit: the attacker's lowered stages and
/// the defender's raised stages count as neutral, screens are ignored, and the
/// result is multiplied by 1.5 (2.25 with Sniper).
pub fn compute_critical_damage_range(
    attacker: &PokemonInst,
    defender: &PokemonInst,
    move_data: &MoveData,
    field: &Field,
    attacker_side: SideId,
) -> DamageRange {
    let inputs = DamageInputs::new(attacker, defender, move_data, field, attacker_side);
    (roll_damage(&inputs, true, MIN_ROLL), roll_damage(&inputs, true, MAX_ROLL))
}

/// Whether this hit is absorbed by an unspent Disguise.
pub fn breaks_disguise(defender: &PokemonInst, move_data: &MoveData) -> bool {
    defender.ability == Ability::Disguise && !defender.ability_spent && move_data.is_damaging()
}

/// Damage for one hit at a given roll percentage (85..=100).
pub fn roll_damage(inputs: &DamageInputs, critical: bool, roll: u8) -> u16 {
    let DamageInputs {
        attacker,
        defender,
        move_data,
        field,
        ..
    } = *inputs;

    if !move_data.is_damaging() {
        return 0;
    }

    let effectiveness = effectiveness_with_terrain(inputs);
    if effectiveness == 0.0 {
        return 0;
    }

    if breaks_disguise(defender, move_data) {
        return 0;
    }

    if let Some(fixed) = move_data.move_.fixed_damage() {
        return fixed_damage(fixed, attacker, defender);
    }

    let (attack, defense) = attack_and_defense(inputs, critical);
    let power = effective_power(attacker, move_data, field);
    let base = base_damage(attacker.level, attack, defense, power);

    let mut modifier = damage_modifier(inputs, effectiveness, critical);
    if critical {
        modifier *= if attacker.ability == Ability::Sniper { 2.25 } else { 1.5 };
    }

    let roll = roll.clamp(MIN_ROLL, MAX_ROLL) as f64 / 100.0;
    let damage = (base as f64 * modifier * roll).floor();
    damage.clamp(0.0, u16::MAX as f64) as u16
}

/// `floor(floor(floor(2*L/5+2) * A * P / D) / 50) + 2`, at least 1.
pub fn base_damage(level: u8, attack: u16, defense: u16, power: u16) -> u32 {
    let level_factor = 2 * level as u64 / 5 + 2;
    let scaled = level_factor * attack as u64 * power as u64 / defense.max(1) as u64;
    let base = scaled / 50 + 2;
    base.clamp(1, u32::MAX as u64) as u32
}

/// Self-hit from confusion: a 40-power typeless physical attack on itself.
pub fn confusion_damage(pokemon: &PokemonInst, roll: u8) -> u16 {
    let mut attack = pokemon.stat(Stat::Attack);
    if pokemon.status == Some(StatusCondition::Burn) && pokemon.ability != Ability::Guts {
        attack = (attack / 2).max(1);
    }
    let defense = pokemon.stat(Stat::Defense);
    let base = base_damage(pokemon.level, attack, defense, 40);
    let roll = roll.clamp(MIN_ROLL, MAX_ROLL) as u32;
    (base * roll / 100).min(u16::MAX as u32) as u16
}

fn fixed_damage(fixed: FixedDamage, attacker: &PokemonInst, defender: &PokemonInst) -> u16 {
    match fixed {
        FixedDamage::Level => attacker.level as u16,
        FixedDamage::Flat(amount) => amount,
        FixedDamage::HalfTargetHp => (defender.current_hp() / 2).max(1),
        FixedDamage::UserHp => attacker.current_hp(),
        FixedDamage::TargetHp => defender.current_hp(),
    }
}

/// Type effectiveness with Misty Terrain halving Dragon moves against grounded targets.
fn effectiveness_with_terrain(inputs: &DamageInputs) -> f32 {
    let DamageInputs {
        attacker,
        defender,
        move_data,
        field,
        ..
    } = *inputs;
    let mut effectiveness = move_effectiveness(attacker, defender, move_data.move_type, field);
    if field.is_terrain(Terrain::Misty)
        && move_data.move_type == PokemonType::Dragon
        && defender.is_grounded(field)
    {
        effectiveness *= 0.5;
    }
    effectiveness
}

fn attack_and_defense(inputs: &DamageInputs, critical: bool) -> (u16, u16) {
    let DamageInputs {
        attacker,
        defender,
        move_data,
        field,
        ..
    } = *inputs;
    let move_ = move_data.move_;
    let physical = move_data.category == MoveCategory::Physical;

    let (attack_source, attack_stat) = match move_ {
        Move::FoulPlay => (defender, Stat::Attack),
        Move::BodyPress => (attacker, Stat::Defense),
        _ if physical => (attacker, Stat::Attack),
        _ => (attacker, Stat::SpecialAttack),
    };

    let mut defense_stat = match move_ {
        Move::Psyshock | Move::Psystrike | Move::SecretSword => Stat::Defense,
        _ if physical => Stat::Defense,
        _ => Stat::SpecialDefense,
    };
    if field.wonder_room > 0 {
        defense_stat = match defense_stat {
            Stat::Defense => Stat::SpecialDefense,
            _ => Stat::Defense,
        };
    }

    let attack_stage = stage_of(attack_source, attack_stat);
    let defense_stage = stage_of(defender, defense_stat);
    let (attack_stage, defense_stage) = if critical {
        (attack_stage.max(0), defense_stage.min(0))
    } else {
        (attack_stage, defense_stage)
    };

    let mut attack = attack_source.stat_at_stage(attack_stat, attack_stage) as u32;
    let mut defense = defender.stat_at_stage(defense_stat, defense_stage) as u32;

    let statused = attacker.status.is_some();
    if physical
        && attacker.status == Some(StatusCondition::Burn)
        && attacker.ability != Ability::Guts
        && move_ != Move::Facade
    {
        attack /= 2;
    }
    if physical && statused && attacker.ability == Ability::Guts {
        attack = attack * 3 / 2;
    }
    if !physical && attacker.ability == Ability::SolarPower && field.is_weather(Weather::Sun) {
        attack = attack * 3 / 2;
    }

    if field.is_weather(Weather::Sand)
        && defender.has_type(PokemonType::Rock)
        && defense_stat == Stat::SpecialDefense
    {
        defense = defense * 3 / 2;
    }
    if move_data.target_def_halved {
        defense /= 2;
    }

    (
        attack.clamp(1, u16::MAX as u32) as u16,
        defense.clamp(1, u16::MAX as u32) as u16,
    )
}

fn stage_of(pokemon: &PokemonInst, stat: Stat) -> i8 {
    stat.stage().map_or(0, |s| pokemon.stages.get(s))
}

/// Base power after weather, terrain and move-specific edits.
fn effective_power(attacker: &PokemonInst, move_data: &MoveData, field: &Field) -> u16 {
    let mut power = move_data.power as u32;

    if move_data.move_ == Move::Facade
        && matches!(
            attacker.status,
            Some(StatusCondition::Burn | StatusCondition::Paralysis | StatusCondition::Poison | StatusCondition::Toxic(_))
        )
    {
        power *= 2;
    }

    match (field.weather(), move_data.move_type) {
        (Some(Weather::Rain), PokemonType::Water) | (Some(Weather::Sun), PokemonType::Fire) => {
            power = power * 3 / 2
        }
        (Some(Weather::Rain), PokemonType::Fire) | (Some(Weather::Sun), PokemonType::Water) => {
            power /= 2
        }
        _ => {}
    }

    if field.is_terrain(Terrain::Grassy)
        && matches!(move_data.move_, Move::Earthquake | Move::Magnitude | Move::Bulldoze)
    {
        power /= 2;
    }

    power.clamp(1, u16::MAX as u32) as u16
}

fn damage_modifier(inputs: &DamageInputs, effectiveness: f32, critical: bool) -> f64 {
    let DamageInputs {
        attacker,
        defender,
        move_data,
        field,
        attacker_side,
    } = *inputs;
    let effectiveness = effectiveness as f64;
    let move_type = move_data.move_type;
    let physical = move_data.category == MoveCategory::Physical;
    let doubles = field.format == BattleFormat::Double;

    let mut modifier = effectiveness;

    if move_type != PokemonType::Typeless && attacker.has_type(move_type) {
        modifier *= if attacker.ability == Ability::Adaptability { 2.0 } else { 1.5 };
    }

    if attacker.is_grounded(field) {
        let terrain_boost = matches!(
            (field.terrain(), move_type),
            (Some(Terrain::Electric), PokemonType::Electric)
                | (Some(Terrain::Grassy), PokemonType::Grass)
                | (Some(Terrain::Psychic), PokemonType::Psychic)
        );
        if terrain_boost {
            modifier *= 1.5;
        }
    }

    if doubles && move_data.move_.is_spread() {
        modifier *= 0.75;
    }

    if !critical && attacker.ability != Ability::Infiltrator {
        let defending_side = field.side(attacker_side.opponent());
        let screened = defending_side.aurora_veil > 0
            || if physical {
                defending_side.reflect > 0
            } else {
                defending_side.light_screen > 0
            };
        if screened {
            modifier *= if doubles { 2.0 / 3.0 } else { 0.5 };
        }
    }

    if effectiveness > 1.0
        && matches!(
            defender.ability,
            Ability::SolidRock | Ability::Filter | Ability::PrismArmor
        )
    {
        modifier *= 0.75;
    }

    match attacker.ability {
        Ability::TintedLens if effectiveness < 1.0 => modifier *= 2.0,
        Ability::Technician if move_data.power <= 60 => modifier *= 1.5,
        Ability::SheerForce if move_data.effect_chance > 0 => modifier *= 1.3,
        Ability::Blaze | Ability::Torrent | Ability::Overgrow | Ability::Swarm => {
            let pinch_type = match attacker.ability {
                Ability::Blaze => PokemonType::Fire,
                Ability::Torrent => PokemonType::Water,
                Ability::Overgrow => PokemonType::Grass,
                _ => PokemonType::Bug,
            };
            if move_type == pinch_type && attacker.hp_at_or_below(1, 3) {
                modifier *= 1.5;
            }
        }
        _ => {}
    }

    if attacker.volatiles.flash_fire && move_type == PokemonType::Fire {
        modifier *= 1.5;
    }

    match attacker.held_item(field) {
        Some(Item::LifeOrb) => modifier *= 1.3,
        Some(Item::Plate(plate_type)) if plate_type == move_type => modifier *= 1.2,
        Some(Item::ExpertBelt) if effectiveness > 1.0 => modifier *= 1.2,
        Some(Item::MuscleBand) if physical => modifier *= 1.1,
        Some(Item::WiseGlasses) if !physical => modifier *= 1.1,
        _ => {}
    }

    modifier
}
