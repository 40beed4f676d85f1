//! Declarative move effects.
//!
//! Every move maps to an ordered list of [`EffectSpec`]s in [`table`]. One
//! applier, [`apply_effects`], interprets those lists against the live battle.

mod field_effects;
mod stat_effects;
mod status_effects;
mod table;

use crate::battle::conditions::VolatileKind;
use crate::battle::field::{FieldEffect, GMaxResidual, Hazard, SideCondition};
use crate::battle::state::{BattleEvent, BattleState, EventBus, PerSide, ResidualSource, SideId, TurnRng};
use schema::{Ability, Move, PokemonType, StageStat, Terrain, Weather};
use serde::{Deserialize, Serialize};

pub use self::field_effects::{clear_all_stages, set_terrain, set_weather};
pub use self::stat_effects::{change_stage, trigger_eject_pack, StageSource};
pub use self::status_effects::{apply_volatile, can_inflict, inflict_status, StatusKind};
pub use self::table::effects_for;

/// Who an effect spec lands on, relative to the move's user.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectTarget {
    User,
    Foe,
    UserSide,
    FoeSide,
    Field,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    StatStage { stat: StageStat, stages: i8 },
    Status(StatusKind),
    Volatile(VolatileKind),
    Hazard(Hazard),
    SideCondition(SideCondition),
    Weather(Weather),
    Terrain(Terrain),
    FieldEffect(FieldEffect),
    GMaxResidual(GMaxResidual),
    /// Restores `num / den` of max HP.
    Heal { num: u16, den: u16 },
    /// Synthesis-style healing that depends on the weather.
    WeatherHeal,
    /// Full heal followed by two turns of sleep.
    Rest,
    Protect,
    Substitute,
    /// Forces the target out for a random healthy bench member.
    Phaze,
    ClearHazards,
    /// Clears hazards from both sides and screens from the foe's side.
    Defog,
    /// Resets every stage on both active combatants.
    Haze,
    /// Swaps hazards and side conditions between the two sides.
    SwapSides,
    /// Ghost types pay half their max HP to curse the foe; anything else
    /// trades a Speed stage for Attack and Defense.
    Curse,
    /// The target faints outright.
    Faint,
}

/// One declarative unit of a move's non-damage consequence.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectSpec {
    pub target: EffectTarget,
    pub kind: EffectKind,
    /// Percent chance, rolled independently per spec. 100 always applies.
    pub chance: u8,
}

impl EffectSpec {
    pub fn is_guaranteed(&self) -> bool {
        self.chance >= 100
    }

    /// Whether this spec would put a primary status on the foe.
    pub fn inflicts_foe_status(&self) -> bool {
        self.target == EffectTarget::Foe && matches!(self.kind, EffectKind::Status(_))
    }
}

/// Runs every effect spec for `move_` in table order.
///
/// Does nothing when `success` is false or the move has no entry. Specs that
/// cannot apply are skipped without changing state.
pub fn apply_effects(
    state: &mut BattleState,
    user_side: SideId,
    move_: Move,
    success: bool,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    if success {
        run_effects(state, user_side, move_, false, rng, bus);
    }
}

/// Effects that follow a damaging move's hits. When a substitute took any of
/// those hits, foe-targeted effects are blocked even if it broke.
pub fn apply_secondary_effects(
    state: &mut BattleState,
    user_side: SideId,
    move_: Move,
    substitute_took_hit: bool,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    run_effects(state, user_side, move_, substitute_took_hit, rng, bus);
}

fn run_effects(
    state: &mut BattleState,
    user_side: SideId,
    move_: Move,
    substitute_took_hit: bool,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    let specs = effects_for(move_);
    if specs.is_empty() {
        return;
    }

    let foe_side = user_side.opponent();
    let move_data = move_.data();
    let user = state.active(user_side);
    let sheer_force = user.ability == Ability::SheerForce && move_data.is_damaging();
    let infiltrator = user.ability == Ability::Infiltrator;

    if move_.is_powder() && !move_data.is_damaging() {
        let foe = state.active(foe_side);
        if foe.has_type(PokemonType::Grass) || foe.ability == Ability::Overcoat {
            bus.push(BattleEvent::EffectFailed {
                pokemon: foe.name.clone(),
            });
            return;
        }
    }

    let mut dropped = PerSide::new(false, false);

    for spec in specs {
        if sheer_force && !spec.is_guaranteed() {
            continue;
        }
        if state.is_over() {
            break;
        }

        if spec.target == EffectTarget::Foe {
            let foe = state.active(foe_side);
            if foe.is_fainted() {
                continue;
            }
            let shielded = substitute_took_hit
                || (foe.substitute_hp.is_some() && !move_.is_sound() && !infiltrator);
            if shielded {
                continue;
            }
        }

        if !rng.roll_percent(spec.chance, "secondary effect") {
            continue;
        }

        let target_side = match spec.target {
            EffectTarget::User | EffectTarget::UserSide | EffectTarget::Field => user_side,
            EffectTarget::Foe | EffectTarget::FoeSide => foe_side,
        };

        tracing::trace!(?move_, ?spec, "applying effect");
        apply_spec(state, user_side, target_side, spec, &mut dropped, rng, bus);
    }

    for side in SideId::BOTH {
        if dropped[side] && !state.is_over() {
            trigger_eject_pack(state, side, rng, bus);
        }
    }
}

fn apply_spec(
    state: &mut BattleState,
    user_side: SideId,
    target_side: SideId,
    spec: &EffectSpec,
    dropped: &mut PerSide<bool>,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    match spec.kind {
        EffectKind::StatStage { stat, stages } => {
            let source = if target_side == user_side {
                StageSource::Itself
            } else {
                StageSource::Foe
            };
            let applied = change_stage(state, target_side, stat, stages, source, bus);
            if applied < 0 {
                dropped[target_side] = true;
            }
        }
        EffectKind::Status(kind) => {
            if !inflict_status(state, target_side, kind, rng, bus) && spec.is_guaranteed() {
                fail(state, target_side, bus);
            }
        }
        EffectKind::Volatile(kind) => {
            apply_volatile(state, target_side, user_side, kind, rng, bus);
        }
        EffectKind::Hazard(hazard) => field_effects::set_hazard(state, target_side, hazard, bus),
        EffectKind::SideCondition(condition) => {
            field_effects::set_side_condition(state, target_side, user_side, condition, bus)
        }
        EffectKind::Weather(weather) => {
            if !set_weather(state, weather, crate::battle::field::FIELD_EFFECT_TURNS, bus) {
                fail(state, user_side, bus);
            }
        }
        EffectKind::Terrain(terrain) => {
            if !set_terrain(state, terrain, crate::battle::field::FIELD_EFFECT_TURNS, bus) {
                fail(state, user_side, bus);
            }
        }
        EffectKind::FieldEffect(effect) => field_effects::toggle_field_effect(state, user_side, effect, bus),
        EffectKind::GMaxResidual(residual) => {
            field_effects::set_gmax_residual(state, target_side, residual)
        }
        EffectKind::Heal { num, den } => heal_fraction(state, target_side, num, den, bus),
        EffectKind::WeatherHeal => {
            let (num, den) = match state.field.weather() {
                Some(Weather::Sun) => (2, 3),
                None => (1, 2),
                Some(_) => (1, 4),
            };
            heal_fraction(state, target_side, num, den, bus);
        }
        EffectKind::Rest => status_effects::rest(state, target_side, bus),
        EffectKind::Protect => protect(state, target_side, rng, bus),
        EffectKind::Substitute => substitute(state, target_side, bus),
        EffectKind::Phaze => crate::battle::switching::phaze(state, target_side, rng, bus),
        EffectKind::ClearHazards => field_effects::clear_hazards(state, target_side, bus),
        EffectKind::Defog => field_effects::defog(state, user_side, bus),
        EffectKind::Haze => clear_all_stages(state, bus),
        EffectKind::SwapSides => field_effects::swap_sides(state, bus),
        EffectKind::Curse => curse(state, user_side, dropped, rng, bus),
        EffectKind::Faint => {
            let pokemon = state.active_mut(target_side);
            let hp = pokemon.current_hp();
            pokemon.take_damage(hp);
        }
    }
}

fn curse(
    state: &mut BattleState,
    user_side: SideId,
    dropped: &mut PerSide<bool>,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    if !state.active(user_side).has_type(PokemonType::Ghost) {
        let changes = [(StageStat::Attack, 1), (StageStat::Defense, 1), (StageStat::Speed, -1)];
        for (stat, stages) in changes {
            if change_stage(state, user_side, stat, stages, StageSource::Itself, bus) < 0 {
                dropped[user_side] = true;
            }
        }
        return;
    }

    let foe_side = user_side.opponent();
    let foe = state.active(foe_side);
    if foe.is_fainted() || foe.volatiles.cursed {
        fail(state, user_side, bus);
        return;
    }
    let user = state.active_mut(user_side);
    let cost = user.hp_fraction(1, 2);
    let dealt = user.take_damage(cost);
    bus.push(BattleEvent::ResidualDamage {
        target: user.name.clone(),
        source: ResidualSource::Curse,
        damage: dealt,
        remaining_hp: user.current_hp(),
    });
    apply_volatile(state, foe_side, user_side, VolatileKind::Curse, rng, bus);
}

fn fail(state: &BattleState, side: SideId, bus: &mut EventBus) {
    bus.push(BattleEvent::EffectFailed {
        pokemon: state.active(side).name.clone(),
    });
}

fn heal_fraction(state: &mut BattleState, side: SideId, num: u16, den: u16, bus: &mut EventBus) {
    let pokemon = state.active_mut(side);
    if pokemon.is_full_hp() || pokemon.is_fainted() {
        bus.push(BattleEvent::EffectFailed {
            pokemon: pokemon.name.clone(),
        });
        return;
    }
    let amount = pokemon.hp_fraction(num, den);
    let healed = pokemon.heal(amount);
    bus.push(BattleEvent::PokemonHealed {
        target: pokemon.name.clone(),
        amount: healed,
        new_hp: pokemon.current_hp(),
    });
}

/// Protect succeeds with chance `1 / 3^streak`.
fn protect(state: &mut BattleState, side: SideId, rng: &mut TurnRng, bus: &mut EventBus) {
    let streak = state.active(side).volatiles.protect_streak;
    let odds = 3u32.saturating_pow(streak as u32);
    let succeeded = rng.chance(1, odds, "protect streak");

    let pokemon = state.active_mut(side);
    if succeeded {
        pokemon.volatiles.protected = true;
        pokemon.volatiles.protect_streak = streak.saturating_add(1);
        bus.push(BattleEvent::VolatileApplied {
            target: pokemon.name.clone(),
            condition: VolatileKind::Protect,
        });
    } else {
        pokemon.volatiles.protect_streak = 0;
        bus.push(BattleEvent::EffectFailed {
            pokemon: pokemon.name.clone(),
        });
    }
}

/// A substitute costs a quarter of max HP and needs strictly more HP than that.
fn substitute(state: &mut BattleState, side: SideId, bus: &mut EventBus) {
    let pokemon = state.active_mut(side);
    let cost = pokemon.max_hp() / 4;
    if pokemon.substitute_hp.is_some() || cost == 0 || pokemon.current_hp() <= cost {
        bus.push(BattleEvent::EffectFailed {
            pokemon: pokemon.name.clone(),
        });
        return;
    }
    pokemon.take_damage(cost);
    pokemon.substitute_hp = Some(cost);
    bus.push(BattleEvent::VolatileApplied {
        target: pokemon.name.clone(),
        condition: VolatileKind::Substitute,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::{create_test_battle, predictable_rng, TestPokemonBuilder};
    use crate::pokemon::StatusCondition;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    fn battle(user: Vec<Move>, foe: Vec<Move>) -> BattleState {
        create_test_battle(
            vec![TestPokemonBuilder::new("User", 50).with_moves(user).build()],
            vec![TestPokemonBuilder::new("Foe", 50).with_moves(foe).build()],
        )
    }

    #[test]
    fn unsuccessful_moves_do_nothing() {
        let mut state = battle(vec![Move::SwordsDance], vec![Move::Tackle]);
        let before = state.clone();
        let mut bus = EventBus::new();
        apply_effects(&mut state, SideId::Player, Move::SwordsDance, false, &mut predictable_rng(), &mut bus);
        assert_eq!(state, before);
        assert!(bus.is_empty());
    }

    #[test]
    fn specs_apply_in_order() {
        let mut state = battle(vec![Move::ShellSmash], vec![Move::Tackle]);
        let mut bus = EventBus::new();
        apply_effects(&mut state, SideId::Player, Move::ShellSmash, true, &mut predictable_rng(), &mut bus);
        let stages = state.active(SideId::Player).stages;
        assert_eq!(stages.get(StageStat::Attack), 2);
        assert_eq!(stages.get(StageStat::SpecialAttack), 2);
        assert_eq!(stages.get(StageStat::Speed), 2);
        assert_eq!(stages.get(StageStat::Defense), -1);
        assert_eq!(stages.get(StageStat::SpecialDefense), -1);
    }

    #[test]
    fn screens_last_longer_with_light_clay() {
        let mut state = battle(vec![Move::Reflect], vec![Move::Tackle]);
        state.active_mut(SideId::Player).item = Some(schema::Item::LightClay);
        let mut bus = EventBus::new();
        apply_effects(&mut state, SideId::Player, Move::Reflect, true, &mut predictable_rng(), &mut bus);
        assert_eq!(state.field.side(SideId::Player).reflect, 8);
        assert_eq!(state.field.side(SideId::Opponent).reflect, 0);
    }

    #[test]
    fn substitute_needs_more_than_a_quarter() {
        let mut state = battle(vec![Move::Substitute], vec![Move::Tackle]);
        let quarter = state.active(SideId::Player).max_hp() / 4;
        state.active_mut(SideId::Player).set_hp(quarter);
        let mut bus = EventBus::new();
        apply_effects(&mut state, SideId::Player, Move::Substitute, true, &mut predictable_rng(), &mut bus);
        assert_eq!(state.active(SideId::Player).substitute_hp, None);
        assert_eq!(state.active(SideId::Player).current_hp(), quarter);

        state.active_mut(SideId::Player).set_hp(quarter + 1);
        apply_effects(&mut state, SideId::Player, Move::Substitute, true, &mut predictable_rng(), &mut bus);
        assert_eq!(state.active(SideId::Player).substitute_hp, Some(quarter));
        assert_eq!(state.active(SideId::Player).current_hp(), 1);
    }

    #[test]
    fn protect_streak_lowers_odds() {
        let mut state = battle(vec![Move::Protect], vec![Move::Tackle]);
        let mut bus = EventBus::new();
        // First use draws nothing; the second needs a roll of 33 or less.
        let mut rng = TurnRng::new_for_test(vec![50]);
        apply_effects(&mut state, SideId::Player, Move::Protect, true, &mut rng, &mut bus);
        assert!(state.active(SideId::Player).volatiles.protected);
        assert_eq!(state.active(SideId::Player).volatiles.protect_streak, 1);

        state.active_mut(SideId::Player).volatiles.protected = false;
        apply_effects(&mut state, SideId::Player, Move::Protect, true, &mut rng, &mut bus);
        assert!(!state.active(SideId::Player).volatiles.protected);
        assert_eq!(state.active(SideId::Player).volatiles.protect_streak, 0);
    }

    #[test]
    fn powder_fails_on_grass_types() {
        let mut state = create_test_battle(
            vec![TestPokemonBuilder::new("User", 50).with_moves(vec![Move::Spore]).build()],
            vec![TestPokemonBuilder::new("Foe", 50)
                .with_types(vec![PokemonType::Grass])
                .build()],
        );
        let mut bus = EventBus::new();
        apply_effects(&mut state, SideId::Player, Move::Spore, true, &mut predictable_rng(), &mut bus);
        assert_eq!(state.active(SideId::Opponent).status, None);
    }

    #[test]
    fn secondary_chance_rolls_independently() {
        let mut state = battle(vec![Move::Flamethrower], vec![Move::Tackle]);
        let mut bus = EventBus::new();
        apply_effects(&mut state, SideId::Player, Move::Flamethrower, true, &mut TurnRng::new_for_test(vec![11]), &mut bus);
        assert_eq!(state.active(SideId::Opponent).status, None);
        apply_effects(&mut state, SideId::Player, Move::Flamethrower, true, &mut TurnRng::new_for_test(vec![10]), &mut bus);
        assert_eq!(state.active(SideId::Opponent).status, Some(StatusCondition::Burn));
    }

    #[test]
    fn sheer_force_drops_chance_secondaries() {
        let mut state = create_test_battle(
            vec![TestPokemonBuilder::new("User", 50)
                .with_ability(Ability::SheerForce)
                .with_moves(vec![Move::Flamethrower])
                .build()],
            vec![TestPokemonBuilder::new("Foe", 50).build()],
        );
        let mut bus = EventBus::new();
        // No draw is consumed, so an empty script would panic if one were.
        apply_effects(&mut state, SideId::Player, Move::Flamethrower, true, &mut TurnRng::new_for_test(vec![]), &mut bus);
        assert_eq!(state.active(SideId::Opponent).status, None);
    }

    #[test]
    fn substitute_blocks_foe_secondaries_but_not_sound() {
        let mut state = battle(vec![Move::Growl, Move::Charm], vec![Move::Tackle]);
        state.active_mut(SideId::Opponent).substitute_hp = Some(10);
        let mut bus = EventBus::new();
        apply_effects(&mut state, SideId::Player, Move::Charm, true, &mut predictable_rng(), &mut bus);
        assert_eq!(state.active(SideId::Opponent).stages.get(StageStat::Attack), 0);
        apply_effects(&mut state, SideId::Player, Move::Growl, true, &mut predictable_rng(), &mut bus);
        assert_eq!(state.active(SideId::Opponent).stages.get(StageStat::Attack), -1);
    }

    #[test]
    fn synthesis_heals_by_weather() {
        let mut state = battle(vec![Move::Synthesis], vec![Move::Tackle]);
        let max = state.active(SideId::Player).max_hp();
        state.active_mut(SideId::Player).set_hp(1);
        state.field.weather = Some(crate::battle::field::Timed::new(Weather::Sand, 3));
        let mut bus = EventBus::new();
        apply_effects(&mut state, SideId::Player, Move::Synthesis, true, &mut predictable_rng(), &mut bus);
        assert_eq!(state.active(SideId::Player).current_hp(), 1 + max / 4);
    }

    fn expected_stage(changes: &[(StageStat, i8)], stat: StageStat) -> i8 {
        changes
            .iter()
            .find(|(changed, _)| *changed == stat)
            .map_or(0, |(_, stages)| *stages)
    }

    #[rstest]
    #[case::acid_armor(Move::AcidArmor, &[(StageStat::Defense, 2)], &[])]
    #[case::barrier(Move::Barrier, &[(StageStat::Defense, 2)], &[])]
    #[case::cotton_guard(Move::CottonGuard, &[(StageStat::Defense, 3)], &[])]
    #[case::defend_order(Move::DefendOrder, &[(StageStat::Defense, 1), (StageStat::SpecialDefense, 1)], &[])]
    #[case::rock_polish(Move::RockPolish, &[(StageStat::Speed, 2)], &[])]
    #[case::cotton_spore(Move::CottonSpore, &[], &[(StageStat::Speed, -2)])]
    #[case::curse(
        Move::Curse,
        &[(StageStat::Attack, 1), (StageStat::Defense, 1), (StageStat::Speed, -1)],
        &[]
    )]
    #[case::memento(Move::Memento, &[], &[(StageStat::Attack, -2), (StageStat::SpecialAttack, -2)])]
    fn stage_rows_land_where_the_table_says(
        #[case] move_: Move,
        #[case] user: &[(StageStat, i8)],
        #[case] foe: &[(StageStat, i8)],
    ) {
        let mut state = battle(vec![move_], vec![Move::Tackle]);
        let mut bus = EventBus::new();
        apply_effects(&mut state, SideId::Player, move_, true, &mut predictable_rng(), &mut bus);
        for stat in StageStat::iter() {
            assert_eq!(state.active(SideId::Player).stages.get(stat), expected_stage(user, stat), "user {stat}");
            assert_eq!(state.active(SideId::Opponent).stages.get(stat), expected_stage(foe, stat), "foe {stat}");
        }
    }

    #[test]
    fn memento_faints_the_user_even_behind_a_substitute() {
        let mut state = battle(vec![Move::Memento], vec![Move::Tackle]);
        state.active_mut(SideId::Opponent).substitute_hp = Some(10);
        let mut bus = EventBus::new();
        apply_effects(&mut state, SideId::Player, Move::Memento, true, &mut predictable_rng(), &mut bus);
        assert!(state.active(SideId::Player).is_fainted());
        assert_eq!(state.active(SideId::Opponent).stages.get(StageStat::Attack), 0);
    }

    #[test]
    fn ghost_curse_pays_half_and_sticks_once() {
        let mut state = create_test_battle(
            vec![TestPokemonBuilder::new("Haunter", 50)
                .with_types(vec![PokemonType::Ghost])
                .with_moves(vec![Move::Curse])
                .build()],
            vec![TestPokemonBuilder::new("Foe", 50).build()],
        );
        let max = state.active(SideId::Player).max_hp();
        let mut bus = EventBus::new();
        apply_effects(&mut state, SideId::Player, Move::Curse, true, &mut predictable_rng(), &mut bus);
        assert_eq!(state.active(SideId::Player).current_hp(), max - max / 2);
        assert!(state.active(SideId::Opponent).volatiles.cursed);
        assert_eq!(state.active(SideId::Player).stages.get(StageStat::Attack), 0);

        apply_effects(&mut state, SideId::Player, Move::Curse, true, &mut predictable_rng(), &mut bus);
        assert_eq!(state.active(SideId::Player).current_hp(), max - max / 2);
        assert!(matches!(bus.events().last(), Some(BattleEvent::EffectFailed { pokemon }) if pokemon == "Haunter"));
    }
}
