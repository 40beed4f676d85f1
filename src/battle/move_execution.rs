//! Resolution of one move once its user has passed the pre-action checks.

use crate::battle::conditions::{FocusPunchState, MoveTimer, VolatileKind};
use crate::battle::damage::{breaks_disguise, roll_damage, DamageInputs};
use crate::battle::move_effects::{
    apply_effects, apply_secondary_effects, apply_volatile, change_stage, effects_for, inflict_status, EffectTarget,
    StageSource, StatusKind,
};
use crate::battle::state::{
    ActionFailureReason, BattleEvent, BattleState, EventBus, ResidualSource, SideId, TurnRng,
};
use crate::battle::stats::{crit_odds, crit_stage, move_effectiveness, move_hits};
use crate::battle::switching;
use crate::pokemon::StatusCondition;
use schema::{Ability, Item, Move, MoveData, PokemonType, StageStat, Stat, Weather};

/// Whether the move does anything to the opposing combatant itself.
pub fn targets_foe(move_: Move) -> bool {
    move_.data().is_damaging()
        || effects_for(move_)
            .iter()
            .any(|spec| spec.target == EffectTarget::Foe)
}

/// Status moves whose every effect lands on the foe or the foe's side,
/// hazards included, can be bounced back at the user.
fn reflectable(move_: Move) -> bool {
    let specs = effects_for(move_);
    !specs.is_empty()
        && specs
            .iter()
            .all(|spec| matches!(spec.target, EffectTarget::Foe | EffectTarget::FoeSide))
}

/// Runs `move_` for the active combatant of `user_side`.
pub fn execute_move(
    state: &mut BattleState,
    user_side: SideId,
    move_: Move,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    let move_data = move_.data();
    let user = state.active_mut(user_side);
    bus.push(BattleEvent::MoveUsed {
        side: user_side,
        pokemon: user.name.clone(),
        move_used: move_,
    });
    user.last_move = Some(move_);
    if !move_.is_protect() {
        user.volatiles.protect_streak = 0;
    }

    if move_.is_charging() && !start_or_release_charge(state, user_side, move_, bus) {
        return;
    }

    if move_data.is_damaging() {
        let landed = execute_damaging_move(state, user_side, &move_data, rng, bus);
        update_rampage(state, user_side, move_, landed, rng, bus);
        if move_.is_self_destruct() {
            let user = state.active_mut(user_side);
            let hp = user.current_hp();
            user.take_damage(hp);
        }
    } else {
        execute_status_move(state, user_side, move_, &move_data, rng, bus);
    }
}

/// Returns false on the charging turn. Sun releases Solar Beam at once.
fn start_or_release_charge(state: &mut BattleState, side: SideId, move_: Move, bus: &mut EventBus) -> bool {
    let sunny = state.field.is_weather(Weather::Sun);
    let user = state.active_mut(side);
    if user.volatiles.charging.take().is_some() || sunny {
        return true;
    }
    user.volatiles.charging = Some(move_);
    bus.push(BattleEvent::ActionFailed {
        pokemon: user.name.clone(),
        reason: ActionFailureReason::Charging,
    });
    false
}

fn execute_status_move(
    state: &mut BattleState,
    user_side: SideId,
    move_: Move,
    move_data: &MoveData,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    let foe_side = user_side.opponent();

    if move_ == Move::BatonPass {
        switching::baton_pass(state, user_side, rng, bus);
        return;
    }

    let hits_foe = targets_foe(move_);
    if hits_foe {
        let user = state.active(user_side);
        let foe = state.active(foe_side);
        if !move_hits(user, foe, move_data, &state.field, rng) {
            bus.push(BattleEvent::MoveMissed {
                attacker: user.name.clone(),
                move_used: move_,
            });
            return;
        }
    }
    let foe = state.active(foe_side);
    if foe.ability == Ability::MagicBounce && !foe.is_fainted() && reflectable(move_) {
        tracing::debug!(?move_, "move bounced back");
        bus.push(BattleEvent::AbilityActivated {
            pokemon: foe.name.clone(),
            ability: Ability::MagicBounce,
        });
        apply_effects(state, foe_side, move_, true, rng, bus);
        return;
    }
    if hits_foe {
        if absorbs(state, user_side, move_data, bus) {
            return;
        }
        let foe = state.active(foe_side);
        if foe.volatiles.protected {
            bus.push(BattleEvent::Protected {
                pokemon: foe.name.clone(),
            });
            return;
        }
    }

    apply_effects(state, user_side, move_, true, rng, bus);

    if move_.is_pivot() && !state.active(user_side).is_fainted() {
        switching::forced_replacement(state, user_side, rng, bus);
    }
}

/// Absorbing abilities swallow a move of their type and take a benefit instead.
fn absorbs(state: &mut BattleState, user_side: SideId, move_data: &MoveData, bus: &mut EventBus) -> bool {
    let foe_side = user_side.opponent();
    let foe = state.active(foe_side);
    enum Benefit {
        Heal,
        Boost(StageStat),
        FlashFire,
    }
    let benefit = match (foe.ability, move_data.move_type) {
        (Ability::VoltAbsorb, PokemonType::Electric)
        | (Ability::WaterAbsorb | Ability::DrySkin, PokemonType::Water) => Benefit::Heal,
        (Ability::MotorDrive, PokemonType::Electric) => Benefit::Boost(StageStat::Speed),
        (Ability::LightningRod, PokemonType::Electric) | (Ability::StormDrain, PokemonType::Water) => {
            Benefit::Boost(StageStat::SpecialAttack)
        }
        (Ability::SapSipper, PokemonType::Grass) => Benefit::Boost(StageStat::Attack),
        (Ability::FlashFire, PokemonType::Fire) => Benefit::FlashFire,
        _ => return false,
    };

    bus.push(BattleEvent::AbilityActivated {
        pokemon: foe.name.clone(),
        ability: foe.ability,
    });
    match benefit {
        Benefit::Heal => {
            let foe = state.active_mut(foe_side);
            let amount = foe.hp_fraction(1, 4);
            let healed = foe.heal(amount);
            if healed > 0 {
                bus.push(BattleEvent::PokemonHealed {
                    target: foe.name.clone(),
                    amount: healed,
                    new_hp: foe.current_hp(),
                });
            }
        }
        Benefit::Boost(stat) => {
            change_stage(state, foe_side, stat, 1, StageSource::Itself, bus);
        }
        Benefit::FlashFire => state.active_mut(foe_side).volatiles.flash_fire = true,
    }
    true
}

/// Number of hits: fixed ranges use their value, 2-5 moves follow the
/// 35/35/15/15 split, and Skill Link always takes the maximum.
fn hit_count(user_ability: Ability, move_data: &MoveData, rng: &mut TurnRng) -> u8 {
    let (min, max) = move_data.multi_hit;
    if min == max {
        return min;
    }
    if user_ability == Ability::SkillLink {
        return max;
    }
    if (min, max) == (2, 5) {
        return match rng.next_outcome("hit count") {
            1..=35 => 2,
            36..=70 => 3,
            71..=85 => 4,
            _ => 5,
        };
    }
    rng.range(min, max, "hit count")
}

/// Returns whether the move connected.
fn execute_damaging_move(
    state: &mut BattleState,
    user_side: SideId,
    move_data: &MoveData,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> bool {
    let foe_side = user_side.opponent();
    let move_ = move_data.move_;

    {
        let user = state.active(user_side);
        let foe = state.active(foe_side);
        if foe.volatiles.protected {
            bus.push(BattleEvent::Protected {
                pokemon: foe.name.clone(),
            });
            return false;
        }
        if !move_hits(user, foe, move_data, &state.field, rng) {
            bus.push(BattleEvent::MoveMissed {
                attacker: user.name.clone(),
                move_used: move_,
            });
            return false;
        }
    }
    if absorbs(state, user_side, move_data, bus) {
        return false;
    }

    let effectiveness = move_effectiveness(
        state.active(user_side),
        state.active(foe_side),
        move_data.move_type,
        &state.field,
    );
    if effectiveness == 0.0 {
        bus.push(BattleEvent::AttackTypeEffectiveness { multiplier: 0.0 });
        return false;
    }

    let hits = hit_count(state.active(user_side).ability, move_data, rng);
    let mut total_dealt: u16 = 0;
    let mut hit_substitute = false;

    for hit in 0..hits {
        if state.active(foe_side).is_fainted() || state.active(user_side).is_fainted() {
            break;
        }
        tracing::trace!(?move_, hit, "resolving hit");
        let outcome = resolve_hit(state, user_side, move_data, effectiveness, rng, bus);
        total_dealt = total_dealt.saturating_add(outcome.dealt);
        hit_substitute |= outcome.substitute;
    }

    if effectiveness != 1.0 {
        bus.push(BattleEvent::AttackTypeEffectiveness {
            multiplier: effectiveness,
        });
    }

    after_damage(state, user_side, move_data, total_dealt, bus);
    apply_secondary_effects(state, user_side, move_, hit_substitute, rng, bus);

    if total_dealt > 0 && !hit_substitute {
        defender_items_after_hit(state, user_side, rng, bus);
    }

    let user_alive = !state.active(user_side).is_fainted();
    if move_.is_pivot() && user_alive && !state.is_over() {
        switching::forced_replacement(state, user_side, rng, bus);
    }
    true
}

struct HitOutcome {
    dealt: u16,
    substitute: bool,
}

fn resolve_hit(
    state: &mut BattleState,
    user_side: SideId,
    move_data: &MoveData,
    effectiveness: f32,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> HitOutcome {
    let foe_side = user_side.opponent();
    let move_ = move_data.move_;

    if breaks_disguise(state.active(foe_side), move_data) {
        let foe = state.active_mut(foe_side);
        foe.ability_spent = true;
        bus.push(BattleEvent::AbilityActivated {
            pokemon: foe.name.clone(),
            ability: Ability::Disguise,
        });
        return HitOutcome {
            dealt: 0,
            substitute: false,
        };
    }

    let (num, den) = crit_odds(crit_stage(state.active(user_side), move_data, &state.field));
    let critical = move_data.move_.fixed_damage().is_none() && rng.chance(num, den, "critical hit");
    let roll = rng.damage_roll("damage roll");
    let damage = {
        let inputs = DamageInputs::new(
            state.active(user_side),
            state.active(foe_side),
            move_data,
            &state.field,
            user_side,
        );
        roll_damage(&inputs, critical, roll)
    };
    let user_name = state.active(user_side).name.clone();
    if critical {
        bus.push(BattleEvent::CriticalHit {
            attacker: user_name,
            move_used: move_,
        });
    }

    let bypasses_substitute = move_.is_sound() || state.active(user_side).ability == Ability::Infiltrator;
    let foe_item = state.active(foe_side).held_item(&state.field);
    let foe = state.active_mut(foe_side);
    if let (Some(sub_hp), false) = (foe.substitute_hp, bypasses_substitute) {
        let dealt = damage.min(sub_hp);
        let remaining = sub_hp - dealt;
        foe.substitute_hp = (remaining > 0).then_some(remaining);
        bus.push(BattleEvent::SubstituteDamaged {
            target: foe.name.clone(),
            damage: dealt,
            broken: remaining == 0,
        });
        return HitOutcome {
            dealt,
            substitute: true,
        };
    }

    let mut damage = damage;
    if foe.is_full_hp() && damage >= foe.current_hp() {
        if foe_item == Some(Item::FocusSash) {
            damage = foe.current_hp() - 1;
            foe.item = None;
            bus.push(BattleEvent::ItemConsumed {
                pokemon: foe.name.clone(),
                item: Item::FocusSash,
            });
        } else if foe.ability == Ability::Sturdy {
            damage = foe.current_hp() - 1;
            bus.push(BattleEvent::AbilityActivated {
                pokemon: foe.name.clone(),
                ability: Ability::Sturdy,
            });
        }
    }

    let dealt = foe.take_damage(damage);
    bus.push(BattleEvent::DamageDealt {
        target: foe.name.clone(),
        damage: dealt,
        remaining_hp: foe.current_hp(),
    });
    if dealt > 0 && foe.volatiles.focus_punch == Some(FocusPunchState::Focusing) {
        foe.volatiles.focus_punch = Some(FocusPunchState::LostFocus);
    }
    if dealt > 0 && foe.status == Some(StatusCondition::Freeze) && move_data.move_type == PokemonType::Fire {
        foe.status = None;
        bus.push(BattleEvent::StatusRemoved {
            target: foe.name.clone(),
            status: StatusCondition::Freeze,
        });
    }

    if dealt > 0 {
        contact_reactions(state, user_side, move_, rng, bus);
        weakness_policy(state, foe_side, effectiveness, bus);
        pinch_berry(state, foe_side, bus);
    }
    HitOutcome {
        dealt,
        substitute: false,
    }
}

fn residual(state: &mut BattleState, side: SideId, amount: u16, source: ResidualSource, bus: &mut EventBus) {
    let pokemon = state.active_mut(side);
    if pokemon.is_fainted() || pokemon.ability == Ability::MagicGuard {
        return;
    }
    let dealt = pokemon.take_damage(amount);
    bus.push(BattleEvent::ResidualDamage {
        target: pokemon.name.clone(),
        source,
        damage: dealt,
        remaining_hp: pokemon.current_hp(),
    });
}

fn heal_user(state: &mut BattleState, side: SideId, amount: u16, bus: &mut EventBus) {
    let pokemon = state.active_mut(side);
    let healed = pokemon.heal(amount);
    if healed > 0 {
        bus.push(BattleEvent::PokemonHealed {
            target: pokemon.name.clone(),
            amount: healed,
            new_hp: pokemon.current_hp(),
        });
    }
}

/// Contact punishments: Rocky Helmet, Rough Skin and the 30% status abilities.
fn contact_reactions(state: &mut BattleState, user_side: SideId, move_: Move, rng: &mut TurnRng, bus: &mut EventBus) {
    if !move_.makes_contact() {
        return;
    }
    let foe_side = user_side.opponent();
    let foe = state.active(foe_side);
    let foe_ability = foe.ability;
    let helmet = foe.held_item(&state.field) == Some(Item::RockyHelmet);
    let attacker_max = state.active(user_side).max_hp();

    if helmet {
        residual(state, user_side, (attacker_max / 6).max(1), ResidualSource::Item(Item::RockyHelmet), bus);
    }
    if matches!(foe_ability, Ability::RoughSkin | Ability::IronBarbs) {
        residual(state, user_side, (attacker_max / 8).max(1), ResidualSource::Ability(foe_ability), bus);
    }

    let status = match foe_ability {
        Ability::Static => Some(StatusKind::Paralysis),
        Ability::FlameBody => Some(StatusKind::Burn),
        Ability::PoisonPoint => Some(StatusKind::Poison),
        _ => None,
    };
    if let Some(kind) = status {
        if !state.active(user_side).is_fainted() && rng.roll_percent(30, "contact ability") {
            inflict_status(state, user_side, kind, rng, bus);
        }
    }
}

fn weakness_policy(state: &mut BattleState, side: SideId, effectiveness: f32, bus: &mut EventBus) {
    let item = state.active(side).held_item(&state.field);
    let holder = state.active_mut(side);
    if effectiveness <= 1.0 || holder.is_fainted() || item != Some(Item::WeaknessPolicy) {
        return;
    }
    holder.item = None;
    bus.push(BattleEvent::ItemConsumed {
        pokemon: holder.name.clone(),
        item: Item::WeaknessPolicy,
    });
    change_stage(state, side, StageStat::Attack, 2, StageSource::Itself, bus);
    change_stage(state, side, StageStat::SpecialAttack, 2, StageSource::Itself, bus);
}

/// Figy-family berries restore half at a quarter HP; Sitrus restores a quarter at half.
pub fn pinch_berry(state: &mut BattleState, side: SideId, bus: &mut EventBus) {
    let field_suppressed = state.field.magic_room > 0;
    let holder = state.active_mut(side);
    let Some(item) = holder.item else {
        return;
    };
    if holder.is_fainted() || field_suppressed {
        return;
    }
    let (threshold, share) = match item {
        i if i.is_pinch_berry() => ((1, 4), (1, 2)),
        Item::SitrusBerry => ((1, 2), (1, 4)),
        _ => return,
    };
    if !holder.hp_at_or_below(threshold.0, threshold.1) {
        return;
    }
    holder.item = None;
    bus.push(BattleEvent::ItemConsumed {
        pokemon: holder.name.clone(),
        item,
    });
    let amount = holder.hp_fraction(share.0, share.1);
    heal_user(state, side, amount, bus);
}

/// User-side consequences of the damage dealt: Life Orb, recoil, drain,
/// Shell Bell and knockout abilities.
fn after_damage(
    state: &mut BattleState,
    user_side: SideId,
    move_data: &MoveData,
    total_dealt: u16,
    bus: &mut EventBus,
) {
    if total_dealt == 0 {
        return;
    }
    let move_ = move_data.move_;
    let foe_fainted = state.active(user_side.opponent()).is_fainted();
    let user = state.active(user_side);
    let item = user.held_item(&state.field);
    let ability = user.ability;
    let max_hp = user.max_hp();

    let sheer_force_boosted = ability == Ability::SheerForce && move_data.effect_chance > 0;
    if item == Some(Item::LifeOrb) && !sheer_force_boosted {
        residual(state, user_side, (max_hp / 10).max(1), ResidualSource::LifeOrb, bus);
    }
    if move_ == Move::Struggle {
        residual(state, user_side, (max_hp / 4).max(1), ResidualSource::Recoil, bus);
    }
    if let Some((num, den)) = move_.recoil() {
        if ability != Ability::RockHead {
            let recoil = ((total_dealt as u32 * num as u32 / den as u32) as u16).max(1);
            residual(state, user_side, recoil, ResidualSource::Recoil, bus);
        }
    }
    if let Some((num, den)) = move_.drain() {
        let amount = ((total_dealt as u32 * num as u32 / den as u32) as u16).max(1);
        heal_user(state, user_side, amount, bus);
    }
    if item == Some(Item::ShellBell) {
        heal_user(state, user_side, (total_dealt / 8).max(1), bus);
    }

    if foe_fainted && !state.active(user_side).is_fainted() {
        let boost = match ability {
            Ability::Moxie | Ability::ChillingNeigh => Some(StageStat::Attack),
            Ability::GrimNeigh => Some(StageStat::SpecialAttack),
            Ability::BeastBoost => Some(beast_boost_stat(state, user_side)),
            _ => None,
        };
        if let Some(stat) = boost {
            bus.push(BattleEvent::AbilityActivated {
                pokemon: state.active(user_side).name.clone(),
                ability,
            });
            change_stage(state, user_side, stat, 1, StageSource::Itself, bus);
        }
    }
}

fn beast_boost_stat(state: &BattleState, side: SideId) -> StageStat {
    let pokemon = state.active(side);
    [
        (Stat::Attack, StageStat::Attack),
        (Stat::Defense, StageStat::Defense),
        (Stat::SpecialAttack, StageStat::SpecialAttack),
        (Stat::SpecialDefense, StageStat::SpecialDefense),
        (Stat::Speed, StageStat::Speed),
    ]
    .into_iter()
    .rev()
    .max_by_key(|(stat, _)| pokemon.raw_stat(*stat))
    .map_or(StageStat::Attack, |(_, stage)| stage)
}

/// Air Balloon pops, Eject Button sends the holder out and Red Card sends the attacker out.
fn defender_items_after_hit(state: &mut BattleState, user_side: SideId, rng: &mut TurnRng, bus: &mut EventBus) {
    let foe_side = user_side.opponent();
    let foe = state.active(foe_side);
    if foe.is_fainted() || state.is_over() {
        return;
    }
    let Some(item) = foe.held_item(&state.field) else {
        return;
    };
    let consume = |state: &mut BattleState, bus: &mut EventBus| {
        let holder = state.active_mut(foe_side);
        holder.item = None;
        bus.push(BattleEvent::ItemConsumed {
            pokemon: holder.name.clone(),
            item,
        });
    };

    match item {
        Item::AirBalloon => consume(state, bus),
        Item::EjectButton if state.players[foe_side].has_healthy_bench() => {
            consume(state, bus);
            switching::forced_replacement(state, foe_side, rng, bus);
        }
        Item::RedCard
            if state.players[user_side].has_healthy_bench() && !state.active(user_side).is_fainted() =>
        {
            consume(state, bus);
            switching::phaze(state, user_side, rng, bus);
        }
        _ => {}
    }
}

/// Starts, advances or ends a rampage lock. A lock that fails to land ends quietly.
fn update_rampage(
    state: &mut BattleState,
    side: SideId,
    move_: Move,
    landed: bool,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    if !move_.is_rampage() || state.active(side).is_fainted() {
        return;
    }
    let user = state.active_mut(side);
    if !landed {
        user.volatiles.locked_move = None;
        return;
    }
    match user.volatiles.locked_move {
        None => {
            let total = rng.range(2, 3, "rampage length");
            state.active_mut(side).volatiles.locked_move = Some(MoveTimer {
                move_,
                turns_remaining: total - 1,
            });
        }
        Some(MoveTimer { turns_remaining, .. }) if turns_remaining > 1 => {
            user.volatiles.locked_move = Some(MoveTimer {
                move_,
                turns_remaining: turns_remaining - 1,
            });
        }
        Some(_) => {
            user.volatiles.locked_move = None;
            bus.push(BattleEvent::VolatileEnded {
                target: user.name.clone(),
                condition: VolatileKind::Rampage,
            });
            apply_volatile(state, side, side, VolatileKind::Confusion, rng, bus);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::{create_test_battle, predictable_rng, TestPokemonBuilder};
    use rstest::rstest;

    #[rstest]
    #[case(35, 2)]
    #[case(36, 3)]
    #[case(70, 3)]
    #[case(85, 4)]
    #[case(86, 5)]
    fn two_to_five_hit_distribution(#[case] outcome: u8, #[case] expected: u8) {
        let mut rng = TurnRng::new_for_test(vec![outcome]);
        assert_eq!(hit_count(Ability::Other, &Move::BulletSeed.data(), &mut rng), expected);
    }

    #[test]
    fn skill_link_always_hits_five_times() {
        let mut rng = TurnRng::new_for_test(vec![]);
        assert_eq!(hit_count(Ability::SkillLink, &Move::RockBlast.data(), &mut rng), 5);
    }

    #[test]
    fn status_moves_against_the_user_do_not_target_the_foe() {
        assert!(!targets_foe(Move::SwordsDance));
        assert!(!targets_foe(Move::StealthRock));
        assert!(targets_foe(Move::ThunderWave));
        assert!(targets_foe(Move::Tackle));
    }

    #[test]
    fn volt_absorb_heals_instead_of_taking_damage() {
        let mut state = create_test_battle(
            vec![TestPokemonBuilder::new("Zapper", 50)
                .with_moves(vec![Move::Thunderbolt])
                .build()],
            vec![TestPokemonBuilder::new("Absorber", 50)
                .with_ability(Ability::VoltAbsorb)
                .build()],
        );
        let max = state.active(SideId::Opponent).max_hp();
        state.active_mut(SideId::Opponent).set_hp(max / 2);
        let mut bus = EventBus::new();
        execute_move(&mut state, SideId::Player, Move::Thunderbolt, &mut predictable_rng(), &mut bus);
        assert_eq!(state.active(SideId::Opponent).current_hp(), max / 2 + max / 4);
    }

    #[test]
    fn focus_sash_survives_from_full() {
        let mut state = create_test_battle(
            vec![TestPokemonBuilder::new("Hitter", 100)
                .with_moves(vec![Move::SeismicToss])
                .build()],
            vec![TestPokemonBuilder::new("Sash", 5).with_item(Item::FocusSash).build()],
        );
        let mut bus = EventBus::new();
        execute_move(&mut state, SideId::Player, Move::SeismicToss, &mut predictable_rng(), &mut bus);
        let foe = state.active(SideId::Opponent);
        assert_eq!(foe.current_hp(), 1);
        assert_eq!(foe.item, None);
    }

    #[test]
    fn substitute_takes_the_hit() {
        let mut state = create_test_battle(
            vec![TestPokemonBuilder::new("Hitter", 50)
                .with_moves(vec![Move::DragonRage])
                .build()],
            vec![TestPokemonBuilder::new("Decoy", 50).build()],
        );
        state.active_mut(SideId::Opponent).substitute_hp = Some(50);
        let mut bus = EventBus::new();
        execute_move(&mut state, SideId::Player, Move::DragonRage, &mut predictable_rng(), &mut bus);
        let foe = state.active(SideId::Opponent);
        assert_eq!(foe.substitute_hp, Some(10));
        assert!(foe.is_full_hp());
    }

    #[test]
    fn breaking_a_substitute_still_shields_the_secondary() {
        let mut state = create_test_battle(
            vec![TestPokemonBuilder::new("Hitter", 50)
                .with_moves(vec![Move::Bulldoze])
                .build()],
            vec![TestPokemonBuilder::new("Decoy", 50).build()],
        );
        state.active_mut(SideId::Opponent).substitute_hp = Some(1);
        let mut bus = EventBus::new();
        execute_move(&mut state, SideId::Player, Move::Bulldoze, &mut predictable_rng(), &mut bus);
        let foe = state.active(SideId::Opponent);
        assert_eq!(foe.substitute_hp, None);
        assert!(foe.is_full_hp());
        assert_eq!(foe.stages.get(StageStat::Speed), 0);
    }

    #[test]
    fn disguise_absorbs_the_first_hit() {
        let mut state = create_test_battle(
            vec![TestPokemonBuilder::new("Hitter", 50)
                .with_moves(vec![Move::Tackle])
                .build()],
            vec![TestPokemonBuilder::new("Mimic", 50)
                .with_ability(Ability::Disguise)
                .build()],
        );
        let mut bus = EventBus::new();
        execute_move(&mut state, SideId::Player, Move::Tackle, &mut predictable_rng(), &mut bus);
        assert!(state.active(SideId::Opponent).is_full_hp());
        assert!(state.active(SideId::Opponent).ability_spent);

        execute_move(&mut state, SideId::Player, Move::Tackle, &mut predictable_rng(), &mut bus);
        assert!(!state.active(SideId::Opponent).is_full_hp());
    }

    #[test]
    fn ghost_immunity_skips_recoil() {
        let mut state = create_test_battle(
            vec![TestPokemonBuilder::new("Reckless", 50)
                .with_moves(vec![Move::DoubleEdge])
                .build()],
            vec![TestPokemonBuilder::new("Ghost", 50)
                .with_types(vec![PokemonType::Ghost])
                .with_item(Item::RockyHelmet)
                .build()],
        );
        let before = state.clone();
        let mut bus = EventBus::new();
        execute_move(&mut state, SideId::Player, Move::DoubleEdge, &mut predictable_rng(), &mut bus);
        assert!(state.active(SideId::Player).is_full_hp());
        assert_eq!(state.active(SideId::Opponent), before.active(SideId::Opponent));
    }

    #[test]
    fn solar_beam_charges_outside_sun() {
        let mut state = create_test_battle(
            vec![TestPokemonBuilder::new("Plant", 50)
                .with_moves(vec![Move::SolarBeam])
                .build()],
            vec![TestPokemonBuilder::new("Target", 50).build()],
        );
        let mut bus = EventBus::new();
        execute_move(&mut state, SideId::Player, Move::SolarBeam, &mut predictable_rng(), &mut bus);
        assert_eq!(state.active(SideId::Player).volatiles.charging, Some(Move::SolarBeam));
        assert!(state.active(SideId::Opponent).is_full_hp());

        execute_move(&mut state, SideId::Player, Move::SolarBeam, &mut predictable_rng(), &mut bus);
        assert_eq!(state.active(SideId::Player).volatiles.charging, None);
        assert!(!state.active(SideId::Opponent).is_full_hp());
    }
}
