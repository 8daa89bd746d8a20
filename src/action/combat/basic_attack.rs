//! The basic attack: one resolution per active weapon against the
//! highest-priority opponent in range
//!
//! Re-arms its own cooldown every resolve and keeps Running while any
//! opponent remains registered; an empty registry finishes the fight.

use tracing::{debug, warn};

use rand::Rng;

use crate::action::{Action, Resolution};
use crate::actor::Actor;
use crate::combat::formulas;
use crate::combat::resolution::resolve_swing;
use crate::core::config::config;
use crate::core::error::{Result, SimError};
use crate::core::types::ActorId;
use crate::item::{Weapon, WeaponKind};
use crate::sim::scheduler::TickCtx;
use crate::world::Realm;

pub(crate) fn check(realm: &Realm, actor: ActorId) -> Result<()> {
    let attacker = realm.actor(actor)?;
    if !attacker.is_alive() {
        return Err(SimError::CheckFailed("You are in no state to fight.".to_string()));
    }
    if attacker.active_weapons().is_empty() {
        return Err(SimError::CheckFailed(
            "You are not wielding anything to fight with.".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn perform(realm: &mut Realm, actor: ActorId, ctx: &mut TickCtx) -> Resolution {
    realm.check_list(actor);

    let attacker = match realm.actor(actor) {
        Ok(a) => a,
        Err(reason) => {
            warn!(?actor, %reason, "attack resolved for a missing actor");
            return Resolution::error();
        }
    };
    if attacker.opponents.is_empty() {
        ctx.messenger.send(actor, "The fight is over.");
        return Resolution::finished();
    }

    let rearm = formulas::attack_cooldown(attacker);
    let is_npc = attacker.is_npc;
    let weapons: Vec<Weapon> = attacker.active_weapons().to_vec();

    let Some(target) = select_target(realm, attacker) else {
        // Opponents exist but none can be reached from here
        if is_npc {
            if let Some(top) = realm.actor(actor).ok().and_then(|a| a.opponents.top_aggro()) {
                let pursuer = match realm.actor(actor) {
                    Ok(a) => a,
                    Err(_) => return Resolution::error(),
                };
                let cooldown = formulas::chase_cooldown(pursuer);
                debug!(?actor, quarry = ?top.opponent, "no opponent in range, giving chase");
                if let Ok(a) = realm.actor_mut(actor) {
                    a.queue.push_front(Action::chase(top.opponent, ctx.now + cooldown));
                }
            }
        } else {
            ctx.messenger.send(actor, "None of your foes are within reach.");
        }
        return Resolution::running(rearm);
    };

    for weapon in &weapons {
        let Ok(attacker) = realm.actor(actor) else {
            return Resolution::error();
        };
        if !weapon_can_reach(realm, attacker, weapon, target) {
            continue;
        }
        let Ok(defender) = realm.actor(target) else { break };
        if !defender.is_alive() {
            break;
        }

        let stamina_preview = if weapon.is_placed() {
            0
        } else {
            formulas::attack_stamina_for(attacker, weapon.weight)
        };
        if !attacker.can_afford_stamina(stamina_preview) {
            ctx.messenger
                .send(actor, &format!("You are too tired to swing your {}.", weapon.name));
            continue;
        }

        let atk_roll = ctx.rng.gen_range(1..=20);
        let dmg_roll = ctx
            .rng
            .gen_range(weapon.min_damage()..=weapon.max_damage());
        let outcome = resolve_swing(attacker, defender, weapon, atk_roll, dmg_roll);

        let attacker_name = attacker.name.clone();
        let defender_name = defender.name.clone();
        let room = attacker.room;

        if let Ok(a) = realm.actor_mut(actor) {
            a.consume_stamina(outcome.stamina_cost);
        }

        if !outcome.hit {
            ctx.messenger.send(
                actor,
                &format!("You miss {} with your {}.", defender_name, weapon.name),
            );
            ctx.messenger.send(
                target,
                &format!("{} misses you with their {}.", attacker_name, weapon.name),
            );
            if let Some(room_id) = room {
                ctx.messenger.send_room(
                    room_id,
                    &[actor, target],
                    &format!("{} misses {}.", attacker_name, defender_name),
                );
            }
            continue;
        }

        let verb = if outcome.critical { "critically hit" } else { "hit" };
        ctx.messenger.send(
            actor,
            &format!(
                "You {} {} with your {} for {} damage.",
                verb, defender_name, weapon.name, outcome.damage
            ),
        );
        ctx.messenger.send(
            target,
            &format!(
                "{} {}s you with their {} for {} damage.",
                attacker_name, verb, weapon.name, outcome.damage
            ),
        );
        if let Some(room_id) = room {
            ctx.messenger.send_room(
                room_id,
                &[actor, target],
                &format!("{} {}s {}.", attacker_name, verb, defender_name),
            );
        }

        let died = match realm.actor_mut(target) {
            Ok(d) => d.take_damage(outcome.damage),
            Err(_) => break,
        };
        if died {
            ctx.messenger.send(actor, &format!("You have slain {}!", defender_name));
            realm.kill(target, ctx.messenger);
            break;
        }

        apply_hit_reactions(realm, actor, target, outcome.damage, ctx);
    }

    Resolution::running(rearm)
}

/// Victim-side consequences of a damaging hit: mutual engagement, an
/// aggression bump proportional to the health fraction lost, and a
/// retaliatory attack if the victim was not already fighting.
fn apply_hit_reactions(
    realm: &mut Realm,
    attacker: ActorId,
    victim: ActorId,
    damage: u32,
    ctx: &mut TickCtx,
) {
    if let Err(reason) = realm.engage(attacker, victim) {
        warn!(?attacker, ?victim, %reason, "failed to establish engagement");
        return;
    }
    let Ok(victim_actor) = realm.actor_mut(victim) else { return };
    let bump = damage.saturating_mul(config().aggro_damage_scale) / victim_actor.max_health.max(1);
    victim_actor.opponents.bump_aggro(attacker, bump);

    let already_fighting = victim_actor
        .queue
        .front()
        .map(Action::is_combat)
        .unwrap_or(false);
    if !already_fighting && !victim_actor.active_weapons().is_empty() {
        let cooldown = formulas::attack_cooldown(victim_actor);
        victim_actor.queue.push_front(Action::basic_attack(ctx.now + cooldown));
        ctx.messenger.send(victim, "You turn to face your attacker!");
    }
}

/// Highest-priority living opponent reachable by at least one active
/// weapon, honoring the predefined target first
fn select_target(realm: &Realm, attacker: &Actor) -> Option<ActorId> {
    let candidates = attacker
        .opponents
        .predefined_target()
        .into_iter()
        .chain(attacker.opponents.iter().map(|e| e.opponent));
    for candidate in candidates {
        let Ok(target) = realm.actor(candidate) else { continue };
        if !target.is_alive() || target.room.is_none() {
            continue;
        }
        if attacker
            .active_weapons()
            .iter()
            .any(|w| weapon_can_reach(realm, attacker, w, candidate))
        {
            return Some(candidate);
        }
    }
    None
}

/// Whether one weapon can reach the target from here
///
/// Melee and placed weapons demand a shared room. Ranged weapons reach
/// across rooms only at the currently aimed target, within range.
fn weapon_can_reach(realm: &Realm, attacker: &Actor, weapon: &Weapon, target: ActorId) -> bool {
    let (Some(here), Ok(target_actor)) = (attacker.room, realm.actor(target)) else {
        return false;
    };
    let Some(there) = target_actor.room else { return false };
    if here == there {
        return true;
    }
    match weapon.kind {
        WeaponKind::Ranged { range } => {
            attacker.opponents.aimed_target() == Some(target)
                && realm.room_distance(here, there, range).is_some()
        }
        _ => false,
    }
}
