//! Flee: an escape roll against the press of opponents, then a dash
//! through a random exit
//!
//! A failed roll leaves the actor engaged and drains half the movement
//! cost. Both failure branches re-arm with the basic attack cooldown,
//! matching the established pacing of the ruleset.

use rand::Rng;
use tracing::warn;

use crate::action::Resolution;
use crate::combat::formulas;
use crate::core::error::{Result, SimError};
use crate::core::types::ActorId;
use crate::sim::scheduler::TickCtx;
use crate::world::Realm;

pub(crate) fn check(realm: &Realm, actor: ActorId) -> Result<()> {
    let runner = realm.actor(actor)?;
    if !runner.is_alive() {
        return Err(SimError::CheckFailed("You are in no state to run.".to_string()));
    }
    if runner.opponents.is_empty() {
        return Err(SimError::CheckFailed("You are not fighting anyone.".to_string()));
    }
    let Some(room_id) = runner.room else {
        return Err(SimError::CheckFailed("There is nowhere to run.".to_string()));
    };
    if realm.room(room_id)?.exits.is_empty() {
        return Err(SimError::CheckFailed("There is nowhere to run.".to_string()));
    }
    let cost = formulas::movement_stamina_for(runner);
    if !runner.can_afford_stamina(cost) {
        return Err(SimError::CheckFailed("You are too tired to run.".to_string()));
    }
    Ok(())
}

pub(crate) fn perform(realm: &mut Realm, actor: ActorId, ctx: &mut TickCtx) -> Resolution {
    realm.check_list(actor);

    let runner = match realm.actor(actor) {
        Ok(a) => a,
        Err(reason) => {
            warn!(?actor, %reason, "flee resolved for a missing actor");
            return Resolution::error();
        }
    };
    let opponent_count = runner.opponents.len();
    if opponent_count == 0 {
        ctx.messenger.send(actor, "You are no longer being pressed.");
        return Resolution::finished();
    }

    let movement_cost = formulas::movement_stamina_for(runner);
    let attack_rearm = formulas::attack_cooldown(runner);
    let agility = runner.agility_modifier();
    let name = runner.name.clone();
    let Some(room_id) = runner.room else {
        warn!(?actor, "flee resolved for a roomless actor");
        return Resolution::error();
    };

    let escape_roll = ctx.rng.gen_range(1u32..=20) + agility;
    if (escape_roll as usize) < opponent_count {
        if let Ok(a) = realm.actor_mut(actor) {
            a.consume_stamina(movement_cost / 2);
        }
        ctx.messenger.send(actor, "You fail to break away from the fight!");
        return Resolution::running(attack_rearm);
    }

    let exits = match realm.room(room_id) {
        Ok(room) => room.exits.clone(),
        Err(reason) => {
            warn!(?actor, %reason, "flee resolved in a missing room");
            return Resolution::error();
        }
    };
    // check() refuses exitless rooms, but the fight may have moved
    if exits.is_empty() {
        ctx.messenger.send(actor, "There is nowhere to run.");
        return Resolution::error();
    }
    let exit = exits[ctx.rng.gen_range(0..exits.len())];
    if !realm.contains_room(exit.to) {
        // Structural anomaly: the exit leads nowhere. Costs nothing,
        // the attempt simply fizzles and waits out the same cooldown a
        // failed escape roll does.
        warn!(?actor, ?room_id, destination = ?exit.to, "flee selected an exit with no destination");
        return Resolution::running(attack_rearm);
    }

    if let Ok(a) = realm.actor_mut(actor) {
        a.consume_stamina(movement_cost);
    }
    let moved = realm.relocate(
        actor,
        exit.to,
        &format!("{} flees {}.", name, exit.direction.name()),
        &format!("{} rushes in, wide-eyed.", name),
        &format!("You flee {}.", exit.direction.name()),
        ctx.messenger,
    );
    if !moved {
        ctx.messenger.send(actor, "Something blocks your escape!");
        return Resolution::error();
    }
    Resolution::finished()
}
