//! Pursuit: follow a planned route toward a moving quarry
//!
//! The route is re-planned whenever it runs out or the quarry has moved
//! since the last plan; each resolve advances one waypoint. Moving
//! mid-pursuit disturbs the pursuer's aim for a few ticks while a
//! ranged shot is being lined up.

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::action::Resolution;
use crate::actor::effects::Effect;
use crate::combat::formulas;
use crate::core::error::{Result, SimError};
use crate::core::types::{ActorId, RoomId};
use crate::sim::scheduler::TickCtx;
use crate::world::Realm;

/// Transient state owned by a chase action
#[derive(Debug, Clone)]
pub struct ChaseState {
    pub target: ActorId,
    /// Where the quarry was when the route was planned
    pub last_known: Option<RoomId>,
    /// Remaining waypoints, front = next step
    pub route: VecDeque<RoomId>,
}

impl ChaseState {
    pub fn new(target: ActorId) -> Self {
        Self {
            target,
            last_known: None,
            route: VecDeque::new(),
        }
    }

    /// Whether the held route is still trustworthy
    pub fn needs_replan(&self, target_room: RoomId) -> bool {
        self.route.is_empty() || self.last_known != Some(target_room)
    }
}

pub(crate) fn check(realm: &Realm, actor: ActorId, state: &ChaseState) -> Result<()> {
    let pursuer = realm.actor(actor)?;
    if !pursuer.is_alive() {
        return Err(SimError::CheckFailed("You are in no state to give chase.".to_string()));
    }
    let quarry_stands = realm
        .actor(state.target)
        .map(|t| t.is_alive() && t.room.is_some())
        .unwrap_or(false);
    if !quarry_stands {
        return Err(SimError::CheckFailed("Your quarry is gone.".to_string()));
    }
    Ok(())
}

pub(crate) fn perform(
    realm: &mut Realm,
    actor: ActorId,
    state: &mut ChaseState,
    ctx: &mut TickCtx,
) -> Resolution {
    let (here, movement_cost, rearm, name) = match realm.actor(actor) {
        Ok(pursuer) => {
            let Some(here) = pursuer.room else {
                warn!(?actor, "chase resolved for a roomless actor");
                return Resolution::error();
            };
            (
                here,
                formulas::movement_stamina_for(pursuer),
                formulas::chase_cooldown(pursuer),
                pursuer.name.clone(),
            )
        }
        Err(reason) => {
            warn!(?actor, %reason, "chase resolved for a missing actor");
            return Resolution::error();
        }
    };
    let quarry_room = match realm.actor(state.target) {
        Ok(quarry) if quarry.is_alive() => quarry.room,
        _ => None,
    };
    let Some(there) = quarry_room else {
        ctx.messenger.send(actor, "Your quarry is gone.");
        return Resolution::error();
    };

    if here == there {
        ctx.messenger.send(actor, "You catch up with your quarry!");
        return Resolution::finished();
    }

    if state.needs_replan(there) {
        debug!(?actor, quarry = ?state.target, from = ?here, to = ?there, "planning pursuit route");
        let Some(path) = ctx.pathfinder.find_path(realm, actor, here, there) else {
            ctx.messenger.send(actor, "There is no path to your quarry.");
            return Resolution::error();
        };
        state.route = path.into_iter().filter(|&r| r != here).collect();
        state.last_known = Some(there);
    }

    let Some(waypoint) = state.route.pop_front() else {
        warn!(?actor, "pursuit route empty after planning");
        return Resolution::error();
    };

    if movement_cost > 0 {
        let can_afford = realm
            .actor(actor)
            .map(|a| a.can_afford_stamina(movement_cost))
            .unwrap_or(false);
        if !can_afford {
            ctx.messenger.send(actor, "You are too exhausted to keep up the pursuit.");
            return Resolution::error();
        }
    }

    let moved = realm.relocate(
        actor,
        waypoint,
        &format!("{} runs off in pursuit.", name),
        &format!("{} storms in, hunting someone.", name),
        "You press on after your quarry.",
        ctx.messenger,
    );
    if !moved {
        ctx.messenger.send(actor, "Something blocks your pursuit.");
        return Resolution::error();
    }
    if let Ok(pursuer) = realm.actor_mut(actor) {
        pursuer.consume_stamina(movement_cost);
        // Sprinting between rooms leaves no time to keep a shot lined up
        if pursuer.opponents.aimed_target().is_some() {
            pursuer.effects.add(Effect::disturbed_aim());
        }
    }

    if waypoint == there {
        ctx.messenger.send(actor, "You catch up with your quarry!");
        return Resolution::finished();
    }
    Resolution::running(rearm)
}
