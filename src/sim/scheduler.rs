//! The per-actor tick: inbox drain, effect decay, front-of-queue
//! resolution
//!
//! The queue is strictly FIFO from the front with push-front
//! pre-emption. The front action is popped for the duration of its
//! `perform` so the effect may push onto the owner's own queue; a
//! Running action is then reinstated behind whatever it pushed.

use std::time::Instant;

use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::action::ActionStatus;
use crate::core::error::Result;
use crate::core::types::ActorId;
use crate::sim::ports::{CraftStore, Messenger, Pathfinder};
use crate::world::Realm;

/// Everything one resolution step may touch besides the realm
///
/// `now` is supplied by the driver so the algorithms never read a
/// hidden clock.
pub struct TickCtx<'a> {
    pub now: Instant,
    pub rng: &'a mut ChaCha8Rng,
    pub messenger: &'a dyn Messenger,
    pub store: &'a dyn CraftStore,
    pub pathfinder: &'a dyn Pathfinder,
}

/// Advance one actor by one tick
pub fn tick_actor(realm: &mut Realm, actor: ActorId, ctx: &mut TickCtx) -> Result<()> {
    // Interrupts queued from command contexts land first, oldest in
    // front-most position last so delivery order is preserved
    let interrupts = realm.actor_mut(actor)?.drain_inbox();
    for action in interrupts {
        realm.interrupt(actor, action, ctx.messenger)?;
    }

    {
        let subject = realm.actor_mut(actor)?;
        subject.effects.decay();
        if !subject.is_alive() {
            return Ok(());
        }
        let Some(front) = subject.queue.front() else {
            // Unreachable by construction: every queue holds the sentinel
            debug!(?actor, "action queue empty, reseeding sentinel");
            subject.queue.push_front(crate::action::Action::idle());
            return Ok(());
        };
        if front.is_idle() || !front.elapsed(ctx.now) {
            return Ok(());
        }
    }

    // Preconditions run immediately before the effect; a failure pops
    // the action and surfaces the reason
    let check_result = {
        let subject = realm.actor(actor)?;
        match subject.queue.front() {
            Some(front) => front.check(realm, actor, ctx),
            None => return Ok(()),
        }
    };
    if let Err(reason) = check_result {
        ctx.messenger.send(actor, &reason.to_string());
        realm.actor_mut(actor)?.queue.pop_front();
        return Ok(());
    }

    let Some(mut action) = realm.actor_mut(actor)?.queue.pop_front() else {
        return Ok(());
    };
    let len_before = realm.actor(actor)?.queue.len();

    let status = action.perform(realm, actor, ctx);

    match status {
        ActionStatus::Running => {
            if let Ok(subject) = realm.actor_mut(actor) {
                let pushed = subject.queue.len().saturating_sub(len_before);
                subject.queue.reinstate(action, pushed);
            }
        }
        ActionStatus::Finished | ActionStatus::Error => {
            debug!(?actor, ?status, action = %action.describe(), "action popped");
        }
    }
    Ok(())
}
