//! Building: the crafting pattern aimed at room structures
//!
//! Same transactional discipline as crafting; the finished structure is
//! announced to the room rather than handed to the actor.

use tracing::{debug, warn};

use crate::action::Resolution;
use crate::combat::formulas;
use crate::core::error::{Result, SimError};
use crate::core::types::{ActorId, ItemId};
use crate::sim::ports::CraftStore;
use crate::sim::scheduler::TickCtx;
use crate::world::Realm;

#[derive(Debug, Clone)]
pub struct BuildAction {
    /// Schematic name, for messages and logs
    pub schematic: String,
    /// Items consumed by the construction
    pub components: Vec<ItemId>,
    /// Blueprint of the erected structure
    pub structure: String,
}

pub(crate) fn check(
    realm: &Realm,
    actor: ActorId,
    build: &BuildAction,
    store: &dyn CraftStore,
) -> Result<()> {
    let builder = realm.actor(actor)?;
    if !builder.is_alive() {
        return Err(SimError::CheckFailed("You are in no state to work.".to_string()));
    }
    if builder.room.is_none() {
        return Err(SimError::CheckFailed("There is nowhere to build here.".to_string()));
    }
    let cost = formulas::movement_stamina_for(builder);
    if !builder.can_afford_stamina(cost) {
        return Err(SimError::CheckFailed(format!(
            "You are too tired to build {}.",
            build.schematic
        )));
    }
    for component in &build.components {
        if !store.has_item(*component) {
            return Err(SimError::CheckFailed(format!(
                "You no longer have the components to build {}.",
                build.schematic
            )));
        }
    }
    Ok(())
}

pub(crate) fn perform(
    realm: &mut Realm,
    actor: ActorId,
    build: &BuildAction,
    ctx: &mut TickCtx,
) -> Resolution {
    if let Err(reason) = ctx.store.begin() {
        warn!(?actor, %reason, "build transaction failed to open");
        ctx.messenger.send(actor, "Something prevents you from working.");
        return Resolution::error();
    }
    for component in &build.components {
        if let Err(reason) = ctx.store.consume(*component) {
            debug!(?actor, %reason, schematic = %build.schematic, "build component lost, rolling back");
            ctx.store.rollback();
            ctx.messenger.send(
                actor,
                &format!("Your components for {} are gone.", build.schematic),
            );
            return Resolution::error();
        }
    }
    let created = match ctx.store.create(&build.structure) {
        Ok(id) => id,
        Err(reason) => {
            debug!(?actor, %reason, schematic = %build.schematic, "structure creation failed, rolling back");
            ctx.store.rollback();
            ctx.messenger
                .send(actor, &format!("You fail to raise {}.", build.schematic));
            return Resolution::error();
        }
    };
    if let Err(reason) = ctx.store.commit() {
        warn!(?actor, %reason, "build transaction failed to commit");
        ctx.store.rollback();
        ctx.messenger
            .send(actor, &format!("You fail to raise {}.", build.schematic));
        return Resolution::error();
    }

    let (name, room) = match realm.actor_mut(actor) {
        Ok(builder) => {
            let cost = formulas::movement_stamina_for(builder);
            builder.consume_stamina(cost);
            (builder.name.clone(), builder.room)
        }
        Err(_) => return Resolution::error(),
    };
    debug!(?actor, schematic = %build.schematic, item = ?created, "build completed");
    ctx.messenger
        .send(actor, &format!("You finish building {}.", build.schematic));
    if let Some(room_id) = room {
        ctx.messenger.send_room(
            room_id,
            &[actor],
            &format!("{} finishes building {}.", name, build.schematic),
        );
    }
    Resolution::finished()
}
