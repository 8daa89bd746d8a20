//! Crafting: consume ingredients, produce an item
//!
//! All item mutation goes through the injected store handle inside an
//! explicit transaction; any mid-sequence failure rolls back before the
//! action reports Error.

use tracing::{debug, warn};

use crate::action::Resolution;
use crate::combat::formulas;
use crate::core::error::{Result, SimError};
use crate::core::types::{ActorId, ItemId};
use crate::sim::ports::CraftStore;
use crate::sim::scheduler::TickCtx;
use crate::world::Realm;

#[derive(Debug, Clone)]
pub struct CraftAction {
    /// Recipe name, for messages and logs
    pub recipe: String,
    /// Items destroyed by the craft
    pub ingredients: Vec<ItemId>,
    /// Items required but not consumed
    pub tools: Vec<ItemId>,
    /// Blueprint of the produced item
    pub product: String,
}

pub(crate) fn check(
    realm: &Realm,
    actor: ActorId,
    craft: &CraftAction,
    store: &dyn CraftStore,
) -> Result<()> {
    let crafter = realm.actor(actor)?;
    if !crafter.is_alive() {
        return Err(SimError::CheckFailed("You are in no state to work.".to_string()));
    }
    let cost = formulas::movement_stamina_for(crafter);
    if !crafter.can_afford_stamina(cost) {
        return Err(SimError::CheckFailed(format!(
            "You are too tired to craft {}.",
            craft.recipe
        )));
    }
    for tool in &craft.tools {
        if !store.has_item(*tool) {
            return Err(SimError::CheckFailed(format!(
                "You no longer have the tools to craft {}.",
                craft.recipe
            )));
        }
    }
    for ingredient in &craft.ingredients {
        if !store.has_item(*ingredient) {
            return Err(SimError::CheckFailed(format!(
                "You no longer have the ingredients to craft {}.",
                craft.recipe
            )));
        }
    }
    Ok(())
}

pub(crate) fn perform(
    realm: &mut Realm,
    actor: ActorId,
    craft: &CraftAction,
    ctx: &mut TickCtx,
) -> Resolution {
    if let Err(reason) = ctx.store.begin() {
        warn!(?actor, %reason, "craft transaction failed to open");
        ctx.messenger.send(actor, "Something prevents you from working.");
        return Resolution::error();
    }
    for ingredient in &craft.ingredients {
        if let Err(reason) = ctx.store.consume(*ingredient) {
            debug!(?actor, %reason, recipe = %craft.recipe, "craft ingredient lost, rolling back");
            ctx.store.rollback();
            ctx.messenger.send(
                actor,
                &format!("Your materials for {} are gone.", craft.recipe),
            );
            return Resolution::error();
        }
    }
    let created = match ctx.store.create(&craft.product) {
        Ok(id) => id,
        Err(reason) => {
            debug!(?actor, %reason, recipe = %craft.recipe, "craft product creation failed, rolling back");
            ctx.store.rollback();
            ctx.messenger
                .send(actor, &format!("You fail to finish {}.", craft.recipe));
            return Resolution::error();
        }
    };
    if let Err(reason) = ctx.store.commit() {
        warn!(?actor, %reason, "craft transaction failed to commit");
        ctx.store.rollback();
        ctx.messenger
            .send(actor, &format!("You fail to finish {}.", craft.recipe));
        return Resolution::error();
    }

    if let Ok(crafter) = realm.actor_mut(actor) {
        let cost = formulas::movement_stamina_for(crafter);
        crafter.consume_stamina(cost);
    }
    debug!(?actor, recipe = %craft.recipe, item = ?created, "craft completed");
    ctx.messenger
        .send(actor, &format!("You finish crafting {}.", craft.recipe));
    Resolution::finished()
}
