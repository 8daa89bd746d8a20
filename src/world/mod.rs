//! The realm: actor arena, room topology, and the cross-actor operations
//! that keep combat relationships consistent
//!
//! All cross-actor references are ids resolved through the arena, so a
//! destroyed actor can never dangle; stale registry entries are pruned by
//! the consistency sweep instead.

pub mod pathfind;
pub mod room;

use ahash::AHashMap;
use tracing::{debug, warn};

use crate::action::{Action, ActionKind};
use crate::actor::Actor;
use crate::core::error::{Result, SimError};
use crate::core::types::{ActorId, RoomId};
use crate::sim::ports::Messenger;

pub use room::{Direction, Exit, Room};

#[derive(Debug, Default)]
pub struct Realm {
    actors: AHashMap<ActorId, Actor>,
    rooms: AHashMap<RoomId, Room>,
}

impl Realm {
    pub fn new() -> Self {
        Self::default()
    }

    // === TOPOLOGY ===

    pub fn add_room(&mut self, room: Room) {
        self.rooms.insert(room.id, room);
    }

    pub fn room(&self, id: RoomId) -> Result<&Room> {
        self.rooms.get(&id).ok_or(SimError::RoomNotFound(id))
    }

    pub fn room_mut(&mut self, id: RoomId) -> Result<&mut Room> {
        self.rooms.get_mut(&id).ok_or(SimError::RoomNotFound(id))
    }

    pub fn contains_room(&self, id: RoomId) -> bool {
        self.rooms.contains_key(&id)
    }

    /// Connect two rooms with a matched pair of exits
    pub fn connect(&mut self, from: RoomId, direction: Direction, to: RoomId) -> Result<()> {
        self.room_mut(from)?.exits.push(Exit { direction, to });
        self.room_mut(to)?.exits.push(Exit {
            direction: direction.opposite(),
            to: from,
        });
        Ok(())
    }

    /// Whether `_actor` may pass directly from `from` to `to`
    ///
    /// Used both as the pathfinding edge predicate and before a direct
    /// relocation.
    pub fn check_connection(&self, _actor: ActorId, from: RoomId, to: RoomId) -> Result<()> {
        let origin = self.room(from)?;
        self.room(to)?;
        match origin.exit_to(to) {
            Some(_) => Ok(()),
            None => Err(SimError::Blocked(format!(
                "there is no passage from {} leading there",
                origin.name
            ))),
        }
    }

    /// Breadth-first hop count between two rooms, up to `max_hops`
    pub fn room_distance(&self, from: RoomId, to: RoomId, max_hops: u32) -> Option<u32> {
        if from == to {
            return Some(0);
        }
        let mut frontier = vec![from];
        let mut visited: Vec<RoomId> = vec![from];
        for depth in 1..=max_hops {
            let mut next = Vec::new();
            for room_id in frontier {
                let Ok(room) = self.room(room_id) else { continue };
                for exit in &room.exits {
                    if exit.to == to {
                        return Some(depth);
                    }
                    if !visited.contains(&exit.to) {
                        visited.push(exit.to);
                        next.push(exit.to);
                    }
                }
            }
            frontier = next;
        }
        None
    }

    // === ACTORS ===

    /// Place an actor into the arena and its starting room
    pub fn spawn(&mut self, mut actor: Actor, room: RoomId) -> Result<ActorId> {
        let id = actor.id;
        actor.room = Some(room);
        self.room_mut(room)?.occupants.push(id);
        self.actors.insert(id, actor);
        Ok(id)
    }

    pub fn actor(&self, id: ActorId) -> Result<&Actor> {
        self.actors.get(&id).ok_or(SimError::ActorNotFound(id))
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Result<&mut Actor> {
        self.actors.get_mut(&id).ok_or(SimError::ActorNotFound(id))
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.actors.contains_key(&id)
    }

    pub fn actor_ids(&self) -> Vec<ActorId> {
        self.actors.keys().copied().collect()
    }

    /// Move an actor through a connected exit
    ///
    /// Updates room occupancy and emits the three narrative messages.
    /// Returns false when the passage is not traversable.
    pub fn relocate(
        &mut self,
        actor: ActorId,
        destination: RoomId,
        depart_msg: &str,
        arrive_msg: &str,
        actor_msg: &str,
        messenger: &dyn Messenger,
    ) -> bool {
        let Some(current) = self.actors.get(&actor).and_then(|a| a.room) else {
            return false;
        };
        if let Err(reason) = self.check_connection(actor, current, destination) {
            debug!(?actor, ?current, ?destination, %reason, "relocation refused");
            return false;
        }
        if let Ok(room) = self.room_mut(current) {
            room.remove_occupant(actor);
        }
        messenger.send_room(current, &[actor], depart_msg);
        if let Ok(room) = self.room_mut(destination) {
            room.occupants.push(actor);
        }
        if let Some(a) = self.actors.get_mut(&actor) {
            a.room = Some(destination);
        }
        messenger.send_room(destination, &[actor], arrive_msg);
        messenger.send(actor, actor_msg);
        true
    }

    // === COMBAT RELATIONSHIPS ===

    /// Establish the mutual combat relation between two actors
    ///
    /// One symmetric operation instead of two independent registrations,
    /// so neither side's entry can be forgotten. Initial aggression on
    /// both sides defaults to the absolute level difference.
    pub fn engage(&mut self, a: ActorId, b: ActorId) -> Result<()> {
        let level_a = self.actor(a)?.level;
        let level_b = self.actor(b)?.level;
        let delta = level_a.abs_diff(level_b);
        self.actor_mut(a)?.opponents.add_opponent(b, None, delta);
        self.actor_mut(b)?.opponents.add_opponent(a, None, delta);
        Ok(())
    }

    /// Remove `other` from `owner`'s registry
    ///
    /// When the registry empties as a result, the owner's current combat
    /// action is stopped. Returns false if `other` was not registered.
    pub fn remove_opponent(
        &mut self,
        owner: ActorId,
        other: ActorId,
        messenger: &dyn Messenger,
    ) -> bool {
        let Some(actor) = self.actors.get_mut(&owner) else {
            return false;
        };
        if !actor.opponents.remove_opponent(other) {
            return false;
        }
        if actor.opponents.is_empty() {
            self.stop_combat_action(owner, messenger);
        }
        true
    }

    /// Tear down every combat relation involving `actor`, best effort
    ///
    /// Used on death and disconnect. Failures to update the other side
    /// are logged, never propagated.
    pub fn reset_combat(&mut self, actor: ActorId, messenger: &dyn Messenger) {
        let opponents: Vec<ActorId> = match self.actor(actor) {
            Ok(a) => a.opponents.iter().map(|e| e.opponent).collect(),
            Err(_) => return,
        };
        for opponent in opponents {
            if !self.remove_opponent(opponent, actor, messenger) {
                warn!(?actor, ?opponent, "disengage found no reciprocal registry entry");
            }
        }
        if let Some(a) = self.actors.get_mut(&actor) {
            a.opponents.clear();
        }
        self.stop_combat_action(actor, messenger);
    }

    /// Consistency sweep: drop registry entries whose actor is gone,
    /// dead, or no longer anywhere
    pub fn check_list(&mut self, actor: ActorId) {
        let stale: Vec<ActorId> = {
            let Ok(owner) = self.actor(actor) else { return };
            owner
                .opponents
                .iter()
                .map(|e| e.opponent)
                .filter(|id| {
                    !self
                        .actors
                        .get(id)
                        .map(|a| a.is_alive() && a.room.is_some())
                        .unwrap_or(false)
                })
                .collect()
        };
        if stale.is_empty() {
            return;
        }
        if let Some(owner) = self.actors.get_mut(&actor) {
            debug!(?actor, count = stale.len(), "pruning stale opponent entries");
            owner.opponents.retain_valid(|id| !stale.contains(&id));
        }
    }

    /// Handle an actor's death: remove it from the world and tear down
    /// its combat relations
    pub fn kill(&mut self, actor: ActorId, messenger: &dyn Messenger) {
        let (name, room) = match self.actors.get_mut(&actor) {
            Some(a) => {
                a.health = 0;
                (a.name.clone(), a.room.take())
            }
            None => return,
        };
        if let Some(room_id) = room {
            if let Ok(room) = self.room_mut(room_id) {
                room.remove_occupant(actor);
            }
            messenger.send_room(room_id, &[actor], &format!("{} has died.", name));
        }
        self.reset_combat(actor, messenger);
    }

    // === ACTION DELIVERY ===

    /// Pre-empt an actor's current action immediately
    ///
    /// The previous front action's interruption message is surfaced to
    /// the actor before the new action takes the front slot.
    pub fn interrupt(&mut self, actor: ActorId, action: Action, messenger: &dyn Messenger) -> Result<()> {
        let target = self.actor_mut(actor)?;
        let stop_msg = target.queue.front().filter(|f| !f.is_idle()).map(|f| f.stop());
        target.queue.push_front(action);
        if let Some(msg) = stop_msg {
            messenger.send(actor, &msg);
        }
        Ok(())
    }

    /// Queue an interrupt for delivery at the actor's next tick
    pub fn queue_interrupt(&self, actor: ActorId, action: Action) -> Result<()> {
        self.actor(actor)?.queue_interrupt(action);
        Ok(())
    }

    fn stop_combat_action(&mut self, actor: ActorId, messenger: &dyn Messenger) {
        let Some(target) = self.actors.get_mut(&actor) else {
            return;
        };
        let is_combat = target
            .queue
            .front()
            .map(|f| matches!(f.kind, ActionKind::Combat(_)))
            .unwrap_or(false);
        if is_combat {
            let msg = target.queue.front().map(|f| f.stop());
            target.queue.pop_front();
            if let Some(msg) = msg {
                messenger.send(actor, &msg);
            }
        }
    }
}
