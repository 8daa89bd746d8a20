//! The async driver: a tokio interval loop ticking every actor
//!
//! Owns the realm, the seeded RNG, and the collaborator ports. `step`
//! is synchronous and deterministic given the RNG state, which is what
//! the integration tests drive directly.

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use crate::core::config::config;
use crate::sim::ports::{
    AStarPathfinder, CraftStore, MemoryStore, Messenger, Pathfinder, TracingMessenger,
};
use crate::sim::scheduler::{tick_actor, TickCtx};
use crate::world::Realm;

pub struct Simulation {
    pub realm: Realm,
    rng: ChaCha8Rng,
    messenger: Box<dyn Messenger + Send + Sync>,
    store: Box<dyn CraftStore + Send + Sync>,
    pathfinder: Box<dyn Pathfinder + Send + Sync>,
}

impl Simulation {
    /// A simulation with the default ports and a seeded RNG
    pub fn new(realm: Realm, seed: u64) -> Self {
        Self {
            realm,
            rng: ChaCha8Rng::seed_from_u64(seed),
            messenger: Box::new(TracingMessenger),
            store: Box::new(MemoryStore::new()),
            pathfinder: Box::new(AStarPathfinder),
        }
    }

    pub fn with_messenger(mut self, messenger: Box<dyn Messenger + Send + Sync>) -> Self {
        self.messenger = messenger;
        self
    }

    pub fn with_store(mut self, store: Box<dyn CraftStore + Send + Sync>) -> Self {
        self.store = store;
        self
    }

    pub fn with_pathfinder(mut self, pathfinder: Box<dyn Pathfinder + Send + Sync>) -> Self {
        self.pathfinder = pathfinder;
        self
    }

    /// Tick every actor once against the supplied instant
    pub fn step(&mut self, now: Instant) {
        for id in self.realm.actor_ids() {
            let mut ctx = TickCtx {
                now,
                rng: &mut self.rng,
                messenger: self.messenger.as_ref(),
                store: self.store.as_ref(),
                pathfinder: self.pathfinder.as_ref(),
            };
            if let Err(reason) = tick_actor(&mut self.realm, id, &mut ctx) {
                // A single actor's failure never takes the loop down
                warn!(actor = ?id, %reason, "tick failed");
            }
        }
    }

    /// Drive the world for a fixed number of ticks
    pub async fn run_for(&mut self, ticks: u64) {
        let period = Duration::from_millis(config().tick_interval_ms);
        let mut interval = tokio::time::interval(period);
        for _ in 0..ticks {
            interval.tick().await;
            self.step(Instant::now());
        }
        info!(ticks, "simulation run complete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::actor::Actor;
    use crate::core::types::RoomId;
    use crate::item::{Weapon, WeaponKind, WieldSlot};
    use crate::world::Room;

    #[test]
    fn test_step_ticks_every_actor() {
        let mut realm = Realm::new();
        realm.add_room(Room::new(RoomId(1), "yard"));
        let mut brawler = Actor::new("brawler", 1);
        brawler.weapons.push(Weapon::new(
            "fists",
            WeaponKind::Melee { two_handed: false },
            WieldSlot::MainHand,
        ));
        let a = realm.spawn(brawler, RoomId(1)).unwrap();
        let b = realm.spawn(Actor::new("bystander", 1), RoomId(1)).unwrap();
        realm.engage(a, b).unwrap();
        realm.queue_interrupt(a, Action::basic_attack(Instant::now())).unwrap();

        let mut sim = Simulation::new(realm, 7);
        sim.step(Instant::now());

        // The interrupt was delivered and the attack resolved; both
        // queues still hold their sentinels
        let attacker = sim.realm.actor(a).unwrap();
        assert!(attacker.queue.front().map(Action::is_combat).unwrap_or(false));
        assert!(attacker.queue.iter().last().map(Action::is_idle).unwrap_or(false));
        let bystander = sim.realm.actor(b).unwrap();
        assert!(bystander.queue.iter().last().map(Action::is_idle).unwrap_or(false));
    }
}
