//! Actor state: the per-character slice of the world the simulation
//! core reads and writes
//!
//! Actors live in the realm arena and are only ever referenced by id.
//! Each actor owns exactly one action queue, one opponent registry, and
//! a mutex-protected interrupt inbox drained at the start of its tick.

pub mod abilities;
pub mod effects;

use std::collections::VecDeque;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::action::queue::ActionQueue;
use crate::action::Action;
use crate::actor::abilities::{Abilities, Ability};
use crate::actor::effects::EffectList;
use crate::combat::aggro::OpponentRegistry;
use crate::core::config::config;
use crate::core::types::{ActorId, RoomId};
use crate::item::{Armor, Weapon};

/// Body posture, scales movement stamina costs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Posture {
    Standing,
    Sitting,
    Crouching,
    Prone,
}

impl Posture {
    /// Movement cost multiplier for this posture
    pub fn movement_multiplier(&self) -> f64 {
        let cfg = config();
        match self {
            Posture::Standing | Posture::Sitting => 1.0,
            Posture::Crouching => cfg.crouch_multiplier,
            Posture::Prone => cfg.prone_multiplier,
        }
    }
}

#[derive(Debug)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub level: u32,
    pub health: u32,
    pub max_health: u32,
    pub stamina: u32,
    pub max_stamina: u32,
    pub posture: Posture,
    pub abilities: Abilities,
    /// Body weight in pounds
    pub weight: f64,
    /// Total carried weight in pounds
    pub carried_weight: f64,
    pub room: Option<RoomId>,
    pub weapons: Vec<Weapon>,
    pub armor: Vec<Armor>,
    pub queue: ActionQueue,
    pub opponents: OpponentRegistry,
    pub effects: EffectList,
    /// Non-player actors pursue out-of-range opponents instead of waiting
    pub is_npc: bool,
    /// Interrupts queued from command contexts, drained at tick start
    inbox: Mutex<VecDeque<Action>>,
}

impl Actor {
    pub fn new(name: &str, level: u32) -> Self {
        Self {
            id: ActorId::new(),
            name: name.to_string(),
            level,
            health: 100,
            max_health: 100,
            stamina: 100,
            max_stamina: 100,
            posture: Posture::Standing,
            abilities: Abilities::default(),
            weight: 160.0,
            carried_weight: 0.0,
            room: None,
            weapons: Vec::new(),
            armor: Vec::new(),
            queue: ActionQueue::new(),
            opponents: OpponentRegistry::new(),
            effects: EffectList::default(),
            is_npc: false,
            inbox: Mutex::new(VecDeque::new()),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Apply damage; returns true if this kills the actor
    pub fn take_damage(&mut self, damage: u32) -> bool {
        if damage >= self.health {
            self.health = 0;
            true
        } else {
            self.health -= damage;
            false
        }
    }

    pub fn can_afford_stamina(&self, cost: u32) -> bool {
        self.stamina >= cost
    }

    pub fn consume_stamina(&mut self, cost: u32) {
        self.stamina = self.stamina.saturating_sub(cost);
    }

    /// Weapons currently wielded and usable
    pub fn active_weapons(&self) -> &[Weapon] {
        &self.weapons
    }

    pub fn strength_modifier(&self) -> u32 {
        self.abilities.modifier(Ability::Strength)
    }

    pub fn agility_modifier(&self) -> u32 {
        self.abilities.modifier(Ability::Agility)
    }

    pub fn perception_modifier(&self) -> u32 {
        self.abilities.modifier(Ability::Perception)
    }

    /// Armor class: 10 + agility modifier + equipped armor bonuses
    pub fn armor_class(&self) -> i32 {
        10 + self.agility_modifier() as i32 + self.armor.iter().map(|a| a.armor_class).sum::<i32>()
    }

    /// Queue an interrupt from a command context
    ///
    /// The action is delivered at the start of this actor's next tick, so
    /// no lock is held across action execution.
    pub fn queue_interrupt(&self, action: Action) {
        let mut inbox = self.inbox.lock().unwrap_or_else(|e| e.into_inner());
        inbox.push_back(action);
    }

    /// Drain the interrupt inbox, preserving delivery order
    pub fn drain_inbox(&mut self) -> Vec<Action> {
        let mut inbox = self.inbox.lock().unwrap_or_else(|e| e.into_inner());
        inbox.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use std::time::Instant;

    #[test]
    fn test_damage_floors_at_zero_health() {
        let mut actor = Actor::new("Bram", 1);
        assert!(!actor.take_damage(40));
        assert_eq!(actor.health, 60);
        assert!(actor.take_damage(200));
        assert_eq!(actor.health, 0);
        assert!(!actor.is_alive());
    }

    #[test]
    fn test_stamina_saturates() {
        let mut actor = Actor::new("Bram", 1);
        actor.stamina = 3;
        actor.consume_stamina(10);
        assert_eq!(actor.stamina, 0);
    }

    #[test]
    fn test_armor_class_counts_equipment() {
        let mut actor = Actor::new("Bram", 1);
        actor.abilities.agility = 12;
        actor.armor.push(Armor::new("leather cuirass", 2));
        actor.armor.push(Armor::new("iron cap", 1));
        assert_eq!(actor.armor_class(), 14);
    }

    #[test]
    fn test_inbox_preserves_delivery_order() {
        let mut actor = Actor::new("Bram", 1);
        actor.queue_interrupt(Action::idle());
        actor.queue_interrupt(Action::basic_attack(Instant::now()));
        let drained = actor.drain_inbox();
        assert_eq!(drained.len(), 2);
        assert!(drained[0].is_idle());
        assert!(!drained[1].is_idle());
        assert!(actor.drain_inbox().is_empty());
    }
}
