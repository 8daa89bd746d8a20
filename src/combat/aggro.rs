//! Per-actor opponent registry
//!
//! An ordered list of {opponent, aggression} pairs kept sorted descending
//! by aggression, plus the two optional single-valued target fields. The
//! registry stores ids only; liveness is checked against the realm arena
//! during the consistency sweep (`Realm::check_list`).

use serde::{Deserialize, Serialize};

use crate::core::types::ActorId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggression {
    pub opponent: ActorId,
    pub aggro: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpponentRegistry {
    entries: Vec<Aggression>,
    /// Player-declared preferred target
    predefined: Option<ActorId>,
    /// Target currently aimed at for ranged attacks
    aimed: Option<ActorId>,
}

impl OpponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an opponent; returns false if already present
    ///
    /// When no initial aggression is given the absolute level delta between
    /// the two actors is used. Registration is one-sided; `Realm::engage`
    /// establishes the mutual relation.
    pub fn add_opponent(&mut self, other: ActorId, initial: Option<u32>, level_delta: u32) -> bool {
        if self.has_opponent(other) {
            return false;
        }
        self.entries.push(Aggression {
            opponent: other,
            aggro: initial.unwrap_or(level_delta),
        });
        self.sort();
        true
    }

    /// Drop an opponent; returns false if it was never registered
    ///
    /// Clears the predefined and aimed targets when they referenced the
    /// removed actor. Emptying the registry is reported to the caller
    /// through `is_empty` so the owning combat action can be stopped.
    pub fn remove_opponent(&mut self, other: ActorId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.opponent != other);
        if self.entries.len() == before {
            return false;
        }
        if self.predefined == Some(other) {
            self.predefined = None;
        }
        if self.aimed == Some(other) {
            self.aimed = None;
        }
        true
    }

    pub fn has_opponent(&self, other: ActorId) -> bool {
        self.entries.iter().any(|e| e.opponent == other)
    }

    pub fn set_aggro(&mut self, other: ActorId, aggro: u32) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.opponent == other) else {
            return false;
        };
        entry.aggro = aggro;
        self.sort();
        true
    }

    pub fn get_aggro(&self, other: ActorId) -> Option<u32> {
        self.entries.iter().find(|e| e.opponent == other).map(|e| e.aggro)
    }

    /// Raise an opponent's aggression by a delta, saturating
    pub fn bump_aggro(&mut self, other: ActorId, delta: u32) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.opponent == other) else {
            return false;
        };
        entry.aggro = entry.aggro.saturating_add(delta);
        self.sort();
        true
    }

    /// Highest-aggression opponent, if any
    pub fn top_aggro(&self) -> Option<Aggression> {
        self.entries.first().copied()
    }

    /// Promote an opponent to the top by assigning max + 1
    ///
    /// Leaves the relative ordering of everyone below untouched.
    pub fn move_to_top_aggro(&mut self, other: ActorId) -> bool {
        if !self.has_opponent(other) {
            return false;
        }
        let max = self.entries.iter().map(|e| e.aggro).max().unwrap_or(0);
        self.set_aggro(other, max.saturating_add(1))
    }

    /// Opponents in descending aggression order
    pub fn iter(&self) -> impl Iterator<Item = &Aggression> {
        self.entries.iter()
    }

    /// Drop every entry whose id fails the supplied liveness predicate
    pub fn retain_valid(&mut self, mut valid: impl FnMut(ActorId) -> bool) {
        let stale: Vec<ActorId> = self
            .entries
            .iter()
            .filter(|e| !valid(e.opponent))
            .map(|e| e.opponent)
            .collect();
        for id in stale {
            self.remove_opponent(id);
        }
    }

    /// Clear the registry and both target fields
    pub fn clear(&mut self) {
        self.entries.clear();
        self.predefined = None;
        self.aimed = None;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn set_predefined_target(&mut self, other: ActorId) -> bool {
        if !self.has_opponent(other) {
            return false;
        }
        self.predefined = Some(other);
        true
    }

    pub fn predefined_target(&self) -> Option<ActorId> {
        self.predefined
    }

    pub fn set_aimed_target(&mut self, other: ActorId) {
        self.aimed = Some(other);
    }

    pub fn aimed_target(&self) -> Option<ActorId> {
        self.aimed
    }

    fn sort(&mut self) {
        // Stable: equal scores keep their insertion order
        self.entries.sort_by(|a, b| b.aggro.cmp(&a.aggro));
    }
}
