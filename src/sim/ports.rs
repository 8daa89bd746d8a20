//! Collaborator ports: the capabilities the core consumes but does
//! not implement
//!
//! Messaging is fire-and-forget; persistence is transactional with
//! explicit begin/commit/rollback; pathfinding wraps the generic A*
//! over the realm's connectivity. Each port ships a default and, for
//! messaging and persistence, an in-memory double used by tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use ahash::AHashMap;
use tracing::debug;

use crate::core::error::{Result, SimError};
use crate::core::types::{ActorId, ItemId, RoomId};
use crate::world::{pathfind, Realm};

// === MESSAGING ===

/// Outbound narrative text; delivery is someone else's problem
pub trait Messenger {
    fn send(&self, actor: ActorId, text: &str);
    /// Broadcast to a room's occupants, skipping `exclude`
    fn send_room(&self, room: RoomId, exclude: &[ActorId], text: &str);
}

/// Default messenger: narrative goes to the log stream
#[derive(Debug, Default)]
pub struct TracingMessenger;

impl Messenger for TracingMessenger {
    fn send(&self, actor: ActorId, text: &str) {
        debug!(?actor, %text, "narrative");
    }

    fn send_room(&self, room: RoomId, exclude: &[ActorId], text: &str) {
        debug!(?room, excluded = exclude.len(), %text, "room narrative");
    }
}

/// Test double that records every message it is handed
#[derive(Debug, Default)]
pub struct RecordingMessenger {
    direct: Mutex<Vec<(ActorId, String)>>,
    room: Mutex<Vec<(RoomId, String)>>,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages_for(&self, actor: ActorId) -> Vec<String> {
        let direct = self.direct.lock().unwrap_or_else(|e| e.into_inner());
        direct
            .iter()
            .filter(|(a, _)| *a == actor)
            .map(|(_, t)| t.clone())
            .collect()
    }

    pub fn room_messages(&self, room: RoomId) -> Vec<String> {
        let messages = self.room.lock().unwrap_or_else(|e| e.into_inner());
        messages
            .iter()
            .filter(|(r, _)| *r == room)
            .map(|(_, t)| t.clone())
            .collect()
    }
}

impl Messenger for RecordingMessenger {
    fn send(&self, actor: ActorId, text: &str) {
        let mut direct = self.direct.lock().unwrap_or_else(|e| e.into_inner());
        direct.push((actor, text.to_string()));
    }

    fn send_room(&self, room: RoomId, _exclude: &[ActorId], text: &str) {
        let mut messages = self.room.lock().unwrap_or_else(|e| e.into_inner());
        messages.push((room, text.to_string()));
    }
}

// === PERSISTENCE ===

/// Transactional item store used by crafting and building
///
/// Actions open a transaction, mutate, then commit; any mid-sequence
/// failure must be answered with `rollback` before the action reports
/// its error.
pub trait CraftStore {
    fn begin(&self) -> Result<()>;
    fn commit(&self) -> Result<()>;
    fn rollback(&self);
    fn has_item(&self, item: ItemId) -> bool;
    /// Destroy an item inside the open transaction
    fn consume(&self, item: ItemId) -> Result<()>;
    /// Materialize a new item from a blueprint inside the open transaction
    fn create(&self, blueprint: &str) -> Result<ItemId>;
}

#[derive(Debug, Default)]
struct StoreInner {
    items: AHashMap<ItemId, String>,
    /// Undo journal for the open transaction
    journal: Option<Vec<JournalEntry>>,
}

#[derive(Debug)]
enum JournalEntry {
    Consumed(ItemId, String),
    Created(ItemId),
}

/// In-memory store backing tests and the demo binary
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<StoreInner>,
    refuse_creations: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an item and get its id back
    pub fn stock(&self, blueprint: &str) -> ItemId {
        let id = ItemId::new();
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.items.insert(id, blueprint.to_string());
        id
    }

    /// Make every `create` fail, for exercising rollback paths
    pub fn refuse_creations(&self, refuse: bool) {
        self.refuse_creations.store(refuse, Ordering::SeqCst);
    }

    pub fn item_count(&self) -> usize {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.items.len()
    }
}

impl CraftStore for MemoryStore {
    fn begin(&self) -> Result<()> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if inner.journal.is_some() {
            return Err(SimError::Store("transaction already open".to_string()));
        }
        inner.journal = Some(Vec::new());
        Ok(())
    }

    fn commit(&self) -> Result<()> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        match inner.journal.take() {
            Some(_) => Ok(()),
            None => Err(SimError::Store("no open transaction".to_string())),
        }
    }

    fn rollback(&self) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let Some(journal) = inner.journal.take() else { return };
        for entry in journal.into_iter().rev() {
            match entry {
                JournalEntry::Consumed(id, blueprint) => {
                    inner.items.insert(id, blueprint);
                }
                JournalEntry::Created(id) => {
                    inner.items.remove(&id);
                }
            }
        }
    }

    fn has_item(&self, item: ItemId) -> bool {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.items.contains_key(&item)
    }

    fn consume(&self, item: ItemId) -> Result<()> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if inner.journal.is_none() {
            return Err(SimError::Store("no open transaction".to_string()));
        }
        match inner.items.remove(&item) {
            Some(blueprint) => {
                if let Some(journal) = inner.journal.as_mut() {
                    journal.push(JournalEntry::Consumed(item, blueprint));
                }
                Ok(())
            }
            None => Err(SimError::Store(format!("item {:?} is gone", item))),
        }
    }

    fn create(&self, blueprint: &str) -> Result<ItemId> {
        if self.refuse_creations.load(Ordering::SeqCst) {
            return Err(SimError::Store("store refuses new items".to_string()));
        }
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if inner.journal.is_none() {
            return Err(SimError::Store("no open transaction".to_string()));
        }
        let id = ItemId::new();
        inner.items.insert(id, blueprint.to_string());
        if let Some(journal) = inner.journal.as_mut() {
            journal.push(JournalEntry::Created(id));
        }
        Ok(id)
    }
}

// === PATHFINDING ===

/// Route planning between rooms on behalf of an actor
pub trait Pathfinder {
    /// Full path including `start`, or None when no admissible route
    /// exists
    fn find_path(
        &self,
        realm: &Realm,
        actor: ActorId,
        start: RoomId,
        goal: RoomId,
    ) -> Option<Vec<RoomId>>;
}

/// Default pathfinder: generic A* gated by the realm's connectivity
/// predicate
#[derive(Debug, Default)]
pub struct AStarPathfinder;

impl Pathfinder for AStarPathfinder {
    fn find_path(
        &self,
        realm: &Realm,
        actor: ActorId,
        start: RoomId,
        goal: RoomId,
    ) -> Option<Vec<RoomId>> {
        pathfind::find_path(
            start,
            goal,
            |from, to| realm.check_connection(actor, from, to).is_ok(),
            // Room ids carry no geometry; a zero heuristic degrades the
            // search to uniform-cost, which stays admissible
            |_, _| 0.0,
            |room| {
                realm
                    .room(room)
                    .map(|r| r.exits.iter().map(|e| e.to).collect::<Vec<_>>())
                    .unwrap_or_default()
            },
        )
    }
}
