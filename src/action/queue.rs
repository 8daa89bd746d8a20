//! Per-actor action queue
//!
//! Front = next to resolve. Seeded with the Idle sentinel at creation;
//! the sentinel reports itself as non-poppable, so the queue is never
//! observably empty. The only mutations are push-front (pre-emption)
//! and pop-front (completion).

use std::collections::VecDeque;

use crate::action::Action;

#[derive(Debug, Default)]
pub struct ActionQueue {
    items: VecDeque<Action>,
}

impl ActionQueue {
    /// A fresh queue holding only the Idle sentinel
    pub fn new() -> Self {
        let mut items = VecDeque::new();
        items.push_back(Action::idle());
        Self { items }
    }

    /// The action that resolves next; present by construction
    pub fn front(&self) -> Option<&Action> {
        self.items.front()
    }

    pub fn front_mut(&mut self) -> Option<&mut Action> {
        self.items.front_mut()
    }

    /// Pre-empt the current front with a new action
    pub fn push_front(&mut self, action: Action) {
        self.items.push_front(action);
    }

    /// Pop the front action; refuses to pop the Idle sentinel
    pub fn pop_front(&mut self) -> Option<Action> {
        if self.items.front().map(Action::is_idle).unwrap_or(true) {
            return None;
        }
        self.items.pop_front()
    }

    /// Put a popped action back at `index` from the front
    ///
    /// The scheduler pops the front before running it; anything the
    /// effect pushed meanwhile sits ahead of `index`, so reinstating at
    /// the push count keeps those pre-emptions in front.
    pub fn reinstate(&mut self, action: Action, index: usize) {
        let index = index.min(self.items.len());
        self.items.insert(index, action);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.items.iter()
    }
}
