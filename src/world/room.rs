//! Room topology primitives

use serde::{Deserialize, Serialize};

use crate::core::types::{ActorId, RoomId};

/// Compass direction of an exit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Up,
    Down,
}

impl Direction {
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exit {
    pub direction: Direction,
    pub to: RoomId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub exits: Vec<Exit>,
    pub occupants: Vec<ActorId>,
}

impl Room {
    pub fn new(id: RoomId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            exits: Vec::new(),
            occupants: Vec::new(),
        }
    }

    pub fn with_exit(mut self, direction: Direction, to: RoomId) -> Self {
        self.exits.push(Exit { direction, to });
        self
    }

    /// The exit leading to `to`, if one exists
    pub fn exit_to(&self, to: RoomId) -> Option<&Exit> {
        self.exits.iter().find(|e| e.to == to)
    }

    pub fn remove_occupant(&mut self, actor: ActorId) {
        self.occupants.retain(|&a| a != actor);
    }
}
