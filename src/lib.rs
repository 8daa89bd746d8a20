//! Emberfall - tick-driven simulation core for a persistent multi-actor text world

pub mod action;
pub mod actor;
pub mod combat;
pub mod core;
pub mod item;
pub mod sim;
pub mod world;
