//! Combat actions: attack, flee, pursuit

pub mod basic_attack;
pub mod chase;
pub mod flee;
