//! Combat: opponent tracking, cost formulas, and swing resolution

pub mod aggro;
pub mod formulas;
pub mod resolution;

pub use aggro::OpponentRegistry;
pub use resolution::{resolve_swing, SwingOutcome};
