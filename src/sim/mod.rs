//! Simulation plumbing: collaborator ports, the tick scheduler, and
//! the async driver loop

pub mod driver;
pub mod ports;
pub mod scheduler;

pub use driver::Simulation;
pub use scheduler::{tick_actor, TickCtx};
