//! Item value types consumed by combat resolution

pub mod armor;
pub mod weapon;

pub use armor::Armor;
pub use weapon::{Weapon, WeaponKind, WieldSlot};
