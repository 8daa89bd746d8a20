//! Equipped armor state

use serde::{Deserialize, Serialize};

use crate::core::types::ItemId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Armor {
    pub id: ItemId,
    pub name: String,
    /// Flat bonus added to the wearer's armor class
    pub armor_class: i32,
}

impl Armor {
    pub fn new(name: &str, armor_class: i32) -> Self {
        Self {
            id: ItemId::new(),
            name: name.to_string(),
            armor_class,
        }
    }
}
