//! Equipped weapon state
//!
//! Damage bounds blend the base value with quality and condition so a
//! pristine masterwork blade outdamages a rusted one of the same pattern.

use serde::{Deserialize, Serialize};

use crate::core::types::ItemId;

/// Which hand holds the weapon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WieldSlot {
    MainHand,
    OffHand,
}

/// Weapon behavior class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WeaponKind {
    Melee { two_handed: bool },
    /// Ranged weapons reach targets up to `range` rooms away
    Ranged { range: u32 },
    /// Mounted/static weapons: no hit roll, no stamina drain
    Placed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    pub id: ItemId,
    pub name: String,
    pub kind: WeaponKind,
    pub slot: WieldSlot,
    /// Damage bounds before quality/condition scaling
    pub base_min_damage: u32,
    pub base_max_damage: u32,
    /// Quality multiplier, 1.0 = standard make
    pub quality: f64,
    /// Condition multiplier, 1.0 = undamaged
    pub condition: f64,
    /// Weight in pounds, feeds stamina and cooldown shaping
    pub weight: f64,
}

impl Weapon {
    pub fn new(name: &str, kind: WeaponKind, slot: WieldSlot) -> Self {
        Self {
            id: ItemId::new(),
            name: name.to_string(),
            kind,
            slot,
            base_min_damage: 1,
            base_max_damage: 2,
            quality: 1.0,
            condition: 1.0,
            weight: 1.0,
        }
    }

    /// Lower damage bound after quality/condition scaling
    pub fn min_damage(&self) -> u32 {
        self.scale(self.base_min_damage)
    }

    /// Upper damage bound after quality/condition scaling
    pub fn max_damage(&self) -> u32 {
        self.scale(self.base_max_damage).max(self.min_damage())
    }

    fn scale(&self, base: u32) -> u32 {
        let base = base as f64;
        ((base + base * self.quality + base * self.condition) / 3.0) as u32
    }

    pub fn is_melee(&self) -> bool {
        matches!(self.kind, WeaponKind::Melee { .. })
    }

    pub fn is_ranged(&self) -> bool {
        matches!(self.kind, WeaponKind::Ranged { .. })
    }

    pub fn is_placed(&self) -> bool {
        matches!(self.kind, WeaponKind::Placed)
    }

    pub fn is_two_handed(&self) -> bool {
        matches!(self.kind, WeaponKind::Melee { two_handed: true })
    }
}
