//! Ability scores and their derived modifiers

use serde::{Deserialize, Serialize};

/// The four ability scores the simulation core reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ability {
    Strength,
    Agility,
    Perception,
    Constitution,
}

/// Per-actor ability scores, 10 = baseline human
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Abilities {
    pub strength: u32,
    pub agility: u32,
    pub perception: u32,
    pub constitution: u32,
}

impl Default for Abilities {
    fn default() -> Self {
        Self {
            strength: 10,
            agility: 10,
            perception: 10,
            constitution: 10,
        }
    }
}

impl Abilities {
    pub fn get(&self, ability: Ability) -> u32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Agility => self.agility,
            Ability::Perception => self.perception,
            Ability::Constitution => self.constitution,
        }
    }

    /// Derived modifier: every two points above 10 grant one point,
    /// never negative
    pub fn modifier(&self, ability: Ability) -> u32 {
        ability_modifier(self.get(ability))
    }
}

/// Modifier for a raw score, floored at zero
pub fn ability_modifier(score: u32) -> u32 {
    score.saturating_sub(10) / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_modifier_is_zero() {
        assert_eq!(ability_modifier(10), 0);
    }

    #[test]
    fn test_modifier_steps_every_two_points() {
        assert_eq!(ability_modifier(12), 1);
        assert_eq!(ability_modifier(13), 1);
        assert_eq!(ability_modifier(14), 2);
        assert_eq!(ability_modifier(20), 5);
    }

    #[test]
    fn test_modifier_never_negative() {
        assert_eq!(ability_modifier(0), 0);
        assert_eq!(ability_modifier(9), 0);
    }
}
