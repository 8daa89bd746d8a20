//! Transient combat effects
//!
//! Effects are short-lived modifiers with a remaining-tick counter. The
//! container decays every effect uniformly each tick; expired entries are
//! dropped during the sweep.

use serde::{Deserialize, Serialize};

use crate::core::config::config;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Effect {
    pub name: String,
    /// Added to the wearer's attack rolls while active
    pub hit_modifier: i32,
    pub remaining_ticks: u32,
}

impl Effect {
    /// Aim penalty applied when an actor moves mid-pursuit
    pub fn disturbed_aim() -> Self {
        let cfg = config();
        Self {
            name: "disturbed aim".to_string(),
            hit_modifier: cfg.disturbed_aim_penalty,
            remaining_ticks: cfg.disturbed_aim_ticks,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffectList {
    active: Vec<Effect>,
}

impl EffectList {
    /// Add an effect, refreshing the duration if one with the same name
    /// is already active
    pub fn add(&mut self, effect: Effect) {
        if let Some(existing) = self.active.iter_mut().find(|e| e.name == effect.name) {
            existing.remaining_ticks = existing.remaining_ticks.max(effect.remaining_ticks);
            existing.hit_modifier = effect.hit_modifier;
        } else {
            self.active.push(effect);
        }
    }

    /// Tick down every effect and drop the expired ones
    pub fn decay(&mut self) {
        for effect in &mut self.active {
            effect.remaining_ticks = effect.remaining_ticks.saturating_sub(1);
        }
        self.active.retain(|e| e.remaining_ticks > 0);
    }

    /// Sum of active hit-roll modifiers
    pub fn hit_modifier(&self) -> i32 {
        self.active.iter().map(|e| e.hit_modifier).sum()
    }

    pub fn has(&self, name: &str) -> bool {
        self.active.iter().any(|e| e.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_decays_and_expires() {
        let mut effects = EffectList::default();
        effects.add(Effect {
            name: "winded".to_string(),
            hit_modifier: -2,
            remaining_ticks: 2,
        });
        assert_eq!(effects.hit_modifier(), -2);
        effects.decay();
        assert_eq!(effects.hit_modifier(), -2);
        effects.decay();
        assert!(effects.is_empty());
        assert_eq!(effects.hit_modifier(), 0);
    }

    #[test]
    fn test_same_name_refreshes_instead_of_stacking() {
        let mut effects = EffectList::default();
        effects.add(Effect::disturbed_aim());
        effects.decay();
        effects.add(Effect::disturbed_aim());
        // Refreshed, not doubled
        assert_eq!(effects.hit_modifier(), Effect::disturbed_aim().hit_modifier);
    }

    #[test]
    fn test_modifiers_sum_across_effects() {
        let mut effects = EffectList::default();
        effects.add(Effect {
            name: "winded".to_string(),
            hit_modifier: -2,
            remaining_ticks: 3,
        });
        effects.add(Effect {
            name: "battle fury".to_string(),
            hit_modifier: 4,
            remaining_ticks: 3,
        });
        assert_eq!(effects.hit_modifier(), 2);
    }
}
