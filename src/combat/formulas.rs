//! Stamina and cooldown cost formulas
//!
//! Every cost shares the same log-shaped form: a base value, minus the
//! log of the relevant ability modifiers, plus the log of body weight,
//! carried weight and (for weapon-bearing actions) weapon weight. The
//! log shaping keeps drain sub-linear in mass while rewarding strength.

use std::time::Duration;

use crate::actor::Actor;
use crate::core::config::config;

/// log10 that treats non-positive inputs as zero contribution
pub fn safe_log10(value: f64) -> f64 {
    if value > 0.0 {
        value.log10()
    } else {
        0.0
    }
}

/// Floor at zero and truncate to whole units
fn floor_cost(value: f64) -> u32 {
    value.max(0.0) as u32
}

/// Shared log-shaped cost core
fn shaped(base: f64, strength_mod: u32, weight: f64, carried: f64) -> f64 {
    base - safe_log10(strength_mod as f64) + safe_log10(weight) + safe_log10(carried)
}

/// Stamina drained by one swing of the given weapon weight
///
/// Placed weapons bypass this entirely (zero cost).
pub fn attack_stamina(strength_mod: u32, weight: f64, carried: f64, weapon_weight: f64) -> u32 {
    let base = config().stamina_base;
    floor_cost(shaped(base, strength_mod, weight, carried) + safe_log10(weapon_weight))
}

/// Stamina drained by moving one room, before posture scaling
pub fn movement_stamina(strength_mod: u32, weight: f64, carried: f64) -> u32 {
    let base = config().stamina_base;
    floor_cost(shaped(base, strength_mod, weight, carried))
}

/// Movement stamina for an actor, posture multiplier applied
pub fn movement_stamina_for(actor: &Actor) -> u32 {
    let raw = movement_stamina(actor.strength_modifier(), actor.weight, actor.carried_weight);
    (raw as f64 * actor.posture.movement_multiplier()) as u32
}

/// Attack stamina for an actor swinging a specific weapon
pub fn attack_stamina_for(actor: &Actor, weapon_weight: f64) -> u32 {
    attack_stamina(
        actor.strength_modifier(),
        actor.weight,
        actor.carried_weight,
        weapon_weight,
    )
}

/// Seconds before the next swing resolves
///
/// Strength and agility shorten the wait, mass lengthens it. The heaviest
/// wielded weapon dominates the weapon term.
pub fn attack_cooldown(actor: &Actor) -> Duration {
    let cfg = config();
    let mut seconds = cfg.attack_cooldown_base
        - safe_log10(actor.strength_modifier() as f64)
        - safe_log10(actor.agility_modifier() as f64)
        + safe_log10(actor.weight)
        + safe_log10(actor.carried_weight);
    let weapon_term = actor
        .active_weapons()
        .iter()
        .map(|w| safe_log10(w.weight))
        .fold(0.0, f64::max);
    seconds += weapon_term;
    Duration::from_secs(floor_cost(seconds) as u64)
}

/// Seconds before a flee attempt resolves
///
/// Unlike the attack cooldown, every wielded weapon weighs the runner down.
pub fn flee_cooldown(actor: &Actor) -> Duration {
    let cfg = config();
    let mut seconds = cfg.flee_cooldown_base
        - safe_log10(actor.strength_modifier() as f64)
        - safe_log10(actor.agility_modifier() as f64)
        + safe_log10(actor.weight)
        + safe_log10(actor.carried_weight);
    for weapon in actor.active_weapons() {
        seconds += safe_log10(weapon.weight);
    }
    Duration::from_secs(floor_cost(seconds) as u64)
}

/// Seconds between pursuit steps
pub fn chase_cooldown(actor: &Actor) -> Duration {
    let cfg = config();
    let seconds = cfg.chase_cooldown_base
        - safe_log10(actor.strength_modifier() as f64)
        - safe_log10(actor.agility_modifier() as f64)
        + safe_log10(actor.weight)
        + safe_log10(actor.carried_weight);
    Duration::from_secs(floor_cost(seconds) as u64)
}
