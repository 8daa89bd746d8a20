//! Stateless swing resolution
//!
//! Adjudicates a single weapon swing given pre-rolled dice. Callers roll
//! the attack die and the damage die themselves and pass the raw values
//! in, which keeps the algorithm deterministic under test and lets the
//! same code serve both live combat and replay.

use tracing::debug;

use crate::actor::Actor;
use crate::combat::formulas;
use crate::core::config::config;
use crate::item::{Weapon, WieldSlot};

/// Result of one adjudicated swing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwingOutcome {
    pub hit: bool,
    pub critical: bool,
    /// Damage to apply on a hit, zero on a miss
    pub damage: u32,
    /// Stamina the attacker pays for this swing
    pub stamina_cost: u32,
    /// Whether the damage is enough to kill the defender outright
    pub lethal: bool,
}

/// Resolve one swing of `weapon` by `attacker` against `defender`
///
/// `atk_roll` is the raw d20; `dmg_roll` is uniform in the weapon's
/// scaled damage bounds. Rules reproduced exactly:
/// - placed weapons skip the hit roll and cost no stamina;
/// - a natural 20 always hits and is always critical, and the dual-wield
///   penalty is not applied to it;
/// - dual wielding costs 6 on the main hand and 10 on the off hand,
///   floored at zero;
/// - a miss still drains half the swing's stamina.
pub fn resolve_swing(
    attacker: &Actor,
    defender: &Actor,
    weapon: &Weapon,
    atk_roll: u32,
    dmg_roll: u32,
) -> SwingOutcome {
    let stamina_cost = if weapon.is_placed() {
        0
    } else {
        formulas::attack_stamina_for(attacker, weapon.weight)
    };

    if weapon.is_placed() {
        // Mounted weapons always land; the machine does the aiming
        let lethal = dmg_roll >= defender.health;
        return SwingOutcome {
            hit: true,
            critical: false,
            damage: dmg_roll,
            stamina_cost,
            lethal,
        };
    }

    let natural_twenty = atk_roll == 20;
    let mut attack = atk_roll as i32;

    if attacker.active_weapons().len() > 1 && !natural_twenty {
        let cfg = config();
        let penalty = match weapon.slot {
            WieldSlot::MainHand => cfg.dual_wield_main_penalty,
            WieldSlot::OffHand => cfg.dual_wield_off_penalty,
        };
        attack = (attack - penalty as i32).max(0);
    }

    // Transient effects shift the roll but never fabricate a natural 20
    attack += attacker.effects.hit_modifier();

    let armor_class = defender.armor_class();
    let hit = natural_twenty || attack >= armor_class;

    debug!(
        attacker = %attacker.name,
        defender = %defender.name,
        weapon = %weapon.name,
        atk_roll,
        attack,
        armor_class,
        hit,
        "swing adjudicated"
    );

    if !hit {
        return SwingOutcome {
            hit: false,
            critical: false,
            damage: 0,
            stamina_cost: stamina_cost / 2,
            lethal: false,
        };
    }

    let mut damage = dmg_roll;
    if weapon.is_melee() {
        let strength = attacker.strength_modifier();
        damage += strength;
        if weapon.is_two_handed() && attacker.active_weapons().len() == 1 {
            damage += strength / 2;
        }
    } else if weapon.is_ranged() {
        damage += attacker.perception_modifier();
    }
    if natural_twenty {
        damage *= 2;
    }

    SwingOutcome {
        hit: true,
        critical: natural_twenty,
        damage,
        stamina_cost,
        lethal: damage >= defender.health,
    }
}
