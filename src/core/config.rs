//! Simulation configuration with documented constants
//!
//! All pacing and combat tuning values are collected here with explanations
//! of their purpose and how they interact with each other.

use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};

/// Configuration for the simulation core
///
/// These values reproduce the pacing of the reference ruleset. Changing
/// them shifts combat tempo and stamina economy across the whole world.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === SCHEDULER ===
    /// Milliseconds between scheduler passes over the actor arena
    ///
    /// Cooldowns are whole seconds, so anything at or below 1000ms gives
    /// actions at most one tick of extra latency.
    pub tick_interval_ms: u64,

    // === COOLDOWN SHAPING ===
    /// Base seconds for the attack cooldown before log shaping
    ///
    /// Strength and agility modifiers subtract from this, body and carried
    /// weight add to it. With modest scores a swing lands every 4-7 seconds.
    pub attack_cooldown_base: f64,

    /// Base seconds for the flee cooldown before log shaping
    pub flee_cooldown_base: f64,

    /// Base seconds for the chase cooldown before log shaping
    ///
    /// Slightly below the attack base so a pursuer closes distance faster
    /// than a stationary attacker swings.
    pub chase_cooldown_base: f64,

    // === STAMINA ===
    /// Base stamina units for the log-shaped cost formula
    ///
    /// The formula is sub-linear in weight by design; this base keeps the
    /// cost of an unencumbered swing near one point.
    pub stamina_base: f64,

    /// Movement cost multiplier while crouching
    pub crouch_multiplier: f64,

    /// Movement cost multiplier while prone
    pub prone_multiplier: f64,

    // === COMBAT ===
    /// Attack roll penalty on the main hand while dual wielding
    pub dual_wield_main_penalty: u32,

    /// Attack roll penalty on the off hand while dual wielding
    pub dual_wield_off_penalty: u32,

    /// Aggression gained by a victim per point of damage, scaled by the
    /// victim's maximum health
    ///
    /// The bump is `damage * aggro_damage_scale / max_health`, so a hit for
    /// 10% of someone's health raises their aggression toward the attacker
    /// by a tenth of this value.
    pub aggro_damage_scale: u32,

    /// Hit roll penalty applied by the disturbed-aim effect
    pub disturbed_aim_penalty: i32,

    /// Ticks the disturbed-aim effect lasts after each move
    pub disturbed_aim_ticks: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            attack_cooldown_base: 5.0,
            flee_cooldown_base: 5.0,
            chase_cooldown_base: 4.0,
            stamina_base: 1.0,
            crouch_multiplier: 0.75,
            prone_multiplier: 0.50,
            dual_wield_main_penalty: 6,
            dual_wield_off_penalty: 10,
            aggro_damage_scale: 100,
            disturbed_aim_penalty: -3,
            disturbed_aim_ticks: 2,
        }
    }
}

impl SimConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: SimConfig = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Sanity-check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(SimError::Config("tick_interval_ms must be positive".into()));
        }
        if self.attack_cooldown_base < 0.0
            || self.flee_cooldown_base < 0.0
            || self.chase_cooldown_base < 0.0
        {
            return Err(SimError::Config("cooldown bases must be non-negative".into()));
        }
        if !(0.0..=1.0).contains(&self.crouch_multiplier)
            || !(0.0..=1.0).contains(&self.prone_multiplier)
        {
            return Err(SimError::Config("posture multipliers must be in [0, 1]".into()));
        }
        Ok(())
    }
}

static CONFIG: OnceLock<SimConfig> = OnceLock::new();

/// Install a configuration for the lifetime of the process
///
/// Returns false if a configuration was already installed.
pub fn init_config(config: SimConfig) -> bool {
    CONFIG.set(config).is_ok()
}

/// Access the global configuration, falling back to defaults
pub fn config() -> &'static SimConfig {
    CONFIG.get_or_init(SimConfig::default)
}
