//! Demo binary: a tiny realm with a brawl in it
//!
//! Spawns two fighters and a flight-prone bystander in a three-room
//! corridor, engages them, and drives the tick loop. Watch with
//! RUST_LOG=emberfall=debug.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use emberfall::action::Action;
use emberfall::actor::Actor;
use emberfall::combat::formulas;
use emberfall::core::config::{config, init_config, SimConfig};
use emberfall::core::error::Result;
use emberfall::core::types::RoomId;
use emberfall::item::{Weapon, WeaponKind, WieldSlot};
use emberfall::sim::Simulation;
use emberfall::world::{Direction, Realm, Room};

#[derive(Parser, Debug)]
#[command(name = "emberfall", about = "Tick-driven multi-actor simulation core")]
struct Args {
    /// RNG seed for reproducible runs
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 30)]
    ticks: u64,

    /// Optional TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn demo_realm() -> Result<Realm> {
    let mut realm = Realm::new();
    let (square, lane, gate) = (RoomId(1), RoomId(2), RoomId(3));
    realm.add_room(Room::new(square, "market square"));
    realm.add_room(Room::new(lane, "crooked lane"));
    realm.add_room(Room::new(gate, "east gate"));
    realm.connect(square, Direction::East, lane)?;
    realm.connect(lane, Direction::East, gate)?;

    let mut yara = Actor::new("Yara", 3);
    yara.abilities.strength = 14;
    yara.abilities.agility = 12;
    yara.weight = 150.0;
    yara.carried_weight = 18.0;
    yara.weapons.push(Weapon {
        base_min_damage: 2,
        base_max_damage: 6,
        ..Weapon::new("dagger", WeaponKind::Melee { two_handed: false }, WieldSlot::MainHand)
    });

    let mut wolf = Actor::new("gravewolf", 2);
    wolf.is_npc = true;
    wolf.abilities.strength = 12;
    wolf.abilities.agility = 14;
    wolf.weight = 90.0;
    wolf.weapons.push(Weapon {
        base_min_damage: 1,
        base_max_damage: 4,
        ..Weapon::new("claws", WeaponKind::Melee { two_handed: false }, WieldSlot::MainHand)
    });

    let mut cutpurse = Actor::new("cutpurse", 1);
    cutpurse.is_npc = true;
    cutpurse.abilities.agility = 16;
    cutpurse.weight = 120.0;
    cutpurse.weapons.push(Weapon::new(
        "shiv",
        WeaponKind::Melee { two_handed: false },
        WieldSlot::MainHand,
    ));

    let yara_id = realm.spawn(yara, square)?;
    let wolf_id = realm.spawn(wolf, square)?;
    let cutpurse_id = realm.spawn(cutpurse, square)?;

    realm.engage(yara_id, wolf_id)?;
    realm.engage(yara_id, cutpurse_id)?;
    let now = std::time::Instant::now();
    realm.queue_interrupt(yara_id, Action::basic_attack(now))?;
    realm.queue_interrupt(wolf_id, Action::basic_attack(now))?;
    // The cutpurse wants no part of this and bolts once its nerve recovers
    let nerve = formulas::flee_cooldown(realm.actor(cutpurse_id)?);
    realm.queue_interrupt(cutpurse_id, Action::flee(now + nerve))?;
    Ok(realm)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    if let Some(path) = &args.config {
        init_config(SimConfig::load(path)?);
    }

    let realm = demo_realm()?;
    info!(seed = args.seed, ticks = args.ticks, interval_ms = config().tick_interval_ms, "starting");

    let mut sim = Simulation::new(realm, args.seed);
    sim.run_for(args.ticks).await;
    Ok(())
}
