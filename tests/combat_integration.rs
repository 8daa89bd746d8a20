//! End-to-end combat scenarios driven through the public tick entry point

use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use emberfall::action::{Action, ActionKind, CombatKind};
use emberfall::actor::Actor;
use emberfall::combat::resolve_swing;
use emberfall::core::types::RoomId;
use emberfall::item::{Armor, Weapon, WeaponKind, WieldSlot};
use emberfall::sim::ports::{AStarPathfinder, MemoryStore, RecordingMessenger};
use emberfall::sim::{tick_actor, TickCtx};
use emberfall::world::{Direction, Realm, Room};

fn dagger() -> Weapon {
    Weapon {
        base_min_damage: 2,
        base_max_damage: 6,
        ..Weapon::new("dagger", WeaponKind::Melee { two_handed: false }, WieldSlot::MainHand)
    }
}

fn fighter(name: &str, strength: u32, agility: u32) -> Actor {
    let mut actor = Actor::new(name, 1);
    actor.abilities.strength = strength;
    actor.abilities.agility = agility;
    actor.weight = 180.0;
    actor.carried_weight = 20.0;
    actor.weapons.push(dagger());
    actor
}

fn arena() -> (Realm, RoomId) {
    let mut realm = Realm::new();
    let pit = RoomId(1);
    realm.add_room(Room::new(pit, "fighting pit").with_exit(Direction::North, RoomId(2)));
    realm.add_room(Room::new(RoomId(2), "antechamber").with_exit(Direction::South, pit));
    (realm, pit)
}

macro_rules! ctx {
    ($rng:expr, $messenger:expr, $store:expr, $pathfinder:expr) => {
        TickCtx {
            now: Instant::now(),
            rng: &mut $rng,
            messenger: &$messenger,
            store: &$store,
            pathfinder: &$pathfinder,
        }
    };
}

#[test]
fn dagger_scenario_matches_reference_numbers() {
    // Attacker: strength modifier 2, 180 lbs, carrying 20.
    // Defender: agility modifier 1, no armor, so AC 11.
    let attacker = fighter("Aldren", 14, 10);
    let defender = fighter("Berut", 10, 12);
    let weapon = attacker.weapons[0].clone();

    let outcome = resolve_swing(&attacker, &defender, &weapon, 15, 4);
    assert!(outcome.hit);
    assert!(!outcome.critical);
    // Damage roll plus strength modifier
    assert_eq!(outcome.damage, 6);
    // 1 - log10(2) + log10(180) + log10(20) + log10(1) truncates to 4
    assert_eq!(outcome.stamina_cost, 4);

    // One point short of AC 11 misses and pays half
    let outcome = resolve_swing(&attacker, &defender, &weapon, 10, 4);
    assert!(!outcome.hit);
    assert_eq!(outcome.stamina_cost, 2);
}

#[test]
fn full_tick_attack_damages_and_narrates() {
    let (mut realm, pit) = arena();
    let attacker = fighter("Aldren", 14, 10);
    // Beaten-down AC so any roll lands
    let mut defender = fighter("Berut", 10, 10);
    defender.armor.push(Armor::new("rags", -9));
    let a = realm.spawn(attacker, pit).unwrap();
    let b = realm.spawn(defender, pit).unwrap();
    realm.engage(a, b).unwrap();
    realm.queue_interrupt(a, Action::basic_attack(Instant::now())).unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let (messenger, store, pathfinder) = (RecordingMessenger::new(), MemoryStore::new(), AStarPathfinder);
    let mut ctx = ctx!(rng, messenger, store, pathfinder);
    tick_actor(&mut realm, a, &mut ctx).unwrap();

    let hurt = realm.actor(b).unwrap();
    assert!(hurt.health < hurt.max_health);
    assert!(messenger
        .messages_for(a)
        .iter()
        .any(|m| m.contains("hit Berut with your dagger")));
    assert!(messenger
        .messages_for(b)
        .iter()
        .any(|m| m.contains("Aldren") && m.contains("dagger")));
    assert!(!messenger.room_messages(pit).is_empty());
}

#[test]
fn damaging_hit_bumps_aggro_and_provokes_retaliation() {
    let (mut realm, pit) = arena();
    let mut defender = fighter("Berut", 10, 10);
    defender.armor.push(Armor::new("rags", -9));
    let a = realm.spawn(fighter("Aldren", 14, 10), pit).unwrap();
    let b = realm.spawn(defender, pit).unwrap();
    realm.engage(a, b).unwrap();
    let baseline = realm.actor(b).unwrap().opponents.get_aggro(a).unwrap();
    realm.queue_interrupt(a, Action::basic_attack(Instant::now())).unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let (messenger, store, pathfinder) = (RecordingMessenger::new(), MemoryStore::new(), AStarPathfinder);
    let mut ctx = ctx!(rng, messenger, store, pathfinder);
    tick_actor(&mut realm, a, &mut ctx).unwrap();

    let victim = realm.actor(b).unwrap();
    assert!(victim.opponents.get_aggro(a).unwrap() > baseline);
    // The victim was idling; the hit pushed a counterattack to its front
    assert!(victim.queue.front().map(Action::is_combat).unwrap_or(false));
}

#[test]
fn lethal_hit_kills_and_tears_down_combat() {
    let (mut realm, pit) = arena();
    let mut defender = fighter("Berut", 10, 10);
    defender.armor.push(Armor::new("rags", -9));
    defender.health = 1;
    let a = realm.spawn(fighter("Aldren", 14, 10), pit).unwrap();
    let b = realm.spawn(defender, pit).unwrap();
    realm.engage(a, b).unwrap();
    realm.queue_interrupt(a, Action::basic_attack(Instant::now())).unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let (messenger, store, pathfinder) = (RecordingMessenger::new(), MemoryStore::new(), AStarPathfinder);
    let mut ctx = ctx!(rng, messenger, store, pathfinder);
    tick_actor(&mut realm, a, &mut ctx).unwrap();

    let slain = realm.actor(b).unwrap();
    assert!(!slain.is_alive());
    assert!(slain.room.is_none());
    assert!(!realm.room(pit).unwrap().occupants.contains(&b));
    // Death tears down both sides of the relation
    assert!(realm.actor(a).unwrap().opponents.is_empty());
    assert!(messenger
        .messages_for(a)
        .iter()
        .any(|m| m.contains("slain")));
}

#[test]
fn mutual_disengage_is_best_effort_complete() {
    let (mut realm, pit) = arena();
    let a = realm.spawn(fighter("Aldren", 10, 10), pit).unwrap();
    let b = realm.spawn(fighter("Berut", 10, 10), pit).unwrap();
    let c = realm.spawn(fighter("Corvin", 10, 10), pit).unwrap();
    realm.engage(a, b).unwrap();
    realm.engage(a, c).unwrap();

    let messenger = RecordingMessenger::new();
    realm.reset_combat(a, &messenger);

    assert!(realm.actor(a).unwrap().opponents.is_empty());
    assert!(!realm.actor(b).unwrap().opponents.has_opponent(a));
    assert!(!realm.actor(c).unwrap().opponents.has_opponent(a));
}

#[test]
fn remove_opponent_on_unregistered_target_changes_nothing() {
    let (mut realm, pit) = arena();
    let a = realm.spawn(fighter("Aldren", 10, 10), pit).unwrap();
    let stranger = realm.spawn(fighter("Drifter", 10, 10), pit).unwrap();

    let messenger = RecordingMessenger::new();
    assert!(!realm.remove_opponent(a, stranger, &messenger));
    assert!(realm.actor(a).unwrap().opponents.is_empty());
    assert!(messenger.messages_for(a).is_empty());
}

#[test]
fn missing_weapon_fails_the_check_and_pops_the_action() {
    let (mut realm, pit) = arena();
    let mut unarmed = fighter("Aldren", 10, 10);
    unarmed.weapons.clear();
    let a = realm.spawn(unarmed, pit).unwrap();
    let b = realm.spawn(fighter("Berut", 10, 10), pit).unwrap();
    realm.engage(a, b).unwrap();
    realm.queue_interrupt(a, Action::basic_attack(Instant::now())).unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let (messenger, store, pathfinder) = (RecordingMessenger::new(), MemoryStore::new(), AStarPathfinder);
    let mut ctx = ctx!(rng, messenger, store, pathfinder);
    tick_actor(&mut realm, a, &mut ctx).unwrap();

    let actor = realm.actor(a).unwrap();
    assert!(actor.queue.front().map(Action::is_idle).unwrap_or(false));
    assert!(messenger
        .messages_for(a)
        .iter()
        .any(|m| m.contains("not wielding")));
    assert_eq!(realm.actor(b).unwrap().health, realm.actor(b).unwrap().max_health);
}

#[test]
fn ranged_attack_across_rooms_requires_an_aimed_target() {
    let (mut realm, pit) = arena();
    let mut archer = fighter("Aldren", 10, 10);
    archer.weapons.clear();
    archer.weapons.push(Weapon {
        base_min_damage: 3,
        base_max_damage: 7,
        ..Weapon::new("shortbow", WeaponKind::Ranged { range: 1 }, WieldSlot::MainHand)
    });
    let mut defender = fighter("Berut", 10, 10);
    defender.armor.push(Armor::new("rags", -9));
    let a = realm.spawn(archer, pit).unwrap();
    let b = realm.spawn(defender, RoomId(2)).unwrap();
    realm.engage(a, b).unwrap();
    realm.queue_interrupt(a, Action::basic_attack(Instant::now())).unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let (messenger, store, pathfinder) = (RecordingMessenger::new(), MemoryStore::new(), AStarPathfinder);

    // Not aiming: the opponent in the next room is out of reach
    let mut ctx = ctx!(rng, messenger, store, pathfinder);
    tick_actor(&mut realm, a, &mut ctx).unwrap();
    assert!(messenger
        .messages_for(a)
        .iter()
        .any(|m| m.contains("within reach")));
    assert_eq!(realm.actor(b).unwrap().health, realm.actor(b).unwrap().max_health);

    // Aimed and within one room of range: the shot goes through
    realm.actor_mut(a).unwrap().opponents.set_aimed_target(b);
    let later = Instant::now() + std::time::Duration::from_secs(3600);
    let mut ctx = TickCtx {
        now: later,
        rng: &mut rng,
        messenger: &messenger,
        store: &store,
        pathfinder: &pathfinder,
    };
    tick_actor(&mut realm, a, &mut ctx).unwrap();
    assert!(realm.actor(b).unwrap().health < realm.actor(b).unwrap().max_health);
}

#[test]
fn npc_with_no_opponent_in_reach_gives_chase() {
    let (mut realm, pit) = arena();
    let mut stalker = fighter("gravewolf", 12, 12);
    stalker.is_npc = true;
    let s = realm.spawn(stalker, pit).unwrap();
    let prey = realm.spawn(fighter("Berut", 10, 10), RoomId(2)).unwrap();
    realm.engage(s, prey).unwrap();
    realm.queue_interrupt(s, Action::basic_attack(Instant::now())).unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let (messenger, store, pathfinder) = (RecordingMessenger::new(), MemoryStore::new(), AStarPathfinder);
    let mut ctx = ctx!(rng, messenger, store, pathfinder);
    tick_actor(&mut realm, s, &mut ctx).unwrap();

    // The pursuit lands in front of the re-armed attack
    let queue: Vec<_> = realm.actor(s).unwrap().queue.iter().collect();
    match &queue[0].kind {
        ActionKind::Combat(CombatKind::Chase(state)) => assert_eq!(state.target, prey),
        other => panic!("expected a pursuit at the front, got {other:?}"),
    }
    assert!(matches!(queue[1].kind, ActionKind::Combat(CombatKind::BasicAttack)));
    // A player in the same spot is told instead of redirected
    assert!(messenger.messages_for(s).is_empty());
}

#[test]
fn idle_sentinel_survives_any_number_of_ticks() {
    let (mut realm, pit) = arena();
    let a = realm.spawn(fighter("Aldren", 10, 10), pit).unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let (messenger, store, pathfinder) = (RecordingMessenger::new(), MemoryStore::new(), AStarPathfinder);
    for _ in 0..10 {
        let mut ctx = ctx!(rng, messenger, store, pathfinder);
        tick_actor(&mut realm, a, &mut ctx).unwrap();
    }
    let actor = realm.actor(a).unwrap();
    assert_eq!(actor.queue.len(), 1);
    assert!(actor.queue.front().map(Action::is_idle).unwrap_or(false));
}

#[test]
fn interrupt_surfaces_the_previous_actions_stop_message() {
    let (mut realm, pit) = arena();
    let a = realm.spawn(fighter("Aldren", 14, 10), pit).unwrap();
    let b = realm.spawn(fighter("Berut", 10, 10), pit).unwrap();
    realm.engage(a, b).unwrap();

    // A far-future deadline keeps the fight pending while the flee
    // interrupt pre-empts it
    let later = Instant::now() + std::time::Duration::from_secs(3600);
    realm.queue_interrupt(a, Action::basic_attack(later)).unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let (messenger, store, pathfinder) = (RecordingMessenger::new(), MemoryStore::new(), AStarPathfinder);
    let mut ctx = ctx!(rng, messenger, store, pathfinder);
    tick_actor(&mut realm, a, &mut ctx).unwrap();

    realm.queue_interrupt(a, Action::flee(later)).unwrap();
    let mut ctx = ctx!(rng, messenger, store, pathfinder);
    tick_actor(&mut realm, a, &mut ctx).unwrap();

    assert!(messenger
        .messages_for(a)
        .iter()
        .any(|m| m.contains("You stop fighting.")));
    let front = realm.actor(a).unwrap().queue.front().cloned().unwrap();
    assert!(matches!(front.kind, ActionKind::Combat(CombatKind::Flee)));
}
