//! The action taxonomy: every schedulable unit of actor behavior
//!
//! `ActionKind` is a closed sum over the fixed behavior kinds; the
//! scheduler dispatches `check`/`perform`/`stop`/`describe` through
//! exhaustive matches, so adding a kind is a compile-time checklist
//! rather than a virtual-dispatch audit.

pub mod build;
pub mod combat;
pub mod craft;
pub mod queue;

use std::time::{Duration, Instant};

use crate::core::error::Result;
use crate::core::types::ActorId;
use crate::sim::scheduler::TickCtx;
use crate::world::Realm;

pub use build::BuildAction;
pub use combat::chase::ChaseState;
pub use craft::CraftAction;

/// Outcome of one `perform` call, drives queue pop/retain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
    /// Still in progress, stays at the front
    Running,
    /// Completed, popped
    Finished,
    /// Failed, popped; a user-facing reason has been delivered
    Error,
}

#[derive(Debug, Clone)]
pub enum CombatKind {
    BasicAttack,
    Flee,
    Chase(ChaseState),
}

#[derive(Debug, Clone)]
pub enum ActionKind {
    /// Terminal sentinel, never popped
    Idle,
    Combat(CombatKind),
    Craft(CraftAction),
    Build(BuildAction),
}

/// Internal result of an action body: completion status plus an
/// optional cooldown re-arm applied by the dispatcher
pub(crate) struct Resolution {
    pub status: ActionStatus,
    pub rearm: Option<Duration>,
}

impl Resolution {
    pub fn running(rearm: Duration) -> Self {
        Self { status: ActionStatus::Running, rearm: Some(rearm) }
    }

    pub fn finished() -> Self {
        Self { status: ActionStatus::Finished, rearm: None }
    }

    pub fn error() -> Self {
        Self { status: ActionStatus::Error, rearm: None }
    }
}

#[derive(Debug, Clone)]
pub struct Action {
    pub kind: ActionKind,
    /// Earliest instant at which `perform` may run
    pub deadline: Instant,
}

impl Action {
    pub fn new(kind: ActionKind, deadline: Instant) -> Self {
        Self { kind, deadline }
    }

    /// The sentinel every queue is seeded with
    pub fn idle() -> Self {
        Self::new(ActionKind::Idle, Instant::now())
    }

    pub fn basic_attack(deadline: Instant) -> Self {
        Self::new(ActionKind::Combat(CombatKind::BasicAttack), deadline)
    }

    pub fn flee(deadline: Instant) -> Self {
        Self::new(ActionKind::Combat(CombatKind::Flee), deadline)
    }

    pub fn chase(target: ActorId, deadline: Instant) -> Self {
        Self::new(
            ActionKind::Combat(CombatKind::Chase(ChaseState::new(target))),
            deadline,
        )
    }

    pub fn craft(craft: CraftAction, deadline: Instant) -> Self {
        Self::new(ActionKind::Craft(craft), deadline)
    }

    pub fn build(build: BuildAction, deadline: Instant) -> Self {
        Self::new(ActionKind::Build(build), deadline)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.kind, ActionKind::Idle)
    }

    pub fn is_combat(&self) -> bool {
        matches!(self.kind, ActionKind::Combat(_))
    }

    /// Whether the cooldown has elapsed at `now`
    pub fn elapsed(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    /// Short present-tense description for status rendering
    pub fn describe(&self) -> String {
        match &self.kind {
            ActionKind::Idle => "standing around".to_string(),
            ActionKind::Combat(CombatKind::BasicAttack) => "fighting".to_string(),
            ActionKind::Combat(CombatKind::Flee) => "trying to flee".to_string(),
            ActionKind::Combat(CombatKind::Chase(_)) => "chasing someone".to_string(),
            ActionKind::Craft(c) => format!("crafting {}", c.recipe),
            ActionKind::Build(b) => format!("building {}", b.schematic),
        }
    }

    /// User-facing message delivered when this action is pre-empted
    pub fn stop(&self) -> String {
        match &self.kind {
            ActionKind::Idle => "You stop what you are doing.".to_string(),
            ActionKind::Combat(CombatKind::BasicAttack) => "You stop fighting.".to_string(),
            ActionKind::Combat(CombatKind::Flee) => "You stop trying to flee.".to_string(),
            ActionKind::Combat(CombatKind::Chase(_)) => "You stop the pursuit.".to_string(),
            ActionKind::Craft(c) => format!("You stop crafting {}.", c.recipe),
            ActionKind::Build(b) => format!("You stop building {}.", b.schematic),
        }
    }

    /// Validate preconditions immediately before `perform`
    ///
    /// A failure carries the user-facing reason and downgrades the
    /// action to Error without running its effect.
    pub fn check(&self, realm: &Realm, actor: ActorId, ctx: &TickCtx) -> Result<()> {
        match &self.kind {
            ActionKind::Idle => Ok(()),
            ActionKind::Combat(CombatKind::BasicAttack) => {
                combat::basic_attack::check(realm, actor)
            }
            ActionKind::Combat(CombatKind::Flee) => combat::flee::check(realm, actor),
            ActionKind::Combat(CombatKind::Chase(state)) => {
                combat::chase::check(realm, actor, state)
            }
            ActionKind::Craft(c) => craft::check(realm, actor, c, ctx.store),
            ActionKind::Build(b) => build::check(realm, actor, b, ctx.store),
        }
    }

    /// Execute one resolution step and re-arm the cooldown if the body
    /// requested it
    pub fn perform(&mut self, realm: &mut Realm, actor: ActorId, ctx: &mut TickCtx) -> ActionStatus {
        let resolution = match &mut self.kind {
            ActionKind::Idle => Resolution::running(Duration::from_secs(1)),
            ActionKind::Combat(CombatKind::BasicAttack) => {
                combat::basic_attack::perform(realm, actor, ctx)
            }
            ActionKind::Combat(CombatKind::Flee) => combat::flee::perform(realm, actor, ctx),
            ActionKind::Combat(CombatKind::Chase(state)) => {
                combat::chase::perform(realm, actor, state, ctx)
            }
            ActionKind::Craft(c) => craft::perform(realm, actor, c, ctx),
            ActionKind::Build(b) => build::perform(realm, actor, b, ctx),
        };
        if let Some(cooldown) = resolution.rearm {
            self.deadline = ctx.now + cooldown;
        }
        resolution.status
    }
}
