//! Host-engine call boundary: sites, raw call contexts, capability trait.
//!
//! The host engine is opaque; the bridge only sees the seven call sites it
//! intercepts. How an embedding actually patches those sites (trampolines,
//! v-table edits, function-pointer swaps) stays behind [`HostEngine`] and is
//! not part of the contract.
//!
//! Raw arguments are carried as explicit call-context structs instead of
//! aliased references: the engine builds the context, the handler mutates it
//! in place, and for pre-empt sites the returned `bool` tells the engine
//! whether to run its own logic at all (`true` = allow original behavior).

use sim_core::{NativeVector, RagdollEffect, RawHandle};

use crate::error::HookError;

/// The seven native functions the bridge intercepts.
///
/// Post-notify sites run after the native call completed and can only
/// observe; pre-empt sites run before the native body and can mutate
/// arguments or suppress the call. The damage site yields one of two event
/// kinds, selected against current health at interception time.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum CallSite {
    /// Creature added to the world (post-notify).
    Spawned,
    /// Dead creature transitioned back to alive (post-notify).
    Revived,
    /// Incoming damage request (pre-empt; Damaging or Dying).
    Damage,
    /// Creature health reached zero (post-notify).
    Dead,
    /// Creature begins a flee maneuver (pre-empt).
    Flee,
    /// Creature begins moving toward a tactical point (pre-empt).
    AttackPoint,
    /// Creature begins attacking another actor (pre-empt).
    AttackActor,
}

impl CallSite {
    /// Returns `true` for sites intercepted before the native body runs.
    pub fn is_preempt(self) -> bool {
        matches!(
            self,
            Self::Damage | Self::Flee | Self::AttackPoint | Self::AttackActor
        )
    }

    /// Returns `true` for sites that only report a completed native call.
    pub fn is_notify(self) -> bool {
        !self.is_preempt()
    }
}

/// Raw arguments of the spawn and revive call sites.
#[derive(Clone, Copy, Debug)]
pub struct SpawnArgs {
    pub creature: RawHandle,
}

/// Raw arguments and output slots of the damage call site.
#[derive(Clone, Copy, Debug)]
pub struct DamageArgs {
    pub creature: RawHandle,
    pub amount: u16,
    pub ragdoll: NativeVector,
    pub ragdoll_effect: RagdollEffect,
    pub track_kill: bool,
    pub drop_loot: bool,
    /// Veto seed carried from an upstream interception layer; honored as the
    /// event's initial cancellation state and overwritten with the final one.
    pub cancel: bool,
}

/// Raw arguments of the death notification call site.
#[derive(Clone, Copy, Debug)]
pub struct DeadArgs {
    pub creature: RawHandle,
    pub ragdoll: NativeVector,
    pub ragdoll_effect: RagdollEffect,
}

/// Raw arguments and output slots of the flee call site.
#[derive(Clone, Copy, Debug)]
pub struct FleeArgs {
    pub creature: RawHandle,
    pub direction: NativeVector,
    pub send_to_pack: bool,
    pub cancel: bool,
}

/// Raw arguments and output slots of the attack-point call site.
#[derive(Clone, Copy, Debug)]
pub struct AttackPointArgs {
    pub creature: RawHandle,
    pub point: NativeVector,
    pub send_to_pack: bool,
    pub cancel: bool,
}

/// Raw arguments and output slots of the attack-actor call site.
#[derive(Clone, Copy, Debug)]
pub struct AttackActorArgs {
    pub creature: RawHandle,
    pub target: RawHandle,
    pub send_to_pack: bool,
    pub cancel: bool,
}

/// Context of one completed native call delivered to a post-notify handler.
#[derive(Clone, Copy, Debug)]
pub enum NotifyCall {
    Spawned(SpawnArgs),
    Revived(SpawnArgs),
    Dead(DeadArgs),
}

impl NotifyCall {
    pub fn site(&self) -> CallSite {
        match self {
            Self::Spawned(_) => CallSite::Spawned,
            Self::Revived(_) => CallSite::Revived,
            Self::Dead(_) => CallSite::Dead,
        }
    }
}

/// Context of one pending native call delivered to a pre-empt handler.
///
/// The handler mutates fields in place; the engine reads them back after the
/// handler returns and obeys the proceed decision.
#[derive(Clone, Copy, Debug)]
pub enum PreemptCall {
    Damage(DamageArgs),
    Flee(FleeArgs),
    AttackPoint(AttackPointArgs),
    AttackActor(AttackActorArgs),
}

impl PreemptCall {
    pub fn site(&self) -> CallSite {
        match self {
            Self::Damage(_) => CallSite::Damage,
            Self::Flee(_) => CallSite::Flee,
            Self::AttackPoint(_) => CallSite::AttackPoint,
            Self::AttackActor(_) => CallSite::AttackActor,
        }
    }
}

/// Handler installed at one call site.
pub enum SiteHandler {
    /// Runs after the native call completed; observe only.
    Notify(Box<dyn Fn(&NotifyCall) + Send + Sync>),
    /// Runs before the native body; may mutate the context and returns
    /// whether the engine proceeds with its own logic.
    Preempt(Box<dyn Fn(&mut PreemptCall) -> bool + Send + Sync>),
}

/// Capability interface over the host engine's patchable call sites.
///
/// At most one handler per site. The engine invokes handlers synchronously on
/// its own call thread and blocks on the pre-empt decision; implementations
/// must not defer or queue the invocation.
pub trait HostEngine {
    /// Attaches `handler` to `site`.
    ///
    /// Fails with [`HookError::SiteNotFound`] if the engine lacks the site
    /// and [`HookError::AlreadyInstalled`] if a handler is already attached.
    fn attach(&mut self, site: CallSite, handler: SiteHandler) -> Result<(), HookError>;

    /// Detaches the handler at `site`. Detaching an empty site is a no-op.
    fn detach(&mut self, site: CallSite) -> Result<(), HookError>;
}
