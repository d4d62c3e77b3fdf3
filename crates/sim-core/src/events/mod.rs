//! Lifecycle event kinds dispatched through the bus.
//!
//! One event is constructed per intercepted call. Cancellable kinds expose
//! their payload as public mutable fields and carry a cancellation flag;
//! non-cancellable kinds are read-only after construction. No kind outlives
//! the native call it represents.
//!
//! | Kind | Cancellable | Trigger |
//! |------|-------------|---------|
//! | [`CreatureSpawnedEvent`] | no | creature created |
//! | [`CreatureRevivedEvent`] | no | creature transitions dead to alive |
//! | [`CreatureDamagingEvent`] | yes | incoming damage below current health |
//! | [`CreatureDyingEvent`] | yes | incoming damage would be lethal |
//! | [`CreatureDeadEvent`] | no | health reached zero, post-hoc |
//! | [`CreatureFleeingEvent`] | yes | creature begins a flee maneuver |
//! | [`CreatureAttackingPointEvent`] | yes | creature moves on a tactical point |
//! | [`CreatureAttackingActorEvent`] | yes | creature attacks another actor |
//!
//! Damaging and Dying are mutually exclusive outcomes of the same intercepted
//! call, selected by comparing the proposed amount against current health at
//! the instant of interception.

mod damage;
mod movement;
mod spawn;

pub use damage::{CreatureDamagingEvent, CreatureDeadEvent, CreatureDyingEvent, RagdollEffect};
pub use movement::{
    CreatureAttackingActorEvent, CreatureAttackingPointEvent, CreatureFleeingEvent,
};
pub use spawn::{CreatureRevivedEvent, CreatureSpawnedEvent};

/// Cooperative cancellation surface of the pre-empt event kinds.
///
/// Setting the flag does not stop delivery to later subscribers; the value is
/// read once, after every subscriber has run, and then decides whether the
/// native call proceeds.
pub trait CancellableEvent {
    fn is_cancelled(&self) -> bool;

    fn set_cancelled(&mut self, cancelled: bool);
}
