//! Domain values and event taxonomy for the creature event bridge.
//!
//! `sim-core` defines the value types that cross the native-call boundary
//! (handles, vectors, creature views), the adapter contract for reading
//! engine state, and the closed set of lifecycle event kinds dispatched
//! through the bus. Everything here is pure and synchronous; call-site
//! interception and dispatch orchestration live in the `bridge` crate.
pub mod adapter;
pub mod creature;
pub mod error;
pub mod events;
pub mod vector;

pub use adapter::{CreatureOracle, RawHandle};
pub use creature::{CreatureSnapshot, CreatureView, EntityId};
pub use error::InvalidEntity;
pub use events::{
    CancellableEvent, CreatureAttackingActorEvent, CreatureAttackingPointEvent,
    CreatureDamagingEvent, CreatureDeadEvent, CreatureDyingEvent, CreatureFleeingEvent,
    CreatureRevivedEvent, CreatureSpawnedEvent, RagdollEffect,
};
pub use vector::{NativeVector, Vector3};
