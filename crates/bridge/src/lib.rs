//! Native-call interception and cancellable-event bridge.
//!
//! This crate turns a host creature-simulation engine's internal lifecycle
//! calls into typed events on an application-level bus, and writes
//! subscriber decisions back into the intercepted call before the engine is
//! allowed to proceed. Modules are organized by responsibility:
//!
//! - [`engine`] defines the call-site boundary: contexts, handlers, and the
//!   [`HostEngine`] capability an embedding implements
//! - [`registry`] installs and removes interception, exactly once per site
//! - [`dispatch`] runs the synchronous raw-args → event → publish →
//!   write-back pipeline
//! - [`bus`] is the ordered, no-short-circuit publish/subscribe bus
//! - [`commands`] forwards builtin text commands into the engine
//! - [`runtime`] assembles everything behind a builder
//! - [`testing`] ships a scripted engine for tests and examples
//!
//! # Example
//!
//! ```
//! use bridge::testing::ScriptedEngine;
//! use bridge::{Bridge, DamageArgs};
//! use sim_core::{CreatureDamagingEvent, CreatureOracle, NativeVector, RagdollEffect};
//!
//! let engine = ScriptedEngine::new();
//! let oracle = engine.creatures();
//! let mut bridge = Bridge::builder().engine(engine).oracle(oracle).build()?;
//! bridge.install()?;
//!
//! // Cap every incoming hit at 10 damage.
//! bridge.bus().subscribe::<CreatureDamagingEvent>(|event| {
//!     event.amount = event.amount.min(10);
//! });
//!
//! let handle = bridge.engine_mut().spawn(50, NativeVector::new(0.0, 0.0, 0.0));
//! let proceeded = bridge.engine_mut().ask_damage(DamageArgs {
//!     creature: handle,
//!     amount: 30,
//!     ragdoll: NativeVector::default(),
//!     ragdoll_effect: RagdollEffect::None,
//!     track_kill: false,
//!     drop_loot: true,
//!     cancel: false,
//! });
//!
//! assert!(proceeded);
//! let snapshot = bridge.engine().creatures().snapshot(handle).unwrap();
//! assert_eq!(snapshot.health, 40);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod bus;
pub mod commands;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod registry;
pub mod runtime;
pub mod testing;

pub use bus::EventBus;
pub use commands::{BuiltinCommand, CommandActor, CommandSink};
pub use dispatch::Dispatcher;
pub use engine::{
    AttackActorArgs, AttackPointArgs, CallSite, DamageArgs, DeadArgs, FleeArgs, HostEngine,
    NotifyCall, PreemptCall, SiteHandler, SpawnArgs,
};
pub use error::{BuildError, CommandError, HookError};
pub use registry::HookRegistry;
pub use runtime::{Bridge, BridgeBuilder};
