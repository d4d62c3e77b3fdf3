//! The synchronous dispatch pipeline: raw args in, decision and mutated
//! args out.
//!
//! Per intercepted call the dispatcher applies the damage fast-path, wraps
//! the subject (and secondary actor) through the oracle, selects the event
//! kind, seeds cancellation from the call's veto slot, publishes through the
//! bus, writes every mutable field back into the call context, and returns
//! the proceed decision. The host engine is blocked on that decision, so the
//! whole pipeline runs on the caller's thread with no suspension.
//!
//! Nothing here raises into the engine: a handle that cannot be wrapped
//! degrades to "proceed unmodified, no event".

use std::sync::Arc;

use sim_core::{
    CancellableEvent, CreatureAttackingActorEvent, CreatureAttackingPointEvent,
    CreatureDamagingEvent, CreatureDeadEvent, CreatureDyingEvent, CreatureFleeingEvent,
    CreatureOracle, CreatureRevivedEvent, CreatureSpawnedEvent, CreatureView, NativeVector,
    RawHandle, Vector3,
};

use crate::bus::EventBus;
use crate::engine::{
    AttackActorArgs, AttackPointArgs, DamageArgs, DeadArgs, FleeArgs, NotifyCall, PreemptCall,
    SpawnArgs,
};

/// Converts intercepted calls into bus events and applies subscriber
/// decisions back onto the call.
pub struct Dispatcher {
    bus: Arc<EventBus>,
    oracle: Arc<dyn CreatureOracle>,
}

impl Dispatcher {
    pub fn new(bus: Arc<EventBus>, oracle: Arc<dyn CreatureOracle>) -> Self {
        Self { bus, oracle }
    }

    /// Post-notify entry: the native call already completed, subscribers can
    /// only observe.
    pub fn notify(&self, call: &NotifyCall) {
        match call {
            NotifyCall::Spawned(args) => self.on_spawned(args),
            NotifyCall::Revived(args) => self.on_revived(args),
            NotifyCall::Dead(args) => self.on_dead(args),
        }
    }

    /// Pre-empt entry: returns whether the engine may run the native body.
    ///
    /// `call` carries the final field values on return; the engine writes
    /// them into its own argument slots.
    pub fn preempt(&self, call: &mut PreemptCall) -> bool {
        match call {
            PreemptCall::Damage(args) => self.on_damaging(args),
            PreemptCall::Flee(args) => self.on_fleeing(args),
            PreemptCall::AttackPoint(args) => self.on_attacking_point(args),
            PreemptCall::AttackActor(args) => self.on_attacking_actor(args),
        }
    }

    fn on_spawned(&self, args: &SpawnArgs) {
        let Some(creature) = self.wrap(args.creature) else {
            return;
        };

        let mut event = CreatureSpawnedEvent::new(creature);
        self.bus.publish(&mut event);
    }

    fn on_revived(&self, args: &SpawnArgs) {
        let Some(creature) = self.wrap(args.creature) else {
            return;
        };

        let mut event = CreatureRevivedEvent::new(creature);
        self.bus.publish(&mut event);
    }

    fn on_dead(&self, args: &DeadArgs) {
        let Some(creature) = self.wrap(args.creature) else {
            return;
        };

        let mut event = CreatureDeadEvent::new(
            creature,
            Vector3::from(args.ragdoll),
            args.ragdoll_effect,
        );
        self.bus.publish(&mut event);
    }

    /// Damage interception. Selects Damaging or Dying against current health;
    /// zero-amount and already-dead calls are rejected before any event
    /// exists.
    fn on_damaging(&self, args: &mut DamageArgs) -> bool {
        // Fast path: nothing to negotiate, suppress without an event. The
        // zero check runs before handle resolution; neither consults the bus.
        if args.amount == 0 {
            return false;
        }

        let Some(creature) = self.wrap(args.creature) else {
            return true;
        };

        if creature.is_dead() {
            return false;
        }

        if args.amount >= creature.health() {
            let mut event = CreatureDyingEvent::new(
                creature,
                args.amount,
                Vector3::from(args.ragdoll),
                args.ragdoll_effect,
                args.track_kill,
                args.drop_loot,
            );
            event.set_cancelled(args.cancel);

            self.bus.publish(&mut event);

            args.amount = event.amount;
            args.ragdoll = NativeVector::from(event.ragdoll);
            args.ragdoll_effect = event.ragdoll_effect;
            args.track_kill = event.track_kill;
            args.drop_loot = event.drop_loot;
            args.cancel = event.is_cancelled();
        } else {
            let mut event = CreatureDamagingEvent::new(
                creature,
                args.amount,
                Vector3::from(args.ragdoll),
                args.ragdoll_effect,
                args.track_kill,
                args.drop_loot,
            );
            event.set_cancelled(args.cancel);

            self.bus.publish(&mut event);

            args.amount = event.amount;
            args.ragdoll = NativeVector::from(event.ragdoll);
            args.ragdoll_effect = event.ragdoll_effect;
            args.track_kill = event.track_kill;
            args.drop_loot = event.drop_loot;
            args.cancel = event.is_cancelled();
        }

        !args.cancel
    }

    fn on_fleeing(&self, args: &mut FleeArgs) -> bool {
        let Some(creature) = self.wrap(args.creature) else {
            return true;
        };

        let mut event =
            CreatureFleeingEvent::new(creature, Vector3::from(args.direction), args.send_to_pack);
        event.set_cancelled(args.cancel);

        self.bus.publish(&mut event);

        args.direction = NativeVector::from(event.direction);
        args.send_to_pack = event.send_to_pack;
        args.cancel = event.is_cancelled();

        !args.cancel
    }

    fn on_attacking_point(&self, args: &mut AttackPointArgs) -> bool {
        let Some(creature) = self.wrap(args.creature) else {
            return true;
        };

        let mut event = CreatureAttackingPointEvent::new(
            creature,
            Vector3::from(args.point),
            args.send_to_pack,
        );
        event.set_cancelled(args.cancel);

        self.bus.publish(&mut event);

        args.point = NativeVector::from(event.point);
        args.send_to_pack = event.send_to_pack;
        args.cancel = event.is_cancelled();

        !args.cancel
    }

    fn on_attacking_actor(&self, args: &mut AttackActorArgs) -> bool {
        let Some(creature) = self.wrap(args.creature) else {
            return true;
        };
        let Some(target) = self.wrap(args.target) else {
            return true;
        };

        let mut event = CreatureAttackingActorEvent::new(creature, target, args.send_to_pack);
        event.set_cancelled(args.cancel);

        self.bus.publish(&mut event);

        args.target = event.target.handle();
        args.send_to_pack = event.send_to_pack;
        args.cancel = event.is_cancelled();

        !args.cancel
    }

    fn wrap(&self, handle: RawHandle) -> Option<CreatureView> {
        match self.oracle.wrap(handle) {
            Ok(view) => Some(view),
            Err(err) => {
                tracing::debug!(
                    target: "bridge::dispatch",
                    handle = %handle,
                    error = %err,
                    "cannot wrap native handle, call proceeds unmodified"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CreatureTable;
    use sim_core::RagdollEffect;

    fn fixture(health: u16) -> (Arc<EventBus>, Dispatcher, RawHandle) {
        let bus = Arc::new(EventBus::new());
        let table = Arc::new(CreatureTable::default());
        let handle = table.insert_creature(health, NativeVector::default());
        let dispatcher = Dispatcher::new(Arc::clone(&bus), table);
        (bus, dispatcher, handle)
    }

    fn damage_args(creature: RawHandle, amount: u16) -> DamageArgs {
        DamageArgs {
            creature,
            amount,
            ragdoll: NativeVector::default(),
            ragdoll_effect: RagdollEffect::None,
            track_kill: false,
            drop_loot: true,
            cancel: false,
        }
    }

    #[test]
    fn threshold_selects_dying_at_exact_health() {
        let (bus, dispatcher, handle) = fixture(50);
        bus.subscribe::<CreatureDyingEvent>(|e| e.set_cancelled(true));

        let mut args = damage_args(handle, 50);
        assert!(!dispatcher.on_damaging(&mut args));
        assert!(args.cancel);
    }

    #[test]
    fn below_threshold_selects_damaging() {
        let (bus, dispatcher, handle) = fixture(50);
        bus.subscribe::<CreatureDamagingEvent>(|e| e.amount = 10);

        let mut args = damage_args(handle, 49);
        assert!(dispatcher.on_damaging(&mut args));
        assert_eq!(args.amount, 10);
    }

    #[test]
    fn zero_amount_suppressed_even_with_invalid_handle() {
        let (_bus, dispatcher, _handle) = fixture(50);
        let mut args = damage_args(RawHandle(999), 0);
        assert!(!dispatcher.on_damaging(&mut args));
    }

    #[test]
    fn invalid_handle_proceeds_unmodified() {
        let (bus, dispatcher, _handle) = fixture(50);
        bus.subscribe::<CreatureDamagingEvent>(|e| e.set_cancelled(true));

        let mut args = damage_args(RawHandle(999), 30);
        assert!(dispatcher.on_damaging(&mut args));
        assert_eq!(args.amount, 30);
        assert!(!args.cancel);
    }

    #[test]
    fn invalid_attack_target_proceeds_unmodified() {
        let (bus, dispatcher, handle) = fixture(50);
        bus.subscribe::<CreatureAttackingActorEvent>(|e| e.set_cancelled(true));

        let mut call = PreemptCall::AttackActor(AttackActorArgs {
            creature: handle,
            target: RawHandle::NULL,
            send_to_pack: false,
            cancel: false,
        });
        assert!(dispatcher.preempt(&mut call));
        let PreemptCall::AttackActor(args) = call else {
            panic!("context kept its site");
        };
        assert!(!args.cancel);
    }

    #[test]
    fn preempt_seeds_cancellation_from_call() {
        let (bus, dispatcher, handle) = fixture(50);
        let seen = Arc::new(std::sync::atomic::AtomicBool::new(false));
        let seen2 = Arc::clone(&seen);
        bus.subscribe::<CreatureFleeingEvent>(move |e| {
            seen2.store(e.is_cancelled(), std::sync::atomic::Ordering::SeqCst);
        });

        let mut args = FleeArgs {
            creature: handle,
            direction: NativeVector::new(1.0, 0.0, 0.0),
            send_to_pack: false,
            cancel: true,
        };
        assert!(!dispatcher.on_fleeing(&mut args));
        assert!(seen.load(std::sync::atomic::Ordering::SeqCst));
    }
}
