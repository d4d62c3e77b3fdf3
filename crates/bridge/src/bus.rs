//! Ordered synchronous publish/subscribe bus.
//!
//! The bus the application root injects into the dispatcher. Delivery
//! contract, formalized here because it is easy to get wrong when porting
//! from short-circuiting event idioms:
//!
//! - subscribers of an event type run in registration order, on the
//!   publishing thread, before `publish` returns;
//! - **every** subscriber runs even after one sets `cancelled`: cancellation
//!   is a final decision read after publish returns, not a delivery filter;
//! - a panicking subscriber is contained and logged; the remaining
//!   subscribers still run, and the event keeps whatever state it reached.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

type BoxedHandler<E> = Box<dyn Fn(&mut E) + Send + Sync>;

struct Subscriber {
    // Holds a `BoxedHandler<E>`; recovered by type in `publish`.
    handler: Box<dyn Any + Send + Sync>,
}

/// In-process event bus with typed, ordered subscriber lists.
pub struct EventBus {
    subscribers: RwLock<HashMap<TypeId, Vec<Arc<Subscriber>>>>,
    faults: AtomicUsize,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            subscribers: RwLock::new(HashMap::new()),
            faults: AtomicUsize::new(0),
        }
    }

    /// Appends a subscriber for events of type `E`.
    ///
    /// Registration order is delivery order.
    pub fn subscribe<E: Any>(&self, handler: impl Fn(&mut E) + Send + Sync + 'static) {
        let boxed: BoxedHandler<E> = Box::new(handler);
        let subscriber = Arc::new(Subscriber {
            handler: Box::new(boxed),
        });

        match self.subscribers.write() {
            Ok(mut map) => map.entry(TypeId::of::<E>()).or_default().push(subscriber),
            Err(_) => {
                tracing::error!(
                    target: "bridge::bus",
                    event = std::any::type_name::<E>(),
                    "subscriber list poisoned, subscription dropped"
                );
            }
        }
    }

    /// Publishes `event` synchronously to every subscriber of `E`.
    ///
    /// Returns once all subscribers have run. A publish with no subscribers
    /// is a no-op.
    pub fn publish<E: Any>(&self, event: &mut E) {
        let subscribers: Vec<Arc<Subscriber>> = match self.subscribers.read() {
            Ok(map) => match map.get(&TypeId::of::<E>()) {
                Some(list) => list.clone(),
                None => return,
            },
            Err(_) => {
                // Degrade to "no subscribers" rather than block the engine.
                tracing::debug!(
                    target: "bridge::bus",
                    event = std::any::type_name::<E>(),
                    "subscriber list poisoned, publish skipped"
                );
                return;
            }
        };

        for (index, subscriber) in subscribers.iter().enumerate() {
            let Some(handler) = subscriber.handler.downcast_ref::<BoxedHandler<E>>() else {
                continue;
            };

            if panic::catch_unwind(AssertUnwindSafe(|| handler(event))).is_err() {
                self.faults.fetch_add(1, Ordering::Relaxed);
                tracing::error!(
                    target: "bridge::bus",
                    event = std::any::type_name::<E>(),
                    subscriber = index,
                    "subscriber panicked during publish, continuing with remaining subscribers"
                );
            }
        }
    }

    /// Number of subscribers registered for `E`.
    pub fn subscriber_count<E: Any>(&self) -> usize {
        self.subscribers
            .read()
            .map(|map| map.get(&TypeId::of::<E>()).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    /// Total subscriber panics contained since the bus was created.
    pub fn faults(&self) -> usize {
        self.faults.load(Ordering::Relaxed)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Probe {
        calls: Vec<&'static str>,
        cancelled: bool,
    }

    fn probe() -> Probe {
        Probe {
            calls: Vec::new(),
            cancelled: false,
        }
    }

    #[test]
    fn subscribers_run_in_registration_order() {
        let bus = EventBus::new();
        bus.subscribe::<Probe>(|e| e.calls.push("first"));
        bus.subscribe::<Probe>(|e| e.calls.push("second"));
        bus.subscribe::<Probe>(|e| e.calls.push("third"));

        let mut event = probe();
        bus.publish(&mut event);

        assert_eq!(event.calls, ["first", "second", "third"]);
    }

    #[test]
    fn cancellation_does_not_short_circuit_delivery() {
        let bus = EventBus::new();
        bus.subscribe::<Probe>(|e| {
            e.cancelled = true;
            e.calls.push("canceller");
        });
        bus.subscribe::<Probe>(|e| e.calls.push("late observer"));

        let mut event = probe();
        bus.publish(&mut event);

        assert!(event.cancelled);
        assert_eq!(event.calls.len(), 2);
    }

    #[test]
    fn publish_without_subscribers_is_noop() {
        let bus = EventBus::new();
        let mut event = probe();
        bus.publish(&mut event);
        assert!(event.calls.is_empty());
    }

    #[test]
    fn subscribers_of_other_types_are_not_invoked() {
        let bus = EventBus::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits2 = Arc::clone(&hits);
        bus.subscribe::<u32>(move |_| {
            hits2.fetch_add(1, Ordering::SeqCst);
        });

        let mut event = probe();
        bus.publish(&mut event);

        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(bus.subscriber_count::<u32>(), 1);
        assert_eq!(bus.subscriber_count::<Probe>(), 0);
    }

    #[test]
    fn panicking_subscriber_is_contained() {
        let bus = EventBus::new();
        bus.subscribe::<Probe>(|e| e.calls.push("before"));
        bus.subscribe::<Probe>(|_| panic!("subscriber bug"));
        bus.subscribe::<Probe>(|e| e.calls.push("after"));

        let mut event = probe();
        bus.publish(&mut event);

        assert_eq!(event.calls, ["before", "after"]);
        assert_eq!(bus.faults(), 1);
    }

    #[test]
    fn mutations_accumulate_across_subscribers() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen2 = Arc::clone(&seen);

        bus.subscribe::<u32>(|n| *n += 1);
        bus.subscribe::<u32>(move |n| seen2.lock().unwrap().push(*n));

        let mut n = 41u32;
        bus.publish(&mut n);

        assert_eq!(n, 42);
        assert_eq!(*seen.lock().unwrap(), [42]);
    }
}
