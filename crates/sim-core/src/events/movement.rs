//! Pre-empt events for flee and attack maneuvers.

use crate::creature::CreatureView;
use crate::vector::Vector3;

use super::CancellableEvent;

/// A creature begins fleeing from a direction. Pre-empt; cancellable.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureFleeingEvent {
    creature: CreatureView,
    /// Direction the creature flees from, rewritable by subscribers.
    pub direction: Vector3,
    /// Whether the rest of the pack is alerted as well.
    pub send_to_pack: bool,
    cancelled: bool,
}

impl CreatureFleeingEvent {
    pub fn new(creature: CreatureView, direction: Vector3, send_to_pack: bool) -> Self {
        Self {
            creature,
            direction,
            send_to_pack,
            cancelled: false,
        }
    }

    pub fn creature(&self) -> &CreatureView {
        &self.creature
    }
}

impl CancellableEvent for CreatureFleeingEvent {
    fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

/// A creature begins moving toward a tactical point. Pre-empt; cancellable.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureAttackingPointEvent {
    creature: CreatureView,
    /// Target point, rewritable by subscribers.
    pub point: Vector3,
    pub send_to_pack: bool,
    cancelled: bool,
}

impl CreatureAttackingPointEvent {
    pub fn new(creature: CreatureView, point: Vector3, send_to_pack: bool) -> Self {
        Self {
            creature,
            point,
            send_to_pack,
            cancelled: false,
        }
    }

    pub fn creature(&self) -> &CreatureView {
        &self.creature
    }
}

impl CancellableEvent for CreatureAttackingPointEvent {
    fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

/// A creature begins attacking another actor. Pre-empt; cancellable.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureAttackingActorEvent {
    creature: CreatureView,
    /// The actor under attack. A subscriber redirects the attack by
    /// assigning a different view; the target's handle is written back into
    /// the native call.
    pub target: CreatureView,
    pub send_to_pack: bool,
    cancelled: bool,
}

impl CreatureAttackingActorEvent {
    pub fn new(creature: CreatureView, target: CreatureView, send_to_pack: bool) -> Self {
        Self {
            creature,
            target,
            send_to_pack,
            cancelled: false,
        }
    }

    pub fn creature(&self) -> &CreatureView {
        &self.creature
    }
}

impl CancellableEvent for CreatureAttackingActorEvent {
    fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::RawHandle;
    use crate::creature::{CreatureSnapshot, EntityId};

    fn view(id: u32, handle: u64) -> CreatureView {
        CreatureView::from_snapshot(
            RawHandle(handle),
            CreatureSnapshot {
                id: EntityId(id),
                health: 40,
                max_health: 40,
                ..Default::default()
            },
        )
    }

    #[test]
    fn fleeing_direction_rewrite() {
        let mut event =
            CreatureFleeingEvent::new(view(1, 1), Vector3::new(1.0, 0.0, 0.0), false);
        event.direction = Vector3::new(0.0, 0.0, 1.0);
        assert_eq!(event.direction, Vector3::new(0.0, 0.0, 1.0));
        assert!(!event.is_cancelled());
    }

    #[test]
    fn attacking_actor_target_replacement() {
        let mut event = CreatureAttackingActorEvent::new(view(1, 1), view(2, 2), true);
        event.target = view(3, 3);
        assert_eq!(event.target.handle(), RawHandle(3));
        assert_eq!(event.creature().id(), EntityId(1));
    }

    #[test]
    fn attacking_point_cancel() {
        let mut event =
            CreatureAttackingPointEvent::new(view(1, 1), Vector3::new(5.0, 0.0, 5.0), false);
        event.set_cancelled(true);
        assert!(event.is_cancelled());
    }
}
