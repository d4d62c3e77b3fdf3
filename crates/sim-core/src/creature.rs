//! Creature identity and per-call projections of native entity state.

use std::fmt;

use crate::adapter::RawHandle;
use crate::vector::{NativeVector, Vector3};

/// Unique identifier for a creature tracked by the host engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Raw per-call read of a native handle, produced by the engine adapter.
///
/// A snapshot is valid only for the interception callback that requested it;
/// the underlying native state may change between calls.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureSnapshot {
    pub id: EntityId,
    pub health: u16,
    pub max_health: u16,
    pub position: NativeVector,
    pub dead: bool,
}

/// Domain projection of a native creature handle.
///
/// Views are read-mostly: subscribers inspect identity, health, and position
/// but never mutate them. A view is scoped to the callback that produced it
/// and must not be cached across calls.
///
/// # Identity
///
/// Two views wrapped from the same native handle within one call compare
/// equal; equality is identity comparison (id + handle), not a field-wise
/// comparison of the projected state.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureView {
    id: EntityId,
    health: u16,
    max_health: u16,
    position: Vector3,
    dead: bool,
    handle: RawHandle,
}

impl CreatureView {
    /// Builds a view from a raw snapshot, converting coordinates into the
    /// domain space.
    pub fn from_snapshot(handle: RawHandle, snapshot: CreatureSnapshot) -> Self {
        Self {
            id: snapshot.id,
            health: snapshot.health,
            max_health: snapshot.max_health,
            position: Vector3::from(snapshot.position),
            dead: snapshot.dead,
            handle,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn health(&self) -> u16 {
        self.health
    }

    pub fn max_health(&self) -> u16 {
        self.max_health
    }

    pub fn position(&self) -> Vector3 {
        self.position
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    /// The native handle this view was wrapped from. Needed when a mutated
    /// event field has to be written back into a call context as a handle
    /// (e.g. a replaced attack target).
    pub fn handle(&self) -> RawHandle {
        self.handle
    }
}

impl PartialEq for CreatureView {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.handle == other.handle
    }
}

impl Eq for CreatureView {}

impl fmt::Display for CreatureView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "creature {} ({}/{} hp)", self.id, self.health, self.max_health)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(id: u32, health: u16) -> CreatureSnapshot {
        CreatureSnapshot {
            id: EntityId(id),
            health,
            max_health: 100,
            position: NativeVector::new(1.0, 2.0, 3.0),
            dead: health == 0,
        }
    }

    #[test]
    fn views_from_same_handle_compare_equal() {
        let handle = RawHandle(7);
        let a = CreatureView::from_snapshot(handle, snapshot(3, 50));
        let b = CreatureView::from_snapshot(handle, snapshot(3, 50));
        assert_eq!(a, b);
    }

    #[test]
    fn views_from_different_handles_differ() {
        let a = CreatureView::from_snapshot(RawHandle(1), snapshot(1, 50));
        let b = CreatureView::from_snapshot(RawHandle(2), snapshot(2, 50));
        assert_ne!(a, b);
    }

    #[test]
    fn projection_converts_position() {
        let view = CreatureView::from_snapshot(RawHandle(1), snapshot(1, 80));
        assert_eq!(view.position(), Vector3::new(1.0, 2.0, 3.0));
        assert!(view.is_alive());
        assert_eq!(view.health(), 80);
    }

    #[test]
    fn dead_flag_projects() {
        let view = CreatureView::from_snapshot(RawHandle(1), snapshot(1, 0));
        assert!(view.is_dead());
        assert!(!view.is_alive());
    }
}
