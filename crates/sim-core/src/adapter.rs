//! Engine-read capability and handle wrapping.
//!
//! The host engine is opaque; the only sanctioned read path is the
//! [`CreatureOracle`] capability an embedding supplies. The provided
//! [`wrap`](CreatureOracle::wrap) method implements the adapter contract:
//! pure, side-effect-free, and failing with [`InvalidEntity`] for handles the
//! engine does not recognize. Callers treat a failed wrap as "do not
//! construct an event, let the call proceed unmodified".

use std::fmt;

use crate::creature::{CreatureSnapshot, CreatureView};
use crate::error::InvalidEntity;

/// Opaque handle to a native entity owned by the host engine.
///
/// Handles are only meaningful to the engine that issued them; the bridge
/// never interprets the bits beyond the null check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawHandle(pub u64);

impl RawHandle {
    /// The null handle. Wrapping it always fails.
    pub const NULL: Self = Self(0);

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for RawHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// Read-only access to engine-owned creature state.
///
/// Implemented by the embedding over whatever mechanism the host engine
/// exposes (shared tables, FFI getters). `snapshot` must reflect the state at
/// the instant of the call; the bridge re-reads on every interception and
/// never caches results.
pub trait CreatureOracle: Send + Sync {
    /// Reads the current state behind `handle`, or `None` if the engine does
    /// not know the handle.
    fn snapshot(&self, handle: RawHandle) -> Option<CreatureSnapshot>;

    /// Wraps a native handle into a [`CreatureView`].
    ///
    /// Repeated wraps of the same handle within one call yield views with
    /// identical observable state.
    fn wrap(&self, handle: RawHandle) -> Result<CreatureView, InvalidEntity> {
        if handle.is_null() {
            return Err(InvalidEntity::NullHandle);
        }
        let snapshot = self
            .snapshot(handle)
            .ok_or(InvalidEntity::UnknownHandle(handle))?;
        Ok(CreatureView::from_snapshot(handle, snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::EntityId;
    use crate::vector::NativeVector;

    struct SingleCreature;

    impl CreatureOracle for SingleCreature {
        fn snapshot(&self, handle: RawHandle) -> Option<CreatureSnapshot> {
            (handle == RawHandle(42)).then(|| CreatureSnapshot {
                id: EntityId(9),
                health: 50,
                max_health: 100,
                position: NativeVector::new(4.0, 5.0, 6.0),
                dead: false,
            })
        }
    }

    #[test]
    fn wrap_known_handle() {
        let view = SingleCreature.wrap(RawHandle(42)).unwrap();
        assert_eq!(view.id(), EntityId(9));
        assert_eq!(view.handle(), RawHandle(42));
    }

    #[test]
    fn wrap_null_handle_fails() {
        assert_eq!(
            SingleCreature.wrap(RawHandle::NULL),
            Err(InvalidEntity::NullHandle)
        );
    }

    #[test]
    fn wrap_unknown_handle_fails() {
        assert_eq!(
            SingleCreature.wrap(RawHandle(7)),
            Err(InvalidEntity::UnknownHandle(RawHandle(7)))
        );
    }

    #[test]
    fn repeated_wraps_agree() {
        let a = SingleCreature.wrap(RawHandle(42)).unwrap();
        let b = SingleCreature.wrap(RawHandle(42)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.health(), b.health());
    }
}
