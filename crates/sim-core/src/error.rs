//! Error types for the adapter boundary.

use crate::adapter::RawHandle;

/// A native handle could not be wrapped into a creature view.
///
/// Callers in the dispatch pipeline degrade to "proceed unmodified, no
/// event" on this error; it never propagates into the bus or back into the
/// host engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidEntity {
    #[error("null creature handle")]
    NullHandle,

    #[error("unknown creature handle {0}")]
    UnknownHandle(RawHandle),
}
