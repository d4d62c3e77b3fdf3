//! Post-notify events for creature creation and revival.

use crate::creature::CreatureView;

/// A creature was added to the world. Post-notify; read-only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureSpawnedEvent {
    creature: CreatureView,
}

impl CreatureSpawnedEvent {
    pub fn new(creature: CreatureView) -> Self {
        Self { creature }
    }

    pub fn creature(&self) -> &CreatureView {
        &self.creature
    }
}

/// A dead creature transitioned back to alive. Post-notify; read-only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureRevivedEvent {
    creature: CreatureView,
}

impl CreatureRevivedEvent {
    pub fn new(creature: CreatureView) -> Self {
        Self { creature }
    }

    pub fn creature(&self) -> &CreatureView {
        &self.creature
    }
}
