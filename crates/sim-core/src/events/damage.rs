//! Damage-path events: Damaging, Dying, Dead.

use crate::creature::CreatureView;
use crate::vector::Vector3;

use super::CancellableEvent;

/// Ragdoll animation applied by the engine when a creature is knocked down.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RagdollEffect {
    #[default]
    None,
    Bronze,
    Gold,
    Zero,
}

/// A creature is about to take non-lethal damage. Pre-empt; cancellable.
///
/// Subscribers may rewrite any payload field before dispatch returns; the
/// final values are written back into the native call.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureDamagingEvent {
    creature: CreatureView,
    pub amount: u16,
    pub ragdoll: Vector3,
    pub ragdoll_effect: RagdollEffect,
    pub track_kill: bool,
    pub drop_loot: bool,
    cancelled: bool,
}

impl CreatureDamagingEvent {
    pub fn new(
        creature: CreatureView,
        amount: u16,
        ragdoll: Vector3,
        ragdoll_effect: RagdollEffect,
        track_kill: bool,
        drop_loot: bool,
    ) -> Self {
        Self {
            creature,
            amount,
            ragdoll,
            ragdoll_effect,
            track_kill,
            drop_loot,
            cancelled: false,
        }
    }

    pub fn creature(&self) -> &CreatureView {
        &self.creature
    }
}

impl CancellableEvent for CreatureDamagingEvent {
    fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

/// A creature is about to take lethal damage. Pre-empt; cancellable.
///
/// Same payload as [`CreatureDamagingEvent`]; emitted instead of it when the
/// proposed amount meets or exceeds the creature's current health. Cancelling
/// prevents the death entirely.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureDyingEvent {
    creature: CreatureView,
    pub amount: u16,
    pub ragdoll: Vector3,
    pub ragdoll_effect: RagdollEffect,
    pub track_kill: bool,
    pub drop_loot: bool,
    cancelled: bool,
}

impl CreatureDyingEvent {
    pub fn new(
        creature: CreatureView,
        amount: u16,
        ragdoll: Vector3,
        ragdoll_effect: RagdollEffect,
        track_kill: bool,
        drop_loot: bool,
    ) -> Self {
        Self {
            creature,
            amount,
            ragdoll,
            ragdoll_effect,
            track_kill,
            drop_loot,
            cancelled: false,
        }
    }

    pub fn creature(&self) -> &CreatureView {
        &self.creature
    }
}

impl CancellableEvent for CreatureDyingEvent {
    fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

/// A creature's health reached zero. Post-notify; read-only.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureDeadEvent {
    creature: CreatureView,
    ragdoll: Vector3,
    ragdoll_effect: RagdollEffect,
}

impl CreatureDeadEvent {
    pub fn new(creature: CreatureView, ragdoll: Vector3, ragdoll_effect: RagdollEffect) -> Self {
        Self {
            creature,
            ragdoll,
            ragdoll_effect,
        }
    }

    pub fn creature(&self) -> &CreatureView {
        &self.creature
    }

    pub fn ragdoll(&self) -> Vector3 {
        self.ragdoll
    }

    pub fn ragdoll_effect(&self) -> RagdollEffect {
        self.ragdoll_effect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::RawHandle;
    use crate::creature::{CreatureSnapshot, CreatureView, EntityId};

    fn view() -> CreatureView {
        CreatureView::from_snapshot(
            RawHandle(1),
            CreatureSnapshot {
                id: EntityId(1),
                health: 50,
                max_health: 100,
                ..Default::default()
            },
        )
    }

    #[test]
    fn damaging_starts_uncancelled() {
        let event = CreatureDamagingEvent::new(
            view(),
            30,
            Vector3::ZERO,
            RagdollEffect::None,
            true,
            true,
        );
        assert!(!event.is_cancelled());
    }

    #[test]
    fn payload_fields_are_mutable() {
        let mut event = CreatureDamagingEvent::new(
            view(),
            30,
            Vector3::ZERO,
            RagdollEffect::None,
            true,
            true,
        );
        event.amount = 10;
        event.ragdoll = Vector3::new(0.0, 1.0, 0.0);
        event.ragdoll_effect = RagdollEffect::Gold;
        event.drop_loot = false;
        event.set_cancelled(true);

        assert_eq!(event.amount, 10);
        assert_eq!(event.ragdoll_effect, RagdollEffect::Gold);
        assert!(event.is_cancelled());
        // identity is untouched by payload mutation
        assert_eq!(event.creature().id(), EntityId(1));
    }

    #[test]
    fn dying_cancel_round_trip() {
        let mut event =
            CreatureDyingEvent::new(view(), 60, Vector3::ZERO, RagdollEffect::None, false, true);
        event.set_cancelled(true);
        assert!(event.is_cancelled());
        event.set_cancelled(false);
        assert!(!event.is_cancelled());
    }

    #[test]
    fn dead_event_is_read_only_projection() {
        let event = CreatureDeadEvent::new(view(), Vector3::new(1.0, 0.0, 0.0), RagdollEffect::Zero);
        assert_eq!(event.ragdoll(), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(event.ragdoll_effect(), RagdollEffect::Zero);
    }

    #[test]
    fn ragdoll_effect_display_is_snake_case() {
        assert_eq!(RagdollEffect::Zero.to_string(), "zero");
        assert_eq!(RagdollEffect::None.to_string(), "none");
    }
}
