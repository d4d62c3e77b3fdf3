//! Coordinate triples on both sides of the native boundary.
//!
//! The host engine hands the bridge coordinates in its own space
//! ([`NativeVector`]); events and subscribers only ever see the domain space
//! ([`Vector3`]). Conversion is coordinate-space translation only, carries no
//! semantic transformation, and round-trips exactly.

/// Domain-space coordinate triple used by events and subscribers.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Engine-space coordinate triple as it appears in raw call arguments.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NativeVector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl NativeVector {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

// Component-exact in both directions: to_native(to_domain(v)) == v for every
// representable vector.
impl From<NativeVector> for Vector3 {
    fn from(v: NativeVector) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<Vector3> for NativeVector {
    fn from(v: Vector3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}
