//! 3D Cartesian vectors on the observer's scene sphere.
//!
//! The scene convention is `+y` up (zenith), `+x` east, `+z` toward the
//! south horizon. Objects sit on spheres of fixed radius (stars at
//! [`crate::constants::SCENE_RADIUS`], satellites at
//! [`crate::constants::SATELLITE_SPHERE_RADIUS`]), so most vectors here are
//! positions rather than directions.
//!
//! The one invariant the whole renderer contract rests on: a [`Vector3`]
//! handed downstream by the scene pipeline always has finite components.
//! [`Vector3::is_finite`] is the check; [`Vector3::sentinel`] is the
//! canonical below-the-nadir placeholder `(0, −R, 0)` used when a
//! computation degenerates but the object must still be emitted.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 3D Cartesian position or offset in scene units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The canonical sentinel position: straight down at radius `r`.
    ///
    /// Objects whose position computation produced a non-finite value are
    /// parked here with `is_visible = false` when they may not be dropped.
    #[inline]
    pub fn sentinel(r: f64) -> Self {
        Self::new(0.0, -r, 0.0)
    }

    /// True when every component is a normal, representable number.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    #[inline]
    pub fn length(&self) -> f64 {
        libm::sqrt(self.x * self.x + self.y * self.y + self.z * self.z)
    }

    #[inline]
    pub fn dot(&self, other: &Vector3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn scale(&self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k, self.z * k)
    }

    #[inline]
    pub fn add(&self, other: &Vector3) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    #[inline]
    pub fn sub(&self, other: &Vector3) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    /// Returns the vector rescaled to length `r`.
    ///
    /// A zero-length input cannot be given a direction; it comes back as the
    /// sentinel for that radius so the finite-position invariant holds.
    pub fn with_length(&self, r: f64) -> Self {
        let len = self.length();
        if len < 1e-12 || !len.is_finite() {
            return Self::sentinel(r);
        }
        self.scale(r / len)
    }

    /// Midpoint of two positions, used for constellation label anchors.
    #[inline]
    pub fn midpoint(&self, other: &Vector3) -> Self {
        Self::new(
            (self.x + other.x) * 0.5,
            (self.y + other.y) * 0.5,
            (self.z + other.z) * 0.5,
        )
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}
