//! Time, angle, and coordinate primitives for the skysphere planetarium engine.
//!
//! Everything downstream of this crate — catalog processing, ephemeris
//! evaluation, satellite tracking, scene assembly — speaks the vocabulary
//! defined here:
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`time`] | [`Instant`] (civil UTC) and [`JulianDate`] |
//! | [`sidereal`] | Greenwich and local mean sidereal time |
//! | [`angle`] | Wrapping and clamping helpers in degrees/hours |
//! | [`transforms`] | [`Equatorial`] ↔ [`Horizontal`] ↔ [`Vector3`] conversions |
//! | [`location`] | [`GeoLocation`] — the validated observer position |
//! | [`vector`] | [`Vector3`] on the scene sphere |
//! | [`errors`] | [`AstroError`] taxonomy and [`AstroResult`] |
//!
//! # Scene-sphere convention
//!
//! Processed objects live on a sphere of radius [`constants::SCENE_RADIUS`]
//! centered on the observer: `+y` is the zenith, `+x` is east, and `+z`
//! points toward the observer's south horizon (azimuth 180°). Every position
//! emitted by the scene pipeline is guaranteed finite; see
//! [`Vector3::is_finite`].
//!
//! # Features
//!
//! - **`serde`** — derives `Serialize`/`Deserialize` on the public value types.

pub mod angle;
pub mod constants;
pub mod errors;
pub mod format;
pub mod location;
pub mod sidereal;
pub mod time;
pub mod transforms;
pub mod vector;

pub use errors::{AstroError, AstroResult, MathErrorKind};
pub use location::GeoLocation;
pub use time::{Instant, JulianDate};
pub use transforms::{Equatorial, Horizontal};
pub use vector::Vector3;
