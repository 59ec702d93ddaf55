//! Earth-orbiting satellites on NORAD two-line elements.
//!
//! The `sgp4` crate supplies element parsing and the SGP4 perturbation
//! model; this crate owns everything around it: the per-satellite life
//! cycle, the TEME → ECEF → topocentric chain, and the projection onto the
//! 90-unit satellite sphere (inside the 100-unit star sphere
//! so satellites draw in front of the star field).
//!
//! Life cycle per satellite: a TLE parses into an initialized record, each
//! evaluation propagates it to the requested instant, and the first
//! propagation that fails or produces a non-finite vector moves the record
//! to a terminal dead state. Dead satellites keep answering — with the
//! sentinel position and `is_visible = false` — so a stale TLE can never
//! poison a scene.

pub mod satellite;
pub mod topocentric;

pub use satellite::{parse_tle_text, Satellite, TopocentricSatellite};
