//! Frame chain from an SGP4 state vector to the observer's sky.
//!
//! SGP4 reports kilometres in TEME (true equator, mean equinox — an
//! Earth-centered inertial frame). The chain to local coordinates:
//!
//! ```text
//! TEME --rot_z(-gmst)--> ECEF --observer--> SEZ --> (azimuth, elevation)
//! ```
//!
//! The observer sits on the WGS-84 ellipsoid at sea level; the few hundred
//! metres of real-world site elevation move a LEO satellite by well under
//! the marker size.

use skysphere_core::angle::wrap_degrees;
use skysphere_core::constants::{
    DEG_TO_RAD, EARTH_ECCENTRICITY_SQUARED, EARTH_EQUATORIAL_RADIUS_KM, RAD_TO_DEG,
};
use skysphere_core::{GeoLocation, Horizontal};

/// A position vector in kilometres, frame given by context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Km3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Km3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f64 {
        libm::sqrt(self.x * self.x + self.y * self.y + self.z * self.z)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Observer position in ECEF kilometres on the WGS-84 ellipsoid.
pub fn observer_ecef(observer: &GeoLocation) -> Km3 {
    let lat = observer.latitude_deg() * DEG_TO_RAD;
    let lon = observer.longitude_deg() * DEG_TO_RAD;
    let (sin_lat, cos_lat) = libm::sincos(lat);
    let (sin_lon, cos_lon) = libm::sincos(lon);

    let n = EARTH_EQUATORIAL_RADIUS_KM
        / libm::sqrt(1.0 - EARTH_ECCENTRICITY_SQUARED * sin_lat * sin_lat);

    Km3::new(
        n * cos_lat * cos_lon,
        n * cos_lat * sin_lon,
        n * (1.0 - EARTH_ECCENTRICITY_SQUARED) * sin_lat,
    )
}

/// Rotates a TEME vector into ECEF using GMST in hours.
pub fn teme_to_ecef(v: &Km3, gmst_hours: f64) -> Km3 {
    let theta = gmst_hours * 15.0 * DEG_TO_RAD;
    let (sin_t, cos_t) = libm::sincos(theta);
    // rot_z(-theta): the Earth-fixed frame has rotated by +theta.
    Km3::new(
        cos_t * v.x + sin_t * v.y,
        -sin_t * v.x + cos_t * v.y,
        v.z,
    )
}

/// Rotates an ECEF topocentric difference vector into the SEZ frame
/// (x south, y east, z zenith) at the observer.
pub fn ecef_to_sez(topo: &Km3, observer: &GeoLocation) -> Km3 {
    let lat = observer.latitude_deg() * DEG_TO_RAD;
    let lon = observer.longitude_deg() * DEG_TO_RAD;
    let (sin_lat, cos_lat) = libm::sincos(lat);
    let (sin_lon, cos_lon) = libm::sincos(lon);

    Km3::new(
        sin_lat * cos_lon * topo.x + sin_lat * sin_lon * topo.y - cos_lat * topo.z,
        -sin_lon * topo.x + cos_lon * topo.y,
        cos_lat * cos_lon * topo.x + cos_lat * sin_lon * topo.y + sin_lat * topo.z,
    )
}

/// Azimuth/elevation from an SEZ vector, plus the slant range in km.
pub fn sez_to_horizontal(sez: &Km3) -> (Horizontal, f64) {
    let range = sez.length();
    if range < 1e-9 {
        return (Horizontal::new(90.0, 0.0), 0.0);
    }
    let elevation = libm::asin((sez.z / range).clamp(-1.0, 1.0)) * RAD_TO_DEG;
    // Azimuth from north, clockwise: north is -x in SEZ.
    let azimuth = wrap_degrees(libm::atan2(sez.y, -sez.x) * RAD_TO_DEG);
    (Horizontal::new(elevation, azimuth), range)
}

/// Full chain: TEME satellite position to the observer's horizontal frame.
pub fn teme_to_horizontal(
    sat_teme: &Km3,
    observer: &GeoLocation,
    gmst_hours: f64,
) -> (Horizontal, f64) {
    let sat_ecef = teme_to_ecef(sat_teme, gmst_hours);
    let obs_ecef = observer_ecef(observer);
    let topo = Km3::new(
        sat_ecef.x - obs_ecef.x,
        sat_ecef.y - obs_ecef.y,
        sat_ecef.z - obs_ecef.z,
    );
    let sez = ecef_to_sez(&topo, observer);
    sez_to_horizontal(&sez)
}
