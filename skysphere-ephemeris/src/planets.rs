//! Planetary positions from mean Keplerian elements.
//!
//! Uses the JPL approximate elements (Standish, valid 1800–2050): each
//! planet's osculating elements are linear functions of Julian centuries
//! since J2000, and the position follows from one Kepler solve. Accuracy is
//! a few arcminutes inside the validity window — planetarium-grade, not
//! almanac-grade.
//!
//! The Earth entry is the Earth–Moon barycenter, whose offset from the
//! Earth itself (~4700 km) is negligible at this accuracy.

use crate::frames::EclipticCartesian;
use crate::kepler;
use skysphere_core::angle::wrap_degrees;
use skysphere_core::JulianDate;

/// Planets carried by the mean-element theory, in heliocentric order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Planet {
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

/// Mean elements at J2000 and their per-century rates:
/// `(a, e, i, L, long_peri, long_node)` in AU and degrees.
struct MeanElements {
    base: [f64; 6],
    rate: [f64; 6],
}

fn mean_elements(planet: Planet) -> MeanElements {
    // JPL "Keplerian elements for approximate positions", table 1 (1800-2050).
    match planet {
        Planet::Mercury => MeanElements {
            base: [0.38709927, 0.20563593, 7.00497902, 252.25032350, 77.45779628, 48.33076593],
            rate: [0.00000037, 0.00001906, -0.00594749, 149472.67411175, 0.16047689, -0.12534081],
        },
        Planet::Venus => MeanElements {
            base: [0.72333566, 0.00677672, 3.39467605, 181.97909950, 131.60246718, 76.67984255],
            rate: [0.00000390, -0.00004107, -0.00078890, 58517.81538729, 0.00268329, -0.27769418],
        },
        Planet::Earth => MeanElements {
            base: [1.00000261, 0.01671123, -0.00001531, 100.46457166, 102.93768193, 0.0],
            rate: [0.00000562, -0.00004392, -0.01294668, 35999.37244981, 0.32327364, 0.0],
        },
        Planet::Mars => MeanElements {
            base: [1.52371034, 0.09339410, 1.84969142, -4.55343205, -23.94362959, 49.55953891],
            rate: [0.00001847, 0.00007882, -0.00813131, 19140.30268499, 0.44441088, -0.29257343],
        },
        Planet::Jupiter => MeanElements {
            base: [5.20288700, 0.04838624, 1.30439695, 34.39644051, 14.72847983, 100.47390909],
            rate: [-0.00011607, -0.00013253, -0.00183714, 3034.74612775, 0.21252668, 0.20469106],
        },
        Planet::Saturn => MeanElements {
            base: [9.53667594, 0.05386179, 2.48599187, 49.95424423, 92.59887831, 113.66242448],
            rate: [-0.00125060, -0.00050991, 0.00193609, 1222.49362201, -0.41897216, -0.28867794],
        },
        Planet::Uranus => MeanElements {
            base: [19.18916464, 0.04725744, 0.77263783, 313.23810451, 170.95427630, 74.01692503],
            rate: [-0.00196176, -0.00004397, -0.00242939, 428.48202785, 0.40805281, 0.04240589],
        },
        Planet::Neptune => MeanElements {
            base: [30.06992276, 0.00859048, 1.77004347, -55.12002969, 44.96476227, 131.78422574],
            rate: [0.00026291, 0.00005105, 0.00035372, 218.45945325, -0.32241464, -0.00508664],
        },
        Planet::Pluto => MeanElements {
            base: [39.48211675, 0.24882730, 17.14001206, 238.92903833, 224.06891629, 110.30393684],
            rate: [-0.00031596, 0.00005170, 0.00004818, 145.20780515, -0.04062942, -0.01183482],
        },
    }
}

/// General precession in ecliptic longitude, degrees per Julian century.
/// The mean elements are referred to the J2000 ecliptic; rotating by this
/// brings positions to the ecliptic and equinox of date, consistent with
/// the solar and lunar series.
const PRECESSION_DEG_PER_CENTURY: f64 = 1.39697137;

/// Heliocentric ecliptic-of-date position of a planet, AU.
pub fn heliocentric_position(planet: Planet, jd: JulianDate) -> EclipticCartesian {
    let t = jd.julian_centuries();
    let el = mean_elements(planet);

    let a = el.base[0] + el.rate[0] * t;
    let e = el.base[1] + el.rate[1] * t;
    let incl = el.base[2] + el.rate[2] * t;
    let mean_longitude = el.base[3] + el.rate[3] * t;
    let long_perihelion = el.base[4] + el.rate[4] * t;
    let long_node = el.base[5] + el.rate[5] * t;

    let mean_anomaly = wrap_degrees(mean_longitude - long_perihelion);
    let arg_perihelion = long_perihelion - long_node;

    let j2000 =
        kepler::heliocentric_position(a, e, incl, long_node, arg_perihelion, mean_anomaly)
            .position_au;

    // Precess the equinox from J2000 to date (rotation about the ecliptic
    // pole; the slow tilt of the ecliptic itself is below marker scale).
    let dlon = PRECESSION_DEG_PER_CENTURY * t * skysphere_core::constants::DEG_TO_RAD;
    let (sin_p, cos_p) = libm::sincos(dlon);
    EclipticCartesian::new(
        j2000.x * cos_p - j2000.y * sin_p,
        j2000.x * sin_p + j2000.y * cos_p,
        j2000.z,
    )
}

/// Geocentric ecliptic position of a planet, AU.
pub fn geocentric_position(planet: Planet, jd: JulianDate) -> EclipticCartesian {
    let planet_helio = heliocentric_position(planet, jd);
    let earth_helio = heliocentric_position(Planet::Earth, jd);
    planet_helio.sub(&earth_helio)
}

/// Earth's heliocentric ecliptic position, AU. Exposed for callers that
/// reduce heliocentric minor-body positions to geocentric ones.
pub fn earth_heliocentric(jd: JulianDate) -> EclipticCartesian {
    heliocentric_position(Planet::Earth, jd)
}

/// Apparent visual magnitude from the standard phase-dependent fits.
///
/// `r` heliocentric and `delta` geocentric distances in AU; `sun_distance`
/// is the Earth–Sun distance used for the phase angle. Returns `None` when
/// the geometry degenerates (distances near zero).
pub fn apparent_magnitude(planet: Planet, r: f64, delta: f64, sun_distance: f64) -> Option<f64> {
    if !(r.is_finite() && delta.is_finite()) || r < 1e-6 || delta < 1e-6 {
        return None;
    }

    // Phase angle at the planet (Sun–planet–Earth), degrees.
    let cos_phase =
        ((r * r + delta * delta - sun_distance * sun_distance) / (2.0 * r * delta)).clamp(-1.0, 1.0);
    let i = libm::acos(cos_phase).to_degrees();

    let dist_term = 5.0 * libm::log10(r * delta);
    let mag = match planet {
        Planet::Mercury => -0.42 + dist_term + 0.0380 * i - 0.000273 * i * i + 2.0e-6 * i * i * i,
        Planet::Venus => -4.40 + dist_term + 0.0009 * i + 0.000239 * i * i - 6.5e-7 * i * i * i,
        Planet::Earth => return None,
        Planet::Mars => -1.52 + dist_term + 0.016 * i,
        Planet::Jupiter => -9.40 + dist_term + 0.005 * i,
        Planet::Saturn => -8.88 + dist_term + 0.044 * i,
        Planet::Uranus => -7.19 + dist_term + 0.002 * i,
        Planet::Neptune => -6.87 + dist_term,
        Planet::Pluto => -1.00 + dist_term,
    };

    mag.is_finite().then_some(mag)
}
