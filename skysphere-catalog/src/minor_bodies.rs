//! Minor-planet orbital elements.
//!
//! The network source is the JPL Small-Body Database query API, which
//! returns `{"fields": [...], "data": [[...], ...]}` with every value as a
//! string. Rows that fail to parse are skipped and counted. The bundled
//! fallback carries the big four plus a handful of bright main-belt
//! asteroids, J2000-epoch elements.

use crate::error::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};
use skysphere_ephemeris::OrbitalElements;

/// A named minor planet with its Keplerian elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinorBodyRecord {
    pub name: String,
    pub elements: OrbitalElements,
}

#[derive(Debug, Deserialize)]
struct SbdbResponse {
    data: Vec<Vec<serde_json::Value>>,
}

fn field_f64(row: &[serde_json::Value], idx: usize) -> Option<f64> {
    let value = row.get(idx)?;
    if let Some(n) = value.as_f64() {
        return Some(n);
    }
    value.as_str()?.trim().parse().ok()
}

/// Parses a JPL SBDB query response with the field order
/// `full_name, a, e, i, om, w, ma, n, epoch`.
///
/// Returns the parsed bodies and the number of skipped rows.
pub fn parse_sbdb(text: &str) -> CatalogResult<(Vec<MinorBodyRecord>, u64)> {
    let response: SbdbResponse = serde_json::from_str(text)
        .map_err(|e| CatalogError::parse("SBDB", e.to_string()))?;

    let mut bodies = Vec::with_capacity(response.data.len());
    let mut skipped = 0u64;

    for row in &response.data {
        let name = row
            .first()
            .and_then(|v| v.as_str())
            .map(|s| s.trim().to_string())
            .unwrap_or_default();

        let parsed = (|| {
            let a = field_f64(row, 1)?;
            let e = field_f64(row, 2)?;
            let i = field_f64(row, 3)?;
            let om = field_f64(row, 4)?;
            let w = field_f64(row, 5)?;
            let ma = field_f64(row, 6)?;
            let n = field_f64(row, 7)?;
            let epoch = field_f64(row, 8)?;
            if name.is_empty() || !(0.0..1.0).contains(&e) || a <= 0.0 {
                return None;
            }
            Some(OrbitalElements {
                semi_major_axis_au: a,
                eccentricity: e,
                inclination_deg: i,
                ascending_node_deg: om,
                arg_perihelion_deg: w,
                mean_anomaly_deg: ma,
                epoch_jd: epoch,
                mean_motion_deg_day: n,
            })
        })();

        match parsed {
            Some(elements) => bodies.push(MinorBodyRecord {
                name: name.clone(),
                elements,
            }),
            None => skipped += 1,
        }
    }

    if bodies.is_empty() {
        return Err(CatalogError::parse("SBDB", "no usable rows"));
    }
    Ok((bodies, skipped))
}

/// Bundled main-belt sample: the big four and other bright asteroids,
/// J2000 osculating elements.
pub fn bundled_minor_bodies() -> Vec<MinorBodyRecord> {
    let raw: [(&str, f64, f64, f64, f64, f64, f64, f64); 6] = [
        // name, a, e, i, node, peri, M at J2000, n
        ("1 Ceres", 2.7675, 0.0789, 10.583, 80.494, 73.92, 6.77, 0.21411),
        ("2 Pallas", 2.7730, 0.2299, 34.846, 173.166, 310.45, 273.80, 0.21343),
        ("3 Juno", 2.6682, 0.2579, 12.971, 170.125, 247.84, 115.41, 0.22612),
        ("4 Vesta", 2.3614, 0.0895, 7.134, 103.926, 150.17, 43.33, 0.27154),
        ("6 Hebe", 2.4254, 0.2017, 14.754, 138.748, 239.50, 247.95, 0.26086),
        ("7 Iris", 2.3857, 0.2296, 5.527, 259.728, 145.27, 132.19, 0.26744),
    ];

    raw.iter()
        .map(|&(name, a, e, i, node, peri, ma, n)| MinorBodyRecord {
            name: name.to_string(),
            elements: OrbitalElements {
                semi_major_axis_au: a,
                eccentricity: e,
                inclination_deg: i,
                ascending_node_deg: node,
                arg_perihelion_deg: peri,
                mean_anomaly_deg: ma,
                epoch_jd: skysphere_core::constants::J2000_JD,
                mean_motion_deg_day: n,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sbdb_rows() {
        let json = r#"{
            "fields": ["full_name","a","e","i","om","w","ma","n","epoch"],
            "data": [
                ["   1 Ceres (A801 AA)", "2.767", "0.0789", "10.58", "80.49", "73.92", "6.77", "0.214", "2451545.0"],
                ["   4 Vesta (A807 FA)", "2.361", "0.0895", "7.13", "103.9", "150.2", "43.3", "0.2715", "2451545.0"]
            ]
        }"#;
        let (bodies, skipped) = parse_sbdb(json).unwrap();
        assert_eq!(bodies.len(), 2);
        assert_eq!(skipped, 0);
        assert_eq!(bodies[0].name, "1 Ceres (A801 AA)");
        assert!((bodies[0].elements.semi_major_axis_au - 2.767).abs() < 1e-9);
    }

    #[test]
    fn numeric_json_values_also_parse() {
        let json = r#"{"data": [["5 Astraea", 2.574, 0.191, 5.37, 141.6, 358.7, 280.3, 0.238, 2451545.0]]}"#;
        let (bodies, _) = parse_sbdb(json).unwrap();
        assert_eq!(bodies.len(), 1);
    }

    #[test]
    fn bad_rows_are_skipped() {
        let json = r#"{
            "data": [
                ["1 Ceres", "2.767", "0.0789", "10.58", "80.49", "73.92", "6.77", "0.214", "2451545.0"],
                ["Broken", "x", "y", "z", "1", "2", "3", "4", "5"],
                ["Hyperbolic", "2.0", "1.5", "1", "2", "3", "4", "5", "2451545.0"]
            ]
        }"#;
        let (bodies, skipped) = parse_sbdb(json).unwrap();
        assert_eq!(bodies.len(), 1);
        assert_eq!(skipped, 2);
    }

    #[test]
    fn empty_data_is_fatal() {
        assert!(parse_sbdb(r#"{"data": []}"#).is_err());
        assert!(parse_sbdb("nonsense").is_err());
    }

    #[test]
    fn bundled_elements_are_physical() {
        let bodies = bundled_minor_bodies();
        assert_eq!(bodies.len(), 6);
        for body in &bodies {
            let el = &body.elements;
            assert!(el.semi_major_axis_au > 2.0 && el.semi_major_axis_au < 3.5);
            assert!((0.0..0.3).contains(&el.eccentricity));
            assert!(el.mean_motion_deg_day > 0.0);
            // Kepler's third law, loosely: n ~ 360/(365.25 * a^1.5).
            let expected_n = 360.0 / (365.25 * el.semi_major_axis_au.powf(1.5));
            assert!(
                (el.mean_motion_deg_day - expected_n).abs() / expected_n < 0.02,
                "{}: n {} vs Kepler {}",
                body.name,
                el.mean_motion_deg_day,
                expected_n
            );
        }
    }
}
