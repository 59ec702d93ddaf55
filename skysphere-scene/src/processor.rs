//! The per-instant star and deep-sky pipeline.
//!
//! Stars travel: equatorial → horizontal → Cartesian, pick up display
//! attributes from their magnitude and spectral class, pass the
//! light-pollution filter, and — the one non-negotiable step — the finite
//! position check. Downstream renderers index buffers straight from these
//! positions; a single NaN would poison a whole draw call, so anything
//! non-finite is dropped here and counted in [`SceneHealth`].
//!
//! The per-star loop runs on rayon with an order-preserving collect: the
//! name index built afterwards must see stars in catalog order so that the
//! brightest holder of a name wins collisions.

use crate::object::{ConstellationDisplay, DeepSkyView, ProcessedStar};
use rayon::prelude::*;
use skysphere_catalog::constellations::ConstellationFigure;
use skysphere_catalog::deepsky::DeepSkyRecord;
use skysphere_catalog::StarRecord;
use skysphere_core::constants::SCENE_RADIUS;
use skysphere_core::transforms::{equatorial_to_horizontal, horizontal_to_cartesian, Equatorial};
use skysphere_core::Vector3;
use std::collections::HashMap;

/// Brightest magnitude of the display ramp.
const RAMP_BRIGHT_MAG: f64 = -1.5;
/// Span of the display ramp in magnitudes.
const RAMP_SPAN_MAG: f64 = 6.5;

/// Per-scene drop accounting, grouped by reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropCounters {
    pub light_pollution: u64,
    pub non_finite: u64,
    pub deep_sky_filtered: u64,
    pub deep_sky_non_finite: u64,
    pub kepler_non_convergence: u64,
    pub dead_satellites: u64,
}

/// Scene-level diagnostics attached to every scene.
///
/// Per-entry failures never fail a scene; they show up here as counters
/// and shorter sublists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneHealth {
    pub stars_in: u64,
    pub stars_out: u64,
    pub drops_by_reason: DropCounters,
}

/// Star color by spectral class initial, the conventional O-through-S map.
pub fn spectral_to_color(class_initial: char) -> &'static str {
    match class_initial.to_ascii_uppercase() {
        'O' => "#9bb2ff",
        'B' => "#aabfff",
        'A' => "#cad8ff",
        'F' => "#fbf8ff",
        'G' => "#fff4e8",
        'K' => "#ffddb4",
        'M' => "#ffbd6f",
        'L' => "#ff9d66",
        'T' => "#ff7853",
        'C' => "#ff4500",
        'S' => "#ffc676",
        _ => "#ffffff",
    }
}

#[inline]
fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Normalized brightness ramp position: 0 at magnitude −1.5, 1 at +5.
#[inline]
fn magnitude_ramp(mag: f64) -> f64 {
    ((mag - RAMP_BRIGHT_MAG) / RAMP_SPAN_MAG).clamp(0.0, 1.0)
}

/// Marker size for a star of the given magnitude.
pub fn star_size(mag: f64) -> f64 {
    lerp(0.8, 0.15, magnitude_ramp(mag))
}

/// Marker opacity for a star of the given magnitude.
pub fn star_opacity(mag: f64) -> f64 {
    lerp(1.0, 0.4, magnitude_ramp(mag))
}

/// Star magnitude limit under the given light pollution `[0, 1]`.
pub fn star_magnitude_limit(light_pollution: f64) -> f64 {
    6.5 - light_pollution.clamp(0.0, 1.0) * 3.5
}

/// Deep-sky magnitude limit under the given light pollution `[0, 1]`.
pub fn deep_sky_magnitude_limit(light_pollution: f64) -> f64 {
    7.0 - light_pollution.clamp(0.0, 1.0) * 4.0
}

enum StarOutcome {
    Kept(Box<ProcessedStar>),
    TooFaint,
    NonFinite,
}

fn process_one_star(
    record: &StarRecord,
    latitude_deg: f64,
    lst_hours: f64,
    mag_limit: f64,
) -> StarOutcome {
    if record.apparent_mag > mag_limit {
        return StarOutcome::TooFaint;
    }

    let eq = Equatorial::new(record.ra_hours, record.dec_deg);
    let altaz = equatorial_to_horizontal(&eq, latitude_deg, lst_hours);
    let position = horizontal_to_cartesian(&altaz, SCENE_RADIUS);

    if !position.is_finite() || !altaz.altitude_deg.is_finite() || !altaz.azimuth_deg.is_finite() {
        return StarOutcome::NonFinite;
    }

    let class_initial = record.spectral_class.chars().next().unwrap_or('G');
    StarOutcome::Kept(Box::new(ProcessedStar {
        star: record.clone(),
        altaz,
        position,
        is_visible: altaz.is_above_horizon(),
        color: spectral_to_color(class_initial),
        size: star_size(record.apparent_mag),
        opacity: star_opacity(record.apparent_mag),
    }))
}

/// Runs the star pipeline for one `(observer latitude, lst)` pair.
///
/// Output order matches catalog order even though the loop is parallel.
pub fn process_stars(
    records: &[StarRecord],
    latitude_deg: f64,
    lst_hours: f64,
    light_pollution: f64,
    health: &mut SceneHealth,
) -> Vec<ProcessedStar> {
    let mag_limit = star_magnitude_limit(light_pollution);
    health.stars_in = records.len() as u64;

    let outcomes: Vec<StarOutcome> = records
        .par_iter()
        .map(|record| process_one_star(record, latitude_deg, lst_hours, mag_limit))
        .collect();

    let mut stars = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        match outcome {
            StarOutcome::Kept(star) => stars.push(*star),
            StarOutcome::TooFaint => health.drops_by_reason.light_pollution += 1,
            StarOutcome::NonFinite => health.drops_by_reason.non_finite += 1,
        }
    }
    health.stars_out = stars.len() as u64;
    stars
}

/// Runs the deep-sky pipeline.
pub fn process_deep_sky(
    records: &[DeepSkyRecord],
    latitude_deg: f64,
    lst_hours: f64,
    light_pollution: f64,
    health: &mut SceneHealth,
) -> Vec<DeepSkyView> {
    let mag_limit = deep_sky_magnitude_limit(light_pollution);
    let mut views = Vec::with_capacity(records.len());

    for record in records {
        if record.magnitude > mag_limit {
            health.drops_by_reason.deep_sky_filtered += 1;
            continue;
        }
        let eq = Equatorial::new(record.ra_hours, record.dec_deg);
        let altaz = equatorial_to_horizontal(&eq, latitude_deg, lst_hours);
        let position = horizontal_to_cartesian(&altaz, SCENE_RADIUS);
        if !position.is_finite() {
            health.drops_by_reason.deep_sky_non_finite += 1;
            continue;
        }
        views.push(DeepSkyView {
            id: record.id.clone(),
            name: record.name.clone(),
            kind: record.kind,
            altaz,
            position,
            is_visible: altaz.is_above_horizon(),
            magnitude: record.magnitude,
            size_arcmin: record.size_arcmin,
            constellation: record.constellation.clone(),
            description: record.description.clone(),
        });
    }
    views
}

/// Case-insensitive name index over the processed stars.
///
/// Built in catalog order with first-wins semantics: the catalog is sorted
/// brightest-first, so a name collision resolves to the brighter star.
pub fn build_name_index(stars: &[ProcessedStar]) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(stars.len());
    for (i, star) in stars.iter().enumerate() {
        index.entry(star.star.name.to_lowercase()).or_insert(i);
    }
    index
}

/// Assembles constellation figures from the processed-star index.
///
/// A segment is emitted only when both endpoints resolve; a figure with no
/// resolved segments is still emitted (empty, invisible) so consumers can
/// enumerate the full set.
pub fn assemble_constellations(
    figures: &[ConstellationFigure],
    stars: &[ProcessedStar],
    index: &HashMap<String, usize>,
) -> Vec<ConstellationDisplay> {
    figures
        .iter()
        .map(|figure| {
            let mut segments = Vec::with_capacity(figure.segments.len());
            let mut endpoint_sum = Vector3::ZERO;
            let mut endpoint_count = 0usize;
            let mut any_visible = false;

            for (a, b) in figure.segments {
                let resolved = index
                    .get(&a.to_lowercase())
                    .zip(index.get(&b.to_lowercase()));
                let Some((&ia, &ib)) = resolved else {
                    continue;
                };
                let (sa, sb) = (&stars[ia], &stars[ib]);
                segments.push((sa.position, sb.position));
                endpoint_sum = endpoint_sum.add(&sa.position).add(&sb.position);
                endpoint_count += 2;
                any_visible |= sa.is_visible || sb.is_visible;
            }

            let label_position = if endpoint_count > 0 {
                endpoint_sum
                    .scale(1.0 / endpoint_count as f64)
                    .with_length(SCENE_RADIUS)
            } else {
                Vector3::sentinel(SCENE_RADIUS)
            };

            ConstellationDisplay {
                name: figure.name,
                abbreviation: figure.abbreviation,
                segments,
                label_position,
                is_visible: any_visible,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star(id: i64, name: &str, ra: f64, dec: f64, mag: f64, spect: &str) -> StarRecord {
        StarRecord {
            id,
            name: name.to_string(),
            ra_hours: ra,
            dec_deg: dec,
            apparent_mag: mag,
            spectral_class: spect.to_string(),
        }
    }

    #[test]
    fn display_ramp_endpoints() {
        // Brightest: big and opaque. Faintest: small and dim.
        assert!((star_size(-1.5) - 0.8).abs() < 1e-12);
        assert!((star_opacity(-1.5) - 1.0).abs() < 1e-12);
        assert!((star_size(5.0) - 0.15).abs() < 1e-12);
        assert!((star_opacity(5.0) - 0.4).abs() < 1e-12);
        // Beyond the ramp: clamped.
        assert_eq!(star_size(-4.0), star_size(-1.5));
        assert_eq!(star_size(9.0), star_size(5.0));
    }

    #[test]
    fn spectral_colors_cover_the_sequence() {
        for class in ['O', 'B', 'A', 'F', 'G', 'K', 'M', 'L', 'T', 'C', 'S'] {
            let color = spectral_to_color(class);
            assert!(color.starts_with('#') && color.len() == 7, "{}", class);
        }
        assert_eq!(spectral_to_color('o'), spectral_to_color('O'));
        assert_eq!(spectral_to_color('X'), "#ffffff");
    }

    #[test]
    fn light_pollution_limits() {
        assert_eq!(star_magnitude_limit(0.0), 6.5);
        assert_eq!(star_magnitude_limit(1.0), 3.0);
        assert_eq!(deep_sky_magnitude_limit(0.0), 7.0);
        assert_eq!(deep_sky_magnitude_limit(1.0), 3.0);
        // Out-of-range inputs clamp instead of inverting the filter.
        assert_eq!(star_magnitude_limit(7.0), 3.0);
        assert_eq!(star_magnitude_limit(-2.0), 6.5);
    }

    #[test]
    fn stars_keep_catalog_order() {
        let records = vec![
            star(1, "A", 0.0, 10.0, 0.0, "A0"),
            star(2, "B", 6.0, 20.0, 1.0, "G2"),
            star(3, "C", 12.0, 30.0, 2.0, "M5"),
        ];
        let mut health = SceneHealth::default();
        let stars = process_stars(&records, 45.0, 0.0, 0.0, &mut health);
        let names: Vec<&str> = stars.iter().map(|s| s.star.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert_eq!(health.stars_in, 3);
        assert_eq!(health.stars_out, 3);
    }

    #[test]
    fn city_sky_filters_faint_stars() {
        let records = vec![
            star(1, "Bright", 0.0, 10.0, 1.0, "A0"),
            star(2, "Faint", 6.0, 20.0, 5.5, "G2"),
        ];
        let mut health = SceneHealth::default();
        let stars = process_stars(&records, 45.0, 0.0, 1.0, &mut health);
        assert_eq!(stars.len(), 1);
        assert_eq!(stars[0].star.name, "Bright");
        assert_eq!(health.drops_by_reason.light_pollution, 1);
    }

    #[test]
    fn non_finite_input_is_quarantined() {
        let records = vec![
            star(1, "Good", 0.0, 10.0, 1.0, "A0"),
            star(2, "Bad", f64::NAN, 20.0, 1.0, "G2"),
        ];
        let mut health = SceneHealth::default();
        let stars = process_stars(&records, 45.0, 0.0, 0.0, &mut health);
        assert_eq!(stars.len(), 1);
        assert_eq!(health.drops_by_reason.non_finite, 1);
        for s in &stars {
            assert!(s.position.is_finite());
        }
    }

    #[test]
    fn visibility_tracks_altitude() {
        // From lat 90, positive declinations are up, negative are down.
        let records = vec![
            star(1, "Up", 0.0, 45.0, 1.0, "A0"),
            star(2, "Down", 0.0, -45.0, 1.0, "A0"),
        ];
        let mut health = SceneHealth::default();
        let stars = process_stars(&records, 90.0, 0.0, 0.0, &mut health);
        assert!(stars[0].is_visible);
        assert!(!stars[1].is_visible);
    }

    #[test]
    fn name_index_prefers_the_brighter_collision() {
        let records = vec![
            star(1, "Twin", 0.0, 10.0, 0.5, "A0"),
            star(2, "Twin", 6.0, 20.0, 3.0, "G2"),
        ];
        let mut health = SceneHealth::default();
        let stars = process_stars(&records, 45.0, 0.0, 0.0, &mut health);
        let index = build_name_index(&stars);
        assert_eq!(index.len(), 1);
        assert_eq!(index["twin"], 0, "catalog order (brightest first) wins");
    }

    #[test]
    fn constellation_segments_require_both_endpoints() {
        let records = vec![
            star(1, "Alpha", 0.0, 10.0, 1.0, "A0"),
            star(2, "Beta", 1.0, 12.0, 1.5, "G2"),
        ];
        let mut health = SceneHealth::default();
        let stars = process_stars(&records, 45.0, 3.0, 0.0, &mut health);
        let index = build_name_index(&stars);

        let figures = [ConstellationFigure {
            name: "Testellation",
            abbreviation: "Tst",
            segments: &[("Alpha", "Beta"), ("Beta", "Gamma")],
        }];
        let displays = assemble_constellations(&figures, &stars, &index);
        assert_eq!(displays.len(), 1);
        // The Gamma segment silently dropped.
        assert_eq!(displays[0].segments.len(), 1);
        assert!((displays[0].label_position.length() - SCENE_RADIUS).abs() < 1e-9);
    }

    #[test]
    fn empty_figure_is_invisible_at_sentinel() {
        let figures = [ConstellationFigure {
            name: "Ghost",
            abbreviation: "Gho",
            segments: &[("Nobody", "Home")],
        }];
        let displays = assemble_constellations(&figures, &[], &HashMap::new());
        assert!(!displays[0].is_visible);
        assert!(displays[0].segments.is_empty());
        assert_eq!(displays[0].label_position, Vector3::sentinel(SCENE_RADIUS));
    }

    #[test]
    fn deep_sky_filtering_and_quarantine() {
        use skysphere_catalog::deepsky::DeepSkyKind;
        let records = vec![
            DeepSkyRecord {
                id: "M 31".into(),
                name: "Andromeda".into(),
                kind: DeepSkyKind::Galaxy,
                ra_hours: 0.712,
                dec_deg: 41.27,
                magnitude: 3.4,
                size_arcmin: 178.0,
                constellation: "And".into(),
                description: String::new(),
            },
            DeepSkyRecord {
                id: "faint".into(),
                name: "Faint".into(),
                kind: DeepSkyKind::Nebula,
                ra_hours: 1.0,
                dec_deg: 0.0,
                magnitude: 9.5,
                size_arcmin: 1.0,
                constellation: String::new(),
                description: String::new(),
            },
        ];
        let mut health = SceneHealth::default();
        let views = process_deep_sky(&records, 45.0, 0.0, 0.0, &mut health);
        assert_eq!(views.len(), 1);
        assert_eq!(health.drops_by_reason.deep_sky_filtered, 1);
        assert_eq!(views[0].id, "M 31");
    }
}
