//! The engine facade: immutable catalogs in, one [`Scene`] per call out.
//!
//! [`Engine::build_scene`] is a synchronous pure function of the engine's
//! catalogs and its arguments — no I/O, no suspension, no hidden state.
//! Two calls with equal inputs produce equal scenes (the one caveat being
//! satellites: a satellite that dies during a call stays dead, and a dead
//! satellite's output is the constant sentinel, so the determinism
//! contract still holds for every subsequent call).

use crate::events::project_radiant;
use crate::object::{BodyView, MinorBodyView, MoonView, ShowerView};
use crate::processor::{
    assemble_constellations, build_name_index, process_deep_sky, process_stars, SceneHealth,
};
use crate::{ConstellationDisplay, DeepSkyView, ProcessedStar, SkyObject};
use skysphere_catalog::Catalogs;
use skysphere_core::angle::wrap_hours;
use skysphere_core::constants::{MOON_SPHERE_BIAS, SCENE_RADIUS};
use skysphere_core::sidereal::{gmst_hours, lst_hours};
use skysphere_core::transforms::{
    cartesian_to_horizontal, equatorial_to_horizontal, horizontal_to_cartesian, Equatorial,
};
use skysphere_core::{GeoLocation, Instant, Vector3};
use skysphere_ephemeris::{
    apparent_body, kepler, moon_offsets, SolarSystemBody,
};
use skysphere_satellites::TopocentricSatellite;

/// Camera field of view below which individual moons become worth drawing.
pub const MOON_LOD_FOV_DEG: f64 = 40.0;

/// Scene-unit length of one astronomical unit for minor-body markers.
/// Ceres at ~2.8 AU lands around 55 units, inside the star sphere.
const AU_SCENE_SCALE: f64 = 20.0;

/// Options for one scene evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneOptions {
    /// 0 = dark sky, 1 = city core; drives the magnitude limits.
    pub light_pollution: f64,
    pub include_minor_bodies: bool,
    pub include_satellites: bool,
    /// Camera field of view, degrees; drives the moon LOD hint.
    pub camera_fov_deg: f64,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            light_pollution: 0.0,
            include_minor_bodies: true,
            include_satellites: true,
            camera_fov_deg: 60.0,
        }
    }
}

/// One fully evaluated sky. A plain value: scenes never reference the
/// engine or each other.
#[derive(Debug)]
pub struct Scene {
    pub instant: Instant,
    pub observer: GeoLocation,
    /// Local sidereal time used for every transform in this scene, hours.
    pub lst_hours: f64,
    pub stars: Vec<ProcessedStar>,
    pub bodies: Vec<BodyView>,
    pub moons: Vec<MoonView>,
    pub constellations: Vec<ConstellationDisplay>,
    pub deep_sky: Vec<DeepSkyView>,
    pub meteor_showers: Vec<ShowerView>,
    pub minor_bodies: Vec<MinorBodyView>,
    pub satellites: Vec<TopocentricSatellite>,
    pub health: SceneHealth,
}

impl Scene {
    /// Iterates every object in the scene as the tagged sum.
    pub fn objects(&self) -> impl Iterator<Item = SkyObject<'_>> {
        self.stars
            .iter()
            .map(SkyObject::Star)
            .chain(self.bodies.iter().map(SkyObject::Body))
            .chain(self.moons.iter().map(SkyObject::Moon))
            .chain(self.deep_sky.iter().map(SkyObject::DeepSky))
            .chain(self.meteor_showers.iter().map(SkyObject::Meteor))
            .chain(self.minor_bodies.iter().map(SkyObject::MinorBody))
            .chain(self.satellites.iter().map(SkyObject::Satellite))
            .chain(self.constellations.iter().map(SkyObject::Constellation))
    }
}

/// The process-wide engine: immutable catalogs behind an explicit handle.
pub struct Engine {
    catalogs: Catalogs,
}

impl Engine {
    /// Wraps a loaded catalog set. The catalogs are immutable from here on.
    pub fn new(catalogs: Catalogs) -> Self {
        Self { catalogs }
    }

    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    /// Upcoming phases, solstices, equinoxes, and shower peaks from the
    /// engine's shower table. See [`crate::events::upcoming_events`].
    pub fn upcoming_events(
        &self,
        from: &Instant,
        days_ahead: f64,
    ) -> Vec<crate::events::AstronomicalEvent> {
        crate::events::upcoming_events(self.catalogs.meteor_showers, from, days_ahead)
    }

    /// Evaluates the full scene for one observer and instant.
    pub fn build_scene(
        &self,
        observer: &GeoLocation,
        instant: &Instant,
        options: &SceneOptions,
    ) -> Scene {
        let jd = instant.julian_date();
        let gmst = gmst_hours(jd);
        let lst = lst_hours(gmst, observer.longitude_deg());
        let mut health = SceneHealth::default();

        let stars = process_stars(
            &self.catalogs.stars,
            observer.latitude_deg(),
            lst,
            options.light_pollution,
            &mut health,
        );

        let name_index = build_name_index(&stars);
        let constellations =
            assemble_constellations(self.catalogs.constellations, &stars, &name_index);

        let deep_sky = process_deep_sky(
            &self.catalogs.deep_sky,
            observer.latitude_deg(),
            lst,
            options.light_pollution,
            &mut health,
        );

        let (bodies, moons) = self.build_bodies(observer, jd, lst, options);

        let meteor_showers: Vec<ShowerView> = self
            .catalogs
            .meteor_showers
            .iter()
            .map(|shower| project_radiant(shower, observer, instant))
            .collect();

        let minor_bodies = if options.include_minor_bodies {
            self.build_minor_bodies(jd, &mut health)
        } else {
            Vec::new()
        };

        let satellites = if options.include_satellites {
            self.build_satellites(observer, instant, gmst, &mut health)
        } else {
            Vec::new()
        };

        log::debug!(
            "scene {} @ {}: {}/{} stars, {} drops ({:?})",
            observer,
            instant,
            health.stars_out,
            health.stars_in,
            health.stars_in - health.stars_out,
            health.drops_by_reason
        );

        Scene {
            instant: *instant,
            observer: *observer,
            lst_hours: lst,
            stars,
            bodies,
            moons,
            constellations,
            deep_sky,
            meteor_showers,
            minor_bodies,
            satellites,
            health,
        }
    }

    fn build_bodies(
        &self,
        observer: &GeoLocation,
        jd: skysphere_core::JulianDate,
        lst: f64,
        options: &SceneOptions,
    ) -> (Vec<BodyView>, Vec<MoonView>) {
        let mut bodies = Vec::with_capacity(SolarSystemBody::ALL.len());
        let mut moons = Vec::new();
        let moons_in_lod = options.camera_fov_deg < MOON_LOD_FOV_DEG;

        for body in SolarSystemBody::ALL {
            let state = apparent_body(body, jd);
            let altaz =
                equatorial_to_horizontal(&state.equatorial, observer.latitude_deg(), lst);
            let position = horizontal_to_cartesian(&altaz, SCENE_RADIUS);

            // Bodies are never dropped; a degenerate computation parks the
            // marker at the sentinel instead.
            let view = if position.is_finite() {
                BodyView {
                    body,
                    name: body.name(),
                    altaz,
                    position,
                    is_visible: true,
                    magnitude: state.magnitude.filter(|m| m.is_finite()),
                    phase_deg: state.phase_deg,
                    distance_au: state.distance_au,
                }
            } else {
                BodyView {
                    body,
                    name: body.name(),
                    altaz: skysphere_core::Horizontal::new(-90.0, 0.0),
                    position: Vector3::sentinel(SCENE_RADIUS),
                    is_visible: false,
                    magnitude: None,
                    phase_deg: None,
                    distance_au: state.distance_au,
                }
            };

            let parent_index = bodies.len();
            for offset in moon_offsets(body, jd, state.distance_au) {
                // Sky-plane arcseconds back to equatorial offsets; the RA
                // offset grows with 1/cos(dec) toward the poles.
                let cos_dec = libm::cos(state.equatorial.dec_deg.to_radians()).max(1e-6);
                let moon_eq = Equatorial::new(
                    wrap_hours(
                        state.equatorial.ra_hours + offset.east_arcsec / (3600.0 * 15.0) / cos_dec,
                    ),
                    state.equatorial.dec_deg + offset.north_arcsec / 3600.0,
                );
                let moon_altaz =
                    equatorial_to_horizontal(&moon_eq, observer.latitude_deg(), lst);
                let moon_position =
                    horizontal_to_cartesian(&moon_altaz, SCENE_RADIUS * MOON_SPHERE_BIAS);
                if !moon_position.is_finite() {
                    continue;
                }
                moons.push(MoonView {
                    name: offset.name,
                    parent_index,
                    altaz: moon_altaz,
                    position: moon_position,
                    is_visible: moons_in_lod,
                    magnitude: offset.magnitude,
                    fidelity: offset.fidelity,
                });
            }

            bodies.push(view);
        }

        (bodies, moons)
    }

    fn build_minor_bodies(
        &self,
        jd: skysphere_core::JulianDate,
        health: &mut SceneHealth,
    ) -> Vec<MinorBodyView> {
        let mut views = Vec::with_capacity(self.catalogs.minor_bodies.len());
        for record in &self.catalogs.minor_bodies {
            let state = kepler::propagate_elements(&record.elements, jd);
            if !state.converged {
                health.drops_by_reason.kepler_non_convergence += 1;
            }
            let position = kepler::heliocentric_to_scene(&state.position_au, AU_SCENE_SCALE);
            if !position.is_finite() {
                health.drops_by_reason.non_finite += 1;
                continue;
            }
            let altaz = cartesian_to_horizontal(&position);
            views.push(MinorBodyView {
                name: record.name.clone(),
                altaz,
                position,
                is_visible: state.converged && altaz.is_above_horizon(),
                heliocentric_distance_au: state.radius_au,
            });
        }
        views
    }

    fn build_satellites(
        &self,
        observer: &GeoLocation,
        instant: &Instant,
        gmst: f64,
        health: &mut SceneHealth,
    ) -> Vec<TopocentricSatellite> {
        let mut views = Vec::with_capacity(self.catalogs.satellites.len());
        for satellite in &self.catalogs.satellites {
            let topo = satellite.topocentric(observer, instant, gmst);
            if satellite.is_dead() {
                health.drops_by_reason.dead_satellites += 1;
            }
            views.push(topo);
        }
        views
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Engine {
        Engine::new(Catalogs::bundled().expect("bundled catalogs load"))
    }

    fn observer() -> GeoLocation {
        GeoLocation::new(37.77, -122.42).unwrap()
    }

    fn instant() -> Instant {
        Instant::from_ymd_hms(2024, 9, 1, 6, 0, 0).unwrap()
    }

    #[test]
    fn scene_has_every_layer() {
        let scene = engine().build_scene(&observer(), &instant(), &SceneOptions::default());
        assert!(!scene.stars.is_empty());
        assert_eq!(scene.bodies.len(), 10);
        assert!(!scene.moons.is_empty());
        assert_eq!(scene.constellations.len(), 14);
        assert!(!scene.deep_sky.is_empty());
        assert_eq!(scene.meteor_showers.len(), 10);
        assert!(!scene.minor_bodies.is_empty());
        assert!(!scene.satellites.is_empty());
    }

    #[test]
    fn options_disable_optional_layers() {
        let options = SceneOptions {
            include_minor_bodies: false,
            include_satellites: false,
            ..SceneOptions::default()
        };
        let scene = engine().build_scene(&observer(), &instant(), &options);
        assert!(scene.minor_bodies.is_empty());
        assert!(scene.satellites.is_empty());
        assert!(!scene.stars.is_empty());
    }

    #[test]
    fn bodies_are_always_flagged_visible() {
        let scene = engine().build_scene(&observer(), &instant(), &SceneOptions::default());
        for body in &scene.bodies {
            assert!(body.is_visible, "{} must stay selectable", body.name);
            assert!(body.position.is_finite());
        }
    }

    #[test]
    fn moon_lod_follows_camera_fov() {
        let eng = engine();
        let wide = eng.build_scene(
            &observer(),
            &instant(),
            &SceneOptions {
                camera_fov_deg: 60.0,
                ..SceneOptions::default()
            },
        );
        assert!(wide.moons.iter().all(|m| !m.is_visible));

        let narrow = eng.build_scene(
            &observer(),
            &instant(),
            &SceneOptions {
                camera_fov_deg: 10.0,
                ..SceneOptions::default()
            },
        );
        assert!(narrow.moons.iter().all(|m| m.is_visible));
    }

    #[test]
    fn moons_sit_inside_the_star_sphere_and_point_at_parents() {
        let scene = engine().build_scene(&observer(), &instant(), &SceneOptions::default());
        for moon in &scene.moons {
            assert!(
                (moon.position.length() - SCENE_RADIUS * MOON_SPHERE_BIAS).abs() < 1e-6,
                "{} radius {}",
                moon.name,
                moon.position.length()
            );
            let parent = &scene.bodies[moon.parent_index];
            // A moon's marker stays within a degree of its parent.
            let dot = moon.position.dot(&parent.position)
                / (moon.position.length() * parent.position.length());
            assert!(dot > 0.999, "{} strayed from {}", moon.name, parent.name);
        }
    }

    #[test]
    fn determinism_for_equal_inputs() {
        let eng = engine();
        let options = SceneOptions::default();
        let a = eng.build_scene(&observer(), &instant(), &options);
        let b = eng.build_scene(&observer(), &instant(), &options);

        assert_eq!(a.stars, b.stars);
        assert_eq!(a.bodies, b.bodies);
        assert_eq!(a.moons, b.moons);
        assert_eq!(a.deep_sky, b.deep_sky);
        assert_eq!(a.meteor_showers, b.meteor_showers);
        assert_eq!(a.minor_bodies, b.minor_bodies);
        assert_eq!(a.satellites, b.satellites);
        assert_eq!(a.health, b.health);
    }

    #[test]
    fn health_accounts_for_every_star() {
        let eng = engine();
        let options = SceneOptions {
            light_pollution: 1.0,
            ..SceneOptions::default()
        };
        let scene = eng.build_scene(&observer(), &instant(), &options);
        let dropped = scene.health.drops_by_reason.light_pollution
            + scene.health.drops_by_reason.non_finite;
        assert_eq!(scene.health.stars_in, scene.health.stars_out + dropped);
        assert!(
            scene.health.drops_by_reason.light_pollution > 0,
            "city sky should drop faint bundled stars"
        );
    }

    #[test]
    fn objects_iterator_covers_all_layers() {
        let scene = engine().build_scene(&observer(), &instant(), &SceneOptions::default());
        let total = scene.stars.len()
            + scene.bodies.len()
            + scene.moons.len()
            + scene.deep_sky.len()
            + scene.meteor_showers.len()
            + scene.minor_bodies.len()
            + scene.satellites.len()
            + scene.constellations.len();
        assert_eq!(scene.objects().count(), total);
    }
}
