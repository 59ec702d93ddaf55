//! Processed scene objects and the capability they share.
//!
//! Every per-instant object carries the same positional triple — horizontal
//! coordinates, a scene-sphere position, and a visibility flag — exposed
//! through the [`Positioned`] trait. Generic consumers (search, view
//! queries, the renderer's culling) program against the trait; anything
//! that needs the specifics matches on [`SkyObject`].

use skysphere_catalog::deepsky::DeepSkyKind;
use skysphere_catalog::StarRecord;
use skysphere_ephemeris::{MoonFidelity, SolarSystemBody};
use skysphere_satellites::TopocentricSatellite;
use skysphere_core::{Horizontal, Vector3};

/// The positional capability common to every processed object.
pub trait Positioned {
    fn altaz(&self) -> Horizontal;
    fn position(&self) -> Vector3;
    fn is_visible(&self) -> bool;
}

/// A catalog star evaluated for one observer and instant.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedStar {
    pub star: StarRecord,
    pub altaz: Horizontal,
    pub position: Vector3,
    pub is_visible: bool,
    /// Display color resolved from the spectral class, `#rrggbb`.
    pub color: &'static str,
    pub size: f64,
    pub opacity: f64,
}

/// A Solar System body on the celestial sphere.
///
/// Always emitted and always `is_visible` — the renderer styles
/// below-horizon bodies rather than dropping them, so a selected planet
/// can be navigated to at any time. The one exception is a non-finite
/// computation, which parks the body at the sentinel with
/// `is_visible = false`.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyView {
    pub body: SolarSystemBody,
    pub name: &'static str,
    pub altaz: Horizontal,
    pub position: Vector3,
    pub is_visible: bool,
    pub magnitude: Option<f64>,
    /// Lunar phase angle `[0, 360)`; Moon only.
    pub phase_deg: Option<f64>,
    pub distance_au: f64,
}

/// A natural satellite, positioned relative to its parent planet.
#[derive(Debug, Clone, PartialEq)]
pub struct MoonView {
    pub name: &'static str,
    /// Index of the parent in [`crate::Scene::bodies`]. An index, not a
    /// reference, to keep the scene a flat value.
    pub parent_index: usize,
    pub altaz: Horizontal,
    pub position: Vector3,
    /// Level-of-detail hint: true when the camera is zoomed in far enough
    /// for moons to be distinguishable. A hint, not a hard filter.
    pub is_visible: bool,
    pub magnitude: f64,
    pub fidelity: MoonFidelity,
}

/// A deep-sky object evaluated for one observer and instant.
#[derive(Debug, Clone, PartialEq)]
pub struct DeepSkyView {
    pub id: String,
    pub name: String,
    pub kind: DeepSkyKind,
    pub altaz: Horizontal,
    pub position: Vector3,
    pub is_visible: bool,
    pub magnitude: f64,
    pub size_arcmin: f64,
    pub constellation: String,
    pub description: String,
}

/// A constellation stick figure assembled from processed stars.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstellationDisplay {
    pub name: &'static str,
    pub abbreviation: &'static str,
    /// Resolved line segments; segments with an unresolved endpoint are
    /// silently absent.
    pub segments: Vec<(Vector3, Vector3)>,
    pub label_position: Vector3,
    pub is_visible: bool,
}

/// A meteor-shower radiant projected onto the observer's sky.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowerView {
    pub id: &'static str,
    pub name: &'static str,
    pub altaz: Horizontal,
    pub position: Vector3,
    /// True while the shower's activity window contains the instant.
    pub is_active: bool,
    pub zhr: u32,
    pub speed_km_s: f64,
    pub parent_body: &'static str,
}

/// A minor planet propagated from its Keplerian elements.
///
/// Positions are heliocentric mapped straight into scene space (the
/// Earth's offset is not subtracted) — good enough to draw the belt, not
/// for pointing an instrument at an asteroid.
#[derive(Debug, Clone, PartialEq)]
pub struct MinorBodyView {
    pub name: String,
    pub altaz: Horizontal,
    pub position: Vector3,
    pub is_visible: bool,
    pub heliocentric_distance_au: f64,
}

/// The tagged sum over every processed object kind.
#[derive(Debug, Clone, Copy)]
pub enum SkyObject<'a> {
    Star(&'a ProcessedStar),
    Body(&'a BodyView),
    Moon(&'a MoonView),
    DeepSky(&'a DeepSkyView),
    Meteor(&'a ShowerView),
    MinorBody(&'a MinorBodyView),
    Satellite(&'a TopocentricSatellite),
    Constellation(&'a ConstellationDisplay),
}

impl Positioned for ProcessedStar {
    fn altaz(&self) -> Horizontal {
        self.altaz
    }
    fn position(&self) -> Vector3 {
        self.position
    }
    fn is_visible(&self) -> bool {
        self.is_visible
    }
}

impl Positioned for BodyView {
    fn altaz(&self) -> Horizontal {
        self.altaz
    }
    fn position(&self) -> Vector3 {
        self.position
    }
    fn is_visible(&self) -> bool {
        self.is_visible
    }
}

impl Positioned for MoonView {
    fn altaz(&self) -> Horizontal {
        self.altaz
    }
    fn position(&self) -> Vector3 {
        self.position
    }
    fn is_visible(&self) -> bool {
        self.is_visible
    }
}

impl Positioned for DeepSkyView {
    fn altaz(&self) -> Horizontal {
        self.altaz
    }
    fn position(&self) -> Vector3 {
        self.position
    }
    fn is_visible(&self) -> bool {
        self.is_visible
    }
}

impl Positioned for ShowerView {
    fn altaz(&self) -> Horizontal {
        self.altaz
    }
    fn position(&self) -> Vector3 {
        self.position
    }
    fn is_visible(&self) -> bool {
        self.is_active
    }
}

impl Positioned for MinorBodyView {
    fn altaz(&self) -> Horizontal {
        self.altaz
    }
    fn position(&self) -> Vector3 {
        self.position
    }
    fn is_visible(&self) -> bool {
        self.is_visible
    }
}

impl Positioned for TopocentricSatellite {
    fn altaz(&self) -> Horizontal {
        self.horizontal
    }
    fn position(&self) -> Vector3 {
        self.position
    }
    fn is_visible(&self) -> bool {
        self.is_visible
    }
}

impl Positioned for ConstellationDisplay {
    fn altaz(&self) -> Horizontal {
        skysphere_core::transforms::cartesian_to_horizontal(&self.label_position)
    }
    fn position(&self) -> Vector3 {
        self.label_position
    }
    fn is_visible(&self) -> bool {
        self.is_visible
    }
}

impl<'a> Positioned for SkyObject<'a> {
    fn altaz(&self) -> Horizontal {
        match self {
            SkyObject::Star(o) => o.altaz(),
            SkyObject::Body(o) => o.altaz(),
            SkyObject::Moon(o) => o.altaz(),
            SkyObject::DeepSky(o) => o.altaz(),
            SkyObject::Meteor(o) => o.altaz(),
            SkyObject::MinorBody(o) => o.altaz(),
            SkyObject::Satellite(o) => o.altaz(),
            SkyObject::Constellation(o) => o.altaz(),
        }
    }

    fn position(&self) -> Vector3 {
        match self {
            SkyObject::Star(o) => o.position(),
            SkyObject::Body(o) => o.position(),
            SkyObject::Moon(o) => o.position(),
            SkyObject::DeepSky(o) => o.position(),
            SkyObject::Meteor(o) => o.position(),
            SkyObject::MinorBody(o) => o.position(),
            SkyObject::Satellite(o) => o.position(),
            SkyObject::Constellation(o) => o.position(),
        }
    }

    fn is_visible(&self) -> bool {
        match self {
            SkyObject::Star(o) => o.is_visible(),
            SkyObject::Body(o) => o.is_visible(),
            SkyObject::Moon(o) => o.is_visible(),
            SkyObject::DeepSky(o) => o.is_visible(),
            SkyObject::Meteor(o) => o.is_visible(),
            SkyObject::MinorBody(o) => o.is_visible(),
            SkyObject::Satellite(o) => o.is_visible(),
            SkyObject::Constellation(o) => o.is_visible(),
        }
    }
}

impl<'a> SkyObject<'a> {
    /// Display name, for search and info panels.
    pub fn name(&self) -> &str {
        match self {
            SkyObject::Star(o) => &o.star.name,
            SkyObject::Body(o) => o.name,
            SkyObject::Moon(o) => o.name,
            SkyObject::DeepSky(o) => &o.name,
            SkyObject::Meteor(o) => o.name,
            SkyObject::MinorBody(o) => &o.name,
            SkyObject::Satellite(o) => &o.name,
            SkyObject::Constellation(o) => o.name,
        }
    }
}
