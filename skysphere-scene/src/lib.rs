//! Scene assembly for the skysphere planetarium engine.
//!
//! This crate composes the lower layers into the value the renderer
//! consumes: for an observer and an instant, [`Engine::build_scene`]
//! evaluates every catalog star, Solar System body, natural satellite,
//! deep-sky object, meteor-shower radiant, minor planet, and Earth
//! satellite into a [`Scene`] of typed processed objects on the observer's
//! celestial sphere.
//!
//! The contract downstream code leans on:
//!
//! - every emitted position is finite (non-finite computations are dropped
//!   or parked at the sentinel, and counted in [`SceneHealth`]);
//! - Solar System bodies are always present and flagged visible;
//! - scenes are plain values — deterministic for equal inputs and
//!   independent of the engine once returned.
//!
//! The [`events`] module adds the time dimension (active showers, upcoming
//! phases, solstices, and peaks), and [`queries`] answers scene-level
//! questions such as the best initial view direction.

pub mod engine;
pub mod events;
pub mod object;
pub mod processor;
pub mod queries;

pub use engine::{Engine, Scene, SceneOptions, MOON_LOD_FOV_DEG};
pub use events::{active_showers, project_radiant, upcoming_events, AstronomicalEvent, EventKind};
pub use object::{
    BodyView, ConstellationDisplay, DeepSkyView, MinorBodyView, MoonView, Positioned,
    ProcessedStar, ShowerView, SkyObject,
};
pub use processor::{SceneHealth, spectral_to_color};
pub use queries::{best_initial_view, visible_counts, VisibleCounts};
