//! Catalog ingest and loading for the skysphere engine.
//!
//! Everything the engine knows about the sky that is not computed per
//! instant comes through this crate:
//!
//! | Module | Source | Fallback |
//! |--------|--------|----------|
//! | [`hyg`] | HYG-format CSV star catalog | bundled bright-star sample |
//! | [`cache`] | derived binary star cache | regenerate from source |
//! | [`deepsky`] | SIMBAD-otype JSON | bundled Messier sample |
//! | [`constellations`] | built-in line tables | — |
//! | [`showers`] | built-in IMO working-list subset | — |
//! | [`minor_bodies`] | JPL SBDB JSON | bundled main-belt elements |
//! | [`loader`] | async fetch of all of the above | per-source fallbacks |
//!
//! The async [`loader::CatalogLoader`] is the only place in the workspace
//! that performs I/O. It produces an immutable [`loader::Catalogs`] value
//! which the scene engine consumes; once loading finishes, scene evaluation
//! is a pure function.

pub mod cache;
pub mod constellations;
pub mod deepsky;
pub mod error;
pub mod hyg;
pub mod loader;
pub mod minor_bodies;
pub mod showers;
pub mod star;

pub use error::{CatalogError, CatalogResult};
pub use loader::{CatalogLoader, Catalogs, LoaderConfig};
pub use star::StarRecord;
