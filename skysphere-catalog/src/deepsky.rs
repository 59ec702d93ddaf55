//! Deep-sky object ingest.
//!
//! The network source is a SIMBAD-style JSON array of
//! `{main_id, ra_deg, dec_deg, otype}`; the bundled sample carries the same
//! shape extended with magnitude, size, constellation, and description.
//! Right ascension arrives in degrees and is normalized to hours here.
//! Rows with an unmapped `otype` are skipped, not fatal.

use crate::error::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};

/// Classification used by the renderer's styling and the search UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeepSkyKind {
    Galaxy,
    Nebula,
    Cluster,
    Planetary,
    Supernova,
}

impl DeepSkyKind {
    /// Maps a SIMBAD object type to the engine's classification.
    ///
    /// Returns `None` for types outside the planetarium's interest (stars,
    /// masers, candidates, ...) — those rows are dropped.
    pub fn from_otype(otype: &str) -> Option<Self> {
        match otype.trim() {
            "G" | "GiG" | "GiP" | "AGN" | "Sy1" | "Sy2" | "QSO" => Some(Self::Galaxy),
            "PN" => Some(Self::Planetary),
            "HII" | "RNe" => Some(Self::Nebula),
            "SNR" => Some(Self::Supernova),
            "Cl*" | "GlC" | "OpC" | "As*" => Some(Self::Cluster),
            _ => None,
        }
    }
}

/// One deep-sky catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeepSkyRecord {
    pub id: String,
    pub name: String,
    pub kind: DeepSkyKind,
    pub ra_hours: f64,
    pub dec_deg: f64,
    pub magnitude: f64,
    pub size_arcmin: f64,
    pub constellation: String,
    pub description: String,
}

/// Magnitude assumed for source rows that do not carry one. SIMBAD otype
/// dumps omit photometry; 8th magnitude keeps them visible under a dark
/// sky and filtered under city light.
const DEFAULT_MAGNITUDE: f64 = 8.0;
const DEFAULT_SIZE_ARCMIN: f64 = 5.0;

#[derive(Debug, Deserialize)]
struct RawDeepSky {
    main_id: String,
    ra_deg: f64,
    dec_deg: f64,
    otype: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    mag: Option<f64>,
    #[serde(default)]
    size_arcmin: Option<f64>,
    #[serde(default)]
    constellation: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Parses a deep-sky JSON array. Returns the usable records and the number
/// of rows skipped (unmapped otype or non-finite coordinates).
pub fn parse_deepsky(text: &str) -> CatalogResult<(Vec<DeepSkyRecord>, u64)> {
    let raw: Vec<RawDeepSky> = serde_json::from_str(text)
        .map_err(|e| CatalogError::parse("deep-sky", e.to_string()))?;

    let mut records = Vec::with_capacity(raw.len());
    let mut skipped = 0u64;

    for entry in raw {
        let Some(kind) = DeepSkyKind::from_otype(&entry.otype) else {
            skipped += 1;
            continue;
        };
        if !(entry.ra_deg.is_finite() && entry.dec_deg.is_finite()) {
            skipped += 1;
            continue;
        }
        records.push(DeepSkyRecord {
            name: entry.name.unwrap_or_else(|| entry.main_id.clone()),
            id: entry.main_id,
            kind,
            ra_hours: skysphere_core::angle::wrap_hours(entry.ra_deg / 15.0),
            dec_deg: entry.dec_deg.clamp(-90.0, 90.0),
            magnitude: entry.mag.unwrap_or(DEFAULT_MAGNITUDE),
            size_arcmin: entry.size_arcmin.unwrap_or(DEFAULT_SIZE_ARCMIN),
            constellation: entry.constellation.unwrap_or_default(),
            description: entry.description.unwrap_or_default(),
        });
    }

    if records.is_empty() {
        return Err(CatalogError::parse("deep-sky", "no usable entries"));
    }

    Ok((records, skipped))
}

/// Bundled Messier-object sample used when no source can be fetched.
pub const BUNDLED_DEEPSKY_JSON: &str = include_str!("../data/bundled_deepsky.json");

pub fn bundled_deepsky() -> CatalogResult<(Vec<DeepSkyRecord>, u64)> {
    parse_deepsky(BUNDLED_DEEPSKY_JSON)
}
