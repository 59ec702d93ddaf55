//! The in-memory star record.

use serde::{Deserialize, Serialize};

/// One catalog star, immutable for the life of the process.
///
/// `ra_hours` and `dec_deg` are J2000 and consumed as-is. `name` is the
/// resolved display name (proper name, else Bayer–Flamsteed designation,
/// else `HIP <id>`); `spectral_class` is the first two characters of the
/// source class, `"G"` when the source field was empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarRecord {
    pub id: i64,
    pub name: String,
    pub ra_hours: f64,
    pub dec_deg: f64,
    pub apparent_mag: f64,
    pub spectral_class: String,
}

impl StarRecord {
    /// Resolves a display name by the catalog precedence rules.
    pub fn resolve_name(id: i64, proper: &str, bayer_flamsteed: &str) -> String {
        let proper = proper.trim();
        if !proper.is_empty() {
            return proper.to_string();
        }
        let bf = bayer_flamsteed.trim();
        if !bf.is_empty() {
            return bf.to_string();
        }
        format!("HIP {}", id)
    }

    /// Normalizes a spectral class to its first two characters, defaulting
    /// to `"G"` for an empty field.
    pub fn normalize_spectral_class(raw: &str) -> String {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return "G".to_string();
        }
        trimmed.chars().take(2).collect()
    }
}
