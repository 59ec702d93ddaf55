//! Error types shared across the engine crates.
//!
//! A single [`AstroError`] covers the failure modes of the calculation core:
//! invalid observer input, numeric breakdown, data access, and algorithm
//! failure. Catalog loading has its own richer error type in
//! `skysphere-catalog`; it wraps this one where the core is involved.
//!
//! Per-entry failures inside the scene pipeline are *not*
//! errors — they are silent drops counted in the scene health diagnostics.
//! `AstroError` is reserved for failures the caller must see.

use thiserror::Error;

/// Classification of numeric failures carried by [`AstroError::Math`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathErrorKind {
    /// Result is NaN or infinite.
    NotFinite,
    /// Input outside the operation's domain (e.g. latitude beyond ±90°).
    OutOfRange,
    /// Iterative scheme failed to converge.
    NonConvergence,
}

/// Unified error type for the calculation core.
#[derive(Error, Debug)]
pub enum AstroError {
    /// Calendar input that does not denote a real instant.
    #[error("invalid date {year}-{month:02}-{day:02}: {message}")]
    InvalidDate {
        year: i32,
        month: u32,
        day: u32,
        message: String,
    },

    /// Observer coordinates outside their physical range.
    #[error("invalid location ({latitude}, {longitude}): {message}")]
    InvalidLocation {
        latitude: f64,
        longitude: f64,
        message: String,
    },

    /// Numeric failure in `operation`.
    #[error("math error in {operation} ({kind:?}): {message}")]
    Math {
        operation: String,
        kind: MathErrorKind,
        message: String,
    },

    /// Data access failure (file I/O, network, parsing). The only variant
    /// where a retry or fallback may succeed.
    #[error("data error ({source_name} - {operation}): {message}")]
    Data {
        source_name: String,
        operation: String,
        message: String,
    },

    /// Algorithm failure that is not a plain numeric breakdown.
    #[error("calculation error in {context}: {message}")]
    Calculation { context: String, message: String },
}

/// Convenience alias used throughout the workspace.
pub type AstroResult<T> = Result<T, AstroError>;

impl AstroError {
    pub fn invalid_date(year: i32, month: u32, day: u32, reason: &str) -> Self {
        Self::InvalidDate {
            year,
            month,
            day,
            message: reason.to_string(),
        }
    }

    pub fn invalid_location(latitude: f64, longitude: f64, reason: &str) -> Self {
        Self::InvalidLocation {
            latitude,
            longitude,
            message: reason.to_string(),
        }
    }

    pub fn math(operation: &str, kind: MathErrorKind, reason: &str) -> Self {
        Self::Math {
            operation: operation.to_string(),
            kind,
            message: reason.to_string(),
        }
    }

    pub fn data(source_name: &str, operation: &str, reason: &str) -> Self {
        Self::Data {
            source_name: source_name.to_string(),
            operation: operation.to_string(),
            message: reason.to_string(),
        }
    }

    pub fn calculation(context: &str, reason: &str) -> Self {
        Self::Calculation {
            context: context.to_string(),
            message: reason.to_string(),
        }
    }

    /// Returns `true` if a retry or an alternate source might succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Data { .. })
    }
}
