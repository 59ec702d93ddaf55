//! Catalog error taxonomy.
//!
//! Row-level problems never surface here — the parsers skip bad rows and
//! count them. These errors describe whole-source failures, and every one
//! of them is survivable: each source has a bundled fallback.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// The source text could not be interpreted at all (missing header,
    /// wrong format, zero usable rows).
    #[error("failed to parse {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    /// Network fetch failed or timed out.
    #[error("failed to fetch {source_name} from {url}: {message}")]
    Fetch {
        source_name: String,
        url: String,
        message: String,
    },

    /// The binary cache is unreadable or stale. Advisory: callers fall
    /// through to the source and rewrite it.
    #[error("star cache unusable: {message}")]
    Cache { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    pub fn parse(source_name: &str, message: impl Into<String>) -> Self {
        Self::Parse {
            source_name: source_name.to_string(),
            message: message.into(),
        }
    }

    pub fn fetch(source_name: &str, url: &str, message: impl Into<String>) -> Self {
        Self::Fetch {
            source_name: source_name.to_string(),
            url: url.to_string(),
            message: message.into(),
        }
    }

    pub fn cache(message: impl Into<String>) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_source() {
        let err = CatalogError::parse("HYG", "no header row");
        assert_eq!(err.to_string(), "failed to parse HYG: no header row");

        let err = CatalogError::fetch("deep-sky", "https://example.test/dso", "timeout");
        assert!(err.to_string().contains("deep-sky"));
        assert!(err.to_string().contains("https://example.test/dso"));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CatalogError = io.into();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
