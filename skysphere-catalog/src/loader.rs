//! The async catalog-loading phase.
//!
//! This is the only part of the workspace that performs I/O. Each source is
//! fetched with its own timeout and falls back independently: a dead
//! network produces a fully usable [`Catalogs`] built from the bundled
//! samples, and `load` itself never fails. The star catalog additionally
//! consults a binary cache before the network and refreshes it after a
//! successful parse.
//!
//! Loading is cooperatively cancellable: every fetch is an ordinary
//! future, and dropping it abandons the request with partial results
//! discarded.
//!
//! Once a `Catalogs` value is handed to the engine, nothing here runs
//! again — scene evaluation is a pure function of that immutable value.

use crate::cache;
use crate::constellations::{ConstellationFigure, CONSTELLATIONS};
use crate::deepsky::{self, DeepSkyRecord};
use crate::error::{CatalogError, CatalogResult};
use crate::hyg::{self, IngestStats};
use crate::minor_bodies::{self, MinorBodyRecord};
use crate::showers::{MeteorShower, METEOR_SHOWERS};
use crate::star::StarRecord;
use skysphere_satellites::{parse_tle_text, Satellite};
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

/// Bundled TLE sample (canonical SGP4 verification sets).
pub const BUNDLED_TLES: &str = include_str!("../data/bundled_tles.txt");

/// Where each catalog ultimately came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    Cache,
    Network,
    Bundled,
}

/// Loader configuration. `None` URLs skip the network entirely for that
/// source and use the bundled sample.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    pub star_catalog_url: Option<String>,
    pub deepsky_url: Option<String>,
    pub asteroid_url: Option<String>,
    pub tle_url: Option<String>,
    /// Directory for the derived star cache; `None` disables caching.
    pub cache_dir: Option<PathBuf>,
    /// Version key the star cache is validated against.
    pub catalog_version: String,
    /// Per-source fetch timeout.
    pub timeout: Duration,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            star_catalog_url: None,
            deepsky_url: None,
            asteroid_url: None,
            tle_url: None,
            cache_dir: None,
            catalog_version: "hyg-v41".to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

/// The immutable catalog set the engine is built from.
#[derive(Debug)]
pub struct Catalogs {
    pub stars: Vec<StarRecord>,
    pub star_stats: IngestStats,
    pub star_source: CatalogSource,
    pub deep_sky: Vec<DeepSkyRecord>,
    pub constellations: &'static [ConstellationFigure],
    pub meteor_showers: &'static [MeteorShower],
    pub minor_bodies: Vec<MinorBodyRecord>,
    pub satellites: Vec<Satellite>,
}

impl Catalogs {
    /// Builds the fully offline catalog set from the bundled samples.
    ///
    /// This is the path of last resort for the loader and the normal path
    /// for tests and embedded use. The bundled samples are compiled in and
    /// verified by the crate's own tests, so the fallible parses here can
    /// only fail on a build defect; that surfaces as an error, not a panic.
    pub fn bundled() -> CatalogResult<Self> {
        let (stars, star_stats) = hyg::bundled_catalog()?;
        let (deep_sky, _) = deepsky::bundled_deepsky()?;
        Ok(Self {
            stars,
            star_stats,
            star_source: CatalogSource::Bundled,
            deep_sky,
            constellations: &CONSTELLATIONS,
            meteor_showers: &METEOR_SHOWERS,
            minor_bodies: minor_bodies::bundled_minor_bodies(),
            satellites: parse_tle_text(BUNDLED_TLES),
        })
    }
}

/// Async fetcher for the catalog sources.
pub struct CatalogLoader {
    config: LoaderConfig,
    client: reqwest::Client,
}

impl CatalogLoader {
    /// Builds a loader with a shared HTTP client.
    ///
    /// # Errors
    /// Fails only if the HTTP client cannot be constructed.
    pub fn new(config: LoaderConfig) -> CatalogResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("skysphere/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                CatalogError::fetch("loader", "-", format!("cannot build HTTP client: {}", e))
            })?;
        Ok(Self { config, client })
    }

    /// Loads every catalog, falling back per source. Never fails: the
    /// worst case is the bundled catalog set.
    pub async fn load(&self) -> CatalogResult<Catalogs> {
        let mut catalogs = Catalogs::bundled()?;

        match self.fetch_star_catalog().await {
            Ok((stars, stats, source)) => {
                log::info!(
                    "star catalog: {} stars from {:?} ({} rows skipped)",
                    stars.len(),
                    source,
                    stats.rows_skipped_parse + stats.rows_skipped_magnitude
                );
                catalogs.stars = stars;
                catalogs.star_stats = stats;
                catalogs.star_source = source;
            }
            Err(err) => log::warn!("star catalog unavailable, using bundled sample: {}", err),
        }

        match self.fetch_deep_sky().await {
            Ok(records) => {
                log::info!("deep-sky catalog: {} objects", records.len());
                catalogs.deep_sky = records;
            }
            Err(err) => log::warn!("deep-sky source unavailable, using bundled sample: {}", err),
        }

        match self.fetch_asteroids().await {
            Ok(bodies) => {
                log::info!("minor bodies: {} element sets", bodies.len());
                catalogs.minor_bodies = bodies;
            }
            Err(err) => log::warn!("SBDB unavailable, using bundled elements: {}", err),
        }

        match self.fetch_satellites().await {
            Ok(satellites) => {
                log::info!("satellites: {} TLE sets", satellites.len());
                catalogs.satellites = satellites;
            }
            Err(err) => log::warn!("TLE source unavailable, using bundled sample: {}", err),
        }

        Ok(catalogs)
    }

    /// Star catalog: cache first, then network, writing the cache back on
    /// a successful parse.
    pub async fn fetch_star_catalog(
        &self,
    ) -> CatalogResult<(Vec<StarRecord>, IngestStats, CatalogSource)> {
        let cache_path = self
            .config
            .cache_dir
            .as_ref()
            .map(|dir| dir.join(format!("stars-{}.cache", self.config.catalog_version)));

        if let Some(path) = &cache_path {
            match cache::read_cache(path, &self.config.catalog_version) {
                Ok(stars) => {
                    log::info!("star cache hit: {} stars from {}", stars.len(), path.display());
                    return Ok((stars, IngestStats::default(), CatalogSource::Cache));
                }
                Err(err) => log::debug!("star cache miss: {}", err),
            }
        }

        let url = self.require_url(self.config.star_catalog_url.as_deref(), "star catalog")?;
        let body = self.fetch_text(url, "star catalog").await?;
        let (stars, stats) = hyg::parse_catalog(&body)?;

        if let Some(path) = &cache_path {
            if let Err(err) = cache::write_cache(path, &self.config.catalog_version, &stars) {
                // Advisory cache: a write failure costs a re-fetch next run.
                log::warn!("failed to write star cache {}: {}", path.display(), err);
            }
        }

        Ok((stars, stats, CatalogSource::Network))
    }

    pub async fn fetch_deep_sky(&self) -> CatalogResult<Vec<DeepSkyRecord>> {
        let url = self.require_url(self.config.deepsky_url.as_deref(), "deep-sky")?;
        let body = self.fetch_text(url, "deep-sky").await?;
        let (records, skipped) = deepsky::parse_deepsky(&body)?;
        if skipped > 0 {
            log::debug!("deep-sky: skipped {} unmapped rows", skipped);
        }
        Ok(records)
    }

    pub async fn fetch_asteroids(&self) -> CatalogResult<Vec<MinorBodyRecord>> {
        let url = self.require_url(self.config.asteroid_url.as_deref(), "SBDB")?;
        let body = self.fetch_text(url, "SBDB").await?;
        let (bodies, skipped) = minor_bodies::parse_sbdb(&body)?;
        if skipped > 0 {
            log::debug!("SBDB: skipped {} rows", skipped);
        }
        Ok(bodies)
    }

    pub async fn fetch_satellites(&self) -> CatalogResult<Vec<Satellite>> {
        let url = self.require_url(self.config.tle_url.as_deref(), "TLE")?;
        let body = self.fetch_text(url, "TLE").await?;
        let satellites = parse_tle_text(&body);
        if satellites.is_empty() {
            return Err(CatalogError::parse("TLE", "no valid element sets"));
        }
        Ok(satellites)
    }

    fn require_url<'a>(&self, url: Option<&'a str>, source: &str) -> CatalogResult<&'a str> {
        url.ok_or_else(|| {
            CatalogError::fetch(source, "-", "no URL configured for this source")
        })
    }

    /// Fetches a body with the per-source timeout, transparently gunzipping
    /// compressed payloads (the HYG distribution ships gzipped).
    async fn fetch_text(&self, url: &str, source: &str) -> CatalogResult<String> {
        let request = self.client.get(url).send();
        let response = tokio::time::timeout(self.config.timeout, request)
            .await
            .map_err(|_| CatalogError::fetch(source, url, "timed out"))?
            .map_err(|e| CatalogError::fetch(source, url, e.to_string()))?;

        if !response.status().is_success() {
            return Err(CatalogError::fetch(
                source,
                url,
                format!("HTTP status {}", response.status()),
            ));
        }

        let bytes = tokio::time::timeout(self.config.timeout, response.bytes())
            .await
            .map_err(|_| CatalogError::fetch(source, url, "timed out reading body"))?
            .map_err(|e| CatalogError::fetch(source, url, e.to_string()))?;

        decode_payload(&bytes)
            .map_err(|e| CatalogError::fetch(source, url, format!("bad payload: {}", e)))
    }
}

/// Decodes a payload that may be gzip-compressed.
fn decode_payload(bytes: &[u8]) -> Result<String, String> {
    if bytes.len() >= 2 && bytes[0] == 0x1f && bytes[1] == 0x8b {
        let mut decoder = flate2::read::GzDecoder::new(bytes);
        let mut text = String::new();
        decoder
            .read_to_string(&mut text)
            .map_err(|e| format!("gzip: {}", e))?;
        Ok(text)
    } else {
        String::from_utf8(bytes.to_vec()).map_err(|e| format!("utf-8: {}", e))
    }
}
