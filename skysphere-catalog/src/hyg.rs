//! HYG-format star catalog parser.
//!
//! The HYG database is a comma-delimited table whose header row names the
//! columns; the loader locates `id, proper, ra, dec, mag, spect, bf` by
//! name rather than position, so column reordering between catalog versions
//! is harmless. Quoted fields may contain commas.
//!
//! Row handling is fail-soft: a row whose numeric fields do not parse is
//! skipped and counted, never fatal. Only a missing header or a catalog
//! with zero usable rows is an error — the loader then falls back to the
//! bundled sample.

use crate::error::{CatalogError, CatalogResult};
use crate::star::StarRecord;

/// Stars fainter than this never make it into the catalog (naked-eye limit).
pub const MAGNITUDE_LIMIT: f64 = 6.0;

/// Per-run ingest statistics, logged by the loader and folded into the
/// engine's diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub rows_seen: u64,
    pub rows_kept: u64,
    pub rows_skipped_parse: u64,
    pub rows_skipped_magnitude: u64,
}

/// Splits one CSV line honoring double-quote runs.
///
/// The quote character toggles in/out-of-quote state; separators inside
/// quotes are literal. Quotes themselves are stripped from the output.
fn split_quoted(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

/// Column indices located from the header row.
struct ColumnMap {
    id: usize,
    proper: usize,
    ra: usize,
    dec: usize,
    mag: usize,
    spect: usize,
    bf: usize,
}

impl ColumnMap {
    fn from_header(header: &str) -> CatalogResult<Self> {
        let columns = split_quoted(header);
        let find = |name: &str| -> CatalogResult<usize> {
            columns
                .iter()
                .position(|c| c.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| {
                    CatalogError::parse("HYG", format!("header missing column '{}'", name))
                })
        };
        Ok(Self {
            id: find("id")?,
            proper: find("proper")?,
            ra: find("ra")?,
            dec: find("dec")?,
            mag: find("mag")?,
            spect: find("spect")?,
            bf: find("bf")?,
        })
    }
}

fn parse_row(fields: &[String], columns: &ColumnMap) -> Option<(StarRecord, f64)> {
    let field = |idx: usize| fields.get(idx).map(|s| s.trim()).unwrap_or("");

    let id: i64 = field(columns.id).parse().ok()?;
    let mag: f64 = field(columns.mag).parse().ok()?;
    let ra: f64 = field(columns.ra).parse().ok()?;
    let dec: f64 = field(columns.dec).parse().ok()?;

    if !(ra.is_finite() && dec.is_finite() && mag.is_finite()) {
        return None;
    }

    let record = StarRecord {
        id,
        name: StarRecord::resolve_name(id, field(columns.proper), field(columns.bf)),
        ra_hours: ra,
        dec_deg: dec,
        apparent_mag: mag,
        spectral_class: StarRecord::normalize_spectral_class(field(columns.spect)),
    };
    Some((record, mag))
}

/// Parses HYG-format CSV text into the filtered, sorted star table.
///
/// Rows fainter than [`MAGNITUDE_LIMIT`] are rejected; the survivors come
/// back sorted brightest-first. Individual bad rows are skipped and
/// counted in the returned [`IngestStats`].
///
/// # Errors
/// Fails only when the header is unusable or no row survives — the caller
/// treats that as a whole-source failure and falls back.
pub fn parse_catalog(text: &str) -> CatalogResult<(Vec<StarRecord>, IngestStats)> {
    let mut lines = text.lines();
    let header = lines
        .next()
        .ok_or_else(|| CatalogError::parse("HYG", "empty catalog"))?;
    let columns = ColumnMap::from_header(header)?;

    let mut stats = IngestStats::default();
    let mut stars = Vec::new();

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        stats.rows_seen += 1;
        let fields = split_quoted(line);
        match parse_row(&fields, &columns) {
            Some((record, mag)) => {
                if mag > MAGNITUDE_LIMIT {
                    stats.rows_skipped_magnitude += 1;
                } else {
                    stars.push(record);
                    stats.rows_kept += 1;
                }
            }
            None => stats.rows_skipped_parse += 1,
        }
    }

    if stars.is_empty() {
        return Err(CatalogError::parse(
            "HYG",
            format!(
                "no usable rows ({} seen, {} parse failures)",
                stats.rows_seen, stats.rows_skipped_parse
            ),
        ));
    }

    stars.sort_by(|a, b| {
        a.apparent_mag
            .partial_cmp(&b.apparent_mag)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok((stars, stats))
}

/// The bundled bright-star sample used when no catalog can be fetched.
pub const BUNDLED_STARS_CSV: &str = include_str!("../data/bundled_stars.csv");

/// Parses the bundled sample. The sample is compiled in and known-good, so
/// a failure here is a build defect; it is still reported as an error
/// rather than a panic.
pub fn bundled_catalog() -> CatalogResult<(Vec<StarRecord>, IngestStats)> {
    parse_catalog(BUNDLED_STARS_CSV)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "id,proper,ra,dec,mag,spect,bf,con";

    fn catalog(rows: &[&str]) -> String {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    #[test]
    fn parses_and_sorts_by_magnitude() {
        let text = catalog(&[
            "1,Faint,1.0,10.0,4.5,K2,,And",
            "2,Bright,2.0,-20.0,0.5,A0,,Ori",
            "3,Middle,3.0,30.0,2.0,G5,,Lyr",
        ]);
        let (stars, stats) = parse_catalog(&text).unwrap();
        assert_eq!(stats.rows_kept, 3);
        let names: Vec<&str> = stars.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Bright", "Middle", "Faint"]);
    }

    #[test]
    fn rejects_faint_stars() {
        let text = catalog(&[
            "1,Visible,1.0,0.0,5.9,K0,,",
            "2,Telescopic,2.0,0.0,9.5,M0,,",
        ]);
        let (stars, stats) = parse_catalog(&text).unwrap();
        assert_eq!(stars.len(), 1);
        assert_eq!(stats.rows_skipped_magnitude, 1);
        assert_eq!(stars[0].name, "Visible");
    }

    #[test]
    fn skips_rows_with_bad_numbers() {
        let text = catalog(&[
            "1,Good,1.0,0.0,3.0,K0,,",
            "2,BadMag,2.0,0.0,not-a-number,K0,,",
            "x,BadId,3.0,0.0,3.0,K0,,",
        ]);
        let (stars, stats) = parse_catalog(&text).unwrap();
        assert_eq!(stars.len(), 1);
        assert_eq!(stats.rows_skipped_parse, 2);
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let text = catalog(&["7,\"Komble, the Star\",1.5,2.5,1.0,F5,,"]);
        let (stars, _) = parse_catalog(&text).unwrap();
        assert_eq!(stars[0].name, "Komble, the Star");
    }

    #[test]
    fn name_falls_back_to_bayer_then_hip() {
        let text = catalog(&[
            "10,,1.0,0.0,2.0,B5,21Alp Sco,",
            "11,,1.0,0.0,2.0,B5,,",
        ]);
        let (stars, _) = parse_catalog(&text).unwrap();
        assert_eq!(stars[0].name, "21Alp Sco");
        assert_eq!(stars[1].name, "HIP 11");
    }

    #[test]
    fn spectral_default_applies() {
        let text = catalog(&["1,X,1.0,0.0,2.0,,,"]);
        let (stars, _) = parse_catalog(&text).unwrap();
        assert_eq!(stars[0].spectral_class, "G");
    }

    #[test]
    fn header_order_does_not_matter() {
        let text = "mag,dec,ra,bf,spect,proper,id\n2.5,10.0,5.0,,K0,Rearranged,99";
        let (stars, _) = parse_catalog(text).unwrap();
        assert_eq!(stars[0].name, "Rearranged");
        assert_eq!(stars[0].id, 99);
        assert_eq!(stars[0].ra_hours, 5.0);
    }

    #[test]
    fn missing_header_column_is_fatal() {
        let err = parse_catalog("id,proper,ra,dec,mag,spect\n1,X,1,2,3,K").unwrap_err();
        assert!(err.to_string().contains("bf"), "got: {}", err);
    }

    #[test]
    fn all_bad_rows_is_fatal() {
        let text = catalog(&["a,b,c,d,e,f,g", "h,i,j,k,l,m,n"]);
        assert!(parse_catalog(&text).is_err());
    }

    #[test]
    fn bundled_sample_parses() {
        let (stars, stats) = bundled_catalog().unwrap();
        assert!(stars.len() > 50, "bundled sample has {} stars", stars.len());
        assert_eq!(stats.rows_skipped_parse, 0, "bundled sample must be clean");
        // Sorted brightest-first; Sirius leads every sky.
        assert_eq!(stars[0].name, "Sirius");
        for star in &stars {
            assert!(star.apparent_mag <= MAGNITUDE_LIMIT);
            assert!((0.0..24.0).contains(&star.ra_hours));
            assert!((-90.0..=90.0).contains(&star.dec_deg));
            assert!(!star.spectral_class.is_empty() && star.spectral_class.len() <= 2);
        }
    }

    #[test]
    fn bundled_sample_contains_constellation_anchors() {
        let (stars, _) = bundled_catalog().unwrap();
        for name in ["Polaris", "Betelgeuse", "Rigel", "Vega", "Dubhe", "Alkaid"] {
            assert!(
                stars.iter().any(|s| s.name == name),
                "bundled sample missing {}",
                name
            );
        }
    }
}
