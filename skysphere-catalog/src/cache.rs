//! Derived binary cache for the parsed star catalog.
//!
//! Layout, all little-endian:
//!
//! ```text
//! magic "SCAT" | format version u32 | catalog-version len u16 + utf8
//! record count u64
//! per record: id i64 | ra f64 | dec f64 | mag f64
//!             name len u16 + utf8 | spectral len u8 + utf8
//! ```
//!
//! Records are length-prefixed rather than fixed-width because display
//! names vary and the cache must round-trip the in-memory sequence
//! exactly, with no truncation.
//!
//! The cache is advisory. Reads validate the magic, the format version, and
//! the catalog version string; any mismatch or truncation is a
//! [`CatalogError::Cache`] and the caller regenerates from source. Writes
//! go to a temp file in the same directory and land with an atomic rename,
//! so concurrent readers only ever map a complete file.

use crate::error::{CatalogError, CatalogResult};
use crate::star::StarRecord;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use memmap2::Mmap;
use std::fs::File;
use std::io::{BufWriter, Cursor, Read, Write};
use std::path::Path;

const CACHE_MAGIC: &[u8; 4] = b"SCAT";
const CACHE_FORMAT_VERSION: u32 = 1;

/// Writes the star table to `path`, keyed by `catalog_version`.
///
/// The write is atomic: a temp file in the target directory is renamed over
/// the destination only after a successful flush.
pub fn write_cache(path: &Path, catalog_version: &str, stars: &[StarRecord]) -> CatalogResult<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;
    let temp = tempfile::NamedTempFile::new_in(dir)?;

    {
        let mut writer = BufWriter::new(temp.as_file());
        writer.write_all(CACHE_MAGIC)?;
        writer.write_u32::<LittleEndian>(CACHE_FORMAT_VERSION)?;

        let version_bytes = catalog_version.as_bytes();
        if version_bytes.len() > u16::MAX as usize {
            return Err(CatalogError::cache("catalog version string too long"));
        }
        writer.write_u16::<LittleEndian>(version_bytes.len() as u16)?;
        writer.write_all(version_bytes)?;

        writer.write_u64::<LittleEndian>(stars.len() as u64)?;
        for star in stars {
            write_record(&mut writer, star)?;
        }
        writer.flush()?;
    }

    temp.persist(path)
        .map_err(|e| CatalogError::cache(format!("failed to persist cache: {}", e)))?;
    Ok(())
}

fn write_record<W: Write>(writer: &mut W, star: &StarRecord) -> CatalogResult<()> {
    writer.write_i64::<LittleEndian>(star.id)?;
    writer.write_f64::<LittleEndian>(star.ra_hours)?;
    writer.write_f64::<LittleEndian>(star.dec_deg)?;
    writer.write_f64::<LittleEndian>(star.apparent_mag)?;

    let name = star.name.as_bytes();
    if name.len() > u16::MAX as usize {
        return Err(CatalogError::cache(format!(
            "star name too long: {} bytes",
            name.len()
        )));
    }
    writer.write_u16::<LittleEndian>(name.len() as u16)?;
    writer.write_all(name)?;

    let spect = star.spectral_class.as_bytes();
    if spect.len() > u8::MAX as usize {
        return Err(CatalogError::cache("spectral class too long"));
    }
    writer.write_u8(spect.len() as u8)?;
    writer.write_all(spect)?;
    Ok(())
}

/// Reads a cache written by [`write_cache`], verifying the key.
///
/// # Errors
/// Returns [`CatalogError::Cache`] on any validation failure — wrong magic,
/// wrong format version, different catalog version, or truncated data.
pub fn read_cache(path: &Path, catalog_version: &str) -> CatalogResult<Vec<StarRecord>> {
    let file = File::open(path)
        .map_err(|e| CatalogError::cache(format!("cannot open {}: {}", path.display(), e)))?;
    let mmap = unsafe { Mmap::map(&file) }
        .map_err(|e| CatalogError::cache(format!("cannot map {}: {}", path.display(), e)))?;

    let mut cursor = Cursor::new(&mmap[..]);

    let mut magic = [0u8; 4];
    cursor
        .read_exact(&mut magic)
        .map_err(|_| CatalogError::cache("file too small for header"))?;
    if &magic != CACHE_MAGIC {
        return Err(CatalogError::cache(format!(
            "bad magic {:?}, expected {:?}",
            magic, CACHE_MAGIC
        )));
    }

    let format_version = cursor
        .read_u32::<LittleEndian>()
        .map_err(|_| CatalogError::cache("truncated format version"))?;
    if format_version != CACHE_FORMAT_VERSION {
        return Err(CatalogError::cache(format!(
            "format version {} unsupported (expected {})",
            format_version, CACHE_FORMAT_VERSION
        )));
    }

    let stored_version = read_string_u16(&mut cursor)?;
    if stored_version != catalog_version {
        return Err(CatalogError::cache(format!(
            "catalog version '{}' does not match requested '{}'",
            stored_version, catalog_version
        )));
    }

    let count = cursor
        .read_u64::<LittleEndian>()
        .map_err(|_| CatalogError::cache("truncated record count"))?;
    // Sanity bound: a real catalog has well under a million naked-eye rows.
    if count > 10_000_000 {
        return Err(CatalogError::cache(format!(
            "implausible record count {}",
            count
        )));
    }

    let mut stars = Vec::with_capacity(count as usize);
    for index in 0..count {
        stars.push(read_record(&mut cursor).map_err(|e| {
            CatalogError::cache(format!("record {} of {}: {}", index, count, e))
        })?);
    }

    Ok(stars)
}

fn read_record(cursor: &mut Cursor<&[u8]>) -> Result<StarRecord, String> {
    let id = cursor
        .read_i64::<LittleEndian>()
        .map_err(|_| "truncated id".to_string())?;
    let ra_hours = cursor
        .read_f64::<LittleEndian>()
        .map_err(|_| "truncated ra".to_string())?;
    let dec_deg = cursor
        .read_f64::<LittleEndian>()
        .map_err(|_| "truncated dec".to_string())?;
    let apparent_mag = cursor
        .read_f64::<LittleEndian>()
        .map_err(|_| "truncated mag".to_string())?;

    let name = {
        let len = cursor
            .read_u16::<LittleEndian>()
            .map_err(|_| "truncated name length".to_string())? as usize;
        read_utf8(cursor, len).map_err(|e| format!("name: {}", e))?
    };
    let spectral_class = {
        let len = cursor.read_u8().map_err(|_| "truncated spectral length".to_string())? as usize;
        read_utf8(cursor, len).map_err(|e| format!("spectral class: {}", e))?
    };

    Ok(StarRecord {
        id,
        name,
        ra_hours,
        dec_deg,
        apparent_mag,
        spectral_class,
    })
}

fn read_string_u16(cursor: &mut Cursor<&[u8]>) -> CatalogResult<String> {
    let len = cursor
        .read_u16::<LittleEndian>()
        .map_err(|_| CatalogError::cache("truncated version length"))? as usize;
    read_utf8(cursor, len).map_err(|e| CatalogError::cache(format!("version string: {}", e)))
}

fn read_utf8(cursor: &mut Cursor<&[u8]>, len: usize) -> Result<String, String> {
    let mut buf = vec![0u8; len];
    cursor
        .read_exact(&mut buf)
        .map_err(|_| "truncated string data".to_string())?;
    String::from_utf8(buf).map_err(|_| "invalid utf-8".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_stars() -> Vec<StarRecord> {
        vec![
            StarRecord {
                id: 32349,
                name: "Sirius".to_string(),
                ra_hours: 6.752481,
                dec_deg: -16.716116,
                apparent_mag: -1.44,
                spectral_class: "A0".to_string(),
            },
            StarRecord {
                id: 11767,
                name: "Polaris".to_string(),
                ra_hours: 2.52975,
                dec_deg: 89.264109,
                apparent_mag: 1.97,
                spectral_class: "F7".to_string(),
            },
            StarRecord {
                id: 424242,
                name: "HIP 424242".to_string(),
                ra_hours: 0.0,
                dec_deg: 0.0,
                apparent_mag: 5.99,
                spectral_class: "G".to_string(),
            },
        ]
    }

    #[test]
    fn round_trips_exactly() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stars.cache");
        let stars = sample_stars();

        write_cache(&path, "hyg-v41", &stars).unwrap();
        let loaded = read_cache(&path, "hyg-v41").unwrap();
        assert_eq!(loaded, stars);
    }

    #[test]
    fn rejects_wrong_catalog_version() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stars.cache");
        write_cache(&path, "hyg-v41", &sample_stars()).unwrap();

        let err = read_cache(&path, "hyg-v42").unwrap_err();
        assert!(err.to_string().contains("hyg-v41"), "got: {}", err);
    }

    #[test]
    fn rejects_bad_magic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stars.cache");
        std::fs::write(&path, b"NOPE-not-a-cache-file").unwrap();

        let err = read_cache(&path, "hyg-v41").unwrap_err();
        assert!(err.to_string().contains("bad magic"), "got: {}", err);
    }

    #[test]
    fn rejects_truncated_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stars.cache");
        write_cache(&path, "hyg-v41", &sample_stars()).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        std::fs::write(&path, &bytes[..bytes.len() - 7]).unwrap();

        let err = read_cache(&path, "hyg-v41").unwrap_err();
        assert!(matches!(err, CatalogError::Cache { .. }));
    }

    #[test]
    fn missing_file_is_a_cache_error() {
        let dir = tempdir().unwrap();
        let err = read_cache(&dir.path().join("absent.cache"), "v1").unwrap_err();
        assert!(matches!(err, CatalogError::Cache { .. }));
    }

    #[test]
    fn empty_catalog_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.cache");
        write_cache(&path, "v0", &[]).unwrap();
        assert!(read_cache(&path, "v0").unwrap().is_empty());
    }

    #[test]
    fn rewrite_replaces_atomically() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stars.cache");
        write_cache(&path, "v1", &sample_stars()).unwrap();
        write_cache(&path, "v2", &sample_stars()[..1]).unwrap();

        assert!(read_cache(&path, "v1").is_err());
        assert_eq!(read_cache(&path, "v2").unwrap().len(), 1);
    }

    #[test]
    fn unicode_names_survive() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stars.cache");
        let stars = vec![StarRecord {
            id: 1,
            name: "ο² Eridani".to_string(),
            ra_hours: 4.2525,
            dec_deg: -7.6529,
            apparent_mag: 4.43,
            spectral_class: "K0".to_string(),
        }];
        write_cache(&path, "v1", &stars).unwrap();
        assert_eq!(read_cache(&path, "v1").unwrap(), stars);
    }
}
