//! Binary candidate catalog files
//!
//! Both files are little-endian and made of count-prefixed arrays:
//! - the color file holds three arrays of RGBA `f32` quadruples in `[0, 1]`
//!   (tiles, walls, paints)
//! - the validity file holds two arrays of `i32` ids (enabled tiles, enabled
//!   walls)

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::io::error::{Result, TileMapError, invalid_catalog};
use crate::palette::candidates::{CandidateCatalog, CandidateKind};

// Guards against allocating from a corrupt count prefix
const MAX_ARRAY_LENGTH: usize = 1 << 20;

/// Float colors for every candidate kind, in catalog order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogColors {
    /// Tile colors
    pub tiles: Vec<[f32; 4]>,
    /// Wall colors
    pub walls: Vec<[f32; 4]>,
    /// Paint colors
    pub paints: Vec<[f32; 4]>,
}

/// Ids of the tiles and walls enabled by default
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidIds {
    /// Enabled tile ids
    pub tiles: Vec<u16>,
    /// Enabled wall ids
    pub walls: Vec<u16>,
}

fn read_i32<R: Read>(reader: &mut R, what: &str) -> Result<i32> {
    let mut bytes = [0u8; 4];
    reader
        .read_exact(&mut bytes)
        .map_err(|e| invalid_catalog(&format!("truncated while reading {what}: {e}")))?;
    Ok(i32::from_le_bytes(bytes))
}

fn read_f32<R: Read>(reader: &mut R, what: &str) -> Result<f32> {
    let mut bytes = [0u8; 4];
    reader
        .read_exact(&mut bytes)
        .map_err(|e| invalid_catalog(&format!("truncated while reading {what}: {e}")))?;
    Ok(f32::from_le_bytes(bytes))
}

fn read_count<R: Read>(reader: &mut R, what: &str) -> Result<usize> {
    let count = read_i32(reader, what)?;
    let count = usize::try_from(count)
        .map_err(|e| invalid_catalog(&format!("invalid {what} count {count}: {e}")))?;
    if count > MAX_ARRAY_LENGTH {
        return Err(invalid_catalog(&format!(
            "{what} count {count} exceeds {MAX_ARRAY_LENGTH}"
        )));
    }
    Ok(count)
}

fn read_colors<R: Read>(reader: &mut R, what: &str) -> Result<Vec<[f32; 4]>> {
    let count = read_count(reader, what)?;
    let mut colors = Vec::with_capacity(count);
    for _ in 0..count {
        colors.push([
            read_f32(reader, what)?,
            read_f32(reader, what)?,
            read_f32(reader, what)?,
            read_f32(reader, what)?,
        ]);
    }
    Ok(colors)
}

fn read_ids<R: Read>(reader: &mut R, what: &str) -> Result<Vec<u16>> {
    let count = read_count(reader, what)?;
    let mut ids = Vec::with_capacity(count);
    for _ in 0..count {
        let id = read_i32(reader, what)?;
        let id = u16::try_from(id)
            .map_err(|e| invalid_catalog(&format!("{what} id {id} is out of range: {e}")))?;
        ids.push(id);
    }
    Ok(ids)
}

/// Parse a color file
///
/// # Errors
///
/// Returns an error if the data is truncated or a count is negative or
/// implausibly large
pub fn read_color_info<R: Read>(mut reader: R) -> Result<CatalogColors> {
    Ok(CatalogColors {
        tiles: read_colors(&mut reader, "tile colors")?,
        walls: read_colors(&mut reader, "wall colors")?,
        paints: read_colors(&mut reader, "paint colors")?,
    })
}

/// Parse a validity file
///
/// # Errors
///
/// Returns an error if the data is truncated, a count is invalid, or an id
/// does not fit a tile id
pub fn read_valid_ids<R: Read>(mut reader: R) -> Result<ValidIds> {
    Ok(ValidIds {
        tiles: read_ids(&mut reader, "valid tiles")?,
        walls: read_ids(&mut reader, "valid walls")?,
    })
}

/// Build a catalog from parsed colors and optional default validity
///
/// Without validity data every tile and wall starts enabled; with it, only
/// the listed ids do.
///
/// # Errors
///
/// Returns an error if the colors exceed catalog limits or a valid id is not
/// in the catalog
pub fn build_catalog(colors: &CatalogColors, valid: Option<&ValidIds>) -> Result<CandidateCatalog> {
    let mut catalog =
        CandidateCatalog::from_unit_colors(&colors.tiles, &colors.walls, &colors.paints)?;

    if let Some(valid) = valid {
        for (kind, ids) in [
            (CandidateKind::Tile, &valid.tiles),
            (CandidateKind::Wall, &valid.walls),
        ] {
            catalog.set_all(kind, false);
            for &id in ids {
                catalog.set_enabled(kind, id, true)?;
            }
        }
    }

    Ok(catalog)
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| TileMapError::FileSystem {
            path: path.to_path_buf(),
            operation: "open catalog",
            source: e,
        })
}

/// Load a catalog from a color file and an optional validity file
///
/// # Errors
///
/// Returns an error if either file cannot be opened or parsed
pub fn load_catalog(colors_path: &Path, valid_path: Option<&Path>) -> Result<CandidateCatalog> {
    let colors = read_color_info(open(colors_path)?)?;
    let valid = valid_path
        .map(|path| open(path).and_then(read_valid_ids))
        .transpose()?;

    let catalog = build_catalog(&colors, valid.as_ref())?;
    tracing::info!(
        tiles = catalog.count(CandidateKind::Tile),
        walls = catalog.count(CandidateKind::Wall),
        paints = catalog.paint_count(),
        enabled_tiles = catalog.enabled_count(CandidateKind::Tile),
        enabled_walls = catalog.enabled_count(CandidateKind::Wall),
        "catalog loaded"
    );
    Ok(catalog)
}
