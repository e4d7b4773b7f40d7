//! Dense palette lookup tables and their shared, swappable handle

use image::Rgba;
use rayon::prelude::*;
use std::sync::{Arc, PoisonError, RwLock};

use crate::io::configuration::{COLOR_CUBE_SIZE, NONE_ID};
use crate::io::error::{Result, precondition};
use crate::math::cube::{pack, pack_red_major, try_unpack, unpack};

/// Pack a tile id (high half) and wall id (low half) into one table word
pub const fn pack_tile_wall(tile: u16, wall: u16) -> u32 {
    ((tile as u32) << 16) | wall as u32
}

/// Split a table word into `(tile, wall)`
pub const fn unpack_tile_wall(packed: u32) -> (u16, u16) {
    ((packed >> 16) as u16, (packed & 0xffff) as u16)
}

/// Best tile, wall and paint for one color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaletteEntry {
    /// Tile id, or `NONE_ID`
    pub tile: u16,
    /// Wall id, or `NONE_ID`
    pub wall: u16,
    /// Paint id
    pub paint: u8,
}

impl PaletteEntry {
    /// Entry used for transparent cells: no tile, no wall, paint 0
    pub const EMPTY: Self = Self {
        tile: NONE_ID,
        wall: NONE_ID,
        paint: 0,
    };

    /// Tile id unless it is the `NONE` sentinel
    pub const fn tile_id(&self) -> Option<u16> {
        if self.tile == NONE_ID {
            None
        } else {
            Some(self.tile)
        }
    }

    /// Wall id unless it is the `NONE` sentinel
    pub const fn wall_id(&self) -> Option<u16> {
        if self.wall == NONE_ID {
            None
        } else {
            Some(self.wall)
        }
    }
}

/// Anything that can answer palette queries for an opaque RGB color
pub trait PaletteLookup {
    /// Best entry for the given color
    fn lookup(&self, r: u8, g: u8, b: u8) -> PaletteEntry;
}

/// Two 16,777,216-entry tables indexed by `r + g·256 + b·65536`
///
/// A store is immutable once loaded. Rebuilding produces a new store which
/// replaces the old one through [`SharedPalette`].
#[derive(Clone)]
pub struct PaletteStore {
    tile_wall: Box<[u32]>,
    paint: Box<[u8]>,
}

impl std::fmt::Debug for PaletteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaletteStore")
            .field("entries", &self.tile_wall.len())
            .finish_non_exhaustive()
    }
}

impl PaletteStore {
    /// Load a store from raw builder output in red-major layout
    ///
    /// Every entry is moved from its builder position `b + g·256 + r·65536`
    /// to its lookup position `r + g·256 + b·65536`.
    ///
    /// # Errors
    ///
    /// Returns a precondition error if either slice is not exactly
    /// 16,777,216 entries long
    pub fn load(tile_wall: &[u32], paint: &[u8]) -> Result<Self> {
        if tile_wall.len() != COLOR_CUBE_SIZE {
            return Err(precondition(
                "palette load",
                &format!(
                    "tile/wall data has {} entries, expected {COLOR_CUBE_SIZE}",
                    tile_wall.len()
                ),
            ));
        }
        if paint.len() != COLOR_CUBE_SIZE {
            return Err(precondition(
                "palette load",
                &format!(
                    "paint data has {} entries, expected {COLOR_CUBE_SIZE}",
                    paint.len()
                ),
            ));
        }

        let mut tile_wall_table = vec![pack_tile_wall(NONE_ID, NONE_ID); COLOR_CUBE_SIZE];
        let mut paint_table = vec![0u8; COLOR_CUBE_SIZE];

        tile_wall_table
            .par_iter_mut()
            .zip(paint_table.par_iter_mut())
            .enumerate()
            .for_each(|(key, (tile_wall_out, paint_out))| {
                let (r, g, b) = unpack(key);
                let source = pack_red_major(r, g, b);
                if let Some(&value) = tile_wall.get(source) {
                    *tile_wall_out = value;
                }
                if let Some(&value) = paint.get(source) {
                    *paint_out = value;
                }
            });

        Ok(Self {
            tile_wall: tile_wall_table.into_boxed_slice(),
            paint: paint_table.into_boxed_slice(),
        })
    }

    fn entry_at(&self, key: usize) -> PaletteEntry {
        let (tile, wall) = unpack_tile_wall(
            self.tile_wall
                .get(key)
                .copied()
                .unwrap_or(pack_tile_wall(NONE_ID, NONE_ID)),
        );
        let paint = self.paint.get(key).copied().unwrap_or(0);
        PaletteEntry { tile, wall, paint }
    }

    /// Best entry for an RGB color
    pub fn lookup(&self, r: u8, g: u8, b: u8) -> PaletteEntry {
        self.entry_at(pack(r, g, b))
    }

    /// Best entry for a packed color key
    ///
    /// # Errors
    ///
    /// Returns a precondition error if `key` is outside `[0, 16_777_216)`
    pub fn lookup_key(&self, key: usize) -> Result<PaletteEntry> {
        try_unpack(key)?;
        Ok(self.entry_at(key))
    }

    /// Placement for an RGBA color; `None` when fully transparent
    pub fn place_info(&self, color: Rgba<u8>) -> Option<PaletteEntry> {
        let [r, g, b, a] = color.0;
        (a != 0).then(|| self.lookup(r, g, b))
    }

    /// Packed tile/wall table in lookup order
    pub fn tile_wall_table(&self) -> &[u32] {
        &self.tile_wall
    }

    /// Paint table in lookup order
    pub fn paint_table(&self) -> &[u8] {
        &self.paint
    }
}

impl PaletteLookup for PaletteStore {
    fn lookup(&self, r: u8, g: u8, b: u8) -> PaletteEntry {
        Self::lookup(self, r, g, b)
    }
}

/// Holds the current palette and swaps it atomically on rebuild
///
/// Conversions take an `Arc` snapshot and keep using it even if a rebuild
/// replaces the palette meanwhile, so a conversion never sees a mix of old
/// and new entries.
#[derive(Debug, Default)]
pub struct SharedPalette {
    current: RwLock<Option<Arc<PaletteStore>>>,
}

impl SharedPalette {
    /// Create a handle with no palette yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Current palette, if one has been built
    pub fn snapshot(&self) -> Option<Arc<PaletteStore>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Install a new palette, returning the previous one
    pub fn replace(&self, store: PaletteStore) -> Option<Arc<PaletteStore>> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        current.replace(Arc::new(store))
    }

    /// Whether a palette has been installed
    pub fn is_loaded(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
