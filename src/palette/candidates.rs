//! Tile, wall and paint candidates with externally controlled enabled flags
//!
//! The catalog is loaded once; afterwards only the enabled flags change. A
//! palette build never reads the catalog directly: it works from a
//! [`CandidateSnapshot`] copied at the start of the build, so flag changes made
//! while a build runs are picked up by the next build only.

use bitvec::vec::BitVec;

use crate::io::configuration::{MAX_PAINT_CANDIDATES, MAX_TILE_CANDIDATES};
use crate::io::error::{Result, invalid_catalog, invalid_parameter};

/// Canonical RGB color of a candidate
pub type Rgb = [u8; 3];

/// Which toggleable candidate list an operation addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    /// Foreground tiles
    Tile,
    /// Background walls
    Wall,
}

impl CandidateKind {
    const fn label(self) -> &'static str {
        match self {
            Self::Tile => "tile",
            Self::Wall => "wall",
        }
    }
}

/// An enabled tile or wall candidate as seen by the palette builder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// Catalog id
    pub id: u16,
    /// Canonical color
    pub color: Rgb,
}

/// A paint candidate; paints are always eligible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintCandidate {
    /// Catalog id
    pub id: u8,
    /// Canonical color
    pub color: Rgb,
}

/// Convert a `[0, 1]` float color into canonical RGB, dropping alpha
pub fn rgb_from_unit(color: [f32; 4]) -> Rgb {
    let channel = |value: f32| (value * 255.0).round().clamp(0.0, 255.0) as u8;
    [channel(color[0]), channel(color[1]), channel(color[2])]
}

/// Every known candidate plus the enabled flags for tiles and walls
#[derive(Debug, Clone)]
pub struct CandidateCatalog {
    tile_colors: Vec<Rgb>,
    wall_colors: Vec<Rgb>,
    paint_colors: Vec<Rgb>,
    tile_enabled: BitVec,
    wall_enabled: BitVec,
}

impl CandidateCatalog {
    /// Create a catalog with every tile and wall enabled
    ///
    /// Ids are positions in the given lists.
    ///
    /// # Errors
    ///
    /// Returns an error if there are more tiles or walls than fit below the
    /// `NONE` sentinel, or more than 256 paints
    pub fn new(
        tile_colors: Vec<Rgb>,
        wall_colors: Vec<Rgb>,
        paint_colors: Vec<Rgb>,
    ) -> Result<Self> {
        if tile_colors.len() > MAX_TILE_CANDIDATES {
            return Err(invalid_catalog(&format!(
                "{} tiles exceed the limit of {MAX_TILE_CANDIDATES}",
                tile_colors.len()
            )));
        }
        if wall_colors.len() > MAX_TILE_CANDIDATES {
            return Err(invalid_catalog(&format!(
                "{} walls exceed the limit of {MAX_TILE_CANDIDATES}",
                wall_colors.len()
            )));
        }
        if paint_colors.len() > MAX_PAINT_CANDIDATES {
            return Err(invalid_catalog(&format!(
                "{} paints exceed the limit of {MAX_PAINT_CANDIDATES}",
                paint_colors.len()
            )));
        }

        let tile_enabled = BitVec::repeat(true, tile_colors.len());
        let wall_enabled = BitVec::repeat(true, wall_colors.len());

        Ok(Self {
            tile_colors,
            wall_colors,
            paint_colors,
            tile_enabled,
            wall_enabled,
        })
    }

    /// Create a catalog from `[0, 1]` float RGBA colors
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`CandidateCatalog::new`]
    pub fn from_unit_colors(
        tiles: &[[f32; 4]],
        walls: &[[f32; 4]],
        paints: &[[f32; 4]],
    ) -> Result<Self> {
        let convert = |colors: &[[f32; 4]]| colors.iter().copied().map(rgb_from_unit).collect();
        Self::new(convert(tiles), convert(walls), convert(paints))
    }

    fn colors(&self, kind: CandidateKind) -> &[Rgb] {
        match kind {
            CandidateKind::Tile => &self.tile_colors,
            CandidateKind::Wall => &self.wall_colors,
        }
    }

    fn flags(&self, kind: CandidateKind) -> &BitVec {
        match kind {
            CandidateKind::Tile => &self.tile_enabled,
            CandidateKind::Wall => &self.wall_enabled,
        }
    }

    fn flags_mut(&mut self, kind: CandidateKind) -> &mut BitVec {
        match kind {
            CandidateKind::Tile => &mut self.tile_enabled,
            CandidateKind::Wall => &mut self.wall_enabled,
        }
    }

    /// Number of candidates of a kind
    pub fn count(&self, kind: CandidateKind) -> usize {
        self.colors(kind).len()
    }

    /// Number of paint candidates
    pub fn paint_count(&self) -> usize {
        self.paint_colors.len()
    }

    /// Canonical color of a tile or wall
    pub fn color(&self, kind: CandidateKind, id: u16) -> Option<Rgb> {
        self.colors(kind).get(usize::from(id)).copied()
    }

    /// Canonical color of a paint
    pub fn paint_color(&self, id: u8) -> Option<Rgb> {
        self.paint_colors.get(usize::from(id)).copied()
    }

    /// Whether a tile or wall is currently enabled; unknown ids are disabled
    pub fn is_enabled(&self, kind: CandidateKind, id: u16) -> bool {
        self.flags(kind)
            .get(usize::from(id))
            .is_some_and(|flag| *flag)
    }

    /// Number of enabled candidates of a kind
    pub fn enabled_count(&self, kind: CandidateKind) -> usize {
        self.flags(kind).count_ones()
    }

    /// Enable or disable a single tile or wall
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not in the catalog
    pub fn set_enabled(&mut self, kind: CandidateKind, id: u16, enabled: bool) -> Result<()> {
        let count = self.count(kind);
        let flags = self.flags_mut(kind);
        if usize::from(id) >= count {
            return Err(invalid_parameter(
                kind.label(),
                &id,
                &format!("id is outside the catalog ({count} entries)"),
            ));
        }
        flags.set(usize::from(id), enabled);
        Ok(())
    }

    /// Enable or disable every candidate of a kind
    pub fn set_all(&mut self, kind: CandidateKind, enabled: bool) {
        self.flags_mut(kind).fill(enabled);
    }

    /// Copy the enabled candidates for a palette build
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog has no paints; every palette entry
    /// needs a paint, so an empty paint list is a configuration error
    pub fn snapshot(&self) -> Result<CandidateSnapshot> {
        if self.paint_colors.is_empty() {
            return Err(invalid_catalog(&"at least one paint candidate is required"));
        }

        let enabled = |kind: CandidateKind| -> Vec<Candidate> {
            self.colors(kind)
                .iter()
                .zip(self.flags(kind).iter().by_vals())
                .enumerate()
                .filter(|(_, (_, enabled))| *enabled)
                .map(|(id, (&color, _))| Candidate {
                    id: id as u16,
                    color,
                })
                .collect()
        };

        let paints = self
            .paint_colors
            .iter()
            .enumerate()
            .map(|(id, &color)| PaintCandidate {
                id: id as u8,
                color,
            })
            .collect();

        Ok(CandidateSnapshot {
            tiles: enabled(CandidateKind::Tile),
            walls: enabled(CandidateKind::Wall),
            paints,
        })
    }
}

/// Immutable copy of the enabled candidates taken at the start of a build
///
/// Every list is sorted by ascending id, which the builder relies on for its
/// lowest-id tie break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSnapshot {
    tiles: Vec<Candidate>,
    walls: Vec<Candidate>,
    paints: Vec<PaintCandidate>,
}

impl CandidateSnapshot {
    /// Enabled tiles in ascending id order
    pub fn tiles(&self) -> &[Candidate] {
        &self.tiles
    }

    /// Enabled walls in ascending id order
    pub fn walls(&self) -> &[Candidate] {
        &self.walls
    }

    /// All paints in ascending id order; never empty
    pub fn paints(&self) -> &[PaintCandidate] {
        &self.paints
    }
}
