//! Output grid dimensions and the per-cell conversion result

use ndarray::Array2;

use crate::io::configuration::NONE_ID;
use crate::io::error::{Result, precondition};
use crate::palette::store::PaletteEntry;

/// Validated output grid size in tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridDimensions {
    width: usize,
    height: usize,
}

impl GridDimensions {
    /// Create grid dimensions
    ///
    /// # Errors
    ///
    /// Returns a precondition error if either side is zero
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(precondition(
                "grid dimensions",
                &format!("output grid {width}x{height} has no cells"),
            ));
        }
        Ok(Self { width, height })
    }

    /// Fix the width and derive the height from the source aspect ratio
    ///
    /// The derived side is truncated and never drops below one tile.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting dimensions are invalid
    pub fn with_width_locked(
        width: usize,
        source_width: usize,
        source_height: usize,
    ) -> Result<Self> {
        let height = scale_side(width, source_height, source_width);
        Self::new(width, height)
    }

    /// Fix the height and derive the width from the source aspect ratio
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting dimensions are invalid
    pub fn with_height_locked(
        height: usize,
        source_width: usize,
        source_height: usize,
    ) -> Result<Self> {
        let width = scale_side(height, source_width, source_height);
        Self::new(width, height)
    }

    /// Grid width in tiles
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in tiles
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.width * self.height
    }
}

fn scale_side(side: usize, numerator: usize, denominator: usize) -> usize {
    if denominator == 0 {
        return side;
    }
    let ratio = numerator as f32 / denominator as f32;
    ((side as f32 * ratio) as usize).max(1)
}

/// Tile, wall and paint ids for every cell of a converted image
///
/// Planes are indexed `[row, col]`, i.e. `[y, x]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    dimensions: GridDimensions,
    tiles: Array2<u16>,
    walls: Array2<u16>,
    paints: Array2<u8>,
}

impl ConversionResult {
    /// Assemble a result from row-major cells
    ///
    /// # Errors
    ///
    /// Returns a precondition error if the cell count does not match the
    /// dimensions
    pub fn from_cells(dimensions: GridDimensions, cells: &[PaletteEntry]) -> Result<Self> {
        if cells.len() != dimensions.cell_count() {
            return Err(precondition(
                "conversion result",
                &format!(
                    "{} cells given for a {}x{} grid",
                    cells.len(),
                    dimensions.width(),
                    dimensions.height()
                ),
            ));
        }

        let shape = (dimensions.height(), dimensions.width());
        let plane = |field: fn(&PaletteEntry) -> u16| {
            Array2::from_shape_vec(shape, cells.iter().map(field).collect())
                .map_err(|e| precondition("conversion result", &e))
        };

        let tiles = plane(|cell| cell.tile)?;
        let walls = plane(|cell| cell.wall)?;
        let paints = Array2::from_shape_vec(shape, cells.iter().map(|cell| cell.paint).collect())
            .map_err(|e| precondition("conversion result", &e))?;

        Ok(Self {
            dimensions,
            tiles,
            walls,
            paints,
        })
    }

    /// Grid dimensions
    pub const fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    /// Grid width in tiles
    pub const fn width(&self) -> usize {
        self.dimensions.width()
    }

    /// Grid height in tiles
    pub const fn height(&self) -> usize {
        self.dimensions.height()
    }

    /// Entry at column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> Option<PaletteEntry> {
        Some(PaletteEntry {
            tile: *self.tiles.get([y, x])?,
            wall: *self.walls.get([y, x])?,
            paint: *self.paints.get([y, x])?,
        })
    }

    /// Tile ids, `NONE_ID` where nothing is placed
    pub const fn tiles(&self) -> &Array2<u16> {
        &self.tiles
    }

    /// Wall ids, `NONE_ID` where nothing is placed
    pub const fn walls(&self) -> &Array2<u16> {
        &self.walls
    }

    /// Paint ids
    pub const fn paints(&self) -> &Array2<u8> {
        &self.paints
    }

    /// Number of cells with a tile
    pub fn placed_tiles(&self) -> usize {
        self.tiles.iter().filter(|&&tile| tile != NONE_ID).count()
    }

    /// Number of cells with a wall
    pub fn placed_walls(&self) -> usize {
        self.walls.iter().filter(|&&wall| wall != NONE_ID).count()
    }

    /// Number of cells with neither tile nor wall
    pub fn empty_cells(&self) -> usize {
        self.tiles
            .iter()
            .zip(self.walls.iter())
            .filter(|&(&tile, &wall)| tile == NONE_ID && wall == NONE_ID)
            .count()
    }
}
