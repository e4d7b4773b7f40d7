//! Drives the sampler and palette across every cell of the output grid

use rayon::prelude::*;
use std::time::Instant;

use crate::io::error::Result;
use crate::palette::store::{PaletteEntry, PaletteLookup};
use crate::spatial::grid::{ConversionResult, GridDimensions};
use crate::spatial::sampling::{SamplingMode, SourceImage};

/// Converts a source image into tile, wall and paint ids
///
/// Rows are processed in parallel. Each cell depends only on the read-only
/// image and palette, so the result does not depend on scheduling.
#[derive(Debug, Clone, Copy)]
pub struct GridConverter<'a> {
    image: &'a SourceImage,
    mode: SamplingMode,
}

impl<'a> GridConverter<'a> {
    /// Create a converter using interpolated sampling
    pub const fn new(image: &'a SourceImage) -> Self {
        Self {
            image,
            mode: SamplingMode::Interpolated,
        }
    }

    /// Select the sampling mode
    #[must_use]
    pub const fn with_mode(mut self, mode: SamplingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Resolve a single output cell
    ///
    /// Fully transparent samples map to [`PaletteEntry::EMPTY`] without
    /// consulting the palette.
    pub fn convert_cell<L>(
        &self,
        x: usize,
        y: usize,
        dimensions: GridDimensions,
        palette: &L,
    ) -> PaletteEntry
    where
        L: PaletteLookup + ?Sized,
    {
        let [r, g, b, a] = self.image.sample_with(self.mode, x, y, dimensions).0;
        if a == 0 {
            return PaletteEntry::EMPTY;
        }
        palette.lookup(r, g, b)
    }

    /// Convert the whole image
    ///
    /// # Errors
    ///
    /// Returns an error if the assembled grid does not match `dimensions`
    pub fn convert<L>(&self, dimensions: GridDimensions, palette: &L) -> Result<ConversionResult>
    where
        L: PaletteLookup + Sync + ?Sized,
    {
        self.convert_with_progress(dimensions, palette, &|| {})
    }

    /// Convert the whole image, calling `on_row` after each finished row
    ///
    /// # Errors
    ///
    /// Returns an error if the assembled grid does not match `dimensions`
    pub fn convert_with_progress<L, F>(
        &self,
        dimensions: GridDimensions,
        palette: &L,
        on_row: &F,
    ) -> Result<ConversionResult>
    where
        L: PaletteLookup + Sync + ?Sized,
        F: Fn() + Sync,
    {
        let start = Instant::now();
        let mut cells = vec![PaletteEntry::EMPTY; dimensions.cell_count()];

        cells
            .par_chunks_mut(dimensions.width())
            .enumerate()
            .for_each(|(y, row)| {
                for (x, cell) in row.iter_mut().enumerate() {
                    *cell = self.convert_cell(x, y, dimensions, palette);
                }
                on_row();
            });

        let result = ConversionResult::from_cells(dimensions, &cells)?;
        tracing::info!(
            width = dimensions.width(),
            height = dimensions.height(),
            elapsed = ?start.elapsed(),
            "image converted"
        );
        Ok(result)
    }
}

/// Convert `image` onto a grid of `dimensions` using interpolated sampling
///
/// # Errors
///
/// Returns an error if the assembled grid does not match `dimensions`
pub fn convert<L>(
    image: &SourceImage,
    dimensions: GridDimensions,
    palette: &L,
) -> Result<ConversionResult>
where
    L: PaletteLookup + Sync + ?Sized,
{
    GridConverter::new(image).convert(dimensions, palette)
}
