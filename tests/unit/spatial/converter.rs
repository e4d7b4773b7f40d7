//! Tests for grid conversion, transparent cells and palette usage

#[cfg(test)]
mod tests {
    use image::Rgba;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tilemapper::io::configuration::NONE_ID;
    use tilemapper::io::error::Result;
    use tilemapper::palette::store::{PaletteEntry, PaletteLookup};
    use tilemapper::spatial::converter::{GridConverter, convert};
    use tilemapper::spatial::grid::GridDimensions;
    use tilemapper::spatial::sampling::{SamplingMode, SourceImage};

    use crate::scenario_palette;

    /// Encodes the red channel as the tile id and counts every query
    #[derive(Default)]
    struct CountingPalette {
        calls: AtomicUsize,
    }

    impl PaletteLookup for CountingPalette {
        fn lookup(&self, r: u8, g: u8, b: u8) -> PaletteEntry {
            self.calls.fetch_add(1, Ordering::Relaxed);
            PaletteEntry {
                tile: u16::from(r),
                wall: u16::from(g),
                paint: b,
            }
        }
    }

    // Tests transparent cells become empty without querying the palette
    #[test]
    fn test_transparent_cells_skip_lookup() -> Result<()> {
        let pixels = vec![
            Rgba([10, 20, 30, 255]),
            Rgba([40, 50, 60, 0]),
            Rgba([70, 80, 90, 0]),
            Rgba([1, 2, 3, 128]),
        ];
        let image = SourceImage::new(2, 2, pixels)?;
        let palette = CountingPalette::default();

        let result = convert(&image, GridDimensions::new(2, 2)?, &palette)?;

        assert_eq!(palette.calls.load(Ordering::Relaxed), 2);
        assert_eq!(result.get(1, 0), Some(PaletteEntry::EMPTY));
        assert_eq!(result.get(0, 1), Some(PaletteEntry::EMPTY));
        assert_eq!(
            result.get(0, 0),
            Some(PaletteEntry {
                tile: 10,
                wall: 20,
                paint: 30
            })
        );
        assert_eq!(result.get(1, 1).map(|cell| cell.tile), Some(1));
        Ok(())
    }

    // Tests the parallel grid matches converting each cell on its own
    #[test]
    fn test_parallel_matches_per_cell() -> Result<()> {
        let pixels = (0..=u8::MAX)
            .cycle()
            .take(30 * 17)
            .map(|i| {
                let alpha = if i % 5 == 0 { 0 } else { 255 };
                Rgba([i, i.wrapping_mul(7), i.wrapping_mul(13), alpha])
            })
            .collect();
        let image = SourceImage::new(30, 17, pixels)?;
        let palette = CountingPalette::default();
        let dimensions = GridDimensions::new(11, 23)?;

        let converter = GridConverter::new(&image);
        let result = converter.convert(dimensions, &palette)?;

        for y in 0..dimensions.height() {
            for x in 0..dimensions.width() {
                assert_eq!(
                    result.get(x, y),
                    Some(converter.convert_cell(x, y, dimensions, &palette))
                );
            }
        }
        Ok(())
    }

    // Tests the row callback runs once per output row
    #[test]
    fn test_progress_per_row() -> Result<()> {
        let image = SourceImage::filled(5, 5, Rgba([1, 1, 1, 255]))?;
        let rows = AtomicUsize::new(0);

        GridConverter::new(&image).convert_with_progress(
            GridDimensions::new(3, 7)?,
            &CountingPalette::default(),
            &|| {
                rows.fetch_add(1, Ordering::Relaxed);
            },
        )?;

        assert_eq!(rows.load(Ordering::Relaxed), 7);
        Ok(())
    }

    // Tests a 2x2 image upscaled to 4x4 resolves every cell and agrees with direct sampling
    #[test]
    fn test_upscale_scenario() -> Result<()> {
        let store = scenario_palette()?;
        let pixels = vec![
            Rgba([250, 0, 0, 255]),
            Rgba([0, 0, 250, 255]),
            Rgba([200, 30, 30, 255]),
            Rgba([20, 20, 220, 255]),
        ];
        let image = SourceImage::new(2, 2, pixels)?;

        let upscaled = convert(&image, GridDimensions::new(4, 4)?, store)?;
        let direct = convert(&image, GridDimensions::new(2, 2)?, store)?;

        assert_eq!(upscaled.placed_tiles(), 16);
        assert!(upscaled.tiles().iter().all(|&tile| tile != NONE_ID));
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(upscaled.get(2 * x, 2 * y), direct.get(x, y));
            }
        }
        Ok(())
    }

    // Tests a uniform 100x100 image downscaled to 10x10 resolves to one entry everywhere
    #[test]
    fn test_downscale_scenario() -> Result<()> {
        let store = scenario_palette()?;
        let image = SourceImage::filled(100, 100, Rgba([30, 10, 180, 255]))?;

        let result = convert(&image, GridDimensions::new(10, 10)?, store)?;
        let expected = store.lookup(30, 10, 180);

        assert_eq!(expected.tile, 2);
        for y in 0..10 {
            for x in 0..10 {
                assert_eq!(result.get(x, y), Some(expected));
            }
        }
        Ok(())
    }

    // Tests point sampling mode is honoured by the converter
    #[test]
    fn test_point_mode() -> Result<()> {
        let pixels = vec![
            Rgba([1, 0, 0, 255]),
            Rgba([2, 0, 0, 255]),
            Rgba([3, 0, 0, 255]),
            Rgba([4, 0, 0, 255]),
        ];
        let image = SourceImage::new(4, 1, pixels)?;
        let palette = CountingPalette::default();

        let result = GridConverter::new(&image)
            .with_mode(SamplingMode::Point)
            .convert(GridDimensions::new(2, 1)?, &palette)?;

        assert_eq!(result.get(0, 0).map(|cell| cell.tile), Some(1));
        assert_eq!(result.get(1, 0).map(|cell| cell.tile), Some(3));
        Ok(())
    }
}
