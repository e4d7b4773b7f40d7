//! Tests for the binary color and validity catalog files

#[cfg(test)]
mod tests {
    use std::io::Write;
    use tilemapper::TileMapError;
    use tilemapper::io::catalog::{
        CatalogColors, ValidIds, build_catalog, load_catalog, read_color_info, read_valid_ids,
    };
    use tilemapper::io::error::Result;
    use tilemapper::palette::CandidateKind;

    fn push_colors(bytes: &mut Vec<u8>, colors: &[[f32; 4]]) {
        bytes.extend_from_slice(&(colors.len() as i32).to_le_bytes());
        for channel in colors.iter().flatten() {
            bytes.extend_from_slice(&channel.to_le_bytes());
        }
    }

    fn push_ids(bytes: &mut Vec<u8>, ids: &[i32]) {
        bytes.extend_from_slice(&(ids.len() as i32).to_le_bytes());
        for id in ids {
            bytes.extend_from_slice(&id.to_le_bytes());
        }
    }

    fn color_file() -> Vec<u8> {
        let mut bytes = Vec::new();
        push_colors(&mut bytes, &[[1.0, 0.0, 0.0, 1.0], [0.0, 0.0, 1.0, 1.0]]);
        push_colors(&mut bytes, &[[0.5, 0.5, 0.5, 1.0]]);
        push_colors(&mut bytes, &[[0.0, 0.0, 0.0, 1.0], [1.0, 1.0, 1.0, 1.0]]);
        bytes
    }

    // Tests the three color arrays are read in tile, wall, paint order
    #[test]
    fn test_read_color_info() -> Result<()> {
        let colors = read_color_info(color_file().as_slice())?;

        assert_eq!(
            colors.tiles,
            vec![[1.0, 0.0, 0.0, 1.0], [0.0, 0.0, 1.0, 1.0]]
        );
        assert_eq!(colors.walls, vec![[0.5, 0.5, 0.5, 1.0]]);
        assert_eq!(colors.paints.len(), 2);
        Ok(())
    }

    // Tests truncated color data is rejected
    #[test]
    fn test_truncated_color_file() {
        let bytes = color_file();
        let truncated = bytes.get(..bytes.len() - 2).unwrap_or_default();

        let result = read_color_info(truncated);

        assert!(matches!(result, Err(TileMapError::InvalidCatalog { .. })));
    }

    // Tests negative and oversized counts are rejected before allocating
    #[test]
    fn test_invalid_counts() {
        assert!(matches!(
            read_color_info((-1i32).to_le_bytes().as_slice()),
            Err(TileMapError::InvalidCatalog { .. })
        ));
        assert!(matches!(
            read_color_info(i32::MAX.to_le_bytes().as_slice()),
            Err(TileMapError::InvalidCatalog { .. })
        ));
    }

    // Tests the validity file lists tiles then walls
    #[test]
    fn test_read_valid_ids() -> Result<()> {
        let mut bytes = Vec::new();
        push_ids(&mut bytes, &[1, 0]);
        push_ids(&mut bytes, &[]);

        let valid = read_valid_ids(bytes.as_slice())?;

        assert_eq!(valid.tiles, vec![1, 0]);
        assert!(valid.walls.is_empty());
        Ok(())
    }

    // Tests ids outside the tile id range are rejected
    #[test]
    fn test_out_of_range_valid_id() {
        let mut bytes = Vec::new();
        push_ids(&mut bytes, &[70_000]);
        push_ids(&mut bytes, &[]);

        assert!(matches!(
            read_valid_ids(bytes.as_slice()),
            Err(TileMapError::InvalidCatalog { .. })
        ));
    }

    // Tests validity data enables only the listed ids
    #[test]
    fn test_build_catalog_with_validity() -> Result<()> {
        let colors = read_color_info(color_file().as_slice())?;
        let valid = ValidIds {
            tiles: vec![1],
            walls: Vec::new(),
        };

        let catalog = build_catalog(&colors, Some(&valid))?;

        assert!(!catalog.is_enabled(CandidateKind::Tile, 0));
        assert!(catalog.is_enabled(CandidateKind::Tile, 1));
        assert_eq!(catalog.enabled_count(CandidateKind::Wall), 0);
        assert_eq!(catalog.color(CandidateKind::Tile, 0), Some([255, 0, 0]));
        assert_eq!(catalog.color(CandidateKind::Wall, 0), Some([128, 128, 128]));
        Ok(())
    }

    // Tests everything starts enabled without validity data
    #[test]
    fn test_build_catalog_all_enabled() -> Result<()> {
        let colors = CatalogColors {
            tiles: vec![[0.0, 0.0, 0.0, 1.0]; 3],
            walls: vec![[1.0, 1.0, 1.0, 1.0]; 2],
            paints: vec![[0.0, 0.0, 0.0, 1.0]],
        };

        let catalog = build_catalog(&colors, None)?;

        assert_eq!(catalog.enabled_count(CandidateKind::Tile), 3);
        assert_eq!(catalog.enabled_count(CandidateKind::Wall), 2);
        Ok(())
    }

    // Tests a validity id beyond the catalog is an error
    #[test]
    fn test_build_catalog_unknown_valid_id() -> Result<()> {
        let colors = read_color_info(color_file().as_slice())?;
        let valid = ValidIds {
            tiles: vec![5],
            walls: Vec::new(),
        };

        assert!(matches!(
            build_catalog(&colors, Some(&valid)),
            Err(TileMapError::InvalidParameter { .. })
        ));
        Ok(())
    }

    // Tests loading both files from disk
    #[test]
    fn test_load_catalog_from_files() -> Result<()> {
        let mut colors_file = tempfile::NamedTempFile::new()?;
        colors_file.write_all(&color_file())?;
        let mut valid_file = tempfile::NamedTempFile::new()?;
        let mut valid_bytes = Vec::new();
        push_ids(&mut valid_bytes, &[0]);
        push_ids(&mut valid_bytes, &[0]);
        valid_file.write_all(&valid_bytes)?;

        let catalog = load_catalog(colors_file.path(), Some(valid_file.path()))?;

        assert_eq!(catalog.count(CandidateKind::Tile), 2);
        assert_eq!(catalog.enabled_count(CandidateKind::Tile), 1);
        assert_eq!(catalog.paint_count(), 2);
        Ok(())
    }

    // Tests a missing file reports a file system error
    #[test]
    fn test_load_catalog_missing_file() -> Result<()> {
        let dir = tempfile::tempdir()?;

        let result = load_catalog(&dir.path().join("absent.bin"), None);

        assert!(matches!(result, Err(TileMapError::FileSystem { .. })));
        Ok(())
    }
}
