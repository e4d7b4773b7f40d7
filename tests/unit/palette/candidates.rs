//! Tests for the candidate catalog, enabled flags and build snapshots

#[cfg(test)]
mod tests {
    use tilemapper::io::error::{Result, TileMapError};
    use tilemapper::palette::candidates::{
        Candidate, CandidateCatalog, CandidateKind, PaintCandidate, rgb_from_unit,
    };

    fn catalog() -> Result<CandidateCatalog> {
        CandidateCatalog::new(
            vec![[10, 10, 10], [20, 20, 20], [30, 30, 30]],
            vec![[40, 40, 40], [50, 50, 50]],
            vec![[0, 0, 0], [255, 255, 255]],
        )
    }

    // Tests float colors round to the nearest byte and clamp out-of-range values
    #[test]
    fn test_rgb_from_unit() {
        assert_eq!(rgb_from_unit([1.0, 0.0, 0.5, 1.0]), [255, 0, 128]);
        assert_eq!(rgb_from_unit([1.5, -0.2, 0.2, 0.0]), [255, 0, 51]);
    }

    // Tests a new catalog enables every tile and wall
    #[test]
    fn test_new_catalog_enables_everything() -> Result<()> {
        let catalog = catalog()?;

        assert_eq!(catalog.count(CandidateKind::Tile), 3);
        assert_eq!(catalog.count(CandidateKind::Wall), 2);
        assert_eq!(catalog.paint_count(), 2);
        assert_eq!(catalog.enabled_count(CandidateKind::Tile), 3);
        assert_eq!(catalog.enabled_count(CandidateKind::Wall), 2);
        assert_eq!(catalog.color(CandidateKind::Wall, 1), Some([50, 50, 50]));
        assert_eq!(catalog.paint_color(1), Some([255, 255, 255]));
        assert_eq!(catalog.color(CandidateKind::Tile, 3), None);
        Ok(())
    }

    // Tests toggling flags and rejecting unknown ids
    #[test]
    fn test_set_enabled() -> Result<()> {
        let mut catalog = catalog()?;

        catalog.set_enabled(CandidateKind::Tile, 1, false)?;
        assert!(!catalog.is_enabled(CandidateKind::Tile, 1));
        assert!(catalog.is_enabled(CandidateKind::Tile, 2));
        assert!(!catalog.is_enabled(CandidateKind::Tile, 99));

        let result = catalog.set_enabled(CandidateKind::Wall, 2, true);
        assert!(matches!(result, Err(TileMapError::InvalidParameter { .. })));

        catalog.set_all(CandidateKind::Wall, false);
        assert_eq!(catalog.enabled_count(CandidateKind::Wall), 0);
        Ok(())
    }

    // Tests snapshots keep only enabled candidates in ascending id order
    #[test]
    fn test_snapshot_filters_disabled() -> Result<()> {
        let mut catalog = catalog()?;
        catalog.set_enabled(CandidateKind::Tile, 1, false)?;
        catalog.set_enabled(CandidateKind::Wall, 0, false)?;

        let snapshot = catalog.snapshot()?;
        assert_eq!(
            snapshot.tiles(),
            &[
                Candidate {
                    id: 0,
                    color: [10, 10, 10]
                },
                Candidate {
                    id: 2,
                    color: [30, 30, 30]
                },
            ]
        );
        assert_eq!(
            snapshot.walls(),
            &[Candidate {
                id: 1,
                color: [50, 50, 50]
            }]
        );
        assert_eq!(
            snapshot.paints().first(),
            Some(&PaintCandidate {
                id: 0,
                color: [0, 0, 0]
            })
        );
        Ok(())
    }

    // Tests a snapshot does not observe later flag changes
    #[test]
    fn test_snapshot_is_a_copy() -> Result<()> {
        let mut catalog = catalog()?;
        let snapshot = catalog.snapshot()?;

        catalog.set_all(CandidateKind::Tile, false);

        assert_eq!(snapshot.tiles().len(), 3);
        assert!(catalog.snapshot()?.tiles().is_empty());
        Ok(())
    }

    // Tests a catalog without paints cannot be snapshotted
    #[test]
    fn test_snapshot_requires_paint() -> Result<()> {
        let catalog = CandidateCatalog::new(vec![[1, 2, 3]], Vec::new(), Vec::new())?;
        assert!(matches!(
            catalog.snapshot(),
            Err(TileMapError::InvalidCatalog { .. })
        ));
        Ok(())
    }

    // Tests id limits for paints
    #[test]
    fn test_paint_limit() {
        let paints = vec![[0, 0, 0]; 257];
        let result = CandidateCatalog::new(Vec::new(), Vec::new(), paints);
        assert!(matches!(result, Err(TileMapError::InvalidCatalog { .. })));

        let paints = vec![[0, 0, 0]; 256];
        let result = CandidateCatalog::new(Vec::new(), Vec::new(), paints);
        assert!(result.is_ok());
    }
}
