//! Tests for edge restrictions and pins

#[cfg(test)]
mod tests {
    use crate::{floor_catalog, permissive_catalog};
    use wavetile::algorithm::executor::{SolverConfig, WaveSolver};
    use wavetile::spatial::policy::Edge;
    use wavetile::spatial::{Grid, PlacementPolicy, TileCatalog, TileRule};
    use wavetile::{AlgorithmError, generate};

    // Edge membership for each border
    #[test]
    fn test_edge_contains() {
        assert!(Edge::Top.contains(2, 0, 3, 3));
        assert!(!Edge::Top.contains(2, 1, 3, 3));
        assert!(Edge::Bottom.contains(0, 2, 3, 3));
        assert!(Edge::Left.contains(0, 1, 3, 3));
        assert!(Edge::Right.contains(2, 1, 3, 3));
        assert!(!Edge::Right.contains(1, 1, 3, 3));
        // A single row is both top and bottom
        assert!(Edge::Bottom.contains(0, 0, 1, 1));
    }

    // Default policy confines floor tiles to the bottom row
    #[test]
    fn test_default_floor_restriction() {
        let catalog = floor_catalog();
        let policy = PlacementPolicy::default();

        let top = policy.allowed_slots(&catalog, 0, 0, 2, 3);
        assert_eq!(top.to_vec(), vec![0]);
        let bottom = policy.allowed_slots(&catalog, 1, 2, 2, 3);
        assert_eq!(bottom.to_vec(), vec![0, 1]);
    }

    // Column restrictions work the same way as row restrictions
    #[test]
    fn test_column_restriction() {
        let catalog = floor_catalog();
        let policy = PlacementPolicy::unrestricted().restrict("floor", Edge::Left);

        assert!(policy.allowed_slots(&catalog, 0, 1, 3, 3).contains(1));
        assert!(!policy.allowed_slots(&catalog, 1, 1, 3, 3).contains(1));
    }

    // Pins narrow a single position to one tile
    #[test]
    fn test_pin_narrows_position() {
        let catalog = permissive_catalog(3);
        let policy = PlacementPolicy::unrestricted().pin(1, 0, 2);
        let grid = Grid::initialize(&catalog, 2, 2, &policy).expect("valid grid");

        let pinned = grid.cell(1, 0).expect("cell in bounds");
        assert_eq!(pinned.options().keys().copied().collect::<Vec<_>>(), vec![2]);
        assert_eq!(pinned.max_entropy(), 1);
        assert_eq!(grid.cell(0, 0).map(|cell| cell.entropy()), Some(3));
    }

    // Pins outside the grid or naming unknown tiles are rejected
    #[test]
    fn test_invalid_pins() {
        let catalog = permissive_catalog(2);
        let outside = PlacementPolicy::unrestricted().pin(5, 0, 0);
        assert!(matches!(
            outside.validate(&catalog, 2, 2),
            Err(AlgorithmError::InvalidParameter { .. })
        ));

        let unknown = PlacementPolicy::unrestricted().pin(0, 0, 9);
        assert!(matches!(
            Grid::initialize(&catalog, 2, 2, &unknown),
            Err(AlgorithmError::InvalidTileIndex { index: 9, .. })
        ));
    }

    // A pin the edge restrictions exclude fails before any solving
    #[test]
    fn test_pin_conflicting_with_restriction() {
        let catalog = floor_catalog();
        let policy = PlacementPolicy::default().pin(0, 0, 1);

        assert!(matches!(
            Grid::initialize(&catalog, 3, 3, &policy),
            Err(AlgorithmError::InvalidParameter {
                parameter: "pin",
                ..
            })
        ));

        let config = SolverConfig {
            policy,
            max_steps: Some(1000),
            ..SolverConfig::default()
        };
        assert!(matches!(
            WaveSolver::new(&catalog, 3, 3, config),
            Err(AlgorithmError::InvalidParameter {
                parameter: "pin",
                ..
            })
        ));

        let bottom_pin = PlacementPolicy::default().pin(0, 2, 1);
        assert!(Grid::initialize(&catalog, 3, 3, &bottom_pin).is_ok());
    }

    // A catalog made only of floor tiles leaves upper rows empty
    #[test]
    fn test_all_floor_catalog_rejected() {
        let catalog = TileCatalog::new(vec![
            TileRule::new(0).with_behavior("floor").allow_all(0, 1),
        ])
        .expect("valid catalog");

        assert!(matches!(
            generate(&catalog, 2, 2),
            Err(AlgorithmError::InvalidParameter {
                parameter: "placement",
                ..
            })
        ));
        assert!(generate(&catalog, 2, 1).is_ok());
    }
}
