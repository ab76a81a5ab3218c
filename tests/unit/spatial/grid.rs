//! Tests for the wave grid: creation, cell scanning and neighbor order

#[cfg(test)]
mod tests {
    use wavetile::AlgorithmError;
    use wavetile::spatial::direction::Direction;
    use wavetile::spatial::distribution::CellDistribution;
    use wavetile::spatial::grid::{WaveGrid, validate_dimensions};

    fn grid(rows: usize, cols: usize, tiles: usize) -> WaveGrid {
        WaveGrid::new(rows, cols, tiles).unwrap()
    }

    // Tests every cell starts uniform
    // Verified by initializing cells empty
    #[test]
    fn test_new_grid_is_uniform() {
        let wave = grid(2, 3, 4);

        assert_eq!(wave.rows(), 2);
        assert_eq!(wave.cols(), 3);
        assert!(wave.get(2, 1).is_some_and(|cell| cell.len() == 4));
        assert!(wave.get(3, 0).is_none());
        assert!(!wave.is_complete());
        assert_eq!(wave.collapsed_count(), 0);
    }

    // Tests degenerate dimensions are rejected
    // Verified by allowing zero rows
    #[test]
    fn test_invalid_dimensions() {
        assert!(WaveGrid::new(0, 3, 2).is_err());
        assert!(WaveGrid::new(3, 0, 2).is_err());
        assert!(WaveGrid::new(3, 3, 0).is_err());
        assert!(validate_dimensions(1, 1).is_ok());
    }

    // Tests out-of-bounds access reports the grid size
    // Verified by swapping x and y in the bounds check
    #[test]
    fn test_bounds_errors() {
        let wave = grid(2, 3, 2);

        assert!(wave.distribution(2, 1).is_ok());
        assert!(matches!(
            wave.distribution(1, 2),
            Err(AlgorithmError::OutOfBounds {
                x: 1,
                y: 2,
                cols: 3,
                rows: 2
            })
        ));
    }

    // Tests the least certain cell is found scanning columns first
    // Verified by scanning rows in the outer loop
    #[test]
    fn test_most_certain_scans_columns_first() {
        let mut wave = grid(3, 3, 4);
        let pair = CellDistribution::from_weights([(0, 0.5), (1, 0.5)]);
        wave.set(2, 0, pair.clone()).unwrap();
        wave.set(0, 2, pair).unwrap();
        wave.set(1, 1, CellDistribution::singleton(3)).unwrap();

        let candidate = wave.most_certain().expect("an uncertain cell remains");
        assert_eq!((candidate.x, candidate.y, candidate.size), (0, 2, 2));
        assert_eq!(wave.resolved(1, 1), Some(3));
        assert_eq!(wave.collapsed_count(), 1);
    }

    // Tests collapsed and empty cells are never selected
    // Verified by allowing single-candidate cells
    #[test]
    fn test_complete_with_contradictions() {
        let mut wave = grid(1, 2, 2);
        wave.set(0, 0, CellDistribution::singleton(0)).unwrap();
        wave.set(1, 0, CellDistribution::empty()).unwrap();

        assert!(wave.most_certain().is_none());
        assert!(wave.is_complete());
        assert_eq!(wave.contradictions(), vec![(1, 0)]);
    }

    // Tests neighbors are visited up, right, down, left and clipped
    // Verified by reordering Direction::ALL
    #[test]
    fn test_neighbor_order() {
        let wave = grid(3, 3, 2);

        let center: Vec<_> = wave.neighbors(1, 1).collect();
        assert_eq!(
            center,
            vec![
                (Direction::Up, 1, 0),
                (Direction::Right, 2, 1),
                (Direction::Down, 1, 2),
                (Direction::Left, 0, 1),
            ]
        );

        let corner: Vec<_> = wave.neighbors(0, 0).collect();
        assert_eq!(
            corner,
            vec![(Direction::Right, 1, 0), (Direction::Down, 0, 1)]
        );
    }
}
