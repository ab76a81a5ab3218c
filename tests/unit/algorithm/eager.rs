//! Tests for the full-distribution strategy

#[cfg(test)]
mod tests {
    use wavetile::AlgorithmError;
    use wavetile::algorithm::adjacency::AdjacencyModel;
    use wavetile::algorithm::deadlock::ContradictionPolicy;
    use wavetile::algorithm::eager::EagerStrategy;
    use wavetile::algorithm::strategy::{PropagationStrategy, StrategyKind};
    use wavetile::math::random::Sfc32;
    use wavetile::spatial::distribution::CellDistribution;
    use wavetile::spatial::tiles::{SeedTile, TilePattern, TileSet};

    fn model(rows: &[&[&str]]) -> AdjacencyModel {
        let seeds: Vec<SeedTile> = rows
            .iter()
            .map(|pattern| SeedTile::new(TilePattern::from_strs(pattern).unwrap()))
            .collect();
        AdjacencyModel::build(&TileSet::expand(&seeds).unwrap())
    }

    fn blank_and_wall() -> AdjacencyModel {
        model(&[&["...", "...", "..."], &["@@@", "@@@", "@@@"]])
    }

    // 0 = aa/aa, 1 = bb/bb, 2..=5 = rotations of ab/ab
    fn bridged() -> AdjacencyModel {
        model(&[&["aa", "aa"], &["bb", "bb"], &["ab", "ab"]])
    }

    // Pins opposite corners of a 2x2 grid so the other two cells run empty
    fn stranded(policy: ContradictionPolicy) -> (AdjacencyModel, EagerStrategy) {
        let model = bridged();
        let mut strategy = EagerStrategy::new(2, 2, &model, 20, 4, policy).unwrap();
        strategy.fix(&model, 0, 0, 0).unwrap();
        strategy.fix(&model, 1, 1, 1).unwrap();
        (model, strategy)
    }

    // Tests a fresh grid starts uniform
    // Verified by starting cells empty
    #[test]
    fn test_new_grid_is_uniform() {
        let model = blank_and_wall();
        let strategy =
            EagerStrategy::new(2, 4, &model, 20, 4, ContradictionPolicy::Repair).unwrap();

        assert_eq!(strategy.kind(), StrategyKind::Eager);
        assert_eq!((strategy.cols(), strategy.rows()), (4, 2));
        assert_eq!(
            strategy.distribution(&model, 3, 1).unwrap(),
            CellDistribution::uniform(2)
        );
        assert_eq!(strategy.resolved_count(), 0);
        assert!(!strategy.is_complete(&model));
        assert!(strategy.distribution(&model, 4, 0).is_err());
    }

    // Tests fix validates its inputs before touching the grid
    // Verified by pinning before the bounds check
    #[test]
    fn test_fix_validation() {
        let model = blank_and_wall();
        let mut strategy =
            EagerStrategy::new(3, 3, &model, 20, 4, ContradictionPolicy::Repair).unwrap();

        assert!(matches!(
            strategy.fix(&model, 3, 0, 0),
            Err(AlgorithmError::OutOfBounds { x: 3, y: 0, .. })
        ));
        assert!(matches!(
            strategy.fix(&model, 0, 0, 2),
            Err(AlgorithmError::UnknownTile { tile: 2, .. })
        ));
        assert_eq!(strategy.resolved_count(), 0);

        strategy.fix(&model, 1, 1, 0).unwrap();
        assert!(strategy.is_complete(&model));
        assert_eq!(strategy.grid().collapsed_count(), 9);
    }

    // Tests one step collapses a connected uniform grid
    // Verified by skipping propagation after a collapse
    #[test]
    fn test_step_collapses_grid() {
        let model = blank_and_wall();
        let mut strategy =
            EagerStrategy::new(3, 3, &model, 20, 4, ContradictionPolicy::Repair).unwrap();
        let mut rng = Sfc32::from_seed_str("eager");

        assert!(strategy.step(&model, &mut rng).unwrap());
        assert!(strategy.is_complete(&model));

        let first = strategy.resolved(0, 0).unwrap();
        assert!(first.is_some());
        for x in 0..3 {
            for y in 0..3 {
                assert_eq!(strategy.resolved(x, y).unwrap(), first);
            }
        }
        assert!(!strategy.step(&model, &mut rng).unwrap());
    }

    // Tests ignored contradictions count as a finished grid
    // Verified by requiring no contradictions under every policy
    #[test]
    fn test_ignore_policy_completes() {
        let (model, mut strategy) = stranded(ContradictionPolicy::Ignore);
        let mut rng = Sfc32::from_seed_str("ignore");

        assert_eq!(strategy.contradictions(&model), vec![(0, 1), (1, 0)]);
        assert!(strategy.is_complete(&model));
        assert!(!strategy.step(&model, &mut rng).unwrap());
    }

    // Tests the fail policy reports the first contradiction in scan order
    // Verified by scanning rows in the outer loop
    #[test]
    fn test_fail_policy_errors() {
        let (model, mut strategy) = stranded(ContradictionPolicy::Fail);
        let mut rng = Sfc32::from_seed_str("fail");

        assert!(!strategy.is_complete(&model));
        assert!(matches!(
            strategy.step(&model, &mut rng),
            Err(AlgorithmError::Contradiction { x: 0, y: 1 })
        ));
    }

    // Tests repair clears around contradictions without touching pins
    // Verified by clearing pinned cells during repair
    #[test]
    fn test_repair_policy_keeps_pins() {
        let (model, mut strategy) = stranded(ContradictionPolicy::Repair);
        let mut rng = Sfc32::from_seed_str("repair");

        assert!(strategy.step(&model, &mut rng).unwrap());
        assert_eq!(strategy.resolved(0, 0).unwrap(), Some(0));
        assert_eq!(strategy.resolved(1, 1).unwrap(), Some(1));
        assert!(!strategy.is_complete(&model));
    }
}
