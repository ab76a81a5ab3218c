//! Tests for strategy selection and the shared strategy contract

#[cfg(test)]
mod tests {
    use wavetile::algorithm::adjacency::AdjacencyModel;
    use wavetile::algorithm::deadlock::ContradictionPolicy;
    use wavetile::algorithm::eager::EagerStrategy;
    use wavetile::algorithm::frontier::FrontierStrategy;
    use wavetile::algorithm::strategy::{PropagationStrategy, StrategyKind};
    use wavetile::math::random::Sfc32;
    use wavetile::spatial::tiles::{SeedTile, TilePattern, TileSet};

    fn blank_and_wall() -> AdjacencyModel {
        let seeds = [
            SeedTile::new(TilePattern::from_strs(&["..", ".."]).unwrap()),
            SeedTile::new(TilePattern::from_strs(&["@@", "@@"]).unwrap()),
        ];
        AdjacencyModel::build(&TileSet::expand(&seeds).unwrap())
    }

    // Tests strategy names parse case-insensitively and display lowercase
    // Verified by matching names case-sensitively
    #[test]
    fn test_kind_parsing() {
        assert_eq!(StrategyKind::default(), StrategyKind::Eager);
        assert_eq!("LAZY".parse::<StrategyKind>().unwrap(), StrategyKind::Lazy);
        assert_eq!("eager".parse::<StrategyKind>().unwrap(), StrategyKind::Eager);
        assert_eq!(StrategyKind::Lazy.to_string(), "lazy");
        assert!("greedy".parse::<StrategyKind>().is_err());
    }

    // Tests both strategies finish the same pinned grid behind a trait object
    // Verified by dispatching every call to the eager strategy
    #[test]
    fn test_strategies_share_contract() {
        let model = blank_and_wall();
        let strategies: Vec<Box<dyn PropagationStrategy>> = vec![
            Box::new(EagerStrategy::new(4, 5, &model, 20, 4, ContradictionPolicy::Repair).unwrap()),
            Box::new(FrontierStrategy::new(4, 5, &model, 20, ContradictionPolicy::Repair).unwrap()),
        ];

        for mut strategy in strategies {
            let mut rng = Sfc32::from_seed_str("contract");
            assert_eq!((strategy.cols(), strategy.rows()), (5, 4));

            strategy.fix(&model, 2, 2, 1).unwrap();
            let mut steps = 0;
            while !strategy.is_complete(&model) && steps < 20 {
                strategy.step(&model, &mut rng).unwrap();
                steps += 1;
            }

            assert!(strategy.is_complete(&model), "{} did not finish", strategy.kind());
            assert_eq!(strategy.resolved_count(), 20);
            assert!(strategy.contradictions(&model).is_empty());
            assert_eq!(strategy.resolved(0, 3).unwrap(), Some(1));
        }
    }
}
