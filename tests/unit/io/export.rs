//! Tests for text export of resolved grids

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use wavetile::algorithm::deadlock::ContradictionPolicy;
    use wavetile::algorithm::strategy::StrategyKind;
    use wavetile::io::export::{export_grid, output_path_for, render_grid};
    use wavetile::spatial::tiles::{SeedTile, TilePattern};
    use wavetile::{EngineConfig, Session, initialize};

    fn lazy_session(rows: usize, cols: usize, patterns: &[&[&str]]) -> Session {
        let seeds: Vec<SeedTile> = patterns
            .iter()
            .map(|pattern| SeedTile::new(TilePattern::from_strs(pattern).unwrap()))
            .collect();
        let (_, model) = initialize(&seeds).unwrap();
        let config = EngineConfig {
            strategy: StrategyKind::Lazy,
            contradiction_policy: ContradictionPolicy::Ignore,
            ..EngineConfig::default()
        };
        Session::new(rows, cols, model, "export", config).unwrap()
    }

    // Tests unresolved cells render as question marks
    // Verified by rendering columns before rows
    #[test]
    fn test_render_unresolved() {
        let mut session = lazy_session(2, 3, &[&["..", ".."], &["@@", "@@"]]);
        session.fix(1, 0, 0).unwrap();

        assert_eq!(render_grid(&session), "? 0 ?\n? ? ?\n");
    }

    // Tests contradictions render with their own mark
    // Verified by rendering every unresolved cell the same way
    #[test]
    fn test_render_contradictions() {
        let mut session = lazy_session(2, 2, &[&["aa", "aa"], &["bb", "bb"], &["ab", "ab"]]);
        session.fix(0, 0, 0).unwrap();
        session.fix(1, 1, 1).unwrap();

        assert_eq!(render_grid(&session), "0 !\n! 1\n");
    }

    // Tests the rendered grid is written to disk
    // Verified by writing into the catalog directory instead of the path
    #[test]
    fn test_export_grid() {
        let mut session = lazy_session(2, 2, &[&["."]]);
        session.fix(0, 0, 0).unwrap();
        session.run(10).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.txt");
        export_grid(&session, &path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "0 0\n0 0\n");
        assert!(export_grid(&session, &dir.path().join("missing/grid.txt")).is_err());
    }

    // Tests default output names sit next to the catalog
    // Verified by dropping the parent directory
    #[test]
    fn test_output_path_for() {
        assert_eq!(
            output_path_for(Path::new("demos/meadow.tiles")),
            PathBuf::from("demos/meadow_result.txt")
        );
        assert_eq!(
            output_path_for(Path::new("meadow")),
            PathBuf::from("meadow_result.txt")
        );
    }
}
