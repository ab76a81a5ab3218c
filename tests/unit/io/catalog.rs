//! Tests for tile catalog parsing

#[cfg(test)]
mod tests {
    use std::io::Write;
    use wavetile::AlgorithmError;
    use wavetile::io::catalog::{load_catalog, parse_catalog};

    fn error_line(text: &str) -> Option<usize> {
        match parse_catalog(text) {
            Err(AlgorithmError::InvalidCatalog { line, .. }) => Some(line),
            _ => None,
        }
    }

    // Tests headers, attributes, comments and blank lines
    // Verified by applying attributes to the following tile
    #[test]
    fn test_parse_catalog() {
        let text = "\
; grass with a rare boulder
tile weight=10
...
...
...

tile weight=0.05 forbid=rock
...
.@.
...
";
        let seeds = parse_catalog(text).unwrap();

        assert_eq!(seeds.len(), 2);
        assert!((seeds[0].weight - 10.0).abs() < f64::EPSILON);
        assert_eq!(seeds[0].exclusion_tag, None);
        assert!((seeds[1].weight - 0.05).abs() < f64::EPSILON);
        assert_eq!(seeds[1].exclusion_tag.as_deref(), Some("rock"));
        assert_eq!(seeds[1].pattern.to_strings(), vec!["...", ".@.", "..."]);
    }

    // Tests rows are taken verbatim apart from carriage returns
    // Verified by trimming pattern rows
    #[test]
    fn test_rows_are_verbatim() {
        let seeds = parse_catalog("tile\r\n.#\r\n#.\r\ntile\n  \n  \n").unwrap();

        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds[0].pattern.to_strings(), vec![".#", "#."]);
        assert_eq!(seeds[1].pattern.to_strings(), vec!["  ", "  "]);
        assert!((seeds[0].weight - 1.0).abs() < f64::EPSILON);
    }

    // Tests errors point at the 1-based line that failed
    // Verified by reporting zero-based line numbers
    #[test]
    fn test_error_lines() {
        assert_eq!(error_line(""), Some(0));
        assert_eq!(error_line("; only a comment\n"), Some(0));
        assert_eq!(error_line("grass\n."), Some(1));
        assert_eq!(error_line("\ntile weight=abc\n."), Some(2));
        assert_eq!(error_line("tile weight=-2\n."), Some(1));
        assert_eq!(error_line("tile color=red\n."), Some(1));
        assert_eq!(error_line("tile forbid=\n."), Some(1));
        assert_eq!(error_line("tile heavy\n."), Some(1));
        assert_eq!(error_line("tile"), Some(1));
        assert_eq!(error_line("tile\n..\n."), Some(3));
        assert_eq!(error_line("tile\n...\n..."), Some(1));
        assert_eq!(error_line("tile\n\n"), Some(2));
    }

    // Tests loading from disk and reporting unreadable files
    // Verified by returning an empty catalog for missing files
    #[test]
    fn test_load_catalog() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "tile\n..\n..\ntile weight=2\n@@\n@@\n").unwrap();

        let seeds = load_catalog(file.path()).unwrap();
        assert_eq!(seeds.len(), 2);

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.tiles");
        assert!(matches!(
            load_catalog(&missing),
            Err(AlgorithmError::FileSystem {
                operation: "read catalog",
                ..
            })
        ));
    }
}
