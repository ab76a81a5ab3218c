//! Tests for tile patterns, symmetry expansion and tile set normalization

#[cfg(test)]
mod tests {
    use wavetile::AlgorithmError;
    use wavetile::spatial::direction::Direction;
    use wavetile::spatial::tiles::{SeedTile, TilePattern, TileSet};

    fn pattern(rows: &[&str]) -> TilePattern {
        TilePattern::from_strs(rows).expect("valid pattern")
    }

    // Tests quarter turn follows new[i][j] = old[k-1-j][i]
    // Verified by inverting axis 0 instead of axis 1 in rotate_90
    #[test]
    fn test_rotate_90_matches_reference_mapping() {
        let original = pattern(&["ab", "cd"]);
        let rotated = original.rotate_90();

        assert_eq!(rotated.to_strings(), vec!["ca", "db"]);
        assert_eq!(
            original.rotate_90().rotate_90().rotate_90().rotate_90(),
            original
        );
    }

    // Tests reflection reverses every row
    // Verified by reversing rows instead of columns
    #[test]
    fn test_reflect_reverses_rows() {
        let reflected = pattern(&["ab", "cd"]).reflect();
        assert_eq!(reflected.to_strings(), vec!["ba", "dc"]);
    }

    // Tests rotation and reflection on an odd side keep the center in place
    // Verified by transposing without inverting the column axis
    #[test]
    fn test_odd_side_rotation_and_reflection() {
        let original = pattern(&["abc", "def", "ghi"]);

        assert_eq!(original.rotate_90().to_strings(), vec!["gda", "heb", "ifc"]);
        assert_eq!(original.reflect().to_strings(), vec!["cba", "fed", "ihg"]);
        assert_eq!(original.reflect().reflect(), original);
    }

    // Tests border extraction for every side
    // Verified by exchanging the left and up borders
    #[test]
    fn test_edges_read_each_border() {
        let tile = pattern(&["abc", "def", "ghi"]);

        assert_eq!(tile.edge(Direction::Up), vec!['a', 'b', 'c']);
        assert_eq!(tile.edge(Direction::Down), vec!['g', 'h', 'i']);
        assert_eq!(tile.edge(Direction::Left), vec!['a', 'd', 'g']);
        assert_eq!(tile.edge(Direction::Right), vec!['c', 'f', 'i']);
    }

    // Tests orbit sizes for asymmetric, mirror-symmetric and uniform patterns
    // Verified by skipping deduplication of variants
    #[test]
    fn test_symmetry_variants_are_deduplicated() {
        let asymmetric = SeedTile::new(pattern(&["ab", "cd"]));
        let striped = SeedTile::new(pattern(&["ab", "ab"]));
        let uniform = SeedTile::new(pattern(&["..", ".."]));

        assert_eq!(asymmetric.symmetry_variants().len(), 8);
        assert_eq!(striped.symmetry_variants().len(), 4);
        assert_eq!(uniform.symmetry_variants().len(), 1);
    }

    // Tests variant order is seed, three rotations, then reflections
    // Verified by generating reflections before rotations
    #[test]
    fn test_symmetry_variant_order() {
        let variants = SeedTile::new(pattern(&["ab", "ab"])).symmetry_variants();
        let rows: Vec<Vec<String>> = variants.iter().map(TilePattern::to_strings).collect();

        assert_eq!(
            rows,
            vec![
                vec!["ab", "ab"],
                vec!["aa", "bb"],
                vec!["ba", "ba"],
                vec!["bb", "aa"],
            ]
        );
    }

    // Tests ids are dense in seed order and probabilities normalize weights
    // Verified by assigning ids per seed instead of globally
    #[test]
    fn test_expand_assigns_dense_ids_and_probabilities() {
        let seeds = vec![
            SeedTile::new(pattern(&["..", ".."])).with_weight(3.0),
            SeedTile::new(pattern(&["ab", "ab"])).with_exclusion_tag("river"),
        ];
        let tiles = TileSet::expand(&seeds).unwrap();

        assert_eq!(tiles.len(), 5);
        assert_eq!(tiles.side(), 2);
        for (index, tile) in tiles.iter().enumerate() {
            assert_eq!(tile.id, index);
        }

        let probabilities = tiles.probabilities();
        assert!((probabilities.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(probabilities.first().is_some_and(|p| (p - 3.0 / 7.0).abs() < 1e-12));
        assert!(probabilities.get(4).is_some_and(|p| (p - 1.0 / 7.0).abs() < 1e-12));

        assert!(tiles.get(0).is_some_and(|tile| tile.exclusion_tag.is_none()));
        assert!(
            tiles
                .get(3)
                .is_some_and(|tile| tile.exclusion_tag.as_deref() == Some("river"))
        );
    }

    // Tests identical patterns from different seeds stay distinct tiles
    // Verified by deduplicating across the whole catalog
    #[test]
    fn test_expand_keeps_duplicates_across_seeds() {
        let seeds = vec![
            SeedTile::new(pattern(&["..", ".."])),
            SeedTile::new(pattern(&["..", ".."])),
        ];
        let tiles = TileSet::expand(&seeds).unwrap();
        assert_eq!(tiles.len(), 2);
    }

    // Tests exclusion requires equal, set tags
    // Verified by treating two missing tags as equal
    #[test]
    fn test_excludes_requires_matching_tags() {
        let seeds = vec![
            SeedTile::new(pattern(&["a"])).with_exclusion_tag("rock"),
            SeedTile::new(pattern(&["b"])).with_exclusion_tag("rock"),
            SeedTile::new(pattern(&["c"])),
            SeedTile::new(pattern(&["d"])),
        ];
        let tiles = TileSet::expand(&seeds).unwrap();
        let tile = |id| tiles.get(id).expect("tile exists");

        assert!(tile(0).excludes(tile(1)));
        assert!(tile(0).excludes(tile(0)));
        assert!(!tile(0).excludes(tile(2)));
        assert!(!tile(2).excludes(tile(3)));
    }

    // Tests invalid catalogs are rejected
    // Verified by removing the side length check
    #[test]
    fn test_expand_rejects_invalid_input() {
        assert!(matches!(
            TileSet::expand(&[]),
            Err(AlgorithmError::InvalidParameter { .. })
        ));

        let mixed = vec![
            SeedTile::new(pattern(&["..", ".."])),
            SeedTile::new(pattern(&["..."; 3])),
        ];
        assert!(TileSet::expand(&mixed).is_err());

        let weightless = vec![SeedTile::new(pattern(&["."])).with_weight(0.0)];
        assert!(TileSet::expand(&weightless).is_err());
    }

    // Tests non-square patterns are rejected
    // Verified by checking only the first row length
    #[test]
    fn test_from_strs_requires_square() {
        assert!(TilePattern::from_strs(&["ab", "c"]).is_err());
        assert!(TilePattern::from_strs(&["abc", "def"]).is_err());
        assert!(TilePattern::from_strs(&[]).is_err());
        assert!(pattern(&["@@", "@@"]).is_uniform());
        assert!(!pattern(&["@.", "@@"]).is_uniform());
    }
}
