//! Tests for pattern overlap checks and adjacency rule construction

#[cfg(test)]
mod tests {
    use ndarray::Array2;
    use overlapwfc::analysis::adjacency::{AdjacencyRules, overlaps};
    use overlapwfc::spatial::grid::Direction;
    use overlapwfc::spatial::tiles::{Pattern, PatternCatalog, SamplingOptions};

    fn pattern(size: usize, cells: &[u8]) -> Pattern {
        Pattern::new(size, cells.to_vec()).expect("valid pattern")
    }

    fn catalog_from(ids: &[u8], rows: usize, cols: usize, use_symmetry: bool) -> PatternCatalog {
        let ids = Array2::from_shape_vec((rows, cols), ids.to_vec()).expect("valid shape");
        let options = SamplingOptions {
            pattern_size: 3,
            crop_x: 0,
            crop_y: 0,
            use_symmetry,
        };
        PatternCatalog::from_exemplar(&ids, &options).expect("valid exemplar")
    }

    // Tests a pattern whose columns differ only overlaps a shifted partner
    // Verified by comparing the full window instead of the overlap
    #[test]
    fn test_horizontal_overlap() {
        // Left column 0, right column 1
        let left_dark = pattern(2, &[0, 1, 0, 1]);
        let left_light = pattern(2, &[1, 0, 1, 0]);

        assert!(overlaps(&left_dark, &left_light, Direction::Right));
        assert!(!overlaps(&left_dark, &left_dark, Direction::Right));
        assert!(overlaps(&left_dark, &left_light, Direction::Left));
        assert!(overlaps(&left_dark, &left_dark, Direction::Up));
        assert!(overlaps(&left_dark, &left_dark, Direction::Down));
    }

    // Tests vertical offsets compare rows, not columns
    // Verified by swapping the dx and dy components
    #[test]
    fn test_vertical_overlap() {
        // Row 0 is all 0, row 1 is all 1
        let bottom_dark = pattern(2, &[0, 0, 1, 1]);
        let bottom_light = pattern(2, &[1, 1, 0, 0]);

        assert!(overlaps(&bottom_dark, &bottom_light, Direction::Up));
        assert!(!overlaps(&bottom_dark, &bottom_dark, Direction::Up));
        assert!(overlaps(&bottom_dark, &bottom_light, Direction::Down));
        assert!(overlaps(&bottom_dark, &bottom_dark, Direction::Left));
    }

    // Tests single-cell patterns always overlap since the shifted windows share nothing
    // Verified by clamping the overlap range to at least one cell
    #[test]
    fn test_single_cell_patterns_always_overlap() {
        let zero = pattern(1, &[0]);
        let one = pattern(1, &[1]);
        for direction in Direction::ALL {
            assert!(overlaps(&zero, &one, direction));
        }
    }

    // Tests patterns of different sizes never overlap
    // Verified by removing the size check
    #[test]
    fn test_size_mismatch() {
        let small = pattern(1, &[0]);
        let large = pattern(2, &[0, 0, 0, 0]);
        assert!(!overlaps(&small, &large, Direction::Right));
    }

    // Tests B in rules[d][A] exactly when A in rules[opposite(d)][B]
    // Verified by using the same direction for both lookups
    #[test]
    fn test_rules_symmetric_across_opposite_directions() {
        #[rustfmt::skip]
        let ids = [
            0, 0, 1, 0,
            0, 0, 1, 0,
            1, 1, 1, 1,
            0, 0, 1, 2,
        ];
        let catalog = catalog_from(&ids, 4, 4, true);
        let rules = AdjacencyRules::build(&catalog);
        assert_eq!(rules.pattern_count(), catalog.len());

        for direction in Direction::ALL {
            for a in 0..catalog.len() {
                for b in 0..catalog.len() {
                    let forward = rules.compatible(direction, a).contains(&b);
                    let backward = rules.compatible(direction.opposite(), b).contains(&a);
                    assert_eq!(
                        forward, backward,
                        "Asymmetric rule for {a} -> {b} in direction {direction:?}"
                    );
                }
            }
        }
    }

    // Tests a pattern sampled from an exemplar is compatible with its real neighbour
    // Verified by inverting the offset sign in the overlap check
    #[test]
    fn test_rules_contain_exemplar_neighbours() {
        #[rustfmt::skip]
        let ids = [
            0, 1, 2, 3,
            4, 5, 6, 7,
            8, 9, 10, 11,
            12, 13, 14, 15,
        ];
        let catalog = catalog_from(&ids, 4, 4, false);
        let rules = AdjacencyRules::build(&catalog);

        // Sample ids are row-major top-left positions; all 16 windows are distinct
        assert_eq!(catalog.len(), 16);
        for y in 0..4 {
            for x in 0..4 {
                let here = x + y * 4;
                let right = (x + 1) % 4 + y * 4;
                let next_row = x + ((y + 1) % 4) * 4;
                assert_eq!(rules.compatible(Direction::Right, here), &[right]);
                assert_eq!(rules.compatible(Direction::Up, here), &[next_row]);
            }
        }
    }

    // Tests custom rule lists are sorted, deduplicated and validated
    // Verified by accepting out-of-range pattern ids
    #[test]
    fn test_from_lists() {
        let rules = AdjacencyRules::from_lists(
            2,
            [
                vec![vec![1, 0, 1], vec![0]],
                vec![vec![0, 1], vec![0, 1]],
                vec![vec![0, 1], vec![]],
                vec![vec![0, 1], vec![0, 1]],
            ],
        )
        .expect("valid rules");

        assert_eq!(rules.compatible(Direction::Left, 0), &[0, 1]);
        assert!(rules.compatible(Direction::Right, 1).is_empty());
        assert!(rules.compatible(Direction::Right, 5).is_empty());

        let unknown_id = AdjacencyRules::from_lists(
            2,
            [vec![vec![2], vec![]], vec![vec![], vec![]], vec![vec![], vec![]], vec![vec![], vec![]]],
        );
        assert!(unknown_id.is_err());

        let wrong_count = AdjacencyRules::from_lists(2, [vec![], vec![], vec![], vec![]]);
        assert!(wrong_count.is_err());
    }
}
