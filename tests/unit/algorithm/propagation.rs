//! Tests for cell collapse and constraint propagation

#[cfg(test)]
mod tests {
    use overlapwfc::SolverError;
    use overlapwfc::algorithm::heap::EntropyHeap;
    use overlapwfc::algorithm::propagation::{
        Contradiction, PropagationCounters, RemovalEvent, StepData, collapse_cell, propagate,
    };
    use overlapwfc::algorithm::selection::RandomSelector;
    use overlapwfc::algorithm::wave::WaveState;
    use overlapwfc::analysis::adjacency::AdjacencyRules;
    use overlapwfc::analysis::weights::PatternWeights;
    use overlapwfc::spatial::grid::{Direction, GridSize};

    // Pattern 1 accepts nothing to its right, and nothing accepts pattern 1 to its left
    // except pattern 0
    fn clash_rules() -> AdjacencyRules {
        AdjacencyRules::from_lists(
            2,
            [
                vec![vec![0], vec![0]],
                vec![vec![0, 1], vec![0, 1]],
                vec![vec![0, 1], vec![]],
                vec![vec![0, 1], vec![0, 1]],
            ],
        )
        .expect("valid rules")
    }

    fn open_rules(pattern_count: usize) -> AdjacencyRules {
        let all: Vec<usize> = (0..pattern_count).collect();
        let per_direction = vec![all; pattern_count];
        AdjacencyRules::from_lists(
            pattern_count,
            [
                per_direction.clone(),
                per_direction.clone(),
                per_direction.clone(),
                per_direction,
            ],
        )
        .expect("valid rules")
    }

    fn step_data(
        width: usize,
        height: usize,
        adjacency: AdjacencyRules,
        weights: Vec<u32>,
    ) -> StepData {
        StepData {
            size: GridSize::new(width, height),
            adjacency,
            weights: PatternWeights::new(weights),
        }
    }

    // Tests collapse leaves exactly one pattern and reports every removal
    // Verified by removing the chosen pattern instead of the others
    #[test]
    fn test_collapse_leaves_one_pattern() {
        let data = step_data(2, 2, open_rules(4), vec![1, 2, 3, 4]);
        let mut wave = WaveState::new(4, &data.adjacency, &data.weights);
        let mut selector = RandomSelector::new(11);
        let mut counters = PropagationCounters::default();

        let events =
            collapse_cell(&mut wave, &data, 3, &mut selector, &mut counters).expect("open cell");

        assert_eq!(wave.remaining(3), 1);
        assert_eq!(events.len(), 3);
        assert_eq!(counters.removals, 3);
        let kept = wave.resolved_pattern(3).expect("resolved");
        assert!(events.iter().all(|e| e.pattern != kept && e.cell == 3));
        assert!(events.iter().all(|e| e.x == 1 && e.y == 1));
        assert_eq!(wave.sum_of_weights(3), u64::from(data.weights.weight(kept)));
    }

    // Tests collapsing a resolved cell is a no-op and an empty cell is a contradiction
    // Verified by collapsing resolved cells again
    #[test]
    fn test_collapse_edge_cases() {
        let data = step_data(2, 1, open_rules(2), vec![1, 1]);
        let mut wave = WaveState::new(2, &data.adjacency, &data.weights);
        let mut selector = RandomSelector::new(5);
        let mut counters = PropagationCounters::default();

        wave.remove(0, 0, &data.weights);
        let events = collapse_cell(&mut wave, &data, 0, &mut selector, &mut counters);
        assert_eq!(events, Ok(Vec::new()));

        wave.remove(1, 0, &data.weights);
        wave.remove(1, 1, &data.weights);
        let result = collapse_cell(&mut wave, &data, 1, &mut selector, &mut counters);
        assert_eq!(result, Err(Contradiction { cell: 1, x: 1, y: 0 }));
        assert_eq!(counters.removals, 0);
    }

    // Tests removing the only supporter of both neighbour patterns is a contradiction
    // Verified by checking for contradictions only at collapse time
    #[test]
    fn test_propagation_detects_contradiction() {
        let data = step_data(2, 1, clash_rules(), vec![1, 1]);
        let mut wave = WaveState::new(2, &data.adjacency, &data.weights);
        let mut heap = EntropyHeap::new();
        let mut selector = RandomSelector::new(1);
        let mut counters = PropagationCounters::default();

        wave.remove(0, 0, &data.weights);
        let events = vec![RemovalEvent {
            cell: 0,
            pattern: 0,
            x: 0,
            y: 0,
        }];
        let result = propagate(
            &mut wave,
            &data,
            &mut heap,
            &mut selector,
            events,
            &mut counters,
        );

        assert_eq!(result, Err(Contradiction { cell: 1, x: 1, y: 0 }));
        assert_eq!(wave.remaining(1), 0);
        assert_eq!(counters.removals, 2);
        assert_eq!(counters.propagation_steps, 1);
    }

    // Tests a partial loss of support decrements counters without removing patterns
    // Verified by removing patterns whose counter is still positive
    #[test]
    fn test_propagation_partial_support() {
        let data = step_data(2, 1, clash_rules(), vec![1, 1]);
        let mut wave = WaveState::new(2, &data.adjacency, &data.weights);
        let mut heap = EntropyHeap::new();
        let mut selector = RandomSelector::new(1);
        let mut counters = PropagationCounters::default();

        // Cell 1 loses pattern 1; cell 0 pattern 0 keeps one supporter to its right
        wave.remove(1, 1, &data.weights);
        let events = vec![RemovalEvent {
            cell: 1,
            pattern: 1,
            x: 1,
            y: 0,
        }];
        let result = propagate(
            &mut wave,
            &data,
            &mut heap,
            &mut selector,
            events,
            &mut counters,
        );

        assert_eq!(result, Ok(()));
        assert_eq!(wave.remaining(0), 2);
        assert_eq!(wave.compatible_count(0, 0, Direction::Right), 1);
        assert!(heap.is_empty(), "No removal means no entropy refresh");
    }

    // Tests removals spread transitively and refresh neighbour entropy
    // Verified by dropping the events produced by neighbours
    #[test]
    fn test_propagation_is_transitive() {
        // Pattern 0 only sits next to pattern 0, pattern 1 only next to pattern 1
        let same_only = vec![vec![0], vec![1]];
        let rules = AdjacencyRules::from_lists(
            2,
            [
                same_only.clone(),
                same_only.clone(),
                same_only.clone(),
                same_only,
            ],
        )
        .expect("valid rules");
        let data = step_data(4, 1, rules, vec![1, 1]);
        let mut wave = WaveState::new(4, &data.adjacency, &data.weights);
        let mut heap = EntropyHeap::new();
        let mut selector = RandomSelector::new(3);
        let mut counters = PropagationCounters::default();

        wave.remove(0, 1, &data.weights);
        let events = vec![RemovalEvent {
            cell: 0,
            pattern: 1,
            x: 0,
            y: 0,
        }];
        propagate(&mut wave, &data, &mut heap, &mut selector, events, &mut counters)
            .expect("consistent rules");

        for cell in 0..4 {
            assert_eq!(wave.resolved_pattern(cell), Some(0), "cell {cell}");
        }
        assert_eq!(counters.removals, 3);
        assert_eq!(heap.len(), 3);
        let refreshed = heap.pop().expect("entry");
        assert!(refreshed.priority >= 0.0 && refreshed.priority < 1e-6);
    }

    // Tests a contradiction converts into the public error with coordinates
    // Verified by swapping x and y in the conversion
    #[test]
    fn test_contradiction_into_error() {
        let error: SolverError = Contradiction { cell: 7, x: 3, y: 1 }.into();
        assert!(matches!(error, SolverError::Contradiction { x: 3, y: 1 }));
        assert_eq!(error.to_string(), "Contradiction occurred at 3/1");
    }
}
