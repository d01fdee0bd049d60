use crate::{
    algorithm::heap::EntropyHeap,
    algorithm::selection::RandomSelector,
    algorithm::wave::WaveState,
    analysis::adjacency::AdjacencyRules,
    analysis::weights::PatternWeights,
    io::error::SolverError,
    spatial::grid::{Direction, GridSize},
};

/// Catalog-derived data that stays constant for the whole run
#[derive(Clone, Debug)]
pub struct StepData {
    /// Output grid dimensions
    pub size: GridSize,
    /// Compatible neighbour lists per direction and pattern
    pub adjacency: AdjacencyRules,
    /// Pattern weights with precomputed entropy terms
    pub weights: PatternWeights,
}

/// A pattern was just excluded from a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RemovalEvent {
    /// Flat index of the cell
    pub cell: usize,
    /// Removed pattern id
    pub pattern: usize,
    /// Column of the cell
    pub x: usize,
    /// Row of the cell
    pub y: usize,
}

/// A cell ran out of possible patterns
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contradiction {
    /// Flat index of the failing cell
    pub cell: usize,
    /// Column of the failing cell
    pub x: usize,
    /// Row of the failing cell
    pub y: usize,
}

impl From<Contradiction> for SolverError {
    fn from(contradiction: Contradiction) -> Self {
        Self::Contradiction {
            x: contradiction.x,
            y: contradiction.y,
        }
    }
}

/// Running totals reported in diagnostics
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PropagationCounters {
    /// Patterns removed by collapses and propagation
    pub removals: usize,
    /// Neighbour visits that had more than one pattern left
    pub propagation_steps: usize,
}

/// Reduce a cell to a single weighted-random pattern
///
/// A cell with one pattern left is left untouched and yields no events.
///
/// # Errors
///
/// Returns `Contradiction` if the cell has no possible pattern
pub fn collapse_cell(
    wave: &mut WaveState,
    step_data: &StepData,
    cell: usize,
    selector: &mut RandomSelector,
    counters: &mut PropagationCounters,
) -> Result<Vec<RemovalEvent>, Contradiction> {
    let [x, y] = step_data.size.coordinates(cell);
    let contradiction = Contradiction { cell, x, y };

    match wave.remaining(cell) {
        0 => return Err(contradiction),
        1 => return Ok(Vec::new()),
        _ => {}
    }

    let Some(possible) = wave.possible_patterns(cell).cloned() else {
        return Err(contradiction);
    };
    let total = wave.sum_of_weights(cell);
    let Some(chosen) = selector.choose_pattern(&possible, &step_data.weights, total) else {
        return Err(contradiction);
    };

    let mut events = Vec::with_capacity(possible.count().saturating_sub(1));
    for pattern in possible.iter().filter(|&pattern| pattern != chosen) {
        if wave.remove(cell, pattern, &step_data.weights) {
            counters.removals += 1;
            events.push(RemovalEvent {
                cell,
                pattern,
                x,
                y,
            });
        }
    }
    Ok(events)
}

/// Remove every pattern that lost all support, transitively
///
/// Works through `events` as a stack. Neighbours with one or fewer patterns
/// left are not revisited. Every neighbour that lost a pattern gets a fresh
/// heap entry at its new entropy plus jitter.
///
/// # Errors
///
/// Returns `Contradiction` as soon as a neighbour loses its last pattern;
/// the remaining work is abandoned.
pub fn propagate(
    wave: &mut WaveState,
    step_data: &StepData,
    heap: &mut EntropyHeap,
    selector: &mut RandomSelector,
    mut events: Vec<RemovalEvent>,
    counters: &mut PropagationCounters,
) -> Result<(), Contradiction> {
    while let Some(event) = events.pop() {
        let mut neighbour_events = Vec::new();

        for direction in Direction::ALL {
            let Some([nx, ny]) = step_data.size.neighbour(event.x, event.y, direction) else {
                continue;
            };
            let neighbour = step_data.size.index(nx, ny);
            if wave.remaining(neighbour) <= 1 {
                continue;
            }
            counters.propagation_steps += 1;

            let mut removed_any = false;
            for &candidate in step_data.adjacency.compatible(direction, event.pattern) {
                if !wave.is_possible(neighbour, candidate) {
                    continue;
                }
                if wave.decrement_compatible(neighbour, candidate, direction.opposite()) > 0 {
                    continue;
                }
                wave.remove(neighbour, candidate, &step_data.weights);
                counters.removals += 1;
                removed_any = true;
                neighbour_events.push(RemovalEvent {
                    cell: neighbour,
                    pattern: candidate,
                    x: nx,
                    y: ny,
                });
            }

            if wave.remaining(neighbour) == 0 {
                return Err(Contradiction {
                    cell: neighbour,
                    x: nx,
                    y: ny,
                });
            }
            if removed_any {
                heap.push(neighbour, wave.entropy(neighbour) + selector.entropy_noise());
            }
        }

        events.extend(neighbour_events);
    }
    Ok(())
}
