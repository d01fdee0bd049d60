//! Overlap compatibility between patterns
//!
//! Two patterns may sit next to each other when the cells they share after a
//! one-step shift agree. The resulting tables drive constraint propagation.

use crate::io::error::{Result, invalid_parameter};
use crate::spatial::grid::Direction;
use crate::spatial::tiles::{Pattern, PatternCatalog};

/// Whether `b`, placed one step from `a` in `direction`, agrees with `a`
/// everywhere the two windows overlap
///
/// With `(dx, dy)` the direction's offset, this checks
/// `a[x, y] == b[x - dx, y - dy]` for every `(x, y)` inside both windows.
pub fn overlaps(a: &Pattern, b: &Pattern, direction: Direction) -> bool {
    let n = a.size();
    if b.size() != n {
        return false;
    }
    let [dx, dy] = direction.delta();
    let n = n as i64;
    let (dx, dy) = (i64::from(dx), i64::from(dy));

    let x_range = dx.max(0)..(n + dx).min(n);
    let y_range = dy.max(0)..(n + dy).min(n);

    for y in y_range {
        for x in x_range.clone() {
            let here = a.get(x as usize, y as usize);
            let there = b.get((x - dx) as usize, (y - dy) as usize);
            if here != there {
                return false;
            }
        }
    }
    true
}

/// Compatible neighbour lists for every direction and pattern
///
/// `compatible(d, p)` lists the patterns allowed one step from `p` in
/// direction `d`, in ascending id order.
#[derive(Clone, Debug)]
pub struct AdjacencyRules {
    propagator: [Vec<Vec<usize>>; 4],
}

impl AdjacencyRules {
    /// Compare every ordered pattern pair in every direction
    pub fn build(catalog: &PatternCatalog) -> Self {
        let patterns = catalog.patterns();
        let propagator = Direction::ALL.map(|direction| {
            patterns
                .iter()
                .map(|a| {
                    patterns
                        .iter()
                        .enumerate()
                        .filter(|(_, b)| overlaps(a, b, direction))
                        .map(|(id, _)| id)
                        .collect()
                })
                .collect()
        });
        Self { propagator }
    }

    /// Use hand-written compatibility lists indexed `[direction][pattern]`
    ///
    /// # Errors
    ///
    /// Returns an error if a direction does not list exactly `pattern_count`
    /// entries or a list names an unknown pattern id
    pub fn from_lists(pattern_count: usize, lists: [Vec<Vec<usize>>; 4]) -> Result<Self> {
        for (direction, per_pattern) in Direction::ALL.iter().zip(&lists) {
            if per_pattern.len() != pattern_count {
                return Err(invalid_parameter(
                    "adjacency",
                    &per_pattern.len(),
                    &format!("{direction:?} needs one list per pattern ({pattern_count})"),
                ));
            }
            if let Some(&id) = per_pattern
                .iter()
                .flatten()
                .find(|&&id| id >= pattern_count)
            {
                return Err(invalid_parameter(
                    "adjacency",
                    &id,
                    &format!("{direction:?} refers to an unknown pattern id"),
                ));
            }
        }

        let propagator = lists.map(|per_pattern| {
            per_pattern
                .into_iter()
                .map(|mut ids| {
                    ids.sort_unstable();
                    ids.dedup();
                    ids
                })
                .collect()
        });
        Ok(Self { propagator })
    }

    /// Patterns allowed one step from `pattern` in `direction`
    pub fn compatible(&self, direction: Direction, pattern: usize) -> &[usize] {
        self.propagator
            .get(direction.index())
            .and_then(|per_pattern| per_pattern.get(pattern))
            .map_or(&[], Vec::as_slice)
    }

    /// Number of patterns the tables cover
    pub fn pattern_count(&self) -> usize {
        self.propagator.first().map_or(0, Vec::len)
    }
}
