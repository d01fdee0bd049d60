//! Output grid geometry, cardinal directions and rendered cell storage
//!
//! Cells are addressed row-major: `index = x + y * width`. The wave, the
//! renderer and PNG export all share this addressing.

use crate::io::configuration::MASK_COLOR;

/// RGBA color value as read from the exemplar
pub type Rgba = [u8; 4];

/// One of the four cardinal neighbour directions
///
/// Index order is Left, Up, Right, Down so that `opposite` is `(i + 2) % 4`.
/// `Up` points towards increasing `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards decreasing `x`
    Left,
    /// Towards increasing `y`
    Up,
    /// Towards increasing `x`
    Right,
    /// Towards decreasing `y`
    Down,
}

impl Direction {
    /// All directions in index order
    pub const ALL: [Self; 4] = [Self::Left, Self::Up, Self::Right, Self::Down];

    /// Position of this direction in per-direction tables
    pub const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Up => 1,
            Self::Right => 2,
            Self::Down => 3,
        }
    }

    /// The direction pointing back
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
        }
    }

    /// Unit offset `[dx, dy]`
    pub const fn delta(self) -> [i32; 2] {
        match self {
            Self::Left => [-1, 0],
            Self::Up => [0, 1],
            Self::Right => [1, 0],
            Self::Down => [0, -1],
        }
    }
}

/// Output grid dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
}

impl GridSize {
    /// Create grid dimensions
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Flat index of a cell
    pub const fn index(&self, x: usize, y: usize) -> usize {
        x + y * self.width
    }

    /// `[x, y]` coordinates of a flat index
    pub const fn coordinates(&self, cell: usize) -> [usize; 2] {
        if self.width == 0 {
            return [0, 0];
        }
        [cell % self.width, cell / self.width]
    }

    /// Coordinates of the neighbour in `direction`, if it lies inside the grid
    pub fn neighbour(&self, x: usize, y: usize, direction: Direction) -> Option<[usize; 2]> {
        let [dx, dy] = direction.delta();
        let nx = x.checked_add_signed(dx as isize)?;
        let ny = y.checked_add_signed(dy as isize)?;
        (nx < self.width && ny < self.height).then_some([nx, ny])
    }
}

/// Final state of one output cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderedCell {
    /// Cell settled on exactly one pattern
    Resolved(Rgba),
    /// Cell lost every pattern during a contradiction
    Masked,
    /// Cell still undecided when the run stopped; mean of its candidate colors
    Blended(Rgba),
}

impl RenderedCell {
    /// Color used when exporting the cell
    pub const fn to_rgba(self) -> Rgba {
        match self {
            Self::Resolved(color) | Self::Blended(color) => color,
            Self::Masked => MASK_COLOR,
        }
    }
}

/// Row-major grid of rendered cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputGrid {
    size: GridSize,
    cells: Vec<RenderedCell>,
}

impl OutputGrid {
    /// Wrap rendered cells laid out row-major
    ///
    /// # Errors
    ///
    /// Returns an error if the cell count does not match the grid dimensions
    pub fn new(size: GridSize, cells: Vec<RenderedCell>) -> crate::io::error::Result<Self> {
        if cells.len() != size.cell_count() {
            let reason = format!(
                "expected {} cells for a {}x{} grid",
                size.cell_count(),
                size.width,
                size.height
            );
            return Err(crate::io::error::invalid_parameter(
                "cells",
                &cells.len(),
                &reason,
            ));
        }
        Ok(Self { size, cells })
    }

    /// Grid dimensions
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.size.width
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.size.height
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[RenderedCell] {
        &self.cells
    }

    /// Cell at `(x, y)`
    pub fn get(&self, x: usize, y: usize) -> Option<RenderedCell> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        self.cells.get(self.size.index(x, y)).copied()
    }

    /// Export colors in row-major order
    pub fn to_rgba(&self) -> Vec<Rgba> {
        self.cells.iter().map(|cell| cell.to_rgba()).collect()
    }

    /// Whether every cell settled on a single pattern
    pub fn is_fully_resolved(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| matches!(cell, RenderedCell::Resolved(_)))
    }

    /// Number of cells masked by a contradiction
    pub fn masked_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| matches!(cell, RenderedCell::Masked))
            .count()
    }
}
