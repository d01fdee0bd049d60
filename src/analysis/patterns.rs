//! Exemplar color indexing
//!
//! Converts an RGBA exemplar into a grid of small color ids so that patterns
//! can be stored and compared as byte sequences.

use crate::io::configuration::MAX_PALETTE_SIZE;
use crate::io::error::{Result, SolverError};
use crate::spatial::grid::Rgba;
use ndarray::Array2;
use std::collections::HashMap;

/// Distinct exemplar colors, indexed by color id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgba>,
}

impl Palette {
    /// Build a palette from colors already in id order
    ///
    /// # Errors
    ///
    /// Returns `PaletteOverflow` if more than `MAX_PALETTE_SIZE` colors are given
    pub fn from_colors(colors: Vec<Rgba>) -> Result<Self> {
        if colors.len() > MAX_PALETTE_SIZE {
            return Err(SolverError::PaletteOverflow {
                colors: colors.len(),
                max_colors: MAX_PALETTE_SIZE,
            });
        }
        Ok(Self { colors })
    }

    /// Color for an id
    pub fn color(&self, id: u8) -> Option<Rgba> {
        self.colors.get(usize::from(id)).copied()
    }

    /// All colors in id order
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    /// Number of distinct colors
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the palette holds no colors
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Exemplar expressed as color ids plus the palette that decodes them
#[derive(Debug, Clone)]
pub struct IndexedExemplar {
    ids: Array2<u8>,
    palette: Palette,
}

impl IndexedExemplar {
    /// Assign a color id to every exemplar pixel
    ///
    /// The exemplar is indexed `[row, column]`. Ids follow the order in which
    /// colors are first met during a row-major scan, so the mapping is
    /// reproducible for a given image.
    ///
    /// # Errors
    ///
    /// Returns `PaletteOverflow` if the exemplar has more than
    /// `MAX_PALETTE_SIZE` distinct colors
    pub fn from_colors(exemplar: &Array2<Rgba>) -> Result<Self> {
        let mut lookup: HashMap<Rgba, u8> = HashMap::new();
        let mut colors = Vec::new();
        let mut ids = Array2::zeros(exemplar.dim());

        for ((row, col), color) in exemplar.indexed_iter() {
            let id = if let Some(&id) = lookup.get(color) {
                id
            } else {
                let Ok(id) = u8::try_from(colors.len()) else {
                    return Err(SolverError::PaletteOverflow {
                        colors: colors.len() + 1,
                        max_colors: MAX_PALETTE_SIZE,
                    });
                };
                lookup.insert(*color, id);
                colors.push(*color);
                id
            };
            if let Some(cell) = ids.get_mut((row, col)) {
                *cell = id;
            }
        }

        Ok(Self {
            ids,
            palette: Palette::from_colors(colors)?,
        })
    }

    /// Color id grid indexed `[row, column]`
    pub const fn ids(&self) -> &Array2<u8> {
        &self.ids
    }

    /// Palette decoding the ids
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Exemplar width in pixels
    pub fn width(&self) -> usize {
        self.ids.ncols()
    }

    /// Exemplar height in pixels
    pub fn height(&self) -> usize {
        self.ids.nrows()
    }

    /// Consume the exemplar and return its id grid and palette
    pub fn into_parts(self) -> (Array2<u8>, Palette) {
        (self.ids, self.palette)
    }
}
