use crate::algorithm::wave::WaveState;
use crate::analysis::patterns::Palette;
use crate::io::error::Result;
use crate::spatial::grid::{GridSize, OutputGrid, RenderedCell, Rgba};
use crate::spatial::tiles::PatternCatalog;

/// Convert the wave into one rendered cell per grid position
///
/// Each pattern contributes the color at its anchor (top-left) cell.
///
/// # Errors
///
/// Returns an error if the wave does not cover `size`
pub fn render(
    wave: &WaveState,
    catalog: &PatternCatalog,
    palette: &Palette,
    size: GridSize,
) -> Result<OutputGrid> {
    let cells = (0..size.cell_count())
        .map(|cell| render_cell(wave, catalog, palette, cell))
        .collect();
    OutputGrid::new(size, cells)
}

fn anchor_color(catalog: &PatternCatalog, palette: &Palette, pattern: usize) -> Rgba {
    catalog
        .pattern(pattern)
        .and_then(|p| palette.color(p.anchor()))
        .unwrap_or_default()
}

fn render_cell(
    wave: &WaveState,
    catalog: &PatternCatalog,
    palette: &Palette,
    cell: usize,
) -> RenderedCell {
    let Some(possible) = wave.possible_patterns(cell) else {
        return RenderedCell::Masked;
    };

    match possible.count() {
        0 => RenderedCell::Masked,
        1 => {
            let pattern = possible.first().unwrap_or_default();
            RenderedCell::Resolved(anchor_color(catalog, palette, pattern))
        }
        _ => {
            let colors: Vec<Rgba> = possible
                .iter()
                .map(|pattern| anchor_color(catalog, palette, pattern))
                .collect();
            RenderedCell::Blended(mean_color(&colors))
        }
    }
}

/// Per-channel mean, rounded to nearest
pub fn mean_color(colors: &[Rgba]) -> Rgba {
    if colors.is_empty() {
        return Rgba::default();
    }
    let mut sums = [0_u64; 4];
    for color in colors {
        for (sum, channel) in sums.iter_mut().zip(*color) {
            *sum += u64::from(channel);
        }
    }
    let count = colors.len() as u64;
    sums.map(|sum| ((sum + count / 2) / count) as u8)
}
