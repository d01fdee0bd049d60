use crate::{
    algorithm::heap::EntropyHeap,
    algorithm::propagation::{
        Contradiction, PropagationCounters, StepData, collapse_cell, propagate,
    },
    algorithm::render::render,
    algorithm::selection::RandomSelector,
    algorithm::wave::WaveState,
    analysis::adjacency::AdjacencyRules,
    analysis::patterns::{IndexedExemplar, Palette},
    analysis::weights::PatternWeights,
    io::configuration::{
        DEFAULT_OUTPUT_HEIGHT, DEFAULT_OUTPUT_WIDTH, DEFAULT_SEED, MAX_GRID_DIMENSION,
        MAX_WAVE_ENTRIES, PATTERN_SIZE,
    },
    io::error::{Result, SolverError, invalid_parameter},
    spatial::grid::{GridSize, OutputGrid, Rgba},
    spatial::tiles::{PatternCatalog, SamplingOptions, validate_sampling},
};
use ndarray::Array2;
use std::fmt;
use std::time::{Duration, Instant};

/// Parameters of one generation run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationArgs {
    /// Output width in cells
    pub width: usize,
    /// Output height in cells
    pub height: usize,
    /// Side length of sampled patterns
    pub pattern_size: usize,
    /// Whether to add rotated and mirrored pattern variants
    pub use_symmetry: bool,
    /// Columns excluded from the right edge of the sampled region
    pub crop_x: usize,
    /// Rows excluded from the bottom edge of the sampled region
    pub crop_y: usize,
    /// Random seed; 0 seeds from the operating system
    pub seed: u64,
    /// Print run statistics to stderr when finished
    pub debug: bool,
}

impl Default for GenerationArgs {
    fn default() -> Self {
        Self {
            width: DEFAULT_OUTPUT_WIDTH,
            height: DEFAULT_OUTPUT_HEIGHT,
            pattern_size: PATTERN_SIZE,
            use_symmetry: false,
            crop_x: 0,
            crop_y: 0,
            seed: DEFAULT_SEED,
            debug: false,
        }
    }
}

impl GenerationArgs {
    /// Output grid dimensions
    pub const fn size(&self) -> GridSize {
        GridSize::new(self.width, self.height)
    }

    /// Pattern sampling settings
    pub const fn sampling_options(&self) -> SamplingOptions {
        SamplingOptions {
            pattern_size: self.pattern_size,
            crop_x: self.crop_x,
            crop_y: self.crop_y,
            use_symmetry: self.use_symmetry,
        }
    }

    /// Check the requested output dimensions
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either dimension is zero
    /// - Either dimension exceeds `MAX_GRID_DIMENSION`
    pub fn validate_output(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SolverError::InvalidOutputSize {
                width: self.width,
                height: self.height,
            });
        }
        if self.width > MAX_GRID_DIMENSION {
            return Err(invalid_parameter(
                "width",
                &self.width,
                &format!("must not exceed {MAX_GRID_DIMENSION}"),
            ));
        }
        if self.height > MAX_GRID_DIMENSION {
            return Err(invalid_parameter(
                "height",
                &self.height,
                &format!("must not exceed {MAX_GRID_DIMENSION}"),
            ));
        }
        Ok(())
    }
}

/// Where a run stands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    /// More cells are waiting to be collapsed
    Running,
    /// The entropy heap drained without a contradiction
    Converged,
    /// A cell ran out of patterns; the run stopped for good
    Aborted(Contradiction),
}

/// Run statistics; they never influence the result
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Collapse steps taken
    pub steps: usize,
    /// Patterns removed by collapses and propagation
    pub removals: usize,
    /// Neighbour visits during propagation
    pub propagation_steps: usize,
    /// Wall time spent stepping
    pub elapsed: Duration,
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Steps: {}, Removals: {}, Propagation Steps: {}, elapsed: {:?}",
            self.steps, self.removals, self.propagation_steps, self.elapsed
        )
    }
}

/// Overlapping-model solver that can be driven one collapse at a time
///
/// Owns the wave, the entropy heap and the single random source of the run.
pub struct Solver {
    step_data: StepData,
    catalog: PatternCatalog,
    palette: Palette,
    wave: WaveState,
    heap: EntropyHeap,
    selector: RandomSelector,
    counters: PropagationCounters,
    steps: usize,
    elapsed: Duration,
    next_cell: Option<usize>,
    status: RunStatus,
}

impl Solver {
    /// Build the pattern catalog from an exemplar and prepare a fresh run
    ///
    /// The exemplar is indexed `[row, column]`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The output size is zero or too large
    /// - The exemplar is smaller than the pattern size, or a crop margin is too large
    /// - The exemplar has more than 256 distinct colors
    /// - The output is too large for the number of patterns found
    pub fn new(exemplar: &Array2<Rgba>, args: &GenerationArgs) -> Result<Self> {
        args.validate_output()?;
        let options = args.sampling_options();
        let (rows, cols) = exemplar.dim();
        validate_sampling(cols, rows, &options)?;

        let (ids, palette) = IndexedExemplar::from_colors(exemplar)?.into_parts();
        let catalog = PatternCatalog::from_exemplar(&ids, &options)?;
        let adjacency = AdjacencyRules::build(&catalog);

        Self::from_parts(catalog, adjacency, palette, args)
    }

    /// Prepare a run from a ready-made catalog and adjacency rules
    ///
    /// Picks the first cell to collapse uniformly at random.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The output size is zero or too large
    /// - The catalog is empty
    /// - The adjacency rules cover a different number of patterns
    /// - A pattern uses a color id the palette cannot decode
    /// - The wave would track more than `MAX_WAVE_ENTRIES` cell-pattern pairs
    pub fn from_parts(
        catalog: PatternCatalog,
        adjacency: AdjacencyRules,
        palette: Palette,
        args: &GenerationArgs,
    ) -> Result<Self> {
        args.validate_output()?;
        if catalog.is_empty() {
            return Err(invalid_parameter(
                "catalog",
                &0,
                &"at least one pattern is required",
            ));
        }
        if adjacency.pattern_count() != catalog.len() {
            return Err(invalid_parameter(
                "adjacency",
                &adjacency.pattern_count(),
                &format!("expected rules for {} patterns", catalog.len()),
            ));
        }
        let max_id = catalog
            .patterns()
            .iter()
            .flat_map(|pattern| pattern.cells().iter().copied())
            .max()
            .unwrap_or_default();
        if usize::from(max_id) >= palette.len() {
            return Err(invalid_parameter(
                "palette",
                &palette.len(),
                &format!("color id {max_id} has no palette entry"),
            ));
        }

        let size = args.size();
        let cell_count = size.cell_count();
        let entries = cell_count.saturating_mul(catalog.len());
        if entries > MAX_WAVE_ENTRIES {
            return Err(invalid_parameter(
                "size",
                &format!("{}x{}", size.width, size.height),
                &format!(
                    "{cell_count} cells with {} patterns exceed {MAX_WAVE_ENTRIES} wave entries",
                    catalog.len()
                ),
            ));
        }
        let weights = PatternWeights::from_catalog(&catalog);
        let wave = WaveState::new(cell_count, &adjacency, &weights);

        let starting_entropy = weights.starting_entropy();
        let mut heap = EntropyHeap::with_capacity(cell_count);
        for cell in 0..cell_count {
            heap.push(cell, starting_entropy);
        }

        let mut selector = RandomSelector::new(args.seed);
        let next_cell = Some(selector.pick_cell(cell_count));

        Ok(Self {
            step_data: StepData {
                size,
                adjacency,
                weights,
            },
            catalog,
            palette,
            wave,
            heap,
            selector,
            counters: PropagationCounters::default(),
            steps: 0,
            elapsed: Duration::ZERO,
            next_cell,
            status: RunStatus::Running,
        })
    }

    /// Collapse the current cell, propagate, and pick the next one
    ///
    /// Once the run has converged or aborted this returns the final status
    /// without touching the wave.
    pub fn step(&mut self) -> RunStatus {
        if self.status != RunStatus::Running {
            return self.status;
        }
        let Some(cell) = self.next_cell else {
            self.status = RunStatus::Converged;
            return self.status;
        };

        let started = Instant::now();
        self.steps += 1;

        let outcome = collapse_cell(
            &mut self.wave,
            &self.step_data,
            cell,
            &mut self.selector,
            &mut self.counters,
        )
        .and_then(|events| {
            propagate(
                &mut self.wave,
                &self.step_data,
                &mut self.heap,
                &mut self.selector,
                events,
                &mut self.counters,
            )
        });

        self.status = match outcome {
            Err(contradiction) => RunStatus::Aborted(contradiction),
            Ok(()) => {
                self.next_cell = self.heap.pop_next_undetermined(&self.wave);
                if self.next_cell.is_some() {
                    RunStatus::Running
                } else {
                    RunStatus::Converged
                }
            }
        };

        self.elapsed += started.elapsed();
        self.status
    }

    /// Step until the run converges or aborts
    pub fn run(&mut self) -> RunStatus {
        while self.step() == RunStatus::Running {}
        self.status
    }

    /// Render the current wave, partial or not
    ///
    /// # Errors
    ///
    /// Returns an error if the wave does not cover the output grid
    pub fn render(&self) -> Result<OutputGrid> {
        render(&self.wave, &self.catalog, &self.palette, self.step_data.size)
    }

    /// Current run statistics
    pub const fn diagnostics(&self) -> Diagnostics {
        Diagnostics {
            steps: self.steps,
            removals: self.counters.removals,
            propagation_steps: self.counters.propagation_steps,
            elapsed: self.elapsed,
        }
    }

    /// Current status
    pub const fn status(&self) -> RunStatus {
        self.status
    }

    /// Output grid dimensions
    pub const fn size(&self) -> GridSize {
        self.step_data.size
    }

    /// Number of cells resolved to a single pattern so far
    pub const fn resolved_count(&self) -> usize {
        self.wave.resolved_count()
    }

    /// Per-cell solver state
    pub const fn wave(&self) -> &WaveState {
        &self.wave
    }

    /// Unique patterns and their weights
    pub const fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    /// Exemplar palette
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Constant run data
    pub const fn step_data(&self) -> &StepData {
        &self.step_data
    }

    /// Finish with the rendered grid, final status and statistics
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails
    pub fn into_generation(self) -> Result<Generation> {
        Ok(Generation {
            grid: self.render()?,
            status: self.status,
            diagnostics: self.diagnostics(),
        })
    }
}

/// Outcome of a run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generation {
    /// Rendered output, partial if the run aborted
    pub grid: OutputGrid,
    /// Final run status
    pub status: RunStatus,
    /// Run statistics
    pub diagnostics: Diagnostics,
}

impl Generation {
    /// The contradiction that stopped the run, if any
    pub const fn contradiction(&self) -> Option<Contradiction> {
        match self.status {
            RunStatus::Aborted(contradiction) => Some(contradiction),
            RunStatus::Running | RunStatus::Converged => None,
        }
    }

    /// Whether the run finished without a contradiction
    pub const fn is_converged(&self) -> bool {
        matches!(self.status, RunStatus::Converged)
    }

    /// The grid of a converged run
    ///
    /// # Errors
    ///
    /// Returns `Contradiction` with the failing coordinates if the run aborted
    pub fn into_result(self) -> Result<OutputGrid> {
        match self.contradiction() {
            Some(contradiction) => Err(contradiction.into()),
            None => Ok(self.grid),
        }
    }
}

/// Run a complete generation from an exemplar
///
/// # Errors
///
/// Returns an error if the inputs fail validation; a contradiction is
/// reported through [`Generation::status`] instead
#[allow(clippy::print_stderr)]
pub fn generate(exemplar: &Array2<Rgba>, args: &GenerationArgs) -> Result<Generation> {
    let mut solver = Solver::new(exemplar, args)?;
    solver.run();
    if args.debug {
        eprintln!("{}", solver.diagnostics());
    }
    solver.into_generation()
}
