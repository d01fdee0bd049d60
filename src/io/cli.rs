//! Command-line interface for batch texture synthesis from PNG exemplars

use crate::algorithm::executor::{GenerationArgs, RunStatus, Solver};
use crate::io::configuration::{
    DEFAULT_OUTPUT_HEIGHT, DEFAULT_OUTPUT_WIDTH, DEFAULT_SEED, OUTPUT_SUFFIX, PATTERN_SIZE,
};
use crate::io::error::{Result, io_error};
use crate::io::image::{export_grid_as_png, load_exemplar};
use crate::io::progress::ProgressManager;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "overlapwfc")]
#[command(
    author,
    version,
    about = "Synthesize textures from PNG exemplars with overlapping wave function collapse"
)]
/// Command-line arguments for the texture synthesis tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Output width in pixels
    #[arg(short = 'w', long, default_value_t = DEFAULT_OUTPUT_WIDTH)]
    pub width: usize,

    /// Output height in pixels
    #[arg(short = 'H', long, default_value_t = DEFAULT_OUTPUT_HEIGHT)]
    pub height: usize,

    /// Random seed for reproducible generation (0 picks a random seed)
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Side length of the sampled patterns
    #[arg(short = 'n', long, default_value_t = PATTERN_SIZE)]
    pub pattern_size: usize,

    /// Add rotated and mirrored pattern variants
    #[arg(short = 'r', long)]
    pub symmetry: bool,

    /// Columns excluded from the right edge of the exemplar
    #[arg(long, default_value_t = 0)]
    pub crop_x: usize,

    /// Rows excluded from the bottom edge of the exemplar
    #[arg(long, default_value_t = 0)]
    pub crop_y: usize,

    /// Print run statistics after each file
    #[arg(short, long)]
    pub debug: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Solver parameters selected on the command line
    pub const fn generation_args(&self) -> GenerationArgs {
        GenerationArgs {
            width: self.width,
            height: self.height,
            pattern_size: self.pattern_size,
            use_symmetry: self.symmetry,
            crop_x: self.crop_x,
            crop_y: self.crop_y,
            seed: self.seed,
            debug: self.debug,
        }
    }
}

/// Orchestrates batch processing of PNG files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation or file processing fails
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if !is_png(&self.cli.target) {
                return Err(io_error("Target file must be a PNG image"));
            }
            if self.should_process_file(&self.cli.target) {
                Ok(vec![self.cli.target.clone()])
            } else {
                Ok(vec![])
            }
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target)? {
                let path = entry?.path();
                if is_png(&path) && !is_output(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(io_error("Target must be a PNG file or directory"))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = output_path_for(input_path);
        if output_path.exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    // Allow print for contradiction warnings and debug statistics
    #[allow(clippy::print_stderr)]
    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let args = self.cli.generation_args();
        let exemplar = load_exemplar(input_path)?;
        let mut solver = Solver::new(&exemplar, &args)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, solver.size().cell_count());
        }

        while solver.step() == RunStatus::Running {
            if let Some(ref mut pm) = self.progress_manager {
                pm.update_resolved(index, solver.resolved_count());
            }
        }

        let generation = solver.into_generation()?;
        export_grid_as_png(&generation.grid, &output_path_for(input_path))?;

        if let Some(contradiction) = generation.contradiction() {
            eprintln!(
                "Warning: {} aborted with a contradiction at {}/{} (partial output written)",
                input_path.display(),
                contradiction.x,
                contradiction.y
            );
        }
        if args.debug {
            eprintln!("{}: {}", input_path.display(), generation.diagnostics);
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, generation.is_converged());
        }

        Ok(())
    }
}

fn is_png(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("png")
}

fn is_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}

/// Output path for an input file: `<stem>_result.<ext>` next to the input
pub fn output_path_for(input_path: &Path) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let extension = input_path.extension().unwrap_or_default();
    let output_name = format!(
        "{}{}.{}",
        stem.to_string_lossy(),
        OUTPUT_SUFFIX,
        extension.to_string_lossy()
    );

    if let Some(parent) = input_path.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}
