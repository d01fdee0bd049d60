//! Error types for exemplar validation, solving and file operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all solver operations
#[derive(Debug)]
pub enum SolverError {
    /// Failed to load exemplar image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save generated image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Exemplar is smaller than the sampling window in at least one dimension
    InputTooSmall {
        /// Exemplar width in pixels
        width: usize,
        /// Exemplar height in pixels
        height: usize,
        /// Side length of the sampling window
        pattern_size: usize,
    },

    /// Exemplar uses more distinct colors than pattern cells can address
    PaletteOverflow {
        /// Number of distinct colors seen before giving up
        colors: usize,
        /// Largest supported palette
        max_colors: usize,
    },

    /// Requested output has a zero dimension
    InvalidOutputSize {
        /// Requested output width
        width: usize,
        /// Requested output height
        height: usize,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A cell ran out of possible patterns and the run was aborted
    Contradiction {
        /// Column of the failing cell
        x: usize,
        /// Row of the failing cell
        y: usize,
    },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InputTooSmall {
                width,
                height,
                pattern_size,
            } => {
                write!(
                    f,
                    "Input too small: exemplar is {width}x{height} but patterns are {pattern_size}x{pattern_size}"
                )
            }
            Self::PaletteOverflow { colors, max_colors } => {
                write!(
                    f,
                    "Palette overflow: exemplar has more than {max_colors} distinct colors ({colors} seen)"
                )
            }
            Self::InvalidOutputSize { width, height } => {
                write!(
                    f,
                    "Invalid output size {width}x{height}: both dimensions must be positive"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Contradiction { x, y } => {
                write!(f, "Contradiction occurred at {x}/{y}")
            }
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, SolverError>;

impl From<image::ImageError> for SolverError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for SolverError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> SolverError {
    SolverError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an error for an unusable input or output path
pub fn io_error(msg: &str) -> SolverError {
    SolverError::InvalidParameter {
        parameter: "path",
        value: String::new(),
        reason: msg.to_string(),
    }
}
