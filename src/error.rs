//! Error types for the solver crate.

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Solver error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Vehicle extends past the grid boundary
    #[error("vehicle {label} does not fit within the {grid_size}x{grid_size} grid")]
    OutOfBounds { label: u32, grid_size: usize },

    /// Two vehicles occupy a common cell
    #[error("vehicle {label} overlaps vehicle {other}")]
    Overlap { label: u32, other: u32 },

    /// Label 0 marks empty cells in the occupancy map
    #[error("vehicle label 0 is reserved for empty cells")]
    ZeroLabel,

    /// Two vehicles share a label
    #[error("duplicate vehicle label {0}")]
    DuplicateLabel(u32),

    /// Heuristic name not in the registry
    #[error("unknown heuristic '{name}', expected one of: {}", .expected.join(", "))]
    UnknownHeuristic {
        name: String,
        expected: Vec<&'static str>,
    },

    /// Malformed puzzle description
    #[error("puzzle line {line}: {reason}")]
    ParseLine { line: usize, reason: String },

    /// I/O error reading a puzzle file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
