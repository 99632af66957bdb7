//! Error types.

use thiserror::Error;

/// Result alias for fallible crate operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Malformed or size-inconsistent instance data.
///
/// Raised while loading a weighted CNF file or constructing a
/// [`Formula`](crate::formula::Formula). A run never starts once one of
/// these has been produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The file is shorter than the fixed header block.
    #[error("instance file has {found} lines, at least {required} are required")]
    TooFewLines { found: usize, required: usize },

    /// A header line lacks the token at the expected position.
    #[error("line {line}: missing {what}")]
    MissingField { line: usize, what: &'static str },

    /// A token that should be an integer could not be parsed.
    #[error("line {line}: invalid integer token '{token}'")]
    InvalidToken { line: usize, token: String },

    /// Number of clause lines differs from the declared clause count.
    #[error("declared {declared} clauses, found {parsed}")]
    ClauseCountMismatch { declared: usize, parsed: usize },

    /// Number of weights differs from the declared variable count.
    #[error("declared {declared} variables, found {parsed} weights")]
    WeightCountMismatch { declared: usize, parsed: usize },

    /// A literal refers to a variable outside `1..=variable_count`.
    #[error("clause {clause}: literal {literal} is outside 1..={variable_count}")]
    LiteralOutOfRange {
        clause: usize,
        literal: i32,
        variable_count: usize,
    },

    /// The largest weight an assignment can score does not fit in `u64`.
    #[error("total weight of the instance exceeds {}", u64::MAX)]
    WeightOverflow,

    /// A literal in an assignment listing is not at its variable's position.
    #[error("position {position}: expected variable {position}, found literal {literal}")]
    LiteralOutOfOrder { position: usize, literal: i32 },
}

/// Invalid annealing parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("initial temperature must be positive and finite, got {0}")]
    InitialTemperature(f64),

    #[error("final temperature must be positive and finite, got {0}")]
    FinalTemperature(f64),

    #[error("final temperature {final_temperature} must be below initial temperature {initial_temperature}")]
    TemperatureOrder {
        initial_temperature: f64,
        final_temperature: f64,
    },

    #[error("cool factor must be in (0, 1), got {0}")]
    CoolFactor(f64),
}

/// Top-level error for loading an instance and running the search.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read instance: {0}")]
    Io(#[from] std::io::Error),

    #[error("bad instance format: {0}")]
    Format(#[from] FormatError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
