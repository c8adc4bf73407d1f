use thiserror::Error;

/// Invalid construction parameters. Raised only when a simulation is built,
/// never while it runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("board dimensions must be positive, got {width}x{height}")]
    NonPositiveDimensions { width: i32, height: i32 },
    #[error("initial snake length must be at least 1")]
    EmptySnake,
    #[error("snake of length {length} does not fit on a {width}x{height} board")]
    SnakeDoesNotFit { length: usize, width: i32, height: i32 },
    #[error("snack count must be at least 1")]
    NoSnacks,
    #[error("{requested} snacks requested but only {free} free cells")]
    TooManySnacks { requested: usize, free: usize },
    #[error("min score threshold {min} is above max score threshold {max}")]
    InvertedScoreBounds { min: f64, max: f64 },
    #[error("{0} must be a finite number")]
    NonFinitePoints(&'static str),
}

/// Failure to read a configuration from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),
}
