use thiserror::Error;

/// All errors surfaced by graph loading and ordering
#[derive(Error, Debug)]
pub enum Error {
    #[error("Dependency cycle detected: {path}")]
    CycleDetected { path: String },

    #[error("Found {count} dependency cycle(s)")]
    CyclesFound { count: usize },

    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Order is not consistent with the graph: {count} violation(s)")]
    InvalidOrder { count: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
