use thiserror::Error;

/// Top-level error type for room extraction.
#[derive(Debug, Error)]
pub enum RoomgraphError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Script(#[from] ScriptError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("zero-length vector")]
    ZeroVector,

    #[error("centroid is undefined for a polygon with signed area {area}")]
    DegenerateCentroid { area: f64 },
}

/// Errors raised while building or traversing the wall graph.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    #[error("walk stuck at vertex {vertex} ({x}, {y}) after {walk_len} steps: no eligible neighbor")]
    StuckTraversal {
        vertex: String,
        x: f64,
        y: f64,
        walk_len: usize,
    },

    #[error("no wall connects ({}, {}) and ({}, {})", from.0, from.1, to.0, to.1)]
    UnresolvedWall { from: (f64, f64), to: (f64, f64) },

    #[error("iteration limit of {limit} exceeded")]
    IterationLimit { limit: usize },
}

/// Errors related to operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors raised while reading scene command lines.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command `{command}`")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: `{command}` is missing required field `{field}`")]
    MissingField {
        line: usize,
        command: &'static str,
        field: &'static str,
    },

    #[error("line {line}: field `{field}` has invalid value `{value}`")]
    InvalidValue {
        line: usize,
        field: String,
        value: String,
    },

    #[error("line {line}: malformed entry `{entry}`")]
    Malformed { line: usize, entry: String },
}

/// Convenience type alias for results using [`RoomgraphError`].
pub type Result<T> = std::result::Result<T, RoomgraphError>;
