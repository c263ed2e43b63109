use thiserror::Error;

/// Top-level error type for the panelflow crate.
#[derive(Debug, Error)]
pub enum PanelflowError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Solver(#[from] SolverError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("transform is not invertible")]
    SingularTransform,

    #[error("degenerate viewport: {width}x{height}")]
    DegenerateViewport { width: f64, height: f64 },
}

/// Errors related to the point/line store.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),
}

/// Errors related to the panel-method solve.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("a closed polygon needs at least 2 panels, got {count}")]
    TooFewPanels { count: usize },

    #[error("linear solve failed: {0}")]
    Decomposition(String),
}

/// Convenience type alias for results using [`PanelflowError`].
pub type Result<T> = std::result::Result<T, PanelflowError>;
