use thiserror::Error;

/// Top-level error type for planar mesh operations.
#[derive(Debug, Error)]
pub enum PlanarError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("transform is singular and has no inverse")]
    SingularTransform,
}

/// Errors related to mesh element bookkeeping.
#[derive(Debug, Error, PartialEq)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("{0} is not owned by this mesh")]
    NotOwned(String),

    #[error("{kind} index {index} is out of range (len {len})")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },
}

/// Convenience type alias for results using [`PlanarError`].
pub type Result<T> = std::result::Result<T, PlanarError>;
