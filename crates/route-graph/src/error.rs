//! Graph-subsystem error types.

use thiserror::Error;

use route_core::{Cell, CoreError};

/// A failed call into a host collaborator.
///
/// Collaborators report faults as values; the scheduler turns them into a
/// failed job without disturbing other queued searches.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OracleError {
    #[error("collision oracle failed: {0}")]
    Collision(String),

    #[error("terrain oracle failed: {0}")]
    Terrain(String),

    #[error("native engine failed: {0}")]
    Native(String),
}

/// Errors produced by `route-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("cell {0} is outside the map")]
    OutOfBounds(Cell),

    #[error("{0} graphs are not available on this map")]
    WrongGridKind(&'static str),

    #[error("wall file parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;
