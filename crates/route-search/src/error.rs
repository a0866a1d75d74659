//! Search error type.

use thiserror::Error;

use route_core::{Cell, CoreError};
use route_graph::{GraphError, OracleError};

/// Errors produced while creating, stepping or finishing a search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("start cell {0} is outside the map")]
    StartOutOfBounds(Cell),

    #[error("continuous-space search requires a native engine")]
    NativeEngineMissing,
}

pub type SearchResult<T> = Result<T, SearchError>;
