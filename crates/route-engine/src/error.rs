use thiserror::Error;

use route_core::{CoreError, GridKind};
use route_graph::GraphError;
use route_search::SearchError;

/// Errors returned synchronously by [`Engine`][crate::Engine] calls.
///
/// Faults inside a queued search never surface here; they fail that job's
/// ticket instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("blocking searches need a max distance")]
    UnboundedBlockingSearch,

    #[error("{kind} maps take {expected} waypoints")]
    WaypointMismatch {
        kind:     GridKind,
        expected: &'static str,
    },

    #[error("gridless map configured without a native engine")]
    NativeEngineMissing,

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type EngineResult<T> = Result<T, EngineError>;
