//! `route-search` — resumable shortest-path searches.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`frontier`]    | `Frontier`, `FrontierEntry` (deduplicating min-queue)      |
//! | [`cost`]        | `CostModel`, heuristic, terrain step costs                 |
//! | [`grid`]        | `GridSearch` (A* over square/hex graphs)                   |
//! | [`gridless`]    | `GridlessSearch` (native-engine wrapper)                   |
//! | [`postprocess`] | `PostProcess` (unroll + string-pull)                       |
//! | [`search`]      | `PathSearch`, `StepOutcome`, `SearchContext`, `AnySearch`  |
//! | [`options`]     | `SearchOptions`                                            |
//! | [`error`]       | `SearchError`, `SearchResult<T>`                           |
//!
//! # Units
//!
//! Searches work in cells: an orthogonal step costs 1.  Only the finished
//! [`Route`] is converted to host distance units.

pub mod cost;
pub mod error;
pub mod frontier;
pub mod grid;
pub mod gridless;
pub mod options;
pub mod postprocess;
pub mod search;


pub use cost::CostModel;
pub use error::{SearchError, SearchResult};
pub use frontier::{Frontier, FrontierEntry};
pub use grid::GridSearch;
pub use gridless::GridlessSearch;
pub use options::SearchOptions;
pub use postprocess::PostProcess;
pub use search::{AnySearch, PathSearch, Route, SearchContext, StepOutcome};
