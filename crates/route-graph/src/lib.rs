//! `route-graph` — everything the search needs to know about the map.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                          |
//! |---------------|-------------------------------------------------------------------|
//! | [`topology`]  | `GridTopology` trait, `SquareGrid`, `HexGrid`, `ContinuousSpace`  |
//! | [`oracle`]    | `CollisionOracle`, `TerrainOracle`, `ObstacleSource`, `World`     |
//! | [`walls`]     | `Wall`, `DoorState`, `WallIndex` (R-tree collision oracle)        |
//! | [`loader`]    | `load_walls_csv`, `load_walls_reader`                             |
//! | [`levels`]    | `ElevationBand`, `LevelIndex`                                     |
//! | [`native`]    | `NativeEngine` boundary for continuous-space search               |
//! | [`cache`]     | `GraphCache`, `Node`, `Neighbor`                                  |
//! | [`error`]     | `GraphError`, `OracleError`, `GraphResult<T>`                     |
//!
//! # Caching policy
//!
//! Nodes are built on first visit and kept until the whole cache is
//! discarded.  There is no per-key invalidation: any wall or viewport change
//! rebuilds the [`LevelIndex`] and starts from an empty [`GraphCache`].

pub mod cache;
pub mod error;
pub mod levels;
pub mod loader;
pub mod native;
pub mod oracle;
pub mod topology;
pub mod walls;

#[cfg(test)]
mod tests;

pub use cache::{GraphCache, Neighbor, Node};
pub use error::{GraphError, GraphResult, OracleError};
pub use levels::{ElevationBand, LevelIndex};
pub use loader::{load_walls_csv, load_walls_reader};
pub use native::{NativeEngine, NativeGraph, NativeRoute, NativeSearch, NativeStep};
pub use oracle::{CollisionOracle, ObstacleSource, TerrainMeasurement, TerrainOracle, World};
pub use topology::{ContinuousSpace, GridTopology, HexGrid, SquareGrid};
pub use walls::{DoorState, Wall, WallIndex};
