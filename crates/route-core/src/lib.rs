//! `route-core` — foundational types for the `route` tactical pathfinding engine.
//!
//! This crate is a dependency of every other `route-*` crate.  It has no
//! `route-*` dependencies and only `thiserror` (plus optional `serde`) as
//! external ones.
//!
//! # What lives here
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`ids`]         | `LevelId`, `SizeClass`, `JobId`                          |
//! | [`geo`]         | `Cell`, `WorldPoint`, `Waypoint`, `GridKind`             |
//! | [`footprint`]   | `Mover`, footprint shapes/areas, `StepOffset`            |
//! | [`config`]      | `EngineConfig`, `DiagonalRule`                           |
//! | [`error`]       | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod footprint;
pub mod geo;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{DiagonalRule, EngineConfig};
pub use error::{CoreError, CoreResult};
pub use footprint::{Mover, StepOffset, footprint_area, footprint_shape};
pub use geo::{Cell, GridKind, Waypoint, WorldPoint};
pub use ids::{JobId, LevelId, SizeClass};
