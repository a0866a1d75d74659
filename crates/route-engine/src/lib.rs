//! `route-engine` — the host-facing entry point of the route workspace.
//!
//! # Operations
//!
//! | Call                                | Effect                                             |
//! |-------------------------------------|----------------------------------------------------|
//! | [`Engine::submit_search`]           | Queue a search, get a [`PathTicket`]               |
//! | [`Engine::await_search_blocking`]   | Run a bounded search inline                        |
//! | [`Engine::cancel_search`]           | Drop a queued job; its ticket never resolves       |
//! | [`Engine::invalidate_cache`]        | Rebuild levels and graphs, restart queued searches |
//! | [`Engine::run_quantum`]             | One scheduling quantum (call from the event loop)  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use route_core::{Cell, EngineConfig, Waypoint};
//! use route_engine::EngineBuilder;
//! use route_graph::{SquareGrid, WallIndex};
//! use route_search::SearchOptions;
//!
//! let mut engine = EngineBuilder::new(EngineConfig::default(), SquareGrid::new(10, 10, 100.0, 5.0))
//!     .walls(WallIndex::new(walls))
//!     .build()?;
//! let ticket = engine.submit_search(
//!     Waypoint::Cell(Cell::new(0, 0)),
//!     Waypoint::Cell(Cell::new(9, 9)),
//!     SearchOptions::default(),
//! )?;
//! while engine.wants_quantum() {
//!     engine.run_quantum();
//! }
//! let route = ticket.try_take();
//! ```

pub mod builder;
pub mod engine;
pub mod error;


pub use builder::EngineBuilder;
pub use engine::Engine;
pub use error::{EngineError, EngineResult};

pub use route_schedule::{PathTicket, SearchOutcome};
pub use route_search::{Route, SearchOptions};
