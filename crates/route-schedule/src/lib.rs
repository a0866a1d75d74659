//! `route-schedule` — time-sliced execution of many searches on one thread.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`scheduler`] | `Scheduler`, `Job`                                        |
//! | [`ticket`]    | `PathTicket`, `Completer`, `SearchOutcome`, `ticket()`    |
//! | [`clock`]     | `Clock`, `SystemClock`, `TickingClock`                    |
//! | [`observer`]  | `QuantumObserver`, `NoopObserver`, `QuantumReport`        |
//!
//! # Hosting
//!
//! The host calls [`Scheduler::run_quantum`] from its event loop whenever
//! the queue is non-empty, yielding back to its own work between quanta.
//! Quanta never overlap and no step is ever interrupted.

pub mod clock;
pub mod observer;
pub mod scheduler;
pub mod ticket;


pub use clock::{Clock, SystemClock, TickingClock};
pub use observer::{JobStatus, NoopObserver, QuantumObserver, QuantumReport};
pub use scheduler::{Job, Scheduler};
pub use ticket::{Completer, PathTicket, SearchOutcome, ticket};
