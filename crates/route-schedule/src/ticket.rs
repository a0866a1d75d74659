//! Completion tickets.
//!
//! [`ticket`] creates a linked pair: the caller keeps the [`PathTicket`], the
//! queued job keeps the [`Completer`].  The completer delivers exactly one
//! [`SearchOutcome`]; once the ticket is cancelled, delivery is a no-op and
//! the ticket never resolves.
//!
//! ```text
//!            resolve()                take / poll
//! Pending ─────────────► Ready ─────────────────► Taken
//!    │
//!    └── cancel() ──► Cancelled   (terminal, never resolves)
//! ```
//!
//! Both halves share one `Rc<RefCell<..>>`; everything runs on the host's
//! single scheduling thread.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use route_core::JobId;
use route_search::{Route, SearchError};

/// What a search job resolves to: a route, `None` when no route exists
/// within the distance bound, or the fault that stopped the search.
pub type SearchOutcome = Result<Option<Route>, SearchError>;

enum Slot {
    Pending,
    Ready(SearchOutcome),
    Taken,
    Cancelled,
}

struct Shared {
    slot: Slot,
    waker: Option<Waker>,
}

/// Create a linked ticket/completer pair for job `id`.
pub fn ticket(id: JobId) -> (PathTicket, Completer) {
    let shared = Rc::new(RefCell::new(Shared { slot: Slot::Pending, waker: None }));
    (
        PathTicket { id, shared: Rc::clone(&shared) },
        Completer { id, shared },
    )
}

// ── PathTicket ────────────────────────────────────────────────────────────────

/// Caller-side handle to a submitted search.
///
/// Poll it with [`try_take`](PathTicket::try_take) from a frame loop, or
/// `.await` it from an async host.
pub struct PathTicket {
    id: JobId,
    shared: Rc<RefCell<Shared>>,
}

impl PathTicket {
    pub fn id(&self) -> JobId {
        self.id
    }

    /// `true` once an outcome was delivered (taken or not).
    pub fn is_resolved(&self) -> bool {
        matches!(self.shared.borrow().slot, Slot::Ready(_) | Slot::Taken)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.shared.borrow().slot, Slot::Cancelled)
    }

    /// Take the outcome if it has arrived.  Returns it at most once.
    pub fn try_take(&self) -> Option<SearchOutcome> {
        let mut shared = self.shared.borrow_mut();
        match std::mem::replace(&mut shared.slot, Slot::Taken) {
            Slot::Ready(outcome) => Some(outcome),
            other => {
                shared.slot = other;
                None
            }
        }
    }
}

impl Future for PathTicket {
    type Output = SearchOutcome;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<SearchOutcome> {
        if let Some(outcome) = self.try_take() {
            return Poll::Ready(outcome);
        }
        self.shared.borrow_mut().waker = Some(cx.waker().clone());
        Poll::Pending
    }
}

impl std::fmt::Debug for PathTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathTicket")
            .field("id", &self.id)
            .field("resolved", &self.is_resolved())
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

// ── Completer ─────────────────────────────────────────────────────────────────

/// Job-side half of a ticket.
pub struct Completer {
    id: JobId,
    shared: Rc<RefCell<Shared>>,
}

impl Completer {
    pub fn id(&self) -> JobId {
        self.id
    }

    /// Deliver `outcome`.  Returns `false` (dropping the outcome) if the
    /// ticket was cancelled or already resolved.
    pub fn resolve(&self, outcome: SearchOutcome) -> bool {
        let waker = {
            let mut shared = self.shared.borrow_mut();
            if !matches!(shared.slot, Slot::Pending) {
                return false;
            }
            shared.slot = Slot::Ready(outcome);
            shared.waker.take()
        };
        if let Some(w) = waker {
            w.wake();
        }
        true
    }

    /// Mark the ticket cancelled.  A pending ticket stays pending forever.
    pub fn cancel(&self) {
        let mut shared = self.shared.borrow_mut();
        if matches!(shared.slot, Slot::Pending) {
            shared.slot = Slot::Cancelled;
            shared.waker = None;
        }
    }
}
