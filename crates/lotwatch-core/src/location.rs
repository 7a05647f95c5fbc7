//! Sequencing of asynchronous location requests.
//!
//! Every request gets a [`LocationTicket`] carrying a monotonically
//! increasing sequence number. Only the most recently issued ticket may
//! update the user position, and only once; anything else is stale and is
//! dropped so a slow callback cannot resurrect an old position.

use crate::error::CoreError;
use crate::geo::LatLng;
use crate::store::CarparkStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocationTicket(u64);

impl LocationTicket {
    #[must_use]
    pub fn sequence(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LocationOutcome {
    /// The position was stored and distances recomputed.
    Applied(LatLng),
    /// A newer request was issued, or this ticket already completed.
    Stale,
    /// The latest request failed; the previous position is untouched.
    Failed(CoreError),
}

#[derive(Debug, Default)]
pub struct LocationTracker {
    issued: u64,
    pending: Option<u64>,
}

impl LocationTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding any outstanding one.
    pub fn begin_request(&mut self) -> LocationTicket {
        self.issued += 1;
        self.pending = Some(self.issued);
        LocationTicket(self.issued)
    }

    /// Drop the outstanding request, if any; its ticket will complete as
    /// [`LocationOutcome::Stale`].
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Resolve `ticket` with the location service's answer; `Err` carries
    /// the service's failure reason.
    pub fn complete(
        &mut self,
        ticket: LocationTicket,
        result: Result<LatLng, String>,
        store: &mut CarparkStore,
    ) -> LocationOutcome {
        if self.pending != Some(ticket.0) {
            return LocationOutcome::Stale;
        }
        self.pending = None;

        match result {
            Ok(position) => {
                store.set_user_position(position);
                LocationOutcome::Applied(position)
            }
            Err(reason) => LocationOutcome::Failed(CoreError::LocationUnavailable(reason)),
        }
    }
}
