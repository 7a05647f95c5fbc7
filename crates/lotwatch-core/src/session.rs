//! The per-session object graph.
//!
//! A [`Session`] owns the store, the selection, the location sequencing and
//! the current query. Render targets subscribe to it and receive a fresh
//! [`ViewFrame`] after every state change, so the list, dropdown and markers
//! are always painted from the same projection.

use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;
use crate::geo::LatLng;
use crate::location::{LocationOutcome, LocationTicket, LocationTracker};
use crate::projector::{Query, SortKey};
use crate::selection::SelectionController;
use crate::store::CarparkStore;
use crate::views::{CarparkDetail, ViewFrame};

/// A consumer of view frames (list panel, dropdown, map layer, ...).
pub trait RenderTarget {
    fn render(&mut self, frame: &ViewFrame);
}

impl<F> RenderTarget for F
where
    F: FnMut(&ViewFrame),
{
    fn render(&mut self, frame: &ViewFrame) {
        self(frame);
    }
}

/// Returned by [`Session::select`] so the caller can focus the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FocusRequest {
    pub id: String,
    pub position: Option<LatLng>,
    /// Animate to the marker rather than just opening its popup.
    pub fly: bool,
    pub detail: CarparkDetail,
}

#[derive(Default)]
pub struct Session {
    store: CarparkStore,
    selection: SelectionController,
    location: LocationTracker,
    query: Query,
    targets: Vec<Box<dyn RenderTarget>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("store", &self.store)
            .field("selection", &self.selection)
            .field("location", &self.location)
            .field("query", &self.query)
            .field("targets", &self.targets.len())
            .finish()
    }
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a render target and paint it with the current state.
    pub fn subscribe(&mut self, mut target: Box<dyn RenderTarget>) {
        target.render(&self.frame());
        self.targets.push(target);
    }

    #[must_use]
    pub fn store(&self) -> &CarparkStore {
        &self.store
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    #[must_use]
    pub fn query(&self) -> &Query {
        &self.query
    }

    #[must_use]
    pub fn frame(&self) -> ViewFrame {
        ViewFrame::build(&self.store, &self.query, &self.selection)
    }

    /// Replace the record set and drop a selection that no longer exists.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::FeedFormat`] if the feed is unusable; nothing
    /// changes and no frame is published.
    pub fn load(&mut self, raw_feed: &Value) -> Result<(), CoreError> {
        self.store.load(raw_feed)?;
        if self.selection.is_dangling(&self.store) {
            self.selection.clear();
        }
        self.publish();
        Ok(())
    }

    pub fn set_query(&mut self, query: Query) {
        self.query = query;
        self.publish();
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.query.search_text = text.into();
        self.publish();
    }

    pub fn set_lot_type_filter(&mut self, lot_type: Option<String>) {
        self.query.lot_type_filter = lot_type;
        self.publish();
    }

    pub fn set_sort_key(&mut self, sort_key: SortKey) {
        self.query.sort_key = sort_key;
        self.publish();
    }

    /// Store a position obtained synchronously. Any outstanding location
    /// request is superseded and its callback will be stale.
    pub fn set_user_position(&mut self, position: LatLng) {
        self.location.cancel();
        self.store.set_user_position(position);
        self.publish();
    }

    /// Issue a new location request; older outstanding tickets become stale.
    pub fn begin_location(&mut self) -> LocationTicket {
        self.location.begin_request()
    }

    /// Feed a location callback back into the session.
    ///
    /// Only an applied position triggers a repaint.
    pub fn complete_location(
        &mut self,
        ticket: LocationTicket,
        result: Result<LatLng, String>,
    ) -> LocationOutcome {
        let outcome = self.location.complete(ticket, result, &mut self.store);
        if matches!(outcome, LocationOutcome::Applied(_)) {
            self.publish();
        }
        outcome
    }

    /// Activate a carpark.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownCarpark`] if `id` is not loaded; the
    /// previous selection stays active and no frame is published.
    pub fn select(&mut self, id: &str, fly: bool) -> Result<FocusRequest, CoreError> {
        let record = self.selection.select(&self.store, id)?;
        let focus = FocusRequest {
            id: record.id.clone(),
            position: record.position,
            fly,
            detail: CarparkDetail::from(record),
        };
        self.publish();
        Ok(focus)
    }

    pub fn clear(&mut self) {
        self.selection.clear();
        self.publish();
    }

    /// Back to the default query with nothing selected.
    pub fn reset(&mut self) {
        self.query = Query::default();
        self.selection.clear();
        self.publish();
    }

    fn publish(&mut self) {
        if self.targets.is_empty() {
            return;
        }
        let frame = self.frame();
        for target in &mut self.targets {
            target.render(&frame);
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
