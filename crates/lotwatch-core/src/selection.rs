use crate::error::CoreError;
use crate::record::CarparkRecord;
use crate::store::CarparkStore;

/// Tracks the single active carpark.
///
/// The controller does not observe the store. After a reload that may have
/// dropped the active id, the owner must reconcile (see [`Self::is_dangling`]);
/// [`crate::Session`] does this as part of its own `load`.
#[derive(Debug, Default)]
pub struct SelectionController {
    active_id: Option<String>,
}

impl SelectionController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `id` the active carpark and return its record.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownCarpark`] if `id` is not in `store`; the
    /// previous selection is kept.
    pub fn select<'a>(
        &mut self,
        store: &'a CarparkStore,
        id: &str,
    ) -> Result<&'a CarparkRecord, CoreError> {
        let record = store
            .find_by_id(id)
            .ok_or_else(|| CoreError::UnknownCarpark(id.to_string()))?;
        self.active_id = Some(record.id.clone());
        Ok(record)
    }

    pub fn clear(&mut self) {
        self.active_id = None;
    }

    #[must_use]
    pub fn is_active(&self, id: &str) -> bool {
        self.active_id.as_deref() == Some(id)
    }

    #[must_use]
    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    /// `true` when the active id no longer exists in `store`.
    #[must_use]
    pub fn is_dangling(&self, store: &CarparkStore) -> bool {
        self.active_id
            .as_deref()
            .is_some_and(|id| store.find_by_id(id).is_none())
    }
}
