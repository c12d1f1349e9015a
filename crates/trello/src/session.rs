//! Session cell: the lazily constructed, explicitly invalidated client slot.
//!
//! State transitions are explicit: absent → live on [`SessionCell::ensure`],
//! live → absent on [`SessionCell::invalidate`] (called whenever credentials
//! are replaced). At most one live handle exists at a time; because
//! construction is pure binding, losing a construction race costs nothing.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use connector::ConnectorError;

use crate::client::TrelloApi;
use crate::credentials::OAuthCredentials;

/// Owned slot holding the single live [`TrelloApi`] handle, if any.
#[derive(Default)]
pub struct SessionCell {
    slot: Mutex<Option<Arc<TrelloApi>>>,
}

impl SessionCell {
    /// Creates an empty (absent) cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the live handle, constructing one from `credentials` first if
    /// the slot is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::Session`] when the client cannot be built.
    pub fn ensure(&self, credentials: &OAuthCredentials) -> Result<Arc<TrelloApi>, ConnectorError> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(api) = slot.as_ref() {
            return Ok(Arc::clone(api));
        }
        debug!("constructing board service client");
        let api = Arc::new(TrelloApi::new(credentials)?);
        *slot = Some(Arc::clone(&api));
        Ok(api)
    }

    /// Drops the live handle, if any. The next [`SessionCell::ensure`]
    /// constructs a fresh one.
    pub fn invalidate(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.take().is_some() {
            debug!("board service client invalidated");
        }
    }
}
