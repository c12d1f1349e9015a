//! The Trello connector: the concrete [`SourceConnector`] the host drives.
//!
//! Holds the configuration-scoped state — the credential slot and the session
//! cell — and delegates the actual control flow to the domain crate.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use tracing::info;

use connector::{
    discover_boards, fetch_board, BoardDescriptor, ConnectorError, FetchSummary, RecordSink,
    SelectedBoard, SourceConnector,
};

use crate::client::TrelloApi;
use crate::credentials::OAuthCredentials;
use crate::session::SessionCell;

/// Static configuration for one Trello connector instance.
#[derive(Debug, Clone)]
pub struct TrelloConfig {
    /// The application (consumer) key issued by Trello.
    pub app_key: String,
    /// Whether discovery offers the aggregate "All Boards" entry.
    pub include_all_boards: bool,
}

/// Connector bound to one configuration.
///
/// Fetch runs may execute concurrently against the shared session handle;
/// credential replacement takes the write lock and invalidates the session so
/// the next operation binds a fresh client.
pub struct TrelloConnector {
    config: TrelloConfig,
    credentials: RwLock<Option<OAuthCredentials>>,
    session: SessionCell,
}

impl TrelloConnector {
    /// Creates a connector with no stored credentials.
    pub fn new(config: TrelloConfig) -> Self {
        Self {
            config,
            credentials: RwLock::new(None),
            session: SessionCell::new(),
        }
    }

    /// Post-processes a completed authorization: validates and stores the
    /// token pair and invalidates any session bound to the old credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::MissingCredential`] when either token field
    /// is empty; the previously stored credentials (if any) are kept.
    pub fn complete_authorization(
        &self,
        access_token: &str,
        token_secret: &str,
    ) -> Result<(), ConnectorError> {
        let creds =
            OAuthCredentials::from_authorization(&self.config.app_key, access_token, token_secret)?;
        let mut slot = self
            .credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *slot = Some(creds);
        drop(slot);
        self.session.invalidate();
        info!("authorization stored; session invalidated");
        Ok(())
    }

    /// Binds (or reuses) the session for the stored credentials.
    fn ensure_session(&self) -> Result<std::sync::Arc<TrelloApi>, ConnectorError> {
        let slot = self
            .credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let creds = slot.as_ref().ok_or(ConnectorError::NotAuthorized)?;
        self.session.ensure(creds)
    }
}

#[async_trait]
impl SourceConnector for TrelloConnector {
    async fn discover(&self) -> Result<Vec<BoardDescriptor>, ConnectorError> {
        let api = self.ensure_session()?;
        discover_boards(api.as_ref(), self.config.include_all_boards).await
    }

    async fn fetch_board(
        &self,
        selected: &SelectedBoard,
        sink: &mut dyn RecordSink,
    ) -> Result<FetchSummary, ConnectorError> {
        let api = self.ensure_session()?;
        fetch_board(api.as_ref(), selected, sink).await
    }

    fn probe_connectivity(&self) -> Result<(), ConnectorError> {
        self.ensure_session().map(|_| ())
    }
}
