//! Port trait definitions.
//!
//! Infrastructure crates implement these traits; the domain logic in
//! [`crate::discovery`] and [`crate::fetch`] is written against them and
//! never sees transport detail.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::{ApiError, ConnectorError};
use crate::identifiers::BoardId;
use crate::types::{Board, BoardDescriptor, FetchSummary, NormalizedRecord, SelectedBoard};

/// Result type for remote board-service operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// The three read operations the remote board service exposes.
///
/// Implementations are stateless per call: each method is an independent
/// request/response exchange, so one handle may serve concurrent fetch runs
/// without locking. No operation carries a retry or cancellation policy.
#[async_trait]
pub trait BoardApi: Send + Sync {
    /// Lists every board visible to `member` (`"me"` for the authenticated
    /// principal).
    async fn member_boards(&self, member: &str) -> ApiResult<Vec<Board>>;

    /// Lists the lists on the given board.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidId`] when the remote service does not know
    /// the board identifier.
    async fn lists_on_board(&self, board: &BoardId) -> ApiResult<Vec<Value>>;

    /// Lists the cards on the given board.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidId`] when the remote service does not know
    /// the board identifier.
    async fn cards_on_board(&self, board: &BoardId) -> ApiResult<Vec<Value>>;
}

/// Destination for normalised record batches.
///
/// Called with a non-empty batch only, synchronously relative to each fetch
/// step's completion, and at most once per step. Ownership of the records
/// transfers to the sink; nothing is retracted when a later step fails.
pub trait RecordSink: Send {
    /// Accepts one batch of normalised records.
    fn push_records(&mut self, batch: Vec<NormalizedRecord>);
}

/// Capability surface a host orchestration layer calls by contract.
///
/// One implementation exists per configured source service; the host holds it
/// as `dyn SourceConnector` and never depends on the concrete adapter.
#[async_trait]
pub trait SourceConnector: Send + Sync {
    /// Discovers the boards the authenticated member may select from,
    /// sorted for the selection UI.
    async fn discover(&self) -> Result<Vec<BoardDescriptor>, ConnectorError>;

    /// Runs one full fetch for the selected board, streaming normalised
    /// records to `sink`.
    async fn fetch_board(
        &self,
        selected: &SelectedBoard,
        sink: &mut dyn RecordSink,
    ) -> Result<FetchSummary, ConnectorError>;

    /// Verifies that a remote session can be constructed from the stored
    /// credentials. Binding validation only — no network call is made.
    fn probe_connectivity(&self) -> Result<(), ConnectorError>;
}
