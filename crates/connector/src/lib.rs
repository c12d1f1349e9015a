//! Core connector domain for Boardpipe.
//!
//! This crate contains every domain concept used throughout the ingestion
//! pipeline: newtype identifiers, record and descriptor types, the error
//! taxonomy, the port traits infrastructure crates implement, and the two
//! pieces of real control flow — board discovery and the sequential fetch
//! orchestrator.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply
//! it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype domain identifiers (`BoardId`, `FetchRunId`) |
//! | [`types`] | Descriptors, normalised records, run summary/status types |
//! | [`errors`] | Port-level and connector-level error types |
//! | [`ports`] | `BoardApi`, `RecordSink`, and `SourceConnector` traits |
//! | [`normalize`] | The `{type, data}` record normaliser |
//! | [`discovery`] | Member-board discovery and selection-UI ordering |
//! | [`fetch`] | The sequential, fail-fast fetch orchestrator |

pub mod discovery;
pub mod errors;
pub mod fetch;
pub mod identifiers;
pub mod normalize;
pub mod ports;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use discovery::{discover_boards, ALL_BOARDS_LABEL};
pub use errors::{ApiError, ConnectorError, FetchStage};
pub use fetch::fetch_board;
pub use identifiers::{BoardId, FetchRunId};
pub use normalize::RecordWriter;
pub use ports::{ApiResult, BoardApi, RecordSink, SourceConnector};
pub use types::{
    Board, BoardDescriptor, FetchSummary, NormalizedRecord, RecordKind, RunStatus, SelectedBoard,
    Timestamp,
};
