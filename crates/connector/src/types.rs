//! Shared value types for the connector domain.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! meaningful values: board descriptors offered to the selection UI, the
//! normalised records handed to the staging sink, and the summary/status
//! types that report a run's terminal outcome.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ConnectorError;
use crate::identifiers::{BoardId, FetchRunId};

// ---------------------------------------------------------------------------
// Raw source objects
// ---------------------------------------------------------------------------

/// One board as returned by the remote service's member-board listing.
///
/// `id` and `name` are extracted for matching and display; `raw` is the
/// complete source object, which is what actually gets normalised and staged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    /// Remote identifier of the board.
    pub id: BoardId,
    /// Display name of the board.
    pub name: String,
    /// The unmodified source object.
    pub raw: Value,
}

// ---------------------------------------------------------------------------
// Discovery descriptors
// ---------------------------------------------------------------------------

/// One entry in the discovery result offered to the selection UI.
///
/// Serialised in the staging wire format: a concrete board carries
/// `{label, name}`, the aggregate entry carries only `{labelPlural}`.
/// At most one aggregate entry appears per discovery result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoardDescriptor {
    /// A single board the member can select.
    Board {
        /// Display label (the board name).
        label: String,
        /// Remote board identifier.
        name: BoardId,
    },
    /// The aggregate "all boards" entry. Carries no identifier.
    All {
        /// Plural display label (e.g. `"All Boards"`).
        #[serde(rename = "labelPlural")]
        plural_label: String,
    },
}

impl BoardDescriptor {
    /// Returns the display label, or `None` for the aggregate entry.
    ///
    /// The absence of a label is what makes the aggregate entry sort before
    /// every concrete board.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Board { label, .. } => Some(label),
            Self::All { .. } => None,
        }
    }
}

/// The board chosen from a discovery result, input to the fetch orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedBoard {
    /// Remote identifier of the chosen board.
    pub id: BoardId,
    /// Display label of the chosen board, used in status and error messages.
    pub label: String,
}

impl std::fmt::Display for SelectedBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label, self.id)
    }
}

// ---------------------------------------------------------------------------
// Normalised records
// ---------------------------------------------------------------------------

/// Tag identifying which kind of source object a [`NormalizedRecord`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Board metadata (exactly one per successful run).
    Board,
    /// A list belonging to the fetched board.
    List,
    /// A card belonging to the fetched board.
    Card,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Self::Board => "board",
            Self::List => "list",
            Self::Card => "card",
        };
        write!(f, "{tag}")
    }
}

/// One uniform record as delivered to the staging sink.
///
/// Wire format: `{"type": "<kind>", "data": <source object>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// Record kind tag.
    #[serde(rename = "type")]
    pub kind: RecordKind,
    /// The opaque source object. Ownership transfers to the sink.
    pub data: Value,
}

// ---------------------------------------------------------------------------
// Run outcome
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

/// Terminal summary of one successful fetch orchestration run.
///
/// `boards` is always 1: exactly one board-metadata record is normalised on
/// success. A failed run produces a [`ConnectorError`] instead; partial
/// counts are never reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchSummary {
    /// Correlation identifier for this run.
    pub run_id: FetchRunId,
    /// Number of board-metadata records staged (always 1).
    pub boards: usize,
    /// Number of list records staged.
    pub lists: usize,
    /// Number of card records staged.
    pub cards: usize,
    /// When the run started.
    pub started_at: Timestamp,
    /// When the run finished.
    pub finished_at: Timestamp,
}

impl FetchSummary {
    /// Renders the informational completion message shown in a host
    /// monitoring view.
    pub fn status_message(&self) -> String {
        format!("Fetched {} list(s), and {} card(s).", self.lists, self.cards)
    }
}

/// Tri-state terminal status reported through the host's single completion
/// channel: silent success, success with an informational message, or a
/// terminal failure message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RunStatus {
    /// Success with nothing to show the end user.
    Completed,
    /// Success with an informational message for the monitoring view.
    CompletedWithInfo {
        /// Detail shown to the end user.
        message: String,
    },
    /// A fatal error was encountered; the run is over.
    Failed {
        /// Error description shown to the end user.
        message: String,
    },
}

impl From<Result<FetchSummary, ConnectorError>> for RunStatus {
    fn from(outcome: Result<FetchSummary, ConnectorError>) -> Self {
        match outcome {
            Ok(summary) => Self::CompletedWithInfo {
                message: summary.status_message(),
            },
            Err(err) => Self::Failed {
                message: err.to_string(),
            },
        }
    }
}

impl From<Result<(), ConnectorError>> for RunStatus {
    fn from(outcome: Result<(), ConnectorError>) -> Self {
        match outcome {
            Ok(()) => Self::Completed,
            Err(err) => Self::Failed {
                message: err.to_string(),
            },
        }
    }
}
