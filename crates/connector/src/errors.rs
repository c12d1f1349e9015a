//! Error taxonomy for the connector domain.
//!
//! [`ApiError`] is the port-level error produced by remote-API adapters; the
//! orchestration logic translates it into [`ConnectorError`], which is what
//! callers see. Every remote failure is terminal for the current run — there
//! is no retry at any layer, and records already delivered to the sink are
//! not retracted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identifiers::BoardId;

// ---------------------------------------------------------------------------
// Port-level errors
// ---------------------------------------------------------------------------

/// Failure of a single remote operation, as reported by a [`crate::ports::BoardApi`]
/// implementation.
///
/// Adapters must translate the upstream "invalid id" sentinel into
/// [`ApiError::InvalidId`] at the HTTP boundary; the raw sentinel never
/// crosses into the domain.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ApiError {
    /// The remote service signalled that the referenced identifier does not
    /// exist.
    #[error("the referenced identifier is not known upstream")]
    InvalidId,

    /// Any other transport, protocol, or decode failure.
    #[error("{message}")]
    Upstream {
        /// Upstream error description.
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Fetch stages
// ---------------------------------------------------------------------------

/// Which of the three sequential fetch steps a [`ConnectorError::Fetch`]
/// originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchStage {
    /// Step 1 — resolving the board's own metadata.
    BoardInfo,
    /// Step 2 — fetching the board's lists.
    Lists,
    /// Step 3 — fetching the board's cards.
    Cards,
}

impl std::fmt::Display for FetchStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::BoardInfo => "board info",
            Self::Lists => "lists",
            Self::Cards => "cards",
        };
        write!(f, "{label}")
    }
}

// ---------------------------------------------------------------------------
// Connector errors
// ---------------------------------------------------------------------------

/// Terminal error of a connector operation (authorization post-processing,
/// discovery, connectivity probe, or a fetch run).
#[derive(Debug, Error, Serialize)]
pub enum ConnectorError {
    /// A required OAuth field was absent from the authorization response.
    ///
    /// Produced at post-processing time, before any credential is stored.
    /// Non-retriable; the authorization flow must be repeated.
    #[error("OAuth parameter is missing from the authorization response: {field}")]
    MissingCredential {
        /// Name of the missing field (e.g. `"access token"`).
        field: &'static str,
    },

    /// A capability was invoked before any authorization completed.
    #[error("no OAuth credentials are stored; complete the authorization flow first")]
    NotAuthorized,

    /// The bound HTTP client could not be constructed from the stored
    /// credentials.
    #[error("the board service client could not be initialised: {message}")]
    Session {
        /// Reason construction failed.
        message: String,
    },

    /// The member-board listing failed during discovery.
    #[error("error fetching board list: {message}")]
    Discovery {
        /// Upstream error description.
        message: String,
    },

    /// The selected board is absent from the member's board listing.
    ///
    /// The message is a monitoring-view literal, full sentence included.
    #[error("board {label} ({id}) was not found.")]
    BoardNotFound {
        /// Display label of the selected board.
        label: String,
        /// Identifier of the selected board.
        id: BoardId,
    },

    /// The remote service reported the selected board identifier as unknown
    /// (the not-found sentinel) while fetching lists or cards.
    #[error("board {label} ({id}) does not exist.")]
    UnknownBoardId {
        /// Display label of the selected board.
        label: String,
        /// Identifier of the selected board.
        id: BoardId,
    },

    /// Any other remote failure during one of the three fetch steps.
    #[error("error fetching {stage} for board {label}: {message}")]
    Fetch {
        /// The step that failed.
        stage: FetchStage,
        /// Display label of the selected board, for user legibility.
        label: String,
        /// Upstream error description.
        message: String,
    },
}

impl ConnectorError {
    /// Returns `true` for the two not-found conditions: absence from the
    /// board listing and the upstream sentinel.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::BoardNotFound { .. } | Self::UnknownBoardId { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roadmap() -> (String, BoardId) {
        ("Roadmap".to_owned(), BoardId::new("abc123").unwrap())
    }

    #[test]
    fn not_found_messages_reference_label_and_id() {
        let (label, id) = roadmap();
        let absent = ConnectorError::BoardNotFound {
            label: label.clone(),
            id: id.clone(),
        };
        assert_eq!(absent.to_string(), "board Roadmap (abc123) was not found.");
        assert!(absent.is_not_found());

        let sentinel = ConnectorError::UnknownBoardId { label, id };
        assert_eq!(
            sentinel.to_string(),
            "board Roadmap (abc123) does not exist."
        );
        assert!(sentinel.is_not_found());
    }

    #[test]
    fn fetch_error_is_annotated_with_stage_and_label() {
        let err = ConnectorError::Fetch {
            stage: FetchStage::Lists,
            label: "Roadmap".to_owned(),
            message: "HTTP 500: upstream unavailable".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "error fetching lists for board Roadmap: HTTP 500: upstream unavailable"
        );
        assert!(!err.is_not_found());
    }
}
