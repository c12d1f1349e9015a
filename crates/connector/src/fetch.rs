//! Fetch orchestration.
//!
//! One run drives the three remote operations for a selected board **strictly
//! in sequence** — lists and cards are meaningless if the board itself cannot
//! be confirmed to exist — and short-circuits on the first failure. Batches
//! already delivered to the sink before a failing step stay in the sink.

use tracing::{debug, info, info_span, Instrument};

use crate::discovery::SELF_MEMBER;
use crate::errors::{ApiError, ConnectorError, FetchStage};
use crate::identifiers::FetchRunId;
use crate::normalize::RecordWriter;
use crate::ports::{BoardApi, RecordSink};
use crate::types::{FetchSummary, SelectedBoard, Timestamp};

/// Runs one full fetch for `selected`, streaming normalised records to `sink`.
///
/// On success the summary carries the counts `(1, lists, cards)`. On failure
/// the remaining steps are skipped and the first error is returned; no
/// partial counts are reported.
///
/// # Errors
///
/// - [`ConnectorError::BoardNotFound`] when the board is absent from the
///   member's listing (steps 2–3 never run).
/// - [`ConnectorError::UnknownBoardId`] when the remote service reports the
///   identifier as unknown while fetching lists or cards.
/// - [`ConnectorError::Fetch`] for any other remote failure, annotated with
///   the failing stage and the board label.
pub async fn fetch_board(
    api: &dyn BoardApi,
    selected: &SelectedBoard,
    sink: &mut dyn RecordSink,
) -> Result<FetchSummary, ConnectorError> {
    let run_id = FetchRunId::new_random();
    let span = info_span!("fetch_board", %run_id, board = %selected);
    run(api, selected, sink, run_id).instrument(span).await
}

async fn run(
    api: &dyn BoardApi,
    selected: &SelectedBoard,
    sink: &mut dyn RecordSink,
    run_id: FetchRunId,
) -> Result<FetchSummary, ConnectorError> {
    let started_at = Timestamp::now();
    let mut writer = RecordWriter::new(sink);

    // Step 1 — confirm the board exists and stage its metadata.
    info!(board = %selected, "fetching board info");
    let boards = api
        .member_boards(SELF_MEMBER)
        .await
        .map_err(|err| step_error(FetchStage::BoardInfo, selected, err))?;
    let board = boards
        .into_iter()
        .find(|board| board.id == selected.id)
        .ok_or_else(|| ConnectorError::BoardNotFound {
            label: selected.label.clone(),
            id: selected.id.clone(),
        })?;
    writer.save_board(board.raw);

    // Step 2 — lists.
    info!(board = %selected, "fetching lists");
    let lists = api
        .lists_on_board(&selected.id)
        .await
        .map_err(|err| step_error(FetchStage::Lists, selected, err))?;
    debug!(count = lists.len(), "list response received");
    let list_count = lists.len();
    writer.save_lists(lists);

    // Step 3 — cards.
    info!(board = %selected, "fetching cards");
    let cards = api
        .cards_on_board(&selected.id)
        .await
        .map_err(|err| step_error(FetchStage::Cards, selected, err))?;
    debug!(count = cards.len(), "card response received");
    let card_count = cards.len();
    writer.save_cards(cards);

    Ok(FetchSummary {
        run_id,
        boards: 1,
        lists: list_count,
        cards: card_count,
        started_at,
        finished_at: Timestamp::now(),
    })
}

/// Translates a port-level failure into the terminal error for this run.
///
/// The not-found sentinel becomes [`ConnectorError::UnknownBoardId`] so it is
/// never mistaken for a transport failure; everything else is wrapped with
/// the failing stage and the board label.
fn step_error(stage: FetchStage, selected: &SelectedBoard, err: ApiError) -> ConnectorError {
    match err {
        ApiError::InvalidId => ConnectorError::UnknownBoardId {
            label: selected.label.clone(),
            id: selected.id.clone(),
        },
        ApiError::Upstream { message } => ConnectorError::Fetch {
            stage,
            label: selected.label.clone(),
            message,
        },
    }
}
