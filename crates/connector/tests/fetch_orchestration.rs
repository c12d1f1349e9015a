//! End-to-end scenarios for the fetch orchestrator against a scripted fake
//! board API, asserting the sequential abort property, sentinel translation,
//! and the batches the sink observes.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{json, Value};

use connector::{
    fetch_board, ApiError, ApiResult, Board, BoardApi, BoardId, NormalizedRecord, RecordKind,
    RecordSink, SelectedBoard,
};

/// Scripted fake: each operation returns a pre-seeded result and counts its
/// invocations so tests can assert which steps ran.
struct FakeBoardApi {
    boards: ApiResult<Vec<Board>>,
    lists: ApiResult<Vec<Value>>,
    cards: ApiResult<Vec<Value>>,
    board_calls: AtomicUsize,
    list_calls: AtomicUsize,
    card_calls: AtomicUsize,
}

impl FakeBoardApi {
    fn new(
        boards: ApiResult<Vec<Board>>,
        lists: ApiResult<Vec<Value>>,
        cards: ApiResult<Vec<Value>>,
    ) -> Self {
        Self {
            boards,
            lists,
            cards,
            board_calls: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
            card_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl BoardApi for FakeBoardApi {
    async fn member_boards(&self, member: &str) -> ApiResult<Vec<Board>> {
        assert_eq!(member, "me");
        self.board_calls.fetch_add(1, Ordering::SeqCst);
        self.boards.clone()
    }

    async fn lists_on_board(&self, board: &BoardId) -> ApiResult<Vec<Value>> {
        assert_eq!(board.as_str(), "abc123");
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.lists.clone()
    }

    async fn cards_on_board(&self, board: &BoardId) -> ApiResult<Vec<Value>> {
        assert_eq!(board.as_str(), "abc123");
        self.card_calls.fetch_add(1, Ordering::SeqCst);
        self.cards.clone()
    }
}

#[derive(Default)]
struct CapturingSink {
    batches: Vec<Vec<NormalizedRecord>>,
}

impl RecordSink for CapturingSink {
    fn push_records(&mut self, batch: Vec<NormalizedRecord>) {
        self.batches.push(batch);
    }
}

fn roadmap() -> SelectedBoard {
    SelectedBoard {
        id: BoardId::new("abc123").unwrap(),
        label: "Roadmap".to_owned(),
    }
}

fn roadmap_board() -> Board {
    Board {
        id: BoardId::new("abc123").unwrap(),
        name: "Roadmap".to_owned(),
        raw: json!({"id": "abc123", "name": "Roadmap", "closed": false}),
    }
}

fn items(prefix: &str, n: usize) -> Vec<Value> {
    (0..n).map(|i| json!({"id": format!("{prefix}{i}")})).collect()
}

#[tokio::test]
async fn successful_run_stages_three_batches_in_order() {
    let api = FakeBoardApi::new(
        Ok(vec![roadmap_board()]),
        Ok(items("l", 2)),
        Ok(items("c", 5)),
    );
    let mut sink = CapturingSink::default();

    let summary = fetch_board(&api, &roadmap(), &mut sink).await.unwrap();

    assert_eq!((summary.boards, summary.lists, summary.cards), (1, 2, 5));
    assert!(summary.started_at <= summary.finished_at);

    let shape: Vec<(RecordKind, usize)> = sink
        .batches
        .iter()
        .map(|batch| (batch[0].kind, batch.len()))
        .collect();
    assert_eq!(
        shape,
        vec![
            (RecordKind::Board, 1),
            (RecordKind::List, 2),
            (RecordKind::Card, 5),
        ]
    );
}

#[tokio::test]
async fn empty_lists_and_cards_produce_only_the_board_batch() {
    let api = FakeBoardApi::new(Ok(vec![roadmap_board()]), Ok(vec![]), Ok(vec![]));
    let mut sink = CapturingSink::default();

    let summary = fetch_board(&api, &roadmap(), &mut sink).await.unwrap();

    assert_eq!((summary.boards, summary.lists, summary.cards), (1, 0, 0));
    // Empty batches never reach the sink.
    assert_eq!(sink.batches.len(), 1);
    assert_eq!(sink.batches[0][0].kind, RecordKind::Board);
}

#[tokio::test]
async fn missing_board_aborts_before_lists_and_cards() {
    let api = FakeBoardApi::new(Ok(vec![]), Ok(items("l", 2)), Ok(items("c", 5)));
    let mut sink = CapturingSink::default();

    let err = fetch_board(&api, &roadmap(), &mut sink).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "board Roadmap (abc123) was not found.");
    assert!(sink.batches.is_empty());
    assert_eq!(api.list_calls.load(Ordering::SeqCst), 0);
    assert_eq!(api.card_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn invalid_id_on_lists_translates_to_not_found() {
    let api = FakeBoardApi::new(
        Ok(vec![roadmap_board()]),
        Err(ApiError::InvalidId),
        Ok(items("c", 5)),
    );
    let mut sink = CapturingSink::default();

    let err = fetch_board(&api, &roadmap(), &mut sink).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "board Roadmap (abc123) does not exist.");
    // The board batch was already staged and stays staged.
    assert_eq!(sink.batches.len(), 1);
    assert_eq!(sink.batches[0][0].kind, RecordKind::Board);
    assert_eq!(api.card_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn invalid_id_on_cards_translates_to_not_found() {
    let api = FakeBoardApi::new(
        Ok(vec![roadmap_board()]),
        Ok(items("l", 2)),
        Err(ApiError::InvalidId),
    );
    let mut sink = CapturingSink::default();

    let err = fetch_board(&api, &roadmap(), &mut sink).await.unwrap_err();

    assert_eq!(err.to_string(), "board Roadmap (abc123) does not exist.");
    // Board and list batches survive the failing card step.
    assert_eq!(sink.batches.len(), 2);
}

#[tokio::test]
async fn upstream_failure_is_wrapped_with_stage_and_label() {
    let api = FakeBoardApi::new(
        Ok(vec![roadmap_board()]),
        Err(ApiError::Upstream {
            message: "HTTP 503: service unavailable".to_owned(),
        }),
        Ok(items("c", 5)),
    );
    let mut sink = CapturingSink::default();

    let err = fetch_board(&api, &roadmap(), &mut sink).await.unwrap_err();

    assert!(!err.is_not_found());
    assert_eq!(
        err.to_string(),
        "error fetching lists for board Roadmap: HTTP 503: service unavailable"
    );
    assert_eq!(api.card_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn board_listing_failure_surfaces_as_board_info_stage() {
    let api = FakeBoardApi::new(
        Err(ApiError::Upstream {
            message: "connection reset".to_owned(),
        }),
        Ok(vec![]),
        Ok(vec![]),
    );
    let mut sink = CapturingSink::default();

    let err = fetch_board(&api, &roadmap(), &mut sink).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "error fetching board info for board Roadmap: connection reset"
    );
    assert!(sink.batches.is_empty());
}
