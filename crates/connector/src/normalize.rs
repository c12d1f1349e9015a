//! Record normalisation.
//!
//! [`RecordWriter`] is the stateless transform between heterogeneous source
//! objects and the uniform `{type, data}` records the staging sink accepts.
//! Each non-empty batch reaches the sink in exactly one call — per-element
//! delivery would change the minimum unit of write visible downstream.

use serde_json::Value;

use crate::ports::RecordSink;
use crate::types::{NormalizedRecord, RecordKind};

/// Wraps a borrowed sink and tags source objects with their record kind.
pub struct RecordWriter<'a, S: RecordSink + ?Sized> {
    sink: &'a mut S,
}

impl<'a, S: RecordSink + ?Sized> RecordWriter<'a, S> {
    /// Creates a writer over `sink` for the duration of one fetch run.
    pub fn new(sink: &'a mut S) -> Self {
        Self { sink }
    }

    /// Tags every object with `kind` and forwards the batch to the sink.
    ///
    /// An empty batch is a no-op: the sink is never invoked without records.
    pub fn write(&mut self, kind: RecordKind, objects: Vec<Value>) {
        if objects.is_empty() {
            return;
        }
        let batch = objects
            .into_iter()
            .map(|data| NormalizedRecord { kind, data })
            .collect();
        self.sink.push_records(batch);
    }

    /// Stages a single board-metadata object as a one-element batch.
    pub fn save_board(&mut self, board: Value) {
        self.write(RecordKind::Board, vec![board]);
    }

    /// Stages a batch of list objects.
    pub fn save_lists(&mut self, lists: Vec<Value>) {
        self.write(RecordKind::List, lists);
    }

    /// Stages a batch of card objects.
    pub fn save_cards(&mut self, cards: Vec<Value>) {
        self.write(RecordKind::Card, cards);
    }
}
