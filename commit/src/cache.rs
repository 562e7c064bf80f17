//! Pending records keyed by row id.

use editdata_core::RowId;
use editdata_edit::{EditKind, EditRecord};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Result of [`EditCache::try_insert`].
#[derive(Debug)]
pub enum InsertOutcome {
    Inserted,
    /// The row already has a pending record. The rejected record is handed back.
    Occupied(EditRecord),
}

impl InsertOutcome {
    pub fn is_inserted(&self) -> bool {
        matches!(self, InsertOutcome::Inserted)
    }
}

/// At most one pending record per row.
#[derive(Debug, Default)]
pub struct EditCache {
    records: HashMap<RowId, EditRecord>,
}

impl EditCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record unless its row already has one.
    pub fn try_insert(&mut self, record: EditRecord) -> InsertOutcome {
        let row_id = record.row_id();
        if self.records.contains_key(&row_id) {
            return InsertOutcome::Occupied(record);
        }
        self.records.insert(row_id, record);
        InsertOutcome::Inserted
    }

    pub fn get(&self, row_id: RowId) -> Option<&EditRecord> {
        self.records.get(&row_id)
    }

    pub fn get_mut(&mut self, row_id: RowId) -> Option<&mut EditRecord> {
        self.records.get_mut(&row_id)
    }

    pub fn remove(&mut self, row_id: RowId) -> Option<EditRecord> {
        self.records.remove(&row_id)
    }

    pub fn contains(&self, row_id: RowId) -> bool {
        self.records.contains_key(&row_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Pending creates, in ascending id order.
    pub fn created_row_ids(&self) -> Vec<RowId> {
        let mut ids: Vec<RowId> = self
            .records
            .values()
            .filter(|r| r.kind() == EditKind::Create)
            .map(EditRecord::row_id)
            .collect();
        ids.sort();
        ids
    }

    /// Records in the order a commit applies them: creates ascending, then
    /// updates ascending, then deletes descending so that removing a row never
    /// shifts one still waiting.
    pub fn commit_order(&self) -> Vec<&EditRecord> {
        let mut records: Vec<&EditRecord> = self.records.values().collect();
        records.sort_by(|a, b| commit_ordering(a, b));
        records
    }

    /// Owned copies of every record in commit order.
    pub fn ordered_snapshot(&self) -> Vec<EditRecord> {
        self.commit_order().into_iter().cloned().collect()
    }
}

fn commit_ordering(a: &EditRecord, b: &EditRecord) -> Ordering {
    a.kind().cmp(&b.kind()).then_with(|| match a.kind() {
        EditKind::Delete => b.row_id().cmp(&a.row_id()),
        EditKind::Create | EditKind::Update => a.row_id().cmp(&b.row_id()),
    })
}
