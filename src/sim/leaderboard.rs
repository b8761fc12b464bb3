//! In-memory leaderboard

use crate::collab::{MatchRecord, PersistenceCollaborator};
use std::cell::RefCell;
use std::rc::Rc;

/// Keeps every record handed over by the engine; clones share storage
#[derive(Debug, Clone, Default)]
pub struct MemoryLeaderboard {
    records: Rc<RefCell<Vec<MatchRecord>>>,
}

impl MemoryLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<MatchRecord> {
        self.records.borrow().clone()
    }

    pub fn last(&self) -> Option<MatchRecord> {
        self.records.borrow().last().copied()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    /// Serialize all records as a JSON array
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(&*self.records.borrow())?)
    }
}

impl PersistenceCollaborator for MemoryLeaderboard {
    fn record(&mut self, record: &MatchRecord) {
        self.records.borrow_mut().push(*record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_records() {
        let board = MemoryLeaderboard::new();
        let mut handle = board.clone();
        handle.record(&MatchRecord {
            score_a: 3,
            score_b: 1,
            sets_played: 3,
            concluded: true,
        });
        assert_eq!(board.len(), 1);
        assert_eq!(board.last().map(|r| r.score_a), Some(3));
        assert!(board.to_json().unwrap().contains("\"concluded\": true"));
    }
}
