use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::models::record::ResumeRecord;

/// In-memory result store keyed by filename. Cleared on restart.
///
/// Writes are last-write-wins. Listing follows first-insertion order per key:
/// overwriting a filename keeps its original position.
#[derive(Debug, Default)]
pub struct ResultStore {
    inner: RwLock<Entries>,
}

#[derive(Debug, Default)]
struct Entries {
    next_seq: u64,
    records: HashMap<String, (u64, ResumeRecord)>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, filename: &str) -> Option<ResumeRecord> {
        let entries = self.inner.read().await;
        entries.records.get(filename).map(|(_, r)| r.clone())
    }

    pub async fn put(&self, record: ResumeRecord) {
        let mut entries = self.inner.write().await;
        let seq = match entries.records.get(&record.filename) {
            Some((seq, _)) => *seq,
            None => {
                entries.next_seq += 1;
                entries.next_seq
            }
        };
        entries.records.insert(record.filename.clone(), (seq, record));
    }

    pub async fn list(&self) -> Vec<ResumeRecord> {
        let entries = self.inner.read().await;
        let mut ordered: Vec<_> = entries.records.values().collect();
        ordered.sort_by_key(|(seq, _)| *seq);
        ordered.into_iter().map(|(_, r)| r.clone()).collect()
    }
}
