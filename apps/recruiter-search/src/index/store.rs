use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::index::models::CandidateIndexEntry;
use crate::index::search::{rank, SearchQuery, SearchResult};

/// In-memory candidate index keyed by candidate id.
///
/// One `RwLock` covers the whole map: searches share the read guard, upserts
/// take the write guard. Designed to be wrapped in `Arc` and shared across
/// handlers. Contents live for the lifetime of the process.
pub struct CandidateIndex {
    entries: RwLock<HashMap<String, CandidateIndexEntry>>,
}

impl CandidateIndex {
    /// Create a new, empty index.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Insert or replace the entry for `entry.id`.
    ///
    /// Returns `true` if an existing entry was overwritten.
    pub async fn upsert(&self, entry: CandidateIndexEntry) -> bool {
        self.entries
            .write()
            .await
            .insert(entry.id.clone(), entry)
            .is_some()
    }

    pub async fn get(&self, id: &str) -> Option<CandidateIndexEntry> {
        self.entries.read().await.get(id).cloned()
    }

    /// Rank every indexed candidate against `query` under a single read guard.
    pub async fn search(&self, query: &SearchQuery) -> Vec<SearchResult> {
        let entries = self.entries.read().await;
        rank(entries.values(), query)
    }
}

impl Default for CandidateIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::models::ReadinessStatus;

    fn make_entry(id: &str, skills: &[&str]) -> CandidateIndexEntry {
        CandidateIndexEntry {
            id: id.to_string(),
            name: format!("Candidate {id}"),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            readiness_status: ReadinessStatus::Verified,
        }
    }

    #[tokio::test]
    async fn test_upsert_is_last_write_wins() {
        let index = CandidateIndex::new();
        assert!(!index.upsert(make_entry("c1", &["Go"])).await);
        assert!(index.upsert(make_entry("c1", &["Rust"])).await);

        let stored = index.get("c1").await.unwrap();
        assert_eq!(stored.skills, vec!["Rust".to_string()]);
    }

    #[tokio::test]
    async fn test_search_observes_completed_upserts() {
        let index = CandidateIndex::new();
        let query = SearchQuery {
            skills: vec!["rust".to_string()],
            readiness: None,
            minimum_score: 1,
        };
        assert!(index.search(&query).await.is_empty());

        index.upsert(make_entry("c1", &["Rust"])).await;
        let results = index.search(&query).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].score, 1);
    }

    #[tokio::test]
    async fn test_repeated_identical_upserts_are_idempotent() {
        let index = CandidateIndex::new();
        let query = SearchQuery {
            skills: vec!["go".to_string()],
            ..SearchQuery::default()
        };

        index.upsert(make_entry("c1", &["Go", "Kafka"])).await;
        let first = index.search(&query).await;
        index.upsert(make_entry("c1", &["Go", "Kafka"])).await;
        index.upsert(make_entry("c1", &["Go", "Kafka"])).await;

        assert_eq!(index.search(&query).await, first);
        assert_eq!(first.len(), 1);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none() {
        let index = CandidateIndex::new();
        assert!(index.get("missing").await.is_none());
    }
}
