use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, error, info};

use crate::application::{IndexConnector, VectorIndex};
use crate::domain::{DomainError, IndexStats, SimilarityMatch, VectorRecord};

pub const DEFAULT_TOP_K: usize = 5;

pub const INDEX_INIT_FAILURE_MESSAGE: &str =
    "Failed to initialize Pinecone. Please check your API configuration and try again.";
pub const UPSERT_FAILURE_MESSAGE: &str = "Failed to update travel data. Please try again.";
pub const QUERY_FAILURE_MESSAGE: &str = "Failed to find similar destinations. Please try again.";

/// Client for the destination vector index.
///
/// The index handle is opened on first use and reused for the lifetime of
/// this client. The composition root holds one instance, so a process opens
/// the index at most once.
pub struct VectorIndexClient {
    connector: Arc<dyn IndexConnector>,
    index_name: String,
    index: OnceCell<Arc<dyn VectorIndex>>,
}

impl VectorIndexClient {
    pub fn new(connector: Arc<dyn IndexConnector>, index_name: impl Into<String>) -> Self {
        Self {
            connector,
            index_name: index_name.into(),
            index: OnceCell::new(),
        }
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Return the shared index handle, logging the index statistics.
    pub async fn get_index(&self) -> Result<Arc<dyn VectorIndex>, DomainError> {
        let index = self.handle().await?;
        self.describe(&index).await?;
        Ok(index)
    }

    /// Fetch (and log) the statistics of the shared index.
    pub async fn stats(&self) -> Result<IndexStats, DomainError> {
        let index = self.handle().await?;
        self.describe(&index).await
    }

    /// Write a batch of destination records in one call.
    pub async fn upsert(&self, records: &[VectorRecord]) -> Result<u64, DomainError> {
        if records.is_empty() {
            return Err(DomainError::invalid_input("no records to upsert"));
        }

        let index = self.handle().await?;
        let count = index.upsert(records).await.map_err(|e| {
            error!("Failed to upsert {} vectors: {}", records.len(), e);
            DomainError::client(e.kind(), UPSERT_FAILURE_MESSAGE)
        })?;

        info!("Successfully upserted {} vectors to {}", count, self.index_name);
        Ok(count)
    }

    /// Fetch the `top_k` records most similar to `vector`, highest score first,
    /// exactly as ranked by the index.
    pub async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<SimilarityMatch>, DomainError> {
        if top_k == 0 {
            return Err(DomainError::invalid_input("top_k must be at least 1"));
        }

        let index = self.handle().await?;
        let matches = index.query(vector, top_k).await.map_err(|e| {
            error!("Failed to query similar destinations: {}", e);
            DomainError::client(e.kind(), QUERY_FAILURE_MESSAGE)
        })?;

        debug!("Query returned {} matches (top_k={})", matches.len(), top_k);
        Ok(matches)
    }

    /// Like [`Self::query`] with [`DEFAULT_TOP_K`].
    pub async fn query_default(&self, vector: &[f32]) -> Result<Vec<SimilarityMatch>, DomainError> {
        self.query(vector, DEFAULT_TOP_K).await
    }

    async fn describe(&self, index: &Arc<dyn VectorIndex>) -> Result<IndexStats, DomainError> {
        let stats = index.describe_stats().await.map_err(|e| {
            error!("Failed to describe index {}: {}", self.index_name, e);
            DomainError::client(e.kind(), INDEX_INIT_FAILURE_MESSAGE)
        })?;
        info!("Index stats for {}: {}", index.name(), stats.summary());
        Ok(stats)
    }

    async fn handle(&self) -> Result<Arc<dyn VectorIndex>, DomainError> {
        let index = self
            .index
            .get_or_try_init(|| async {
                debug!("Opening vector index {}", self.index_name);
                self.connector.open(&self.index_name).await
            })
            .await
            .map_err(|e| {
                error!("Failed to initialize vector index {}: {}", self.index_name, e);
                DomainError::client(e.kind(), INDEX_INIT_FAILURE_MESSAGE)
            })?;

        Ok(Arc::clone(index))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::domain::{FailureKind, TravelMetadata, UpstreamError};

    #[derive(Default)]
    struct FakeIndex {
        stats_calls: AtomicUsize,
        last_top_k: AtomicUsize,
        fail_upsert: bool,
    }

    #[async_trait]
    impl VectorIndex for FakeIndex {
        fn name(&self) -> &str {
            "fake"
        }

        async fn describe_stats(&self) -> Result<IndexStats, UpstreamError> {
            self.stats_calls.fetch_add(1, Ordering::SeqCst);
            Ok(IndexStats::default())
        }

        async fn upsert(&self, records: &[VectorRecord]) -> Result<u64, UpstreamError> {
            if self.fail_upsert {
                return Err(UpstreamError::transport("connection reset"));
            }
            Ok(records.len() as u64)
        }

        async fn query(
            &self,
            _vector: &[f32],
            top_k: usize,
        ) -> Result<Vec<SimilarityMatch>, UpstreamError> {
            self.last_top_k.store(top_k, Ordering::SeqCst);
            Ok(["b", "a", "c", "d"]
                .iter()
                .take(top_k)
                .enumerate()
                .map(|(i, id)| SimilarityMatch::new(*id, 1.0 - i as f32 * 0.1))
                .collect())
        }
    }

    struct CountingConnector {
        opens: AtomicUsize,
        index: Arc<FakeIndex>,
        fail: bool,
    }

    impl CountingConnector {
        fn new(index: FakeIndex) -> Self {
            Self {
                opens: AtomicUsize::new(0),
                index: Arc::new(index),
                fail: false,
            }
        }
    }

    #[async_trait]
    impl IndexConnector for CountingConnector {
        async fn open(&self, _index_name: &str) -> Result<Arc<dyn VectorIndex>, UpstreamError> {
            self.opens.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(UpstreamError::status(404, "index not found"));
            }
            Ok(self.index.clone() as Arc<dyn VectorIndex>)
        }
    }

    fn record(id: &str) -> VectorRecord {
        VectorRecord::new(
            id,
            vec![0.5, 0.5],
            TravelMetadata::new("Reykjavik", "nature", "Geysers and glaciers"),
        )
    }

    #[tokio::test]
    async fn get_index_opens_once_and_reuses_handle() {
        let connector = Arc::new(CountingConnector::new(FakeIndex::default()));
        let client = VectorIndexClient::new(connector.clone(), "destinations");

        let first = client.get_index().await.unwrap();
        let second = client.get_index().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(connector.opens.load(Ordering::SeqCst), 1);
        assert_eq!(connector.index.stats_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn stats_reuses_the_same_handle() {
        let connector = Arc::new(CountingConnector::new(FakeIndex::default()));
        let client = VectorIndexClient::new(connector.clone(), "destinations");

        client.stats().await.unwrap();
        client.get_index().await.unwrap();

        assert_eq!(connector.opens.load(Ordering::SeqCst), 1);
        assert_eq!(connector.index.stats_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn open_failure_uses_init_message() {
        let mut connector = CountingConnector::new(FakeIndex::default());
        connector.fail = true;
        let client = VectorIndexClient::new(Arc::new(connector), "missing");

        let err = client.get_index().await.err().expect("open should fail");

        assert_eq!(err.to_string(), INDEX_INIT_FAILURE_MESSAGE);
        assert_eq!(err.kind(), Some(FailureKind::UpstreamStatus));
    }

    #[tokio::test]
    async fn upsert_reports_count_and_wraps_failures() {
        let client = VectorIndexClient::new(
            Arc::new(CountingConnector::new(FakeIndex::default())),
            "destinations",
        );
        assert_eq!(client.upsert(&[record("a"), record("b")]).await.unwrap(), 2);

        let failing = VectorIndexClient::new(
            Arc::new(CountingConnector::new(FakeIndex {
                fail_upsert: true,
                ..FakeIndex::default()
            })),
            "destinations",
        );
        let err = failing.upsert(&[record("a")]).await.unwrap_err();
        assert_eq!(err.to_string(), UPSERT_FAILURE_MESSAGE);
        assert_eq!(err.kind(), Some(FailureKind::Transport));
    }

    #[tokio::test]
    async fn upsert_rejects_empty_batch() {
        let client = VectorIndexClient::new(
            Arc::new(CountingConnector::new(FakeIndex::default())),
            "destinations",
        );
        assert!(client.upsert(&[]).await.unwrap_err().is_invalid_input());
    }

    #[tokio::test]
    async fn query_keeps_service_order() {
        let client = VectorIndexClient::new(
            Arc::new(CountingConnector::new(FakeIndex::default())),
            "destinations",
        );

        let matches = client.query(&[0.1, 0.2], 3).await.unwrap();
        let ids: Vec<&str> = matches.iter().map(|m| m.id()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn query_default_asks_for_five() {
        let connector = Arc::new(CountingConnector::new(FakeIndex::default()));
        let client = VectorIndexClient::new(connector.clone(), "destinations");

        client.query_default(&[0.1, 0.2]).await.unwrap();

        assert_eq!(connector.index.last_top_k.load(Ordering::SeqCst), 5);
        assert_eq!(DEFAULT_TOP_K, 5);
    }

    #[tokio::test]
    async fn query_rejects_zero_top_k() {
        let connector = Arc::new(CountingConnector::new(FakeIndex::default()));
        let client = VectorIndexClient::new(connector.clone(), "destinations");

        assert!(client.query(&[0.1], 0).await.unwrap_err().is_invalid_input());
        assert_eq!(connector.opens.load(Ordering::SeqCst), 0);
    }
}
