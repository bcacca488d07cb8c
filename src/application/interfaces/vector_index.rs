use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{IndexStats, SimilarityMatch, UpstreamError, VectorRecord};

/// A handle to one named index in a vector database.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    fn name(&self) -> &str;

    async fn describe_stats(&self) -> Result<IndexStats, UpstreamError>;

    /// Write the batch in a single call. Returns the number of upserted records.
    async fn upsert(&self, records: &[VectorRecord]) -> Result<u64, UpstreamError>;

    /// Top-K nearest records with metadata, in the order the service ranks them.
    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<SimilarityMatch>, UpstreamError>;
}

/// Opens handles to named indexes of a vector database service.
#[async_trait]
pub trait IndexConnector: Send + Sync {
    async fn open(&self, index_name: &str) -> Result<Arc<dyn VectorIndex>, UpstreamError>;
}
