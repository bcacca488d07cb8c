use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::{IndexConnector, VectorIndex};
use crate::domain::{
    IndexStats, NamespaceSummary, SimilarityMatch, UpstreamError, VectorRecord,
};

/// Process-local vector index ranked by cosine similarity.
///
/// Used for offline runs (`--memory-index`) and tests. Records live only as
/// long as the process.
pub struct InMemoryVectorIndex {
    name: String,
    records: Mutex<HashMap<String, VectorRecord>>,
}

impl InMemoryVectorIndex {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl VectorIndex for InMemoryVectorIndex {
    fn name(&self) -> &str {
        &self.name
    }

    async fn describe_stats(&self) -> Result<IndexStats, UpstreamError> {
        let records = self.records.lock().await;
        let dimension = records.values().next().map_or(0, |r| r.dimensions() as u32);
        let total = records.len() as u64;

        let mut stats = IndexStats {
            dimension,
            total_vector_count: total,
            ..IndexStats::default()
        };
        if total > 0 {
            stats
                .namespaces
                .insert(String::new(), NamespaceSummary { vector_count: total });
        }
        Ok(stats)
    }

    async fn upsert(&self, records: &[VectorRecord]) -> Result<u64, UpstreamError> {
        let mut store = self.records.lock().await;

        if let Some(expected) = store.values().next().map(VectorRecord::dimensions) {
            if let Some(bad) = records.iter().find(|r| r.dimensions() != expected) {
                return Err(UpstreamError::status(
                    400,
                    format!(
                        "vector {} has dimension {}, index expects {}",
                        bad.id(),
                        bad.dimensions(),
                        expected
                    ),
                ));
            }
        }

        for record in records {
            store.insert(record.id().to_string(), record.clone());
        }

        debug!("Upserted {} records into memory index {}", records.len(), self.name);
        Ok(records.len() as u64)
    }

    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<SimilarityMatch>, UpstreamError> {
        let store = self.records.lock().await;

        let mut scored: Vec<(&VectorRecord, f32)> = store
            .values()
            .map(|record| (record, cosine_similarity(vector, record.values())))
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        Ok(scored
            .into_iter()
            .take(top_k)
            .map(|(record, score)| {
                SimilarityMatch::new(record.id(), score).with_metadata(record.metadata().clone())
            })
            .collect())
    }
}

/// Hands out one [`InMemoryVectorIndex`] per name, creating it on first open.
#[derive(Default)]
pub struct InMemoryIndexConnector {
    indexes: Mutex<HashMap<String, Arc<InMemoryVectorIndex>>>,
}

impl InMemoryIndexConnector {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IndexConnector for InMemoryIndexConnector {
    async fn open(&self, index_name: &str) -> Result<Arc<dyn VectorIndex>, UpstreamError> {
        let mut indexes = self.indexes.lock().await;
        let index = indexes
            .entry(index_name.to_string())
            .or_insert_with(|| Arc::new(InMemoryVectorIndex::new(index_name)))
            .clone();
        Ok(index as Arc<dyn VectorIndex>)
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}
