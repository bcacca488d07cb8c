use std::path::Path;

use anyhow::{Context, Result};

use crate::{IndexStats, SimilarityMatch, VectorRecord};

use super::super::Container;

pub struct IndexController<'a> {
    container: &'a Container,
}

impl<'a> IndexController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn stats(&self) -> Result<String> {
        let client = self.container.vector_index();
        let stats = client.stats().await?;
        Ok(self.format_stats(client.index_name(), &stats))
    }

    pub async fn upsert(&self, file: &Path) -> Result<String> {
        let raw = tokio::fs::read_to_string(file)
            .await
            .with_context(|| format!("reading {}", file.display()))?;
        let records: Vec<VectorRecord> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing records from {}", file.display()))?;

        let client = self.container.vector_index();
        let count = client.upsert(&records).await?;

        Ok(format!(
            "Upserted {} records into {}",
            count,
            client.index_name()
        ))
    }

    pub async fn query(&self, vector: Vec<f32>, top_k: usize) -> Result<String> {
        let client = self.container.vector_index();
        let matches = client.query(&vector, top_k).await?;
        Ok(self.format_matches(&matches))
    }

    fn format_stats(&self, name: &str, stats: &IndexStats) -> String {
        let mut output = format!(
            "Index: {}\n======\nDimension:     {}\nTotal Vectors: {}\nFullness:      {:.2}",
            name, stats.dimension, stats.total_vector_count, stats.index_fullness
        );

        for (namespace, summary) in &stats.namespaces {
            let label = if namespace.is_empty() {
                "(default)"
            } else {
                namespace.as_str()
            };
            output.push_str(&format!(
                "\nNamespace {}: {} vectors",
                label, summary.vector_count
            ));
        }

        output
    }

    fn format_matches(&self, matches: &[SimilarityMatch]) -> String {
        if matches.is_empty() {
            return "No similar destinations found.".to_string();
        }

        let mut output = format!("Found {} similar destinations:\n\n", matches.len());
        for (i, hit) in matches.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, hit.display_line()));
            if let Some(meta) = hit.metadata().filter(|m| !m.description.is_empty()) {
                output.push_str(&format!("   {}\n", meta.description));
            }
        }

        output
    }
}
