use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceSummary {
    #[serde(default)]
    pub vector_count: u64,
}

/// Descriptive statistics reported by the vector index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    #[serde(default)]
    pub dimension: u32,
    #[serde(default)]
    pub index_fullness: f32,
    #[serde(default)]
    pub total_vector_count: u64,
    #[serde(default)]
    pub namespaces: BTreeMap<String, NamespaceSummary>,
}

impl IndexStats {
    pub fn summary(&self) -> String {
        format!(
            "dimension={} vectors={} fullness={:.2} namespaces={}",
            self.dimension,
            self.total_vector_count,
            self.index_fullness,
            self.namespaces.len()
        )
    }
}
