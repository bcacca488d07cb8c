use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metadata stored alongside every destination vector.
///
/// Records written by this crate always carry the three named fields. Records
/// read back may lack some of them, which then read as empty strings.
/// Anything else the vector service attaches is kept in `extra` so it
/// survives a read/write cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelMetadata {
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TravelMetadata {
    pub fn new(
        destination: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            destination: destination.into(),
            category: category.into(),
            description: description.into(),
            extra: Map::new(),
        }
    }
}

/// A destination embedding ready to be written to the vector index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    id: String,
    values: Vec<f32>,
    metadata: TravelMetadata,
}

impl VectorRecord {
    pub fn new(id: impl Into<String>, values: Vec<f32>, metadata: TravelMetadata) -> Self {
        Self {
            id: id.into(),
            values,
            metadata,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn metadata(&self) -> &TravelMetadata {
        &self.metadata
    }

    pub fn dimensions(&self) -> usize {
        self.values.len()
    }
}
