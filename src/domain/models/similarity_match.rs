use serde::{Deserialize, Serialize};

use super::TravelMetadata;

/// One hit returned by a top-K similarity query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatch {
    id: String,
    score: f32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    values: Vec<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata: Option<TravelMetadata>,
}

impl SimilarityMatch {
    pub fn new(id: impl Into<String>, score: f32) -> Self {
        Self {
            id: id.into(),
            score,
            values: Vec::new(),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: TravelMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn metadata(&self) -> Option<&TravelMetadata> {
        self.metadata.as_ref()
    }

    pub fn display_line(&self) -> String {
        let Some(meta) = self.metadata.as_ref().filter(|m| !m.destination.is_empty()) else {
            return format!("{} (score: {:.3})", self.id, self.score);
        };

        if meta.category.is_empty() {
            format!("{} (score: {:.3})", meta.destination, self.score)
        } else {
            format!(
                "{} [{}] (score: {:.3})",
                meta.destination, meta.category, self.score
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_without_values_or_metadata() {
        let hit: SimilarityMatch =
            serde_json::from_str(r#"{"id": "rome", "score": 0.82}"#).unwrap();
        assert_eq!(hit.id(), "rome");
        assert!(hit.values().is_empty());
        assert!(hit.metadata().is_none());
        assert_eq!(hit.display_line(), "rome (score: 0.820)");
    }

    #[test]
    fn display_line_prefers_destination() {
        let hit = SimilarityMatch::new("rome", 0.5)
            .with_metadata(TravelMetadata::new("Rome", "history", "Ancient city"));
        assert_eq!(hit.display_line(), "Rome [history] (score: 0.500)");
    }

    #[test]
    fn display_line_skips_missing_metadata_fields() {
        let hit: SimilarityMatch = serde_json::from_str(
            r#"{"id": "legacy", "score": 0.9, "metadata": {"destination": "Nara"}}"#,
        )
        .unwrap();
        assert_eq!(hit.display_line(), "Nara (score: 0.900)");

        let hit: SimilarityMatch =
            serde_json::from_str(r#"{"id": "bare", "score": 0.25, "metadata": {}}"#).unwrap();
        assert_eq!(hit.display_line(), "bare (score: 0.250)");
    }
}
