use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::{IndexConnector, VectorIndex};
use crate::domain::{IndexStats, SimilarityMatch, UpstreamError, VectorRecord};

pub const DEFAULT_CONTROLLER_URL: &str = "https://api.pinecone.io";
const API_VERSION: &str = "2024-07";
const API_KEY_HEADER: &str = "Api-Key";
const API_VERSION_HEADER: &str = "X-Pinecone-API-Version";

#[derive(Deserialize)]
struct IndexDescription {
    host: Option<String>,
}

#[derive(Serialize)]
struct UpsertRequest<'a> {
    vectors: &'a [VectorRecord],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpsertResponse {
    #[serde(default)]
    upserted_count: Option<u64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<SimilarityMatch>,
}

/// Shared HTTP plumbing for the control and data planes.
#[derive(Clone)]
struct PineconeHttp {
    client: reqwest::Client,
    api_key: String,
}

impl PineconeHttp {
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        what: &str,
    ) -> Result<T, UpstreamError> {
        let response = request
            .header(API_KEY_HEADER, &self.api_key)
            .header(API_VERSION_HEADER, API_VERSION)
            .send()
            .await
            .map_err(|e| UpstreamError::transport(format!("Pinecone {what}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Pinecone {} returned {}", what, status);
            return Err(UpstreamError::status(
                status.as_u16(),
                format!("Pinecone {what} returned {status}: {body}"),
            ));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| UpstreamError::parse(format!("Pinecone {what}: {e}")))
    }
}

/// Opens Pinecone indexes by name.
///
/// The data-plane host is looked up through the control plane
/// (`GET /indexes/{name}`) unless an explicit host was configured.
pub struct PineconeConnector {
    http: PineconeHttp,
    controller_url: String,
    index_host: Option<String>,
}

impl PineconeConnector {
    pub fn new(
        api_key: impl Into<String>,
        controller_url: impl Into<String>,
        index_host: Option<String>,
    ) -> Self {
        let controller_url: String = controller_url.into();
        Self {
            http: PineconeHttp {
                client: reqwest::Client::new(),
                api_key: api_key.into(),
            },
            controller_url: controller_url.trim_end_matches('/').to_string(),
            index_host,
        }
    }

    async fn resolve_host(&self, index_name: &str) -> Result<String, UpstreamError> {
        if let Some(host) = &self.index_host {
            return Ok(host.clone());
        }

        let url = format!("{}/indexes/{}", self.controller_url, index_name);
        let description: IndexDescription = self
            .http
            .send(self.http.client.get(&url), "describe_index")
            .await?;

        description
            .host
            .filter(|h| !h.is_empty())
            .ok_or_else(|| {
                UpstreamError::configuration(format!("index {index_name} has no data-plane host"))
            })
    }
}

/// Prefix a bare hostname with `https://` and drop any trailing slash.
fn normalize_host(host: &str) -> String {
    let host = host.trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{host}")
    }
}

#[async_trait]
impl IndexConnector for PineconeConnector {
    async fn open(&self, index_name: &str) -> Result<Arc<dyn VectorIndex>, UpstreamError> {
        let host = normalize_host(&self.resolve_host(index_name).await?);
        debug!("Pinecone index {} served from {}", index_name, host);

        Ok(Arc::new(PineconeIndex {
            http: self.http.clone(),
            name: index_name.to_string(),
            host,
        }))
    }
}

/// Data-plane handle to a single Pinecone index.
pub struct PineconeIndex {
    http: PineconeHttp,
    name: String,
    host: String,
}

impl PineconeIndex {
    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.http.client.post(format!("{}{}", self.host, path))
    }
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    fn name(&self) -> &str {
        &self.name
    }

    async fn describe_stats(&self) -> Result<IndexStats, UpstreamError> {
        self.http
            .send(
                self.post("/describe_index_stats").json(&serde_json::json!({})),
                "describe_index_stats",
            )
            .await
    }

    async fn upsert(&self, records: &[VectorRecord]) -> Result<u64, UpstreamError> {
        let response: UpsertResponse = self
            .http
            .send(
                self.post("/vectors/upsert")
                    .json(&UpsertRequest { vectors: records }),
                "upsert",
            )
            .await?;

        Ok(response.upserted_count.unwrap_or(records.len() as u64))
    }

    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<SimilarityMatch>, UpstreamError> {
        let request = QueryRequest {
            vector,
            top_k,
            include_metadata: true,
        };
        let response: QueryResponse = self
            .http
            .send(self.post("/query").json(&request), "query")
            .await?;

        Ok(response.matches)
    }
}
