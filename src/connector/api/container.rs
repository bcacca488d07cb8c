use std::sync::Arc;

use tracing::debug;

use crate::application::{ChatClient, GeneratePlanUseCase, IndexConnector, VectorIndexClient};
use crate::connector::adapter::{GroqChatClient, InMemoryIndexConnector, PineconeConnector};

use super::Settings;

pub struct ContainerConfig {
    pub settings: Settings,
    /// Serve the vector index from process memory instead of Pinecone.
    pub memory_index: bool,
}

/// Composition root: every client is built here exactly once and shared.
pub struct Container {
    plan_use_case: Arc<GeneratePlanUseCase>,
    vector_index: Arc<VectorIndexClient>,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Self {
        let settings = config.settings;

        debug!("Using Groq chat completions at {}", settings.groq_base_url());
        let chat_client: Arc<dyn ChatClient> = Arc::new(GroqChatClient::new(
            settings.groq_api_key(),
            settings.groq_base_url(),
        ));

        let connector: Arc<dyn IndexConnector> = if config.memory_index {
            debug!("Using in-memory vector index");
            Arc::new(InMemoryIndexConnector::new())
        } else {
            debug!(
                "Using Pinecone index {} via {}",
                settings.pinecone_index(),
                settings
                    .pinecone_index_host()
                    .unwrap_or(settings.pinecone_controller_url())
            );
            Arc::new(PineconeConnector::new(
                settings.pinecone_api_key(),
                settings.pinecone_controller_url(),
                settings.pinecone_index_host().map(str::to_string),
            ))
        };

        Self::with_clients(&settings, chat_client, connector)
    }

    /// Assemble a container around already-built clients.
    pub fn with_clients(
        settings: &Settings,
        chat_client: Arc<dyn ChatClient>,
        connector: Arc<dyn IndexConnector>,
    ) -> Self {
        let vector_index = Arc::new(VectorIndexClient::new(
            connector,
            settings.pinecone_index(),
        ));

        Self {
            plan_use_case: Arc::new(GeneratePlanUseCase::new(chat_client)),
            vector_index,
        }
    }

    pub fn plan_use_case(&self) -> Arc<GeneratePlanUseCase> {
        self.plan_use_case.clone()
    }

    pub fn vector_index(&self) -> Arc<VectorIndexClient> {
        self.vector_index.clone()
    }
}
