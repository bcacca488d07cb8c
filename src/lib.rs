pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    build_prompt, ChatClient, GeneratePlanUseCase, IndexConnector, VectorIndex,
    VectorIndexClient, DEFAULT_TOP_K, INDEX_INIT_FAILURE_MESSAGE, NO_PLAN_PLACEHOLDER,
    PLAN_FAILURE_MESSAGE, QUERY_FAILURE_MESSAGE, UPSERT_FAILURE_MESSAGE,
};

pub use cli::{Commands, IndexCommands};

pub use connector::{
    Container, ContainerConfig, GroqChatClient, InMemoryIndexConnector, InMemoryVectorIndex,
    PineconeConnector, PineconeIndex, Router, Settings,
};

pub use connector::tui::{PlannerForm, PLAN_FALLBACK_MESSAGE};

pub use domain::{
    ChatMessage, DomainError, FailureKind, IndexStats, NamespaceSummary, Role, SimilarityMatch,
    TravelMetadata, UpstreamError, VectorRecord,
};
