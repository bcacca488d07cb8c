use crate::connector::adapter::{DEFAULT_BASE_URL, DEFAULT_CONTROLLER_URL};
use crate::domain::DomainError;

pub const GROQ_API_KEY: &str = "GROQ_API_KEY";
pub const PINECONE_API_KEY: &str = "PINECONE_API_KEY";
pub const PINECONE_INDEX: &str = "PINECONE_INDEX";

pub const GROQ_BASE_URL: &str = "GROQ_BASE_URL";
pub const PINECONE_CONTROLLER_URL: &str = "PINECONE_CONTROLLER_URL";
pub const PINECONE_INDEX_HOST: &str = "PINECONE_INDEX_HOST";

/// Process-wide settings read from the environment.
///
/// | Variable                  | Required | Default                          |
/// |---------------------------|----------|----------------------------------|
/// | `GROQ_API_KEY`            | yes      |                                  |
/// | `PINECONE_API_KEY`        | yes      |                                  |
/// | `PINECONE_INDEX`          | yes      |                                  |
/// | `GROQ_BASE_URL`           | no       | `https://api.groq.com/openai/v1` |
/// | `PINECONE_CONTROLLER_URL` | no       | `https://api.pinecone.io`        |
/// | `PINECONE_INDEX_HOST`     | no       | looked up from the controller    |
#[derive(Clone)]
pub struct Settings {
    groq_api_key: String,
    pinecone_api_key: String,
    pinecone_index: String,
    groq_base_url: String,
    pinecone_controller_url: String,
    pinecone_index_host: Option<String>,
}

impl Settings {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from any name → value lookup.
    ///
    /// Fails with every missing required name at once, in declaration order.
    /// Empty and whitespace-only values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let groq_api_key = read(GROQ_API_KEY);
        let pinecone_api_key = read(PINECONE_API_KEY);
        let pinecone_index = read(PINECONE_INDEX);

        match (groq_api_key, pinecone_api_key, pinecone_index) {
            (Some(groq_api_key), Some(pinecone_api_key), Some(pinecone_index)) => Ok(Self {
                groq_api_key,
                pinecone_api_key,
                pinecone_index,
                groq_base_url: read(GROQ_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                pinecone_controller_url: read(PINECONE_CONTROLLER_URL)
                    .unwrap_or_else(|| DEFAULT_CONTROLLER_URL.to_string()),
                pinecone_index_host: read(PINECONE_INDEX_HOST),
            }),
            (groq, pinecone, index) => {
                let missing = [
                    (GROQ_API_KEY, groq.is_none()),
                    (PINECONE_API_KEY, pinecone.is_none()),
                    (PINECONE_INDEX, index.is_none()),
                ]
                .into_iter()
                .filter(|(_, missing)| *missing)
                .map(|(name, _)| name.to_string())
                .collect();
                Err(DomainError::missing_settings(missing))
            }
        }
    }

    pub fn groq_api_key(&self) -> &str {
        &self.groq_api_key
    }

    pub fn pinecone_api_key(&self) -> &str {
        &self.pinecone_api_key
    }

    pub fn pinecone_index(&self) -> &str {
        &self.pinecone_index
    }

    pub fn groq_base_url(&self) -> &str {
        &self.groq_base_url
    }

    pub fn pinecone_controller_url(&self) -> &str {
        &self.pinecone_controller_url
    }

    pub fn pinecone_index_host(&self) -> Option<&str> {
        self.pinecone_index_host.as_deref()
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("groq_api_key", &"<redacted>")
            .field("pinecone_api_key", &"<redacted>")
            .field("pinecone_index", &self.pinecone_index)
            .field("groq_base_url", &self.groq_base_url)
            .field("pinecone_controller_url", &self.pinecone_controller_url)
            .field("pinecone_index_host", &self.pinecone_index_host)
            .finish()
    }
}
