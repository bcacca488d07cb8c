use thiserror::Error;

/// Coarse classification of why a call to an external service failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Configuration,
    Transport,
    UpstreamStatus,
    Parse,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Configuration => "configuration",
            FailureKind::Transport => "transport",
            FailureKind::UpstreamStatus => "upstream-status",
            FailureKind::Parse => "parse",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detailed failure reported by an adapter talking to an external service.
///
/// This carries everything needed for diagnostics (status, body, transport
/// message) and is only ever logged. Use cases convert it into a
/// [`DomainError::Client`] before it reaches a caller.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("{detail}")]
    Status { status: u16, detail: String },

    #[error("failed to parse response: {0}")]
    Parse(String),
}

impl UpstreamError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn status(status: u16, detail: impl Into<String>) -> Self {
        Self::Status {
            status,
            detail: detail.into(),
        }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Configuration(_) => FailureKind::Configuration,
            Self::Transport(_) => FailureKind::Transport,
            Self::Status { .. } => FailureKind::UpstreamStatus,
            Self::Parse(_) => FailureKind::Parse,
        }
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error(
        "Missing environment variables: {}. Please check your environment and restart the application.",
        .0.join(", ")
    )]
    MissingSettings(Vec<String>),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A failed call to an external service. The message is fixed per
    /// operation and safe to show; the underlying detail was logged.
    #[error("{message}")]
    Client {
        kind: FailureKind,
        message: &'static str,
    },
}

impl DomainError {
    pub fn missing_settings(names: Vec<String>) -> Self {
        Self::MissingSettings(names)
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn client(kind: FailureKind, message: &'static str) -> Self {
        Self::Client { kind, message }
    }

    /// The failure kind for client errors, `None` for everything else.
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            Self::Client { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Client { .. })
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}
