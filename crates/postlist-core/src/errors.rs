use postlist_core_types::RequestId;
use thiserror::Error;

/// Result type alias using PostListError
pub type Result<T> = std::result::Result<T, PostListError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure a store operation can report maps to one of these kinds,
/// and each kind maps to a stable code usable by callers and in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    InvalidInput,

    // Remote service
    /// Network failure or non-success HTTP status
    Transport,
    /// Response or cached payload could not be decoded
    Decode,
    /// Remote call exceeded the configured timeout
    Timeout,

    // Local persistence
    Io,
    Serialization,
    Persistence,

    Concurrency,
    /// The store reached a state it cannot continue from
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Transport => "ERR_TRANSPORT",
            ExErrorKind::Decode => "ERR_DECODE",
            ExErrorKind::Timeout => "ERR_TIMEOUT",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Concurrency => "ERR_CONCURRENCY",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification (`kind`) for programmatic handling plus context
/// for debugging: the failing operation, the post involved, and the request
/// the failure belongs to.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            request_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context (a post id, a cache key)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain errors raised by the pure paging operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PostListError {
    /// Pages are 1-based
    #[error("Invalid page {page}: pages start at 1")]
    InvalidPage { page: u32 },

    /// Page size must hold at least one record
    #[error("Invalid page size {page_size}: must be at least 1")]
    InvalidPageSize { page_size: usize },

    /// Remote list response did not carry a total count
    #[error("Remote response is missing the total count header")]
    MissingTotalCount,

    /// Remote total count could not be parsed as a non-negative integer
    #[error("Remote total count is not a non-negative integer: {value}")]
    InvalidTotalCount { value: String },

    /// Every local id up to `u64::MAX` is taken
    #[error("No local post id left above the highest id seen")]
    IdsExhausted,

    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// Conversion from PostListError to ExError
impl From<PostListError> for ExError {
    fn from(err: PostListError) -> Self {
        match err {
            PostListError::InvalidPage { page } => ExError::new(ExErrorKind::InvalidInput)
                .with_message(format!("Invalid page {}: pages start at 1", page)),

            PostListError::InvalidPageSize { page_size } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_message(format!("Invalid page size {}", page_size))
            }

            PostListError::MissingTotalCount => ExError::new(ExErrorKind::Decode)
                .with_message("Remote response is missing the total count header"),

            PostListError::InvalidTotalCount { value } => ExError::new(ExErrorKind::Decode)
                .with_message(format!("Remote total count is not an integer: {}", value)),

            PostListError::IdsExhausted => ExError::new(ExErrorKind::Internal)
                .with_message("No local post id left above the highest id seen"),

            PostListError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to PostListError
impl From<serde_json::Error> for PostListError {
    fn from(err: serde_json::Error) -> Self {
        PostListError::Serialization {
            message: err.to_string(),
        }
    }
}
