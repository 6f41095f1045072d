#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum CreateError {
    #[error("conflict")]
    Conflict,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum UpdateError {
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum DeleteError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("conflicting {0}")]
    Conflict(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("no connection")]
    NoConnection,
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

/// Failure of a generative endpoint.
///
/// Rate limiting is classified structurally where the transport allows it
/// (HTTP 429). `classify` covers errors that only arrive as message text.
#[derive(thiserror::Error, Debug)]
pub enum GenerateError {
    #[error("rate limited")]
    RateLimited,
    #[error("no connection")]
    NoConnection,
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl GenerateError {
    #[must_use]
    pub fn classify(message: &str) -> Self {
        if message.contains("\"code\":429")
            || message.contains("RESOURCE_EXHAUSTED")
            || message.starts_with("429")
        {
            GenerateError::RateLimited
        } else {
            GenerateError::Other(message.to_string().into())
        }
    }

    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, GenerateError::RateLimited)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::status_line("429 Too Many Requests", true)]
    #[case::embedded_code("error: {\"code\":429,\"status\":\"RESOURCE_EXHAUSTED\"}", true)]
    #[case::status_name("quota exceeded: RESOURCE_EXHAUSTED", true)]
    #[case::server_error("500 Internal Server Error", false)]
    #[case::network("failed to fetch", false)]
    fn test_classify(#[case] message: &str, #[case] rate_limited: bool) {
        assert_eq!(GenerateError::classify(message).is_rate_limited(), rate_limited);
    }

    #[test]
    fn test_classify_other_keeps_message() {
        assert_eq!(
            GenerateError::classify("503 Service Unavailable").to_string(),
            "503 Service Unavailable"
        );
    }
}
