use crate::config::MissingConfig;
use thiserror::Error;

/// Defines errors that can occur when talking to a Vertex AI model.
///
/// Construction errors (`MissingConfig`, `Credential`, `ClientBuild`) are only
/// returned by [`ClientBuilder::build`](crate::ClientBuilder::build). All other
/// variants are per-call.
///
/// # Example: Handling API Errors
///
/// ```ignore
/// match client.generate("Hello").send().await {
///     Err(GenaiError::Api { status_code: 429, request_id, .. }) => {
///         tracing::warn!("Rate limited, request_id: {:?}", request_id);
///     }
///     Err(GenaiError::Api { status_code, message, .. }) => {
///         tracing::error!("Vertex AI error {}: {}", status_code, message);
///     }
///     // ...
/// }
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenaiError {
    /// One or more required configuration fields were empty.
    #[error(transparent)]
    MissingConfig(#[from] MissingConfig),
    /// The credential material could not be parsed.
    #[error("Invalid credentials: {0}")]
    Credential(String),
    /// A bearer token could not be obtained for the request.
    #[error("Failed to obtain access token: {0}")]
    Auth(String),
    #[error("Failed to serialize request payload: {0}")]
    Serialization(#[source] serde_json::Error),
    /// The HTTP request object could not be built, usually a malformed URL.
    #[error("Failed to build HTTP request: {0}")]
    RequestConstruction(String),
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-success status from Vertex AI.
    ///
    /// `message` holds the raw response body exactly as it was received.
    #[error("API error (HTTP {status_code}): {message}")]
    Api {
        /// HTTP status code (e.g., 400, 429, 500)
        status_code: u16,
        /// Raw response body
        message: String,
        /// Request ID from `x-goog-request-id` header, if available
        request_id: Option<String>,
    },
    /// The response body was not a JSON array of response entries.
    #[error("Failed to decode response body: {message}")]
    Deserialization {
        /// Decoder error with a preview of the offending body
        message: String,
        /// The complete raw body
        body: String,
    },
    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("Request cancelled")]
    Cancelled,
    /// Failed to build the HTTP client.
    ///
    /// This typically only occurs in exceptional circumstances such as
    /// TLS backend initialization failures.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl GenaiError {
    /// Returns `true` if this error is likely transient and the request may succeed on retry.
    ///
    /// The client never retries on its own; this is a hint for callers that
    /// implement their own policy.
    ///
    /// ```rust
    /// use vertex_genai::GenaiError;
    ///
    /// let quota = GenaiError::Api {
    ///     status_code: 429,
    ///     message: r#"{"error":"quota exceeded"}"#.to_string(),
    ///     request_id: None,
    /// };
    /// assert!(quota.is_retryable());
    ///
    /// let bad_request = GenaiError::Api {
    ///     status_code: 400,
    ///     message: "Invalid datastore".to_string(),
    ///     request_id: None,
    /// };
    /// assert!(!bad_request.is_retryable());
    /// ```
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            GenaiError::Http(_) | GenaiError::Timeout(_) | GenaiError::Auth(_) => true,

            GenaiError::Api { status_code, .. } => *status_code == 429 || *status_code >= 500,

            GenaiError::MissingConfig(_)
            | GenaiError::Credential(_)
            | GenaiError::Serialization(_)
            | GenaiError::RequestConstruction(_)
            | GenaiError::Deserialization { .. }
            | GenaiError::Cancelled
            | GenaiError::ClientBuild(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_keeps_body_verbatim() {
        let error = GenaiError::Api {
            status_code: 429,
            message: r#"{"error":"quota exceeded"}"#.to_string(),
            request_id: Some("req-123".to_string()),
        };
        let display = format!("{}", error);
        assert!(display.contains("429"));
        assert!(display.contains(r#"{"error":"quota exceeded"}"#));
    }

    #[test]
    fn test_missing_config_is_transparent() {
        let error: GenaiError = MissingConfig::new(vec!["project_id"]).into();
        assert_eq!(error.to_string(), "missing config: project_id");
    }

    #[test]
    fn test_deserialization_display() {
        let error = GenaiError::Deserialization {
            message: "expected a sequence | Context: {}".to_string(),
            body: "{}".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to decode response body"));
        assert!(display.contains("expected a sequence"));
    }

    #[test]
    fn test_serialization_display() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = GenaiError::Serialization(json_err);
        assert!(format!("{}", error).contains("Failed to serialize request payload"));
    }

    #[test]
    fn test_timeout_display() {
        let error = GenaiError::Timeout(std::time::Duration::from_secs(30));
        let display = format!("{}", error);
        assert!(display.contains("Request timed out"));
        assert!(display.contains("30s"));
    }

    #[test]
    fn test_cancelled_display() {
        assert_eq!(GenaiError::Cancelled.to_string(), "Request cancelled");
    }

    #[test]
    fn test_is_retryable_rate_limit_and_server_errors() {
        for status_code in [429, 500, 502, 503, 504] {
            let error = GenaiError::Api {
                status_code,
                message: "Server error".to_string(),
                request_id: None,
            };
            assert!(
                error.is_retryable(),
                "{} errors should be retryable",
                status_code
            );
        }
    }

    #[test]
    fn test_is_retryable_client_errors_4xx_not_retryable() {
        for status_code in [400, 401, 403, 404] {
            let error = GenaiError::Api {
                status_code,
                message: "Client error".to_string(),
                request_id: None,
            };
            assert!(
                !error.is_retryable(),
                "{} errors should NOT be retryable",
                status_code
            );
        }
    }

    #[test]
    fn test_is_retryable_timeout_and_auth() {
        assert!(GenaiError::Timeout(std::time::Duration::from_secs(1)).is_retryable());
        assert!(GenaiError::Auth("token endpoint unreachable".to_string()).is_retryable());
    }

    #[test]
    fn test_is_retryable_permanent_errors() {
        let permanent = [
            GenaiError::Credential("bad key".to_string()),
            GenaiError::RequestConstruction("bad url".to_string()),
            GenaiError::Deserialization {
                message: "bad body".to_string(),
                body: String::new(),
            },
            GenaiError::Cancelled,
            GenaiError::ClientBuild("tls".to_string()),
            GenaiError::MissingConfig(MissingConfig::new(vec!["credentials"])),
        ];
        for error in permanent {
            assert!(!error.is_retryable(), "{error:?} should NOT be retryable");
        }
    }
}
