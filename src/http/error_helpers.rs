//! Error handling utilities for HTTP responses and error context formatting.

use crate::errors::GenaiError;
use reqwest::Response;
use serde::de::DeserializeOwned;

/// Maximum characters to include from a body in decode error messages
const ERROR_BODY_PREVIEW_LENGTH: usize = 200;

/// Google's request ID header name.
///
/// See: <https://cloud.google.com/apis/docs/system-parameters>
const REQUEST_ID_HEADER: &str = "x-goog-request-id";

/// Checks if an HTTP response is successful, returning it if so or an error otherwise.
///
/// # Errors
///
/// Returns [`GenaiError::Api`] with the untouched body on non-success status.
pub(crate) async fn check_response(response: Response) -> Result<Response, GenaiError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(read_error_with_context(response).await)
    }
}

/// Reads an error response into a [`GenaiError::Api`].
///
/// The body is kept verbatim so upstream messages reach the caller unchanged.
/// If the body cannot be read, the message describes the read failure.
pub(crate) async fn read_error_with_context(response: Response) -> GenaiError {
    let status_code = response.status().as_u16();

    // Extract request ID from response headers before consuming the body
    let request_id = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let message = response
        .text()
        .await
        .unwrap_or_else(|e| format!("Failed to read error body: {}", e));

    GenaiError::Api {
        status_code,
        message,
        request_id,
    }
}

/// Deserializes a body, attaching a preview and the full body on failure.
///
/// # Errors
///
/// Returns [`GenaiError::Deserialization`] if `body` does not decode as `T`.
pub(crate) fn deserialize_with_context<T: DeserializeOwned>(
    body: &[u8],
    context: &str,
) -> Result<T, GenaiError> {
    serde_json::from_slice(body).map_err(|e| {
        let body = String::from_utf8_lossy(body).into_owned();
        GenaiError::Deserialization {
            message: format_json_parse_error(context, &body, &e),
            body,
        }
    })
}

fn format_json_parse_error(context: &str, json_str: &str, error: &serde_json::Error) -> String {
    let preview = truncate_for_context(json_str, ERROR_BODY_PREVIEW_LENGTH);
    format!("failed to parse {}: {} | Context: {}", context, error, preview)
}

/// Truncates a string to specified length, adding "..." if truncated.
///
/// Uses character-boundary-aware slicing to prevent panics on multi-byte UTF-8 characters.
fn truncate_for_context(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let truncate_at = s
            .char_indices()
            .take_while(|(i, c)| i + c.len_utf8() <= max_len)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}...", &s[..truncate_at])
    }
}
