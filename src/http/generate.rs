use super::common::JSON_CONTENT_TYPE;
use super::error_helpers::check_response;
use super::loud_wire;
use crate::auth::TokenSource;
use crate::errors::GenaiError;
use crate::request::RequestPayload;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client as ReqwestClient, Url};
use tracing::{debug, error};

/// Sends one generation request and returns the raw response body.
///
/// The response is fully consumed before returning, on success and on
/// upstream errors alike.
///
/// # Errors
///
/// Returns an error if:
/// - The payload cannot be serialized
/// - The URL or request cannot be built
/// - No bearer token can be obtained
/// - The HTTP request fails
/// - The response status is not successful (body surfaced verbatim)
pub(crate) async fn send_generate_request(
    http_client: &ReqwestClient,
    tokens: &TokenSource,
    url: &str,
    payload: &RequestPayload,
) -> Result<Bytes, GenaiError> {
    let body = Bytes::from(serde_json::to_vec(payload).map_err(GenaiError::Serialization)?);

    let url = Url::parse(url)
        .map_err(|e| GenaiError::RequestConstruction(format!("invalid URL {url:?}: {e}")))?;

    let token = tokens.bearer_token().await?;

    let request = http_client
        .post(url.clone())
        .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
        .bearer_auth(token)
        .body(body.clone())
        .build()
        .map_err(|e| GenaiError::RequestConstruction(e.to_string()))?;

    let request_id = loud_wire::next_request_id();
    loud_wire::log_request(
        request_id,
        "POST",
        url.as_str(),
        std::str::from_utf8(&body).ok(),
    );
    debug!(url = %url, bytes = body.len(), "Sending generation request");

    let response = http_client.execute(request).await.map_err(|e| {
        error!(error = %e, "HTTP request failed");
        GenaiError::Http(e)
    })?;

    let status = response.status();
    loud_wire::log_response_status(request_id, status.as_u16());
    debug!(status = %status, "Received response");

    let response = check_response(response).await.inspect_err(|e| {
        error!(error = %e, "Vertex AI returned an error response");
    })?;
    let response_body = response.bytes().await.map_err(GenaiError::Http)?;

    loud_wire::log_response_body(request_id, &response_body);

    Ok(response_body)
}
